//! Footer view rendering

use crate::dashboard::DisplayMode;
use crate::tui::keybindings::get_navigation_commands;
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Height of the footer including borders
pub const FOOTER_HEIGHT: u16 = 3;

/// Render the footer based on current application state
pub fn render_footer(
    f: &mut Frame,
    area: Rect,
    filter_mode: bool,
    query: &str,
    status_message: Option<&(String, bool)>,
    mode: DisplayMode,
    theme: &Theme,
) {
    let spans: Vec<Span> = if filter_mode {
        vec![
            Span::styled("/", theme.filter_prompt_style()),
            Span::raw(query.to_string()),
            Span::raw("_"), // Cursor
            Span::raw("  [Enter: keep, Esc: clear]"),
        ]
    } else if let Some((message, is_error)) = status_message {
        vec![Span::styled(message.clone(), theme.message_style(*is_error))]
    } else {
        navigation_spans(mode, theme)
    };

    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}

fn navigation_spans(mode: DisplayMode, theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, command) in get_navigation_commands(mode).into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            format!("<{}>", command.key),
            theme.footer_key_style(),
        ));
        spans.push(Span::raw(format!(" {}", command.label)));
    }
    spans
}
