//! Help view rendering

use crate::tui::keybindings::get_help_commands;
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use super::helpers::create_themed_block;

/// Render the help overlay centered in `area`
pub fn render_help(f: &mut Frame, area: Rect, theme: &Theme) {
    let commands = get_help_commands();
    let key_width = commands.iter().map(|(k, _)| k.len()).max().unwrap_or(0);

    let mut lines: Vec<Line> = commands
        .iter()
        .map(|(key, description)| {
            Line::from(vec![
                Span::styled(format!("{:<width$}", key, width = key_width), theme.footer_key_style()),
                Span::raw("  "),
                Span::raw(*description),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from("Press any key to close"));

    let width = (key_width as u16 + 52).min(area.width);
    let height = (lines.len() as u16 + 2).min(area.height);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(create_themed_block(" Help ", theme)),
        popup,
    );
}
