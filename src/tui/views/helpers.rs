//! Common helper functions for view rendering
//!
//! Reusable pieces shared by the list, header and help views.

use crate::source::FetchError;
use crate::tui::theme::Theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Update scroll offset so the line range `[start, end)` is visible
///
/// Keeps `scroll_buffer` lines of context above the selection when possible.
pub fn update_scroll_offset(
    start: usize,
    end: usize,
    visible_height: usize,
    scroll_offset: &mut usize,
    scroll_buffer: usize,
) {
    if visible_height == 0 {
        return;
    }
    // Selection above the viewport
    if start < *scroll_offset + scroll_buffer {
        *scroll_offset = start.saturating_sub(scroll_buffer);
    }
    // Selection (or at least its first line) below the viewport
    if end > *scroll_offset + visible_height {
        let height = end - start;
        *scroll_offset = if height >= visible_height {
            start
        } else {
            end - visible_height
        };
    }
}

/// Render a loading state message
pub fn render_loading_state(f: &mut Frame, area: Rect, title: &str, message: &str, theme: &Theme) {
    let text = vec![
        Line::from(message),
        Line::from(""),
        Line::from("Please wait..."),
    ];
    let paragraph = Paragraph::new(text)
        .block(create_themed_block(title, theme))
        .style(Style::default().fg(theme.text_secondary));
    f.render_widget(paragraph, area);
}

/// Render an empty state message
pub fn render_empty_state(
    f: &mut Frame,
    area: Rect,
    title: &str,
    message: &str,
    instructions: &str,
    theme: &Theme,
) {
    let text = vec![
        Line::from(message),
        Line::from(""),
        Line::from(instructions),
    ];
    let paragraph = Paragraph::new(text)
        .block(create_themed_block(title, theme))
        .style(Style::default().fg(theme.text_secondary));
    f.render_widget(paragraph, area);
}

/// Render a failed fetch with a retry hint
pub fn render_error_state(f: &mut Frame, area: Rect, error: &FetchError, theme: &Theme) {
    let error_style = theme.message_style(true);
    let mut text = vec![
        Line::from(Span::styled("Failed to load Waybill status", error_style)),
        Line::from(""),
        Line::from(vec![
            Span::styled("Error: ", theme.label_style()),
            Span::raw(error.to_string()),
        ]),
    ];
    if let Some(status) = error.status() {
        text.push(Line::from(vec![
            Span::styled("HTTP status: ", theme.label_style()),
            Span::raw(status.to_string()),
        ]));
    }
    text.push(Line::from(""));
    text.push(Line::from(vec![
        Span::raw("Press "),
        Span::styled("r", theme.footer_key_style()),
        Span::raw(" to retry"),
    ]));

    let block = Block::default()
        .title(" Error ")
        .borders(Borders::ALL)
        .border_style(error_style);
    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

/// Truncate a message to a maximum number of characters
///
/// If the message exceeds max_len, truncates and adds "...".
pub fn truncate_message(message: &str, max_len: usize) -> String {
    if message.chars().count() > max_len {
        let kept: String = message.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        message.to_string()
    }
}

/// Create a block with title and borders using theme
pub fn create_themed_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.text_label))
}
