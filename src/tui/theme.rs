//! Theme and styling definitions
//!
//! A single place for every color the dashboard uses.

use crate::view::{Outcome, OutputLineKind, StatusColor};
use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    // Header colors
    pub header_label: Color,
    pub header_value: Color,
    pub header_route_all: Color,
    pub header_route_namespace: Color,
    pub header_filter: Color,

    // Status colors
    pub status_success: Color,
    pub status_failure: Color,
    pub status_neutral: Color,
    pub status_warning: Color,

    // Badge colors
    pub badge_fg: Color,
    pub badge_bg: Color,

    // Apply output colors
    pub output_warning: Color,
    pub output_configured: Color,
    pub output_error: Color,
    pub output_dry_run: Color,
    pub output_plain: Color,

    // List colors
    pub table_selected: Color,
    pub table_selected_bg: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_label: Color,
    pub text_link: Color,

    // Input colors
    pub filter_prompt: Color,

    // Footer colors
    pub footer_key: Color,
    pub message_info: Color,
    pub message_error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header_label: Color::Cyan,
            header_value: Color::Yellow,
            header_route_all: Color::Green,
            header_route_namespace: Color::Yellow,
            header_filter: Color::Magenta,

            status_success: Color::Green,
            status_failure: Color::Red,
            status_neutral: Color::Gray,
            status_warning: Color::Yellow,

            badge_fg: Color::Black,
            badge_bg: Color::Cyan,

            output_warning: Color::Yellow,
            output_configured: Color::Green,
            output_error: Color::Red,
            output_dry_run: Color::Blue,
            output_plain: Color::White,

            table_selected: Color::White,
            table_selected_bg: Color::DarkGray,

            text_primary: Color::White,
            text_secondary: Color::Gray,
            text_label: Color::Cyan,
            text_link: Color::Blue,

            filter_prompt: Color::Yellow,

            footer_key: Color::Yellow,
            message_info: Color::Green,
            message_error: Color::Red,
        }
    }
}

impl Theme {
    pub fn header_route_style(&self, is_all: bool) -> Style {
        Style::default()
            .fg(if is_all {
                self.header_route_all
            } else {
                self.header_route_namespace
            })
            .add_modifier(Modifier::BOLD)
    }

    pub fn label_style(&self) -> Style {
        Style::default().fg(self.text_label)
    }

    /// Row color for the three-state run status
    pub fn status_style(&self, status: StatusColor) -> Style {
        Style::default().fg(match status {
            StatusColor::Success => self.status_success,
            StatusColor::Failure => self.status_failure,
            StatusColor::Neutral => self.status_neutral,
        })
    }

    pub fn outcome_style(&self, outcome: Outcome) -> Style {
        Style::default().fg(match outcome {
            Outcome::Success => self.status_success,
            Outcome::Warning => self.status_warning,
            Outcome::Failure => self.status_failure,
            Outcome::Pending => self.status_neutral,
        })
    }

    pub fn badge_style(&self) -> Style {
        Style::default()
            .fg(self.badge_fg)
            .bg(self.badge_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn output_line_style(&self, kind: OutputLineKind) -> Style {
        Style::default().fg(match kind {
            OutputLineKind::Warning => self.output_warning,
            OutputLineKind::Configured => self.output_configured,
            OutputLineKind::Error => self.output_error,
            OutputLineKind::DryRun => self.output_dry_run,
            OutputLineKind::Plain => self.output_plain,
        })
    }

    pub fn link_style(&self) -> Style {
        Style::default()
            .fg(self.text_link)
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn table_selected_style(&self) -> Style {
        Style::default()
            .fg(self.table_selected)
            .bg(self.table_selected_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn footer_key_style(&self) -> Style {
        Style::default()
            .fg(self.footer_key)
            .add_modifier(Modifier::BOLD)
    }

    pub fn filter_prompt_style(&self) -> Style {
        Style::default()
            .fg(self.filter_prompt)
            .add_modifier(Modifier::BOLD)
    }

    pub fn message_style(&self, is_error: bool) -> Style {
        Style::default().fg(if is_error {
            self.message_error
        } else {
            self.message_info
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_colors_are_distinct() {
        let theme = Theme::default();
        let success = theme.status_style(StatusColor::Success);
        let failure = theme.status_style(StatusColor::Failure);
        let neutral = theme.status_style(StatusColor::Neutral);
        assert_ne!(success, failure);
        assert_ne!(success, neutral);
        assert_ne!(failure, neutral);
    }
}
