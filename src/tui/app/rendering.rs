//! Rendering logic for the application

use super::core::App;
use crate::tui::views::{
    FOOTER_HEIGHT, HEADER_HEIGHT, render_footer, render_header, render_help, render_waybill_list,
};
use chrono::Utc;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

impl App {
    /// Main render entry point
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(f.area());

        let now = Utc::now();
        let no_icons = self.config.ui.no_icons;

        render_header(
            f,
            chunks[0],
            &self.controller,
            &self.source_label,
            now,
            &self.theme,
            no_icons,
        );

        // Rough page size for PageUp/PageDown: one line per collapsed row
        self.view_state.page_size = chunks[1].height.saturating_sub(2) as usize;
        render_waybill_list(
            f,
            chunks[1],
            &self.controller,
            self.view_state.selected_index,
            &mut self.view_state.scroll_offset,
            now,
            &self.theme,
            no_icons,
        );

        render_footer(
            f,
            chunks[2],
            self.view_state.filter_mode,
            self.controller.query(),
            self.ui_state.status_message.as_ref(),
            self.controller.display_mode(),
            &self.theme,
        );

        if self.ui_state.show_help {
            render_help(f, f.area(), &self.theme);
        }
    }
}
