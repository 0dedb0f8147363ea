//! Event handling for the application
//!
//! Keyboard and mouse input for the list, the search prompt and the help
//! overlay.

use super::core::App;
use crate::dashboard::{DisplayMode, OutcomeFilter, Route};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

impl App {
    /// Main keyboard event handler
    ///
    /// Returns Some(true) to quit, None for normal continuation
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<bool> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(true);
        }

        if self.ui_state.show_help {
            // Any key closes help
            self.ui_state.show_help = false;
            return None;
        }

        if self.view_state.filter_mode {
            return self.handle_filter_key(key);
        }

        // Esc dismisses a status message before anything else
        if self.ui_state.status_message.is_some() && key.code == KeyCode::Esc {
            self.clear_status_message();
            return None;
        }
        if key.code != KeyCode::Char('r') {
            self.clear_status_message();
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return Some(true),
            KeyCode::Esc => return self.handle_escape(),
            KeyCode::Char('j') | KeyCode::Down => self.select_next(1),
            KeyCode::Char('k') | KeyCode::Up => self.select_previous(1),
            KeyCode::PageDown => self.select_next(self.view_state.page_size.max(1)),
            KeyCode::PageUp => self.select_previous(self.view_state.page_size.max(1)),
            KeyCode::Char('g') | KeyCode::Home => self.view_state.selected_index = 0,
            KeyCode::Char('G') | KeyCode::End => {
                let len = self.controller.visible().len();
                self.view_state.selected_index = len.saturating_sub(1);
            }
            KeyCode::Enter => match self.controller.display_mode() {
                DisplayMode::List => {
                    if let Some(namespace) = self.selected_namespace() {
                        self.navigate(Route::Namespace(namespace));
                    }
                }
                DisplayMode::Single => self.toggle_selected(),
            },
            KeyCode::Char(' ') | KeyCode::Tab => self.toggle_selected(),
            KeyCode::Char('/') => {
                self.view_state.filter_mode = true;
            }
            KeyCode::Char('o') => {
                let filter = self.controller.cycle_outcome_filter();
                self.reset_selection();
                self.set_status_message((format!("Outcome filter: {}", filter.label()), false));
            }
            KeyCode::Char('r') => {
                self.request_refresh();
                self.set_status_message((
                    format!("Refreshing {}", self.controller.route()),
                    false,
                ));
            }
            KeyCode::Char('?') => {
                self.ui_state.show_help = true;
            }
            _ => {}
        }
        None
    }

    /// Keys while the search prompt is open. The query is applied live.
    fn handle_filter_key(&mut self, key: KeyEvent) -> Option<bool> {
        match key.code {
            KeyCode::Esc => {
                self.view_state.filter_mode = false;
                self.controller.set_query("");
                self.reset_selection();
            }
            KeyCode::Enter => {
                self.view_state.filter_mode = false;
            }
            KeyCode::Backspace => {
                let mut query = self.controller.query().to_string();
                query.pop();
                self.controller.set_query(query);
                self.reset_selection();
            }
            KeyCode::Char(c) => {
                let query = format!("{}{}", self.controller.query(), c);
                self.controller.set_query(query);
                self.reset_selection();
            }
            _ => {}
        }
        None
    }

    /// Esc: clear search and filter, then leave namespace view, then quit
    fn handle_escape(&mut self) -> Option<bool> {
        if !self.controller.query().is_empty()
            || self.controller.outcome_filter() != OutcomeFilter::All
        {
            self.controller.set_query("");
            self.controller.set_outcome_filter(OutcomeFilter::All);
            self.reset_selection();
            return None;
        }
        if let Route::Namespace(_) = self.controller.route() {
            self.navigate(Route::All);
            return None;
        }
        Some(true)
    }

    /// Mouse wheel moves the selection
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.select_next(1),
            MouseEventKind::ScrollUp => self.select_previous(1),
            _ => {}
        }
    }

    fn select_next(&mut self, step: usize) {
        let len = self.controller.visible().len();
        if len > 0 {
            self.view_state.selected_index = (self.view_state.selected_index + step).min(len - 1);
        }
    }

    fn select_previous(&mut self, step: usize) {
        self.view_state.selected_index = self.view_state.selected_index.saturating_sub(step);
    }

    fn toggle_selected(&mut self) {
        if let Some(namespace) = self.selected_namespace() {
            self.controller.toggle(&namespace);
        }
    }
}
