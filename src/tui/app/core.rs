//! Application state and main TUI logic

use super::state::{RefreshState, STATUS_MESSAGE_TIMEOUT, UIState, ViewState};
use crate::config::Config;
use crate::dashboard::{DashboardController, Route};
use crate::models::Waybill;
use crate::search::SearchOptions;
use crate::tui::Theme;
use std::time::{Duration, Instant};

/// Main application state
pub struct App {
    // Core data
    pub(crate) controller: DashboardController,
    pub(crate) config: Config,
    pub(crate) theme: Theme,
    /// Where snapshots come from, shown in the header
    pub(crate) source_label: String,

    // Organized state
    pub(crate) view_state: ViewState,
    pub(crate) ui_state: UIState,
    pub(crate) refresh_state: RefreshState,
}

impl App {
    /// Create the app and queue the initial fetch for `route`
    pub fn new(
        route: Route,
        config: Config,
        theme: Theme,
        source_label: impl Into<String>,
        refresh_interval: Option<Duration>,
    ) -> Self {
        let search = SearchOptions {
            threshold: config.search.threshold,
        };
        let mut controller = DashboardController::with_search_options(route, search);
        let initial = controller.refresh();

        Self {
            controller,
            config,
            theme,
            source_label: source_label.into(),
            view_state: ViewState::default(),
            ui_state: UIState::default(),
            refresh_state: RefreshState {
                interval: refresh_interval,
                last_refresh: Some(Instant::now()),
                pending: Some(initial),
            },
        }
    }

    pub fn controller(&self) -> &DashboardController {
        &self.controller
    }

    pub fn selected_index(&self) -> usize {
        self.view_state.selected_index
    }

    pub fn filter_mode(&self) -> bool {
        self.view_state.filter_mode
    }

    pub fn show_help(&self) -> bool {
        self.ui_state.show_help
    }

    pub fn status_message(&self) -> Option<&(String, bool)> {
        self.ui_state.status_message.as_ref()
    }

    /// The Waybill under the cursor
    pub fn selected_waybill(&self) -> Option<&Waybill> {
        self.controller
            .visible()
            .get(self.view_state.selected_index)
            .copied()
    }

    pub(crate) fn selected_namespace(&self) -> Option<String> {
        self.selected_waybill()
            .map(|waybill| waybill.namespace().to_string())
    }

    pub fn set_status_message(&mut self, message: (String, bool)) {
        self.ui_state.status_message = Some(message);
        self.ui_state.status_message_time = Some(Instant::now());
    }

    pub(crate) fn clear_status_message(&mut self) {
        self.ui_state.status_message = None;
        self.ui_state.status_message_time = None;
    }

    pub(crate) fn check_status_message_timeout(&mut self) {
        if self
            .ui_state
            .status_message_time
            .is_some_and(|at| at.elapsed() >= STATUS_MESSAGE_TIMEOUT)
        {
            self.clear_status_message();
        }
    }

    /// Keep the selection inside the visible list
    pub(crate) fn clamp_selection(&mut self) {
        let len = self.controller.visible().len();
        if len == 0 {
            self.view_state.selected_index = 0;
            self.view_state.scroll_offset = 0;
        } else if self.view_state.selected_index >= len {
            self.view_state.selected_index = len - 1;
        }
    }

    pub(crate) fn reset_selection(&mut self) {
        self.view_state.selected_index = 0;
        self.view_state.scroll_offset = 0;
    }

    /// Cancel in-flight work before the app goes away
    pub fn unmount(&mut self) {
        self.refresh_state.pending = None;
        self.controller.unmount();
    }
}
