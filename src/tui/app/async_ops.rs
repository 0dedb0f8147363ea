//! Async fetch management
//!
//! The app never awaits: it hands [`FetchTicket`]s to the main loop, which
//! spawns them, and polls the controller each frame for results.

use super::core::App;
use crate::dashboard::{FetchTicket, Phase, Route};
use std::time::Instant;
use tokio::task::AbortHandle;

impl App {
    /// Take the fetch that should be spawned, if any
    pub fn take_fetch_request(&mut self) -> Option<FetchTicket> {
        self.refresh_state.pending.take()
    }

    /// Register the task spawned for `generation`
    pub fn track_fetch(&mut self, generation: u64, handle: AbortHandle) {
        self.controller.track_task(generation, handle);
    }

    /// Queue a refresh of the current route
    pub fn request_refresh(&mut self) {
        self.refresh_state.pending = Some(self.controller.refresh());
        self.refresh_state.last_refresh = Some(Instant::now());
    }

    /// Switch route and queue its fetch
    pub fn navigate(&mut self, route: Route) {
        if let Some(ticket) = self.controller.navigate(route) {
            self.refresh_state.pending = Some(ticket);
            self.refresh_state.last_refresh = Some(Instant::now());
            self.view_state.filter_mode = false;
            self.reset_selection();
        }
    }

    /// Apply a finished fetch. Returns `true` if state changed.
    pub fn poll_fetch(&mut self) -> bool {
        if !self.controller.poll() {
            return false;
        }

        if let Phase::Failed(err) = self.controller.phase() {
            let message = format!("Refresh failed: {}", err);
            self.set_status_message((message, true));
        }
        self.clamp_selection();
        true
    }

    /// Drive automatic refresh. Call once per frame.
    pub fn tick(&mut self, now: Instant) {
        self.check_status_message_timeout();

        let Some(interval) = self.refresh_state.interval else {
            return;
        };
        if self.controller.phase().is_loading() || self.refresh_state.pending.is_some() {
            return;
        }
        let due = self
            .refresh_state
            .last_refresh
            .is_none_or(|last| now.duration_since(last) >= interval);
        if due {
            tracing::debug!("Automatic refresh of {}", self.controller.route());
            self.request_refresh();
            self.refresh_state.last_refresh = Some(now);
        }
    }
}
