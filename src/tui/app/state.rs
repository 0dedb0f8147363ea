//! Application state structures
//!
//! Groups the App's UI fields; everything about the data lives in the
//! dashboard controller.

use crate::dashboard::FetchTicket;
use std::time::{Duration, Instant};

/// How long a status message stays in the footer
pub const STATUS_MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Selection, scrolling and search input
#[derive(Debug, Default)]
pub struct ViewState {
    /// Selected index into the visible Waybills
    pub selected_index: usize,
    /// First rendered line of the Waybill list
    pub scroll_offset: usize,
    /// Whether the search prompt is active (user is typing)
    pub filter_mode: bool,
    /// Cached page size for PageUp/PageDown (updated each render)
    pub page_size: usize,
}

/// Transient UI state
#[derive(Debug, Default)]
pub struct UIState {
    /// Footer message and whether it is an error
    pub status_message: Option<(String, bool)>,
    pub status_message_time: Option<Instant>,
    pub show_help: bool,
}

/// Refresh scheduling
#[derive(Default)]
pub struct RefreshState {
    /// Automatic refresh period, `None` when disabled
    pub interval: Option<Duration>,
    pub last_refresh: Option<Instant>,
    /// Fetch waiting to be spawned by the main loop
    pub pending: Option<FetchTicket>,
}
