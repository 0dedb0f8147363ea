//! ka9s library
//!
//! Core of the kube-applier Waybill dashboard. The binary wires these
//! together; the integration tests drive them directly.

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod models;
pub mod search;
pub mod source;
#[cfg(feature = "tui")]
pub mod tui;
pub mod view;

// Re-export commonly used types for convenience
pub use dashboard::{DashboardController, FetchTicket, Phase, Route};
pub use models::{Scope, Snapshot, Waybill};
pub use search::{FuzzyIndex, SearchOptions};
pub use source::{FetchError, StatusSource};
pub use view::{WaybillViewModel, derive};
