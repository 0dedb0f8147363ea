//! Dashboard orchestration
//!
//! [`DashboardController`] is UI-agnostic: the TUI and the headless `status`
//! command both drive it through [`FetchTicket`]s.

mod controller;
mod fetch;
mod state;

pub use controller::DashboardController;
pub use fetch::{FetchOutcome, FetchTicket, spawn_fetch};
pub use state::{DisplayMode, OutcomeFilter, Phase, Route, Summary};
