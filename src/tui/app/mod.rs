//! Application module
//!
//! The TUI application state and logic, split by concern.

pub mod state;

mod async_ops;
mod core;
mod events;
mod rendering;

pub use core::*;
