//! TUI view components
//!
//! Each component renders one part of the interface from borrowed state.

mod footer;
mod header;
mod help;
pub mod helpers;
mod waybill_list;

pub use footer::*;
pub use header::*;
pub use help::*;
pub use waybill_list::*;
