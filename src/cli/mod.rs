//! CLI command handling module
//!
//! Handles all CLI subcommands and argument parsing.

mod commands;
mod logging;
mod status;
mod version;

pub use commands::{ConfigSubcommand, handle_config_command};
pub use logging::init_logging;
pub use status::{
    OutputFormat, StatusOptions, fetch_status, render_json, render_text, run_status,
};
pub use version::display_version;
