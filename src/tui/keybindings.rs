//! Centralized keybindings
//!
//! Single source of truth for the footer hints and the help view.

use crate::dashboard::DisplayMode;

/// Navigation command with keybinding and label
#[derive(Debug, Clone)]
pub struct NavigationCommand {
    /// The keybinding string (e.g., "j/k", "Enter")
    pub key: &'static str,
    /// Short label for the footer
    pub label: &'static str,
}

impl NavigationCommand {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// Footer commands for the current display mode, in display order
pub fn get_navigation_commands(mode: DisplayMode) -> Vec<NavigationCommand> {
    let enter = match mode {
        DisplayMode::List => NavigationCommand::new("Enter", "Open"),
        DisplayMode::Single => NavigationCommand::new("Enter", "Toggle"),
    };
    vec![
        NavigationCommand::new("j/k", "Navigate"),
        enter,
        NavigationCommand::new("Space", "Expand"),
        NavigationCommand::new("/", "Search"),
        NavigationCommand::new("o", "Outcome"),
        NavigationCommand::new("r", "Refresh"),
        NavigationCommand::new("?", "Help"),
        NavigationCommand::new("Esc", "Back/Quit"),
    ]
}

/// Help view rows: key and description
pub fn get_help_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        ("<j>/<Down>", "Select next Waybill"),
        ("<k>/<Up>", "Select previous Waybill"),
        ("<g>/<G>", "Jump to first/last Waybill"),
        ("<Enter>", "Open namespace view (toggle in namespace view)"),
        ("<Space>/<Tab>", "Expand or collapse the selected Waybill"),
        ("</>", "Fuzzy search namespaces"),
        ("<o>", "Cycle outcome filter"),
        ("<r>", "Refresh now"),
        ("<Esc>", "Clear search, go back, or quit"),
        ("<?>", "Show/hide help"),
        ("<q>", "Quit"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_label_follows_mode() {
        let list = get_navigation_commands(DisplayMode::List);
        let single = get_navigation_commands(DisplayMode::Single);
        assert!(list.iter().any(|c| c.key == "Enter" && c.label == "Open"));
        assert!(single.iter().any(|c| c.key == "Enter" && c.label == "Toggle"));
    }
}
