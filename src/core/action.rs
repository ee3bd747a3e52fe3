//! Actions returned by input handling to the main loop

use std::path::PathBuf;

use crate::domain::sort::SortDirection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action needed
    None,

    /// Switch to a section
    Navigate(NavigateTarget),

    /// Set the active section's sort to a single explicit field; without a
    /// direction this behaves like a header click on that field
    SetSort {
        field: String,
        direction: Option<SortDirection>,
    },

    /// Clear the active section's sort
    ClearSort,

    /// Export the active section's rows in current order
    Export { format: ExportFormat, path: PathBuf },

    /// Re-request the snapshot from the backend worker
    Reload,

    /// Show notification in status bar
    Notify(String, NotifyLevel),

    /// Request quit
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigateTarget {
    Blocks,
    Transactions,
    Contracts,
    Monitors,
    Names,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warn,
    Error,
}
