pub mod action;
pub mod command;

pub use action::{Action, ExportFormat, NavigateTarget, NotifyLevel};
pub use command::{parse_command, Command};
