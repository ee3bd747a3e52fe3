//! Command parser for the : command system

use std::path::PathBuf;

use crate::core::action::ExportFormat;
use crate::domain::sort::SortDirection;

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Navigation
    Blocks,
    Transactions,
    Contracts,
    Monitors,
    Names,

    // Sorting
    Sort {
        field: String,
        direction: Option<SortDirection>,
    },
    SortClear,

    // Data
    Export {
        format: ExportFormat,
        path: PathBuf,
    },
    Reload,

    Quit,

    // Unknown command
    Unknown(String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().map(|s| s.trim().to_string());

    match cmd.to_lowercase().as_str() {
        // Navigation
        "blocks" | "blk" => Command::Blocks,
        "transactions" | "txs" | "tx" => Command::Transactions,
        "contracts" | "con" => Command::Contracts,
        "monitors" | "mon" => Command::Monitors,
        "names" => Command::Names,

        "sort" => parse_sort(input, args),
        "export" => parse_export(input, args),
        "reload" | "refresh" => Command::Reload,
        "q" | "quit" | "exit" => Command::Quit,

        _ => Command::Unknown(input.to_string()),
    }
}

fn parse_sort(input: &str, args: Option<String>) -> Command {
    let Some(args) = args else {
        return Command::Unknown(input.to_string());
    };
    let mut words = args.split_whitespace();
    let Some(field) = words.next() else {
        return Command::Unknown(input.to_string());
    };
    if field.eq_ignore_ascii_case("clear") || field.eq_ignore_ascii_case("none") {
        return Command::SortClear;
    }
    let direction = match words.next() {
        None => None,
        Some(w) if w.eq_ignore_ascii_case("asc") => Some(SortDirection::Asc),
        Some(w) if w.eq_ignore_ascii_case("desc") => Some(SortDirection::Desc),
        Some(_) => return Command::Unknown(input.to_string()),
    };
    Command::Sort {
        field: field.to_string(),
        direction,
    }
}

fn parse_export(input: &str, args: Option<String>) -> Command {
    let Some(args) = args else {
        return Command::Unknown(input.to_string());
    };
    let mut words = args.split_whitespace();
    let format = match words.next() {
        Some(w) if w.eq_ignore_ascii_case("csv") => ExportFormat::Csv,
        Some(w) if w.eq_ignore_ascii_case("json") => ExportFormat::Json,
        _ => return Command::Unknown(input.to_string()),
    };
    let Some(path) = words.next() else {
        return Command::Unknown(input.to_string());
    };
    Command::Export {
        format,
        path: PathBuf::from(path),
    }
}
