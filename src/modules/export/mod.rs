//! Export Module
//!
//! CSV and JSON export of the active section, in the order the table shows.
//! `:export <format> <path>` writes to an explicit path; the `e` key writes
//! a timestamped file under the data directory.

mod csv_export;
mod json_export;

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use directories::ProjectDirs;

use crate::app::{App, Section};
use crate::core::{Action, ExportFormat, NotifyLevel};

/// Export the active section. `path: None` picks a timestamped file in the
/// export directory.
pub fn export_section(app: &App, format: ExportFormat, path: Option<PathBuf>) -> Action {
    let section = app.active_section;
    if app.row_count(section) == 0 {
        return Action::Notify(
            format!("No {} to export", section.title().to_lowercase()),
            NotifyLevel::Warn,
        );
    }

    let path = match path {
        Some(path) => path,
        None => match default_path(section, format) {
            Ok(path) => path,
            Err(e) => {
                return Action::Notify(format!("Export dir: {e}"), NotifyLevel::Error);
            }
        },
    };

    match write(app, section, format, &path) {
        Ok(count) => Action::Notify(
            format!(
                "Exported {} {} to {}",
                count,
                section.title().to_lowercase(),
                path.display()
            ),
            NotifyLevel::Info,
        ),
        Err(e) => Action::Notify(format!("Export failed: {e}"), NotifyLevel::Error),
    }
}

fn write(app: &App, section: Section, format: ExportFormat, path: &std::path::Path) -> Result<usize> {
    match (section, format) {
        (Section::Blocks, ExportFormat::Csv) => csv_export::write_blocks(path, &app.blocks),
        (Section::Transactions, ExportFormat::Csv) => {
            csv_export::write_transactions(path, &app.txs)
        }
        (Section::Contracts, ExportFormat::Csv) => {
            csv_export::write_contracts(path, &app.contracts)
        }
        (Section::Monitors, ExportFormat::Csv) => csv_export::write_monitors(path, &app.monitors),
        (Section::Names, ExportFormat::Csv) => csv_export::write_names(path, &app.names),
        (Section::Blocks, ExportFormat::Json) => json_export::write_records(path, &app.blocks),
        (Section::Transactions, ExportFormat::Json) => {
            json_export::write_records(path, &app.txs)
        }
        (Section::Contracts, ExportFormat::Json) => {
            json_export::write_records(path, &app.contracts)
        }
        (Section::Monitors, ExportFormat::Json) => {
            json_export::write_records(path, &app.monitors)
        }
        (Section::Names, ExportFormat::Json) => json_export::write_records(path, &app.names),
    }
}

fn default_path(section: Section, format: ExportFormat) -> std::io::Result<PathBuf> {
    let export_dir = ProjectDirs::from("", "", "scry")
        .map(|dirs| dirs.data_dir().join("exports"))
        .unwrap_or_else(|| PathBuf::from(".scry").join("exports"));
    fs::create_dir_all(&export_dir)?;

    let extension = match format {
        ExportFormat::Csv => "csv",
        ExportFormat::Json => "json",
    };
    let timestamp = Local::now().format("%Y-%m-%d-%H%M%S");
    Ok(export_dir.join(format!("{}-{}.{}", section.id(), timestamp, extension)))
}
