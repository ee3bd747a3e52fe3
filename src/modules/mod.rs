//! UI Modules
//!
//! - export: CSV/JSON export of the active section

pub mod export;
