//! JSON Export
//!
//! Serializes the active section's rows as a JSON array, current sort order.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

pub fn write_records<T: Serialize>(path: &Path, rows: &[T]) -> Result<usize> {
    let json = serde_json::to_string_pretty(rows)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::records::TxRecord;
    use crate::infrastructure::backend::fixture_snapshot;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("txs.json");
        let snap = fixture_snapshot();

        let count = write_records(&path, &snap.transactions).unwrap();
        assert_eq!(count, snap.transactions.len());

        let content = std::fs::read_to_string(&path).unwrap();
        let back: Vec<TxRecord> = serde_json::from_str(&content).unwrap();
        assert_eq!(back.len(), snap.transactions.len());
        assert_eq!(back[0].hash, snap.transactions[0].hash);
    }
}
