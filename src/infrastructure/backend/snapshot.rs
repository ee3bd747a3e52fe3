//! JSON snapshot file backend

use std::path::PathBuf;

use async_trait::async_trait;

use super::{Backend, BackendError, Snapshot};

/// Loads a snapshot exported by the backend service as a JSON file.
#[derive(Debug, Clone)]
pub struct SnapshotBackend {
    path: PathBuf,
}

impl SnapshotBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl Backend for SnapshotBackend {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<Snapshot, BackendError> {
        let path = self.path.clone();
        let display = path.display().to_string();
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| BackendError::Read {
                path: display.clone(),
                source,
            })?;
        let mut snapshot: Snapshot =
            serde_json::from_str(&content).map_err(|source| BackendError::Parse {
                path: display.clone(),
                source,
            })?;
        if snapshot.source.is_empty() {
            snapshot.source = display;
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_minimal_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snap.json");
        std::fs::write(
            &path,
            r#"{
                "blocks": [{
                    "number": 10,
                    "timestamp": "2026-01-01T00:00:00Z",
                    "tx_count": 2,
                    "gas_used": 42000,
                    "base_fee_wei": "0x3b9aca00",
                    "miner": "0xaa"
                }]
            }"#,
        )
        .unwrap();

        let snapshot = SnapshotBackend::new(path.clone()).load().await.unwrap();
        assert_eq!(snapshot.blocks.len(), 1);
        assert_eq!(snapshot.blocks[0].number, 10);
        assert!(snapshot.transactions.is_empty());
        assert_eq!(snapshot.source, path.display().to_string());
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let backend = SnapshotBackend::new(PathBuf::from("/nonexistent/snap.json"));
        let err = backend.load().await.unwrap_err();
        assert!(matches!(err, BackendError::Read { .. }));
    }

    #[tokio::test]
    async fn test_bad_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snap.json");
        std::fs::write(&path, "{").unwrap();
        let err = SnapshotBackend::new(path).load().await.unwrap_err();
        assert!(matches!(err, BackendError::Parse { .. }));
    }
}
