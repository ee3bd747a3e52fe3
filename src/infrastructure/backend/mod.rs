//! Backend seam: where chain data comes from
//!
//! The explorer consumes snapshots rather than dialing nodes; the RPC/SDK
//! side lives in a separate service. `Backend` is the async seam, with a
//! JSON-file implementation and a built-in fixture set for offline use.

mod fixture;
mod snapshot;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::records::{
    BlockRecord, ContractRecord, MonitorRecord, NameRecord, TxRecord,
};

pub use fixture::{fixture_snapshot, FixtureBackend};
pub use snapshot::SnapshotBackend;

/// One backend export: every section's rows plus provenance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub blocks: Vec<BlockRecord>,
    #[serde(default)]
    pub transactions: Vec<TxRecord>,
    #[serde(default)]
    pub contracts: Vec<ContractRecord>,
    #[serde(default)]
    pub monitors: Vec<MonitorRecord>,
    #[serde(default)]
    pub names: Vec<NameRecord>,
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("read snapshot {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse snapshot {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[async_trait]
pub trait Backend: Send + Sync {
    /// Human-readable origin shown in the status line.
    fn describe(&self) -> String;

    async fn load(&self) -> Result<Snapshot, BackendError>;
}
