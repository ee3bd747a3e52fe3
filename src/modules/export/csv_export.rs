//! CSV Export
//!
//! Writes the active section's rows, in their current sort order.

use std::path::Path;

use anyhow::Result;

use crate::domain::records::{
    BlockRecord, ContractRecord, MonitorRecord, NameRecord, TxRecord,
};
use crate::domain::units::{format_ether, format_gwei};

pub fn write_blocks(path: &Path, blocks: &[BlockRecord]) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["number", "time", "txs", "gas_used", "base_fee_gwei", "miner"])?;
    for block in blocks {
        wtr.write_record([
            block.number.to_string(),
            block.timestamp.to_rfc3339(),
            block.tx_count.to_string(),
            block.gas_used.to_string(),
            format_gwei(block.base_fee_wei),
            block.miner.clone(),
        ])?;
    }
    wtr.flush()?;
    Ok(blocks.len())
}

pub fn write_transactions(path: &Path, txs: &[TxRecord]) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["hash", "block", "from", "to", "value_ether", "gas", "status", "method"])?;
    for tx in txs {
        wtr.write_record([
            tx.hash.clone(),
            tx.block_number.to_string(),
            tx.from.clone(),
            tx.to.clone().unwrap_or_default(),
            format_ether(tx.value_wei),
            tx.gas_used.to_string(),
            tx.status.label().to_string(),
            tx.method.clone().unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(txs.len())
}

pub fn write_contracts(path: &Path, contracts: &[ContractRecord]) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["address", "name", "deployed", "txs", "balance_ether", "verified"])?;
    for contract in contracts {
        wtr.write_record([
            contract.address.clone(),
            contract.name.clone(),
            contract.deployed_block.to_string(),
            contract.tx_count.to_string(),
            format_ether(contract.balance_wei),
            contract.verified.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(contracts.len())
}

pub fn write_monitors(path: &Path, monitors: &[MonitorRecord]) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["name", "address", "last_seen", "events", "enabled"])?;
    for monitor in monitors {
        wtr.write_record([
            monitor.name.clone(),
            monitor.address.clone(),
            monitor.last_seen.to_rfc3339(),
            monitor.event_count.to_string(),
            monitor.enabled.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(monitors.len())
}

pub fn write_names(path: &Path, names: &[NameRecord]) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["name", "address", "registered", "expires"])?;
    for name in names {
        wtr.write_record([
            name.name.clone(),
            name.address.clone(),
            name.registered.to_rfc3339(),
            name.expires.map(|t| t.to_rfc3339()).unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(names.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::backend::fixture_snapshot;

    #[test]
    fn test_write_blocks_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blocks.csv");
        let snap = fixture_snapshot();

        let count = write_blocks(&path, &snap.blocks).unwrap();
        assert_eq!(count, snap.blocks.len());

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "number,time,txs,gas_used,base_fee_gwei,miner"
        );
        assert_eq!(lines.count(), snap.blocks.len());
    }

    #[test]
    fn test_write_transactions_empty_to_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("txs.csv");
        let snap = fixture_snapshot();

        write_transactions(&path, &snap.transactions).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        // the contract creation has no `to`
        assert!(content.contains(",,"));
    }
}
