//! Snapshot record types and multi-key sorting over them

use alloy_primitives::U256;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::sort::SortSpec;

/// Ordered value extracted from a record for one sort field.
///
/// `Missing` sorts before everything else so unknown fields and absent
/// optionals group together instead of panicking.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Missing,
    Flag(bool),
    Number(u64),
    Amount(U256),
    Time(DateTime<Utc>),
    Text(String),
}

/// Field-addressable sort keys for table rows.
pub trait SortKeyed {
    fn sort_value(&self, field: &str) -> SortValue;
}

/// Stable multi-key sort: compare by each spec field in order, flipping
/// per-field for descending. Rows equal under every key keep snapshot order.
pub fn sort_records<T: SortKeyed>(rows: &mut [T], spec: &SortSpec) {
    if spec.is_empty_sort() {
        return;
    }
    rows.sort_by(|a, b| {
        for (field, &ascending) in spec.fields.iter().zip(&spec.orders) {
            let ord = a.sort_value(field).cmp(&b.sort_value(field));
            let ord = if ascending { ord } else { ord.reverse() };
            if ord != std::cmp::Ordering::Equal {
                return ord;
            }
        }
        std::cmp::Ordering::Equal
    });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Success,
    Revert,
    Unknown,
}

impl TxStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TxStatus::Success => "success",
            TxStatus::Revert => "revert",
            TxStatus::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockRecord {
    pub number: u64,
    pub timestamp: DateTime<Utc>,
    pub tx_count: u32,
    pub gas_used: u64,
    pub base_fee_wei: U256,
    pub miner: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxRecord {
    pub hash: String,
    pub block_number: u64,
    pub from: String,
    pub to: Option<String>,
    pub value_wei: U256,
    pub gas_used: u64,
    pub status: TxStatus,
    pub method: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractRecord {
    pub address: String,
    pub name: String,
    pub deployed_block: u64,
    pub tx_count: u64,
    pub balance_wei: U256,
    pub verified: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorRecord {
    pub name: String,
    pub address: String,
    pub last_seen: DateTime<Utc>,
    pub event_count: u64,
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameRecord {
    pub name: String,
    pub address: String,
    pub registered: DateTime<Utc>,
    pub expires: Option<DateTime<Utc>>,
}

impl SortKeyed for BlockRecord {
    fn sort_value(&self, field: &str) -> SortValue {
        match field {
            "number" => SortValue::Number(self.number),
            "time" => SortValue::Time(self.timestamp),
            "txs" => SortValue::Number(self.tx_count as u64),
            "gas_used" => SortValue::Number(self.gas_used),
            "base_fee" => SortValue::Amount(self.base_fee_wei),
            "miner" => SortValue::Text(self.miner.to_lowercase()),
            _ => SortValue::Missing,
        }
    }
}

impl SortKeyed for TxRecord {
    fn sort_value(&self, field: &str) -> SortValue {
        match field {
            "hash" => SortValue::Text(self.hash.to_lowercase()),
            "block" => SortValue::Number(self.block_number),
            "from" => SortValue::Text(self.from.to_lowercase()),
            "to" => match &self.to {
                Some(to) => SortValue::Text(to.to_lowercase()),
                None => SortValue::Missing,
            },
            "value" => SortValue::Amount(self.value_wei),
            "gas" => SortValue::Number(self.gas_used),
            "status" => SortValue::Text(self.status.label().to_string()),
            _ => SortValue::Missing,
        }
    }
}

impl SortKeyed for ContractRecord {
    fn sort_value(&self, field: &str) -> SortValue {
        match field {
            "address" => SortValue::Text(self.address.to_lowercase()),
            "name" => SortValue::Text(self.name.to_lowercase()),
            "deployed" => SortValue::Number(self.deployed_block),
            "txs" => SortValue::Number(self.tx_count),
            "balance" => SortValue::Amount(self.balance_wei),
            "verified" => SortValue::Flag(self.verified),
            _ => SortValue::Missing,
        }
    }
}

impl SortKeyed for MonitorRecord {
    fn sort_value(&self, field: &str) -> SortValue {
        match field {
            "name" => SortValue::Text(self.name.to_lowercase()),
            "address" => SortValue::Text(self.address.to_lowercase()),
            "last_seen" => SortValue::Time(self.last_seen),
            "events" => SortValue::Number(self.event_count),
            "enabled" => SortValue::Flag(self.enabled),
            _ => SortValue::Missing,
        }
    }
}

impl SortKeyed for NameRecord {
    fn sort_value(&self, field: &str) -> SortValue {
        match field {
            "name" => SortValue::Text(self.name.to_lowercase()),
            "address" => SortValue::Text(self.address.to_lowercase()),
            "registered" => SortValue::Time(self.registered),
            "expires" => match self.expires {
                Some(t) => SortValue::Time(t),
                None => SortValue::Missing,
            },
            _ => SortValue::Missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sort::{handle_field_click, single_field, SortDirection, SortSpec};

    fn tx(hash: &str, block: u64, value: u64, gas: u64) -> TxRecord {
        TxRecord {
            hash: hash.to_string(),
            block_number: block,
            from: "0xaaa".to_string(),
            to: Some("0xbbb".to_string()),
            value_wei: U256::from(value),
            gas_used: gas,
            status: TxStatus::Success,
            method: None,
        }
    }

    #[test]
    fn test_single_key_descending() {
        let mut rows = vec![tx("a", 1, 10, 0), tx("b", 3, 5, 0), tx("c", 2, 7, 0)];
        sort_records(&mut rows, &single_field("block", SortDirection::Desc));
        let order: Vec<&str> = rows.iter().map(|t| t.hash.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_secondary_key_breaks_ties() {
        let mut rows = vec![
            tx("a", 5, 100, 0),
            tx("b", 5, 200, 0),
            tx("c", 4, 300, 0),
        ];
        // block desc, then value asc
        let spec = SortSpec {
            fields: vec!["block".to_string(), "value".to_string()],
            orders: vec![false, true],
        };
        sort_records(&mut rows, &spec);
        let order: Vec<&str> = rows.iter().map(|t| t.hash.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_spec_leaves_order() {
        let mut rows = vec![tx("z", 9, 0, 0), tx("a", 1, 0, 0)];
        sort_records(&mut rows, &SortSpec::empty());
        assert_eq!(rows[0].hash, "z");
    }

    #[test]
    fn test_stable_on_equal_keys() {
        let mut rows = vec![tx("first", 7, 1, 0), tx("second", 7, 2, 0)];
        sort_records(&mut rows, &single_field("block", SortDirection::Asc));
        assert_eq!(rows[0].hash, "first");
        assert_eq!(rows[1].hash, "second");
    }

    #[test]
    fn test_missing_to_sorts_first_ascending() {
        let mut rows = vec![tx("a", 1, 0, 0), tx("b", 2, 0, 0)];
        rows[0].to = None;
        rows.swap(0, 1);
        sort_records(&mut rows, &single_field("to", SortDirection::Asc));
        assert!(rows[0].to.is_none());
    }

    #[test]
    fn test_click_driven_resort() {
        let mut rows = vec![tx("a", 1, 0, 50), tx("b", 2, 0, 10), tx("c", 3, 0, 30)];
        let spec = handle_field_click(&SortSpec::empty(), "gas");
        sort_records(&mut rows, &spec);
        let order: Vec<&str> = rows.iter().map(|t| t.hash.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);

        let spec = handle_field_click(&spec, "gas");
        sort_records(&mut rows, &spec);
        let order: Vec<&str> = rows.iter().map(|t| t.hash.as_str()).collect();
        assert_eq!(order, vec!["a", "c", "b"]);
    }
}
