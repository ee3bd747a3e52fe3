//! Built-in sample data for running without a snapshot file

use alloy_primitives::U256;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use super::{Backend, BackendError, Snapshot};
use crate::domain::records::{
    BlockRecord, ContractRecord, MonitorRecord, NameRecord, TxRecord, TxStatus,
};

#[derive(Debug, Clone, Default)]
pub struct FixtureBackend;

#[async_trait]
impl Backend for FixtureBackend {
    fn describe(&self) -> String {
        "fixture".to_string()
    }

    async fn load(&self) -> Result<Snapshot, BackendError> {
        Ok(fixture_snapshot())
    }
}

fn gwei(n: u64) -> U256 {
    U256::from(n) * U256::from(1_000_000_000u64)
}

fn ether_milli(n: u64) -> U256 {
    // n / 1000 ether in wei
    U256::from(n) * U256::from(1_000_000_000_000_000u64)
}

pub fn fixture_snapshot() -> Snapshot {
    let t = |secs: i64| Utc.timestamp_opt(1_767_225_600 + secs, 0).unwrap();

    let blocks = vec![
        BlockRecord {
            number: 19_000_204,
            timestamp: t(48),
            tx_count: 142,
            gas_used: 14_352_210,
            base_fee_wei: gwei(21),
            miner: "0x95222290dd7278aa3ddd389cc1e1d165cc4bafe5".into(),
        },
        BlockRecord {
            number: 19_000_203,
            timestamp: t(36),
            tx_count: 201,
            gas_used: 22_114_003,
            base_fee_wei: gwei(24),
            miner: "0x1f9090aae28b8a3dceadf281b0f12828e676c326".into(),
        },
        BlockRecord {
            number: 19_000_202,
            timestamp: t(24),
            tx_count: 97,
            gas_used: 9_882_771,
            base_fee_wei: gwei(19),
            miner: "0x95222290dd7278aa3ddd389cc1e1d165cc4bafe5".into(),
        },
        BlockRecord {
            number: 19_000_201,
            timestamp: t(12),
            tx_count: 168,
            gas_used: 17_240_905,
            base_fee_wei: gwei(22),
            miner: "0x4838b106fce9647bdf1e7877bf73ce8b0bad5f97".into(),
        },
        BlockRecord {
            number: 19_000_200,
            timestamp: t(0),
            tx_count: 119,
            gas_used: 12_007_330,
            base_fee_wei: gwei(20),
            miner: "0x1f9090aae28b8a3dceadf281b0f12828e676c326".into(),
        },
    ];

    let transactions = vec![
        TxRecord {
            hash: "0x0de1b8e1a4a0d6b3f1f0c8f6a3a1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3".into(),
            block_number: 19_000_204,
            from: "0xd8da6bf26964af9d7eed9e03e53415d37aa96045".into(),
            to: Some("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".into()),
            value_wei: U256::ZERO,
            gas_used: 48_211,
            status: TxStatus::Success,
            method: Some("transfer".into()),
        },
        TxRecord {
            hash: "0x1f2e3d4c5b6a79880919a2b3c4d5e6f708192a3b4c5d6e7f8091a2b3c4d5e6f7".into(),
            block_number: 19_000_204,
            from: "0xab5801a7d398351b8be11c439e05c5b3259aec9b".into(),
            to: Some("0x7a250d5630b4cf539739df2c5dacb4c659f2488d".into()),
            value_wei: ether_milli(2_500),
            gas_used: 184_002,
            status: TxStatus::Success,
            method: Some("swapExactETHForTokens".into()),
        },
        TxRecord {
            hash: "0x2a3b4c5d6e7f80910a1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3d4e5f6071".into(),
            block_number: 19_000_203,
            from: "0xfe9e8709d3215310075d67e3ed32a380ccf451c8".into(),
            to: None,
            value_wei: U256::ZERO,
            gas_used: 1_204_882,
            status: TxStatus::Success,
            method: None,
        },
        TxRecord {
            hash: "0x3c4d5e6f708192a3b4c5d6e7f8091a2b3c4d5e6f708192a3b4c5d6e7f8091a2b".into(),
            block_number: 19_000_202,
            from: "0x28c6c06298d514db089934071355e5743bf21d60".into(),
            to: Some("0xdac17f958d2ee523a2206206994597c13d831ec7".into()),
            value_wei: U256::ZERO,
            gas_used: 63_209,
            status: TxStatus::Revert,
            method: Some("transferFrom".into()),
        },
        TxRecord {
            hash: "0x4d5e6f708192a3b4c5d6e7f8091a2b3c4d5e6f708192a3b4c5d6e7f8091a2b3c".into(),
            block_number: 19_000_200,
            from: "0x21a31ee1afc51d94c2efccaa2092ad1028285549".into(),
            to: Some("0xd8da6bf26964af9d7eed9e03e53415d37aa96045".into()),
            value_wei: ether_milli(150),
            gas_used: 21_000,
            status: TxStatus::Success,
            method: None,
        },
    ];

    let contracts = vec![
        ContractRecord {
            address: "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".into(),
            name: "USDC".into(),
            deployed_block: 6_082_465,
            tx_count: 28_441_020,
            balance_wei: U256::ZERO,
            verified: true,
        },
        ContractRecord {
            address: "0x7a250d5630b4cf539739df2c5dacb4c659f2488d".into(),
            name: "UniswapV2Router02".into(),
            deployed_block: 10_207_858,
            tx_count: 19_224_551,
            balance_wei: ether_milli(12),
            verified: true,
        },
        ContractRecord {
            address: "0xdac17f958d2ee523a2206206994597c13d831ec7".into(),
            name: "TetherToken".into(),
            deployed_block: 4_634_748,
            tx_count: 31_002_118,
            balance_wei: U256::ZERO,
            verified: true,
        },
        ContractRecord {
            address: "0x5c69bee701ef814a2b6a3edd4b1652cb9cc5aa6f".into(),
            name: "UniswapV2Factory".into(),
            deployed_block: 10_000_835,
            tx_count: 402_114,
            balance_wei: U256::ZERO,
            verified: false,
        },
    ];

    let monitors = vec![
        MonitorRecord {
            name: "treasury".into(),
            address: "0x21a31ee1afc51d94c2efccaa2092ad1028285549".into(),
            last_seen: t(40),
            event_count: 1_204,
            enabled: true,
        },
        MonitorRecord {
            name: "deployer".into(),
            address: "0xfe9e8709d3215310075d67e3ed32a380ccf451c8".into(),
            last_seen: t(36),
            event_count: 88,
            enabled: true,
        },
        MonitorRecord {
            name: "old-bridge".into(),
            address: "0x8484ef722627bf18ca5ae6bcf031c23e6e922b30".into(),
            last_seen: t(-86_400),
            event_count: 0,
            enabled: false,
        },
    ];

    let names = vec![
        NameRecord {
            name: "vitalik.eth".into(),
            address: "0xd8da6bf26964af9d7eed9e03e53415d37aa96045".into(),
            registered: Utc.timestamp_opt(1_494_979_200, 0).unwrap(),
            expires: Some(Utc.timestamp_opt(1_925_078_400, 0).unwrap()),
        },
        NameRecord {
            name: "treasury.scry.eth".into(),
            address: "0x21a31ee1afc51d94c2efccaa2092ad1028285549".into(),
            registered: Utc.timestamp_opt(1_672_531_200, 0).unwrap(),
            expires: None,
        },
        NameRecord {
            name: "deployer.scry.eth".into(),
            address: "0xfe9e8709d3215310075d67e3ed32a380ccf451c8".into(),
            registered: Utc.timestamp_opt(1_704_067_200, 0).unwrap(),
            expires: Some(Utc.timestamp_opt(1_830_297_600, 0).unwrap()),
        },
    ];

    Snapshot {
        source: "fixture".into(),
        blocks,
        transactions,
        contracts,
        monitors,
        names,
    }
}
