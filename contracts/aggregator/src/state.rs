//! State definitions for the aggregator contract
//!
//! Delivery records are append-only: nothing removes them, so a scheduled
//! message id can never be reopened. Only deliveries from adapters that are
//! still trusted count toward quorum.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Order, StdResult, Storage};
use cw_storage_plus::{Item, Map};

use common::ChannelRegistry;

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:multibridge-aggregator";
/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Configuration
// ============================================================================

#[cw_serde]
pub struct Config {
    /// Chain id of the chain this aggregator runs on
    pub this_chain_id: u64,
    /// The only source chain messages are accepted from
    pub src_chain_id: u64,
    /// Distinct adapter deliveries required before scheduling
    pub quorum: u32,
    /// May change quorum, adapters and governance wiring
    pub governance: Addr,
    /// Timelock scheduled messages are handed to
    pub timelock: Option<Addr>,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Trusted receiver adapters, ascending
pub const RECEIVER_ADAPTERS: Item<ChannelRegistry> = Item::new("receiver_adapters");

// ============================================================================
// Delivery Ledger
// ============================================================================

/// (msg_id, adapter) -> delivered
pub const DELIVERIES: Map<(&[u8], &Addr), bool> = Map::new("deliveries");

/// (msg_id, adapter) -> channel label reported with the delivery
pub const DELIVERY_LABELS: Map<(&[u8], &Addr), String> = Map::new("delivery_labels");

/// msg_id -> execution params hash recorded on first delivery
pub const EXEC_PARAMS_HASH: Map<&[u8], [u8; 32]> = Map::new("exec_params_hash");

/// msg_id -> scheduled in the timelock
pub const SCHEDULED: Map<&[u8], bool> = Map::new("scheduled");

/// Deliveries of `msg_id` from adapters still present in `registry`.
pub fn trusted_delivery_count(
    storage: &dyn Storage,
    msg_id: &[u8],
    registry: &ChannelRegistry,
) -> StdResult<u32> {
    let mut count = 0u32;
    for adapter in DELIVERIES
        .prefix(msg_id)
        .keys(storage, None, None, Order::Ascending)
    {
        if registry.is_trusted(&adapter?) {
            count += 1;
        }
    }
    Ok(count)
}
