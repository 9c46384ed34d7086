//! State definitions for the dispatcher contract

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

use common::{count_u32, ChannelRegistry, CrossChainMessage};

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:multibridge-dispatcher";
/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shortest allowed lifetime of a dispatched message (2 days)
pub const MIN_EXPIRATION: u64 = 2 * 24 * 60 * 60;
/// Longest allowed lifetime of a dispatched message (30 days)
pub const MAX_EXPIRATION: u64 = 30 * 24 * 60 * 60;

// ============================================================================
// Core Configuration
// ============================================================================

#[cw_serde]
pub struct Config {
    /// Manages adapters, remote receivers and the authorised caller
    pub admin: Addr,
    /// The only address allowed to send `RemoteCall` (source-chain governance)
    pub authorised_caller: Addr,
    /// Chain id of the chain this dispatcher runs on
    pub this_chain_id: u64,
    /// Denom adapter fees are paid in
    pub fee_denom: String,
}

/// Fan-out in progress, shared between `RemoteCall` and the reply handler.
///
/// Written before the adapter sub-messages run and removed by the last reply,
/// so it never survives the transaction that created it.
#[cw_serde]
pub struct PendingDispatch {
    pub msg_id: [u8; 32],
    pub message: CrossChainMessage,
    /// Adapters in dispatch order; reply id `i` belongs to `adapters[i]`
    pub adapters: Vec<Addr>,
    pub fees: Vec<Uint128>,
    /// One entry per reply received so far
    pub outcomes: Vec<bool>,
    pub success_threshold: u32,
    pub refund_address: Addr,
    /// Fee-denom funds attached to `RemoteCall`
    pub funds_provided: Uint128,
}

impl PendingDispatch {
    pub fn successes(&self) -> u32 {
        count_u32(self.outcomes.iter().filter(|ok| **ok).count())
    }

    /// Fees actually consumed by adapters that accepted the message
    pub fn spent(&self) -> Uint128 {
        self.outcomes
            .iter()
            .zip(&self.fees)
            .filter(|(ok, _)| **ok)
            .map(|(_, fee)| *fee)
            .sum()
    }

    pub fn is_complete(&self) -> bool {
        self.outcomes.len() == self.adapters.len()
    }
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Registered sender adapters, ascending
pub const SENDER_ADAPTERS: Item<ChannelRegistry> = Item::new("sender_adapters");

/// Aggregator address on each destination chain (foreign address format)
pub const REMOTE_RECEIVERS: Map<u64, String> = Map::new("remote_receivers");

/// Last nonce used; the first message carries nonce 1
pub const NONCE: Item<u64> = Item::new("nonce");

pub const PENDING_DISPATCH: Item<PendingDispatch> = Item::new("pending_dispatch");
