//! State definitions for the timelock contract

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, Uint128};
use cw_storage_plus::{Item, Map};

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Only address allowed to schedule transactions (the aggregator)
    pub admin: Addr,
    /// Seconds between scheduling and the earliest execution
    pub delay: u64,
    /// Denom used for the `value` attached to executed calls
    pub native_denom: String,
}

/// A scheduled action awaiting execution
#[cw_serde]
pub struct ScheduledTransaction {
    pub id: u64,
    pub target: Addr,
    pub value: Uint128,
    pub data: Binary,
    /// Earliest execution time (UNIX seconds)
    pub eta: u64,
    pub executed: bool,
}

impl ScheduledTransaction {
    /// Last second at which the transaction can still be executed
    pub fn expires_at(&self) -> u64 {
        self.eta.saturating_add(GRACE_PERIOD)
    }
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:multibridge-timelock";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// 2 days in seconds
pub const MINIMUM_DELAY: u64 = 172_800;

/// 14 days in seconds
pub const MAXIMUM_DELAY: u64 = 1_209_600;

/// Window after `eta` during which a transaction stays executable (14 days)
pub const GRACE_PERIOD: u64 = 1_209_600;

// ============================================================================
// Storage
// ============================================================================

pub const CONFIG: Item<Config> = Item::new("config");

/// Id of the most recently scheduled transaction (0 = none yet)
pub const TX_COUNTER: Item<u64> = Item::new("tx_counter");

/// Key: transaction id, Value: ScheduledTransaction
pub const TRANSACTIONS: Map<u64, ScheduledTransaction> = Map::new("transactions");
