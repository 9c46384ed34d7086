//! Message types for the timelock contract

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Address allowed to schedule transactions (the aggregator)
    pub admin: String,
    /// Delay in seconds, between `MINIMUM_DELAY` and `MAXIMUM_DELAY`
    pub delay: u64,
    /// Denom of the value attached to executed calls
    pub native_denom: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Schedule a call on `target` executable after the delay
    ///
    /// Authorization: admin only
    ScheduleTransaction {
        target: String,
        value: Uint128,
        /// JSON execute message for `target`; empty for a plain value transfer
        data: Binary,
    },

    /// Execute a scheduled transaction. Arguments must match the scheduled ones
    /// and `value` must be attached as funds.
    ///
    /// Authorization: anyone, between `eta` and `eta + GRACE_PERIOD`
    ExecuteTransaction {
        tx_id: u64,
        target: String,
        value: Uint128,
        data: Binary,
        eta: u64,
    },

    /// Authorization: the timelock itself (via a scheduled transaction)
    SetDelay { delay: u64 },

    /// Authorization: the timelock itself (via a scheduled transaction)
    SetAdmin { admin: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(TransactionResponse)]
    Transaction { tx_id: u64 },

    /// Paginated list of transactions by id
    #[returns(TransactionsResponse)]
    Transactions {
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    #[returns(TxCounterResponse)]
    TxCounter {},
}

// ============================================================================
// Response Types
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub delay: u64,
    pub native_denom: String,
    pub grace_period: u64,
}

#[cw_serde]
pub enum TransactionStatus {
    /// Waiting for `eta`
    Timelocked,
    /// Executable now
    Ready,
    /// Grace period elapsed without execution
    Expired,
    Executed,
}

#[cw_serde]
pub struct TransactionResponse {
    pub tx_id: u64,
    pub target: Addr,
    pub value: Uint128,
    pub data: Binary,
    pub eta: u64,
    pub executed: bool,
    pub status: TransactionStatus,
}

#[cw_serde]
pub struct TransactionsResponse {
    pub transactions: Vec<TransactionResponse>,
}

#[cw_serde]
pub struct TxCounterResponse {
    pub counter: u64,
}
