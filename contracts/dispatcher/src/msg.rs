//! Message types for the dispatcher contract

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

use common::CrossChainMessage;

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    pub admin: String,
    /// Address allowed to send remote calls (source-chain governance)
    pub authorised_caller: String,
    pub this_chain_id: u64,
    /// Denom adapter fees are paid in (e.g., "uluna")
    pub fee_denom: String,
    /// Initial sender adapters, strictly ascending
    #[serde(default)]
    pub sender_adapters: Vec<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Outgoing
    // ========================================================================
    /// Send `call_data` for `target` on `dst_chain_id` through every registered
    /// sender adapter except `excluded_adapters`.
    ///
    /// `fees[i]` is paid to the i-th selected adapter in ascending address
    /// order; attach at least their sum in the fee denom. Unspent funds go to
    /// `refund_address`.
    ///
    /// Authorization: authorised caller only
    RemoteCall {
        dst_chain_id: u64,
        target: String,
        call_data: Binary,
        native_value: Uint128,
        /// Seconds from now until the message can no longer be scheduled
        expiration_duration: u64,
        refund_address: String,
        fees: Vec<Uint128>,
        /// Minimum number of adapters that must accept the message
        success_threshold: u32,
        /// Strictly ascending, every entry must be registered
        #[serde(default)]
        excluded_adapters: Vec<String>,
    },

    // ========================================================================
    // Configuration (admin only)
    // ========================================================================
    /// Register sender adapters. Input must be strictly ascending and contain
    /// no registered adapter.
    AddSenderAdapters { adapters: Vec<String> },

    /// Unregister sender adapters. Input must be strictly ascending and
    /// contain only registered adapters.
    RemoveSenderAdapters { adapters: Vec<String> },

    /// Set the aggregator address on a destination chain
    SetRemoteReceiver { chain_id: u64, receiver: String },

    SetAuthorisedCaller { caller: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(SenderAdaptersResponse)]
    SenderAdapters {},

    #[returns(RemoteReceiverResponse)]
    RemoteReceiver { chain_id: u64 },

    /// Nonce of the most recent message (0 before the first one)
    #[returns(NonceResponse)]
    CurrentNonce {},

    /// Ask each adapter selected for `RemoteCall` for its fee
    #[returns(QuoteFeesResponse)]
    QuoteFees {
        dst_chain_id: u64,
        #[serde(default)]
        excluded_adapters: Vec<String>,
    },

    #[returns(MessageIdResponse)]
    ComputeMessageId { message: CrossChainMessage },
}

// ============================================================================
// Response Types
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub authorised_caller: Addr,
    pub this_chain_id: u64,
    pub fee_denom: String,
}

#[cw_serde]
pub struct SenderAdaptersResponse {
    pub adapters: Vec<Addr>,
}

#[cw_serde]
pub struct RemoteReceiverResponse {
    pub chain_id: u64,
    pub receiver: Option<String>,
}

#[cw_serde]
pub struct NonceResponse {
    pub nonce: u64,
}

#[cw_serde]
pub struct QuoteFeesResponse {
    /// Selected adapters in dispatch order
    pub adapters: Vec<Addr>,
    /// Fee per adapter, same order as `adapters`
    pub fees: Vec<Uint128>,
    pub total: Uint128,
}

#[cw_serde]
pub struct MessageIdResponse {
    pub msg_id: Binary,
}
