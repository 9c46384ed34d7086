//! Message types for the aggregator contract

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary};

use common::{CrossChainMessage, ExecutionParams};

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    pub this_chain_id: u64,
    /// Source chain whose dispatcher this aggregator listens to
    pub src_chain_id: u64,
    pub quorum: u32,
    /// Initial receiver adapters, strictly ascending
    pub receiver_adapters: Vec<String>,
    /// Defaults to the instantiator; hand over to the timelock once it is wired
    pub governance: Option<String>,
    pub timelock: Option<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Incoming
    // ========================================================================
    /// Record one adapter's delivery of `message`
    ///
    /// Authorization: trusted receiver adapters only
    ReceiveMessage {
        message: CrossChainMessage,
        /// Human-readable name of the bridge; not part of the message id
        channel_label: String,
    },

    /// Hand a quorate message to the timelock
    ///
    /// Authorization: anyone
    ScheduleMessageExecution {
        /// 32-byte message id
        msg_id: Binary,
        execution_params: ExecutionParams,
    },

    // ========================================================================
    // Governance
    // ========================================================================
    /// Add (`true`) or remove (`false`) each adapter in turn
    UpdateReceiverAdapters {
        adapters: Vec<String>,
        operations: Vec<bool>,
    },

    UpdateQuorum { quorum: u32 },

    /// Adapter changes and the new quorum, checked together
    UpdateQuorumAndReceiverAdapters {
        quorum: u32,
        adapters: Vec<String>,
        operations: Vec<bool>,
    },

    UpdateGovernanceTimelock { timelock: String },

    UpdateGovernance { governance: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(ReceiverAdaptersResponse)]
    ReceiverAdapters {},

    #[returns(IsTrustedAdapterResponse)]
    IsTrustedAdapter { adapter: String },

    /// Delivery status of a message id
    #[returns(MessageInfoResponse)]
    MessageInfo { msg_id: Binary },

    /// Execution params hash recorded on first delivery, if any
    #[returns(StoredHashResponse)]
    ExecutionParamsHash { msg_id: Binary },

    #[returns(HashResponse)]
    ComputeMessageId { message: CrossChainMessage },

    #[returns(HashResponse)]
    ComputeExecutionParamsHash { params: ExecutionParams },
}

// ============================================================================
// Response Types
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub this_chain_id: u64,
    pub src_chain_id: u64,
    pub quorum: u32,
    pub governance: Addr,
    pub timelock: Option<Addr>,
}

#[cw_serde]
pub struct ReceiverAdaptersResponse {
    pub adapters: Vec<Addr>,
}

#[cw_serde]
pub struct IsTrustedAdapterResponse {
    pub trusted: bool,
}

#[cw_serde]
pub struct MessageInfoResponse {
    pub scheduled: bool,
    /// Deliveries from adapters that are still trusted
    pub delivery_count: u32,
    /// Labels of the channels that delivered, ordered by adapter address
    pub channel_labels: Vec<String>,
}

#[cw_serde]
pub struct StoredHashResponse {
    pub hash: Option<Binary>,
}

#[cw_serde]
pub struct HashResponse {
    pub hash: Binary,
}
