//! Error types for the aggregator contract

use common::RegistryError;
use cosmwasm_std::{OverflowError, StdError};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("{0}")]
    Registry(#[from] RegistryError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================
    #[error("Unauthorized: only governance can perform this action")]
    Unauthorized,

    #[error("Adapter not trusted: {adapter}")]
    AdapterNotTrusted { adapter: String },

    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid chain id: {chain_id}")]
    InvalidChainId { chain_id: u64 },

    #[error("Invalid destination chain id: {chain_id}")]
    InvalidDstChainId { chain_id: u64 },

    #[error("Invalid source chain id: {chain_id}")]
    InvalidSrcChainId { chain_id: u64 },

    #[error("Invalid target: must not be empty")]
    InvalidTarget,

    #[error("Invalid input length: {adapters} adapters, {operations} operations")]
    InvalidInputLength { adapters: u32, operations: u32 },

    #[error("Invalid quorum {quorum}: must be between 1 and {adapters}")]
    InvalidQuorum { quorum: u32, adapters: u32 },

    // ========================================================================
    // Delivery Errors
    // ========================================================================
    #[error("Duplicate delivery of {msg_id} by {adapter}")]
    DuplicateDelivery { msg_id: String, adapter: String },

    #[error("Message {msg_id} already scheduled")]
    MessageAlreadyScheduled { msg_id: String },

    #[error("Conflicting execution data for message {msg_id}")]
    ConflictingExecutionData { msg_id: String },

    // ========================================================================
    // Scheduling Errors
    // ========================================================================
    #[error("Execution params hash mismatch for message {msg_id}")]
    HashMismatch { msg_id: String },

    #[error("Message passed deadline: expired at {expiration}, now {now}")]
    PassedDeadline { expiration: u64, now: u64 },

    #[error("Quorum not achieved: {delivered} of {quorum} deliveries")]
    QuorumNotAchieved { delivered: u32, quorum: u32 },

    #[error("Governance timelock not set")]
    TimelockNotSet,
}
