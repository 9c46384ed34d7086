//! Error types for the dispatcher contract

use common::RegistryError;
use cosmwasm_std::{OverflowError, StdError, Uint128};
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
    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only the authorised caller can send remote calls")]
    UnauthorizedCaller,

    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid chain id: {chain_id}")]
    InvalidChainId { chain_id: u64 },

    #[error("Invalid destination chain id: {chain_id}")]
    InvalidDstChainId { chain_id: u64 },

    #[error("Invalid target: must not be empty")]
    InvalidTarget,

    #[error("Invalid refund address: {reason}")]
    InvalidRefundAddress { reason: String },

    #[error("Invalid remote receiver: must not be empty")]
    InvalidRemoteReceiver,

    #[error("Remote receiver not set for chain {chain_id}")]
    RemoteReceiverNotSet { chain_id: u64 },

    #[error("Invalid expiration duration {duration}: must be between {min} and {max} seconds")]
    InvalidExpirationDuration { duration: u64, min: u64, max: u64 },

    #[error("Invalid fee denom: must not be empty")]
    InvalidDenom,

    // ========================================================================
    // Fan-Out Errors
    // ========================================================================
    #[error("No sender adapters left to dispatch through")]
    NoSenderAdapters,

    #[error("Invalid success threshold {threshold}: must be between 1 and {adapters}")]
    InvalidSuccessThreshold { threshold: u32, adapters: u32 },

    #[error("Invalid fees length: expected {expected}, got {got}")]
    InvalidFeesLength { expected: u32, got: u32 },

    #[error("Invalid funds: {reason}")]
    InvalidFunds { reason: String },

    #[error("Insufficient fees: required {required}, provided {provided}")]
    InsufficientFees { required: Uint128, provided: Uint128 },

    #[error("Multi message send failed: {successes} of {threshold} required adapters succeeded")]
    MultiMessageSendFailed { successes: u32, threshold: u32 },

    #[error("Unexpected reply {id}: no dispatch in progress at that index")]
    UnexpectedReply { id: u64 },
}
