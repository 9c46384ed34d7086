//! Error types for the timelock contract

use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================
    #[error("Unauthorized: only admin can schedule transactions")]
    Unauthorized,

    #[error("Unauthorized: only the timelock itself can perform this action")]
    OnlySelf,

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    #[error("Invalid delay {delay}: must be between {min} and {max} seconds")]
    InvalidDelay { delay: u64, min: u64, max: u64 },

    #[error("Invalid native denom")]
    InvalidDenom,

    // ========================================================================
    // Transaction Errors
    // ========================================================================
    #[error("Invalid transaction id: {tx_id}")]
    InvalidTxId { tx_id: u64 },

    #[error("Invalid transaction input: arguments do not match scheduled transaction {tx_id}")]
    InvalidTxInput { tx_id: u64 },

    #[error("Transaction {tx_id} already executed")]
    TxAlreadyExecuted { tx_id: u64 },

    #[error("Transaction {tx_id} timelocked: {remaining_seconds} seconds remaining")]
    TxTimelocked { tx_id: u64, remaining_seconds: u64 },

    #[error("Transaction {tx_id} expired at {expired_at}")]
    TxExpired { tx_id: u64, expired_at: u64 },

    #[error("Invalid transaction value: expected {expected}")]
    InvalidTxValue { expected: String },

    #[error("Execution fails on destination for transaction {tx_id}: {reason}")]
    ExecutionFailsOnDst { tx_id: u64, reason: String },
}
