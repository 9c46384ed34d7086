//! Common - Shared Types and Utilities for the Multibridge Contracts
//!
//! This package provides the pieces that must be byte-for-byte identical on
//! every chain the protocol runs on:
//! - `message` - the cross-chain message shape and its derived identifiers
//! - `hash` - keccak256 and bytes32 helpers
//! - `registry` - the ordered trusted-channel set
//! - `adapter` - the interface bridge adapters implement

pub mod adapter;
pub mod hash;
pub mod message;
pub mod registry;

pub use adapter::{AdapterExecuteMsg, AdapterQueryMsg, FeeResponse};
pub use hash::{bytes32_to_hex, hex_to_bytes32, keccak256, parse_bytes32};
pub use message::{
    compute_execution_params_hash, compute_message_id, CrossChainMessage, ExecutionParams,
};
pub use registry::{count_u32, validate_adapters, ChannelRegistry, RegistryError};
