//! Canonical cross-chain message and derived identifiers.
//!
//! # MessageId Byte Layout (224 bytes total)
//! - Bytes 0-31:    srcChainId (uint256, big-endian, left-padded)
//! - Bytes 32-63:   dstChainId (uint256)
//! - Bytes 64-95:   nonce (uint256)
//! - Bytes 96-127:  keccak256(target UTF-8 bytes)
//! - Bytes 128-159: keccak256(callData)
//! - Bytes 160-191: nativeValue (uint256)
//! - Bytes 192-223: expiration (uint256)
//!
//! # ExecutionParamsHash Byte Layout (160 bytes total)
//! - Bytes 0-31:    keccak256(target UTF-8 bytes)
//! - Bytes 32-63:   keccak256(callData)
//! - Bytes 64-95:   value (uint256)
//! - Bytes 96-127:  nonce (uint256)
//! - Bytes 128-159: expiration (uint256)
//!
//! The channel label reported by an adapter is delivery metadata and is never
//! part of either preimage.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Binary, Uint128};

use crate::hash::{keccak256, u128_word, u64_word};

/// A logical cross-chain call, immutable once dispatched.
#[cw_serde]
pub struct CrossChainMessage {
    /// Chain the message originates from
    pub src_chain_id: u64,
    /// Chain the call is executed on
    pub dst_chain_id: u64,
    /// Contract called on the destination chain
    pub target: String,
    /// Dispatcher nonce, unique per sender
    pub nonce: u64,
    /// JSON execute message passed to `target`
    pub call_data: Binary,
    /// Native tokens attached to the destination call
    pub native_value: Uint128,
    /// UNIX timestamp (seconds) after which the message can no longer be scheduled
    pub expiration: u64,
}

/// The subset of a message that determines the destination call's side effects.
#[cw_serde]
pub struct ExecutionParams {
    pub target: String,
    pub call_data: Binary,
    pub value: Uint128,
    pub nonce: u64,
    pub expiration: u64,
}

impl CrossChainMessage {
    pub fn execution_params(&self) -> ExecutionParams {
        ExecutionParams {
            target: self.target.clone(),
            call_data: self.call_data.clone(),
            value: self.native_value,
            nonce: self.nonce,
            expiration: self.expiration,
        }
    }
}

/// Compute the message id used as the join key for quorum counting.
pub fn compute_message_id(message: &CrossChainMessage) -> [u8; 32] {
    let mut data = [0u8; 224];

    data[0..32].copy_from_slice(&u64_word(message.src_chain_id));
    data[32..64].copy_from_slice(&u64_word(message.dst_chain_id));
    data[64..96].copy_from_slice(&u64_word(message.nonce));
    data[96..128].copy_from_slice(&keccak256(message.target.as_bytes()));
    data[128..160].copy_from_slice(&keccak256(message.call_data.as_slice()));
    data[160..192].copy_from_slice(&u128_word(message.native_value.u128()));
    data[192..224].copy_from_slice(&u64_word(message.expiration));

    keccak256(&data)
}

/// Compute the commitment to a call's concrete side effects.
pub fn compute_execution_params_hash(params: &ExecutionParams) -> [u8; 32] {
    let mut data = [0u8; 160];

    data[0..32].copy_from_slice(&keccak256(params.target.as_bytes()));
    data[32..64].copy_from_slice(&keccak256(params.call_data.as_slice()));
    data[64..96].copy_from_slice(&u128_word(params.value.u128()));
    data[96..128].copy_from_slice(&u64_word(params.nonce));
    data[128..160].copy_from_slice(&u64_word(params.expiration));

    keccak256(&data)
}
