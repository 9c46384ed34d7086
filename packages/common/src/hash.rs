//! Hash primitives shared by the message codec and the contracts.

use cosmwasm_std::{Binary, StdError, StdResult};
use tiny_keccak::{Hasher, Keccak};

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Encode a u64 as a big-endian uint256 word (left-padded)
pub fn u64_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Encode a u128 as a big-endian uint256 word (left-padded)
pub fn u128_word(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Convert 32-byte hash to hex string (for attributes/logging)
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse hex string (with or without 0x prefix) to 32-byte array
pub fn hex_to_bytes32(input: &str) -> Result<[u8; 32], &'static str> {
    let stripped = input.strip_prefix("0x").unwrap_or(input);
    if stripped.len() != 64 {
        return Err("Invalid hex length: expected 64 characters");
    }

    let mut result = [0u8; 32];
    hex::decode_to_slice(stripped, &mut result).map_err(|_| "Invalid hex character")?;
    Ok(result)
}

/// Parse a 32-byte id from Binary input.
pub fn parse_bytes32(input: &Binary) -> StdResult<[u8; 32]> {
    input.to_vec().try_into().map_err(|_| {
        StdError::generic_err(format!(
            "Invalid hash length: expected 32 bytes, got {}",
            input.len()
        ))
    })
}
