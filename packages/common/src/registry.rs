//! Trusted-channel registry.
//!
//! An ordered set of bridge adapter addresses. Members are kept in ascending
//! order so that fan-out order is canonical and batch updates can be applied
//! with a single merge pass.

use std::cmp::Ordering;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Api, StdResult};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum RegistryError {
    #[error("Adapter list must be strictly ascending")]
    UnsortedInput,

    #[error("Adapter already registered: {adapter}")]
    AlreadyRegistered { adapter: String },

    #[error("Adapter not registered: {adapter}")]
    NotRegistered { adapter: String },
}

#[cw_serde]
#[derive(Default)]
pub struct ChannelRegistry {
    channels: Vec<Addr>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_trusted(&self, adapter: &Addr) -> bool {
        self.channels.binary_search(adapter).is_ok()
    }

    /// Insert a single adapter. Returns false if it was already present.
    pub fn add(&mut self, adapter: Addr) -> bool {
        match self.channels.binary_search(&adapter) {
            Ok(_) => false,
            Err(pos) => {
                self.channels.insert(pos, adapter);
                true
            }
        }
    }

    /// Remove a single adapter. Returns false if it was absent.
    pub fn remove(&mut self, adapter: &Addr) -> bool {
        match self.channels.binary_search(adapter) {
            Ok(pos) => {
                self.channels.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    pub fn list(&self) -> &[Addr] {
        &self.channels
    }

    pub fn count(&self) -> u32 {
        count_u32(self.channels.len())
    }

    /// Merge a strictly ascending batch into the registry.
    ///
    /// Fails without modifying the registry if the batch is unsorted or any
    /// member is already present.
    pub fn merge_add(&mut self, adapters: &[Addr]) -> Result<(), RegistryError> {
        ensure_strictly_ascending(adapters)?;

        let mut merged = Vec::with_capacity(self.channels.len() + adapters.len());
        let mut existing = self.channels.iter().peekable();
        for adapter in adapters {
            while let Some(current) = existing.next_if(|current| *current < adapter) {
                merged.push(current.clone());
            }
            if existing.peek() == Some(&adapter) {
                return Err(RegistryError::AlreadyRegistered {
                    adapter: adapter.to_string(),
                });
            }
            merged.push(adapter.clone());
        }
        merged.extend(existing.cloned());

        self.channels = merged;
        Ok(())
    }

    /// Remove a strictly ascending batch from the registry.
    ///
    /// Fails without modifying the registry if the batch is unsorted or any
    /// member is absent.
    pub fn merge_remove(&mut self, adapters: &[Addr]) -> Result<(), RegistryError> {
        self.channels = self.filter(adapters)?;
        Ok(())
    }

    /// The registry minus a strictly ascending exclusion list, in canonical order.
    pub fn filter(&self, excluded: &[Addr]) -> Result<Vec<Addr>, RegistryError> {
        ensure_strictly_ascending(excluded)?;

        let mut kept = Vec::with_capacity(self.channels.len());
        let mut skip = excluded.iter().peekable();
        for current in &self.channels {
            match skip.peek().map(|next| current.cmp(next)) {
                Some(Ordering::Equal) => {
                    skip.next();
                }
                Some(Ordering::Greater) => {
                    // the next excluded adapter sorts before `current` and was never seen
                    let missing = skip.next().map(|a| a.to_string()).unwrap_or_default();
                    return Err(RegistryError::NotRegistered { adapter: missing });
                }
                _ => kept.push(current.clone()),
            }
        }
        if let Some(missing) = skip.next() {
            return Err(RegistryError::NotRegistered {
                adapter: missing.to_string(),
            });
        }

        Ok(kept)
    }
}

/// Validate a batch of adapter addresses, keeping the caller's order.
pub fn validate_adapters(api: &dyn Api, adapters: &[String]) -> StdResult<Vec<Addr>> {
    adapters.iter().map(|a| api.addr_validate(a)).collect()
}

/// Length as `u32`, saturating at `u32::MAX`.
pub fn count_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

fn ensure_strictly_ascending(adapters: &[Addr]) -> Result<(), RegistryError> {
    if adapters.windows(2).all(|pair| pair[0] < pair[1]) {
        Ok(())
    } else {
        Err(RegistryError::UnsortedInput)
    }
}
