//! Multibridge Timelock - Delayed-Execution Gate
//!
//! Holds actions scheduled by the aggregator for a fixed delay and lets anyone
//! execute them inside a bounded grace window, exactly once.
//!
//! # Flow
//! 1. Aggregator reaches quorum and calls `ScheduleTransaction`
//! 2. The action is timelocked until `eta = now + delay`
//! 3. Anyone calls `ExecuteTransaction` with the scheduled arguments between
//!    `eta` and `eta + GRACE_PERIOD`
//!
//! # Governance
//! `SetDelay` and `SetAdmin` can only be called by the timelock itself, so any
//! change to them has to be scheduled and executed through this same gate.

pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
