//! Multibridge Aggregator - Destination-Chain Quorum
//!
//! Collects deliveries of the same message from independent bridge adapters
//! and hands it to the timelock once enough of them agree.
//!
//! # Message Lifecycle
//! `Unseen -> Collecting -> Quorate -> Scheduled`
//!
//! 1. Each trusted receiver adapter calls `ReceiveMessage` after verifying its
//!    own transport. Deliveries are counted once per adapter, and only while
//!    that adapter stays trusted.
//! 2. Once `delivery_count >= quorum`, anyone calls `ScheduleMessageExecution`
//!    with the execution parameters.
//! 3. The aggregator schedules the call in the timelock exactly once. Execution
//!    and expiry are tracked there.
//!
//! # Governance
//! Quorum and the adapter set are changed by `governance`, which in production
//! is the timelock itself, so every change goes through the same quorum and
//! delay as any other governance action.

pub mod contract;
pub mod error;
mod execute;
pub mod msg;
mod query;
pub mod state;

pub use crate::error::ContractError;
