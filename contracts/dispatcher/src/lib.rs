//! Multibridge Dispatcher - Source-Chain Fan-Out
//!
//! Sends one governance message through every registered sender adapter so
//! that no single bridge is trusted on its own.
//!
//! # Remote Call Flow
//! 1. The authorised caller submits `RemoteCall` with one fee per adapter
//! 2. The nonce is bumped and the message id computed
//! 3. Each adapter receives `Dispatch` as a sub-message with its fee attached
//! 4. Adapter failures are recorded in the reply handler, not propagated
//! 5. After the last reply the success threshold is enforced and unspent
//!    fees are refunded
//!
//! A threshold miss reverts everything, including the nonce bump and the
//! adapters that did succeed.

pub mod contract;
pub mod error;
mod execute;
pub mod msg;
mod query;
pub mod state;

pub use crate::error::ContractError;
