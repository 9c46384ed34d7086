//! Execute handlers for the dispatcher contract.
//!
//! - `remote_call` - RemoteCall and the per-adapter reply handling
//! - `config` - Sender adapter, remote receiver and caller management

mod config;
mod remote_call;

pub use config::*;
pub use remote_call::*;
