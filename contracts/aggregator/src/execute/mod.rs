//! Execute handlers for the aggregator contract.
//!
//! - `incoming` - ReceiveMessage and ScheduleMessageExecution
//! - `governance` - Quorum, receiver adapter and governance wiring updates

mod governance;
mod incoming;

pub use governance::*;
pub use incoming::*;
