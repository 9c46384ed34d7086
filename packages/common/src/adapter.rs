//! Interface between the core contracts and bridge adapters.
//!
//! Sender adapters accept `Dispatch` from the dispatcher together with their
//! fee and carry the message to the destination chain. Receiver adapters verify
//! their own transport and then call the aggregator's `ReceiveMessage`.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;

use crate::message::CrossChainMessage;

#[cw_serde]
pub enum AdapterExecuteMsg {
    /// Carry `message` to `receiver` on `dst_chain_id`. The fee is attached as funds.
    Dispatch {
        dst_chain_id: u64,
        receiver: String,
        message: CrossChainMessage,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum AdapterQueryMsg {
    /// Fee (in the dispatcher's fee denom) to carry one message to `dst_chain_id`
    #[returns(FeeResponse)]
    Fee { dst_chain_id: u64 },
}

#[cw_serde]
pub struct FeeResponse {
    pub fee: Uint128,
}
