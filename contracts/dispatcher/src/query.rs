//! Query handlers for the dispatcher contract.

use cosmwasm_std::{Binary, Deps, StdError, StdResult, Uint128};

use common::{
    compute_message_id, validate_adapters, AdapterQueryMsg, CrossChainMessage, FeeResponse,
};

use crate::msg::{
    ConfigResponse, MessageIdResponse, NonceResponse, QuoteFeesResponse, RemoteReceiverResponse,
    SenderAdaptersResponse,
};
use crate::state::{CONFIG, NONCE, REMOTE_RECEIVERS, SENDER_ADAPTERS};

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        authorised_caller: config.authorised_caller,
        this_chain_id: config.this_chain_id,
        fee_denom: config.fee_denom,
    })
}

pub fn query_sender_adapters(deps: Deps) -> StdResult<SenderAdaptersResponse> {
    let registry = SENDER_ADAPTERS.load(deps.storage)?;
    Ok(SenderAdaptersResponse {
        adapters: registry.list().to_vec(),
    })
}

pub fn query_remote_receiver(deps: Deps, chain_id: u64) -> StdResult<RemoteReceiverResponse> {
    Ok(RemoteReceiverResponse {
        chain_id,
        receiver: REMOTE_RECEIVERS.may_load(deps.storage, chain_id)?,
    })
}

pub fn query_current_nonce(deps: Deps) -> StdResult<NonceResponse> {
    Ok(NonceResponse {
        nonce: NONCE.load(deps.storage)?,
    })
}

/// Fees each adapter would charge for a `RemoteCall` with the same exclusions.
pub fn query_quote_fees(
    deps: Deps,
    dst_chain_id: u64,
    excluded_adapters: Vec<String>,
) -> StdResult<QuoteFeesResponse> {
    let excluded = validate_adapters(deps.api, &excluded_adapters)?;
    let adapters = SENDER_ADAPTERS
        .load(deps.storage)?
        .filter(&excluded)
        .map_err(|e| StdError::generic_err(e.to_string()))?;

    let mut fees = Vec::with_capacity(adapters.len());
    let mut total = Uint128::zero();
    for adapter in &adapters {
        let quote: FeeResponse = deps
            .querier
            .query_wasm_smart(adapter, &AdapterQueryMsg::Fee { dst_chain_id })?;
        total = total.checked_add(quote.fee)?;
        fees.push(quote.fee);
    }

    Ok(QuoteFeesResponse {
        adapters,
        fees,
        total,
    })
}

pub fn query_compute_message_id(message: CrossChainMessage) -> StdResult<MessageIdResponse> {
    Ok(MessageIdResponse {
        msg_id: Binary::from(compute_message_id(&message).to_vec()),
    })
}
