//! Query handlers for the aggregator contract.

use cosmwasm_std::{Binary, Deps, Order, StdResult};

use common::{
    compute_execution_params_hash, compute_message_id, parse_bytes32, CrossChainMessage,
    ExecutionParams,
};

use crate::msg::{
    ConfigResponse, HashResponse, IsTrustedAdapterResponse, MessageInfoResponse,
    ReceiverAdaptersResponse, StoredHashResponse,
};
use crate::state::{
    trusted_delivery_count, CONFIG, DELIVERY_LABELS, EXEC_PARAMS_HASH, RECEIVER_ADAPTERS,
    SCHEDULED,
};

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        this_chain_id: config.this_chain_id,
        src_chain_id: config.src_chain_id,
        quorum: config.quorum,
        governance: config.governance,
        timelock: config.timelock,
    })
}

pub fn query_receiver_adapters(deps: Deps) -> StdResult<ReceiverAdaptersResponse> {
    Ok(ReceiverAdaptersResponse {
        adapters: RECEIVER_ADAPTERS.load(deps.storage)?.list().to_vec(),
    })
}

pub fn query_is_trusted_adapter(
    deps: Deps,
    adapter: String,
) -> StdResult<IsTrustedAdapterResponse> {
    let adapter = deps.api.addr_validate(&adapter)?;
    Ok(IsTrustedAdapterResponse {
        trusted: RECEIVER_ADAPTERS.load(deps.storage)?.is_trusted(&adapter),
    })
}

/// Scheduled flag, trusted delivery count and the labels of every channel that
/// delivered, including adapters removed since.
pub fn query_message_info(deps: Deps, msg_id: Binary) -> StdResult<MessageInfoResponse> {
    let msg_id = parse_bytes32(&msg_id)?;
    let key = msg_id.as_slice();

    let channel_labels = DELIVERY_LABELS
        .prefix(key)
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| item.map(|(_, label)| label))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(MessageInfoResponse {
        scheduled: SCHEDULED.may_load(deps.storage, key)?.unwrap_or(false),
        delivery_count: trusted_delivery_count(
            deps.storage,
            key,
            &RECEIVER_ADAPTERS.load(deps.storage)?,
        )?,
        channel_labels,
    })
}

pub fn query_execution_params_hash(deps: Deps, msg_id: Binary) -> StdResult<StoredHashResponse> {
    let msg_id = parse_bytes32(&msg_id)?;
    Ok(StoredHashResponse {
        hash: EXEC_PARAMS_HASH
            .may_load(deps.storage, msg_id.as_slice())?
            .map(|hash| Binary::from(hash.to_vec())),
    })
}

pub fn query_compute_message_id(message: CrossChainMessage) -> StdResult<HashResponse> {
    Ok(HashResponse {
        hash: Binary::from(compute_message_id(&message).to_vec()),
    })
}

pub fn query_compute_execution_params_hash(params: ExecutionParams) -> StdResult<HashResponse> {
    Ok(HashResponse {
        hash: Binary::from(compute_execution_params_hash(&params).to_vec()),
    })
}
