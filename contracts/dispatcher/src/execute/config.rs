//! Configuration handlers (admin only).

use cosmwasm_std::{Addr, DepsMut, MessageInfo, Response, Storage};

use common::validate_adapters;

use crate::error::ContractError;
use crate::state::{Config, CONFIG, REMOTE_RECEIVERS, SENDER_ADAPTERS};

fn ensure_admin(storage: &dyn Storage, info: &MessageInfo) -> Result<Config, ContractError> {
    let config = CONFIG.load(storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }
    Ok(config)
}

fn join(adapters: &[Addr]) -> String {
    adapters
        .iter()
        .map(|a| a.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

// ============================================================================
// Sender Adapters
// ============================================================================

pub fn execute_add_sender_adapters(
    deps: DepsMut,
    info: MessageInfo,
    adapters: Vec<String>,
) -> Result<Response, ContractError> {
    ensure_admin(deps.storage, &info)?;

    let adapters = validate_adapters(deps.api, &adapters)?;
    let mut registry = SENDER_ADAPTERS.load(deps.storage)?;
    registry.merge_add(&adapters)?;
    SENDER_ADAPTERS.save(deps.storage, &registry)?;

    Ok(Response::new()
        .add_attribute("action", "add_sender_adapters")
        .add_attribute("adapters", join(&adapters))
        .add_attribute("adapter_count", registry.count().to_string()))
}

pub fn execute_remove_sender_adapters(
    deps: DepsMut,
    info: MessageInfo,
    adapters: Vec<String>,
) -> Result<Response, ContractError> {
    ensure_admin(deps.storage, &info)?;

    let adapters = validate_adapters(deps.api, &adapters)?;
    let mut registry = SENDER_ADAPTERS.load(deps.storage)?;
    registry.merge_remove(&adapters)?;
    SENDER_ADAPTERS.save(deps.storage, &registry)?;

    Ok(Response::new()
        .add_attribute("action", "remove_sender_adapters")
        .add_attribute("adapters", join(&adapters))
        .add_attribute("adapter_count", registry.count().to_string()))
}

// ============================================================================
// Routing
// ============================================================================

/// Point `chain_id` at the aggregator deployed there.
pub fn execute_set_remote_receiver(
    deps: DepsMut,
    info: MessageInfo,
    chain_id: u64,
    receiver: String,
) -> Result<Response, ContractError> {
    let config = ensure_admin(deps.storage, &info)?;

    if chain_id == 0 || chain_id == config.this_chain_id {
        return Err(ContractError::InvalidDstChainId { chain_id });
    }
    let receiver = receiver.trim().to_string();
    if receiver.is_empty() {
        return Err(ContractError::InvalidRemoteReceiver);
    }

    let old_receiver = REMOTE_RECEIVERS.may_load(deps.storage, chain_id)?;
    REMOTE_RECEIVERS.save(deps.storage, chain_id, &receiver)?;

    Ok(Response::new()
        .add_attribute("action", "set_remote_receiver")
        .add_attribute("chain_id", chain_id.to_string())
        .add_attribute("old_receiver", old_receiver.unwrap_or_default())
        .add_attribute("new_receiver", receiver))
}

pub fn execute_set_authorised_caller(
    deps: DepsMut,
    info: MessageInfo,
    caller: String,
) -> Result<Response, ContractError> {
    let mut config = ensure_admin(deps.storage, &info)?;

    let caller = deps.api.addr_validate(&caller)?;
    let old_caller = std::mem::replace(&mut config.authorised_caller, caller);
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_authorised_caller")
        .add_attribute("old_caller", old_caller)
        .add_attribute("new_caller", config.authorised_caller))
}
