//! Governance handlers.
//!
//! Every update is applied to in-memory copies and checked against
//! `0 < quorum <= adapters` before anything is written.

use cosmwasm_std::{Addr, DepsMut, MessageInfo, Response, Storage};

use common::{count_u32, validate_adapters, ChannelRegistry, RegistryError};

use crate::error::ContractError;
use crate::state::{Config, CONFIG, RECEIVER_ADAPTERS};

fn ensure_governance(storage: &dyn Storage, info: &MessageInfo) -> Result<Config, ContractError> {
    let config = CONFIG.load(storage)?;
    if info.sender != config.governance {
        return Err(ContractError::Unauthorized);
    }
    Ok(config)
}

pub(crate) fn validate_quorum(
    quorum: u32,
    registry: &ChannelRegistry,
) -> Result<(), ContractError> {
    if quorum == 0 || quorum > registry.count() {
        return Err(ContractError::InvalidQuorum {
            quorum,
            adapters: registry.count(),
        });
    }
    Ok(())
}

/// Apply add (`true`) / remove (`false`) operations in order.
fn apply_adapter_updates(
    registry: &mut ChannelRegistry,
    adapters: &[Addr],
    operations: &[bool],
) -> Result<(), ContractError> {
    if adapters.len() != operations.len() {
        return Err(ContractError::InvalidInputLength {
            adapters: count_u32(adapters.len()),
            operations: count_u32(operations.len()),
        });
    }

    for (adapter, add) in adapters.iter().zip(operations) {
        if *add {
            if !registry.add(adapter.clone()) {
                return Err(RegistryError::AlreadyRegistered {
                    adapter: adapter.to_string(),
                }
                .into());
            }
        } else if !registry.remove(adapter) {
            return Err(RegistryError::NotRegistered {
                adapter: adapter.to_string(),
            }
            .into());
        }
    }
    Ok(())
}

fn describe(adapters: &[Addr], operations: &[bool]) -> String {
    adapters
        .iter()
        .zip(operations)
        .map(|(adapter, add)| format!("{}{}", if *add { "+" } else { "-" }, adapter))
        .collect::<Vec<_>>()
        .join(",")
}

// ============================================================================
// Quorum and Adapters
// ============================================================================

pub fn execute_update_receiver_adapters(
    deps: DepsMut,
    info: MessageInfo,
    adapters: Vec<String>,
    operations: Vec<bool>,
) -> Result<Response, ContractError> {
    let config = ensure_governance(deps.storage, &info)?;

    let adapters = validate_adapters(deps.api, &adapters)?;
    let mut registry = RECEIVER_ADAPTERS.load(deps.storage)?;
    apply_adapter_updates(&mut registry, &adapters, &operations)?;
    validate_quorum(config.quorum, &registry)?;
    RECEIVER_ADAPTERS.save(deps.storage, &registry)?;

    Ok(Response::new()
        .add_attribute("action", "update_receiver_adapters")
        .add_attribute("updates", describe(&adapters, &operations))
        .add_attribute("adapter_count", registry.count().to_string()))
}

pub fn execute_update_quorum(
    deps: DepsMut,
    info: MessageInfo,
    quorum: u32,
) -> Result<Response, ContractError> {
    let mut config = ensure_governance(deps.storage, &info)?;

    let registry = RECEIVER_ADAPTERS.load(deps.storage)?;
    validate_quorum(quorum, &registry)?;

    let old_quorum = config.quorum;
    config.quorum = quorum;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_quorum")
        .add_attribute("old_quorum", old_quorum.to_string())
        .add_attribute("new_quorum", quorum.to_string()))
}

pub fn execute_update_quorum_and_receiver_adapters(
    deps: DepsMut,
    info: MessageInfo,
    quorum: u32,
    adapters: Vec<String>,
    operations: Vec<bool>,
) -> Result<Response, ContractError> {
    let mut config = ensure_governance(deps.storage, &info)?;

    let adapters = validate_adapters(deps.api, &adapters)?;
    let mut registry = RECEIVER_ADAPTERS.load(deps.storage)?;
    apply_adapter_updates(&mut registry, &adapters, &operations)?;
    validate_quorum(quorum, &registry)?;

    let old_quorum = config.quorum;
    config.quorum = quorum;
    CONFIG.save(deps.storage, &config)?;
    RECEIVER_ADAPTERS.save(deps.storage, &registry)?;

    Ok(Response::new()
        .add_attribute("action", "update_quorum_and_receiver_adapters")
        .add_attribute("updates", describe(&adapters, &operations))
        .add_attribute("adapter_count", registry.count().to_string())
        .add_attribute("old_quorum", old_quorum.to_string())
        .add_attribute("new_quorum", quorum.to_string()))
}

// ============================================================================
// Governance Wiring
// ============================================================================

/// Point scheduling at a timelock.
pub fn execute_update_governance_timelock(
    deps: DepsMut,
    info: MessageInfo,
    timelock: String,
) -> Result<Response, ContractError> {
    let mut config = ensure_governance(deps.storage, &info)?;

    let timelock = deps.api.addr_validate(&timelock)?;
    config.timelock = Some(timelock.clone());
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_governance_timelock")
        .add_attribute("timelock", timelock))
}

pub fn execute_update_governance(
    deps: DepsMut,
    info: MessageInfo,
    governance: String,
) -> Result<Response, ContractError> {
    let mut config = ensure_governance(deps.storage, &info)?;

    let governance = deps.api.addr_validate(&governance)?;
    let old_governance = std::mem::replace(&mut config.governance, governance);
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_governance")
        .add_attribute("old_governance", old_governance)
        .add_attribute("new_governance", config.governance))
}
