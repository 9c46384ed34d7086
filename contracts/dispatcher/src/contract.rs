//! Dispatcher Contract - Entry Points
//!
//! The implementation is split into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult,
};
use cw2::set_contract_version;

use common::{validate_adapters, ChannelRegistry};

use crate::error::ContractError;
use crate::execute::{
    execute_add_sender_adapters, execute_remote_call, execute_remove_sender_adapters,
    execute_set_authorised_caller, execute_set_remote_receiver, handle_dispatch_reply,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_compute_message_id, query_config, query_current_nonce, query_quote_fees,
    query_remote_receiver, query_sender_adapters,
};
use crate::state::{Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, NONCE, SENDER_ADAPTERS};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = deps.api.addr_validate(&msg.admin)?;
    let authorised_caller = deps.api.addr_validate(&msg.authorised_caller)?;
    if msg.this_chain_id == 0 {
        return Err(ContractError::InvalidChainId {
            chain_id: msg.this_chain_id,
        });
    }
    if msg.fee_denom.is_empty() {
        return Err(ContractError::InvalidDenom);
    }

    let config = Config {
        admin,
        authorised_caller,
        this_chain_id: msg.this_chain_id,
        fee_denom: msg.fee_denom,
    };
    CONFIG.save(deps.storage, &config)?;

    let mut registry = ChannelRegistry::new();
    registry.merge_add(&validate_adapters(deps.api, &msg.sender_adapters)?)?;
    SENDER_ADAPTERS.save(deps.storage, &registry)?;

    NONCE.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("authorised_caller", config.authorised_caller)
        .add_attribute("this_chain_id", config.this_chain_id.to_string())
        .add_attribute("adapter_count", registry.count().to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::RemoteCall {
            dst_chain_id,
            target,
            call_data,
            native_value,
            expiration_duration,
            refund_address,
            fees,
            success_threshold,
            excluded_adapters,
        } => execute_remote_call(
            deps,
            env,
            info,
            dst_chain_id,
            target,
            call_data,
            native_value,
            expiration_duration,
            refund_address,
            fees,
            success_threshold,
            excluded_adapters,
        ),

        // Configuration
        ExecuteMsg::AddSenderAdapters { adapters } => {
            execute_add_sender_adapters(deps, info, adapters)
        }
        ExecuteMsg::RemoveSenderAdapters { adapters } => {
            execute_remove_sender_adapters(deps, info, adapters)
        }
        ExecuteMsg::SetRemoteReceiver { chain_id, receiver } => {
            execute_set_remote_receiver(deps, info, chain_id, receiver)
        }
        ExecuteMsg::SetAuthorisedCaller { caller } => {
            execute_set_authorised_caller(deps, info, caller)
        }
    }
}

// ============================================================================
// Reply
// ============================================================================

/// Reply id is the index of the adapter in the current fan-out.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    handle_dispatch_reply(deps, msg)
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::SenderAdapters {} => to_json_binary(&query_sender_adapters(deps)?),
        QueryMsg::RemoteReceiver { chain_id } => {
            to_json_binary(&query_remote_receiver(deps, chain_id)?)
        }
        QueryMsg::CurrentNonce {} => to_json_binary(&query_current_nonce(deps)?),
        QueryMsg::QuoteFees {
            dst_chain_id,
            excluded_adapters,
        } => to_json_binary(&query_quote_fees(deps, dst_chain_id, excluded_adapters)?),
        QueryMsg::ComputeMessageId { message } => {
            to_json_binary(&query_compute_message_id(message)?)
        }
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
