//! Aggregator Contract - Entry Points
//!
//! The implementation is split into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use common::{validate_adapters, ChannelRegistry};

use crate::error::ContractError;
use crate::execute::{
    execute_receive_message, execute_schedule_message_execution, execute_update_governance,
    execute_update_governance_timelock, execute_update_quorum,
    execute_update_quorum_and_receiver_adapters, execute_update_receiver_adapters,
    validate_quorum,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_compute_execution_params_hash, query_compute_message_id, query_config,
    query_execution_params_hash, query_is_trusted_adapter, query_message_info,
    query_receiver_adapters,
};
use crate::state::{Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, RECEIVER_ADAPTERS};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    for chain_id in [msg.this_chain_id, msg.src_chain_id] {
        if chain_id == 0 {
            return Err(ContractError::InvalidChainId { chain_id });
        }
    }
    if msg.src_chain_id == msg.this_chain_id {
        return Err(ContractError::InvalidSrcChainId {
            chain_id: msg.src_chain_id,
        });
    }

    let mut registry = ChannelRegistry::new();
    registry.merge_add(&validate_adapters(deps.api, &msg.receiver_adapters)?)?;
    validate_quorum(msg.quorum, &registry)?;

    let governance = match msg.governance {
        Some(governance) => deps.api.addr_validate(&governance)?,
        None => info.sender,
    };
    let timelock = msg
        .timelock
        .map(|timelock| deps.api.addr_validate(&timelock))
        .transpose()?;

    let config = Config {
        this_chain_id: msg.this_chain_id,
        src_chain_id: msg.src_chain_id,
        quorum: msg.quorum,
        governance,
        timelock,
    };
    CONFIG.save(deps.storage, &config)?;
    RECEIVER_ADAPTERS.save(deps.storage, &registry)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("this_chain_id", config.this_chain_id.to_string())
        .add_attribute("src_chain_id", config.src_chain_id.to_string())
        .add_attribute("quorum", config.quorum.to_string())
        .add_attribute("adapter_count", registry.count().to_string())
        .add_attribute("governance", config.governance))
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
        // Incoming
        ExecuteMsg::ReceiveMessage {
            message,
            channel_label,
        } => execute_receive_message(deps, info, message, channel_label),
        ExecuteMsg::ScheduleMessageExecution {
            msg_id,
            execution_params,
        } => execute_schedule_message_execution(deps, env, msg_id, execution_params),

        // Governance
        ExecuteMsg::UpdateReceiverAdapters {
            adapters,
            operations,
        } => execute_update_receiver_adapters(deps, info, adapters, operations),
        ExecuteMsg::UpdateQuorum { quorum } => execute_update_quorum(deps, info, quorum),
        ExecuteMsg::UpdateQuorumAndReceiverAdapters {
            quorum,
            adapters,
            operations,
        } => execute_update_quorum_and_receiver_adapters(deps, info, quorum, adapters, operations),
        ExecuteMsg::UpdateGovernanceTimelock { timelock } => {
            execute_update_governance_timelock(deps, info, timelock)
        }
        ExecuteMsg::UpdateGovernance { governance } => {
            execute_update_governance(deps, info, governance)
        }
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::ReceiverAdapters {} => to_json_binary(&query_receiver_adapters(deps)?),
        QueryMsg::IsTrustedAdapter { adapter } => {
            to_json_binary(&query_is_trusted_adapter(deps, adapter)?)
        }
        QueryMsg::MessageInfo { msg_id } => to_json_binary(&query_message_info(deps, msg_id)?),
        QueryMsg::ExecutionParamsHash { msg_id } => {
            to_json_binary(&query_execution_params_hash(deps, msg_id)?)
        }
        QueryMsg::ComputeMessageId { message } => {
            to_json_binary(&query_compute_message_id(message)?)
        }
        QueryMsg::ComputeExecutionParamsHash { params } => {
            to_json_binary(&query_compute_execution_params_hash(params)?)
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
