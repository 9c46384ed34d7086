//! Delivery collection and scheduling.

use cosmwasm_std::{to_json_binary, Binary, DepsMut, Env, MessageInfo, Response, WasmMsg};

use common::{
    bytes32_to_hex, compute_execution_params_hash, compute_message_id, parse_bytes32,
    CrossChainMessage, ExecutionParams,
};

use crate::error::ContractError;
use crate::state::{
    trusted_delivery_count, CONFIG, DELIVERIES, DELIVERY_LABELS, EXEC_PARAMS_HASH,
    RECEIVER_ADAPTERS, SCHEDULED,
};

/// Record a delivery from a trusted receiver adapter.
///
/// Counts at most once per adapter per message id. The first delivery fixes
/// the execution params hash for the id.
pub fn execute_receive_message(
    deps: DepsMut,
    info: MessageInfo,
    message: CrossChainMessage,
    channel_label: String,
) -> Result<Response, ContractError> {
    let adapter = info.sender;
    let registry = RECEIVER_ADAPTERS.load(deps.storage)?;
    if !registry.is_trusted(&adapter) {
        return Err(ContractError::AdapterNotTrusted {
            adapter: adapter.to_string(),
        });
    }

    let config = CONFIG.load(deps.storage)?;
    if message.dst_chain_id != config.this_chain_id {
        return Err(ContractError::InvalidDstChainId {
            chain_id: message.dst_chain_id,
        });
    }
    if message.target.is_empty() {
        return Err(ContractError::InvalidTarget);
    }
    if message.src_chain_id != config.src_chain_id {
        return Err(ContractError::InvalidSrcChainId {
            chain_id: message.src_chain_id,
        });
    }

    let msg_id = compute_message_id(&message);
    let msg_id_hex = bytes32_to_hex(&msg_id);
    let key = msg_id.as_slice();

    if DELIVERIES.has(deps.storage, (key, &adapter)) {
        return Err(ContractError::DuplicateDelivery {
            msg_id: msg_id_hex,
            adapter: adapter.to_string(),
        });
    }
    if SCHEDULED.may_load(deps.storage, key)?.unwrap_or(false) {
        return Err(ContractError::MessageAlreadyScheduled { msg_id: msg_id_hex });
    }

    let params_hash = compute_execution_params_hash(&message.execution_params());
    match EXEC_PARAMS_HASH.may_load(deps.storage, key)? {
        None => EXEC_PARAMS_HASH.save(deps.storage, key, &params_hash)?,
        Some(stored) if stored != params_hash => {
            return Err(ContractError::ConflictingExecutionData { msg_id: msg_id_hex });
        }
        Some(_) => {}
    }

    DELIVERIES.save(deps.storage, (key, &adapter), &true)?;
    DELIVERY_LABELS.save(deps.storage, (key, &adapter), &channel_label)?;
    let delivery_count = trusted_delivery_count(deps.storage, key, &registry)?;

    Ok(Response::new()
        .add_attribute("action", "message_received")
        .add_attribute("msg_id", msg_id_hex)
        .add_attribute("channel_label", channel_label)
        .add_attribute("nonce", message.nonce.to_string())
        .add_attribute("receiver_adapter", adapter)
        .add_attribute("delivery_count", delivery_count.to_string())
        .add_attribute("quorum", config.quorum.to_string()))
}

/// Hand a quorate message to the timelock. Callable by anyone, succeeds once.
pub fn execute_schedule_message_execution(
    deps: DepsMut,
    env: Env,
    msg_id: Binary,
    execution_params: ExecutionParams,
) -> Result<Response, ContractError> {
    let msg_id = parse_bytes32(&msg_id)?;
    let msg_id_hex = bytes32_to_hex(&msg_id);
    let key = msg_id.as_slice();

    let params_hash = compute_execution_params_hash(&execution_params);
    if EXEC_PARAMS_HASH.may_load(deps.storage, key)? != Some(params_hash) {
        return Err(ContractError::HashMismatch { msg_id: msg_id_hex });
    }

    let now = env.block.time.seconds();
    if now > execution_params.expiration {
        return Err(ContractError::PassedDeadline {
            expiration: execution_params.expiration,
            now,
        });
    }

    if SCHEDULED.may_load(deps.storage, key)?.unwrap_or(false) {
        return Err(ContractError::MessageAlreadyScheduled { msg_id: msg_id_hex });
    }

    let config = CONFIG.load(deps.storage)?;
    let registry = RECEIVER_ADAPTERS.load(deps.storage)?;
    // Deliveries from adapters removed since then no longer count.
    let delivered = trusted_delivery_count(deps.storage, key, &registry)?;
    if delivered < config.quorum {
        return Err(ContractError::QuorumNotAchieved {
            delivered,
            quorum: config.quorum,
        });
    }

    let timelock = config.timelock.ok_or(ContractError::TimelockNotSet)?;

    SCHEDULED.save(deps.storage, key, &true)?;

    let schedule = WasmMsg::Execute {
        contract_addr: timelock.to_string(),
        msg: to_json_binary(&timelock::msg::ExecuteMsg::ScheduleTransaction {
            target: execution_params.target.clone(),
            value: execution_params.value,
            data: execution_params.call_data.clone(),
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(schedule)
        .add_attribute("action", "message_execution_scheduled")
        .add_attribute("msg_id", msg_id_hex)
        .add_attribute("target", execution_params.target)
        .add_attribute("native_value", execution_params.value.to_string())
        .add_attribute("nonce", execution_params.nonce.to_string())
        .add_attribute("call_data", execution_params.call_data.to_base64())
        .add_attribute("timelock", timelock))
}
