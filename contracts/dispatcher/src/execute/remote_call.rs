//! Outgoing fan-out.
//!
//! `RemoteCall` stores a `PendingDispatch` and emits one `reply_always`
//! sub-message per adapter. Sub-messages run in order and each reply runs
//! right after its sub-message, so reply `i` always finds `i` outcomes
//! recorded. The reply for the last adapter decides the whole call.

use cosmwasm_std::{
    coins, to_json_binary, BankMsg, Binary, DepsMut, Env, Event, MessageInfo, Reply, Response,
    SubMsg, SubMsgResult, Uint128, WasmMsg,
};

use common::{
    bytes32_to_hex, compute_message_id, count_u32, validate_adapters, AdapterExecuteMsg,
    CrossChainMessage,
};

use crate::error::ContractError;
use crate::state::{
    PendingDispatch, CONFIG, MAX_EXPIRATION, MIN_EXPIRATION, NONCE, PENDING_DISPATCH,
    REMOTE_RECEIVERS, SENDER_ADAPTERS,
};

/// Send a message through every registered sender adapter minus exclusions.
#[allow(clippy::too_many_arguments)]
pub fn execute_remote_call(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    dst_chain_id: u64,
    target: String,
    call_data: Binary,
    native_value: Uint128,
    expiration_duration: u64,
    refund_address: String,
    fees: Vec<Uint128>,
    success_threshold: u32,
    excluded_adapters: Vec<String>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.authorised_caller {
        return Err(ContractError::UnauthorizedCaller);
    }

    if dst_chain_id == 0 || dst_chain_id == config.this_chain_id {
        return Err(ContractError::InvalidDstChainId {
            chain_id: dst_chain_id,
        });
    }
    if target.is_empty() {
        return Err(ContractError::InvalidTarget);
    }
    let refund_address = deps.api.addr_validate(&refund_address).map_err(|e| {
        ContractError::InvalidRefundAddress {
            reason: e.to_string(),
        }
    })?;
    if refund_address == env.contract.address {
        return Err(ContractError::InvalidRefundAddress {
            reason: "cannot be the dispatcher".to_string(),
        });
    }
    let receiver = REMOTE_RECEIVERS
        .may_load(deps.storage, dst_chain_id)?
        .ok_or(ContractError::RemoteReceiverNotSet {
            chain_id: dst_chain_id,
        })?;
    if !(MIN_EXPIRATION..=MAX_EXPIRATION).contains(&expiration_duration) {
        return Err(ContractError::InvalidExpirationDuration {
            duration: expiration_duration,
            min: MIN_EXPIRATION,
            max: MAX_EXPIRATION,
        });
    }

    // Channel selection
    let excluded = validate_adapters(deps.api, &excluded_adapters)?;
    let adapters = SENDER_ADAPTERS.load(deps.storage)?.filter(&excluded)?;
    if adapters.is_empty() {
        return Err(ContractError::NoSenderAdapters);
    }
    let adapter_count = count_u32(adapters.len());
    if success_threshold == 0 || success_threshold > adapter_count {
        return Err(ContractError::InvalidSuccessThreshold {
            threshold: success_threshold,
            adapters: adapter_count,
        });
    }
    if fees.len() != adapters.len() {
        return Err(ContractError::InvalidFeesLength {
            expected: adapter_count,
            got: count_u32(fees.len()),
        });
    }

    let funds_provided = attached_fee_funds(&info, &config.fee_denom)?;
    let required = fees
        .iter()
        .try_fold(Uint128::zero(), |total, fee| total.checked_add(*fee))?;
    if required > funds_provided {
        return Err(ContractError::InsufficientFees {
            required,
            provided: funds_provided,
        });
    }

    let nonce = NONCE.load(deps.storage)? + 1;
    NONCE.save(deps.storage, &nonce)?;

    let message = CrossChainMessage {
        src_chain_id: config.this_chain_id,
        dst_chain_id,
        target,
        nonce,
        call_data,
        native_value,
        expiration: env.block.time.plus_seconds(expiration_duration).seconds(),
    };
    let msg_id = compute_message_id(&message);

    let dispatch = to_json_binary(&AdapterExecuteMsg::Dispatch {
        dst_chain_id,
        receiver,
        message: message.clone(),
    })?;
    let sub_msgs: Vec<SubMsg> = adapters
        .iter()
        .zip(&fees)
        .enumerate()
        .map(|(index, (adapter, fee))| {
            let funds = if fee.is_zero() {
                vec![]
            } else {
                coins(fee.u128(), &config.fee_denom)
            };
            SubMsg::reply_always(
                WasmMsg::Execute {
                    contract_addr: adapter.to_string(),
                    msg: dispatch.clone(),
                    funds,
                },
                index as u64,
            )
        })
        .collect();

    PENDING_DISPATCH.save(
        deps.storage,
        &PendingDispatch {
            msg_id,
            message,
            adapters,
            fees,
            outcomes: Vec::with_capacity(sub_msgs.len()),
            success_threshold,
            refund_address,
            funds_provided,
        },
    )?;

    Ok(Response::new()
        .add_submessages(sub_msgs)
        .add_attribute("action", "remote_call")
        .add_attribute("msg_id", bytes32_to_hex(&msg_id))
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("adapter_count", adapter_count.to_string()))
}

/// Record one adapter outcome; on the last one enforce the threshold and refund.
pub fn handle_dispatch_reply(deps: DepsMut, msg: Reply) -> Result<Response, ContractError> {
    let mut pending = PENDING_DISPATCH
        .may_load(deps.storage)?
        .ok_or(ContractError::UnexpectedReply { id: msg.id })?;
    if msg.id != pending.outcomes.len() as u64 {
        return Err(ContractError::UnexpectedReply { id: msg.id });
    }
    let adapter = pending
        .adapters
        .get(msg.id as usize)
        .cloned()
        .ok_or(ContractError::UnexpectedReply { id: msg.id })?;

    let mut response = Response::new();
    match msg.result {
        SubMsgResult::Ok(_) => pending.outcomes.push(true),
        SubMsgResult::Err(reason) => {
            pending.outcomes.push(false);
            response = response.add_event(
                Event::new("message_send_failed")
                    .add_attribute("sender_adapter", adapter)
                    .add_attribute("msg_id", bytes32_to_hex(&pending.msg_id))
                    .add_attribute("reason", reason),
            );
        }
    }

    if !pending.is_complete() {
        PENDING_DISPATCH.save(deps.storage, &pending)?;
        return Ok(response);
    }
    PENDING_DISPATCH.remove(deps.storage);

    let successes = pending.successes();
    if successes < pending.success_threshold {
        return Err(ContractError::MultiMessageSendFailed {
            successes,
            threshold: pending.success_threshold,
        });
    }

    let config = CONFIG.load(deps.storage)?;
    let refund = pending.funds_provided.checked_sub(pending.spent())?;
    if !refund.is_zero() {
        response = response.add_message(BankMsg::Send {
            to_address: pending.refund_address.to_string(),
            amount: coins(refund.u128(), &config.fee_denom),
        });
    }

    let message = &pending.message;
    let sender_adapters = pending
        .adapters
        .iter()
        .map(|a| a.as_str())
        .collect::<Vec<_>>()
        .join(",");
    let adapter_success = pending
        .outcomes
        .iter()
        .map(|ok| ok.to_string())
        .collect::<Vec<_>>()
        .join(",");

    Ok(response
        .add_attribute("action", "multi_bridge_message_sent")
        .add_attribute("msg_id", bytes32_to_hex(&pending.msg_id))
        .add_attribute("nonce", message.nonce.to_string())
        .add_attribute("dst_chain_id", message.dst_chain_id.to_string())
        .add_attribute("target", &message.target)
        .add_attribute("call_data", message.call_data.to_base64())
        .add_attribute("native_value", message.native_value.to_string())
        .add_attribute("expiration", message.expiration.to_string())
        .add_attribute("sender_adapters", sender_adapters)
        .add_attribute("adapter_success", adapter_success)
        .add_attribute("success_count", successes.to_string())
        .add_attribute("refund", refund.to_string()))
}

/// Total attached in `fee_denom`; any other denom is rejected.
fn attached_fee_funds(info: &MessageInfo, fee_denom: &str) -> Result<Uint128, ContractError> {
    let mut total = Uint128::zero();
    for coin in &info.funds {
        if coin.denom != fee_denom {
            return Err(ContractError::InvalidFunds {
                reason: format!("unexpected denom {}, fees are paid in {}", coin.denom, fee_denom),
            });
        }
        total = total.checked_add(coin.amount)?;
    }
    Ok(total)
}
