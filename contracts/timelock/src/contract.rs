//! Timelock Contract - Entry Points
//!
//! Scheduled transactions move through
//! `Timelocked -> Ready [eta, eta + GRACE_PERIOD] -> Executed`, or expire if
//! nobody executes them inside the grace window.

use cosmwasm_std::{
    coins, entry_point, to_json_binary, BankMsg, Binary, CosmosMsg, Deps, DepsMut, Env,
    MessageInfo, Order, Reply, Response, StdResult, SubMsg, SubMsgResult, Uint128, WasmMsg,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;

use crate::error::ContractError;
use crate::msg::{
    ConfigResponse, ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg, TransactionResponse,
    TransactionStatus, TransactionsResponse, TxCounterResponse,
};
use crate::state::{
    Config, ScheduledTransaction, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, GRACE_PERIOD,
    MAXIMUM_DELAY, MINIMUM_DELAY, TRANSACTIONS, TX_COUNTER,
};

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
    validate_delay(msg.delay)?;
    if msg.native_denom.is_empty() {
        return Err(ContractError::InvalidDenom);
    }

    let config = Config {
        admin,
        delay: msg.delay,
        native_denom: msg.native_denom,
    };
    CONFIG.save(deps.storage, &config)?;
    TX_COUNTER.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("delay", config.delay.to_string())
        .add_attribute("native_denom", config.native_denom))
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
        ExecuteMsg::ScheduleTransaction {
            target,
            value,
            data,
        } => execute_schedule_transaction(deps, env, info, target, value, data),
        ExecuteMsg::ExecuteTransaction {
            tx_id,
            target,
            value,
            data,
            eta,
        } => execute_execute_transaction(deps, env, info, tx_id, target, value, data, eta),
        ExecuteMsg::SetDelay { delay } => execute_set_delay(deps, env, info, delay),
        ExecuteMsg::SetAdmin { admin } => execute_set_admin(deps, env, info, admin),
    }
}

fn execute_schedule_transaction(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    target: String,
    value: Uint128,
    data: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    let target = deps.api.addr_validate(&target)?;

    let tx_id = TX_COUNTER.load(deps.storage)? + 1;
    let eta = env.block.time.plus_seconds(config.delay).seconds();

    let tx = ScheduledTransaction {
        id: tx_id,
        target,
        value,
        data,
        eta,
        executed: false,
    };
    TRANSACTIONS.save(deps.storage, tx_id, &tx)?;
    TX_COUNTER.save(deps.storage, &tx_id)?;

    Ok(Response::new()
        .add_attribute("action", "transaction_scheduled")
        .add_attribute("tx_id", tx_id.to_string())
        .add_attribute("target", tx.target)
        .add_attribute("value", tx.value.to_string())
        .add_attribute("data", tx.data.to_base64())
        .add_attribute("eta", eta.to_string()))
}

#[allow(clippy::too_many_arguments)]
fn execute_execute_transaction(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    tx_id: u64,
    target: String,
    value: Uint128,
    data: Binary,
    eta: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let mut tx = TRANSACTIONS
        .may_load(deps.storage, tx_id)?
        .ok_or(ContractError::InvalidTxId { tx_id })?;

    if tx.target.as_str() != target || tx.value != value || tx.data != data || tx.eta != eta {
        return Err(ContractError::InvalidTxInput { tx_id });
    }
    if tx.executed {
        return Err(ContractError::TxAlreadyExecuted { tx_id });
    }

    let now = env.block.time.seconds();
    if now < tx.eta {
        return Err(ContractError::TxTimelocked {
            tx_id,
            remaining_seconds: tx.eta - now,
        });
    }
    if now > tx.expires_at() {
        return Err(ContractError::TxExpired {
            tx_id,
            expired_at: tx.expires_at(),
        });
    }

    check_attached_value(&info, &config.native_denom, tx.value)?;

    // Flag is written before the call; a failing call reverts it together with
    // the rest of the transaction.
    tx.executed = true;
    TRANSACTIONS.save(deps.storage, tx_id, &tx)?;

    // An action with no data and no value has nothing to call.
    let call: Option<CosmosMsg> = if tx.data.is_empty() && tx.value.is_zero() {
        None
    } else if tx.data.is_empty() {
        Some(BankMsg::Send {
            to_address: tx.target.to_string(),
            amount: coins(tx.value.u128(), &config.native_denom),
        }
        .into())
    } else {
        let funds = if tx.value.is_zero() {
            vec![]
        } else {
            coins(tx.value.u128(), &config.native_denom)
        };
        Some(
            WasmMsg::Execute {
                contract_addr: tx.target.to_string(),
                msg: tx.data.clone(),
                funds,
            }
            .into(),
        )
    };

    Ok(Response::new()
        .add_submessages(call.map(|call| SubMsg::reply_on_error(call, tx_id)))
        .add_attribute("action", "transaction_executed")
        .add_attribute("tx_id", tx_id.to_string())
        .add_attribute("target", tx.target)
        .add_attribute("value", tx.value.to_string())
        .add_attribute("data", tx.data.to_base64())
        .add_attribute("eta", tx.eta.to_string()))
}

fn execute_set_delay(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    delay: u64,
) -> Result<Response, ContractError> {
    only_self(&env, &info)?;
    validate_delay(delay)?;

    let mut config = CONFIG.load(deps.storage)?;
    let old_delay = config.delay;
    config.delay = delay;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_delay")
        .add_attribute("old_delay", old_delay.to_string())
        .add_attribute("new_delay", delay.to_string()))
}

fn execute_set_admin(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    admin: String,
) -> Result<Response, ContractError> {
    only_self(&env, &info)?;
    let admin = deps.api.addr_validate(&admin)?;

    let mut config = CONFIG.load(deps.storage)?;
    let old_admin = std::mem::replace(&mut config.admin, admin);
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_admin")
        .add_attribute("old_admin", old_admin)
        .add_attribute("new_admin", config.admin))
}

// ============================================================================
// Reply
// ============================================================================

/// Called only when the downstream call of `ExecuteTransaction` fails; the
/// reply id is the transaction id.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(_deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.result {
        SubMsgResult::Ok(_) => Ok(Response::new()),
        SubMsgResult::Err(reason) => Err(ContractError::ExecutionFailsOnDst {
            tx_id: msg.id,
            reason,
        }),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Transaction { tx_id } => to_json_binary(&query_transaction(deps, env, tx_id)?),
        QueryMsg::Transactions { start_after, limit } => {
            to_json_binary(&query_transactions(deps, env, start_after, limit)?)
        }
        QueryMsg::TxCounter {} => to_json_binary(&TxCounterResponse {
            counter: TX_COUNTER.load(deps.storage)?,
        }),
    }
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        delay: config.delay,
        native_denom: config.native_denom,
        grace_period: GRACE_PERIOD,
    })
}

fn query_transaction(deps: Deps, env: Env, tx_id: u64) -> StdResult<TransactionResponse> {
    let tx = TRANSACTIONS.load(deps.storage, tx_id)?;
    Ok(to_transaction_response(tx, env.block.time.seconds()))
}

fn query_transactions(
    deps: Deps,
    env: Env,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<TransactionsResponse> {
    let limit = limit.unwrap_or(10).min(50) as usize;
    let start = start_after.map(Bound::exclusive);
    let now = env.block.time.seconds();

    let transactions = TRANSACTIONS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (_, tx) = item?;
            Ok(to_transaction_response(tx, now))
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(TransactionsResponse { transactions })
}

fn to_transaction_response(tx: ScheduledTransaction, now: u64) -> TransactionResponse {
    let status = if tx.executed {
        TransactionStatus::Executed
    } else if now < tx.eta {
        TransactionStatus::Timelocked
    } else if now > tx.expires_at() {
        TransactionStatus::Expired
    } else {
        TransactionStatus::Ready
    };

    TransactionResponse {
        tx_id: tx.id,
        target: tx.target,
        value: tx.value,
        data: tx.data,
        eta: tx.eta,
        executed: tx.executed,
        status,
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

// ============================================================================
// Internal Helpers
// ============================================================================

fn only_self(env: &Env, info: &MessageInfo) -> Result<(), ContractError> {
    if info.sender != env.contract.address {
        return Err(ContractError::OnlySelf);
    }
    Ok(())
}

fn validate_delay(delay: u64) -> Result<(), ContractError> {
    if !(MINIMUM_DELAY..=MAXIMUM_DELAY).contains(&delay) {
        return Err(ContractError::InvalidDelay {
            delay,
            min: MINIMUM_DELAY,
            max: MAXIMUM_DELAY,
        });
    }
    Ok(())
}

/// The executor must attach exactly `value` in the native denom and nothing else.
fn check_attached_value(
    info: &MessageInfo,
    native_denom: &str,
    value: Uint128,
) -> Result<(), ContractError> {
    let matches = if value.is_zero() {
        info.funds.iter().all(|c| c.amount.is_zero())
    } else {
        info.funds.len() == 1
            && info.funds[0].denom == native_denom
            && info.funds[0].amount == value
    };

    if !matches {
        return Err(ContractError::InvalidTxValue {
            expected: format!("{}{}", value, native_denom),
        });
    }
    Ok(())
}
