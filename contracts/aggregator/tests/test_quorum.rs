//! Quorum Aggregation Integration Tests.
//!
//! Tests the aggregator together with the timelock:
//! - Delivery counting, duplicate and late deliveries
//! - Scheduling exactly once after quorum, deadline and hash checks
//! - Timelocked / ready / executed transitions of the scheduled action
//! - Governance updates, directly and through the timelock

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response, StdResult,
    Uint128,
};
use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};
use cw_storage_plus::Item;

use aggregator::msg::{
    ConfigResponse, ExecuteMsg, HashResponse, InstantiateMsg, IsTrustedAdapterResponse,
    MessageInfoResponse, QueryMsg, ReceiverAdaptersResponse, StoredHashResponse,
};
use common::{compute_message_id, CrossChainMessage, ExecutionParams};
use timelock::state::MINIMUM_DELAY;

const SRC_CHAIN: u64 = 1;
const THIS_CHAIN: u64 = 2;
const ONE_WEEK: u64 = 7 * 24 * 60 * 60;

// ============================================================================
// Mock Target
// ============================================================================

#[cw_serde]
enum TargetExecuteMsg {
    Increment {},
}

#[cw_serde]
enum TargetQueryMsg {
    Count {},
}

const COUNT: Item<u64> = Item::new("count");

fn target_instantiate(deps: DepsMut, _: Env, _: MessageInfo, _: Empty) -> StdResult<Response> {
    COUNT.save(deps.storage, &0)?;
    Ok(Response::new())
}

fn target_execute(
    deps: DepsMut,
    _: Env,
    _: MessageInfo,
    msg: TargetExecuteMsg,
) -> StdResult<Response> {
    match msg {
        TargetExecuteMsg::Increment {} => {
            COUNT.update(deps.storage, |c| -> StdResult<_> { Ok(c + 1) })?;
            Ok(Response::new())
        }
    }
}

fn target_query(deps: Deps, _: Env, msg: TargetQueryMsg) -> StdResult<Binary> {
    match msg {
        TargetQueryMsg::Count {} => to_json_binary(&COUNT.load(deps.storage)?),
    }
}

// ============================================================================
// Test Setup
// ============================================================================

fn contract_aggregator() -> Box<dyn cw_multi_test::Contract<Empty>> {
    Box::new(ContractWrapper::new(
        aggregator::contract::execute,
        aggregator::contract::instantiate,
        aggregator::contract::query,
    ))
}

fn contract_timelock() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        timelock::contract::execute,
        timelock::contract::instantiate,
        timelock::contract::query,
    )
    .with_reply(timelock::contract::reply);
    Box::new(contract)
}

fn contract_target() -> Box<dyn cw_multi_test::Contract<Empty>> {
    Box::new(ContractWrapper::new(
        target_execute,
        target_instantiate,
        target_query,
    ))
}

struct TestEnv {
    app: App,
    aggregator: Addr,
    timelock: Addr,
    target: Addr,
    deployer: Addr,
    /// Receiver adapters A, B, C (ascending)
    adapters: Vec<Addr>,
}

impl TestEnv {
    fn adapter(&self, label: &str) -> Addr {
        match label {
            "A" => self.adapters[0].clone(),
            "B" => self.adapters[1].clone(),
            "C" => self.adapters[2].clone(),
            _ => Addr::unchecked("terra1untrusted"),
        }
    }
}

/// Aggregator with adapters A, B, C and quorum 2, wired to a timelock.
/// With `handover`, governance is moved from the deployer to the timelock.
fn setup(handover: bool) -> TestEnv {
    let mut app = App::default();
    let deployer = Addr::unchecked("terra1deployer");
    let adapters = vec![
        Addr::unchecked("terra1adaptera"),
        Addr::unchecked("terra1adapterb"),
        Addr::unchecked("terra1adapterc"),
    ];

    let aggregator_code = app.store_code(contract_aggregator());
    let timelock_code = app.store_code(contract_timelock());
    let target_code = app.store_code(contract_target());

    let aggregator = app
        .instantiate_contract(
            aggregator_code,
            deployer.clone(),
            &InstantiateMsg {
                this_chain_id: THIS_CHAIN,
                src_chain_id: SRC_CHAIN,
                quorum: 2,
                receiver_adapters: adapters.iter().map(|a| a.to_string()).collect(),
                governance: None,
                timelock: None,
            },
            &[],
            "aggregator",
            None,
        )
        .unwrap();

    let timelock = app
        .instantiate_contract(
            timelock_code,
            deployer.clone(),
            &timelock::msg::InstantiateMsg {
                admin: aggregator.to_string(),
                delay: MINIMUM_DELAY,
                native_denom: "uluna".to_string(),
            },
            &[],
            "timelock",
            None,
        )
        .unwrap();

    let target = app
        .instantiate_contract(target_code, deployer.clone(), &Empty {}, &[], "target", None)
        .unwrap();

    app.execute_contract(
        deployer.clone(),
        aggregator.clone(),
        &ExecuteMsg::UpdateGovernanceTimelock {
            timelock: timelock.to_string(),
        },
        &[],
    )
    .unwrap();

    if handover {
        app.execute_contract(
            deployer.clone(),
            aggregator.clone(),
            &ExecuteMsg::UpdateGovernance {
                governance: timelock.to_string(),
            },
            &[],
        )
        .unwrap();
    }

    TestEnv {
        app,
        aggregator,
        timelock,
        target,
        deployer,
        adapters,
    }
}

fn message_to(env: &TestEnv, target: &Addr, call_data: Binary, nonce: u64) -> CrossChainMessage {
    CrossChainMessage {
        src_chain_id: SRC_CHAIN,
        dst_chain_id: THIS_CHAIN,
        target: target.to_string(),
        nonce,
        call_data,
        native_value: Uint128::zero(),
        expiration: env.app.block_info().time.seconds() + ONE_WEEK,
    }
}

fn increment_message(env: &TestEnv) -> CrossChainMessage {
    let target = env.target.clone();
    message_to(
        env,
        &target,
        to_json_binary(&TargetExecuteMsg::Increment {}).unwrap(),
        1,
    )
}

fn msg_id(message: &CrossChainMessage) -> Binary {
    Binary::from(compute_message_id(message).to_vec())
}

fn deliver(
    env: &mut TestEnv,
    label: &str,
    message: &CrossChainMessage,
) -> Result<AppResponse, String> {
    let adapter = env.adapter(label);
    env.app
        .execute_contract(
            adapter,
            env.aggregator.clone(),
            &ExecuteMsg::ReceiveMessage {
                message: message.clone(),
                channel_label: label.to_string(),
            },
            &[],
        )
        .map_err(|e| e.root_cause().to_string())
}

fn schedule(
    env: &mut TestEnv,
    msg_id: Binary,
    params: ExecutionParams,
) -> Result<AppResponse, String> {
    env.app
        .execute_contract(
            Addr::unchecked("terra1anyone"),
            env.aggregator.clone(),
            &ExecuteMsg::ScheduleMessageExecution {
                msg_id,
                execution_params: params,
            },
            &[],
        )
        .map_err(|e| e.root_cause().to_string())
}

fn message_info(env: &TestEnv, message: &CrossChainMessage) -> MessageInfoResponse {
    env.app
        .wrap()
        .query_wasm_smart(
            &env.aggregator,
            &QueryMsg::MessageInfo {
                msg_id: msg_id(message),
            },
        )
        .unwrap()
}

fn find_attr(res: &AppResponse, key: &str) -> String {
    res.events
        .iter()
        .flat_map(|e| &e.attributes)
        .find(|a| a.key == key)
        .map(|a| a.value.clone())
        .unwrap_or_else(|| panic!("attribute {} not found", key))
}

fn execute_in_timelock(env: &mut TestEnv, tx_id: u64) -> Result<AppResponse, String> {
    let tx: timelock::msg::TransactionResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.timelock, &timelock::msg::QueryMsg::Transaction { tx_id })
        .unwrap();
    env.app
        .execute_contract(
            Addr::unchecked("terra1executor"),
            env.timelock.clone(),
            &timelock::msg::ExecuteMsg::ExecuteTransaction {
                tx_id,
                target: tx.target.to_string(),
                value: tx.value,
                data: tx.data,
                eta: tx.eta,
            },
            &[],
        )
        .map_err(|e| e.root_cause().to_string())
}

fn advance(env: &mut TestEnv, seconds: u64) {
    env.app.update_block(|block| {
        block.time = block.time.plus_seconds(seconds);
        block.height += seconds / 5;
    });
}

fn target_count(env: &TestEnv) -> u64 {
    env.app
        .wrap()
        .query_wasm_smart(&env.target, &TargetQueryMsg::Count {})
        .unwrap()
}

// ============================================================================
// Quorum Flow
// ============================================================================

#[test]
fn test_quorum_of_two_full_lifecycle() {
    let mut env = setup(true);
    let message = increment_message(&env);
    let id = msg_id(&message);

    deliver(&mut env, "A", &message).unwrap();
    assert_eq!(
        message_info(&env, &message),
        MessageInfoResponse {
            scheduled: false,
            delivery_count: 1,
            channel_labels: vec!["A".to_string()],
        }
    );

    let err = schedule(&mut env, id.clone(), message.execution_params()).unwrap_err();
    assert!(err.contains("Quorum not achieved"), "got: {}", err);

    let res = deliver(&mut env, "B", &message).unwrap();
    assert_eq!(find_attr(&res, "delivery_count"), "2");

    let res = schedule(&mut env, id.clone(), message.execution_params()).unwrap();
    assert_eq!(find_attr(&res, "tx_id"), "1");
    assert!(message_info(&env, &message).scheduled);

    // Exactly once
    let err = schedule(&mut env, id, message.execution_params()).unwrap_err();
    assert!(err.contains("already scheduled"), "got: {}", err);

    // Late channel is refused once the message is scheduled
    let err = deliver(&mut env, "C", &message).unwrap_err();
    assert!(err.contains("already scheduled"), "got: {}", err);
    assert_eq!(message_info(&env, &message).delivery_count, 2);

    let err = execute_in_timelock(&mut env, 1).unwrap_err();
    assert!(err.contains("timelocked"), "got: {}", err);

    advance(&mut env, MINIMUM_DELAY);
    execute_in_timelock(&mut env, 1).unwrap();
    assert_eq!(target_count(&env), 1);

    let err = execute_in_timelock(&mut env, 1).unwrap_err();
    assert!(err.contains("already executed"), "got: {}", err);
    assert_eq!(target_count(&env), 1);
}

#[test]
fn test_delivery_order_does_not_matter() {
    let mut env = setup(true);
    let message = increment_message(&env);

    deliver(&mut env, "C", &message).unwrap();
    deliver(&mut env, "A", &message).unwrap();

    let info = message_info(&env, &message);
    assert_eq!(info.delivery_count, 2);
    // Labels come back in adapter order, not arrival order
    assert_eq!(info.channel_labels, vec!["A".to_string(), "C".to_string()]);

    schedule(&mut env, msg_id(&message), message.execution_params()).unwrap();
}

#[test]
fn test_duplicate_delivery_rejected() {
    let mut env = setup(true);
    let message = increment_message(&env);

    deliver(&mut env, "A", &message).unwrap();
    let err = deliver(&mut env, "A", &message).unwrap_err();
    assert!(err.contains("Duplicate delivery"), "got: {}", err);
    assert_eq!(message_info(&env, &message).delivery_count, 1);

    let err = schedule(&mut env, msg_id(&message), message.execution_params()).unwrap_err();
    assert!(err.contains("Quorum not achieved"), "got: {}", err);
}

#[test]
fn test_label_is_not_part_of_the_id() {
    let mut env = setup(true);
    let message = increment_message(&env);
    let adapter_a = env.adapter("A");
    let adapter_b = env.adapter("B");

    for (adapter, label) in [(adapter_a, "wormhole"), (adapter_b, "axelar")] {
        env.app
            .execute_contract(
                adapter,
                env.aggregator.clone(),
                &ExecuteMsg::ReceiveMessage {
                    message: message.clone(),
                    channel_label: label.to_string(),
                },
                &[],
            )
            .unwrap();
    }

    let info = message_info(&env, &message);
    assert_eq!(info.delivery_count, 2);
    assert_eq!(
        info.channel_labels,
        vec!["wormhole".to_string(), "axelar".to_string()]
    );
}

#[test]
fn test_removed_adapter_delivery_no_longer_counts() {
    let mut env = setup(false);
    let message = increment_message(&env);
    deliver(&mut env, "A", &message).unwrap();

    let deployer = env.deployer.clone();
    env.app
        .execute_contract(
            deployer.clone(),
            env.aggregator.clone(),
            &ExecuteMsg::UpdateReceiverAdapters {
                adapters: vec![env.adapters[0].to_string()],
                operations: vec![false],
            },
            &[],
        )
        .unwrap();

    let res = deliver(&mut env, "B", &message).unwrap();
    assert_eq!(find_attr(&res, "delivery_count"), "1");

    let info = message_info(&env, &message);
    assert_eq!(info.delivery_count, 1);
    assert_eq!(info.channel_labels, vec!["A".to_string(), "B".to_string()]);

    let err = schedule(&mut env, msg_id(&message), message.execution_params()).unwrap_err();
    assert!(err.contains("Quorum not achieved"), "got: {}", err);

    // Re-trusting the adapter restores its earlier delivery
    env.app
        .execute_contract(
            deployer,
            env.aggregator.clone(),
            &ExecuteMsg::UpdateReceiverAdapters {
                adapters: vec![env.adapters[0].to_string()],
                operations: vec![true],
            },
            &[],
        )
        .unwrap();
    assert_eq!(message_info(&env, &message).delivery_count, 2);
    schedule(&mut env, msg_id(&message), message.execution_params()).unwrap();
}

#[test]
fn test_receive_validation() {
    let mut env = setup(true);
    let message = increment_message(&env);

    let err = deliver(&mut env, "X", &message).unwrap_err();
    assert!(err.contains("Adapter not trusted"), "got: {}", err);

    let wrong_dst = CrossChainMessage {
        dst_chain_id: 99,
        ..message.clone()
    };
    let err = deliver(&mut env, "A", &wrong_dst).unwrap_err();
    assert!(err.contains("Invalid destination chain id"), "got: {}", err);

    let wrong_src = CrossChainMessage {
        src_chain_id: 99,
        ..message.clone()
    };
    let err = deliver(&mut env, "A", &wrong_src).unwrap_err();
    assert!(err.contains("Invalid source chain id"), "got: {}", err);

    let no_target = CrossChainMessage {
        target: String::new(),
        ..message
    };
    let err = deliver(&mut env, "A", &no_target).unwrap_err();
    assert!(err.contains("Invalid target"), "got: {}", err);
}

#[test]
fn test_schedule_rejects_tampered_params() {
    let mut env = setup(true);
    let message = increment_message(&env);
    deliver(&mut env, "A", &message).unwrap();
    deliver(&mut env, "B", &message).unwrap();

    let mut tampered = message.execution_params();
    tampered.value = Uint128::new(1);
    let err = schedule(&mut env, msg_id(&message), tampered).unwrap_err();
    assert!(err.contains("hash mismatch"), "got: {}", err);

    // Unknown id has no stored hash
    let other = CrossChainMessage {
        nonce: 2,
        ..message.clone()
    };
    let err = schedule(&mut env, msg_id(&other), other.execution_params()).unwrap_err();
    assert!(err.contains("hash mismatch"), "got: {}", err);

    let err = schedule(&mut env, Binary::from(vec![1u8; 31]), message.execution_params())
        .unwrap_err();
    assert!(err.contains("Invalid hash length"), "got: {}", err);

    // Stored hash is the one of the delivered params
    let stored: StoredHashResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.aggregator,
            &QueryMsg::ExecutionParamsHash {
                msg_id: msg_id(&message),
            },
        )
        .unwrap();
    let computed: HashResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.aggregator,
            &QueryMsg::ComputeExecutionParamsHash {
                params: message.execution_params(),
            },
        )
        .unwrap();
    assert_eq!(stored.hash, Some(computed.hash));
}

#[test]
fn test_schedule_after_expiration_rejected() {
    let mut env = setup(true);
    let message = increment_message(&env);
    deliver(&mut env, "A", &message).unwrap();
    deliver(&mut env, "B", &message).unwrap();

    advance(&mut env, ONE_WEEK);
    // Exactly at expiration is still allowed, so step one second further
    advance(&mut env, 1);

    let err = schedule(&mut env, msg_id(&message), message.execution_params()).unwrap_err();
    assert!(err.contains("passed deadline"), "got: {}", err);
    assert!(!message_info(&env, &message).scheduled);
}

#[test]
fn test_schedule_at_expiration_allowed() {
    let mut env = setup(true);
    let message = increment_message(&env);
    deliver(&mut env, "A", &message).unwrap();
    deliver(&mut env, "B", &message).unwrap();

    advance(&mut env, ONE_WEEK);
    schedule(&mut env, msg_id(&message), message.execution_params()).unwrap();
}

// ============================================================================
// Governance
// ============================================================================

#[test]
fn test_governance_only() {
    let mut env = setup(true);
    let deployer = env.deployer.clone();

    let err = env
        .app
        .execute_contract(
            deployer,
            env.aggregator.clone(),
            &ExecuteMsg::UpdateQuorum { quorum: 3 },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("only governance"));
}

#[test]
fn test_removal_breaking_quorum_is_atomic() {
    let mut env = setup(false);
    let deployer = env.deployer.clone();

    let err = env
        .app
        .execute_contract(
            deployer.clone(),
            env.aggregator.clone(),
            &ExecuteMsg::UpdateReceiverAdapters {
                adapters: vec![env.adapters[0].to_string(), env.adapters[1].to_string()],
                operations: vec![false, false],
            },
            &[],
        )
        .unwrap_err();
    assert!(
        err.root_cause().to_string().contains("Invalid quorum"),
        "got: {}",
        err.root_cause()
    );

    let adapters: ReceiverAdaptersResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.aggregator, &QueryMsg::ReceiverAdapters {})
        .unwrap();
    assert_eq!(adapters.adapters, env.adapters);

    // Lowering the quorum at the same time makes the removal valid
    env.app
        .execute_contract(
            deployer,
            env.aggregator.clone(),
            &ExecuteMsg::UpdateQuorumAndReceiverAdapters {
                quorum: 1,
                adapters: vec![env.adapters[0].to_string(), env.adapters[1].to_string()],
                operations: vec![false, false],
            },
            &[],
        )
        .unwrap();

    let config: ConfigResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.aggregator, &QueryMsg::Config {})
        .unwrap();
    assert_eq!(config.quorum, 1);

    let trusted: IsTrustedAdapterResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.aggregator,
            &QueryMsg::IsTrustedAdapter {
                adapter: env.adapters[0].to_string(),
            },
        )
        .unwrap();
    assert!(!trusted.trusted);
}

#[test]
fn test_quorum_bounds() {
    let mut env = setup(false);
    let deployer = env.deployer.clone();

    for quorum in [0, 4] {
        let err = env
            .app
            .execute_contract(
                deployer.clone(),
                env.aggregator.clone(),
                &ExecuteMsg::UpdateQuorum { quorum },
                &[],
            )
            .unwrap_err();
        assert!(err.root_cause().to_string().contains("Invalid quorum"));
    }

    env.app
        .execute_contract(
            deployer.clone(),
            env.aggregator.clone(),
            &ExecuteMsg::UpdateQuorum { quorum: 3 },
            &[],
        )
        .unwrap();

    // Adding and removing in one batch; lengths must match
    let err = env
        .app
        .execute_contract(
            deployer.clone(),
            env.aggregator.clone(),
            &ExecuteMsg::UpdateReceiverAdapters {
                adapters: vec!["terra1adapterd".to_string()],
                operations: vec![],
            },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("Invalid input length"));

    env.app
        .execute_contract(
            deployer,
            env.aggregator.clone(),
            &ExecuteMsg::UpdateReceiverAdapters {
                adapters: vec!["terra1adapterd".to_string(), env.adapters[0].to_string()],
                operations: vec![true, false],
            },
            &[],
        )
        .unwrap();

    let adapters: ReceiverAdaptersResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.aggregator, &QueryMsg::ReceiverAdapters {})
        .unwrap();
    assert_eq!(
        adapters.adapters,
        vec![
            Addr::unchecked("terra1adapterb"),
            Addr::unchecked("terra1adapterc"),
            Addr::unchecked("terra1adapterd"),
        ]
    );
}

#[test]
fn test_quorum_update_through_timelock() {
    let mut env = setup(true);
    let aggregator = env.aggregator.clone();
    let message = message_to(
        &env,
        &aggregator,
        to_json_binary(&ExecuteMsg::UpdateQuorum { quorum: 3 }).unwrap(),
        1,
    );

    deliver(&mut env, "A", &message).unwrap();
    deliver(&mut env, "B", &message).unwrap();
    schedule(&mut env, msg_id(&message), message.execution_params()).unwrap();

    advance(&mut env, MINIMUM_DELAY);
    execute_in_timelock(&mut env, 1).unwrap();

    let config: ConfigResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.aggregator, &QueryMsg::Config {})
        .unwrap();
    assert_eq!(config.quorum, 3);
    assert_eq!(config.governance, env.timelock);

    // The next message now needs all three channels
    let next = CrossChainMessage {
        nonce: 2,
        ..increment_message(&env)
    };
    deliver(&mut env, "A", &next).unwrap();
    deliver(&mut env, "B", &next).unwrap();
    let err = schedule(&mut env, msg_id(&next), next.execution_params()).unwrap_err();
    assert!(err.contains("Quorum not achieved"), "got: {}", err);
    deliver(&mut env, "C", &next).unwrap();
    schedule(&mut env, msg_id(&next), next.execution_params()).unwrap();
}
