use cosmwasm_std::testing::{mock_dependencies, mock_env};
use cosmwasm_std::{coins, Addr, BankMsg, CosmosMsg, Empty, HexBinary};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};
use cw_ownable::OwnershipError;

use crossgov_interface::dispatch::DispatchMessage;
use crossgov_interface::governor::InfoResponse;

use crate::contract::{migrate, CONTRACT_NAME, CONTRACT_VERSION};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, NextMessageIdResponse, QueryMsg};
use crate::ContractError;

const OWNER: &str = "owner";
const ADDR1: &str = "addr1";

fn dispatcher_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        crate::contract::execute,
        crate::contract::instantiate,
        crate::contract::query,
    )
    .with_migrate(crate::contract::migrate);
    Box::new(contract)
}

fn setup_test_case(app: &mut App) -> Addr {
    let dispatcher_id = app.store_code(dispatcher_contract());
    app.instantiate_contract(
        dispatcher_id,
        Addr::unchecked(OWNER),
        &InstantiateMsg {
            owner: OWNER.to_string(),
        },
        &[],
        "hub dispatcher",
        None,
    )
    .unwrap()
}

fn dispatch(
    app: &mut App,
    dispatcher: &Addr,
    sender: &str,
    chain_id: u16,
    msgs: Vec<CosmosMsg>,
) -> anyhow::Result<AppResponse> {
    app.execute_contract(
        Addr::unchecked(sender),
        dispatcher.clone(),
        &ExecuteMsg::Dispatch { chain_id, msgs },
        &[],
    )
}

fn dispatched_payload(res: &AppResponse) -> Vec<u8> {
    let attrs = res.custom_attrs(1);
    let payload = &attrs
        .iter()
        .find(|attr| attr.key == "message_dispatched")
        .unwrap()
        .value;
    HexBinary::from_hex(payload).unwrap().to_vec()
}

fn get_next_message_id(app: &App, dispatcher: &Addr) -> u64 {
    let next: NextMessageIdResponse = app
        .wrap()
        .query_wasm_smart(dispatcher, &QueryMsg::NextMessageId {})
        .unwrap();
    next.message_id
}

#[test]
fn test_instantiate() {
    let mut app = App::default();
    let dispatcher = setup_test_case(&mut app);

    let ownership: cw_ownable::Ownership<Addr> = app
        .wrap()
        .query_wasm_smart(&dispatcher, &QueryMsg::Ownership {})
        .unwrap();
    assert_eq!(ownership.owner, Some(Addr::unchecked(OWNER)));

    assert_eq!(get_next_message_id(&app, &dispatcher), 0);

    let info: InfoResponse = app
        .wrap()
        .query_wasm_smart(&dispatcher, &QueryMsg::Info {})
        .unwrap();
    assert_eq!(info.info.contract, CONTRACT_NAME);
    assert_eq!(info.info.version, CONTRACT_VERSION);
}

#[test]
fn test_dispatch() {
    let mut app = App::default();
    let dispatcher = setup_test_case(&mut app);

    let msgs: Vec<CosmosMsg> = vec![BankMsg::Send {
        to_address: "spoke_treasury".to_string(),
        amount: coins(500, "ujuno"),
    }
    .into()];

    // Only the owner publishes.
    let err: ContractError = dispatch(&mut app, &dispatcher, ADDR1, 2, msgs.clone())
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(err, ContractError::Ownership(OwnershipError::NotOwner));

    // The logged payload carries the full wire message.
    let res = dispatch(&mut app, &dispatcher, OWNER, 2, msgs.clone()).unwrap();
    let decoded = DispatchMessage::decode(&dispatched_payload(&res)).unwrap();
    assert_eq!(
        decoded,
        DispatchMessage {
            message_id: 0,
            target_chain: 2,
            msgs: msgs.clone(),
        }
    );

    // Sequence numbers advance one at a time.
    let res = dispatch(&mut app, &dispatcher, OWNER, 30, msgs).unwrap();
    let decoded = DispatchMessage::decode(&dispatched_payload(&res)).unwrap();
    assert_eq!(decoded.message_id, 1);
    assert_eq!(decoded.target_chain, 30);
    assert_eq!(get_next_message_id(&app, &dispatcher), 2);

    // An empty batch is still a valid, sequenced message.
    let res = dispatch(&mut app, &dispatcher, OWNER, 2, vec![]).unwrap();
    let decoded = DispatchMessage::decode(&dispatched_payload(&res)).unwrap();
    assert_eq!(decoded.message_id, 2);
    assert!(decoded.msgs.is_empty());
}

#[test]
fn test_ownership_transfer() {
    let mut app = App::default();
    let dispatcher = setup_test_case(&mut app);

    app.execute_contract(
        Addr::unchecked(OWNER),
        dispatcher.clone(),
        &ExecuteMsg::UpdateOwnership(cw_ownable::Action::TransferOwnership {
            new_owner: ADDR1.to_string(),
            expiry: None,
        }),
        &[],
    )
    .unwrap();
    app.execute_contract(
        Addr::unchecked(ADDR1),
        dispatcher.clone(),
        &ExecuteMsg::UpdateOwnership(cw_ownable::Action::AcceptOwnership),
        &[],
    )
    .unwrap();

    dispatch(&mut app, &dispatcher, ADDR1, 2, vec![]).unwrap();
    let err: ContractError = dispatch(&mut app, &dispatcher, OWNER, 2, vec![])
        .unwrap_err()
        .downcast()
        .unwrap();
    assert_eq!(err, ContractError::Ownership(OwnershipError::NotOwner));
}

#[test]
fn test_migrate_update_version() {
    let mut deps = mock_dependencies();
    cw2::set_contract_version(&mut deps.storage, "my-contract", "old-version").unwrap();
    migrate(deps.as_mut(), mock_env(), MigrateMsg {}).unwrap();
    let version = cw2::get_contract_version(&deps.storage).unwrap();
    assert_eq!(version.version, CONTRACT_VERSION);
    assert_eq!(version.contract, CONTRACT_NAME);
}
