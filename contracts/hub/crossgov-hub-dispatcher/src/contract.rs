#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, CosmosMsg, Deps, DepsMut, Env, HexBinary, MessageInfo, Response,
    StdResult,
};
use cw2::set_contract_version;
use cw_utils::nonpayable;

use crossgov_interface::dispatch::DispatchMessage;
use crossgov_interface::governor::InfoResponse;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, NextMessageIdResponse, QueryMsg};
use crate::state::NEXT_MESSAGE_ID;

pub(crate) const CONTRACT_NAME: &str = "crates.io:crossgov-hub-dispatcher";
pub(crate) const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    cw_ownable::initialize_owner(deps.storage, deps.api, Some(&msg.owner))?;
    NEXT_MESSAGE_ID.save(deps.storage, &0)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", msg.owner))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Dispatch { chain_id, msgs } => execute_dispatch(deps, info, chain_id, msgs),
        ExecuteMsg::UpdateOwnership(action) => execute_update_owner(deps, env, info, action),
    }
}

pub fn execute_dispatch(
    deps: DepsMut,
    info: MessageInfo,
    chain_id: u16,
    msgs: Vec<CosmosMsg>,
) -> Result<Response, ContractError> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;

    let message_id = NEXT_MESSAGE_ID.load(deps.storage)?;
    let message = DispatchMessage {
        message_id,
        target_chain: chain_id,
        msgs,
    };
    let payload = message.encode()?;
    NEXT_MESSAGE_ID.save(deps.storage, &(message_id + 1))?;

    Ok(Response::new()
        .add_attribute("action", "dispatch")
        .add_attribute("message_id", message_id.to_string())
        .add_attribute("target_chain", chain_id.to_string())
        .add_attribute("message_dispatched", HexBinary::from(payload).to_hex()))
}

pub fn execute_update_owner(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    action: cw_ownable::Action,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let ownership = cw_ownable::update_ownership(deps, &env.block, &info.sender, action)?;
    Ok(Response::new().add_attributes(ownership.into_attributes()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::NextMessageId {} => {
            let message_id = NEXT_MESSAGE_ID.load(deps.storage)?;
            to_json_binary(&NextMessageIdResponse { message_id })
        }
        QueryMsg::Ownership {} => to_json_binary(&cw_ownable::get_ownership(deps.storage)?),
        QueryMsg::Info {} => {
            let info = cw2::get_contract_version(deps.storage)?;
            to_json_binary(&InfoResponse { info })
        }
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::default())
}
