#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Empty, Env, HexBinary, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use crossgov_attestation::guardians::GuardianSet;
use crossgov_attestation::vaa::ParsedVaa;
use crossgov_interface::airlock;
use crossgov_interface::dispatch::DispatchMessage;
use crossgov_interface::governor::InfoResponse;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, MessageReceivedResponse, MigrateMsg, QueryMsg};
use crate::state::{Config, CONFIG, RECEIVED_MESSAGES};

pub(crate) const CONTRACT_NAME: &str = "crates.io:crossgov-spoke-executor";
pub(crate) const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// VAA emitters are 32 byte universal addresses.
const DISPATCHER_ADDRESS_LEN: usize = 32;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    msg.guardian_set.validate()?;
    if msg.hub_dispatcher.len() != DISPATCHER_ADDRESS_LEN {
        return Err(ContractError::InvalidDispatcherAddress {});
    }
    let config = Config {
        spoke_chain_id: msg.spoke_chain_id,
        hub_chain_id: msg.hub_chain_id,
        hub_dispatcher: msg.hub_dispatcher,
        airlock: deps.api.addr_validate(&msg.airlock)?,
        guardian_set: msg.guardian_set,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("spoke_chain_id", config.spoke_chain_id.to_string())
        .add_attribute("hub_chain_id", config.hub_chain_id.to_string())
        .add_attribute("airlock", config.airlock))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::ReceiveMessage { vaa } => execute_receive_message(deps, env, info, vaa),
        ExecuteMsg::UpdateGuardianSet { guardian_set } => {
            execute_update_guardian_set(deps, info, guardian_set)
        }
        ExecuteMsg::UpdateConfig {
            spoke_chain_id,
            hub_chain_id,
            hub_dispatcher,
            airlock,
        } => execute_update_config(
            deps,
            info,
            spoke_chain_id,
            hub_chain_id,
            hub_dispatcher,
            airlock,
        ),
    }
}

pub fn execute_receive_message(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    vaa: HexBinary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let vaa = ParsedVaa::deserialize(vaa.as_slice())?;
    vaa.verify(&config.guardian_set, env.block.time.seconds())?;

    if vaa.emitter_chain != config.hub_chain_id
        || vaa.emitter_address.as_slice() != config.hub_dispatcher.as_slice()
    {
        return Err(ContractError::UnknownEmitter {});
    }
    if RECEIVED_MESSAGES.has(deps.storage, &vaa.hash) {
        return Err(ContractError::AlreadyProcessedMessage {});
    }

    let message = DispatchMessage::decode(&vaa.payload)?;
    if message.target_chain != config.spoke_chain_id {
        return Err(ContractError::WrongTargetChain {
            target_chain: message.target_chain,
        });
    }

    RECEIVED_MESSAGES.save(deps.storage, &vaa.hash, &Empty {})?;
    let execute = airlock::execute_msg(&config.airlock, message.msgs)?;

    Ok(Response::new()
        .add_message(execute)
        .add_attribute("action", "receive_message")
        .add_attribute("sender", info.sender)
        .add_attribute("message_id", message.message_id.to_string())
        .add_attribute("message_hash", HexBinary::from(vaa.hash.to_vec()).to_hex()))
}

pub fn execute_update_guardian_set(
    deps: DepsMut,
    info: MessageInfo,
    guardian_set: GuardianSet,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.airlock {
        return Err(ContractError::Unauthorized {});
    }
    guardian_set.validate()?;

    config.guardian_set = guardian_set;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_guardian_set")
        .add_attribute("guardians", config.guardian_set.addresses.len().to_string()))
}

pub fn execute_update_config(
    deps: DepsMut,
    info: MessageInfo,
    spoke_chain_id: u16,
    hub_chain_id: u16,
    hub_dispatcher: HexBinary,
    airlock: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.airlock {
        return Err(ContractError::Unauthorized {});
    }
    if hub_dispatcher.len() != DISPATCHER_ADDRESS_LEN {
        return Err(ContractError::InvalidDispatcherAddress {});
    }

    config.spoke_chain_id = spoke_chain_id;
    config.hub_chain_id = hub_chain_id;
    config.hub_dispatcher = hub_dispatcher;
    config.airlock = deps.api.addr_validate(&airlock)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_config")
        .add_attribute("hub_chain_id", hub_chain_id.to_string())
        .add_attribute("airlock", airlock))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::MessageReceived { hash } => {
            let received = RECEIVED_MESSAGES.has(deps.storage, hash.as_slice());
            to_json_binary(&MessageReceivedResponse { received })
        }
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
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
