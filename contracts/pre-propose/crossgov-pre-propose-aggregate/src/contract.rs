#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, CosmosMsg, Deps, DepsMut, Env, HexBinary, MessageInfo, Response,
    StdError, StdResult, Uint128,
};
use cw2::set_contract_version;
use cw_utils::nonpayable;

use crossgov_attestation::bytes::extend_address_to_32;
use crossgov_attestation::eth::{EthCallByTimestampQueryRequest, EthCallByTimestampQueryResponse};
use crossgov_attestation::guardians::{GuardianSet, GuardianSignature};
use crossgov_attestation::response::{parse_and_verify_query_response, QueryType};
use crossgov_attestation::validate::{
    validate_block_time, validate_eth_call_data, validate_result_count,
};
use crossgov_attestation::AttestationError;
use crossgov_interface::governor::{
    get_proposal_threshold, propose_msg, InfoResponse, ProposeMsg,
};
use crossgov_interface::voting::get_voting_power;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg, SpokeResponse};
use crate::state::{Config, CONFIG, SPOKES};

pub(crate) const CONTRACT_NAME: &str = "crates.io:crossgov-pre-propose-aggregate";
pub(crate) const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Selector of `getVotes(address,uint256)`, the timestamped balance
/// read spoke vote aggregators expose.
pub const VOTES_SELECTOR: [u8; 4] = [0xeb, 0x90, 0x19, 0xd4];
/// Selector, account word, timepoint word.
pub const VOTES_CALLDATA_LEN: usize = 68;
/// A balance comes back as one ABI word.
pub const BALANCE_RECORD_LEN: usize = 32;
/// Spoke aggregators are EVM call targets.
const SPOKE_ADDRESS_LEN: usize = 20;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    cw_ownable::initialize_owner(deps.storage, deps.api, Some(&msg.owner))?;

    msg.guardian_set.validate()?;
    let config = Config {
        governor: deps.api.addr_validate(&msg.governor)?,
        staking: deps.api.addr_validate(&msg.staking)?,
        guardian_set: msg.guardian_set,
        max_query_timestamp_offset: msg.max_query_timestamp_offset,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("governor", config.governor)
        .add_attribute("staking", config.staking)
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
        ExecuteMsg::Propose {
            title,
            description,
            msgs,
            response,
            signatures,
        } => execute_propose(deps, env, info, title, description, msgs, response, signatures),
        ExecuteMsg::RegisterSpoke { chain_id, address } => {
            execute_register_spoke(deps, info, chain_id, address)
        }
        ExecuteMsg::SetMaxQueryTimestampOffset { offset } => {
            execute_set_max_query_timestamp_offset(deps, info, offset)
        }
        ExecuteMsg::UpdateGuardianSet { guardian_set } => {
            execute_update_guardian_set(deps, info, guardian_set)
        }
        ExecuteMsg::UpdateOwnership(action) => execute_update_owner(deps, env, info, action),
    }
}

#[allow(clippy::too_many_arguments)]
pub fn execute_propose(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    title: String,
    description: String,
    msgs: Vec<CosmosMsg>,
    response: HexBinary,
    signatures: Vec<GuardianSignature>,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let config = CONFIG.load(deps.storage)?;
    let now = env.block.time.seconds();
    let parsed = parse_and_verify_query_response(
        response.as_slice(),
        &signatures,
        &config.guardian_set,
        now,
    )?;

    // The account word every read must carry: the sender in universal
    // form.
    let sender_id =
        extend_address_to_32(deps.api.addr_canonicalize(info.sender.as_str())?.as_slice())?;
    let floor_us = now
        .saturating_sub(config.max_query_timestamp_offset)
        .saturating_mul(1_000_000);

    let mut shared_time = None;
    let mut spoke_weight = Uint128::zero();
    for (request, per_chain) in parsed.request.requests.iter().zip(&parsed.responses) {
        if per_chain.query_type != QueryType::EthCallByTimestamp {
            return Err(ContractError::WrongQueryType {
                query_type: per_chain.query_type.as_u8(),
            });
        }
        let call = EthCallByTimestampQueryRequest::decode(request)?;
        let result = EthCallByTimestampQueryResponse::decode(per_chain)?;
        validate_result_count(&call.calls, 1)?;
        validate_result_count(&result.results, 1)?;

        validate_block_time(call.target_time_us, floor_us)?;
        let target_time = call.target_time_us / 1_000_000;
        if target_time > now {
            return Err(ContractError::InvalidTimestamp {
                got: target_time,
                now,
            });
        }
        match shared_time {
            None => shared_time = Some(target_time),
            Some(shared) if shared != target_time => {
                return Err(ContractError::TimestampMismatch {});
            }
            Some(_) => {}
        }

        let spoke = SPOKES
            .may_load(deps.storage, per_chain.chain_id)?
            .ok_or(ContractError::UnregisteredSpoke {
                chain_id: per_chain.chain_id,
            })?;
        validate_eth_call_data(&call.calls[0], &[spoke.as_slice()], &[&VOTES_SELECTOR])?;
        check_votes_call(&call.calls[0].data, &sender_id, target_time)?;

        let balance = read_balance(&result.results[0])?;
        spoke_weight = spoke_weight
            .checked_add(balance)
            .map_err(StdError::overflow)?;
    }
    // The parser rejects empty envelopes, so a shared timestamp exists.
    let queried_at = shared_time.ok_or(ContractError::Attestation(AttestationError::ZeroQueries))?;

    let hub_power = get_voting_power(deps.as_ref(), &config.staking, &info.sender, Some(queried_at))?;
    let weight = spoke_weight
        .checked_add(hub_power)
        .map_err(StdError::overflow)?;
    let threshold = get_proposal_threshold(deps.as_ref(), &config.governor)?;
    if weight < threshold {
        return Err(ContractError::InsufficientVoteWeight { weight, threshold });
    }

    let propose = propose_msg(
        &config.governor,
        ProposeMsg {
            title,
            description,
            msgs,
            proposer: Some(info.sender.to_string()),
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "propose")
        .add_attribute("proposer", info.sender)
        .add_attribute("weight", weight.to_string())
        .add_attribute("queried_at", queried_at.to_string())
        .add_message(propose))
}

/// Checks a balance read asks for the sender's weight at the shared
/// timestamp.
fn check_votes_call(
    data: &[u8],
    sender_id: &[u8; 32],
    target_time: u64,
) -> Result<(), ContractError> {
    if data.len() != VOTES_CALLDATA_LEN {
        return Err(ContractError::InvalidCallDataLength {});
    }
    if data[4..36] != *sender_id {
        return Err(ContractError::InvalidCaller {});
    }
    let timepoint = &data[36..68];
    if timepoint[..24].iter().any(|b| *b != 0) || timepoint[24..] != target_time.to_be_bytes() {
        return Err(ContractError::TimestampMismatch {});
    }
    Ok(())
}

/// One ABI word holding a balance that must fit our vote arithmetic.
fn read_balance(record: &[u8]) -> Result<Uint128, ContractError> {
    if record.len() != BALANCE_RECORD_LEN {
        return Err(ContractError::InvalidBalanceRecord { got: record.len() });
    }
    let (high, low) = record.split_at(16);
    if high.iter().any(|b| *b != 0) {
        return Err(ContractError::WeightOverflow {});
    }
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(low);
    Ok(Uint128::new(u128::from_be_bytes(bytes)))
}

pub fn execute_register_spoke(
    deps: DepsMut,
    info: MessageInfo,
    chain_id: u16,
    address: HexBinary,
) -> Result<Response, ContractError> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;
    if address.len() != SPOKE_ADDRESS_LEN {
        return Err(ContractError::InvalidSpokeAddress {});
    }

    if address.as_slice().iter().all(|b| *b == 0) {
        SPOKES.remove(deps.storage, chain_id);
    } else {
        SPOKES.save(deps.storage, chain_id, &address)?;
    }

    Ok(Response::new()
        .add_attribute("action", "register_spoke")
        .add_attribute("chain_id", chain_id.to_string())
        .add_attribute("address", address.to_hex()))
}

pub fn execute_set_max_query_timestamp_offset(
    deps: DepsMut,
    info: MessageInfo,
    offset: u64,
) -> Result<Response, ContractError> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;

    let mut config = CONFIG.load(deps.storage)?;
    config.max_query_timestamp_offset = offset;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_max_query_timestamp_offset")
        .add_attribute("offset", offset.to_string()))
}

pub fn execute_update_guardian_set(
    deps: DepsMut,
    info: MessageInfo,
    guardian_set: GuardianSet,
) -> Result<Response, ContractError> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;
    guardian_set.validate()?;

    let mut config = CONFIG.load(deps.storage)?;
    config.guardian_set = guardian_set;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_guardian_set")
        .add_attribute("guardians", config.guardian_set.addresses.len().to_string()))
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
        QueryMsg::Spoke { chain_id } => {
            let address = SPOKES.may_load(deps.storage, chain_id)?;
            to_json_binary(&SpokeResponse { address })
        }
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
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
