#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Attribute, Binary, Deps, DepsMut, Empty, Env, HexBinary, MessageInfo,
    Response, StdResult, WasmMsg,
};
use cw2::set_contract_version;
use cw_utils::nonpayable;

use crossgov_attestation::guardians::{GuardianSet, GuardianSignature};
use crossgov_attestation::response::{parse_and_verify_query_response, QueryType};
use crossgov_interface::governor::{cast_spoke_votes_msg, InfoResponse};
use crossgov_voting::voting::Votes;

use crate::error::ContractError;
use crate::msg::{
    ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg, SpokeAtResponse, SpokeVotesResponse,
};
use crate::state::{Config, CONFIG, QUERY_TYPES, SPOKE_REGISTRY, SPOKE_VOTES};
use crate::tally;

pub(crate) const CONTRACT_NAME: &str = "crates.io:crossgov-hub-vote-pool";
pub(crate) const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Spoke identities are universal addresses, 32 bytes on every chain.
const IDENTITY_LEN: usize = 32;

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
        guardian_set: msg.guardian_set,
    };
    CONFIG.save(deps.storage, &config)?;

    for query_type in msg.query_types {
        let query_type = QueryType::from_u8(query_type)?;
        QUERY_TYPES.save(deps.storage, query_type.as_u8(), &Empty {})?;
    }

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("governor", config.governor)
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
        ExecuteMsg::CrossChainVote {
            response,
            signatures,
        } => execute_cross_chain_vote(deps, env, info, response, signatures),
        ExecuteMsg::RegisterSpoke { chain_id, identity } => {
            execute_register_spoke(deps, env, info, chain_id, identity)
        }
        ExecuteMsg::RegisterQueryType {
            query_type,
            enabled,
        } => execute_register_query_type(deps, info, query_type, enabled),
        ExecuteMsg::UpdateGuardianSet { guardian_set } => {
            execute_update_guardian_set(deps, info, guardian_set)
        }
        ExecuteMsg::UpdateConfig { governor } => execute_update_config(deps, info, governor),
        ExecuteMsg::UpdateOwnership(action) => execute_update_owner(deps, env, info, action),
    }
}

pub fn execute_cross_chain_vote(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    response: HexBinary,
    signatures: Vec<GuardianSignature>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let parsed = parse_and_verify_query_response(
        response.as_slice(),
        &signatures,
        &config.guardian_set,
        env.block.time.seconds(),
    )?;

    let mut merges: Vec<Attribute> = vec![];
    let mut msgs: Vec<WasmMsg> = vec![];
    for (request, per_chain) in parsed.request.requests.iter().zip(&parsed.responses) {
        let query_type = per_chain.query_type.as_u8();
        if !QUERY_TYPES.has(deps.storage, query_type) {
            return Err(ContractError::UnsupportedQueryType { query_type });
        }

        let read = tally::decode_spoke_tally(deps.storage, request, per_chain)?;

        let key = (per_chain.chain_id, read.proposal_id.as_slice());
        let previous = SPOKE_VOTES.may_load(deps.storage, key)?.unwrap_or_default();
        // An attested tally is cumulative, so anything short of the
        // last merge can only be a stale or cross-wired read.
        if !read.votes.covers(&previous) {
            return Err(ContractError::InvalidProposalVote {});
        }
        let delta = read.votes.checked_sub(&previous)?;
        SPOKE_VOTES.save(deps.storage, key, &read.votes)?;

        if delta != Votes::zero() {
            msgs.push(cast_spoke_votes_msg(
                &config.governor,
                read.proposal_id.clone(),
                per_chain.chain_id,
                delta,
            )?);
        }
        merges.push(Attribute::new(
            "spoke_vote_cast",
            format!("{}:{}", per_chain.chain_id, read.proposal_id.to_hex()),
        ));
    }

    Ok(Response::new()
        .add_attribute("action", "cross_chain_vote")
        .add_attribute("sender", info.sender)
        .add_attributes(merges)
        .add_messages(msgs))
}

pub fn execute_register_spoke(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    chain_id: u16,
    identity: HexBinary,
) -> Result<Response, ContractError> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;
    if identity.len() != IDENTITY_LEN {
        return Err(ContractError::InvalidSpokeIdentity {});
    }

    SPOKE_REGISTRY.push(
        deps.storage,
        u64::from(chain_id),
        &identity,
        env.block.time.seconds(),
    )?;

    Ok(Response::new()
        .add_attribute("action", "register_spoke")
        .add_attribute("chain_id", chain_id.to_string())
        .add_attribute("identity", identity.to_hex()))
}

pub fn execute_register_query_type(
    deps: DepsMut,
    info: MessageInfo,
    query_type: u8,
    enabled: bool,
) -> Result<Response, ContractError> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;
    let query_type = QueryType::from_u8(query_type)?.as_u8();

    if enabled {
        QUERY_TYPES.save(deps.storage, query_type, &Empty {})?;
    } else {
        QUERY_TYPES.remove(deps.storage, query_type);
    }

    Ok(Response::new()
        .add_attribute("action", "register_query_type")
        .add_attribute("query_type", query_type.to_string())
        .add_attribute("enabled", enabled.to_string()))
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

pub fn execute_update_config(
    deps: DepsMut,
    info: MessageInfo,
    governor: String,
) -> Result<Response, ContractError> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;

    let mut config = CONFIG.load(deps.storage)?;
    config.governor = deps.api.addr_validate(&governor)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_config")
        .add_attribute("governor", governor))
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
        QueryMsg::SpokeAt { chain_id, time } => {
            let identity = SPOKE_REGISTRY.load_at(deps.storage, u64::from(chain_id), time)?;
            to_json_binary(&SpokeAtResponse { identity })
        }
        QueryMsg::SpokeVotes {
            chain_id,
            proposal_id,
        } => {
            let votes = SPOKE_VOTES
                .may_load(deps.storage, (chain_id, proposal_id.as_slice()))?
                .unwrap_or_default();
            to_json_binary(&SpokeVotesResponse { votes })
        }
        QueryMsg::QueryTypeEnabled { query_type } => {
            to_json_binary(&QUERY_TYPES.has(deps.storage, query_type))
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
