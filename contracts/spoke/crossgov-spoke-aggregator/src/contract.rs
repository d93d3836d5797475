#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, HexBinary, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;
use cw_utils::nonpayable;

use crossgov_attestation::bytes::Reader;
use crossgov_attestation::eth::{
    EthCallWithFinalityQueryRequest, EthCallWithFinalityQueryResponse,
};
use crossgov_attestation::guardians::{GuardianSet, GuardianSignature};
use crossgov_attestation::response::parse_and_verify_query_response;
use crossgov_attestation::validate::{validate_eth_call_data, validate_result_count};
use crossgov_interface::governor::InfoResponse;
use crossgov_interface::voting::get_voting_power;
use crossgov_voting::voting::{Vote, Votes};

use crate::error::ContractError;
use crate::msg::{
    ExecuteMsg, HasVotedResponse, InstantiateMsg, MigrateMsg, ProposalVotesResponse, QueryMsg,
};
use crate::state::{Ballot, Config, SpokeProposal, BALLOTS, CONFIG, PROPOSALS};

pub(crate) const CONTRACT_NAME: &str = "crates.io:crossgov-spoke-aggregator";
pub(crate) const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Selector of `getProposalMetadata(uint256)`, the read the hub
/// metadata contract exposes.
pub const METADATA_SELECTOR: [u8; 4] = [0xeb, 0x9b, 0x98, 0x38];
/// Selector and a 32 byte proposal id word.
pub const METADATA_CALLDATA_LEN: usize = 36;
/// Source contract, proposal id, vote start.
pub const METADATA_RECORD_LEN: usize = 60;
/// Seconds ballots stay open after a vote start unless configured.
pub const DEFAULT_SAFE_WINDOW: u64 = 24 * 60 * 60;
/// Hub metadata sources are EVM call targets.
const SOURCE_ADDRESS_LEN: usize = 20;

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
    if msg.hub_proposal_metadata.len() != SOURCE_ADDRESS_LEN {
        return Err(ContractError::InvalidMetadataSource {});
    }
    let config = Config {
        staking: deps.api.addr_validate(&msg.staking)?,
        hub_chain_id: msg.hub_chain_id,
        hub_proposal_metadata: msg.hub_proposal_metadata,
        safe_window: msg.safe_window.unwrap_or(DEFAULT_SAFE_WINDOW),
        guardian_set: msg.guardian_set,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("staking", config.staking)
        .add_attribute("hub_chain_id", config.hub_chain_id.to_string())
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
        ExecuteMsg::AddProposal {
            response,
            signatures,
        } => execute_add_proposal(deps, env, info, response, signatures),
        ExecuteMsg::Vote { proposal_id, vote } => {
            execute_vote(deps, env, info, proposal_id, vote)
        }
        ExecuteMsg::SetSafeWindow { seconds } => execute_set_safe_window(deps, info, seconds),
        ExecuteMsg::UpdateGuardianSet { guardian_set } => {
            execute_update_guardian_set(deps, info, guardian_set)
        }
        ExecuteMsg::UpdateConfig {
            staking,
            hub_chain_id,
            hub_proposal_metadata,
        } => execute_update_config(deps, info, staking, hub_chain_id, hub_proposal_metadata),
        ExecuteMsg::UpdateOwnership(action) => execute_update_owner(deps, env, info, action),
    }
}

pub fn execute_add_proposal(
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

    // A metadata submission carries exactly one read.
    validate_result_count(&parsed.responses, 1)?;
    let request = &parsed.request.requests[0];
    let per_chain = &parsed.responses[0];
    if per_chain.chain_id != config.hub_chain_id {
        return Err(ContractError::InvalidChainId {
            chain_id: per_chain.chain_id,
        });
    }

    let call = EthCallWithFinalityQueryRequest::decode(request)?;
    let read = EthCallWithFinalityQueryResponse::decode(per_chain)?;
    if call.finality != "finalized" {
        return Err(ContractError::NotFinalized(call.finality));
    }
    validate_result_count(&call.calls, 1)?;
    validate_result_count(&read.results, 1)?;
    validate_eth_call_data(
        &call.calls[0],
        &[config.hub_proposal_metadata.as_slice()],
        &[&METADATA_SELECTOR],
    )?;
    let data = &call.calls[0].data;
    if data.len() != METADATA_CALLDATA_LEN {
        return Err(ContractError::InvalidMetadataCalldata {});
    }

    let record = decode_metadata_record(&read.results[0])?;
    if record.source.as_slice() != config.hub_proposal_metadata.as_slice() {
        return Err(ContractError::MetadataSourceMismatch {});
    }
    if data[4..] != record.proposal_id {
        return Err(ContractError::ProposalIdMismatch {});
    }
    if record.vote_start == 0 {
        return Err(ContractError::ProposalNotInitialized {});
    }

    let proposal_id: HexBinary = record.proposal_id.to_vec().into();
    if PROPOSALS.has(deps.storage, proposal_id.as_slice()) {
        return Err(ContractError::ProposalAlreadyExists {});
    }
    let proposal = SpokeProposal {
        proposal_id: proposal_id.clone(),
        vote_start: record.vote_start,
        votes: Votes::zero(),
    };
    PROPOSALS.save(deps.storage, proposal_id.as_slice(), &proposal)?;

    Ok(Response::new()
        .add_attribute("action", "add_proposal")
        .add_attribute("sender", info.sender)
        .add_attribute("proposal_id", proposal_id.to_hex())
        .add_attribute("vote_start", proposal.vote_start.to_string()))
}

/// The fields packed into a 60 byte metadata record.
struct MetadataRecord {
    source: [u8; 20],
    proposal_id: [u8; 32],
    vote_start: u64,
}

fn decode_metadata_record(data: &[u8]) -> Result<MetadataRecord, ContractError> {
    if data.len() != METADATA_RECORD_LEN {
        return Err(ContractError::InvalidMetadataLength {
            got: data.len(),
            expected: METADATA_RECORD_LEN,
        });
    }
    let mut reader = Reader::new(data);
    let source = reader.read_array::<20>()?;
    let proposal_id = reader.read_array::<32>()?;
    let vote_start = u64::from_le_bytes(reader.read_array()?);
    Ok(MetadataRecord {
        source,
        proposal_id,
        vote_start,
    })
}

pub fn execute_vote(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    proposal_id: HexBinary,
    vote: Vote,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut proposal = PROPOSALS
        .may_load(deps.storage, proposal_id.as_slice())?
        .ok_or_else(|| ContractError::NoSuchProposal {
            id: proposal_id.to_hex(),
        })?;

    // The window opens the second after the vote start; ballots in the
    // vote start second belong to the hub snapshot.
    let now = env.block.time.seconds();
    if now <= proposal.vote_start || now > proposal.vote_start + config.safe_window {
        return Err(ContractError::ProposalInactive {});
    }

    let power = get_voting_power(
        deps.as_ref(),
        &config.staking,
        &info.sender,
        Some(proposal.vote_start),
    )?;
    if power.is_zero() {
        return Err(ContractError::NoWeight {});
    }

    BALLOTS.update(
        deps.storage,
        (proposal_id.as_slice(), &info.sender),
        |ballot| match ballot {
            Some(_) => Err(ContractError::AlreadyVoted {}),
            None => Ok(Ballot { power, vote }),
        },
    )?;

    proposal.votes.add_vote(vote, power)?;
    PROPOSALS.save(deps.storage, proposal_id.as_slice(), &proposal)?;

    Ok(Response::new()
        .add_attribute("action", "vote")
        .add_attribute("sender", info.sender)
        .add_attribute("proposal_id", proposal_id.to_hex())
        .add_attribute("position", vote.to_string()))
}

pub fn execute_set_safe_window(
    deps: DepsMut,
    info: MessageInfo,
    seconds: u64,
) -> Result<Response, ContractError> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;

    let mut config = CONFIG.load(deps.storage)?;
    config.safe_window = seconds;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_safe_window")
        .add_attribute("safe_window", seconds.to_string()))
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
    staking: String,
    hub_chain_id: u16,
    hub_proposal_metadata: HexBinary,
) -> Result<Response, ContractError> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;
    if hub_proposal_metadata.len() != SOURCE_ADDRESS_LEN {
        return Err(ContractError::InvalidMetadataSource {});
    }

    let mut config = CONFIG.load(deps.storage)?;
    config.staking = deps.api.addr_validate(&staking)?;
    config.hub_chain_id = hub_chain_id;
    config.hub_proposal_metadata = hub_proposal_metadata;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "update_config")
        .add_attribute("staking", staking)
        .add_attribute("hub_chain_id", hub_chain_id.to_string()))
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
        QueryMsg::Proposal { proposal_id } => {
            to_json_binary(&PROPOSALS.load(deps.storage, proposal_id.as_slice())?)
        }
        QueryMsg::ProposalVotes { proposal_id } => {
            let votes = PROPOSALS
                .may_load(deps.storage, proposal_id.as_slice())?
                .map(|proposal| proposal.votes)
                .unwrap_or_default();
            to_json_binary(&ProposalVotesResponse { votes })
        }
        QueryMsg::HasVoted { proposal_id, voter } => {
            let voter = deps.api.addr_validate(&voter)?;
            let has_voted = BALLOTS.has(deps.storage, (proposal_id.as_slice(), &voter));
            to_json_binary(&HasVotedResponse { has_voted })
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
