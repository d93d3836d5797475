#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, to_json_vec, Binary, CosmosMsg, Deps, DepsMut, Env, HexBinary, MessageInfo,
    Order, Response, StdResult, Uint128,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;
use cw_utils::nonpayable;

use crossgov_interface::governor::{InfoResponse, ProposalMetadataResponse, ProposeMsg};
use crossgov_interface::voting::get_voting_power;
use crossgov_voting::pre_propose::ProposalCreationPolicy;
use crossgov_voting::proposal::{description_hash, proposal_id};
use crossgov_voting::status::Status;
use crossgov_voting::voting::{Vote, Votes};

use crate::error::ContractError;
use crate::msg::{
    BallotResponse, ExecuteMsg, InstantiateMsg, MigrateMsg, ProposalListResponse, QueryMsg,
    QuorumResponse,
};
use crate::proposal::{Proposal, MAX_PROPOSAL_SIZE};
use crate::state::{
    Ballot, Config, UncheckedExtensionConfig, BALLOTS, CONFIG, CREATION_POLICY, PROPOSALS, QUORUM,
};

pub(crate) const CONTRACT_NAME: &str = "crates.io:crossgov-hub-governor";
pub(crate) const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const MAX_LIMIT: u32 = 100;
const DEFAULT_LIMIT: u32 = 30;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.voting_period == 0 {
        return Err(ContractError::ZeroVotingPeriod {});
    }

    // With no owner given the governor owns itself, so parameter
    // changes can only arrive as executed proposals.
    let owner = msg
        .owner
        .unwrap_or_else(|| env.contract.address.to_string());
    cw_ownable::initialize_owner(deps.storage, deps.api, Some(&owner))?;

    let config = Config {
        staking: deps.api.addr_validate(&msg.staking)?,
        vote_pool: msg
            .vote_pool
            .map(|p| deps.api.addr_validate(&p))
            .transpose()?,
        voting_delay: msg.voting_delay,
        voting_period: msg.voting_period,
        timelock_delay: msg.timelock_delay,
        grace_period: msg.grace_period,
        proposal_threshold: msg.proposal_threshold,
        executor: msg
            .executor
            .map(|e| deps.api.addr_validate(&e))
            .transpose()?,
        extension: msg
            .extension
            .map(|e| e.into_checked(deps.as_ref()))
            .transpose()?,
    };
    CONFIG.save(deps.storage, &config)?;

    QUORUM.push(deps.storage, &msg.quorum, env.block.time.seconds())?;

    let policy = match msg.pre_propose_module {
        Some(module) => ProposalCreationPolicy::Module {
            addr: deps.api.addr_validate(&module)?,
        },
        None => ProposalCreationPolicy::Anyone {},
    };
    CREATION_POLICY.save(deps.storage, &policy)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", owner))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Propose(propose_msg) => execute_propose(deps, env, info, propose_msg),
        ExecuteMsg::Vote { proposal_id, vote } => {
            execute_vote(deps, env, info, proposal_id, vote)
        }
        ExecuteMsg::CastSpokeVotes {
            proposal_id,
            chain_id,
            votes,
        } => execute_cast_spoke_votes(deps, env, info, proposal_id, chain_id, votes),
        ExecuteMsg::ExtendProposal { proposal_id } => {
            execute_extend_proposal(deps, env, info, proposal_id)
        }
        ExecuteMsg::Queue { proposal_id } => execute_queue(deps, env, info, proposal_id),
        ExecuteMsg::Execute {
            proposal_id,
            msgs,
            description,
        } => execute_execute(deps, env, info, proposal_id, msgs, description),
        ExecuteMsg::Cancel { proposal_id } => execute_cancel(deps, env, info, proposal_id),
        ExecuteMsg::SetQuorum { quorum } => execute_set_quorum(deps, env, info, quorum),
        ExecuteMsg::UpdateConfig {
            staking,
            vote_pool,
            voting_delay,
            voting_period,
            timelock_delay,
            grace_period,
            proposal_threshold,
            executor,
            extension,
        } => execute_update_config(
            deps,
            info,
            staking,
            vote_pool,
            voting_delay,
            voting_period,
            timelock_delay,
            grace_period,
            proposal_threshold,
            executor,
            extension,
        ),
        ExecuteMsg::UpdatePreProposeModule { module } => {
            execute_update_pre_propose_module(deps, info, module)
        }
        ExecuteMsg::UpdateOwnership(action) => execute_update_owner(deps, env, info, action),
    }
}

pub fn execute_propose(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    ProposeMsg {
        title,
        description,
        msgs,
        proposer,
    }: ProposeMsg,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let creation_policy = CREATION_POLICY.load(deps.storage)?;

    if !creation_policy.is_permitted(&info.sender) {
        return Err(ContractError::Unauthorized {});
    }

    // Attribute the proposal. A creation module must name the
    // proposer it admitted; direct submissions must not name one.
    let proposer = match (proposer, &creation_policy) {
        (None, ProposalCreationPolicy::Anyone {}) => info.sender.clone(),
        (Some(proposer), ProposalCreationPolicy::Module { .. }) => {
            deps.api.addr_validate(&proposer)?
        }
        _ => return Err(ContractError::InvalidProposer {}),
    };

    let now = env.block.time.seconds();
    if matches!(creation_policy, ProposalCreationPolicy::Anyone {})
        && !config.proposal_threshold.is_zero()
    {
        let power = get_voting_power(deps.as_ref(), &config.staking, &proposer, Some(now))?;
        if power < config.proposal_threshold {
            return Err(ContractError::BelowProposalThreshold {
                power,
                threshold: config.proposal_threshold,
            });
        }
    }

    let id = proposal_id(&msgs, &description)?;
    if PROPOSALS.has(deps.storage, id.as_slice()) {
        return Err(ContractError::ProposalAlreadyExists {});
    }

    let snapshot = now + config.voting_delay;
    let proposal = Proposal {
        id: id.clone(),
        proposer,
        title,
        description_hash: description_hash(&description),
        snapshot,
        deadline: snapshot + config.voting_period,
        eta: 0,
        status: Status::Pending,
        votes: Votes::zero(),
        extended: false,
    };

    let proposal_size = to_json_vec(&proposal)?.len() as u64;
    if proposal_size > MAX_PROPOSAL_SIZE {
        return Err(ContractError::ProposalTooLarge {
            size: proposal_size,
            max: MAX_PROPOSAL_SIZE,
        });
    }

    PROPOSALS.save(deps.storage, id.as_slice(), &proposal)?;

    Ok(Response::new()
        .add_attribute("action", "propose")
        .add_attribute("sender", info.sender)
        .add_attribute("proposal_id", id.to_hex())
        .add_attribute("status", proposal.status.to_string())
        .add_attribute("description", description))
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

    let now = env.block.time.seconds();
    proposal.update_status(deps.storage, now, config.grace_period)?;
    if proposal.status != Status::Active {
        return Err(ContractError::ProposalNotActive {
            status: proposal.status.to_string(),
        });
    }

    let power = get_voting_power(
        deps.as_ref(),
        &config.staking,
        &info.sender,
        Some(proposal.snapshot),
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

pub fn execute_cast_spoke_votes(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    proposal_id: HexBinary,
    chain_id: u16,
    votes: Votes,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    match &config.vote_pool {
        Some(pool) if *pool == info.sender => (),
        _ => return Err(ContractError::Unauthorized {}),
    }

    let mut proposal = PROPOSALS
        .may_load(deps.storage, proposal_id.as_slice())?
        .ok_or_else(|| ContractError::NoSuchProposal {
            id: proposal_id.to_hex(),
        })?;

    // Attested tallies only count while the voting window is open.
    // The pool holds whatever arrives after the deadline.
    let now = env.block.time.seconds();
    proposal.update_status(deps.storage, now, config.grace_period)?;
    if proposal.status != Status::Active {
        return Err(ContractError::ProposalNotActive {
            status: proposal.status.to_string(),
        });
    }

    proposal.votes = proposal.votes.add(&votes)?;
    PROPOSALS.save(deps.storage, proposal_id.as_slice(), &proposal)?;

    Ok(Response::new()
        .add_attribute("action", "cast_spoke_votes")
        .add_attribute("proposal_id", proposal_id.to_hex())
        .add_attribute("chain_id", chain_id.to_string()))
}

pub fn execute_extend_proposal(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    proposal_id: HexBinary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let extension = match config.extension {
        Some(extension) if extension.extender == info.sender => extension,
        _ => return Err(ContractError::Unauthorized {}),
    };

    let mut proposal = PROPOSALS
        .may_load(deps.storage, proposal_id.as_slice())?
        .ok_or_else(|| ContractError::NoSuchProposal {
            id: proposal_id.to_hex(),
        })?;

    let now = env.block.time.seconds();
    proposal.update_status(deps.storage, now, config.grace_period)?;
    if proposal.status != Status::Active {
        return Err(ContractError::ProposalNotActive {
            status: proposal.status.to_string(),
        });
    }
    if proposal.extended {
        return Err(ContractError::AlreadyExtended {});
    }

    proposal.deadline += extension.duration;
    proposal.extended = true;
    PROPOSALS.save(deps.storage, proposal_id.as_slice(), &proposal)?;

    Ok(Response::new()
        .add_attribute("action", "extend_proposal")
        .add_attribute("proposal_id", proposal_id.to_hex())
        .add_attribute("deadline", proposal.deadline.to_string()))
}

pub fn execute_queue(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    proposal_id: HexBinary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut proposal = PROPOSALS
        .may_load(deps.storage, proposal_id.as_slice())?
        .ok_or_else(|| ContractError::NoSuchProposal {
            id: proposal_id.to_hex(),
        })?;

    let now = env.block.time.seconds();
    proposal.update_status(deps.storage, now, config.grace_period)?;
    if proposal.status != Status::Succeeded {
        return Err(ContractError::WrongStatus {
            status: proposal.status.to_string(),
        });
    }

    proposal.eta = now + config.timelock_delay;
    proposal.status = Status::Queued;
    PROPOSALS.save(deps.storage, proposal_id.as_slice(), &proposal)?;

    Ok(Response::new()
        .add_attribute("action", "queue")
        .add_attribute("sender", info.sender)
        .add_attribute("proposal_id", proposal_id.to_hex())
        .add_attribute("eta", proposal.eta.to_string()))
}

pub fn execute_execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    proposal_id: HexBinary,
    msgs: Vec<CosmosMsg>,
    description: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if let Some(executor) = &config.executor {
        if *executor != info.sender {
            return Err(ContractError::Unauthorized {});
        }
    }

    // The id commits to the payload. Only the exact messages and
    // description that were voted on can hash back to it.
    let expected = crossgov_voting::proposal::proposal_id(&msgs, &description)?;
    if expected != proposal_id {
        return Err(ContractError::PayloadHashMismatch {});
    }

    let mut proposal = PROPOSALS
        .may_load(deps.storage, proposal_id.as_slice())?
        .ok_or_else(|| ContractError::NoSuchProposal {
            id: proposal_id.to_hex(),
        })?;

    let now = env.block.time.seconds();
    proposal.update_status(deps.storage, now, config.grace_period)?;
    if proposal.status != Status::Queued {
        return Err(ContractError::WrongStatus {
            status: proposal.status.to_string(),
        });
    }
    if now < proposal.eta {
        return Err(ContractError::TimelockNotMatured { eta: proposal.eta });
    }

    proposal.status = Status::Executed;
    PROPOSALS.save(deps.storage, proposal_id.as_slice(), &proposal)?;

    Ok(Response::new()
        .add_attribute("action", "execute")
        .add_attribute("sender", info.sender)
        .add_attribute("proposal_id", proposal_id.to_hex())
        .add_messages(msgs))
}

pub fn execute_cancel(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    proposal_id: HexBinary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut proposal = PROPOSALS
        .may_load(deps.storage, proposal_id.as_slice())?
        .ok_or_else(|| ContractError::NoSuchProposal {
            id: proposal_id.to_hex(),
        })?;

    let now = env.block.time.seconds();
    proposal.update_status(deps.storage, now, config.grace_period)?;

    // The owner may pull a proposal any time before it executes,
    // expires, or resolves. The proposer may only withdraw one whose
    // voting has not yet opened.
    let ownership = cw_ownable::get_ownership(deps.storage)?;
    let is_owner = ownership
        .owner
        .map_or(false, |owner| owner == info.sender);
    let allowed = if is_owner {
        matches!(
            proposal.status,
            Status::Pending | Status::Active | Status::Queued
        )
    } else if info.sender == proposal.proposer {
        proposal.status == Status::Pending
    } else {
        return Err(ContractError::Unauthorized {});
    };
    if !allowed {
        return Err(ContractError::WrongStatus {
            status: proposal.status.to_string(),
        });
    }

    proposal.status = Status::Canceled;
    PROPOSALS.save(deps.storage, proposal_id.as_slice(), &proposal)?;

    Ok(Response::new()
        .add_attribute("action", "cancel")
        .add_attribute("sender", info.sender)
        .add_attribute("proposal_id", proposal_id.to_hex()))
}

pub fn execute_set_quorum(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    quorum: Uint128,
) -> Result<Response, ContractError> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;

    QUORUM.push(deps.storage, &quorum, env.block.time.seconds())?;

    Ok(Response::new()
        .add_attribute("action", "set_quorum")
        .add_attribute("quorum", quorum))
}

#[allow(clippy::too_many_arguments)]
pub fn execute_update_config(
    deps: DepsMut,
    info: MessageInfo,
    staking: String,
    vote_pool: Option<String>,
    voting_delay: u64,
    voting_period: u64,
    timelock_delay: u64,
    grace_period: u64,
    proposal_threshold: Uint128,
    executor: Option<String>,
    extension: Option<UncheckedExtensionConfig>,
) -> Result<Response, ContractError> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;

    if voting_period == 0 {
        return Err(ContractError::ZeroVotingPeriod {});
    }

    let config = Config {
        staking: deps.api.addr_validate(&staking)?,
        vote_pool: vote_pool.map(|p| deps.api.addr_validate(&p)).transpose()?,
        voting_delay,
        voting_period,
        timelock_delay,
        grace_period,
        proposal_threshold,
        executor: executor.map(|e| deps.api.addr_validate(&e)).transpose()?,
        extension: extension
            .map(|e| e.into_checked(deps.as_ref()))
            .transpose()?,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "update_config"))
}

pub fn execute_update_pre_propose_module(
    deps: DepsMut,
    info: MessageInfo,
    module: Option<String>,
) -> Result<Response, ContractError> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;

    let policy = match module {
        Some(module) => ProposalCreationPolicy::Module {
            addr: deps.api.addr_validate(&module)?,
        },
        None => ProposalCreationPolicy::Anyone {},
    };
    CREATION_POLICY.save(deps.storage, &policy)?;

    Ok(Response::new()
        .add_attribute("action", "update_pre_propose_module")
        .add_attribute("creation_policy", format!("{policy:?}")))
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
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Proposal { proposal_id } => query_proposal(deps, env, proposal_id),
        QueryMsg::ListProposals { start_after, limit } => {
            query_list_proposals(deps, env, start_after, limit)
        }
        QueryMsg::ProposalMetadata { proposal_id } => query_proposal_metadata(deps, proposal_id),
        QueryMsg::QuorumAt { time } => query_quorum_at(deps, env, time),
        QueryMsg::Ballot { proposal_id, voter } => query_ballot(deps, proposal_id, voter),
        QueryMsg::Staking {} => to_json_binary(&CONFIG.load(deps.storage)?.staking),
        QueryMsg::ProposalThreshold {} => {
            to_json_binary(&CONFIG.load(deps.storage)?.proposal_threshold)
        }
        QueryMsg::CreationPolicy {} => to_json_binary(&CREATION_POLICY.load(deps.storage)?),
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::Ownership {} => to_json_binary(&cw_ownable::get_ownership(deps.storage)?),
        QueryMsg::Info {} => query_info(deps),
    }
}

pub fn query_proposal(deps: Deps, env: Env, id: HexBinary) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let proposal = PROPOSALS.load(deps.storage, id.as_slice())?;
    to_json_binary(&proposal.into_response(
        deps.storage,
        env.block.time.seconds(),
        config.grace_period,
    )?)
}

pub fn query_list_proposals(
    deps: Deps,
    env: Env,
    start_after: Option<HexBinary>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let now = env.block.time.seconds();

    let start_after = start_after.map(|id| id.to_vec());
    let proposals = PROPOSALS
        .range(
            deps.storage,
            start_after.as_deref().map(Bound::exclusive),
            None,
            Order::Ascending,
        )
        .map(|proposal| {
            let (_, proposal) = proposal?;
            proposal.into_response(deps.storage, now, config.grace_period)
        })
        .take(limit)
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&ProposalListResponse { proposals })
}

pub fn query_proposal_metadata(deps: Deps, id: HexBinary) -> StdResult<Binary> {
    let vote_start = PROPOSALS
        .may_load(deps.storage, id.as_slice())?
        .map(|proposal| proposal.snapshot)
        .unwrap_or_default();
    to_json_binary(&ProposalMetadataResponse {
        proposal_id: id,
        vote_start,
    })
}

pub fn query_quorum_at(deps: Deps, env: Env, time: Option<u64>) -> StdResult<Binary> {
    let time = time.unwrap_or_else(|| env.block.time.seconds());
    let quorum = QUORUM.load_at(deps.storage, time)?.unwrap_or_default();
    to_json_binary(&QuorumResponse { quorum, time })
}

pub fn query_ballot(deps: Deps, proposal_id: HexBinary, voter: String) -> StdResult<Binary> {
    let voter = deps.api.addr_validate(&voter)?;
    let ballot = BALLOTS.may_load(deps.storage, (proposal_id.as_slice(), &voter))?;
    to_json_binary(&BallotResponse { ballot })
}

pub fn query_info(deps: Deps) -> StdResult<Binary> {
    let info = cw2::get_contract_version(deps.storage)?;
    to_json_binary(&InfoResponse { info })
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::default())
}
