use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{to_json_binary, Addr, CosmosMsg, HexBinary, StdResult, Uint128, WasmMsg};
use cw2::ContractVersion;

use crossgov_voting::voting::Votes;

/// Proposal creation payload, submitted to the governor directly or through
/// its registered creation module.
#[cw_serde]
pub struct ProposeMsg {
    /// The title of the proposal.
    pub title: String,
    /// A description of the proposal.
    pub description: String,
    /// The messages that should be executed in response to this
    /// proposal passing.
    pub msgs: Vec<CosmosMsg>,
    /// The address creating the proposal. If a creation module is
    /// attributing the proposal to someone else, that someone; must be
    /// `None` for direct submissions.
    pub proposer: Option<String>,
}

/// The spoke vote intake the governor implements for its vote pool.
#[cw_serde]
pub enum SpokeVoteExecuteMsg {
    /// Fold verified vote deltas from a spoke chain into a proposal's
    /// tally.
    CastSpokeVotes {
        proposal_id: HexBinary,
        chain_id: u16,
        votes: Votes,
    },
}

/// Prepares the governor call that folds a spoke vote delta into a tally.
pub fn cast_spoke_votes_msg(
    governor: &Addr,
    proposal_id: HexBinary,
    chain_id: u16,
    votes: Votes,
) -> StdResult<WasmMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: governor.to_string(),
        msg: to_json_binary(&SpokeVoteExecuteMsg::CastSpokeVotes {
            proposal_id,
            chain_id,
            votes,
        })?,
        funds: vec![],
    })
}

/// The proposal intake the governor exposes to its creation module.
/// Serialization matches the governor's own `Propose` variant.
#[cw_serde]
pub enum ProposeExecuteMsg {
    Propose(ProposeMsg),
}

/// Prepares the governor call that creates a proposal.
pub fn propose_msg(governor: &Addr, msg: ProposeMsg) -> StdResult<WasmMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: governor.to_string(),
        msg: to_json_binary(&ProposeExecuteMsg::Propose(msg))?,
        funds: vec![],
    })
}

/// Queries sibling governance contracts make against the governor.
#[cw_serde]
#[derive(QueryResponses)]
pub enum Query {
    /// Returns the staking ledger the governor snapshots against.
    #[returns(::cosmwasm_std::Addr)]
    Staking {},
    /// Returns the weight a proposer must demonstrate to create a
    /// proposal.
    #[returns(::cosmwasm_std::Uint128)]
    ProposalThreshold {},
    /// Returns the facts about a proposal that spoke chains mirror.
    #[returns(ProposalMetadataResponse)]
    ProposalMetadata { proposal_id: HexBinary },
    /// Returns contract version info.
    #[returns(InfoResponse)]
    Info {},
}

#[cw_serde]
pub struct ProposalMetadataResponse {
    pub proposal_id: HexBinary,
    /// Unix seconds at which the proposal's voting window opens, zero for
    /// a proposal the governor does not know.
    pub vote_start: u64,
}

#[cw_serde]
pub struct InfoResponse {
    pub info: ContractVersion,
}

pub fn get_proposal_threshold(
    deps: cosmwasm_std::Deps,
    governor: &Addr,
) -> StdResult<Uint128> {
    deps.querier
        .query_wasm_smart(governor, &Query::ProposalThreshold {})
}
