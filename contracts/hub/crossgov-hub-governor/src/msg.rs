use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{CosmosMsg, HexBinary, Uint128};
use crossgov_interface::governor::ProposeMsg;
use crossgov_voting::voting::{Vote, Votes};
use cw_ownable::{cw_ownable_execute, cw_ownable_query};

use crate::state::{Ballot, UncheckedExtensionConfig};

#[cw_serde]
pub struct InstantiateMsg {
    /// The account that may tune governance parameters, cancel
    /// not-yet-executed proposals, and swap the creation module. Left
    /// `None`, ownership is assigned to the governor itself so every
    /// change must ride an executed proposal.
    pub owner: Option<String>,
    /// The staking contract voting power snapshots are read from.
    pub staking: String,
    /// The vote pool allowed to merge attested spoke tallies. Spoke
    /// votes are disabled while unset.
    pub vote_pool: Option<String>,
    /// Seconds between a proposal's creation and its voting power
    /// snapshot.
    pub voting_delay: u64,
    /// Seconds the voting window stays open after the snapshot.
    pub voting_period: u64,
    /// Seconds a queued proposal must wait before it may execute.
    pub timelock_delay: u64,
    /// Seconds past its eta a queued proposal remains executable.
    pub grace_period: u64,
    /// Minimum voting power required to create a proposal directly.
    pub proposal_threshold: Uint128,
    /// Countable voting power a proposal must attract to pass.
    pub quorum: Uint128,
    /// When set, the only address that may execute queued proposals.
    pub executor: Option<String>,
    /// Optional one-shot deadline extension.
    pub extension: Option<UncheckedExtensionConfig>,
    /// A creation module through which all proposals must come. Left
    /// `None`, anyone clearing the proposal threshold may propose.
    pub pre_propose_module: Option<String>,
}

#[cw_ownable_execute]
#[cw_serde]
pub enum ExecuteMsg {
    /// Creates a new proposal. Permitted to anyone clearing the
    /// proposal threshold, or to the registered creation module alone
    /// when one is set.
    Propose(ProposeMsg),
    /// Casts a ballot with the sender's voting power at the proposal's
    /// snapshot. Ballots may not be changed once cast.
    Vote {
        proposal_id: HexBinary,
        vote: Vote,
    },
    /// Folds verified vote deltas from a spoke chain into a proposal's
    /// tally. Only the configured vote pool may call this.
    CastSpokeVotes {
        proposal_id: HexBinary,
        chain_id: u16,
        votes: Votes,
    },
    /// Pushes an active proposal's deadline back once, by the
    /// configured duration. Only the configured extender may call
    /// this.
    ExtendProposal { proposal_id: HexBinary },
    /// Starts the timelock on a proposal whose voting window has
    /// closed with a passing tally.
    Queue { proposal_id: HexBinary },
    /// Executes a queued proposal whose timelock has matured. The
    /// submitted messages and description must hash to the proposal
    /// id.
    Execute {
        proposal_id: HexBinary,
        msgs: Vec<CosmosMsg>,
        description: String,
    },
    /// Cancels a proposal. The proposer may cancel while the proposal
    /// is pending; the owner may cancel any proposal that has not yet
    /// executed, expired, or been defeated.
    Cancel { proposal_id: HexBinary },
    /// Checkpoints a new quorum. Proposals already snapshot keep the
    /// quorum in force at their snapshot time.
    SetQuorum { quorum: Uint128 },
    /// Replaces the governor's config. Only the owner may call this.
    UpdateConfig {
        staking: String,
        vote_pool: Option<String>,
        voting_delay: u64,
        voting_period: u64,
        timelock_delay: u64,
        grace_period: u64,
        proposal_threshold: Uint128,
        executor: Option<String>,
        extension: Option<UncheckedExtensionConfig>,
    },
    /// Replaces the creation module. `None` reopens proposal creation
    /// to anyone clearing the threshold. Only the owner may call this.
    UpdatePreProposeModule { module: Option<String> },
}

#[cw_ownable_query]
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Returns the proposal with the given payload hash, its status
    /// refreshed against the current block.
    #[returns(crate::proposal::Proposal)]
    Proposal { proposal_id: HexBinary },
    /// Lists proposals in ascending payload-hash order.
    #[returns(ProposalListResponse)]
    ListProposals {
        start_after: Option<HexBinary>,
        limit: Option<u32>,
    },
    /// Returns the facts about a proposal that spoke chains mirror.
    /// Unknown proposals report a zero vote start.
    #[returns(crossgov_interface::governor::ProposalMetadataResponse)]
    ProposalMetadata { proposal_id: HexBinary },
    /// Returns the quorum in force at the given time, defaulting to
    /// the current block time.
    #[returns(QuorumResponse)]
    QuorumAt { time: Option<u64> },
    /// Returns the ballot an address has cast on a proposal, if any.
    #[returns(BallotResponse)]
    Ballot {
        proposal_id: HexBinary,
        voter: String,
    },
    /// Returns the staking contract the governor snapshots against.
    #[returns(::cosmwasm_std::Addr)]
    Staking {},
    /// Returns the weight a proposer must demonstrate to create a
    /// proposal directly.
    #[returns(::cosmwasm_std::Uint128)]
    ProposalThreshold {},
    /// Returns who may create proposals.
    #[returns(crossgov_voting::pre_propose::ProposalCreationPolicy)]
    CreationPolicy {},
    /// Returns the governor's config.
    #[returns(crate::state::Config)]
    Config {},
    /// Returns contract version info.
    #[returns(crossgov_interface::governor::InfoResponse)]
    Info {},
}

#[cw_serde]
pub struct ProposalListResponse {
    pub proposals: Vec<crate::proposal::Proposal>,
}

#[cw_serde]
pub struct BallotResponse {
    /// `None` if the address has not voted on the proposal.
    pub ballot: Option<Ballot>,
}

#[cw_serde]
pub struct QuorumResponse {
    pub quorum: Uint128,
    pub time: u64,
}

#[cw_serde]
pub struct MigrateMsg {}
