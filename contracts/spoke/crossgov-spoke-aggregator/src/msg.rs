use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::HexBinary;
use cw_ownable::{cw_ownable_execute, cw_ownable_query};

use crossgov_attestation::guardians::{GuardianSet, GuardianSignature};
use crossgov_voting::voting::{Vote, Votes};

use crate::state::SpokeProposal;

#[cw_serde]
pub struct InstantiateMsg {
    /// The account that manages the config and guardian set. Normally
    /// the spoke airlock.
    pub owner: String,
    /// The spoke staking ledger ballots draw their weight from.
    pub staking: String,
    /// The chain metadata reads must be attested from.
    pub hub_chain_id: u16,
    /// The hub metadata contract reads must target, a 20 byte call
    /// target.
    pub hub_proposal_metadata: HexBinary,
    /// Seconds ballots stay open after a proposal's vote start. `None`
    /// keeps the default of one day.
    pub safe_window: Option<u64>,
    /// The guardian set submitted responses must be signed by.
    pub guardian_set: GuardianSet,
}

#[cw_ownable_execute]
#[cw_serde]
pub enum ExecuteMsg {
    /// Mirror a hub proposal from a guardian-attested finalized read
    /// of the hub metadata contract. Anyone may relay one; the
    /// signatures carry the authority.
    AddProposal {
        /// The serialized query response the guardians signed.
        response: HexBinary,
        signatures: Vec<GuardianSignature>,
    },
    /// Cast a ballot on a mirrored proposal. Weight is read from the
    /// staking ledger at the proposal's vote start.
    Vote { proposal_id: HexBinary, vote: Vote },
    /// Resize the window ballots are accepted in. Only the owner may
    /// call this.
    SetSafeWindow { seconds: u64 },
    /// Replace the guardian set future submissions verify against.
    /// Only the owner may call this.
    UpdateGuardianSet { guardian_set: GuardianSet },
    /// Repoint the ledger or the metadata source. Only the owner may
    /// call this.
    UpdateConfig {
        staking: String,
        hub_chain_id: u16,
        hub_proposal_metadata: HexBinary,
    },
}

#[cw_ownable_query]
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Returns a mirrored proposal.
    #[returns(SpokeProposal)]
    Proposal { proposal_id: HexBinary },
    /// Returns the local running tally for a proposal, the read
    /// hub-side decoders consume. Unknown proposals report a zero
    /// tally.
    #[returns(ProposalVotesResponse)]
    ProposalVotes { proposal_id: HexBinary },
    /// Returns whether an account has voted on a proposal.
    #[returns(HasVotedResponse)]
    HasVoted {
        proposal_id: HexBinary,
        voter: String,
    },
    #[returns(crate::state::Config)]
    Config {},
    #[returns(crossgov_interface::governor::InfoResponse)]
    Info {},
}

#[cw_serde]
pub struct ProposalVotesResponse {
    pub votes: Votes,
}

#[cw_serde]
pub struct HasVotedResponse {
    pub has_voted: bool,
}

#[cw_serde]
pub struct MigrateMsg {}
