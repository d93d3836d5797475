use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::HexBinary;
use cw_ownable::{cw_ownable_execute, cw_ownable_query};

use crossgov_attestation::guardians::{GuardianSet, GuardianSignature};
use crossgov_voting::voting::Votes;

#[cw_serde]
pub struct InstantiateMsg {
    /// The account that manages the spoke registry, decoder toggles,
    /// and guardian set. Normally the governor or its timelock.
    pub owner: String,
    /// The governor verified tally deltas are folded into.
    pub governor: String,
    /// The guardian set submitted responses must be signed by.
    pub guardian_set: GuardianSet,
    /// Query types accepted from launch. More can be toggled later.
    pub query_types: Vec<u8>,
}

#[cw_ownable_execute]
#[cw_serde]
pub enum ExecuteMsg {
    /// Submit a guardian-attested read of spoke tallies. Anyone may
    /// relay one; the signatures carry the authority. Each per-chain
    /// response is decoded, checked against the spoke registered at
    /// its attested time, and merged by delta into the governor.
    CrossChainVote {
        /// The serialized query response the guardians signed.
        response: HexBinary,
        signatures: Vec<GuardianSignature>,
    },
    /// Record a chain's vote aggregator identity as of now. An
    /// all-zero identity deregisters the chain. Only the owner may
    /// call this.
    RegisterSpoke { chain_id: u16, identity: HexBinary },
    /// Enable or disable intake of a query type. Only the owner may
    /// call this.
    RegisterQueryType { query_type: u8, enabled: bool },
    /// Replace the guardian set future submissions verify against.
    /// Only the owner may call this.
    UpdateGuardianSet { guardian_set: GuardianSet },
    /// Point the pool at a different governor. Only the owner may
    /// call this.
    UpdateConfig { governor: String },
}

#[cw_ownable_query]
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Returns the identity checkpointed for a chain as of a time,
    /// all zeros marking a deregistration.
    #[returns(SpokeAtResponse)]
    SpokeAt { chain_id: u16, time: u64 },
    /// Returns the last merged observation of a spoke's tally for a
    /// proposal.
    #[returns(SpokeVotesResponse)]
    SpokeVotes {
        chain_id: u16,
        proposal_id: HexBinary,
    },
    /// Returns whether tally reads of the given query type are
    /// accepted.
    #[returns(bool)]
    QueryTypeEnabled { query_type: u8 },
    /// Returns the pool's configuration.
    #[returns(crate::state::Config)]
    Config {},
    /// Returns contract version info.
    #[returns(crossgov_interface::governor::InfoResponse)]
    Info {},
}

#[cw_serde]
pub struct SpokeAtResponse {
    pub identity: Option<HexBinary>,
}

#[cw_serde]
pub struct SpokeVotesResponse {
    pub votes: Votes,
}

#[cw_serde]
pub struct MigrateMsg {}
