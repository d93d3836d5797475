use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, HexBinary, Uint128};
use cw_storage_plus::{Item, Map};

use crossgov_attestation::guardians::GuardianSet;
use crossgov_voting::voting::{Vote, Votes};

#[cw_serde]
pub struct Config {
    /// The spoke staking ledger ballots draw their weight from.
    pub staking: Addr,
    /// The chain metadata reads must be attested from.
    pub hub_chain_id: u16,
    /// The hub metadata contract reads must target, a 20 byte call
    /// target.
    pub hub_proposal_metadata: HexBinary,
    /// Seconds after a proposal's vote start during which local
    /// ballots are accepted.
    pub safe_window: u64,
    /// The guardian set submitted responses must be signed by.
    pub guardian_set: GuardianSet,
}

/// A hub proposal mirrored onto this chain.
#[cw_serde]
pub struct SpokeProposal {
    pub proposal_id: HexBinary,
    /// The hub's voting power snapshot time, fixed when the proposal
    /// was created there.
    pub vote_start: u64,
    /// The local running tally.
    pub votes: Votes,
}

/// A vote cast on a mirrored proposal.
#[cw_serde]
pub struct Ballot {
    /// The voting power behind the vote.
    pub power: Uint128,
    /// The position.
    pub vote: Vote,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Mirrored proposals by id. A mirrored proposal never changes its
/// vote start.
pub const PROPOSALS: Map<&[u8], SpokeProposal> = Map::new("proposals");

pub const BALLOTS: Map<(&[u8], &Addr), Ballot> = Map::new("ballots");
