use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Deps, StdResult, Uint128};
use crossgov_voting::pre_propose::ProposalCreationPolicy;
use crossgov_voting::voting::Vote;
use cw_checkpoint::CheckpointItem;
use cw_storage_plus::{Item, Map};

use crate::proposal::Proposal;

/// Grants a single address the right to push an active proposal's
/// deadline back once, for example when attested spoke tallies are
/// still in flight and could flip the outcome.
#[cw_serde]
pub struct ExtensionConfig {
    /// The address allowed to extend proposals.
    pub extender: Addr,
    /// Seconds added to the deadline by an extension.
    pub duration: u64,
}

#[cw_serde]
pub struct UncheckedExtensionConfig {
    pub extender: String,
    pub duration: u64,
}

impl UncheckedExtensionConfig {
    pub fn into_checked(self, deps: Deps) -> StdResult<ExtensionConfig> {
        Ok(ExtensionConfig {
            extender: deps.api.addr_validate(&self.extender)?,
            duration: self.duration,
        })
    }
}

#[cw_serde]
pub struct Config {
    /// The staking contract voting power snapshots are read from.
    pub staking: Addr,
    /// The only address allowed to merge attested spoke tallies into
    /// proposals. Spoke votes are disabled while unset.
    pub vote_pool: Option<Addr>,
    /// Seconds between a proposal's creation and its voting power
    /// snapshot. Voting opens the second after the snapshot.
    pub voting_delay: u64,
    /// Seconds the voting window stays open after the snapshot.
    pub voting_period: u64,
    /// Seconds a queued proposal must wait before it may execute.
    pub timelock_delay: u64,
    /// Seconds past its eta during which a queued proposal remains
    /// executable before expiring.
    pub grace_period: u64,
    /// Minimum voting power required to create a proposal directly.
    /// Ignored when proposals route through a pre-propose module.
    pub proposal_threshold: Uint128,
    /// When set, the only address that may execute queued proposals.
    pub executor: Option<Addr>,
    /// Optional one-shot deadline extension.
    pub extension: Option<ExtensionConfig>,
}

/// A vote cast on a proposal.
#[cw_serde]
pub struct Ballot {
    /// The voting power behind the vote.
    pub power: Uint128,
    /// The position.
    pub vote: Vote,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// The countable voting power a proposal must attract to pass,
/// checkpointed so that changing it never reaches back into proposals
/// already snapshot. Evaluation reads the value as of the proposal's
/// snapshot time.
pub const QUORUM: CheckpointItem<Uint128> = CheckpointItem::new("quorum");

/// Proposals by their 32-byte payload hash.
pub const PROPOSALS: Map<&[u8], Proposal> = Map::new("proposals");

/// Ballots by proposal and voter.
pub const BALLOTS: Map<(&[u8], &Addr), Ballot> = Map::new("ballots");

/// Who may create proposals.
pub const CREATION_POLICY: Item<ProposalCreationPolicy> = Item::new("creation_policy");
