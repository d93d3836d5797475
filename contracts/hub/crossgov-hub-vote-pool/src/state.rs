use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Empty, HexBinary};
use cw_checkpoint::CheckpointMap;
use cw_storage_plus::{Item, Map};

use crossgov_attestation::guardians::GuardianSet;
use crossgov_voting::voting::Votes;

#[cw_serde]
pub struct Config {
    /// The governor verified tally deltas are folded into.
    pub governor: Addr,
    /// The guardian set submitted responses must be signed by.
    pub guardian_set: GuardianSet,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Each chain's vote aggregator identity over time, as a 32-byte
/// universal address keyed by the attestation chain id. An all-zero
/// identity marks a deregistration.
pub const SPOKE_REGISTRY: CheckpointMap<u64, HexBinary> = CheckpointMap::new("spoke_registry");

/// The query types tally reads may arrive as.
pub const QUERY_TYPES: Map<u8, Empty> = Map::new("query_types");

/// The last observation merged per spoke and proposal. New reads must
/// extend the recorded one and only their delta reaches the governor,
/// so replaying an observation adds nothing.
pub const SPOKE_VOTES: Map<(u16, &[u8]), Votes> = Map::new("spoke_votes");
