use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, HexBinary};
use cw_storage_plus::{Item, Map};

use crossgov_attestation::guardians::GuardianSet;

#[cw_serde]
pub struct Config {
    /// The governor proposals are created on.
    pub governor: Addr,
    /// The hub staking ledger the proposer's local power is read from.
    pub staking: Addr,
    /// The guardian set submitted responses must be signed by.
    pub guardian_set: GuardianSet,
    /// How far behind the current block time an attested balance read
    /// may sit, in seconds.
    pub max_query_timestamp_offset: u64,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// The vote aggregator balance reads must target on each chain, as a
/// 20 byte call target.
pub const SPOKES: Map<u16, HexBinary> = Map::new("spokes");
