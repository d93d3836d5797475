use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Empty, HexBinary};
use cw_storage_plus::{Item, Map};

use crossgov_attestation::guardians::GuardianSet;

#[cw_serde]
pub struct Config {
    /// Attestation-network chain id of this spoke. Messages addressed
    /// anywhere else are dropped.
    pub spoke_chain_id: u16,
    /// The chain hub messages are emitted from.
    pub hub_chain_id: u16,
    /// The hub dispatcher, as a 32 byte universal emitter address.
    pub hub_dispatcher: HexBinary,
    /// The airlock decoded messages are run through.
    pub airlock: Addr,
    /// The guardian set relayed messages must be signed by.
    pub guardian_set: GuardianSet,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Body hashes of executed messages. Append only.
pub const RECEIVED_MESSAGES: Map<&[u8], Empty> = Map::new("received_messages");
