use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{CosmosMsg, HexBinary};
use cw_ownable::{cw_ownable_execute, cw_ownable_query};

use crossgov_attestation::guardians::{GuardianSet, GuardianSignature};

#[cw_serde]
pub struct InstantiateMsg {
    /// The account that manages the spoke registry and guardian set.
    /// Normally the governor or its timelock.
    pub owner: String,
    /// The governor proposals are created on. Its creation policy must
    /// point back at this module for forwarded proposals to land.
    pub governor: String,
    /// The hub staking ledger the proposer's local power is read from.
    pub staking: String,
    /// The guardian set submitted responses must be signed by.
    pub guardian_set: GuardianSet,
    /// How far behind the current block time an attested balance read
    /// may sit, in seconds.
    pub max_query_timestamp_offset: u64,
}

#[cw_ownable_execute]
#[cw_serde]
pub enum ExecuteMsg {
    /// Create a proposal on the governor. The attested response must
    /// hold one timestamped balance read of the sender per spoke
    /// chain, all pinned to the same recent timestamp; the decoded
    /// balances plus the sender's hub power at that timestamp must
    /// clear the governor's proposal threshold.
    Propose {
        title: String,
        description: String,
        msgs: Vec<CosmosMsg>,
        /// The serialized query response the guardians signed.
        response: HexBinary,
        signatures: Vec<GuardianSignature>,
    },
    /// Record the call target balance reads for a chain must hit. An
    /// all-zero address deregisters the chain. Only the owner may
    /// call this.
    RegisterSpoke { chain_id: u16, address: HexBinary },
    /// Cap how far in the past attested reads may be pinned. Only the
    /// owner may call this.
    SetMaxQueryTimestampOffset { offset: u64 },
    /// Replace the guardian set future submissions verify against.
    /// Only the owner may call this.
    UpdateGuardianSet { guardian_set: GuardianSet },
}

#[cw_ownable_query]
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Returns the call target registered for a chain.
    #[returns(SpokeResponse)]
    Spoke { chain_id: u16 },
    #[returns(crate::state::Config)]
    Config {},
    #[returns(crossgov_interface::governor::InfoResponse)]
    Info {},
}

#[cw_serde]
pub struct SpokeResponse {
    pub address: Option<HexBinary>,
}

#[cw_serde]
pub struct MigrateMsg {}
