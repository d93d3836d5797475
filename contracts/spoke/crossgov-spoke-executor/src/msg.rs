use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::HexBinary;

use crossgov_attestation::guardians::GuardianSet;

#[cw_serde]
pub struct InstantiateMsg {
    /// Attestation-network chain id of this spoke.
    pub spoke_chain_id: u16,
    /// The chain hub messages are emitted from.
    pub hub_chain_id: u16,
    /// The hub dispatcher, as a 32 byte universal emitter address.
    pub hub_dispatcher: HexBinary,
    /// The airlock decoded messages are run through. The airlock also
    /// administers this contract, so reconfiguration arrives as an
    /// executed hub message.
    pub airlock: String,
    /// The guardian set relayed messages must be signed by.
    pub guardian_set: GuardianSet,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Execute a hub-published message. Anyone may relay one; the
    /// guardian signatures carry the authority.
    ReceiveMessage {
        /// The serialized core-bridge message the guardians signed.
        vaa: HexBinary,
    },
    /// Replace the guardian set future messages verify against. Only
    /// the airlock may call this.
    UpdateGuardianSet { guardian_set: GuardianSet },
    /// Repoint the hub emitter or the airlock. Only the airlock may
    /// call this.
    UpdateConfig {
        spoke_chain_id: u16,
        hub_chain_id: u16,
        hub_dispatcher: HexBinary,
        airlock: String,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Returns whether a message with this body hash has been
    /// executed.
    #[returns(MessageReceivedResponse)]
    MessageReceived { hash: HexBinary },
    #[returns(crate::state::Config)]
    Config {},
    #[returns(crossgov_interface::governor::InfoResponse)]
    Info {},
}

#[cw_serde]
pub struct MessageReceivedResponse {
    pub received: bool,
}

#[cw_serde]
pub struct MigrateMsg {}
