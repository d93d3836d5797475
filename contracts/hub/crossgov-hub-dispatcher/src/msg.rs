use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::CosmosMsg;
use cw_ownable::{cw_ownable_execute, cw_ownable_query};

#[cw_serde]
pub struct InstantiateMsg {
    /// The only address that may dispatch, normally the hub governor.
    pub owner: String,
}

#[cw_ownable_execute]
#[cw_serde]
pub enum ExecuteMsg {
    /// Publishes an execution message addressed to one spoke chain.
    /// The encoded payload is emitted in the transaction log for the
    /// attestation network to pick up.
    Dispatch {
        /// Attestation-network chain id of the receiving spoke.
        chain_id: u16,
        /// The messages the spoke's executor should run.
        msgs: Vec<CosmosMsg>,
    },
}

#[cw_ownable_query]
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Returns the sequence number the next message will carry.
    #[returns(NextMessageIdResponse)]
    NextMessageId {},
    /// Returns contract version info.
    #[returns(crossgov_interface::governor::InfoResponse)]
    Info {},
}

#[cw_serde]
pub struct NextMessageIdResponse {
    pub message_id: u64,
}

#[cw_serde]
pub struct MigrateMsg {}
