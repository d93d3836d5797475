use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::CosmosMsg;

#[cw_serde]
pub struct InstantiateMsg {
    /// The account that may run messages through the airlock. Deploys
    /// usually start with the deployer here and hand over to the spoke
    /// executor through an executed `SetMessageExecutor`.
    pub message_executor: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Dispatch attested hub messages as the airlock's own. Only the
    /// message executor may call this.
    Execute { msgs: Vec<CosmosMsg> },
    /// Hand the airlock to a new message executor. Only the airlock
    /// itself may call this, so the change must arrive as an executed
    /// message.
    SetMessageExecutor { message_executor: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(crate::state::Config)]
    Config {},
    #[returns(crossgov_interface::governor::InfoResponse)]
    Info {},
}

#[cw_serde]
pub struct MigrateMsg {}
