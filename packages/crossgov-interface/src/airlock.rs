use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_binary, Addr, CosmosMsg, StdResult, WasmMsg};

/// The execute interface the airlock exposes to its message executor.
#[cw_serde]
pub enum AirlockExecuteMsg {
    /// Dispatch attested hub messages as the airlock's own.
    Execute { msgs: Vec<CosmosMsg> },
}

/// Prepares the airlock call carrying a decoded hub payload.
pub fn execute_msg(airlock: &Addr, msgs: Vec<CosmosMsg>) -> StdResult<WasmMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: airlock.to_string(),
        msg: to_json_binary(&AirlockExecuteMsg::Execute { msgs })?,
        funds: vec![],
    })
}
