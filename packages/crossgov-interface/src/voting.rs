use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Deps, StdResult, Uint128};
use cw2::ContractVersion;

/// Query interface every voting power ledger implements. Times are unix
/// seconds; `None` reads at the current block time. Reported powers are
/// already adjusted by the ledger's vote weight window.
#[cw_serde]
#[derive(QueryResponses)]
pub enum Query {
    /// Returns the voting power of an address at a given time.
    #[returns(VotingPowerAtTimeResponse)]
    VotingPowerAtTime {
        address: String,
        time: Option<u64>,
    },
    /// Returns the total voting power at a given time.
    #[returns(TotalPowerAtTimeResponse)]
    TotalPowerAtTime { time: Option<u64> },
    /// Returns the vote weight window length in force at a given time.
    #[returns(VoteWeightWindowResponse)]
    VoteWeightWindowAt { time: Option<u64> },
    /// Returns contract version info.
    #[returns(InfoResponse)]
    Info {},
}

#[cw_serde]
pub struct VotingPowerAtTimeResponse {
    pub power: Uint128,
    pub time: u64,
}

#[cw_serde]
pub struct TotalPowerAtTimeResponse {
    pub power: Uint128,
    pub time: u64,
}

#[cw_serde]
pub struct VoteWeightWindowResponse {
    pub window: u64,
    pub time: u64,
}

#[cw_serde]
pub struct InfoResponse {
    pub info: ContractVersion,
}

/// A time of None will query for the current block time.
pub fn get_voting_power(
    deps: Deps,
    ledger: &Addr,
    address: &Addr,
    time: Option<u64>,
) -> StdResult<Uint128> {
    let response: VotingPowerAtTimeResponse = deps.querier.query_wasm_smart(
        ledger,
        &Query::VotingPowerAtTime {
            address: address.to_string(),
            time,
        },
    )?;
    Ok(response.power)
}

/// A time of None will query for the current block time.
pub fn get_total_power(deps: Deps, ledger: &Addr, time: Option<u64>) -> StdResult<Uint128> {
    let response: TotalPowerAtTimeResponse = deps
        .querier
        .query_wasm_smart(ledger, &Query::TotalPowerAtTime { time })?;
    Ok(response.power)
}
