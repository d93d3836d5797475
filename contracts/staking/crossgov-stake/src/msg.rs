use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;
use cw_ownable::{cw_ownable_execute, cw_ownable_query};

use crate::state::{Config, StakeAccount};

#[cw_serde]
pub struct InstantiateMsg {
    /// May update the config and the vote weight window.
    pub owner: String,
    /// Native denom staked for voting power.
    pub denom: String,
    /// May report vesting-linked balances via `SetVestingBalance`.
    pub vesting_admin: Option<String>,
}

#[cw_ownable_execute]
#[cw_serde]
pub enum ExecuteMsg {
    /// Stakes the attached funds, which must be exactly one coin of the
    /// configured denom. The first stake of an account makes the
    /// account its own delegate.
    Stake {},
    /// Unstakes a liquid amount and returns it to the sender
    /// immediately. Vesting-linked balances cannot be withdrawn here.
    Unstake { amount: Uint128 },
    /// Moves the sender's full weight, staked plus vesting-linked, to a
    /// new delegate.
    Delegate { delegatee: String },
    /// Replaces an account's vesting-linked balance with `amount`.
    /// Only callable by the vesting admin.
    SetVestingBalance { account: String, amount: Uint128 },
    /// Pushes a new vote weight window checkpoint. Only callable by the
    /// owner.
    SetVoteWeightWindow { seconds: u64 },
    /// Updates the vesting admin. Only callable by the owner.
    UpdateConfig { vesting_admin: Option<String> },
}

#[cw_ownable_query]
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Returns the voting power delegated to an address at a given
    /// time, read one vote weight window before that time. A time of
    /// None reads at the current block time.
    #[returns(crossgov_interface::voting::VotingPowerAtTimeResponse)]
    VotingPowerAtTime {
        address: String,
        time: Option<u64>,
    },
    /// Returns the total staked and vesting-reported power at a given
    /// time.
    #[returns(crossgov_interface::voting::TotalPowerAtTimeResponse)]
    TotalPowerAtTime { time: Option<u64> },
    /// Returns the vote weight window in force at a given time.
    #[returns(crossgov_interface::voting::VoteWeightWindowResponse)]
    VoteWeightWindowAt { time: Option<u64> },
    /// Returns an account's custody record.
    #[returns(StakeAccountResponse)]
    StakeAccount { address: String },
    /// Lists custody records by account address.
    #[returns(ListStakeAccountsResponse)]
    ListStakeAccounts {
        start_after: Option<String>,
        limit: Option<u32>,
    },
    #[returns(Config)]
    Config {},
    #[returns(crossgov_interface::voting::InfoResponse)]
    Info {},
}

#[cw_serde]
pub struct StakeAccountResponse {
    pub account: Option<StakeAccount>,
}

#[cw_serde]
pub struct StakeAccountEntry {
    pub address: String,
    pub account: StakeAccount,
}

#[cw_serde]
pub struct ListStakeAccountsResponse {
    pub accounts: Vec<StakeAccountEntry>,
}

#[cw_serde]
pub struct MigrateMsg {}
