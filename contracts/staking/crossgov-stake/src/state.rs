use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_checkpoint::{CheckpointItem, CheckpointMap};
use cw_storage_plus::{Item, Map};

/// Upper bound on the vote weight window, in seconds.
pub const MAX_VOTE_WEIGHT_WINDOW: u64 = 850;

#[cw_serde]
pub struct Config {
    /// Native denom staked for voting power.
    pub denom: String,
    /// Address allowed to report vesting-linked balances.
    pub vesting_admin: Option<Addr>,
}

/// Per-account custody record. `recorded_balance` is liquid stake held
/// by this contract and may be unstaked; `recorded_vesting_balance` is
/// reported by the vesting admin and may not. Both count towards the
/// delegate's voting power.
#[cw_serde]
pub struct StakeAccount {
    pub delegate: Addr,
    pub recorded_balance: Uint128,
    pub recorded_vesting_balance: Uint128,
}

impl StakeAccount {
    pub fn new(delegate: Addr) -> Self {
        Self {
            delegate,
            recorded_balance: Uint128::zero(),
            recorded_vesting_balance: Uint128::zero(),
        }
    }

    /// The weight this account contributes to its delegate.
    pub fn weight(&self) -> Uint128 {
        self.recorded_balance + self.recorded_vesting_balance
    }
}

pub const CONFIG: Item<Config> = Item::new("config");

pub const STAKE_ACCOUNTS: Map<&Addr, StakeAccount> = Map::new("stake_accounts");

/// Voting power per delegate over time. Keyed by the delegate's
/// address, not the staker's.
pub const DELEGATED_POWER: CheckpointMap<String, Uint128> = CheckpointMap::new("delegated_power");

pub const TOTAL_POWER: CheckpointItem<Uint128> = CheckpointItem::new("total_power");

/// Vote weight window lengths over time. An empty history means a
/// window of zero: power is read exactly at the requested time.
pub const WINDOW_LENGTHS: CheckpointItem<u64> = CheckpointItem::new("window_lengths");
