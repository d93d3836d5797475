#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    coins, to_json_binary, BankMsg, Binary, CosmosMsg, Deps, DepsMut, Env, MessageInfo, Order,
    Response, StdError, StdResult, Uint128,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;
use cw_utils::{must_pay, nonpayable};

use crossgov_interface::voting::{
    InfoResponse, TotalPowerAtTimeResponse, VoteWeightWindowResponse, VotingPowerAtTimeResponse,
};

use crate::error::ContractError;
use crate::msg::{
    ExecuteMsg, InstantiateMsg, ListStakeAccountsResponse, MigrateMsg, QueryMsg,
    StakeAccountEntry, StakeAccountResponse,
};
use crate::state::{
    Config, StakeAccount, CONFIG, DELEGATED_POWER, MAX_VOTE_WEIGHT_WINDOW, STAKE_ACCOUNTS,
    TOTAL_POWER, WINDOW_LENGTHS,
};

pub(crate) const CONTRACT_NAME: &str = "crates.io:crossgov-stake";
pub(crate) const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const MAX_LIMIT: u32 = 100;
const DEFAULT_LIMIT: u32 = 30;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    cw_ownable::initialize_owner(deps.storage, deps.api, Some(&msg.owner))?;

    let vesting_admin = msg
        .vesting_admin
        .map(|admin| deps.api.addr_validate(&admin))
        .transpose()?;
    CONFIG.save(
        deps.storage,
        &Config {
            denom: msg.denom.clone(),
            vesting_admin,
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("denom", msg.denom))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Stake {} => execute_stake(deps, env, info),
        ExecuteMsg::Unstake { amount } => execute_unstake(deps, env, info, amount),
        ExecuteMsg::Delegate { delegatee } => execute_delegate(deps, env, info, delegatee),
        ExecuteMsg::SetVestingBalance { account, amount } => {
            execute_set_vesting_balance(deps, env, info, account, amount)
        }
        ExecuteMsg::SetVoteWeightWindow { seconds } => {
            execute_set_vote_weight_window(deps, env, info, seconds)
        }
        ExecuteMsg::UpdateConfig { vesting_admin } => {
            execute_update_config(deps, info, vesting_admin)
        }
        ExecuteMsg::UpdateOwnership(action) => execute_update_owner(deps, info, env, action),
    }
}

pub fn execute_stake(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let amount = must_pay(&info, &config.denom)?;

    let mut account = STAKE_ACCOUNTS
        .may_load(deps.storage, &info.sender)?
        .unwrap_or_else(|| StakeAccount::new(info.sender.clone()));
    account.recorded_balance = account
        .recorded_balance
        .checked_add(amount)
        .map_err(StdError::overflow)?;
    STAKE_ACCOUNTS.save(deps.storage, &info.sender, &account)?;

    let now = env.block.time.seconds();
    DELEGATED_POWER.update(
        deps.storage,
        account.delegate.to_string(),
        now,
        |power| -> Result<Uint128, ContractError> {
            Ok(power
                .unwrap_or_default()
                .checked_add(amount)
                .map_err(StdError::overflow)?)
        },
    )?;
    TOTAL_POWER.update(
        deps.storage,
        now,
        |total| -> Result<Uint128, ContractError> {
            Ok(total
                .unwrap_or_default()
                .checked_add(amount)
                .map_err(StdError::overflow)?)
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "stake")
        .add_attribute("amount", amount)
        .add_attribute("from", info.sender))
}

pub fn execute_unstake(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::ZeroUnstake {});
    }

    let mut account = STAKE_ACCOUNTS
        .may_load(deps.storage, &info.sender)?
        .ok_or(ContractError::InvalidUnstakeAmount {})?;
    account.recorded_balance = account
        .recorded_balance
        .checked_sub(amount)
        .map_err(|_e| ContractError::InvalidUnstakeAmount {})?;
    STAKE_ACCOUNTS.save(deps.storage, &info.sender, &account)?;

    let now = env.block.time.seconds();
    DELEGATED_POWER.update(
        deps.storage,
        account.delegate.to_string(),
        now,
        |power| -> Result<Uint128, ContractError> {
            power
                .unwrap_or_default()
                .checked_sub(amount)
                .map_err(|_e| ContractError::InvalidUnstakeAmount {})
        },
    )?;
    TOTAL_POWER.update(
        deps.storage,
        now,
        |total| -> Result<Uint128, ContractError> {
            total
                .unwrap_or_default()
                .checked_sub(amount)
                .map_err(|_e| ContractError::InvalidUnstakeAmount {})
        },
    )?;

    let config = CONFIG.load(deps.storage)?;
    let msg = CosmosMsg::Bank(BankMsg::Send {
        to_address: info.sender.to_string(),
        amount: coins(amount.u128(), config.denom),
    });

    Ok(Response::new()
        .add_message(msg)
        .add_attribute("action", "unstake")
        .add_attribute("amount", amount)
        .add_attribute("from", info.sender))
}

pub fn execute_delegate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    delegatee: String,
) -> Result<Response, ContractError> {
    let delegatee = deps.api.addr_validate(&delegatee)?;

    let mut account = STAKE_ACCOUNTS
        .may_load(deps.storage, &info.sender)?
        .unwrap_or_else(|| StakeAccount::new(info.sender.clone()));
    if account.delegate == delegatee {
        return Err(ContractError::AlreadyDelegated {
            delegate: delegatee.into_string(),
        });
    }

    let weight = account.weight();
    let previous = account.delegate.clone();
    account.delegate = delegatee.clone();
    STAKE_ACCOUNTS.save(deps.storage, &info.sender, &account)?;

    let now = env.block.time.seconds();
    DELEGATED_POWER.update(
        deps.storage,
        previous.to_string(),
        now,
        |power| -> Result<Uint128, ContractError> {
            Ok(power
                .unwrap_or_default()
                .checked_sub(weight)
                .map_err(StdError::overflow)?)
        },
    )?;
    DELEGATED_POWER.update(
        deps.storage,
        delegatee.to_string(),
        now,
        |power| -> Result<Uint128, ContractError> {
            Ok(power
                .unwrap_or_default()
                .checked_add(weight)
                .map_err(StdError::overflow)?)
        },
    )?;

    Ok(Response::new()
        .add_attribute("action", "delegate")
        .add_attribute("from", info.sender)
        .add_attribute("delegate", delegatee))
}

pub fn execute_set_vesting_balance(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    account: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.vesting_admin.as_ref() != Some(&info.sender) {
        return Err(ContractError::Unauthorized {});
    }

    let address = deps.api.addr_validate(&account)?;
    let mut account = STAKE_ACCOUNTS
        .may_load(deps.storage, &address)?
        .unwrap_or_else(|| StakeAccount::new(address.clone()));
    let previous = account.recorded_vesting_balance;
    account.recorded_vesting_balance = amount;
    STAKE_ACCOUNTS.save(deps.storage, &address, &account)?;

    let now = env.block.time.seconds();
    if amount > previous {
        let delta = amount - previous;
        DELEGATED_POWER.update(
            deps.storage,
            account.delegate.to_string(),
            now,
            |power| -> Result<Uint128, ContractError> {
                Ok(power
                    .unwrap_or_default()
                    .checked_add(delta)
                    .map_err(StdError::overflow)?)
            },
        )?;
        TOTAL_POWER.update(
            deps.storage,
            now,
            |total| -> Result<Uint128, ContractError> {
                Ok(total
                    .unwrap_or_default()
                    .checked_add(delta)
                    .map_err(StdError::overflow)?)
            },
        )?;
    } else if previous > amount {
        let delta = previous - amount;
        DELEGATED_POWER.update(
            deps.storage,
            account.delegate.to_string(),
            now,
            |power| -> Result<Uint128, ContractError> {
                Ok(power
                    .unwrap_or_default()
                    .checked_sub(delta)
                    .map_err(StdError::overflow)?)
            },
        )?;
        TOTAL_POWER.update(
            deps.storage,
            now,
            |total| -> Result<Uint128, ContractError> {
                Ok(total
                    .unwrap_or_default()
                    .checked_sub(delta)
                    .map_err(StdError::overflow)?)
            },
        )?;
    }

    Ok(Response::new()
        .add_attribute("action", "set_vesting_balance")
        .add_attribute("account", address)
        .add_attribute("amount", amount))
}

pub fn execute_set_vote_weight_window(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    seconds: u64,
) -> Result<Response, ContractError> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;

    if seconds > MAX_VOTE_WEIGHT_WINDOW {
        return Err(ContractError::WindowTooLong {
            max: MAX_VOTE_WEIGHT_WINDOW,
            got: seconds,
        });
    }
    WINDOW_LENGTHS.push(deps.storage, &seconds, env.block.time.seconds())?;

    Ok(Response::new()
        .add_attribute("action", "set_vote_weight_window")
        .add_attribute("window", seconds.to_string()))
}

pub fn execute_update_config(
    deps: DepsMut,
    info: MessageInfo,
    vesting_admin: Option<String>,
) -> Result<Response, ContractError> {
    cw_ownable::assert_owner(deps.storage, &info.sender)?;

    let mut config = CONFIG.load(deps.storage)?;
    config.vesting_admin = vesting_admin
        .map(|admin| deps.api.addr_validate(&admin))
        .transpose()?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attribute("action", "update_config"))
}

pub fn execute_update_owner(
    deps: DepsMut,
    info: MessageInfo,
    env: Env,
    action: cw_ownable::Action,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;

    let ownership = cw_ownable::update_ownership(deps, &env.block, &info.sender, action)?;
    Ok(Response::new().add_attributes(ownership.into_attributes()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::VotingPowerAtTime { address, time } => {
            to_json_binary(&query_voting_power_at_time(deps, env, address, time)?)
        }
        QueryMsg::TotalPowerAtTime { time } => {
            to_json_binary(&query_total_power_at_time(deps, env, time)?)
        }
        QueryMsg::VoteWeightWindowAt { time } => {
            to_json_binary(&query_vote_weight_window_at(deps, env, time)?)
        }
        QueryMsg::StakeAccount { address } => to_json_binary(&query_stake_account(deps, address)?),
        QueryMsg::ListStakeAccounts { start_after, limit } => {
            to_json_binary(&query_list_stake_accounts(deps, start_after, limit)?)
        }
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::Ownership {} => to_json_binary(&cw_ownable::get_ownership(deps.storage)?),
        QueryMsg::Info {} => query_info(deps),
    }
}

pub fn query_voting_power_at_time(
    deps: Deps,
    env: Env,
    address: String,
    time: Option<u64>,
) -> StdResult<VotingPowerAtTimeResponse> {
    let time = time.unwrap_or_else(|| env.block.time.seconds());
    let address = deps.api.addr_validate(&address)?;
    let window = WINDOW_LENGTHS
        .load_at(deps.storage, time)?
        .unwrap_or_default();
    let power = DELEGATED_POWER
        .load_at(deps.storage, address.into_string(), time.saturating_sub(window))?
        .unwrap_or_default();
    Ok(VotingPowerAtTimeResponse { power, time })
}

pub fn query_total_power_at_time(
    deps: Deps,
    env: Env,
    time: Option<u64>,
) -> StdResult<TotalPowerAtTimeResponse> {
    let time = time.unwrap_or_else(|| env.block.time.seconds());
    let power = TOTAL_POWER
        .load_at(deps.storage, time)?
        .unwrap_or_default();
    Ok(TotalPowerAtTimeResponse { power, time })
}

pub fn query_vote_weight_window_at(
    deps: Deps,
    env: Env,
    time: Option<u64>,
) -> StdResult<VoteWeightWindowResponse> {
    let time = time.unwrap_or_else(|| env.block.time.seconds());
    let window = WINDOW_LENGTHS
        .load_at(deps.storage, time)?
        .unwrap_or_default();
    Ok(VoteWeightWindowResponse { window, time })
}

pub fn query_stake_account(deps: Deps, address: String) -> StdResult<StakeAccountResponse> {
    let address = deps.api.addr_validate(&address)?;
    let account = STAKE_ACCOUNTS.may_load(deps.storage, &address)?;
    Ok(StakeAccountResponse { account })
}

pub fn query_list_stake_accounts(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<ListStakeAccountsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start_at = start_after
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;

    let accounts = STAKE_ACCOUNTS
        .range(
            deps.storage,
            start_at.as_ref().map(Bound::exclusive),
            None,
            Order::Ascending,
        )
        .map(|item| {
            let (address, account) = item?;
            Ok(StakeAccountEntry {
                address: address.into_string(),
                account,
            })
        })
        .take(limit)
        .collect::<StdResult<Vec<_>>>()?;

    Ok(ListStakeAccountsResponse { accounts })
}

pub fn query_info(deps: Deps) -> StdResult<Binary> {
    let info = cw2::get_contract_version(deps.storage)?;
    to_json_binary(&InfoResponse { info })
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::default())
}
