use cosmwasm_std::Empty;
use cw_multi_test::{Contract, ContractWrapper};

pub fn stake_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        crossgov_stake::contract::execute,
        crossgov_stake::contract::instantiate,
        crossgov_stake::contract::query,
    )
    .with_migrate(crossgov_stake::contract::migrate);
    Box::new(contract)
}

pub fn hub_governor_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        crossgov_hub_governor::contract::execute,
        crossgov_hub_governor::contract::instantiate,
        crossgov_hub_governor::contract::query,
    )
    .with_migrate(crossgov_hub_governor::contract::migrate);
    Box::new(contract)
}

pub fn hub_vote_pool_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        crossgov_hub_vote_pool::contract::execute,
        crossgov_hub_vote_pool::contract::instantiate,
        crossgov_hub_vote_pool::contract::query,
    )
    .with_migrate(crossgov_hub_vote_pool::contract::migrate);
    Box::new(contract)
}

pub fn hub_dispatcher_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        crossgov_hub_dispatcher::contract::execute,
        crossgov_hub_dispatcher::contract::instantiate,
        crossgov_hub_dispatcher::contract::query,
    )
    .with_migrate(crossgov_hub_dispatcher::contract::migrate);
    Box::new(contract)
}

pub fn pre_propose_aggregate_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        crossgov_pre_propose_aggregate::contract::execute,
        crossgov_pre_propose_aggregate::contract::instantiate,
        crossgov_pre_propose_aggregate::contract::query,
    )
    .with_migrate(crossgov_pre_propose_aggregate::contract::migrate);
    Box::new(contract)
}

pub fn spoke_aggregator_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        crossgov_spoke_aggregator::contract::execute,
        crossgov_spoke_aggregator::contract::instantiate,
        crossgov_spoke_aggregator::contract::query,
    )
    .with_migrate(crossgov_spoke_aggregator::contract::migrate);
    Box::new(contract)
}

pub fn spoke_executor_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        crossgov_spoke_executor::contract::execute,
        crossgov_spoke_executor::contract::instantiate,
        crossgov_spoke_executor::contract::query,
    )
    .with_migrate(crossgov_spoke_executor::contract::migrate);
    Box::new(contract)
}

pub fn spoke_airlock_contract() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        crossgov_spoke_airlock::contract::execute,
        crossgov_spoke_airlock::contract::instantiate,
        crossgov_spoke_airlock::contract::query,
    )
    .with_migrate(crossgov_spoke_airlock::contract::migrate);
    Box::new(contract)
}
