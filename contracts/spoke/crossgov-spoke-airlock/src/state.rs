use cosmwasm_schema::cw_serde;
use cosmwasm_std::Addr;
use cw_storage_plus::Item;

#[cw_serde]
pub struct Config {
    /// The only account that may run messages through the airlock.
    pub message_executor: Addr,
}

pub const CONFIG: Item<Config> = Item::new("config");
