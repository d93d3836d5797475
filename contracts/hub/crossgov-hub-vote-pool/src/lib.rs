pub mod contract;
mod error;
pub mod msg;
pub mod state;
pub mod tally;

#[cfg(test)]
mod tests;

pub use crate::error::ContractError;
