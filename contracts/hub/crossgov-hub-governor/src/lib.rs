pub mod contract;
mod error;
pub mod msg;
pub mod proposal;
pub mod state;


pub use crate::error::ContractError;
