use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

use crossgov_attestation::AttestationError;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error(transparent)]
    Attestation(#[from] AttestationError),

    #[error(transparent)]
    Ownership(#[from] cw_ownable::OwnershipError),

    #[error(transparent)]
    Payment(#[from] cw_utils::PaymentError),

    #[error("No spoke aggregator is registered for chain {chain_id}")]
    UnregisteredSpoke { chain_id: u16 },

    #[error("Spoke aggregators are 20 byte call targets")]
    InvalidSpokeAddress {},

    #[error("Balance reads must arrive as timestamped call queries, got query type {query_type}")]
    WrongQueryType { query_type: u8 },

    #[error("Balance-read calldata must be a selector, an account word, and a timepoint word")]
    InvalidCallDataLength {},

    #[error("Attested reads must query the sender's own account")]
    InvalidCaller {},

    #[error("All reads in a submission must share one target timestamp")]
    TimestampMismatch {},

    #[error("Read pinned at {got} is ahead of the block time {now}")]
    InvalidTimestamp { got: u64, now: u64 },

    #[error("Balance record is {got} bytes, expected one 32 byte word")]
    InvalidBalanceRecord { got: usize },

    #[error("Attested balance does not fit in 128 bits")]
    WeightOverflow {},

    #[error("Aggregated weight {weight} is below the proposal threshold {threshold}")]
    InsufficientVoteWeight { weight: Uint128, threshold: Uint128 },
}
