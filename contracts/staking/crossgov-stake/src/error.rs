use cosmwasm_std::StdError;
use cw_utils::PaymentError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error(transparent)]
    Checkpoint(#[from] cw_checkpoint::CheckpointError),

    #[error(transparent)]
    Ownership(#[from] cw_ownable::OwnershipError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Amount being unstaked must be non-zero")]
    ZeroUnstake {},

    #[error("Can only unstake up to the liquid amount staked. Vesting balances are not withdrawable")]
    InvalidUnstakeAmount {},

    #[error("Account already delegates to {delegate}")]
    AlreadyDelegated { delegate: String },

    #[error("Vote weight window may be at most {max} seconds, got {got}")]
    WindowTooLong { max: u64, got: u64 },
}
