use cosmwasm_std::{StdError, Uint128};
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

    #[error("No proposal with id ({id})")]
    NoSuchProposal { id: String },

    #[error("A proposal with this payload already exists")]
    ProposalAlreadyExists {},

    #[error("The proposal creation policy names a different proposer")]
    InvalidProposer {},

    #[error("Proposer power ({power}) is below the proposal threshold ({threshold})")]
    BelowProposalThreshold { power: Uint128, threshold: Uint128 },

    #[error("Proposal is larger than the maximum size ({size} > {max})")]
    ProposalTooLarge { size: u64, max: u64 },

    #[error("The voting period must be non-zero")]
    ZeroVotingPeriod {},

    #[error("Proposal is not in a voteable state ({status})")]
    ProposalNotActive { status: String },

    #[error("Already voted on this proposal. New ballots may not change an existing vote")]
    AlreadyVoted {},

    #[error("No voting power at the proposal's snapshot")]
    NoWeight {},

    #[error("The proposal's deadline has already been extended")]
    AlreadyExtended {},

    #[error("Proposal is in the {status} state and may not make this transition")]
    WrongStatus { status: String },

    #[error("The timelock matures at {eta}. The proposal may not execute before then")]
    TimelockNotMatured { eta: u64 },

    #[error("Submitted messages and description do not hash to the proposal id")]
    PayloadHashMismatch {},
}
