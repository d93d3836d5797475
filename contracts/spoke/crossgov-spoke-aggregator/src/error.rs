use cosmwasm_std::StdError;
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

    #[error("Hub proposal metadata is a 20 byte call target")]
    InvalidMetadataSource {},

    #[error("Metadata reads must be attested from the hub chain, got chain {chain_id}")]
    InvalidChainId { chain_id: u16 },

    #[error("Metadata reads must be attested at \"finalized\", got ({0})")]
    NotFinalized(String),

    #[error("Metadata calldata must be a selector and a 32 byte proposal id")]
    InvalidMetadataCalldata {},

    #[error("Metadata record is {got} bytes, expected {expected}")]
    InvalidMetadataLength { got: usize, expected: usize },

    #[error("Metadata record names a different proposal than the read requested")]
    ProposalIdMismatch {},

    #[error("Metadata record names a different metadata contract")]
    MetadataSourceMismatch {},

    #[error("The hub has not opened voting on this proposal")]
    ProposalNotInitialized {},

    #[error("A proposal with this id is already mirrored")]
    ProposalAlreadyExists {},

    #[error("No proposal with id ({id})")]
    NoSuchProposal { id: String },

    #[error("Ballots are only accepted between a proposal's vote start and the end of its safe window")]
    ProposalInactive {},

    #[error("No voting power at the proposal's vote start")]
    NoWeight {},

    #[error("Already voted on this proposal. New ballots may not change an existing vote")]
    AlreadyVoted {},
}
