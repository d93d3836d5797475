use cosmwasm_std::StdError;
use cw_utils::PaymentError;
use thiserror::Error;

use crossgov_attestation::AttestationError;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error(transparent)]
    Attestation(#[from] AttestationError),

    #[error(transparent)]
    Checkpoint(#[from] cw_checkpoint::CheckpointError),

    #[error(transparent)]
    Ownership(#[from] cw_ownable::OwnershipError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error("No decoder is enabled for query type ({query_type})")]
    UnsupportedQueryType { query_type: u8 },

    #[error("Chain {chain_id} has no spoke registered at the attested time")]
    UnknownSpoke { chain_id: u16 },

    #[error("Spoke identities are 32-byte universal addresses")]
    InvalidSpokeIdentity {},

    #[error("Tally read calldata must be a 4-byte selector followed by a 32-byte proposal id")]
    InvalidTallyCalldata {},

    #[error("Tally record is {got} bytes, expected {expected}")]
    InvalidTallyLength { got: usize, expected: usize },

    #[error("Tally record names a different proposal than the read requested")]
    ProposalIdMismatch {},

    #[error("Attested vote count does not fit in 128 bits")]
    VoteOverflow {},

    #[error("Tally reads must be attested at \"finalized\", got ({0})")]
    NotFinalized(String),

    #[error("Reported tally does not extend the last merged observation")]
    InvalidProposalVote {},
}
