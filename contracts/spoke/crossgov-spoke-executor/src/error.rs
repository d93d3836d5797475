use cosmwasm_std::StdError;
use thiserror::Error;

use crossgov_attestation::AttestationError;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error(transparent)]
    Std(#[from] StdError),

    #[error(transparent)]
    Attestation(#[from] AttestationError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("The hub dispatcher is a 32 byte emitter address")]
    InvalidDispatcherAddress {},

    #[error("Only messages emitted by the hub dispatcher are executed")]
    UnknownEmitter {},

    #[error("This message has already been executed")]
    AlreadyProcessedMessage {},

    #[error("Message targets chain {target_chain}, not this spoke")]
    WrongTargetChain { target_chain: u16 },
}
