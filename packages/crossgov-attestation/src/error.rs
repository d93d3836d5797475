use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AttestationError {
    #[error("input truncated at offset {offset}, wanted {wanted} more bytes")]
    UnexpectedEndOfInput { offset: usize, wanted: usize },

    #[error("{0} unread bytes after the final payload field")]
    InvalidPayloadLength(usize),

    #[error("envelope declares {declared} bytes but {consumed} were consumed")]
    LengthMismatch { declared: usize, consumed: usize },

    #[error("string field is not valid utf-8")]
    InvalidUtf8,

    #[error("cannot widen a {0}-byte address to the 32-byte universal form")]
    AddressTooLong(usize),

    #[error("unsupported response version {0}")]
    InvalidResponseVersion(u8),

    #[error("embedded request version {request} does not match response version {response}")]
    VersionMismatch { response: u8, request: u8 },

    #[error("response carries no per-chain queries")]
    ZeroQueries,

    #[error("request carries {requests} per-chain queries, response carries {responses}")]
    NumberOfResponsesMismatch { requests: usize, responses: usize },

    #[error("request chain id {request} does not match response chain id {response}")]
    ChainIdMismatch { request: u16, response: u16 },

    #[error("request query type {request} does not match response query type {response}")]
    RequestTypeMismatch { request: u8, response: u8 },

    #[error("unsupported query type {0}")]
    UnsupportedQueryType(u8),

    #[error("expected query type {expected}, got {got}")]
    WrongQueryType { expected: u8, got: u8 },

    #[error("expected {expected} call results, got {got}")]
    UnexpectedNumberOfResults { expected: usize, got: usize },

    #[error("guardian set has no members")]
    EmptyGuardianSet,

    #[error("guardian address must be 20 bytes, got {0}")]
    InvalidGuardianAddress(usize),

    #[error("guardian signature record must be 66 bytes, got {0}")]
    InvalidSignatureLength(usize),

    #[error("malformed signature from guardian index {0}")]
    InvalidSignature(u8),

    #[error("guardian index {0} repeated or out of order")]
    WrongGuardianIndexOrder(u8),

    #[error("guardian index {index} out of range for a set of {size}")]
    GuardianIndexOutOfRange { index: u8, size: usize },

    #[error("signature from guardian index {0} does not recover the registered guardian")]
    GuardianSignatureMismatch(u8),

    #[error("{got} guardian signatures, quorum is {quorum}")]
    NoQuorum { got: usize, quorum: usize },

    #[error("guardian set expired at {expiration}")]
    GuardianSetExpired { expiration: u64 },

    #[error("attested block number {got} is behind the required floor {floor}")]
    StaleBlockNum { got: u64, floor: u64 },

    #[error("attested block time {got}us is behind the required floor {floor}us")]
    StaleBlockTime { got: u64, floor: u64 },

    #[error("call target {0} is not a registered contract")]
    InvalidContractAddress(String),

    #[error("call selector {0} is not a registered function")]
    InvalidFunctionSignature(String),

    #[error("unsupported bridge message version {0}")]
    InvalidVaaVersion(u8),
}
