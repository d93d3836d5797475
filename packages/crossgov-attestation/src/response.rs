//! The signed query response envelope and the request echoed inside it.
//!
//! A response carries the full request it answers. Consumers therefore never
//! trust a response row on its own: the envelope parser zips every per-chain
//! response against the matching per-chain request and rejects any skew in
//! count, chain id, or query type before a caller sees the payloads.

use crate::bytes::{write_len_prefixed, Reader};
use crate::error::AttestationError;
use crate::guardians::{GuardianSet, GuardianSignature};
use crate::verify::{response_digest, verify_signatures};

pub const RESPONSE_VERSION: u8 = 1;

/// Sender chain id marking a request submitted directly to the guardians
/// rather than through an on-chain emitter.
pub const OFF_CHAIN_SENDER: u16 = 0;

/// Off-chain requests are identified by the requester's 65-byte signature.
pub const OFF_CHAIN_REQUEST_ID_LEN: usize = 65;
/// On-chain requests are identified by a 32-byte message hash.
pub const ON_CHAIN_REQUEST_ID_LEN: usize = 32;

/// Wire identifiers for the per-chain query kinds guardians attest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryType {
    EthCall = 1,
    EthCallByTimestamp = 2,
    EthCallWithFinality = 3,
    SolanaAccount = 4,
    SolanaPda = 5,
}

impl QueryType {
    pub fn from_u8(value: u8) -> Result<Self, AttestationError> {
        match value {
            1 => Ok(QueryType::EthCall),
            2 => Ok(QueryType::EthCallByTimestamp),
            3 => Ok(QueryType::EthCallWithFinality),
            4 => Ok(QueryType::SolanaAccount),
            5 => Ok(QueryType::SolanaPda),
            other => Err(AttestationError::UnsupportedQueryType(other)),
        }
    }

    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// One chain's slice of a query request. The payload layout depends on
/// `query_type` and is decoded by the typed codecs.
#[derive(Clone, Debug, PartialEq)]
pub struct PerChainQueryRequest {
    pub chain_id: u16,
    pub query_type: QueryType,
    pub payload: Vec<u8>,
}

/// One chain's slice of a query response.
#[derive(Clone, Debug, PartialEq)]
pub struct PerChainQueryResponse {
    pub chain_id: u16,
    pub query_type: QueryType,
    pub payload: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QueryRequest {
    pub version: u8,
    pub nonce: u32,
    pub requests: Vec<PerChainQueryRequest>,
}

impl QueryRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = vec![self.version];
        out.extend_from_slice(&self.nonce.to_be_bytes());
        out.push(self.requests.len() as u8);
        for request in &self.requests {
            out.extend_from_slice(&request.chain_id.to_be_bytes());
            out.push(request.query_type.as_u8());
            write_len_prefixed(&mut out, &request.payload);
        }
        out
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QueryResponse {
    pub version: u8,
    /// Chain the request came from, [`OFF_CHAIN_SENDER`] for off-chain.
    pub request_chain_id: u16,
    pub request_id: Vec<u8>,
    pub request: QueryRequest,
    pub responses: Vec<PerChainQueryResponse>,
}

impl QueryResponse {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = vec![self.version];
        out.extend_from_slice(&self.request_chain_id.to_be_bytes());
        out.extend_from_slice(&self.request_id);
        write_len_prefixed(&mut out, &self.request.encode());
        out.push(self.responses.len() as u8);
        for response in &self.responses {
            out.extend_from_slice(&response.chain_id.to_be_bytes());
            out.push(response.query_type.as_u8());
            write_len_prefixed(&mut out, &response.payload);
        }
        out
    }
}

/// Verifies guardian signatures over `bytes`, then parses the envelope.
pub fn parse_and_verify_query_response(
    bytes: &[u8],
    signatures: &[GuardianSignature],
    guardian_set: &GuardianSet,
    now: u64,
) -> Result<QueryResponse, AttestationError> {
    let digest = response_digest(bytes);
    verify_signatures(&digest, signatures, guardian_set, now)?;
    parse_query_response(bytes)
}

/// Parses a response envelope without checking signatures.
pub fn parse_query_response(bytes: &[u8]) -> Result<QueryResponse, AttestationError> {
    let mut reader = Reader::new(bytes);

    let version = reader.read_u8()?;
    if version != RESPONSE_VERSION {
        return Err(AttestationError::InvalidResponseVersion(version));
    }

    let request_chain_id = reader.read_u16()?;
    let request_id_len = if request_chain_id == OFF_CHAIN_SENDER {
        OFF_CHAIN_REQUEST_ID_LEN
    } else {
        ON_CHAIN_REQUEST_ID_LEN
    };
    let request_id = reader.read_bytes(request_id_len)?.to_vec();

    let request = parse_query_request(reader.read_len_prefixed()?)?;
    if request.version != version {
        return Err(AttestationError::VersionMismatch {
            response: version,
            request: request.version,
        });
    }

    let count = reader.read_u8()? as usize;
    let mut responses = Vec::with_capacity(count);
    for _ in 0..count {
        let chain_id = reader.read_u16()?;
        let query_type = QueryType::from_u8(reader.read_u8()?)?;
        let payload = reader.read_len_prefixed()?.to_vec();
        responses.push(PerChainQueryResponse {
            chain_id,
            query_type,
            payload,
        });
    }
    reader.finish()?;

    if responses.is_empty() || request.requests.is_empty() {
        return Err(AttestationError::ZeroQueries);
    }
    if request.requests.len() != responses.len() {
        return Err(AttestationError::NumberOfResponsesMismatch {
            requests: request.requests.len(),
            responses: responses.len(),
        });
    }
    for (req, resp) in request.requests.iter().zip(&responses) {
        if req.chain_id != resp.chain_id {
            return Err(AttestationError::ChainIdMismatch {
                request: req.chain_id,
                response: resp.chain_id,
            });
        }
        if req.query_type != resp.query_type {
            return Err(AttestationError::RequestTypeMismatch {
                request: req.query_type.as_u8(),
                response: resp.query_type.as_u8(),
            });
        }
    }

    Ok(QueryResponse {
        version,
        request_chain_id,
        request_id,
        request,
        responses,
    })
}

pub fn parse_query_request(bytes: &[u8]) -> Result<QueryRequest, AttestationError> {
    let mut reader = Reader::new(bytes);

    let version = reader.read_u8()?;
    let nonce = reader.read_u32()?;

    let count = reader.read_u8()? as usize;
    let mut requests = Vec::with_capacity(count);
    for _ in 0..count {
        let chain_id = reader.read_u16()?;
        let query_type = QueryType::from_u8(reader.read_u8()?)?;
        let payload = reader.read_len_prefixed()?.to_vec();
        requests.push(PerChainQueryRequest {
            chain_id,
            query_type,
            payload,
        });
    }
    reader.finish()?;

    Ok(QueryRequest {
        version,
        nonce,
        requests,
    })
}
