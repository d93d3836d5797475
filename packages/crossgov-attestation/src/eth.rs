//! Typed codecs for the EVM call query family. Block times ride the wire in
//! microseconds; integers are big endian; strings and byte blobs carry a u32
//! length header.

use crate::bytes::{write_len_prefixed, write_string, Reader};
use crate::error::AttestationError;
use crate::response::{PerChainQueryRequest, PerChainQueryResponse, QueryType};

/// One `eth_call` target and its ABI-encoded calldata.
#[derive(Clone, Debug, PartialEq)]
pub struct EthCallData {
    pub to: [u8; 20],
    pub data: Vec<u8>,
}

fn encode_calls(out: &mut Vec<u8>, calls: &[EthCallData]) {
    out.push(calls.len() as u8);
    for call in calls {
        out.extend_from_slice(&call.to);
        write_len_prefixed(out, &call.data);
    }
}

fn decode_calls(reader: &mut Reader) -> Result<Vec<EthCallData>, AttestationError> {
    let count = reader.read_u8()? as usize;
    let mut calls = Vec::with_capacity(count);
    for _ in 0..count {
        let to = reader.read_array::<20>()?;
        let data = reader.read_len_prefixed()?.to_vec();
        calls.push(EthCallData { to, data });
    }
    Ok(calls)
}

fn decode_results(reader: &mut Reader) -> Result<Vec<Vec<u8>>, AttestationError> {
    let count = reader.read_u8()? as usize;
    let mut results = Vec::with_capacity(count);
    for _ in 0..count {
        results.push(reader.read_len_prefixed()?.to_vec());
    }
    Ok(results)
}

fn encode_results(out: &mut Vec<u8>, results: &[Vec<u8>]) {
    out.push(results.len() as u8);
    for result in results {
        write_len_prefixed(out, result);
    }
}

fn check_type(got: QueryType, expected: QueryType) -> Result<(), AttestationError> {
    if got != expected {
        return Err(AttestationError::WrongQueryType {
            expected: expected.as_u8(),
            got: got.as_u8(),
        });
    }
    Ok(())
}

fn check_consumed(reader: Reader) -> Result<(), AttestationError> {
    if !reader.is_empty() {
        return Err(AttestationError::InvalidPayloadLength(reader.remaining()));
    }
    Ok(())
}

/// Calls against a single block, named by number or hash.
#[derive(Clone, Debug, PartialEq)]
pub struct EthCallQueryRequest {
    pub block_id: String,
    pub calls: Vec<EthCallData>,
}

impl EthCallQueryRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = vec![];
        write_string(&mut out, &self.block_id);
        encode_calls(&mut out, &self.calls);
        out
    }

    pub fn per_chain(&self, chain_id: u16) -> PerChainQueryRequest {
        PerChainQueryRequest {
            chain_id,
            query_type: QueryType::EthCall,
            payload: self.encode(),
        }
    }

    pub fn decode(request: &PerChainQueryRequest) -> Result<Self, AttestationError> {
        check_type(request.query_type, QueryType::EthCall)?;
        let mut reader = Reader::new(&request.payload);
        let block_id = reader.read_string()?;
        let calls = decode_calls(&mut reader)?;
        check_consumed(reader)?;
        Ok(EthCallQueryRequest { block_id, calls })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EthCallQueryResponse {
    pub block_number: u64,
    pub block_hash: [u8; 32],
    pub block_time_us: u64,
    pub results: Vec<Vec<u8>>,
}

impl EthCallQueryResponse {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = vec![];
        out.extend_from_slice(&self.block_number.to_be_bytes());
        out.extend_from_slice(&self.block_hash);
        out.extend_from_slice(&self.block_time_us.to_be_bytes());
        encode_results(&mut out, &self.results);
        out
    }

    pub fn per_chain(&self, chain_id: u16) -> PerChainQueryResponse {
        PerChainQueryResponse {
            chain_id,
            query_type: QueryType::EthCall,
            payload: self.encode(),
        }
    }

    pub fn decode(response: &PerChainQueryResponse) -> Result<Self, AttestationError> {
        check_type(response.query_type, QueryType::EthCall)?;
        let mut reader = Reader::new(&response.payload);
        let block_number = reader.read_u64()?;
        let block_hash = reader.read_array()?;
        let block_time_us = reader.read_u64()?;
        let results = decode_results(&mut reader)?;
        check_consumed(reader)?;
        Ok(EthCallQueryResponse {
            block_number,
            block_hash,
            block_time_us,
            results,
        })
    }
}

/// Calls pinned to the last block at or before a target timestamp. The
/// response proves the pin by also naming the block that follows it.
#[derive(Clone, Debug, PartialEq)]
pub struct EthCallByTimestampQueryRequest {
    pub target_time_us: u64,
    pub target_block_id_hint: String,
    pub following_block_id_hint: String,
    pub calls: Vec<EthCallData>,
}

impl EthCallByTimestampQueryRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = vec![];
        out.extend_from_slice(&self.target_time_us.to_be_bytes());
        write_string(&mut out, &self.target_block_id_hint);
        write_string(&mut out, &self.following_block_id_hint);
        encode_calls(&mut out, &self.calls);
        out
    }

    pub fn per_chain(&self, chain_id: u16) -> PerChainQueryRequest {
        PerChainQueryRequest {
            chain_id,
            query_type: QueryType::EthCallByTimestamp,
            payload: self.encode(),
        }
    }

    pub fn decode(request: &PerChainQueryRequest) -> Result<Self, AttestationError> {
        check_type(request.query_type, QueryType::EthCallByTimestamp)?;
        let mut reader = Reader::new(&request.payload);
        let target_time_us = reader.read_u64()?;
        let target_block_id_hint = reader.read_string()?;
        let following_block_id_hint = reader.read_string()?;
        let calls = decode_calls(&mut reader)?;
        check_consumed(reader)?;
        Ok(EthCallByTimestampQueryRequest {
            target_time_us,
            target_block_id_hint,
            following_block_id_hint,
            calls,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EthCallByTimestampQueryResponse {
    pub target_block_number: u64,
    pub target_block_hash: [u8; 32],
    pub target_block_time_us: u64,
    pub following_block_number: u64,
    pub following_block_hash: [u8; 32],
    pub following_block_time_us: u64,
    pub results: Vec<Vec<u8>>,
}

impl EthCallByTimestampQueryResponse {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = vec![];
        out.extend_from_slice(&self.target_block_number.to_be_bytes());
        out.extend_from_slice(&self.target_block_hash);
        out.extend_from_slice(&self.target_block_time_us.to_be_bytes());
        out.extend_from_slice(&self.following_block_number.to_be_bytes());
        out.extend_from_slice(&self.following_block_hash);
        out.extend_from_slice(&self.following_block_time_us.to_be_bytes());
        encode_results(&mut out, &self.results);
        out
    }

    pub fn per_chain(&self, chain_id: u16) -> PerChainQueryResponse {
        PerChainQueryResponse {
            chain_id,
            query_type: QueryType::EthCallByTimestamp,
            payload: self.encode(),
        }
    }

    pub fn decode(response: &PerChainQueryResponse) -> Result<Self, AttestationError> {
        check_type(response.query_type, QueryType::EthCallByTimestamp)?;
        let mut reader = Reader::new(&response.payload);
        let target_block_number = reader.read_u64()?;
        let target_block_hash = reader.read_array()?;
        let target_block_time_us = reader.read_u64()?;
        let following_block_number = reader.read_u64()?;
        let following_block_hash = reader.read_array()?;
        let following_block_time_us = reader.read_u64()?;
        let results = decode_results(&mut reader)?;
        check_consumed(reader)?;
        Ok(EthCallByTimestampQueryResponse {
            target_block_number,
            target_block_hash,
            target_block_time_us,
            following_block_number,
            following_block_hash,
            following_block_time_us,
            results,
        })
    }
}

/// Calls that only settle once the named block reaches a finality grade.
#[derive(Clone, Debug, PartialEq)]
pub struct EthCallWithFinalityQueryRequest {
    pub block_id: String,
    /// `"finalized"` or `"safe"`.
    pub finality: String,
    pub calls: Vec<EthCallData>,
}

impl EthCallWithFinalityQueryRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = vec![];
        write_string(&mut out, &self.block_id);
        write_string(&mut out, &self.finality);
        encode_calls(&mut out, &self.calls);
        out
    }

    pub fn per_chain(&self, chain_id: u16) -> PerChainQueryRequest {
        PerChainQueryRequest {
            chain_id,
            query_type: QueryType::EthCallWithFinality,
            payload: self.encode(),
        }
    }

    pub fn decode(request: &PerChainQueryRequest) -> Result<Self, AttestationError> {
        check_type(request.query_type, QueryType::EthCallWithFinality)?;
        let mut reader = Reader::new(&request.payload);
        let block_id = reader.read_string()?;
        let finality = reader.read_string()?;
        let calls = decode_calls(&mut reader)?;
        check_consumed(reader)?;
        Ok(EthCallWithFinalityQueryRequest {
            block_id,
            finality,
            calls,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EthCallWithFinalityQueryResponse {
    pub block_number: u64,
    pub block_hash: [u8; 32],
    pub block_time_us: u64,
    pub results: Vec<Vec<u8>>,
}

impl EthCallWithFinalityQueryResponse {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = vec![];
        out.extend_from_slice(&self.block_number.to_be_bytes());
        out.extend_from_slice(&self.block_hash);
        out.extend_from_slice(&self.block_time_us.to_be_bytes());
        encode_results(&mut out, &self.results);
        out
    }

    pub fn per_chain(&self, chain_id: u16) -> PerChainQueryResponse {
        PerChainQueryResponse {
            chain_id,
            query_type: QueryType::EthCallWithFinality,
            payload: self.encode(),
        }
    }

    pub fn decode(response: &PerChainQueryResponse) -> Result<Self, AttestationError> {
        check_type(response.query_type, QueryType::EthCallWithFinality)?;
        let mut reader = Reader::new(&response.payload);
        let block_number = reader.read_u64()?;
        let block_hash = reader.read_array()?;
        let block_time_us = reader.read_u64()?;
        let results = decode_results(&mut reader)?;
        check_consumed(reader)?;
        Ok(EthCallWithFinalityQueryResponse {
            block_number,
            block_hash,
            block_time_us,
            results,
        })
    }
}
