//! Typed codecs for the Solana account and PDA query family.

use crate::bytes::{write_len_prefixed, write_string, Reader};
use crate::error::AttestationError;
use crate::response::{PerChainQueryRequest, PerChainQueryResponse, QueryType};

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

#[derive(Clone, Debug, PartialEq)]
pub struct SolanaAccountQueryRequest {
    /// Only `"finalized"` is served by guardians today.
    pub commitment: String,
    /// Zero to accept any slot.
    pub min_context_slot: u64,
    /// Zero offset and length request the whole account body.
    pub data_slice_offset: u64,
    pub data_slice_length: u64,
    pub accounts: Vec<[u8; 32]>,
}

impl SolanaAccountQueryRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = vec![];
        write_string(&mut out, &self.commitment);
        out.extend_from_slice(&self.min_context_slot.to_be_bytes());
        out.extend_from_slice(&self.data_slice_offset.to_be_bytes());
        out.extend_from_slice(&self.data_slice_length.to_be_bytes());
        out.push(self.accounts.len() as u8);
        for account in &self.accounts {
            out.extend_from_slice(account);
        }
        out
    }

    pub fn per_chain(&self, chain_id: u16) -> PerChainQueryRequest {
        PerChainQueryRequest {
            chain_id,
            query_type: QueryType::SolanaAccount,
            payload: self.encode(),
        }
    }

    pub fn decode(request: &PerChainQueryRequest) -> Result<Self, AttestationError> {
        check_type(request.query_type, QueryType::SolanaAccount)?;
        let mut reader = Reader::new(&request.payload);
        let commitment = reader.read_string()?;
        let min_context_slot = reader.read_u64()?;
        let data_slice_offset = reader.read_u64()?;
        let data_slice_length = reader.read_u64()?;
        let count = reader.read_u8()? as usize;
        let mut accounts = Vec::with_capacity(count);
        for _ in 0..count {
            accounts.push(reader.read_array()?);
        }
        check_consumed(reader)?;
        Ok(SolanaAccountQueryRequest {
            commitment,
            min_context_slot,
            data_slice_offset,
            data_slice_length,
            accounts,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SolanaAccountResult {
    pub lamports: u64,
    pub rent_epoch: u64,
    pub executable: bool,
    pub owner: [u8; 32],
    pub data: Vec<u8>,
}

fn encode_account_result(out: &mut Vec<u8>, result: &SolanaAccountResult) {
    out.extend_from_slice(&result.lamports.to_be_bytes());
    out.extend_from_slice(&result.rent_epoch.to_be_bytes());
    out.push(u8::from(result.executable));
    out.extend_from_slice(&result.owner);
    write_len_prefixed(out, &result.data);
}

fn decode_account_result(reader: &mut Reader) -> Result<SolanaAccountResult, AttestationError> {
    let lamports = reader.read_u64()?;
    let rent_epoch = reader.read_u64()?;
    let executable = reader.read_u8()? != 0;
    let owner = reader.read_array()?;
    let data = reader.read_len_prefixed()?.to_vec();
    Ok(SolanaAccountResult {
        lamports,
        rent_epoch,
        executable,
        owner,
        data,
    })
}

#[derive(Clone, Debug, PartialEq)]
pub struct SolanaAccountQueryResponse {
    pub slot_number: u64,
    pub block_time_us: u64,
    pub block_hash: [u8; 32],
    pub results: Vec<SolanaAccountResult>,
}

impl SolanaAccountQueryResponse {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = vec![];
        out.extend_from_slice(&self.slot_number.to_be_bytes());
        out.extend_from_slice(&self.block_time_us.to_be_bytes());
        out.extend_from_slice(&self.block_hash);
        out.push(self.results.len() as u8);
        for result in &self.results {
            encode_account_result(&mut out, result);
        }
        out
    }

    pub fn per_chain(&self, chain_id: u16) -> PerChainQueryResponse {
        PerChainQueryResponse {
            chain_id,
            query_type: QueryType::SolanaAccount,
            payload: self.encode(),
        }
    }

    pub fn decode(response: &PerChainQueryResponse) -> Result<Self, AttestationError> {
        check_type(response.query_type, QueryType::SolanaAccount)?;
        let mut reader = Reader::new(&response.payload);
        let slot_number = reader.read_u64()?;
        let block_time_us = reader.read_u64()?;
        let block_hash = reader.read_array()?;
        let count = reader.read_u8()? as usize;
        let mut results = Vec::with_capacity(count);
        for _ in 0..count {
            results.push(decode_account_result(&mut reader)?);
        }
        check_consumed(reader)?;
        Ok(SolanaAccountQueryResponse {
            slot_number,
            block_time_us,
            block_hash,
            results,
        })
    }
}

/// A program address plus the seeds deriving the queried account.
#[derive(Clone, Debug, PartialEq)]
pub struct SolanaPda {
    pub program_address: [u8; 32],
    pub seeds: Vec<Vec<u8>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SolanaPdaQueryRequest {
    pub commitment: String,
    pub min_context_slot: u64,
    pub data_slice_offset: u64,
    pub data_slice_length: u64,
    pub pdas: Vec<SolanaPda>,
}

impl SolanaPdaQueryRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = vec![];
        write_string(&mut out, &self.commitment);
        out.extend_from_slice(&self.min_context_slot.to_be_bytes());
        out.extend_from_slice(&self.data_slice_offset.to_be_bytes());
        out.extend_from_slice(&self.data_slice_length.to_be_bytes());
        out.push(self.pdas.len() as u8);
        for pda in &self.pdas {
            out.extend_from_slice(&pda.program_address);
            out.push(pda.seeds.len() as u8);
            for seed in &pda.seeds {
                write_len_prefixed(&mut out, seed);
            }
        }
        out
    }

    pub fn per_chain(&self, chain_id: u16) -> PerChainQueryRequest {
        PerChainQueryRequest {
            chain_id,
            query_type: QueryType::SolanaPda,
            payload: self.encode(),
        }
    }

    pub fn decode(request: &PerChainQueryRequest) -> Result<Self, AttestationError> {
        check_type(request.query_type, QueryType::SolanaPda)?;
        let mut reader = Reader::new(&request.payload);
        let commitment = reader.read_string()?;
        let min_context_slot = reader.read_u64()?;
        let data_slice_offset = reader.read_u64()?;
        let data_slice_length = reader.read_u64()?;
        let count = reader.read_u8()? as usize;
        let mut pdas = Vec::with_capacity(count);
        for _ in 0..count {
            let program_address = reader.read_array()?;
            let seed_count = reader.read_u8()? as usize;
            let mut seeds = Vec::with_capacity(seed_count);
            for _ in 0..seed_count {
                seeds.push(reader.read_len_prefixed()?.to_vec());
            }
            pdas.push(SolanaPda {
                program_address,
                seeds,
            });
        }
        check_consumed(reader)?;
        Ok(SolanaPdaQueryRequest {
            commitment,
            min_context_slot,
            data_slice_offset,
            data_slice_length,
            pdas,
        })
    }
}

/// A PDA result names the derived account and bump in front of the account
/// fields so consumers can bind the row back to the request entry.
#[derive(Clone, Debug, PartialEq)]
pub struct SolanaPdaResult {
    pub account: [u8; 32],
    pub bump: u8,
    pub lamports: u64,
    pub rent_epoch: u64,
    pub executable: bool,
    pub owner: [u8; 32],
    pub data: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SolanaPdaQueryResponse {
    pub slot_number: u64,
    pub block_time_us: u64,
    pub block_hash: [u8; 32],
    pub results: Vec<SolanaPdaResult>,
}

impl SolanaPdaQueryResponse {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = vec![];
        out.extend_from_slice(&self.slot_number.to_be_bytes());
        out.extend_from_slice(&self.block_time_us.to_be_bytes());
        out.extend_from_slice(&self.block_hash);
        out.push(self.results.len() as u8);
        for result in &self.results {
            out.extend_from_slice(&result.account);
            out.push(result.bump);
            out.extend_from_slice(&result.lamports.to_be_bytes());
            out.extend_from_slice(&result.rent_epoch.to_be_bytes());
            out.push(u8::from(result.executable));
            out.extend_from_slice(&result.owner);
            write_len_prefixed(&mut out, &result.data);
        }
        out
    }

    pub fn per_chain(&self, chain_id: u16) -> PerChainQueryResponse {
        PerChainQueryResponse {
            chain_id,
            query_type: QueryType::SolanaPda,
            payload: self.encode(),
        }
    }

    pub fn decode(response: &PerChainQueryResponse) -> Result<Self, AttestationError> {
        check_type(response.query_type, QueryType::SolanaPda)?;
        let mut reader = Reader::new(&response.payload);
        let slot_number = reader.read_u64()?;
        let block_time_us = reader.read_u64()?;
        let block_hash = reader.read_array()?;
        let count = reader.read_u8()? as usize;
        let mut results = Vec::with_capacity(count);
        for _ in 0..count {
            let account = reader.read_array()?;
            let bump = reader.read_u8()?;
            let lamports = reader.read_u64()?;
            let rent_epoch = reader.read_u64()?;
            let executable = reader.read_u8()? != 0;
            let owner = reader.read_array()?;
            let data = reader.read_len_prefixed()?.to_vec();
            results.push(SolanaPdaResult {
                account,
                bump,
                lamports,
                rent_epoch,
                executable,
                owner,
                data,
            });
        }
        check_consumed(reader)?;
        Ok(SolanaPdaQueryResponse {
            slot_number,
            block_time_us,
            block_hash,
            results,
        })
    }
}
