//! Decoders turning attested per-chain query responses into tally
//! observations. Every decoder resolves the spoke registered at the
//! response's attested time, never the present one, so a spoke
//! registered today cannot retroactively validate an old read.

use cosmwasm_std::{HexBinary, Storage, Uint128};

use crossgov_attestation::bytes::Reader;
use crossgov_attestation::eth::{
    EthCallByTimestampQueryRequest, EthCallByTimestampQueryResponse, EthCallData,
    EthCallQueryRequest, EthCallQueryResponse, EthCallWithFinalityQueryRequest,
    EthCallWithFinalityQueryResponse,
};
use crossgov_attestation::response::{PerChainQueryRequest, PerChainQueryResponse, QueryType};
use crossgov_attestation::solana::{
    SolanaAccountQueryRequest, SolanaAccountQueryResponse, SolanaPdaQueryRequest,
    SolanaPdaQueryResponse,
};
use crossgov_attestation::validate::{validate_eth_call_data, validate_result_count};

use crossgov_voting::voting::Votes;

use crate::error::ContractError;
use crate::state::SPOKE_REGISTRY;

/// Selector of `proposalVotes(uint256)`, the running-tally read spoke
/// vote aggregators expose.
pub const TALLY_SELECTOR: [u8; 4] = [0x54, 0x4f, 0xfc, 0x9c];

/// A tally-read call is the selector followed by the 32-byte proposal id.
pub const TALLY_CALLDATA_LEN: usize = 36;

/// An EVM tally record: the proposal id and three ABI words of counts.
pub const ETH_TALLY_RECORD_LEN: usize = 128;

/// A Solana tally record: the proposal id and three little-endian u64
/// counts.
pub const SOLANA_TALLY_RECORD_LEN: usize = 56;

/// One spoke's tally for one proposal as the guardians attested it.
#[derive(Clone, Debug, PartialEq)]
pub struct SpokeTallyRead {
    pub proposal_id: HexBinary,
    pub votes: Votes,
    /// Unix seconds of the attested block the tally was read at.
    pub reference_time: u64,
}

/// Decodes one per-chain slice of a verified query response. The caller
/// has already matched the request to the response and checked the query
/// type is enabled.
pub fn decode_spoke_tally(
    storage: &dyn Storage,
    request: &PerChainQueryRequest,
    response: &PerChainQueryResponse,
) -> Result<SpokeTallyRead, ContractError> {
    let chain_id = response.chain_id;
    match response.query_type {
        QueryType::EthCall => {
            let request = EthCallQueryRequest::decode(request)?;
            let response = EthCallQueryResponse::decode(response)?;
            decode_eth_tally(
                storage,
                chain_id,
                &request.calls,
                response.block_time_us,
                &response.results,
            )
        }
        QueryType::EthCallByTimestamp => {
            let request = EthCallByTimestampQueryRequest::decode(request)?;
            let response = EthCallByTimestampQueryResponse::decode(response)?;
            // The block the guardians pin the read to is the target
            // block; the following block only proves the pin.
            decode_eth_tally(
                storage,
                chain_id,
                &request.calls,
                response.target_block_time_us,
                &response.results,
            )
        }
        QueryType::EthCallWithFinality => {
            let request = EthCallWithFinalityQueryRequest::decode(request)?;
            require_finalized(&request.finality)?;
            let response = EthCallWithFinalityQueryResponse::decode(response)?;
            decode_eth_tally(
                storage,
                chain_id,
                &request.calls,
                response.block_time_us,
                &response.results,
            )
        }
        QueryType::SolanaAccount => {
            let request = SolanaAccountQueryRequest::decode(request)?;
            require_finalized(&request.commitment)?;
            let response = SolanaAccountQueryResponse::decode(response)?;
            validate_result_count(&response.results, 1)?;
            let reference_time = response.block_time_us / 1_000_000;
            let registered = registered_spoke(storage, chain_id, reference_time)?;
            let result = &response.results[0];
            if result.owner.as_slice() != registered.as_slice() {
                return Err(ContractError::UnknownSpoke { chain_id });
            }
            let (proposal_id, votes) = decode_solana_record(&result.data)?;
            Ok(SpokeTallyRead {
                proposal_id,
                votes,
                reference_time,
            })
        }
        QueryType::SolanaPda => {
            let request = SolanaPdaQueryRequest::decode(request)?;
            require_finalized(&request.commitment)?;
            let response = SolanaPdaQueryResponse::decode(response)?;
            validate_result_count(&response.results, 1)?;
            let reference_time = response.block_time_us / 1_000_000;
            let registered = registered_spoke(storage, chain_id, reference_time)?;
            let result = &response.results[0];
            if result.owner.as_slice() != registered.as_slice() {
                return Err(ContractError::UnknownSpoke { chain_id });
            }
            let (proposal_id, votes) = decode_solana_record(&result.data)?;
            Ok(SpokeTallyRead {
                proposal_id,
                votes,
                reference_time,
            })
        }
    }
}

fn decode_eth_tally(
    storage: &dyn Storage,
    chain_id: u16,
    calls: &[EthCallData],
    block_time_us: u64,
    results: &[Vec<u8>],
) -> Result<SpokeTallyRead, ContractError> {
    validate_result_count(calls, 1)?;
    validate_result_count(results, 1)?;

    let reference_time = block_time_us / 1_000_000;
    let registered = registered_spoke(storage, chain_id, reference_time)?;
    // A call target is 20 bytes, so only an identity in the EVM
    // universal form (12 zero bytes then the address) can match one.
    if registered.len() != 32 || registered.as_slice()[..12].iter().any(|b| *b != 0) {
        return Err(ContractError::UnknownSpoke { chain_id });
    }
    validate_eth_call_data(
        &calls[0],
        &[&registered.as_slice()[12..]],
        &[&TALLY_SELECTOR],
    )?;

    let data = &calls[0].data;
    if data.len() != TALLY_CALLDATA_LEN {
        return Err(ContractError::InvalidTallyCalldata {});
    }
    let requested_id = &data[4..];

    let record = &results[0];
    if record.len() != ETH_TALLY_RECORD_LEN {
        return Err(ContractError::InvalidTallyLength {
            got: record.len(),
            expected: ETH_TALLY_RECORD_LEN,
        });
    }
    if &record[..32] != requested_id {
        return Err(ContractError::ProposalIdMismatch {});
    }

    Ok(SpokeTallyRead {
        proposal_id: requested_id.to_vec().into(),
        votes: Votes {
            against_votes: read_vote_slot(&record[32..64])?,
            for_votes: read_vote_slot(&record[64..96])?,
            abstain_votes: read_vote_slot(&record[96..128])?,
        },
        reference_time,
    })
}

/// The identity registered for a chain as of `time`. Deregistered and
/// never-registered chains look the same to a merge.
fn registered_spoke(
    storage: &dyn Storage,
    chain_id: u16,
    time: u64,
) -> Result<HexBinary, ContractError> {
    SPOKE_REGISTRY
        .load_at(storage, u64::from(chain_id), time)?
        .filter(|identity| identity.as_slice().iter().any(|b| *b != 0))
        .ok_or(ContractError::UnknownSpoke { chain_id })
}

fn require_finalized(value: &str) -> Result<(), ContractError> {
    if value != "finalized" {
        return Err(ContractError::NotFinalized(value.to_string()));
    }
    Ok(())
}

/// An ABI word holding a vote count. The upper half must be zero for
/// the count to fit the 128-bit tallies the governor keeps.
fn read_vote_slot(slot: &[u8]) -> Result<Uint128, ContractError> {
    let (high, low) = slot.split_at(16);
    if high.iter().any(|b| *b != 0) {
        return Err(ContractError::VoteOverflow {});
    }
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(low);
    Ok(Uint128::new(u128::from_be_bytes(bytes)))
}

fn decode_solana_record(data: &[u8]) -> Result<(HexBinary, Votes), ContractError> {
    if data.len() != SOLANA_TALLY_RECORD_LEN {
        return Err(ContractError::InvalidTallyLength {
            got: data.len(),
            expected: SOLANA_TALLY_RECORD_LEN,
        });
    }
    let mut reader = Reader::new(data);
    let proposal_id = reader.read_array::<32>()?;
    let against = u64::from_le_bytes(reader.read_array()?);
    let for_votes = u64::from_le_bytes(reader.read_array()?);
    let abstain = u64::from_le_bytes(reader.read_array()?);
    Ok((
        proposal_id.to_vec().into(),
        Votes {
            against_votes: Uint128::from(against),
            for_votes: Uint128::from(for_votes),
            abstain_votes: Uint128::from(abstain),
        },
    ))
}
