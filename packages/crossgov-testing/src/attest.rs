//! Deterministic guardian keys and builders for the two kinds of
//! guardian-signed material the suite verifies: off-chain query
//! response envelopes and core-bridge messages.

use cosmwasm_std::HexBinary;
use k256::ecdsa::{SigningKey, VerifyingKey};

use crossgov_attestation::guardians::{GuardianSet, GuardianSignature};
use crossgov_attestation::response::{
    PerChainQueryRequest, PerChainQueryResponse, QueryRequest, QueryResponse,
    OFF_CHAIN_REQUEST_ID_LEN, OFF_CHAIN_SENDER, RESPONSE_VERSION,
};
use crossgov_attestation::vaa::VAA_VERSION;
use crossgov_attestation::verify::{eth_address, keccak256, response_digest};

/// The signing key of the test guardian at `index`. Stable across
/// runs, so sets and signatures built from the same index list always
/// line up.
pub fn guardian_key(index: u8) -> SigningKey {
    SigningKey::from_bytes(&[index + 1; 32].into()).unwrap()
}

/// A never-expiring guardian set holding the addresses of the listed
/// test keys, in order.
pub fn guardian_set_of(indices: &[u8]) -> GuardianSet {
    GuardianSet {
        addresses: indices
            .iter()
            .map(|index| {
                eth_address(&VerifyingKey::from(&guardian_key(*index)))
                    .to_vec()
                    .into()
            })
            .collect(),
        expiration_time: 0,
    }
}

/// Signs `bytes` with the listed guardian keys. Each key's position in
/// the list is reported as its index within the set.
pub fn sign_response(indices: &[u8], bytes: &[u8]) -> Vec<GuardianSignature> {
    let digest = response_digest(bytes);
    indices
        .iter()
        .enumerate()
        .map(|(position, index)| {
            let (signature, recovery_id) = guardian_key(*index)
                .sign_prehash_recoverable(&digest)
                .unwrap();
            let bytes = signature.to_bytes();
            GuardianSignature {
                r: bytes[..32].to_vec().into(),
                s: bytes[32..].to_vec().into(),
                recovery_id: recovery_id.to_byte(),
                guardian_index: position as u8,
            }
        })
        .collect()
}

/// Wraps per-chain reads in a signed off-chain query response envelope.
pub fn attested(
    indices: &[u8],
    reads: Vec<(PerChainQueryRequest, PerChainQueryResponse)>,
) -> (HexBinary, Vec<GuardianSignature>) {
    let (requests, responses): (Vec<_>, Vec<_>) = reads.into_iter().unzip();
    let envelope = QueryResponse {
        version: RESPONSE_VERSION,
        request_chain_id: OFF_CHAIN_SENDER,
        request_id: vec![0xAB; OFF_CHAIN_REQUEST_ID_LEN],
        request: QueryRequest {
            version: RESPONSE_VERSION,
            nonce: 1,
            requests,
        },
        responses,
    }
    .encode();
    let signatures = sign_response(indices, &envelope);
    (envelope.into(), signatures)
}

/// Serializes a core-bridge message carrying `payload` from the given
/// emitter and signs its body digest with the listed guardian keys.
pub fn signed_vaa(
    indices: &[u8],
    emitter_chain: u16,
    emitter: [u8; 32],
    sequence: u64,
    payload: &[u8],
) -> HexBinary {
    let mut body = vec![];
    body.extend_from_slice(&1_700_000_000u32.to_be_bytes());
    body.extend_from_slice(&0u32.to_be_bytes());
    body.extend_from_slice(&emitter_chain.to_be_bytes());
    body.extend_from_slice(&emitter);
    body.extend_from_slice(&sequence.to_be_bytes());
    body.push(1);
    body.extend_from_slice(payload);

    let digest = keccak256(&keccak256(&body));
    let mut out = vec![VAA_VERSION];
    out.extend_from_slice(&0u32.to_be_bytes());
    out.push(indices.len() as u8);
    for (position, index) in indices.iter().enumerate() {
        let (signature, recovery_id) = guardian_key(*index)
            .sign_prehash_recoverable(&digest)
            .unwrap();
        out.push(position as u8);
        out.extend_from_slice(&signature.to_bytes());
        out.push(recovery_id.to_byte());
    }
    out.extend_from_slice(&body);
    out.into()
}
