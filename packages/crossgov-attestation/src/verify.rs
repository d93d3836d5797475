//! Digest construction and guardian signature checks for attested query
//! responses.

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use sha3::{Digest, Keccak256};

use crate::error::AttestationError;
use crate::guardians::{GuardianSet, GuardianSignature};

/// Domain separator guardians prepend before signing a query response hash.
pub const RESPONSE_PREFIX: &[u8; 35] = b"query_response_0000000000000000000|";

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// The digest guardians sign: `keccak256(prefix | keccak256(response))`.
pub fn response_digest(response: &[u8]) -> [u8; 32] {
    let mut prefixed = Vec::with_capacity(RESPONSE_PREFIX.len() + 32);
    prefixed.extend_from_slice(RESPONSE_PREFIX);
    prefixed.extend_from_slice(&keccak256(response));
    keccak256(&prefixed)
}

/// Checks a batch of guardian signatures over `digest` against a guardian
/// set. Indices must be strictly increasing, which also bans duplicates, and
/// at least a quorum of the set must have signed.
pub fn verify_signatures(
    digest: &[u8; 32],
    signatures: &[GuardianSignature],
    guardian_set: &GuardianSet,
    now: u64,
) -> Result<(), AttestationError> {
    if !guardian_set.is_active(now) {
        return Err(AttestationError::GuardianSetExpired {
            expiration: guardian_set.expiration_time,
        });
    }
    if signatures.len() < guardian_set.quorum() {
        return Err(AttestationError::NoQuorum {
            got: signatures.len(),
            quorum: guardian_set.quorum(),
        });
    }

    let mut last_index: i32 = -1;
    for signature in signatures {
        if i32::from(signature.guardian_index) <= last_index {
            return Err(AttestationError::WrongGuardianIndexOrder(
                signature.guardian_index,
            ));
        }
        last_index = i32::from(signature.guardian_index);

        let guardian = guardian_set
            .addresses
            .get(signature.guardian_index as usize)
            .ok_or(AttestationError::GuardianIndexOutOfRange {
                index: signature.guardian_index,
                size: guardian_set.addresses.len(),
            })?;

        let recovered = recover_signer(digest, signature)?;
        if recovered != guardian.as_slice() {
            return Err(AttestationError::GuardianSignatureMismatch(
                signature.guardian_index,
            ));
        }
    }

    Ok(())
}

fn recover_signer(
    digest: &[u8; 32],
    signature: &GuardianSignature,
) -> Result<[u8; 20], AttestationError> {
    let index = signature.guardian_index;

    if signature.r.as_slice().len() != 32 || signature.s.as_slice().len() != 32 {
        return Err(AttestationError::InvalidSignature(index));
    }
    let mut packed = [0u8; 64];
    packed[..32].copy_from_slice(signature.r.as_slice());
    packed[32..].copy_from_slice(signature.s.as_slice());

    // EVM tooling reports recovery ids offset by 27.
    let recovery_byte = if signature.recovery_id >= 27 {
        signature.recovery_id - 27
    } else {
        signature.recovery_id
    };

    let parsed = Signature::try_from(packed.as_slice())
        .map_err(|_| AttestationError::InvalidSignature(index))?;
    let recovery_id = RecoveryId::try_from(recovery_byte)
        .map_err(|_| AttestationError::InvalidSignature(index))?;
    let key = VerifyingKey::recover_from_prehash(digest.as_slice(), &parsed, recovery_id)
        .map_err(|_| AttestationError::InvalidSignature(index))?;

    Ok(eth_address(&key))
}

/// Last 20 bytes of the Keccak-256 hash of the uncompressed public key.
pub fn eth_address(key: &VerifyingKey) -> [u8; 20] {
    use k256::elliptic_curve::sec1::ToEncodedPoint;

    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}
