//! Core-bridge message (VAA) parsing and verification for messages relayed
//! from the hub to spoke executors.

use crate::bytes::Reader;
use crate::error::AttestationError;
use crate::guardians::{GuardianSet, GuardianSignature};
use crate::verify::{keccak256, verify_signatures};

pub const VAA_VERSION: u8 = 1;

#[derive(Clone, Debug, PartialEq)]
pub struct ParsedVaa {
    pub version: u8,
    pub guardian_set_index: u32,
    pub signatures: Vec<GuardianSignature>,
    pub timestamp: u32,
    pub nonce: u32,
    pub emitter_chain: u16,
    pub emitter_address: [u8; 32],
    pub sequence: u64,
    pub consistency_level: u8,
    pub payload: Vec<u8>,
    /// Double Keccak-256 of the body, the digest guardians sign.
    pub hash: [u8; 32],
}

impl ParsedVaa {
    pub fn deserialize(data: &[u8]) -> Result<Self, AttestationError> {
        let mut reader = Reader::new(data);

        let version = reader.read_u8()?;
        if version != VAA_VERSION {
            return Err(AttestationError::InvalidVaaVersion(version));
        }
        let guardian_set_index = reader.read_u32()?;

        let signer_count = reader.read_u8()? as usize;
        let mut signatures = Vec::with_capacity(signer_count);
        for _ in 0..signer_count {
            let guardian_index = reader.read_u8()?;
            let r = reader.read_array::<32>()?;
            let s = reader.read_array::<32>()?;
            let recovery_id = reader.read_u8()?;
            signatures.push(GuardianSignature {
                r: r.to_vec().into(),
                s: s.to_vec().into(),
                recovery_id,
                guardian_index,
            });
        }

        let body = reader.rest();
        let hash = keccak256(&keccak256(body));

        let mut body_reader = Reader::new(body);
        let timestamp = body_reader.read_u32()?;
        let nonce = body_reader.read_u32()?;
        let emitter_chain = body_reader.read_u16()?;
        let emitter_address = body_reader.read_array()?;
        let sequence = body_reader.read_u64()?;
        let consistency_level = body_reader.read_u8()?;
        let payload = body_reader.rest().to_vec();

        Ok(ParsedVaa {
            version,
            guardian_set_index,
            signatures,
            timestamp,
            nonce,
            emitter_chain,
            emitter_address,
            sequence,
            consistency_level,
            payload,
            hash,
        })
    }

    pub fn verify(&self, guardian_set: &GuardianSet, now: u64) -> Result<(), AttestationError> {
        verify_signatures(&self.hash, &self.signatures, guardian_set, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use k256::ecdsa::{SigningKey, VerifyingKey};

    use crate::verify::eth_address;

    fn guardian_key(index: u8) -> SigningKey {
        SigningKey::from_bytes(&[index + 1; 32].into()).unwrap()
    }

    fn guardian_set(size: u8) -> GuardianSet {
        GuardianSet {
            addresses: (0..size)
                .map(|i| {
                    eth_address(&VerifyingKey::from(&guardian_key(i)))
                        .to_vec()
                        .into()
                })
                .collect(),
            expiration_time: 0,
        }
    }

    fn sample_body() -> Vec<u8> {
        let mut body = vec![];
        body.extend_from_slice(&1_700_000_000u32.to_be_bytes());
        body.extend_from_slice(&9u32.to_be_bytes());
        body.extend_from_slice(&2u16.to_be_bytes());
        body.extend_from_slice(&[0xAA; 32]);
        body.extend_from_slice(&77u64.to_be_bytes());
        body.push(1);
        body.extend_from_slice(b"dispatch payload");
        body
    }

    fn build_vaa(signers: &[u8], body: &[u8]) -> Vec<u8> {
        let digest = keccak256(&keccak256(body));
        let mut out = vec![VAA_VERSION];
        out.extend_from_slice(&0u32.to_be_bytes());
        out.push(signers.len() as u8);
        for &index in signers {
            let (signature, recovery_id) = guardian_key(index)
                .sign_prehash_recoverable(&digest)
                .unwrap();
            out.push(index);
            out.extend_from_slice(&signature.to_bytes());
            out.push(recovery_id.to_byte());
        }
        out.extend_from_slice(body);
        out
    }

    #[test]
    fn test_parse_and_verify() {
        let body = sample_body();
        let vaa = ParsedVaa::deserialize(&build_vaa(&[0, 1, 2, 3], &body)).unwrap();

        assert_eq!(vaa.version, VAA_VERSION);
        assert_eq!(vaa.guardian_set_index, 0);
        assert_eq!(vaa.signatures.len(), 4);
        assert_eq!(vaa.timestamp, 1_700_000_000);
        assert_eq!(vaa.nonce, 9);
        assert_eq!(vaa.emitter_chain, 2);
        assert_eq!(vaa.emitter_address, [0xAA; 32]);
        assert_eq!(vaa.sequence, 77);
        assert_eq!(vaa.consistency_level, 1);
        assert_eq!(vaa.payload, b"dispatch payload");
        assert_eq!(vaa.hash, keccak256(&keccak256(&body)));

        vaa.verify(&guardian_set(5), 10).unwrap();
    }

    #[test]
    fn test_wrong_version_is_rejected() {
        let mut bytes = build_vaa(&[0], &sample_body());
        bytes[0] = 2;
        assert_matches!(
            ParsedVaa::deserialize(&bytes),
            Err(AttestationError::InvalidVaaVersion(2))
        );
    }

    #[test]
    fn test_truncated_message_is_rejected() {
        let bytes = build_vaa(&[0], &sample_body());
        // Cut into the fixed body fields.
        assert_matches!(
            ParsedVaa::deserialize(&bytes[..bytes.len() - sample_body().len() + 10]),
            Err(AttestationError::UnexpectedEndOfInput { .. })
        );
    }

    #[test]
    fn test_below_quorum_fails_verification() {
        let vaa = ParsedVaa::deserialize(&build_vaa(&[0, 1], &sample_body())).unwrap();
        assert_matches!(
            vaa.verify(&guardian_set(5), 10),
            Err(AttestationError::NoQuorum { got: 2, quorum: 4 })
        );
    }

    #[test]
    fn test_tampered_payload_fails_verification() {
        let mut bytes = build_vaa(&[0, 1, 2, 3], &sample_body());
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        let vaa = ParsedVaa::deserialize(&bytes).unwrap();
        assert_matches!(
            vaa.verify(&guardian_set(5), 10),
            Err(AttestationError::GuardianSignatureMismatch(0))
                | Err(AttestationError::InvalidSignature(0))
        );
    }
}
