use cosmwasm_schema::cw_serde;
use cosmwasm_std::HexBinary;

use crate::error::AttestationError;

/// A guardian address is the last 20 bytes of the Keccak-256 hash of the
/// guardian's uncompressed secp256k1 public key.
pub const GUARDIAN_ADDRESS_LEN: usize = 20;

/// Packed signature records are `r (32) | s (32) | recovery id | guardian index`.
pub const SIGNATURE_LEN: usize = 66;

#[cw_serde]
pub struct GuardianSet {
    /// Guardian addresses ordered by guardian index.
    pub addresses: Vec<HexBinary>,
    /// Unix seconds after which this set stops verifying. Zero marks the
    /// current set, which never expires.
    pub expiration_time: u64,
}

impl GuardianSet {
    /// Smallest number of signatures that makes an attestation valid, a
    /// strict two-thirds majority of the set.
    pub fn quorum(&self) -> usize {
        ((self.addresses.len() * 10 / 3) * 2) / 10 + 1
    }

    pub fn is_active(&self, now: u64) -> bool {
        self.expiration_time == 0 || now < self.expiration_time
    }

    /// Checks the set has at least one member and every member has the
    /// guardian address form.
    pub fn validate(&self) -> Result<(), AttestationError> {
        if self.addresses.is_empty() {
            return Err(AttestationError::EmptyGuardianSet);
        }
        for address in &self.addresses {
            if address.as_slice().len() != GUARDIAN_ADDRESS_LEN {
                return Err(AttestationError::InvalidGuardianAddress(
                    address.as_slice().len(),
                ));
            }
        }
        Ok(())
    }
}

/// One guardian's signature over an attestation digest, alongside the index
/// identifying which registered guardian produced it.
#[cw_serde]
pub struct GuardianSignature {
    pub r: HexBinary,
    pub s: HexBinary,
    pub recovery_id: u8,
    pub guardian_index: u8,
}

impl GuardianSignature {
    pub fn from_packed(bytes: &[u8]) -> Result<Self, AttestationError> {
        if bytes.len() != SIGNATURE_LEN {
            return Err(AttestationError::InvalidSignatureLength(bytes.len()));
        }
        Ok(GuardianSignature {
            r: bytes[..32].to_vec().into(),
            s: bytes[32..64].to_vec().into(),
            recovery_id: bytes[64],
            guardian_index: bytes[65],
        })
    }

    pub fn to_packed(&self) -> Result<[u8; SIGNATURE_LEN], AttestationError> {
        if self.r.as_slice().len() != 32 || self.s.as_slice().len() != 32 {
            return Err(AttestationError::InvalidSignature(self.guardian_index));
        }
        let mut out = [0u8; SIGNATURE_LEN];
        out[..32].copy_from_slice(self.r.as_slice());
        out[32..64].copy_from_slice(self.s.as_slice());
        out[64] = self.recovery_id;
        out[65] = self.guardian_index;
        Ok(out)
    }
}
