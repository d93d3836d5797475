use cosmwasm_schema::cw_serde;
use cosmwasm_std::{from_json, to_json_vec, CosmosMsg, StdError, StdResult};

/// Fixed-width header in front of the JSON payload: message id (8), target
/// chain (2), payload length (4).
pub const HEADER_LEN: usize = 14;

/// A hub-published execution message addressed to one spoke chain.
///
/// Wire layout, big endian: `message_id (8) | target_chain (2) |
/// payload_len (4) | payload`, where the payload is the JSON serialization
/// of the messages.
#[cw_serde]
pub struct DispatchMessage {
    pub message_id: u64,
    /// Attestation-network chain id of the spoke that may consume this
    /// message. Everyone else must drop it.
    pub target_chain: u16,
    pub msgs: Vec<CosmosMsg>,
}

impl DispatchMessage {
    pub fn encode(&self) -> StdResult<Vec<u8>> {
        let payload = to_json_vec(&self.msgs)?;
        let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
        out.extend_from_slice(&self.message_id.to_be_bytes());
        out.extend_from_slice(&self.target_chain.to_be_bytes());
        out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        out.extend_from_slice(&payload);
        Ok(out)
    }

    pub fn decode(bytes: &[u8]) -> StdResult<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(StdError::parse_err(
                "DispatchMessage",
                "message shorter than the fixed header",
            ));
        }
        let mut message_id = [0u8; 8];
        message_id.copy_from_slice(&bytes[..8]);
        let mut target_chain = [0u8; 2];
        target_chain.copy_from_slice(&bytes[8..10]);
        let mut payload_len = [0u8; 4];
        payload_len.copy_from_slice(&bytes[10..14]);

        let payload = &bytes[HEADER_LEN..];
        if payload.len() != u32::from_be_bytes(payload_len) as usize {
            return Err(StdError::parse_err(
                "DispatchMessage",
                "declared payload length does not match the message",
            ));
        }

        Ok(DispatchMessage {
            message_id: u64::from_be_bytes(message_id),
            target_chain: u16::from_be_bytes(target_chain),
            msgs: from_json(payload)?,
        })
    }
}
