use cosmwasm_std::{to_json_vec, CosmosMsg, HexBinary, StdResult};
use sha3::{Digest, Keccak256};

fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Keccak-256 of a proposal's description text. Proposals store this
/// in place of the full text, which lives in events and off-chain
/// indexes.
pub fn description_hash(description: &str) -> HexBinary {
    keccak256(description.as_bytes()).to_vec().into()
}

/// Derives the 32-byte proposal id every chain agrees on:
/// `keccak256(serialized msgs | keccak256(description))`.
///
/// Execution replays the same derivation over the submitted messages and
/// description, so a proposal can only ever execute the exact payload that
/// was voted on.
pub fn proposal_id(msgs: &[CosmosMsg], description: &str) -> StdResult<HexBinary> {
    let mut preimage = to_json_vec(msgs)?;
    preimage.extend_from_slice(description_hash(description).as_slice());
    Ok(keccak256(&preimage).to_vec().into())
}

#[cfg(test)]
mod test {
    use super::*;
    use cosmwasm_std::{coins, BankMsg};

    fn send(amount: u128) -> CosmosMsg {
        BankMsg::Send {
            to_address: "treasury".to_string(),
            amount: coins(amount, "ujuno"),
        }
        .into()
    }

    #[test]
    fn test_id_is_deterministic() {
        let a = proposal_id(&[send(10)], "fund the treasury").unwrap();
        let b = proposal_id(&[send(10)], "fund the treasury").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_slice().len(), 32);
    }

    #[test]
    fn test_id_binds_description() {
        let a = proposal_id(&[send(10)], "fund the treasury").unwrap();
        let b = proposal_id(&[send(10)], "fund the treasury!").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_id_binds_messages() {
        let a = proposal_id(&[send(10)], "fund the treasury").unwrap();
        let b = proposal_id(&[send(11)], "fund the treasury").unwrap();
        assert_ne!(a, b);

        let empty = proposal_id(&[], "fund the treasury").unwrap();
        assert_ne!(a, empty);
    }
}
