//! Freshness and shape checks consumers run on decoded query responses.

use crate::error::AttestationError;
use crate::eth::EthCallData;

/// The attested block may not sit behind a floor the consumer has already
/// accepted.
pub fn validate_block_num(block_num: u64, floor: u64) -> Result<(), AttestationError> {
    if block_num < floor {
        return Err(AttestationError::StaleBlockNum {
            got: block_num,
            floor,
        });
    }
    Ok(())
}

pub fn validate_block_time(block_time_us: u64, floor_us: u64) -> Result<(), AttestationError> {
    if block_time_us < floor_us {
        return Err(AttestationError::StaleBlockTime {
            got: block_time_us,
            floor: floor_us,
        });
    }
    Ok(())
}

/// A call row must target a registered contract and one of the registered
/// 4-byte function selectors.
pub fn validate_eth_call_data(
    call: &EthCallData,
    allowed_contracts: &[&[u8]],
    allowed_selectors: &[&[u8]],
) -> Result<(), AttestationError> {
    if !allowed_contracts
        .iter()
        .any(|contract| *contract == call.to.as_slice())
    {
        return Err(AttestationError::InvalidContractAddress(hex::encode(
            call.to,
        )));
    }
    let selector = call
        .data
        .get(..4)
        .ok_or_else(|| AttestationError::InvalidFunctionSignature(hex::encode(&call.data)))?;
    if !allowed_selectors.iter().any(|allowed| *allowed == selector) {
        return Err(AttestationError::InvalidFunctionSignature(hex::encode(
            selector,
        )));
    }
    Ok(())
}

pub fn validate_multiple_eth_call_data(
    calls: &[EthCallData],
    allowed_contracts: &[&[u8]],
    allowed_selectors: &[&[u8]],
) -> Result<(), AttestationError> {
    for call in calls {
        validate_eth_call_data(call, allowed_contracts, allowed_selectors)?;
    }
    Ok(())
}

pub fn validate_result_count<T>(results: &[T], expected: usize) -> Result<(), AttestationError> {
    if results.len() != expected {
        return Err(AttestationError::UnexpectedNumberOfResults {
            expected,
            got: results.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_block_floors() {
        validate_block_num(10, 10).unwrap();
        validate_block_num(11, 10).unwrap();
        assert_matches!(
            validate_block_num(9, 10),
            Err(AttestationError::StaleBlockNum { got: 9, floor: 10 })
        );

        validate_block_time(1_000_000, 1_000_000).unwrap();
        assert_matches!(
            validate_block_time(999_999, 1_000_000),
            Err(AttestationError::StaleBlockTime { .. })
        );
    }

    #[test]
    fn test_call_allowlists() {
        let call = EthCallData {
            to: [0x11; 20],
            data: vec![0xDE, 0xAD, 0xBE, 0xEF, 1, 2, 3],
        };
        let target = [0x11; 20];
        let selector = [0xDE, 0xAD, 0xBE, 0xEF];

        validate_eth_call_data(&call, &[&target], &[&selector]).unwrap();

        assert_matches!(
            validate_eth_call_data(&call, &[&[0x22; 20]], &[&selector]),
            Err(AttestationError::InvalidContractAddress(_))
        );
        assert_matches!(
            validate_eth_call_data(&call, &[&target], &[&[0; 4]]),
            Err(AttestationError::InvalidFunctionSignature(_))
        );
    }

    #[test]
    fn test_short_calldata_has_no_selector() {
        let call = EthCallData {
            to: [0x11; 20],
            data: vec![0xDE, 0xAD],
        };
        let target = [0x11; 20];
        assert_matches!(
            validate_eth_call_data(&call, &[&target], &[&[0xDE, 0xAD]]),
            Err(AttestationError::InvalidFunctionSignature(_))
        );
    }

    #[test]
    fn test_result_count() {
        validate_result_count(&[vec![1u8]], 1).unwrap();
        assert_matches!(
            validate_result_count(&[vec![1u8], vec![2u8]], 1),
            Err(AttestationError::UnexpectedNumberOfResults {
                expected: 1,
                got: 2
            })
        );
    }
}
