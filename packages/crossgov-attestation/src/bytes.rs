//! Checked big-endian wire primitives shared by every codec in this crate.

use crate::error::AttestationError;

/// Cursor over an immutable byte slice. Every read is bounds checked and
/// advances the cursor; nothing here panics on short input.
pub struct Reader<'a> {
    input: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Reader { input, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.input.len() - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], AttestationError> {
        if self.remaining() < len {
            return Err(AttestationError::UnexpectedEndOfInput {
                offset: self.offset,
                wanted: len - self.remaining(),
            });
        }
        let out = &self.input[self.offset..self.offset + len];
        self.offset += len;
        Ok(out)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], AttestationError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, AttestationError> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, AttestationError> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, AttestationError> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64, AttestationError> {
        Ok(u64::from_be_bytes(self.read_array()?))
    }

    /// Reads a u32 length header followed by that many bytes.
    pub fn read_len_prefixed(&mut self) -> Result<&'a [u8], AttestationError> {
        let len = self.read_u32()? as usize;
        self.read_bytes(len)
    }

    pub fn read_string(&mut self) -> Result<String, AttestationError> {
        let bytes = self.read_len_prefixed()?;
        String::from_utf8(bytes.to_vec()).map_err(|_| AttestationError::InvalidUtf8)
    }

    /// Takes everything left, leaving the cursor at the end.
    pub fn rest(&mut self) -> &'a [u8] {
        let out = &self.input[self.offset..];
        self.offset = self.input.len();
        out
    }

    /// Errors unless the whole input was consumed.
    pub fn finish(self) -> Result<(), AttestationError> {
        if self.offset != self.input.len() {
            return Err(AttestationError::LengthMismatch {
                declared: self.input.len(),
                consumed: self.offset,
            });
        }
        Ok(())
    }
}

pub fn write_len_prefixed(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    out.extend_from_slice(bytes);
}

pub fn write_string(out: &mut Vec<u8>, value: &str) {
    write_len_prefixed(out, value.as_bytes());
}

/// Left-pads an address with zeros to the 32-byte universal form.
pub fn extend_address_to_32(addr: &[u8]) -> Result<[u8; 32], AttestationError> {
    if addr.len() > 32 {
        return Err(AttestationError::AddressTooLong(addr.len()));
    }
    let mut out = [0u8; 32];
    out[32 - addr.len()..].copy_from_slice(addr);
    Ok(out)
}

/// Strips the zero padding from a universal address. The all-zero address
/// maps to an empty slice.
pub fn address_from_32(universal: &[u8]) -> &[u8] {
    match universal.iter().position(|b| *b != 0) {
        Some(start) => &universal[start..],
        None => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_reader_round_trip() {
        let mut out: Vec<u8> = vec![7];
        out.extend_from_slice(&0xBEEFu16.to_be_bytes());
        out.extend_from_slice(&0xDEADBEEFu32.to_be_bytes());
        out.extend_from_slice(&42u64.to_be_bytes());
        write_string(&mut out, "finalized");
        write_len_prefixed(&mut out, &[1, 2, 3]);

        let mut reader = Reader::new(&out);
        assert_eq!(reader.read_u8().unwrap(), 7);
        assert_eq!(reader.read_u16().unwrap(), 0xBEEF);
        assert_eq!(reader.read_u32().unwrap(), 0xDEADBEEF);
        assert_eq!(reader.read_u64().unwrap(), 42);
        assert_eq!(reader.read_string().unwrap(), "finalized");
        assert_eq!(reader.read_len_prefixed().unwrap(), &[1, 2, 3]);
        assert!(reader.is_empty());
        reader.finish().unwrap();
    }

    #[test]
    fn test_reader_rejects_short_input() {
        let mut reader = Reader::new(&[0, 1, 2]);
        assert_matches!(
            reader.read_u64(),
            Err(AttestationError::UnexpectedEndOfInput {
                offset: 0,
                wanted: 5
            })
        );
    }

    #[test]
    fn test_length_prefix_may_not_overrun() {
        let mut bytes = vec![];
        bytes.extend_from_slice(&100u32.to_be_bytes());
        bytes.extend_from_slice(&[0; 10]);
        let mut reader = Reader::new(&bytes);
        assert_matches!(
            reader.read_len_prefixed(),
            Err(AttestationError::UnexpectedEndOfInput { .. })
        );
    }

    #[test]
    fn test_finish_flags_unread_bytes() {
        let mut reader = Reader::new(&[1, 2, 3]);
        reader.read_u8().unwrap();
        assert_matches!(
            reader.finish(),
            Err(AttestationError::LengthMismatch {
                declared: 3,
                consumed: 1
            })
        );
    }

    #[test]
    fn test_universal_address_padding() {
        let addr = [0xAA; 20];
        let wide = extend_address_to_32(&addr).unwrap();
        assert_eq!(&wide[..12], &[0; 12]);
        assert_eq!(&wide[12..], &addr);
        assert_eq!(address_from_32(&wide), &addr);

        assert_matches!(
            extend_address_to_32(&[0; 33]),
            Err(AttestationError::AddressTooLong(33))
        );
        assert_eq!(address_from_32(&[0; 32]), &[] as &[u8]);
    }
}
