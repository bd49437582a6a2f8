//! Payload adapters: turn raw response data into structured values.
//!
//! The shape of a response payload depends on the command that produced it, and that cannot
//! be recovered from the response bytes alone. The caller therefore picks an adapter matching
//! the original command and hands it to [`FinsResponse::from_bytes_with`]. The response
//! applies the adapter lazily, at most once, and only when the status code is 0x0000.
//!
//! An adapter can restrict which echoed command codes it understands through
//! [`DataAdapter::accepts`]; decoding a response to any other command then fails with
//! `FinsError::AdapterMismatch` instead of misparsing the payload.
//!
//! Closures of type `Fn(&[u8]) -> Result<T>` are adapters too:
//!
//! ```
//! use fins_driver::FinsResponse;
//!
//! let bytes = [
//!     0xC0, 0x00, 0x02, 0x00, 0x01, 0x00, 0x00, 0x0A, 0x00, 0x01,
//!     0x01, 0x01, 0x00, 0x00,
//!     0x00, 0x2A,
//! ];
//! let len = |data: &[u8]| -> fins_driver::Result<usize> { Ok(data.len()) };
//! let response = FinsResponse::from_bytes_with(&bytes, len).unwrap();
//! assert_eq!(response.friendly_data().unwrap(), Some(&2));
//! ```
//!
//! [`FinsResponse::from_bytes_with`]: crate::FinsResponse::from_bytes_with

use crate::command::CommandCode;
use crate::error::{FinsError, Result};
use crate::memory::MemoryAddress;

/// Converts a response payload into a structured value.
pub trait DataAdapter {
    /// The structured value.
    type Output;

    /// Converts the payload.
    fn adapt(&self, data: &[u8]) -> Result<Self::Output>;

    /// Returns whether responses to `command_code` can be interpreted by this adapter.
    fn accepts(&self, _command_code: u16) -> bool {
        true
    }
}

impl<F, T> DataAdapter for F
where
    F: Fn(&[u8]) -> Result<T>,
{
    type Output = T;

    fn adapt(&self, data: &[u8]) -> Result<T> {
        self(data)
    }
}

/// Identity adapter: the payload bytes as they are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawData;

impl DataAdapter for RawData {
    type Output = Vec<u8>;

    fn adapt(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(data.to_vec())
    }
}

/// Big-endian 16-bit words, as returned by word reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Words;

impl DataAdapter for Words {
    type Output = Vec<u16>;

    fn adapt(&self, data: &[u8]) -> Result<Vec<u16>> {
        let chunks = data.chunks_exact(2);
        if !chunks.remainder().is_empty() {
            return Err(FinsError::TruncatedPayload {
                index: data.len() / 2,
                needed: 2,
                remaining: 1,
            });
        }
        Ok(chunks
            .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
            .collect())
    }
}

/// The first payload byte as a bit value, as returned by a single bit read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bit;

impl DataAdapter for Bit {
    type Output = bool;

    fn adapt(&self, data: &[u8]) -> Result<bool> {
        match data.first() {
            Some(byte) => Ok(*byte != 0),
            None => Err(FinsError::TruncatedPayload {
                index: 0,
                needed: 1,
                remaining: 0,
            }),
        }
    }
}

/// Splits a multiple memory area read payload into one value per queried address.
///
/// Each item on the wire is an area code byte followed by 1 byte (bit addresses) or 2 bytes
/// (word addresses). The area code is dropped from the output.
///
/// # Example
///
/// ```
/// use fins_driver::{DataAdapter, MemoryAddress, MultipleRead};
///
/// let addresses: Vec<MemoryAddress> = ["D100", "CIO0.05"]
///     .iter()
///     .map(|t| t.parse().unwrap())
///     .collect();
/// let adapter = MultipleRead::new(addresses);
///
/// let values = adapter.adapt(&[0x82, 0x12, 0x34, 0x30, 0x01]).unwrap();
/// assert_eq!(values, vec![vec![0x12, 0x34], vec![0x01]]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipleRead {
    addresses: Vec<MemoryAddress>,
}

impl MultipleRead {
    /// Creates the adapter for the addresses of the original request, in request order.
    pub fn new(addresses: Vec<MemoryAddress>) -> Self {
        Self { addresses }
    }

    /// Returns the queried addresses.
    pub fn addresses(&self) -> &[MemoryAddress] {
        &self.addresses
    }
}

impl DataAdapter for MultipleRead {
    type Output = Vec<Vec<u8>>;

    fn adapt(&self, data: &[u8]) -> Result<Vec<Vec<u8>>> {
        let mut values = Vec::with_capacity(self.addresses.len());
        let mut rest = data;
        for (index, address) in self.addresses.iter().enumerate() {
            let needed = 1 + address.item_width();
            if rest.len() < needed {
                return Err(FinsError::TruncatedPayload {
                    index,
                    needed,
                    remaining: rest.len(),
                });
            }
            let (item, tail) = rest.split_at(needed);
            values.push(item[1..].to_vec());
            rest = tail;
        }
        Ok(values)
    }

    fn accepts(&self, command_code: u16) -> bool {
        command_code == CommandCode::MultipleMemoryAreaRead.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addrs(texts: &[&str]) -> Vec<MemoryAddress> {
        texts.iter().map(|t| MemoryAddress::parse_text(t).unwrap()).collect()
    }

    #[test]
    fn test_multiple_read_mixed_widths() {
        let adapter = MultipleRead::new(addrs(&["D100", "CIO0.05", "W20"]));
        let payload = hex::decode("82abcd3001b11234").unwrap();

        let values = adapter.adapt(&payload).unwrap();
        assert_eq!(
            values,
            vec![vec![0xAB, 0xCD], vec![0x01], vec![0x12, 0x34]]
        );
    }

    #[test]
    fn test_multiple_read_truncated() {
        let adapter = MultipleRead::new(addrs(&["D100", "D101"]));
        let err = adapter.adapt(&[0x82, 0x00, 0x01, 0x82, 0x00]).unwrap_err();
        match err {
            FinsError::TruncatedPayload {
                index,
                needed,
                remaining,
            } => {
                assert_eq!(index, 1);
                assert_eq!(needed, 3);
                assert_eq!(remaining, 2);
            }
            other => panic!("Expected TruncatedPayload, got {other:?}"),
        }
    }

    #[test]
    fn test_multiple_read_ignores_trailing_bytes() {
        let adapter = MultipleRead::new(addrs(&["CIO1.1"]));
        assert_eq!(adapter.adapt(&[0x30, 0x00, 0xFF]).unwrap(), vec![vec![0x00]]);
    }

    #[test]
    fn test_multiple_read_accepts_only_its_command() {
        let adapter = MultipleRead::new(addrs(&["D0"]));
        assert!(adapter.accepts(0x0104));
        assert!(!adapter.accepts(0x0101));
    }

    #[test]
    fn test_words() {
        assert_eq!(
            Words.adapt(&[0x12, 0x34, 0x56, 0x78, 0xAB, 0xCD]).unwrap(),
            vec![0x1234, 0x5678, 0xABCD]
        );
        assert!(Words.adapt(&[]).unwrap().is_empty());
        assert!(Words.adapt(&[0x12, 0x34, 0x56]).is_err());
    }

    #[test]
    fn test_bit() {
        assert!(Bit.adapt(&[0x01]).unwrap());
        assert!(!Bit.adapt(&[0x00]).unwrap());
        assert!(Bit.adapt(&[]).is_err());
    }

    #[test]
    fn test_raw_and_closure() {
        assert_eq!(RawData.adapt(&[1, 2, 3]).unwrap(), vec![1, 2, 3]);
        let sum = |data: &[u8]| -> Result<u32> { Ok(data.iter().map(|b| u32::from(*b)).sum()) };
        assert_eq!(sum.adapt(&[1, 2, 3]).unwrap(), 6);
        assert!(sum.accepts(0x2301));
    }
}
