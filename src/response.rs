//! FINS response parsing.
//!
//! # Response Structure
//!
//! | Component | Size | Description |
//! |-----------|------|-------------|
//! | Header | 10 bytes | FINS header (same structure as command) |
//! | Command code | 2 bytes | Echo of the request's command code |
//! | Status | 2 bytes | End code, `0x0000` on normal completion |
//! | Data | Variable | Response data (if any) |
//!
//! The payload length is not validated against anything; its interpretation is left to the
//! [`DataAdapter`] chosen at decode time.
//!
//! # Example
//!
//! ```
//! use fins_driver::{FinsResponse, Words};
//!
//! let bytes = [
//!     0xC0, 0x00, 0x02, 0x00, 0x01, 0x00, 0x00, 0x0A, 0x00, 0x01, // header
//!     0x01, 0x01, // memory area read
//!     0x00, 0x00, // normal completion
//!     0x12, 0x34, 0x56, 0x78, // data: 0x1234, 0x5678
//! ];
//!
//! let response = FinsResponse::from_bytes_with(&bytes, Words).unwrap();
//! assert!(response.ok());
//! assert_eq!(response.friendly_data().unwrap(), Some(&vec![0x1234, 0x5678]));
//! ```

use std::sync::OnceLock;

use crate::adapter::{Bit, DataAdapter, RawData, Words};
use crate::command::{CommandCode, COMMAND_CODE_SIZE};
use crate::error::{FinsError, Result};
use crate::header::{FinsHeader, FINS_HEADER_SIZE};
use crate::status::{status_text, NORMAL_COMPLETION};

/// Size of the status field.
pub const STATUS_SIZE: usize = 2;

/// Minimum response size: header (10) + command code (2) + status (2) = 14 bytes.
pub const MIN_RESPONSE_SIZE: usize = FINS_HEADER_SIZE + COMMAND_CODE_SIZE + STATUS_SIZE;

/// Parsed FINS response.
///
/// The adapter runs lazily on the first call to [`friendly_data`](Self::friendly_data) and its
/// result is kept for the lifetime of the response.
pub struct FinsResponse<A: DataAdapter = RawData> {
    header: FinsHeader,
    command_code: u16,
    status: u16,
    data: Vec<u8>,
    adapter: A,
    friendly: OnceLock<Result<A::Output>>,
}

impl FinsResponse {
    /// Parses a FINS response from raw bytes, keeping the payload as raw bytes.
    ///
    /// # Errors
    ///
    /// Returns `FinsError::TruncatedFrame` if `data` is shorter than 14 bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use fins_driver::FinsResponse;
    ///
    /// let bytes = [
    ///     0xC0, 0x00, 0x02, 0x00, 0x01, 0x00, 0x00, 0x0A, 0x00, 0x01,
    ///     0x01, 0x01, 0x01, 0x01,
    /// ];
    /// let response = FinsResponse::from_bytes(&bytes).unwrap();
    /// assert!(!response.ok());
    /// assert_eq!(response.status_text(), "Local node not part of Network");
    /// ```
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with(data, RawData)
    }
}

impl<A: DataAdapter> FinsResponse<A> {
    /// Parses a FINS response from raw bytes with the adapter that matches the original command.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `data` is shorter than 14 bytes (`FinsError::TruncatedFrame`)
    /// - the adapter does not accept the echoed command code (`FinsError::AdapterMismatch`)
    pub fn from_bytes_with(data: &[u8], adapter: A) -> Result<Self> {
        if data.len() < MIN_RESPONSE_SIZE {
            return Err(FinsError::truncated_frame(MIN_RESPONSE_SIZE, data.len()));
        }

        let header = FinsHeader::from_bytes(&data[..FINS_HEADER_SIZE])?;
        let command_code = u16::from_be_bytes([data[FINS_HEADER_SIZE], data[FINS_HEADER_SIZE + 1]]);
        let status = u16::from_be_bytes([data[FINS_HEADER_SIZE + 2], data[FINS_HEADER_SIZE + 3]]);

        if !adapter.accepts(command_code) {
            return Err(FinsError::AdapterMismatch {
                received: command_code,
            });
        }

        Ok(Self {
            header,
            command_code,
            status,
            data: data[MIN_RESPONSE_SIZE..].to_vec(),
            adapter,
            friendly: OnceLock::new(),
        })
    }

    /// Re-interprets the same frame with another adapter. Any memoized value is discarded.
    ///
    /// # Errors
    ///
    /// Returns `FinsError::AdapterMismatch` if `adapter` does not accept the echoed command code.
    pub fn with_adapter<B: DataAdapter>(self, adapter: B) -> Result<FinsResponse<B>> {
        if !adapter.accepts(self.command_code) {
            return Err(FinsError::AdapterMismatch {
                received: self.command_code,
            });
        }
        Ok(FinsResponse {
            header: self.header,
            command_code: self.command_code,
            status: self.status,
            data: self.data,
            adapter,
            friendly: OnceLock::new(),
        })
    }

    /// Returns the response header.
    pub fn header(&self) -> FinsHeader {
        self.header
    }

    /// Returns the echoed command code.
    pub fn command_code(&self) -> u16 {
        self.command_code
    }

    /// Returns the echoed command, if the code is in the opcode table.
    pub fn command(&self) -> Option<CommandCode> {
        CommandCode::from_code(self.command_code)
    }

    /// Returns the 16-bit status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the high byte of the status code.
    pub fn main_code(&self) -> u8 {
        self.status.to_be_bytes()[0]
    }

    /// Returns the low byte of the status code.
    pub fn sub_code(&self) -> u8 {
        self.status.to_be_bytes()[1]
    }

    /// Returns the payload bytes that follow the status code.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the adapter.
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Returns whether the status code is normal completion.
    pub fn ok(&self) -> bool {
        self.status == NORMAL_COMPLETION
    }

    /// Returns the description of the status code.
    pub fn status_text(&self) -> &'static str {
        status_text(self.status)
    }

    /// Returns the adapted payload.
    ///
    /// Returns `Ok(None)` without consulting the adapter when the status is not normal
    /// completion. Otherwise the adapter runs once; later calls return the same value, or a
    /// copy of the same error.
    ///
    /// # Errors
    ///
    /// Propagates the adapter's error.
    ///
    /// # Example
    ///
    /// ```
    /// use fins_driver::{Bit, FinsResponse};
    ///
    /// let bytes = [
    ///     0xC0, 0x00, 0x02, 0x00, 0x01, 0x00, 0x00, 0x0A, 0x00, 0x01,
    ///     0x01, 0x01, 0x00, 0x00,
    ///     0x01,
    /// ];
    /// let response = FinsResponse::from_bytes_with(&bytes, Bit).unwrap();
    /// assert_eq!(response.friendly_data().unwrap(), Some(&true));
    /// ```
    pub fn friendly_data(&self) -> Result<Option<&A::Output>> {
        if !self.ok() {
            return Ok(None);
        }
        match self.friendly.get_or_init(|| self.adapter.adapt(&self.data)) {
            Ok(value) => Ok(Some(value)),
            Err(err) => Err(err.clone()),
        }
    }

    /// Converts a non-zero status into an error.
    ///
    /// # Errors
    ///
    /// Returns `FinsError::PlcError` if the status is not normal completion.
    ///
    /// # Example
    ///
    /// ```
    /// use fins_driver::FinsResponse;
    ///
    /// let error_bytes = [
    ///     0xC0, 0x00, 0x02, 0x00, 0x01, 0x00, 0x00, 0x0A, 0x00, 0x01,
    ///     0x01, 0x01, 0x11, 0x03,
    /// ];
    /// let response = FinsResponse::from_bytes(&error_bytes).unwrap();
    /// assert!(response.check_error().is_err());
    /// ```
    pub fn check_error(&self) -> Result<()> {
        if self.ok() {
            Ok(())
        } else {
            Err(FinsError::plc_error(self.main_code(), self.sub_code()))
        }
    }

    /// Validates the Service ID matches the expected value.
    ///
    /// # Errors
    ///
    /// Returns `FinsError::SidMismatch` if the SID doesn't match.
    pub fn check_sid(&self, expected: u8) -> Result<()> {
        if self.header.sid == expected {
            Ok(())
        } else {
            Err(FinsError::sid_mismatch(expected, self.header.sid))
        }
    }

    /// Converts the payload to big-endian words, regardless of the adapter.
    ///
    /// # Errors
    ///
    /// Returns `FinsError::TruncatedPayload` if the payload length is odd.
    pub fn to_words(&self) -> Result<Vec<u16>> {
        Words.adapt(&self.data)
    }

    /// Converts the first payload byte to a bit value, regardless of the adapter.
    ///
    /// # Errors
    ///
    /// Returns `FinsError::TruncatedPayload` if the payload is empty.
    pub fn to_bit(&self) -> Result<bool> {
        Bit.adapt(&self.data)
    }

    /// Re-encodes the full response frame.
    pub fn raw(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(MIN_RESPONSE_SIZE + self.data.len());
        bytes.extend_from_slice(&self.header.to_bytes());
        bytes.extend_from_slice(&self.command_code.to_be_bytes());
        bytes.extend_from_slice(&self.status.to_be_bytes());
        bytes.extend_from_slice(&self.data);
        bytes
    }
}

impl<A> Clone for FinsResponse<A>
where
    A: DataAdapter + Clone,
    A::Output: Clone,
{
    fn clone(&self) -> Self {
        Self {
            header: self.header,
            command_code: self.command_code,
            status: self.status,
            data: self.data.clone(),
            adapter: self.adapter.clone(),
            friendly: self.friendly.clone(),
        }
    }
}

impl<A: DataAdapter> std::fmt::Debug for FinsResponse<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinsResponse")
            .field("header", &self.header)
            .field("command_code", &format_args!("0x{:04X}", self.command_code))
            .field("status", &format_args!("0x{:04X}", self.status))
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}
