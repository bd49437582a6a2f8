//! Error types for the FINS codec.
//!
//! Every structural failure (bad address text, short frames, unknown run modes, truncated
//! payloads) is reported as a distinct [`FinsError`] variant at the point where it is detected.
//! A non-zero status code in a response is *not* an error of the codec; see
//! [`FinsResponse::ok`](crate::FinsResponse::ok) and [`FinsResponse::check_error`](crate::FinsResponse::check_error).

use std::io;
use thiserror::Error;

/// Result type alias for FINS operations.
pub type Result<T> = std::result::Result<T, FinsError>;

/// Errors that can occur while building, parsing or exchanging FINS frames.
#[derive(Debug, Error)]
pub enum FinsError {
    /// A header field was not exactly one byte long.
    #[error("Invalid header field '{field}': expected 1 byte, got {len}")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
        /// Length that was supplied.
        len: usize,
    },

    /// A header or response frame was shorter than its fixed layout.
    #[error("Truncated frame: expected at least {expected} bytes, got {actual}")]
    TruncatedFrame {
        /// Minimum number of bytes required.
        expected: usize,
        /// Number of bytes supplied.
        actual: usize,
    },

    /// Address text does not match `[AREA]<word>[.<bit>]`.
    #[error("Invalid address format '{address}': {reason}")]
    InvalidAddressFormat {
        /// The text that failed to parse.
        address: String,
        /// Description of the problem.
        reason: String,
    },

    /// Address prefix is not in the recognized area table.
    #[error("Unsupported memory area '{area}'")]
    UnsupportedArea {
        /// The prefix that was supplied.
        area: String,
    },

    /// The area exists but has no code for the requested access variant.
    #[error("{area} area does not support {variant} access")]
    UnsupportedVariant {
        /// Area name.
        area: String,
        /// Requested variant (bit, forced word, forced bit).
        variant: &'static str,
    },

    /// A raw memory address was not exactly 4 bytes.
    #[error("Invalid address length: expected 4 bytes, got {length}")]
    InvalidAddressLength {
        /// Number of bytes supplied.
        length: usize,
    },

    /// An item count was zero or out of range.
    #[error("Invalid count for '{parameter}': {count}")]
    InvalidCount {
        /// Name of the counted parameter.
        parameter: &'static str,
        /// Count that was supplied.
        count: usize,
    },

    /// Run mode token or code is not one of debug, monitor, run.
    #[error("Unknown PLC mode '{mode}'")]
    UnknownMode {
        /// The token that was supplied.
        mode: String,
    },

    /// Response payload ended before every queried address was consumed.
    #[error(
        "Truncated payload: item {index} needs {needed} bytes, {remaining} remaining"
    )]
    TruncatedPayload {
        /// Zero-based index of the item being read.
        index: usize,
        /// Bytes needed for the item (area code included).
        needed: usize,
        /// Bytes left in the payload.
        remaining: usize,
    },

    /// The response echoes a command the chosen adapter cannot interpret.
    #[error("Adapter mismatch: adapter does not accept responses to command 0x{received:04X}")]
    AdapterMismatch {
        /// Command code echoed in the response.
        received: u16,
    },

    /// Error returned by the PLC with main and sub codes.
    #[error("PLC error: main code 0x{main_code:02X}, sub code 0x{sub_code:02X}")]
    PlcError {
        /// Main error code from PLC response.
        main_code: u8,
        /// Sub error code from PLC response.
        sub_code: u8,
    },

    /// Invalid parameter provided.
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// Name of the invalid parameter.
        parameter: String,
        /// Description of why the parameter is invalid.
        reason: String,
    },

    /// Communication timeout.
    #[error("Communication timeout")]
    Timeout,

    /// I/O error during communication.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Service ID mismatch between request and response.
    #[error("SID mismatch: expected 0x{expected:02X}, received 0x{received:02X}")]
    SidMismatch {
        /// Expected SID value.
        expected: u8,
        /// Received SID value.
        received: u8,
    },
}

impl FinsError {
    /// Creates a new `TruncatedFrame` error.
    pub fn truncated_frame(expected: usize, actual: usize) -> Self {
        Self::TruncatedFrame { expected, actual }
    }

    /// Creates a new `InvalidAddressFormat` error.
    ///
    /// # Example
    ///
    /// ```
    /// use fins_driver::FinsError;
    ///
    /// let err = FinsError::invalid_address_format("D1x", "trailing characters");
    /// assert_eq!(err.to_string(), "Invalid address format 'D1x': trailing characters");
    /// ```
    pub fn invalid_address_format(address: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAddressFormat {
            address: address.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new `UnsupportedArea` error.
    pub fn unsupported_area(area: impl Into<String>) -> Self {
        Self::UnsupportedArea { area: area.into() }
    }

    /// Creates a new `UnsupportedVariant` error.
    pub fn unsupported_variant(area: impl Into<String>, variant: &'static str) -> Self {
        Self::UnsupportedVariant {
            area: area.into(),
            variant,
        }
    }

    /// Creates a new `InvalidCount` error.
    pub fn invalid_count(parameter: &'static str, count: usize) -> Self {
        Self::InvalidCount { parameter, count }
    }

    /// Creates a new `UnknownMode` error.
    pub fn unknown_mode(mode: impl Into<String>) -> Self {
        Self::UnknownMode { mode: mode.into() }
    }

    /// Creates a new `PlcError` from main and sub codes.
    ///
    /// # Example
    ///
    /// ```
    /// use fins_driver::FinsError;
    ///
    /// let err = FinsError::plc_error(0x01, 0x01);
    /// ```
    pub fn plc_error(main_code: u8, sub_code: u8) -> Self {
        Self::PlcError {
            main_code,
            sub_code,
        }
    }

    /// Creates a new `InvalidParameter` error.
    ///
    /// # Example
    ///
    /// ```
    /// use fins_driver::FinsError;
    ///
    /// let err = FinsError::invalid_parameter("bank", "must be 0x00-0x18");
    /// ```
    pub fn invalid_parameter(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new `SidMismatch` error.
    pub fn sid_mismatch(expected: u8, received: u8) -> Self {
        Self::SidMismatch { expected, received }
    }
}

// Memoized adapter results hand out copies of a cached failure.
impl Clone for FinsError {
    fn clone(&self) -> Self {
        match self {
            Self::InvalidField { field, len } => Self::InvalidField {
                field: *field,
                len: *len,
            },
            Self::TruncatedFrame { expected, actual } => Self::truncated_frame(*expected, *actual),
            Self::InvalidAddressFormat { address, reason } => {
                Self::invalid_address_format(address.clone(), reason.clone())
            }
            Self::UnsupportedArea { area } => Self::unsupported_area(area.clone()),
            Self::UnsupportedVariant { area, variant } => {
                Self::unsupported_variant(area.clone(), *variant)
            }
            Self::InvalidAddressLength { length } => Self::InvalidAddressLength { length: *length },
            Self::InvalidCount { parameter, count } => Self::invalid_count(*parameter, *count),
            Self::UnknownMode { mode } => Self::unknown_mode(mode.clone()),
            Self::TruncatedPayload {
                index,
                needed,
                remaining,
            } => Self::TruncatedPayload {
                index: *index,
                needed: *needed,
                remaining: *remaining,
            },
            Self::AdapterMismatch { received } => Self::AdapterMismatch {
                received: *received,
            },
            Self::PlcError {
                main_code,
                sub_code,
            } => Self::plc_error(*main_code, *sub_code),
            Self::InvalidParameter { parameter, reason } => {
                Self::invalid_parameter(parameter.clone(), reason.clone())
            }
            Self::Timeout => Self::Timeout,
            Self::Io(e) => Self::Io(io::Error::new(e.kind(), e.to_string())),
            Self::SidMismatch { expected, received } => Self::sid_mismatch(*expected, *received),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plc_error_display() {
        let err = FinsError::plc_error(0x01, 0x01);
        assert_eq!(err.to_string(), "PLC error: main code 0x01, sub code 0x01");
    }

    #[test]
    fn test_unsupported_variant_display() {
        let err = FinsError::unsupported_variant("DM", "forced bit");
        assert_eq!(err.to_string(), "DM area does not support forced bit access");
    }

    #[test]
    fn test_truncated_frame_display() {
        let err = FinsError::truncated_frame(14, 3);
        assert_eq!(
            err.to_string(),
            "Truncated frame: expected at least 14 bytes, got 3"
        );
    }

    #[test]
    fn test_adapter_mismatch_display() {
        let err = FinsError::AdapterMismatch { received: 0x0101 };
        assert_eq!(
            err.to_string(),
            "Adapter mismatch: adapter does not accept responses to command 0x0101"
        );
    }

    #[test]
    fn test_timeout_display() {
        let err = FinsError::Timeout;
        assert_eq!(err.to_string(), "Communication timeout");
    }

    #[test]
    fn test_clone_keeps_io_kind() {
        let err = FinsError::from(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
        match err.clone() {
            FinsError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::ConnectionRefused),
            other => panic!("Expected Io, got {other:?}"),
        }
    }

    #[test]
    fn test_clone_truncated_payload() {
        let err = FinsError::TruncatedPayload {
            index: 2,
            needed: 3,
            remaining: 1,
        };
        assert_eq!(err.clone().to_string(), err.to_string());
    }
}
