//! Response status codes and their descriptions.
//!
//! The table is intentionally partial: only the common low-range codes are named. Looking up
//! an unlisted code is not an error, it yields [`UNKNOWN_STATUS`].

/// Status code for normal completion.
pub const NORMAL_COMPLETION: u16 = 0x0000;

/// Text returned for codes missing from [`STATUS_CODES`].
pub const UNKNOWN_STATUS: &str = "Unknown status code";

/// Named status codes.
pub const STATUS_CODES: [(u16, &str); 8] = [
    (NORMAL_COMPLETION, "Normal completion"),
    (0x0001, "Service was interrupted"),
    (0x0101, "Local node not part of Network"),
    (0x0102, "Token time-out, node number too large"),
    (0x0103, "Number of transmit retries exceeded"),
    (0x0104, "Maximum number of frames exceeded"),
    (0x0105, "Node number setting error (range)"),
    (0x0106, "Node number duplication error"),
];

/// Returns the description of a status code.
///
/// # Example
///
/// ```
/// use fins_driver::status_text;
///
/// assert_eq!(status_text(0x0000), "Normal completion");
/// assert_eq!(status_text(0x0103), "Number of transmit retries exceeded");
/// assert_eq!(status_text(0x2108), "Unknown status code");
/// ```
pub fn status_text(code: u16) -> &'static str {
    STATUS_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map_or(UNKNOWN_STATUS, |(_, text)| *text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_codes() {
        assert_eq!(status_text(0x0001), "Service was interrupted");
        assert_eq!(status_text(0x0101), "Local node not part of Network");
        assert_eq!(status_text(0x0106), "Node number duplication error");
    }

    #[test]
    fn test_unknown_codes() {
        for code in [0x0002, 0x0107, 0x1001, 0x8000, 0xFFFF] {
            assert_eq!(status_text(code), UNKNOWN_STATUS);
        }
    }

    #[test]
    fn test_codes_are_unique() {
        for (i, (code, _)) in STATUS_CODES.iter().enumerate() {
            assert!(STATUS_CODES[i + 1..].iter().all(|(c, _)| c != code));
        }
    }
}
