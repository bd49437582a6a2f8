//! Memory areas and the 4-byte FINS memory address.
//!
//! A FINS memory address is always `area code (1) | word (2, big-endian) | bit (1)`. The area
//! code selects both the memory region and the access granularity, so the same region has
//! different codes for word access, bit access and their forced counterparts.
//!
//! # Area table
//!
//! | Prefix | Area | Word | Bit | Forced word | Forced bit |
//! |--------|------|:----:|:---:|:-----------:|:----------:|
//! | `CIO` | Core I/O | 0xB0 | 0x30 | 0xF0 | 0x70 |
//! | `W` | Work | 0xB1 | 0x31 | 0xF1 | 0x71 |
//! | `H` | Holding | 0xB2 | 0x32 | 0xF2 | 0x72 |
//! | `A` | Auxiliary | 0xB3 | 0x33 | ✗ | ✗ |
//! | `D` | Data memory | 0x82 | 0x02 | ✗ | ✗ |
//! | `T` | Timer PV | 0x89 | ✗ | ✗ | ✗ |
//! | `C` | Counter PV | 0x89 | ✗ | ✗ | ✗ |
//! | `IR` | Index register | 0xDC | ✗ | ✗ | ✗ |
//! | `DR` | Data register | 0xBC | ✗ | ✗ | ✗ |
//! | `TK` | Task flag | 0x46 | 0x06 | ✗ | ✗ |
//! | `EM` | EM current bank | 0x98 | 0x0A | ✗ | ✗ |
//!
//! Explicit EM banks 0x00-0x18 are available through [`MemoryArea::EmBank`] but have no text
//! prefix.
//!
//! # Example
//!
//! ```
//! use fins_driver::MemoryAddress;
//!
//! let addr = MemoryAddress::parse_text("D100.1").unwrap();
//! assert_eq!(addr.to_bytes(), [0x02, 0x00, 0x64, 0x01]);
//!
//! let same = MemoryAddress::parse_bytes(&addr.to_bytes()).unwrap();
//! assert_eq!(addr, same);
//! ```

use std::str::FromStr;

use crate::error::{FinsError, Result};

/// Wire size of a memory address.
pub const MEMORY_ADDRESS_SIZE: usize = 4;

/// Highest EM bank number.
pub const MAX_EM_BANK: u8 = 0x18;

/// Text prefixes recognized by [`MemoryAddress::parse_text`].
pub const AREA_PREFIXES: [(&str, MemoryArea); 11] = [
    ("CIO", MemoryArea::CIO),
    ("W", MemoryArea::WR),
    ("H", MemoryArea::HR),
    ("A", MemoryArea::AR),
    ("D", MemoryArea::DM),
    ("T", MemoryArea::TIM),
    ("C", MemoryArea::CNT),
    ("IR", MemoryArea::IR),
    ("DR", MemoryArea::DR),
    ("TK", MemoryArea::TK),
    ("EM", MemoryArea::EM),
];

/// Area codes owned by one memory area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaCodes {
    /// Word access code.
    pub word: u8,
    /// Bit access code, if the area allows bit access.
    pub bit: Option<u8>,
    /// Forced word access code.
    pub word_forced: Option<u8>,
    /// Forced bit access code.
    pub bit_forced: Option<u8>,
}

impl AreaCodes {
    const fn word_only(word: u8) -> Self {
        Self {
            word,
            bit: None,
            word_forced: None,
            bit_forced: None,
        }
    }

    const fn word_bit(word: u8, bit: u8) -> Self {
        Self {
            word,
            bit: Some(bit),
            word_forced: None,
            bit_forced: None,
        }
    }

    const fn full(word: u8, bit: u8, word_forced: u8, bit_forced: u8) -> Self {
        Self {
            word,
            bit: Some(bit),
            word_forced: Some(word_forced),
            bit_forced: Some(bit_forced),
        }
    }
}

/// An extended memory bank number (0x00-0x18).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmBank(u8);

impl EmBank {
    /// Creates a bank number.
    ///
    /// # Errors
    ///
    /// Returns `FinsError::InvalidParameter` if `bank` exceeds [`MAX_EM_BANK`].
    pub fn new(bank: u8) -> Result<Self> {
        if bank > MAX_EM_BANK {
            return Err(FinsError::invalid_parameter(
                "bank",
                format!("must be 0x00-0x{MAX_EM_BANK:02X}"),
            ));
        }
        Ok(Self(bank))
    }

    /// Returns the bank number.
    pub fn get(self) -> u8 {
        self.0
    }
}

/// Memory areas available in Omron PLCs.
///
/// # Example
///
/// ```
/// use fins_driver::MemoryArea;
///
/// assert!(MemoryArea::CIO.supports_bit_access());
/// assert!(!MemoryArea::TIM.supports_bit_access());
/// assert_eq!(MemoryArea::from_prefix("DR"), Some(MemoryArea::DR));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemoryArea {
    /// CIO (Core I/O) area - general purpose I/O and internal relays.
    CIO,
    /// WR (Work) area - work bits/words.
    WR,
    /// HR (Holding) area - holding bits/words that retain values.
    HR,
    /// AR (Auxiliary Relay) area - system status and control bits/words.
    AR,
    /// DM (Data Memory) area.
    DM,
    /// Timer present values.
    TIM,
    /// Counter present values.
    CNT,
    /// Index registers.
    IR,
    /// Data registers.
    DR,
    /// Task flags.
    TK,
    /// Extended memory, current bank.
    EM,
    /// Extended memory, explicit bank.
    EmBank(EmBank),
}

impl MemoryArea {
    /// Looks up the area for a text prefix. Matching is case-sensitive.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        AREA_PREFIXES
            .iter()
            .find(|(p, _)| *p == prefix)
            .map(|(_, area)| *area)
    }

    /// Returns the text prefix, if the area is addressable by text.
    pub fn prefix(self) -> Option<&'static str> {
        AREA_PREFIXES
            .iter()
            .find(|(_, area)| *area == self)
            .map(|(p, _)| *p)
    }

    /// Returns every code variant of this area.
    pub fn codes(self) -> AreaCodes {
        match self {
            MemoryArea::CIO => AreaCodes::full(0xB0, 0x30, 0xF0, 0x70),
            MemoryArea::WR => AreaCodes::full(0xB1, 0x31, 0xF1, 0x71),
            MemoryArea::HR => AreaCodes::full(0xB2, 0x32, 0xF2, 0x72),
            MemoryArea::AR => AreaCodes::word_bit(0xB3, 0x33),
            MemoryArea::DM => AreaCodes::word_bit(0x82, 0x02),
            MemoryArea::TIM | MemoryArea::CNT => AreaCodes::word_only(0x89),
            MemoryArea::IR => AreaCodes::word_only(0xDC),
            MemoryArea::DR => AreaCodes::word_only(0xBC),
            MemoryArea::TK => AreaCodes::word_bit(0x46, 0x06),
            MemoryArea::EM => AreaCodes::word_bit(0x98, 0x0A),
            MemoryArea::EmBank(bank) => match bank.get() {
                b @ 0x00..=0x0F => AreaCodes::word_bit(0xA0 + b, 0x20 + b),
                b => AreaCodes::word_bit(0x50u8.wrapping_add(b), 0xD0u8.wrapping_add(b)),
            },
        }
    }

    /// Returns the FINS code for word access.
    pub fn word_code(self) -> u8 {
        self.codes().word
    }

    /// Returns the FINS code for bit access.
    ///
    /// # Errors
    ///
    /// Returns `FinsError::UnsupportedVariant` if the area has no bit access.
    pub fn bit_code(self) -> Result<u8> {
        self.codes()
            .bit
            .ok_or_else(|| FinsError::unsupported_variant(self.to_string(), "bit"))
    }

    /// Returns the FINS code for forced word access.
    ///
    /// # Errors
    ///
    /// Returns `FinsError::UnsupportedVariant` if the area cannot be forced.
    pub fn forced_word_code(self) -> Result<u8> {
        self.codes()
            .word_forced
            .ok_or_else(|| FinsError::unsupported_variant(self.to_string(), "forced word"))
    }

    /// Returns the FINS code for forced bit access.
    ///
    /// # Errors
    ///
    /// Returns `FinsError::UnsupportedVariant` if the area cannot be forced.
    pub fn forced_bit_code(self) -> Result<u8> {
        self.codes()
            .bit_forced
            .ok_or_else(|| FinsError::unsupported_variant(self.to_string(), "forced bit"))
    }

    /// Returns whether this memory area supports bit access.
    pub fn supports_bit_access(self) -> bool {
        self.codes().bit.is_some()
    }
}

impl std::fmt::Display for MemoryArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemoryArea::CIO => write!(f, "CIO"),
            MemoryArea::WR => write!(f, "WR"),
            MemoryArea::HR => write!(f, "HR"),
            MemoryArea::AR => write!(f, "AR"),
            MemoryArea::DM => write!(f, "DM"),
            MemoryArea::TIM => write!(f, "TIM"),
            MemoryArea::CNT => write!(f, "CNT"),
            MemoryArea::IR => write!(f, "IR"),
            MemoryArea::DR => write!(f, "DR"),
            MemoryArea::TK => write!(f, "TK"),
            MemoryArea::EM => write!(f, "EM"),
            MemoryArea::EmBank(bank) => write!(f, "E{:X}", bank.get()),
        }
    }
}

/// Area codes whose items are one byte wide on the wire.
fn is_bit_code(code: u8) -> bool {
    matches!(
        code,
        0x02 | 0x06 | 0x07 | 0x09 | 0x0A | 0x20..=0x2F | 0x30..=0x33 | 0x49 | 0x70..=0x72 | 0xE0..=0xE8
    )
}

/// A normalized FINS memory address: area code, word and bit.
///
/// Built from text with [`parse_text`](Self::parse_text) / [`parse_forced`](Self::parse_forced),
/// from raw bytes with [`parse_bytes`](Self::parse_bytes), or from a typed area with
/// [`new`](Self::new).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemoryAddress {
    area: u8,
    word: u16,
    bit: u8,
}

/// Components split out of `[AREA]<word>[.<bit>]`.
struct AddressText<'a> {
    area: MemoryArea,
    prefix: &'a str,
    word: u16,
    bit: Option<u8>,
}

impl<'a> AddressText<'a> {
    fn parse(text: &'a str) -> Result<Self> {
        let prefix_len = text.bytes().take_while(u8::is_ascii_alphabetic).count();
        let (prefix, rest) = text.split_at(prefix_len);
        let (word_text, bit_text) = match rest.split_once('.') {
            Some((word, bit)) => (word, Some(bit)),
            None => (rest, None),
        };

        let word = parse_number::<u16>(text, word_text, "word")?;
        let bit = bit_text
            .map(|b| parse_number::<u8>(text, b, "bit"))
            .transpose()?;

        let area = if prefix.is_empty() {
            MemoryArea::CIO
        } else {
            MemoryArea::from_prefix(prefix).ok_or_else(|| FinsError::unsupported_area(prefix))?
        };

        Ok(Self {
            area,
            prefix,
            word,
            bit,
        })
    }
}

fn parse_number<T: FromStr>(text: &str, digits: &str, what: &str) -> Result<T> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FinsError::invalid_address_format(
            text,
            format!("expected decimal {what} number"),
        ));
    }
    digits
        .parse()
        .map_err(|_| FinsError::invalid_address_format(text, format!("{what} number out of range")))
}

impl MemoryAddress {
    /// Creates an address from its raw parts without any validation.
    pub const fn from_raw(area_code: u8, word: u16, bit: u8) -> Self {
        Self {
            area: area_code,
            word,
            bit,
        }
    }

    /// Creates a normal (non-forced) address for a typed area.
    ///
    /// `bit: None` selects the word code, `Some(n)` the bit code.
    ///
    /// # Errors
    ///
    /// Returns `FinsError::UnsupportedVariant` if a bit is given for a word-only area.
    ///
    /// # Example
    ///
    /// ```
    /// use fins_driver::{MemoryAddress, MemoryArea};
    ///
    /// let addr = MemoryAddress::new(MemoryArea::CIO, 0, Some(5)).unwrap();
    /// assert_eq!(addr.to_bytes(), [0x30, 0x00, 0x00, 0x05]);
    /// assert!(MemoryAddress::new(MemoryArea::TIM, 0, Some(5)).is_err());
    /// ```
    pub fn new(area: MemoryArea, word: u16, bit: Option<u8>) -> Result<Self> {
        match bit {
            Some(bit) => Ok(Self::from_raw(area.bit_code()?, word, bit)),
            None => Ok(Self::from_raw(area.word_code(), word, 0x00)),
        }
    }

    /// Creates a forced-access address for a typed area.
    ///
    /// # Errors
    ///
    /// Returns `FinsError::UnsupportedVariant` if the area has no forced variant.
    pub fn forced(area: MemoryArea, word: u16, bit: Option<u8>) -> Result<Self> {
        match bit {
            Some(bit) => Ok(Self::from_raw(area.forced_bit_code()?, word, bit)),
            None => Ok(Self::from_raw(area.forced_word_code()?, word, 0x00)),
        }
    }

    /// Parses `[AREA]<word>[.<bit>]`.
    ///
    /// Without a prefix the CIO area is used. The bit code is chosen when a bit component is
    /// present, the word code otherwise.
    ///
    /// # Errors
    ///
    /// - `FinsError::InvalidAddressFormat` if the text does not match the grammar, or the
    ///   word/bit number is out of range
    /// - `FinsError::UnsupportedArea` if the prefix is not a recognized area
    /// - `FinsError::UnsupportedVariant` if a bit is given for a word-only area
    ///
    /// # Example
    ///
    /// ```
    /// use fins_driver::{FinsError, MemoryAddress};
    ///
    /// assert_eq!(MemoryAddress::parse_text("CIO100").unwrap().to_bytes(), [0xB0, 0x00, 0x64, 0x00]);
    /// assert_eq!(MemoryAddress::parse_text("100.3").unwrap().to_bytes(), [0x30, 0x00, 0x64, 0x03]);
    /// assert!(matches!(MemoryAddress::parse_text("d100"), Err(FinsError::UnsupportedArea { .. })));
    /// ```
    pub fn parse_text(text: &str) -> Result<Self> {
        let parsed = AddressText::parse(text)?;
        match parsed.bit {
            Some(bit) => {
                let code = parsed.area.bit_code().map_err(|_| {
                    FinsError::unsupported_variant(display_name(&parsed), "bit")
                })?;
                Ok(Self::from_raw(code, parsed.word, bit))
            }
            None => Ok(Self::from_raw(parsed.area.word_code(), parsed.word, 0x00)),
        }
    }

    /// Parses `[AREA]<word>[.<bit>]` selecting the forced word or forced bit code.
    ///
    /// # Errors
    ///
    /// Same as [`parse_text`](Self::parse_text), with `FinsError::UnsupportedVariant` for areas
    /// that cannot be forced.
    ///
    /// # Example
    ///
    /// ```
    /// use fins_driver::MemoryAddress;
    ///
    /// assert_eq!(MemoryAddress::parse_forced("W10.2").unwrap().to_bytes(), [0x71, 0x00, 0x0A, 0x02]);
    /// assert!(MemoryAddress::parse_forced("D10").is_err());
    /// ```
    pub fn parse_forced(text: &str) -> Result<Self> {
        let parsed = AddressText::parse(text)?;
        let codes = parsed.area.codes();
        match parsed.bit {
            Some(bit) => {
                let code = codes.bit_forced.ok_or_else(|| {
                    FinsError::unsupported_variant(display_name(&parsed), "forced bit")
                })?;
                Ok(Self::from_raw(code, parsed.word, bit))
            }
            None => {
                let code = codes.word_forced.ok_or_else(|| {
                    FinsError::unsupported_variant(display_name(&parsed), "forced word")
                })?;
                Ok(Self::from_raw(code, parsed.word, 0x00))
            }
        }
    }

    /// Parses a raw 4-byte address. Any area code is accepted.
    ///
    /// # Errors
    ///
    /// Returns `FinsError::InvalidAddressLength` unless `data` is exactly 4 bytes.
    pub fn parse_bytes(data: &[u8]) -> Result<Self> {
        match data {
            [area, word_hi, word_lo, bit] => Ok(Self::from_raw(
                *area,
                u16::from_be_bytes([*word_hi, *word_lo]),
                *bit,
            )),
            _ => Err(FinsError::InvalidAddressLength { length: data.len() }),
        }
    }

    /// Serializes the address: area, word (big-endian), bit.
    pub fn to_bytes(self) -> [u8; MEMORY_ADDRESS_SIZE] {
        let [hi, lo] = self.word.to_be_bytes();
        [self.area, hi, lo, self.bit]
    }

    /// Returns the area code.
    pub fn area_code(self) -> u8 {
        self.area
    }

    /// Returns the word number.
    pub fn word(self) -> u16 {
        self.word
    }

    /// Returns the bit number (0 for word addresses).
    pub fn bit(self) -> u8 {
        self.bit
    }

    /// Returns whether the area code denotes one-byte items (bit or flag access).
    pub fn is_bit(self) -> bool {
        is_bit_code(self.area)
    }

    /// Returns the number of payload bytes one item at this address occupies.
    pub fn item_width(self) -> usize {
        if self.is_bit() {
            1
        } else {
            2
        }
    }
}

// Error messages name the area the way the caller typed it.
fn display_name(parsed: &AddressText<'_>) -> String {
    if parsed.prefix.is_empty() {
        parsed.area.to_string()
    } else {
        parsed.prefix.to_string()
    }
}

impl FromStr for MemoryAddress {
    type Err = FinsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_text(s)
    }
}

impl TryFrom<&[u8]> for MemoryAddress {
    type Error = FinsError;

    fn try_from(data: &[u8]) -> Result<Self> {
        Self::parse_bytes(data)
    }
}

impl From<MemoryAddress> for [u8; MEMORY_ADDRESS_SIZE] {
    fn from(addr: MemoryAddress) -> Self {
        addr.to_bytes()
    }
}

impl std::fmt::Display for MemoryAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c, d] = self.to_bytes();
        write!(f, "{a:02x} {b:02x} {c:02x} {d:02x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(text: &str) -> Vec<u8> {
        MemoryAddress::parse_text(text).unwrap().to_bytes().to_vec()
    }

    #[test]
    fn test_word_addresses() {
        assert_eq!(encoded("CIO100"), hex::decode("b0006400").unwrap());
        assert_eq!(encoded("W100"), hex::decode("b1006400").unwrap());
        assert_eq!(encoded("H100"), hex::decode("b2006400").unwrap());
        assert_eq!(encoded("A100"), hex::decode("b3006400").unwrap());
        assert_eq!(encoded("D100"), hex::decode("82006400").unwrap());
        assert_eq!(encoded("T100"), hex::decode("89006400").unwrap());
        assert_eq!(encoded("C100"), hex::decode("89006400").unwrap());
        assert_eq!(encoded("IR100"), hex::decode("dc006400").unwrap());
        assert_eq!(encoded("DR100"), hex::decode("bc006400").unwrap());
        assert_eq!(encoded("TK100"), hex::decode("46006400").unwrap());
        assert_eq!(encoded("EM100"), hex::decode("98006400").unwrap());
    }

    #[test]
    fn test_bit_addresses() {
        assert_eq!(encoded("CIO100.01"), hex::decode("30006401").unwrap());
        assert_eq!(encoded("W100.01"), hex::decode("31006401").unwrap());
        assert_eq!(encoded("H100.01"), hex::decode("32006401").unwrap());
        assert_eq!(encoded("A100.01"), hex::decode("33006401").unwrap());
        assert_eq!(encoded("D100.1"), hex::decode("02006401").unwrap());
        assert_eq!(encoded("TK100.15"), hex::decode("0600640f").unwrap());
        assert_eq!(encoded("EM100.2"), hex::decode("0a006402").unwrap());
    }

    #[test]
    fn test_every_prefix_matches_table() {
        for (prefix, area) in AREA_PREFIXES {
            let word = MemoryAddress::parse_text(&format!("{prefix}513")).unwrap();
            assert_eq!(word.to_bytes(), [area.word_code(), 0x02, 0x01, 0x00]);

            let bit = MemoryAddress::parse_text(&format!("{prefix}513.7"));
            match area.codes().bit {
                Some(code) => assert_eq!(bit.unwrap().to_bytes(), [code, 0x02, 0x01, 0x07]),
                None => assert!(matches!(bit, Err(FinsError::UnsupportedVariant { .. }))),
            }
        }
    }

    #[test]
    fn test_default_area_is_cio() {
        assert_eq!(encoded("100"), encoded("CIO100"));
        assert_eq!(encoded("100.1"), encoded("CIO100.1"));
    }

    #[test]
    fn test_word_is_big_endian() {
        assert_eq!(encoded("D65535"), vec![0x82, 0xFF, 0xFF, 0x00]);
        assert_eq!(encoded("D258"), vec![0x82, 0x01, 0x02, 0x00]);
    }

    #[test]
    fn test_unsupported_area() {
        for text in ["d100", "cio100.1", "X1", "DM100", "Cio5"] {
            match MemoryAddress::parse_text(text) {
                Err(FinsError::UnsupportedArea { .. }) => {}
                other => panic!("{text}: expected UnsupportedArea, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_invalid_format() {
        for text in ["", "CIO", "D.1", "D1.", "D1.2.3", "D1x", "D 1", "D-1", "D65536", "D1.256", "D1.1000"] {
            match MemoryAddress::parse_text(text) {
                Err(FinsError::InvalidAddressFormat { .. }) => {}
                other => panic!("{text:?}: expected InvalidAddressFormat, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_bit_number_is_one_raw_byte() {
        assert_eq!(encoded("D100.16"), vec![0x02, 0x00, 0x64, 0x10]);
        assert_eq!(encoded("D100.255"), vec![0x02, 0x00, 0x64, 0xFF]);
        assert_eq!(encoded("CIO0.31"), vec![0x30, 0x00, 0x00, 0x1F]);
        assert_eq!(
            MemoryAddress::parse_forced("W10.20").unwrap().to_bytes(),
            [0x71, 0x00, 0x0A, 0x14]
        );
        assert_eq!(
            MemoryAddress::new(MemoryArea::HR, 1, Some(200)).unwrap().to_bytes(),
            [0x32, 0x00, 0x01, 0xC8]
        );
    }

    #[test]
    fn test_word_only_area_rejects_bit() {
        let err = MemoryAddress::parse_text("T5.1").unwrap_err();
        assert_eq!(err.to_string(), "T area does not support bit access");
    }

    #[test]
    fn test_forced_variants() {
        let forced = |t: &str| MemoryAddress::parse_forced(t).unwrap().to_bytes();
        assert_eq!(forced("CIO1"), [0xF0, 0x00, 0x01, 0x00]);
        assert_eq!(forced("CIO1.2"), [0x70, 0x00, 0x01, 0x02]);
        assert_eq!(forced("W1"), [0xF1, 0x00, 0x01, 0x00]);
        assert_eq!(forced("H1.3"), [0x72, 0x00, 0x01, 0x03]);

        for text in ["A1", "A1.1", "D1", "T1", "IR1.0"] {
            assert!(matches!(
                MemoryAddress::parse_forced(text),
                Err(FinsError::UnsupportedVariant { .. })
            ));
        }
    }

    #[test]
    fn test_parse_bytes_roundtrip() {
        for raw in [[0u8; 4], [0xFF; 4], [0x82, 0x12, 0x34, 0x56], [0x99, 0x00, 0x01, 0xFE]] {
            assert_eq!(MemoryAddress::parse_bytes(&raw).unwrap().to_bytes(), raw);
        }
    }

    #[test]
    fn test_parse_bytes_wrong_length() {
        for len in [0usize, 3, 5] {
            let data = vec![0xB0; len];
            assert!(matches!(
                MemoryAddress::parse_bytes(&data),
                Err(FinsError::InvalidAddressLength { length }) if length == len
            ));
        }
    }

    #[test]
    fn test_is_bit() {
        assert!(MemoryAddress::parse_text("CIO1.0").unwrap().is_bit());
        assert!(MemoryAddress::parse_text("D1.0").unwrap().is_bit());
        assert!(!MemoryAddress::parse_text("D1").unwrap().is_bit());
        assert!(!MemoryAddress::parse_text("CIO1").unwrap().is_bit());
        assert!(MemoryAddress::parse_bytes(&[0x30, 0, 0, 0]).unwrap().is_bit());
        assert_eq!(MemoryAddress::parse_text("T3").unwrap().item_width(), 2);
    }

    #[test]
    fn test_typed_constructors() {
        let addr = MemoryAddress::new(MemoryArea::HR, 200, None).unwrap();
        assert_eq!(addr.to_bytes(), [0xB2, 0x00, 0xC8, 0x00]);
        assert!(MemoryAddress::new(MemoryArea::CIO, 0, Some(16)).is_err());
        assert!(MemoryAddress::forced(MemoryArea::DM, 0, None).is_err());
        assert_eq!(
            MemoryAddress::forced(MemoryArea::CIO, 0, Some(1)).unwrap().to_bytes(),
            [0x70, 0x00, 0x00, 0x01]
        );
    }

    #[test]
    fn test_em_banks() {
        let bank = |b| MemoryArea::EmBank(EmBank::new(b).unwrap());
        assert_eq!(bank(0x00).word_code(), 0xA0);
        assert_eq!(bank(0x0F).bit_code().unwrap(), 0x2F);
        assert_eq!(bank(0x10).word_code(), 0x60);
        assert_eq!(bank(0x18).bit_code().unwrap(), 0xE8);
        assert!(EmBank::new(0x19).is_err());
        assert_eq!(bank(0x12).prefix(), None);
        assert_eq!(bank(0x12).to_string(), "E12");
    }

    #[test]
    fn test_display_and_from_str() {
        let addr: MemoryAddress = "D100".parse().unwrap();
        assert_eq!(addr.to_string(), "82 00 64 00");
        let raw: &[u8] = &[0x82, 0x00, 0x64, 0x00];
        assert_eq!(MemoryAddress::try_from(raw).unwrap(), addr);
    }
}
