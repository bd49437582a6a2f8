//! FINS header structures and node addressing.
//!
//! The FINS header is a 10-byte structure that precedes every FINS command and response:
//!
//! | Byte | Field | Description |
//! |------|-------|-------------|
//! | 0 | ICF | Information Control Field |
//! | 1 | RSV | Reserved (always 0x00) |
//! | 2 | GCT | Gateway Count |
//! | 3 | DNA | Destination Network Address |
//! | 4 | DA1 | Destination Node Address |
//! | 5 | DA2 | Destination Unit Address |
//! | 6 | SNA | Source Network Address |
//! | 7 | SA1 | Source Node Address |
//! | 8 | SA2 | Source Unit Address |
//! | 9 | SID | Service ID |
//!
//! No field value is validated: any byte is structurally legal.
//!
//! # Example
//!
//! ```
//! use fins_driver::{FinsHeader, NodeAddress};
//!
//! let source = NodeAddress::new(0, 1, 0);
//! let destination = NodeAddress::new(0, 10, 0);
//!
//! let header = FinsHeader::new_command(destination, source, 0x01);
//! let bytes = header.to_bytes();
//! assert_eq!(FinsHeader::from_bytes(&bytes).unwrap(), header);
//! ```

use crate::error::{FinsError, Result};

/// FINS header size in bytes.
pub const FINS_HEADER_SIZE: usize = 10;

/// Header field names in wire order.
pub const HEADER_FIELDS: [&str; FINS_HEADER_SIZE] =
    ["icf", "rsv", "gct", "dna", "da1", "da2", "sna", "sa1", "sa2", "sid"];

/// Node address for FINS communication.
///
/// Represents a network/node/unit address in the FINS protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeAddress {
    /// Network address (0 = local network).
    pub network: u8,
    /// Node address.
    pub node: u8,
    /// Unit address (0 = CPU unit).
    pub unit: u8,
}

impl NodeAddress {
    /// Creates a new node address.
    ///
    /// # Example
    ///
    /// ```
    /// use fins_driver::NodeAddress;
    ///
    /// // Remote PLC on network 1, node 10, CPU unit
    /// let remote = NodeAddress::new(1, 10, 0);
    /// assert_eq!(remote.node, 10);
    /// ```
    pub fn new(network: u8, node: u8, unit: u8) -> Self {
        Self {
            network,
            node,
            unit,
        }
    }

    /// Creates a local node address (network 0, node 0, unit 0).
    pub fn local() -> Self {
        Self::new(0, 0, 0)
    }
}

impl Default for NodeAddress {
    fn default() -> Self {
        Self::local()
    }
}

/// FINS command/response header (10 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FinsHeader {
    /// Information Control Field.
    /// - Bit 7: 1 = response required
    /// - Bit 6: 0 = command, 1 = response
    pub icf: u8,
    /// Reserved byte.
    pub rsv: u8,
    /// Gateway Count.
    pub gct: u8,
    /// Destination Network Address.
    pub dna: u8,
    /// Destination Node Address.
    pub da1: u8,
    /// Destination Unit Address.
    pub da2: u8,
    /// Source Network Address.
    pub sna: u8,
    /// Source Node Address.
    pub sa1: u8,
    /// Source Unit Address.
    pub sa2: u8,
    /// Service ID (used by callers to match responses with requests).
    pub sid: u8,
}

impl FinsHeader {
    /// Baseline header for callers that do not route across networks:
    /// `80 00 02 00 00 00 00 01 00 00`.
    pub const BASELINE: FinsHeader = FinsHeader {
        icf: 0x80,
        rsv: 0x00,
        gct: 0x02,
        dna: 0x00,
        da1: 0x00,
        da2: 0x00,
        sna: 0x00,
        sa1: 0x01,
        sa2: 0x00,
        sid: 0x00,
    };

    /// Creates a new command header.
    ///
    /// # Arguments
    ///
    /// * `destination` - Destination node address
    /// * `source` - Source node address
    /// * `sid` - Service ID for request/response matching
    ///
    /// # Example
    ///
    /// ```
    /// use fins_driver::{FinsHeader, NodeAddress};
    ///
    /// let header = FinsHeader::new_command(NodeAddress::new(0, 10, 0), NodeAddress::new(0, 1, 0), 7);
    /// assert_eq!(header.to_bytes(), [0x80, 0x00, 0x02, 0x00, 0x0A, 0x00, 0x00, 0x01, 0x00, 0x07]);
    /// ```
    pub fn new_command(destination: NodeAddress, source: NodeAddress, sid: u8) -> Self {
        Self {
            dna: destination.network,
            da1: destination.node,
            da2: destination.unit,
            sna: source.network,
            sa1: source.node,
            sa2: source.unit,
            sid,
            ..Self::BASELINE
        }
    }

    /// Builds a header from ten one-byte slices given in wire order.
    ///
    /// # Errors
    ///
    /// Returns `FinsError::InvalidField` naming the first field whose slice is not
    /// exactly one byte long.
    ///
    /// # Example
    ///
    /// ```
    /// use fins_driver::FinsHeader;
    ///
    /// let fields: [&[u8]; 10] = [b"\x80", b"\x00", b"\x02", b"\x00", b"\x00", b"\x00", b"\x00", b"\x01", b"\x00", b"\x00"];
    /// assert_eq!(FinsHeader::from_fields(fields).unwrap(), FinsHeader::default());
    ///
    /// let bad: [&[u8]; 10] = [b"\x80", b"", b"\x02", b"\x00", b"\x00", b"\x00", b"\x00", b"\x01", b"\x00", b"\x00"];
    /// assert!(FinsHeader::from_fields(bad).is_err());
    /// ```
    pub fn from_fields(fields: [&[u8]; FINS_HEADER_SIZE]) -> Result<Self> {
        let mut bytes = [0u8; FINS_HEADER_SIZE];
        for (i, field) in fields.iter().enumerate() {
            match field {
                [byte] => bytes[i] = *byte,
                _ => {
                    return Err(FinsError::InvalidField {
                        field: HEADER_FIELDS[i],
                        len: field.len(),
                    })
                }
            }
        }
        Self::from_bytes(&bytes)
    }

    /// Returns a copy of this header with a different service ID.
    pub fn with_sid(self, sid: u8) -> Self {
        Self { sid, ..self }
    }

    /// Serializes the header to bytes.
    pub fn to_bytes(self) -> [u8; FINS_HEADER_SIZE] {
        [
            self.icf, self.rsv, self.gct, self.dna, self.da1, self.da2, self.sna, self.sa1,
            self.sa2, self.sid,
        ]
    }

    /// Parses a header from the first 10 bytes of `data`.
    ///
    /// # Errors
    ///
    /// Returns `FinsError::TruncatedFrame` if the slice is shorter than 10 bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use fins_driver::FinsHeader;
    ///
    /// let bytes = [0xC0, 0x00, 0x02, 0x00, 0x01, 0x00, 0x00, 0x0A, 0x00, 0x01];
    /// let header = FinsHeader::from_bytes(&bytes).unwrap();
    /// assert_eq!(header.icf, 0xC0);
    /// ```
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < FINS_HEADER_SIZE {
            return Err(FinsError::truncated_frame(FINS_HEADER_SIZE, data.len()));
        }

        Ok(Self {
            icf: data[0],
            rsv: data[1],
            gct: data[2],
            dna: data[3],
            da1: data[4],
            da2: data[5],
            sna: data[6],
            sa1: data[7],
            sa2: data[8],
            sid: data[9],
        })
    }

    /// Returns whether this is a response header.
    pub fn is_response(self) -> bool {
        (self.icf & 0x40) != 0
    }

    /// Returns the destination node address.
    pub fn destination(self) -> NodeAddress {
        NodeAddress::new(self.dna, self.da1, self.da2)
    }

    /// Returns the source node address.
    pub fn source(self) -> NodeAddress {
        NodeAddress::new(self.sna, self.sa1, self.sa2)
    }
}

impl Default for FinsHeader {
    fn default() -> Self {
        Self::BASELINE
    }
}

impl std::fmt::Display for FinsHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, byte) in self.to_bytes().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}
