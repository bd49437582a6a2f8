//! # FINS Protocol Codec
//!
//! A Rust library for building and parsing frames of the FINS (Factory Interface Network Service)
//! protocol spoken by Omron PLCs.
//!
//! The codec is pure: it turns addresses and commands into bytes and bytes into responses.
//! Sockets live behind the [`Transport`] trait, and [`FinsClient`] glues the two together with
//! one request per call, skipping late replies to earlier requests. No automatic retries, caching
//! or reconnection.
//!
//! ## Features
//!
//! - **Text addresses** — `"D100"`, `"CIO0.05"`, `"W20"` parsed into 4-byte memory addresses
//! - **Complete opcode table** — every FINS command code, with builders for memory, run/stop and forced I/O
//! - **Lazy payload adapters** — response data decoded on demand, once, only on normal completion
//! - **No panics** — all errors returned as `Result<T, FinsError>`
//!
//! ## Quick Start
//!
//! ```no_run
//! use fins_driver::{ClientConfig, FinsClient};
//! use std::net::Ipv4Addr;
//!
//! fn main() -> fins_driver::Result<()> {
//!     let config = ClientConfig::new(Ipv4Addr::new(192, 168, 250, 1), 1, 0);
//!     let client = FinsClient::new(config)?;
//!
//!     // Read D0 (1 word from DM area)
//!     let response = client.memory_area_read("D0", 1)?;
//!     println!("D0 = {:?}, status: {}", response.to_words()?, response.status_text());
//!
//!     // Write a single bit
//!     client.memory_area_write("CIO100.1", &[0x01], 1)?.check_error()?;
//!
//!     // Read a word and a bit in one request
//!     let response = client.multiple_memory_area_read(&["D100", "CIO0.05"])?;
//!     println!("{:?}", response.friendly_data()?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Codec Only
//!
//! Frames can be built and parsed without any I/O:
//!
//! ```
//! use fins_driver::{Command, FinsHeader, FinsResponse, MemoryAddress, Words};
//!
//! let address: MemoryAddress = "D100".parse()?;
//! let command = Command::memory_area_read(FinsHeader::default(), address, 2)?;
//! assert_eq!(command.len(), 18);
//!
//! let reply = [
//!     0xC0, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00,
//!     0x01, 0x01, 0x00, 0x00,
//!     0x12, 0x34, 0x56, 0x78,
//! ];
//! let response = FinsResponse::from_bytes_with(&reply, Words)?;
//! assert_eq!(response.friendly_data()?, Some(&vec![0x1234, 0x5678]));
//! # Ok::<(), fins_driver::FinsError>(())
//! ```
//!
//! ## Memory Areas
//!
//! | Prefix | Area | Word Access | Bit Access |
//! |--------|------|:-----------:|:----------:|
//! | `CIO` | Core I/O | ✓ | ✓ |
//! | `W` | Work area | ✓ | ✓ |
//! | `H` | Holding area | ✓ | ✓ |
//! | `A` | Auxiliary relay | ✓ | ✓ |
//! | `D` | Data memory | ✓ | ✓ |
//! | `T`, `C` | Timer / counter | ✓ | ✗ |
//! | `IR` | Index register | ✓ | ✗ |
//! | `DR` | Data register | ✓ | ✗ |
//! | `TK` | Task flag | ✓ | ✓ |
//! | `EM` | Extended memory, current bank | ✓ | ✓ |
//!
//! Numbered EM banks are reached through [`MemoryArea::EmBank`].
//!
//! ## Error Handling
//!
//! Malformed input fails with a dedicated [`FinsError`] variant. A PLC reporting an error is a
//! successfully decoded response whose [`FinsResponse::ok`] is `false`;
//! [`FinsResponse::check_error`] converts it into [`FinsError::PlcError`].
//!
//! ## Logging
//!
//! [`UdpTransport`] and [`FinsClient`] emit `tracing` events; the codec itself does not log.
//! The library installs no subscriber.

#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod adapter;
mod client;
mod command;
mod error;
mod header;
mod memory;
mod response;
mod status;
mod transport;

// Public re-exports
pub use adapter::{Bit, DataAdapter, MultipleRead, RawData, Words};
pub use client::{ClientConfig, FinsClient};
pub use command::{
    Command, CommandCode, ForceCode, PlcMode, SetResetSpec, COMMAND_CODE_SIZE, PROGRAM_ALL,
};
pub use error::{FinsError, Result};
pub use header::{FinsHeader, NodeAddress, FINS_HEADER_SIZE, HEADER_FIELDS};
pub use memory::{
    AreaCodes, EmBank, MemoryAddress, MemoryArea, AREA_PREFIXES, MAX_EM_BANK, MEMORY_ADDRESS_SIZE,
};
pub use response::{FinsResponse, MIN_RESPONSE_SIZE, STATUS_SIZE};
pub use status::{status_text, NORMAL_COMPLETION, STATUS_CODES, UNKNOWN_STATUS};
pub use transport::{Transport, UdpTransport, DEFAULT_FINS_PORT, DEFAULT_TIMEOUT, MAX_PACKET_SIZE};
