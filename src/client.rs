//! FINS client: the codec bound to a transport.
//!
//! [`FinsClient`] turns text addresses into command frames, hands each frame to its
//! [`Transport`] and decodes the reply. It stamps a fresh Service ID on every request.
//! Replies carrying another Service ID are late answers to earlier requests; they are
//! dropped and the client keeps reading until its own reply arrives or the transport times out.
//!
//! The client does not interpret status codes: a PLC-side failure comes back as a
//! [`FinsResponse`] whose [`ok`](FinsResponse::ok) is `false`. Call
//! [`check_error`](FinsResponse::check_error) to turn it into an error.
//!
//! # Example
//!
//! ```no_run
//! use fins_driver::{ClientConfig, FinsClient, PlcMode};
//! use std::net::Ipv4Addr;
//!
//! let config = ClientConfig::new(Ipv4Addr::new(192, 168, 250, 1), 1, 0);
//! let client = FinsClient::new(config)?;
//!
//! let response = client.memory_area_read("D0", 1)?;
//! println!("D0 = {:?} ({})", response.to_words()?, response.status_text());
//!
//! client.memory_area_write("CIO100.1", &[0x01], 1)?.check_error()?;
//! client.run(PlcMode::Monitor, None)?;
//! # Ok::<(), fins_driver::FinsError>(())
//! ```
//!
//! # Thread Safety
//!
//! The Service ID counter is atomic, so a client can be shared between threads as long as
//! its transport can. Transport calls block.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use tracing::{debug, warn};

use crate::adapter::{DataAdapter, MultipleRead, RawData};
use crate::command::{Command, PlcMode, SetResetSpec};
use crate::error::{FinsError, Result};
use crate::header::{FinsHeader, NodeAddress};
use crate::memory::MemoryAddress;
use crate::response::FinsResponse;
use crate::transport::{Transport, UdpTransport, DEFAULT_FINS_PORT, DEFAULT_TIMEOUT};

/// Replies with a foreign Service ID skipped per request before giving up.
const MAX_STALE_REPLIES: usize = 255;

/// Configuration for creating a FINS client.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClientConfig {
    /// PLC socket address.
    pub plc_addr: SocketAddr,
    /// Source node address (this client).
    pub source: NodeAddress,
    /// Destination node address (the PLC).
    pub destination: NodeAddress,
    /// Gateway count written into every header.
    pub gateway_count: u8,
    /// Communication timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Creates a new client configuration on the default port and timeout.
    ///
    /// # Arguments
    ///
    /// * `plc_ip` - PLC IP address (port defaults to 9600)
    /// * `source_node` - Source node number (this client)
    /// * `dest_node` - Destination node number (the PLC)
    ///
    /// # Example
    ///
    /// ```
    /// use fins_driver::ClientConfig;
    /// use std::net::Ipv4Addr;
    ///
    /// let config = ClientConfig::new(Ipv4Addr::new(192, 168, 250, 1), 1, 0);
    /// assert_eq!(config.plc_addr.port(), 9600);
    /// assert_eq!(config.gateway_count, 0x02);
    /// ```
    pub fn new(plc_ip: std::net::Ipv4Addr, source_node: u8, dest_node: u8) -> Self {
        Self {
            plc_addr: SocketAddr::from((plc_ip, DEFAULT_FINS_PORT)),
            source: NodeAddress::new(0, source_node, 0),
            destination: NodeAddress::new(0, dest_node, 0),
            gateway_count: FinsHeader::BASELINE.gct,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom PLC port (default is 9600).
    pub fn with_port(mut self, port: u16) -> Self {
        self.plc_addr.set_port(port);
        self
    }

    /// Sets a custom timeout (default is 2 seconds).
    ///
    /// # Example
    ///
    /// ```
    /// use fins_driver::ClientConfig;
    /// use std::net::Ipv4Addr;
    /// use std::time::Duration;
    ///
    /// let config = ClientConfig::new(Ipv4Addr::new(192, 168, 250, 1), 1, 0)
    ///     .with_timeout(Duration::from_secs(5));
    /// ```
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the gateway count (default is 2).
    pub fn with_gateway_count(mut self, gateway_count: u8) -> Self {
        self.gateway_count = gateway_count;
        self
    }

    /// Sets the source network address.
    pub fn with_source_network(mut self, network: u8) -> Self {
        self.source.network = network;
        self
    }

    /// Sets the source unit address.
    pub fn with_source_unit(mut self, unit: u8) -> Self {
        self.source.unit = unit;
        self
    }

    /// Sets the destination network address.
    pub fn with_dest_network(mut self, network: u8) -> Self {
        self.destination.network = network;
        self
    }

    /// Sets the destination unit address.
    pub fn with_dest_unit(mut self, unit: u8) -> Self {
        self.destination.unit = unit;
        self
    }

    /// Builds the command header for one request.
    ///
    /// # Example
    ///
    /// ```
    /// use fins_driver::ClientConfig;
    /// use std::net::Ipv4Addr;
    ///
    /// let config = ClientConfig::new(Ipv4Addr::LOCALHOST, 1, 10).with_dest_network(3);
    /// assert_eq!(
    ///     config.header(7).to_bytes(),
    ///     [0x80, 0x00, 0x02, 0x03, 0x0A, 0x00, 0x00, 0x01, 0x00, 0x07]
    /// );
    /// ```
    pub fn header(&self, sid: u8) -> FinsHeader {
        FinsHeader {
            gct: self.gateway_count,
            ..FinsHeader::new_command(self.destination, self.source, sid)
        }
    }
}

/// FINS client over a [`Transport`].
///
/// Each operation produces exactly 1 request and 1 response.
/// No automatic retries, caching, or reconnection.
pub struct FinsClient<T: Transport = UdpTransport> {
    transport: T,
    config: ClientConfig,
    sid_counter: AtomicU8,
}

impl FinsClient {
    /// Creates a client over UDP.
    ///
    /// # Errors
    ///
    /// Returns an error if the UDP transport cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = UdpTransport::new(config.plc_addr, config.timeout)?;
        Ok(Self::with_transport(transport, config))
    }
}

impl<T: Transport> FinsClient<T> {
    /// Creates a client over an existing transport. `config.plc_addr` and `config.timeout`
    /// are not consulted; the transport owns those.
    pub fn with_transport(transport: T, config: ClientConfig) -> Self {
        Self {
            transport,
            config,
            sid_counter: AtomicU8::new(0),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Builds the header for the next request, consuming one Service ID.
    pub fn next_header(&self) -> FinsHeader {
        let sid = self.sid_counter.fetch_add(1, Ordering::Relaxed);
        self.config.header(sid)
    }

    /// Sends a prepared command and decodes the reply with the raw-bytes adapter.
    ///
    /// # Errors
    ///
    /// Returns transport errors, `FinsError::TruncatedFrame` for short replies and
    /// `FinsError::SidMismatch` when only replies to other requests arrive before the timeout.
    pub fn send(&self, command: &Command) -> Result<FinsResponse> {
        self.send_with(command, RawData)
    }

    /// Sends a prepared command and decodes the reply with `adapter`.
    ///
    /// # Errors
    ///
    /// As [`send`](Self::send), plus `FinsError::AdapterMismatch` when the adapter rejects
    /// the echoed command code.
    pub fn send_with<A: DataAdapter>(
        &self,
        command: &Command,
        adapter: A,
    ) -> Result<FinsResponse<A>> {
        debug!(command = %command.code(), sid = command.sid(), len = command.len(), "sending command");

        let expected = command.sid();
        let mut bytes = self.transport.send(&command.to_bytes())?;
        let mut skipped = 0;
        loop {
            let received = FinsHeader::from_bytes(&bytes)?.sid;
            if received == expected {
                break;
            }
            warn!(expected, received, "discarding reply for another request");
            skipped += 1;
            if skipped > MAX_STALE_REPLIES {
                return Err(FinsError::sid_mismatch(expected, received));
            }
            bytes = match self.transport.receive() {
                Ok(next) => next,
                Err(FinsError::Timeout) => {
                    return Err(FinsError::sid_mismatch(expected, received))
                }
                Err(e) => return Err(e),
            };
        }
        let response = FinsResponse::from_bytes_with(&bytes, adapter)?;

        debug!(
            command = format_args!("0x{:04X}", response.command_code()),
            status = format_args!("0x{:04X}", response.status()),
            status_text = response.status_text(),
            len = response.data().len(),
            "received response"
        );
        Ok(response)
    }

    /// Reads `count` items starting at a text address.
    ///
    /// Word addresses read words; bit addresses (`"CIO0.05"`) read one byte per bit.
    ///
    /// # Errors
    ///
    /// Address parsing errors, `FinsError::InvalidCount` for a zero count, and the errors
    /// of [`send`](Self::send).
    pub fn memory_area_read(&self, address: &str, count: u16) -> Result<FinsResponse> {
        let address = MemoryAddress::parse_text(address)?;
        self.send(&Command::memory_area_read(self.next_header(), address, count)?)
    }

    /// Writes `data` covering `count` items starting at a text address.
    ///
    /// `data` is not checked against `count`.
    ///
    /// # Errors
    ///
    /// As [`memory_area_read`](Self::memory_area_read).
    pub fn memory_area_write(&self, address: &str, data: &[u8], count: u16) -> Result<FinsResponse> {
        let address = MemoryAddress::parse_text(address)?;
        self.send(&Command::memory_area_write(self.next_header(), address, count, data)?)
    }

    /// Fills `count` items starting at a text address with the unit value `data`.
    ///
    /// # Errors
    ///
    /// As [`memory_area_read`](Self::memory_area_read).
    pub fn memory_area_fill(&self, address: &str, data: &[u8], count: u16) -> Result<FinsResponse> {
        let address = MemoryAddress::parse_text(address)?;
        self.send(&Command::memory_area_fill(self.next_header(), address, count, data)?)
    }

    /// Reads several text addresses in one request. The reply carries a [`MultipleRead`]
    /// adapter, so [`friendly_data`](FinsResponse::friendly_data) yields one value per
    /// address.
    ///
    /// # Errors
    ///
    /// Address parsing errors, `FinsError::InvalidCount` for an empty list, and the errors
    /// of [`send_with`](Self::send_with).
    pub fn multiple_memory_area_read(
        &self,
        addresses: &[&str],
    ) -> Result<FinsResponse<MultipleRead>> {
        let addresses = addresses
            .iter()
            .map(|text| MemoryAddress::parse_text(text))
            .collect::<Result<Vec<_>>>()?;
        let command = Command::multiple_memory_area_read(self.next_header(), &addresses)?;
        self.send_with(&command, MultipleRead::new(addresses))
    }

    /// Copies `count` words from one text address to another inside the PLC.
    ///
    /// # Errors
    ///
    /// As [`memory_area_read`](Self::memory_area_read).
    pub fn memory_area_transfer(
        &self,
        source: &str,
        destination: &str,
        count: u16,
    ) -> Result<FinsResponse> {
        let source = MemoryAddress::parse_text(source)?;
        let destination = MemoryAddress::parse_text(destination)?;
        self.send(&Command::memory_area_transfer(
            self.next_header(),
            source,
            destination,
            count,
        )?)
    }

    /// Switches the PLC to `mode`. `program: None` addresses every program.
    ///
    /// # Errors
    ///
    /// The errors of [`send`](Self::send).
    pub fn run(&self, mode: PlcMode, program: Option<u16>) -> Result<FinsResponse> {
        self.send(&Command::run(self.next_header(), program, mode))
    }

    /// Switches the PLC to the mode named by a token (`"debug"`, `"monitor"`, `"run"`).
    ///
    /// # Errors
    ///
    /// `FinsError::UnknownMode` for an unrecognized token, otherwise the errors of
    /// [`send`](Self::send).
    pub fn run_mode(&self, mode: &str, program: Option<u16>) -> Result<FinsResponse> {
        self.run(mode.parse()?, program)
    }

    /// Stops the PLC.
    ///
    /// # Errors
    ///
    /// The errors of [`send`](Self::send).
    pub fn stop(&self) -> Result<FinsResponse> {
        self.send(&Command::stop(self.next_header()))
    }

    /// Forces bits on or off, in the given order.
    ///
    /// # Errors
    ///
    /// `FinsError::InvalidCount` for an empty list, otherwise the errors of
    /// [`send`](Self::send).
    pub fn forced_set_reset(&self, specs: &[SetResetSpec]) -> Result<FinsResponse> {
        self.send(&Command::forced_set_reset(self.next_header(), specs)?)
    }

    /// Cancels every forced bit.
    ///
    /// # Errors
    ///
    /// The errors of [`send`](Self::send).
    pub fn forced_set_reset_cancel(&self) -> Result<FinsResponse> {
        self.send(&Command::forced_set_reset_cancel(self.next_header()))
    }

    /// Returns the source node address.
    pub fn source(&self) -> NodeAddress {
        self.config.source
    }

    /// Returns the destination node address.
    pub fn destination(&self) -> NodeAddress {
        self.config.destination
    }
}

impl<T: Transport + std::fmt::Debug> std::fmt::Debug for FinsClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinsClient")
            .field("transport", &self.transport)
            .field("source", &self.config.source)
            .field("destination", &self.config.destination)
            .finish()
    }
}
