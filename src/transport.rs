//! Transport layer for FINS communication.
//!
//! The codec never touches sockets. A [`Transport`] takes one encoded command frame and
//! returns the bytes of one response. Retries and reconnection are left to the caller.
//! [`Transport::receive`] reads a further reply without sending, which lets the client skip
//! replies that belong to an earlier request.
//!
//! [`UdpTransport`] is the stock implementation: one connected UDP socket with read and write
//! timeouts. Datagrams already queued on the socket are dropped before each request.
//!
//! # Example
//!
//! ```no_run
//! use fins_driver::{Transport, UdpTransport};
//! use std::time::Duration;
//!
//! let transport = UdpTransport::new(
//!     "192.168.1.10:9600".parse().unwrap(),
//!     Duration::from_secs(2),
//! ).unwrap();
//!
//! let request = vec![0x80, 0x00, 0x02, /* ... rest of FINS frame */];
//! let response = transport.send(&request);
//! ```

use std::io::ErrorKind;
use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

use tracing::{debug, trace};

use crate::error::{FinsError, Result};

/// Default FINS UDP port.
pub const DEFAULT_FINS_PORT: u16 = 9600;

/// Default timeout for UDP operations.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Maximum UDP packet size for FINS.
pub const MAX_PACKET_SIZE: usize = 2048;

/// Synchronous request/response exchange of raw frames.
pub trait Transport {
    /// Sends one frame and returns the bytes of the matching response.
    ///
    /// # Errors
    ///
    /// Returns `FinsError::Timeout` when no response arrives in time and `FinsError::Io`
    /// for any other I/O failure.
    fn send(&self, frame: &[u8]) -> Result<Vec<u8>>;

    /// Waits for one more response to the last request without sending anything.
    ///
    /// The default implementation has nothing more to read and returns `FinsError::Timeout`.
    ///
    /// # Errors
    ///
    /// Same as [`Transport::send`].
    fn receive(&self) -> Result<Vec<u8>> {
        Err(FinsError::Timeout)
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, frame: &[u8]) -> Result<Vec<u8>> {
        (**self).send(frame)
    }

    fn receive(&self) -> Result<Vec<u8>> {
        (**self).receive()
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, frame: &[u8]) -> Result<Vec<u8>> {
        (**self).send(frame)
    }

    fn receive(&self) -> Result<Vec<u8>> {
        (**self).receive()
    }
}

/// UDP transport for FINS communication.
pub struct UdpTransport {
    socket: UdpSocket,
    remote_addr: SocketAddr,
}

impl UdpTransport {
    /// Creates a new UDP transport connected to the specified PLC address.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the socket cannot be created or configured.
    pub fn new(plc_addr: SocketAddr, timeout: Duration) -> Result<Self> {
        let bind_addr: SocketAddr = if plc_addr.is_ipv6() {
            (std::net::Ipv6Addr::UNSPECIFIED, 0).into()
        } else {
            (std::net::Ipv4Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(bind_addr)?;
        socket.connect(plc_addr)?;
        socket.set_read_timeout(Some(timeout))?;
        socket.set_write_timeout(Some(timeout))?;

        debug!(
            remote = %plc_addr,
            local = ?socket.local_addr().ok(),
            ?timeout,
            "udp transport ready"
        );

        Ok(Self {
            socket,
            remote_addr: plc_addr,
        })
    }

    /// Creates a new UDP transport with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the socket cannot be created or configured.
    pub fn with_default_timeout(plc_addr: SocketAddr) -> Result<Self> {
        Self::new(plc_addr, DEFAULT_TIMEOUT)
    }

    /// Returns the remote PLC address.
    pub fn remote_addr(&self) -> SocketAddr {
        self.remote_addr
    }

    /// Returns the local address the socket is bound to.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the address cannot be queried.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Discards every datagram already queued on the socket and returns how many were dropped.
    ///
    /// Late replies to timed-out requests end up here instead of being read as the answer to
    /// the next request. [`Transport::send`] calls this before each frame.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the socket mode cannot be switched or a read fails.
    pub fn drain_pending(&self) -> Result<usize> {
        self.socket.set_nonblocking(true)?;
        let mut buffer = [0u8; MAX_PACKET_SIZE];
        let mut drained = 0;
        let outcome = loop {
            match self.socket.recv(&mut buffer) {
                Ok(_) => drained += 1,
                Err(e) if e.kind() == ErrorKind::WouldBlock => break Ok(drained),
                // ICMP port-unreachable from an earlier send
                Err(e) if e.kind() == ErrorKind::ConnectionRefused => continue,
                Err(e) => break Err(FinsError::Io(e)),
            }
        };
        self.socket.set_nonblocking(false)?;

        if drained > 0 {
            debug!(remote = %self.remote_addr, drained, "dropped stale datagrams");
        }
        outcome
    }

    fn recv_frame(&self) -> Result<Vec<u8>> {
        let mut buffer = vec![0u8; MAX_PACKET_SIZE];
        match self.socket.recv(&mut buffer) {
            Ok(size) => {
                buffer.truncate(size);
                trace!(remote = %self.remote_addr, len = size, "received frame");
                Ok(buffer)
            }
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                debug!(remote = %self.remote_addr, "receive timed out");
                Err(FinsError::Timeout)
            }
            Err(e) => {
                debug!(remote = %self.remote_addr, error = %e, "receive failed");
                Err(FinsError::Io(e))
            }
        }
    }
}

impl Transport for UdpTransport {
    fn send(&self, frame: &[u8]) -> Result<Vec<u8>> {
        self.drain_pending()?;
        trace!(remote = %self.remote_addr, len = frame.len(), "sending frame");
        self.socket.send(frame)?;
        self.recv_frame()
    }

    fn receive(&self) -> Result<Vec<u8>> {
        self.recv_frame()
    }
}

impl std::fmt::Debug for UdpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UdpTransport")
            .field("remote_addr", &self.remote_addr)
            .field("local_addr", &self.socket.local_addr().ok())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn loopback() -> UdpSocket {
        UdpSocket::bind("127.0.0.1:0").unwrap()
    }

    fn loopback_addr_of(transport: &UdpTransport) -> SocketAddr {
        let port = transport.local_addr().unwrap().port();
        SocketAddr::from(([127, 0, 0, 1], port))
    }

    #[test]
    fn test_default_constants() {
        assert_eq!(DEFAULT_FINS_PORT, 9600);
        assert_eq!(DEFAULT_TIMEOUT, Duration::from_secs(2));
        assert_eq!(MAX_PACKET_SIZE, 2048);
    }

    #[test]
    fn test_transport_creation() {
        let addr: SocketAddr = "127.0.0.1:9600".parse().unwrap();
        let transport = UdpTransport::new(addr, Duration::from_millis(100)).unwrap();
        assert_eq!(transport.remote_addr(), addr);
        assert!(transport.local_addr().is_ok());
    }

    #[test]
    fn test_transport_debug() {
        let addr: SocketAddr = "127.0.0.1:9600".parse().unwrap();
        let transport = UdpTransport::with_default_timeout(addr).unwrap();
        let debug_str = format!("{transport:?}");
        assert!(debug_str.contains("UdpTransport"));
        assert!(debug_str.contains("127.0.0.1:9600"));
    }

    #[test]
    fn test_send_receives_one_datagram() {
        let plc = loopback();
        let plc_addr = plc.local_addr().unwrap();

        let responder = thread::spawn(move || {
            let mut buf = [0u8; MAX_PACKET_SIZE];
            let (len, peer) = plc.recv_from(&mut buf).unwrap();
            let mut reply = buf[..len].to_vec();
            reply[0] = 0xC0;
            plc.send_to(&reply, peer).unwrap();
        });

        let transport = UdpTransport::new(plc_addr, Duration::from_secs(2)).unwrap();
        let response = transport.send(&[0x80, 0x00, 0x02]).unwrap();
        assert_eq!(response, vec![0xC0, 0x00, 0x02]);
        responder.join().unwrap();
    }

    #[test]
    fn test_silent_peer_times_out() {
        let plc = loopback();
        let transport =
            UdpTransport::new(plc.local_addr().unwrap(), Duration::from_millis(50)).unwrap();

        let result = transport.send(&[0x80]);
        assert!(matches!(result, Err(FinsError::Timeout)));
    }

    #[test]
    fn test_send_skips_datagram_queued_before_request() {
        let plc = loopback();
        let transport = UdpTransport::new(plc.local_addr().unwrap(), Duration::from_secs(2)).unwrap();

        // late reply to a request that already timed out
        plc.send_to(&[0xC0, 0xFF], loopback_addr_of(&transport)).unwrap();
        thread::sleep(Duration::from_millis(50));

        let responder = thread::spawn(move || {
            let mut buf = [0u8; MAX_PACKET_SIZE];
            let (len, peer) = plc.recv_from(&mut buf).unwrap();
            let mut reply = buf[..len].to_vec();
            reply[0] = 0xC0;
            plc.send_to(&reply, peer).unwrap();
        });

        let response = transport.send(&[0x80, 0x01]).unwrap();
        assert_eq!(response, vec![0xC0, 0x01]);
        responder.join().unwrap();
    }

    #[test]
    fn test_drain_pending_counts_datagrams() {
        let plc = loopback();
        let transport = UdpTransport::new(plc.local_addr().unwrap(), Duration::from_secs(2)).unwrap();
        assert_eq!(transport.drain_pending().unwrap(), 0);

        let local = loopback_addr_of(&transport);
        plc.send_to(&[0x01], local).unwrap();
        plc.send_to(&[0x02], local).unwrap();
        thread::sleep(Duration::from_millis(50));

        assert_eq!(transport.drain_pending().unwrap(), 2);
        assert_eq!(transport.drain_pending().unwrap(), 0);
    }

    #[test]
    fn test_receive_reads_second_datagram() {
        let plc = loopback();
        let plc_addr = plc.local_addr().unwrap();

        let responder = thread::spawn(move || {
            let mut buf = [0u8; MAX_PACKET_SIZE];
            let (_, peer) = plc.recv_from(&mut buf).unwrap();
            plc.send_to(&[0xC0, 0x00], peer).unwrap();
            plc.send_to(&[0xC0, 0x01], peer).unwrap();
        });

        let transport = UdpTransport::new(plc_addr, Duration::from_secs(2)).unwrap();
        assert_eq!(transport.send(&[0x80]).unwrap(), vec![0xC0, 0x00]);
        assert_eq!(transport.receive().unwrap(), vec![0xC0, 0x01]);
        responder.join().unwrap();
    }
}
