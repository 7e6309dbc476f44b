//! Blocking client transport for the skiffd framed protocol
//!
//! One `Connection` carries many sequential command/response exchanges over
//! a single TCP stream. All wire integers are 4 bytes in network order, and
//! text payloads travel as `[u32 len][len Latin-1 bytes]`. The exchanges must
//! never desynchronize, so any mid-frame failure is terminal for the
//! connection: the caller drops it and reconnects from scratch.

use crate::charset;
use crate::protocol::{CONNECT_TIMEOUT, DEFAULT_PORT};
use std::io::{Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use thiserror::Error;

/// Transport-level failures. Every variant except none is connection-fatal;
/// nonzero remote status codes are not errors at this layer (see
/// [`Connection::recv_status`]).
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("cannot resolve {0}")]
    Resolve(String),
    #[error("failed to connect to server {target}: {source}")]
    Connect {
        target: String,
        source: std::io::Error,
    },
    #[error("timed out connecting to server {0}")]
    ConnectTimedOut(String),
    #[error("connection closed by server")]
    PeerClosed,
    #[error("connection timed out")]
    TimedOut,
    #[error("short write: sent {sent} of {expected} bytes")]
    ShortWrite { sent: usize, expected: usize },
    #[error("network error: {0}")]
    Network(#[from] std::io::Error),
}

/// Splits a `host` or `host:port` target. The port is parsed base-10 and
/// truncated at the first non-digit; a missing suffix yields the default
/// port, an empty or unparsable one yields 0 (and fails at connect).
pub fn parse_target(target: &str) -> (String, u16) {
    match target.split_once(':') {
        Some((host, suffix)) => {
            let digits: &str = &suffix[..suffix
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(suffix.len())];
            (host.to_string(), digits.parse::<u32>().unwrap_or(0) as u16)
        }
        None => (target.to_string(), DEFAULT_PORT),
    }
}

/// One established session with a skiffd daemon.
///
/// Construction either yields a live, blocking-mode socket or an error;
/// there is no observable half-open state. The value owns the socket for
/// the session lifetime, and I/O helpers borrow it per call.
#[derive(Debug)]
pub struct Connection {
    stream: TcpStream,
    target: String,
    // One-shot diagnostic gate: the first I/O fault on this connection is
    // reported to stderr, repeats are silent. Reset per connection by
    // construction.
    fault_reported: bool,
}

impl Connection {
    /// Connects to `host` or `host:port` under the 5-second readiness bound.
    ///
    /// Resolution takes the first address, with no retry on failure. The
    /// connect itself runs non-blocking with a bounded writability wait and
    /// a pending-error check (`TcpStream::connect_timeout`); the socket is
    /// then restored to blocking mode for the data-transfer phase. Any
    /// terminal path drops the socket before returning.
    pub fn connect(target: &str) -> Result<Connection, TransportError> {
        let (host, port) = parse_target(target);
        let label = format!("{host}:{port}");

        let addr = (host.as_str(), port)
            .to_socket_addrs()
            .map_err(|_| TransportError::Resolve(label.clone()))?
            .next()
            .ok_or_else(|| TransportError::Resolve(label.clone()))?;

        let stream = TcpStream::connect_timeout(&addr, CONNECT_TIMEOUT).map_err(|e| {
            if e.kind() == std::io::ErrorKind::TimedOut {
                TransportError::ConnectTimedOut(label.clone())
            } else {
                TransportError::Connect {
                    target: label.clone(),
                    source: e,
                }
            }
        })?;

        // Data transfer relies on blocking semantics; if we cannot restore
        // them the connection is unusable.
        stream.set_nonblocking(false).map_err(|e| TransportError::Connect {
            target: label.clone(),
            source: e,
        })?;
        // Command/response frames are tiny; don't let Nagle sit on them.
        stream.set_nodelay(true).ok();

        Ok(Connection {
            stream,
            target: label,
            fault_reported: false,
        })
    }

    /// Whether a fault diagnostic has already been emitted for this
    /// connection.
    pub fn fault_reported(&self) -> bool {
        self.fault_reported
    }

    fn report_fault(&mut self, err: &TransportError) {
        if self.fault_reported {
            return;
        }
        self.fault_reported = true;
        match err {
            TransportError::PeerClosed => {
                eprintln!("connection closed by server {}", self.target);
            }
            TransportError::TimedOut => {
                eprintln!(
                    "connection timeout - server {} may have crashed or the network was lost",
                    self.target
                );
            }
            other => eprintln!("{other}"),
        }
    }

    /// Sends the whole buffer or fails. A short write means the stream can
    /// no longer be trusted to be frame-aligned, so there is no retry.
    pub fn send_exact(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        match self.stream.write(bytes) {
            Ok(n) if n == bytes.len() => Ok(()),
            Ok(n) => {
                let err = TransportError::ShortWrite {
                    sent: n,
                    expected: bytes.len(),
                };
                self.report_fault(&err);
                Err(err)
            }
            Err(e) => {
                let err = TransportError::from(e);
                self.report_fault(&err);
                Err(err)
            }
        }
    }

    /// Receives exactly `length` bytes, accumulating across partial reads.
    /// Never returns a short buffer: the outcomes are the full buffer,
    /// `PeerClosed`, or an error. The socket is blocking here, so the loop
    /// only accumulates.
    pub fn recv_exact(&mut self, length: usize) -> Result<Vec<u8>, TransportError> {
        let mut buffer = vec![0u8; length];
        let mut total = 0;
        while total < length {
            match self.stream.read(&mut buffer[total..]) {
                Ok(0) => {
                    let err = TransportError::PeerClosed;
                    self.report_fault(&err);
                    return Err(err);
                }
                Ok(n) => total += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e)
                    if e.kind() == std::io::ErrorKind::WouldBlock
                        || e.kind() == std::io::ErrorKind::TimedOut =>
                {
                    let err = TransportError::TimedOut;
                    self.report_fault(&err);
                    return Err(err);
                }
                Err(e) => {
                    let err = TransportError::from(e);
                    self.report_fault(&err);
                    return Err(err);
                }
            }
        }
        Ok(buffer)
    }

    /// Sends one u32 in network order.
    pub fn send_u32(&mut self, value: u32) -> Result<(), TransportError> {
        self.send_exact(&value.to_be_bytes())
    }

    /// Receives one u32 in network order.
    pub fn recv_u32(&mut self) -> Result<u32, TransportError> {
        let bytes = self.recv_exact(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Receives one i32 in network order.
    pub fn recv_i32(&mut self) -> Result<i32, TransportError> {
        let bytes = self.recv_exact(4)?;
        Ok(i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Emits a bare command frame: `[u32 code]`.
    pub fn send_command(&mut self, code: u32) -> Result<(), TransportError> {
        self.send_u32(code)
    }

    /// Emits a command-with-argument frame:
    /// `[u32 code][u32 encodedLen][encodedLen Latin-1 bytes]`.
    ///
    /// Returns the count of argument characters that had no Latin-1
    /// representation and were dropped from the wire form.
    pub fn send_command_with_text(
        &mut self,
        code: u32,
        text: &str,
    ) -> Result<usize, TransportError> {
        self.send_u32(code)?;
        self.send_text(text)
    }

    /// Emits a length-prefixed Latin-1 string. The length counts encoded
    /// bytes, not source UTF-8 bytes.
    pub fn send_text(&mut self, text: &str) -> Result<usize, TransportError> {
        let encoded = charset::utf8_to_latin1(text);
        self.send_u32(encoded.bytes.len() as u32)?;
        self.send_exact(&encoded.bytes)?;
        Ok(encoded.lost)
    }

    /// Blocks for the 4-byte status reply. 0 is success; a nonzero status
    /// is a remote-side failure the caller interprets through
    /// [`crate::protocol::error_string`] - the connection stays usable.
    pub fn recv_status(&mut self) -> Result<u32, TransportError> {
        self.recv_u32()
    }

    /// Receives `length` Latin-1 bytes and converts them to UTF-8. A zero
    /// length yields an empty string without touching the socket.
    pub fn recv_text(&mut self, length: u32) -> Result<String, TransportError> {
        if length == 0 {
            return Ok(String::new());
        }
        let bytes = self.recv_exact(length as usize)?;
        Ok(charset::latin1_to_utf8(&bytes))
    }

    /// Shuts the session down. Errors are ignored; the socket is gone
    /// either way.
    pub fn close(self) {
        let _ = self.stream.shutdown(Shutdown::Both);
    }
}
