// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Request/reply sessions over a connected datagram socket.
//!
//! A [`Session`] owns one connected channel to the daemon and drives one
//! exchange at a time. Each exchange sends the request, waits up to the
//! configured timeout for a reply, and retransmits with an incremented attempt
//! counter (but the same sequence number) until the attempt budget runs out.
//! Retries are immediate; there is no backoff.
//!
//! [`Session::connect`] resolves the host, then probes every candidate address
//! in resolution order with a `NULL` request and keeps the first one that
//! answers.

use log::{debug, warn};
use socket2::{Domain, Protocol, Socket, Type};

use crate::error::{ClientError, ParseError, ProtocolError, ResolutionError, TimeoutError};
use crate::protocol::{MAX_REPLY_LEN, PROTOCOL_VERSION, Reply, ReplyKind, Request, decode_reply};
use std::io;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::Duration;

/// Per-attempt receive timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Attempts per exchange before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u16 = 5;

/// Which address families to try when resolving the daemon's host.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum AddressFamily {
    /// Both IPv4 and IPv6, in resolver order.
    #[default]
    Any,
    /// IPv4 only.
    V4,
    /// IPv6 only.
    V6,
}

impl AddressFamily {
    /// Map `-4`/`-6` style flags to a preference. Both or neither means [`AddressFamily::Any`].
    pub fn from_flags(ipv4: bool, ipv6: bool) -> Self {
        match (ipv4, ipv6) {
            (true, false) => AddressFamily::V4,
            (false, true) => AddressFamily::V6,
            _ => AddressFamily::Any,
        }
    }

    /// Whether `addr` belongs to an allowed family.
    pub fn allows(self, addr: &SocketAddr) -> bool {
        match self {
            AddressFamily::Any => true,
            AddressFamily::V4 => addr.is_ipv4(),
            AddressFamily::V6 => addr.is_ipv6(),
        }
    }
}

/// Session settings.
///
/// ```
/// use chronymon_client::session::{AddressFamily, SessionConfig};
/// use std::time::Duration;
///
/// let config = SessionConfig::default()
///     .family(AddressFamily::V4)
///     .timeout(Duration::from_millis(500));
/// assert_eq!(config.max_attempts, 5);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SessionConfig {
    /// How long to wait for each reply.
    pub timeout: Duration,
    /// How many times a request is sent before the exchange fails.
    pub max_attempts: u16,
    /// Address families to consider during resolution.
    pub family: AddressFamily,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            timeout: DEFAULT_TIMEOUT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            family: AddressFamily::Any,
        }
    }
}

impl SessionConfig {
    /// Set the per-attempt receive timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the attempt budget per exchange.
    pub fn max_attempts(mut self, max_attempts: u16) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Restrict resolution to the given address family.
    pub fn family(mut self, family: AddressFamily) -> Self {
        self.family = family;
        self
    }
}

/// A connected datagram endpoint.
///
/// Implemented for [`UdpSocket`]; the receive side is expected to honor a read
/// timeout and report its expiry as `WouldBlock` or `TimedOut`.
pub trait Channel {
    /// Send one datagram.
    fn send(&self, buf: &[u8]) -> io::Result<usize>;
    /// Receive one datagram into `buf`, returning its length.
    fn recv(&self, buf: &mut [u8]) -> io::Result<usize>;
}

impl Channel for UdpSocket {
    fn send(&self, buf: &[u8]) -> io::Result<usize> {
        UdpSocket::send(self, buf)
    }

    fn recv(&self, buf: &mut [u8]) -> io::Result<usize> {
        UdpSocket::recv(self, buf)
    }
}

/// Resolve `host:port` and keep the addresses of the allowed family, in resolver order.
pub fn resolve(host: &str, port: u16, family: AddressFamily) -> io::Result<Vec<SocketAddr>> {
    Ok((host, port)
        .to_socket_addrs()?
        .filter(|addr| family.allows(addr))
        .collect())
}

/// Create a UDP socket connected to `addr` with a read timeout.
fn open_socket(addr: SocketAddr, timeout: Duration) -> io::Result<UdpSocket> {
    let socket = Socket::new(Domain::for_address(addr), Type::DGRAM, Some(Protocol::UDP))?;
    if addr.is_ipv6() {
        socket.set_only_v6(true)?;
    }
    socket.set_read_timeout(Some(timeout))?;
    socket.connect(&addr.into())?;
    Ok(socket.into())
}

fn is_timeout(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    )
}

/// One request/reply channel to the daemon.
#[derive(Debug)]
pub struct Session<C = UdpSocket> {
    channel: C,
    peer: Option<SocketAddr>,
    sequence: u32,
    config: SessionConfig,
}

impl Session<UdpSocket> {
    /// Resolve `host`, probe each candidate address, and keep the first that answers.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Resolution`] when the lookup fails, when no address of the
    /// requested family exists, or when every candidate fails its probe. The error carries
    /// the last candidate's failure.
    pub fn connect(host: &str, port: u16, config: SessionConfig) -> Result<Self, ClientError> {
        let candidates = resolve(host, port, config.family).map_err(|e| ResolutionError {
            host: host.to_string(),
            port,
            last_error: Some(Box::new(ClientError::Io(e))),
        })?;
        debug!("{host}:{port} resolved to {candidates:?}");
        Session::connect_to(&candidates, host, port, config)
    }

    /// Probe `candidates` in order and keep the first that answers.
    ///
    /// A candidate that fails its probe has its socket closed before the next one is
    /// tried. All probes share one sequence counter, seeded once. `host` and `port`
    /// only label the error.
    pub fn connect_to(
        candidates: &[SocketAddr],
        host: &str,
        port: u16,
        config: SessionConfig,
    ) -> Result<Self, ClientError> {
        let mut sequence = rand::random::<u32>();
        let mut last_error = None;
        for &addr in candidates {
            let channel = match open_socket(addr, config.timeout) {
                Ok(channel) => channel,
                Err(e) => {
                    warn!("cannot open socket to {addr}: {e}");
                    last_error = Some(ClientError::Io(e));
                    continue;
                }
            };
            let mut session = Session {
                channel,
                peer: Some(addr),
                sequence,
                config: config.clone(),
            };
            match session.probe() {
                Ok(()) => {
                    debug!("using {addr}");
                    return Ok(session);
                }
                Err(e) => {
                    warn!("abandoning {addr}: {e}");
                    sequence = session.sequence;
                    last_error = Some(e);
                }
            }
        }

        Err(ResolutionError {
            host: host.to_string(),
            port,
            last_error: last_error.map(Box::new),
        }
        .into())
    }
}

impl<C: Channel> Session<C> {
    /// Wrap an already connected channel. No probe is sent.
    pub fn with_channel(channel: C, config: SessionConfig) -> Self {
        Session {
            channel,
            peer: None,
            sequence: rand::random::<u32>(),
            config,
        }
    }

    /// Start numbering requests from `sequence`.
    pub fn with_sequence(mut self, sequence: u32) -> Self {
        self.sequence = sequence;
        self
    }

    /// The address this session is bound to, when created by [`Session::connect`].
    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.peer
    }

    /// The underlying channel.
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// The sequence number the next request will carry.
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// The settings this session runs with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Send `request` and return the first reply with the right protocol version.
    ///
    /// Timeouts are retried up to the attempt budget with the same sequence number and an
    /// incremented attempt counter. A reply with the wrong version fails immediately. The
    /// sequence number advances only after a successful exchange.
    ///
    /// Sequence number and command echo of the reply are not compared with the request, so
    /// a stray datagram with the right version is accepted as the answer.
    pub fn communicate(&mut self, request: &Request) -> Result<Reply, ClientError> {
        let mut buf = [0u8; MAX_REPLY_LEN];
        for attempt in 0..self.config.max_attempts {
            let packet = request.encode(self.sequence, attempt);
            let sent = self.channel.send(&packet)?;
            debug!(
                "sent {} bytes: command {:?}, sequence {}, attempt {}",
                sent, request.command, self.sequence, attempt
            );

            let len = match self.channel.recv(&mut buf) {
                Ok(len) => len,
                Err(e) if is_timeout(&e) => {
                    debug!("attempt {attempt} timed out");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            debug!("recv: {len} bytes");

            let reply = decode_reply(&buf[..len])?;
            if reply.header.version != PROTOCOL_VERSION {
                return Err(ClientError::Version {
                    expected: PROTOCOL_VERSION,
                    received: reply.header.version,
                });
            }

            self.sequence = self.sequence.wrapping_add(1);
            return Ok(reply);
        }

        warn!(
            "{:?} request unanswered after {} attempts",
            request.command, self.config.max_attempts
        );
        Err(TimeoutError {
            attempts: self.config.max_attempts,
            command: request.command as u16,
        }
        .into())
    }

    /// Send `request` and require a reply of `kind`.
    pub fn expect_reply(&mut self, request: &Request, kind: ReplyKind) -> Result<Reply, ClientError> {
        let reply = self.communicate(request)?;
        if !reply.is_kind(kind) {
            return Err(ProtocolError {
                command: request.command as u16,
                expected: kind as u16,
                received: reply.header.reply,
                status: reply.header.status(),
            }
            .into());
        }
        Ok(reply)
    }

    /// Check that the daemon answers a `NULL` request with an empty `NULL` reply.
    fn probe(&mut self) -> Result<(), ClientError> {
        let reply = self.expect_reply(&Request::null(), ReplyKind::Null)?;
        if !reply.body.is_empty() {
            return Err(ParseError::LengthMismatch {
                record: "null",
                expected: 0,
                actual: reply.body.len(),
            }
            .into());
        }
        Ok(())
    }
}
