// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Error types for the candm client.
//!
//! Every fallible client operation returns [`ClientError`], whose variants
//! separate the failure classes a caller needs to tell apart: malformed
//! frames, version and reply-kind mismatches, unreachable daemons, exhausted
//! retries, and the domain outcome of a daemon with no selected source.
//!
//! `ClientError` also converts into [`io::Error`] for callers that work in
//! I/O terms; the original value stays reachable through `downcast_ref`:
//!
//! ```no_run
//! use chronymon_client::error::ClientError;
//! use chronymon_client::session::{Session, SessionConfig};
//!
//! fn probe(host: &str) -> std::io::Result<()> {
//!     Session::connect(host, 323, SessionConfig::default())?;
//!     Ok(())
//! }
//!
//! if let Err(e) = probe("localhost") {
//!     if let Some(client_err) = e.get_ref().and_then(|i| i.downcast_ref::<ClientError>()) {
//!         eprintln!("candm error: {client_err}");
//!     }
//! }
//! ```

pub use chronymon_proto::error::ParseError;

use std::fmt;
use std::io;

use chronymon_proto::protocol::Status;

/// Errors that can occur while talking to the daemon.
#[derive(Debug)]
pub enum ClientError {
    /// The reply bytes could not be framed or decoded.
    Frame(ParseError),
    /// The reply carried an unexpected protocol version. Never retried.
    Version {
        /// Version this client speaks.
        expected: u8,
        /// Version found in the reply.
        received: u8,
    },
    /// The reply kind does not answer the command that was sent.
    Protocol(ProtocolError),
    /// No resolved address answered the probe.
    Resolution(ResolutionError),
    /// Every attempt of one exchange timed out.
    Timeout(TimeoutError),
    /// The daemon reports no selected source.
    Selection,
    /// Underlying I/O error (socket creation, send, receive).
    Io(io::Error),
}

/// A reply whose kind does not match the command sent.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProtocolError {
    /// Raw command code that was sent.
    pub command: u16,
    /// Reply kind that answers it.
    pub expected: u16,
    /// Reply kind that arrived.
    pub received: u16,
    /// Status the daemon attached to the reply.
    pub status: Status,
}

/// Every resolved candidate failed the probe.
#[derive(Debug)]
pub struct ResolutionError {
    /// The host as given by the caller.
    pub host: String,
    /// The UDP port.
    pub port: u16,
    /// The failure of the last candidate tried, if any candidate was tried at all.
    pub last_error: Option<Box<ClientError>>,
}

/// Retries were exhausted without a reply.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TimeoutError {
    /// Number of attempts made.
    pub attempts: u16,
    /// Command code of the unanswered request.
    pub command: u16,
}

// ── Display implementations ─────────────────────────────────────────

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Frame(e) => write!(f, "malformed reply: {e}"),
            ClientError::Version { expected, received } => {
                write!(
                    f,
                    "unexpected protocol version {received} (expected {expected})"
                )
            }
            ClientError::Protocol(e) => write!(f, "{e}"),
            ClientError::Resolution(e) => write!(f, "{e}"),
            ClientError::Timeout(e) => write!(f, "{e}"),
            ClientError::Selection => write!(f, "no source selected"),
            ClientError::Io(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unexpected reply kind {} to command {} (expected {}, status: {})",
            self.received, self.command, self.expected, self.status
        )
    }
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no chronyd responded at {}:{}", self.host, self.port)?;
        if let Some(last) = &self.last_error {
            write!(f, " (last error: {last})")?;
        }
        Ok(())
    }
}

impl fmt::Display for TimeoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "command {} timed out after {} attempts",
            self.command, self.attempts
        )
    }
}

// ── Error trait implementations ─────────────────────────────────────

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Frame(e) => Some(e),
            ClientError::Resolution(e) => Some(e),
            ClientError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ProtocolError {}
impl std::error::Error for TimeoutError {}

impl std::error::Error for ResolutionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.last_error
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ── From conversions ────────────────────────────────────────────────

impl From<ClientError> for io::Error {
    fn from(err: ClientError) -> io::Error {
        let kind = match &err {
            ClientError::Frame(_) => io::ErrorKind::InvalidData,
            ClientError::Version { .. } => io::ErrorKind::InvalidData,
            ClientError::Protocol(_) => io::ErrorKind::InvalidData,
            ClientError::Resolution(_) => io::ErrorKind::NotConnected,
            ClientError::Timeout(_) => io::ErrorKind::TimedOut,
            ClientError::Selection => io::ErrorKind::NotFound,
            ClientError::Io(e) => e.kind(),
        };
        // Preserve the original io::Error directly for the Io variant.
        if let ClientError::Io(e) = err {
            return e;
        }
        io::Error::new(kind, err)
    }
}

impl From<io::Error> for ClientError {
    fn from(err: io::Error) -> ClientError {
        ClientError::Io(err)
    }
}

impl From<ParseError> for ClientError {
    fn from(err: ParseError) -> ClientError {
        ClientError::Frame(err)
    }
}

impl From<ProtocolError> for ClientError {
    fn from(err: ProtocolError) -> ClientError {
        ClientError::Protocol(err)
    }
}

impl From<ResolutionError> for ClientError {
    fn from(err: ResolutionError) -> ClientError {
        ClientError::Resolution(err)
    }
}

impl From<TimeoutError> for ClientError {
    fn from(err: TimeoutError) -> ClientError {
        ClientError::Timeout(err)
    }
}

// ── Tests ───────────────────────────────────────────────────────────
