// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Errors raised while framing or decoding candm packets.
//!
//! [`ParseError`] is the frame-level failure: the bytes on the wire do not
//! have the shape the protocol requires. It converts into [`std::io::Error`]
//! so it can travel through I/O-oriented call chains and be recovered with
//! `downcast_ref`.

use std::fmt;
use std::io;

/// Errors that can occur while decoding a candm packet or reply record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The buffer is too short for the expected data.
    BufferTooShort {
        /// Number of bytes needed.
        needed: usize,
        /// Number of bytes available.
        available: usize,
    },
    /// A reply body does not have the exact length of the record it carries.
    LengthMismatch {
        /// Name of the record being decoded.
        record: &'static str,
        /// Length the record requires.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },
    /// An invalid or unrecognized field value was encountered.
    InvalidField {
        /// Name of the field that was invalid.
        field: &'static str,
        /// The invalid value.
        value: u32,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::BufferTooShort { needed, available } => {
                write!(
                    f,
                    "buffer too short: needed {} bytes, got {}",
                    needed, available
                )
            }
            ParseError::LengthMismatch {
                record,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "{} body must be {} bytes, got {}",
                    record, expected, actual
                )
            }
            ParseError::InvalidField { field, value } => {
                write!(f, "invalid {} value: {}", field, value)
            }
        }
    }
}

impl From<ParseError> for io::Error {
    fn from(err: ParseError) -> io::Error {
        let kind = match &err {
            ParseError::BufferTooShort { .. } => io::ErrorKind::UnexpectedEof,
            ParseError::LengthMismatch { .. } => io::ErrorKind::InvalidData,
            ParseError::InvalidField { .. } => io::ErrorKind::InvalidData,
        };
        io::Error::new(kind, err)
    }
}

impl std::error::Error for ParseError {}
