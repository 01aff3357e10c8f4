// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use byteorder::{ReadBytesExt, WriteBytesExt};
use std::io;

use super::ReplyKind;
use crate::error::ParseError;

/// A trait for writing any of the candm protocol types to network-endian bytes.
///
/// A blanket implementation is provided for all types that implement `byteorder::WriteBytesExt`.
pub trait WriteBytes {
    /// Writes a protocol type to this writer in network byte order.
    fn write_bytes<P: WriteToBytes>(&mut self, protocol: P) -> io::Result<()>;
}

/// A trait for reading any of the candm protocol types from network-endian bytes.
///
/// A blanket implementation is provided for all types that implement `byteorder::ReadBytesExt`.
pub trait ReadBytes {
    /// Reads a protocol type from this reader in network byte order.
    fn read_bytes<P: ReadFromBytes>(&mut self) -> io::Result<P>;
}

/// Protocol types that may be written to network endian bytes.
pub trait WriteToBytes {
    /// Write the value to bytes.
    fn write_to_bytes<W: WriteBytesExt>(&self, writer: W) -> io::Result<()>;
}

/// Protocol types that may be read from network endian bytes.
pub trait ReadFromBytes: Sized {
    /// Read the value from bytes.
    fn read_from_bytes<R: ReadBytesExt>(reader: R) -> io::Result<Self>;
}

/// Types that have a constant size when written to or read from bytes.
pub trait ConstPackedSizeBytes {
    /// The constant size in bytes when this type is packed for network transmission.
    const PACKED_SIZE_BYTES: usize;
}

/// A fixed-layout record carried as the body of one reply kind.
///
/// Decoding is strict: the body must be exactly [`ConstPackedSizeBytes::PACKED_SIZE_BYTES`]
/// long, otherwise [`ParseError::LengthMismatch`] is returned.
pub trait ReplyRecord: ReadFromBytes + WriteToBytes + ConstPackedSizeBytes {
    /// Human-readable record name used in errors.
    const NAME: &'static str;

    /// The reply kind whose body carries this record.
    const REPLY_KIND: ReplyKind;

    /// Decode the record from a reply body.
    fn from_body(body: &[u8]) -> Result<Self, ParseError> {
        if body.len() != Self::PACKED_SIZE_BYTES {
            return Err(ParseError::LengthMismatch {
                record: Self::NAME,
                expected: Self::PACKED_SIZE_BYTES,
                actual: body.len(),
            });
        }
        let mut reader = body;
        reader.read_bytes::<Self>().map_err(|err| {
            // Field validation errors travel inside the io::Error.
            err.get_ref()
                .and_then(|inner| inner.downcast_ref::<ParseError>())
                .cloned()
                .unwrap_or(ParseError::BufferTooShort {
                    needed: Self::PACKED_SIZE_BYTES,
                    available: body.len(),
                })
        })
    }

    /// Encode the record as a reply body.
    fn to_body(&self) -> io::Result<Vec<u8>> {
        let mut body = Vec::with_capacity(Self::PACKED_SIZE_BYTES);
        body.write_bytes(self)?;
        Ok(body)
    }
}
