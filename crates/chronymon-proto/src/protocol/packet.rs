// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use std::io;

use super::{
    Command, ConstPackedSizeBytes, PROTOCOL_VERSION, PacketType, REPLY_HEADER_LEN,
    REQUEST_HEADER_LEN, ReadBytes, ReplyKind, ReplyRecord, Status, WriteBytes,
};
use crate::error::ParseError;

/// **Request header** - The fixed 20-byte prefix of every command packet.
///
/// ### Layout
///
/// ```ignore
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |    Version    |  Packet Type  |   Reserved    |   Reserved    |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |            Command            |            Attempt            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                           Sequence                            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                           Reserved                            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                           Reserved                            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct RequestHeader {
    /// Protocol version.
    pub version: u8,
    /// Raw command code.
    pub command: u16,
    /// Retransmission counter, starting at zero.
    pub attempt: u16,
    /// Client-chosen sequence number.
    pub sequence: u32,
}

impl ConstPackedSizeBytes for RequestHeader {
    const PACKED_SIZE_BYTES: usize = REQUEST_HEADER_LEN;
}

/// **Reply header** - The fixed 28-byte prefix of every reply packet.
///
/// ### Layout
///
/// ```ignore
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |    Version    |  Packet Type  |   Reserved    |   Reserved    |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |        Command (echo)         |          Reply Kind           |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |            Status             |           Reserved            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |           Reserved            |           Reserved            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                           Sequence                            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                           Reserved                            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                           Reserved                            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ReplyHeader {
    /// Protocol version.
    pub version: u8,
    /// Raw packet type.
    pub packet_type: u8,
    /// Echo of the request's command code.
    pub command: u16,
    /// Raw reply kind.
    pub reply: u16,
    /// Raw status code.
    pub status: u16,
    /// Echo of the request's sequence number.
    pub sequence: u32,
}

impl ReplyHeader {
    /// A successful reply header for `command` carrying `sequence`.
    pub fn for_command(command: Command, sequence: u32) -> Self {
        ReplyHeader {
            version: PROTOCOL_VERSION,
            packet_type: PacketType::Reply as u8,
            command: command as u16,
            reply: command.reply_kind() as u16,
            status: Status::Success.into(),
            sequence,
        }
    }

    /// The decoded status code.
    pub fn status(&self) -> Status {
        Status::from(self.status)
    }
}

impl ConstPackedSizeBytes for ReplyHeader {
    const PACKED_SIZE_BYTES: usize = REPLY_HEADER_LEN;
}

/// A decoded reply: header plus the raw body that follows it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reply {
    /// The fixed reply header.
    pub header: ReplyHeader,
    /// Everything after the header.
    pub body: Vec<u8>,
}

impl Reply {
    /// Whether the header names `kind`.
    pub fn is_kind(&self, kind: ReplyKind) -> bool {
        self.header.reply == kind as u16
    }

    /// Decode the body as record `R`.
    pub fn record<R: ReplyRecord>(&self) -> Result<R, ParseError> {
        R::from_body(&self.body)
    }
}

/// The argument carried after the request header.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RequestArgument {
    /// The command takes no argument.
    None,
    /// A source index, sent as a signed 32-bit integer.
    Index(i32),
}

/// A request value: which command to send and with what argument.
///
/// The value is built once per query and re-encoded for every retransmission, with the
/// session supplying the sequence number and attempt counter.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Request {
    /// The command to send.
    pub command: Command,
    /// Its argument.
    pub argument: RequestArgument,
}

impl Request {
    /// A no-op request.
    pub const fn null() -> Self {
        Request {
            command: Command::Null,
            argument: RequestArgument::None,
        }
    }

    /// Ask for the number of sources.
    pub const fn n_sources() -> Self {
        Request {
            command: Command::NSources,
            argument: RequestArgument::None,
        }
    }

    /// Ask for the tracking state.
    pub const fn tracking() -> Self {
        Request {
            command: Command::Tracking,
            argument: RequestArgument::None,
        }
    }

    /// Ask for the snapshot of source `index`.
    pub const fn source_data(index: i32) -> Self {
        Request {
            command: Command::SourceData,
            argument: RequestArgument::Index(index),
        }
    }

    /// Ask for the statistics of source `index`.
    pub const fn source_stats(index: i32) -> Self {
        Request {
            command: Command::SourceStats,
            argument: RequestArgument::Index(index),
        }
    }

    /// Serialize with the given sequence number and attempt counter.
    pub fn encode(&self, sequence: u32, attempt: u16) -> Vec<u8> {
        match self.argument {
            RequestArgument::None => encode_request(self.command, sequence, attempt, &[]),
            RequestArgument::Index(index) => {
                encode_request(self.command, sequence, attempt, &index.to_be_bytes())
            }
        }
    }
}

/// Build a request packet: header, `body`, then zero padding up to [`Command::padded_len`].
pub fn encode_request(command: Command, sequence: u32, attempt: u16, body: &[u8]) -> Vec<u8> {
    let header = RequestHeader {
        version: PROTOCOL_VERSION,
        command: command as u16,
        attempt,
        sequence,
    };
    let mut buf = Vec::with_capacity(command.padded_len().max(REQUEST_HEADER_LEN + body.len()));
    write_header(&mut buf, header);
    buf.extend_from_slice(body);
    if buf.len() < command.padded_len() {
        buf.resize(command.padded_len(), 0);
    }
    buf
}

/// Split a request packet into its header and the bytes that follow.
///
/// Used by daemons and test doubles; padding is returned as part of the body.
pub fn decode_request(raw: &[u8]) -> Result<(RequestHeader, &[u8]), ParseError> {
    if raw.len() < REQUEST_HEADER_LEN {
        return Err(ParseError::BufferTooShort {
            needed: REQUEST_HEADER_LEN,
            available: raw.len(),
        });
    }
    if raw[1] != PacketType::Request as u8 {
        return Err(ParseError::InvalidField {
            field: "packet type",
            value: u32::from(raw[1]),
        });
    }
    let header = read_header::<RequestHeader>(raw)?;
    Ok((header, &raw[REQUEST_HEADER_LEN..]))
}

/// Split a reply packet into its header and body.
///
/// Fails with [`ParseError::BufferTooShort`] when fewer than 28 bytes are supplied. No
/// field is validated here; version and kind checks belong to the caller.
pub fn decode_reply(raw: &[u8]) -> Result<Reply, ParseError> {
    if raw.len() < REPLY_HEADER_LEN {
        return Err(ParseError::BufferTooShort {
            needed: REPLY_HEADER_LEN,
            available: raw.len(),
        });
    }
    let header = read_header::<ReplyHeader>(raw)?;
    Ok(Reply {
        header,
        body: raw[REPLY_HEADER_LEN..].to_vec(),
    })
}

/// Build a reply packet from a header and body.
pub fn encode_reply(header: ReplyHeader, body: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(REPLY_HEADER_LEN + body.len());
    write_header(&mut buf, header);
    buf.extend_from_slice(body);
    buf
}

fn write_header<H: super::WriteToBytes>(buf: &mut Vec<u8>, header: H) {
    // Writing into a Vec cannot fail.
    let _ = buf.write_bytes(header);
}

fn read_header<H: super::ReadFromBytes + ConstPackedSizeBytes>(
    raw: &[u8],
) -> Result<H, ParseError> {
    let mut reader = raw;
    reader
        .read_bytes::<H>()
        .map_err(|_: io::Error| ParseError::BufferTooShort {
            needed: H::PACKED_SIZE_BYTES,
            available: raw.len(),
        })
}
