// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Types and constants that match chronyd's candm wire layout.
//!
//! Provides `ReadBytes` and `WriteBytes` implementations which extend the byteorder crate
//! `ReadBytesExt` and `WriteBytesExt` traits with the ability to read and write the protocol's
//! headers and reply records. Every multi-byte integer on the wire is big-endian.

/// Default UDP port chronyd listens on for command packets.
pub const PORT: u16 = 323;

/// The only protocol version this crate speaks.
pub const PROTOCOL_VERSION: u8 = 6;

/// Length of the fixed request header.
pub const REQUEST_HEADER_LEN: usize = 20;

/// Length of the fixed reply header.
pub const REPLY_HEADER_LEN: usize = 28;

/// Upper bound on any reply this crate needs to receive.
pub const MAX_REPLY_LEN: usize = 1024;

mod float;
mod io;
mod packet;
mod records;
mod traits;
mod types;

pub use self::float::*;
pub use self::packet::*;
pub use self::records::*;
pub use self::traits::*;
pub use self::types::*;
