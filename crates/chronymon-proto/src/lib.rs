// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Wire types and codecs for chrony's command-and-monitoring (candm) protocol.
//!
//! This crate provides the packet framing, the daemon's 32-bit logarithmic
//! float encoding, and typed views over the fixed-layout reply records used
//! by monitoring clients. It performs no I/O.

#![warn(missing_docs)]

/// Error type for packet and record decoding.
pub mod error;

/// Protocol constants, packet framing, and reply record codecs.
pub mod protocol;
