// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Scripted channel and record builders shared by unit tests.

use crate::protocol::{
    Address, Command, ReferenceId, ReplyHeader, ReplyRecord, SourceData, SourceMode, SourceState,
    SourceStats, encode_reply,
};
use crate::session::Channel;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::net::IpAddr;

/// Replays scripted receive outcomes and records every datagram sent.
/// Once the script runs dry every receive times out.
#[derive(Default)]
pub(crate) struct ScriptedChannel {
    pub(crate) replies: RefCell<VecDeque<io::Result<Vec<u8>>>>,
    pub(crate) sent: RefCell<Vec<Vec<u8>>>,
}

impl ScriptedChannel {
    pub(crate) fn new(replies: Vec<io::Result<Vec<u8>>>) -> Self {
        ScriptedChannel {
            replies: RefCell::new(replies.into()),
            sent: RefCell::new(Vec::new()),
        }
    }
}

impl Channel for ScriptedChannel {
    fn send(&self, buf: &[u8]) -> io::Result<usize> {
        self.sent.borrow_mut().push(buf.to_vec());
        Ok(buf.len())
    }

    fn recv(&self, buf: &mut [u8]) -> io::Result<usize> {
        let next = self
            .replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(timed_out()));
        let data = next?;
        buf[..data.len()].copy_from_slice(&data);
        Ok(data.len())
    }
}

pub(crate) fn timed_out() -> io::Error {
    io::Error::new(io::ErrorKind::WouldBlock, "timed out")
}

/// A successful reply to `command` carrying `record`.
pub(crate) fn reply_with<R: ReplyRecord>(command: Command, record: &R) -> Vec<u8> {
    encode_reply(
        ReplyHeader::for_command(command, 0),
        &record.to_body().unwrap(),
    )
}

pub(crate) fn source(ip: &str, state: SourceState, stratum: u16, offset: f64) -> SourceData {
    SourceData {
        address: Address::from(ip.parse::<IpAddr>().unwrap()),
        poll: 6,
        stratum,
        state,
        mode: SourceMode::Client,
        flags: 0,
        reachability: 0o377,
        since_sample: 32,
        orig_latest_offset: offset,
        latest_offset: offset,
        latest_offset_error: 0.0001,
    }
}

pub(crate) fn stats(ip: &str, standard_deviation: f64) -> SourceStats {
    SourceStats {
        reference_id: ReferenceId(0),
        address: Address::from(ip.parse::<IpAddr>().unwrap()),
        sample_count: 8,
        run_count: 4,
        span_seconds: 512,
        standard_deviation,
        residual_freq_ppm: 0.0,
        skew_ppm: 0.01,
        estimated_offset: 0.0,
        estimated_offset_error: 0.0001,
    }
}
