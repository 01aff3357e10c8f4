// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Higher-level queries built on [`Session::communicate`].
//!
//! A survey fetches the source count, then for each index in order one
//! `SOURCE_DATA` and one `SOURCE_STATS` exchange. Any failure aborts the
//! whole survey; partial results are not returned.

use log::debug;

use crate::error::{ClientError, ParseError};
use crate::protocol::{NSources, ReplyRecord, Request, SourceData, SourceStats, Tracking};
use crate::session::{Channel, Session};

/// Data and statistics for one source, fetched with the same index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SourceReport {
    /// The source's index in the daemon's list.
    pub index: u32,
    /// Selection state, stratum, and latest offset.
    pub data: SourceData,
    /// Regression statistics.
    pub stats: SourceStats,
}

impl SourceReport {
    /// The source's IP address, or its reference ID for sources without one
    /// (reference clocks).
    pub fn name(&self) -> String {
        match self.data.address.ip() {
            Some(ip) => ip.to_string(),
            None => self.stats.reference_id.to_string(),
        }
    }
}

impl<C: Channel> Session<C> {
    /// Fetch the daemon's tracking record.
    pub fn tracking(&mut self) -> Result<Tracking, ClientError> {
        self.fetch(&Request::tracking())
    }

    /// Fetch the number of configured sources.
    pub fn source_count(&mut self) -> Result<u32, ClientError> {
        self.fetch::<NSources>(&Request::n_sources())
            .map(|n| n.count)
    }

    /// Fetch the data record of the source at `index`.
    pub fn source_data(&mut self, index: u32) -> Result<SourceData, ClientError> {
        self.fetch(&Request::source_data(wire_index(index)?))
    }

    /// Fetch the statistics record of the source at `index`.
    pub fn source_stats(&mut self, index: u32) -> Result<SourceStats, ClientError> {
        self.fetch(&Request::source_stats(wire_index(index)?))
    }

    /// Fetch data and statistics for every source, in index order.
    pub fn survey(&mut self) -> Result<Vec<SourceReport>, ClientError> {
        let count = self.source_count()?;
        debug!("daemon reports {count} sources");
        (0..count)
            .map(|index| {
                Ok(SourceReport {
                    index,
                    data: self.source_data(index)?,
                    stats: self.source_stats(index)?,
                })
            })
            .collect()
    }

    fn fetch<R: ReplyRecord>(&mut self, request: &Request) -> Result<R, ClientError> {
        let reply = self.expect_reply(request, R::REPLY_KIND)?;
        Ok(reply.record::<R>()?)
    }
}

fn wire_index(index: u32) -> Result<i32, ParseError> {
    i32::try_from(index).map_err(|_| ParseError::InvalidField {
        field: "source index",
        value: index,
    })
}
