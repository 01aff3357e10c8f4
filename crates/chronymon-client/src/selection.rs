// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Picking the daemon's selected source out of a survey.

use crate::error::ClientError;
use crate::protocol::SourceState;
use crate::query::SourceReport;

/// The figures a peer check is judged on.
#[derive(Clone, Debug, PartialEq)]
pub struct PeerSummary {
    /// Address or reference ID of the selected source.
    pub name: String,
    /// Latest measured offset of the selected source, in seconds. Signed.
    pub offset: f64,
    /// Standard deviation of the selected source's samples, in seconds.
    pub jitter: f64,
    /// Stratum of the selected source.
    pub stratum: u16,
    /// Sources in a truechimer state, across the whole survey.
    pub truechimers: usize,
}

/// The source in the `Selected` state.
///
/// The daemon selects at most one source; should several report `Selected`, the
/// last one in index order wins.
///
/// # Errors
///
/// [`ClientError::Selection`] when no source is selected.
pub fn select_peer(reports: &[SourceReport]) -> Result<&SourceReport, ClientError> {
    reports
        .iter()
        .rev()
        .find(|r| r.data.state == SourceState::Selected)
        .ok_or(ClientError::Selection)
}

/// Number of sources whose state is `Selected`, `Unselected`, or `Selectable`.
pub fn count_truechimers(reports: &[SourceReport]) -> usize {
    reports
        .iter()
        .filter(|r| r.data.state.is_truechimer())
        .count()
}

/// Select the peer and gather its figures.
pub fn summarize(reports: &[SourceReport]) -> Result<PeerSummary, ClientError> {
    let peer = select_peer(reports)?;
    Ok(PeerSummary {
        name: peer.name(),
        offset: peer.data.latest_offset,
        jitter: peer.stats.standard_deviation,
        stratum: peer.data.stratum,
        truechimers: count_truechimers(reports),
    })
}
