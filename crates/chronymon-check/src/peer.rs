// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use chronymon_client::error::ClientError;
use chronymon_client::selection::{PeerSummary, summarize};
use chronymon_client::session::{Session, SessionConfig};
use chronymon_client::threshold::{Evaluation, Measurement};
use log::debug;

use crate::cli::{PeerCli, PeerThresholds};
use crate::verdict::Verdict;

/// Run the peer check with the default session settings.
pub fn check_peer(cli: &PeerCli) -> Verdict {
    check_peer_with(cli, cli.connection.session_config())
}

/// Run the peer check with explicit session settings.
pub fn check_peer_with(cli: &PeerCli, config: SessionConfig) -> Verdict {
    let target = cli.connection.target();
    query_peer(cli, config)
        .map(|summary| {
            let evaluation = evaluate_peer(&summary, &cli.thresholds);
            Verdict::new(
                evaluation.severity.into(),
                evaluation.status_line(&format!("{target} chosen peer {}", summary.name)),
            )
        })
        .unwrap_or_else(|err| Verdict::from_error(&target, &err))
}

fn query_peer(cli: &PeerCli, config: SessionConfig) -> Result<PeerSummary, ClientError> {
    let connection = &cli.connection;
    let mut session = Session::connect(&connection.hostname, connection.port, config)?;
    let reports = session.survey()?;
    debug!("surveyed {} sources", reports.len());
    summarize(&reports)
}

/// Judge offset, jitter, stratum, and truechimer count, in that order.
pub fn evaluate_peer(summary: &PeerSummary, thresholds: &PeerThresholds) -> Evaluation {
    let truechimers = u32::try_from(summary.truechimers).unwrap_or(u32::MAX);
    Evaluation::new([
        Measurement::real("offset", summary.offset)
            .unit("s")
            .magnitude()
            .critical(Some(thresholds.ocrit))
            .warning(Some(thresholds.owarn)),
        Measurement::real("jitter", summary.jitter)
            .critical(thresholds.jcrit)
            .warning(thresholds.jwarn),
        Measurement::integer("stratum", u32::from(summary.stratum))
            .critical(thresholds.scrit)
            .warning(thresholds.swarn),
        Measurement::integer("truechimers", truechimers)
            .critical(thresholds.tcrit)
            .warning(thresholds.twarn),
    ])
}
