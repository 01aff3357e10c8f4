// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use chronymon_client::error::ClientError;
use chronymon_client::session::{Session, SessionConfig};
use chronymon_client::threshold::{Severity, ValueRange, evaluate};
use log::debug;

use crate::cli::StratumCli;
use crate::verdict::{ExitStatus, Verdict};

/// Run the stratum check with the default session settings.
pub fn check_stratum(cli: &StratumCli) -> Verdict {
    check_stratum_with(cli, cli.connection.session_config())
}

/// Run the stratum check with explicit session settings.
pub fn check_stratum_with(cli: &StratumCli, config: SessionConfig) -> Verdict {
    let target = cli.connection.target();
    match query_stratum(cli, config) {
        Ok(stratum) => {
            let status = ExitStatus::from(stratum_severity(stratum, cli.swarn, cli.scrit));
            Verdict::new(
                status,
                format!("{status} {target} stratum is {stratum}|stratum={stratum}"),
            )
        }
        Err(err) => Verdict::from_error(&target, &err),
    }
}

fn query_stratum(cli: &StratumCli, config: SessionConfig) -> Result<u16, ClientError> {
    let connection = &cli.connection;
    let mut session = Session::connect(&connection.hostname, connection.port, config)?;
    let tracking = session.tracking()?;
    debug!(
        "tracking: reference {} stratum {} leap {:?}",
        tracking.reference_id, tracking.stratum, tracking.leap_status
    );
    Ok(tracking.stratum)
}

/// CRITICAL once `stratum` reaches `critical`, else WARNING once it reaches `warning`.
/// Unset limits never trigger.
pub fn stratum_severity(stratum: u16, warning: Option<u32>, critical: Option<u32>) -> Severity {
    evaluate(
        f64::from(stratum),
        critical.map(ValueRange::integers_below).as_ref(),
        warning.map(ValueRange::integers_below).as_ref(),
    )
}
