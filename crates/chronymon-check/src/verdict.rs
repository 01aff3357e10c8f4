// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use chronymon_client::error::ClientError;
use chronymon_client::threshold::Severity;
use log::error;
use std::fmt;

/// Plugin exit status.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ExitStatus {
    /// 0
    Ok,
    /// 1
    Warning,
    /// 2
    Critical,
    /// 3: the health state could not be determined.
    Unknown,
}

impl ExitStatus {
    /// Process exit code.
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Ok => 0,
            ExitStatus::Warning => 1,
            ExitStatus::Critical => 2,
            ExitStatus::Unknown => 3,
        }
    }

    /// Word leading the status line.
    pub fn label(self) -> &'static str {
        match self {
            ExitStatus::Ok => "OK",
            ExitStatus::Warning => "WARNING",
            ExitStatus::Critical => "CRITICAL",
            ExitStatus::Unknown => "UNKNOWN",
        }
    }
}

impl From<Severity> for ExitStatus {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Ok => ExitStatus::Ok,
            Severity::Warning => ExitStatus::Warning,
            Severity::Critical => ExitStatus::Critical,
        }
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The outcome of a check: one status line and the status to exit with.
///
/// Checks return a `Verdict` instead of exiting, leaving printing and process
/// termination to `main`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Verdict {
    /// Exit status.
    pub status: ExitStatus,
    /// Complete status line, severity word included.
    pub line: String,
}

impl Verdict {
    /// A verdict with a complete status line.
    pub fn new(status: ExitStatus, line: impl Into<String>) -> Self {
        Verdict {
            status,
            line: line.into(),
        }
    }

    /// Turn a failed query against `target` into a verdict.
    ///
    /// A daemon without a selected source is CRITICAL; anything else means the
    /// state is unknown.
    pub fn from_error(target: &str, err: &ClientError) -> Self {
        match err {
            ClientError::Selection => Verdict::new(
                ExitStatus::Critical,
                format!("{} {target} no source selected", ExitStatus::Critical),
            ),
            other => {
                error!("querying {target} failed: {other}");
                Verdict::new(
                    ExitStatus::Unknown,
                    format!("{} {target} {other}", ExitStatus::Unknown),
                )
            }
        }
    }

    /// Process exit code.
    pub fn code(&self) -> i32 {
        self.status.code()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

/// Exit code for a command line rejected by clap. Help and version requests succeed.
pub fn usage_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        ExitStatus::Unknown.code()
    } else {
        ExitStatus::Ok.code()
    }
}
