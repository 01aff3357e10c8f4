// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Monitoring plugins for chronyd.
//!
//! Two checks share the client library:
//!
//! - `check_chrony` surveys the daemon's sources and judges the selected
//!   peer's offset, jitter, and stratum plus the truechimer count.
//! - `check_chrony_stratum` judges the stratum from the tracking record.
//!
//! Both print one status line on stdout and exit with the monitoring
//! convention: 0 OK, 1 WARNING, 2 CRITICAL, 3 UNKNOWN.

#![warn(missing_docs)]

/// Command-line arguments for both checks.
pub mod cli;

/// The peer check.
pub mod peer;

/// The stratum check.
pub mod stratum;

/// Exit statuses and the final status line.
pub mod verdict;

pub use verdict::{ExitStatus, Verdict};
