// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

/*!
Blocking client for chrony's command-and-monitoring (candm) protocol.

# Example
Connects to the local daemon, lists its sources, and prints the one it has
selected.

```rust,no_run
use chronymon_client::selection::select_peer;
use chronymon_client::session::{Session, SessionConfig};

fn main() -> Result<(), chronymon_client::error::ClientError> {
    let mut session = Session::connect("localhost", 323, SessionConfig::default())?;
    let reports = session.survey()?;
    let peer = select_peer(&reports)?;
    println!("{} offset {:+.6} s", peer.name(), peer.data.latest_offset);
    Ok(())
}
```
*/

#![warn(missing_docs)]

// Re-export wire types from chronymon_proto for convenience.
pub use chronymon_proto::protocol;

/// Client error taxonomy.
pub mod error;

/// Query orchestration: tracking, source counts, and per-source reports.
pub mod query;

/// Choosing the selected peer and counting truechimers.
pub mod selection;

/// Address resolution, candidate probing, and the retrying request/reply loop.
pub mod session;

/// Range thresholds and severity aggregation for monitoring verdicts.
pub mod threshold;

#[cfg(test)]
mod testing;

pub use error::ClientError;
pub use query::SourceReport;
pub use session::{AddressFamily, Session, SessionConfig};
