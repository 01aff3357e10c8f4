// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use chronymon_client::protocol::PORT;
use chronymon_client::session::{AddressFamily, SessionConfig};
use chronymon_client::threshold::ValueRange;
use clap::{Args, Parser};

/// Where to find the daemon.
#[derive(Args, Clone, Debug, PartialEq)]
pub struct ConnectionArgs {
    /// Host running chronyd
    #[arg(short = 'H', long)]
    pub hostname: String,
    /// chronyd command port
    #[arg(short, long, default_value_t = PORT)]
    pub port: u16,
    /// Use IPv4 addresses only
    #[arg(short = '4', long)]
    pub ipv4: bool,
    /// Use IPv6 addresses only
    #[arg(short = '6', long)]
    pub ipv6: bool,
}

impl ConnectionArgs {
    /// Address families allowed by `-4`/`-6`.
    pub fn family(&self) -> AddressFamily {
        AddressFamily::from_flags(self.ipv4, self.ipv6)
    }

    /// Default session settings restricted to [`Self::family`].
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::default().family(self.family())
    }

    /// `host:port`, as it appears in status lines.
    pub fn target(&self) -> String {
        format!("{}:{}", self.hostname, self.port)
    }
}

/// Arguments of `check_chrony`.
#[derive(Parser, Clone, Debug, PartialEq)]
#[command(
    name = "check_chrony",
    version,
    about = "Check the offset, jitter, and stratum of chronyd's selected peer"
)]
pub struct PeerCli {
    /// Where to find the daemon.
    #[command(flatten)]
    pub connection: ConnectionArgs,
    /// Peer thresholds.
    #[command(flatten)]
    pub thresholds: PeerThresholds,
}

/// Range thresholds of `check_chrony`. Ranges are `min:max`, inclusive, either side optional.
#[derive(Args, Clone, Debug, PartialEq)]
pub struct PeerThresholds {
    /// Offset warning range in seconds (compared as absolute value)
    #[arg(short = 'w', long, default_value = "0:60", allow_hyphen_values = true)]
    pub owarn: ValueRange,
    /// Offset critical range in seconds (compared as absolute value)
    #[arg(short = 'c', long, default_value = "0:120", allow_hyphen_values = true)]
    pub ocrit: ValueRange,
    /// Jitter warning range in seconds
    #[arg(short = 'j', long, allow_hyphen_values = true)]
    pub jwarn: Option<ValueRange>,
    /// Jitter critical range in seconds
    #[arg(short = 'k', long, allow_hyphen_values = true)]
    pub jcrit: Option<ValueRange>,
    /// Stratum warning range, e.g. ":2" warns from stratum 3 (a bare number is rejected)
    #[arg(short = 'W', long, value_parser = parse_stratum_range)]
    pub swarn: Option<ValueRange>,
    /// Stratum critical range, e.g. ":4" is critical from stratum 5 (a bare number is rejected)
    #[arg(short = 'C', long, value_parser = parse_stratum_range)]
    pub scrit: Option<ValueRange>,
    /// Truechimer count warning range
    #[arg(short = 'm', long)]
    pub twarn: Option<ValueRange>,
    /// Truechimer count critical range
    #[arg(short = 'n', long)]
    pub tcrit: Option<ValueRange>,
}

/// Stratum ranges of the peer check must spell out `min:max`.
///
/// `check_chrony_stratum -W 3` warns at stratum 3, while the range `:3` only
/// warns from 4, so a bare number is refused rather than read as `:N`.
fn parse_stratum_range(s: &str) -> Result<ValueRange, String> {
    if !s.contains(':') {
        return Err(format!(
            "stratum ranges take the form min:max; use \":{}\" to accept up to {}",
            s.trim(),
            s.trim()
        ));
    }
    s.parse::<ValueRange>().map_err(|e| e.to_string())
}

/// Arguments of `check_chrony_stratum`.
#[derive(Parser, Clone, Debug, PartialEq)]
#[command(
    name = "check_chrony_stratum",
    version,
    about = "Check the stratum chronyd reports in its tracking data"
)]
pub struct StratumCli {
    /// Where to find the daemon.
    #[command(flatten)]
    pub connection: ConnectionArgs,
    /// Warn when the stratum is at least this value
    #[arg(short = 'W', long)]
    pub swarn: Option<u32>,
    /// Critical when the stratum is at least this value
    #[arg(short = 'C', long)]
    pub scrit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peer_defaults() {
        let cli = PeerCli::try_parse_from(["check_chrony", "-H", "ntp.example"]).unwrap();
        assert_eq!(cli.connection.hostname, "ntp.example");
        assert_eq!(cli.connection.port, 323);
        assert_eq!(cli.connection.family(), AddressFamily::Any);
        assert_eq!(cli.connection.target(), "ntp.example:323");
        assert_eq!(cli.thresholds.owarn, ValueRange::new(Some(0.0), Some(60.0)));
        assert_eq!(cli.thresholds.ocrit, ValueRange::new(Some(0.0), Some(120.0)));
        assert_eq!(cli.thresholds.jwarn, None);
        assert_eq!(cli.thresholds.tcrit, None);
    }

    #[test]
    fn test_peer_thresholds() {
        let cli = PeerCli::try_parse_from([
            "check_chrony",
            "--hostname",
            "::1",
            "-p",
            "10323",
            "-6",
            "-w",
            ":0.5",
            "--ocrit",
            "-1:1",
            "-j",
            "0:0.01",
            "-k",
            "0.1",
            "-W",
            ":3",
            "-C",
            ":5",
            "-m",
            "3:",
            "-n",
            "1:",
        ])
        .unwrap();
        assert_eq!(cli.connection.port, 10323);
        assert_eq!(cli.connection.family(), AddressFamily::V6);
        let t = cli.thresholds;
        assert_eq!(t.owarn, ValueRange::new(None, Some(0.5)));
        assert_eq!(t.ocrit, ValueRange::new(Some(-1.0), Some(1.0)));
        assert_eq!(t.jwarn, Some(ValueRange::new(Some(0.0), Some(0.01))));
        assert_eq!(t.jcrit, Some(ValueRange::new(None, Some(0.1))));
        assert_eq!(t.swarn, Some(ValueRange::new(None, Some(3.0))));
        assert_eq!(t.scrit, Some(ValueRange::new(None, Some(5.0))));
        assert_eq!(t.twarn, Some(ValueRange::new(Some(3.0), None)));
        assert_eq!(t.tcrit, Some(ValueRange::new(Some(1.0), None)));
    }

    #[test]
    fn test_both_families_means_any() {
        let cli =
            StratumCli::try_parse_from(["check_chrony_stratum", "-H", "localhost", "-4", "-6"])
                .unwrap();
        assert_eq!(cli.connection.family(), AddressFamily::Any);
        let cli = StratumCli::try_parse_from(["check_chrony_stratum", "-H", "localhost", "-4"])
            .unwrap();
        assert_eq!(cli.connection.session_config().family, AddressFamily::V4);
    }

    #[test]
    fn test_stratum_thresholds() {
        let cli = StratumCli::try_parse_from([
            "check_chrony_stratum",
            "-H",
            "localhost",
            "--swarn",
            "3",
            "-C",
            "5",
        ])
        .unwrap();
        assert_eq!(cli.swarn, Some(3));
        assert_eq!(cli.scrit, Some(5));
    }

    #[test]
    fn test_peer_stratum_requires_range() {
        for flag in ["-W", "-C", "--swarn", "--scrit"] {
            assert!(PeerCli::try_parse_from(["check_chrony", "-H", "h", flag, "3"]).is_err());
        }
        let cli = PeerCli::try_parse_from(["check_chrony", "-H", "h", "-W", "1:3"]).unwrap();
        assert_eq!(cli.thresholds.swarn, Some(ValueRange::new(Some(1.0), Some(3.0))));
        assert!(PeerCli::try_parse_from(["check_chrony", "-H", "h", "-C", "5:1"]).is_err());
        assert!(PeerCli::try_parse_from(["check_chrony", "-H", "h", "-C", "x:"]).is_err());
    }

    #[test]
    fn test_usage_errors() {
        assert!(PeerCli::try_parse_from(["check_chrony"]).is_err());
        assert!(PeerCli::try_parse_from(["check_chrony", "-H", "h", "-w", "abc"]).is_err());
        assert!(PeerCli::try_parse_from(["check_chrony", "-H", "h", "-c", "9:1"]).is_err());
        assert!(
            StratumCli::try_parse_from(["check_chrony_stratum", "-H", "h", "-C", "high"]).is_err()
        );
    }
}
