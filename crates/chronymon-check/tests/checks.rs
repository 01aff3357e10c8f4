// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! End-to-end checks against a scripted daemon.

mod common;

use chronymon_check::ExitStatus;
use chronymon_check::cli::{PeerCli, StratumCli};
use chronymon_check::peer::check_peer_with;
use chronymon_check::stratum::check_stratum_with;
use chronymon_client::protocol::SourceState;
use chronymon_client::session::SessionConfig;
use clap::Parser;
use common::{FakeChronyd, Script};
use std::time::Duration;

fn quick() -> SessionConfig {
    SessionConfig::default().timeout(Duration::from_millis(50))
}

fn stratum_cli(daemon: &FakeChronyd, args: &[&str]) -> StratumCli {
    let port = daemon.port().to_string();
    let mut argv = vec!["check_chrony_stratum", "-H", "127.0.0.1", "-p", port.as_str()];
    argv.extend_from_slice(args);
    StratumCli::try_parse_from(argv).unwrap()
}

fn peer_cli(daemon: &FakeChronyd, args: &[&str]) -> PeerCli {
    let port = daemon.port().to_string();
    let mut argv = vec!["check_chrony", "-H", "127.0.0.1", "-p", port.as_str()];
    argv.extend_from_slice(args);
    PeerCli::try_parse_from(argv).unwrap()
}

#[test]
fn stratum_below_limits_is_ok() {
    let daemon = FakeChronyd::spawn(Script::new(2));
    let cli = stratum_cli(&daemon, &["--scrit", "5", "--swarn", "3"]);
    let verdict = check_stratum_with(&cli, quick());

    assert_eq!(verdict.code(), 0);
    assert!(verdict.line.contains("stratum is 2"));
    assert_eq!(
        verdict.line,
        format!(
            "OK 127.0.0.1:{} stratum is 2|stratum=2",
            daemon.port()
        )
    );
}

#[test]
fn stratum_at_critical_limit_is_critical() {
    let daemon = FakeChronyd::spawn(Script::new(5));
    let cli = stratum_cli(&daemon, &["--scrit", "5"]);
    let verdict = check_stratum_with(&cli, quick());

    assert_eq!(verdict.status, ExitStatus::Critical);
    assert_eq!(verdict.code(), 2);
    assert!(verdict.line.starts_with("CRITICAL "));
}

#[test]
fn stratum_at_warning_limit_is_warning() {
    let daemon = FakeChronyd::spawn(Script::new(3));
    let cli = stratum_cli(&daemon, &["-W", "3", "-C", "5"]);
    assert_eq!(check_stratum_with(&cli, quick()).code(), 1);
}

#[test]
fn peer_offset_past_warning_range() {
    let script = Script::new(3)
        .source("192.0.2.10", SourceState::Selectable, 0.4, 0.001)
        .source("192.0.2.11", SourceState::Selected, 75.0, 0.0078125)
        .source("192.0.2.12", SourceState::Unselected, 0.3, 0.002)
        .source("192.0.2.13", SourceState::NonSelectable, 12.0, 0.5);
    let daemon = FakeChronyd::spawn(script);
    let verdict = check_peer_with(&peer_cli(&daemon, &[]), quick());

    assert_eq!(verdict.code(), 1);
    let (details, perfdata) = verdict.line.split_once('|').unwrap();
    assert_eq!(
        details,
        format!(
            "WARNING 127.0.0.1:{} chosen peer 192.0.2.11, offset=75s(WARN), \
             jitter=0.0078125, stratum=2, truechimers=3",
            daemon.port()
        )
    );
    assert_eq!(details.matches("(WARN)").count(), 1);
    assert_eq!(
        perfdata,
        "offset=75.00000000 jitter=0.00781250 stratum=2 truechimers=3"
    );
}

#[test]
fn peer_within_ranges_is_ok() {
    let script = Script::new(2)
        .source("192.0.2.10", SourceState::Selected, -0.0125, 0.0004)
        .source("192.0.2.11", SourceState::Selectable, 0.002, 0.0003);
    let daemon = FakeChronyd::spawn(script);
    let cli = peer_cli(&daemon, &["-w", ":0.5", "-c", ":1", "-n", "2:"]);
    let verdict = check_peer_with(&cli, quick());

    assert_eq!(verdict.status, ExitStatus::Ok);
    assert!(verdict.line.starts_with("OK "));
    assert!(verdict.line.contains("chosen peer 192.0.2.10"));
    assert!(!verdict.line.contains("(WARN)") && !verdict.line.contains("(CRIT)"));
}

#[test]
fn peer_critical_dominates_warning() {
    let script = Script::new(2)
        .source("192.0.2.10", SourceState::Selected, 75.0, 0.0004);
    let daemon = FakeChronyd::spawn(script);
    let cli = peer_cli(&daemon, &["-m", "3:", "-n", "2:"]);
    let verdict = check_peer_with(&cli, quick());

    assert_eq!(verdict.status, ExitStatus::Critical);
    assert!(verdict.line.contains("offset=75s(WARN)"));
    assert!(verdict.line.contains("truechimers=1(CRIT)"));
}

#[test]
fn no_selected_source_is_critical() {
    let script = Script::new(2)
        .source("192.0.2.10", SourceState::Selectable, 0.001, 0.0004)
        .source("192.0.2.11", SourceState::Falseticker, 3.0, 0.2);
    let daemon = FakeChronyd::spawn(script);
    let verdict = check_peer_with(&peer_cli(&daemon, &[]), quick());

    assert_eq!(verdict.code(), 2);
    assert!(verdict.line.contains("no source selected"));
}

#[test]
fn exhausted_retries_are_unknown() {
    let mut script = Script::new(2);
    script.silent_tracking = true;
    let daemon = FakeChronyd::spawn(script);
    let verdict = check_stratum_with(&stratum_cli(&daemon, &["-C", "5"]), quick());

    assert_eq!(verdict.status, ExitStatus::Unknown);
    assert_eq!(verdict.code(), 3);
    assert!(verdict.line.contains("timed out after 5 attempts"));

    let tracking: Vec<_> = daemon
        .requests()
        .into_iter()
        .filter(|r| r.command == 33)
        .collect();
    assert_eq!(
        tracking.iter().map(|r| r.attempt).collect::<Vec<_>>(),
        vec![0, 1, 2, 3, 4]
    );
    assert!(tracking.iter().all(|r| r.sequence == tracking[0].sequence));
}

#[test]
fn unreachable_daemon_is_unknown() {
    let daemon = FakeChronyd::spawn(Script::new(2));
    let cli = stratum_cli(&daemon, &[]);
    drop(daemon);
    let config = quick().max_attempts(2).timeout(Duration::from_millis(20));
    let verdict = check_stratum_with(&cli, config);

    assert_eq!(verdict.status, ExitStatus::Unknown);
    assert!(verdict.line.contains("no chronyd responded at 127.0.0.1"));
}
