// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Monitoring plugin judging chronyd's selected peer.

use chronymon_check::cli::PeerCli;
use chronymon_check::peer::check_peer;
use chronymon_check::verdict::usage_exit_code;
use clap::Parser;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();

    let cli = match PeerCli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            process::exit(usage_exit_code(&e));
        }
    };

    let verdict = check_peer(&cli);
    println!("{verdict}");
    process::exit(verdict.code());
}
