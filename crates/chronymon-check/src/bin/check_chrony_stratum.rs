// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Monitoring plugin judging the stratum in chronyd's tracking data.

use chronymon_check::cli::StratumCli;
use chronymon_check::stratum::check_stratum;
use chronymon_check::verdict::usage_exit_code;
use clap::Parser;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();

    let cli = match StratumCli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            process::exit(usage_exit_code(&e));
        }
    };

    let verdict = check_stratum(&cli);
    println!("{verdict}");
    process::exit(verdict.code());
}
