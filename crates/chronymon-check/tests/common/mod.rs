// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Shared helpers for integration tests: a scripted chronyd on a background thread.

// Integration test helpers are `pub` so each `tests/*.rs` file can import them
// via `mod common`, but not every file uses every helper.
#![allow(unreachable_pub, dead_code)]

use chronymon_client::protocol::{
    Address, Command, LeapStatus, NSources, ReferenceId, ReferenceTime, ReplyHeader,
    ReplyRecord, RequestHeader, SourceData, SourceMode, SourceState, SourceStats, Tracking,
    decode_request, encode_reply,
};
use std::net::{IpAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// What the fake daemon knows.
#[derive(Clone, Debug)]
pub struct Script {
    pub tracking: Tracking,
    pub sources: Vec<(SourceData, SourceStats)>,
    /// Drop TRACKING requests instead of answering.
    pub silent_tracking: bool,
}

impl Script {
    pub fn new(stratum: u16) -> Self {
        Script {
            tracking: tracking(stratum),
            sources: Vec::new(),
            silent_tracking: false,
        }
    }

    pub fn source(mut self, ip: &str, state: SourceState, offset: f64, jitter: f64) -> Self {
        let address = Address::from(ip.parse::<IpAddr>().unwrap());
        let data = SourceData {
            address,
            poll: 6,
            stratum: self.tracking.stratum.saturating_sub(1),
            state,
            mode: SourceMode::Client,
            flags: 0,
            reachability: 0o377,
            since_sample: 20,
            orig_latest_offset: offset,
            latest_offset: offset,
            latest_offset_error: 0.0005,
        };
        let stats = SourceStats {
            reference_id: ReferenceId(0),
            address,
            sample_count: 10,
            run_count: 5,
            span_seconds: 600,
            standard_deviation: jitter,
            residual_freq_ppm: 0.001,
            skew_ppm: 0.05,
            estimated_offset: offset,
            estimated_offset_error: 0.0005,
        };
        self.sources.push((data, stats));
        self
    }

    fn answer(&self, header: &RequestHeader, body: &[u8]) -> Option<Vec<u8>> {
        let command = Command::try_from(header.command).ok()?;
        let index = || {
            let b = body.get(..4)?;
            usize::try_from(i32::from_be_bytes([b[0], b[1], b[2], b[3]])).ok()
        };
        let reply = ReplyHeader::for_command(command, header.sequence);
        match command {
            Command::Null => Some(encode_reply(reply, &[])),
            Command::Tracking if self.silent_tracking => None,
            Command::Tracking => Some(encoded(reply, &self.tracking)),
            Command::NSources => {
                let count = u32::try_from(self.sources.len()).ok()?;
                Some(encoded(reply, &NSources { count }))
            }
            Command::SourceData => Some(encoded(reply, &self.sources.get(index()?)?.0)),
            Command::SourceStats => Some(encoded(reply, &self.sources.get(index()?)?.1)),
        }
    }
}

fn encoded<R: ReplyRecord>(header: ReplyHeader, record: &R) -> Vec<u8> {
    encode_reply(header, &record.to_body().unwrap())
}

pub fn tracking(stratum: u16) -> Tracking {
    Tracking {
        reference_id: ReferenceId(0xC000_0201),
        address: Address::from("192.0.2.1".parse::<IpAddr>().unwrap()),
        stratum,
        leap_status: LeapStatus::Normal,
        reference_time: ReferenceTime {
            seconds: 1_790_000_000,
            nanos: 500_000_000,
        },
        current_correction: 0.000012,
        last_offset: -0.000003,
        rms_offset: 0.00002,
        freq_ppm: -12.5,
        residual_freq_ppm: 0.001,
        skew_ppm: 0.02,
        root_delay: 0.015,
        root_dispersion: 0.001,
        last_update_interval: 64.0,
    }
}

/// A scripted chronyd listening on 127.0.0.1.
pub struct FakeChronyd {
    port: u16,
    requests: Arc<Mutex<Vec<RequestHeader>>>,
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl FakeChronyd {
    pub fn spawn(script: Script) -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
        socket
            .set_read_timeout(Some(Duration::from_millis(20)))
            .unwrap();
        let port = socket.local_addr().unwrap().port();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let stop = Arc::new(AtomicBool::new(false));

        let thread = {
            let requests = Arc::clone(&requests);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                let mut buf = [0u8; 1024];
                while !stop.load(Ordering::Relaxed) {
                    let Ok((len, from)) = socket.recv_from(&mut buf) else {
                        continue;
                    };
                    let Ok((header, body)) = decode_request(&buf[..len]) else {
                        continue;
                    };
                    requests.lock().unwrap().push(header);
                    if let Some(reply) = script.answer(&header, body) {
                        let _ = socket.send_to(&reply, from);
                    }
                }
            })
        };

        FakeChronyd {
            port,
            requests,
            stop,
            thread: Some(thread),
        }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn requests(&self) -> Vec<RequestHeader> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for FakeChronyd {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
