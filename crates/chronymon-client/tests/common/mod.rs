// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Shared helpers for integration tests.

// Integration test helpers are `pub` so each `tests/*.rs` file can import them
// via `mod common`, but not every file uses every helper.
#![allow(unreachable_pub, dead_code)]

use chronymon_client::protocol::{
    Command, ReplyHeader, RequestHeader, decode_request, encode_reply,
};
use std::net::{SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// A UDP responder on 127.0.0.1 running on a background thread.
pub struct TestDaemon {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RequestHeader>>>,
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl TestDaemon {
    /// Answer each request with `handler`'s reply; `None` drops the request.
    pub fn spawn<F>(mut handler: F) -> Self
    where
        F: FnMut(&RequestHeader, &[u8]) -> Option<Vec<u8>> + Send + 'static,
    {
        let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
        socket
            .set_read_timeout(Some(Duration::from_millis(20)))
            .unwrap();
        let addr = socket.local_addr().unwrap();
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
                    if let Some(reply) = handler(&header, body) {
                        let _ = socket.send_to(&reply, from);
                    }
                }
            })
        };

        TestDaemon {
            addr,
            requests,
            stop,
            thread: Some(thread),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Headers of every request received so far.
    pub fn requests(&self) -> Vec<RequestHeader> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for TestDaemon {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// An empty successful reply to `header`'s command, echoing its sequence.
pub fn empty_reply(header: &RequestHeader) -> Vec<u8> {
    let command = Command::try_from(header.command).unwrap();
    encode_reply(ReplyHeader::for_command(command, header.sequence), &[])
}
