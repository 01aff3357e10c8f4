// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use super::{
    ConstPackedSizeBytes, LeapStatus, ReplyKind, ReplyRecord, SourceMode, SourceState,
};

/// Address family tag for IPv4.
pub const FAMILY_INET4: u16 = 1;

/// Address family tag for IPv6.
pub const FAMILY_INET6: u16 = 2;

/// **Address** - A 16-byte address union followed by a family tag and two bytes of padding.
///
/// ### Layout
///
/// ```ignore
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// |            Address bytes (IPv4 uses the first four)           |
/// |                                                               |
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |            Family             |            Padding            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// The raw bytes are kept so that a record re-encodes exactly as received.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Address {
    /// Family tag: [`FAMILY_INET4`], [`FAMILY_INET6`], or anything else for "no address".
    pub family: u16,
    /// The address union.
    pub bytes: [u8; 16],
}

impl Address {
    /// The IP address, if the family tag names one.
    pub fn ip(&self) -> Option<IpAddr> {
        match self.family {
            FAMILY_INET4 => {
                let octets = [self.bytes[0], self.bytes[1], self.bytes[2], self.bytes[3]];
                Some(IpAddr::V4(Ipv4Addr::from(octets)))
            }
            FAMILY_INET6 => Some(IpAddr::V6(Ipv6Addr::from(self.bytes))),
            _ => None,
        }
    }
}

impl From<IpAddr> for Address {
    fn from(ip: IpAddr) -> Self {
        let mut bytes = [0u8; 16];
        match ip {
            IpAddr::V4(v4) => {
                bytes[..4].copy_from_slice(&v4.octets());
                Address {
                    family: FAMILY_INET4,
                    bytes,
                }
            }
            IpAddr::V6(v6) => Address {
                family: FAMILY_INET6,
                bytes: v6.octets(),
            },
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ip() {
            Some(ip) => write!(f, "{ip}"),
            None => write!(f, "-"),
        }
    }
}

impl ConstPackedSizeBytes for Address {
    const PACKED_SIZE_BYTES: usize = 20;
}

/// A 32-bit reference identifier.
///
/// For reference clocks this is an ASCII name such as `GPS`; for network sources it is
/// derived from the source address.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct ReferenceId(pub u32);

impl ReferenceId {
    /// Render the identifier as ASCII when every non-NUL byte is printable.
    pub fn as_ascii(&self) -> Option<String> {
        let bytes = self.0.to_be_bytes();
        let name: Vec<u8> = bytes.iter().copied().take_while(|&b| b != 0).collect();
        if name.is_empty() || !name.iter().all(|b| b.is_ascii_graphic()) {
            return None;
        }
        String::from_utf8(name).ok()
    }
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_ascii() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "{:08X}", self.0),
        }
    }
}

/// Time of the last clock update: 48-bit seconds since the Unix epoch plus nanoseconds.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct ReferenceTime {
    /// Whole seconds (high and low words combined).
    pub seconds: u64,
    /// Nanoseconds within the second.
    pub nanos: u32,
}

impl ConstPackedSizeBytes for ReferenceTime {
    const PACKED_SIZE_BYTES: usize = 12;
}

/// Body of an `N_SOURCES` reply.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct NSources {
    /// Number of sources the daemon knows about.
    pub count: u32,
}

impl ConstPackedSizeBytes for NSources {
    const PACKED_SIZE_BYTES: usize = 4;
}

impl ReplyRecord for NSources {
    const NAME: &'static str = "n_sources";
    const REPLY_KIND: ReplyKind = ReplyKind::NSources;
}

/// Body of a `SOURCE_DATA` reply: the daemon's current view of one source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SourceData {
    /// Source address; empty for reference clocks.
    pub address: Address,
    /// Polling interval as a base-2 logarithm of seconds.
    pub poll: i16,
    /// Stratum reported by the source.
    pub stratum: u16,
    /// Selection state.
    pub state: SourceState,
    /// Association mode.
    pub mode: SourceMode,
    /// Source flags bitmask.
    pub flags: u16,
    /// Reachability register (last eight polls).
    pub reachability: u16,
    /// Seconds since the last sample was accepted.
    pub since_sample: u32,
    /// Offset of the last sample as measured, in seconds.
    pub orig_latest_offset: f64,
    /// Offset of the last sample adjusted for later slews, in seconds.
    pub latest_offset: f64,
    /// Error bound of the last sample, in seconds.
    pub latest_offset_error: f64,
}

impl ConstPackedSizeBytes for SourceData {
    const PACKED_SIZE_BYTES: usize = Address::PACKED_SIZE_BYTES + 6 * 2 + 4 + 3 * 4;
}

impl ReplyRecord for SourceData {
    const NAME: &'static str = "source data";
    const REPLY_KIND: ReplyKind = ReplyKind::SourceData;
}

/// Body of a `SOURCE_STATS` reply: regression statistics for one source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SourceStats {
    /// Reference identifier of the source.
    pub reference_id: ReferenceId,
    /// Source address; empty for reference clocks.
    pub address: Address,
    /// Number of retained samples.
    pub sample_count: u32,
    /// Number of runs of residuals with the same sign.
    pub run_count: u32,
    /// Interval covered by the samples, in seconds.
    pub span_seconds: u32,
    /// Estimated sample standard deviation, in seconds.
    pub standard_deviation: f64,
    /// Residual frequency, in ppm.
    pub residual_freq_ppm: f64,
    /// Frequency error bound, in ppm.
    pub skew_ppm: f64,
    /// Estimated offset, in seconds.
    pub estimated_offset: f64,
    /// Error bound of the estimated offset, in seconds.
    pub estimated_offset_error: f64,
}

impl ConstPackedSizeBytes for SourceStats {
    const PACKED_SIZE_BYTES: usize = 4 + Address::PACKED_SIZE_BYTES + 3 * 4 + 5 * 4;
}

impl ReplyRecord for SourceStats {
    const NAME: &'static str = "source stats";
    const REPLY_KIND: ReplyKind = ReplyKind::SourceStats;
}

/// Body of a `TRACKING` reply: the state of the system clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tracking {
    /// Reference identifier of the current synchronisation source.
    pub reference_id: ReferenceId,
    /// Address of the current synchronisation source.
    pub address: Address,
    /// Stratum of the local clock.
    pub stratum: u16,
    /// Leap second status.
    pub leap_status: LeapStatus,
    /// Time of the last clock update.
    pub reference_time: ReferenceTime,
    /// Current correction being slewed, in seconds.
    pub current_correction: f64,
    /// Offset measured at the last update, in seconds.
    pub last_offset: f64,
    /// Long-term RMS of the offset, in seconds.
    pub rms_offset: f64,
    /// Frequency error of the local clock, in ppm.
    pub freq_ppm: f64,
    /// Residual frequency of the current source, in ppm.
    pub residual_freq_ppm: f64,
    /// Frequency error bound, in ppm.
    pub skew_ppm: f64,
    /// Total network delay to the stratum-1 source, in seconds.
    pub root_delay: f64,
    /// Total dispersion accumulated to the stratum-1 source, in seconds.
    pub root_dispersion: f64,
    /// Interval between the last two clock updates, in seconds.
    pub last_update_interval: f64,
}

impl ConstPackedSizeBytes for Tracking {
    const PACKED_SIZE_BYTES: usize =
        4 + Address::PACKED_SIZE_BYTES + 2 * 2 + ReferenceTime::PACKED_SIZE_BYTES + 9 * 4;
}

impl ReplyRecord for Tracking {
    const NAME: &'static str = "tracking";
    const REPLY_KIND: ReplyKind = ReplyKind::Tracking;
}
