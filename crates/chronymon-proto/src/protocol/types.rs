// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use super::{
    ConstPackedSizeBytes, NSources, REPLY_HEADER_LEN, REQUEST_HEADER_LEN, SourceData,
    SourceStats, Tracking,
};

/// The packet type octet that distinguishes requests from replies.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum PacketType {
    /// Client to daemon.
    Request = 1,
    /// Daemon to client.
    Reply = 2,
}

impl TryFrom<u8> for PacketType {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PacketType::Request),
            2 => Ok(PacketType::Reply),
            _ => Err(()),
        }
    }
}

/// Request command codes for the read-only queries this crate issues.
#[repr(u16)]
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Command {
    /// No-op, used to probe that a daemon is listening.
    Null = 0,
    /// Number of configured sources.
    NSources = 14,
    /// Snapshot of one source, by index.
    SourceData = 15,
    /// System tracking state.
    Tracking = 33,
    /// Statistics of one source, by index.
    SourceStats = 34,
}

impl Command {
    /// Number of argument bytes following the request header.
    pub const fn request_body_len(self) -> usize {
        match self {
            Command::SourceData | Command::SourceStats => 4,
            Command::Null | Command::NSources | Command::Tracking => 0,
        }
    }

    /// The reply kind a successful answer to this command carries.
    pub const fn reply_kind(self) -> ReplyKind {
        match self {
            Command::Null => ReplyKind::Null,
            Command::NSources => ReplyKind::NSources,
            Command::SourceData => ReplyKind::SourceData,
            Command::Tracking => ReplyKind::Tracking,
            Command::SourceStats => ReplyKind::SourceStats,
        }
    }

    /// Total on-wire request length, including zero padding.
    ///
    /// chronyd drops requests shorter than the reply they would produce, so every request is
    /// padded up to the larger of its own length and its reply's length.
    pub const fn padded_len(self) -> usize {
        let request = REQUEST_HEADER_LEN + self.request_body_len();
        let reply = REPLY_HEADER_LEN + self.reply_kind().body_len();
        if request > reply { request } else { reply }
    }
}

impl TryFrom<u16> for Command {
    type Error = ();

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Command::Null),
            14 => Ok(Command::NSources),
            15 => Ok(Command::SourceData),
            33 => Ok(Command::Tracking),
            34 => Ok(Command::SourceStats),
            _ => Err(()),
        }
    }
}

/// Reply kind codes carried in the reply header.
#[repr(u16)]
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum ReplyKind {
    /// Empty acknowledgement. Also sent on most failures.
    Null = 1,
    /// Carries [`NSources`].
    NSources = 2,
    /// Carries [`SourceData`].
    SourceData = 3,
    /// Carries [`Tracking`].
    Tracking = 5,
    /// Carries [`SourceStats`].
    SourceStats = 6,
}

impl ReplyKind {
    /// Length of the body that follows the reply header.
    pub const fn body_len(self) -> usize {
        match self {
            ReplyKind::Null => 0,
            ReplyKind::NSources => NSources::PACKED_SIZE_BYTES,
            ReplyKind::SourceData => SourceData::PACKED_SIZE_BYTES,
            ReplyKind::Tracking => Tracking::PACKED_SIZE_BYTES,
            ReplyKind::SourceStats => SourceStats::PACKED_SIZE_BYTES,
        }
    }
}

impl TryFrom<u16> for ReplyKind {
    type Error = ();

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ReplyKind::Null),
            2 => Ok(ReplyKind::NSources),
            3 => Ok(ReplyKind::SourceData),
            5 => Ok(ReplyKind::Tracking),
            6 => Ok(ReplyKind::SourceStats),
            _ => Err(()),
        }
    }
}

/// Status code reported by the daemon in every reply.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Status {
    /// The command succeeded.
    Success,
    /// Generic failure.
    Failed,
    /// The command requires authorization.
    Unauthorized,
    /// The command was not recognized.
    Invalid,
    /// The source index does not exist.
    NoSuchSource,
    /// The daemon rejected the packet version.
    BadPacketVersion,
    /// The daemon rejected the packet length.
    BadPacketLength,
    /// Any other status code.
    Other(u16),
}

impl From<u16> for Status {
    fn from(value: u16) -> Self {
        match value {
            0 => Status::Success,
            1 => Status::Failed,
            2 => Status::Unauthorized,
            3 => Status::Invalid,
            4 => Status::NoSuchSource,
            18 => Status::BadPacketVersion,
            19 => Status::BadPacketLength,
            other => Status::Other(other),
        }
    }
}

impl From<Status> for u16 {
    fn from(status: Status) -> u16 {
        match status {
            Status::Success => 0,
            Status::Failed => 1,
            Status::Unauthorized => 2,
            Status::Invalid => 3,
            Status::NoSuchSource => 4,
            Status::BadPacketVersion => 18,
            Status::BadPacketLength => 19,
            Status::Other(code) => code,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Success => write!(f, "success"),
            Status::Failed => write!(f, "failed"),
            Status::Unauthorized => write!(f, "not authorised"),
            Status::Invalid => write!(f, "invalid command"),
            Status::NoSuchSource => write!(f, "no such source"),
            Status::BadPacketVersion => write!(f, "protocol version mismatch"),
            Status::BadPacketLength => write!(f, "bad packet length"),
            Status::Other(code) => write!(f, "status {code}"),
        }
    }
}

/// Selection state of a source, as judged by the daemon.
///
/// The set is closed: any other value on the wire is a decode failure.
#[repr(u16)]
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum SourceState {
    /// The source currently used to discipline the clock.
    Selected = 0,
    /// Not usable for selection (unreachable, bad distance, etc.).
    NonSelectable = 1,
    /// Inconsistent with the majority of sources.
    Falseticker = 2,
    /// Excessive jitter.
    Jittery = 3,
    /// Acceptable but not chosen.
    Unselected = 4,
    /// Acceptable and a selection candidate.
    Selectable = 5,
}

impl SourceState {
    /// Whether the daemon considers this source a truechimer.
    pub fn is_truechimer(self) -> bool {
        matches!(
            self,
            SourceState::Selected | SourceState::Unselected | SourceState::Selectable
        )
    }
}

impl TryFrom<u16> for SourceState {
    type Error = ();

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SourceState::Selected),
            1 => Ok(SourceState::NonSelectable),
            2 => Ok(SourceState::Falseticker),
            3 => Ok(SourceState::Jittery),
            4 => Ok(SourceState::Unselected),
            5 => Ok(SourceState::Selectable),
            _ => Err(()),
        }
    }
}

/// How the daemon is associated with a source.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum SourceMode {
    /// A server polled in client mode.
    Client,
    /// A symmetric peer.
    Peer,
    /// A local reference clock.
    Reference,
    /// A mode this crate does not know.
    Unknown(u16),
}

impl From<u16> for SourceMode {
    fn from(value: u16) -> Self {
        match value {
            0 => SourceMode::Client,
            1 => SourceMode::Peer,
            2 => SourceMode::Reference,
            other => SourceMode::Unknown(other),
        }
    }
}

impl From<SourceMode> for u16 {
    fn from(mode: SourceMode) -> u16 {
        match mode {
            SourceMode::Client => 0,
            SourceMode::Peer => 1,
            SourceMode::Reference => 2,
            SourceMode::Unknown(value) => value,
        }
    }
}

/// Leap second status of the local clock.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum LeapStatus {
    /// No leap second pending.
    #[default]
    Normal,
    /// A second will be inserted at the end of the day.
    InsertSecond,
    /// A second will be deleted at the end of the day.
    DeleteSecond,
    /// The clock is not synchronised.
    Unsynchronised,
    /// A value this crate does not know.
    Unknown(u16),
}

impl From<u16> for LeapStatus {
    fn from(value: u16) -> Self {
        match value {
            0 => LeapStatus::Normal,
            1 => LeapStatus::InsertSecond,
            2 => LeapStatus::DeleteSecond,
            3 => LeapStatus::Unsynchronised,
            other => LeapStatus::Unknown(other),
        }
    }
}

impl From<LeapStatus> for u16 {
    fn from(status: LeapStatus) -> u16 {
        match status {
            LeapStatus::Normal => 0,
            LeapStatus::InsertSecond => 1,
            LeapStatus::DeleteSecond => 2,
            LeapStatus::Unsynchronised => 3,
            LeapStatus::Unknown(value) => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_lengths() {
        assert_eq!(Command::Null.padded_len(), 28);
        assert_eq!(Command::NSources.padded_len(), 32);
        assert_eq!(Command::SourceData.padded_len(), 76);
        assert_eq!(Command::SourceStats.padded_len(), 84);
        assert_eq!(Command::Tracking.padded_len(), 104);
    }

    #[test]
    fn test_command_codes() {
        for command in [
            Command::Null,
            Command::NSources,
            Command::SourceData,
            Command::Tracking,
            Command::SourceStats,
        ] {
            assert_eq!(Command::try_from(command as u16), Ok(command));
        }
        assert_eq!(Command::try_from(1), Err(()));
    }

    #[test]
    fn test_reply_kind_codes() {
        assert_eq!(ReplyKind::try_from(5), Ok(ReplyKind::Tracking));
        assert_eq!(ReplyKind::try_from(4), Err(()));
        assert_eq!(Command::SourceStats.reply_kind() as u16, 6);
    }

    #[test]
    fn test_truechimer_states() {
        let truechimers: Vec<u16> = (0..6)
            .filter_map(|v| SourceState::try_from(v).ok())
            .filter(|s| s.is_truechimer())
            .map(|s| s as u16)
            .collect();
        assert_eq!(truechimers, vec![0, 4, 5]);
        assert!(SourceState::try_from(6).is_err());
    }

    #[test]
    fn test_status_roundtrip() {
        for code in [0u16, 1, 2, 3, 4, 18, 19, 42] {
            assert_eq!(u16::from(Status::from(code)), code);
        }
        assert_eq!(Status::from(42).to_string(), "status 42");
    }

    #[test]
    fn test_open_enums_keep_unknown_values() {
        assert_eq!(SourceMode::from(7), SourceMode::Unknown(7));
        assert_eq!(u16::from(LeapStatus::from(9)), 9);
        assert_eq!(LeapStatus::from(3), LeapStatus::Unsynchronised);
    }
}
