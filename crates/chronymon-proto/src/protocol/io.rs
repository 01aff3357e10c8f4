// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use byteorder::{BE, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

use super::{
    Address, LeapStatus, NSources, PacketType, ReadBytes, ReadFromBytes, ReferenceId,
    ReferenceTime, ReplyHeader, RequestHeader, SourceData, SourceMode, SourceState, SourceStats,
    Tracking, WriteBytes, WriteToBytes, decode_float, encode_float,
};
use crate::error::ParseError;

// Writer implementations.

impl<W> WriteBytes for W
where
    W: WriteBytesExt,
{
    fn write_bytes<P: WriteToBytes>(&mut self, protocol: P) -> io::Result<()> {
        protocol.write_to_bytes(self)
    }
}

impl<P> WriteToBytes for &P
where
    P: WriteToBytes,
{
    fn write_to_bytes<W: WriteBytesExt>(&self, writer: W) -> io::Result<()> {
        (*self).write_to_bytes(writer)
    }
}

fn write_float<W: WriteBytesExt>(writer: &mut W, value: f64) -> io::Result<()> {
    writer.write_u32::<BE>(encode_float(value))
}

impl WriteToBytes for RequestHeader {
    fn write_to_bytes<W: WriteBytesExt>(&self, mut writer: W) -> io::Result<()> {
        writer.write_u8(self.version)?;
        writer.write_u8(PacketType::Request as u8)?;
        writer.write_u8(0)?;
        writer.write_u8(0)?;
        writer.write_u16::<BE>(self.command)?;
        writer.write_u16::<BE>(self.attempt)?;
        writer.write_u32::<BE>(self.sequence)?;
        writer.write_u32::<BE>(0)?;
        writer.write_u32::<BE>(0)?;
        Ok(())
    }
}

impl WriteToBytes for ReplyHeader {
    fn write_to_bytes<W: WriteBytesExt>(&self, mut writer: W) -> io::Result<()> {
        writer.write_u8(self.version)?;
        writer.write_u8(self.packet_type)?;
        writer.write_u8(0)?;
        writer.write_u8(0)?;
        writer.write_u16::<BE>(self.command)?;
        writer.write_u16::<BE>(self.reply)?;
        writer.write_u16::<BE>(self.status)?;
        for _ in 0..3 {
            writer.write_u16::<BE>(0)?;
        }
        writer.write_u32::<BE>(self.sequence)?;
        writer.write_u32::<BE>(0)?;
        writer.write_u32::<BE>(0)?;
        Ok(())
    }
}

impl WriteToBytes for Address {
    fn write_to_bytes<W: WriteBytesExt>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(&self.bytes)?;
        writer.write_u16::<BE>(self.family)?;
        writer.write_u16::<BE>(0)?;
        Ok(())
    }
}

impl WriteToBytes for ReferenceId {
    fn write_to_bytes<W: WriteBytesExt>(&self, mut writer: W) -> io::Result<()> {
        writer.write_u32::<BE>(self.0)
    }
}

impl WriteToBytes for ReferenceTime {
    fn write_to_bytes<W: WriteBytesExt>(&self, mut writer: W) -> io::Result<()> {
        writer.write_u32::<BE>((self.seconds >> 32) as u32)?;
        writer.write_u32::<BE>(self.seconds as u32)?;
        writer.write_u32::<BE>(self.nanos)?;
        Ok(())
    }
}

impl WriteToBytes for NSources {
    fn write_to_bytes<W: WriteBytesExt>(&self, mut writer: W) -> io::Result<()> {
        writer.write_u32::<BE>(self.count)
    }
}

impl WriteToBytes for SourceData {
    fn write_to_bytes<W: WriteBytesExt>(&self, mut writer: W) -> io::Result<()> {
        writer.write_bytes(self.address)?;
        writer.write_i16::<BE>(self.poll)?;
        writer.write_u16::<BE>(self.stratum)?;
        writer.write_u16::<BE>(self.state as u16)?;
        writer.write_u16::<BE>(self.mode.into())?;
        writer.write_u16::<BE>(self.flags)?;
        writer.write_u16::<BE>(self.reachability)?;
        writer.write_u32::<BE>(self.since_sample)?;
        write_float(&mut writer, self.orig_latest_offset)?;
        write_float(&mut writer, self.latest_offset)?;
        write_float(&mut writer, self.latest_offset_error)?;
        Ok(())
    }
}

impl WriteToBytes for SourceStats {
    fn write_to_bytes<W: WriteBytesExt>(&self, mut writer: W) -> io::Result<()> {
        writer.write_bytes(self.reference_id)?;
        writer.write_bytes(self.address)?;
        writer.write_u32::<BE>(self.sample_count)?;
        writer.write_u32::<BE>(self.run_count)?;
        writer.write_u32::<BE>(self.span_seconds)?;
        write_float(&mut writer, self.standard_deviation)?;
        write_float(&mut writer, self.residual_freq_ppm)?;
        write_float(&mut writer, self.skew_ppm)?;
        write_float(&mut writer, self.estimated_offset)?;
        write_float(&mut writer, self.estimated_offset_error)?;
        Ok(())
    }
}

impl WriteToBytes for Tracking {
    fn write_to_bytes<W: WriteBytesExt>(&self, mut writer: W) -> io::Result<()> {
        writer.write_bytes(self.reference_id)?;
        writer.write_bytes(self.address)?;
        writer.write_u16::<BE>(self.stratum)?;
        writer.write_u16::<BE>(self.leap_status.into())?;
        writer.write_bytes(self.reference_time)?;
        for value in [
            self.current_correction,
            self.last_offset,
            self.rms_offset,
            self.freq_ppm,
            self.residual_freq_ppm,
            self.skew_ppm,
            self.root_delay,
            self.root_dispersion,
            self.last_update_interval,
        ] {
            write_float(&mut writer, value)?;
        }
        Ok(())
    }
}

// Reader implementations.

impl<R> ReadBytes for R
where
    R: ReadBytesExt,
{
    fn read_bytes<P: ReadFromBytes>(&mut self) -> io::Result<P> {
        P::read_from_bytes(self)
    }
}

fn read_float<R: ReadBytesExt>(reader: &mut R) -> io::Result<f64> {
    Ok(decode_float(reader.read_u32::<BE>()?))
}

impl ReadFromBytes for RequestHeader {
    fn read_from_bytes<R: ReadBytesExt>(mut reader: R) -> io::Result<Self> {
        let version = reader.read_u8()?;
        let _packet_type = reader.read_u8()?;
        let _reserved = reader.read_u16::<BE>()?;
        let command = reader.read_u16::<BE>()?;
        let attempt = reader.read_u16::<BE>()?;
        let sequence = reader.read_u32::<BE>()?;
        let _reserved = reader.read_u64::<BE>()?;
        Ok(RequestHeader {
            version,
            command,
            attempt,
            sequence,
        })
    }
}

impl ReadFromBytes for ReplyHeader {
    fn read_from_bytes<R: ReadBytesExt>(mut reader: R) -> io::Result<Self> {
        let version = reader.read_u8()?;
        let packet_type = reader.read_u8()?;
        let _reserved = reader.read_u16::<BE>()?;
        let command = reader.read_u16::<BE>()?;
        let reply = reader.read_u16::<BE>()?;
        let status = reader.read_u16::<BE>()?;
        let _reserved = reader.read_u48::<BE>()?;
        let sequence = reader.read_u32::<BE>()?;
        let _reserved = reader.read_u64::<BE>()?;
        Ok(ReplyHeader {
            version,
            packet_type,
            command,
            reply,
            status,
            sequence,
        })
    }
}

impl ReadFromBytes for Address {
    fn read_from_bytes<R: ReadBytesExt>(mut reader: R) -> io::Result<Self> {
        let mut bytes = [0u8; 16];
        reader.read_exact(&mut bytes)?;
        let family = reader.read_u16::<BE>()?;
        let _padding = reader.read_u16::<BE>()?;
        Ok(Address { family, bytes })
    }
}

impl ReadFromBytes for ReferenceId {
    fn read_from_bytes<R: ReadBytesExt>(mut reader: R) -> io::Result<Self> {
        Ok(ReferenceId(reader.read_u32::<BE>()?))
    }
}

impl ReadFromBytes for ReferenceTime {
    fn read_from_bytes<R: ReadBytesExt>(mut reader: R) -> io::Result<Self> {
        let high = reader.read_u32::<BE>()?;
        let low = reader.read_u32::<BE>()?;
        let nanos = reader.read_u32::<BE>()?;
        Ok(ReferenceTime {
            seconds: (u64::from(high) << 32) | u64::from(low),
            nanos,
        })
    }
}

impl ReadFromBytes for NSources {
    fn read_from_bytes<R: ReadBytesExt>(mut reader: R) -> io::Result<Self> {
        Ok(NSources {
            count: reader.read_u32::<BE>()?,
        })
    }
}

impl ReadFromBytes for SourceData {
    fn read_from_bytes<R: ReadBytesExt>(mut reader: R) -> io::Result<Self> {
        let address = reader.read_bytes()?;
        let poll = reader.read_i16::<BE>()?;
        let stratum = reader.read_u16::<BE>()?;
        let state_u16 = reader.read_u16::<BE>()?;
        let state = SourceState::try_from(state_u16).map_err(|_| ParseError::InvalidField {
            field: "source state",
            value: u32::from(state_u16),
        })?;
        let mode = SourceMode::from(reader.read_u16::<BE>()?);
        let flags = reader.read_u16::<BE>()?;
        let reachability = reader.read_u16::<BE>()?;
        let since_sample = reader.read_u32::<BE>()?;
        let orig_latest_offset = read_float(&mut reader)?;
        let latest_offset = read_float(&mut reader)?;
        let latest_offset_error = read_float(&mut reader)?;
        Ok(SourceData {
            address,
            poll,
            stratum,
            state,
            mode,
            flags,
            reachability,
            since_sample,
            orig_latest_offset,
            latest_offset,
            latest_offset_error,
        })
    }
}

impl ReadFromBytes for SourceStats {
    fn read_from_bytes<R: ReadBytesExt>(mut reader: R) -> io::Result<Self> {
        let reference_id = reader.read_bytes()?;
        let address = reader.read_bytes()?;
        let sample_count = reader.read_u32::<BE>()?;
        let run_count = reader.read_u32::<BE>()?;
        let span_seconds = reader.read_u32::<BE>()?;
        Ok(SourceStats {
            reference_id,
            address,
            sample_count,
            run_count,
            span_seconds,
            standard_deviation: read_float(&mut reader)?,
            residual_freq_ppm: read_float(&mut reader)?,
            skew_ppm: read_float(&mut reader)?,
            estimated_offset: read_float(&mut reader)?,
            estimated_offset_error: read_float(&mut reader)?,
        })
    }
}

impl ReadFromBytes for Tracking {
    fn read_from_bytes<R: ReadBytesExt>(mut reader: R) -> io::Result<Self> {
        let reference_id = reader.read_bytes()?;
        let address = reader.read_bytes()?;
        let stratum = reader.read_u16::<BE>()?;
        let leap_status = LeapStatus::from(reader.read_u16::<BE>()?);
        let reference_time = reader.read_bytes()?;
        Ok(Tracking {
            reference_id,
            address,
            stratum,
            leap_status,
            reference_time,
            current_correction: read_float(&mut reader)?,
            last_offset: read_float(&mut reader)?,
            rms_offset: read_float(&mut reader)?,
            freq_ppm: read_float(&mut reader)?,
            residual_freq_ppm: read_float(&mut reader)?,
            skew_ppm: read_float(&mut reader)?,
            root_delay: read_float(&mut reader)?,
            root_dispersion: read_float(&mut reader)?,
            last_update_interval: read_float(&mut reader)?,
        })
    }
}
