//! Streaming sound: SoundStreamHead/SoundStreamHead2 and SoundStreamBlock
//!
//! Format byte layout (MSB first):
//!
//! ```text
//! compression:4  rate:2  16-bit:1  stereo:1
//! ```
//!
//! The playback byte has the same shape with the compression bits reserved.

use std::any::Any;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{TagHandler, TimelineEffect, payload_end, payload_left, types};
use crate::error::SwfError;
use crate::stream::SwfStream;

/// Sample rates addressed by the 2-bit rate field
pub const SAMPLE_RATES: [u32; 4] = [5512, 11025, 22050, 44100];

/// Audio codec ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCompression {
    UncompressedNative,
    Adpcm,
    Mp3,
    UncompressedLittleEndian,
    Nellymoser16k,
    Nellymoser8k,
    Nellymoser,
    Speex,
    Unknown(u8),
}

impl SoundCompression {
    pub fn from_id(id: u8) -> Self {
        match id {
            0 => Self::UncompressedNative,
            1 => Self::Adpcm,
            2 => Self::Mp3,
            3 => Self::UncompressedLittleEndian,
            4 => Self::Nellymoser16k,
            5 => Self::Nellymoser8k,
            6 => Self::Nellymoser,
            11 => Self::Speex,
            other => Self::Unknown(other),
        }
    }

    pub fn id(self) -> u8 {
        match self {
            Self::UncompressedNative => 0,
            Self::Adpcm => 1,
            Self::Mp3 => 2,
            Self::UncompressedLittleEndian => 3,
            Self::Nellymoser16k => 4,
            Self::Nellymoser8k => 5,
            Self::Nellymoser => 6,
            Self::Speex => 11,
            Self::Unknown(id) => id,
        }
    }
}

impl fmt::Display for SoundCompression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UncompressedNative => write!(f, "uncompressed (native endian)"),
            Self::Adpcm => write!(f, "ADPCM"),
            Self::Mp3 => write!(f, "MP3"),
            Self::UncompressedLittleEndian => write!(f, "uncompressed (little endian)"),
            Self::Nellymoser16k => write!(f, "Nellymoser 16kHz"),
            Self::Nellymoser8k => write!(f, "Nellymoser 8kHz"),
            Self::Nellymoser => write!(f, "Nellymoser"),
            Self::Speex => write!(f, "Speex"),
            Self::Unknown(id) => write!(f, "unknown codec {id}"),
        }
    }
}

/// One packed format byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundFormat {
    pub compression: SoundCompression,
    /// Index into [`SAMPLE_RATES`]
    pub rate: u8,
    pub is_16_bit: bool,
    pub is_stereo: bool,
}

impl Default for SoundFormat {
    fn default() -> Self {
        Self {
            compression: SoundCompression::UncompressedNative,
            rate: 0,
            is_16_bit: false,
            is_stereo: false,
        }
    }
}

impl SoundFormat {
    pub fn sample_rate(&self) -> u32 {
        SAMPLE_RATES[usize::from(self.rate & 3)]
    }

    fn read(stream: &mut SwfStream) -> Result<Self, SwfError> {
        let compression = SoundCompression::from_id(stream.read_ubits(4)? as u8);
        let rate = stream.read_ubits(2)? as u8;
        let is_16_bit = stream.read_bit()?;
        let is_stereo = stream.read_bit()?;
        Ok(Self {
            compression,
            rate,
            is_16_bit,
            is_stereo,
        })
    }

    fn write(&self, stream: &mut SwfStream) -> Result<(), SwfError> {
        stream.write_ubits(4, u32::from(self.compression.id()))?;
        stream.write_ubits(2, u32::from(self.rate & 3))?;
        stream.write_bit(self.is_16_bit)?;
        stream.write_bit(self.is_stereo)?;
        Ok(())
    }
}

/// Declares the streaming sound format of the enclosing timeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundStreamHead {
    type_id: u16,
    pub playback: SoundFormat,
    pub stream: SoundFormat,
    /// Average samples per block
    pub samples_per_block: u16,
    /// Only present for MP3 streams
    pub latency_seek: Option<i16>,
}

impl SoundStreamHead {
    pub fn new(type_id: u16) -> Self {
        Self {
            type_id,
            playback: SoundFormat::default(),
            stream: SoundFormat::default(),
            samples_per_block: 0,
            latency_seek: None,
        }
    }

    pub fn write(&self, stream: &mut SwfStream) -> Result<(), SwfError> {
        self.playback.write(stream)?;
        self.stream.write(stream)?;
        stream.write_u16(self.samples_per_block);
        if let Some(seek) = self.latency_seek {
            stream.write_i16(seek);
        }
        Ok(())
    }
}

impl TagHandler for SoundStreamHead {
    fn tag_type(&self) -> u16 {
        self.type_id
    }

    fn parse(&mut self, stream: &mut SwfStream, length: u32, _version: u8) -> Result<(), SwfError> {
        let end = payload_end(stream, length);
        self.playback = SoundFormat::read(stream)?;
        self.stream = SoundFormat::read(stream)?;
        self.samples_per_block = stream.read_u16()?;
        // Some encoders omit the seek field altogether
        if self.stream.compression == SoundCompression::Mp3 && payload_left(stream, end) >= 2 {
            self.latency_seek = Some(stream.read_i16()?);
        }
        Ok(())
    }

    fn effect(&self) -> Option<TimelineEffect<'_>> {
        Some(TimelineEffect::SoundStreamHead(self))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// One chunk of streaming sound data, interpreted by the timeline's head
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoundStreamBlock {
    pub data: Vec<u8>,
}

impl TagHandler for SoundStreamBlock {
    fn tag_type(&self) -> u16 {
        types::SOUND_STREAM_BLOCK
    }

    fn parse(&mut self, stream: &mut SwfStream, length: u32, _version: u8) -> Result<(), SwfError> {
        self.data = stream.read_bytes(length as usize)?;
        Ok(())
    }

    fn effect(&self) -> Option<TimelineEffect<'_>> {
        Some(TimelineEffect::SoundStreamBlock(&self.data))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
