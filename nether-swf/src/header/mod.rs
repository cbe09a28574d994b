//! Container header: signature, version, declared length, body decompression
//! and the fixed stage/timing fields
//!
//! Parsing happens in two steps. [`Prelude::read`] consumes the first eight
//! bytes and validates them; [`Prelude::read_body`] inflates the body if
//! needed and reads the stage rectangle, frame rate and frame count, leaving
//! the cursor on the first tag.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::DecodeConfig;
use crate::error::SwfError;
use crate::records::Rect;
use crate::stream::SwfStream;

mod compression;
#[cfg(test)]
mod tests;

pub use compression::encode_container;

/// Signature + version + declared length
pub const PRELUDE_SIZE: usize = 8;

/// Body compression selected by the signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Compression {
    /// `FWS`
    None,
    /// `CWS`
    Zlib,
    /// `ZWS`
    Lzma,
}

impl Compression {
    pub fn from_signature(signature: [u8; 3]) -> Option<Self> {
        match &signature {
            b"FWS" => Some(Self::None),
            b"CWS" => Some(Self::Zlib),
            b"ZWS" => Some(Self::Lzma),
            _ => None,
        }
    }

    pub fn signature(self) -> [u8; 3] {
        match self {
            Self::None => *b"FWS",
            Self::Zlib => *b"CWS",
            Self::Lzma => *b"ZWS",
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "uncompressed"),
            Self::Zlib => write!(f, "zlib"),
            Self::Lzma => write!(f, "LZMA"),
        }
    }
}

/// First eight bytes of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prelude {
    pub compression: Compression,
    pub version: u8,
    /// Total uncompressed file length, prelude included
    pub declared_length: u32,
}

impl Prelude {
    /// Read and validate signature, version and declared length
    pub fn read(stream: &mut SwfStream) -> Result<Self, SwfError> {
        let mut signature = [0u8; 3];
        for byte in &mut signature {
            *byte = stream.read_u8()?;
        }
        let compression =
            Compression::from_signature(signature).ok_or(SwfError::InvalidSignature(signature))?;
        let version = stream.read_u8()?;
        let declared_length = stream.read_u32()?;

        // A corrupt length field must not be able to drive an unbounded inflate
        let available = stream.remaining();
        if (declared_length as usize) < available / 4 {
            return Err(SwfError::SuspiciousLength {
                declared: declared_length,
                available,
            });
        }

        Ok(Self {
            compression,
            version,
            declared_length,
        })
    }

    /// Expected size of everything after the prelude once inflated
    pub fn body_length(&self) -> usize {
        (self.declared_length as usize).saturating_sub(PRELUDE_SIZE)
    }

    /// Inflate the body in place (no-op for `FWS`), then read the fixed
    /// header fields
    pub fn read_body(self, stream: &mut SwfStream, config: &DecodeConfig) -> Result<Header, SwfError> {
        if self.compression != Compression::None {
            compression::unpack_body(&self, stream, config)?;
        }

        let stage = Rect::read(stream)?;
        let frame_rate = stream.read_fixed8()?;
        let frame_count = stream.read_u16()?;

        tracing::debug!(
            compression = %self.compression,
            version = self.version,
            declared_length = self.declared_length,
            frame_count,
            "read container header"
        );

        Ok(Header {
            compression: self.compression,
            version: self.version,
            declared_length: self.declared_length,
            stage,
            frame_rate,
            frame_count,
        })
    }
}

/// Parsed container header
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Header {
    pub compression: Compression,
    pub version: u8,
    pub declared_length: u32,
    /// Stage bounds in twips
    pub stage: Rect,
    /// Frames per second (8.8 fixed point on disk)
    pub frame_rate: f32,
    pub frame_count: u16,
}

impl Header {
    /// Header for an uncompressed container; the declared length is
    /// filled in when the container is encoded
    pub fn new(version: u8, stage: Rect, frame_rate: f32, frame_count: u16) -> Self {
        Self {
            compression: Compression::None,
            version,
            declared_length: 0,
            stage,
            frame_rate,
            frame_count,
        }
    }

    /// Read the whole header, leaving the cursor at the first tag
    pub fn read(stream: &mut SwfStream, config: &DecodeConfig) -> Result<Self, SwfError> {
        Prelude::read(stream)?.read_body(stream, config)
    }

    /// Write stage rectangle, frame rate and frame count (the part of the
    /// header that lives inside the compressed body)
    pub fn write_body(&self, stream: &mut SwfStream) -> Result<(), SwfError> {
        self.stage.write(stream)?;
        stream.write_fixed8(self.frame_rate);
        stream.write_u16(self.frame_count);
        Ok(())
    }
}
