//! Fatal error types for SWF decoding

use crate::header::Compression;

/// Errors that abort a decode
///
/// Everything raised while reading carries the byte offset at which the
/// problem was detected (see [`SwfError::offset`]). Recoverable conditions
/// are reported as [`crate::DecodeWarning`]s instead.
#[derive(Debug, thiserror::Error)]
pub enum SwfError {
    /// A primitive read ran past the end of the buffer
    #[error("unexpected end of data at offset {offset} (needed {needed} bytes, {available} available)")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// The first three bytes are not FWS, CWS or ZWS
    #[error("invalid signature {0:02X?} (expected FWS, CWS or ZWS)")]
    InvalidSignature([u8; 3]),

    /// Declared length is implausibly small for the amount of compressed data
    #[error("suspicious declared length {declared} for {available} bytes of body data")]
    SuspiciousLength { declared: u32, available: usize },

    /// The compressed body could not be inflated
    #[error("{kind} decompression failed at offset {offset}: {message}")]
    DecompressionFailed {
        kind: Compression,
        offset: usize,
        message: String,
    },

    /// The body could not be compressed while encoding a container
    #[error("{kind} compression failed: {message}")]
    CompressionFailed { kind: Compression, message: String },

    /// A bit field wider than 32 bits was requested
    #[error("bit count {count} out of range (max 32) at offset {offset}")]
    InvalidBitCount { count: u32, offset: usize },

    /// Structurally invalid data inside a tag payload
    #[error("invalid data at offset {offset}: {message}")]
    InvalidData { offset: usize, message: String },

    /// Nested timelines recurse deeper than the configured limit
    #[error("timeline nesting exceeds {max} levels at offset {offset}")]
    NestingTooDeep { max: u32, offset: usize },

    /// A tag handler failed to parse its payload
    #[error("failed to parse {name} (tag #{index}, type {type_id}) at offset {offset}: {source}")]
    TagParse {
        name: &'static str,
        index: usize,
        type_id: u16,
        offset: usize,
        #[source]
        source: Box<SwfError>,
    },
}

impl SwfError {
    /// Byte offset the error refers to, if any
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::UnexpectedEof { offset, .. }
            | Self::DecompressionFailed { offset, .. }
            | Self::InvalidBitCount { offset, .. }
            | Self::InvalidData { offset, .. }
            | Self::NestingTooDeep { offset, .. }
            | Self::TagParse { offset, .. } => Some(*offset),
            Self::InvalidSignature(_) => Some(0),
            Self::SuspiciousLength { .. } => Some(4),
            Self::CompressionFailed { .. } => None,
        }
    }

    /// Shorthand used by tag handlers for malformed payloads
    pub fn invalid_data(offset: usize, message: impl Into<String>) -> Self {
        Self::InvalidData {
            offset,
            message: message.into(),
        }
    }
}
