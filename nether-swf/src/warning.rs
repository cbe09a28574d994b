//! Recoverable decode anomalies
//!
//! Every warning is logged through `tracing` when it is raised and also kept
//! on the decoded [`crate::Swf`], so callers can inspect what the decoder had
//! to work around.

use std::fmt;

use crate::tags::SoundCompression;
use crate::timeline::TimelineId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeWarning {
    /// A handler consumed more or fewer bytes than the tag declared; the
    /// cursor was moved to the declared end
    TagLengthMismatch {
        timeline: TimelineId,
        index: usize,
        name: &'static str,
        type_id: u16,
        offset: usize,
        /// Consumed minus declared
        delta: i64,
    },
    /// Type id outside the known table, kept as a raw tag
    UnknownTag {
        timeline: TimelineId,
        index: usize,
        type_id: u16,
        offset: usize,
    },
    /// A character id was defined twice in one dictionary; the later
    /// definition replaced the earlier one
    DuplicateCharacter {
        timeline: TimelineId,
        character_id: i32,
        previous: usize,
        index: usize,
    },
    /// Streaming sound in a codec that is not reassembled
    UnsupportedSoundCodec {
        timeline: TimelineId,
        index: usize,
        compression: SoundCompression,
    },
    /// Sound block without a preceding stream head
    OrphanSoundBlock { timeline: TimelineId, index: usize },
    /// Handler failed and the payload was kept raw (skip policy only)
    SkippedTag {
        timeline: TimelineId,
        index: usize,
        name: &'static str,
        type_id: u16,
        offset: usize,
        error: String,
    },
    /// The container holds fewer bytes than its header declares
    ShortBody { declared: usize, actual: usize },
}

impl DecodeWarning {
    /// Index of the tag the warning refers to, within its timeline
    pub fn tag_index(&self) -> Option<usize> {
        match self {
            Self::TagLengthMismatch { index, .. }
            | Self::UnknownTag { index, .. }
            | Self::DuplicateCharacter { index, .. }
            | Self::UnsupportedSoundCodec { index, .. }
            | Self::OrphanSoundBlock { index, .. }
            | Self::SkippedTag { index, .. } => Some(*index),
            Self::ShortBody { .. } => None,
        }
    }

    pub fn timeline(&self) -> Option<TimelineId> {
        match self {
            Self::TagLengthMismatch { timeline, .. }
            | Self::UnknownTag { timeline, .. }
            | Self::DuplicateCharacter { timeline, .. }
            | Self::UnsupportedSoundCodec { timeline, .. }
            | Self::OrphanSoundBlock { timeline, .. }
            | Self::SkippedTag { timeline, .. } => Some(*timeline),
            Self::ShortBody { .. } => None,
        }
    }

    pub(crate) fn log(&self) {
        match self {
            Self::TagLengthMismatch {
                timeline,
                index,
                name,
                offset,
                delta,
                ..
            } => tracing::warn!(
                %timeline,
                index,
                tag = *name,
                offset,
                delta,
                "tag length mismatch, resyncing to declared end"
            ),
            Self::UnknownTag {
                timeline,
                index,
                type_id,
                offset,
            } => tracing::warn!(%timeline, index, type_id, offset, "unknown tag type"),
            Self::DuplicateCharacter {
                timeline,
                character_id,
                previous,
                index,
            } => tracing::warn!(
                %timeline,
                character_id,
                previous,
                index,
                "character redefined, keeping the later definition"
            ),
            Self::UnsupportedSoundCodec {
                timeline,
                index,
                compression,
            } => tracing::warn!(
                %timeline,
                index,
                %compression,
                "streaming sound codec not reassembled"
            ),
            Self::OrphanSoundBlock { timeline, index } => {
                tracing::warn!(%timeline, index, "sound block without a stream head")
            }
            Self::SkippedTag {
                timeline,
                index,
                name,
                offset,
                error,
                ..
            } => tracing::warn!(
                %timeline,
                index,
                tag = *name,
                offset,
                %error,
                "tag failed to parse, kept raw"
            ),
            Self::ShortBody { declared, actual } => {
                tracing::warn!(declared, actual, "container shorter than declared")
            }
        }
    }
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TagLengthMismatch {
                timeline,
                index,
                name,
                offset,
                delta,
                ..
            } => write!(
                f,
                "{timeline}: tag #{index} ({name}) at offset {offset} consumed {delta:+} bytes relative to its declared length"
            ),
            Self::UnknownTag {
                timeline,
                index,
                type_id,
                offset,
            } => write!(f, "{timeline}: tag #{index} at offset {offset} has unknown type {type_id}"),
            Self::DuplicateCharacter {
                timeline,
                character_id,
                previous,
                index,
            } => write!(
                f,
                "{timeline}: character {character_id} defined by tag #{previous} redefined by tag #{index}"
            ),
            Self::UnsupportedSoundCodec {
                timeline,
                index,
                compression,
            } => write!(f, "{timeline}: tag #{index} declares unsupported stream codec {compression}"),
            Self::OrphanSoundBlock { timeline, index } => {
                write!(f, "{timeline}: sound block #{index} has no stream head")
            }
            Self::SkippedTag {
                timeline,
                index,
                name,
                offset,
                error,
                ..
            } => write!(f, "{timeline}: tag #{index} ({name}) at offset {offset} skipped: {error}"),
            Self::ShortBody { declared, actual } => {
                write!(f, "container declares {declared} bytes but holds {actual}")
            }
        }
    }
}

/// Log a warning and keep it
pub(crate) fn emit(sink: &mut Vec<DecodeWarning>, warning: DecodeWarning) {
    warning.log();
    sink.push(warning);
}
