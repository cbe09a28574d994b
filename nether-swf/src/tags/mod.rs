//! Tag records and the dispatch seam
//!
//! The decoder only knows tags through [`TagHandler`]: it asks a
//! [`TagFactory`] for a handler keyed by type id, lets it parse the declared
//! payload, and then looks at the handler's [`TimelineEffect`] to rebuild the
//! timeline. Handlers for nested timelines additionally implement
//! [`TimelineContainer`].
//!
//! Only the handlers the timeline reconstruction needs live here. Shape,
//! font, bitmap and script payloads stay opaque.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::SwfError;
use crate::records::Rgb;
use crate::stream::SwfStream;
use crate::timeline::{DecodeSession, TimelineId};

mod control;
mod definition;
mod display;
mod factory;
mod metadata;
mod raw;
mod sound;
mod sprite;
pub mod types;

pub use control::{End, JpegTables, SetBackgroundColor, ShowFrame};
pub use definition::Definition;
pub use display::{PlaceFlags, PlaceObject, RemoveObject};
pub use factory::{DefaultTagFactory, TagConstructor};
pub use metadata::{FrameLabel, FrameLabelTag, Scene, SceneAndFrameLabelData};
pub use raw::RawTag;
pub use sound::{SoundCompression, SoundFormat, SoundStreamBlock, SoundStreamHead};
pub use sprite::DefineSprite;
pub use types::tag_name;

// =============================================================================
// Tag header
// =============================================================================

/// Type id and payload length preceding every tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagHeader {
    pub type_id: u16,
    pub length: u32,
    /// Length stored in the 32-bit escaped form
    pub long: bool,
}

impl TagHeader {
    /// Size of the short form; also the minimum a tag can occupy
    pub const SHORT_SIZE: usize = 2;
    /// Short form plus the 32-bit length
    pub const LONG_SIZE: usize = 6;
    /// Inline length value announcing a 32-bit length
    pub const LENGTH_ESCAPE: u16 = 0x3F;

    pub fn new(type_id: u16, length: u32) -> Self {
        Self {
            type_id,
            length,
            long: length >= u32::from(Self::LENGTH_ESCAPE),
        }
    }

    /// Force the long form even for short payloads
    pub fn long(type_id: u16, length: u32) -> Self {
        Self {
            type_id,
            length,
            long: true,
        }
    }

    /// Bytes the header occupies
    pub fn size(&self) -> usize {
        if self.long {
            Self::LONG_SIZE
        } else {
            Self::SHORT_SIZE
        }
    }

    pub fn read(stream: &mut SwfStream) -> Result<Self, SwfError> {
        let code = stream.read_u16()?;
        let type_id = code >> 6;
        let inline = code & Self::LENGTH_ESCAPE;
        if inline != Self::LENGTH_ESCAPE {
            return Ok(Self {
                type_id,
                length: u32::from(inline),
                long: false,
            });
        }

        // Stored signed; a negative length can only come from corruption
        let offset = stream.position();
        let length = stream.read_i32()?;
        let length = u32::try_from(length).map_err(|_| {
            SwfError::invalid_data(offset, format!("negative tag length {length}"))
        })?;
        Ok(Self {
            type_id,
            length,
            long: true,
        })
    }

    pub fn write(&self, stream: &mut SwfStream) {
        if self.long || self.length >= u32::from(Self::LENGTH_ESCAPE) {
            stream.write_u16((self.type_id << 6) | Self::LENGTH_ESCAPE);
            stream.write_u32(self.length);
        } else {
            stream.write_u16((self.type_id << 6) | self.length as u16);
        }
    }
}

/// Write a complete tag: header (short form when it fits) and payload
pub fn write_tag(stream: &mut SwfStream, type_id: u16, payload: &[u8]) {
    TagHeader::new(type_id, payload.len() as u32).write(stream);
    stream.write_bytes(payload);
}

// =============================================================================
// Handler seam
// =============================================================================

/// What a decoded tag means for the timeline that owns it
#[derive(Debug, Clone, Copy)]
pub enum TimelineEffect<'a> {
    /// End of the current timeline
    End,
    /// Closes the open frame
    ShowFrame,
    Place(&'a PlaceObject),
    Remove(&'a RemoveObject),
    /// Label for the open frame
    FrameLabel(&'a str),
    /// Scene list and frame labels for the whole timeline
    SceneData {
        scenes: &'a [Scene],
        labels: &'a [FrameLabel],
    },
    SoundStreamHead(&'a SoundStreamHead),
    SoundStreamBlock(&'a [u8]),
    BackgroundColor(Rgb),
    /// Shared JPEG encoding tables
    JpegTables,
}

/// A parsed tag payload
///
/// `tag_type` is the format's numeric type id (named so it does not collide
/// with [`Any::type_id`]).
pub trait TagHandler: fmt::Debug {
    fn tag_type(&self) -> u16;

    fn name(&self) -> &'static str {
        tag_name(self.tag_type()).unwrap_or("Unknown")
    }

    /// Id of the character this tag defines, if any
    fn character_id(&self) -> Option<i32> {
        None
    }

    /// Parse `length` payload bytes starting at the cursor
    fn parse(&mut self, stream: &mut SwfStream, length: u32, version: u8) -> Result<(), SwfError>;

    fn effect(&self) -> Option<TimelineEffect<'_>> {
        None
    }

    /// Present for handlers that own a nested timeline
    fn as_container_mut(&mut self) -> Option<&mut dyn TimelineContainer> {
        None
    }

    /// Nested timeline decoded by this tag
    fn nested_timeline(&self) -> Option<TimelineId> {
        None
    }

    fn as_any(&self) -> &dyn Any;
}

/// Produces handlers by type id. Unknown ids must still yield a handler.
pub trait TagFactory: Send + Sync {
    fn create(&self, type_id: u16) -> Box<dyn TagHandler>;
}

/// Context injected into a nested container before it decodes
#[derive(Clone)]
pub struct TimelineLink {
    /// Factory of the enclosing decoder, shared by the nested stream
    pub factory: Arc<dyn TagFactory>,
    /// Root timeline, used for dictionary fall-through only
    pub root: TimelineId,
    /// Nesting depth of the timeline about to be decoded
    pub depth: u32,
}

impl fmt::Debug for TimelineLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimelineLink")
            .field("root", &self.root)
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}

/// A tag whose payload is itself a tag stream with its own timeline
pub trait TimelineContainer {
    fn attach(&mut self, link: TimelineLink);

    /// Parse the container's own fields, then decode the nested stream from
    /// the same cursor into a new timeline in `session`
    fn decode_into(
        &mut self,
        stream: &mut SwfStream,
        length: u32,
        version: u8,
        session: &mut DecodeSession,
    ) -> Result<(), SwfError>;
}

/// Cursor offset at which a payload of `length` bytes starting here ends
pub(crate) fn payload_end(stream: &SwfStream, length: u32) -> usize {
    stream.position() + length as usize
}

/// Bytes left in the payload, clamped at zero when a handler over-read
pub(crate) fn payload_left(stream: &SwfStream, end: usize) -> usize {
    end.saturating_sub(stream.position())
}
