//! DefineSprite: a character with its own nested timeline

use std::any::Any;

use super::{TagHandler, TimelineContainer, TimelineLink, payload_end, payload_left, types};
use crate::error::SwfError;
use crate::stream::SwfStream;
use crate::timeline::{DecodeSession, TagStreamDecoder, TimelineId};

#[derive(Debug, Default)]
pub struct DefineSprite {
    pub sprite_id: u16,
    /// Frame count declared in the tag, not necessarily the decoded one
    pub frame_count: u16,
    link: Option<TimelineLink>,
    timeline: Option<TimelineId>,
}

impl DefineSprite {
    fn read_fields(&mut self, stream: &mut SwfStream) -> Result<(), SwfError> {
        self.sprite_id = stream.read_u16()?;
        self.frame_count = stream.read_u16()?;
        Ok(())
    }
}

impl TagHandler for DefineSprite {
    fn tag_type(&self) -> u16 {
        types::DEFINE_SPRITE
    }

    fn character_id(&self) -> Option<i32> {
        Some(i32::from(self.sprite_id))
    }

    /// Header fields only; the nested stream is skipped. Decoding it needs a
    /// session, see [`TimelineContainer::decode_into`].
    fn parse(&mut self, stream: &mut SwfStream, length: u32, _version: u8) -> Result<(), SwfError> {
        let end = payload_end(stream, length);
        self.read_fields(stream)?;
        stream.skip(payload_left(stream, end))
    }

    fn as_container_mut(&mut self) -> Option<&mut dyn TimelineContainer> {
        Some(self)
    }

    fn nested_timeline(&self) -> Option<TimelineId> {
        self.timeline
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl TimelineContainer for DefineSprite {
    fn attach(&mut self, link: TimelineLink) {
        self.link = Some(link);
    }

    fn decode_into(
        &mut self,
        stream: &mut SwfStream,
        length: u32,
        version: u8,
        session: &mut DecodeSession,
    ) -> Result<(), SwfError> {
        let end = payload_end(stream, length);
        self.read_fields(stream)?;

        let link = self.link.take().ok_or_else(|| {
            SwfError::invalid_data(stream.position(), "sprite decoded without a timeline link")
        })?;
        let timeline =
            session.open_timeline(link.root, link.depth, self.sprite_id, stream.position())?;
        self.timeline = Some(timeline);

        TagStreamDecoder::new(session, link.factory, timeline, version, link.depth)
            .with_limit(end)
            .run(stream)
    }
}
