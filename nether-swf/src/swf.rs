//! Whole-file decoding

use std::sync::Arc;

use crate::config::DecodeConfig;
use crate::error::SwfError;
use crate::header::Header;
use crate::stream::SwfStream;
use crate::tags::{DefaultTagFactory, TagFactory};
use crate::timeline::{
    DecodeSession, DecodeStep, TagRecord, TagStreamDecoder, Timeline, TimelineArena, TimelineId,
};
use crate::warning::DecodeWarning;

/// A decoded container
#[derive(Debug)]
pub struct Swf {
    pub header: Header,
    pub timelines: TimelineArena,
    pub warnings: Vec<DecodeWarning>,
}

impl Swf {
    pub fn root(&self) -> &Timeline {
        self.timelines.root()
    }

    pub fn timeline(&self, id: TimelineId) -> Option<&Timeline> {
        self.timelines.get(id)
    }

    /// Defining tag of a character as seen from `timeline`
    pub fn lookup(&self, timeline: TimelineId, character_id: i32) -> Option<&TagRecord> {
        self.timelines.lookup(timeline, character_id)
    }

    /// Nested timeline of a sprite defined on the root timeline
    pub fn sprite_timeline(&self, sprite_id: u16) -> Option<&Timeline> {
        let id = self
            .root()
            .definition(i32::from(sprite_id))?
            .handler
            .nested_timeline()?;
        self.timeline(id)
    }
}

/// Incremental decoder over the root timeline
///
/// The header is parsed up front; each [`step`](Self::step) then decodes one
/// root-level tag (a sprite's nested tags are decoded as part of it).
pub struct SwfDecoder {
    stream: SwfStream,
    header: Header,
    session: DecodeSession,
    factory: Arc<dyn TagFactory>,
}

impl SwfDecoder {
    pub fn new(data: impl Into<Vec<u8>>, config: DecodeConfig) -> Result<Self, SwfError> {
        Self::with_factory(data, config, Arc::new(DefaultTagFactory::new()))
    }

    pub fn with_factory(
        data: impl Into<Vec<u8>>,
        config: DecodeConfig,
        factory: Arc<dyn TagFactory>,
    ) -> Result<Self, SwfError> {
        let mut stream = SwfStream::from_bytes(data);
        let header = Header::read(&mut stream, &config)?;
        let mut session = DecodeSession::new(config);

        let declared = header.declared_length as usize;
        if stream.len() < declared {
            session.warn(DecodeWarning::ShortBody {
                declared,
                actual: stream.len(),
            });
        }
        session.arena[TimelineId::ROOT].start_offset = stream.position();

        Ok(Self {
            stream,
            header,
            session,
            factory,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Timelines decoded so far
    pub fn timelines(&self) -> &TimelineArena {
        self.session.arena()
    }

    pub fn warnings(&self) -> &[DecodeWarning] {
        self.session.warnings()
    }

    /// Offset of the next root-level tag
    pub fn position(&self) -> usize {
        self.stream.position()
    }

    pub fn step(&mut self) -> Result<DecodeStep, SwfError> {
        TagStreamDecoder::new(
            &mut self.session,
            Arc::clone(&self.factory),
            TimelineId::ROOT,
            self.header.version,
            0,
        )
        .step(&mut self.stream)
    }

    /// Decode whatever is left and finalize
    pub fn finish(mut self) -> Result<Swf, SwfError> {
        let mut decoder = TagStreamDecoder::new(
            &mut self.session,
            Arc::clone(&self.factory),
            TimelineId::ROOT,
            self.header.version,
            0,
        );
        while let DecodeStep::Tag { .. } = decoder.step(&mut self.stream)? {}
        decoder.finish();

        let (timelines, warnings) = self.session.into_parts();
        Ok(Swf {
            header: self.header,
            timelines,
            warnings,
        })
    }
}

/// Decode a complete container with the default tag handlers
pub fn decode_swf(data: &[u8], config: &DecodeConfig) -> Result<Swf, SwfError> {
    SwfDecoder::new(data, config.clone())?.finish()
}

/// Decode with a custom handler factory
pub fn decode_swf_with(
    data: &[u8],
    config: &DecodeConfig,
    factory: Arc<dyn TagFactory>,
) -> Result<Swf, SwfError> {
    SwfDecoder::with_factory(data, config.clone(), factory)?.finish()
}
