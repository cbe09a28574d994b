//! The tag loop: header, handler dispatch, length enforcement, resync
//!
//! One [`TagStreamDecoder`] drives one timeline. Nested timelines get their
//! own decoder on the same stream, limited to the enclosing tag's payload,
//! and share the [`DecodeSession`] of the outer one.

use std::sync::Arc;

use super::reconstruct;
use super::{TagRecord, TimelineArena, TimelineId};
use crate::config::{DecodeConfig, TagErrorPolicy};
use crate::error::SwfError;
use crate::stream::SwfStream;
use crate::tags::{RawTag, TagFactory, TagHeader, TimelineLink, tag_name};
use crate::warning::{DecodeWarning, emit};

/// State shared by every timeline of one decode
#[derive(Debug)]
pub struct DecodeSession {
    pub(crate) arena: TimelineArena,
    pub(crate) warnings: Vec<DecodeWarning>,
    pub(crate) config: DecodeConfig,
}

impl DecodeSession {
    pub fn new(config: DecodeConfig) -> Self {
        Self {
            arena: TimelineArena::new(),
            warnings: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    pub fn arena(&self) -> &TimelineArena {
        &self.arena
    }

    pub fn warnings(&self) -> &[DecodeWarning] {
        &self.warnings
    }

    /// Log a warning and keep it
    pub fn warn(&mut self, warning: DecodeWarning) {
        emit(&mut self.warnings, warning);
    }

    /// Allocate the timeline for a nested container at `depth`
    pub fn open_timeline(
        &mut self,
        root: TimelineId,
        depth: u32,
        sprite_id: u16,
        offset: usize,
    ) -> Result<TimelineId, SwfError> {
        if depth > self.config.max_nesting_depth {
            return Err(SwfError::NestingTooDeep {
                max: self.config.max_nesting_depth,
                offset,
            });
        }
        Ok(self.arena.push(root, depth, Some(sprite_id), offset))
    }

    pub fn into_parts(self) -> (TimelineArena, Vec<DecodeWarning>) {
        (self.arena, self.warnings)
    }
}

/// Result of one [`TagStreamDecoder::step`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStep {
    /// A tag was appended to the timeline at this index
    Tag { index: usize },
    /// End tag seen, or fewer than two bytes left before the limit
    Finished,
}

/// Decodes the tags of one timeline
pub struct TagStreamDecoder<'s> {
    session: &'s mut DecodeSession,
    factory: Arc<dyn TagFactory>,
    timeline: TimelineId,
    root: TimelineId,
    version: u8,
    depth: u32,
    limit: Option<usize>,
}

impl<'s> TagStreamDecoder<'s> {
    pub fn new(
        session: &'s mut DecodeSession,
        factory: Arc<dyn TagFactory>,
        timeline: TimelineId,
        version: u8,
        depth: u32,
    ) -> Self {
        let root = session.arena[timeline].root;
        Self {
            session,
            factory,
            timeline,
            root,
            version,
            depth,
            limit: None,
        }
    }

    /// Stop at this offset instead of the end of the stream
    pub fn with_limit(mut self, end: usize) -> Self {
        self.limit = Some(end);
        self
    }

    /// Decode every remaining tag, then finalize the timeline (also when a
    /// tag fails)
    pub fn run(mut self, stream: &mut SwfStream) -> Result<(), SwfError> {
        let result = loop {
            match self.step(stream) {
                Ok(DecodeStep::Tag { .. }) => {}
                Ok(DecodeStep::Finished) => break Ok(()),
                Err(err) => break Err(err),
            }
        };
        self.finish();
        result
    }

    /// Build layers and drop an empty sound stream; idempotent
    pub fn finish(&mut self) {
        reconstruct::finish(&mut self.session.arena[self.timeline]);
    }

    /// Decode one tag
    pub fn step(&mut self, stream: &mut SwfStream) -> Result<DecodeStep, SwfError> {
        let end = self
            .limit
            .map_or(stream.len(), |limit| limit.min(stream.len()));
        let offset = stream.position();
        if self.session.arena[self.timeline].is_ended()
            || end.saturating_sub(offset) < TagHeader::SHORT_SIZE
        {
            return Ok(DecodeStep::Finished);
        }

        let header = TagHeader::read(stream)?;
        let type_id = header.type_id;
        let body_start = stream.position();
        let expected_end = body_start + header.length as usize;
        let index = self.session.arena[self.timeline].tags.len();

        if tag_name(type_id).is_none() {
            self.session.warn(DecodeWarning::UnknownTag {
                timeline: self.timeline,
                index,
                type_id,
                offset,
            });
        }

        let mut handler = self.factory.create(type_id);
        let name = handler.name();
        let parsed = if let Some(container) = handler.as_container_mut() {
            container.attach(TimelineLink {
                factory: Arc::clone(&self.factory),
                root: self.root,
                depth: self.depth + 1,
            });
            container.decode_into(stream, header.length, self.version, self.session)
        } else {
            handler.parse(stream, header.length, self.version)
        };

        if let Err(source) = parsed {
            match self.session.config.on_tag_error {
                TagErrorPolicy::Abort => {
                    tracing::error!(
                        timeline = %self.timeline,
                        index,
                        tag = name,
                        type_id,
                        offset,
                        error = %source,
                        "tag failed to parse"
                    );
                    return Err(SwfError::TagParse {
                        name,
                        index,
                        type_id,
                        offset,
                        source: Box::new(source),
                    });
                }
                TagErrorPolicy::Skip => {
                    self.session.warn(DecodeWarning::SkippedTag {
                        timeline: self.timeline,
                        index,
                        name,
                        type_id,
                        offset,
                        error: source.to_string(),
                    });
                    let data = stream.slice(body_start, expected_end).to_vec();
                    handler = Box::new(RawTag::with_data(type_id, data));
                    stream.set_position(expected_end);
                }
            }
        }

        let consumed_to = stream.position();
        if consumed_to != expected_end {
            self.session.warn(DecodeWarning::TagLengthMismatch {
                timeline: self.timeline,
                index,
                name,
                type_id,
                offset,
                delta: consumed_to as i64 - expected_end as i64,
            });
            stream.set_position(expected_end);
        }

        tracing::trace!(
            timeline = %self.timeline,
            index,
            tag = name,
            offset,
            length = header.length,
            "decoded tag"
        );

        let record = TagRecord {
            type_id,
            name,
            offset,
            header_size: header.size(),
            length: header.length,
            payload: stream.slice(body_start, expected_end).to_vec(),
            handler,
        };
        let DecodeSession {
            arena,
            warnings,
            config,
        } = &mut *self.session;
        reconstruct::apply(&mut arena[self.timeline], record, config, warnings);

        Ok(DecodeStep::Tag { index })
    }
}
