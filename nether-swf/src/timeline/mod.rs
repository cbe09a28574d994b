//! Timelines: the tag list, dictionary and frames of the root movie and of
//! every nested sprite
//!
//! Timelines live in a [`TimelineArena`] owned by the decoded file. A nested
//! timeline refers to the root by [`TimelineId`] and only uses it for
//! dictionary fall-through; it never owns it.

use std::fmt;
use std::ops::{Index, IndexMut};

use hashbrown::HashMap;

use crate::records::Rgb;
use crate::tags::{FrameLabel, Scene, TagHandler};

mod decoder;
mod frame;
mod layer;
mod reconstruct;
mod sound;
#[cfg(test)]
mod tests;

pub use decoder::{DecodeSession, DecodeStep, TagStreamDecoder};
pub use frame::{DisplayObject, Frame, PlaceOp, RemoveOp};
pub use layer::{Layer, LayerStrip};
pub use sound::SoundStream;

/// Index of a timeline in its arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimelineId(u32);

impl TimelineId {
    pub const ROOT: Self = Self(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

impl fmt::Display for TimelineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "root")
        } else {
            write!(f, "timeline {}", self.0)
        }
    }
}

/// A decoded tag with its position, raw payload and parsed handler
#[derive(Debug)]
pub struct TagRecord {
    pub type_id: u16,
    pub name: &'static str,
    /// Offset of the tag header in the (decompressed) file
    pub offset: usize,
    pub header_size: usize,
    /// Declared payload length
    pub length: u32,
    pub payload: Vec<u8>,
    pub handler: Box<dyn TagHandler>,
}

impl TagRecord {
    /// Downcast the handler to a concrete tag type
    pub fn handler<T: 'static>(&self) -> Option<&T> {
        self.handler.as_any().downcast_ref()
    }

    pub fn character_id(&self) -> Option<i32> {
        self.handler.character_id()
    }
}

/// One tag stream and everything reconstructed from it
#[derive(Debug)]
pub struct Timeline {
    pub id: TimelineId,
    /// Root of the arena; equal to `id` for the root itself
    pub root: TimelineId,
    /// Nesting depth, 0 for the root
    pub depth: u32,
    /// Id of the sprite that owns this timeline
    pub sprite_id: Option<u16>,
    /// Offset of the first tag
    pub start_offset: usize,
    pub tags: Vec<TagRecord>,
    /// Character id to defining tag index
    pub dictionary: HashMap<i32, usize>,
    pub frames: Vec<Frame>,
    pub scenes: Vec<Scene>,
    /// Labels from DefineSceneAndFrameLabelData when present, otherwise one
    /// entry per FrameLabel tag in stream order
    pub frame_labels: Vec<FrameLabel>,
    pub layers: Vec<Layer>,
    pub sound_stream: Option<SoundStream>,
    pub background_color: Option<Rgb>,
    /// Index of the JPEGTables tag
    pub jpeg_tables: Option<usize>,

    open_frame: Frame,
    labels_by_frame: HashMap<u32, String>,
    has_scene_data: bool,
    ended: bool,
    finished: bool,
}

impl Timeline {
    pub(crate) fn new(
        id: TimelineId,
        root: TimelineId,
        depth: u32,
        sprite_id: Option<u16>,
        start_offset: usize,
    ) -> Self {
        Self {
            id,
            root,
            depth,
            sprite_id,
            start_offset,
            tags: Vec::new(),
            dictionary: HashMap::new(),
            frames: Vec::new(),
            scenes: Vec::new(),
            frame_labels: Vec::new(),
            layers: Vec::new(),
            sound_stream: None,
            background_color: None,
            jpeg_tables: None,
            open_frame: Frame::default(),
            labels_by_frame: HashMap::new(),
            has_scene_data: false,
            ended: false,
            finished: false,
        }
    }

    pub fn is_root(&self) -> bool {
        self.id == self.root
    }

    /// An End tag has been decoded
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Frame currently being built (not yet closed by a ShowFrame)
    pub fn open_frame(&self) -> &Frame {
        &self.open_frame
    }

    /// Defining tag in this timeline's own dictionary
    pub fn definition(&self, character_id: i32) -> Option<&TagRecord> {
        let &index = self.dictionary.get(&character_id)?;
        self.tags.get(index)
    }

    /// Label from the scene/label data for a frame number
    pub fn label_for_frame(&self, frame: u32) -> Option<&str> {
        self.labels_by_frame.get(&frame).map(String::as_str)
    }

    /// Frame by label, searching the resolved frame labels
    pub fn frame_by_label(&self, label: &str) -> Option<&Frame> {
        self.frames
            .iter()
            .find(|frame| frame.label.as_deref() == Some(label))
    }
}

/// Owner of every timeline in a file; index 0 is the root
#[derive(Debug)]
pub struct TimelineArena {
    timelines: Vec<Timeline>,
}

impl Default for TimelineArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TimelineArena {
    /// Arena holding an empty root timeline
    pub fn new() -> Self {
        Self {
            timelines: vec![Timeline::new(TimelineId::ROOT, TimelineId::ROOT, 0, None, 0)],
        }
    }

    pub fn root(&self) -> &Timeline {
        &self.timelines[0]
    }

    pub fn get(&self, id: TimelineId) -> Option<&Timeline> {
        self.timelines.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.timelines.len()
    }

    /// Never true; the root always exists
    pub fn is_empty(&self) -> bool {
        self.timelines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Timeline> {
        self.timelines.iter()
    }

    pub(crate) fn push(
        &mut self,
        root: TimelineId,
        depth: u32,
        sprite_id: Option<u16>,
        start_offset: usize,
    ) -> TimelineId {
        let id = TimelineId(self.timelines.len() as u32);
        self.timelines
            .push(Timeline::new(id, root, depth, sprite_id, start_offset));
        id
    }

    /// Resolve a character id as seen from `timeline`: its own dictionary
    /// first, then the root's. Intermediate timelines are not consulted.
    pub fn resolve(&self, timeline: TimelineId, character_id: i32) -> Option<(TimelineId, usize)> {
        let local = self.get(timeline)?;
        if let Some(&index) = local.dictionary.get(&character_id) {
            return Some((timeline, index));
        }
        if local.is_root() {
            return None;
        }
        let root = self.get(local.root)?;
        root.dictionary
            .get(&character_id)
            .map(|&index| (local.root, index))
    }

    /// Defining tag for a character as seen from `timeline`
    pub fn lookup(&self, timeline: TimelineId, character_id: i32) -> Option<&TagRecord> {
        let (owner, index) = self.resolve(timeline, character_id)?;
        self.get(owner)?.tags.get(index)
    }
}

impl Index<TimelineId> for TimelineArena {
    type Output = Timeline;

    fn index(&self, id: TimelineId) -> &Timeline {
        &self.timelines[id.index()]
    }
}

impl IndexMut<TimelineId> for TimelineArena {
    fn index_mut(&mut self, id: TimelineId) -> &mut Timeline {
        &mut self.timelines[id.index()]
    }
}
