//! Per-frame state: tag range, label, dictionary additions, display list
//! operations and the resulting display list

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;

use crate::records::Matrix;
use crate::tags::{PlaceObject, RemoveObject};

/// A place operation recorded in the frame it happened in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOp {
    pub tag_index: usize,
    pub depth: u16,
    pub character_id: Option<u16>,
    pub is_move: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveOp {
    pub tag_index: usize,
    pub depth: u16,
    pub character_id: Option<u16>,
}

/// Character instance occupying a depth
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayObject {
    pub character_id: Option<u16>,
    /// Tag that created this instance
    pub placed_by: usize,
    /// Last tag that created or modified it
    pub modified_by: usize,
    pub matrix: Option<Matrix>,
    pub name: Option<String>,
    pub clip_depth: Option<u16>,
}

impl DisplayObject {
    fn placed(tag_index: usize, place: &PlaceObject) -> Self {
        Self {
            character_id: place.character_id,
            placed_by: tag_index,
            modified_by: tag_index,
            matrix: place.matrix,
            name: place.name.clone(),
            clip_depth: place.clip_depth,
        }
    }

    fn modify(&mut self, tag_index: usize, place: &PlaceObject) {
        self.modified_by = tag_index;
        if place.character_id.is_some() {
            self.character_id = place.character_id;
        }
        if place.matrix.is_some() {
            self.matrix = place.matrix;
        }
        if place.name.is_some() {
            self.name.clone_from(&place.name);
        }
        if place.clip_depth.is_some() {
            self.clip_depth = place.clip_depth;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// Zero-based frame number
    pub number: u32,
    /// First tag index contributing to this frame
    pub tag_start: usize,
    /// One past the closing ShowFrame
    pub tag_end: usize,
    pub label: Option<String>,
    /// Character ids first defined in this frame
    pub introduced: BTreeSet<i32>,
    pub placements: Vec<PlaceOp>,
    pub removals: Vec<RemoveOp>,
    /// Depth to instance, after this frame's operations
    pub display_list: BTreeMap<u16, DisplayObject>,
}

impl Frame {
    pub fn tag_range(&self) -> Range<usize> {
        self.tag_start..self.tag_end
    }

    /// Next frame: display list carried over, everything else fresh
    pub(crate) fn successor(&self, tag_start: usize) -> Self {
        Self {
            number: self.number + 1,
            tag_start,
            tag_end: tag_start,
            display_list: self.display_list.clone(),
            ..Self::default()
        }
    }

    pub(crate) fn place(&mut self, tag_index: usize, place: &PlaceObject) {
        self.placements.push(PlaceOp {
            tag_index,
            depth: place.depth,
            character_id: place.character_id,
            is_move: place.is_move(),
        });

        if place.is_move() {
            if let Some(existing) = self.display_list.get_mut(&place.depth) {
                existing.modify(tag_index, place);
                return;
            }
            // Modifying an empty depth without a character has nothing to act on
            if place.character_id.is_none() {
                return;
            }
        }
        self.display_list
            .insert(place.depth, DisplayObject::placed(tag_index, place));
    }

    pub(crate) fn remove(&mut self, tag_index: usize, remove: &RemoveObject) {
        self.removals.push(RemoveOp {
            tag_index,
            depth: remove.depth,
            character_id: remove.character_id,
        });
        self.display_list.remove(&remove.depth);
    }
}
