//! Display list tags: PlaceObject (1 to 4) and RemoveObject (1 and 2)
//!
//! PlaceObject2 and later open with flag bytes announcing which optional
//! fields follow:
//!
//! ```text
//! byte 0:  clipActions clipDepth name ratio cxform matrix character move
//! byte 1:  reserved opaqueBackground visible image className
//!          cacheAsBitmap blendMode filterList           (PlaceObject3+)
//! ```
//!
//! Filter lists and clip actions are not interpreted; everything from the
//! first uninterpreted field to the end of the payload is kept in
//! [`PlaceObject::extra`].

use std::any::Any;

use bitflags::bitflags;

use super::{TagHandler, TimelineEffect, payload_end, payload_left, types};
use crate::error::SwfError;
use crate::records::{ColorTransform, Matrix, Rgba};
use crate::stream::SwfStream;

bitflags! {
    /// PlaceObject flag bits; the high byte only exists from PlaceObject3 on
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PlaceFlags: u16 {
        const MOVE = 1 << 0;
        const HAS_CHARACTER = 1 << 1;
        const HAS_MATRIX = 1 << 2;
        const HAS_COLOR_TRANSFORM = 1 << 3;
        const HAS_RATIO = 1 << 4;
        const HAS_NAME = 1 << 5;
        const HAS_CLIP_DEPTH = 1 << 6;
        const HAS_CLIP_ACTIONS = 1 << 7;
        const HAS_FILTER_LIST = 1 << 8;
        const HAS_BLEND_MODE = 1 << 9;
        const HAS_CACHE_AS_BITMAP = 1 << 10;
        const HAS_CLASS_NAME = 1 << 11;
        const HAS_IMAGE = 1 << 12;
        const HAS_VISIBLE = 1 << 13;
        const OPAQUE_BACKGROUND = 1 << 14;
    }
}

/// Places or modifies a character at a depth
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceObject {
    type_id: u16,
    pub flags: PlaceFlags,
    pub depth: u16,
    pub character_id: Option<u16>,
    pub class_name: Option<String>,
    pub matrix: Option<Matrix>,
    pub color_transform: Option<ColorTransform>,
    pub ratio: Option<u16>,
    pub name: Option<String>,
    pub clip_depth: Option<u16>,
    pub blend_mode: Option<u8>,
    pub cache_as_bitmap: Option<u8>,
    pub visible: Option<bool>,
    pub background_color: Option<Rgba>,
    /// Uninterpreted tail: filters, clip actions, PlaceObject4 metadata
    pub extra: Vec<u8>,
}

impl PlaceObject {
    pub fn new(type_id: u16) -> Self {
        Self {
            type_id,
            flags: PlaceFlags::empty(),
            depth: 0,
            character_id: None,
            class_name: None,
            matrix: None,
            color_transform: None,
            ratio: None,
            name: None,
            clip_depth: None,
            blend_mode: None,
            cache_as_bitmap: None,
            visible: None,
            background_color: None,
            extra: Vec::new(),
        }
    }

    /// Modifies the character already at this depth rather than placing a
    /// new one
    pub fn is_move(&self) -> bool {
        self.flags.contains(PlaceFlags::MOVE)
    }

    fn parse_v1(&mut self, stream: &mut SwfStream, end: usize) -> Result<(), SwfError> {
        self.character_id = Some(stream.read_u16()?);
        self.flags = PlaceFlags::HAS_CHARACTER | PlaceFlags::HAS_MATRIX;
        self.depth = stream.read_u16()?;
        self.matrix = Some(Matrix::read(stream)?);
        if payload_left(stream, end) > 0 {
            self.flags |= PlaceFlags::HAS_COLOR_TRANSFORM;
            self.color_transform = Some(ColorTransform::read(stream, false)?);
        }
        Ok(())
    }

    fn parse_v2(&mut self, stream: &mut SwfStream, end: usize) -> Result<(), SwfError> {
        let extended = self.type_id != types::PLACE_OBJECT2;
        let low = u16::from(stream.read_u8()?);
        let high = if extended { u16::from(stream.read_u8()?) } else { 0 };
        self.flags = PlaceFlags::from_bits_truncate(low | (high << 8));
        let flags = self.flags;

        self.depth = stream.read_u16()?;
        if flags.contains(PlaceFlags::HAS_CLASS_NAME)
            || (flags.contains(PlaceFlags::HAS_IMAGE) && flags.contains(PlaceFlags::HAS_CHARACTER))
        {
            self.class_name = Some(stream.read_string()?);
        }
        if flags.contains(PlaceFlags::HAS_CHARACTER) {
            self.character_id = Some(stream.read_u16()?);
        }
        if flags.contains(PlaceFlags::HAS_MATRIX) {
            self.matrix = Some(Matrix::read(stream)?);
        }
        if flags.contains(PlaceFlags::HAS_COLOR_TRANSFORM) {
            self.color_transform = Some(ColorTransform::read(stream, true)?);
        }
        if flags.contains(PlaceFlags::HAS_RATIO) {
            self.ratio = Some(stream.read_u16()?);
        }
        if flags.contains(PlaceFlags::HAS_NAME) {
            self.name = Some(stream.read_string()?);
        }
        if flags.contains(PlaceFlags::HAS_CLIP_DEPTH) {
            self.clip_depth = Some(stream.read_u16()?);
        }

        if extended && !flags.contains(PlaceFlags::HAS_FILTER_LIST) {
            if flags.contains(PlaceFlags::HAS_BLEND_MODE) {
                self.blend_mode = Some(stream.read_u8()?);
            }
            if flags.contains(PlaceFlags::HAS_CACHE_AS_BITMAP) {
                self.cache_as_bitmap = Some(stream.read_u8()?);
            }
            if flags.contains(PlaceFlags::HAS_VISIBLE) {
                self.visible = Some(stream.read_u8()? != 0);
                self.background_color = Some(Rgba::read(stream)?);
            }
        }

        let rest = payload_left(stream, end);
        self.extra = stream.read_bytes(rest)?;
        Ok(())
    }

    /// Serialize the payload (without tag header)
    pub fn write(&self, stream: &mut SwfStream) -> Result<(), SwfError> {
        if self.type_id == types::PLACE_OBJECT {
            stream.write_u16(self.character_id.unwrap_or_default());
            stream.write_u16(self.depth);
            self.matrix.unwrap_or_default().write(stream)?;
            if let Some(cxform) = &self.color_transform {
                cxform.write(stream, false)?;
            }
            return Ok(());
        }

        let extended = self.type_id != types::PLACE_OBJECT2;
        let bits = self.flags.bits();
        stream.write_u8(bits as u8);
        if extended {
            stream.write_u8((bits >> 8) as u8);
        }
        stream.write_u16(self.depth);
        if let Some(class_name) = &self.class_name {
            stream.write_string(class_name);
        }
        if let Some(id) = self.character_id {
            stream.write_u16(id);
        }
        if let Some(matrix) = &self.matrix {
            matrix.write(stream)?;
        }
        if let Some(cxform) = &self.color_transform {
            cxform.write(stream, true)?;
        }
        if let Some(ratio) = self.ratio {
            stream.write_u16(ratio);
        }
        if let Some(name) = &self.name {
            stream.write_string(name);
        }
        if let Some(clip_depth) = self.clip_depth {
            stream.write_u16(clip_depth);
        }
        if let Some(blend_mode) = self.blend_mode {
            stream.write_u8(blend_mode);
        }
        if let Some(cache) = self.cache_as_bitmap {
            stream.write_u8(cache);
        }
        if let Some(visible) = self.visible {
            stream.write_u8(u8::from(visible));
            let background = self.background_color.unwrap_or_default();
            for channel in [background.r, background.g, background.b, background.a] {
                stream.write_u8(channel);
            }
        }
        stream.write_bytes(&self.extra);
        Ok(())
    }
}

impl TagHandler for PlaceObject {
    fn tag_type(&self) -> u16 {
        self.type_id
    }

    fn parse(&mut self, stream: &mut SwfStream, length: u32, _version: u8) -> Result<(), SwfError> {
        let end = payload_end(stream, length);
        if self.type_id == types::PLACE_OBJECT {
            self.parse_v1(stream, end)
        } else {
            self.parse_v2(stream, end)
        }
    }

    fn effect(&self) -> Option<TimelineEffect<'_>> {
        Some(TimelineEffect::Place(self))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Clears a depth
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveObject {
    type_id: u16,
    /// Only present in the original RemoveObject
    pub character_id: Option<u16>,
    pub depth: u16,
}

impl RemoveObject {
    pub fn new(type_id: u16) -> Self {
        Self {
            type_id,
            character_id: None,
            depth: 0,
        }
    }

    pub fn write(&self, stream: &mut SwfStream) {
        if self.type_id == types::REMOVE_OBJECT {
            stream.write_u16(self.character_id.unwrap_or_default());
        }
        stream.write_u16(self.depth);
    }
}

impl TagHandler for RemoveObject {
    fn tag_type(&self) -> u16 {
        self.type_id
    }

    fn parse(&mut self, stream: &mut SwfStream, _length: u32, _version: u8) -> Result<(), SwfError> {
        if self.type_id == types::REMOVE_OBJECT {
            self.character_id = Some(stream.read_u16()?);
        }
        self.depth = stream.read_u16()?;
        Ok(())
    }

    fn effect(&self) -> Option<TimelineEffect<'_>> {
        Some(TimelineEffect::Remove(self))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
