//! Timeline control tags with trivial payloads

use std::any::Any;

use super::{TagHandler, TimelineEffect, types};
use crate::error::SwfError;
use crate::records::Rgb;
use crate::stream::SwfStream;

#[derive(Debug, Clone, Copy, Default)]
pub struct End;

impl TagHandler for End {
    fn tag_type(&self) -> u16 {
        types::END
    }

    fn parse(&mut self, _stream: &mut SwfStream, _length: u32, _version: u8) -> Result<(), SwfError> {
        Ok(())
    }

    fn effect(&self) -> Option<TimelineEffect<'_>> {
        Some(TimelineEffect::End)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ShowFrame;

impl TagHandler for ShowFrame {
    fn tag_type(&self) -> u16 {
        types::SHOW_FRAME
    }

    fn parse(&mut self, _stream: &mut SwfStream, _length: u32, _version: u8) -> Result<(), SwfError> {
        Ok(())
    }

    fn effect(&self) -> Option<TimelineEffect<'_>> {
        Some(TimelineEffect::ShowFrame)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SetBackgroundColor {
    pub color: Rgb,
}

impl TagHandler for SetBackgroundColor {
    fn tag_type(&self) -> u16 {
        types::SET_BACKGROUND_COLOR
    }

    fn parse(&mut self, stream: &mut SwfStream, _length: u32, _version: u8) -> Result<(), SwfError> {
        self.color = Rgb::read(stream)?;
        Ok(())
    }

    fn effect(&self) -> Option<TimelineEffect<'_>> {
        Some(TimelineEffect::BackgroundColor(self.color))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Encoding tables shared by every `DefineBits` image
#[derive(Debug, Clone, Default)]
pub struct JpegTables {
    pub data: Vec<u8>,
}

impl TagHandler for JpegTables {
    fn tag_type(&self) -> u16 {
        types::JPEG_TABLES
    }

    fn parse(&mut self, stream: &mut SwfStream, length: u32, _version: u8) -> Result<(), SwfError> {
        self.data = stream.read_bytes(length as usize)?;
        Ok(())
    }

    fn effect(&self) -> Option<TimelineEffect<'_>> {
        Some(TimelineEffect::JpegTables)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
