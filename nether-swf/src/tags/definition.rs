//! Character definitions with opaque bodies

use std::any::Any;

use super::{TagHandler, payload_end, payload_left};
use crate::error::SwfError;
use crate::stream::SwfStream;

/// Any `Define*` tag: the character id is decoded so the definition can be
/// registered in a dictionary, the rest of the payload is kept as is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    type_id: u16,
    pub character_id: u16,
    pub body: Vec<u8>,
}

impl Definition {
    pub fn new(type_id: u16) -> Self {
        Self {
            type_id,
            character_id: 0,
            body: Vec::new(),
        }
    }

    pub fn write(&self, stream: &mut SwfStream) {
        stream.write_u16(self.character_id);
        stream.write_bytes(&self.body);
    }
}

impl TagHandler for Definition {
    fn tag_type(&self) -> u16 {
        self.type_id
    }

    fn character_id(&self) -> Option<i32> {
        Some(i32::from(self.character_id))
    }

    fn parse(&mut self, stream: &mut SwfStream, length: u32, _version: u8) -> Result<(), SwfError> {
        let end = payload_end(stream, length);
        self.character_id = stream.read_u16()?;
        let rest = payload_left(stream, end);
        self.body = stream.read_bytes(rest)?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
