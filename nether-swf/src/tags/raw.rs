//! Opaque fallback handler

use std::any::Any;

use super::TagHandler;
use crate::error::SwfError;
use crate::stream::SwfStream;

/// Tag kept as its raw payload: unknown type ids, tags nothing here
/// interprets, and tags whose parse failed under the skip policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTag {
    pub type_id: u16,
    pub data: Vec<u8>,
}

impl RawTag {
    pub fn new(type_id: u16) -> Self {
        Self {
            type_id,
            data: Vec::new(),
        }
    }

    pub fn with_data(type_id: u16, data: Vec<u8>) -> Self {
        Self { type_id, data }
    }
}

impl TagHandler for RawTag {
    fn tag_type(&self) -> u16 {
        self.type_id
    }

    fn parse(&mut self, stream: &mut SwfStream, length: u32, _version: u8) -> Result<(), SwfError> {
        self.data = stream.read_bytes(length as usize)?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
