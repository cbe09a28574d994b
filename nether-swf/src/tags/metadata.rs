//! Frame labels and scene data

use std::any::Any;

use serde::{Deserialize, Serialize};

use super::{TagHandler, TimelineEffect, payload_end, payload_left, types};
use crate::error::SwfError;
use crate::stream::SwfStream;

/// Named range of the root timeline starting at `offset`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub offset: u32,
    pub name: String,
}

/// Label attached to a zero-based frame number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameLabel {
    pub frame: u32,
    pub name: String,
}

/// Standalone label for the frame currently being built
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameLabelTag {
    pub name: String,
    /// Named anchor flag (SWF 6+)
    pub anchor: bool,
}

impl FrameLabelTag {
    pub fn write(&self, stream: &mut SwfStream) {
        stream.write_string(&self.name);
        if self.anchor {
            stream.write_u8(1);
        }
    }
}

impl TagHandler for FrameLabelTag {
    fn tag_type(&self) -> u16 {
        types::FRAME_LABEL
    }

    fn parse(&mut self, stream: &mut SwfStream, length: u32, _version: u8) -> Result<(), SwfError> {
        let end = payload_end(stream, length);
        self.name = stream.read_string()?;
        if payload_left(stream, end) > 0 {
            self.anchor = stream.read_u8()? != 0;
        }
        Ok(())
    }

    fn effect(&self) -> Option<TimelineEffect<'_>> {
        Some(TimelineEffect::FrameLabel(&self.name))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Scene list plus frame labels for the whole timeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneAndFrameLabelData {
    pub scenes: Vec<Scene>,
    pub labels: Vec<FrameLabel>,
}

impl SceneAndFrameLabelData {
    pub fn write(&self, stream: &mut SwfStream) {
        stream.write_encoded_u32(self.scenes.len() as u32);
        for scene in &self.scenes {
            stream.write_encoded_u32(scene.offset);
            stream.write_string(&scene.name);
        }
        stream.write_encoded_u32(self.labels.len() as u32);
        for label in &self.labels {
            stream.write_encoded_u32(label.frame);
            stream.write_string(&label.name);
        }
    }
}

impl TagHandler for SceneAndFrameLabelData {
    fn tag_type(&self) -> u16 {
        types::DEFINE_SCENE_AND_FRAME_LABEL_DATA
    }

    fn parse(&mut self, stream: &mut SwfStream, length: u32, _version: u8) -> Result<(), SwfError> {
        let end = payload_end(stream, length);

        // Counts come from the file; every entry needs at least two bytes,
        // which bounds the preallocation
        let scene_count = stream.read_encoded_u32()? as usize;
        self.scenes = Vec::with_capacity(scene_count.min(payload_left(stream, end) / 2));
        for _ in 0..scene_count {
            let offset = stream.read_encoded_u32()?;
            let name = stream.read_string()?;
            self.scenes.push(Scene { offset, name });
        }

        let label_count = stream.read_encoded_u32()? as usize;
        self.labels = Vec::with_capacity(label_count.min(payload_left(stream, end) / 2));
        for _ in 0..label_count {
            let frame = stream.read_encoded_u32()?;
            let name = stream.read_string()?;
            self.labels.push(FrameLabel { frame, name });
        }
        Ok(())
    }

    fn effect(&self) -> Option<TimelineEffect<'_>> {
        Some(TimelineEffect::SceneData {
            scenes: &self.scenes,
            labels: &self.labels,
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_data() {
        let data = SceneAndFrameLabelData {
            scenes: vec![
                Scene {
                    offset: 0,
                    name: "Intro".to_string(),
                },
                Scene {
                    offset: 200,
                    name: "Main".to_string(),
                },
            ],
            labels: vec![FrameLabel {
                frame: 3,
                name: "loop".to_string(),
            }],
        };
        let mut stream = SwfStream::new();
        data.write(&mut stream);
        let length = stream.len() as u32;
        stream.set_position(0);

        let mut parsed = SceneAndFrameLabelData::default();
        parsed.parse(&mut stream, length, 9).unwrap();
        assert_eq!(parsed, data);
        assert_eq!(stream.position(), length as usize);
    }

    #[test]
    fn test_frame_label_anchor() {
        let mut stream = SwfStream::from_bytes(b"start\0\x01".to_vec());
        let mut label = FrameLabelTag::default();
        label.parse(&mut stream, 7, 6).unwrap();
        assert_eq!(label.name, "start");
        assert!(label.anchor);

        let mut stream = SwfStream::from_bytes(b"start\0".to_vec());
        let mut label = FrameLabelTag::default();
        label.parse(&mut stream, 6, 5).unwrap();
        assert!(!label.anchor);
    }
}
