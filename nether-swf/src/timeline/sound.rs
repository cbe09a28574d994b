//! Streaming sound reassembly
//!
//! MP3 stream blocks carry a small header in front of the frame data:
//!
//! ```text
//! u16  sample count for this block
//! i16  seek samples
//! ...  MP3 frames
//! ```

use byteorder::{ByteOrder, LittleEndian};

use crate::tags::{SoundCompression, SoundFormat, SoundStreamHead};

const MP3_BLOCK_HEADER: usize = 4;

/// Concatenated sound data of one timeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundStream {
    /// Index of the head tag that started this stream
    pub head_tag: usize,
    pub format: SoundFormat,
    pub samples_per_block: u16,
    pub latency_seek: Option<i16>,
    /// Blocks that contributed to the stream
    pub frame_count: u32,
    pub sample_count: u32,
    pub data: Vec<u8>,
}

/// What happened to one block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockOutcome {
    Appended,
    /// Header only, no samples
    Empty,
    Unsupported,
    Truncated,
}

impl SoundStream {
    pub(crate) fn from_head(head_tag: usize, head: &SoundStreamHead) -> Self {
        Self {
            head_tag,
            format: head.stream,
            samples_per_block: head.samples_per_block,
            latency_seek: head.latency_seek,
            frame_count: 0,
            sample_count: 0,
            data: Vec::new(),
        }
    }

    /// Only MP3 streams are reassembled
    pub fn is_supported(&self) -> bool {
        self.format.compression == SoundCompression::Mp3
    }

    pub fn duration_secs(&self) -> f64 {
        f64::from(self.sample_count) / f64::from(self.format.sample_rate())
    }

    pub(crate) fn append_block(&mut self, block: &[u8]) -> BlockOutcome {
        if !self.is_supported() {
            return BlockOutcome::Unsupported;
        }
        if block.len() < MP3_BLOCK_HEADER {
            return BlockOutcome::Truncated;
        }

        self.frame_count = self.frame_count.saturating_add(1);
        let samples = LittleEndian::read_u16(&block[..2]);
        if samples == 0 {
            return BlockOutcome::Empty;
        }
        self.sample_count = self.sample_count.saturating_add(u32::from(samples));
        self.data.extend_from_slice(&block[MP3_BLOCK_HEADER..]);
        BlockOutcome::Appended
    }
}
