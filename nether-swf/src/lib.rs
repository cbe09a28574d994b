//! Nether-SWF: decoder for the SWF vector-animation container
//!
//! This crate reads SWF files (uncompressed, zlib or LZMA bodies), splits the
//! body into tagged records, dispatches each record to a typed handler and
//! reconstructs the timeline: frames, character dictionary, display list,
//! labels, scenes and the streaming sound track. Nested sprite timelines
//! are decoded into the same arena as the root.
//!
//! # Key Features
//!
//! - **Pure Rust**: zlib via `flate2`, LZMA via `lzma-rs`
//! - **Resilient**: tags whose handler misreads their payload are resynced to
//!   the declared length and reported as [`DecodeWarning`]s
//! - **Pluggable**: handlers are created through a [`TagFactory`], so callers
//!   can add or replace tag types
//! - **Incremental**: [`SwfDecoder`] decodes one root-level tag per step
//!
//! # Container Overview
//!
//! ```text
//! "FWS" | "CWS" | "ZWS"   signature (compression)
//! u8                      version
//! u32                     uncompressed file length
//! ---- body (compressed for CWS/ZWS) ----
//! RECT                    stage bounds in twips
//! u16 (8.8 fixed)         frame rate
//! u16                     frame count
//! tag*                    tag stream ending with End
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use nether_swf::{decode_swf, DecodeConfig};
//!
//! let data = std::fs::read("movie.swf").unwrap();
//! let swf = decode_swf(&data, &DecodeConfig::default()).unwrap();
//!
//! println!("Version: {}", swf.header.version);
//! println!("Frames: {}", swf.root().frames.len());
//! for warning in &swf.warnings {
//!     println!("warning: {warning}");
//! }
//! ```

mod config;
mod error;
pub mod header;
pub mod records;
pub mod stream;
mod swf;
pub mod tags;
pub mod timeline;
mod warning;

pub use config::{DecodeConfig, TagErrorPolicy};
pub use error::SwfError;
pub use header::{Compression, Header, encode_container};
pub use records::{ColorTransform, Matrix, Rect, Rgb, Rgba};
pub use stream::SwfStream;
pub use swf::{Swf, SwfDecoder, decode_swf, decode_swf_with};
pub use tags::{DefaultTagFactory, TagFactory, TagHandler, TagHeader, TimelineEffect};
pub use timeline::{DecodeStep, Frame, Timeline, TimelineId};
pub use warning::DecodeWarning;

// =============================================================================
// Constants
// =============================================================================

/// Twips per pixel
pub const TWIPS_PER_PIXEL: i32 = 20;
