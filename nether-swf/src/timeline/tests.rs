//! Tests for the tag loop and timeline reconstruction

use std::sync::Arc;

use super::*;
use crate::config::DecodeConfig;
use crate::records::Rgb;
use crate::stream::SwfStream;
use crate::tags::{
    DefaultTagFactory, FrameLabel, FrameLabelTag, PlaceFlags, PlaceObject, RemoveObject,
    SceneAndFrameLabelData, SoundCompression, SoundFormat, SoundStreamHead, types, write_tag,
};
use crate::warning::DecodeWarning;

// =============================================================================
// Fixtures
// =============================================================================

fn decode_with(tags: SwfStream, config: DecodeConfig) -> (TimelineArena, Vec<DecodeWarning>) {
    let mut stream = SwfStream::from_bytes(tags.into_bytes());
    let mut session = DecodeSession::new(config);
    TagStreamDecoder::new(
        &mut session,
        Arc::new(DefaultTagFactory::new()),
        TimelineId::ROOT,
        10,
        0,
    )
    .run(&mut stream)
    .unwrap();
    session.into_parts()
}

fn decode(tags: SwfStream) -> (TimelineArena, Vec<DecodeWarning>) {
    decode_with(tags, DecodeConfig::default())
}

fn define(stream: &mut SwfStream, id: u16) {
    let mut payload = id.to_le_bytes().to_vec();
    payload.extend_from_slice(&[0xAA, 0xBB]);
    write_tag(stream, types::DEFINE_SHAPE, &payload);
}

fn place(stream: &mut SwfStream, depth: u16, character_id: u16) {
    let mut tag = PlaceObject::new(types::PLACE_OBJECT2);
    tag.flags = PlaceFlags::HAS_CHARACTER;
    tag.depth = depth;
    tag.character_id = Some(character_id);
    let mut payload = SwfStream::new();
    tag.write(&mut payload).unwrap();
    write_tag(stream, types::PLACE_OBJECT2, payload.as_bytes());
}

fn move_to(stream: &mut SwfStream, depth: u16, x: i32) {
    let mut tag = PlaceObject::new(types::PLACE_OBJECT2);
    tag.flags = PlaceFlags::MOVE | PlaceFlags::HAS_MATRIX;
    tag.depth = depth;
    tag.matrix = Some(crate::records::Matrix::translate(x, 0));
    let mut payload = SwfStream::new();
    tag.write(&mut payload).unwrap();
    write_tag(stream, types::PLACE_OBJECT2, payload.as_bytes());
}

fn remove(stream: &mut SwfStream, depth: u16) {
    let mut tag = RemoveObject::new(types::REMOVE_OBJECT2);
    tag.depth = depth;
    let mut payload = SwfStream::new();
    tag.write(&mut payload);
    write_tag(stream, types::REMOVE_OBJECT2, payload.as_bytes());
}

fn show_frame(stream: &mut SwfStream) {
    write_tag(stream, types::SHOW_FRAME, &[]);
}

fn end(stream: &mut SwfStream) {
    write_tag(stream, types::END, &[]);
}

fn sound_head(stream: &mut SwfStream, compression: SoundCompression) {
    let mut head = SoundStreamHead::new(types::SOUND_STREAM_HEAD2);
    head.stream = SoundFormat {
        compression,
        rate: 2,
        is_16_bit: true,
        is_stereo: false,
    };
    head.samples_per_block = 576;
    if compression == SoundCompression::Mp3 {
        head.latency_seek = Some(0);
    }
    let mut payload = SwfStream::new();
    head.write(&mut payload).unwrap();
    write_tag(stream, types::SOUND_STREAM_HEAD2, payload.as_bytes());
}

fn sound_block(stream: &mut SwfStream, samples: u16, data: &[u8]) {
    let mut payload = samples.to_le_bytes().to_vec();
    payload.extend_from_slice(&0i16.to_le_bytes());
    payload.extend_from_slice(data);
    write_tag(stream, types::SOUND_STREAM_BLOCK, &payload);
}

// =============================================================================
// Frames
// =============================================================================

#[test]
fn test_frames_and_dictionary() {
    let mut tags = SwfStream::new();
    define(&mut tags, 1);
    place(&mut tags, 1, 1);
    show_frame(&mut tags);
    show_frame(&mut tags);
    end(&mut tags);

    let (arena, warnings) = decode(tags);
    let root = arena.root();
    assert!(warnings.is_empty());
    assert_eq!(root.tags.len(), 5);
    assert_eq!(root.frames.len(), 2);
    assert!(root.is_ended());

    let first = &root.frames[0];
    assert_eq!(first.tag_range(), 0..3);
    assert_eq!(first.introduced.iter().copied().collect::<Vec<_>>(), vec![1]);
    assert_eq!(first.placements.len(), 1);

    let second = &root.frames[1];
    assert_eq!(second.number, 1);
    assert_eq!(second.tag_range(), 3..4);
    assert!(second.introduced.is_empty());
    assert!(second.placements.is_empty());
    // Display list carries forward
    assert_eq!(second.display_list[&1].character_id, Some(1));

    assert_eq!(root.dictionary.get(&1), Some(&0));
    assert_eq!(root.definition(1).map(|tag| tag.name), Some("DefineShape"));
}

#[test]
fn test_tags_after_last_frame_are_not_a_frame() {
    let mut tags = SwfStream::new();
    show_frame(&mut tags);
    define(&mut tags, 4);
    end(&mut tags);

    let (arena, _) = decode(tags);
    let root = arena.root();
    assert_eq!(root.frames.len(), 1);
    assert_eq!(root.tags.len(), 3);
    assert!(root.open_frame().introduced.contains(&4));
}

#[test]
fn test_stream_without_end_stops_at_data_end() {
    let mut tags = SwfStream::new();
    show_frame(&mut tags);
    tags.write_u8(0x00);

    let (arena, _) = decode(tags);
    assert_eq!(arena.root().tags.len(), 1);
    assert!(!arena.root().is_ended());
}

#[test]
fn test_duplicate_character_last_wins() {
    let mut tags = SwfStream::new();
    define(&mut tags, 7);
    define(&mut tags, 7);
    end(&mut tags);

    let (arena, warnings) = decode(tags);
    assert_eq!(arena.root().dictionary.get(&7), Some(&1));
    assert_eq!(
        warnings,
        vec![DecodeWarning::DuplicateCharacter {
            timeline: TimelineId::ROOT,
            character_id: 7,
            previous: 0,
            index: 1,
        }]
    );
}

#[test]
fn test_character_zero_is_not_registered() {
    let mut tags = SwfStream::new();
    define(&mut tags, 0);
    end(&mut tags);

    let (arena, _) = decode(tags);
    assert!(arena.root().dictionary.is_empty());
}

// =============================================================================
// Labels
// =============================================================================

fn frame_label(stream: &mut SwfStream, name: &str) {
    let mut payload = SwfStream::new();
    FrameLabelTag {
        name: name.to_string(),
        anchor: false,
    }
    .write(&mut payload);
    write_tag(stream, types::FRAME_LABEL, payload.as_bytes());
}

fn scene_data(stream: &mut SwfStream, labels: &[(u32, &str)]) -> SceneAndFrameLabelData {
    let data = SceneAndFrameLabelData {
        scenes: vec![crate::tags::Scene {
            offset: 0,
            name: "Scene 1".to_string(),
        }],
        labels: labels
            .iter()
            .map(|&(frame, name)| FrameLabel {
                frame,
                name: name.to_string(),
            })
            .collect(),
    };
    let mut payload = SwfStream::new();
    data.write(&mut payload);
    write_tag(stream, types::DEFINE_SCENE_AND_FRAME_LABEL_DATA, payload.as_bytes());
    data
}

#[test]
fn test_frame_label_tags_fill_label_list() {
    let mut tags = SwfStream::new();
    frame_label(&mut tags, "intro");
    show_frame(&mut tags);
    show_frame(&mut tags);
    frame_label(&mut tags, "loop");
    show_frame(&mut tags);
    end(&mut tags);

    let (arena, _) = decode(tags);
    let root = arena.root();
    assert!(root.scenes.is_empty());
    assert_eq!(
        root.frame_labels,
        vec![
            FrameLabel {
                frame: 0,
                name: "intro".to_string(),
            },
            FrameLabel {
                frame: 2,
                name: "loop".to_string(),
            },
        ]
    );
    assert_eq!(root.frames[1].label, None);
    assert_eq!(root.frame_by_label("loop").map(|f| f.number), Some(2));
    assert_eq!(root.label_for_frame(0), None);
}

#[test]
fn test_frame_label_tag_wins_over_scene_label() {
    let mut tags = SwfStream::new();
    let data = scene_data(&mut tags, &[(0, "from-scene")]);
    frame_label(&mut tags, "from-tag");
    show_frame(&mut tags);
    frame_label(&mut tags, "second");
    show_frame(&mut tags);
    end(&mut tags);

    let (arena, _) = decode(tags);
    let root = arena.root();
    assert_eq!(root.scenes.len(), 1);
    assert_eq!(root.frame_labels, data.labels);
    assert_eq!(root.frames[0].label.as_deref(), Some("from-tag"));
    assert_eq!(root.frames[1].label.as_deref(), Some("second"));
    assert_eq!(root.label_for_frame(0), Some("from-scene"));
    assert_eq!(root.frame_by_label("second").map(|f| f.number), Some(1));
}

#[test]
fn test_late_scene_data_only_labels_unlabeled_frames() {
    let mut tags = SwfStream::new();
    show_frame(&mut tags);
    frame_label(&mut tags, "tagged");
    show_frame(&mut tags);
    let data = scene_data(&mut tags, &[(0, "first"), (1, "ignored"), (2, "third")]);
    show_frame(&mut tags);
    end(&mut tags);

    let (arena, _) = decode(tags);
    let root = arena.root();
    assert_eq!(root.frame_labels, data.labels);
    let labels: Vec<_> = root.frames.iter().map(|f| f.label.as_deref()).collect();
    assert_eq!(labels, vec![Some("first"), Some("tagged"), Some("third")]);
}

// =============================================================================
// Display list
// =============================================================================

#[test]
fn test_display_list_and_layers() {
    let mut tags = SwfStream::new();
    define(&mut tags, 1);
    define(&mut tags, 2);
    place(&mut tags, 1, 1);
    place(&mut tags, 2, 2);
    show_frame(&mut tags);
    move_to(&mut tags, 1, 100);
    show_frame(&mut tags);
    remove(&mut tags, 2);
    show_frame(&mut tags);
    place(&mut tags, 2, 1);
    show_frame(&mut tags);
    end(&mut tags);

    let (arena, _) = decode(tags);
    let root = arena.root();
    assert_eq!(root.frames.len(), 4);

    let moved = &root.frames[1].display_list[&1];
    assert_eq!(moved.character_id, Some(1));
    assert_eq!(moved.placed_by, 2);
    assert_eq!(moved.modified_by, 5);
    assert_eq!(moved.matrix.map(|m| m.translate_x), Some(100));

    assert!(!root.frames[2].display_list.contains_key(&2));
    assert_eq!(root.frames[2].removals.len(), 1);

    assert_eq!(root.layers.len(), 2);
    let depth1 = &root.layers[0];
    assert_eq!(depth1.depth, 1);
    assert_eq!(depth1.strips.len(), 1);
    assert_eq!(depth1.strips[0].frame_count(), 4);

    let depth2 = &root.layers[1];
    assert_eq!(depth2.strips.len(), 2);
    assert_eq!((depth2.strips[0].start_frame, depth2.strips[0].end_frame), (0, 1));
    assert_eq!(depth2.strips[1].character_id, Some(1));
    assert_eq!(depth2.strips[1].start_frame, 3);
}

#[test]
fn test_move_on_empty_depth_is_ignored() {
    let mut tags = SwfStream::new();
    move_to(&mut tags, 9, 10);
    show_frame(&mut tags);
    end(&mut tags);

    let (arena, _) = decode(tags);
    let frame = &arena.root().frames[0];
    assert_eq!(frame.placements.len(), 1);
    assert!(frame.display_list.is_empty());
}

// =============================================================================
// Document state
// =============================================================================

#[test]
fn test_background_and_jpeg_tables() {
    let mut tags = SwfStream::new();
    write_tag(&mut tags, types::SET_BACKGROUND_COLOR, &[0x10, 0x20, 0x30]);
    write_tag(&mut tags, types::JPEG_TABLES, &[0xFF, 0xD8, 0xFF, 0xD9]);
    write_tag(&mut tags, types::SET_BACKGROUND_COLOR, &[0xFF, 0xFF, 0xFF]);
    end(&mut tags);

    let (arena, _) = decode(tags);
    let root = arena.root();
    assert_eq!(root.background_color, Some(Rgb::new(0xFF, 0xFF, 0xFF)));
    assert_eq!(root.jpeg_tables, Some(1));
}

// =============================================================================
// Sound stream
// =============================================================================

#[test]
fn test_mp3_stream_accumulates() {
    let mut tags = SwfStream::new();
    sound_head(&mut tags, SoundCompression::Mp3);
    sound_block(&mut tags, 576, &[1, 2, 3]);
    show_frame(&mut tags);
    sound_block(&mut tags, 0, &[]);
    show_frame(&mut tags);
    sound_block(&mut tags, 1152, &[4, 5]);
    show_frame(&mut tags);
    end(&mut tags);

    let (arena, warnings) = decode(tags);
    assert!(warnings.is_empty());
    let sound = arena.root().sound_stream.as_ref().unwrap();
    assert_eq!(sound.head_tag, 0);
    assert_eq!(sound.data, vec![1, 2, 3, 4, 5]);
    assert_eq!(sound.sample_count, 1728);
    assert_eq!(sound.frame_count, 3);
    assert_eq!(sound.format.sample_rate(), 22050);
}

#[test]
fn test_unsupported_codec_stream_is_discarded() {
    let mut tags = SwfStream::new();
    sound_head(&mut tags, SoundCompression::Adpcm);
    write_tag(&mut tags, types::SOUND_STREAM_BLOCK, &[1, 2, 3, 4, 5, 6]);
    show_frame(&mut tags);
    end(&mut tags);

    let (arena, warnings) = decode(tags);
    assert!(arena.root().sound_stream.is_none());
    assert!(matches!(
        warnings[..],
        [DecodeWarning::UnsupportedSoundCodec {
            compression: SoundCompression::Adpcm,
            ..
        }]
    ));
}

#[test]
fn test_head_without_samples_is_discarded() {
    let mut tags = SwfStream::new();
    sound_head(&mut tags, SoundCompression::Mp3);
    sound_block(&mut tags, 0, &[]);
    show_frame(&mut tags);
    end(&mut tags);

    let (arena, _) = decode(tags);
    assert!(arena.root().sound_stream.is_none());
}

#[test]
fn test_sound_extraction_disabled() {
    let mut tags = SwfStream::new();
    sound_head(&mut tags, SoundCompression::Mp3);
    sound_block(&mut tags, 576, &[1, 2, 3]);
    end(&mut tags);

    let config = DecodeConfig {
        extract_sound_stream: false,
        ..DecodeConfig::default()
    };
    let (arena, warnings) = decode_with(tags, config);
    assert!(arena.root().sound_stream.is_none());
    assert!(warnings.is_empty());
    assert_eq!(arena.root().tags.len(), 3);
}

#[test]
fn test_orphan_sound_block() {
    let mut tags = SwfStream::new();
    sound_block(&mut tags, 576, &[1]);
    end(&mut tags);

    let (arena, warnings) = decode(tags);
    assert!(arena.root().sound_stream.is_none());
    assert_eq!(
        warnings,
        vec![DecodeWarning::OrphanSoundBlock {
            timeline: TimelineId::ROOT,
            index: 0,
        }]
    );
}

// =============================================================================
// Limits
// =============================================================================

#[test]
fn test_limit_bounds_the_loop() {
    let mut tags = SwfStream::new();
    show_frame(&mut tags);
    show_frame(&mut tags);
    show_frame(&mut tags);

    let mut stream = SwfStream::from_bytes(tags.into_bytes());
    let mut session = DecodeSession::new(DecodeConfig::default());
    let mut decoder = TagStreamDecoder::new(
        &mut session,
        Arc::new(DefaultTagFactory::new()),
        TimelineId::ROOT,
        10,
        0,
    )
    .with_limit(4);
    assert_eq!(decoder.step(&mut stream).unwrap(), DecodeStep::Tag { index: 0 });
    assert_eq!(decoder.step(&mut stream).unwrap(), DecodeStep::Tag { index: 1 });
    assert_eq!(decoder.step(&mut stream).unwrap(), DecodeStep::Finished);
    assert_eq!(stream.position(), 4);
}

#[test]
fn test_nesting_limit() {
    let mut session = DecodeSession::new(DecodeConfig {
        max_nesting_depth: 1,
        ..DecodeConfig::default()
    });
    assert!(session.open_timeline(TimelineId::ROOT, 1, 5, 0).is_ok());
    assert!(matches!(
        session.open_timeline(TimelineId::ROOT, 2, 6, 40),
        Err(crate::error::SwfError::NestingTooDeep { max: 1, offset: 40 })
    ));
}
