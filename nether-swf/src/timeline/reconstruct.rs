//! Applies decoded tags to their timeline: dictionary, frames, labels,
//! sound stream and document-level state

use std::mem;

use hashbrown::HashMap;

use super::layer::build_layers;
use super::sound::{BlockOutcome, SoundStream};
use super::{Frame, TagRecord, Timeline};
use crate::config::DecodeConfig;
use crate::tags::{FrameLabel, TimelineEffect};
use crate::warning::{DecodeWarning, emit};

/// Append `record` to `timeline` and fold its effect into the
/// reconstruction state
pub(crate) fn apply(
    timeline: &mut Timeline,
    record: TagRecord,
    config: &DecodeConfig,
    warnings: &mut Vec<DecodeWarning>,
) {
    let index = timeline.tags.len();

    if let Some(character_id) = record.character_id().filter(|&id| id > 0) {
        if let Some(previous) = timeline.dictionary.insert(character_id, index) {
            emit(
                warnings,
                DecodeWarning::DuplicateCharacter {
                    timeline: timeline.id,
                    character_id,
                    previous,
                    index,
                },
            );
        }
        timeline.open_frame.introduced.insert(character_id);
    }

    match record.handler.effect() {
        Some(TimelineEffect::ShowFrame) => close_frame(timeline, index),
        Some(TimelineEffect::Place(place)) => timeline.open_frame.place(index, place),
        Some(TimelineEffect::Remove(remove)) => timeline.open_frame.remove(index, remove),
        Some(TimelineEffect::FrameLabel(name)) => {
            timeline.open_frame.label = Some(name.to_string());
            if !timeline.has_scene_data {
                timeline.frame_labels.push(FrameLabel {
                    frame: timeline.open_frame.number,
                    name: name.to_string(),
                });
            }
        }
        Some(TimelineEffect::SceneData { scenes, labels }) => {
            timeline.has_scene_data = true;
            timeline.scenes = scenes.to_vec();
            timeline.frame_labels = labels.to_vec();
            timeline.labels_by_frame = labels
                .iter()
                .map(|label| (label.frame, label.name.clone()))
                .collect();
            // Frames closed before the data arrived that are still unlabeled
            for frame in &mut timeline.frames {
                fill_pending_label(frame, &timeline.labels_by_frame);
            }
        }
        Some(TimelineEffect::SoundStreamHead(head)) if config.extract_sound_stream => {
            let stream = SoundStream::from_head(index, head);
            if !stream.is_supported() {
                emit(
                    warnings,
                    DecodeWarning::UnsupportedSoundCodec {
                        timeline: timeline.id,
                        index,
                        compression: stream.format.compression,
                    },
                );
            }
            timeline.sound_stream = Some(stream);
        }
        Some(TimelineEffect::SoundStreamBlock(block)) if config.extract_sound_stream => {
            match timeline.sound_stream.as_mut() {
                Some(stream) => {
                    if stream.append_block(block) == BlockOutcome::Truncated {
                        tracing::debug!(
                            timeline = %timeline.id,
                            index,
                            len = block.len(),
                            "sound block shorter than its header, dropped"
                        );
                    }
                }
                None => emit(
                    warnings,
                    DecodeWarning::OrphanSoundBlock {
                        timeline: timeline.id,
                        index,
                    },
                ),
            }
        }
        Some(TimelineEffect::BackgroundColor(color)) => timeline.background_color = Some(color),
        Some(TimelineEffect::JpegTables) => timeline.jpeg_tables = Some(index),
        Some(TimelineEffect::End) => timeline.ended = true,
        _ => {}
    }

    timeline.tags.push(record);
}

fn close_frame(timeline: &mut Timeline, index: usize) {
    let next = timeline.open_frame.successor(index + 1);
    let mut frame = mem::replace(&mut timeline.open_frame, next);
    frame.tag_end = index + 1;
    fill_pending_label(&mut frame, &timeline.labels_by_frame);
    timeline.frames.push(frame);
}

/// A label set by a FrameLabel tag is kept; the scene data only fills gaps
fn fill_pending_label(frame: &mut Frame, labels_by_frame: &HashMap<u32, String>) {
    if frame.label.is_none() {
        frame.label = labels_by_frame.get(&frame.number).cloned();
    }
}

/// Post-pass once the timeline's tag stream is exhausted. Tags after the
/// last ShowFrame do not form a frame.
pub(crate) fn finish(timeline: &mut Timeline) {
    if timeline.finished {
        return;
    }
    timeline.finished = true;

    if timeline
        .sound_stream
        .as_ref()
        .is_some_and(|stream| stream.data.is_empty())
    {
        timeline.sound_stream = None;
    }
    timeline.layers = build_layers(&timeline.frames);

    tracing::debug!(
        timeline = %timeline.id,
        tags = timeline.tags.len(),
        frames = timeline.frames.len(),
        characters = timeline.dictionary.len(),
        layers = timeline.layers.len(),
        "timeline reconstructed"
    );
}
