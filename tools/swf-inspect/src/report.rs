//! Listings for the `info`, `tags` and `frames` commands

use anyhow::{Context, Result};
use nether_swf::{Swf, Timeline};

/// Timelines selected by an optional `--sprite` argument
pub fn select_timelines(swf: &Swf, sprite: Option<u16>) -> Result<Vec<&Timeline>> {
    match sprite {
        Some(id) => {
            let timeline = swf
                .sprite_timeline(id)
                .with_context(|| format!("No sprite with character id {id} on the root timeline"))?;
            Ok(vec![timeline])
        }
        None => Ok(swf.timelines.iter().collect()),
    }
}

pub fn print_info(swf: &Swf) {
    let header = &swf.header;
    tracing::info!("Signature: {}", header.compression);
    tracing::info!("Version: {}", header.version);
    tracing::info!("Declared length: {} bytes", header.declared_length);
    tracing::info!(
        "Stage: {}x{} px",
        header.stage.width_px(),
        header.stage.height_px()
    );
    tracing::info!("Frame rate: {} fps", header.frame_rate);
    tracing::info!("Declared frames: {}", header.frame_count);

    let root = swf.root();
    tracing::info!("Root tags: {}", root.tags.len());
    tracing::info!("Root frames: {}", root.frames.len());
    tracing::info!("Characters: {}", root.dictionary.len());
    tracing::info!("Timelines: {}", swf.timelines.len());
    if let Some(color) = root.background_color {
        tracing::info!(
            "Background: #{:02X}{:02X}{:02X}",
            color.r,
            color.g,
            color.b
        );
    }
    if let Some(sound) = &root.sound_stream {
        tracing::info!(
            "Sound stream: {} {} Hz, {} blocks, {} samples ({:.2}s)",
            sound.format.compression,
            sound.format.sample_rate(),
            sound.frame_count,
            sound.sample_count,
            sound.duration_secs()
        );
    }

    if swf.warnings.is_empty() {
        tracing::info!("No warnings");
    } else {
        tracing::info!("Warnings: {}", swf.warnings.len());
        for warning in &swf.warnings {
            tracing::info!("  {}", warning);
        }
    }
}

pub fn print_tags(timelines: &[&Timeline]) {
    for timeline in timelines {
        print_heading(timeline);
        for (index, tag) in timeline.tags.iter().enumerate() {
            let character = tag
                .character_id()
                .map(|id| format!(" id={id}"))
                .unwrap_or_default();
            tracing::info!(
                "  [{:4}] @{:08X} {:<28} type={:<3} len={}{}",
                index,
                tag.offset,
                tag.name,
                tag.type_id,
                tag.length,
                character
            );
        }
    }
}

pub fn print_frames(timelines: &[&Timeline]) {
    for timeline in timelines {
        print_heading(timeline);

        for scene in &timeline.scenes {
            tracing::info!("  scene {:?} at frame {}", scene.name, scene.offset);
        }
        for frame in &timeline.frames {
            let range = frame.tag_range();
            let label = frame
                .label
                .as_deref()
                .map(|label| format!(" label={label:?}"))
                .unwrap_or_default();
            tracing::info!(
                "  frame {:4} tags {}..{} objects={}{}",
                frame.number,
                range.start,
                range.end,
                frame.display_list.len(),
                label
            );
        }
        for layer in &timeline.layers {
            let strips: Vec<String> = layer
                .strips
                .iter()
                .map(|strip| {
                    let character = strip
                        .character_id
                        .map_or_else(|| "?".to_string(), |id| id.to_string());
                    format!("#{character} {}-{}", strip.start_frame, strip.end_frame)
                })
                .collect();
            tracing::info!("  depth {:4}: {}", layer.depth, strips.join(", "));
        }
    }
}

fn print_heading(timeline: &Timeline) {
    match timeline.sprite_id {
        Some(sprite_id) => tracing::info!(
            "{} (sprite {}, depth {}, {} tags)",
            timeline.id,
            sprite_id,
            timeline.depth,
            timeline.tags.len()
        ),
        None => tracing::info!("{} ({} tags)", timeline.id, timeline.tags.len()),
    }
}
