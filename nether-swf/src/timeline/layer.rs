//! Per-depth layers derived from the frame display lists

use std::collections::BTreeMap;

use super::Frame;

/// Run of consecutive frames showing the same placed instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerStrip {
    /// Character at the start of the run
    pub character_id: Option<u16>,
    /// Tag that placed the instance
    pub placed_by: usize,
    pub start_frame: u32,
    /// Inclusive
    pub end_frame: u32,
}

impl LayerStrip {
    pub fn frame_count(&self) -> u32 {
        self.end_frame - self.start_frame + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    pub depth: u16,
    pub strips: Vec<LayerStrip>,
}

/// Group every depth's occupancy into strips, ordered by depth
pub(crate) fn build_layers(frames: &[Frame]) -> Vec<Layer> {
    let mut by_depth: BTreeMap<u16, Vec<LayerStrip>> = BTreeMap::new();
    for frame in frames {
        for (&depth, object) in &frame.display_list {
            let strips = by_depth.entry(depth).or_default();
            match strips.last_mut() {
                Some(strip)
                    if strip.placed_by == object.placed_by
                        && strip.end_frame + 1 == frame.number =>
                {
                    strip.end_frame = frame.number;
                }
                _ => strips.push(LayerStrip {
                    character_id: object.character_id,
                    placed_by: object.placed_by,
                    start_frame: frame.number,
                    end_frame: frame.number,
                }),
            }
        }
    }
    by_depth
        .into_iter()
        .map(|(depth, strips)| Layer { depth, strips })
        .collect()
}
