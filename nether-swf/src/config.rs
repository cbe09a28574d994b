//! Decode configuration
//!
//! Threaded explicitly through header parsing, the tag loop and timeline
//! reconstruction. Callers can embed it in their own TOML/JSON settings.

use serde::{Deserialize, Serialize};

/// What to do when a tag handler fails to parse its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TagErrorPolicy {
    /// Log the failure and abort the whole decode
    #[default]
    Abort,
    /// Keep the payload as an opaque raw tag, warn, resync and continue
    Skip,
}

/// Decode settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Reassemble the streaming sound track from SoundStreamHead/Block tags
    pub extract_sound_stream: bool,
    /// Behavior on a failing tag handler
    pub on_tag_error: TagErrorPolicy,
    /// Deepest allowed nesting of sprite timelines (root is depth 0)
    pub max_nesting_depth: u32,
    /// Upper bound on the inflated body size in bytes
    pub max_decompressed_size: u32,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            extract_sound_stream: true,
            on_tag_error: TagErrorPolicy::Abort,
            max_nesting_depth: 16,
            max_decompressed_size: 256 * 1024 * 1024,
        }
    }
}

impl DecodeConfig {
    /// Default settings with the skip-and-continue tag policy
    pub fn resilient() -> Self {
        Self {
            on_tag_error: TagErrorPolicy::Skip,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DecodeConfig::default();
        assert!(config.extract_sound_stream);
        assert_eq!(config.on_tag_error, TagErrorPolicy::Abort);
        assert_eq!(DecodeConfig::resilient().on_tag_error, TagErrorPolicy::Skip);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: DecodeConfig = toml::from_str(
            r#"
            on_tag_error = "skip"
            max_nesting_depth = 4
            "#,
        )
        .unwrap();
        assert_eq!(config.on_tag_error, TagErrorPolicy::Skip);
        assert_eq!(config.max_nesting_depth, 4);
        assert!(config.extract_sound_stream);
    }
}
