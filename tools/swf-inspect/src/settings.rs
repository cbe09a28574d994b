//! Decode settings from the command line and an optional TOML file

use std::path::Path;

use anyhow::{Context, Result};
use nether_swf::{DecodeConfig, TagErrorPolicy};

/// Load `path` (or the defaults), then apply command-line overrides
pub fn load_config(path: Option<&Path>, skip_bad_tags: bool) -> Result<DecodeConfig> {
    let mut config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("Failed to parse config: {}", path.display()))?
        }
        None => DecodeConfig::default(),
    };

    if skip_bad_tags {
        config.on_tag_error = TagErrorPolicy::Skip;
    }
    Ok(config)
}

fn parse_config(content: &str) -> Result<DecodeConfig> {
    toml::from_str(content).context("Invalid decode settings")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let config = load_config(None, false).unwrap();
        assert_eq!(config, DecodeConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = parse_config("extract_sound_stream = false\n").unwrap();
        assert!(!config.extract_sound_stream);
        assert_eq!(config.on_tag_error, TagErrorPolicy::Abort);
        assert_eq!(
            config.max_nesting_depth,
            DecodeConfig::default().max_nesting_depth
        );
    }

    #[test]
    fn test_policy_from_file() {
        let config = parse_config("on_tag_error = \"skip\"\nmax_nesting_depth = 4\n").unwrap();
        assert_eq!(config.on_tag_error, TagErrorPolicy::Skip);
        assert_eq!(config.max_nesting_depth, 4);
    }

    #[test]
    fn test_skip_flag_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "on_tag_error = \"abort\"").unwrap();

        let config = load_config(Some(file.path()), true).unwrap();
        assert_eq!(config.on_tag_error, TagErrorPolicy::Skip);
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Some(Path::new("/nonexistent/swf.toml")), false).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }

    #[test]
    fn test_unknown_policy_rejected() {
        assert!(parse_config("on_tag_error = \"ignore\"\n").is_err());
    }
}
