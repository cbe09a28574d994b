//! swf-inspect - SWF container inspection tool
//!
//! Prints headers, tag listings and reconstructed timelines, rewrites
//! containers with a different body compression and extracts the streaming
//! sound track.

mod report;
mod settings;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use nether_swf::header::{PRELUDE_SIZE, Prelude};
use nether_swf::{Compression, DecodeConfig, Swf, SwfStream, decode_swf, encode_container};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "swf-inspect")]
#[command(about = "SWF container inspection tool")]
#[command(version)]
struct Cli {
    /// Decode settings (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Keep going when a tag fails to parse
    #[arg(long, global = true)]
    skip_bad_tags: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the header, counts and decode warnings
    Info {
        /// Input .swf file
        input: PathBuf,
    },

    /// List the tags of every timeline
    Tags {
        /// Input .swf file
        input: PathBuf,

        /// Only list the nested timeline of this sprite
        #[arg(short, long)]
        sprite: Option<u16>,
    },

    /// Show frame ranges, labels, scenes and layers
    Frames {
        /// Input .swf file
        input: PathBuf,

        /// Only show the nested timeline of this sprite
        #[arg(short, long)]
        sprite: Option<u16>,
    },

    /// Rewrite the container with another body compression
    Unpack {
        /// Input .swf file
        input: PathBuf,

        /// Output .swf file (default: <input>.unpacked.swf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Body compression of the output
        #[arg(long, value_enum, default_value_t = Packing::None)]
        to: Packing,
    },

    /// Write the reassembled streaming sound track
    Sound {
        /// Input .swf file
        input: PathBuf,

        /// Output file (default: <input>.mp3)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Take the stream of this sprite instead of the root timeline
        #[arg(short, long)]
        sprite: Option<u16>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Packing {
    /// FWS
    None,
    /// CWS
    Zlib,
    /// ZWS
    Lzma,
}

impl From<Packing> for Compression {
    fn from(packing: Packing) -> Self {
        match packing {
            Packing::None => Compression::None,
            Packing::Zlib => Compression::Zlib,
            Packing::Lzma => Compression::Lzma,
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let config = settings::load_config(cli.config.as_deref(), cli.skip_bad_tags)?;

    match cli.command {
        Commands::Info { input } => {
            let swf = load_swf(&input, &config)?;
            report::print_info(&swf);
        }

        Commands::Tags { input, sprite } => {
            let swf = load_swf(&input, &config)?;
            report::print_tags(&report::select_timelines(&swf, sprite)?);
        }

        Commands::Frames { input, sprite } => {
            let swf = load_swf(&input, &config)?;
            report::print_frames(&report::select_timelines(&swf, sprite)?);
        }

        Commands::Unpack { input, output, to } => {
            let output = output.unwrap_or_else(|| input.with_extension("unpacked.swf"));
            tracing::info!("Rewriting {:?} -> {:?} ({:?})", input, output, to);
            let packed = repack(&read_input(&input)?, &config, to.into())?;
            std::fs::write(&output, &packed)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            tracing::info!("Done! ({} bytes)", packed.len());
        }

        Commands::Sound {
            input,
            output,
            sprite,
        } => {
            let swf = load_swf(&input, &config)?;
            let timeline = match sprite {
                Some(id) => swf
                    .sprite_timeline(id)
                    .with_context(|| format!("No sprite with character id {id}"))?,
                None => swf.root(),
            };
            let Some(sound) = &timeline.sound_stream else {
                anyhow::bail!("{} has no streaming sound", timeline.id);
            };

            let output = output.unwrap_or_else(|| input.with_extension("mp3"));
            tracing::info!(
                "Writing {} samples ({:.2}s) to {:?}",
                sound.sample_count,
                sound.duration_secs(),
                output
            );
            std::fs::write(&output, &sound.data)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            tracing::info!("Done!");
        }
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn load_swf(path: &Path, config: &DecodeConfig) -> Result<Swf> {
    let data = read_input(path)?;
    decode_swf(&data, config).with_context(|| format!("Failed to decode {}", path.display()))
}

/// Inflate the body and encode it again with `compression`
fn repack(data: &[u8], config: &DecodeConfig, compression: Compression) -> Result<Vec<u8>> {
    let mut stream = SwfStream::from_bytes(data);
    let prelude = Prelude::read(&mut stream)?;
    let header = prelude.read_body(&mut stream, config)?;
    let body = stream.slice(PRELUDE_SIZE, stream.len());
    Ok(encode_container(compression, header.version, body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nether_swf::Header;
    use nether_swf::records::Rect;

    fn zlib_container() -> Vec<u8> {
        let mut body = SwfStream::new();
        Header::new(8, Rect::new(0, 2000, 0, 1000), 24.0, 1)
            .write_body(&mut body)
            .unwrap();
        // ShowFrame, End
        body.write_bytes(&[0x40, 0x00, 0x00, 0x00]);
        encode_container(Compression::Zlib, 8, body.as_bytes()).unwrap()
    }

    #[test]
    fn test_repack_to_uncompressed() {
        let packed = zlib_container();
        let unpacked = repack(&packed, &DecodeConfig::default(), Compression::None).unwrap();

        assert_eq!(&unpacked[..3], b"FWS");
        let original = decode_swf(&packed, &DecodeConfig::default()).unwrap();
        let rewritten = decode_swf(&unpacked, &DecodeConfig::default()).unwrap();
        assert_eq!(rewritten.header.compression, Compression::None);
        assert_eq!(rewritten.header.stage, original.header.stage);
        assert_eq!(rewritten.root().frames.len(), original.root().frames.len());
    }

    #[test]
    fn test_repack_rejects_garbage() {
        assert!(repack(b"GIF89a", &DecodeConfig::default(), Compression::None).is_err());
    }

    #[test]
    fn test_cli_parses_global_options() {
        let cli = Cli::parse_from([
            "swf-inspect",
            "tags",
            "movie.swf",
            "--sprite",
            "3",
            "--skip-bad-tags",
        ]);
        assert!(cli.skip_bad_tags);
        assert!(matches!(
            cli.command,
            Commands::Tags {
                sprite: Some(3),
                ..
            }
        ));
    }
}
