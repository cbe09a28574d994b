//! Body inflate/deflate for CWS (zlib) and ZWS (LZMA) containers
//!
//! ZWS layout after the prelude:
//!
//! ```text
//! u32  compressed length (excluding the 5 property bytes, not trusted)
//! [5]  LZMA properties
//! ...  raw LZMA data, no end marker
//! ```
//!
//! `lzma-rs` expects the `.lzma` layout (properties, u64 unpacked size, data),
//! so the body is repacked before decoding.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;

use super::{Compression, PRELUDE_SIZE, Prelude};
use crate::config::DecodeConfig;
use crate::error::SwfError;
use crate::stream::SwfStream;

/// Compressed-length field + property block in front of ZWS data
const LZMA_BODY_HEADER: usize = 4 + LZMA_PROPS_SIZE;
const LZMA_PROPS_SIZE: usize = 5;
/// Properties + u64 size in the `.lzma` layout
const LZMA_ALONE_HEADER: usize = LZMA_PROPS_SIZE + 8;
/// Expansion assumed when reserving the inflated body up front
const INITIAL_EXPANSION: usize = 4;

/// Replace everything after the prelude with the inflated body
pub(super) fn unpack_body(
    prelude: &Prelude,
    stream: &mut SwfStream,
    config: &DecodeConfig,
) -> Result<(), SwfError> {
    let offset = stream.position();
    let expected = prelude.body_length();
    if expected > config.max_decompressed_size as usize {
        return Err(SwfError::DecompressionFailed {
            kind: prelude.compression,
            offset,
            message: format!(
                "declared body of {expected} bytes exceeds limit of {}",
                config.max_decompressed_size
            ),
        });
    }

    let packed = stream.slice(offset, stream.len());
    let body = match prelude.compression {
        Compression::None => return Ok(()),
        Compression::Zlib => inflate_zlib(packed, expected),
        Compression::Lzma => inflate_lzma(packed, expected),
    }
    .map_err(|message| SwfError::DecompressionFailed {
        kind: prelude.compression,
        offset,
        message,
    })?;

    tracing::debug!(
        compression = %prelude.compression,
        packed = packed.len(),
        inflated = body.len(),
        "inflated container body"
    );

    stream.replace_tail(offset, body);
    Ok(())
}

/// Up-front reservation for an inflated body; the declared size alone is
/// not trusted to allocate
pub(super) fn initial_capacity(declared: usize, packed: usize) -> usize {
    declared.min(packed.saturating_mul(INITIAL_EXPANSION))
}

fn inflate_zlib(packed: &[u8], limit: usize) -> Result<Vec<u8>, String> {
    let mut body = Vec::with_capacity(initial_capacity(limit, packed.len()));
    ZlibDecoder::new(packed)
        .take(limit as u64)
        .read_to_end(&mut body)
        .map_err(|e| e.to_string())?;
    Ok(body)
}

fn inflate_lzma(packed: &[u8], unpacked_len: usize) -> Result<Vec<u8>, String> {
    if packed.len() < LZMA_BODY_HEADER {
        return Err(format!(
            "body of {} bytes is too short for the LZMA header",
            packed.len()
        ));
    }
    // The compressed length field is unreliable in the wild; the unpacked
    // size bounds the decode instead.
    let props = &packed[4..LZMA_BODY_HEADER];
    let data = &packed[LZMA_BODY_HEADER..];

    let mut alone = Vec::with_capacity(LZMA_ALONE_HEADER + data.len());
    alone.extend_from_slice(props);
    alone.extend_from_slice(&(unpacked_len as u64).to_le_bytes());
    alone.extend_from_slice(data);

    let mut body = Vec::with_capacity(initial_capacity(unpacked_len, data.len()));
    lzma_rs::lzma_decompress(&mut alone.as_slice(), &mut body).map_err(|e| e.to_string())?;
    Ok(body)
}

/// Build a complete container from an uncompressed body (header fields
/// followed by the tag stream)
pub fn encode_container(
    compression: Compression,
    version: u8,
    body: &[u8],
) -> Result<Vec<u8>, SwfError> {
    let declared_length = u32::try_from(PRELUDE_SIZE + body.len()).map_err(|_| {
        SwfError::CompressionFailed {
            kind: compression,
            message: format!("body of {} bytes does not fit a u32 length", body.len()),
        }
    })?;

    let mut out = SwfStream::new();
    out.write_bytes(&compression.signature());
    out.write_u8(version);
    out.write_u32(declared_length);

    let fail = |e: std::io::Error| SwfError::CompressionFailed {
        kind: compression,
        message: e.to_string(),
    };

    match compression {
        Compression::None => out.write_bytes(body),
        Compression::Zlib => {
            let mut encoder = ZlibEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(body).map_err(fail)?;
            out.write_bytes(&encoder.finish().map_err(fail)?);
        }
        Compression::Lzma => {
            let mut alone = Vec::new();
            lzma_rs::lzma_compress(&mut &body[..], &mut alone).map_err(fail)?;
            if alone.len() < LZMA_ALONE_HEADER {
                return Err(SwfError::CompressionFailed {
                    kind: compression,
                    message: "encoder produced a truncated stream".to_string(),
                });
            }
            let data = &alone[LZMA_ALONE_HEADER..];
            out.write_u32(data.len() as u32);
            out.write_bytes(&alone[..LZMA_PROPS_SIZE]);
            out.write_bytes(data);
        }
    }

    Ok(out.into_bytes())
}
