//! Tests for container header parsing

use super::*;

fn body(frame_rate: f32, frame_count: u16, tail: &[u8]) -> Vec<u8> {
    let mut stream = SwfStream::new();
    Header::new(6, Rect::new(0, 100, 0, 100), frame_rate, frame_count)
        .write_body(&mut stream)
        .unwrap();
    stream.write_bytes(tail);
    stream.into_bytes()
}

#[test]
fn test_signature_mapping() {
    assert_eq!(Compression::from_signature(*b"FWS"), Some(Compression::None));
    assert_eq!(Compression::from_signature(*b"CWS"), Some(Compression::Zlib));
    assert_eq!(Compression::from_signature(*b"ZWS"), Some(Compression::Lzma));
    assert_eq!(Compression::from_signature(*b"GFX"), None);
    assert_eq!(Compression::Lzma.signature(), *b"ZWS");
}

#[test]
fn test_uncompressed_header() {
    // Minimal rectangle: 5-bit width of 0, no coordinate bits
    let mut data = b"FWS\x06".to_vec();
    data.extend_from_slice(&16u32.to_le_bytes());
    data.extend_from_slice(&[0x00, 0x00, 0x0C, 0x03, 0x00, 0x40, 0x00, 0x00]);

    let mut stream = SwfStream::from_bytes(data);
    let header = Header::read(&mut stream, &DecodeConfig::default()).unwrap();
    assert_eq!(header.compression, Compression::None);
    assert_eq!(header.version, 6);
    assert_eq!(header.declared_length, 16);
    assert_eq!(header.stage, Rect::default());
    assert_eq!(header.frame_rate, 12.0);
    assert_eq!(header.frame_count, 3);
    // Cursor sits on the first tag
    assert_eq!(stream.position(), 13);
    assert_eq!(stream.read_u16().unwrap(), 0x0040);
}

#[test]
fn test_invalid_signature_is_fatal() {
    let mut stream = SwfStream::from_bytes(b"XWS\x0A\x10\x00\x00\x00".to_vec());
    let err = Header::read(&mut stream, &DecodeConfig::default()).unwrap_err();
    assert!(matches!(err, SwfError::InvalidSignature(sig) if &sig == b"XWS"));
    assert_eq!(err.offset(), Some(0));
}

#[test]
fn test_truncated_prelude() {
    let mut stream = SwfStream::from_bytes(b"FW".to_vec());
    assert!(matches!(
        Prelude::read(&mut stream),
        Err(SwfError::UnexpectedEof { .. })
    ));
}

#[test]
fn test_suspicious_length() {
    let mut data = b"CWS\x0A".to_vec();
    data.extend_from_slice(&10u32.to_le_bytes());
    data.extend_from_slice(&[0u8; 100]);
    let mut stream = SwfStream::from_bytes(data);
    assert!(matches!(
        Prelude::read(&mut stream),
        Err(SwfError::SuspiciousLength {
            declared: 10,
            available: 100
        })
    ));
}

#[test]
fn test_zlib_body() {
    let body = body(24.0, 7, &[0x40, 0x00, 0x00, 0x00]);
    let file = encode_container(Compression::Zlib, 10, &body).unwrap();
    assert_eq!(&file[..3], b"CWS");

    let mut stream = SwfStream::from_bytes(file);
    let header = Header::read(&mut stream, &DecodeConfig::default()).unwrap();
    assert_eq!(header.compression, Compression::Zlib);
    assert_eq!(header.version, 10);
    assert_eq!(header.declared_length as usize, PRELUDE_SIZE + body.len());
    assert_eq!(header.stage, Rect::new(0, 100, 0, 100));
    assert_eq!(header.frame_rate, 24.0);
    assert_eq!(header.frame_count, 7);
    // The stream now holds the inflated body behind the prelude
    assert_eq!(stream.len(), PRELUDE_SIZE + body.len());
    assert_eq!(stream.read_u16().unwrap(), 0x0040);
}

#[test]
fn test_lzma_body() {
    let body = body(30.0, 2, &[0x40, 0x00, 0x00, 0x00]);
    let file = encode_container(Compression::Lzma, 13, &body).unwrap();
    assert_eq!(&file[..3], b"ZWS");

    let mut stream = SwfStream::from_bytes(file);
    let header = Header::read(&mut stream, &DecodeConfig::default()).unwrap();
    assert_eq!(header.compression, Compression::Lzma);
    assert_eq!(header.frame_rate, 30.0);
    assert_eq!(header.frame_count, 2);
    assert_eq!(stream.as_bytes()[PRELUDE_SIZE..], body[..]);
}

#[test]
fn test_corrupt_zlib_body() {
    let mut data = b"CWS\x0A".to_vec();
    data.extend_from_slice(&64u32.to_le_bytes());
    data.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF, 0x00, 0x11]);
    let mut stream = SwfStream::from_bytes(data);
    let err = Header::read(&mut stream, &DecodeConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        SwfError::DecompressionFailed {
            kind: Compression::Zlib,
            offset: 8,
            ..
        }
    ));
}

#[test]
fn test_decompression_limit() {
    let body = body(12.0, 1, &[]);
    let file = encode_container(Compression::Zlib, 10, &body).unwrap();
    let config = DecodeConfig {
        max_decompressed_size: 4,
        ..DecodeConfig::default()
    };
    let mut stream = SwfStream::from_bytes(file);
    assert!(matches!(
        Header::read(&mut stream, &config),
        Err(SwfError::DecompressionFailed { .. })
    ));
}

#[test]
fn test_initial_capacity_follows_packed_size() {
    assert_eq!(compression::initial_capacity(256 * 1024 * 1024, 22), 88);
    assert_eq!(compression::initial_capacity(50, 1000), 50);
    assert_eq!(compression::initial_capacity(usize::MAX, usize::MAX), usize::MAX);
}

#[test]
fn test_tiny_body_with_large_declared_length() {
    // Declared far beyond what the zlib data inflates to
    let mut file = encode_container(Compression::Zlib, 10, &body(12.0, 1, &[0, 0])).unwrap();
    file[4..8].copy_from_slice(&(64u32 * 1024 * 1024).to_le_bytes());

    let mut stream = SwfStream::from_bytes(file);
    let header = Header::read(&mut stream, &DecodeConfig::default()).unwrap();
    assert_eq!(header.frame_count, 1);
    assert!(stream.len() < 64);
}
