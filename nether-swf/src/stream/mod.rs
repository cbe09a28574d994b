//! Growable byte buffer with byte-aligned and bit-aligned access
//!
//! All multi-byte values are little-endian. Bit fields are packed MSB-first
//! within each byte. Every byte-aligned read or write first drops the
//! partially consumed bit group (and flushes a partially written one), so a
//! bit group is never split across an intervening byte access.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::SwfError;

mod bits;

pub use bits::{sbits_needed, ubits_needed};

/// Read/write cursor over an owned byte buffer
#[derive(Debug, Clone, Default)]
pub struct SwfStream {
    data: Vec<u8>,
    position: usize,
    /// Byte currently being consumed bit by bit
    read_bits: u8,
    /// Unconsumed bits left in `read_bits`
    read_bits_left: u8,
    /// Partially filled output byte
    write_bits: u8,
    /// Bits already placed in `write_bits`
    write_bits_used: u8,
}

impl SwfStream {
    /// Create an empty stream for writing
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap existing bytes, cursor at offset 0
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            ..Self::default()
        }
    }

    /// Current byte offset
    pub fn position(&self) -> usize {
        self.position
    }

    /// Move the cursor. Pending bit state is settled first.
    ///
    /// Positions past the end are allowed; reads from there fail with
    /// [`SwfError::UnexpectedEof`].
    pub fn set_position(&mut self, position: usize) {
        self.reset_bits();
        self.position = position;
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left between the cursor and the end of the buffer
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Finish writing and return the buffer
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.reset_bits();
        self.data
    }

    /// Borrow `start..end`, clamped to the buffer
    pub fn slice(&self, start: usize, end: usize) -> &[u8] {
        let end = end.min(self.data.len());
        let start = start.min(end);
        &self.data[start..end]
    }

    /// Replace everything from `at` onward with `tail`, keeping the cursor.
    ///
    /// Used to swap a decompressed body in behind an already consumed
    /// prelude. The old buffer is only dropped once the new one is complete.
    pub fn replace_tail(&mut self, at: usize, tail: Vec<u8>) {
        let keep = at.min(self.data.len());
        let mut data = Vec::with_capacity(keep + tail.len());
        data.extend_from_slice(&self.data[..keep]);
        data.extend(tail);
        self.data = data;
        self.read_bits_left = 0;
    }

    /// Drop a partially read bit group and flush a partially written one
    pub fn reset_bits(&mut self) {
        self.read_bits_left = 0;
        if self.write_bits_used > 0 {
            let byte = self.write_bits;
            self.write_bits = 0;
            self.write_bits_used = 0;
            self.put_raw(&[byte]);
        }
    }

    // =========================================================================
    // Raw access
    // =========================================================================

    fn take(&mut self, count: usize) -> Result<&[u8], SwfError> {
        let start = self.position;
        let available = self.remaining();
        if count > available {
            return Err(SwfError::UnexpectedEof {
                offset: start,
                needed: count,
                available,
            });
        }
        self.position += count;
        Ok(&self.data[start..start + count])
    }

    fn read_raw_u8(&mut self) -> Result<u8, SwfError> {
        Ok(self.take(1)?[0])
    }

    fn put_raw(&mut self, bytes: &[u8]) {
        let end = self.position + bytes.len();
        if end > self.data.len() {
            self.data.resize(end, 0);
        }
        self.data[self.position..end].copy_from_slice(bytes);
        self.position = end;
    }

    fn put(&mut self, bytes: &[u8]) {
        self.reset_bits();
        self.put_raw(bytes);
    }

    // =========================================================================
    // Byte-aligned reads
    // =========================================================================

    pub fn read_u8(&mut self) -> Result<u8, SwfError> {
        self.reset_bits();
        self.read_raw_u8()
    }

    pub fn read_u16(&mut self) -> Result<u16, SwfError> {
        self.reset_bits();
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    pub fn read_u24(&mut self) -> Result<u32, SwfError> {
        self.reset_bits();
        Ok(LittleEndian::read_u24(self.take(3)?))
    }

    pub fn read_u32(&mut self) -> Result<u32, SwfError> {
        self.reset_bits();
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    pub fn read_i8(&mut self) -> Result<i8, SwfError> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_i16(&mut self) -> Result<i16, SwfError> {
        self.reset_bits();
        Ok(LittleEndian::read_i16(self.take(2)?))
    }

    pub fn read_i24(&mut self) -> Result<i32, SwfError> {
        self.reset_bits();
        Ok(LittleEndian::read_i24(self.take(3)?))
    }

    pub fn read_i32(&mut self) -> Result<i32, SwfError> {
        self.reset_bits();
        Ok(LittleEndian::read_i32(self.take(4)?))
    }

    /// IEEE 754 half precision
    pub fn read_f16(&mut self) -> Result<f32, SwfError> {
        Ok(half::f16::from_bits(self.read_u16()?).to_f32())
    }

    pub fn read_f32(&mut self) -> Result<f32, SwfError> {
        self.reset_bits();
        Ok(LittleEndian::read_f32(self.take(4)?))
    }

    pub fn read_f64(&mut self) -> Result<f64, SwfError> {
        self.reset_bits();
        Ok(LittleEndian::read_f64(self.take(8)?))
    }

    /// Signed 16.16 fixed point
    pub fn read_fixed16(&mut self) -> Result<f64, SwfError> {
        Ok(f64::from(self.read_i32()?) / 65536.0)
    }

    /// Signed 8.8 fixed point
    pub fn read_fixed8(&mut self) -> Result<f32, SwfError> {
        Ok(f32::from(self.read_i16()?) / 256.0)
    }

    /// Variable-length u32: 7 bits per byte, least significant group first,
    /// MSB set on every byte but the last, at most 5 bytes.
    pub fn read_encoded_u32(&mut self) -> Result<u32, SwfError> {
        self.reset_bits();
        let mut result = 0u32;
        for group in 0..5 {
            let byte = self.read_raw_u8()?;
            result |= u32::from(byte & 0x7F) << (7 * group);
            if byte & 0x80 == 0 {
                break;
            }
        }
        Ok(result)
    }

    /// NUL-terminated string. Bytes are taken as-is; invalid UTF-8 is
    /// replaced rather than rejected.
    pub fn read_string(&mut self) -> Result<String, SwfError> {
        self.reset_bits();
        let start = self.position;
        let tail = self.data.get(start..).unwrap_or_default();
        let Some(nul) = tail.iter().position(|&b| b == 0) else {
            return Err(SwfError::UnexpectedEof {
                offset: start,
                needed: tail.len() + 1,
                available: tail.len(),
            });
        };
        let text = String::from_utf8_lossy(&tail[..nul]).into_owned();
        self.position = start + nul + 1;
        Ok(text)
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>, SwfError> {
        self.reset_bits();
        Ok(self.take(count)?.to_vec())
    }

    /// Advance without copying; fails if fewer than `count` bytes remain
    pub fn skip(&mut self, count: usize) -> Result<(), SwfError> {
        self.reset_bits();
        self.take(count).map(|_| ())
    }

    // =========================================================================
    // Byte-aligned writes
    // =========================================================================

    pub fn write_u8(&mut self, value: u8) {
        self.put(&[value]);
    }

    pub fn write_u16(&mut self, value: u16) {
        let mut buf = [0u8; 2];
        LittleEndian::write_u16(&mut buf, value);
        self.put(&buf);
    }

    /// Writes the low 24 bits of `value`
    pub fn write_u24(&mut self, value: u32) {
        let mut buf = [0u8; 3];
        LittleEndian::write_u24(&mut buf, value & 0x00FF_FFFF);
        self.put(&buf);
    }

    pub fn write_u32(&mut self, value: u32) {
        let mut buf = [0u8; 4];
        LittleEndian::write_u32(&mut buf, value);
        self.put(&buf);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.write_u8(value as u8);
    }

    pub fn write_i16(&mut self, value: i16) {
        self.write_u16(value as u16);
    }

    /// Writes the low 24 bits of `value` (two's complement)
    pub fn write_i24(&mut self, value: i32) {
        self.write_u24(value as u32);
    }

    pub fn write_i32(&mut self, value: i32) {
        self.write_u32(value as u32);
    }

    pub fn write_f16(&mut self, value: f32) {
        self.write_u16(half::f16::from_f32(value).to_bits());
    }

    pub fn write_f32(&mut self, value: f32) {
        let mut buf = [0u8; 4];
        LittleEndian::write_f32(&mut buf, value);
        self.put(&buf);
    }

    pub fn write_f64(&mut self, value: f64) {
        let mut buf = [0u8; 8];
        LittleEndian::write_f64(&mut buf, value);
        self.put(&buf);
    }

    pub fn write_fixed16(&mut self, value: f64) {
        self.write_i32((value * 65536.0).round() as i32);
    }

    pub fn write_fixed8(&mut self, value: f32) {
        self.write_i16((value * 256.0).round() as i16);
    }

    /// Minimal-length encoding matching [`Self::read_encoded_u32`]
    pub fn write_encoded_u32(&mut self, value: u32) {
        self.reset_bits();
        let mut rest = value;
        loop {
            let mut byte = (rest & 0x7F) as u8;
            rest >>= 7;
            if rest != 0 {
                byte |= 0x80;
            }
            self.put_raw(&[byte]);
            if rest == 0 {
                break;
            }
        }
    }

    /// Writes the string bytes followed by a NUL terminator
    pub fn write_string(&mut self, value: &str) {
        self.put(value.as_bytes());
        self.put_raw(&[0]);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.put(bytes);
    }
}

impl From<Vec<u8>> for SwfStream {
    fn from(data: Vec<u8>) -> Self {
        Self::from_bytes(data)
    }
}
