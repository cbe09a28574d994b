//! Bit-aligned reads and writes

use super::SwfStream;
use crate::error::SwfError;

impl SwfStream {
    /// Read `count` bits (0..=32) as an unsigned value, MSB first
    pub fn read_ubits(&mut self, count: u32) -> Result<u32, SwfError> {
        self.check_bit_count(count)?;
        let mut value = 0u32;
        for _ in 0..count {
            if self.read_bits_left == 0 {
                self.read_bits = self.read_raw_u8()?;
                self.read_bits_left = 8;
            }
            self.read_bits_left -= 1;
            value = (value << 1) | u32::from((self.read_bits >> self.read_bits_left) & 1);
        }
        Ok(value)
    }

    /// Read `count` bits (0..=32) as a two's complement value
    pub fn read_sbits(&mut self, count: u32) -> Result<i32, SwfError> {
        let raw = self.read_ubits(count)?;
        if count == 0 {
            return Ok(0);
        }
        let shift = 32 - count;
        Ok(((raw << shift) as i32) >> shift)
    }

    /// Signed 16.16 fixed point stored in `count` bits
    pub fn read_fbits(&mut self, count: u32) -> Result<f64, SwfError> {
        Ok(f64::from(self.read_sbits(count)?) / 65536.0)
    }

    pub fn read_bit(&mut self) -> Result<bool, SwfError> {
        Ok(self.read_ubits(1)? == 1)
    }

    /// Write the low `count` bits of `value`, MSB first
    pub fn write_ubits(&mut self, count: u32, value: u32) -> Result<(), SwfError> {
        self.check_bit_count(count)?;
        for shift in (0..count).rev() {
            let bit = ((value >> shift) & 1) as u8;
            self.write_bits |= bit << (7 - self.write_bits_used);
            self.write_bits_used += 1;
            if self.write_bits_used == 8 {
                let byte = self.write_bits;
                self.write_bits = 0;
                self.write_bits_used = 0;
                self.put_raw(&[byte]);
            }
        }
        Ok(())
    }

    pub fn write_sbits(&mut self, count: u32, value: i32) -> Result<(), SwfError> {
        self.write_ubits(count, value as u32)
    }

    pub fn write_fbits(&mut self, count: u32, value: f64) -> Result<(), SwfError> {
        self.write_sbits(count, (value * 65536.0).round() as i32)
    }

    pub fn write_bit(&mut self, value: bool) -> Result<(), SwfError> {
        self.write_ubits(1, u32::from(value))
    }

    fn check_bit_count(&self, count: u32) -> Result<(), SwfError> {
        if count > 32 {
            return Err(SwfError::InvalidBitCount {
                count,
                offset: self.position,
            });
        }
        Ok(())
    }
}

/// Bits needed to store `value` unsigned
pub fn ubits_needed(value: u32) -> u32 {
    32 - value.leading_zeros()
}

/// Bits needed to store `value` as two's complement (always at least 1)
pub fn sbits_needed(value: i32) -> u32 {
    if value >= 0 {
        ubits_needed(value as u32) + 1
    } else {
        ubits_needed(!value as u32) + 1
    }
}
