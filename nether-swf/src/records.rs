//! Bit-packed geometry and color records shared by the header and tags
//!
//! Coordinates are in twips (1/20 pixel) and kept as raw integers.

use crate::TWIPS_PER_PIXEL;
use crate::error::SwfError;
use crate::stream::{SwfStream, sbits_needed};

/// Axis-aligned rectangle in twips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
}

impl Rect {
    pub fn new(x_min: i32, x_max: i32, y_min: i32, y_max: i32) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Width in pixels
    pub fn width_px(&self) -> f32 {
        (self.x_max - self.x_min) as f32 / TWIPS_PER_PIXEL as f32
    }

    /// Height in pixels
    pub fn height_px(&self) -> f32 {
        (self.y_max - self.y_min) as f32 / TWIPS_PER_PIXEL as f32
    }

    /// 5-bit field width followed by four signed fields
    pub fn read(stream: &mut SwfStream) -> Result<Self, SwfError> {
        let bits = stream.read_ubits(5)?;
        let rect = Self {
            x_min: stream.read_sbits(bits)?,
            x_max: stream.read_sbits(bits)?,
            y_min: stream.read_sbits(bits)?,
            y_max: stream.read_sbits(bits)?,
        };
        stream.reset_bits();
        Ok(rect)
    }

    pub fn write(&self, stream: &mut SwfStream) -> Result<(), SwfError> {
        let bits = [self.x_min, self.x_max, self.y_min, self.y_max]
            .into_iter()
            .map(sbits_needed)
            .max()
            .unwrap_or(1);
        stream.write_ubits(5, bits)?;
        stream.write_sbits(bits, self.x_min)?;
        stream.write_sbits(bits, self.x_max)?;
        stream.write_sbits(bits, self.y_min)?;
        stream.write_sbits(bits, self.y_max)?;
        stream.reset_bits();
        Ok(())
    }
}

/// 2D affine transform: scale/rotate-skew in 16.16, translation in twips
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    pub scale_x: f64,
    pub scale_y: f64,
    pub rotate_skew_0: f64,
    pub rotate_skew_1: f64,
    pub translate_x: i32,
    pub translate_y: i32,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    pub const IDENTITY: Self = Self {
        scale_x: 1.0,
        scale_y: 1.0,
        rotate_skew_0: 0.0,
        rotate_skew_1: 0.0,
        translate_x: 0,
        translate_y: 0,
    };

    pub fn translate(x: i32, y: i32) -> Self {
        Self {
            translate_x: x,
            translate_y: y,
            ..Self::IDENTITY
        }
    }

    pub fn read(stream: &mut SwfStream) -> Result<Self, SwfError> {
        let mut matrix = Self::IDENTITY;
        if stream.read_bit()? {
            let bits = stream.read_ubits(5)?;
            matrix.scale_x = stream.read_fbits(bits)?;
            matrix.scale_y = stream.read_fbits(bits)?;
        }
        if stream.read_bit()? {
            let bits = stream.read_ubits(5)?;
            matrix.rotate_skew_0 = stream.read_fbits(bits)?;
            matrix.rotate_skew_1 = stream.read_fbits(bits)?;
        }
        let bits = stream.read_ubits(5)?;
        matrix.translate_x = stream.read_sbits(bits)?;
        matrix.translate_y = stream.read_sbits(bits)?;
        stream.reset_bits();
        Ok(matrix)
    }

    pub fn write(&self, stream: &mut SwfStream) -> Result<(), SwfError> {
        let fixed = |v: f64| (v * 65536.0).round() as i32;

        let has_scale = self.scale_x != 1.0 || self.scale_y != 1.0;
        stream.write_bit(has_scale)?;
        if has_scale {
            let (x, y) = (fixed(self.scale_x), fixed(self.scale_y));
            let bits = sbits_needed(x).max(sbits_needed(y));
            stream.write_ubits(5, bits)?;
            stream.write_sbits(bits, x)?;
            stream.write_sbits(bits, y)?;
        }

        let has_rotate = self.rotate_skew_0 != 0.0 || self.rotate_skew_1 != 0.0;
        stream.write_bit(has_rotate)?;
        if has_rotate {
            let (r0, r1) = (fixed(self.rotate_skew_0), fixed(self.rotate_skew_1));
            let bits = sbits_needed(r0).max(sbits_needed(r1));
            stream.write_ubits(5, bits)?;
            stream.write_sbits(bits, r0)?;
            stream.write_sbits(bits, r1)?;
        }

        let bits = if self.translate_x == 0 && self.translate_y == 0 {
            0
        } else {
            sbits_needed(self.translate_x).max(sbits_needed(self.translate_y))
        };
        stream.write_ubits(5, bits)?;
        stream.write_sbits(bits, self.translate_x)?;
        stream.write_sbits(bits, self.translate_y)?;
        stream.reset_bits();
        Ok(())
    }
}

/// Per-channel multiply (8.8) and add terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTransform {
    pub mult: [i16; 4],
    pub add: [i16; 4],
}

impl Default for ColorTransform {
    fn default() -> Self {
        Self {
            mult: [256; 4],
            add: [0; 4],
        }
    }
}

impl ColorTransform {
    /// CXFORM, or CXFORMWITHALPHA when `with_alpha` is set
    pub fn read(stream: &mut SwfStream, with_alpha: bool) -> Result<Self, SwfError> {
        let channels = if with_alpha { 4 } else { 3 };
        let has_add = stream.read_bit()?;
        let has_mult = stream.read_bit()?;
        let bits = stream.read_ubits(4)?;
        let mut cx = Self::default();
        if has_mult {
            for value in cx.mult.iter_mut().take(channels) {
                *value = stream.read_sbits(bits)? as i16;
            }
        }
        if has_add {
            for value in cx.add.iter_mut().take(channels) {
                *value = stream.read_sbits(bits)? as i16;
            }
        }
        stream.reset_bits();
        Ok(cx)
    }

    pub fn write(&self, stream: &mut SwfStream, with_alpha: bool) -> Result<(), SwfError> {
        let channels = if with_alpha { 4 } else { 3 };
        let identity = Self::default();
        let has_mult = self.mult[..channels] != identity.mult[..channels];
        let has_add = self.add[..channels] != identity.add[..channels];
        let bits = self.mult[..channels]
            .iter()
            .chain(&self.add[..channels])
            .map(|&v| sbits_needed(i32::from(v)))
            .max()
            .unwrap_or(1);
        stream.write_bit(has_add)?;
        stream.write_bit(has_mult)?;
        stream.write_ubits(4, bits.min(15))?;
        if has_mult {
            for &value in &self.mult[..channels] {
                stream.write_sbits(bits, i32::from(value))?;
            }
        }
        if has_add {
            for &value in &self.add[..channels] {
                stream.write_sbits(bits, i32::from(value))?;
            }
        }
        stream.reset_bits();
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn read(stream: &mut SwfStream) -> Result<Self, SwfError> {
        Ok(Self {
            r: stream.read_u8()?,
            g: stream.read_u8()?,
            b: stream.read_u8()?,
        })
    }

    pub fn write(&self, stream: &mut SwfStream) {
        stream.write_u8(self.r);
        stream.write_u8(self.g);
        stream.write_u8(self.b);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn read(stream: &mut SwfStream) -> Result<Self, SwfError> {
        Ok(Self {
            r: stream.read_u8()?,
            g: stream.read_u8()?,
            b: stream.read_u8()?,
            a: stream.read_u8()?,
        })
    }
}
