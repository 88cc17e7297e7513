//! Pixel to 4-bit luminance conversion using the ITU-R BT.601 formula.

use super::charset::RAMP_LEVELS;

const TOP_LEVEL: u32 = (RAMP_LEVELS - 1) as u32;

/// Reduce an 8-bit luminance value to a 4-bit level (0-15), rounding to the
/// nearest level.
#[inline]
pub fn luma_to_level(luma: u8) -> u8 {
    ((luma as u32 * TOP_LEVEL + 127) / 255) as u8
}

/// Convert an RGB pixel to a 4-bit luminance level.
///
/// The luminance formula is: Y = 0.299*R + 0.587*G + 0.114*B, computed with
/// integer coefficients scaled by 1000 (299 + 587 + 114 = 1000).
#[inline]
pub fn rgb_to_level(r: u8, g: u8, b: u8) -> u8 {
    let luma = (299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000;
    luma_to_level(luma as u8)
}

/// Convert a straight-alpha RGBA pixel to a 4-bit level, composited over a
/// black background.
#[inline]
pub fn rgba_to_level(r: u8, g: u8, b: u8, a: u8) -> u8 {
    let over_black = |c: u8| ((c as u32 * a as u32 + 127) / 255) as u8;
    rgb_to_level(over_black(r), over_black(g), over_black(b))
}

/// Convert glyph coverage (0 = empty, 255 = fully inked) to a 4-bit level.
#[inline]
pub fn coverage_to_level(coverage: u8) -> u8 {
    luma_to_level(coverage)
}
