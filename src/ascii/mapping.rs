//! Luminance level to character mapping.

use super::charset::RAMP;
use crate::error::RenderError;

/// Map a 4-bit luminance level to its ramp character.
///
/// Levels above 15 can only come from a broken upstream stage and are
/// reported as [`RenderError::Internal`].
///
/// # Example
/// ```
/// use asciify::ascii::quantize;
///
/// assert_eq!(quantize(0).unwrap(), ' ');
/// assert_eq!(quantize(15).unwrap(), '#');
/// assert!(quantize(16).is_err());
/// ```
#[inline]
pub fn quantize(level: u8) -> Result<char, RenderError> {
    RAMP.get(level as usize)
        .copied()
        .ok_or_else(|| RenderError::Internal(format!("luminance level {} out of range", level)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_is_total_over_levels() {
        for level in 0..16u8 {
            assert_eq!(quantize(level).unwrap(), RAMP[level as usize]);
        }
    }

    #[test]
    fn test_quantize_rejects_out_of_range() {
        assert!(matches!(quantize(16), Err(RenderError::Internal(_))));
        assert!(matches!(quantize(255), Err(RenderError::Internal(_))));
    }

    #[test]
    fn test_quantize_is_monotonic() {
        let index_of = |c: char| RAMP.iter().position(|&r| r == c).unwrap();
        for level in 1..16u8 {
            let lower = index_of(quantize(level - 1).unwrap());
            let higher = index_of(quantize(level).unwrap());
            assert!(higher > lower);
        }
    }
}
