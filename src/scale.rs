//! Scale factor parsing, resampling policy and the resample step itself.

use image::imageops::{self, FilterType};
use image::GrayImage;

use crate::ascii::luma_to_level;
use crate::error::RenderError;
use crate::surface::{Dimensions, LuminanceSurface, MAX_LEVEL};

/// Smallest accepted scale percentage.
pub const MIN_PERCENT: u32 = 1;
/// Largest accepted scale percentage (10x).
pub const MAX_PERCENT: u32 = 1000;
/// Percentage meaning "native size".
pub const IDENTITY_PERCENT: u32 = 100;

/// Output size relative to the source's native size.
///
/// Stored as an integer percentage in [`MIN_PERCENT`, `MAX_PERCENT`] so
/// dimension arithmetic stays exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleFactor {
    percent: u32,
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self::ONE
    }
}

impl ScaleFactor {
    /// The 1:1 factor.
    pub const ONE: ScaleFactor = ScaleFactor {
        percent: IDENTITY_PERCENT,
    };

    /// Build a factor from a percentage. Values outside 1..=1000 fall back
    /// to 100%.
    pub fn from_percent(percent: i64) -> Self {
        if (MIN_PERCENT as i64..=MAX_PERCENT as i64).contains(&percent) {
            Self {
                percent: percent as u32,
            }
        } else {
            Self::ONE
        }
    }

    /// Parse a command-line percentage from its leading integer, so `"12.5"`
    /// is 12% and `"50abc"` is 50%. Text with no leading digits and
    /// out-of-range values yield [`ScaleFactor::ONE`].
    pub fn parse_percent(arg: &str) -> Self {
        match leading_integer(arg) {
            Some(percent) => Self::from_percent(percent),
            None => {
                log::debug!("scale '{}' is not a number, using 100%", arg);
                Self::ONE
            }
        }
    }

    pub fn percent(&self) -> u32 {
        self.percent
    }

    /// The factor as a float (percent / 100).
    pub fn factor(&self) -> f32 {
        self.percent as f32 / IDENTITY_PERCENT as f32
    }

    pub fn is_identity(&self) -> bool {
        self.percent == IDENTITY_PERCENT
    }

    /// Scale one axis: floor(native * factor), never below 1.
    pub fn apply(&self, native: u32) -> u32 {
        let scaled = native as u64 * self.percent as u64 / IDENTITY_PERCENT as u64;
        scaled.clamp(1, u32::MAX as u64) as u32
    }

    /// Scale both axes.
    pub fn apply_dims(&self, native: Dimensions) -> Dimensions {
        Dimensions::new(self.apply(native.width), self.apply(native.height))
    }
}

/// Optional sign and digits at the start of `arg`, after leading whitespace.
/// Values too large for `i64` saturate, which keeps them out of range.
fn leading_integer(arg: &str) -> Option<i64> {
    let rest = arg.trim_start();
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit);

    let mut value: Option<i64> = None;
    for d in digits {
        let acc = value.unwrap_or(0);
        value = Some(acc.saturating_mul(10).saturating_add(i64::from(d - b'0')));
    }
    value.map(|v| if negative { -v } else { v })
}

impl std::fmt::Display for ScaleFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.percent)
    }
}

/// Resampling kernel class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// High-quality kernel used when shrinking
    Bicubic,
    /// Cheap kernel used when growing
    Bilinear,
}

impl FilterKind {
    fn filter_type(self) -> FilterType {
        match self {
            FilterKind::Bicubic => FilterType::CatmullRom,
            FilterKind::Bilinear => FilterType::Triangle,
        }
    }
}

/// What to do with a native surface for a given scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalePlan {
    /// Factor is exactly 1: the native surface is the final surface
    Unscaled,
    /// Resample into a new surface of `target` size
    Resample {
        target: Dimensions,
        filter: FilterKind,
    },
}

/// Decide output dimensions and filter.
///
/// The filter depends only on whether the factor shrinks or grows the
/// image, never on how far it is from 1.
pub fn plan(native: Dimensions, scale: ScaleFactor) -> ScalePlan {
    if scale.is_identity() {
        return ScalePlan::Unscaled;
    }
    let filter = if scale.percent() < IDENTITY_PERCENT {
        FilterKind::Bicubic
    } else {
        FilterKind::Bilinear
    };
    ScalePlan::Resample {
        target: scale.apply_dims(native),
        filter,
    }
}

/// Apply the scale policy, consuming the native surface.
///
/// On the unscaled path the native surface is returned as-is. Otherwise the
/// output surface is allocated first and the native surface is dropped as
/// soon as the resample has read it.
pub fn apply(native: LuminanceSurface, scale: ScaleFactor) -> Result<LuminanceSurface, RenderError> {
    match plan(native.dimensions(), scale) {
        ScalePlan::Unscaled => Ok(native),
        ScalePlan::Resample { target, filter } => {
            let mut output = LuminanceSurface::new(target)?;
            resample(&native, &mut output, filter)?;
            drop(native);
            log::debug!(
                "resampled to {} with {:?} filter ({})",
                output.dimensions(),
                filter,
                scale
            );
            Ok(output)
        }
    }
}

/// Resample `source` into `target` using the given kernel class.
///
/// Levels are widened to 8 bits for the kernel and narrowed back afterwards,
/// so kernel overshoot is clamped back into the 4-bit domain.
pub fn resample(
    source: &LuminanceSurface,
    target: &mut LuminanceSurface,
    filter: FilterKind,
) -> Result<(), RenderError> {
    let widen = u8::MAX / MAX_LEVEL;
    let pixels: Vec<u8> = source.levels().iter().map(|&l| l * widen).collect();
    let image = GrayImage::from_raw(source.width(), source.height(), pixels).ok_or_else(|| {
        RenderError::Internal(format!(
            "{} surface does not match its sample buffer",
            source.dimensions()
        ))
    })?;

    let resized = imageops::resize(&image, target.width(), target.height(), filter.filter_type());
    target.fill_from(resized.pixels().map(|p| luma_to_level(p.0[0])));
    Ok(())
}
