//! Font + text source adapter backed by fontdue.

use fontdue::{Font, FontSettings, Metrics};

use super::{FontLoader, GlyphRun};
use crate::ascii::coverage_to_level;
use crate::error::RenderError;
use crate::surface::{Dimensions, LuminanceSurface};

/// Loads TTF/OTF fonts with fontdue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FontdueLoader;

impl FontLoader for FontdueLoader {
    fn initialize(&self, data: &[u8], line_height: f32) -> Result<Box<dyn GlyphRun>, RenderError> {
        if !(line_height.is_finite() && line_height > 0.0) {
            return Err(RenderError::FontLoad(format!(
                "invalid line height {}",
                line_height
            )));
        }
        let settings = FontSettings {
            scale: line_height,
            ..FontSettings::default()
        };
        let font = Font::from_bytes(data, settings)
            .map_err(|e| RenderError::FontLoad(e.to_string()))?;
        Ok(Box::new(FontdueRun::new(font, line_height)))
    }
}

/// A single line of text laid out with one fontdue font at one size.
pub struct FontdueRun {
    font: Font,
    px: f32,
    ascent: f32,
    descent: f32,
}

impl FontdueRun {
    pub fn new(font: Font, px: f32) -> Self {
        let (ascent, descent) = match font.horizontal_line_metrics(px) {
            Some(m) => (m.ascent, m.descent),
            // Fonts without horizontal metrics: treat the em box as the line.
            None => (px, 0.0),
        };
        Self {
            font,
            px,
            ascent,
            descent,
        }
    }

    /// Rows above and below the baseline. Starts from the font's line box and
    /// grows to fit any glyph of `text` that reaches past it.
    fn extent(&self, text: &str) -> (i32, i32) {
        let mut above = self.ascent.ceil() as i32;
        let mut below = -(self.descent.floor() as i32);
        for c in text.chars() {
            let m = self.font.metrics(c, self.px);
            if m.width == 0 || m.height == 0 {
                continue;
            }
            above = above.max(m.ymin + m.height as i32);
            below = below.max(-m.ymin);
        }
        (above.max(0), below.max(0))
    }
}

fn glyph_left(pen_x: f32, metrics: &Metrics) -> i64 {
    (pen_x + metrics.xmin as f32).round() as i64
}

impl GlyphRun for FontdueRun {
    fn measure(&self, text: &str) -> Dimensions {
        let (above, below) = self.extent(text);
        let mut pen_x = 0.0f32;
        let mut right = 0i64;
        for c in text.chars() {
            let m = self.font.metrics(c, self.px);
            if m.width > 0 {
                right = right.max(glyph_left(pen_x, &m) + m.width as i64);
            }
            pen_x += m.advance_width;
        }
        let width = (pen_x.ceil() as i64).max(right);
        Dimensions::new(
            width.clamp(1, u32::MAX as i64) as u32,
            ((above + below) as u32).max(1),
        )
    }

    fn rasterize(&self, text: &str, target: &mut LuminanceSurface) -> Result<(), RenderError> {
        let (baseline, _) = self.extent(text);
        let mut pen_x = 0.0f32;

        for c in text.chars() {
            let (metrics, coverage) = self.font.rasterize(c, self.px);
            let left = glyph_left(pen_x, &metrics);
            let top = (baseline - metrics.ymin - metrics.height as i32) as i64;

            if metrics.width > 0 {
                for (row, line) in coverage.chunks_exact(metrics.width).enumerate() {
                    for (col, &cov) in line.iter().enumerate() {
                        let x = left + col as i64;
                        let y = top + row as i64;
                        if x < 0 || y < 0 || cov == 0 {
                            continue;
                        }
                        target.max_assign(x as u32, y as u32, coverage_to_level(cov));
                    }
                }
            }
            pen_x += metrics.advance_width;
        }
        Ok(())
    }
}

/// Font path: initialize at `line_height`, measure, allocate, rasterize.
pub(super) fn decode(
    data: &[u8],
    text: &str,
    line_height: f32,
    loader: &dyn FontLoader,
) -> Result<LuminanceSurface, RenderError> {
    let run = loader.initialize(data, line_height)?;
    let native = run.measure(text);
    log::debug!(
        "text run of {} chars measures {} at line height {}",
        text.chars().count(),
        native,
        line_height
    );

    let mut surface = LuminanceSurface::new(native)?;
    surface.clear();
    run.rasterize(text, &mut surface)?;
    Ok(surface)
}
