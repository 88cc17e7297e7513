//! Single-channel 4-bit luminance bitmap shared by every pipeline stage.

use crate::error::RenderError;

/// Highest luminance level a surface sample can hold.
pub const MAX_LEVEL: u8 = 15;

/// Width and height of a surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels, or `None` if it does not fit in `usize`.
    pub fn pixel_count(&self) -> Option<usize> {
        (self.width as usize).checked_mul(self.height as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A width x height grid of luminance levels (0-15), row-major.
///
/// A surface is never zero-sized: construction fails instead. Every write
/// clamps to [`MAX_LEVEL`], so stored samples are always in range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuminanceSurface {
    width: u32,
    height: u32,
    levels: Vec<u8>,
}

impl LuminanceSurface {
    /// Allocate a cleared (all-zero) surface.
    ///
    /// Fails with [`RenderError::OutOfMemory`] if the backing buffer cannot be
    /// reserved. Empty dimensions are a caller bug and give
    /// [`RenderError::Internal`].
    pub fn new(dims: Dimensions) -> Result<Self, RenderError> {
        if dims.is_empty() {
            return Err(RenderError::Internal(format!(
                "refusing to allocate a {} surface",
                dims
            )));
        }
        let count = dims.pixel_count().ok_or_else(|| oom_for(dims))?;

        let mut levels = Vec::new();
        levels
            .try_reserve_exact(count)
            .map_err(|_| oom_for(dims))?;
        levels.resize(count, 0);

        log::trace!("allocated {} luminance surface", dims);
        Ok(Self {
            width: dims.width,
            height: dims.height,
            levels,
        })
    }

    /// Build a surface from existing row-major levels. Values above
    /// [`MAX_LEVEL`] are clamped.
    pub fn from_levels(dims: Dimensions, levels: Vec<u8>) -> Result<Self, RenderError> {
        if dims.pixel_count() != Some(levels.len()) || dims.is_empty() {
            return Err(RenderError::Internal(format!(
                "{} surface needs {:?} samples, got {}",
                dims,
                dims.pixel_count(),
                levels.len()
            )));
        }
        let levels = levels.into_iter().map(|l| l.min(MAX_LEVEL)).collect();
        Ok(Self {
            width: dims.width,
            height: dims.height,
            levels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }

    /// Level at (x, y). Out-of-bounds reads return `None`.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.levels.get(self.index(x, y)).copied()
    }

    /// Set the level at (x, y), clamped to [`MAX_LEVEL`]. Out-of-bounds
    /// writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, level: u8) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.index(x, y);
        self.levels[idx] = level.min(MAX_LEVEL);
    }

    /// Raise the level at (x, y) to at least `level`. Used when glyph
    /// bitmaps overlap.
    pub fn max_assign(&mut self, x: u32, y: u32, level: u8) {
        if let Some(current) = self.get(x, y) {
            self.set(x, y, current.max(level));
        }
    }

    /// Reset every sample to level 0.
    pub fn clear(&mut self) {
        self.levels.fill(0);
    }

    /// Fill the surface from an iterator of levels in row-major order.
    /// Missing trailing samples are left untouched.
    pub fn fill_from<I: IntoIterator<Item = u8>>(&mut self, levels: I) {
        for (dst, src) in self.levels.iter_mut().zip(levels) {
            *dst = src.min(MAX_LEVEL);
        }
    }

    /// All samples, row-major.
    pub fn levels(&self) -> &[u8] {
        &self.levels
    }

    /// Iterate rows top-to-bottom.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, u8> {
        self.levels.chunks_exact(self.width as usize)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

fn oom_for(dims: Dimensions) -> RenderError {
    RenderError::OutOfMemory {
        width: dims.width,
        height: dims.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_surface_is_cleared() {
        let surface = LuminanceSurface::new(Dimensions::new(3, 2)).unwrap();
        assert_eq!(surface.width(), 3);
        assert_eq!(surface.height(), 2);
        assert_eq!(surface.levels(), &[0; 6]);
    }

    #[test]
    fn test_zero_sized_surface_is_rejected() {
        let err = LuminanceSurface::new(Dimensions::new(0, 5)).unwrap_err();
        assert!(matches!(err, RenderError::Internal(_)));
        assert!(err.to_string().contains("0x5"));
        assert!(matches!(
            LuminanceSurface::new(Dimensions::new(5, 0)),
            Err(RenderError::Internal(_))
        ));
    }

    #[test]
    fn test_huge_surface_reports_out_of_memory() {
        let result = LuminanceSurface::new(Dimensions::new(u32::MAX, u32::MAX));
        assert!(matches!(result, Err(RenderError::OutOfMemory { .. })));
    }

    #[test]
    fn test_set_clamps_to_max_level() {
        let mut surface = LuminanceSurface::new(Dimensions::new(2, 2)).unwrap();
        surface.set(1, 1, 200);
        assert_eq!(surface.get(1, 1), Some(MAX_LEVEL));
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut surface = LuminanceSurface::new(Dimensions::new(2, 2)).unwrap();
        surface.set(5, 5, 3);
        assert_eq!(surface.get(2, 0), None);
        assert_eq!(surface.levels(), &[0; 4]);
    }

    #[test]
    fn test_max_assign_keeps_brighter_level() {
        let mut surface = LuminanceSurface::new(Dimensions::new(1, 1)).unwrap();
        surface.max_assign(0, 0, 9);
        surface.max_assign(0, 0, 4);
        assert_eq!(surface.get(0, 0), Some(9));
    }

    #[test]
    fn test_from_levels_checks_length() {
        assert!(LuminanceSurface::from_levels(Dimensions::new(2, 2), vec![0; 3]).is_err());
        let surface =
            LuminanceSurface::from_levels(Dimensions::new(2, 1), vec![1, 99]).unwrap();
        assert_eq!(surface.levels(), &[1, 15]);
    }

    #[test]
    fn test_rows_are_row_major() {
        let surface =
            LuminanceSurface::from_levels(Dimensions::new(2, 2), vec![1, 2, 3, 4]).unwrap();
        let rows: Vec<&[u8]> = surface.rows().collect();
        assert_eq!(rows, vec![&[1, 2][..], &[3, 4][..]]);
    }

    #[test]
    fn test_clear_resets_levels() {
        let mut surface =
            LuminanceSurface::from_levels(Dimensions::new(2, 1), vec![7, 8]).unwrap();
        surface.clear();
        assert_eq!(surface.levels(), &[0, 0]);
    }
}
