//! SVG source adapter backed by resvg.

use resvg::{tiny_skia, usvg};

use super::VectorDecoder;
use crate::ascii::rgb_to_level;
use crate::error::RenderError;
use crate::surface::{Dimensions, LuminanceSurface};

const KIND: &str = "SVG";

/// Axis-aligned scale applied while rasterizing a vector document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale_x: f32,
    pub scale_y: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        scale_x: 1.0,
        scale_y: 1.0,
    };
}

/// Parses SVG with `usvg` and rasterizes with `resvg`.
///
/// The parsed tree from [`VectorDecoder::probe_dimensions`] is kept so the
/// document is parsed once per run.
#[derive(Default)]
pub struct SvgDecoder {
    tree: Option<usvg::Tree>,
}

impl SvgDecoder {
    fn tree(&mut self, data: &[u8]) -> Result<&usvg::Tree, RenderError> {
        if self.tree.is_none() {
            let tree = usvg::Tree::from_data(data, &usvg::Options::default())
                .map_err(|e| RenderError::decode(KIND, e))?;
            self.tree = Some(tree);
        }
        self.tree
            .as_ref()
            .ok_or_else(|| RenderError::Internal("SVG tree missing after parse".into()))
    }
}

impl VectorDecoder for SvgDecoder {
    fn probe_dimensions(&mut self, data: &[u8]) -> Result<Dimensions, RenderError> {
        let size = self.tree(data)?.size();
        let dims = Dimensions::new(size.width().ceil() as u32, size.height().ceil() as u32);
        if dims.is_empty() {
            return Err(RenderError::decode(KIND, format!("document is {}", dims)));
        }
        Ok(dims)
    }

    fn rasterize(
        &mut self,
        data: &[u8],
        transform: Transform,
        target: &mut LuminanceSurface,
    ) -> Result<(), RenderError> {
        let tree = self.tree(data)?;
        let mut pixmap =
            tiny_skia::Pixmap::new(target.width(), target.height()).ok_or(
                RenderError::OutOfMemory {
                    width: target.width(),
                    height: target.height(),
                },
            )?;

        resvg::render(
            tree,
            tiny_skia::Transform::from_scale(transform.scale_x, transform.scale_y),
            &mut pixmap.as_mut(),
        );

        // Pixels are premultiplied, i.e. already composited over black.
        target.fill_from(
            pixmap
                .pixels()
                .iter()
                .map(|p| rgb_to_level(p.red(), p.green(), p.blue())),
        );
        Ok(())
    }
}

/// Vector path: probe, allocate at native size, rasterize with the identity
/// transform.
pub(super) fn decode(
    data: &[u8],
    decoder: &mut dyn VectorDecoder,
) -> Result<LuminanceSurface, RenderError> {
    let native = decoder.probe_dimensions(data)?;
    log::debug!("SVG native size {}", native);

    let mut surface = LuminanceSurface::new(native)?;
    surface.clear();
    decoder.rasterize(data, Transform::IDENTITY, &mut surface)?;
    Ok(surface)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE_SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
  <rect x="0" y="0" width="10" height="10" fill="#ffffff"/>
</svg>"##;

    const HALF_BLACK: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="8" height="4">
  <rect x="4" y="0" width="4" height="4" fill="#ffffff"/>
</svg>"##;

    #[test]
    fn test_probe_reads_document_size() {
        let mut decoder = SvgDecoder::default();
        let dims = decoder.probe_dimensions(WHITE_SQUARE.as_bytes()).unwrap();
        assert_eq!(dims, Dimensions::new(10, 10));
    }

    #[test]
    fn test_probe_rounds_fractional_size_up() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="4.2" height="3.5"/>"#;
        let dims = SvgDecoder::default()
            .probe_dimensions(svg.as_bytes())
            .unwrap();
        assert_eq!(dims, Dimensions::new(5, 4));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = SvgDecoder::default()
            .probe_dimensions(b"definitely not xml")
            .unwrap_err();
        assert!(matches!(err, RenderError::Decode { kind: "SVG", .. }));
    }

    #[test]
    fn test_decode_white_square() {
        let surface = decode(WHITE_SQUARE.as_bytes(), &mut SvgDecoder::default()).unwrap();
        assert_eq!(surface.dimensions(), Dimensions::new(10, 10));
        assert_eq!(surface.get(5, 5), Some(15));
    }

    #[test]
    fn test_unpainted_area_stays_black() {
        let surface = decode(HALF_BLACK.as_bytes(), &mut SvgDecoder::default()).unwrap();
        assert_eq!(surface.get(1, 1), Some(0));
        assert_eq!(surface.get(6, 1), Some(15));
    }
}
