//! JPEG/PNG source adapter backed by the `image` crate.

use std::io::Cursor;

use image::{ImageFormat, ImageReader};

use super::RasterDecoder;
use crate::ascii::rgba_to_level;
use crate::error::RenderError;
use crate::surface::{Dimensions, LuminanceSurface};

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF];

/// Compressed raster formats this tool decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    Jpeg,
    Png,
}

impl RasterFormat {
    /// Identify the format from the leading bytes.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        if data.starts_with(PNG_SIGNATURE) {
            Some(RasterFormat::Png)
        } else if data.starts_with(JPEG_SIGNATURE) {
            Some(RasterFormat::Jpeg)
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RasterFormat::Jpeg => "JPEG",
            RasterFormat::Png => "PNG",
        }
    }

    fn dimensions_label(&self) -> &'static str {
        match self {
            RasterFormat::Jpeg => "JPEG dimensions",
            RasterFormat::Png => "PNG dimensions",
        }
    }

    fn image_format(&self) -> ImageFormat {
        match self {
            RasterFormat::Jpeg => ImageFormat::Jpeg,
            RasterFormat::Png => ImageFormat::Png,
        }
    }
}

/// Decodes PNG and JPEG with the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageDecoder;

impl ImageDecoder {
    fn reader(data: &[u8], format: RasterFormat) -> ImageReader<Cursor<&[u8]>> {
        ImageReader::with_format(Cursor::new(data), format.image_format())
    }
}

impl RasterDecoder for ImageDecoder {
    fn probe_dimensions(
        &self,
        data: &[u8],
        format: RasterFormat,
    ) -> Result<Dimensions, RenderError> {
        let (width, height) = Self::reader(data, format)
            .into_dimensions()
            .map_err(|e| RenderError::decode(format.dimensions_label(), e))?;
        let dims = Dimensions::new(width, height);
        if dims.is_empty() {
            return Err(RenderError::decode(
                format.dimensions_label(),
                format!("image is {}", dims),
            ));
        }
        Ok(dims)
    }

    fn decode_and_draw(
        &self,
        data: &[u8],
        format: RasterFormat,
        target: &mut LuminanceSurface,
    ) -> Result<(), RenderError> {
        let image = Self::reader(data, format)
            .decode()
            .map_err(|e| RenderError::decode(format.name(), e))?
            .to_rgba8();

        if image.dimensions() != (target.width(), target.height()) {
            return Err(RenderError::decode(
                format.name(),
                format!(
                    "decoded size {}x{} does not match header size {}",
                    image.width(),
                    image.height(),
                    target.dimensions()
                ),
            ));
        }

        target.fill_from(image.pixels().map(|p| {
            let [r, g, b, a] = p.0;
            rgba_to_level(r, g, b, a)
        }));
        Ok(())
    }
}

/// Raster path: check the signature, probe the header, allocate at native
/// size, decode.
pub(super) fn decode(
    data: &[u8],
    declared: RasterFormat,
    decoder: &dyn RasterDecoder,
) -> Result<LuminanceSurface, RenderError> {
    let format = RasterFormat::sniff(data).ok_or_else(|| {
        RenderError::UnsupportedFormat(format!(
            "{} file has neither a JPEG nor a PNG signature",
            declared.name()
        ))
    })?;
    if format != declared {
        log::warn!(
            "file extension says {} but contents are {}",
            declared.name(),
            format.name()
        );
    }

    let native = decoder.probe_dimensions(data, format)?;
    log::debug!("{} native size {}", format.name(), native);

    let mut surface = LuminanceSurface::new(native)?;
    surface.clear();
    decoder.decode_and_draw(data, format, &mut surface)?;
    Ok(surface)
}
