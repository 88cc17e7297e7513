//! Source adapters: turn an SVG, a JPEG/PNG or a font + text into a
//! native-resolution luminance surface.
//!
//! Each source kind talks to its decoder through a small trait so the
//! pipeline can be driven with fakes in tests:
//!
//! - [`VectorDecoder`] - probe and rasterize vector documents ([`SvgDecoder`])
//! - [`RasterDecoder`] - probe and decode compressed images ([`ImageDecoder`])
//! - [`FontLoader`] / [`GlyphRun`] - measure and rasterize text ([`FontdueLoader`])

mod font;
mod raster;
mod vector;

use std::path::{Path, PathBuf};

pub use font::{FontdueLoader, FontdueRun};
pub use raster::{ImageDecoder, RasterFormat};
pub use vector::{SvgDecoder, Transform};

use crate::error::RenderError;
use crate::scale::ScaleFactor;
use crate::surface::{Dimensions, LuminanceSurface};

/// Probes and rasterizes vector documents.
pub trait VectorDecoder {
    /// Native document size in pixels. May parse the whole document.
    fn probe_dimensions(&mut self, data: &[u8]) -> Result<Dimensions, RenderError>;

    /// Rasterize the document into `target` using `transform`.
    fn rasterize(
        &mut self,
        data: &[u8],
        transform: Transform,
        target: &mut LuminanceSurface,
    ) -> Result<(), RenderError>;
}

/// Probes and decodes compressed raster images.
pub trait RasterDecoder {
    /// Image size read from the header, without a full decode.
    fn probe_dimensions(&self, data: &[u8], format: RasterFormat)
        -> Result<Dimensions, RenderError>;

    /// Decode the image and draw it into `target`, which has the probed size.
    fn decode_and_draw(
        &self,
        data: &[u8],
        format: RasterFormat,
        target: &mut LuminanceSurface,
    ) -> Result<(), RenderError>;
}

/// Loads a font at a given pixel line height.
pub trait FontLoader {
    fn initialize(&self, data: &[u8], line_height: f32) -> Result<Box<dyn GlyphRun>, RenderError>;
}

/// A font initialized at a fixed size, ready to lay out one line of text.
pub trait GlyphRun {
    /// Surface size needed to hold `text`.
    fn measure(&self, text: &str) -> Dimensions;

    /// Draw `text` into `target`, which is at least `measure(text)` in size.
    fn rasterize(&self, text: &str, target: &mut LuminanceSurface) -> Result<(), RenderError>;
}

/// The decoders used for one run.
pub struct Collaborators {
    pub vector: Box<dyn VectorDecoder>,
    pub raster: Box<dyn RasterDecoder>,
    pub fonts: Box<dyn FontLoader>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            vector: Box::new(SvgDecoder::default()),
            raster: Box::new(ImageDecoder),
            fonts: Box::new(FontdueLoader),
        }
    }
}

/// Kind of source, decided from the input path's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Vector,
    Raster(RasterFormat),
    Font,
}

impl SourceKind {
    /// Classify a path by its extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "svg" => Some(SourceKind::Vector),
            "jpg" | "jpeg" => Some(SourceKind::Raster(RasterFormat::Jpeg)),
            "png" => Some(SourceKind::Raster(RasterFormat::Png)),
            "ttf" | "otf" => Some(SourceKind::Font),
            _ => None,
        }
    }
}

/// Everything needed to decode one input, fixed at the start of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceDescriptor {
    Vector {
        path: PathBuf,
    },
    Raster {
        path: PathBuf,
        declared: RasterFormat,
    },
    FontText {
        path: PathBuf,
        text: String,
    },
}

impl SourceDescriptor {
    /// Build a descriptor from the input path and the optional text argument.
    ///
    /// Fails with [`RenderError::UnsupportedFormat`] for unknown extensions and
    /// [`RenderError::MissingArgument`] for a font without text. No file is
    /// opened here.
    pub fn detect(path: &Path, text: Option<&str>) -> Result<Self, RenderError> {
        let kind = SourceKind::from_path(path)
            .ok_or_else(|| RenderError::UnsupportedFormat(describe_extension(path)))?;

        let path = path.to_path_buf();
        Ok(match kind {
            SourceKind::Vector => SourceDescriptor::Vector { path },
            SourceKind::Raster(declared) => SourceDescriptor::Raster { path, declared },
            SourceKind::Font => match text {
                Some(text) if !text.is_empty() => SourceDescriptor::FontText {
                    path,
                    text: text.to_string(),
                },
                _ => {
                    return Err(RenderError::MissingArgument(
                        "text is required for font input",
                    ))
                }
            },
        })
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            SourceDescriptor::Vector { .. } => SourceKind::Vector,
            SourceDescriptor::Raster { declared, .. } => SourceKind::Raster(*declared),
            SourceDescriptor::FontText { .. } => SourceKind::Font,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            SourceDescriptor::Vector { path }
            | SourceDescriptor::Raster { path, .. }
            | SourceDescriptor::FontText { path, .. } => path,
        }
    }

    /// Factor the scale policy should apply after decoding.
    ///
    /// Text is rasterized at the requested scale through the font's line
    /// height, so its native surface is already final.
    pub fn resample_factor(&self, requested: ScaleFactor) -> ScaleFactor {
        match self {
            SourceDescriptor::FontText { .. } => ScaleFactor::ONE,
            _ => requested,
        }
    }

    /// Decode the source into a surface at native resolution.
    pub fn decode(
        &self,
        scale: ScaleFactor,
        base_line_height: f32,
        collaborators: &mut Collaborators,
    ) -> Result<LuminanceSurface, RenderError> {
        match self {
            SourceDescriptor::Vector { path } => {
                let data = read_input(path)?;
                vector::decode(&data, collaborators.vector.as_mut())
            }
            SourceDescriptor::Raster { path, declared } => {
                let data = read_input(path)?;
                raster::decode(&data, *declared, collaborators.raster.as_ref())
            }
            SourceDescriptor::FontText { path, text } => {
                let data = read_input(path)?;
                let line_height = scale.factor() * base_line_height;
                font::decode(&data, text, line_height, collaborators.fonts.as_ref())
            }
        }
    }
}

/// Read the whole input into memory. The file handle is closed on return.
fn read_input(path: &Path) -> Result<Vec<u8>, RenderError> {
    let data = std::fs::read(path).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("read {} bytes from {}", data.len(), path.display());
    Ok(data)
}

fn describe_extension(path: &Path) -> String {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!(
            "'.{}' (expected .svg, .jpg, .png, .ttf or .otf)",
            ext
        ),
        None => format!("'{}' has no file extension", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(
            SourceKind::from_path(Path::new("a.svg")),
            Some(SourceKind::Vector)
        );
        assert_eq!(
            SourceKind::from_path(Path::new("a.jpg")),
            Some(SourceKind::Raster(RasterFormat::Jpeg))
        );
        assert_eq!(
            SourceKind::from_path(Path::new("a.jpeg")),
            Some(SourceKind::Raster(RasterFormat::Jpeg))
        );
        assert_eq!(
            SourceKind::from_path(Path::new("dir/a.png")),
            Some(SourceKind::Raster(RasterFormat::Png))
        );
        assert_eq!(
            SourceKind::from_path(Path::new("a.ttf")),
            Some(SourceKind::Font)
        );
        assert_eq!(
            SourceKind::from_path(Path::new("a.otf")),
            Some(SourceKind::Font)
        );
    }

    #[test]
    fn test_kind_is_case_insensitive() {
        assert_eq!(
            SourceKind::from_path(Path::new("LOGO.SVG")),
            Some(SourceKind::Vector)
        );
        assert_eq!(
            SourceKind::from_path(Path::new("photo.JpG")),
            Some(SourceKind::Raster(RasterFormat::Jpeg))
        );
        assert_eq!(
            SourceKind::from_path(Path::new("Font.TTF")),
            Some(SourceKind::Font)
        );
    }

    #[test]
    fn test_unknown_extensions() {
        assert_eq!(SourceKind::from_path(Path::new("a.bmp")), None);
        assert_eq!(SourceKind::from_path(Path::new("svg")), None);
        assert_eq!(SourceKind::from_path(Path::new("a.svg.txt")), None);
    }

    #[test]
    fn test_detect_unsupported() {
        let err = SourceDescriptor::detect(Path::new("x.bmp"), None).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedFormat(_)));
        assert!(err.to_string().contains(".bmp"));
    }

    #[test]
    fn test_detect_font_requires_text() {
        for text in [None, Some("")] {
            let err = SourceDescriptor::detect(Path::new("f.ttf"), text).unwrap_err();
            assert!(matches!(err, RenderError::MissingArgument(_)));
        }
        let desc = SourceDescriptor::detect(Path::new("f.otf"), Some("Hi")).unwrap();
        assert_eq!(
            desc,
            SourceDescriptor::FontText {
                path: PathBuf::from("f.otf"),
                text: "Hi".into()
            }
        );
    }

    #[test]
    fn test_text_ignored_for_images() {
        let desc = SourceDescriptor::detect(Path::new("a.png"), Some("ignored")).unwrap();
        assert_eq!(desc.kind(), SourceKind::Raster(RasterFormat::Png));
        assert_eq!(desc.path(), Path::new("a.png"));
    }

    #[test]
    fn test_font_text_is_never_resampled() {
        let half = ScaleFactor::from_percent(50);
        let font = SourceDescriptor::detect(Path::new("f.ttf"), Some("A")).unwrap();
        let svg = SourceDescriptor::detect(Path::new("a.svg"), None).unwrap();
        assert_eq!(font.resample_factor(half), ScaleFactor::ONE);
        assert_eq!(svg.resample_factor(half), half);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let desc = SourceDescriptor::detect(Path::new("/definitely/not/here.svg"), None).unwrap();
        let err = desc
            .decode(ScaleFactor::ONE, 100.0, &mut Collaborators::default())
            .unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }));
    }
}
