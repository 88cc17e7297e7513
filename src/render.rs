//! Render orchestration: one input in, one ASCII rendering out.
//!
//! A run walks through these stages, stopping at the first failure:
//!
//! ```text
//! Start -> TypeDetected -> NativeDecoded -> Scaled | Unscaled -> Printed -> Done
//! ```
//!
//! Surfaces are owned values, so whichever stage fails drops everything
//! allocated so far. Nothing is written to the output before the final
//! surface exists.

use std::io::Write;
use std::path::PathBuf;

use crate::ascii::print_surface;
use crate::config::DEFAULT_BASE_LINE_HEIGHT;
use crate::error::RenderError;
use crate::scale::{self, ScaleFactor};
use crate::source::{Collaborators, SourceDescriptor};

/// Pipeline stage, used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    TypeDetected,
    NativeDecoded,
    Scaled,
    Unscaled,
    Printed,
    Done,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::TypeDetected => "type-detected",
            Stage::NativeDecoded => "native-decoded",
            Stage::Scaled => "scaled",
            Stage::Unscaled => "unscaled",
            Stage::Printed => "printed",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// One conversion request.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub input: PathBuf,
    pub scale: ScaleFactor,
    pub text: Option<String>,
    /// Font line height at 100% scale
    pub base_line_height: f32,
}

impl RenderRequest {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            scale: ScaleFactor::ONE,
            text: None,
            base_line_height: DEFAULT_BASE_LINE_HEIGHT,
        }
    }

    pub fn with_scale(mut self, scale: ScaleFactor) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Drives the source adapters, scale policy and printer.
#[derive(Default)]
pub struct Renderer {
    collaborators: Collaborators,
}

impl Renderer {
    pub fn new(collaborators: Collaborators) -> Self {
        Self { collaborators }
    }

    /// Run the whole pipeline for `request`, writing the rendering to `out`.
    pub fn render<W: Write>(
        &mut self,
        request: &RenderRequest,
        out: &mut W,
    ) -> Result<Stage, RenderError> {
        let mut stage = Stage::Start;
        log::debug!("[{}] input {}", stage, request.input.display());

        let descriptor = SourceDescriptor::detect(&request.input, request.text.as_deref())?;
        stage = advance(stage, Stage::TypeDetected);
        log::info!("{:?} source at {}", descriptor.kind(), request.scale);

        let native = descriptor.decode(
            request.scale,
            request.base_line_height,
            &mut self.collaborators,
        )?;
        stage = advance(stage, Stage::NativeDecoded);
        log::debug!("native surface {}", native.dimensions());

        let factor = descriptor.resample_factor(request.scale);
        let next = if factor.is_identity() {
            Stage::Unscaled
        } else {
            Stage::Scaled
        };
        let surface = scale::apply(native, factor)?;
        stage = advance(stage, next);

        print_surface(&surface, out)?;
        stage = advance(stage, Stage::Printed);

        drop(surface);
        Ok(advance(stage, Stage::Done))
    }
}

fn advance(from: Stage, to: Stage) -> Stage {
    log::debug!("[{}] -> [{}]", from, to);
    to
}
