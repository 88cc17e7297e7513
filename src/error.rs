//! Error types for the render pipeline.
//!
//! Every stage returns [`RenderError`] to its caller; only `main` turns one
//! into a diagnostic line and an exit code.

use std::path::PathBuf;

/// Errors that abort a conversion run.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A required positional argument was not supplied
    #[error("Not enough arguments: {0}")]
    MissingArgument(&'static str),

    /// The input is not one of the recognized source kinds
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The source collaborator rejected the input
    #[error("Unable to read {kind}: {detail}")]
    Decode { kind: &'static str, detail: String },

    /// The font file could not be initialized
    #[error("Unable to load font: {0}")]
    FontLoad(String),

    /// A luminance surface could not be allocated
    #[error("Out of memory creating {width}x{height} bitmap")]
    OutOfMemory { width: u32, height: u32 },

    /// A pipeline contract was broken
    #[error("Internal error: {0}")]
    Internal(String),

    /// The input file could not be opened or read
    #[error("Unable to open '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing the rendering to stdout failed
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl RenderError {
    /// Shorthand for a [`RenderError::Decode`].
    pub fn decode(kind: &'static str, detail: impl std::fmt::Display) -> Self {
        RenderError::Decode {
            kind,
            detail: detail.to_string(),
        }
    }

    /// Process exit code for this failure.
    ///
    /// Every failure category maps to 1.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
