//! asciify library crate.
//!
//! Converts SVG documents, JPEG/PNG images and font-rendered text into
//! 16-level ASCII art. The binary is a thin wrapper around [`render::Renderer`].

pub mod ascii;
pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod scale;
pub mod source;
pub mod surface;
