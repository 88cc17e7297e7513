//! CLI argument parsing with clap.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::scale::ScaleFactor;

/// Render an SVG, JPEG, PNG or a line of text in a TTF/OTF font as ASCII art
#[derive(Parser, Debug)]
#[command(name = "asciify")]
#[command(version, about = "Render images, vector graphics and font text as ASCII art", long_about = None)]
#[command(after_help = "EXAMPLES:
    asciify logo.svg
    asciify photo.jpg 25
    asciify DejaVuSans.ttf 30 \"Hello\"")]
pub struct Args {
    /// Input file (.svg, .jpg, .jpeg, .png, .ttf, .otf)
    pub input: PathBuf,

    /// Scale percentage, 1-1000 (anything else renders at 100%)
    #[arg(allow_hyphen_values = true)]
    pub scale: Option<String>,

    /// Text to render (required for font input)
    #[arg(allow_hyphen_values = true)]
    pub text: Option<String>,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Scale from the command line, or `default` when the argument is omitted.
    pub fn scale_factor(&self, default: ScaleFactor) -> ScaleFactor {
        match &self.scale {
            Some(arg) => ScaleFactor::parse_percent(arg),
            None => default,
        }
    }
}

/// Log filter for env_logger: the verbosity flag wins over the configured
/// base level, which wins over the `warn` default.
pub fn log_filter(base: Option<&str>, verbose: u8) -> &str {
    match verbose {
        0 => base.unwrap_or("warn"),
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
