//! ASCII rendering of luminance surfaces.
//!
//! The final stage of the pipeline:
//!
//! 1. **Luminance conversion** - RGB or glyph coverage to a 4-bit level
//! 2. **Quantization** - level to a character from the fixed [`RAMP`]
//! 3. **Printing** - row-major walk emitting one character per pixel

mod charset;
mod grayscale;
mod mapping;
mod printer;

pub use charset::{RAMP, RAMP_LEVELS};
pub use grayscale::{coverage_to_level, luma_to_level, rgb_to_level, rgba_to_level};
pub use mapping::quantize;
pub use printer::{print_surface, ROW_TERMINATOR};
