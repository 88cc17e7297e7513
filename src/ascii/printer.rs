//! Writes a luminance surface as rows of ramp characters.

use std::io::Write;

use super::mapping::quantize;
use crate::error::RenderError;
use crate::surface::LuminanceSurface;

/// Terminator written after every row.
pub const ROW_TERMINATOR: &[u8] = b"\r\n";

/// Print a surface row-major, one character per pixel.
///
/// Rows are emitted top-to-bottom, each followed by [`ROW_TERMINATOR`]. The
/// surface is only read, so printing it twice yields identical bytes.
pub fn print_surface<W: Write>(surface: &LuminanceSurface, out: &mut W) -> Result<(), RenderError> {
    for row in surface.rows() {
        for &level in row {
            // Every ramp character is ASCII, so one byte per pixel.
            out.write_all(&[quantize(level)? as u8])?;
        }
        out.write_all(ROW_TERMINATOR)?;
    }
    out.flush()?;
    Ok(())
}
