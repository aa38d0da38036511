//! C source rendering of a [`Conversion`].
//!
//! Layout, for the default `bmp` prefix:
//!
//! ```text
//! // Generated by bmp2c from logo.bmp
//! // Bit order: MSB first
//!
//! #define BMP_WIDTH  10
//! #define BMP_HEIGHT 2
//!
//! unsigned char bmp_data[] = {
//! 0xFF, 0xC0,
//! 0x81, 0x40,
//! };
//! ```
//!
//! followed by a `bmp_palette[]` array when the palette was extracted.

use std::io::{self, Write};

use crate::convert::Conversion;
use crate::error::BitmapError;

/// Default symbol prefix.
pub const DEFAULT_NAME: &str = "bmp";

/// Naming and comment options for the generated source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CSourceOptions<'a> {
    /// Prefix for `<NAME>_WIDTH`, `<name>_data` etc. Must be a C identifier.
    pub name: &'a str,
    /// Input file name recorded in the leading comment.
    pub source: Option<&'a str>,
}

impl Default for CSourceOptions<'_> {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME,
            source: None,
        }
    }
}

/// Whether `name` is usable as a C identifier (ASCII letters, digits, `_`,
/// not starting with a digit).
pub fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Write the generated source to `out`.
pub fn write_c_source<W: Write + ?Sized>(
    conversion: &Conversion,
    opts: &CSourceOptions<'_>,
    out: &mut W,
) -> Result<(), BitmapError> {
    if !is_c_identifier(opts.name) {
        return Err(BitmapError::InvalidName(opts.name.to_owned()));
    }
    write_body(conversion, opts, out)?;
    Ok(())
}

/// Render the generated source into memory.
pub fn render_c_source(
    conversion: &Conversion,
    opts: &CSourceOptions<'_>,
) -> Result<Vec<u8>, BitmapError> {
    let image = conversion.image();
    // "0xFF, " per byte plus per-row newline, rough header/palette overhead
    let mut out = Vec::with_capacity(image.bytes().len() * 6 + image.height as usize + 256);
    write_c_source(conversion, opts, &mut out)?;
    Ok(out)
}

fn write_body<W: Write + ?Sized>(
    conversion: &Conversion,
    opts: &CSourceOptions<'_>,
    out: &mut W,
) -> io::Result<()> {
    let name = opts.name;
    let upper = name.to_ascii_uppercase();
    let image = conversion.image();

    match opts.source {
        Some(source) => writeln!(out, "// Generated by bmp2c from {source}")?,
        None => writeln!(out, "// Generated by bmp2c")?,
    }
    writeln!(
        out,
        "// Bit order: {}",
        conversion.options().bit_order.label()
    )?;
    writeln!(out)?;
    writeln!(out, "#define {upper}_WIDTH  {}", image.width)?;
    writeln!(out, "#define {upper}_HEIGHT {}", image.height)?;
    writeln!(out)?;

    writeln!(out, "unsigned char {name}_data[] = {{")?;
    for row in image.rows() {
        write_hex_line(out, row)?;
    }
    writeln!(out, "}};")?;

    if let Some(palette) = conversion.palette() {
        writeln!(out)?;
        writeln!(out, "unsigned char {name}_palette[] = {{")?;
        for entry in palette {
            write_hex_line(out, &entry.bgr())?;
        }
        writeln!(out, "}};")?;
    }
    Ok(())
}

fn write_hex_line<W: Write + ?Sized>(out: &mut W, bytes: &[u8]) -> io::Result<()> {
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.write_all(b" ")?;
        }
        write!(out, "0x{byte:02X},")?;
    }
    out.write_all(b"\n")
}
