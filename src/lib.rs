//! # zenbmp2c
//!
//! Convert monochrome (1 bit per pixel) BMP images into C source: width and
//! height constants, a flat byte array of packed pixels, and optionally the
//! 2-entry color palette.
//!
//! ## Pipeline
//!
//! raw bytes → validated [`BmpHeader`] → one reused row buffer per scanline
//! → [`PackedImage`] → C text ([`emit`]).
//!
//! - Rows come out visual top row first, whatever the stored orientation.
//! - Each output row holds `ceil(width / 8)` bytes; rows never share a byte.
//! - Pixels past the image width in a row's last byte are always zero.
//! - [`BitOrder::LsbFirst`] places the leftmost pixel of each byte in bit 0.
//!
//! ## Non-Goals
//!
//! - Bit depths other than 1
//! - RLE or any other compressed BMP
//! - Output languages other than C arrays
//!
//! ## Usage
//!
//! ```no_run
//! use zenbmp2c::{BitOrder, CSourceOptions, ConvertRequest, Options, Unstoppable};
//!
//! let options = Options {
//!     bit_order: BitOrder::LsbFirst,
//!     include_palette: true,
//! };
//! let conversion = ConvertRequest::new(options).convert_file("glyph.bmp", Unstoppable)?;
//! let text = zenbmp2c::emit::render_c_source(&conversion, &CSourceOptions::default())?;
//! zenbmp2c::output::write_atomically(std::path::Path::new("glyph.h"), &text)?;
//! # Ok::<(), zenbmp2c::BitmapError>(())
//! ```

#![forbid(unsafe_code)]

mod convert;
mod error;
mod limits;

pub mod bmp;
pub mod emit;
pub mod output;

// Re-exports
pub use bmp::header::{BmpHeader, HEADER_SIZE};
pub use bmp::pack::{BitOrder, PackedImage};
pub use bmp::palette::{DEFAULT_PALETTE, PaletteEntry};
pub use convert::{Conversion, ConvertRequest, Options};
pub use emit::CSourceOptions;
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
pub use limits::Limits;

/// Convert an in-memory 1bpp BMP with no resource limits.
pub fn convert_bmp(data: &[u8], options: Options, stop: impl Stop) -> Result<Conversion, BitmapError> {
    ConvertRequest::new(options).convert_bytes(data, stop)
}
