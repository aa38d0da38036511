//! Two-entry color table extraction.

use std::io::{Read, Seek};

use log::debug;

use super::header::BmpHeader;
use super::read_at;
use crate::error::BitmapError;

/// Bytes per stored palette entry: blue, green, red, reserved.
pub const PALETTE_ENTRY_SIZE: u32 = 4;

/// One color, in the BMP's blue, green, red channel order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PaletteEntry {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
}

impl PaletteEntry {
    pub const fn new(blue: u8, green: u8, red: u8) -> Self {
        Self { blue, green, red }
    }

    /// Channels in emission order.
    pub const fn bgr(self) -> [u8; 3] {
        [self.blue, self.green, self.red]
    }
}

/// Black then white, used when the header declares no explicit palette.
pub const DEFAULT_PALETTE: [PaletteEntry; 2] = [
    PaletteEntry::new(0, 0, 0),
    PaletteEntry::new(255, 255, 255),
];

/// Extract the two palette entries for a validated header.
///
/// `colors_used == 0` yields [`DEFAULT_PALETTE`] without touching the
/// reader. `colors_used == 2` reads the 8 bytes just before the pixel data.
pub fn read_palette<R: Read + Seek>(
    reader: &mut R,
    header: &BmpHeader,
) -> Result<[PaletteEntry; 2], BitmapError> {
    match header.colors_used {
        0 => {
            debug!("no palette in file, using default black/white");
            Ok(DEFAULT_PALETTE)
        }
        2 => {
            let offset = header
                .pixel_data_offset
                .checked_sub(PALETTE_ENTRY_SIZE * 2)
                .ok_or_else(|| {
                    BitmapError::InvalidFormat(format!(
                        "pixel data offset {} leaves no room for a 2-entry palette",
                        header.pixel_data_offset
                    ))
                })?;
            let mut raw = [0u8; (PALETTE_ENTRY_SIZE * 2) as usize];
            read_at(reader, u64::from(offset), &mut raw)?;
            let [b0, g0, r0, _, b1, g1, r1, _] = raw;
            debug!("palette read from offset {offset}");
            Ok([PaletteEntry::new(b0, g0, r0), PaletteEntry::new(b1, g1, r1)])
        }
        other => Err(BitmapError::UnsupportedFormat(format!(
            "unsupported palette size: {other} colors (expected 0 or 2)"
        ))),
    }
}
