//! BMP file header + BITMAPINFOHEADER parsing.
//!
//! Fields are decoded one by one from fixed little-endian offsets; nothing
//! relies on in-memory struct layout.

use std::io::Read;

use log::debug;

use super::read_fully;
use crate::error::BitmapError;

/// Size of the BITMAPFILEHEADER.
pub const FILE_HEADER_SIZE: usize = 14;
/// Size of the BITMAPINFOHEADER that immediately follows it.
pub const INFO_HEADER_SIZE: usize = 40;
/// Combined size of both headers, read back-to-back with no gap.
pub const HEADER_SIZE: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

/// Parsed and validated 1bpp BMP headers. Immutable once parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpHeader {
    pub signature: [u8; 2],
    pub file_size: u32,
    /// Byte offset from the start of the file to the first stored row.
    pub pixel_data_offset: u32,
    pub info_header_size: u32,
    /// Only the magnitude is used.
    pub width: i32,
    /// Positive: rows stored bottom-up. Zero or negative: top-down.
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    /// 0 = implicit black/white palette, 2 = explicit palette in the file.
    pub colors_used: u32,
    pub colors_important: u32,
}

impl BmpHeader {
    /// Decode and validate both headers from their raw bytes.
    ///
    /// Validation order: signature, bit depth, compression.
    pub fn parse(bytes: &[u8; HEADER_SIZE]) -> Result<Self, BitmapError> {
        let header = Self::decode_fields(bytes);
        header.validate()?;
        Ok(header)
    }

    fn decode_fields(b: &[u8; HEADER_SIZE]) -> Self {
        let u16_at = |off: usize| u16::from_le_bytes([b[off], b[off + 1]]);
        let u32_at = |off: usize| u32::from_le_bytes([b[off], b[off + 1], b[off + 2], b[off + 3]]);
        let i32_at = |off: usize| i32::from_le_bytes([b[off], b[off + 1], b[off + 2], b[off + 3]]);

        // File header (14 bytes): magic, file size, 2x reserved u16, data offset
        // Info header (40 bytes) starts at 14
        Self {
            signature: [b[0], b[1]],
            file_size: u32_at(2),
            pixel_data_offset: u32_at(10),
            info_header_size: u32_at(14),
            width: i32_at(18),
            height: i32_at(22),
            planes: u16_at(26),
            bits_per_pixel: u16_at(28),
            compression: u32_at(30),
            image_size: u32_at(34),
            x_pixels_per_meter: i32_at(38),
            y_pixels_per_meter: i32_at(42),
            colors_used: u32_at(46),
            colors_important: u32_at(50),
        }
    }

    fn validate(&self) -> Result<(), BitmapError> {
        if self.signature != *b"BM" {
            return Err(BitmapError::InvalidFormat(format!(
                "not a bitmap file: expected signature 42 4D (\"BM\"), found {:02X} {:02X}",
                self.signature[0], self.signature[1]
            )));
        }
        if self.bits_per_pixel != 1 {
            return Err(BitmapError::UnsupportedFormat(format!(
                "not 1-bit-per-pixel: bit depth is {}",
                self.bits_per_pixel
            )));
        }
        if self.compression != 0 {
            return Err(BitmapError::UnsupportedFormat(format!(
                "compression not supported: compression code {}",
                self.compression
            )));
        }
        Ok(())
    }

    /// Pixel width (absolute value of the stored width).
    pub fn abs_width(&self) -> u32 {
        self.width.unsigned_abs()
    }

    /// Row count (absolute value of the stored height).
    pub fn abs_height(&self) -> u32 {
        self.height.unsigned_abs()
    }

    /// Whether the first stored row is the visual bottom row.
    pub fn is_bottom_up(&self) -> bool {
        self.height > 0
    }

    /// Bytes occupied by one stored row, padded to a 4-byte boundary.
    pub fn row_stride(&self) -> usize {
        (self.abs_width() as usize).div_ceil(32) * 4
    }

    /// Bytes emitted per output row: one per group of up to 8 pixels.
    pub fn packed_row_len(&self) -> usize {
        (self.abs_width() as usize).div_ceil(8)
    }
}

/// Read and validate the 54 header bytes from a source positioned at offset 0.
///
/// Advances the reader by exactly [`HEADER_SIZE`] bytes on success.
pub fn read_header<R: Read>(reader: &mut R) -> Result<BmpHeader, BitmapError> {
    let mut bytes = [0u8; HEADER_SIZE];
    let available = read_fully(reader, &mut bytes)?;
    if available < HEADER_SIZE {
        return Err(BitmapError::TruncatedInput {
            offset: 0,
            needed: HEADER_SIZE,
            available,
        });
    }
    let header = BmpHeader::parse(&bytes)?;
    debug!(
        "BMP {}x{} ({}), data at {}, row stride {}, colors used {}",
        header.abs_width(),
        header.abs_height(),
        if header.is_bottom_up() { "bottom-up" } else { "top-down" },
        header.pixel_data_offset,
        header.row_stride(),
        header.colors_used
    );
    Ok(header)
}
