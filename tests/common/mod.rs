//! Synthetic 1bpp BMP builder for tests.

#![allow(dead_code)]

/// Description of a BMP to synthesize. `rows` are in *stored* order and are
/// padded to the 4-byte stride by [`MonoBmp::encode`].
#[derive(Clone, Debug)]
pub struct MonoBmp {
    pub signature: [u8; 2],
    pub width: i32,
    pub height: i32,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub colors_used: u32,
    /// Raw 4-byte entries (b, g, r, reserved) written before the pixel data.
    pub palette: Vec<[u8; 4]>,
    pub rows: Vec<Vec<u8>>,
    /// Byte used for stride padding.
    pub pad: u8,
}

impl MonoBmp {
    pub fn new(width: i32, height: i32, rows: Vec<Vec<u8>>) -> Self {
        Self {
            signature: *b"BM",
            width,
            height,
            bits_per_pixel: 1,
            compression: 0,
            colors_used: 0,
            palette: Vec::new(),
            rows,
            pad: 0,
        }
    }

    /// Every pixel set, padding included.
    pub fn filled(width: i32, height: i32) -> Self {
        let stride = stride(width);
        let rows = vec![vec![0xFF; stride]; height.unsigned_abs() as usize];
        let mut bmp = Self::new(width, height, rows);
        bmp.pad = 0xFF;
        bmp
    }

    pub fn with_palette(mut self, entries: [[u8; 4]; 2]) -> Self {
        self.colors_used = 2;
        self.palette = entries.to_vec();
        self
    }

    pub fn pixel_data_offset(&self) -> u32 {
        (54 + self.palette.len() * 4) as u32
    }

    pub fn encode(&self) -> Vec<u8> {
        let stride = stride(self.width);
        let pixel_data_size = stride * self.rows.len();
        let offset = self.pixel_data_offset();
        let file_size = offset as usize + pixel_data_size;

        let mut out = Vec::with_capacity(file_size);
        // File header (14 bytes)
        out.extend_from_slice(&self.signature);
        out.extend_from_slice(&(file_size as u32).to_le_bytes());
        out.extend_from_slice(&[0u8; 4]); // reserved
        out.extend_from_slice(&offset.to_le_bytes());

        // BITMAPINFOHEADER (40 bytes)
        out.extend_from_slice(&40u32.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes()); // planes
        out.extend_from_slice(&self.bits_per_pixel.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&(pixel_data_size as u32).to_le_bytes());
        out.extend_from_slice(&2835u32.to_le_bytes()); // 72 DPI
        out.extend_from_slice(&2835u32.to_le_bytes());
        out.extend_from_slice(&self.colors_used.to_le_bytes());
        out.extend_from_slice(&self.colors_used.to_le_bytes());

        for entry in &self.palette {
            out.extend_from_slice(entry);
        }

        for row in &self.rows {
            let mut padded = row.clone();
            padded.resize(stride, self.pad);
            padded.truncate(stride);
            out.extend_from_slice(&padded);
        }
        out
    }
}

pub fn stride(width: i32) -> usize {
    (width.unsigned_abs() as usize).div_ceil(32) * 4
}
