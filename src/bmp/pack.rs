//! Scanline packing: stored 1bpp rows -> one output byte per 8 pixels.

use std::io::{Read, Seek};

use enough::Stop;
use log::trace;

use super::header::BmpHeader;
use super::read_at;
use crate::error::BitmapError;

/// Which bit of an output byte holds the leftmost of its 8 pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BitOrder {
    /// Leftmost pixel in bit 7 (the BMP's own order).
    #[default]
    MsbFirst,
    /// Leftmost pixel in bit 0.
    LsbFirst,
}

impl BitOrder {
    /// Human-readable label, e.g. for a generated-file comment.
    pub fn label(self) -> &'static str {
        match self {
            Self::MsbFirst => "MSB first",
            Self::LsbFirst => "LSB first",
        }
    }

    /// Mask keeping the first `valid` pixel positions (1..=7) in this order.
    fn leading_mask(self, valid: usize) -> u8 {
        match self {
            Self::MsbFirst => !(0xFF_u8 >> valid),
            Self::LsbFirst => !(0xFF_u8 << valid),
        }
    }
}

/// Re-pack one stored byte holding `valid` meaningful pixels (1..=8).
///
/// The byte is bit-reversed first for [`BitOrder::LsbFirst`], then the
/// positions past `valid` are cleared in the resulting order: the low bits
/// for MSB-first, the high bits for LSB-first.
pub fn pack_byte(raw: u8, valid: usize, order: BitOrder) -> u8 {
    let byte = match order {
        BitOrder::MsbFirst => raw,
        BitOrder::LsbFirst => raw.reverse_bits(),
    };
    if valid >= 8 {
        byte
    } else {
        byte & order.leading_mask(valid)
    }
}

/// Pack one stored row (at least `ceil(width / 8)` bytes) onto `out`.
pub(crate) fn pack_row(
    row: &[u8],
    width: u32,
    order: BitOrder,
    out: &mut Vec<u8>,
) -> Result<(), BitmapError> {
    let width = width as usize;
    let row_len = width.div_ceil(8);
    let src = row.get(..row_len).ok_or_else(|| {
        BitmapError::InvalidFormat(format!(
            "row of {} bytes cannot hold {width} pixels",
            row.len()
        ))
    })?;
    for (i, &raw) in src.iter().enumerate() {
        let remaining = width - i * 8;
        out.push(pack_byte(raw, remaining.min(8), order));
    }
    Ok(())
}

/// Packed output rows, visual top row first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedImage {
    pub width: u32,
    pub height: u32,
    /// Bytes per output row, `ceil(width / 8)`.
    pub row_len: usize,
    data: Vec<u8>,
}

impl PackedImage {
    /// All packed bytes, rows back to back.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Iterate over output rows. Yields nothing when width or height is zero.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks(self.row_len.max(1))
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Read every stored row of a validated header and pack it.
///
/// Rows are visited in visual order; for bottom-up images the last stored
/// row comes first. Each row is read from
/// `pixel_data_offset + stored_index * row_stride` into one reused buffer.
/// `stop` is checked before every row.
pub fn pack_rows<R: Read + Seek>(
    reader: &mut R,
    header: &BmpHeader,
    order: BitOrder,
    stop: &dyn Stop,
) -> Result<PackedImage, BitmapError> {
    let width = header.abs_width();
    let height = header.abs_height();
    let stride = header.row_stride();
    let row_len = header.packed_row_len();
    let total = row_len
        .checked_mul(height as usize)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;

    // Grown per row actually read, never sized from the header alone.
    let mut data = Vec::new();

    if total == 0 {
        return Ok(PackedImage {
            width,
            height,
            row_len,
            data,
        });
    }

    let mut row = Vec::new();
    row.try_reserve_exact(stride)
        .map_err(|_| BitmapError::Allocation { bytes: stride })?;
    row.resize(stride, 0);

    let base = u64::from(header.pixel_data_offset);
    for visual in 0..height {
        stop.check()?;
        let stored = if header.is_bottom_up() {
            height - 1 - visual
        } else {
            visual
        };
        let offset = base + u64::from(stored) * stride as u64;
        read_at(reader, offset, &mut row)?;
        data.try_reserve(row_len).map_err(|_| BitmapError::Allocation {
            bytes: data.len() + row_len,
        })?;
        pack_row(&row, width, order, &mut data)?;
        trace!("row {visual} <- stored row {stored} at offset {offset}");
    }

    Ok(PackedImage {
        width,
        height,
        row_len,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bmp::header::HEADER_SIZE;
    use enough::StopReason;
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Allows `budget` checks, then reports cancellation.
    struct CountingStop {
        checks: AtomicUsize,
        budget: usize,
    }

    impl Stop for CountingStop {
        fn check(&self) -> Result<(), StopReason> {
            if self.checks.fetch_add(1, Ordering::SeqCst) < self.budget {
                Ok(())
            } else {
                Err(StopReason::Cancelled)
            }
        }
    }

    /// Header plus `stored_rows` rows of 0xFF, whatever `height` claims.
    fn mono(width: i32, height: i32, stored_rows: usize) -> (BmpHeader, Vec<u8>) {
        let stride = (width.unsigned_abs() as usize).div_ceil(32) * 4;
        let mut raw = [0u8; HEADER_SIZE];
        raw[0..2].copy_from_slice(b"BM");
        raw[10..14].copy_from_slice(&(HEADER_SIZE as u32).to_le_bytes());
        raw[14..18].copy_from_slice(&40u32.to_le_bytes());
        raw[18..22].copy_from_slice(&width.to_le_bytes());
        raw[22..26].copy_from_slice(&height.to_le_bytes());
        raw[28..30].copy_from_slice(&1u16.to_le_bytes());
        let header = BmpHeader::parse(&raw).unwrap();
        let mut data = raw.to_vec();
        data.resize(HEADER_SIZE + stride * stored_rows, 0xFF);
        (header, data)
    }

    #[test]
    fn stop_is_checked_before_every_row() {
        let (header, data) = mono(8, -5, 5);
        let stop = CountingStop {
            checks: AtomicUsize::new(0),
            budget: usize::MAX,
        };
        pack_rows(&mut Cursor::new(&data), &header, BitOrder::MsbFirst, &stop).unwrap();
        assert_eq!(stop.checks.load(Ordering::SeqCst), 5);

        let stop = CountingStop {
            checks: AtomicUsize::new(0),
            budget: 2,
        };
        let err = pack_rows(&mut Cursor::new(&data), &header, BitOrder::MsbFirst, &stop)
            .unwrap_err();
        assert!(matches!(err, BitmapError::Cancelled(_)));
        assert_eq!(stop.checks.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn huge_claimed_height_fails_on_missing_rows() {
        // Header claims i32::MAX rows, file carries two
        let (header, data) = mono(32, -i32::MAX, 2);
        let err = pack_rows(
            &mut Cursor::new(&data),
            &header,
            BitOrder::MsbFirst,
            &enough::Unstoppable,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            BitmapError::TruncatedInput {
                offset: 62,
                needed: 4,
                available: 0
            }
        ));
    }

    #[test]
    fn full_bytes_pass_through_or_reverse() {
        assert_eq!(pack_byte(0b1000_0001, 8, BitOrder::MsbFirst), 0b1000_0001);
        assert_eq!(pack_byte(0b1100_1010, 8, BitOrder::MsbFirst), 0b1100_1010);
        assert_eq!(pack_byte(0b1100_1010, 8, BitOrder::LsbFirst), 0b0101_0011);
        assert_eq!(pack_byte(0x01, 8, BitOrder::LsbFirst), 0x80);
    }

    #[test]
    fn partial_byte_masks_trailing_pixels() {
        // 2 valid pixels
        assert_eq!(pack_byte(0xFF, 2, BitOrder::MsbFirst), 0xC0);
        assert_eq!(pack_byte(0xFF, 2, BitOrder::LsbFirst), 0x03);
        // 6 valid pixels
        assert_eq!(pack_byte(0xFF, 6, BitOrder::MsbFirst), 0xFC);
        assert_eq!(pack_byte(0xFF, 6, BitOrder::LsbFirst), 0x3F);
        // only leading pixel set, 1 valid
        assert_eq!(pack_byte(0x80, 1, BitOrder::MsbFirst), 0x80);
        assert_eq!(pack_byte(0x80, 1, BitOrder::LsbFirst), 0x01);
        // padding garbage never survives
        assert_eq!(pack_byte(0x1F, 3, BitOrder::MsbFirst), 0x00);
        assert_eq!(pack_byte(0x1F, 3, BitOrder::LsbFirst), 0x00);
    }

    #[test]
    fn pack_row_masks_only_the_last_byte() {
        let mut out = Vec::new();
        pack_row(&[0xFF, 0xFF, 0xFF, 0xFF], 10, BitOrder::MsbFirst, &mut out).unwrap();
        assert_eq!(out, [0xFF, 0xC0]);

        out.clear();
        pack_row(&[0x0F, 0xF0, 0xAA, 0x00], 17, BitOrder::MsbFirst, &mut out).unwrap();
        assert_eq!(out, [0x0F, 0xF0, 0x80]);

        out.clear();
        pack_row(&[0x0F, 0xF0, 0xAA, 0x00], 17, BitOrder::LsbFirst, &mut out).unwrap();
        assert_eq!(out, [0xF0, 0x0F, 0x01]);
    }

    #[test]
    fn pack_row_rejects_short_buffer() {
        let mut out = Vec::new();
        let err = pack_row(&[0xFF], 9, BitOrder::MsbFirst, &mut out).unwrap_err();
        assert!(matches!(err, BitmapError::InvalidFormat(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn labels() {
        assert_eq!(BitOrder::default(), BitOrder::MsbFirst);
        assert_eq!(BitOrder::MsbFirst.label(), "MSB first");
        assert_eq!(BitOrder::LsbFirst.label(), "LSB first");
    }
}
