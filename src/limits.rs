use crate::bmp::header::BmpHeader;
use crate::error::BitmapError;

/// Caps on what a single conversion may accept, applied to the parsed header
/// before any row is read.
///
/// Every cap defaults to `None` (unbounded). Dimensions are compared as
/// absolute values, so a top-down image is held to the same height cap.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    /// Widest image in pixels.
    pub max_width: Option<u64>,
    /// Tallest image in rows.
    pub max_height: Option<u64>,
    /// Largest `width * height`.
    pub max_pixels: Option<u64>,
    /// Largest packed output plus one source row buffer, in bytes.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Reject a header whose geometry or working memory exceeds a cap.
    pub(crate) fn check_header(&self, header: &BmpHeader) -> Result<(), BitmapError> {
        let width = header.abs_width();
        let height = header.abs_height();
        exceeds("width", u64::from(width), self.max_width)?;
        exceeds("height", u64::from(height), self.max_height)?;
        exceeds(
            "pixel count",
            u64::from(width) * u64::from(height),
            self.max_pixels,
        )?;

        if let Some(max_mem) = self.max_memory_bytes {
            let needed = header
                .packed_row_len()
                .checked_mul(height as usize)
                .and_then(|n| n.checked_add(header.row_stride()))
                .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
            exceeds("working memory (bytes)", needed as u64, Some(max_mem))?;
        }
        Ok(())
    }
}

fn exceeds(what: &str, value: u64, cap: Option<u64>) -> Result<(), BitmapError> {
    match cap {
        Some(cap) if value > cap => Err(BitmapError::LimitExceeded(format!(
            "{what} {value} exceeds limit {cap}"
        ))),
        _ => Ok(()),
    }
}
