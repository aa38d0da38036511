use enough::StopReason;

/// Errors from reading a 1bpp BMP and converting it to source text.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("truncated input at offset {offset}: need {needed} bytes, got {available}")]
    TruncatedInput {
        offset: u64,
        needed: usize,
        available: usize,
    },

    #[error("invalid format: {0}")]
    InvalidFormat(String),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("allocation of {bytes} bytes failed")]
    Allocation { bytes: usize },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("invalid symbol name {0:?}: must be a C identifier")]
    InvalidName(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}
