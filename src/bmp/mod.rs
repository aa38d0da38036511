//! 1bpp BMP reading: header parsing, scanline packing, palette extraction.

pub mod header;
pub mod pack;
pub mod palette;

use std::io::{self, Read, Seek, SeekFrom};

use crate::error::BitmapError;

/// Read until `buf` is full or the source is exhausted. Returns bytes read.
pub(crate) fn read_fully<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Fill `buf` from absolute `offset`, or fail with `TruncatedInput`.
pub(crate) fn read_at<R: Read + Seek + ?Sized>(
    reader: &mut R,
    offset: u64,
    buf: &mut [u8],
) -> Result<(), BitmapError> {
    reader.seek(SeekFrom::Start(offset))?;
    let available = read_fully(reader, buf)?;
    if available < buf.len() {
        return Err(BitmapError::TruncatedInput {
            offset,
            needed: buf.len(),
            available,
        });
    }
    Ok(())
}
