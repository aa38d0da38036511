use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use enough::Stop;

use crate::bmp::header::{BmpHeader, read_header};
use crate::bmp::pack::{BitOrder, PackedImage, pack_rows};
use crate::bmp::palette::{PaletteEntry, read_palette};
use crate::error::BitmapError;
use crate::limits::Limits;

/// What to produce from a bitmap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub bit_order: BitOrder,
    pub include_palette: bool,
}

/// Builder for one conversion run.
///
/// ```no_run
/// use zenbmp2c::{ConvertRequest, Options, Unstoppable};
///
/// let data: &[u8] = &[]; // your 1bpp BMP bytes
/// let conversion = ConvertRequest::new(Options::default()).convert_bytes(data, Unstoppable)?;
/// println!("{}x{}", conversion.width(), conversion.height());
/// # Ok::<(), zenbmp2c::BitmapError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct ConvertRequest<'a> {
    options: Options,
    limits: Option<&'a Limits>,
}

impl<'a> ConvertRequest<'a> {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            limits: None,
        }
    }

    /// Enforce resource limits before anything is allocated.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Run the whole pipeline against a seekable source positioned at offset 0:
    /// header, every row, then the palette if requested.
    pub fn convert<R: Read + Seek>(
        &self,
        reader: &mut R,
        stop: impl Stop,
    ) -> Result<Conversion, BitmapError> {
        let header = read_header(reader)?;
        if let Some(limits) = self.limits {
            limits.check_header(&header)?;
        }

        let image = pack_rows(reader, &header, self.options.bit_order, &stop)?;
        let palette = if self.options.include_palette {
            Some(read_palette(reader, &header)?)
        } else {
            None
        };

        Ok(Conversion {
            header,
            options: self.options,
            image,
            palette,
        })
    }

    /// Convert an in-memory BMP.
    pub fn convert_bytes(&self, data: &[u8], stop: impl Stop) -> Result<Conversion, BitmapError> {
        self.convert(&mut Cursor::new(data), stop)
    }

    /// Open and convert a BMP file. The handle is closed on every exit path.
    pub fn convert_file(
        &self,
        path: impl AsRef<Path>,
        stop: impl Stop,
    ) -> Result<Conversion, BitmapError> {
        let mut reader = BufReader::new(File::open(path)?);
        self.convert(&mut reader, stop)
    }
}

/// Result of a completed conversion: header, packed rows and optional palette.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conversion {
    header: BmpHeader,
    options: Options,
    image: PackedImage,
    palette: Option<[PaletteEntry; 2]>,
}

impl Conversion {
    pub fn header(&self) -> &BmpHeader {
        &self.header
    }

    pub fn options(&self) -> Options {
        self.options
    }

    pub fn image(&self) -> &PackedImage {
        &self.image
    }

    /// Present only when [`Options::include_palette`] was set.
    pub fn palette(&self) -> Option<&[PaletteEntry; 2]> {
        self.palette.as_ref()
    }

    pub fn width(&self) -> u32 {
        self.image.width
    }

    pub fn height(&self) -> u32 {
        self.image.height
    }
}
