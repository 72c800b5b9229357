//! Parsing of the 512-byte SGI image file header.

use relic_common::byte::Reader;
use relic_common::{DecodeError, FormatError, Result, UnsupportedError, bail};

/// The magic number at the start of every SGI file.
pub(crate) const MAGIC: u16 = 0x01da;

/// The size of the header. Pixel data or the scanline table starts right after.
pub const HEADER_SIZE: usize = 512;

/// How the pixel data is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    /// Uncompressed scanlines.
    Verbatim,
    /// Run-length encoded scanlines, located through a scanline table.
    Rle,
}

/// How the pixel values are to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Regular grayscale or RGB(A) values.
    Normal,
    /// Obsolete 8-bit dithered RGB.
    Dithered,
    /// Obsolete indices into a hardware color map.
    Screen,
    /// A color map, not an image.
    Colormap,
    /// Any other value.
    Unknown(u32),
}

impl From<u32> for ColorMode {
    fn from(value: u32) -> Self {
        match value {
            0 => Self::Normal,
            1 => Self::Dithered,
            2 => Self::Screen,
            3 => Self::Colormap,
            n => Self::Unknown(n),
        }
    }
}

/// The dimensions and sample format of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// The width in pixels.
    pub width: u32,
    /// The height in pixels.
    pub height: u32,
    /// The number of channels. Channels are interpreted as gray, gray and
    /// alpha, RGB and RGBA, depending on their number.
    pub channels: u32,
    /// The number of bytes per sample, either 1 or 2.
    pub bytes_per_channel: u8,
}

impl Layout {
    /// Check that the layout describes a non-empty image and return the total
    /// number of samples.
    pub(crate) fn num_samples(&self) -> Result<usize> {
        if self.width == 0 || self.height == 0 || self.channels == 0 {
            bail!(FormatError::InvalidDimensions);
        }

        if !matches!(self.bytes_per_channel, 1 | 2) {
            bail!(UnsupportedError::BitDepth);
        }

        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|n| n.checked_mul(self.channels as usize))
            .ok_or(DecodeError::Overflow)
    }

    /// The number of bytes in a scanline of a single channel.
    pub(crate) fn row_len(&self) -> Result<usize> {
        (self.width as usize)
            .checked_mul(self.bytes_per_channel as usize)
            .ok_or(DecodeError::Overflow)
    }

    /// The number of scanlines, counting each channel separately.
    #[inline]
    pub(crate) fn num_scanlines(&self) -> usize {
        self.height as usize * self.channels as usize
    }
}

/// A parsed SGI header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// How the pixel data is stored.
    pub storage: Storage,
    /// The dimensions and sample format.
    pub layout: Layout,
    /// The image name, without the trailing NUL bytes.
    pub name: Vec<u8>,
    /// How the pixel values are to be interpreted.
    pub color_mode: ColorMode,
}

impl Header {
    /// Parse the header at the start of `data`.
    pub fn read(data: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(data);

        if reader.read_u16()? != MAGIC {
            bail!(FormatError::InvalidMagic);
        }

        let storage = match reader.read_byte()? {
            0 => Storage::Verbatim,
            1 => Storage::Rle,
            _ => bail!(UnsupportedError::Storage),
        };

        let bytes_per_channel = reader.read_byte()?;

        if !matches!(bytes_per_channel, 1 | 2) {
            bail!(UnsupportedError::BitDepth);
        }

        let dimension = reader.read_u16()?;
        let x_size = reader.read_u16()?;
        let y_size = reader.read_u16()?;
        let z_size = reader.read_u16()?;

        // The size of unused dimensions is not reliable.
        let (height, channels) = match dimension {
            1 => (1, 1),
            2 => (y_size, 1),
            3 => (y_size, z_size),
            _ => bail!(UnsupportedError::Dimension),
        };

        // Minimum and maximum pixel value, then four reserved bytes.
        reader.skip_bytes(12)?;

        let name = reader.read_bytes(80)?;
        let name_len = name.iter().position(|b| *b == 0).unwrap_or(name.len());

        let color_mode = ColorMode::from(reader.read_u32()?);

        // Reserved, but must be present.
        if data.len() < HEADER_SIZE {
            bail!(FormatError::InvalidHeader);
        }

        Ok(Self {
            storage,
            layout: Layout {
                width: x_size as u32,
                height: height as u32,
                channels: channels as u32,
                bytes_per_channel,
            },
            name: name[..name_len].to_vec(),
            color_mode,
        })
    }
}
