/*!
A memory-safe, pure-Rust decoder for run-length encoded BMP pixel data.

Windows BMP files may compress 8-bit and 4-bit palette indices with a simple
run-length scheme (`BI_RLE8` and `BI_RLE4`). This crate decodes such pixel
data into uncompressed rows, each padded to a multiple of 4 bytes like in an
uncompressed BMP file. Rows are produced in the order they are stored, which
for regular BMP files is bottom-up.

Parsing the file and info headers and resolving the palette is left to the
caller.

# Example
```rust,no_run
use relic_bmp::{Compression, decode};

let data = std::fs::read("pixels.rle").unwrap();
let pixels = decode(&data, Compression::Rle8, 640, 480).unwrap();
println!("decoded {} bytes", pixels.len());
```

For decoding into a caller-provided buffer one chunk of rows at a time, see
[`RleDecoder`].

# Safety
This crate forbids unsafe code via a crate-level attribute.
*/

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod rle;

use relic_common::{UnsupportedError, bail, ldebug};

pub use relic_common::byte::Reader;
pub use relic_common::{DecodeError, ErrorKind, Result};
pub use rle::RleDecoder;

/// The run-length compression of the pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// 8 bits per pixel (`BI_RLE8`).
    Rle8,
    /// 4 bits per pixel (`BI_RLE4`).
    Rle4,
}

impl Compression {
    /// The number of bits per pixel.
    pub fn bits_per_pixel(self) -> u8 {
        match self {
            Self::Rle8 => 8,
            Self::Rle4 => 4,
        }
    }
}

impl TryFrom<u32> for Compression {
    type Error = DecodeError;

    /// Convert the value of the `biCompression` field of the info header.
    fn try_from(value: u32) -> Result<Self> {
        match value {
            1 => Ok(Self::Rle8),
            2 => Ok(Self::Rle4),
            _ => bail!(UnsupportedError::Storage),
        }
    }
}

/// Decode run-length encoded pixel data of an image with the given dimensions.
///
/// Returns `height` rows of [`RleDecoder::stride`] bytes each. Rows after the
/// end of the bitmap are left as zeros.
pub fn decode(data: &[u8], compression: Compression, width: u32, height: u32) -> Result<Vec<u8>> {
    let mut decoder = RleDecoder::new(compression, width)?;
    let size = decoder
        .stride()
        .checked_mul(height as usize)
        .ok_or(DecodeError::Overflow)?;

    let mut pixels = vec![0; size];
    let mut reader = Reader::new(data);
    let written = decoder.decode(&mut reader, &mut pixels)?;

    ldebug!(
        "decoded {} of {height} rows of {compression:?} data",
        written / decoder.stride()
    );

    Ok(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use relic_common::FormatError;

    #[test]
    fn compression_field() {
        assert_eq!(Compression::try_from(1), Ok(Compression::Rle8));
        assert_eq!(Compression::try_from(2), Ok(Compression::Rle4));
        assert_eq!(
            Compression::try_from(0),
            Err(DecodeError::Unsupported(UnsupportedError::Storage))
        );
    }

    #[test]
    fn rows_after_end_of_bitmap_are_zero() {
        let pixels = decode(&[0x03, 0x09, 0x00, 0x01], Compression::Rle8, 3, 3).unwrap();

        assert_eq!(pixels.len(), 12);
        assert_eq!(&pixels[..4], &[0x09, 0x09, 0x09, 0x00]);
        assert!(pixels[4..].iter().all(|p| *p == 0));
    }

    #[test]
    fn excess_rows_are_ignored() {
        // Three rows of data, but the image only has two.
        let data = [0x02, 0x01, 0x00, 0x00, 0x02, 0x02, 0x00, 0x00, 0x02, 0x03, 0x00, 0x01];
        let pixels = decode(&data, Compression::Rle4, 4, 2).unwrap();

        assert_eq!(pixels, vec![0x01, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn zero_width() {
        assert_eq!(
            decode(&[], Compression::Rle8, 0, 1),
            Err(DecodeError::Format(FormatError::InvalidDimensions))
        );
    }
}
