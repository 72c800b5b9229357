//! Decoding of flat and run-length encoded scanlines.

use relic_common::byte::Reader;
use relic_common::{Result, RleError, bail};

/// Scanlines narrower than this are always stored flat.
const MIN_RLE_WIDTH: usize = 8;
/// Scanlines wider than this are always stored flat.
const MAX_RLE_WIDTH: usize = 0x7fff;

/// Read a single scanline of RGBE pixels into `scanline`.
///
/// The width of the scanline is `scanline.len() / 4`. Depending on its width
/// and its first four bytes, the scanline is either stored as plain RGBE
/// pixels or as four run-length encoded planes, one for each component.
pub fn read_scanline(reader: &mut Reader<'_>, scanline: &mut [u8]) -> Result<()> {
    let width = scanline.len() / 4;

    if !(MIN_RLE_WIDTH..=MAX_RLE_WIDTH).contains(&width) {
        return read_flat(reader, scanline);
    }

    let head = reader.read_array::<4>()?;

    if head[0] != 2 || head[1] != 2 || head[2] & 0x80 != 0 {
        // Not run-length encoded, the bytes are the first pixel.
        scanline[..4].copy_from_slice(&head);
        return read_flat(reader, &mut scanline[4..]);
    }

    if u16::from_be_bytes([head[2], head[3]]) as usize != width {
        bail!(RleError::WrongScanlineWidth);
    }

    for plane in 0..4 {
        read_plane(reader, scanline, plane, width)?;
    }

    Ok(())
}

/// The smallest number of bytes a scanline of the given width can take up.
///
/// A run covers at most 127 pixels of a plane and takes up two bytes.
pub(crate) fn min_scanline_len(width: usize) -> usize {
    if (MIN_RLE_WIDTH..=MAX_RLE_WIDTH).contains(&width) {
        4 + 4 * 2 * width.div_ceil(127)
    } else {
        width.saturating_mul(4)
    }
}

fn read_flat(reader: &mut Reader<'_>, scanline: &mut [u8]) -> Result<()> {
    scanline.copy_from_slice(reader.read_bytes(scanline.len())?);

    Ok(())
}

fn read_plane(reader: &mut Reader<'_>, scanline: &mut [u8], plane: usize, width: usize) -> Result<()> {
    let mut x = 0;

    while x < width {
        let control = reader.read_byte()?;

        let count = if control > 128 {
            control as usize - 128
        } else {
            control as usize
        };

        if count == 0 || count > width - x {
            bail!(RleError::InvalidRunLength);
        }

        let pixels = scanline[x * 4..(x + count) * 4].chunks_exact_mut(4);

        if control > 128 {
            let value = reader.read_byte()?;

            for pixel in pixels {
                pixel[plane] = value;
            }
        } else {
            let values = reader.read_bytes(count)?;

            for (pixel, value) in pixels.zip(values) {
                pixel[plane] = *value;
            }
        }

        x += count;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use relic_common::{DecodeError, ParseError};

    fn read(data: &[u8], width: usize) -> Result<Vec<u8>> {
        let mut scanline = vec![0; width * 4];
        read_scanline(&mut Reader::new(data), &mut scanline)?;

        Ok(scanline)
    }

    #[test]
    fn narrow_scanlines_are_flat() {
        // Even if they look like they are run-length encoded.
        let data = [2, 2, 0, 2, 5, 6, 7, 8];
        assert_eq!(read(&data, 2), Ok(data.to_vec()));
    }

    #[test]
    fn flat_scanline() {
        let data = (0..32).collect::<Vec<u8>>();
        assert_eq!(read(&data, 8), Ok(data.clone()));

        // A set high bit in the width rules out run-length encoding.
        let mut data = data;
        data[..4].copy_from_slice(&[2, 2, 0x80, 8]);
        assert_eq!(read(&data, 8), Ok(data.clone()));
    }

    #[test]
    fn run_length_encoded_scanline() {
        let data = [
            2, 2, 0, 8, // head
            136, 10, // R: 8 x 10
            2, 1, 2, 134, 3, // G: 1, 2, then 6 x 3
            8, 1, 2, 3, 4, 5, 6, 7, 8, // B: literals
            136, 0x80, // E: 8 x 0x80
        ];

        let scanline = read(&data, 8).unwrap();

        for (x, pixel) in scanline.chunks_exact(4).enumerate() {
            let g = if x < 2 { x as u8 + 1 } else { 3 };
            assert_eq!(pixel, [10, g, x as u8 + 1, 0x80], "pixel {x}");
        }
    }

    #[test]
    fn wrong_width() {
        let data = [2, 2, 0, 9, 136, 1];
        assert_eq!(
            read(&data, 8),
            Err(DecodeError::Rle(RleError::WrongScanlineWidth))
        );
    }

    #[test]
    fn invalid_run_lengths() {
        // Zero count.
        assert_eq!(
            read(&[2, 2, 0, 8, 0, 1], 8),
            Err(DecodeError::Rle(RleError::InvalidRunLength))
        );
        // Run exceeding the plane.
        assert_eq!(
            read(&[2, 2, 0, 8, 137, 1], 8),
            Err(DecodeError::Rle(RleError::InvalidRunLength))
        );
        // Literals exceeding the plane.
        assert_eq!(
            read(&[2, 2, 0, 8, 4, 1, 2, 3, 4, 5, 1, 2, 3, 4, 5], 8),
            Err(DecodeError::Rle(RleError::InvalidRunLength))
        );
    }

    #[test]
    fn minimum_lengths() {
        assert_eq!(min_scanline_len(1), 4);
        assert_eq!(min_scanline_len(7), 28);
        assert_eq!(min_scanline_len(8), 12);
        assert_eq!(min_scanline_len(127), 12);
        assert_eq!(min_scanline_len(128), 20);
        assert_eq!(min_scanline_len(0x7fff), 4 + 8 * 259);
        assert_eq!(min_scanline_len(0x8000), 0x20000);
    }

    #[test]
    fn truncated() {
        assert_eq!(
            read(&[2, 2, 0, 8, 136, 1, 136], 8),
            Err(DecodeError::Parse(ParseError::UnexpectedEof))
        );
        assert_eq!(
            read(&[1, 2, 3], 2),
            Err(DecodeError::Parse(ParseError::UnexpectedEof))
        );
    }
}
