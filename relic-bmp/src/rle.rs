//! The RLE4/RLE8 state machine.

use crate::Compression;
use relic_common::byte::Reader;
use relic_common::{DecodeError, FormatError, Result, RleError, bail, lwarn};

/// A decoder for RLE4 or RLE8 compressed pixel data.
///
/// The decoder produces one row at a time. Rows that are skipped with a delta
/// escape are emitted as zeros.
#[derive(Debug, Clone)]
pub struct RleDecoder {
    compression: Compression,
    /// The number of pixels that fit into a row, including the padding.
    row_width: usize,
    /// The current row, padded to a multiple of 4 bytes.
    row: Vec<u8>,
    /// The position of the next pixel in the encoded data.
    src_x: usize,
    /// The row the encoded data is currently at, `None` once the end of the
    /// bitmap was reached.
    src_y: Option<usize>,
    /// The row that will be emitted next.
    dst_y: usize,
}

/// What to do after the current row is complete.
#[derive(Debug, Clone, Copy)]
struct Delta {
    x: usize,
    y: usize,
}

impl RleDecoder {
    /// Create a new decoder for an image with the given width in pixels.
    pub fn new(compression: Compression, width: u32) -> Result<Self> {
        if width == 0 {
            bail!(FormatError::InvalidDimensions);
        }

        let stride = stride(compression, width)?;

        Ok(Self {
            compression,
            row_width: stride * 8 / compression.bits_per_pixel() as usize,
            row: vec![0; stride],
            src_x: 0,
            src_y: Some(0),
            dst_y: 0,
        })
    }

    /// The number of bytes of a single row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.row.len()
    }

    /// Whether the end of the bitmap was reached.
    ///
    /// The row containing the end-of-bitmap escape may not have been emitted
    /// yet.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.src_y.is_none()
    }

    /// Decode as many complete rows as fit into `buf`.
    ///
    /// Returns the number of bytes written, which is always a multiple of the
    /// stride. A subsequent call continues where the previous one stopped.
    pub fn decode(&mut self, reader: &mut Reader<'_>, buf: &mut [u8]) -> Result<usize> {
        let stride = self.stride();
        let mut written = 0;

        while buf.len() - written >= stride {
            let Some(src_y) = self.src_y else {
                break;
            };

            if src_y == self.dst_y {
                self.decode_row(reader)?;
            }

            buf[written..written + stride].copy_from_slice(&self.row);
            written += stride;
            self.dst_y += 1;

            // Rows skipped by a delta are emitted as zeros.
            if self.src_y.is_some_and(|y| y > self.dst_y) {
                self.row.fill(0);
            }
        }

        Ok(written)
    }

    fn decode_row(&mut self, reader: &mut Reader<'_>) -> Result<()> {
        self.row.fill(0);

        let mut delta = None;

        while let Some(src_y) = self.src_y {
            let Ok(count) = reader.read_byte() else {
                lwarn!("RLE data ended without end of bitmap marker in row {src_y}");

                self.src_x = self.row_width;
                self.src_y = None;
                break;
            };
            let value = reader.read_byte()?;

            if count == 0 {
                match value {
                    // End of line. Some files have an end of line right after
                    // a row that was completed implicitly, which is ignored.
                    0 => {
                        if self.src_x != 0 {
                            self.src_x = self.row_width;
                        }
                    }
                    // End of bitmap.
                    1 => {
                        self.src_x = self.row_width;
                        self.src_y = None;
                    }
                    // Delta.
                    2 => {
                        let dx = reader.read_byte()? as usize;
                        let dy = reader.read_byte()? as usize;

                        delta = Some(Delta {
                            x: self.src_x + dx,
                            y: src_y + dy,
                        });
                        self.src_x = self.row_width;
                    }
                    // Absolute run.
                    n => self.absolute_run(reader, n as usize)?,
                }
            } else {
                self.encoded_run(count as usize, value)?;
            }

            if self.src_x >= self.row_width {
                if let Some(d) = delta.take() {
                    self.src_x = d.x;

                    if Some(d.y) != self.src_y {
                        self.src_y = Some(d.y);
                        break;
                    }
                } else if let Some(y) = self.src_y {
                    self.src_x = 0;
                    self.src_y = Some(y + 1);
                    break;
                } else {
                    break;
                }
            }
        }

        Ok(())
    }

    fn encoded_run(&mut self, count: usize, value: u8) -> Result<()> {
        match self.compression {
            Compression::Rle8 => {
                for _ in 0..count {
                    self.put(value)?;
                }
            }
            Compression::Rle4 => {
                let nibbles = [value >> 4, value & 0x0f];

                for i in 0..count {
                    self.put(nibbles[i % 2])?;
                }
            }
        }

        Ok(())
    }

    fn absolute_run(&mut self, reader: &mut Reader<'_>, count: usize) -> Result<()> {
        let num_bytes = match self.compression {
            Compression::Rle8 => count,
            Compression::Rle4 => count.div_ceil(2),
        };

        let bytes = reader.read_bytes(num_bytes)?;

        match self.compression {
            Compression::Rle8 => {
                for byte in bytes {
                    self.put(*byte)?;
                }
            }
            Compression::Rle4 => {
                for i in 0..count {
                    let byte = bytes[i / 2];
                    self.put(if i % 2 == 0 { byte >> 4 } else { byte & 0x0f })?;
                }
            }
        }

        // Absolute runs are padded to an even number of bytes.
        if num_bytes % 2 != 0 && reader.skip_bytes(1).is_err() {
            lwarn!("missing padding byte after absolute run");
        }

        Ok(())
    }

    /// Write a single pixel at the current position and advance.
    #[inline]
    fn put(&mut self, pixel: u8) -> Result<()> {
        let x = self.src_x;

        match self.compression {
            Compression::Rle8 => {
                *self.row.get_mut(x).ok_or(RleError::RunOverflow)? = pixel;
            }
            Compression::Rle4 => {
                let shift = if x % 2 == 0 { 4 } else { 0 };
                *self.row.get_mut(x / 2).ok_or(RleError::RunOverflow)? |= pixel << shift;
            }
        }

        self.src_x += 1;

        Ok(())
    }
}

/// Compute the number of bytes per row, rounded up to a multiple of 4.
pub(crate) fn stride(compression: Compression, width: u32) -> Result<usize> {
    let bits = (compression.bits_per_pixel() as u64) * (width as u64);

    usize::try_from(bits.div_ceil(32) * 4).map_err(|_| DecodeError::Overflow)
}
