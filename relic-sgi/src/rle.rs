//! Run-length encoded scanlines.

use crate::header::{HEADER_SIZE, Layout};
use relic_common::byte::Reader;
use relic_common::{DecodeError, Result, RleError};

/// A sample type that can be stored in an SGI file.
pub(crate) trait Sample: Copy + Default {
    /// Read a single big-endian sample.
    fn read(reader: &mut Reader<'_>) -> Result<Self>;
}

impl Sample for u8 {
    #[inline]
    fn read(reader: &mut Reader<'_>) -> Result<Self> {
        reader.read_byte()
    }
}

impl Sample for u16 {
    #[inline]
    fn read(reader: &mut Reader<'_>) -> Result<Self> {
        reader.read_u16()
    }
}

/// The location of every run-length encoded scanline in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanlineTable {
    /// The absolute offset of each scanline, indexed by `channel * height + y`.
    pub offsets: Vec<u32>,
    /// The length in bytes of each scanline, indexed like `offsets`.
    pub lengths: Vec<u32>,
}

impl ScanlineTable {
    /// Read the scanline table that follows the header.
    ///
    /// `data` must be the whole file.
    pub fn read(data: &[u8], layout: &Layout) -> Result<Self> {
        let count = layout.num_scanlines();
        let mut reader = Reader::new(data);
        reader.jump(HEADER_SIZE);

        let offsets = (0..count)
            .map(|_| reader.read_u32())
            .collect::<Result<Vec<_>>>()?;
        let lengths = (0..count)
            .map(|_| reader.read_u32())
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { offsets, lengths })
    }

    /// Return the encoded data of a scanline.
    pub(crate) fn scanline<'a>(&self, data: &'a [u8], index: usize) -> Result<&'a [u8]> {
        let (Some(offset), Some(length)) = (self.offsets.get(index), self.lengths.get(index))
        else {
            return Err(RleError::ScanlineOutOfBounds.into());
        };

        let start = *offset as usize;
        let end = start
            .checked_add(*length as usize)
            .ok_or(DecodeError::Overflow)?;

        Ok(data.get(start..end).ok_or(RleError::ScanlineOutOfBounds)?)
    }
}

/// Decode the bytes of a single scanline into `out`, returning the number of
/// bytes written.
///
/// Runs always operate on bytes, also for images with two bytes per sample.
/// Decoding stops at a zero-length run or at the end of `data`, whichever
/// comes first.
pub(crate) fn decode_scanline(data: &[u8], out: &mut [u8]) -> Result<usize> {
    let mut reader = Reader::new(data);
    let mut x = 0;

    while let Ok(control) = reader.read_byte() {
        let count = (control & 0x7f) as usize;

        if count == 0 {
            break;
        }

        let end = x + count;
        let dst = out.get_mut(x..end).ok_or(RleError::RunOverflow)?;

        if control & 0x80 != 0 {
            let available = reader.tail().map_or(0, <[u8]>::len).min(count);
            dst[..available].copy_from_slice(reader.read_bytes(available)?);

            if available < count {
                return Ok(x + available);
            }
        } else {
            let Ok(value) = reader.read_byte() else {
                break;
            };

            dst.fill(value);
        }

        x = end;
    }

    Ok(x)
}
