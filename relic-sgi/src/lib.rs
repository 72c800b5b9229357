/*!
A memory-safe, pure-Rust decoder for SGI images.

SGI (also known as IRIS or RGB) images store each channel as a separate plane
of bottom-up scanlines, either verbatim or run-length encoded. In the latter
case, a table right after the 512-byte header holds the offset and length of
every scanline. Samples have one or two bytes.

This crate returns the samples top-down and interleaved per pixel.

# Example
```rust,no_run
use relic_sgi::{Samples, decode};

let data = std::fs::read("image.sgi").unwrap();
let image = decode(&data).unwrap();

match image.samples {
    Samples::U8(s) => println!("{} 8-bit samples", s.len()),
    Samples::U16(s) => println!("{} 16-bit samples", s.len()),
}
```

# Safety
This crate forbids unsafe code via a crate-level attribute.
*/

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod header;
#[cfg(feature = "image")]
mod integration;
mod rle;

use relic_common::byte::Reader;
use relic_common::{ParseError, UnsupportedError, bail, ldebug, lwarn};
use rle::Sample;

pub use header::{ColorMode, HEADER_SIZE, Header, Layout, Storage};
pub use relic_common::{DecodeError, ErrorKind, Result};
pub use rle::ScanlineTable;

/// Decoded samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Samples {
    /// One byte per sample.
    U8(Vec<u8>),
    /// Two bytes per sample.
    U16(Vec<u16>),
}

/// A problem with the image that didn't prevent decoding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Warning {
    /// The image uses a color mode other than [`ColorMode::Normal`]. Samples are
    /// returned as stored, so colors may look incorrect.
    ColorMode(ColorMode),
}

/// A decoded SGI image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// The width in pixels.
    pub width: u32,
    /// The height in pixels.
    pub height: u32,
    /// The number of channels per pixel.
    pub channels: u32,
    /// The samples in row-major order, starting at the top row, with the
    /// channels of each pixel next to each other.
    pub samples: Samples,
    /// Problems encountered while decoding.
    pub warnings: Vec<Warning>,
}

/// Decode a complete SGI file.
pub fn decode(data: &[u8]) -> Result<Image> {
    let header = Header::read(data)?;
    let layout = header.layout;

    ldebug!(
        "decoding {}x{}x{} SGI image, {:?} storage, {} bytes per channel",
        layout.width,
        layout.height,
        layout.channels,
        header.storage,
        layout.bytes_per_channel
    );

    let mut image = match header.storage {
        Storage::Verbatim => {
            let pixels = data.get(HEADER_SIZE..).unwrap_or_default();
            decode_verbatim(pixels, &layout)?
        }
        Storage::Rle => {
            let table = ScanlineTable::read(data, &layout)?;
            decode_rle(data, &table, &layout)?
        }
    };

    if header.color_mode != ColorMode::Normal {
        lwarn!(
            "unsupported color mode {:?}, colors may look incorrect",
            header.color_mode
        );

        image.warnings.insert(0, Warning::ColorMode(header.color_mode));
    }

    Ok(image)
}

/// Decode run-length encoded pixel data.
///
/// `data` must be the whole file, since the offsets in `table` are relative
/// to its start. Each scanline is only read within its declared length.
pub fn decode_rle(data: &[u8], table: &ScanlineTable, layout: &Layout) -> Result<Image> {
    let samples = match layout.bytes_per_channel {
        1 => Samples::U8(rle_samples(data, table, layout)?),
        2 => Samples::U16(rle_samples(data, table, layout)?),
        _ => bail!(UnsupportedError::BitDepth),
    };

    Ok(image(layout, samples))
}

/// Decode uncompressed pixel data.
///
/// `data` must start at the first sample, right after the header.
pub fn decode_verbatim(data: &[u8], layout: &Layout) -> Result<Image> {
    let samples = match layout.bytes_per_channel {
        1 => Samples::U8(verbatim_samples(data, layout)?),
        2 => Samples::U16(verbatim_samples(data, layout)?),
        _ => bail!(UnsupportedError::BitDepth),
    };

    Ok(image(layout, samples))
}

fn image(layout: &Layout, samples: Samples) -> Image {
    Image {
        width: layout.width,
        height: layout.height,
        channels: layout.channels,
        samples,
        warnings: vec![],
    }
}

fn rle_samples<S: Sample>(data: &[u8], table: &ScanlineTable, layout: &Layout) -> Result<Vec<S>> {
    let mut out = vec![S::default(); layout.num_samples()?];
    let mut row = vec![S::default(); layout.width as usize];
    let mut row_bytes = vec![0; layout.row_len()?];
    let height = layout.height as usize;

    for channel in 0..layout.channels as usize {
        for y in 0..height {
            let scanline = table.scanline(data, channel * height + y)?;
            let decoded = rle::decode_scanline(scanline, &mut row_bytes)?;

            if decoded < row_bytes.len() {
                ldebug!(
                    "scanline {y} of channel {channel} ends after {decoded} of {} bytes",
                    row_bytes.len()
                );

                bail!(ParseError::UnexpectedEof);
            }

            read_row(&mut Reader::new(&row_bytes), &mut row)?;
            place_row(&row, &mut out, layout, channel, y);
        }
    }

    Ok(out)
}

fn verbatim_samples<S: Sample>(data: &[u8], layout: &Layout) -> Result<Vec<S>> {
    let num_samples = layout.num_samples()?;

    if num_samples
        .checked_mul(layout.bytes_per_channel as usize)
        .is_none_or(|len| len > data.len())
    {
        bail!(ParseError::UnexpectedEof);
    }

    let mut out = vec![S::default(); num_samples];
    let mut row = vec![S::default(); layout.width as usize];
    let mut reader = Reader::new(data);

    for channel in 0..layout.channels as usize {
        for y in 0..layout.height as usize {
            read_row(&mut reader, &mut row)?;
            place_row(&row, &mut out, layout, channel, y);
        }
    }

    Ok(out)
}

fn read_row<S: Sample>(reader: &mut Reader<'_>, row: &mut [S]) -> Result<()> {
    for sample in row {
        *sample = S::read(reader)?;
    }

    Ok(())
}

/// Copy a scanline of a single channel into the interleaved output, flipping
/// it vertically.
fn place_row<S: Copy>(row: &[S], out: &mut [S], layout: &Layout, channel: usize, y: usize) {
    let channels = layout.channels as usize;
    let row_len = row.len() * channels;
    let start = (layout.height as usize - 1 - y) * row_len;

    for (dst, src) in out[start..start + row_len]
        .iter_mut()
        .skip(channel)
        .step_by(channels)
        .zip(row)
    {
        *dst = *src;
    }
}
