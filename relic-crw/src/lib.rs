/*!
A memory-safe, pure-Rust decoder for the lossless image data of Canon CRW raw
files.

The image data of a CRW file is a sequence of 64-sample blocks. The residuals
of each block are Huffman-coded with one of three built-in table pairs and
reconstructed by predicting each sample from the previous sample of the same
column parity. Optionally, the two least significant bits of every sample are
stored uncompressed in front of the Huffman-coded data.

Locating the image data inside the file and reading the sensor dimensions and
the table index from the CIFF metadata is left to the caller.

# Example
```rust,no_run
use relic_crw::{DecodeSettings, decode};

let data = std::fs::read("image.raw").unwrap();
let settings = DecodeSettings {
    width: 2616,
    height: 1968,
    table: 1,
};
let image = decode(&data, &settings).unwrap();

println!("{}x{} image, low bits: {}", image.width, image.height, image.low_bits);
```

# Safety
This crate forbids unsafe code via a crate-level attribute.
*/

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod differential;
mod huffman;
mod low_bits;
mod tables;
#[cfg(test)]
mod test_util;

use block::{BLOCK_SIZE, decode_block};
use differential::Differential;
use relic_common::{FormatError, ParseError, bail, ldebug};
use tables::{FIRST_TREE, SECOND_TREE};

pub use huffman::HuffmanTree;
pub use relic_common::bit::StuffedBitReader;
pub use relic_common::{DecodeError, ErrorKind, Result};

/// The index of the last built-in table pair.
const MAX_TABLE: u8 = 2;

/// Settings for decoding CRW image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeSettings {
    /// The width of the sensor data in samples.
    pub width: u32,
    /// The height of the sensor data in samples.
    pub height: u32,
    /// The index of the Huffman table pair to use. Values above 2 select the
    /// last table pair.
    pub table: u8,
}

/// Decoded raw sensor data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    /// The width of the image in samples.
    pub width: u32,
    /// The height of the image in samples.
    pub height: u32,
    /// Whether the data carried two extra low bits per sample. If so, samples
    /// have 12 significant bits, otherwise 10.
    pub low_bits: bool,
    /// The samples in row-major order, one per sensor site.
    pub data: Vec<u16>,
}

/// Decode CRW image data.
///
/// `data` must start at the beginning of the image data (including the low
/// bits, if present).
pub fn decode(data: &[u8], settings: &DecodeSettings) -> Result<RawImage> {
    let width = settings.width as usize;
    let height = settings.height as usize;

    if width == 0 || height == 0 {
        bail!(FormatError::InvalidDimensions);
    }

    let num_samples = width.checked_mul(height).ok_or(DecodeError::Overflow)?;

    let table = if settings.table > MAX_TABLE {
        ldebug!(
            "table index {} out of range, using {MAX_TABLE}",
            settings.table
        );

        MAX_TABLE
    } else {
        settings.table
    } as usize;

    let first = HuffmanTree::build(&FIRST_TREE[table])?;
    let second = HuffmanTree::build(&SECOND_TREE[table])?;

    let low_bits = low_bits::detect(data);
    let start = if low_bits { num_samples / 4 } else { 0 };

    ldebug!("decoding {width}x{height} samples with table {table}, low bits: {low_bits}");

    let compressed = data.get(start..).ok_or(ParseError::UnexpectedEof)?;
    let mut reader = StuffedBitReader::new(compressed);
    reader.prime();

    let mut state = Differential::new(width);
    let mut diffs = [0; BLOCK_SIZE];
    // The dimensions are untrusted, the buffer grows with the decoded blocks.
    let mut samples = vec![];

    while state.column() < num_samples {
        let block_start = state.column();

        decode_block(&mut reader, &first, &second, &mut diffs)?;
        let mut block = state.reconstruct(&mut diffs);

        if low_bits {
            low_bits::merge(data, block_start, &mut block)?;
        }

        // The last block may extend past the end of the image.
        let keep = (num_samples - block_start).min(BLOCK_SIZE);
        samples.extend_from_slice(&block[..keep]);
    }

    Ok(RawImage {
        width: settings.width,
        height: settings.height,
        low_bits,
        data: samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{BitWriter, code_for};

    /// Write a block with a residual of 3 at position 0 and -1 at position 5.
    fn write_block(writer: &mut BitWriter, table: usize) {
        let (code, len) = code_for(&FIRST_TREE[table], 0x02);
        writer.write(code, len);
        writer.write(0b11, 2);

        let (code, len) = code_for(&SECOND_TREE[table], 0x41);
        writer.write(code, len);
        writer.write(0b0, 1);

        let (code, len) = code_for(&SECOND_TREE[table], 0x00);
        writer.write(code, len);
    }

    fn single_block(table: usize) -> Vec<u8> {
        let mut writer = BitWriter::new();
        write_block(&mut writer, table);

        writer.finish()
    }

    fn expected_block() -> Vec<u16> {
        (0..64)
            .map(|i| match (i, i % 2) {
                (0, _) => 515,
                (_, 0) => 515,
                (1 | 3, _) => 512,
                _ => 511,
            })
            .collect()
    }

    #[test]
    fn without_low_bits() {
        let mut data = single_block(0);
        assert!(!data.contains(&0xff));
        // A stuffed 0xFF marks the data as purely Huffman-coded.
        data.extend_from_slice(&[0xff, 0x00]);

        let settings = DecodeSettings {
            width: 64,
            height: 1,
            table: 0,
        };
        let image = decode(&data, &settings).unwrap();

        assert!(!image.low_bits);
        assert_eq!(image.data, expected_block());
    }

    #[test]
    fn with_low_bits() {
        let mut data = vec![0b11_10_01_00; 16];
        let block = single_block(0);
        assert!(!block.contains(&0xff));
        data.extend_from_slice(&block);

        let settings = DecodeSettings {
            width: 16,
            height: 4,
            table: 0,
        };
        let image = decode(&data, &settings).unwrap();

        assert!(image.low_bits);

        // Rows are 16 samples wide, so the predictors are reset every 16
        // samples. Only position 0 and 5 carry residuals.
        let expected = (0..64)
            .map(|i| {
                let value: u16 = match i {
                    0 => 515,
                    5 => 511,
                    i if i < 16 && i % 2 == 0 => 515,
                    i if i > 5 && i < 16 => 511,
                    _ => 512,
                };

                (value << 2) + (i % 4) as u16
            })
            .collect::<Vec<_>>();
        assert_eq!(image.data, expected);
    }

    #[test]
    fn partial_last_block() {
        let mut writer = BitWriter::new();
        write_block(&mut writer, 1);
        write_block(&mut writer, 1);
        let mut data = writer.finish();
        data.extend_from_slice(&[0xff, 0x00]);

        let settings = DecodeSettings {
            width: 10,
            height: 7,
            table: 1,
        };
        let image = decode(&data, &settings).unwrap();

        assert_eq!(image.data.len(), 70);
    }

    #[test]
    fn table_is_clamped() {
        let mut data = single_block(2);
        data.extend_from_slice(&[0xff, 0x00]);

        let settings = DecodeSettings {
            width: 64,
            height: 1,
            table: 2,
        };
        let clamped = DecodeSettings { table: 9, ..settings };

        assert_eq!(decode(&data, &settings), decode(&data, &clamped));
        assert!(decode(&data, &clamped).is_ok());
    }

    #[test]
    fn truncated_data() {
        let mut data = single_block(0);
        data.extend_from_slice(&[0xff, 0x00]);

        let settings = DecodeSettings {
            width: 64,
            height: 2,
            table: 0,
        };

        assert_eq!(
            decode(&data, &settings),
            Err(DecodeError::Parse(ParseError::UnexpectedEof))
        );
    }

    #[test]
    fn huge_dimensions() {
        let mut data = single_block(0);
        data.extend_from_slice(&[0xff, 0x00]);

        let settings = DecodeSettings {
            width: 1_000_000,
            height: 1_000_000,
            table: 0,
        };

        assert_eq!(
            decode(&data, &settings),
            Err(DecodeError::Parse(ParseError::UnexpectedEof))
        );
    }

    #[test]
    fn invalid_dimensions() {
        let settings = DecodeSettings {
            width: 0,
            height: 10,
            table: 0,
        };

        assert_eq!(
            decode(&[], &settings),
            Err(DecodeError::Format(FormatError::InvalidDimensions))
        );
    }
}
