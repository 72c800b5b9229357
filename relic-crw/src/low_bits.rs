//! Handling of the two extra low bits stored uncompressed in front of the
//! Huffman-coded data.

use crate::block::BLOCK_SIZE;
use relic_common::{ParseError, Result};

/// How many bytes at the start of the data are inspected.
const SCAN_WINDOW: usize = 0x4000;

/// The number of bytes holding the low bits of one block.
const BYTES_PER_BLOCK: usize = BLOCK_SIZE / 4;

/// Guess whether the data starts with a region of low bits.
///
/// Huffman-coded data stuffs a zero after every `0xFF`, so a `0xFF` followed
/// by anything else can only be part of the low bits. If every `0xFF` is
/// followed by a zero, the data is assumed to be purely Huffman-coded. Data
/// without any `0xFF` is assumed to carry low bits.
pub(crate) fn detect(data: &[u8]) -> bool {
    let window = &data[..data.len().min(SCAN_WINDOW)];
    let mut has_low_bits = true;

    for pair in window.windows(2) {
        if pair[0] == 0xff {
            if pair[1] != 0 {
                return true;
            }

            has_low_bits = false;
        }
    }

    has_low_bits
}

/// Append the low bits to the samples of the block starting at `first_sample`.
///
/// Each byte holds two bits for four consecutive samples, starting at the
/// least significant bits.
pub(crate) fn merge(data: &[u8], first_sample: usize, samples: &mut [u16; BLOCK_SIZE]) -> Result<()> {
    let start = first_sample / 4;
    let bytes = data
        .get(start..start + BYTES_PER_BLOCK)
        .ok_or(ParseError::UnexpectedEof)?;

    for (byte, chunk) in bytes.iter().zip(samples.chunks_exact_mut(4)) {
        for (k, sample) in chunk.iter_mut().enumerate() {
            *sample = (*sample << 2) + ((byte >> (2 * k)) & 3) as u16;
        }
    }

    Ok(())
}
