//! Decoding of the residuals of a single 64-sample block.

use crate::huffman::HuffmanTree;
use relic_common::Result;
use relic_common::bit::StuffedBitReader;

/// The number of samples in a block.
pub(crate) const BLOCK_SIZE: usize = 64;

/// Marks a symbol that carries no residual.
const SKIP: u8 = 0xff;

/// Decode the residuals of the next block into `diffs`.
///
/// The first symbol is decoded with `first`, all others with `second`. The
/// high nibble of a symbol is the number of zero residuals preceding the next
/// one, the low nibble is the bit length of that residual.
pub(crate) fn decode_block(
    reader: &mut StuffedBitReader<'_>,
    first: &HuffmanTree,
    second: &HuffmanTree,
    diffs: &mut [i32; BLOCK_SIZE],
) -> Result<()> {
    diffs.fill(0);

    let mut tree = first;
    let mut i = 0;

    while i < BLOCK_SIZE {
        let symbol = tree.decode_symbol(reader)?;
        tree = second;

        // End of block.
        if symbol == 0 && i != 0 {
            break;
        }

        if symbol != SKIP {
            i += (symbol >> 4) as usize;
            let len = symbol & 0x0f;

            if len != 0 {
                let diff = read_residual(reader, len)?;

                // A zero run may push us past the end of the block, in which
                // case the residual is read but dropped.
                if i < BLOCK_SIZE {
                    diffs[i] = diff;
                }
            }
        }

        i += 1;
    }

    Ok(())
}

/// Read a residual of `len` bits. Values whose top bit is clear are negative.
#[inline]
fn read_residual(reader: &mut StuffedBitReader<'_>, len: u8) -> Result<i32> {
    let mut diff = reader.read_bits(len)? as i32;

    if diff & (1 << (len - 1)) == 0 {
        diff -= (1 << len) - 1;
    }

    Ok(diff)
}
