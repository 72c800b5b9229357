//! Reconstruction of samples from block residuals.

use crate::block::BLOCK_SIZE;

/// The value both predictors are reset to at the start of every row.
const ROW_BASE: i32 = 512;

/// The prediction state, carried from one block to the next.
///
/// Even and odd columns are predicted separately, since the sensor data is
/// a Bayer mosaic where neighboring samples belong to different colors.
#[derive(Debug, Clone)]
pub(crate) struct Differential {
    width: usize,
    /// The number of samples reconstructed so far.
    column: usize,
    /// The first residual of the previous block.
    carry: i32,
    base: [i32; 2],
}

impl Differential {
    pub(crate) fn new(width: usize) -> Self {
        debug_assert!(width > 0);

        Self {
            width,
            column: 0,
            carry: 0,
            base: [ROW_BASE; 2],
        }
    }

    /// The number of samples reconstructed so far.
    #[inline]
    pub(crate) fn column(&self) -> usize {
        self.column
    }

    /// Turn the residuals of a block into samples.
    ///
    /// The first residual of each block is itself coded relative to the first
    /// residual of the previous block, so `diffs[0]` is updated in place.
    pub(crate) fn reconstruct(&mut self, diffs: &mut [i32; BLOCK_SIZE]) -> [u16; BLOCK_SIZE] {
        diffs[0] = diffs[0].wrapping_add(self.carry);
        self.carry = diffs[0];

        let mut samples = [0; BLOCK_SIZE];

        for (i, (diff, sample)) in diffs.iter().zip(samples.iter_mut()).enumerate() {
            if self.column % self.width == 0 {
                self.base = [ROW_BASE; 2];
            }

            self.column += 1;

            let base = &mut self.base[i & 1];
            *base = base.wrapping_add(*diff);
            // Samples are 16 bits wide, larger values wrap around.
            *sample = *base as u16;
        }

        samples
    }
}
