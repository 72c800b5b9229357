//! Bit readers.
//!
//! Two flavors are provided: [`StuffedBitReader`] reads MSB-first and removes the
//! zero byte that is stuffed after every `0xFF` (as used by Canon's CRW
//! bitstreams), [`LsbBitReader`] reads LSB-first and supports peeking.

use crate::byte::Reader;
use crate::error::{ParseError, Result};

/// The maximum number of bits that can be requested from a [`StuffedBitReader`]
/// at once.
pub const MAX_STUFFED_BITS: u8 = 25;

/// An MSB-first bit reader that removes byte stuffing.
///
/// Every `0xFF` byte pulled from the underlying data is followed by one stuffed
/// byte, which is read and discarded.
#[derive(Debug, Clone)]
pub struct StuffedBitReader<'a> {
    reader: Reader<'a>,
    /// Buffered bits, the valid ones are the lowest `bit_count` bits.
    bit_buf: u32,
    bit_count: u8,
}

impl<'a> StuffedBitReader<'a> {
    /// Create a new bit reader starting at the first byte of `data`.
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            reader: Reader::new(data),
            bit_buf: 0,
            bit_count: 0,
        }
    }

    /// Drop all buffered bits.
    ///
    /// Must be called before the first read.
    #[inline]
    pub fn prime(&mut self) {
        self.bit_buf = 0;
        self.bit_count = 0;
    }

    /// The position of the next byte that will be pulled from the data.
    #[inline]
    pub fn byte_pos(&self) -> usize {
        self.reader.offset()
    }

    /// Read a single bit.
    #[inline(always)]
    pub fn read_bit(&mut self) -> Result<u32> {
        self.read_bits(1)
    }

    /// Read the given number of bits, most significant bit first.
    ///
    /// `num_bits` must not exceed [`MAX_STUFFED_BITS`]. Reading zero bits
    /// doesn't touch the underlying data.
    #[inline(always)]
    pub fn read_bits(&mut self, num_bits: u8) -> Result<u32> {
        debug_assert!(num_bits <= MAX_STUFFED_BITS);

        if num_bits == 0 {
            return Ok(0);
        }

        while self.bit_count < num_bits {
            self.refill()?;
        }

        self.bit_count -= num_bits;
        let value = (self.bit_buf >> self.bit_count) & ((1 << num_bits) - 1);

        Ok(value)
    }

    #[inline(always)]
    fn refill(&mut self) -> Result<()> {
        let byte = self.reader.read_byte()?;

        if byte == 0xff {
            // Always followed by a stuffed zero byte.
            self.reader.skip_bytes(1)?;
        }

        self.bit_buf = (self.bit_buf << 8) | byte as u32;
        self.bit_count += 8;

        Ok(())
    }
}

/// An LSB-first bit reader.
#[derive(Debug, Clone)]
pub struct LsbBitReader<'a> {
    data: &'a [u8],
    /// The position in bits.
    cur_pos: usize,
}

impl<'a> LsbBitReader<'a> {
    /// Create a new bit reader.
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, cur_pos: 0 }
    }

    /// Read the given number of bits, least significant bit first.
    ///
    /// `num_bits` must not exceed 32.
    #[inline]
    pub fn read_bits(&mut self, num_bits: u8) -> Result<u32> {
        let value = self.peek_bits(num_bits)?;
        self.consume(num_bits);

        Ok(value)
    }

    /// Return the next `num_bits` bits without consuming them.
    pub fn peek_bits(&self, num_bits: u8) -> Result<u32> {
        debug_assert!(num_bits <= 32);

        let mut value = 0_u64;
        let mut filled = 0;
        let mut pos = self.cur_pos;

        while filled < num_bits as usize {
            let byte = *self
                .data
                .get(pos >> 3)
                .ok_or(ParseError::UnexpectedEof)? as u64;
            let bit_pos = pos & 7;
            let take = (num_bits as usize - filled).min(8 - bit_pos);
            let bits = (byte >> bit_pos) & ((1 << take) - 1);

            value |= bits << filled;
            filled += take;
            pos += take;
        }

        Ok(value as u32)
    }

    /// Consume bits that were previously peeked.
    #[inline]
    pub fn consume(&mut self, num_bits: u8) {
        self.cur_pos += num_bits as usize;
        debug_assert!(self.cur_pos <= self.data.len() * 8);
    }

    /// Align the reader to the next byte boundary.
    #[inline]
    pub fn align(&mut self) {
        let bit_pos = self.cur_pos & 7;

        if bit_pos != 0 {
            self.cur_pos += 8 - bit_pos;
        }
    }

    /// The number of bits that are left.
    #[inline]
    pub fn bits_left(&self) -> usize {
        (self.data.len() * 8).saturating_sub(self.cur_pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DecodeError;

    #[test]
    fn stuffed_msb_first() {
        let data = [0b1010_1100, 0b0101_0011, 0x00];
        let mut reader = StuffedBitReader::new(&data);
        reader.prime();

        assert_eq!(reader.read_bits(0), Ok(0));
        assert_eq!(reader.read_bits(3), Ok(0b101));
        assert_eq!(reader.read_bit(), Ok(0));
        assert_eq!(reader.read_bits(6), Ok(0b11_0001));
        assert_eq!(reader.read_bits(6), Ok(0b01_0011));
    }

    #[test]
    fn stuffed_zero_is_skipped() {
        let data = [0xff, 0x00, 0x81, 0xff, 0x00, 0x3c];
        let mut reader = StuffedBitReader::new(&data);
        reader.prime();

        assert_eq!(reader.read_bits(8), Ok(0xff));
        assert_eq!(reader.read_bits(16), Ok(0x81ff));
        assert_eq!(reader.byte_pos(), 5);
        assert_eq!(reader.read_bits(4), Ok(0x3));
        assert_eq!(reader.read_bits(4), Ok(0xc));
    }

    #[test]
    fn stuffed_wide_reads() {
        let data = [0x12, 0x34, 0x56, 0x78, 0x9a];
        let mut reader = StuffedBitReader::new(&data);
        reader.prime();

        assert_eq!(reader.read_bits(25), Ok(0x12345678 >> 7));
        assert_eq!(reader.read_bits(15), Ok(0x789a & 0x7fff));
    }

    #[test]
    fn stuffed_eof() {
        let mut reader = StuffedBitReader::new(&[0xab]);
        reader.prime();

        assert_eq!(reader.read_bits(4), Ok(0xa));
        assert_eq!(
            reader.read_bits(5),
            Err(DecodeError::Parse(ParseError::UnexpectedEof))
        );

        // A missing stuffed byte is an error as well.
        let mut reader = StuffedBitReader::new(&[0xff]);
        reader.prime();
        assert!(reader.read_bits(1).is_err());
    }

    #[test]
    fn lsb_first() {
        let data = [0b1011_0110, 0b0000_0001];
        let mut reader = LsbBitReader::new(&data);

        assert_eq!(reader.read_bits(1), Ok(0));
        assert_eq!(reader.read_bits(2), Ok(0b11));
        assert_eq!(reader.peek_bits(4), Ok(0b0110));
        assert_eq!(reader.peek_bits(4), Ok(0b0110));
        reader.consume(4);
        assert_eq!(reader.read_bits(2), Ok(0b11));
        assert_eq!(reader.bits_left(), 7);
        assert_eq!(reader.read_bits(7), Ok(0b000_0000));
        assert!(reader.read_bits(1).is_err());
    }

    #[test]
    fn lsb_wide_reads() {
        let data = [0x78, 0x56, 0x34, 0x12, 0xff];
        let mut reader = LsbBitReader::new(&data);

        assert_eq!(reader.read_bits(32), Ok(0x1234_5678));
        reader.align();
        assert_eq!(reader.read_bits(8), Ok(0xff));

        let mut reader = LsbBitReader::new(&data);
        assert_eq!(reader.read_bits(4), Ok(0x8));
        reader.align();
        assert_eq!(reader.read_bits(16), Ok(0x3456));
    }
}
