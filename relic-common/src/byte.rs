//! A reader for reading bytes and big-endian numbers from a byte slice.

use crate::error::{ParseError, Result};

/// A bounded, seekable reader over a byte slice.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    /// The underlying data.
    data: &'a [u8],
    /// The current position in bytes.
    cur_pos: usize,
}

impl<'a> Reader<'a> {
    /// Create a new reader positioned at the start of `data`.
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, cur_pos: 0 }
    }

    /// Returns the current position.
    #[inline]
    pub fn offset(&self) -> usize {
        self.cur_pos
    }

    /// Move to an absolute position.
    ///
    /// Jumping past the end is allowed, the next read will fail.
    #[inline]
    pub fn jump(&mut self, pos: usize) {
        self.cur_pos = pos;
    }

    /// Whether all data has been consumed.
    #[inline]
    pub fn at_end(&self) -> bool {
        self.cur_pos >= self.data.len()
    }

    /// The data that hasn't been consumed yet.
    #[inline]
    pub fn tail(&self) -> Option<&'a [u8]> {
        self.data.get(self.cur_pos..)
    }

    /// Read the given number of bytes.
    #[inline]
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(len)?;
        self.cur_pos += len;

        Ok(bytes)
    }

    /// Read a single byte.
    #[inline]
    pub fn read_byte(&mut self) -> Result<u8> {
        let byte = self.peek_byte()?;
        self.cur_pos += 1;

        Ok(byte)
    }

    /// Read exactly `N` bytes into an array.
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0; N];
        out.copy_from_slice(self.read_bytes(N)?);

        Ok(out)
    }

    /// Skip the given number of bytes.
    #[inline]
    pub fn skip_bytes(&mut self, len: usize) -> Result<()> {
        self.read_bytes(len).map(|_| ())
    }

    /// Peek the given number of bytes.
    #[inline]
    pub fn peek_bytes(&self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .cur_pos
            .checked_add(len)
            .ok_or(ParseError::UnexpectedEof)?;

        Ok(self
            .data
            .get(self.cur_pos..end)
            .ok_or(ParseError::UnexpectedEof)?)
    }

    /// Peek the next byte.
    #[inline]
    pub fn peek_byte(&self) -> Result<u8> {
        Ok(self
            .data
            .get(self.cur_pos)
            .copied()
            .ok_or(ParseError::UnexpectedEof)?)
    }

    /// Read a big-endian u16 number.
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    /// Read a big-endian u32 number.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    /// Read a line terminated by `\n`.
    ///
    /// The terminator is consumed but not returned, a trailing `\r` is stripped.
    /// Returns `None` if there is no more data. The last line may be unterminated.
    pub fn read_line(&mut self) -> Option<&'a [u8]> {
        let rest = self.tail().filter(|t| !t.is_empty())?;

        let (line, consumed) = match rest.iter().position(|b| *b == b'\n') {
            Some(idx) => (&rest[..idx], idx + 1),
            None => (rest, rest.len()),
        };

        self.cur_pos += consumed;

        Some(line.strip_suffix(b"\r").unwrap_or(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DecodeError;

    #[test]
    fn numbers() {
        let mut reader = Reader::new(&[0x01, 0xda, 0x00, 0x00, 0x02, 0x00, 0xff]);
        assert_eq!(reader.read_u16(), Ok(474));
        assert_eq!(reader.read_u32(), Ok(512));
        assert_eq!(reader.read_byte(), Ok(0xff));
        assert!(reader.at_end());
        assert_eq!(
            reader.read_byte(),
            Err(DecodeError::Parse(ParseError::UnexpectedEof))
        );
    }

    #[test]
    fn jump_and_peek() {
        let mut reader = Reader::new(&[1, 2, 3, 4]);
        reader.jump(2);
        assert_eq!(reader.peek_byte(), Ok(3));
        assert_eq!(reader.offset(), 2);
        assert!(reader.read_bytes(3).is_err());
        assert_eq!(reader.read_bytes(2), Ok(&[3, 4][..]));

        reader.jump(10);
        assert!(reader.at_end());
        assert!(reader.peek_byte().is_err());
    }

    #[test]
    fn lines() {
        let mut reader = Reader::new(b"#?RADIANCE\r\nFORMAT=x\n\nlast");
        assert_eq!(reader.read_line(), Some(&b"#?RADIANCE"[..]));
        assert_eq!(reader.read_line(), Some(&b"FORMAT=x"[..]));
        assert_eq!(reader.read_line(), Some(&b""[..]));
        assert_eq!(reader.read_line(), Some(&b"last"[..]));
        assert_eq!(reader.read_line(), None);
    }
}
