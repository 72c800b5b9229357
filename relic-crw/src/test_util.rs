//! Helpers for building CRW bitstreams in tests.

/// Assign canonical codes to the leaves of a table specification.
///
/// Returns `(code, length, symbol)` for every leaf, in leaf order.
pub(crate) fn canonical_codes(spec: &[u8]) -> Vec<(u32, u8, u8)> {
    let mut codes = vec![];
    let mut code = 0_u32;
    let mut leaf = 16;

    for len in 1..=16_u8 {
        for _ in 0..spec[len as usize - 1] {
            codes.push((code, len, spec[leaf]));
            code += 1;
            leaf += 1;
        }

        code <<= 1;
    }

    codes
}

/// Look up the code of a symbol in a table specification.
pub(crate) fn code_for(spec: &[u8], symbol: u8) -> (u32, u8) {
    canonical_codes(spec)
        .into_iter()
        .find(|(_, _, s)| *s == symbol)
        .map(|(code, len, _)| (code, len))
        .unwrap()
}

/// An MSB-first bit writer that stuffs a zero byte after every `0xFF`.
pub(crate) struct BitWriter {
    data: Vec<u8>,
    cur: u8,
    filled: u8,
}

impl BitWriter {
    pub(crate) fn new() -> Self {
        Self {
            data: vec![],
            cur: 0,
            filled: 0,
        }
    }

    pub(crate) fn write(&mut self, value: u32, len: u8) {
        for i in (0..len).rev() {
            self.push_bit((value >> i) as u8 & 1);
        }
    }

    pub(crate) fn write_str(&mut self, bits: &str) {
        for c in bits.chars() {
            self.push_bit(u8::from(c == '1'));
        }
    }

    fn push_bit(&mut self, bit: u8) {
        self.cur = (self.cur << 1) | bit;
        self.filled += 1;

        if self.filled == 8 {
            self.flush_byte();
        }
    }

    fn flush_byte(&mut self) {
        self.data.push(self.cur);

        if self.cur == 0xff {
            self.data.push(0x00);
        }

        self.cur = 0;
        self.filled = 0;
    }

    /// Pad the last byte with zeros and return the data.
    pub(crate) fn finish(mut self) -> Vec<u8> {
        if self.filled > 0 {
            self.cur <<= 8 - self.filled;
            self.flush_byte();
        }

        self.data
    }
}
