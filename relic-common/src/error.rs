//! Error types shared by all relic decoders.

use core::fmt;

/// The main error type for decoding operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Errors related to reading raw data.
    Parse(ParseError),
    /// Errors related to headers and other container-level structure.
    Format(FormatError),
    /// Errors related to run-length encoded data.
    Rle(RleError),
    /// Errors related to Huffman decoding.
    Huffman(HuffmanError),
    /// The data is valid, but uses a variant that isn't supported.
    Unsupported(UnsupportedError),
    /// Arithmetic overflow in size calculations.
    Overflow,
}

/// Errors related to reading raw data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Unexpected end of input.
    UnexpectedEof,
}

/// Errors related to headers and other container-level structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// The magic number doesn't match.
    InvalidMagic,
    /// A header field has an invalid value.
    InvalidHeader,
    /// No pixel format line was found in the header.
    MissingPixelFormat,
    /// No resolution line was found in the header.
    MissingResolution,
    /// The image has invalid dimensions.
    InvalidDimensions,
}

/// Errors related to run-length encoded data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RleError {
    /// A run would write past the end of the destination.
    RunOverflow,
    /// A run has a length that is not allowed at this point.
    InvalidRunLength,
    /// The width stored in a scanline doesn't match the image width.
    WrongScanlineWidth,
    /// A scanline offset or length points outside of the data.
    ScanlineOutOfBounds,
}

/// Errors related to Huffman decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuffmanError {
    /// The table specification is truncated or malformed.
    InvalidTable,
}

/// Variants of a format that are recognized but not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedError {
    /// An unsupported pixel format.
    PixelFormat,
    /// An unsupported number of bits or bytes per sample.
    BitDepth,
    /// An unsupported storage or compression scheme.
    Storage,
    /// An unsupported image dimension or channel layout.
    Dimension,
}

/// A coarse classification of a [`DecodeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input uses a feature that isn't supported.
    Unsupported,
    /// The input is truncated or otherwise corrupt.
    Corrupt,
}

impl DecodeError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unsupported(_) => ErrorKind::Unsupported,
            _ => ErrorKind::Corrupt,
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::Format(e) => write!(f, "{e}"),
            Self::Rle(e) => write!(f, "{e}"),
            Self::Huffman(e) => write!(f, "{e}"),
            Self::Unsupported(e) => write!(f, "{e}"),
            Self::Overflow => write!(f, "arithmetic overflow"),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof => write!(f, "unexpected end of input"),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMagic => write!(f, "invalid magic number"),
            Self::InvalidHeader => write!(f, "invalid header field"),
            Self::MissingPixelFormat => write!(f, "missing pixel format specifier"),
            Self::MissingResolution => write!(f, "missing resolution line"),
            Self::InvalidDimensions => write!(f, "invalid image dimensions"),
        }
    }
}

impl fmt::Display for RleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RunOverflow => write!(f, "run exceeds destination buffer"),
            Self::InvalidRunLength => write!(f, "invalid run length"),
            Self::WrongScanlineWidth => write!(f, "scanline width doesn't match image width"),
            Self::ScanlineOutOfBounds => write!(f, "scanline lies outside of the data"),
        }
    }
}

impl fmt::Display for HuffmanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTable => write!(f, "invalid Huffman table specification"),
        }
    }
}

impl fmt::Display for UnsupportedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PixelFormat => write!(f, "unsupported pixel format"),
            Self::BitDepth => write!(f, "unsupported bit depth"),
            Self::Storage => write!(f, "unsupported storage type"),
            Self::Dimension => write!(f, "unsupported image dimension"),
        }
    }
}

impl core::error::Error for DecodeError {}
impl core::error::Error for ParseError {}
impl core::error::Error for FormatError {}
impl core::error::Error for RleError {}
impl core::error::Error for HuffmanError {}
impl core::error::Error for UnsupportedError {}

impl From<ParseError> for DecodeError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<FormatError> for DecodeError {
    fn from(e: FormatError) -> Self {
        Self::Format(e)
    }
}

impl From<RleError> for DecodeError {
    fn from(e: RleError) -> Self {
        Self::Rle(e)
    }
}

impl From<HuffmanError> for DecodeError {
    fn from(e: HuffmanError) -> Self {
        Self::Huffman(e)
    }
}

impl From<UnsupportedError> for DecodeError {
    fn from(e: UnsupportedError) -> Self {
        Self::Unsupported(e)
    }
}

/// Result type for decoding operations.
pub type Result<T> = core::result::Result<T, DecodeError>;

/// Return early with the given error, converted into a [`DecodeError`].
#[macro_export]
macro_rules! bail {
    ($err:expr) => {
        return Err($err.into())
    };
}

/// Create an `Err` holding the given error, converted into a [`DecodeError`].
#[macro_export]
macro_rules! err {
    ($err:expr) => {
        Err($err.into())
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify() {
        assert_eq!(
            DecodeError::from(UnsupportedError::PixelFormat).kind(),
            ErrorKind::Unsupported
        );
        assert_eq!(
            DecodeError::from(ParseError::UnexpectedEof).kind(),
            ErrorKind::Corrupt
        );
        assert_eq!(DecodeError::Overflow.kind(), ErrorKind::Corrupt);
    }

    #[test]
    fn display() {
        assert_eq!(
            DecodeError::from(RleError::RunOverflow).to_string(),
            "run exceeds destination buffer"
        );
    }
}
