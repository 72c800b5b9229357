//! Parsing of the textual Radiance header.

use relic_common::byte::Reader;
use relic_common::{FormatError, ParseError, Result, UnsupportedError, bail, err, ltrace};

/// The only pixel format that is supported.
const RGBE_FORMAT: &[u8] = b"32-bit_rle_rgbe";

/// A parsed Radiance header.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    /// The program that wrote the file, taken from the `#?` line.
    pub program_type: Option<String>,
    /// The value of the `GAMMA=` line.
    pub gamma: Option<f32>,
    /// The value of the `EXPOSURE=` line.
    pub exposure: Option<f32>,
    /// The width of the image in pixels.
    pub width: u32,
    /// The height of the image in pixels.
    pub height: u32,
}

impl Header {
    /// Parse the header, leaving `reader` positioned at the first scanline.
    pub fn read(reader: &mut Reader<'_>) -> Result<Self> {
        let mut program_type = None;
        let mut gamma = None;
        let mut exposure = None;
        let mut found_format = false;

        let mut line = reader.read_line().ok_or(ParseError::UnexpectedEof)?;

        if let Some(program) = line.strip_prefix(b"#?") {
            program_type = Some(String::from_utf8_lossy(program).into_owned());
            line = reader.read_line().ok_or(FormatError::MissingResolution)?;
        }

        let (width, height) = loop {
            if let Some(format) = line.strip_prefix(b"FORMAT=") {
                if format != RGBE_FORMAT {
                    bail!(UnsupportedError::PixelFormat);
                }

                found_format = true;
            } else if let Some(value) = line.strip_prefix(b"GAMMA=") {
                gamma = Some(parse_float(value)?);
            } else if let Some(value) = line.strip_prefix(b"EXPOSURE=") {
                exposure = Some(parse_float(value)?);
            } else if let Some(resolution) = parse_resolution(line) {
                break resolution?;
            } else if !line.is_empty() {
                ltrace!("ignoring header line {:?}", String::from_utf8_lossy(line));
            }

            line = reader.read_line().ok_or(FormatError::MissingResolution)?;
        };

        if !found_format {
            bail!(FormatError::MissingPixelFormat);
        }

        if width == 0 || height == 0 {
            bail!(FormatError::InvalidDimensions);
        }

        Ok(Self {
            program_type,
            gamma,
            exposure,
            width,
            height,
        })
    }
}

fn parse_float(value: &[u8]) -> Result<f32> {
    core::str::from_utf8(value)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .ok_or(FormatError::InvalidHeader.into())
}

/// Parse a resolution line of the form `-Y <height> +X <width>`.
///
/// Returns `None` if the line doesn't have that form, and an error if it
/// does, but the numbers are out of range.
fn parse_resolution(line: &[u8]) -> Option<Result<(u32, u32)>> {
    let rest = line.strip_prefix(b"-Y ")?;
    let split = rest.iter().position(|b| *b == b' ')?;
    let (height, rest) = rest.split_at(split);
    let width = rest.strip_prefix(b" +X ")?;

    let is_number = |s: &[u8]| !s.is_empty() && s.iter().all(u8::is_ascii_digit);

    if !is_number(height) || !is_number(width) {
        return None;
    }

    let parse = |s: &[u8]| -> Result<u32> {
        match core::str::from_utf8(s).ok().and_then(|s| s.parse().ok()) {
            Some(n) => Ok(n),
            None => err!(FormatError::InvalidHeader),
        }
    };

    Some(parse(width).and_then(|width| Ok((width, parse(height)?))))
}
