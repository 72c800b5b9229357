/*!
A memory-safe, pure-Rust decoder for Radiance HDR images.

Radiance HDR files store each pixel as three 8-bit mantissas sharing an 8-bit
exponent (RGBE). After a textual header, scanlines follow top-down, each either
stored flat or as four run-length encoded planes.

Pixels are converted to linear radiance. A [`ToneMapper`] can be passed in the
[`DecodeSettings`] to map them to displayable values right away.

# Example
```rust,no_run
use relic_hdr::{DecodeSettings, DefaultToneMapper, decode};

let data = std::fs::read("image.hdr").unwrap();
let tone_mapper = DefaultToneMapper::default();
let settings = DecodeSettings {
    tone_mapper: Some(&tone_mapper),
};
let image = decode(&data, &settings).unwrap();

println!("{}x{} image", image.width, image.height);
```

# Safety
This crate forbids unsafe code via a crate-level attribute.
*/

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod header;
#[cfg(feature = "image")]
mod integration;
mod rgbe;
mod rle;
mod tone_map;

use relic_common::{ParseError, bail, ldebug};

pub use header::Header;
pub use relic_common::byte::Reader;
pub use relic_common::{DecodeError, ErrorKind, Result};
pub use rgbe::rgbe_to_float;
pub use rle::read_scanline;
pub use tone_map::{ClampToneMapper, DefaultToneMapper, GammaToneMapper, ToneMapper};

/// Settings for decoding HDR images.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeSettings<'a> {
    /// The tone mapper to apply to each pixel. If `None`, pixels are returned
    /// as linear radiance.
    pub tone_mapper: Option<&'a dyn ToneMapper>,
}

/// A decoded HDR image.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    /// The width in pixels.
    pub width: u32,
    /// The height in pixels.
    pub height: u32,
    /// The parsed header.
    pub header: Header,
    /// The RGB values of each pixel in row-major order, starting at the top.
    pub data: Vec<f32>,
}

/// An HDR image with its pixels left in RGBE form.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbeImage {
    /// The parsed header.
    pub header: Header,
    /// The RGBE bytes of each pixel in row-major order, starting at the top.
    pub data: Vec<u8>,
}

/// Decode an HDR image and convert its pixels to floating point.
pub fn decode(data: &[u8], settings: &DecodeSettings<'_>) -> Result<Image> {
    let RgbeImage { header, data: rgbe } = decode_rgbe(data)?;

    let mut data = Vec::with_capacity(rgbe.len() / 4 * 3);

    for pixel in rgbe.as_chunks::<4>().0 {
        let mut rgb = rgbe_to_float(*pixel);

        if let Some(tone_mapper) = settings.tone_mapper {
            tone_mapper.map(&mut rgb);
        }

        data.extend_from_slice(&rgb);
    }

    Ok(Image {
        width: header.width,
        height: header.height,
        header,
        data,
    })
}

/// Decode an HDR image without converting its pixels.
pub fn decode_rgbe(data: &[u8]) -> Result<RgbeImage> {
    let mut reader = Reader::new(data);
    let header = Header::read(&mut reader)?;

    let width = header.width as usize;
    let height = header.height as usize;
    let stride = width.checked_mul(4).ok_or(DecodeError::Overflow)?;

    let remaining = reader.tail().map_or(0, <[u8]>::len);

    if rle::min_scanline_len(width)
        .checked_mul(height)
        .is_none_or(|len| len > remaining)
    {
        bail!(ParseError::UnexpectedEof);
    }

    ldebug!(
        "decoding {width}x{height} image written by {:?}",
        header.program_type
    );

    let size = stride.checked_mul(height).ok_or(DecodeError::Overflow)?;
    let mut pixels = vec![0; size];

    for scanline in pixels.chunks_exact_mut(stride) {
        read_scanline(&mut reader, scanline)?;
    }

    Ok(RgbeImage {
        header,
        data: pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use relic_common::{FormatError, RleError};

    fn file(width: u32, height: u32, scanlines: &[u8]) -> Vec<u8> {
        let mut data = format!(
            "#?RADIANCE\nFORMAT=32-bit_rle_rgbe\nEXPOSURE=1.0\n\n-Y {height} +X {width}\n"
        )
        .into_bytes();
        data.extend_from_slice(scanlines);

        data
    }

    #[test]
    fn flat_image() {
        let data = file(2, 2, &[128, 0, 0, 129, 0, 0, 0, 0, 1, 2, 3, 136, 64, 64, 64, 128]);
        let image = decode(&data, &DecodeSettings::default()).unwrap();

        assert_eq!((image.width, image.height), (2, 2));
        assert_eq!(image.header.exposure, Some(1.0));
        assert_eq!(
            image.data,
            vec![
                1.0, 0.0, 0.0, 0.0, 0.0, 0.0, // top row
                1.0, 2.0, 3.0, 0.25, 0.25, 0.25, // bottom row
            ]
        );
    }

    #[test]
    fn run_length_encoded_image() {
        let mut scanlines = vec![];

        for _ in 0..3 {
            scanlines.extend_from_slice(&[2, 2, 0, 10, 138, 1, 138, 2, 138, 3, 138, 136]);
        }

        let data = file(10, 3, &scanlines);
        let rgbe = decode_rgbe(&data).unwrap();

        assert_eq!(rgbe.data, [1_u8, 2, 3, 136].repeat(30));

        let image = decode(&data, &DecodeSettings::default()).unwrap();
        assert_eq!(image.data, [1.0_f32, 2.0, 3.0].repeat(30));
    }

    #[test]
    fn tone_mapping() {
        let data = file(1, 1, &[255, 16, 0, 137]);
        let settings = DecodeSettings {
            tone_mapper: Some(&ClampToneMapper),
        };

        assert_eq!(decode(&data, &settings).unwrap().data, [1.0_f32, 1.0, 0.0]);
    }

    #[test]
    fn errors() {
        assert_eq!(
            decode_rgbe(&file(2, 2, &[0; 12])),
            Err(DecodeError::Parse(ParseError::UnexpectedEof))
        );
        assert_eq!(
            decode_rgbe(&file(8, 1, &[2, 2, 0, 7, 0, 0, 0, 0, 0, 0, 0, 0])),
            Err(DecodeError::Rle(RleError::WrongScanlineWidth))
        );
        assert_eq!(
            decode_rgbe(b"#?RADIANCE\n\n-Y 1 +X 1\n\0\0\0\0"),
            Err(DecodeError::Format(FormatError::MissingPixelFormat))
        );
        assert_eq!(
            decode_rgbe(&file(4_000_000_000, 4_000_000_000, &[0; 16])),
            Err(DecodeError::Parse(ParseError::UnexpectedEof))
        );
    }

    #[test]
    fn size_is_bounded_by_data() {
        // The shortest possible scanline of the maximum width.
        let mut scanline = vec![2, 2, 0x7f, 0xff];

        for _ in 0..4 {
            for _ in 0..258 {
                scanline.extend_from_slice(&[255, 1]);
            }

            scanline.extend_from_slice(&[129, 1]);
        }

        assert_eq!(scanline.len(), 2076);

        assert_eq!(
            decode_rgbe(&file(0x7fff, 20, &scanline.repeat(19))),
            Err(DecodeError::Parse(ParseError::UnexpectedEof))
        );

        let rgbe = decode_rgbe(&file(0x7fff, 20, &scanline.repeat(20))).unwrap();
        assert_eq!(rgbe.data.len(), 0x7fff * 4 * 20);
        assert!(rgbe.data.iter().all(|b| *b == 1));
    }
}
