/*!
Memory-safe, pure-Rust decoders for the pixel data of legacy raster formats.

This crate bundles the individual decoder crates of the relic project, so that
they can be pulled in with a single dependency. Each decoder lives in its own
module:

- [`crw`]: lossless image data of Canon CRW raw files.
- [`bmp`]: run-length encoded BMP pixel data.
- [`sgi`]: SGI images.
- [`hdr`]: Radiance HDR images.

All decoders report errors through the same [`DecodeError`] type.

## Safety
This crate forbids unsafe code via a crate-level attribute.

## Cargo features
- `crw`, `bmp`, `sgi`, `hdr`: Enable the decoder of the same name. All are
  enabled by default.
- `image`: Enable conversion of decoded SGI and HDR images into types of the
  [image](https://docs.rs/image) crate.
- `logging`: Log warnings and debug information via the `log` crate.
*/

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub use relic_common::{
    DecodeError, ErrorKind, FormatError, HuffmanError, ParseError, Result, RleError,
    UnsupportedError,
};

/// Bit readers shared by the decoders.
pub use relic_common::bit;
/// Byte readers shared by the decoders.
pub use relic_common::byte;

#[cfg(feature = "crw")]
pub use relic_crw as crw;

#[cfg(feature = "bmp")]
pub use relic_bmp as bmp;

#[cfg(feature = "sgi")]
pub use relic_sgi as sgi;

#[cfg(feature = "hdr")]
pub use relic_hdr as hdr;
