//! An internal crate containing utility functions and structs reused across the
//! different decoder crates in the relic project.
//!
//! This crate is not really meant for external consumption, but the bit readers
//! and the error types are part of the public API of the decoder crates.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod bit;
pub mod byte;
pub mod error;
mod log;

pub use error::{
    DecodeError, ErrorKind, FormatError, HuffmanError, ParseError, Result, RleError,
    UnsupportedError,
};

#[cfg(feature = "logging")]
#[doc(hidden)]
pub use ::log as __log;
