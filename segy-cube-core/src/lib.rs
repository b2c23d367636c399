//! This library is the foundation for the `segy-cube-io` crate. It contains the pure
//! byte-level parts of the SEG-Y rev.1 format: the sample codecs (IBM float, IEEE
//! float, EBCDIC text), typed access to individual header fields by byte offset, and
//! the shared constants, settings and error type. It can be built either with
//! serialization support or in a slightly more lightweight manner without it (see
//! features).
//!
//! Nothing in this crate touches a file; everything operates on caller-owned byte
//! buffers.
#![allow(clippy::derive_partial_eq_without_eq)]
extern crate encoding8;
extern crate num;
#[macro_use]
extern crate num_derive;

#[cfg(any(feature = "to_json", feature = "serde"))]
extern crate serde;
#[cfg(feature = "to_json")]
extern crate serde_json;

pub mod bitconverter;
pub mod enums;
pub mod errors;
pub mod fields;
pub mod settings;
#[cfg(test)]
mod tests;

pub use errors::SegyError;

pub use enums::*;
pub use fields::{BinField, TraceField};
pub use settings::SegySettings;

/// Length of the EBCDIC text header (and of each extended text header).
pub const TEXT_HEADER_LEN: usize = 3200;
/// Length of the binary file header.
pub const BIN_HEADER_LEN: usize = 400;
/// Length of a trace header.
pub const TRACE_HEADER_LEN: usize = 240;

// Default byte locations in the trace header. NB: These are the 1-based offsets of
// the SEG-Y standard, not rust indices.
pub const INLINE_BYTE_LOCATION: usize = 189;
pub const CROSSLINE_BYTE_LOCATION: usize = 193;
pub const OFFSET_BYTE_LOCATION: usize = 37;
