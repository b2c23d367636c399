//! This contains the enums that describe header fields with a fixed set of valid
//! values: the sample format declared in the binary header, the trace sorting hint,
//! and the sorting verdict produced by geometry inference.
use num::FromPrimitive;
#[cfg(any(feature = "to_json", feature = "serde"))]
use serde::{Deserialize, Serialize};

use crate::errors::*;

/// From bytes 3225-3226 of the binary header.
///
/// Only the codes assigned by SEG-Y rev.1 are representable; 6 and 7 are unassigned
/// in rev.1 and fail to parse. Regardless of the declared code, traces are laid out
/// at four bytes per sample by this workspace; the narrow formats (`Int16`, `Int8`)
/// are enumerable but a reader that must support them widens samples on read.
#[derive(Debug, Clone, Copy, PartialEq, FromPrimitive, ToPrimitive)]
#[repr(C)]
#[cfg_attr(
    any(feature = "to_json", feature = "serde"),
    derive(Serialize, Deserialize)
)]
pub enum SampleFormatCode {
    IbmFloat32 = 1,
    Int32 = 2,
    Int16 = 3,
    FixPoint32 = 4, // Obsolete.
    Float32 = 5,
    Int8 = 8,
}

impl std::fmt::Display for SampleFormatCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        write!(f, "{:?}", self)
    }
}

impl SampleFormatCode {
    /// NB: We give a result here to make life simpler for ourselves down the line.
    pub fn new(source: u16) -> Result<Self, SegyError> {
        SampleFormatCode::from_u16(source).ok_or_else(|| SegyError::InvalidArgs {
            msg: format!("{} is not a SEG-Y rev.1 sample format code", source),
        })
    }

    /// The nominal byte length of one sample in this format.
    pub fn datum_byte_length(self) -> usize {
        match self {
            Self::IbmFloat32 => 4,
            Self::Int32 => 4,
            Self::Int16 => 2,
            Self::FixPoint32 => 4, // Obsolete.
            Self::Float32 => 4,
            Self::Int8 => 1,
        }
    }
}

/// The axis the traces are sorted by, as measured from the trace headers: lines
/// of that direction are stored contiguously, while the other direction varies
/// fastest. This is the verdict of geometry inference, not the (frequently wrong)
/// sorting code declared in the binary header; for that, see [`TraceSortingCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(C)]
#[cfg_attr(
    any(feature = "to_json", feature = "serde"),
    derive(Serialize, Deserialize)
)]
pub enum Sorting {
    /// The inline number varies fastest; traces of one crossline are contiguous.
    Crossline = 1,
    /// The crossline number varies fastest; traces of one inline are contiguous.
    Inline = 2,
}

/// From bytes 3229-3230 of the binary header.
///
/// This is what the file *claims* about its trace ordering. Since custom values
/// are common in the wild, unknown codes map to `Invalid` rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, FromPrimitive, ToPrimitive)]
#[repr(C)]
#[cfg_attr(
    any(feature = "to_json", feature = "serde"),
    derive(Serialize, Deserialize)
)]
pub enum TraceSortingCode {
    Other = -1,
    Unknown = 0,
    AsRec = 1,
    CDPEnsemble = 2,
    SingleFoldContinuous = 3,
    HorizontalStack = 4,
    CommonSourcePoint = 5,
    CommonReceiverPoint = 6,
    CommonOffsetPoint = 7,
    CommonMidPoint = 8,
    CommonConversionPoint = 9,
    Invalid,
}

impl TraceSortingCode {
    pub fn new(source: i16) -> Self {
        TraceSortingCode::from_i16(source).unwrap_or(TraceSortingCode::Invalid)
    }
}
