//! This module contains the [`SegySettings`] structure which can be used to customise
//! where geometry inference looks for its trace header fields.
//!
//! NB: It should be noted that since few files are in keeping with the proper SEG-Y
//! format, this is necessary. On the other hand, moving these byte locations can
//! easily cause incorrect parsing of SEG-Y files and should therefore be done with
//! care.
use crate::errors::*;
use crate::{
    CROSSLINE_BYTE_LOCATION, INLINE_BYTE_LOCATION, OFFSET_BYTE_LOCATION, TRACE_HEADER_LEN,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The trace header byte locations that drive geometry inference.
///
/// All locations use the standard's 1-based offsets and default to the rev.1
/// positions: inline number at byte 189, crossline number at byte 193, offset
/// (source-receiver distance) at byte 37. Files written by software that predates
/// rev.1 frequently stash the line numbers elsewhere, hence the setters.
///
/// The fields are not public because not every value is valid (a trace header is
/// only 240 bytes long); the setters validate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct SegySettings {
    /// The byte offset of the inline number field in the trace headers.
    pub(crate) inline_no_byte: usize,
    /// The byte offset of the crossline number field in the trace headers.
    pub(crate) crossline_no_byte: usize,
    /// The byte offset of the offset (source-receiver distance) field.
    pub(crate) offset_byte: usize,
}

impl Default for SegySettings {
    /// Creates the default instance with the rev.1 byte locations.
    fn default() -> Self {
        SegySettings {
            inline_no_byte: INLINE_BYTE_LOCATION,
            crossline_no_byte: CROSSLINE_BYTE_LOCATION,
            offset_byte: OFFSET_BYTE_LOCATION,
        }
    }
}

impl SegySettings {
    #[cfg(feature = "to_json")]
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(&self).map_err(|e| e.to_string())
    }

    /// Sets the inline number byte offset as overridden by the value.
    ///
    /// If the offset would lead to reading past the end of the trace header an
    /// error is returned.
    /// ```
    /// # use segy_cube_core::settings::*;
    /// let mut settings = SegySettings::default();
    /// // NB: SEG-Y offsets are 1-based.
    /// assert_eq!(settings.inline_no_byte(), 189);
    ///
    /// // A four byte field can start no later than byte 237 of 240.
    /// settings.set_inline_no_byte(237).unwrap();
    /// assert_eq!(settings.inline_no_byte(), 237);
    ///
    /// let res = settings.set_inline_no_byte(238);
    /// assert!(res.is_err());
    /// ```
    pub fn set_inline_no_byte(&mut self, byte: usize) -> Result<(), SegyError> {
        Self::check_byte(byte)?;
        self.inline_no_byte = byte;
        Ok(())
    }

    /// Sets the crossline number byte offset as overridden by the value.
    pub fn set_crossline_no_byte(&mut self, byte: usize) -> Result<(), SegyError> {
        Self::check_byte(byte)?;
        self.crossline_no_byte = byte;
        Ok(())
    }

    /// Sets the offset (source-receiver distance) byte offset.
    pub fn set_offset_byte(&mut self, byte: usize) -> Result<(), SegyError> {
        Self::check_byte(byte)?;
        self.offset_byte = byte;
        Ok(())
    }

    /// Get the byte offset of the inline number.
    pub fn inline_no_byte(&self) -> usize {
        self.inline_no_byte
    }

    /// Get the byte offset of the crossline number.
    pub fn crossline_no_byte(&self) -> usize {
        self.crossline_no_byte
    }

    /// Get the byte offset of the offset field.
    pub fn offset_byte(&self) -> usize {
        self.offset_byte
    }

    fn check_byte(byte: usize) -> Result<(), SegyError> {
        if byte < 1 || byte > TRACE_HEADER_LEN - 3 {
            return Err(SegyError::InvalidArgs {
                msg: format!(
                    "A four byte trace header field must start in 1..={}, not {}",
                    TRACE_HEADER_LEN - 3,
                    byte
                ),
            });
        }
        Ok(())
    }
}
