// Copyright (C) 2020 by GiGa infosystems
//! This submodule holds the pure codecs of the SEG-Y wire format: the mainframe-era
//! IBM single precision float, big-endian IEEE floats, and the EBCDIC text encoding
//! of the 3200-byte headers.
//!
//! All functions here are pure and operate on caller-owned buffers; nothing reads
//! from a file.
use crate::enums::SampleFormatCode;

use encoding8::ascii;
use encoding8::ebcdic;

/// Decode one IBM single precision float to an IEEE `f32` bit pattern.
///
/// The argument is the 32-bit word as read big-endian from the file, i.e.
/// `u32::from_be_bytes` of the four wire bytes. IBM floats are
/// sign(1) | exponent(7, base 16, excess 64) | fraction(24); the exponent is
/// rebased (`4 * e16 - 130`), the fraction normalised by left shifts, and the
/// result truncated toward zero where IEEE has fewer bits. Underflow below the
/// smallest subnormal becomes a signed zero, overflow becomes a signed infinity.
/// ```
/// # use segy_cube_core::bitconverter::ibm_to_ieee;
/// assert_eq!(f32::from_bits(ibm_to_ieee(0x4110_0000)), 1.0);
/// assert_eq!(f32::from_bits(ibm_to_ieee(0xC208_0000)), -8.0);
/// ```
pub fn ibm_to_ieee(ibm: u32) -> u32 {
    let sgn = ibm >> 31;
    let mut fr = ibm << 1; // shift sign out
    let mut exp = (fr >> 25) as i32; // save exponent
    fr <<= 7; // shift exponent out

    if fr == 0 {
        // signed zero regardless of the stored exponent
        return sgn << 31;
    }

    // Rebase from base 16 offset 64, radix point before the first digit, to
    // base 2 offset 127, radix point after the first digit:
    // (exp - 64) * 4 + 127 - 1 == (exp << 2) - 130.
    exp = (exp << 2) - 130;

    // (Re)normalise; at most three shifts for a normalised input.
    while fr < 0x8000_0000 {
        exp -= 1;
        fr <<= 1;
    }

    if exp <= 0 {
        // underflow; denormalise, or flush to signed zero past the last subnormal
        fr = if exp < -24 { 0 } else { fr >> -exp };
        exp = 0;
    } else if exp >= 255 {
        // overflow; signed infinity
        fr = 0;
        exp = 255;
    } else {
        // plain number; drop the now-explicit leading bit
        fr <<= 1;
    }

    (fr >> 9) | ((exp as u32) << 23) | (sgn << 31)
}

/// Encode an IEEE `f32` bit pattern as an IBM single precision float.
///
/// This is the inverse of [`ibm_to_ieee`]: the result is the 32-bit word to be
/// written big-endian to the file. Infinities and NaNs map to IBM's largest
/// finite magnitude with the sign preserved, zeroes are preserved, and excess
/// precision is truncated toward zero.
/// ```
/// # use segy_cube_core::bitconverter::{ibm_to_ieee, ieee_to_ibm};
/// let one = ieee_to_ibm(1.0f32.to_bits());
/// assert_eq!(one, 0x4110_0000);
/// assert_eq!(ieee_to_ibm(ibm_to_ieee(0x4110_0000)), 0x4110_0000);
/// ```
pub fn ieee_to_ibm(ieee: u32) -> u32 {
    let sgn = ieee >> 31;
    let mut fr = ieee << 1; // shift sign out
    let mut exp = (fr >> 24) as i32; // save exponent
    fr <<= 8; // shift exponent out

    if exp == 255 {
        // infinity or NaN; map to the largest finite magnitude
        return (0xffff_ff00u32 >> 8) | (0x7f << 24) | (sgn << 31);
    } else if exp > 0 {
        // restore the assumed digit
        fr = (fr >> 1) | 0x8000_0000;
    } else if fr == 0 {
        // signed zero
        return sgn << 31;
    }

    // Rebase from base 2 offset 127, radix point after the first digit, to base
    // 16 offset 64, radix point before the first digit.
    exp += 130;
    fr >>= (-exp & 3) as u32;
    exp = (exp + 3) >> 2;

    // (Re)normalise by nibbles; never executed for normalised input.
    while fr < 0x1000_0000 {
        exp -= 1;
        fr <<= 4;
    }

    (fr >> 8) | ((exp as u32) << 24) | (sgn << 31)
}

/// Convert the raw samples of one trace to host IEEE floats, in place.
///
/// The buffer is expected to hold the wire bytes exactly as they were read (see
/// `SegyFile::read_trace_data`, which never transcodes). IBM floats are decoded,
/// IEEE floats are byte swapped from big-endian, and every other format is left
/// untouched for the caller to interpret; a caller that needs the narrow integer
/// formats widened must do so itself.
pub fn to_native(format: SampleFormatCode, samples: &mut [f32]) {
    match format {
        SampleFormatCode::IbmFloat32 => {
            for s in samples.iter_mut() {
                *s = f32::from_bits(ibm_to_ieee(u32::from_be(s.to_bits())));
            }
        }
        SampleFormatCode::Float32 => {
            for s in samples.iter_mut() {
                *s = f32::from_bits(u32::from_be(s.to_bits()));
            }
        }
        _ => {}
    }
}

/// Convert host IEEE floats back to the wire representation, in place.
///
/// The inverse of [`to_native`]; after this the buffer can be handed to
/// `SegyFile::write_trace_data` verbatim.
pub fn from_native(format: SampleFormatCode, samples: &mut [f32]) {
    match format {
        SampleFormatCode::IbmFloat32 => {
            for s in samples.iter_mut() {
                *s = f32::from_bits(u32::to_be(ieee_to_ibm(s.to_bits())));
            }
        }
        SampleFormatCode::Float32 => {
            for s in samples.iter_mut() {
                *s = f32::from_bits(u32::to_be(s.to_bits()));
            }
        }
        _ => {}
    }
}

/// Transcode a text header buffer from EBCDIC to ASCII, in place.
/// ```
/// # use segy_cube_core::bitconverter::ebcdic_to_ascii;
/// let mut buf = [0xC1, 0x40, 0xC2];
/// ebcdic_to_ascii(&mut buf);
/// assert_eq!(&buf, b"A B");
/// ```
pub fn ebcdic_to_ascii(buf: &mut [u8]) {
    for b in buf.iter_mut() {
        *b = ebcdic::to_ascii(*b);
    }
}

/// Transcode a text header buffer from ASCII to EBCDIC, in place. This is the
/// exact inverse of [`ebcdic_to_ascii`] on the printable subset, so a header
/// read by this library and written back is preserved bit for bit.
pub fn ascii_to_ebcdic(buf: &mut [u8]) {
    for b in buf.iter_mut() {
        *b = ascii::to_ebcdic(*b);
    }
}

/// A helper function to convert ascii null terminated to string.
///
/// This function assumes that the string is ascii and will truncate it at the first null byte.
/// ```
/// # use segy_cube_core::bitconverter::ascii_bytes_to_string;
/// let input = b"I am an ascii string 123456!?";
/// let output = ascii_bytes_to_string(input);
/// assert_eq!(&output, "I am an ascii string 123456!?");
///
/// let input = b"hello\0world";
/// let output = ascii_bytes_to_string(&input[..]);
/// assert_eq!(&output, "hello");
/// ```
pub fn ascii_bytes_to_string(bytes: &[u8]) -> String {
    let mut bytes = bytes.to_vec();
    let i = bytes.iter().position(|x| *x == 0).unwrap_or(bytes.len());
    bytes.truncate(i);
    String::from_utf8_lossy(&bytes).to_string()
}
