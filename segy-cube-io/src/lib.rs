//! This is a library for random access to SEG-Y rev.1 files: reading and writing
//! individual traces, trace headers and file headers at any position, without
//! holding potentially very large SEG-Y files in memory, and reconstructing the
//! implicit inline × crossline × offset geometry of a file from its trace headers
//! alone.
//!
//! The library was designed to follow the SEG Technical Standards Committee's
//! SEG-Y rev.1 standard (from 2002).
//!
//! A [`SegyFile`] starts out with plain buffered stream I/O and can be upgraded to
//! a memory-mapped view with [`SegyFile::mmap`]; every operation behaves
//! identically in both modes. Trace addressing is explicit: most operations take
//! the byte position of the first trace (`trace0`, from
//! [`fields::trace0`]) and the byte size of one trace's data
//! (`trace_bsize`, from [`fields::trace_bsize`]), so a handle carries no
//! geometry state of its own.
extern crate memmap2;
#[cfg(test)]
extern crate tempfile;

mod backend;
pub mod geometry;

pub use segy_cube_core::bitconverter;
pub use segy_cube_core::enums::{SampleFormatCode, Sorting, TraceSortingCode};
pub use segy_cube_core::errors::SegyError;
pub use segy_cube_core::fields;
pub use segy_cube_core::fields::{BinField, TraceField};
pub use segy_cube_core::SegySettings;
pub use segy_cube_core::{
    BIN_HEADER_LEN, CROSSLINE_BYTE_LOCATION, INLINE_BYTE_LOCATION, OFFSET_BYTE_LOCATION,
    TEXT_HEADER_LEN, TRACE_HEADER_LEN,
};

pub use geometry::{crossline_stride, inline_stride, line_trace0, Geometry};

use backend::Backend;

use std::fs::File;
use std::path::Path;

/// How a [`SegyFile`] is opened. The variants are the access modes of the C stdio
/// `fopen` (always in binary), and they parse from and print as those strings for
/// interop with the C conventions of the format's tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub enum OpenMode {
    /// `"rb"`: read an existing file.
    Read,
    /// `"wb"`: create (or truncate) a file for writing.
    Write,
    /// `"ab"`: create or extend a file; all writes go to the end.
    Append,
    /// `"r+b"`: read and write an existing file.
    ReadUpdate,
    /// `"w+b"`: create (or truncate) a file for reading and writing.
    WriteUpdate,
    /// `"a+b"`: create or extend a file; reads anywhere, writes at the end.
    AppendUpdate,
}

impl OpenMode {
    /// Parse a C stdio mode string.
    /// ```
    /// # use segy_cube_io::OpenMode;
    /// assert_eq!(OpenMode::from_stdio("r+b").unwrap(), OpenMode::ReadUpdate);
    /// assert_eq!(OpenMode::ReadUpdate.as_stdio(), "r+b");
    /// assert!(OpenMode::from_stdio("rw").is_err());
    /// ```
    pub fn from_stdio(mode: &str) -> Result<Self, SegyError> {
        match mode {
            "rb" => Ok(OpenMode::Read),
            "wb" => Ok(OpenMode::Write),
            "ab" => Ok(OpenMode::Append),
            "r+b" => Ok(OpenMode::ReadUpdate),
            "w+b" => Ok(OpenMode::WriteUpdate),
            "a+b" => Ok(OpenMode::AppendUpdate),
            other => Err(SegyError::InvalidArgs {
                msg: format!("\"{}\" is not a binary stdio mode", other),
            }),
        }
    }

    /// The C stdio spelling of this mode.
    pub fn as_stdio(self) -> &'static str {
        match self {
            OpenMode::Read => "rb",
            OpenMode::Write => "wb",
            OpenMode::Append => "ab",
            OpenMode::ReadUpdate => "r+b",
            OpenMode::WriteUpdate => "w+b",
            OpenMode::AppendUpdate => "a+b",
        }
    }

    /// Whether read operations are permitted in this mode.
    pub fn readable(self) -> bool {
        !matches!(self, OpenMode::Write | OpenMode::Append)
    }

    /// Whether write operations are permitted in this mode.
    pub fn writable(self) -> bool {
        !matches!(self, OpenMode::Read)
    }

    fn open_options(self) -> std::fs::OpenOptions {
        let mut options = std::fs::OpenOptions::new();
        match self {
            OpenMode::Read => {
                options.read(true);
            }
            OpenMode::Write => {
                options.write(true).create(true).truncate(true);
            }
            OpenMode::Append => {
                options.append(true).create(true);
            }
            OpenMode::ReadUpdate => {
                options.read(true).write(true);
            }
            OpenMode::WriteUpdate => {
                options.read(true).write(true).create(true).truncate(true);
            }
            OpenMode::AppendUpdate => {
                options.read(true).append(true).create(true);
            }
        }
        options
    }
}

impl std::str::FromStr for OpenMode {
    type Err = SegyError;
    fn from_str(s: &str) -> Result<Self, SegyError> {
        OpenMode::from_stdio(s)
    }
}

/// An open SEG-Y file.
///
/// The handle owns the OS file exclusively and is single threaded; callers that
/// want parallelism open one handle per thread. Operations on a handle are totally
/// ordered by call order.
///
/// All trace-addressed operations seek first, so interleaving reads and writes at
/// arbitrary positions is fine. Writes become durable with [`Self::flush`] (or
/// [`Self::close`], which flushes).
/// ```
/// use segy_cube_io::{OpenMode, SegyFile};
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("fresh.sgy");
///
/// let mut file = SegyFile::open(&path, OpenMode::WriteUpdate).unwrap();
/// file.write_text_header(0, "C 1 CLIENT: EXAMPLE AS").unwrap();
///
/// let text = file.read_text_header(0).unwrap();
/// assert_eq!(text.len(), 3200);
/// assert!(text.starts_with("C 1 CLIENT: EXAMPLE AS"));
/// ```
pub struct SegyFile {
    pub(crate) file: File,
    pub(crate) mode: OpenMode,
    pub(crate) backend: Backend,
}

impl SegyFile {
    /// Open `path` in the given mode. The handle starts out with buffered stream
    /// I/O; see [`Self::mmap`] for the memory-mapped alternative.
    pub fn open<P: AsRef<Path>>(path: P, mode: OpenMode) -> Result<Self, SegyError> {
        let file = mode
            .open_options()
            .open(path)
            .map_err(SegyError::FileOpen)?;
        Ok(SegyFile {
            file,
            mode,
            backend: Backend::Buffered,
        })
    }

    /// The mode the file was opened with.
    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    /// Whether the handle has been upgraded to a memory map.
    pub fn is_mapped(&self) -> bool {
        !matches!(self.backend, Backend::Buffered)
    }

    /// The current size of the underlying file in bytes. For a mapped handle this
    /// is the mapped length, which is fixed at [`Self::mmap`] time.
    pub fn file_size(&self) -> Result<u64, SegyError> {
        match &self.backend {
            Backend::Buffered => Ok(self
                .file
                .metadata()
                .map_err(SegyError::FileSeek)?
                .len()),
            Backend::Mapped { map, .. } => Ok(map.len() as u64),
        }
    }

    /// The byte position of trace `traceno`: `trace0 + traceno * (240 + trace_bsize)`.
    pub fn trace_position(traceno: usize, trace0: u64, trace_bsize: usize) -> u64 {
        trace0 + traceno as u64 * (TRACE_HEADER_LEN + trace_bsize) as u64
    }

    /// Reposition the handle at the start of trace `traceno`.
    ///
    /// With buffered I/O this is a 64-bit absolute seek (no repeated relative
    /// stepping is needed on any platform std supports); with a map it moves the
    /// cursor, and a position at or past the mapped length is a seek error.
    pub fn seek(&mut self, traceno: usize, trace0: u64, trace_bsize: usize) -> Result<(), SegyError> {
        self.io_seek(Self::trace_position(traceno, trace0, trace_bsize))
    }

    /// Read the 240-byte header of trace `traceno` into `buf`, untranslated.
    pub fn read_traceheader(
        &mut self,
        traceno: usize,
        trace0: u64,
        trace_bsize: usize,
        buf: &mut [u8; TRACE_HEADER_LEN],
    ) -> Result<(), SegyError> {
        self.require_readable()?;
        self.seek(traceno, trace0, trace_bsize)?;
        self.io_read(buf)
    }

    /// Write the 240-byte header of trace `traceno` from `buf`, untranslated.
    pub fn write_traceheader(
        &mut self,
        traceno: usize,
        trace0: u64,
        trace_bsize: usize,
        buf: &[u8; TRACE_HEADER_LEN],
    ) -> Result<(), SegyError> {
        self.require_writable()?;
        self.seek(traceno, trace0, trace_bsize)?;
        self.io_write(buf)
    }

    /// Read the sample data of trace `traceno` into `buf`.
    ///
    /// `buf` must hold exactly `trace_bsize / 4` values. The slots receive the
    /// wire bytes verbatim; nothing is transcoded here. Pass the buffer to
    /// [`bitconverter::to_native`] to obtain host floats.
    pub fn read_trace_data(
        &mut self,
        traceno: usize,
        trace0: u64,
        trace_bsize: usize,
        buf: &mut [f32],
    ) -> Result<(), SegyError> {
        self.require_readable()?;
        check_data_len(buf.len(), trace_bsize)?;
        self.seek(traceno, trace0, trace_bsize)?;
        self.io_skip(TRACE_HEADER_LEN as u64)?;

        let mut raw = vec![0u8; trace_bsize];
        self.io_read(&mut raw)?;
        for (slot, ch) in buf.iter_mut().zip(raw.chunks_exact(4)) {
            *slot = f32::from_bits(u32::from_ne_bytes([ch[0], ch[1], ch[2], ch[3]]));
        }
        Ok(())
    }

    /// Write the sample data of trace `traceno` from `buf`.
    ///
    /// The inverse of [`Self::read_trace_data`]: the slots are written to the file
    /// verbatim, so the caller converts host floats with
    /// [`bitconverter::from_native`] first.
    pub fn write_trace_data(
        &mut self,
        traceno: usize,
        trace0: u64,
        trace_bsize: usize,
        buf: &[f32],
    ) -> Result<(), SegyError> {
        self.require_writable()?;
        check_data_len(buf.len(), trace_bsize)?;
        self.seek(traceno, trace0, trace_bsize)?;
        self.io_skip(TRACE_HEADER_LEN as u64)?;

        let mut raw = Vec::with_capacity(trace_bsize);
        for s in buf {
            raw.extend_from_slice(&s.to_bits().to_ne_bytes());
        }
        self.io_write(&raw)
    }

    /// Read a text header as an ASCII string of 3200 characters. `pos == 0` is the
    /// main text header; `pos >= 1` addresses the extended text headers that
    /// follow the binary header.
    ///
    /// EBCDIC headers are transcoded; headers that are already printable ASCII
    /// (common in the wild, against the letter of the standard) are passed
    /// through. The returned `String` carries its length explicitly; C callers
    /// that expect a trailing NUL append it themselves.
    pub fn read_text_header(&mut self, pos: usize) -> Result<String, SegyError> {
        self.require_readable()?;
        self.io_seek(text_header_position(pos))?;

        let mut buf = [0u8; TEXT_HEADER_LEN];
        self.io_read(&mut buf)?;
        if !buf.iter().all(|c| c.is_ascii() && !c.is_ascii_control()) {
            bitconverter::ebcdic_to_ascii(&mut buf);
        }
        Ok(String::from_utf8_lossy(&buf).to_string())
    }

    /// Write `text` as the text header at `pos` (see [`Self::read_text_header`]),
    /// padded to 3200 characters with spaces and transcoded to EBCDIC. Text longer
    /// than 3200 bytes is refused.
    pub fn write_text_header(&mut self, pos: usize, text: &str) -> Result<(), SegyError> {
        self.require_writable()?;
        let raw = text.as_bytes();
        if raw.len() > TEXT_HEADER_LEN {
            return Err(SegyError::InvalidArgs {
                msg: format!("Text header is {} bytes but at most 3200 fit", raw.len()),
            });
        }

        let mut buf = [b' '; TEXT_HEADER_LEN];
        buf[..raw.len()].copy_from_slice(raw);
        bitconverter::ascii_to_ebcdic(&mut buf);

        self.io_seek(text_header_position(pos))?;
        self.io_write(&buf)
    }

    /// Read the 400-byte binary header, untranslated. Individual fields are
    /// accessed with [`fields::get_bfield`] and friends.
    pub fn read_binheader(&mut self) -> Result<[u8; BIN_HEADER_LEN], SegyError> {
        self.require_readable()?;
        self.io_seek(TEXT_HEADER_LEN as u64)?;
        let mut buf = [0u8; BIN_HEADER_LEN];
        self.io_read(&mut buf)?;
        Ok(buf)
    }

    /// Write the 400-byte binary header, untranslated.
    pub fn write_binheader(&mut self, buf: &[u8; BIN_HEADER_LEN]) -> Result<(), SegyError> {
        self.require_writable()?;
        self.io_seek(TEXT_HEADER_LEN as u64)?;
        self.io_write(buf)
    }

    /// The number of traces in the file: `(file_size - trace0) / (240 + trace_bsize)`.
    ///
    /// The division must be exact; a remainder means the file does not consist of
    /// whole traces of the declared size and is reported as such. All traces are
    /// assumed to be of the same size.
    pub fn trace_count(&mut self, trace0: u64, trace_bsize: usize) -> Result<usize, SegyError> {
        let fsize = self.file_size()?;
        let block = (TRACE_HEADER_LEN + trace_bsize) as u64;

        let data_len = fsize
            .checked_sub(trace0)
            .ok_or(SegyError::TraceSizeMismatch {
                data_len: fsize,
                trace_bsize,
            })?;
        if data_len % block != 0 {
            return Err(SegyError::TraceSizeMismatch {
                data_len,
                trace_bsize,
            });
        }
        Ok((data_len / block) as usize)
    }

    /// Flush written data towards the disk: the mapped view is synced first (if
    /// any), then the stream. With `async_flush` the map sync is initiated but not
    /// awaited and the stream sync is skipped.
    pub fn flush(&mut self, async_flush: bool) -> Result<(), SegyError> {
        self.map_flush(async_flush)?;
        if !async_flush && self.mode.writable() {
            self.file.sync_data().map_err(SegyError::FileWrite)?;
        }
        Ok(())
    }

    /// Flush, unmap and close the file. Dropping the handle also unmaps and
    /// closes, but without the final flush and without error reporting.
    pub fn close(mut self) -> Result<(), SegyError> {
        self.flush(false)
    }

    fn require_readable(&self) -> Result<(), SegyError> {
        if self.mode.readable() {
            Ok(())
        } else {
            Err(SegyError::InvalidArgs {
                msg: format!(
                    "A handle opened as \"{}\" cannot be read from",
                    self.mode.as_stdio()
                ),
            })
        }
    }

    fn require_writable(&self) -> Result<(), SegyError> {
        if self.mode.writable() {
            Ok(())
        } else {
            Err(SegyError::InvalidArgs {
                msg: format!(
                    "A handle opened as \"{}\" cannot be written to",
                    self.mode.as_stdio()
                ),
            })
        }
    }
}

/// Text header `pos == 0` sits at the start of the file; extended text headers
/// follow the binary header back to back.
fn text_header_position(pos: usize) -> u64 {
    if pos == 0 {
        0
    } else {
        (TEXT_HEADER_LEN + BIN_HEADER_LEN + (pos - 1) * TEXT_HEADER_LEN) as u64
    }
}

fn check_data_len(len: usize, trace_bsize: usize) -> Result<(), SegyError> {
    if len * 4 != trace_bsize {
        return Err(SegyError::InvalidArgs {
            msg: format!(
                "Data buffer holds {} samples but the trace holds {}",
                len,
                trace_bsize / 4
            ),
        });
    }
    Ok(())
}
