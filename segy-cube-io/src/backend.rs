//! The dual I/O backend of [`SegyFile`]: plain buffered stream I/O, or a memory
//! map over the whole file with a moving cursor. Every read, write and seek
//! dispatches on the backend variant; the two must stay byte-for-byte equivalent
//! as observed through the public operations.
use crate::{SegyError, SegyFile};

use memmap2::{Mmap, MmapMut, MmapOptions};
use std::io::{Read, Seek, SeekFrom, Write};

pub(crate) enum Backend {
    /// Stream I/O through the owned file handle.
    Buffered,
    /// The whole file mapped into memory. The stream handle stays open underneath
    /// for flushing and metadata, but carries no data traffic while mapped.
    Mapped { map: MapView, cursor: usize },
}

pub(crate) enum MapView {
    Ro(Mmap),
    Rw(MmapMut),
}

impl MapView {
    pub(crate) fn len(&self) -> usize {
        match self {
            MapView::Ro(m) => m.len(),
            MapView::Rw(m) => m.len(),
        }
    }

    fn as_slice(&self) -> &[u8] {
        match self {
            MapView::Ro(m) => m,
            MapView::Rw(m) => m,
        }
    }
}

/// Mapped-mode addressing failures surface as seek errors: the position simply
/// does not exist in the mapped length.
fn past_mapped_end(pos: u64, len: usize) -> SegyError {
    SegyError::FileSeek(std::io::Error::new(
        std::io::ErrorKind::UnexpectedEof,
        format!("position {} is beyond the mapped length {}", pos, len),
    ))
}

impl SegyFile {
    /// Upgrade the handle from buffered stream I/O to a memory map over the whole
    /// file, read-only or read-write according to the open mode. A handle is
    /// mapped at most once, and the mapped length is fixed: traces cannot be
    /// appended through a map.
    pub fn mmap(&mut self) -> Result<(), SegyError> {
        if cfg!(not(any(unix, windows))) {
            return Err(SegyError::MmapUnavailable);
        }
        if self.is_mapped() {
            return Err(SegyError::InvalidArgs {
                msg: "The file is already memory mapped".to_string(),
            });
        }

        let map = if self.mode.writable() {
            let m = unsafe { MmapOptions::new().map_mut(&self.file) }
                .map_err(SegyError::MmapFailed)?;
            MapView::Rw(m)
        } else {
            let m =
                unsafe { MmapOptions::new().map(&self.file) }.map_err(SegyError::MmapFailed)?;
            MapView::Ro(m)
        };
        self.backend = Backend::Mapped { map, cursor: 0 };
        Ok(())
    }

    pub(crate) fn io_seek(&mut self, pos: u64) -> Result<(), SegyError> {
        match &mut self.backend {
            Backend::Buffered => {
                self.file
                    .seek(SeekFrom::Start(pos))
                    .map_err(SegyError::FileSeek)?;
                Ok(())
            }
            Backend::Mapped { map, cursor } => {
                if pos >= map.len() as u64 {
                    return Err(past_mapped_end(pos, map.len()));
                }
                *cursor = pos as usize;
                Ok(())
            }
        }
    }

    pub(crate) fn io_skip(&mut self, n: u64) -> Result<(), SegyError> {
        match &mut self.backend {
            Backend::Buffered => {
                self.file
                    .seek(SeekFrom::Current(n as i64))
                    .map_err(SegyError::FileSeek)?;
                Ok(())
            }
            Backend::Mapped { map, cursor } => {
                let pos = *cursor as u64 + n;
                if pos >= map.len() as u64 {
                    return Err(past_mapped_end(pos, map.len()));
                }
                *cursor = pos as usize;
                Ok(())
            }
        }
    }

    pub(crate) fn io_read(&mut self, buf: &mut [u8]) -> Result<(), SegyError> {
        match &mut self.backend {
            Backend::Buffered => self.file.read_exact(buf).map_err(SegyError::FileRead),
            Backend::Mapped { map, cursor } => {
                let end = *cursor + buf.len();
                if end > map.len() {
                    return Err(past_mapped_end(end as u64, map.len()));
                }
                buf.copy_from_slice(&map.as_slice()[*cursor..end]);
                *cursor = end;
                Ok(())
            }
        }
    }

    pub(crate) fn io_write(&mut self, buf: &[u8]) -> Result<(), SegyError> {
        match &mut self.backend {
            Backend::Buffered => self.file.write_all(buf).map_err(SegyError::FileWrite),
            Backend::Mapped { map, cursor } => {
                let end = *cursor + buf.len();
                if end > map.len() {
                    return Err(past_mapped_end(end as u64, map.len()));
                }
                match map {
                    MapView::Rw(m) => {
                        m[*cursor..end].copy_from_slice(buf);
                        *cursor = end;
                        Ok(())
                    }
                    // Unreachable through the public operations; the mode gate
                    // refuses writes before they get here.
                    MapView::Ro(_) => Err(SegyError::InvalidArgs {
                        msg: "The mapping is read-only".to_string(),
                    }),
                }
            }
        }
    }

    /// Sync the mapped view, if there is a writable one. Part of [`Self::flush`].
    pub(crate) fn map_flush(&mut self, async_flush: bool) -> Result<(), SegyError> {
        if let Backend::Mapped {
            map: MapView::Rw(m),
            ..
        } = &self.backend
        {
            let res = if async_flush {
                m.flush_async()
            } else {
                m.flush()
            };
            res.map_err(SegyError::FileWrite)?;
        }
        Ok(())
    }
}
