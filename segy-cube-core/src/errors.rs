/// Basic Error types.
///
/// Every fallible operation in the workspace reports one of these variants. I/O
/// failures keep the platform error alongside so that callers can distinguish
/// between, say, a permissions problem and a short file.
#[derive(Debug)]
pub enum SegyError {
    /// The file could not be opened (path, permissions).
    FileOpen(std::io::Error),
    /// Repositioning the stream, or moving the mapped cursor out of bounds.
    FileSeek(std::io::Error),
    /// A read from the underlying file failed or came up short.
    FileRead(std::io::Error),
    /// A write to the underlying file failed or came up short.
    FileWrite(std::io::Error),
    /// The platform has no memory mapping primitive.
    MmapUnavailable,
    /// The memory mapping call itself failed.
    MmapFailed(std::io::Error),
    /// The byte offset does not name a recognised header field.
    InvalidField { byte: usize },
    /// A malformed request (wrong buffer length, bad mode, bad slice step...).
    InvalidArgs { msg: String },
    /// The sorting of the file could not be determined, or the traces do not
    /// tile a regular inline/crossline grid.
    InvalidSorting,
    /// The measured offset count cannot be reconciled with the trace count.
    InvalidOffsets { offsets: usize, traces: usize },
    /// The trace data region is not a whole number of traces.
    TraceSizeMismatch { data_len: u64, trace_bsize: usize },
    /// The requested line number is not present in the file.
    MissingLineIndex { lineno: i32 },
}

impl std::fmt::Display for SegyError {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use self::SegyError::*;
        match self {
            FileOpen(x) => write!(fmt, "Could not open file: {}", x),
            FileSeek(x) => write!(fmt, "Could not seek: {}", x),
            FileRead(x) => write!(fmt, "Could not read: {}", x),
            FileWrite(x) => write!(fmt, "Could not write: {}", x),
            MmapUnavailable => write!(fmt, "No memory mapping primitive on this platform"),
            MmapFailed(x) => write!(fmt, "Could not create file map: {}", x),
            InvalidField { byte } => write!(fmt, "No header field at byte offset {}", byte),
            InvalidArgs { msg } => write!(fmt, "Invalid arguments: {}", msg),
            InvalidSorting => write!(fmt, "Could not determine inline/crossline sorting"),
            InvalidOffsets { offsets, traces } => write!(
                fmt,
                "Impossible offset count ({} offsets for {} traces)",
                offsets, traces
            ),
            TraceSizeMismatch { data_len, trace_bsize } => write!(
                fmt,
                "Trace data region ({} bytes) is not divisible into {}-byte traces",
                data_len,
                trace_bsize + crate::TRACE_HEADER_LEN,
            ),
            MissingLineIndex { lineno } => write!(fmt, "Line no. {} not found", lineno),
        }
    }
}

impl From<SegyError> for String {
    fn from(e: SegyError) -> String {
        e.to_string()
    }
}

impl std::error::Error for SegyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use self::SegyError::*;
        match self {
            FileOpen(x) | FileSeek(x) | FileRead(x) | FileWrite(x) | MmapFailed(x) => x.source(),
            _ => None,
        }
    }
}
