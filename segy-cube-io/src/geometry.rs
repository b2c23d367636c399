//! Reconstruction of the inline × crossline × offset cube of a SEG-Y file from
//! sparse trace header inspection.
//!
//! Nothing about the cube is stored explicitly in the file: the trace headers
//! carry an inline number, a crossline number and an offset (source-receiver
//! distance) each, and the traces appear in some regular order. This module
//! deduces that order ([`SegyFile::sorting`]), the number of offsets per bin
//! ([`SegyFile::offset_count`]), the line counts ([`SegyFile::lines_count`]) and
//! the line numbers in file order, by reading only a handful of headers rather
//! than scanning the file. [`SegyFile::survey_geometry`] runs the whole chain.
//!
//! Line addressing works in trace indices: [`line_trace0`] locates the first
//! trace of a line, the stride functions give the index distance between its
//! consecutive traces, and [`SegyFile::read_line`] / [`SegyFile::write_line`]
//! move whole lines at once.
use crate::fields::{self, get_field, BinField, TraceField};
use crate::{SegyError, SegyFile, SegySettings, Sorting};
use crate::{OFFSET_BYTE_LOCATION, TRACE_HEADER_LEN};

/// The inferred shape of a file: the cube dimensions and the line numbers in
/// file order (not sorted numerically; each appears exactly once).
///
/// The invariant `inline_count * crossline_count * offset_count == trace count`
/// holds for every descriptor produced by [`SegyFile::survey_geometry`].
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub sorting: Sorting,
    pub inline_count: usize,
    pub crossline_count: usize,
    pub offset_count: usize,
    pub inline_indices: Vec<i32>,
    pub crossline_indices: Vec<i32>,
    pub offset_indices: Vec<i32>,
}

impl Geometry {
    /// The number of traces the cube accounts for.
    pub fn trace_count(&self) -> usize {
        self.inline_count * self.crossline_count * self.offset_count
    }

    /// Index distance between consecutive traces of one inline.
    pub fn inline_stride(&self) -> usize {
        inline_stride(self.sorting, self.inline_count)
    }

    /// Index distance between consecutive traces of one crossline.
    pub fn crossline_stride(&self) -> usize {
        crossline_stride(self.sorting, self.crossline_count)
    }

    /// The index of the first trace of inline `lineno`, at the first offset.
    pub fn inline_trace0(&self, lineno: i32) -> Result<usize, SegyError> {
        line_trace0(
            lineno,
            self.crossline_count,
            self.inline_stride(),
            self.offset_count,
            &self.inline_indices,
        )
    }

    /// The index of the first trace of crossline `lineno`, at the first offset.
    pub fn crossline_trace0(&self, lineno: i32) -> Result<usize, SegyError> {
        line_trace0(
            lineno,
            self.inline_count,
            self.crossline_stride(),
            self.offset_count,
            &self.crossline_indices,
        )
    }
}

/// Locate a line by its line number.
///
/// `linenos` are the line numbers in file order, `line_length` is the number of
/// traces in one such line, and `stride` the index distance between them (see
/// [`inline_stride`] / [`crossline_stride`]). The result is the index of the
/// line's first trace at the first offset, already scaled by `offsets`; it can be
/// handed to [`SegyFile::read_line`] and [`SegyFile::write_line`] as is.
/// ```
/// # use segy_cube_io::{line_trace0, SegyError};
/// // Five crosslines per inline, inline-sorted (stride 1), one offset.
/// let inlines = [1, 2, 3, 4, 5];
/// assert_eq!(line_trace0(3, 5, 1, 1, &inlines).unwrap(), 10);
/// assert!(matches!(
///     line_trace0(17, 5, 1, 1, &inlines),
///     Err(SegyError::MissingLineIndex { lineno: 17 })
/// ));
/// ```
pub fn line_trace0(
    lineno: i32,
    line_length: usize,
    stride: usize,
    offsets: usize,
    linenos: &[i32],
) -> Result<usize, SegyError> {
    let index = linenos
        .iter()
        .position(|&x| x == lineno)
        .ok_or(SegyError::MissingLineIndex { lineno })?;

    // In the fast direction whole lines are contiguous, so the position counts
    // line lengths; in the slow direction it counts single traces.
    let index = if stride == 1 { index * line_length } else { index };
    Ok(index * offsets)
}

/// Index distance between consecutive traces of an inline. Under inline sorting
/// an inline is contiguous; under crossline sorting its traces sit one per
/// crossline gather.
pub fn inline_stride(sorting: Sorting, inline_count: usize) -> usize {
    match sorting {
        Sorting::Inline => 1,
        Sorting::Crossline => inline_count,
    }
}

/// Index distance between consecutive traces of a crossline; the mirror image of
/// [`inline_stride`].
pub fn crossline_stride(sorting: Sorting, crossline_count: usize) -> usize {
    match sorting {
        Sorting::Inline => crossline_count,
        Sorting::Crossline => 1,
    }
}

impl SegyFile {
    /// The sample interval in milliseconds.
    ///
    /// The binary header and the first trace header both declare the interval (in
    /// microseconds); whichever is non-zero is used, and if both are non-zero but
    /// disagree the binary header wins. Two zeroes give 0.0.
    pub fn sample_interval(&mut self) -> Result<f64, SegyError> {
        let bin = self.read_binheader()?;
        let samples = fields::samples(&bin)?;
        let trace0 = fields::trace0(&bin)?;
        let trace_bsize = fields::trace_bsize(samples);

        let mut header = [0u8; TRACE_HEADER_LEN];
        self.read_traceheader(0, trace0, trace_bsize, &mut header)?;

        let bin_dt_us = fields::get_bfield(&bin, BinField::Interval as usize)?;
        let trace_dt_us = get_field(&header, TraceField::SampleInterval as usize)?;

        let dt_us = if bin_dt_us == 0 { trace_dt_us } else { bin_dt_us };
        Ok(dt_us as f64 / 1000.0)
    }

    /// The recording times of `count` consecutive samples, starting at `t0`
    /// milliseconds, spaced by the file's [`Self::sample_interval`].
    pub fn sample_indexes(&mut self, t0: f64, count: usize) -> Result<Vec<f64>, SegyError> {
        let dt = self.sample_interval()?;
        Ok((0..count).map(|i| t0 + i as f64 * dt).collect())
    }

    /// Determine how the file is sorted: which of the inline number (at
    /// `il_byte`) and crossline number (at `xl_byte`) varies fastest.
    ///
    /// Trace 0 is compared against the first trace of the *next* gather, found by
    /// walking forward until the offset field matches trace 0's again. Whichever
    /// line number stayed put is the slow direction. Degenerate M×1, 1×N and 1×1
    /// files have no second gather to compare against, so the last trace is
    /// checked first and the non-1 dimension taken as the sorting; files where
    /// neither rule bites are reported as unsortable.
    pub fn sorting(
        &mut self,
        il_byte: usize,
        xl_byte: usize,
        trace0: u64,
        trace_bsize: usize,
    ) -> Result<Sorting, SegyError> {
        for byte in [il_byte, xl_byte] {
            if fields::trace_field_width(byte) == 0 {
                return Err(SegyError::InvalidField { byte });
            }
        }

        let mut header = [0u8; TRACE_HEADER_LEN];
        self.read_traceheader(0, trace0, trace_bsize, &mut header)?;
        let il0 = get_field(&header, il_byte)?;
        let xl0 = get_field(&header, xl_byte)?;
        let off0 = get_field(&header, OFFSET_BYTE_LOCATION)?;

        let traces = self.trace_count(trace0, trace_bsize)?;

        let (mut il1, mut xl1) = (il0, xl0);
        let mut traceno = 1;
        while traceno < traces {
            self.read_traceheader(traceno, trace0, trace_bsize, &mut header)?;
            il1 = get_field(&header, il_byte)?;
            xl1 = get_field(&header, xl_byte)?;
            let off1 = get_field(&header, OFFSET_BYTE_LOCATION)?;
            traceno += 1;
            if off0 == off1 {
                break;
            }
        }

        self.read_traceheader(traces - 1, trace0, trace_bsize, &mut header)?;
        let il_last = get_field(&header, il_byte)?;
        let xl_last = get_field(&header, xl_byte)?;

        if il0 == il_last {
            Ok(Sorting::Crossline)
        } else if xl0 == xl_last {
            Ok(Sorting::Inline)
        } else if il0 == il1 {
            Ok(Sorting::Inline)
        } else if xl0 == xl1 {
            Ok(Sorting::Crossline)
        } else {
            Err(SegyError::InvalidSorting)
        }
    }

    /// The number of offsets per (inline, crossline) bin; 1 for 3-D files.
    ///
    /// Determined by advancing from trace 0 while both line numbers still match
    /// trace 0's: the traces of one bin are stored back to back.
    pub fn offset_count(
        &mut self,
        il_byte: usize,
        xl_byte: usize,
        traces: usize,
        trace0: u64,
        trace_bsize: usize,
    ) -> Result<usize, SegyError> {
        if traces == 1 {
            return Ok(1);
        }
        for byte in [il_byte, xl_byte] {
            if fields::trace_field_width(byte) == 0 {
                return Err(SegyError::InvalidField { byte });
            }
        }

        let mut header = [0u8; TRACE_HEADER_LEN];
        self.read_traceheader(0, trace0, trace_bsize, &mut header)?;
        let il0 = get_field(&header, il_byte)?;
        let xl0 = get_field(&header, xl_byte)?;

        let mut offsets = 0;
        loop {
            offsets += 1;
            if offsets == traces {
                break;
            }

            self.read_traceheader(offsets, trace0, trace_bsize, &mut header)?;
            let il1 = get_field(&header, il_byte)?;
            let xl1 = get_field(&header, xl_byte)?;
            if il0 != il1 || xl0 != xl1 {
                break;
            }
        }
        Ok(offsets)
    }

    /// Count lines along both directions by watching the fast-direction field (at
    /// `field_byte`) wrap around.
    ///
    /// Within one slow line the fast line number changes from bin to bin; it
    /// comes back to trace 0's value exactly when the next slow line starts.
    /// Jumping a whole bin (`offsets` traces) at a time, the number of jumps
    /// until the wrap is the fast-direction line count. The slow count follows as
    /// `traces / (fast_count * offsets)`. Returns (slow, fast).
    pub fn count_lines(
        &mut self,
        field_byte: usize,
        offsets: usize,
        trace0: u64,
        trace_bsize: usize,
    ) -> Result<(usize, usize), SegyError> {
        let traces = self.trace_count(trace0, trace_bsize)?;
        if offsets == 0 || offsets > traces {
            return Err(SegyError::InvalidOffsets { offsets, traces });
        }

        let mut header = [0u8; TRACE_HEADER_LEN];
        self.read_traceheader(0, trace0, trace_bsize, &mut header)?;
        let first_lineno = get_field(&header, field_byte)?;
        let first_offset = get_field(&header, OFFSET_BYTE_LOCATION)?;

        let mut lines = 1;
        let mut curr = offsets;
        loop {
            self.read_traceheader(curr, trace0, trace_bsize, &mut header)?;
            let lineno = get_field(&header, field_byte)?;
            let offset = get_field(&header, OFFSET_BYTE_LOCATION)?;
            if lineno == first_lineno && offset == first_offset {
                break;
            }
            curr += offsets;
            lines += 1;
        }

        let line_length = lines * offsets;
        Ok((traces / line_length, lines))
    }

    /// The inline and crossline counts, in that order: [`Self::count_lines`] with
    /// the fast field chosen by `sorting`, and the (slow, fast) pair swapped into
    /// (inline, crossline) accordingly.
    pub fn lines_count(
        &mut self,
        il_byte: usize,
        xl_byte: usize,
        sorting: Sorting,
        offsets: usize,
        trace0: u64,
        trace_bsize: usize,
    ) -> Result<(usize, usize), SegyError> {
        let field = match sorting {
            Sorting::Inline => xl_byte,
            Sorting::Crossline => il_byte,
        };
        let (slow, fast) = self.count_lines(field, offsets, trace0, trace_bsize)?;

        Ok(match sorting {
            Sorting::Inline => (slow, fast),
            Sorting::Crossline => (fast, slow),
        })
    }

    /// Harvest one header field from `count` traces, starting at `start_trace`
    /// and stepping by `stride` traces: the shared scanner behind the index
    /// collectors below.
    pub fn line_indices(
        &mut self,
        field_byte: usize,
        start_trace: usize,
        stride: usize,
        count: usize,
        trace0: u64,
        trace_bsize: usize,
    ) -> Result<Vec<i32>, SegyError> {
        if fields::trace_field_width(field_byte) == 0 {
            return Err(SegyError::InvalidField { byte: field_byte });
        }

        let mut header = [0u8; TRACE_HEADER_LEN];
        let mut out = Vec::with_capacity(count);
        let mut traceno = start_trace;
        for _ in 0..count {
            self.read_traceheader(traceno, trace0, trace_bsize, &mut header)?;
            out.push(get_field(&header, field_byte)?);
            traceno += stride;
        }
        Ok(out)
    }

    /// The inline numbers present in the file, in file order. Under inline
    /// sorting one trace per line length, under crossline sorting one per bin.
    #[allow(clippy::too_many_arguments)]
    pub fn inline_indices(
        &mut self,
        il_byte: usize,
        sorting: Sorting,
        inline_count: usize,
        crossline_count: usize,
        offsets: usize,
        trace0: u64,
        trace_bsize: usize,
    ) -> Result<Vec<i32>, SegyError> {
        let stride = match sorting {
            Sorting::Inline => crossline_count * offsets,
            Sorting::Crossline => offsets,
        };
        self.line_indices(il_byte, 0, stride, inline_count, trace0, trace_bsize)
    }

    /// The crossline numbers present in the file, in file order.
    #[allow(clippy::too_many_arguments)]
    pub fn crossline_indices(
        &mut self,
        xl_byte: usize,
        sorting: Sorting,
        inline_count: usize,
        crossline_count: usize,
        offsets: usize,
        trace0: u64,
        trace_bsize: usize,
    ) -> Result<Vec<i32>, SegyError> {
        let stride = match sorting {
            Sorting::Inline => offsets,
            Sorting::Crossline => inline_count * offsets,
        };
        self.line_indices(xl_byte, 0, stride, crossline_count, trace0, trace_bsize)
    }

    /// The offset values of one bin: the field at `offset_byte` from the first
    /// `offsets` traces of the file.
    pub fn offset_indices(
        &mut self,
        offset_byte: usize,
        offsets: usize,
        trace0: u64,
        trace_bsize: usize,
    ) -> Result<Vec<i32>, SegyError> {
        self.line_indices(offset_byte, 0, 1, offsets, trace0, trace_bsize)
    }

    /// Read a whole line into `buf`: `line_length` traces starting at the trace
    /// index `line_trace0` (as produced by [`line_trace0`], i.e. already scaled
    /// by the offset count), one every `stride * offsets` traces, sample buffers
    /// back to back. `buf` must hold exactly the line's samples.
    #[allow(clippy::too_many_arguments)]
    pub fn read_line(
        &mut self,
        line_trace0: usize,
        line_length: usize,
        stride: usize,
        offsets: usize,
        trace0: u64,
        trace_bsize: usize,
        buf: &mut [f32],
    ) -> Result<(), SegyError> {
        check_line_buf(buf.len(), line_length, trace_bsize)?;
        let samples_per_trace = trace_bsize / 4;
        let step = stride * offsets;

        let mut traceno = line_trace0;
        for chunk in buf.chunks_mut(samples_per_trace) {
            self.read_trace_data(traceno, trace0, trace_bsize, chunk)?;
            traceno += step;
        }
        Ok(())
    }

    /// Write a whole line from `buf`; the exact inverse of [`Self::read_line`],
    /// taking the same already-scaled `line_trace0`.
    #[allow(clippy::too_many_arguments)]
    pub fn write_line(
        &mut self,
        line_trace0: usize,
        line_length: usize,
        stride: usize,
        offsets: usize,
        trace0: u64,
        trace_bsize: usize,
        buf: &[f32],
    ) -> Result<(), SegyError> {
        check_line_buf(buf.len(), line_length, trace_bsize)?;
        let samples_per_trace = trace_bsize / 4;
        let step = stride * offsets;

        let mut traceno = line_trace0;
        for chunk in buf.chunks(samples_per_trace) {
            self.write_trace_data(traceno, trace0, trace_bsize, chunk)?;
            traceno += step;
        }
        Ok(())
    }

    /// Read a constant-time slice: the sample at index `depth` from the first
    /// trace of every bin (one trace in `offsets`), in file order. `buf` must
    /// hold one value per bin, i.e. `traces / offsets`. The slots receive wire
    /// bytes, as with [`Self::read_trace_data`].
    pub fn read_depth_slice(
        &mut self,
        depth: usize,
        traces: usize,
        offsets: usize,
        trace0: u64,
        trace_bsize: usize,
        buf: &mut [f32],
    ) -> Result<(), SegyError> {
        self.require_readable()?;
        if offsets == 0 || offsets > traces {
            return Err(SegyError::InvalidOffsets { offsets, traces });
        }
        if depth >= trace_bsize / 4 {
            return Err(SegyError::InvalidArgs {
                msg: format!(
                    "Depth {} is out of range for traces of {} samples",
                    depth,
                    trace_bsize / 4
                ),
            });
        }
        if buf.len() != traces / offsets {
            return Err(SegyError::InvalidArgs {
                msg: format!(
                    "Slice buffer holds {} values but the file has {} bins",
                    buf.len(),
                    traces / offsets
                ),
            });
        }

        for (i, slot) in buf.iter_mut().enumerate() {
            let pos = Self::trace_position(i * offsets, trace0, trace_bsize)
                + (TRACE_HEADER_LEN + depth * 4) as u64;
            self.io_seek(pos)?;
            let mut raw = [0u8; 4];
            self.io_read(&mut raw)?;
            *slot = f32::from_bits(u32::from_ne_bytes(raw));
        }
        Ok(())
    }

    /// Harvest one header field over a python-like trace slice
    /// `start..stop (step)`. `step` may be negative for a backwards scan, but
    /// not zero.
    pub fn field_forall(
        &mut self,
        field_byte: usize,
        start: i64,
        stop: i64,
        step: i64,
        trace0: u64,
        trace_bsize: usize,
    ) -> Result<Vec<i32>, SegyError> {
        if step == 0 {
            return Err(SegyError::InvalidArgs {
                msg: "A slice step of zero never reaches stop".to_string(),
            });
        }
        if fields::trace_field_width(field_byte) == 0 {
            return Err(SegyError::InvalidField { byte: field_byte });
        }

        let mut header = [0u8; TRACE_HEADER_LEN];
        let mut out = Vec::new();
        let mut i = start;
        while (step > 0 && i < stop) || (step < 0 && i > stop) {
            if i < 0 {
                return Err(SegyError::InvalidArgs {
                    msg: format!("Negative trace index {} in slice", i),
                });
            }
            self.read_traceheader(i as usize, trace0, trace_bsize, &mut header)?;
            out.push(get_field(&header, field_byte)?);
            i += step;
        }
        Ok(out)
    }

    /// Run the whole inference chain and return the [`Geometry`] descriptor:
    /// trace count, sorting, offset count, line counts, then the three index
    /// vectors. The trace header byte locations come from `settings`; everything
    /// else is taken from the binary header.
    ///
    /// A file whose traces do not tile a full `inline × crossline × offset` grid
    /// is rejected as unsortable.
    pub fn survey_geometry(&mut self, settings: &SegySettings) -> Result<Geometry, SegyError> {
        let bin = self.read_binheader()?;
        let samples = fields::samples(&bin)?;
        let trace0 = fields::trace0(&bin)?;
        let trace_bsize = fields::trace_bsize(samples);

        let il = settings.inline_no_byte();
        let xl = settings.crossline_no_byte();

        let traces = self.trace_count(trace0, trace_bsize)?;
        let sorting = self.sorting(il, xl, trace0, trace_bsize)?;
        let offset_count = self.offset_count(il, xl, traces, trace0, trace_bsize)?;
        let (inline_count, crossline_count) =
            self.lines_count(il, xl, sorting, offset_count, trace0, trace_bsize)?;

        if inline_count * crossline_count * offset_count != traces {
            return Err(SegyError::InvalidSorting);
        }

        let inline_indices = self.inline_indices(
            il,
            sorting,
            inline_count,
            crossline_count,
            offset_count,
            trace0,
            trace_bsize,
        )?;
        let crossline_indices = self.crossline_indices(
            xl,
            sorting,
            inline_count,
            crossline_count,
            offset_count,
            trace0,
            trace_bsize,
        )?;
        let offset_indices =
            self.offset_indices(settings.offset_byte(), offset_count, trace0, trace_bsize)?;

        Ok(Geometry {
            sorting,
            inline_count,
            crossline_count,
            offset_count,
            inline_indices,
            crossline_indices,
            offset_indices,
        })
    }
}

fn check_line_buf(len: usize, line_length: usize, trace_bsize: usize) -> Result<(), SegyError> {
    if trace_bsize < 4 {
        return Err(SegyError::InvalidArgs {
            msg: format!("A trace of {} bytes holds no samples", trace_bsize),
        });
    }
    if len != line_length * (trace_bsize / 4) {
        return Err(SegyError::InvalidArgs {
            msg: format!(
                "Line buffer holds {} samples but the line holds {}",
                len,
                line_length * (trace_bsize / 4)
            ),
        });
    }
    Ok(())
}
