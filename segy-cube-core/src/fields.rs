//! Typed access to individual header fields, addressed by the byte offsets of the
//! SEG-Y rev.1 standard.
//!
//! Trace header fields are addressed by their 1-based offset within the 240-byte
//! header (inline number at 189, crossline at 193, ...). Binary header fields keep
//! the standard's file-absolute offsets, i.e. they count from the start of the
//! *text* header: 3201..=3600. Two process-constant tables map each offset to a
//! field width of 0, 2 or 4 bytes; width 0 means no field starts there and any
//! access is refused with [`SegyError::InvalidField`].
//!
//! [`TraceField`] and [`BinField`] give the same offsets symbolic names; the raw
//! `usize` offsets remain the canonical identifiers for interop.
use num::ToPrimitive;

use crate::enums::SampleFormatCode;
use crate::errors::SegyError;
use crate::{BIN_HEADER_LEN, TEXT_HEADER_LEN, TRACE_HEADER_LEN};

/// Symbolic names for the trace header fields. The discriminant of each variant is
/// the 1-based byte offset of the field, so `TraceField::InlineNo as usize` can be
/// passed wherever a byte offset is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(C)]
pub enum TraceField {
    TraceSequenceLine = 1,
    TraceSequenceFile = 5,
    FieldRecord = 9,
    TraceNumber = 13,
    EnergySourcePoint = 17,
    Cdp = 21,
    CdpTrace = 25,
    TraceIdentificationCode = 29,
    NSummedTraces = 31,
    NStackedTraces = 33,
    DataUse = 35,
    Offset = 37,
    ReceiverGroupElevation = 41,
    SourceSurfaceElevation = 45,
    SourceDepth = 49,
    ReceiverDatumElevation = 53,
    SourceDatumElevation = 57,
    SourceWaterDepth = 61,
    GroupWaterDepth = 65,
    ElevationScalar = 69,
    SourceGroupScalar = 71,
    SourceX = 73,
    SourceY = 77,
    GroupX = 81,
    GroupY = 85,
    CoordinateUnits = 89,
    WeatheringVelocity = 91,
    SubWeatheringVelocity = 93,
    SourceUpholeTime = 95,
    GroupUpholeTime = 97,
    SourceStaticCorrection = 99,
    GroupStaticCorrection = 101,
    TotalStaticApplied = 103,
    LagTimeA = 105,
    LagTimeB = 107,
    DelayRecordingTime = 109,
    MuteTimeStart = 111,
    MuteTimeEnd = 113,
    SampleCount = 115,
    SampleInterval = 117,
    GainType = 119,
    InstrumentGainConstant = 121,
    InstrumentInitialGain = 123,
    Correlated = 125,
    SweepFrequencyStart = 127,
    SweepFrequencyEnd = 129,
    SweepLength = 131,
    SweepType = 133,
    SweepTraceTaperLengthStart = 135,
    SweepTraceTaperLengthEnd = 137,
    TaperType = 139,
    AliasFilterFrequency = 141,
    AliasFilterSlope = 143,
    NotchFilterFrequency = 145,
    NotchFilterSlope = 147,
    LowCutFrequency = 149,
    HighCutFrequency = 151,
    LowCutSlope = 153,
    HighCutSlope = 155,
    YearDataRecorded = 157,
    DayOfYear = 159,
    HourOfDay = 161,
    MinuteOfHour = 163,
    SecondOfMinute = 165,
    TimeBaseCode = 167,
    TraceWeightingFactor = 169,
    GeophoneGroupNumberRoll1 = 171,
    GeophoneGroupNumberFirstTraceOrigField = 173,
    GeophoneGroupNumberLastTraceOrigField = 175,
    GapSize = 177,
    OverTravel = 179,
    CdpX = 181,
    CdpY = 185,
    InlineNo = 189,
    CrosslineNo = 193,
    ShotPoint = 197,
    ShotPointScalar = 201,
    TraceValueMeasurementUnit = 203,
    TransductionConstantMantissa = 205,
    TransductionConstantPower = 209,
    TransductionUnit = 211,
    TraceIdentifier = 213,
    ScalarTraceHeader = 215,
    SourceType = 217,
    SourceEnergyDirectionMantissa = 219,
    SourceEnergyDirectionExponent = 223,
    SourceMeasurementMantissa = 225,
    SourceMeasurementExponent = 229,
    SourceMeasurementUnit = 231,
    UnassignedInt1 = 233,
    UnassignedInt2 = 237,
}

/// Symbolic names for the binary header fields. Discriminants are the standard's
/// file-absolute byte offsets (3201..=3600); the accessors subtract the text
/// header length internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(C)]
pub enum BinField {
    JobId = 3201,
    LineNumber = 3205,
    ReelNumber = 3209,
    Traces = 3213,
    AuxTraces = 3215,
    Interval = 3217,
    IntervalOriginal = 3219,
    Samples = 3221,
    SamplesOriginal = 3223,
    Format = 3225,
    EnsembleFold = 3227,
    SortingCode = 3229,
    VerticalSum = 3231,
    SweepFrequencyStart = 3233,
    SweepFrequencyEnd = 3235,
    SweepLength = 3237,
    Sweep = 3239,
    SweepChannel = 3241,
    SweepTaperStart = 3243,
    SweepTaperEnd = 3245,
    Taper = 3247,
    CorrelatedTraces = 3249,
    BinaryGainRecovery = 3251,
    AmplitudeRecovery = 3253,
    MeasurementSystem = 3255,
    ImpulseSignalPolarity = 3257,
    VibratoryPolarity = 3259,
    SegyRevision = 3501,
    TraceFlag = 3503,
    ExtendedHeaders = 3505,
}

/// Width lookup for the trace header, indexed by the 1-based byte offset. All
/// offsets not explicitly assigned stay 0.
static TRACE_FIELD_WIDTH: [u8; TRACE_HEADER_LEN + 1] = trace_field_widths();

/// Width lookup for the binary header, biased by the text header length: index
/// with `offset - 3200`.
static BIN_FIELD_WIDTH: [u8; BIN_HEADER_LEN + 1] = bin_field_widths();

const fn trace_field_widths() -> [u8; TRACE_HEADER_LEN + 1] {
    let mut w = [0u8; TRACE_HEADER_LEN + 1];

    w[TraceField::TraceSequenceLine as usize] = 4;
    w[TraceField::TraceSequenceFile as usize] = 4;
    w[TraceField::FieldRecord as usize] = 4;
    w[TraceField::TraceNumber as usize] = 4;
    w[TraceField::EnergySourcePoint as usize] = 4;
    w[TraceField::Cdp as usize] = 4;
    w[TraceField::CdpTrace as usize] = 4;
    w[TraceField::Offset as usize] = 4;
    w[TraceField::ReceiverGroupElevation as usize] = 4;
    w[TraceField::SourceSurfaceElevation as usize] = 4;
    w[TraceField::SourceDepth as usize] = 4;
    w[TraceField::ReceiverDatumElevation as usize] = 4;
    w[TraceField::SourceDatumElevation as usize] = 4;
    w[TraceField::SourceWaterDepth as usize] = 4;
    w[TraceField::GroupWaterDepth as usize] = 4;
    w[TraceField::SourceX as usize] = 4;
    w[TraceField::SourceY as usize] = 4;
    w[TraceField::GroupX as usize] = 4;
    w[TraceField::GroupY as usize] = 4;
    w[TraceField::CdpX as usize] = 4;
    w[TraceField::CdpY as usize] = 4;
    w[TraceField::InlineNo as usize] = 4;
    w[TraceField::CrosslineNo as usize] = 4;
    w[TraceField::ShotPoint as usize] = 4;
    w[TraceField::TransductionConstantMantissa as usize] = 4;
    w[TraceField::SourceEnergyDirectionMantissa as usize] = 4;
    w[TraceField::SourceMeasurementMantissa as usize] = 4;
    w[TraceField::UnassignedInt1 as usize] = 4;
    w[TraceField::UnassignedInt2 as usize] = 4;

    w[TraceField::TraceIdentificationCode as usize] = 2;
    w[TraceField::NSummedTraces as usize] = 2;
    w[TraceField::NStackedTraces as usize] = 2;
    w[TraceField::DataUse as usize] = 2;
    w[TraceField::ElevationScalar as usize] = 2;
    w[TraceField::SourceGroupScalar as usize] = 2;
    w[TraceField::CoordinateUnits as usize] = 2;
    w[TraceField::WeatheringVelocity as usize] = 2;
    w[TraceField::SubWeatheringVelocity as usize] = 2;
    w[TraceField::SourceUpholeTime as usize] = 2;
    w[TraceField::GroupUpholeTime as usize] = 2;
    w[TraceField::SourceStaticCorrection as usize] = 2;
    w[TraceField::GroupStaticCorrection as usize] = 2;
    w[TraceField::TotalStaticApplied as usize] = 2;
    w[TraceField::LagTimeA as usize] = 2;
    w[TraceField::LagTimeB as usize] = 2;
    w[TraceField::DelayRecordingTime as usize] = 2;
    w[TraceField::MuteTimeStart as usize] = 2;
    w[TraceField::MuteTimeEnd as usize] = 2;
    w[TraceField::SampleCount as usize] = 2;
    w[TraceField::SampleInterval as usize] = 2;
    w[TraceField::GainType as usize] = 2;
    w[TraceField::InstrumentGainConstant as usize] = 2;
    w[TraceField::InstrumentInitialGain as usize] = 2;
    w[TraceField::Correlated as usize] = 2;
    w[TraceField::SweepFrequencyStart as usize] = 2;
    w[TraceField::SweepFrequencyEnd as usize] = 2;
    w[TraceField::SweepLength as usize] = 2;
    w[TraceField::SweepType as usize] = 2;
    w[TraceField::SweepTraceTaperLengthStart as usize] = 2;
    w[TraceField::SweepTraceTaperLengthEnd as usize] = 2;
    w[TraceField::TaperType as usize] = 2;
    w[TraceField::AliasFilterFrequency as usize] = 2;
    w[TraceField::AliasFilterSlope as usize] = 2;
    w[TraceField::NotchFilterFrequency as usize] = 2;
    w[TraceField::NotchFilterSlope as usize] = 2;
    w[TraceField::LowCutFrequency as usize] = 2;
    w[TraceField::HighCutFrequency as usize] = 2;
    w[TraceField::LowCutSlope as usize] = 2;
    w[TraceField::HighCutSlope as usize] = 2;
    w[TraceField::YearDataRecorded as usize] = 2;
    w[TraceField::DayOfYear as usize] = 2;
    w[TraceField::HourOfDay as usize] = 2;
    w[TraceField::MinuteOfHour as usize] = 2;
    w[TraceField::SecondOfMinute as usize] = 2;
    w[TraceField::TimeBaseCode as usize] = 2;
    w[TraceField::TraceWeightingFactor as usize] = 2;
    w[TraceField::GeophoneGroupNumberRoll1 as usize] = 2;
    w[TraceField::GeophoneGroupNumberFirstTraceOrigField as usize] = 2;
    w[TraceField::GeophoneGroupNumberLastTraceOrigField as usize] = 2;
    w[TraceField::GapSize as usize] = 2;
    w[TraceField::OverTravel as usize] = 2;
    w[TraceField::ShotPointScalar as usize] = 2;
    w[TraceField::TraceValueMeasurementUnit as usize] = 2;
    w[TraceField::TransductionConstantPower as usize] = 2;
    w[TraceField::TransductionUnit as usize] = 2;
    w[TraceField::TraceIdentifier as usize] = 2;
    w[TraceField::ScalarTraceHeader as usize] = 2;
    w[TraceField::SourceType as usize] = 2;
    w[TraceField::SourceEnergyDirectionExponent as usize] = 2;
    w[TraceField::SourceMeasurementExponent as usize] = 2;
    w[TraceField::SourceMeasurementUnit as usize] = 2;

    w
}

const fn bin_field_widths() -> [u8; BIN_HEADER_LEN + 1] {
    let mut w = [0u8; BIN_HEADER_LEN + 1];

    w[BinField::JobId as usize - TEXT_HEADER_LEN] = 4;
    w[BinField::LineNumber as usize - TEXT_HEADER_LEN] = 4;
    w[BinField::ReelNumber as usize - TEXT_HEADER_LEN] = 4;

    w[BinField::Traces as usize - TEXT_HEADER_LEN] = 2;
    w[BinField::AuxTraces as usize - TEXT_HEADER_LEN] = 2;
    w[BinField::Interval as usize - TEXT_HEADER_LEN] = 2;
    w[BinField::IntervalOriginal as usize - TEXT_HEADER_LEN] = 2;
    w[BinField::Samples as usize - TEXT_HEADER_LEN] = 2;
    w[BinField::SamplesOriginal as usize - TEXT_HEADER_LEN] = 2;
    w[BinField::Format as usize - TEXT_HEADER_LEN] = 2;
    w[BinField::EnsembleFold as usize - TEXT_HEADER_LEN] = 2;
    w[BinField::SortingCode as usize - TEXT_HEADER_LEN] = 2;
    w[BinField::VerticalSum as usize - TEXT_HEADER_LEN] = 2;
    w[BinField::SweepFrequencyStart as usize - TEXT_HEADER_LEN] = 2;
    w[BinField::SweepFrequencyEnd as usize - TEXT_HEADER_LEN] = 2;
    w[BinField::SweepLength as usize - TEXT_HEADER_LEN] = 2;
    w[BinField::Sweep as usize - TEXT_HEADER_LEN] = 2;
    w[BinField::SweepChannel as usize - TEXT_HEADER_LEN] = 2;
    w[BinField::SweepTaperStart as usize - TEXT_HEADER_LEN] = 2;
    w[BinField::SweepTaperEnd as usize - TEXT_HEADER_LEN] = 2;
    w[BinField::Taper as usize - TEXT_HEADER_LEN] = 2;
    w[BinField::CorrelatedTraces as usize - TEXT_HEADER_LEN] = 2;
    w[BinField::BinaryGainRecovery as usize - TEXT_HEADER_LEN] = 2;
    w[BinField::AmplitudeRecovery as usize - TEXT_HEADER_LEN] = 2;
    w[BinField::MeasurementSystem as usize - TEXT_HEADER_LEN] = 2;
    w[BinField::ImpulseSignalPolarity as usize - TEXT_HEADER_LEN] = 2;
    w[BinField::VibratoryPolarity as usize - TEXT_HEADER_LEN] = 2;
    w[BinField::SegyRevision as usize - TEXT_HEADER_LEN] = 2;
    w[BinField::TraceFlag as usize - TEXT_HEADER_LEN] = 2;
    w[BinField::ExtendedHeaders as usize - TEXT_HEADER_LEN] = 2;

    w
}

/// The shared get primitive: `byte` is already rebased to a 1-based offset into
/// `header`, and `table[byte]` holds the field width.
fn get(header: &[u8], table: &[u8], byte: usize) -> Result<i32, SegyError> {
    match table[byte] {
        4 => {
            let raw = [
                header[byte - 1],
                header[byte],
                header[byte + 1],
                header[byte + 2],
            ];
            Ok(i32::from_be_bytes(raw))
        }
        2 => {
            let raw = [header[byte - 1], header[byte]];
            Ok(i16::from_be_bytes(raw) as i32)
        }
        _ => Err(SegyError::InvalidField { byte }),
    }
}

/// The shared set primitive. Two-byte fields take the low half of `val`.
fn set(header: &mut [u8], table: &[u8], byte: usize, val: i32) -> Result<(), SegyError> {
    match table[byte] {
        4 => {
            header[byte - 1..byte + 3].copy_from_slice(&val.to_be_bytes());
            Ok(())
        }
        2 => {
            header[byte - 1..byte + 1].copy_from_slice(&(val as i16).to_be_bytes());
            Ok(())
        }
        _ => Err(SegyError::InvalidField { byte }),
    }
}

fn check_trace_args(traceheader: &[u8], byte: usize) -> Result<(), SegyError> {
    if traceheader.len() < TRACE_HEADER_LEN {
        return Err(SegyError::InvalidArgs {
            msg: format!(
                "Trace header length should be {} but is {}",
                TRACE_HEADER_LEN,
                traceheader.len()
            ),
        });
    }
    if byte < 1 || byte > TRACE_HEADER_LEN {
        return Err(SegyError::InvalidField { byte });
    }
    Ok(())
}

fn check_bin_args(binheader: &[u8], byte: usize) -> Result<usize, SegyError> {
    if binheader.len() < BIN_HEADER_LEN {
        return Err(SegyError::InvalidArgs {
            msg: format!(
                "Binary header length should be {} but is {}",
                BIN_HEADER_LEN,
                binheader.len()
            ),
        });
    }
    if byte <= TEXT_HEADER_LEN || byte > TEXT_HEADER_LEN + BIN_HEADER_LEN {
        return Err(SegyError::InvalidField { byte });
    }
    Ok(byte - TEXT_HEADER_LEN)
}

/// Read one trace header field as a sign-extended `i32`.
///
/// `byte` is the 1-based offset of the field in the 240-byte header; symbolic
/// names can be used through [`TraceField`].
/// ```
/// # use segy_cube_core::fields::{get_field, set_field, TraceField};
/// # use segy_cube_core::TRACE_HEADER_LEN;
/// let mut header = [0u8; TRACE_HEADER_LEN];
/// set_field(&mut header, TraceField::InlineNo as usize, -42).unwrap();
/// assert_eq!(get_field(&header, 189).unwrap(), -42);
/// // Byte 2 is the middle of a field, so no field starts there.
/// assert!(get_field(&header, 2).is_err());
/// ```
pub fn get_field(traceheader: &[u8], byte: usize) -> Result<i32, SegyError> {
    check_trace_args(traceheader, byte)?;
    get(traceheader, &TRACE_FIELD_WIDTH, byte)
}

/// Write one trace header field, big-endian. Two-byte fields truncate to `i16`.
pub fn set_field(traceheader: &mut [u8], byte: usize, val: i32) -> Result<(), SegyError> {
    check_trace_args(traceheader, byte)?;
    set(traceheader, &TRACE_FIELD_WIDTH, byte, val)
}

/// Read one binary header field as a sign-extended `i32`. `byte` is the
/// file-absolute offset (3201..=3600) of the standard.
pub fn get_bfield(binheader: &[u8], byte: usize) -> Result<i32, SegyError> {
    let rebased = check_bin_args(binheader, byte)?;
    get(binheader, &BIN_FIELD_WIDTH, rebased)
}

/// Write one binary header field, big-endian.
pub fn set_bfield(binheader: &mut [u8], byte: usize, val: i32) -> Result<(), SegyError> {
    let rebased = check_bin_args(binheader, byte)?;
    set(binheader, &BIN_FIELD_WIDTH, rebased, val)
}

/// The width in bytes of the trace header field at the 1-based `byte`, or 0 if no
/// field starts there.
pub fn trace_field_width(byte: usize) -> u8 {
    if byte < 1 || byte > TRACE_HEADER_LEN {
        0
    } else {
        TRACE_FIELD_WIDTH[byte]
    }
}

/// The declared sample format of the file.
pub fn format(binheader: &[u8]) -> Result<SampleFormatCode, SegyError> {
    let code = get_bfield(binheader, BinField::Format as usize)?;
    let code = code.to_u16().ok_or_else(|| SegyError::InvalidArgs {
        msg: format!("{} is not a SEG-Y rev.1 sample format code", code),
    })?;
    SampleFormatCode::new(code)
}

/// The declared per-trace sample count. Zero or negative counts are refused; a
/// SEG-Y with no samples per trace is not addressable.
pub fn samples(binheader: &[u8]) -> Result<usize, SegyError> {
    let n = get_bfield(binheader, BinField::Samples as usize)?;
    if n <= 0 {
        return Err(SegyError::InvalidArgs {
            msg: format!("Declared sample count must be positive, not {}", n),
        });
    }
    Ok(n as usize)
}

/// The byte position of the first trace: text header, binary header, and one text
/// header length per extended header.
pub fn trace0(binheader: &[u8]) -> Result<u64, SegyError> {
    let extra = get_bfield(binheader, BinField::ExtendedHeaders as usize)?;
    if extra < 0 {
        return Err(SegyError::InvalidArgs {
            msg: format!("Negative extended header count: {}", extra),
        });
    }
    Ok((TEXT_HEADER_LEN + BIN_HEADER_LEN) as u64 + TEXT_HEADER_LEN as u64 * extra as u64)
}

/// The byte size of the data of one trace. The layout is a hard four bytes per
/// sample regardless of the declared format.
pub const fn trace_bsize(samples: usize) -> usize {
    samples * 4
}
