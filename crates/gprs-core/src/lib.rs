//! Decoder for GPRS tracker telemetry packets.
//!
//! A raw packet flows through four stages: the frame preprocessor clamps the
//! input and strips the STX/LEN/CRC/ETX wrapper, the classifier reads the
//! packet type, and either the report decoder (up to ten location records)
//! or the command decoder (diagnostic responses) turns the body into typed
//! records. Scaling of coordinates, timestamps and voltages lives in
//! [`conversion`]. Decoding is byte-oriented and side-effect free; the only
//! output besides the return value is `tracing` events when `verbose` is set.
//!
//! Protocol modules follow a layout/reader/parser split: `layout` holds
//! offsets, masks and bit-field views, `reader` does bounds-checked field
//! access, `parser` sequences the fields into records.
//!
//! Invariants:
//! - No offset is computed from input beyond `frame::layout::MAX_PACKET_SIZE`.
//! - Records decoded before a failing record are never discarded.
//! - Malformed input produces an error value, never a panic.
//!
//! # Examples
//! ```
//! use gprs_core::{PacketType, Record, decode_packet, frame::layout::CRC16};
//!
//! // One minimal report: ref 1, no optional blocks, 1-byte device id 0x2a.
//! let payload = [0x01, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x3c, 0x05, 0x2a];
//! let mut raw = vec![0x02, 0x00, payload.len() as u8];
//! raw.extend_from_slice(&payload);
//! raw.extend_from_slice(&CRC16.checksum(&payload).to_be_bytes());
//! raw.push(0x03);
//!
//! let decoded = decode_packet(&raw, false)?;
//! assert_eq!(decoded.packet_type, PacketType::Report);
//! let Record::Report(report) = &decoded.records[0] else { unreachable!() };
//! assert_eq!(report.device_id, 0x2a);
//! # Ok::<(), gprs_core::DecodeError>(())
//! ```

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

pub mod classify;
pub mod conversion;
pub mod frame;
pub mod protocols;
pub mod text;

pub use classify::{PacketType, classify};
pub use frame::FrameError;
pub use protocols::common::FieldError;
pub use protocols::diagnostic::{CommandBody, CommandRecord, DiagnosticError, DiagnosticRecord};
pub use protocols::report::{ReportExtension, ReportRecord, StopReason};

/// Timestamp rendered when a device time cannot be formatted.
pub const DEFAULT_TIMESTAMP: &str = "2000-01-01T00:00:00Z";

/// One decoded record, in wire order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Record {
    Report(ReportRecord),
    Command(CommandRecord),
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::Report(record) => fmt::Display::fmt(record, f),
            Record::Command(record) => fmt::Display::fmt(record, f),
        }
    }
}

/// Result of a successful decode.
///
/// `records` is empty for packet types this decoder does not interpret.
/// `stop` says whether the body was fully consumed: report bodies may stop
/// early, and a diagnostic body may carry bytes past its layout.
///
/// # Examples
/// ```
/// use gprs_core::{Decoded, PacketType, StopReason};
///
/// let decoded = Decoded {
///     packet_type: PacketType::Unknown(0x09),
///     records: Vec::new(),
///     clamped: false,
///     stop: StopReason::Exhausted,
/// };
/// let value = serde_json::to_value(&decoded)?;
/// assert_eq!(value["packet_type"]["unknown"], 9);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decoded {
    pub packet_type: PacketType,
    pub records: Vec<Record>,
    /// The input was longer than the packet limit and was cut before framing.
    pub clamped: bool,
    pub stop: StopReason,
}

/// Errors returned by [`decode_packet`].
///
/// `Truncated` and `FieldRange` are only returned when no record could be
/// decoded; otherwise the partial result carries them in `Decoded::stop`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("frame error: {0}")]
    Frame(FrameError),
    #[error("checksum mismatch: frame carries {expected:#06x}, payload hashes to {computed:#06x}")]
    Checksum { expected: u16, computed: u16 },
    #[error("packet of {needed} bytes exceeds the {max}-byte limit")]
    SizeExceeded { needed: usize, max: usize },
    #[error("truncated packet: {0}")]
    Truncated(FieldError),
    #[error("invalid field: {0}")]
    FieldRange(FieldError),
    #[error("unsupported diagnostic version {version}")]
    UnsupportedVersion { version: u8 },
}

impl From<FrameError> for DecodeError {
    fn from(err: FrameError) -> Self {
        match err {
            FrameError::Checksum { expected, computed } => {
                DecodeError::Checksum { expected, computed }
            }
            FrameError::SizeExceeded { needed, max } => DecodeError::SizeExceeded { needed, max },
            other => DecodeError::Frame(other),
        }
    }
}

impl From<FieldError> for DecodeError {
    fn from(err: FieldError) -> Self {
        if err.is_truncation() {
            DecodeError::Truncated(err)
        } else {
            DecodeError::FieldRange(err)
        }
    }
}

impl From<DiagnosticError> for DecodeError {
    fn from(err: DiagnosticError) -> Self {
        match err {
            DiagnosticError::Field(field) => field.into(),
            DiagnosticError::UnsupportedVersion { version } => {
                DecodeError::UnsupportedVersion { version }
            }
        }
    }
}

/// Decode one raw packet into typed records.
///
/// Framing and checksum failures reject the whole packet. A report body that
/// fails part way returns the records decoded so far, with the failure in
/// [`Decoded::stop`]; if the very first record fails the failure is returned
/// as an error instead.
pub fn decode_packet(raw: &[u8], verbose: bool) -> Result<Decoded, DecodeError> {
    let canonical = frame::preprocess(raw, verbose)?;
    let packet_type = classify(canonical.bytes);
    let body = classify::body(canonical.bytes);

    if verbose {
        debug!(?packet_type, body_len = body.len(), "classified packet");
    }

    let (records, stop) = match packet_type {
        PacketType::Report => {
            let batch = protocols::report::decode_reports(body, verbose);
            if batch.records.is_empty() {
                if let StopReason::Aborted(err) = &batch.stop {
                    return Err(err.clone().into());
                }
            }
            let records = batch.records.into_iter().map(Record::Report).collect();
            (records, batch.stop)
        }
        PacketType::Diagnostic => {
            let decoded = protocols::diagnostic::decode_command(body, verbose)?;
            let stop = match decoded.trailing {
                0 => StopReason::Exhausted,
                trailing => StopReason::TrailingBytes(trailing),
            };
            (vec![Record::Command(decoded.record)], stop)
        }
        PacketType::Unknown(tag) => {
            if verbose {
                debug!(tag, "unknown packet type, body not decoded");
            }
            (Vec::new(), StopReason::Exhausted)
        }
        PacketType::Empty => {
            if verbose {
                debug!("empty payload, nothing to decode");
            }
            (Vec::new(), StopReason::Exhausted)
        }
    };

    Ok(Decoded {
        packet_type,
        records,
        clamped: canonical.clamped,
        stop,
    })
}
