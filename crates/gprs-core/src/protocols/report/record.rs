use std::fmt;

use serde::Serialize;
use time::OffsetDateTime;

use super::layout;
use crate::conversion::{decode_coordinate, decode_timestamp};
use crate::protocols::common::Voltage;

/// Device time as sent, plus its UTC interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Timestamp {
    pub raw_seconds: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub utc: OffsetDateTime,
}

impl Timestamp {
    pub fn from_raw(raw_seconds: u32) -> Self {
        Self {
            raw_seconds,
            utc: decode_timestamp(raw_seconds),
        }
    }
}

/// Coordinate magnitude, hemisphere flag and signed degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub raw: u32,
    pub negative: bool,
    pub degrees: f64,
}

impl Coordinate {
    pub fn from_raw(raw: u32, negative: bool) -> Self {
        Self {
            raw,
            negative,
            degrees: decode_coordinate(raw, negative),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GpsFix {
    pub latitude: Coordinate,
    pub longitude: Coordinate,
    /// km/h
    pub speed: u8,
    /// The receiver flagged this position as unreliable.
    pub invalid: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellInfo {
    pub cell_id: u16,
    pub signal: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IoState {
    pub input_1: bool,
    pub input_2: bool,
    pub output_1: bool,
    pub output_2: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    Periodic,
    Event,
    ExtendedData,
    Other(u8),
}

impl ReportType {
    pub fn from_tag(tag: u8) -> Self {
        match tag {
            layout::REPORT_TYPE_PERIODIC => ReportType::Periodic,
            layout::REPORT_TYPE_EVENT => ReportType::Event,
            layout::REPORT_TYPE_EXTENDED_DATA => ReportType::ExtendedData,
            other => ReportType::Other(other),
        }
    }
}

/// Extra I/O readings carried by an extended-data record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AdditionalIo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub int_voltage: Option<Voltage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext_voltage: Option<Voltage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adc_input_1: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adc_input_2: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_3: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_3: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<u8>,
}

/// Type-tagged payload appended to extended-data records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportExtension {
    #[default]
    None,
    AdditionalIo(AdditionalIo),
    FlowControlTransactionComplete {
        transaction_id: u16,
        tick_count: u32,
    },
    /// Unrecognised tag; its payload, if any, was not consumed.
    Unknown(u8),
}

impl ReportExtension {
    pub fn is_none(&self) -> bool {
        matches!(self, ReportExtension::None)
    }
}

/// One decoded report record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRecord {
    pub reference: u8,
    pub report_type: ReportType,
    pub code: u8,
    pub device_id: u64,
    pub timestamp: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gps: Option<GpsFix>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<u16>,
    pub io: IoState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell: Option<CellInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lac: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modem_status: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<i8>,
    #[serde(skip_serializing_if = "ReportExtension::is_none")]
    pub extension: ReportExtension,
}

impl fmt::Display for ReportRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "report ref={} type={:?} code={} device={} time={} ({})",
            self.reference,
            self.report_type,
            self.code,
            self.device_id,
            crate::conversion::format_timestamp(self.timestamp.raw_seconds),
            self.timestamp.raw_seconds,
        )?;
        if let Some(gps) = &self.gps {
            writeln!(
                f,
                "  gps: lat={} lon={} speed={} km/h{}",
                gps.latitude.degrees,
                gps.longitude.degrees,
                gps.speed,
                if gps.invalid { " (invalid)" } else { "" },
            )?;
        }
        if let Some(course) = self.course {
            writeln!(f, "  course: {course} deg")?;
        }
        writeln!(
            f,
            "  io: in1={} in2={} out1={} out2={}",
            u8::from(self.io.input_1),
            u8::from(self.io.input_2),
            u8::from(self.io.output_1),
            u8::from(self.io.output_2),
        )?;
        if let Some(cell) = &self.cell {
            writeln!(f, "  cell: id={} signal={}", cell.cell_id, cell.signal)?;
        }
        if let Some(lac) = self.lac {
            writeln!(f, "  lac: {lac}")?;
        }
        if let Some(status) = self.modem_status {
            writeln!(f, "  modem status: {status:#04x}")?;
        }
        if let Some(temperature) = self.temperature {
            writeln!(f, "  temperature: {temperature} C")?;
        }
        match &self.extension {
            ReportExtension::None => {}
            ReportExtension::AdditionalIo(io) => {
                writeln!(f, "  ext: additional io")?;
                if let Some(v) = &io.int_voltage {
                    writeln!(f, "    int voltage: {v}")?;
                }
                if let Some(v) = &io.ext_voltage {
                    writeln!(f, "    ext voltage: {v}")?;
                }
                if let Some(raw) = io.adc_input_1 {
                    writeln!(f, "    adc 1: {raw}")?;
                }
                if let Some(raw) = io.adc_input_2 {
                    writeln!(f, "    adc 2: {raw}")?;
                }
                if let Some(state) = io.input_3 {
                    writeln!(f, "    in3: {}", u8::from(state))?;
                }
                if let Some(state) = io.output_3 {
                    writeln!(f, "    out3: {}", u8::from(state))?;
                }
                if let Some(orientation) = io.orientation {
                    writeln!(f, "    orientation: {orientation}")?;
                }
            }
            ReportExtension::FlowControlTransactionComplete {
                transaction_id,
                tick_count,
            } => {
                writeln!(
                    f,
                    "  ext: flow control transaction {transaction_id} complete after {tick_count} ticks"
                )?;
            }
            ReportExtension::Unknown(tag) => {
                writeln!(f, "  ext: unknown data type {tag:#04x}")?;
            }
        }
        Ok(())
    }
}
