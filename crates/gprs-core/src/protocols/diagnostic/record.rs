use std::fmt;

use serde::Serialize;

use super::layout;
use crate::protocols::common::Voltage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FirmwareVersion {
    pub major: u8,
    pub minor: u8,
    pub revision: u8,
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.revision)
    }
}

/// First-generation diagnostic response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiagnosticV1 {
    pub firmware: FirmwareVersion,
    pub modem_status: u8,
    pub modem_signal: u8,
    /// Unpacked GPS status byte; its meaning is firmware specific.
    pub gps_status: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_voltage: Option<Voltage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_voltage: Option<Voltage>,
}

/// Second-generation diagnostic response with channel readings.
///
/// Channel slot `n` is `Some` iff bit `n` of its presence bitmask was set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiagnosticV2 {
    pub firmware: FirmwareVersion,
    pub modem_status: u8,
    pub modem_signal: u8,
    pub gps_fix: u8,
    pub satellites: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_voltage: Option<Voltage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_voltage: Option<Voltage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<i8>,
    /// Supply current in mA.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<u16>,
    pub inputs: [Option<u8>; layout::INPUTS_MAX],
    pub outputs: [Option<u8>; layout::OUTPUTS_MAX],
    pub analogs: [Option<Voltage>; layout::ANALOGS_MAX],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticRecord {
    V1(DiagnosticV1),
    V2(DiagnosticV2),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandBody {
    Diagnostic(DiagnosticRecord),
    /// Command code this decoder does not interpret.
    Unknown(u8),
}

/// One decoded command packet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CommandRecord {
    pub reference: u8,
    pub code: u8,
    pub body: CommandBody,
}

impl fmt::Display for CommandRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "command ref={} code={:#04x}", self.reference, self.code)?;
        match &self.body {
            CommandBody::Unknown(_) => writeln!(f, " (unknown)"),
            CommandBody::Diagnostic(DiagnosticRecord::V1(diag)) => {
                writeln!(f, " diagnostic v1")?;
                writeln!(f, "  firmware: {}", diag.firmware)?;
                writeln!(
                    f,
                    "  modem: status={:#04x} signal={}",
                    diag.modem_status, diag.modem_signal
                )?;
                writeln!(f, "  gps status: {:#04x}", diag.gps_status)?;
                write_voltages(f, diag.internal_voltage, diag.external_voltage)
            }
            CommandBody::Diagnostic(DiagnosticRecord::V2(diag)) => {
                writeln!(f, " diagnostic v2")?;
                writeln!(f, "  firmware: {}", diag.firmware)?;
                writeln!(
                    f,
                    "  modem: status={:#04x} signal={}",
                    diag.modem_status, diag.modem_signal
                )?;
                writeln!(f, "  gps: fix={} satellites={}", diag.gps_fix, diag.satellites)?;
                write_voltages(f, diag.internal_voltage, diag.external_voltage)?;
                if let Some(temperature) = diag.temperature {
                    writeln!(f, "  temperature: {temperature} C")?;
                }
                if let Some(current) = diag.current {
                    writeln!(f, "  current: {current} mA")?;
                }
                for (slot, value) in diag.inputs.iter().enumerate() {
                    if let Some(value) = value {
                        writeln!(f, "  input {}: {value}", slot + 1)?;
                    }
                }
                for (slot, value) in diag.outputs.iter().enumerate() {
                    if let Some(value) = value {
                        writeln!(f, "  output {}: {value}", slot + 1)?;
                    }
                }
                for (slot, value) in diag.analogs.iter().enumerate() {
                    if let Some(value) = value {
                        writeln!(f, "  analog {}: {value}", slot + 1)?;
                    }
                }
                Ok(())
            }
        }
    }
}

fn write_voltages(
    f: &mut fmt::Formatter<'_>,
    internal: Option<Voltage>,
    external: Option<Voltage>,
) -> fmt::Result {
    if let Some(v) = internal {
        writeln!(f, "  int voltage: {v}")?;
    }
    if let Some(v) = external {
        writeln!(f, "  ext voltage: {v}")?;
    }
    Ok(())
}
