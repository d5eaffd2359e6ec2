use tracing::{debug, trace};

use super::error::DiagnosticError;
use super::layout;
use super::reader;
use super::record::{
    CommandBody, CommandRecord, DiagnosticRecord, DiagnosticV1, DiagnosticV2, FirmwareVersion,
};
use crate::protocols::common::{Cursor, FieldError};

/// A decoded command body and the bytes it left unread.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedCommand {
    pub record: CommandRecord,
    /// Bytes after a complete diagnostic layout. Always zero for unknown
    /// command codes, whose body is not interpreted.
    pub trailing: usize,
}

/// Decode one command packet body.
///
/// Unknown command codes are returned as `CommandBody::Unknown` without
/// reading further; an unknown diagnostic version is an error because the
/// field layout that follows it is undefined.
pub fn decode_command(body: &[u8], verbose: bool) -> Result<DecodedCommand, DiagnosticError> {
    let mut cursor = Cursor::new(body);
    let reference = cursor.read_u8("ref")?;
    let code = cursor.read_u8("code")?;

    if code != layout::CODE_DIAGNOSTIC {
        if verbose {
            debug!(reference, code, "unknown command code");
        }
        return Ok(DecodedCommand {
            record: CommandRecord {
                reference,
                code,
                body: CommandBody::Unknown(code),
            },
            trailing: 0,
        });
    }

    let version = cursor.read_u8("version")?;
    let diagnostic = match version {
        layout::VERSION_1 => DiagnosticRecord::V1(decode_v1(&mut cursor)?),
        layout::VERSION_2 => DiagnosticRecord::V2(decode_v2(&mut cursor)?),
        other => return Err(DiagnosticError::UnsupportedVersion { version: other }),
    };

    let trailing = cursor.remaining();
    if verbose {
        trace!(reference, version, consumed = cursor.offset(), "decoded diagnostic");
        if trailing > 0 {
            debug!(reference, trailing, "bytes left after diagnostic body");
        }
    }

    Ok(DecodedCommand {
        record: CommandRecord {
            reference,
            code,
            body: CommandBody::Diagnostic(diagnostic),
        },
        trailing,
    })
}

fn read_firmware(cursor: &mut Cursor<'_>) -> Result<FirmwareVersion, FieldError> {
    Ok(FirmwareVersion {
        major: cursor.read_u8("version_major")?,
        minor: cursor.read_u8("version_minor")?,
        revision: cursor.read_u8("version_revision")?,
    })
}

fn decode_v1(cursor: &mut Cursor<'_>) -> Result<DiagnosticV1, FieldError> {
    let firmware = read_firmware(cursor)?;
    let modem_status = cursor.read_u8("modem_status")?;
    let modem_signal = cursor.read_u8("modem_signal")?;
    let gps_status = cursor.read_u8("gps_status")?;
    let mask = reader::read_v1_mask(cursor)?;
    let internal_voltage = reader::read_voltage_if(cursor, mask.has_int_voltage(), "int_voltage")?;
    let external_voltage = reader::read_voltage_if(cursor, mask.has_ext_voltage(), "ext_voltage")?;

    Ok(DiagnosticV1 {
        firmware,
        modem_status,
        modem_signal,
        gps_status,
        internal_voltage,
        external_voltage,
    })
}

fn decode_v2(cursor: &mut Cursor<'_>) -> Result<DiagnosticV2, FieldError> {
    let firmware = read_firmware(cursor)?;
    let modem_status = cursor.read_u8("modem_status")?;
    let modem_signal = cursor.read_u8("modem_signal")?;
    let gps = reader::read_gps_status(cursor)?;
    let mask = reader::read_v2_mask(cursor)?;

    let internal_voltage = reader::read_voltage_if(cursor, mask.has_int_voltage(), "int_voltage")?;
    let external_voltage = reader::read_voltage_if(cursor, mask.has_ext_voltage(), "ext_voltage")?;
    let temperature = if mask.has_temperature() {
        Some(cursor.read_i8("temperature")?)
    } else {
        None
    };
    let current = if mask.has_current() {
        Some(cursor.read_u16_be("current")?)
    } else {
        None
    };

    let (inputs, outputs) = if mask.has_io() {
        let inputs = reader::read_byte_channels(cursor, "input_mask", "input")?;
        let outputs = reader::read_byte_channels(cursor, "output_mask", "output")?;
        (inputs, outputs)
    } else {
        ([None; layout::INPUTS_MAX], [None; layout::OUTPUTS_MAX])
    };

    let analogs = if mask.has_analog() {
        reader::read_analog_channels(cursor)?
    } else {
        [None; layout::ANALOGS_MAX]
    };

    Ok(DiagnosticV2 {
        firmware,
        modem_status,
        modem_signal,
        gps_fix: gps.fix(),
        satellites: gps.satellites(),
        internal_voltage,
        external_voltage,
        temperature,
        current,
        inputs,
        outputs,
        analogs,
    })
}
