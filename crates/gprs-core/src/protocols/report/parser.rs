use serde::Serialize;
use tracing::{debug, trace};

use super::layout;
use super::reader;
use super::record::{
    AdditionalIo, CellInfo, Coordinate, GpsFix, IoState, ReportExtension, ReportRecord,
    ReportType, Timestamp,
};
use crate::protocols::common::{Cursor, FieldError, Voltage};

/// Why sequential decoding of a buffer ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Every byte was consumed.
    Exhausted,
    /// `MAX_REPORT_RECORDS` were decoded and bytes remain.
    RecordLimit,
    /// A record could not be decoded; the rest of the buffer was discarded.
    Aborted(FieldError),
    /// The last record carries an extension with this unrecognised tag. Its
    /// payload length is unknown, so the rest of the buffer was discarded.
    UnknownExtension(u8),
    /// A single-record body decoded completely with this many bytes left over.
    TrailingBytes(usize),
}

/// Records decoded from one report body, in wire order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportBatch {
    pub records: Vec<ReportRecord>,
    pub stop: StopReason,
}

/// Decode back-to-back report records from a report body.
///
/// A failing record never discards the records decoded before it; the
/// failure is carried in [`ReportBatch::stop`].
pub fn decode_reports(body: &[u8], verbose: bool) -> ReportBatch {
    let mut cursor = Cursor::new(body);
    let mut records = Vec::with_capacity(layout::MAX_REPORT_RECORDS);

    let stop = loop {
        if cursor.is_exhausted() {
            break StopReason::Exhausted;
        }
        if records.len() == layout::MAX_REPORT_RECORDS {
            if verbose {
                debug!(
                    remaining = cursor.remaining(),
                    "record limit reached, ignoring trailing records"
                );
            }
            break StopReason::RecordLimit;
        }

        let mut attempt = cursor;
        match decode_record(&mut attempt) {
            Ok(record) => {
                if verbose {
                    trace!(
                        index = records.len(),
                        offset = cursor.offset(),
                        len = attempt.offset() - cursor.offset(),
                        device_id = record.device_id,
                        "decoded report record"
                    );
                }
                let unknown = match record.extension {
                    ReportExtension::Unknown(tag) => Some(tag),
                    _ => None,
                };
                records.push(record);
                cursor = attempt;
                if let Some(tag) = unknown {
                    if verbose {
                        debug!(
                            tag,
                            discarded = cursor.remaining(),
                            "unknown extension, ignoring the rest of the body"
                        );
                    }
                    break StopReason::UnknownExtension(tag);
                }
            }
            Err(err) => {
                if verbose {
                    debug!(
                        index = records.len(),
                        offset = cursor.offset(),
                        error = %err,
                        "report record rejected"
                    );
                }
                break StopReason::Aborted(err);
            }
        }
    };

    ReportBatch { records, stop }
}

fn decode_record(cursor: &mut Cursor<'_>) -> Result<ReportRecord, FieldError> {
    let reference = cursor.read_u8("ref")?;
    let flags_a = reader::read_flags_a(cursor)?;
    let flags_b = reader::read_flags_b(cursor)?;
    let flags_c = reader::read_flags_c(cursor)?;
    let time = cursor.read_u32_be("time")?;
    let code = cursor.read_u8("code")?;
    let device_id = reader::read_device_id(cursor, flags_b.id_len())?;

    let gps = if flags_a.has_gps() {
        let lat = cursor.read_u32_be("lat")?;
        let lon = cursor.read_u32_be("lon")?;
        let speed = cursor.read_u8("speed")?;
        Some(GpsFix {
            latitude: Coordinate::from_raw(lat, flags_c.lat_south()),
            longitude: Coordinate::from_raw(lon, flags_c.lon_west()),
            speed,
            invalid: flags_c.gps_invalid(),
        })
    } else {
        None
    };

    let course = if flags_c.has_cog() {
        Some(reader::read_course(cursor)?)
    } else {
        None
    };

    let cell = if flags_a.has_cell() {
        let cell_id = cursor.read_u16_be("cell_id")?;
        let signal = cursor.read_u8("signal")?;
        Some(CellInfo { cell_id, signal })
    } else {
        None
    };

    let lac = if flags_c.has_lac() {
        Some(cursor.read_u16_be("lac")?)
    } else {
        None
    };

    let modem_status = if flags_a.has_modsts() {
        Some(cursor.read_u8("modsts")?)
    } else {
        None
    };

    let temperature = if flags_a.has_temp() {
        Some(cursor.read_i8("temp")?)
    } else {
        None
    };

    let report_type = ReportType::from_tag(flags_a.report_type());
    let extension = if report_type == ReportType::ExtendedData {
        decode_extension(cursor)?
    } else {
        ReportExtension::None
    };

    Ok(ReportRecord {
        reference,
        report_type,
        code,
        device_id,
        timestamp: Timestamp::from_raw(time),
        gps,
        course,
        io: IoState {
            input_1: flags_b.input_1(),
            input_2: flags_b.input_2(),
            output_1: flags_b.output_1(),
            output_2: flags_b.output_2(),
        },
        cell,
        lac,
        modem_status,
        temperature,
        extension,
    })
}

fn decode_extension(cursor: &mut Cursor<'_>) -> Result<ReportExtension, FieldError> {
    let tag = cursor.read_u8("data_type")?;
    let extension = match tag {
        layout::DATA_TYPE_ADDITIONAL_IO => {
            ReportExtension::AdditionalIo(decode_additional_io(cursor)?)
        }
        layout::DATA_TYPE_FLOW_CONTROL_TRANSACTION_COMPLETE => {
            let transaction_id = cursor.read_u16_be("transaction_id")?;
            let tick_count = cursor.read_u32_be("tick_count")?;
            ReportExtension::FlowControlTransactionComplete {
                transaction_id,
                tick_count,
            }
        }
        other => ReportExtension::Unknown(other),
    };
    Ok(extension)
}

fn decode_additional_io(cursor: &mut Cursor<'_>) -> Result<AdditionalIo, FieldError> {
    let presence = reader::read_additional_io_presence(cursor)?;
    let mut io = AdditionalIo::default();

    if presence.has_int_voltage() {
        io.int_voltage = Some(Voltage::from_raw(cursor.read_adc_code("int_voltage")?));
    }
    if presence.has_ext_voltage() {
        io.ext_voltage = Some(Voltage::from_raw(cursor.read_adc_code("ext_voltage")?));
    }
    if presence.has_adc_input_1() {
        io.adc_input_1 = Some(cursor.read_adc_code("adc_input_1")?);
    }
    if presence.has_adc_input_2() {
        io.adc_input_2 = Some(cursor.read_adc_code("adc_input_2")?);
    }
    if presence.has_input_3() {
        io.input_3 = Some(cursor.read_state("input_3")?);
    }
    if presence.has_output_3() {
        io.output_3 = Some(cursor.read_state("output_3")?);
    }
    if presence.has_orientation() {
        io.orientation = Some(cursor.read_u8("orientation")?);
    }

    Ok(io)
}

#[cfg(test)]
mod tests {
    use super::{StopReason, decode_reports};
    use crate::protocols::common::FieldError;
    use crate::protocols::report::layout;
    use crate::protocols::report::record::ReportExtension;

    // ref, flags_a (type 2 = extended), flags_b (id_len 1), flags_c, time, code, id
    fn extended_header(tag: u8) -> Vec<u8> {
        vec![
            0x07,
            layout::REPORT_TYPE_EXTENDED_DATA << 2,
            0x01,
            0x00,
            0x00,
            0x00,
            0x00,
            0x10,
            0x00,
            0x2a,
            tag,
        ]
    }

    #[test]
    fn empty_body_decodes_nothing() {
        let batch = decode_reports(&[], false);
        assert!(batch.records.is_empty());
        assert_eq!(batch.stop, StopReason::Exhausted);
    }

    #[test]
    fn minimal_record() {
        let bytes = [0x01, 0x00, 0x11, 0x00, 0x00, 0x00, 0x00, 0x3c, 0x05, 0x99];
        let batch = decode_reports(&bytes, false);
        assert_eq!(batch.stop, StopReason::Exhausted);
        let record = &batch.records[0];
        assert_eq!(record.reference, 1);
        assert_eq!(record.timestamp.raw_seconds, 60);
        assert_eq!(record.code, 5);
        assert_eq!(record.device_id, 0x99);
        assert!(record.io.input_1);
        assert!(record.gps.is_none());
        assert!(record.extension.is_none());
    }

    #[test]
    fn flow_control_extension() {
        let mut bytes = extended_header(layout::DATA_TYPE_FLOW_CONTROL_TRANSACTION_COMPLETE);
        bytes.extend_from_slice(&[0x12, 0x34, 0x00, 0x01, 0x00, 0x00]);
        let batch = decode_reports(&bytes, true);
        assert_eq!(batch.stop, StopReason::Exhausted);
        assert_eq!(
            batch.records[0].extension,
            ReportExtension::FlowControlTransactionComplete {
                transaction_id: 0x1234,
                tick_count: 65_536,
            }
        );
    }

    #[test]
    fn unknown_extension_ends_the_batch() {
        let bytes = extended_header(0x7f);
        let batch = decode_reports(&bytes, false);
        assert_eq!(batch.stop, StopReason::UnknownExtension(0x7f));
        assert_eq!(batch.records[0].extension, ReportExtension::Unknown(0x7f));

        // the unread payload must not be taken for another record
        let mut bytes = extended_header(0x7f);
        bytes.extend_from_slice(&[0x01, 0x00, 0x11, 0x00, 0x00, 0x00, 0x00, 0x3c, 0x05, 0x99]);
        let batch = decode_reports(&bytes, true);
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.stop, StopReason::UnknownExtension(0x7f));
    }

    #[test]
    fn additional_io_voltages_are_converted() {
        let mut bytes = extended_header(layout::DATA_TYPE_ADDITIONAL_IO);
        bytes.extend_from_slice(&[0b0001_0010, 0x04, 0xd2, 0x01]);
        let batch = decode_reports(&bytes, false);
        let ReportExtension::AdditionalIo(io) = batch.records[0].extension else {
            panic!("expected additional io");
        };
        assert_eq!(io.int_voltage, None);
        let ext = io.ext_voltage.expect("ext voltage");
        assert_eq!(ext.raw, 1234);
        assert_eq!(ext.volts, 12.34);
        assert_eq!(io.input_3, Some(true));
        assert_eq!(io.orientation, None);
    }

    #[test]
    fn additional_io_rejects_wide_adc_code() {
        let mut bytes = extended_header(layout::DATA_TYPE_ADDITIONAL_IO);
        bytes.extend_from_slice(&[0b0000_0001, 0x10, 0x00]);
        let batch = decode_reports(&bytes, false);
        assert!(batch.records.is_empty());
        assert!(matches!(
            batch.stop,
            StopReason::Aborted(FieldError::OutOfRange {
                field: "int_voltage",
                value: 4096,
                ..
            })
        ));
    }
}
