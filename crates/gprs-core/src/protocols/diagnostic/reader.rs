use super::layout::{self, GpsStatus, V1Mask, V2Mask};
use crate::protocols::common::reader::{Cursor, channel_present, ensure_reserved_clear};
use crate::protocols::common::{FieldError, Voltage};

pub fn read_v1_mask(cursor: &mut Cursor<'_>) -> Result<V1Mask, FieldError> {
    let raw = cursor.read_u8("mask")?;
    ensure_reserved_clear("mask", raw, layout::V1_MASK_RESERVED)?;
    Ok(V1Mask::from_raw(raw))
}

pub fn read_v2_mask(cursor: &mut Cursor<'_>) -> Result<V2Mask, FieldError> {
    let raw = cursor.read_u8("mask")?;
    ensure_reserved_clear("mask", raw, layout::V2_MASK_RESERVED)?;
    Ok(V2Mask::from_raw(raw))
}

/// Every bit pattern of the GPS status byte is meaningful.
pub fn read_gps_status(cursor: &mut Cursor<'_>) -> Result<GpsStatus, FieldError> {
    Ok(GpsStatus::from_raw(cursor.read_u8("gps_status")?))
}

pub fn read_voltage_if(
    cursor: &mut Cursor<'_>,
    present: bool,
    field: &'static str,
) -> Result<Option<Voltage>, FieldError> {
    if !present {
        return Ok(None);
    }
    Ok(Some(Voltage::from_raw(cursor.read_adc_code(field)?)))
}

/// Read a four-slot bitmask followed by one byte per set bit.
pub fn read_byte_channels(
    cursor: &mut Cursor<'_>,
    mask_field: &'static str,
    value_field: &'static str,
) -> Result<[Option<u8>; layout::IO_CHANNELS], FieldError> {
    let mask = cursor.read_u8(mask_field)?;
    ensure_reserved_clear(mask_field, mask, layout::IO_CHANNEL_RESERVED)?;
    let mut channels = [None; layout::IO_CHANNELS];
    for (slot, channel) in channels.iter_mut().enumerate() {
        if channel_present(mask, slot) {
            *channel = Some(cursor.read_u8(value_field)?);
        }
    }
    Ok(channels)
}

/// Read the analog bitmask followed by one ADC code per set bit.
pub fn read_analog_channels(
    cursor: &mut Cursor<'_>,
) -> Result<[Option<Voltage>; layout::ANALOGS_MAX], FieldError> {
    let mask = cursor.read_u8("analog_mask")?;
    let mut channels = [None; layout::ANALOGS_MAX];
    for (slot, channel) in channels.iter_mut().enumerate() {
        if channel_present(mask, slot) {
            *channel = Some(Voltage::from_raw(cursor.read_adc_code("analog")?));
        }
    }
    Ok(channels)
}
