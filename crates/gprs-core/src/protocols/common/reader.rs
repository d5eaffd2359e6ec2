use super::error::FieldError;
use crate::conversion::ADC_CODE_MAX;

/// Forward-only reader over one decoder body.
///
/// The offset is explicit state: callers decode a record on a copy of the
/// cursor and only store the advanced copy once the record is complete, so a
/// failed record never moves the committed position.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.offset)
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    pub fn take(&mut self, len: usize, field: &'static str) -> Result<&'a [u8], FieldError> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .ok_or(FieldError::Truncated {
                field,
                offset: self.offset,
                needed: len,
                available: self.remaining(),
            })?;
        let slice = &self.bytes[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    pub fn read_u8(&mut self, field: &'static str) -> Result<u8, FieldError> {
        let bytes = self.take(1, field)?;
        Ok(bytes[0])
    }

    pub fn read_i8(&mut self, field: &'static str) -> Result<i8, FieldError> {
        let bytes = self.take(1, field)?;
        Ok(i8::from_be_bytes([bytes[0]]))
    }

    pub fn read_u16_be(&mut self, field: &'static str) -> Result<u16, FieldError> {
        let bytes = self.take(2, field)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32_be(&mut self, field: &'static str) -> Result<u32, FieldError> {
        let bytes = self.take(4, field)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read an unsigned big-endian integer of `len` bytes (at most 8).
    pub fn read_uint_be(&mut self, len: usize, field: &'static str) -> Result<u64, FieldError> {
        if len > 8 {
            return Err(FieldError::OutOfRange {
                field,
                value: len as u64,
                min: 0,
                max: 8,
            });
        }
        let bytes = self.take(len, field)?;
        Ok(bytes
            .iter()
            .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte)))
    }

    /// Read a one-byte boolean state that must be exactly 0 or 1.
    pub fn read_state(&mut self, field: &'static str) -> Result<bool, FieldError> {
        match self.read_u8(field)? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(FieldError::OutOfRange {
                field,
                value: u64::from(value),
                min: 0,
                max: 1,
            }),
        }
    }

    /// Read a 12-bit ADC code stored in two bytes.
    pub fn read_adc_code(&mut self, field: &'static str) -> Result<u16, FieldError> {
        let value = self.read_u16_be(field)?;
        ensure_max(field, u64::from(value), u64::from(ADC_CODE_MAX))?;
        Ok(value)
    }
}

pub(crate) fn ensure_max(field: &'static str, value: u64, max: u64) -> Result<(), FieldError> {
    if value > max {
        return Err(FieldError::OutOfRange {
            field,
            value,
            min: 0,
            max,
        });
    }
    Ok(())
}

/// Reject packed bytes that set bits the format leaves undefined.
pub(crate) fn ensure_reserved_clear(
    field: &'static str,
    raw: u8,
    reserved_mask: u8,
) -> Result<(), FieldError> {
    if raw & reserved_mask != 0 {
        return Err(FieldError::ReservedBits { field, value: raw });
    }
    Ok(())
}

/// Channel bitmasks assign bit `n` to channel slot `n`.
pub(crate) fn channel_present(mask: u8, slot: usize) -> bool {
    slot < 8 && (mask >> slot) & 0x01 == 0x01
}
