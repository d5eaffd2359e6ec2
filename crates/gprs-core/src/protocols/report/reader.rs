use super::layout::{self, AdditionalIoPresence, FlagsA, FlagsB, FlagsC};
use crate::protocols::common::FieldError;
use crate::protocols::common::reader::{Cursor, ensure_max, ensure_reserved_clear};

pub fn read_flags_a(cursor: &mut Cursor<'_>) -> Result<FlagsA, FieldError> {
    let raw = cursor.read_u8("flags_a")?;
    ensure_reserved_clear("flags_a", raw, layout::FLAGS_A_RESERVED)?;
    Ok(FlagsA::from_raw(raw))
}

pub fn read_flags_b(cursor: &mut Cursor<'_>) -> Result<FlagsB, FieldError> {
    let raw = cursor.read_u8("flags_b")?;
    let flags = FlagsB::from_raw(raw);
    let id_len = flags.id_len();
    if !(layout::ID_LEN_MIN..=layout::ID_LEN_MAX).contains(&id_len) {
        return Err(FieldError::OutOfRange {
            field: "id_len",
            value: u64::from(id_len),
            min: u64::from(layout::ID_LEN_MIN),
            max: u64::from(layout::ID_LEN_MAX),
        });
    }
    Ok(flags)
}

pub fn read_flags_c(cursor: &mut Cursor<'_>) -> Result<FlagsC, FieldError> {
    let raw = cursor.read_u8("flags_c")?;
    ensure_reserved_clear("flags_c", raw, layout::FLAGS_C_RESERVED)?;
    Ok(FlagsC::from_raw(raw))
}

pub fn read_device_id(cursor: &mut Cursor<'_>, id_len: u8) -> Result<u64, FieldError> {
    cursor.read_uint_be(usize::from(id_len), "device_id")
}

pub fn read_course(cursor: &mut Cursor<'_>) -> Result<u16, FieldError> {
    let course = cursor.read_u16_be("cog")?;
    ensure_max("cog", u64::from(course), u64::from(layout::COG_MAX))?;
    Ok(course)
}

pub fn read_additional_io_presence(
    cursor: &mut Cursor<'_>,
) -> Result<AdditionalIoPresence, FieldError> {
    let raw = cursor.read_u8("additional_io_presence")?;
    ensure_reserved_clear("additional_io_presence", raw, layout::ADDITIONAL_IO_RESERVED)?;
    Ok(AdditionalIoPresence::from_raw(raw))
}
