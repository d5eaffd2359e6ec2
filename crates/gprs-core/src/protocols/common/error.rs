use serde::Serialize;
use thiserror::Error;

/// Errors raised while reading individual record fields.
///
/// Both variants leave the stream unsynchronised: nothing after the failing
/// field can be trusted.
///
/// # Examples
/// ```
/// use gprs_core::FieldError;
///
/// let err = FieldError::Truncated {
///     field: "time",
///     offset: 4,
///     needed: 4,
///     available: 1,
/// };
/// assert!(err.to_string().contains("truncated field time"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldError {
    #[error("truncated field {field}: need {needed} bytes at offset {offset}, got {available}")]
    Truncated {
        field: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("field {field} out of range: {value} not in {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
    #[error("field {field} has reserved bits set: {value:#04x}")]
    ReservedBits { field: &'static str, value: u8 },
}

impl FieldError {
    pub fn is_truncation(&self) -> bool {
        matches!(self, FieldError::Truncated { .. })
    }
}
