//! Numeric conversions shared by the report and diagnostic decoders.
//!
//! Every function here is pure and total over the bit width of the wire field
//! it converts. The scaling constants come from the tracker hardware protocol
//! and are pinned by literal fixtures in the tests below.

use time::{Duration, OffsetDateTime, format_description::well_known::Rfc3339};

/// Raw coordinate magnitudes are expressed in micro-degrees.
pub const COORDINATE_DIVISOR: f64 = 1_000_000.0;

/// Device timestamps count seconds from 2000-01-01T00:00:00Z.
pub const TIMESTAMP_EPOCH_UNIX_SECS: i64 = 946_684_800;

/// ADC counts per volt for the 12-bit voltage inputs (10 mV per count).
pub const ADC_COUNTS_PER_VOLT: f64 = 100.0;

/// Width of every raw ADC code on the wire.
pub const ADC_CODE_BITS: u32 = 12;

/// Largest raw ADC code a 12-bit field can carry.
pub const ADC_CODE_MAX: u16 = (1 << ADC_CODE_BITS) - 1;

/// Convert a raw coordinate magnitude and hemisphere flag to signed degrees.
///
/// # Examples
/// ```
/// use gprs_core::conversion::decode_coordinate;
///
/// assert_eq!(decode_coordinate(52_520_008, false), 52.520008);
/// assert_eq!(decode_coordinate(52_520_008, true), -52.520008);
/// ```
pub fn decode_coordinate(raw_magnitude: u32, negative_hemisphere: bool) -> f64 {
    let degrees = f64::from(raw_magnitude) / COORDINATE_DIVISOR;
    if negative_hemisphere { -degrees } else { degrees }
}

/// Convert device seconds to a UTC timestamp.
///
/// The device epoch plus a `u32` offset always lands inside the range
/// `OffsetDateTime` supports, so the conversion cannot fail.
pub fn decode_timestamp(raw_seconds: u32) -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH
        + Duration::seconds(TIMESTAMP_EPOCH_UNIX_SECS + i64::from(raw_seconds))
}

/// Render device seconds as an RFC 3339 timestamp with a `Z` offset.
///
/// # Examples
/// ```
/// use gprs_core::conversion::format_timestamp;
///
/// assert_eq!(format_timestamp(0), "2000-01-01T00:00:00Z");
/// ```
pub fn format_timestamp(raw_seconds: u32) -> String {
    // Years 2000..=2136 are always representable in RFC 3339.
    decode_timestamp(raw_seconds)
        .format(&Rfc3339)
        .unwrap_or_else(|_| crate::DEFAULT_TIMESTAMP.to_string())
}

/// Convert a raw ADC code to volts.
///
/// # Examples
/// ```
/// use gprs_core::conversion::decode_voltage;
///
/// assert_eq!(decode_voltage(1234), 12.34);
/// ```
pub fn decode_voltage(raw_adc_code: u16) -> f64 {
    f64::from(raw_adc_code) / ADC_COUNTS_PER_VOLT
}
