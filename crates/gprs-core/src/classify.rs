use serde::Serialize;

/// Offset of the packet type byte within the canonical payload.
pub const TYPE_OFFSET: usize = 0;
/// First byte handed to the report or diagnostic decoder.
pub const BODY_OFFSET: usize = TYPE_OFFSET + 1;

pub const TYPE_REPORT: u8 = 0x01;
pub const TYPE_DIAGNOSTIC: u8 = 0x02;

/// Packet family selected from the payload header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PacketType {
    Report,
    Diagnostic,
    /// Unrecognised type byte.
    Unknown(u8),
    /// The frame carried no payload, so there is no type byte.
    Empty,
}

/// Map the payload's type byte to a packet family.
///
/// # Examples
/// ```
/// use gprs_core::{PacketType, classify};
///
/// assert_eq!(classify(&[0x01, 0xff]), PacketType::Report);
/// assert_eq!(classify(&[0x7f]), PacketType::Unknown(0x7f));
/// ```
pub fn classify(payload: &[u8]) -> PacketType {
    match payload.get(TYPE_OFFSET).copied() {
        Some(TYPE_REPORT) => PacketType::Report,
        Some(TYPE_DIAGNOSTIC) => PacketType::Diagnostic,
        Some(other) => PacketType::Unknown(other),
        None => PacketType::Empty,
    }
}

/// Payload bytes following the type byte.
pub fn body(payload: &[u8]) -> &[u8] {
    payload.get(BODY_OFFSET..).unwrap_or_default()
}
