use tracing::debug;

use super::error::FrameError;
use super::layout;
use super::reader::FrameReader;

/// Validated payload with the transport wrapper removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalPayload<'a> {
    pub bytes: &'a [u8],
    /// The raw input was longer than `MAX_PACKET_SIZE` and was cut before
    /// validation.
    pub clamped: bool,
}

/// Clamp, validate and unwrap one raw frame.
///
/// Bytes following the end marker are trimmed. A frame whose declared length
/// cannot fit in `MAX_PACKET_SIZE` is `SizeExceeded`: the clamp would always
/// cut it, whatever the caller passed in.
///
/// # Examples
/// ```
/// use gprs_core::frame::{layout, preprocess};
///
/// let payload = [0x01];
/// let crc = layout::CRC16.checksum(&payload).to_be_bytes();
/// let raw = [layout::STX, 0x00, 0x01, 0x01, crc[0], crc[1], layout::ETX];
/// let canonical = preprocess(&raw, false)?;
/// assert_eq!(canonical.bytes, &payload);
/// assert!(!canonical.clamped);
/// # Ok::<(), gprs_core::frame::FrameError>(())
/// ```
pub fn preprocess(raw: &[u8], verbose: bool) -> Result<CanonicalPayload<'_>, FrameError> {
    let clamped = raw.len() > layout::MAX_PACKET_SIZE;
    let effective = &raw[..raw.len().min(layout::MAX_PACKET_SIZE)];
    if verbose && clamped {
        debug!(
            raw_len = raw.len(),
            max = layout::MAX_PACKET_SIZE,
            "clamping oversized input"
        );
    }

    let reader = FrameReader::new(effective);
    reader.require_len(layout::OVERHEAD)?;

    let start = reader.read_u8(layout::STX_OFFSET)?;
    if start != layout::STX {
        return Err(FrameError::MissingStart { found: start });
    }

    let declared = usize::from(reader.read_u16_be(layout::LENGTH_RANGE.clone())?);
    let frame_len = layout::OVERHEAD + declared;
    if declared > layout::MAX_PAYLOAD_LEN {
        return Err(FrameError::SizeExceeded {
            needed: frame_len,
            max: layout::MAX_PACKET_SIZE,
        });
    }
    reader.require_len(frame_len)?;

    let payload_end = layout::PAYLOAD_OFFSET + declared;
    let payload = reader.read_slice(layout::PAYLOAD_OFFSET..payload_end)?;
    let expected = reader.read_u16_be(payload_end..payload_end + layout::CRC_LEN)?;
    let end = reader.read_u8(frame_len - layout::ETX_LEN)?;
    if end != layout::ETX {
        return Err(FrameError::MissingEnd { found: end });
    }

    let computed = layout::CRC16.checksum(payload);
    if computed != expected {
        return Err(FrameError::Checksum { expected, computed });
    }

    if verbose {
        debug!(
            payload_len = declared,
            trimmed = effective.len() - frame_len,
            clamped,
            "frame accepted"
        );
    }

    Ok(CanonicalPayload {
        bytes: payload,
        clamped,
    })
}
