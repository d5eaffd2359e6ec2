use thiserror::Error;

/// Errors returned while validating the transport frame.
///
/// # Examples
/// ```
/// use gprs_core::frame::FrameError;
///
/// let err = FrameError::MissingStart { found: 0x7e };
/// assert!(err.to_string().contains("missing start byte"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("frame too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("missing start byte: found {found:#04x}")]
    MissingStart { found: u8 },
    #[error("missing end byte: found {found:#04x}")]
    MissingEnd { found: u8 },
    #[error("checksum mismatch: frame carries {expected:#06x}, payload hashes to {computed:#06x}")]
    Checksum { expected: u16, computed: u16 },
    #[error("frame of {needed} bytes exceeds the {max}-byte packet limit")]
    SizeExceeded { needed: usize, max: usize },
}
