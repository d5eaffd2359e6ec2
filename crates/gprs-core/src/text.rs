//! Text encodings of raw packets used by capture logs and the CLI.
//!
//! Two spellings are accepted: whitespace or comma separated `0x` tokens
//! (`"0x2 0x0 0x1A"`, one or two digits each) and contiguous hex
//! (`"02001a"`, whitespace ignored).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HexPacketError {
    #[error("empty packet text")]
    Empty,
    #[error("token '{token}' is not a one- or two-digit hex byte")]
    BadToken { token: String },
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// Parse one packet from its text form.
///
/// # Examples
/// ```
/// use gprs_core::text::parse_hex_packet;
///
/// assert_eq!(parse_hex_packet("0x2 0x0 0x1A")?, vec![0x02, 0x00, 0x1a]);
/// assert_eq!(parse_hex_packet("02 00 1a")?, vec![0x02, 0x00, 0x1a]);
/// # Ok::<(), gprs_core::text::HexPacketError>(())
/// ```
pub fn parse_hex_packet(text: &str) -> Result<Vec<u8>, HexPacketError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(HexPacketError::Empty);
    }

    let digits = if trimmed.contains("0x") || trimmed.contains("0X") {
        let mut digits = String::with_capacity(trimmed.len());
        for token in trimmed
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
        {
            let value = token
                .strip_prefix("0x")
                .or_else(|| token.strip_prefix("0X"))
                .unwrap_or(token);
            match value.len() {
                1 => {
                    digits.push('0');
                    digits.push_str(value);
                }
                2 => digits.push_str(value),
                _ => {
                    return Err(HexPacketError::BadToken {
                        token: token.to_string(),
                    });
                }
            }
        }
        digits
    } else {
        trimmed.chars().filter(|c| !c.is_whitespace()).collect()
    };

    Ok(hex::decode(digits)?)
}

/// Render bytes as lowercase contiguous hex.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}
