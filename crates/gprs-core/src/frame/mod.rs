//! Transport frame validation (the preprocessor).
//!
//! This is the only layer that sees raw, caller-supplied bytes. The input is
//! clamped to [`layout::MAX_PACKET_SIZE`] before any offset is derived from
//! it; the STX/LEN/CRC/ETX wrapper is then checked and stripped, leaving a
//! borrowed canonical payload for the classifier.
//!
//! Wire offsets live in `layout`, bounds-checked access in `reader`, and the
//! validation sequence in `parser`.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::FrameError;
pub use parser::{CanonicalPayload, preprocess};
