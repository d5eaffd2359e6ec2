//! Command and diagnostic packet decoding.
//!
//! Command packets carry a reference and command code. Diagnostic commands
//! add a version byte selecting one of two layouts: V1 is flat, V2 packs the
//! GPS fix and satellite count into one byte and appends optional input,
//! output and analog channel banks, each governed by its own presence
//! bitmask.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod record;

pub use error::DiagnosticError;
pub use parser::{DecodedCommand, decode_command};
pub use record::{
    CommandBody, CommandRecord, DiagnosticRecord, DiagnosticV1, DiagnosticV2, FirmwareVersion,
};
