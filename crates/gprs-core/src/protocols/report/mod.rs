//! Report packet decoding.
//!
//! A report body holds up to ten back-to-back records. Each record starts
//! with packed flag bytes that decide which optional blocks follow, so a
//! record's length is only known once its flags are read; a misread flag
//! shifts every later record. Records are therefore decoded on a scratch
//! cursor and committed only when complete.
//!
//! Extended-data records end with a type-tagged extension. A record with an
//! unknown tag is kept as `ReportExtension::Unknown`, but the batch stops
//! there because the length of the unknown payload cannot be known.

pub mod layout;
pub mod parser;
pub mod reader;
pub mod record;

pub use parser::{ReportBatch, StopReason, decode_reports};
pub use record::{
    AdditionalIo, CellInfo, Coordinate, GpsFix, IoState, ReportExtension, ReportRecord,
    ReportType, Timestamp,
};
