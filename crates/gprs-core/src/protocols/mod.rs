//! Protocol decoding modules.
//!
//! Each packet family follows a layered structure:
//! - `layout`: wire order, constants and packed bit fields (source of truth)
//! - `reader`: checked field reads and protocol conventions
//! - `parser`: record-level decoding (no direct byte indexing)
//! - `record`: decoded, immutable record types
//!
//! All reads go through `common::Cursor`, whose offset is advanced
//! explicitly per field. Parsers are pure and contain no I/O.

pub mod common;
pub mod diagnostic;
pub mod report;
