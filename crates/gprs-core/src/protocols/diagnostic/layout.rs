//! Command packet layout.
//!
//! ```text
//! ref u8 | code u8 | version u8 | major u8 | minor u8 | revision u8 |
//! modem_status u8 | modem_signal u8 | gps_status u8 | mask u8 | optional...
//! ```
//!
//! The version byte is only present for diagnostic commands.

use tartan_bitfield::bitfield;

pub const CODE_DIAGNOSTIC: u8 = 0x44;

pub const VERSION_1: u8 = 1;
pub const VERSION_2: u8 = 2;

bitfield! {
    pub struct V1Mask(u8) {
        [0] pub has_int_voltage,
        [1] pub has_ext_voltage,
    }
}

pub const V1_MASK_RESERVED: u8 = 0b1111_1100;

bitfield! {
    pub struct V2Mask(u8) {
        [0] pub has_int_voltage,
        [1] pub has_ext_voltage,
        [2] pub has_temperature,
        [3] pub has_current,
        // input and output bitmasks follow
        [4] pub has_io,
        // analog bitmask follows
        [5] pub has_analog,
    }
}

pub const V2_MASK_RESERVED: u8 = 0b1100_0000;

bitfield! {
    // fix: bits 0..2, satellites: bits 2..8
    pub struct GpsStatus(u8) {
        [0..2] pub fix: u8,
        [2..8] pub satellites: u8,
    }
}

impl V1Mask {
    pub fn from_raw(raw: u8) -> Self {
        Self(raw)
    }
}

impl V2Mask {
    pub fn from_raw(raw: u8) -> Self {
        Self(raw)
    }
}

impl GpsStatus {
    pub fn from_raw(raw: u8) -> Self {
        Self(raw)
    }
}

/// Input and output banks share one slot count.
pub const IO_CHANNELS: usize = 4;
pub const INPUTS_MAX: usize = IO_CHANNELS;
pub const OUTPUTS_MAX: usize = IO_CHANNELS;
pub const ANALOGS_MAX: usize = 8;

/// Bits above the input/output slot count.
pub const IO_CHANNEL_RESERVED: u8 = 0b1111_0000;
