//! Report record wire layout.
//!
//! A record is three packed flag bytes followed by fixed fields and then the
//! optional blocks the flags declare, in this order:
//!
//! ```text
//! ref u8 | flags_a u8 | flags_b u8 | flags_c u8 | time u32 | code u8 |
//! device_id [id_len] | gps? | cog? | cell? | lac? | modsts? | temp? | ext?
//! ```

use tartan_bitfield::bitfield;

/// Upper bound on records decoded from one packet.
pub const MAX_REPORT_RECORDS: usize = 10;

bitfield! {
    pub struct FlagsA(u8) {
        [0] pub has_cell,
        [1] pub has_gps,
        // 0 periodic, 1 event, 2 extended data
        [2..5] pub report_type: u8,
        [5] pub has_modsts,
        [6] pub has_temp,
    }
}

pub const FLAGS_A_RESERVED: u8 = 0b1000_0000;

bitfield! {
    pub struct FlagsB(u8) {
        // device id length in bytes
        [0..4] pub id_len: u8,
        [4] pub input_1,
        [5] pub input_2,
        [6] pub output_1,
        [7] pub output_2,
    }
}

bitfield! {
    pub struct FlagsC(u8) {
        [0] pub lat_south,
        [1] pub lon_west,
        [2] pub has_cog,
        [3] pub has_lac,
        [4] pub gps_invalid,
    }
}

pub const FLAGS_C_RESERVED: u8 = 0b1110_0000;

impl FlagsA {
    pub fn from_raw(raw: u8) -> Self {
        Self(raw)
    }
}

impl FlagsB {
    pub fn from_raw(raw: u8) -> Self {
        Self(raw)
    }
}

impl FlagsC {
    pub fn from_raw(raw: u8) -> Self {
        Self(raw)
    }
}

pub const ID_LEN_MIN: u8 = 1;
pub const ID_LEN_MAX: u8 = 8;

/// Course over ground is whole degrees.
pub const COG_MAX: u16 = 359;

pub const REPORT_TYPE_PERIODIC: u8 = 0;
pub const REPORT_TYPE_EVENT: u8 = 1;
pub const REPORT_TYPE_EXTENDED_DATA: u8 = 2;

pub const DATA_TYPE_ADDITIONAL_IO: u8 = 0x01;
pub const DATA_TYPE_FLOW_CONTROL_TRANSACTION_COMPLETE: u8 = 0x02;

bitfield! {
    pub struct AdditionalIoPresence(u8) {
        [0] pub has_int_voltage,
        [1] pub has_ext_voltage,
        [2] pub has_adc_input_1,
        [3] pub has_adc_input_2,
        [4] pub has_input_3,
        [5] pub has_output_3,
        [6] pub has_orientation,
    }
}

pub const ADDITIONAL_IO_RESERVED: u8 = 0b1000_0000;

impl AdditionalIoPresence {
    pub fn from_raw(raw: u8) -> Self {
        Self(raw)
    }
}
