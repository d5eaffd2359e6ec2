#![allow(dead_code)]

use gprs_core::frame::layout::CRC16;

pub const TYPE_REPORT: u8 = 0x01;
pub const TYPE_DIAGNOSTIC: u8 = 0x02;

/// Wrap a canonical payload in STX/LEN/CRC/ETX.
pub fn frame(payload: &[u8]) -> Vec<u8> {
    let len = u16::try_from(payload.len()).expect("payload fits u16");
    let mut raw = vec![0x02];
    raw.extend_from_slice(&len.to_be_bytes());
    raw.extend_from_slice(payload);
    raw.extend_from_slice(&CRC16.checksum(payload).to_be_bytes());
    raw.push(0x03);
    raw
}

pub fn report_packet(records: &[ReportFixture]) -> Vec<u8> {
    let mut payload = vec![TYPE_REPORT];
    for record in records {
        payload.extend(record.encode());
    }
    frame(&payload)
}

/// Frame a report body given as raw bytes (used for truncated bodies).
pub fn report_packet_raw(body: &[u8]) -> Vec<u8> {
    let mut payload = vec![TYPE_REPORT];
    payload.extend_from_slice(body);
    frame(&payload)
}

pub fn diagnostic_packet(body: &[u8]) -> Vec<u8> {
    let mut payload = vec![TYPE_DIAGNOSTIC];
    payload.extend_from_slice(body);
    frame(&payload)
}

#[derive(Debug, Clone, Copy)]
pub struct GpsFixture {
    pub lat: u32,
    pub lon: u32,
    pub speed: u8,
    pub south: bool,
    pub west: bool,
    pub invalid: bool,
}

/// Field values for one report record; `encode` derives the flag bytes.
#[derive(Debug, Clone, Default)]
pub struct ReportFixture {
    pub reference: u8,
    pub report_type: u8,
    pub time: u32,
    pub code: u8,
    pub device_id: Vec<u8>,
    pub inputs: [bool; 2],
    pub outputs: [bool; 2],
    pub gps: Option<GpsFixture>,
    pub course: Option<u16>,
    pub cell: Option<(u16, u8)>,
    pub lac: Option<u16>,
    pub modem_status: Option<u8>,
    pub temperature: Option<i8>,
    /// Raw extension bytes, data type tag first.
    pub extension: Vec<u8>,
}

impl ReportFixture {
    pub fn minimal(reference: u8, device_id: &[u8]) -> Self {
        Self {
            reference,
            time: 3_600,
            code: 0x10,
            device_id: device_id.to_vec(),
            ..Self::default()
        }
    }

    /// Every optional block present, southern and western hemisphere.
    pub fn full(reference: u8) -> Self {
        Self {
            reference,
            report_type: 1,
            time: 631_152_000,
            code: 0x21,
            device_id: vec![0x00, 0x01, 0xe2, 0x40],
            inputs: [true, false],
            outputs: [false, true],
            gps: Some(GpsFixture {
                lat: 33_868_820,
                lon: 151_209_290,
                speed: 72,
                south: true,
                west: true,
                invalid: false,
            }),
            course: Some(270),
            cell: Some((0x1f2e, 17)),
            lac: Some(0x0c0d),
            modem_status: Some(0x05),
            temperature: Some(-12),
            extension: Vec::new(),
        }
    }

    pub fn flags(&self) -> [u8; 3] {
        let id_len = u8::try_from(self.device_id.len()).expect("id length fits u8");
        let gps = self.gps;
        let flags_a = u8::from(self.cell.is_some())
            | u8::from(gps.is_some()) << 1
            | (self.report_type & 0x07) << 2
            | u8::from(self.modem_status.is_some()) << 5
            | u8::from(self.temperature.is_some()) << 6;
        let flags_b = (id_len & 0x0f)
            | u8::from(self.inputs[0]) << 4
            | u8::from(self.inputs[1]) << 5
            | u8::from(self.outputs[0]) << 6
            | u8::from(self.outputs[1]) << 7;
        let flags_c = u8::from(gps.is_some_and(|g| g.south))
            | u8::from(gps.is_some_and(|g| g.west)) << 1
            | u8::from(self.course.is_some()) << 2
            | u8::from(self.lac.is_some()) << 3
            | u8::from(gps.is_some_and(|g| g.invalid)) << 4;
        [flags_a, flags_b, flags_c]
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = vec![self.reference];
        out.extend_from_slice(&self.flags());
        out.extend_from_slice(&self.time.to_be_bytes());
        out.push(self.code);
        out.extend_from_slice(&self.device_id);
        if let Some(gps) = self.gps {
            out.extend_from_slice(&gps.lat.to_be_bytes());
            out.extend_from_slice(&gps.lon.to_be_bytes());
            out.push(gps.speed);
        }
        if let Some(course) = self.course {
            out.extend_from_slice(&course.to_be_bytes());
        }
        if let Some((cell_id, signal)) = self.cell {
            out.extend_from_slice(&cell_id.to_be_bytes());
            out.push(signal);
        }
        if let Some(lac) = self.lac {
            out.extend_from_slice(&lac.to_be_bytes());
        }
        if let Some(status) = self.modem_status {
            out.push(status);
        }
        if let Some(temperature) = self.temperature {
            out.extend_from_slice(&temperature.to_be_bytes());
        }
        out.extend_from_slice(&self.extension);
        out
    }
}

/// Offsets one past the end of each mandatory field of an encoded record.
pub fn mandatory_field_ends(id_len: usize) -> Vec<(&'static str, usize)> {
    vec![
        ("ref", 1),
        ("flags_a", 2),
        ("flags_b", 3),
        ("flags_c", 4),
        ("time", 8),
        ("code", 9),
        ("device_id", 9 + id_len),
    ]
}
