pub const STX: u8 = 0x02;
pub const ETX: u8 = 0x03;

pub const STX_OFFSET: usize = 0;
pub const LENGTH_RANGE: std::ops::Range<usize> = 1..3;
pub const PAYLOAD_OFFSET: usize = 3;

pub const CRC_LEN: usize = 2;
pub const ETX_LEN: usize = 1;
pub const TRAILER_LEN: usize = CRC_LEN + ETX_LEN;
pub const OVERHEAD: usize = PAYLOAD_OFFSET + TRAILER_LEN;

/// Largest frame the tracker firmware emits, wrapper included.
pub const MAX_PACKET_SIZE: usize = 512;
pub const MAX_PAYLOAD_LEN: usize = MAX_PACKET_SIZE - OVERHEAD;

pub const CRC16: crc::Crc<u16> = crc::Crc::<u16>::new(&crc::CRC_16_XMODEM);
