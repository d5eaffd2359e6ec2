use super::error::FrameError;

pub struct FrameReader<'a> {
    frame: &'a [u8],
}

impl<'a> FrameReader<'a> {
    pub fn new(frame: &'a [u8]) -> Self {
        Self { frame }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), FrameError> {
        if self.frame.len() < needed {
            return Err(FrameError::TooShort {
                needed,
                actual: self.frame.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, FrameError> {
        self.frame.get(offset).copied().ok_or(FrameError::TooShort {
            needed: offset + 1,
            actual: self.frame.len(),
        })
    }

    pub fn read_u16_be(&self, range: std::ops::Range<usize>) -> Result<u16, FrameError> {
        let bytes = self.read_slice(range)?;
        if bytes.len() != 2 {
            return Err(FrameError::TooShort {
                needed: 2,
                actual: bytes.len(),
            });
        }
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], FrameError> {
        self.frame.get(range.clone()).ok_or(FrameError::TooShort {
            needed: range.end,
            actual: self.frame.len(),
        })
    }
}
