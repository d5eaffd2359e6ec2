use std::fmt;

use serde::Serialize;

use crate::conversion::decode_voltage;

/// Raw ADC code together with its converted value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Voltage {
    pub raw: u16,
    pub volts: f64,
}

impl Voltage {
    pub fn from_raw(raw: u16) -> Self {
        Self {
            raw,
            volts: decode_voltage(raw),
        }
    }
}

impl fmt::Display for Voltage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} V (raw {})", self.volts, self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::Voltage;

    #[test]
    fn voltage_keeps_raw_and_scaled() {
        let v = Voltage::from_raw(1234);
        assert_eq!(v.raw, 1234);
        assert_eq!(v.volts, 12.34);
        assert_eq!(v.to_string(), "12.34 V (raw 1234)");
    }
}
