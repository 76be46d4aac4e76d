//! Sensirion SHT3x temperature codec.
//!
//! The sensor answers a single-shot measurement with a 6-byte frame:
//!
//! ```text
//!  [T_msb, T_lsb, T_crc, RH_msb, RH_lsb, RH_crc]
//! ```
//!
//! Only the temperature word is consumed here.  The humidity half of the
//! frame is left untouched and no CRC is checked.
//!
//! Conversion is the datasheet's linear transfer function:
//! `T[°C] = -45 + 175 * raw / (2^16 - 1)`.

/// Default 7-bit slave address (ADDR pin low).
pub const DEFAULT_ADDRESS: u8 = 0x44;

/// Single-shot, high repeatability, clock stretching enabled.
pub const MEASURE_HIGH_REP_CLOCK_STRETCH: [u8; 2] = [0x2C, 0x06];

/// Length of a measurement result frame.
pub const RESULT_FRAME_LEN: usize = 6;

/// Unsigned 16-bit temperature word as received from the sensor.
pub type RawSample = u16;

/// A temperature reading in both units.
///
/// Fahrenheit is always derived from Celsius inside [`from_celsius`]; the
/// fields are private so the pair can never disagree.
///
/// [`from_celsius`]: Temperature::from_celsius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temperature {
    celsius: f32,
    fahrenheit: f32,
}

impl Temperature {
    /// 0 °C, the reading the store starts with before the first cycle.
    pub const ZERO: Self = Self {
        celsius: 0.0,
        fahrenheit: 32.0,
    };

    pub fn from_celsius(celsius: f32) -> Self {
        Self {
            celsius,
            fahrenheit: celsius * 9.0 / 5.0 + 32.0,
        }
    }

    pub fn celsius(&self) -> f32 {
        self.celsius
    }

    pub fn fahrenheit(&self) -> f32 {
        self.fahrenheit
    }
}

impl Default for Temperature {
    fn default() -> Self {
        Self::from_celsius(0.0)
    }
}

/// Extract the temperature word from a result frame (big-endian).
pub fn raw_from_bytes(frame: &[u8; RESULT_FRAME_LEN]) -> RawSample {
    u16::from_be_bytes([frame[0], frame[1]])
}

/// Convert a raw temperature word to engineering units.
///
/// Total over `u16`.  `175 * raw` is exact in `f32` (it stays below 2^24),
/// so the only rounding steps are the division and the offset.
pub fn decode(raw: RawSample) -> Temperature {
    let celsius = 175.0 * f32::from(raw) / 65535.0 - 45.0;
    Temperature::from_celsius(celsius)
}

/// Inclusive threshold comparison used to drive the alert output.
pub fn exceeds_threshold(reading: Temperature, threshold_c: f32) -> bool {
    reading.celsius() >= threshold_c
}
