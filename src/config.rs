//! Sampler configuration parameters
//!
//! Every value here is fixed at build time; the firmware runs on
//! [`SamplerConfig::default()`].  The struct exists so the constants live in
//! one place and so tests can shrink the period.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::sensors::sht3x;

/// Sampling periods the watchdog tolerates without a completed cycle.
pub const WATCHDOG_MISSED_CYCLES: u32 = 5;

/// Core sampler configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    // --- Bus ---
    /// 7-bit slave address of the temperature sensor
    pub sensor_address: u8,
    /// Command written in the trigger phase (register select + trigger byte)
    pub measure_command: [u8; 2],
    /// Bus clock in Hz
    pub bus_frequency_hz: u32,
    /// Conversion time between trigger and result read (milliseconds)
    pub settle_delay_ms: u32,

    // --- Timing ---
    /// Sampling period (milliseconds)
    pub sample_period_ms: u32,

    // --- Alert ---
    /// Alert asserts at or above this temperature (Celsius).
    ///
    /// The comparison is on the float reading.  For a whole, non-negative
    /// threshold that is the same as comparing the reading truncated to an
    /// integer; a fractional or negative threshold behaves differently from
    /// truncation (e.g. -0.5 °C truncates to 0).
    pub high_temp_threshold_c: f32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            // Bus
            sensor_address: sht3x::DEFAULT_ADDRESS,
            measure_command: sht3x::MEASURE_HIGH_REP_CLOCK_STRETCH,
            bus_frequency_hz: 400_000, // fast mode
            settle_delay_ms: 2,

            // Timing
            sample_period_ms: 1000, // 1 Hz

            // Alert
            high_temp_threshold_c: 30.0,
        }
    }
}

impl SamplerConfig {
    pub fn sample_period(&self) -> Duration {
        Duration::from_millis(u64::from(self.sample_period_ms))
    }

    /// Watchdog timeout: [`WATCHDOG_MISSED_CYCLES`] sampling periods.
    pub fn watchdog_timeout_ms(&self) -> u32 {
        self.sample_period_ms.saturating_mul(WATCHDOG_MISSED_CYCLES)
    }

    /// Reject values that would leave the sampler misbehaving rather than
    /// clamping them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sensor_address > 0x7F {
            return Err(ConfigError::ValidationFailed(
                "sensor_address must fit in 7 bits",
            ));
        }
        if self.sample_period_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "sample_period_ms must be non-zero",
            ));
        }
        if self.settle_delay_ms == 0 || self.settle_delay_ms >= self.sample_period_ms {
            return Err(ConfigError::ValidationFailed(
                "settle_delay_ms must be non-zero and shorter than the period",
            ));
        }
        if !self.high_temp_threshold_c.is_finite() {
            return Err(ConfigError::ValidationFailed(
                "high_temp_threshold_c must be finite",
            ));
        }
        if self.bus_frequency_hz == 0 {
            return Err(ConfigError::ValidationFailed(
                "bus_frequency_hz must be non-zero",
            ));
        }
        Ok(())
    }
}

/// Errors from [`SamplerConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl From<ConfigError> for crate::error::SetupError {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::ValidationFailed(msg) => Self::InvalidConfig(msg),
        }
    }
}
