//! GPIO / peripheral pin assignments for the sensor board.
//!
//! Single source of truth: the firmware entry point references this module
//! rather than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// I²C bus (SHT3x temperature/humidity sensor)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 14;
pub const I2C_SCL_GPIO: i32 = 15;

// ---------------------------------------------------------------------------
// Alert output
// ---------------------------------------------------------------------------

/// Digital output: HIGH = over-temperature alert (LED on).
pub const ALERT_LED_GPIO: i32 = 2;
