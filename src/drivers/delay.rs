//! Blocking delay backed by `std::thread::sleep`.
//!
//! Used for the settle delay on host builds and in tests.  On ESP-IDF the
//! firmware uses `esp_idf_hal::delay::Delay` instead, which busy-waits for
//! short intervals rather than yielding to FreeRTOS.

use std::thread;
use std::time::Duration;

use embedded_hal::delay::DelayNs;

#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl StdDelay {
    pub fn new() -> Self {
        Self
    }
}

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        if ns == 0 {
            return;
        }

        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }
}
