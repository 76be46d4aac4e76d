//! High-temperature alert output.
//!
//! A single discrete output: HIGH = alert, LOW = idle.  On the board this
//! is an LED, but anything behind an `OutputPin` works.
//!
//! The level is written on every cycle whether or not it changed.  A
//! repeated write of the same level is harmless, and it re-asserts the
//! output if something else disturbed the pin.  There is no readback.

use embedded_hal::digital::OutputPin;
use log::{info, warn};

pub struct AlertOutput<P: OutputPin> {
    pin: P,
    active: bool,
}

impl<P: OutputPin> AlertOutput<P> {
    /// Take ownership of the pin and drive it to the idle level.
    pub fn new(pin: P) -> Self {
        let mut alert = Self { pin, active: false };
        alert.write_level(false);
        alert
    }

    /// Drive the output.  Logs only on a level change.
    pub fn set(&mut self, active: bool) {
        let was = self.active;
        self.write_level(active);
        if self.active != was {
            info!("Alert: {}", if active { "asserted" } else { "cleared" });
        }
    }

    /// Last level successfully written to the pin.
    pub fn is_active(&self) -> bool {
        self.active
    }

    fn write_level(&mut self, active: bool) {
        let res = if active {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        match res {
            Ok(()) => self.active = active,
            Err(e) => warn!("Alert: pin write failed: {:?}", e),
        }
    }
}
