//! Shared reading store.
//!
//! Holds the most recently published [`Temperature`].  The sampler is the
//! only writer; any number of tasks may read through a cloned `Arc` handle.
//!
//! ```text
//! ┌──────────────┐  write()  ┌────────────────┐  read()  ┌──────────────┐
//! │   Sampler    │──────────▶│ SharedReading  │◀─────────│ Reader tasks │
//! │ (one writer) │           │ (lock + pair)  │          │   (many)     │
//! └──────────────┘           └────────────────┘          └──────────────┘
//! ```
//!
//! The lock only makes the {celsius, fahrenheit} pair visible as a unit.
//! Both operations copy the pair inside the critical section and nothing
//! else, so readers are never blocked for longer than that copy.

use core::cell::Cell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use crate::sensors::Temperature;

pub struct SharedReading {
    latest: Mutex<CriticalSectionRawMutex, Cell<Temperature>>,
}

impl SharedReading {
    /// Create a store holding 0 °C / 32 °F.
    pub const fn new() -> Self {
        Self {
            latest: Mutex::new(Cell::new(Temperature::ZERO)),
        }
    }

    /// Publish a new reading.
    pub fn write(&self, reading: Temperature) {
        self.latest.lock(|cell| cell.set(reading));
    }

    /// Copy out the latest reading.
    pub fn read(&self) -> Temperature {
        self.latest.lock(Cell::get)
    }
}

impl Default for SharedReading {
    fn default() -> Self {
        Self::new()
    }
}
