//! ThermAlert firmware library.
//!
//! Periodically samples an SHT3x temperature sensor over I²C, publishes the
//! reading to a lock-protected store, and drives a high-temperature alert
//! output.  Exposes the pure-logic modules for integration testing; all
//! ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod events;
pub mod pins;
pub mod sensors;
pub mod store;

pub use app::sampler::{CycleOutcome, Sampler, SamplerState};
pub use config::SamplerConfig;
pub use error::{SetupError, TransactionError};
pub use events::WakeSignal;
pub use sensors::Temperature;
pub use store::SharedReading;
