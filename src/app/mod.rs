//! Application core: the sampling loop and the ports it is wired through.
//!
//! All interaction with hardware happens through `embedded-hal` traits and
//! the **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod ports;
pub mod sampler;
