//! Port traits: the boundary between the sampling loop and the platform.
//!
//! ```text
//!   Platform ──▶ Port trait ──▶ Sampler (domain)
//! ```
//!
//! The bus, the alert output, and the settle delay are already covered by
//! `embedded-hal` traits (`i2c::I2c`, `digital::OutputPin`,
//! `delay::DelayNs`), so the sampler takes those directly.  The two
//! collaborators `embedded-hal` has no vocabulary for live here: opening the
//! bus session and arming the periodic timer.

use core::time::Duration;

use embedded_hal::i2c::I2c;

use crate::error::SetupError;
use crate::events::WakeSignal;

// ───────────────────────────────────────────────────────────────
// Bus session (platform → domain)
// ───────────────────────────────────────────────────────────────

/// Opens the bus session the sampler will own for its lifetime.
///
/// Called once during `Init`.  Failure is fatal for the subsystem.
pub trait BusProvider {
    type Bus: I2c;

    fn open(self, frequency_hz: u32) -> Result<Self::Bus, SetupError>;
}

/// Any one-shot constructor closure is a provider.
impl<F, B> BusProvider for F
where
    F: FnOnce(u32) -> Result<B, SetupError>,
    B: I2c,
{
    type Bus = B;

    fn open(self, frequency_hz: u32) -> Result<B, SetupError> {
        self(frequency_hz)
    }
}

// ───────────────────────────────────────────────────────────────
// Cycle timer (platform → domain)
// ───────────────────────────────────────────────────────────────

/// Periodic notification source.
///
/// Once armed, the implementation posts `wake` once per `period` from its
/// own context and does nothing else there.  Delivery is at-least-once
/// with no catch-up: a tick that lands while one is still pending is lost.
pub trait CycleTimer {
    /// Create and start the periodic notification.
    fn arm(&mut self, period: Duration, wake: &'static WakeSignal) -> Result<(), SetupError>;

    /// Stop notifications.  Harmless if never armed.
    fn disarm(&mut self);
}
