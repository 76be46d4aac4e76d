//! Error types for the sampling subsystem.
//!
//! Two categories exist and they are handled very differently:
//!
//! - [`SetupError`] is fatal.  It is returned from
//!   [`Sampler::init`](crate::app::sampler::Sampler::init) and the caller
//!   decides whether to halt or restart.
//! - [`TransactionError`] is recoverable.  A failed bus exchange skips one
//!   cycle's update and the loop carries on at the next tick.
//!
//! All variants are `Copy` so they can be carried inside cycle outcomes
//! without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Setup errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    /// The sampler configuration failed validation.
    InvalidConfig(&'static str),
    /// The bus session could not be opened.
    BusOpen,
    /// The platform timer could not be created (platform return code).
    TimerCreate(i32),
    /// The platform timer could not be started (platform return code).
    TimerStart(i32),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::BusOpen => write!(f, "bus session could not be opened"),
            Self::TimerCreate(rc) => write!(f, "timer create failed (rc={rc})"),
            Self::TimerStart(rc) => write!(f, "timer start failed (rc={rc})"),
        }
    }
}

impl core::error::Error for SetupError {}

// ---------------------------------------------------------------------------
// Transaction errors
// ---------------------------------------------------------------------------

/// Only the result phase can fail a cycle.  A failed command write merely
/// skips the settle delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionError {
    /// The result read was not acknowledged or aborted.
    ResultRead,
}

impl fmt::Display for TransactionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResultRead => write!(f, "result read failed"),
        }
    }
}

impl core::error::Error for TransactionError {}
