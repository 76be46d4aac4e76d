//! Timer-driven wake notification.
//!
//! The platform timer callback posts, the sampling task waits.  Nothing
//! else crosses this boundary: the callback does no sensor or store work.
//!
//! ```text
//! ┌─────────────┐  post()  ┌──────────────┐  wait()  ┌───────────────┐
//! │ Timer cb    │─────────▶│  WakeSignal  │─────────▶│ Sampling task │
//! │ (esp_timer) │          │ (one slot)   │          │  (consumer)   │
//! └─────────────┘          └──────────────┘          └───────────────┘
//! ```
//!
//! The slot does not count.  Posts that arrive while one is already pending
//! coalesce, so a sampler that overruns its period simply runs the next
//! cycle immediately and the missed tick is lost.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// Single-slot wake signal shared between a timer callback and one task.
pub struct WakeSignal {
    inner: Signal<CriticalSectionRawMutex, ()>,
}

impl WakeSignal {
    pub const fn new() -> Self {
        Self {
            inner: Signal::new(),
        }
    }

    /// Mark the slot pending and wake the waiter, if any.
    /// O(1), no allocation.  Safe to call from the timer task context.
    pub fn post(&self) {
        self.inner.signal(());
    }

    /// Block the calling thread until the slot is posted, then clear it.
    pub fn wait(&self) {
        futures_lite::future::block_on(self.inner.wait());
    }

    /// Whether a post is waiting to be consumed.
    pub fn is_pending(&self) -> bool {
        self.inner.signaled()
    }

    /// Drop any pending post.
    pub fn clear(&self) {
        self.inner.reset();
    }
}

impl Default for WakeSignal {
    fn default() -> Self {
        Self::new()
    }
}
