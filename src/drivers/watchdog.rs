//! Sampler liveness watchdog.
//!
//! On the device the sampling thread subscribes itself to the ESP-IDF Task
//! Watchdog (TWDT) and feeds it from the `run_with` callback, once per
//! cycle.  A sampler stuck in a bus transfer or never woken by its timer
//! stops feeding and the TWDT panics the chip into a reset.
//!
//! The timeout is a whole number of sampling periods, see
//! [`SamplerConfig::watchdog_timeout_ms`].  On the host the watchdog only
//! counts feeds so tests can check the per-cycle contract.

#[cfg(not(target_os = "espidf"))]
use core::cell::Cell;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;
use log::info;

use crate::config::SamplerConfig;

pub struct Watchdog {
    timeout_ms: u32,
    #[cfg(target_os = "espidf")]
    subscribed: bool,
    #[cfg(not(target_os = "espidf"))]
    feeds: Cell<u32>,
}

impl Watchdog {
    /// Subscribe the **calling** thread with a timeout derived from the
    /// sampling period.
    pub fn for_sampler(config: &SamplerConfig) -> Self {
        Self::with_timeout(config.watchdog_timeout_ms())
    }

    #[cfg(target_os = "espidf")]
    fn with_timeout(timeout_ms: u32) -> Self {
        let cfg = esp_task_wdt_config_t {
            timeout_ms,
            idle_core_mask: 0,
            trigger_panic: true,
        };
        // SAFETY: plain FFI calls; a null handle subscribes the current task.
        let subscribed = unsafe {
            let ret = esp_task_wdt_reconfigure(&cfg);
            if ret != ESP_OK {
                log::warn!("Watchdog: reconfigure returned {}", ret);
            }
            esp_task_wdt_add(core::ptr::null_mut()) == ESP_OK
        };
        if subscribed {
            info!("Watchdog: sampler subscribed, {}ms without a cycle resets", timeout_ms);
        } else {
            log::warn!("Watchdog: sampler not subscribed, running unguarded");
        }
        Self {
            timeout_ms,
            subscribed,
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn with_timeout(timeout_ms: u32) -> Self {
        info!("Watchdog(sim): {}ms", timeout_ms);
        Self {
            timeout_ms,
            feeds: Cell::new(0),
        }
    }

    /// Mark one completed cycle.
    pub fn feed(&self) {
        #[cfg(target_os = "espidf")]
        {
            if self.subscribed {
                // SAFETY: only called from the subscribed thread.
                unsafe {
                    esp_task_wdt_reset();
                }
            }
        }

        #[cfg(not(target_os = "espidf"))]
        {
            self.feeds.set(self.feeds.get() + 1);
        }
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// Feeds seen so far.
    #[cfg(not(target_os = "espidf"))]
    pub fn feeds(&self) -> u32 {
        self.feeds.get()
    }
}
