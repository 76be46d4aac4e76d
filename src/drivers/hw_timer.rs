//! Cycle timer implementations.
//!
//! The timer only ever posts the [`WakeSignal`]; all sampling work happens
//! on the task blocked in `wait()`.
//!
//! On ESP-IDF: an `esp_timer` periodic timer dispatched from the ESP timer
//! task (not ISR), so the callback may enter a critical section.
//! On host/test: a named thread that sleeps to absolute deadlines.

#[cfg(target_os = "espidf")]
pub use esp::EspCycleTimer;
#[cfg(not(target_os = "espidf"))]
pub use sim::SimCycleTimer;

#[cfg(target_os = "espidf")]
mod esp {
    use core::time::Duration;

    use esp_idf_svc::sys::*;
    use log::info;

    use crate::app::ports::CycleTimer;
    use crate::error::SetupError;
    use crate::events::WakeSignal;

    /// `esp_timer`-backed periodic wake source.
    pub struct EspCycleTimer {
        handle: esp_timer_handle_t,
    }

    impl EspCycleTimer {
        pub fn new() -> Self {
            Self {
                handle: core::ptr::null_mut(),
            }
        }
    }

    impl Default for EspCycleTimer {
        fn default() -> Self {
            Self::new()
        }
    }

    unsafe extern "C" fn post_wake_cb(arg: *mut core::ffi::c_void) {
        // SAFETY: `arg` is the `&'static WakeSignal` handed to `arm()`.
        let wake = unsafe { &*(arg as *const WakeSignal) };
        wake.post();
    }

    impl CycleTimer for EspCycleTimer {
        fn arm(&mut self, period: Duration, wake: &'static WakeSignal) -> Result<(), SetupError> {
            self.disarm();

            let args = esp_timer_create_args_t {
                callback: Some(post_wake_cb),
                arg: wake as *const WakeSignal as *mut core::ffi::c_void,
                dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
                name: b"cycle\0".as_ptr() as *const _,
                skip_unhandled_events: true,
            };

            let mut handle: esp_timer_handle_t = core::ptr::null_mut();
            // SAFETY: `args` outlives the call and `wake` is 'static, so the
            // pointer stored in the timer stays valid for every callback.
            let ret = unsafe { esp_timer_create(&args, &mut handle) };
            if ret != ESP_OK {
                return Err(SetupError::TimerCreate(ret));
            }

            // SAFETY: `handle` was just created and is not running.
            let ret = unsafe { esp_timer_start_periodic(handle, period.as_micros() as u64) };
            if ret != ESP_OK {
                // SAFETY: stopped timer, never started.
                unsafe { esp_timer_delete(handle) };
                return Err(SetupError::TimerStart(ret));
            }

            self.handle = handle;
            info!("hw_timer: cycle timer armed ({}ms)", period.as_millis());
            Ok(())
        }

        fn disarm(&mut self) {
            if self.handle.is_null() {
                return;
            }
            // SAFETY: non-null handle created by `arm()`; nulled below so it
            // is never stopped or deleted twice.
            unsafe {
                esp_timer_stop(self.handle);
                esp_timer_delete(self.handle);
            }
            self.handle = core::ptr::null_mut();
        }
    }

    impl Drop for EspCycleTimer {
        fn drop(&mut self) {
            self.disarm();
        }
    }
}

#[cfg(not(target_os = "espidf"))]
mod sim {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread::{self, JoinHandle};
    use std::time::{Duration, Instant};

    use crate::app::ports::CycleTimer;
    use crate::error::SetupError;
    use crate::events::WakeSignal;

    /// Thread-backed periodic wake source for host builds.
    #[derive(Default)]
    pub struct SimCycleTimer {
        worker: Option<(Arc<AtomicBool>, JoinHandle<()>)>,
    }

    impl SimCycleTimer {
        pub fn new() -> Self {
            Self { worker: None }
        }

        pub fn is_armed(&self) -> bool {
            self.worker.is_some()
        }
    }

    impl CycleTimer for SimCycleTimer {
        fn arm(&mut self, period: Duration, wake: &'static WakeSignal) -> Result<(), SetupError> {
            self.disarm();

            let stop = Arc::new(AtomicBool::new(false));
            let handle = {
                let stop = Arc::clone(&stop);
                thread::Builder::new()
                    .name("cycle-timer".into())
                    .spawn(move || {
                        let mut next = Instant::now() + period;
                        while !stop.load(Ordering::Acquire) {
                            let now = Instant::now();
                            if now >= next {
                                wake.post();
                                next += period;
                            } else {
                                thread::park_timeout(next - now);
                            }
                        }
                    })
                    .map_err(|e| SetupError::TimerCreate(e.raw_os_error().unwrap_or(-1)))?
            };

            log::info!("hw_timer(sim): cycle timer armed ({}ms)", period.as_millis());
            self.worker = Some((stop, handle));
            Ok(())
        }

        fn disarm(&mut self) {
            if let Some((stop, handle)) = self.worker.take() {
                stop.store(true, Ordering::Release);
                handle.thread().unpark();
                let _ = handle.join();
            }
        }
    }

    impl Drop for SimCycleTimer {
        fn drop(&mut self) {
            self.disarm();
        }
    }

}
