//! ThermAlert Firmware: Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  esp_timer cb ──post──▶ WakeSignal ──wait──▶ sampler thread   │
//! │                                              │                │
//! │                      I2cDriver ◀── Transact ─┤                │
//! │                                              ▼                │
//! │  main thread ──read()──▶ SharedReading ◀── Apply ──▶ alert LED│
//! │  (console + supervisor)                                       │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The main thread supervises: if the sampler thread ends (which only
//! happens on a setup failure), `main` returns the error and the ESP-IDF
//! runtime aborts and resets the chip.
#![deny(unused_must_use)]

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Result, anyhow};
use esp_idf_hal::delay::Delay;
use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, PinDriver};
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use log::{error, info};

use thermalert::drivers::hw_timer::EspCycleTimer;
use thermalert::drivers::watchdog::Watchdog;
use thermalert::{Sampler, SamplerConfig, SetupError, SharedReading, WakeSignal, pins};

/// Posted by the cycle timer callback; must outlive the timer.
static WAKE: WakeSignal = WakeSignal::new();

/// How often the main thread logs the published reading.
const REPORT_INTERVAL: Duration = Duration::from_secs(5);

/// Sampler stack size.  Generous for the logging formatters.
const SAMPLER_STACK_BYTES: usize = 8 * 1024;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  ThermAlert v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let i2c = peripherals.i2c0;
    // SAFETY: pin numbers come from `pins` and nothing else claims them.
    let (sda, scl, led) = unsafe {
        (
            AnyIOPin::new(pins::I2C_SDA_GPIO),
            AnyIOPin::new(pins::I2C_SCL_GPIO),
            AnyOutputPin::new(pins::ALERT_LED_GPIO),
        )
    };
    let alert_pin = PinDriver::output(led)?;

    let config = SamplerConfig::default();
    let store = Arc::new(SharedReading::new());

    // ── 3. Sampler thread ─────────────────────────────────────
    let sampler_store = Arc::clone(&store);
    let sampler_task = thread::Builder::new()
        .name("sampler".into())
        .stack_size(SAMPLER_STACK_BYTES)
        .spawn(move || -> Result<(), SetupError> {
            let open_bus = move |frequency_hz: u32| {
                let cfg = I2cConfig::new().baudrate(Hertz(frequency_hz));
                I2cDriver::new(i2c, sda, scl, &cfg).map_err(|e| {
                    error!("I2C open failed: {}", e);
                    SetupError::BusOpen
                })
            };

            let sampler = Sampler::init(
                config,
                open_bus,
                alert_pin,
                Delay::new_default(),
                EspCycleTimer::new(),
                &WAKE,
                sampler_store,
            )?;

            let watchdog = Watchdog::for_sampler(sampler.config());
            sampler.run_with(|_| watchdog.feed())
        })?;

    info!("System ready. Sampler running.");

    // ── 4. Console reader / supervisor ────────────────────────
    loop {
        thread::sleep(REPORT_INTERVAL);

        if sampler_task.is_finished() {
            return match sampler_task.join() {
                Ok(Err(e)) => {
                    error!("Sampler setup failed: {}, halting", e);
                    Err(e.into())
                }
                Ok(Ok(())) => Err(anyhow!("sampler exited")),
                Err(_) => Err(anyhow!("sampler panicked")),
            };
        }

        let t = store.read();
        info!(
            "TEMP | {:.2}\u{00b0}C | {:.2}\u{00b0}F",
            t.celsius(),
            t.fahrenheit()
        );
    }
}
