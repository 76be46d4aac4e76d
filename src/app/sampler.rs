//! Sampling loop: the core of the subsystem.
//!
//! [`Sampler`] owns the bus, the alert output, the settle delay, and the
//! cycle timer.  Each timer tick runs one cycle:
//!
//! ```text
//!            ┌────────┐ setup ok ┌───────────┐  tick  ┌──────────┐
//!  init() ──▶│  Init  │─────────▶│ AwaitTick │───────▶│ Transact │
//!            └───┬────┘          └───────────┘        └────┬─────┘
//!                │ setup err           ▲                   │ ok / err
//!                ▼                     │     ┌───────┐     │
//!          Err(SetupError)             └─────│ Apply │◀────┘
//!                                            └───────┘
//! ```
//!
//! A failed result read skips `Apply` entirely: the store and the alert
//! output keep whatever the last good cycle left there.

use std::sync::Arc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;
use log::{debug, info, trace};

use crate::config::SamplerConfig;
use crate::drivers::alert::AlertOutput;
use crate::error::{SetupError, TransactionError};
use crate::events::WakeSignal;
use crate::sensors::sht3x::{self, RawSample, Temperature, RESULT_FRAME_LEN};
use crate::store::SharedReading;

use super::ports::{BusProvider, CycleTimer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerState {
    /// Bringing up the alert output, bus session, and timer.
    Init,
    /// Blocked on the wake signal.
    AwaitTick,
    /// Running the two-phase bus exchange.
    Transact,
    /// Publishing the reading and driving the alert output.
    Apply,
}

/// What one cycle produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleOutcome {
    /// A new reading was written to the store and the alert output driven.
    Published { reading: Temperature, alert: bool },
    /// The result phase failed; nothing was updated.
    Skipped(TransactionError),
}

pub struct Sampler<B, P, D, T>
where
    B: I2c,
    P: OutputPin,
    D: DelayNs,
    T: CycleTimer,
{
    config: SamplerConfig,
    bus: B,
    alert: AlertOutput<P>,
    delay: D,
    /// Kept alive for the sampler's lifetime; dropping it stops the ticks.
    timer: T,
    wake: &'static WakeSignal,
    store: Arc<SharedReading>,
    state: SamplerState,
}

impl<B, P, D, T> Sampler<B, P, D, T>
where
    B: I2c,
    P: OutputPin,
    D: DelayNs,
    T: CycleTimer,
{
    /// Bring the subsystem up.
    ///
    /// Order: validate config, drive the alert output idle, open the bus
    /// session, arm the timer.  Any failure is returned as-is; there is no
    /// retry and no partially initialised sampler.
    pub fn init(
        config: SamplerConfig,
        bus: impl BusProvider<Bus = B>,
        alert_pin: P,
        delay: D,
        mut timer: T,
        wake: &'static WakeSignal,
        store: Arc<SharedReading>,
    ) -> Result<Self, SetupError> {
        config.validate()?;

        let alert = AlertOutput::new(alert_pin);
        let bus = bus.open(config.bus_frequency_hz)?;
        timer.arm(config.sample_period(), wake)?;

        info!(
            "Sampler: sensor 0x{:02X} every {}ms, alert at {:.1}\u{00b0}C",
            config.sensor_address, config.sample_period_ms, config.high_temp_threshold_c
        );

        let mut sampler = Self {
            config,
            bus,
            alert,
            delay,
            timer,
            wake,
            store,
            state: SamplerState::Init,
        };
        sampler.enter(SamplerState::AwaitTick);
        Ok(sampler)
    }

    // ── Loop ──────────────────────────────────────────────────

    /// Run forever.
    pub fn run(self) -> ! {
        self.run_with(|_| {})
    }

    /// Run forever, handing every cycle's outcome to `after_cycle`
    /// (e.g. to feed a watchdog).
    pub fn run_with(mut self, mut after_cycle: impl FnMut(&CycleOutcome)) -> ! {
        loop {
            self.await_tick();
            let outcome = self.run_cycle();
            after_cycle(&outcome);
        }
    }

    /// Block until the timer posts the wake signal.
    pub fn await_tick(&mut self) {
        self.enter(SamplerState::AwaitTick);
        self.wake.wait();
    }

    /// One Transact + Apply pass.  Always ends back in `AwaitTick`.
    pub fn run_cycle(&mut self) -> CycleOutcome {
        let outcome = match self.transact() {
            Ok(raw) => {
                let (reading, alert) = self.apply(raw);
                CycleOutcome::Published { reading, alert }
            }
            Err(e) => CycleOutcome::Skipped(e),
        };
        self.enter(SamplerState::AwaitTick);
        outcome
    }

    // ── Phases ────────────────────────────────────────────────

    /// Two-phase bus exchange.
    ///
    /// 1. Write the measurement command.  A failure here is not an error;
    ///    it only skips the settle delay.
    /// 2. Read the result frame.  A failure here fails the cycle.
    pub fn transact(&mut self) -> Result<RawSample, TransactionError> {
        self.enter(SamplerState::Transact);
        let address = self.config.sensor_address;

        if self.bus.write(address, &self.config.measure_command).is_ok() {
            self.delay.delay_ms(self.config.settle_delay_ms);
        }

        let mut frame = [0u8; RESULT_FRAME_LEN];
        self.bus
            .read(address, &mut frame)
            .map_err(|_| TransactionError::ResultRead)?;

        Ok(sht3x::raw_from_bytes(&frame))
    }

    /// Decode, publish, then drive the alert output.
    fn apply(&mut self, raw: RawSample) -> (Temperature, bool) {
        self.enter(SamplerState::Apply);

        let reading = sht3x::decode(raw);
        self.store.write(reading);

        let alert = sht3x::exceeds_threshold(reading, self.config.high_temp_threshold_c);
        self.alert.set(alert);

        debug!(
            "Sampler: raw=0x{:04X} T={:.2}\u{00b0}C / {:.2}\u{00b0}F alert={}",
            raw,
            reading.celsius(),
            reading.fahrenheit(),
            alert
        );
        (reading, alert)
    }

    fn enter(&mut self, next: SamplerState) {
        if self.state != next {
            trace!("Sampler: {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn state(&self) -> SamplerState {
        self.state
    }

    /// A reader handle onto the store this sampler publishes to.
    pub fn store(&self) -> Arc<SharedReading> {
        Arc::clone(&self.store)
    }

    pub fn alert_active(&self) -> bool {
        self.alert.is_active()
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Stop the cycle timer.  Subsequent [`await_tick`](Self::await_tick)
    /// calls block until something else posts the wake signal.
    pub fn stop_timer(&mut self) {
        self.timer.disarm();
    }
}
