//! Mock hardware for integration tests.
//!
//! The bus, the alert pin, and the delay all record into one shared
//! timeline so tests can assert on the exact order of a cycle
//! (command write → settle delay → result read → alert write) without
//! touching real peripherals.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::i2c::{self, ErrorKind, I2c, NoAcknowledgeSource, Operation};

use thermalert::app::ports::CycleTimer;
use thermalert::{Sampler, SamplerConfig, SetupError, SharedReading, WakeSignal};

// ── Timeline ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HwEvent {
    Write { address: u8, bytes: Vec<u8> },
    Read { address: u8, len: usize },
    Delay { ns: u32 },
    Pin(bool),
}

#[derive(Default)]
struct HwState {
    events: Vec<HwEvent>,
    fail_writes: bool,
    fail_reads: bool,
    frame: [u8; 6],
}

/// Shared handle over the mock peripherals.
#[derive(Clone, Default)]
pub struct MockHw(Rc<RefCell<HwState>>);

#[allow(dead_code)]
impl MockHw {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bus(&self) -> MockBus {
        MockBus(self.clone())
    }

    pub fn pin(&self) -> MockPin {
        MockPin(self.clone())
    }

    pub fn delay(&self) -> MockDelay {
        MockDelay(self.clone())
    }

    /// Set the full 6-byte frame returned by the next reads.
    pub fn set_frame(&self, frame: [u8; 6]) {
        self.0.borrow_mut().frame = frame;
    }

    /// Set only the temperature word; the humidity half is filled with junk.
    pub fn set_raw(&self, raw: u16) {
        let [hi, lo] = raw.to_be_bytes();
        self.set_frame([hi, lo, 0xA5, 0x5A, 0xC3, 0x3C]);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.0.borrow_mut().fail_writes = fail;
    }

    pub fn fail_reads(&self, fail: bool) {
        self.0.borrow_mut().fail_reads = fail;
    }

    pub fn events(&self) -> Vec<HwEvent> {
        self.0.borrow().events.clone()
    }

    pub fn clear_events(&self) {
        self.0.borrow_mut().events.clear();
    }

    /// Last level written to the alert pin, if any.
    pub fn pin_level(&self) -> Option<bool> {
        self.0.borrow().events.iter().rev().find_map(|e| match e {
            HwEvent::Pin(level) => Some(*level),
            _ => None,
        })
    }

    fn push(&self, event: HwEvent) {
        self.0.borrow_mut().events.push(event);
    }
}

// ── I2C bus ───────────────────────────────────────────────────

pub struct MockBus(MockHw);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nack;

impl i2c::Error for Nack {
    fn kind(&self) -> ErrorKind {
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
    }
}

impl i2c::ErrorType for MockBus {
    type Error = Nack;
}

impl I2c for MockBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    self.0.push(HwEvent::Write {
                        address,
                        bytes: bytes.to_vec(),
                    });
                    if self.0.0.borrow().fail_writes {
                        return Err(Nack);
                    }
                }
                Operation::Read(buf) => {
                    self.0.push(HwEvent::Read {
                        address,
                        len: buf.len(),
                    });
                    let state = self.0.0.borrow();
                    if state.fail_reads {
                        return Err(Nack);
                    }
                    let n = buf.len().min(state.frame.len());
                    buf[..n].copy_from_slice(&state.frame[..n]);
                }
            }
        }
        Ok(())
    }
}

// ── Alert pin ─────────────────────────────────────────────────

pub struct MockPin(MockHw);

impl digital::ErrorType for MockPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.push(HwEvent::Pin(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.push(HwEvent::Pin(true));
        Ok(())
    }
}

// ── Delay ─────────────────────────────────────────────────────

pub struct MockDelay(MockHw);

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.push(HwEvent::Delay { ns });
    }
}

// ── Cycle timer ───────────────────────────────────────────────

/// Records the armed period; never posts on its own.  Tests post the wake
/// signal by hand.
#[derive(Default)]
pub struct MockTimer {
    pub fail_with: Option<SetupError>,
    pub armed: Rc<Cell<Option<Duration>>>,
}

impl CycleTimer for MockTimer {
    fn arm(&mut self, period: Duration, _wake: &'static WakeSignal) -> Result<(), SetupError> {
        if let Some(e) = self.fail_with {
            return Err(e);
        }
        self.armed.set(Some(period));
        Ok(())
    }

    fn disarm(&mut self) {
        self.armed.set(None);
    }
}

// ── Builders ──────────────────────────────────────────────────

pub type TestSampler = Sampler<MockBus, MockPin, MockDelay, MockTimer>;

pub fn leak_wake() -> &'static WakeSignal {
    Box::leak(Box::new(WakeSignal::new()))
}

/// Build a sampler over `hw` with a working bus and timer.
#[allow(dead_code)]
pub fn build(hw: &MockHw, config: SamplerConfig) -> (TestSampler, Arc<SharedReading>) {
    let store = Arc::new(SharedReading::new());
    let bus = hw.bus();
    let sampler = Sampler::init(
        config,
        move |_hz: u32| Ok::<_, SetupError>(bus),
        hw.pin(),
        hw.delay(),
        MockTimer::default(),
        leak_wake(),
        Arc::clone(&store),
    )
    .expect("mock setup cannot fail");
    (sampler, store)
}
