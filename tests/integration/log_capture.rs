//! Per-thread `log` capture.
//!
//! The test harness runs tests on many threads at once, so records are kept
//! in a thread-local buffer and each test only sees what its own thread
//! logged.

use std::cell::RefCell;
use std::sync::Once;

use log::{Level, LevelFilter, Log, Metadata, Record};

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        RECORDS.with(|r| {
            r.borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INSTALL: Once = Once::new();

/// Install the capturing logger (once per test binary) and clear this
/// thread's buffer.
pub fn start() {
    INSTALL.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
    RECORDS.with(|r| r.borrow_mut().clear());
}

/// Drain everything this thread logged since [`start`].
pub fn take() -> Vec<(Level, String)> {
    RECORDS.with(|r| r.borrow_mut().drain(..).collect())
}
