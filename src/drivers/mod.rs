//! Platform glue: alert output, cycle timer, delay, and watchdog.

pub mod alert;
pub mod delay;
pub mod hw_timer;
pub mod watchdog;
