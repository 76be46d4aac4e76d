//! Sensor codecs.
//!
//! Pure conversion from raw bus frames to engineering units.  No I/O
//! happens here; the sampler owns the bus and hands frames in.

pub mod sht3x;

pub use sht3x::{RawSample, Temperature};
