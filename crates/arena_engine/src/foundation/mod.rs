//! Foundation utilities: math, timing, and logging.

pub mod logging;
pub mod math;
pub mod time;
