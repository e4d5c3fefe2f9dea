#![forbid(unsafe_code)]
#![deny(warnings)]
#![warn(clippy::pedantic)]

use std::time::{Duration, Instant};

/// Busy-loop for roughly `ms` milliseconds. Deliberately approximate load
/// shaping; callers run this on the blocking pool so the async runtime is
/// not starved.
pub fn burn_cpu_ms(ms: u64) {
    if ms == 0 {
        return;
    }
    let end = Instant::now() + Duration::from_millis(ms);
    while Instant::now() < end {
        std::hint::spin_loop();
    }
}
