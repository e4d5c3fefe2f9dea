#![forbid(unsafe_code)]
#![deny(warnings)]
#![warn(clippy::pedantic)]

const PAGE: usize = 4096;

/// Allocate `mb` MiB once and touch one byte per page so the pages are
/// actually materialized, then drop the buffer on return. No caching: the
/// memory pressure is transient by design.
pub fn touch_memory_mb(mb: usize) {
    if mb == 0 {
        return;
    }
    let size = mb.saturating_mul(1024 * 1024);
    let mut buf = vec![0u8; size];
    let mut i = 0;
    while i < buf.len() {
        buf[i] = 1;
        i += PAGE;
    }
    std::hint::black_box(&buf);
}
