//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Run seeds (wall clock)
//! - JS bindings for the web host (`web`)

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Seed for a new run, from the wall clock
#[cfg(not(target_arch = "wasm32"))]
pub fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
pub fn clock_seed() -> u64 {
    (js_sys::Date::now() * 1000.0) as u64
}
