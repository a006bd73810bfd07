//! Platform abstraction layer
//!
//! Handles browser/native differences for time. Milliseconds as `f64`
//! match what `Date.now()` hands out on web.

/// Clock collaborator
pub trait Clock {
    /// Current time in milliseconds from an arbitrary fixed origin
    fn now_ms(&self) -> f64;
}

/// Wall clock for the running platform
#[derive(Debug, Clone)]
pub struct SystemClock {
    #[cfg(not(target_arch = "wasm32"))]
    origin: std::time::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            origin: std::time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    #[cfg(not(target_arch = "wasm32"))]
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    #[cfg(target_arch = "wasm32")]
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

/// Whole seconds between two millisecond timestamps, rounded half away from zero
pub fn elapsed_secs(start_ms: f64, end_ms: f64) -> u64 {
    ((end_ms - start_ms) / 1000.0).round().max(0.0) as u64
}
