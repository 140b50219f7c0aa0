//! Wall-clock timer: `Date.now()` in the browser, a process-wide `Instant`
//! epoch natively.

/// Milliseconds on the host clock
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static EPOCH: OnceLock<Instant> = OnceLock::new();
    EPOCH.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

#[derive(Clone, Copy, Debug)]
pub struct PerfTimer {
    start_ms: f64,
}

impl PerfTimer {
    pub fn start() -> Self {
        PerfTimer { start_ms: now_ms() }
    }

    pub fn restart(&mut self) {
        self.start_ms = now_ms();
    }

    pub fn elapsed_ms(&self) -> f64 {
        (now_ms() - self.start_ms).max(0.0)
    }

    /// Events per second over the elapsed time, 0 before any time has passed
    pub fn rate(&self, events: u64) -> f64 {
        let ms = self.elapsed_ms();
        if events == 0 || ms <= 0.0 {
            return 0.0;
        }
        (events as f64 * 1000.0 / ms).round()
    }
}

impl Default for PerfTimer {
    fn default() -> Self {
        Self::start()
    }
}
