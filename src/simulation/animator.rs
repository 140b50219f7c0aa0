//! Animator - tick scheduling for a model
//!
//! The host calls `tick(now_ms)` from its animation frame callback; the
//! animator answers whether a step + draw is due at the configured rate.
//! It never calls the model itself, owners do that and count through
//! `begin_step` / `end_draw`.

use std::fmt;

use super::perf_timer::PerfTimer;

pub const DEFAULT_RATE: f64 = 30.0;

#[derive(Clone, Debug)]
pub struct Animator {
    rate: f64,
    stopped: bool,
    ticks: u64,
    draws: u64,
    last_frame_ms: Option<f64>,
    timer: PerfTimer,
    start_tick: u64,
    start_draw: u64,
}

impl Animator {
    pub fn new(rate: f64) -> Self {
        Self {
            rate: rate.max(f64::MIN_POSITIVE),
            stopped: true,
            ticks: 0,
            draws: 0,
            last_frame_ms: None,
            timer: PerfTimer::start(),
            start_tick: 0,
            start_draw: 0,
        }
    }

    /// Frames per second
    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate.max(f64::MIN_POSITIVE);
    }

    #[inline]
    pub fn rate(&self) -> f64 { self.rate }

    #[inline]
    pub fn ticks(&self) -> u64 { self.ticks }

    #[inline]
    pub fn draws(&self) -> u64 { self.draws }

    #[inline]
    pub fn is_stopped(&self) -> bool { self.stopped }

    pub fn start(&mut self) {
        if !self.stopped {
            return;
        }
        self.timer.restart();
        self.start_tick = self.ticks;
        self.start_draw = self.draws;
        self.last_frame_ms = None;
        self.stopped = false;
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    /// Stop and zero the counters
    pub fn reset(&mut self) {
        self.stop();
        self.ticks = 0;
        self.draws = 0;
        self.start_tick = 0;
        self.start_draw = 0;
    }

    /// Whether a frame is due at `now_ms`. The first tick after `start` is
    /// always due.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if self.stopped {
            return false;
        }
        let due = match self.last_frame_ms {
            Some(last) => now_ms - last >= 1000.0 / self.rate,
            None => true,
        };
        if due {
            self.last_frame_ms = Some(now_ms);
        }
        due
    }

    /// Count a step, returning the new tick number
    pub fn begin_step(&mut self) -> u64 {
        self.ticks += 1;
        self.ticks
    }

    pub fn end_draw(&mut self) {
        self.draws += 1;
    }

    pub fn ticks_per_sec(&self) -> f64 {
        self.timer.rate(self.ticks - self.start_tick)
    }

    pub fn draws_per_sec(&self) -> f64 {
        self.timer.rate(self.draws - self.start_draw)
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new(DEFAULT_RATE)
    }
}

impl fmt::Display for Animator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ticks: {}, draws: {}, rate: {} tps/dps: {}/{}",
            self.ticks,
            self.draws,
            self.rate,
            self.ticks_per_sec(),
            self.draws_per_sec()
        )
    }
}
