//! Time-window coalescing of high-rate input events.
//!
//! A [`RateLimiter`] lets at most one value through per window. A value that
//! arrives when the window since the last emission has elapsed is emitted at
//! once; values arriving inside the window overwrite a single pending slot,
//! which [`poll`](RateLimiter::poll) releases once the window closes. A burst
//! therefore costs one emission per window and always ends on its latest value.

use std::time::{Duration, Instant};

use crate::error::{PlotError, Result};

#[derive(Debug, Clone)]
pub struct RateLimiter<T> {
    interval: Duration,
    last_emit: Option<Instant>,
    pending: Option<T>,
}

impl<T> RateLimiter<T> {
    /// Limit to `rate_hz` emissions per second. `rate_hz` must be finite and positive.
    pub fn new(rate_hz: f64) -> Result<Self> {
        if !(rate_hz.is_finite() && rate_hz > 0.0) {
            return Err(PlotError::Configuration(format!(
                "rate limit must be a positive number of events per second, got {rate_hz}"
            )));
        }
        Ok(Self::with_interval(Duration::from_secs_f64(1.0 / rate_hz)))
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            last_emit: None,
            pending: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    fn window_open(&self, now: Instant) -> bool {
        match self.last_emit {
            Some(t) => now.saturating_duration_since(t) >= self.interval,
            None => true,
        }
    }

    /// Offer a raw value. Returns it when it may be processed now.
    pub fn push(&mut self, value: T, now: Instant) -> Option<T> {
        if self.window_open(now) {
            self.last_emit = Some(now);
            self.pending = None;
            Some(value)
        } else {
            self.pending = Some(value);
            None
        }
    }

    /// Release the pending value if its window has closed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.pending.is_some() && self.window_open(now) {
            self.last_emit = Some(now);
            self.pending.take()
        } else {
            None
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes releasable, if there is one.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref()?;
        self.last_emit.map(|t| t + self.interval)
    }
}
