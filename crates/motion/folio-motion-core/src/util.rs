//! Small timing/numeric helpers shared by the core and host adapters.
//!
//! `Debounce`/`Throttle` are driven by an explicit clock (milliseconds from
//! any monotonic origin) so they work identically under a browser rAF loop,
//! a native frame loop, or a test harness.

/// Linear interpolation of scalars.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.clamp(min, max)
}

/// Trailing-edge debounce: `poll` reports true once, `wait_ms` after the most
/// recent `trigger`.
#[derive(Debug, Clone)]
pub struct Debounce {
    wait_ms: f64,
    deadline: Option<f64>,
}

impl Debounce {
    pub fn new(wait_ms: f64) -> Self {
        Self {
            wait_ms,
            deadline: None,
        }
    }

    /// Record an event at `now_ms`; resets any pending deadline.
    pub fn trigger(&mut self, now_ms: f64) {
        self.deadline = Some(now_ms + self.wait_ms);
    }

    /// True exactly once when the quiet period has elapsed.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(d) if now_ms >= d => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

/// Leading-edge throttle: the first `allow` passes, further calls are blocked
/// until `limit_ms` has elapsed.
#[derive(Debug, Clone)]
pub struct Throttle {
    limit_ms: f64,
    open_at: f64,
}

impl Throttle {
    pub fn new(limit_ms: f64) -> Self {
        Self {
            limit_ms,
            open_at: f64::NEG_INFINITY,
        }
    }

    pub fn allow(&mut self, now_ms: f64) -> bool {
        if now_ms >= self.open_at {
            self.open_at = now_ms + self.limit_ms;
            true
        } else {
            false
        }
    }
}
