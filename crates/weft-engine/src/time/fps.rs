use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Counts frames presented within the trailing window (one second by default).
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window: Duration,
    moments: VecDeque<Instant>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::with_window(Duration::from_secs(1))
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            moments: VecDeque::new(),
        }
    }

    /// Records a frame at `now` and drops frames older than the window.
    pub fn record(&mut self, now: Instant) {
        self.moments.push_back(now);
        while self
            .moments
            .front()
            .is_some_and(|&t| now.saturating_duration_since(t) > self.window)
        {
            self.moments.pop_front();
        }
    }

    /// Frames recorded within the window ending at the latest record.
    #[inline]
    pub fn fps(&self) -> usize {
        self.moments.len()
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}
