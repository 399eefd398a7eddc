use std::time::{Duration, Instant};

use crate::float::*;

/// The reported rate is refreshed at most this often.
const REFRESH: Duration = Duration::from_millis(500);

/// Counts rendered frames and derives a smoothed frames-per-second
/// figure.
///
/// Call `add_frame` once per frame; the rate is averaged over refresh
/// windows of half a second, so it holds still long enough to read on
/// screen.
pub struct FrameRateCounter {
    frame_count: u64,
    rate: Float,
    last_update: Instant,
    last_frame_count: u64,
}

impl FrameRateCounter {
    pub fn new() -> FrameRateCounter {
        FrameRateCounter {
            frame_count: 0,
            rate: 0.0,
            last_update: Instant::now(),
            last_frame_count: 0,
        }
    }

    /// Records one frame, refreshing the rate when the window has
    /// passed.
    pub fn add_frame(&mut self) {
        self.frame_count += 1;
        let elapsed = self.last_update.elapsed();
        if elapsed >= REFRESH {
            let frames = self.frame_count - self.last_frame_count;
            self.rate = frames.to_float() / elapsed.as_secs_f64().to_float();
            self.last_update = Instant::now();
            self.last_frame_count = self.frame_count;
        }
    }

    /// Total frames recorded since construction.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second over the last refresh window, 0 until the
    /// first window completes.
    pub fn rate(&self) -> Float {
        self.rate
    }
}

impl Default for FrameRateCounter {
    fn default() -> FrameRateCounter {
        FrameRateCounter::new()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn starts_at_zero() {
        let counter = FrameRateCounter::new();
        assert_eq!(counter.frame_count(), 0);
        assert_eq!(counter.rate(), 0.0);
    }

    #[test]
    fn counts_every_frame() {
        let mut counter = FrameRateCounter::new();
        for _ in 0..5 {
            counter.add_frame();
        }
        assert_eq!(counter.frame_count(), 5);
        // the refresh window has not passed yet
        assert_eq!(counter.rate(), 0.0);
    }

    #[test]
    fn rate_updates_after_the_window() {
        let mut counter = FrameRateCounter::new();
        counter.add_frame();
        thread::sleep(Duration::from_millis(600));
        counter.add_frame();
        assert!(counter.rate() > 0.0);
        // two frames in roughly 0.6 seconds
        assert!(counter.rate() < 10.0);
    }
}
