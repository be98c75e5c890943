//! Frame timing for the animation loop.
//!
//! One clock drives everything: the engine's elapsed time, the autoplay
//! timer, and the FPS readout. Call [`Time::update`] once per frame.

use std::time::{Duration, Instant};

/// Monotonic frame clock with pause support.
#[derive(Debug)]
pub struct Time {
    /// When the clock started.
    start: Instant,
    /// When the last frame occurred.
    last_frame: Instant,
    /// Total elapsed seconds, excluding paused spans.
    elapsed_secs: f32,
    /// Seconds since the previous frame.
    delta_secs: f32,
    /// Frames since start.
    frame_count: u64,
    /// Calculated FPS (refreshed periodically).
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
    paused: bool,
    /// Accumulated time spent paused, subtracted from elapsed.
    pause_elapsed: Duration,
}

impl Time {
    /// Create a clock starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            paused: false,
            pause_elapsed: Duration::ZERO,
        }
    }

    /// Advance the clock. Call once per frame.
    ///
    /// Returns `(elapsed, delta)` in seconds. While paused, delta is zero
    /// and elapsed stops increasing.
    pub fn update(&mut self) -> (f32, f32) {
        let now = Instant::now();

        if self.paused {
            self.delta_secs = 0.0;
            return (self.elapsed_secs, self.delta_secs);
        }

        self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        let raw_elapsed = now.duration_since(self.start) - self.pause_elapsed;
        self.elapsed_secs = raw_elapsed.as_secs_f32();

        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        (self.elapsed_secs, self.delta_secs)
    }

    /// Elapsed seconds since start, excluding paused spans.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Seconds since the previous frame.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Calculated frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Whether the clock is paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Freeze the clock; the animation holds its pose.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume after a pause without a time jump.
    pub fn resume(&mut self) {
        if self.paused {
            let now = Instant::now();
            self.pause_elapsed += now.duration_since(self.last_frame);
            self.last_frame = now;
            self.paused = false;
        }
    }

    /// Toggle pause state.
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_time_new() {
        let time = Time::new();
        assert_eq!(time.frame(), 0);
        assert!(!time.is_paused());
    }

    #[test]
    fn test_time_update() {
        let mut time = Time::new();
        thread::sleep(Duration::from_millis(10));
        let (elapsed, delta) = time.update();

        assert!(elapsed > 0.0);
        assert!(delta > 0.0);
        assert_eq!(time.frame(), 1);
    }

    #[test]
    fn test_pause_freezes_elapsed() {
        let mut time = Time::new();
        time.update();

        time.pause();
        let elapsed_before = time.elapsed();
        thread::sleep(Duration::from_millis(10));
        time.update();

        assert_eq!(time.elapsed(), elapsed_before);
        assert_eq!(time.delta(), 0.0);
    }

    #[test]
    fn test_resume_skips_paused_span() {
        let mut time = Time::new();
        time.update();
        let before = time.elapsed();

        time.pause();
        thread::sleep(Duration::from_millis(20));
        time.resume();
        time.update();

        // Elapsed moved by roughly the (tiny) active span, not the pause.
        assert!(time.elapsed() - before < 0.015);
    }
}
