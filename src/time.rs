//! Frame clock for driving a [`Scene`](crate::Scene).
//!
//! The scene itself never reads a clock; the host measures each frame and
//! passes the delta to [`Scene::update`](crate::Scene::update). `Time` is that
//! measurement, with the usual knobs for deterministic stepping:
//!
//! ```
//! use tree_morph::time::Time;
//!
//! let mut time = Time::new();
//! time.set_fixed_delta(Some(1.0 / 60.0));
//!
//! let dt = time.tick();
//! assert!((dt - 1.0 / 60.0).abs() < 1e-6);
//! assert_eq!(time.frame(), 1);
//! ```

use std::time::{Duration, Instant};

/// Per-frame timing.
#[derive(Debug, Clone)]
pub struct Time {
    last_frame: Instant,
    /// Scaled seconds accumulated over all ticks.
    elapsed_secs: f32,
    /// Scaled seconds of the last tick.
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_window: Duration,
    fps_window_start: Instant,
    paused: bool,
    /// Replaces the measured delta when set.
    fixed_delta: Option<f32>,
    /// Upper bound on a measured delta, so a stalled frame cannot jump the
    /// morph forward.
    max_delta: Option<f32>,
    time_scale: f32,
}

impl Time {
    /// Clock starting now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_window: Duration::from_millis(500),
            fps_window_start: now,
            paused: false,
            fixed_delta: None,
            max_delta: None,
            time_scale: 1.0,
        }
    }

    /// Measure the frame that just ended and return its delta in seconds.
    ///
    /// Returns 0 while paused.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let measured = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        if self.paused {
            self.delta_secs = 0.0;
            return 0.0;
        }

        let raw = match (self.fixed_delta, self.max_delta) {
            (Some(fixed), _) => fixed,
            (None, Some(max)) => measured.min(max),
            (None, None) => measured,
        };
        self.advance(raw);

        let window = now.duration_since(self.fps_window_start);
        if window >= self.fps_window {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 / window.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_window_start = now;
        }

        self.delta_secs
    }

    /// Advance by an explicit delta without reading the wall clock.
    ///
    /// Useful for headless runs and tests. The time scale still applies.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.delta_secs = dt.max(0.0) * self.time_scale;
        self.elapsed_secs += self.delta_secs;
        self.frame_count += 1;
        self.delta_secs
    }

    /// Scaled seconds since start, excluding pauses.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Scaled seconds of the last frame.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Number of ticks so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second over the last measurement window.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Whether ticks currently return 0.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Current speed multiplier.
    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Stop advancing time.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume without counting the paused interval.
    pub fn resume(&mut self) {
        if self.paused {
            self.last_frame = Instant::now();
            self.paused = false;
        }
    }

    /// Flip between paused and running.
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Use `Some(dt)` for every tick instead of measuring.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }

    /// Clamp measured deltas to at most `max` seconds.
    ///
    /// A fixed delta is used as is.
    pub fn set_max_delta(&mut self, max: Option<f32>) {
        self.max_delta = max;
    }

    /// Speed multiplier; negative values clamp to 0.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
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
        assert_eq!(time.time_scale(), 1.0);
    }

    #[test]
    fn test_tick_measures() {
        let mut time = Time::new();
        thread::sleep(Duration::from_millis(10));
        let dt = time.tick();
        assert!(dt > 0.0);
        assert_eq!(time.elapsed(), dt);
        assert_eq!(time.frame(), 1);
    }

    #[test]
    fn test_pause() {
        let mut time = Time::new();
        time.tick();
        time.pause();

        let before = time.elapsed();
        thread::sleep(Duration::from_millis(10));
        assert_eq!(time.tick(), 0.0);
        assert_eq!(time.elapsed(), before);

        time.toggle_pause();
        assert!(!time.is_paused());
    }

    #[test]
    fn test_max_delta_clamps_measured() {
        let mut time = Time::new();
        time.set_max_delta(Some(0.001));
        thread::sleep(Duration::from_millis(10));
        assert!((time.tick() - 0.001).abs() < 1e-6);
    }

    #[test]
    fn test_fixed_delta_ignores_max() {
        let mut time = Time::new();
        time.set_fixed_delta(Some(0.5));
        time.set_max_delta(Some(0.1));
        thread::sleep(Duration::from_millis(5));
        assert!((time.tick() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_advance_scaled() {
        let mut time = Time::new();
        time.set_time_scale(2.0);
        assert_eq!(time.advance(0.25), 0.5);
        time.set_time_scale(-1.0);
        assert_eq!(time.time_scale(), 0.0);
        assert_eq!(time.advance(0.25), 0.0);
        assert_eq!(time.elapsed(), 0.5);
        assert_eq!(time.frame(), 2);
    }
}
