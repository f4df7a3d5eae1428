//! Per-group progress smoothing.
//!
//! Each particle group owns a [`Progress`] that chases a target of 0
//! (scattered) or 1 (tree) every frame. Groups use different rates so the
//! layers of the scene settle at different speeds.
//!
//! ```
//! use tree_morph::{Progress, Smoothing};
//!
//! let mut progress = Progress::new(1.5);
//! for _ in 0..300 {
//!     progress.step(1.0, 1.0 / 60.0);
//! }
//! assert!(progress.value() > 0.99);
//! ```

/// Formula used to move progress toward its target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Smoothing {
    /// `lerp(value, target, dt * rate)` with the factor clamped to `[0, 1]`.
    ///
    /// Frame-rate dependent, but never overshoots.
    #[default]
    Linear,
    /// `value += (target - value) * (1 - exp(-rate * dt))`.
    ///
    /// Frame-rate independent exponential decay.
    Exponential,
}

impl Smoothing {
    /// Fraction of the remaining distance covered in one step, in `[0, 1]`.
    #[inline]
    pub fn factor(self, rate: f32, dt: f32) -> f32 {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        match self {
            Smoothing::Linear => (dt * rate).clamp(0.0, 1.0),
            Smoothing::Exponential => 1.0 - (-rate * dt).exp(),
        }
    }
}

/// A blend weight in `[0, 1]` that converges toward a target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Progress {
    value: f32,
    rate: f32,
    smoothing: Smoothing,
}

impl Progress {
    /// Progress at 0 with the given rate (per second).
    pub fn new(rate: f32) -> Self {
        Self {
            value: 0.0,
            rate,
            smoothing: Smoothing::Linear,
        }
    }

    /// Use a different smoothing formula.
    pub fn with_smoothing(mut self, smoothing: Smoothing) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Current blend weight.
    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Convergence rate in 1/seconds.
    #[inline]
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Formula in use.
    #[inline]
    pub fn smoothing(&self) -> Smoothing {
        self.smoothing
    }

    /// Advance one frame toward `target`.
    ///
    /// With `target` in `{0, 1}` the value stays in `[0, 1]`; it is never
    /// clamped afterwards.
    pub fn step(&mut self, target: f32, dt: f32) -> f32 {
        let k = self.smoothing.factor(self.rate, dt);
        self.value += (target - self.value) * k;
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converges_to_one() {
        let mut p = Progress::new(1.5);
        let mut last = p.value();
        for _ in 0..300 {
            let v = p.step(1.0, 1.0 / 60.0);
            assert!(v > last);
            assert!(v <= 1.0);
            last = v;
        }
        assert!(p.value() > 0.99);
    }

    #[test]
    fn test_converges_to_zero() {
        let mut p = Progress::new(1.0);
        for _ in 0..600 {
            p.step(1.0, 1.0 / 60.0);
        }
        let mut last = p.value();
        for _ in 0..600 {
            let v = p.step(0.0, 1.0 / 60.0);
            assert!(v < last);
            assert!(v >= 0.0);
            last = v;
        }
        assert!(p.value() < 0.01);
    }

    #[test]
    fn test_large_dt_does_not_overshoot() {
        for smoothing in [Smoothing::Linear, Smoothing::Exponential] {
            let mut p = Progress::new(1.5).with_smoothing(smoothing);
            p.step(1.0, 10.0);
            assert!(p.value() <= 1.0);
            assert!(p.value() > 0.99);
        }
    }

    #[test]
    fn test_bad_dt_is_ignored() {
        let mut p = Progress::new(1.5);
        p.step(1.0, -1.0);
        assert_eq!(p.value(), 0.0);
        p.step(1.0, f32::NAN);
        assert_eq!(p.value(), 0.0);
    }

    #[test]
    fn test_exponential_frame_rate_independent() {
        let mut a = Progress::new(1.5).with_smoothing(Smoothing::Exponential);
        let mut b = a;
        a.step(1.0, 0.5);
        b.step(1.0, 0.25);
        b.step(1.0, 0.25);
        assert!((a.value() - b.value()).abs() < 1e-5);
    }
}
