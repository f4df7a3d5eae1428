//! Morph state and the toggle lockout.

use std::fmt;

/// Which configuration the scene is blending toward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MorphState {
    /// Particles drift in a loose cloud.
    #[default]
    Scattered,
    /// Particles gather into the tree.
    TreeShape,
}

impl MorphState {
    /// Progress target for this state: 1 for the tree, 0 otherwise.
    #[inline]
    pub fn target(self) -> f32 {
        match self {
            MorphState::TreeShape => 1.0,
            MorphState::Scattered => 0.0,
        }
    }

    /// The other state.
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            MorphState::Scattered => MorphState::TreeShape,
            MorphState::TreeShape => MorphState::Scattered,
        }
    }
}

impl fmt::Display for MorphState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MorphState::Scattered => write!(f, "scattered"),
            MorphState::TreeShape => write!(f, "tree"),
        }
    }
}

/// Timer that blocks repeated toggles for a fixed window.
///
/// The window is measured in frame time fed through [`ToggleGate::tick`],
/// not wall-clock time, and is independent of how far progress has actually
/// converged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToggleGate {
    lockout: f32,
    remaining: f32,
}

impl ToggleGate {
    /// Gate with a lockout of `lockout` seconds after each accepted toggle.
    pub fn new(lockout: f32) -> Self {
        Self {
            lockout,
            remaining: 0.0,
        }
    }

    /// Whether a toggle would currently be accepted.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Seconds until the gate reopens.
    #[inline]
    pub fn remaining(&self) -> f32 {
        self.remaining.max(0.0)
    }

    /// Try to pass the gate. On success the lockout starts over.
    pub fn try_pass(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        self.remaining = self.lockout;
        true
    }

    /// Let `dt` seconds elapse.
    pub fn tick(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.remaining = (self.remaining - dt).max(0.0);
        }
    }
}
