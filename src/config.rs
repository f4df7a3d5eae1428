//! Scene configuration.
//!
//! [`TreeConfig::default`] reproduces the stock scene. Individual values can
//! be changed with the `with_*` builder methods:
//!
//! ```
//! use tree_morph::TreeConfig;
//!
//! let config = TreeConfig::default()
//!     .with_foliage_count(5_000)
//!     .with_ground_count(0)
//!     .with_toggle_lockout(1.0);
//! assert!(config.validate().is_ok());
//! ```

use crate::error::ConfigError;
use crate::shape::ScatterShell;
use crate::smoothing::Smoothing;
use glam::Vec3;

/// Outer radius of the scattered cloud.
pub const SCATTER_RADIUS: f32 = 22.0;

/// Settings shared by every particle group.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupConfig {
    /// Number of particles. Zero is allowed.
    pub count: usize,
    /// Where the particles sit when scattered.
    pub shell: ScatterShell,
    /// Progress convergence rate (1/seconds).
    pub rate: f32,
}

impl GroupConfig {
    /// Group of `count` particles.
    pub const fn new(count: usize, shell: ScatterShell, rate: f32) -> Self {
        Self { count, shell, rate }
    }

    fn validate(&self, group: &'static str, rate_field: &'static str) -> Result<(), ConfigError> {
        let ScatterShell { inner, outer } = self.shell;
        if !inner.is_finite() || !outer.is_finite() || inner < 0.0 || inner > outer {
            return Err(ConfigError::InvalidShell { group, inner, outer });
        }
        positive(rate_field, self.rate)
    }
}

/// The star on top of the tree.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopStarConfig {
    /// Position while scattered.
    pub scatter_position: Vec3,
    /// Gap between the tree apex and the star.
    pub apex_offset: f32,
    /// Scale once fully gathered.
    pub scale: f32,
    /// Scale floor while scattered, so the star never degenerates.
    pub min_scale: f32,
    /// Spin about the Y axis (radians per second).
    pub spin: f32,
}

impl Default for TopStarConfig {
    fn default() -> Self {
        Self {
            scatter_position: Vec3::new(0.0, 15.0, 0.0),
            apex_offset: 0.6,
            scale: 1.5,
            min_scale: 0.001,
            spin: 0.8,
        }
    }
}

/// Full scene configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeConfig {
    /// Tree height; the tree spans `[-height/2, height/2]`.
    pub height: f32,
    /// Tree radius at the base.
    pub base_radius: f32,
    /// Needle-like points filling the cone.
    pub foliage: GroupConfig,
    /// Instanced decorations.
    pub ornaments: GroupConfig,
    /// Spiral ribbon.
    pub ribbon: GroupConfig,
    /// Sparkles on the ground.
    pub ground: GroupConfig,
    /// Star on top.
    pub top_star: TopStarConfig,
    /// Seconds during which further toggles are ignored.
    pub toggle_lockout: f32,
    /// Smoothing formula for every group.
    pub smoothing: Smoothing,
}

impl Default for TreeConfig {
    fn default() -> Self {
        let cloud = ScatterShell::new(12.0, SCATTER_RADIUS);
        Self {
            height: 9.0,
            base_radius: 4.5,
            foliage: GroupConfig::new(35_000, cloud, 1.5),
            ornaments: GroupConfig::new(400, cloud, 1.5),
            ribbon: GroupConfig::new(1_500, ScatterShell::new(5.0, SCATTER_RADIUS), 1.5),
            ground: GroupConfig::new(3_500, ScatterShell::ball(SCATTER_RADIUS * 1.2), 1.0),
            top_star: TopStarConfig::default(),
            toggle_lockout: 2.0,
            smoothing: Smoothing::Linear,
        }
    }
}

impl TreeConfig {
    /// Stock configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tree height.
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    /// Set the tree base radius.
    pub fn with_base_radius(mut self, base_radius: f32) -> Self {
        self.base_radius = base_radius;
        self
    }

    /// Set the number of foliage points.
    pub fn with_foliage_count(mut self, count: usize) -> Self {
        self.foliage.count = count;
        self
    }

    /// Set the number of ornaments.
    pub fn with_ornament_count(mut self, count: usize) -> Self {
        self.ornaments.count = count;
        self
    }

    /// Set the number of ribbon points.
    pub fn with_ribbon_count(mut self, count: usize) -> Self {
        self.ribbon.count = count;
        self
    }

    /// Set the number of ground sparkles.
    pub fn with_ground_count(mut self, count: usize) -> Self {
        self.ground.count = count;
        self
    }

    /// Set the lockout window after a toggle.
    pub fn with_toggle_lockout(mut self, seconds: f32) -> Self {
        self.toggle_lockout = seconds;
        self
    }

    /// Set the smoothing formula.
    pub fn with_smoothing(mut self, smoothing: Smoothing) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Check the configuration before anything is generated.
    ///
    /// A zero or negative tree size would put NaN into every tree position,
    /// so it is rejected here rather than per particle.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("height", self.height)?;
        positive("base_radius", self.base_radius)?;

        self.foliage.validate("foliage", "foliage.rate")?;
        self.ornaments.validate("ornaments", "ornaments.rate")?;
        self.ribbon.validate("ribbon", "ribbon.rate")?;
        self.ground.validate("ground", "ground.rate")?;

        if !self.toggle_lockout.is_finite() {
            return Err(ConfigError::NotFinite { field: "toggle_lockout" });
        }
        if self.toggle_lockout < 0.0 {
            return Err(ConfigError::Negative {
                field: "toggle_lockout",
                value: self.toggle_lockout,
            });
        }

        let star = &self.top_star;
        if !star.scatter_position.is_finite() {
            return Err(ConfigError::NotFinite { field: "top_star.scatter_position" });
        }
        for (field, value) in [
            ("top_star.apex_offset", star.apex_offset),
            ("top_star.min_scale", star.min_scale),
            ("top_star.spin", star.spin),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
        }
        positive("top_star.scale", star.scale)?;
        if star.min_scale < 0.0 {
            return Err(ConfigError::Negative {
                field: "top_star.min_scale",
                value: star.min_scale,
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { field });
    }
    if value <= 0.0 {
        return Err(ConfigError::NonPositive { field, value });
    }
    Ok(())
}
