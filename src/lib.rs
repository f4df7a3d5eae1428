//! # tree-morph
//!
//! A procedural particle Christmas tree that morphs between a scattered cloud
//! and a tree silhouette.
//!
//! The crate owns the interesting part of such a scene: where every particle
//! sits in each of the two configurations, and how far along the blend each
//! group is on any given frame. Drawing is left to the host, which reads a
//! [`SceneFrame`] once per frame and feeds it to its renderer.
//!
//! ## Quick Start
//!
//! ```
//! use tree_morph::prelude::*;
//!
//! let config = TreeConfig::default().with_foliage_count(2_000);
//! let mut scene = Scene::with_seed(config, 7).unwrap();
//!
//! scene.toggle(); // gather into the tree
//! for _ in 0..120 {
//!     scene.update(1.0 / 60.0);
//!     let frame = scene.frame();
//!     // upload frame.foliage.scatter / frame.foliage.tree once,
//!     // then set the progress uniform every frame
//!     let _ = frame.foliage.progress;
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Groups
//!
//! | Group | Scattered | Tree | Rate |
//! |-------|-----------|------|------|
//! | foliage | shell 12..22 | tiered cone | 1.5 |
//! | ornaments | shell 12..22 | tiered cone, pushed outward | 1.5 |
//! | ribbon | shell 5..22 | spiral around the cone | 1.5 |
//! | ground | ball of radius 26.4 | disk under the tree | 1.0 |
//!
//! Every group owns two position buffers generated once at construction and a
//! [`Progress`] that chases 0 or 1 depending on the [`MorphState`].
//!
//! ### Randomness
//!
//! Generators draw from an injected random source through a
//! [`SpawnContext`]. [`Scene::with_seed`] gives identical buffers for
//! identical seeds; [`Scene::new`] seeds from entropy.
//!
//! ### Toggling
//!
//! [`Scene::toggle`] flips the state and then refuses further toggles for a
//! lockout window (2 seconds by default) measured in scene time.

#![warn(missing_docs)]

pub mod config;
mod error;
pub mod group;
pub mod input;
pub mod motion;
pub mod ornament;
mod scene;
pub mod shape;
pub mod smoothing;
mod spawn;
pub mod state;
pub mod time;

pub use config::{GroupConfig, TopStarConfig, TreeConfig};
pub use error::ConfigError;
pub use glam::Vec3;
pub use group::{GroupFrame, GroupKind, PointGroup};
pub use motion::Drift;
pub use ornament::{InstanceGpu, Ornament, OrnamentBatches, OrnamentInstance, OrnamentKind, Ornaments, StarPose, TopStar};
pub use scene::{Scene, SceneFrame};
pub use shape::{GroundDisk, OutwardPush, Placement, Pushed, RibbonSpiral, ScatterShell, TreeCone};
pub use smoothing::{Progress, Smoothing};
pub use spawn::{scene_rng, SpawnContext};
pub use state::{MorphState, ToggleGate};

/// Convenient re-exports for common usage.
///
/// ```
/// use tree_morph::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::TreeConfig;
    pub use crate::group::{GroupFrame, GroupKind, PointGroup};
    pub use crate::input::{Action, Binding, Input};
    pub use crate::ornament::{OrnamentInstance, OrnamentKind};
    pub use crate::scene::{Scene, SceneFrame};
    pub use crate::shape::{Placement, ScatterShell, TreeCone};
    pub use crate::smoothing::Smoothing;
    pub use crate::state::MorphState;
    pub use crate::time::Time;
    pub use crate::Vec3;
}
