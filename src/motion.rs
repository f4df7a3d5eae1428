//! Idle motion layered on top of the blended positions.
//!
//! Point groups never move their buffers; a renderer animates them per
//! vertex from the blended position, the vertex index, the group's progress
//! and the scene time. [`Drift::displace`] is the CPU version of that
//! per-vertex motion and is what [`PointGroup::animate_into`] uses.
//!
//! [`PointGroup::animate_into`]: crate::PointGroup::animate_into

use glam::Vec3;

/// Per-vertex idle motion for a point group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Drift {
    /// Slow wander that calms down as the tree forms.
    ///
    /// Each point gets its own frequency. The horizontal swing shrinks
    /// from `scattered` to `gathered` amplitude with progress, and a small
    /// vertical bob appears.
    Foliage {
        /// Horizontal amplitude while scattered.
        scattered: f32,
        /// Horizontal amplitude once gathered.
        gathered: f32,
        /// Vertical bob amplitude once gathered.
        bob: f32,
    },

    /// Light rippling along the ribbon, driven by height.
    Ribbon {
        /// Offset amplitude.
        amplitude: f32,
    },

    /// Twinkling sparkles that settle to half motion on the ground.
    Ground {
        /// Offset amplitude while scattered.
        amplitude: f32,
    },

    /// No motion.
    Still,
}

impl Drift {
    /// Foliage drift used by the stock scene.
    pub const FOLIAGE: Drift = Drift::Foliage {
        scattered: 0.3,
        gathered: 0.08,
        bob: 0.05,
    };

    /// Ribbon drift used by the stock scene.
    pub const RIBBON: Drift = Drift::Ribbon { amplitude: 0.05 };

    /// Ground sparkle drift used by the stock scene.
    pub const GROUND: Drift = Drift::Ground { amplitude: 0.15 };

    /// Offset blended position `pos` of vertex `index`.
    pub fn displace(&self, index: usize, pos: Vec3, progress: f32, time: f32) -> Vec3 {
        let id = index as f32;
        match *self {
            Drift::Foliage { scattered, gathered, bob } => {
                let freq = 0.4 + (id * 0.0005).fract();
                let amplitude = scattered * (1.0 - progress) + gathered * progress;
                Vec3::new(
                    pos.x + (time * freq + id).sin() * amplitude,
                    pos.y + (time * 0.3 + id * 0.5).sin() * bob * progress,
                    pos.z + (time * freq * 0.7 + id * 1.1).cos() * amplitude,
                )
            }
            Drift::Ribbon { amplitude } => Vec3::new(
                pos.x + (time * 1.5 + pos.y).sin() * amplitude,
                pos.y,
                pos.z + (time * 1.2 + pos.y * 0.8).cos() * amplitude,
            ),
            Drift::Ground { amplitude } => {
                let settle = 1.0 - progress * 0.5;
                Vec3::new(
                    pos.x + (time * 1.2 + id * 0.1).sin() * amplitude * settle,
                    pos.y,
                    pos.z + (time + id * 0.05).cos() * amplitude * settle,
                )
            }
            Drift::Still => pos,
        }
    }

    /// Largest distance [`displace`](Self::displace) can move a point.
    pub fn max_offset(&self) -> f32 {
        match *self {
            Drift::Foliage { scattered, gathered, bob } => {
                scattered.abs().max(gathered.abs()) * std::f32::consts::SQRT_2 + bob.abs()
            }
            Drift::Ribbon { amplitude } | Drift::Ground { amplitude } => {
                amplitude.abs() * std::f32::consts::SQRT_2
            }
            Drift::Still => 0.0,
        }
    }
}
