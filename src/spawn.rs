//! Spawn context for particle placement.
//!
//! Every generator receives a [`SpawnContext`] carrying the particle's index,
//! the group size and a borrowed random source. The random source is injected
//! by the caller, so a scene built from a fixed seed is reproducible:
//!
//! ```
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//! use tree_morph::SpawnContext;
//!
//! let mut rng = SmallRng::seed_from_u64(7);
//! let mut ctx = SpawnContext::new(0, 1, &mut rng);
//! let p = ctx.random_in_shell(12.0, 22.0);
//! assert!(p.length() >= 12.0 - 1e-3 && p.length() <= 22.0 + 1e-3);
//! ```

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{PI, TAU};

/// Context handed to placement generators, one per particle.
pub struct SpawnContext<'a, R: Rng> {
    /// Index of the particle being placed (0 to count-1).
    pub index: usize,
    /// Total number of particles in the group.
    pub count: usize,
    rng: &'a mut R,
}

impl<'a, R: Rng> SpawnContext<'a, R> {
    /// Create a context for particle `index` of `count`.
    pub fn new(index: usize, count: usize, rng: &'a mut R) -> Self {
        Self { index, count, rng }
    }

    /// Normalized position of this particle within the group, in `[0, 1)`.
    ///
    /// An empty group reports 0.
    #[inline]
    pub fn progress(&self) -> f32 {
        if self.count == 0 {
            0.0
        } else {
            self.index as f32 / self.count as f32
        }
    }

    // ========== Random primitives ==========

    /// Random f32 in `[0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in `[min, max)`.
    ///
    /// Unlike `Rng::gen_range`, a degenerate range (`min == max`) is allowed
    /// and returns `min`.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.random() * (max - min)
    }

    /// Random angle in `[0, 2π)`.
    #[inline]
    pub fn random_angle(&mut self) -> f32 {
        self.random() * TAU
    }

    /// Random index in `0..len`. `len` must be non-zero.
    #[inline]
    pub fn random_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    // ========== Position helpers ==========

    /// Random point between two spheres centered at origin.
    ///
    /// The radius is drawn uniformly in `[inner, outer)`, not by volume, so
    /// points crowd toward the inner boundary.
    pub fn random_in_shell(&mut self, inner: f32, outer: f32) -> Vec3 {
        let r = self.random_range(inner, outer);
        let theta = self.random_angle();
        let phi = self.random() * PI;

        Vec3::new(
            r * phi.sin() * theta.cos(),
            r * phi.sin() * theta.sin(),
            r * phi.cos(),
        )
    }

    /// Random point inside a disk in the XZ plane at y=0.
    ///
    /// Area-uniform (`sqrt` on the radial draw).
    pub fn random_in_disk(&mut self, radius: f32) -> Vec3 {
        self.random_in_disk_weighted(radius, 0.5)
    }

    /// Random point in a disk in the XZ plane with the radial draw raised to
    /// `exponent`.
    ///
    /// `0.5` is area-uniform; larger exponents pull points toward the center.
    pub fn random_in_disk_weighted(&mut self, radius: f32, exponent: f32) -> Vec3 {
        let theta = self.random_angle();
        let r = radius * self.random().powf(exponent);
        Vec3::new(r * theta.cos(), 0.0, r * theta.sin())
    }
}

/// Build the scene's random source.
///
/// `Some(seed)` gives a reproducible stream, `None` seeds from OS entropy.
pub fn scene_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_context_progress() {
        let mut rng = scene_rng(Some(1));
        let ctx = SpawnContext::new(50, 100, &mut rng);
        assert!((ctx.progress() - 0.5).abs() < 0.001);

        let ctx = SpawnContext::new(0, 0, &mut rng);
        assert_eq!(ctx.progress(), 0.0);
    }

    #[test]
    fn test_random_in_shell_bounds() {
        let mut rng = scene_rng(Some(2));
        let mut ctx = SpawnContext::new(0, 1, &mut rng);
        for _ in 0..1000 {
            let r = ctx.random_in_shell(5.0, 22.0).length();
            assert!((5.0 - 1e-3..=22.0 + 1e-3).contains(&r));
        }
    }

    #[test]
    fn test_degenerate_range() {
        let mut rng = scene_rng(Some(3));
        let mut ctx = SpawnContext::new(0, 1, &mut rng);
        assert_eq!(ctx.random_range(4.0, 4.0), 4.0);
        let p = ctx.random_in_shell(0.0, 0.0);
        assert_eq!(p, Vec3::ZERO);
    }

    #[test]
    fn test_random_in_disk_is_flat() {
        let mut rng = scene_rng(Some(4));
        let mut ctx = SpawnContext::new(0, 1, &mut rng);
        for _ in 0..200 {
            let p = ctx.random_in_disk_weighted(2.0, 1.5);
            assert_eq!(p.y, 0.0);
            assert!(p.length() <= 2.0 + 1e-4);
        }
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = scene_rng(Some(99));
        let mut b = scene_rng(Some(99));
        let pa = SpawnContext::new(0, 1, &mut a).random_in_shell(1.0, 2.0);
        let pb = SpawnContext::new(0, 1, &mut b).random_in_shell(1.0, 2.0);
        assert_eq!(pa, pb);
    }
}
