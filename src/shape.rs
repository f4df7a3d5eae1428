//! Placement generators for the two morph targets.
//!
//! A [`Placement`] turns a [`SpawnContext`] into one point. Generators are
//! stateless and can be called per point in any order; the only state they
//! touch is the random source inside the context.
//!
//! | Generator | Target | Distribution |
//! |-----------|--------|--------------|
//! | [`ScatterShell`] | scattered | radius-uniform spherical shell |
//! | [`TreeCone`] | tree | tiered cone, bottom-heavy |
//! | [`RibbonSpiral`] | tree | deterministic spiral around the cone |
//! | [`GroundDisk`] | tree | flat center-weighted disk under the tree |
//!
//! Post-placement steps such as [`OutwardPush`] are composed on top with
//! [`Placement::pushed`].

use crate::spawn::SpawnContext;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::PI;

/// Number of branch layers carved into the tree silhouette.
pub const TREE_TIERS: u32 = 7;

/// Produces one position per particle.
pub trait Placement {
    /// Place the particle described by `ctx`.
    fn place<R: Rng>(&self, ctx: &mut SpawnContext<'_, R>) -> Vec3;

    /// Follow this placement with an outward horizontal push.
    fn pushed(self, push: OutwardPush) -> Pushed<Self>
    where
        Self: Sized,
    {
        Pushed { base: self, push }
    }
}

// =============================================================================
// Scattered target
// =============================================================================

/// Spherical shell between two radii, centered at origin.
///
/// The radius is drawn uniformly in `[inner, outer)` rather than by volume,
/// which keeps the cloud visibly denser toward its inner boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScatterShell {
    /// Inner radius.
    pub inner: f32,
    /// Outer radius.
    pub outer: f32,
}

impl ScatterShell {
    /// Shell between `inner` and `outer`.
    pub const fn new(inner: f32, outer: f32) -> Self {
        Self { inner, outer }
    }

    /// Solid ball of the given radius.
    pub const fn ball(radius: f32) -> Self {
        Self { inner: 0.0, outer: radius }
    }

    /// Whether `p` lies within the shell, with `eps` slack on both radii.
    pub fn contains(&self, p: Vec3, eps: f32) -> bool {
        let r = p.length();
        r >= self.inner - eps && r <= self.outer + eps
    }
}

impl Placement for ScatterShell {
    fn place<R: Rng>(&self, ctx: &mut SpawnContext<'_, R>) -> Vec3 {
        ctx.random_in_shell(self.inner, self.outer)
    }
}

// =============================================================================
// Tree target
// =============================================================================

/// Conical tree volume with a stepped radius profile.
///
/// Spans `[-height/2, height/2]` vertically. Points are biased toward the
/// base, and the radius at each height bulges periodically to suggest
/// branch layers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeCone {
    /// Total height of the tree.
    pub height: f32,
    /// Radius at the base.
    pub base_radius: f32,
    /// Number of radius bulges from base to apex.
    pub tiers: u32,
}

impl TreeCone {
    /// Cone of the given size with the default tier count.
    pub const fn new(height: f32, base_radius: f32) -> Self {
        Self {
            height,
            base_radius,
            tiers: TREE_TIERS,
        }
    }

    /// Radius multiplier at `height_ratio` (1 at base, 0 at apex).
    ///
    /// Ranges over `[0.8, 1.0]`.
    #[inline]
    pub fn tier_shape(&self, height_ratio: f32) -> f32 {
        let s = (height_ratio * self.tiers as f32 * PI).sin();
        0.8 + 0.2 * s * s
    }

    /// Height ratio for a centered y coordinate: 1 at the base, 0 at the apex.
    #[inline]
    pub fn height_ratio(&self, y: f32) -> f32 {
        (self.height / 2.0 - y) / self.height
    }

    /// Upper bound on the horizontal radius at centered height `y`.
    pub fn max_radius_at(&self, y: f32) -> f32 {
        self.height_ratio(y) * self.base_radius
    }
}

impl Placement for TreeCone {
    /// The particle index is ignored; every call draws independently.
    fn place<R: Rng>(&self, ctx: &mut SpawnContext<'_, R>) -> Vec3 {
        // sqrt biases toward the base
        let t = 1.0 - ctx.random().sqrt();
        let y = t * self.height;
        let height_ratio = (self.height - y) / self.height;

        let radius_base = height_ratio * self.base_radius * self.tier_shape(height_ratio);

        let angle = ctx.random_angle();
        let radius = radius_base * ctx.random().sqrt();

        Vec3::new(
            angle.cos() * radius,
            y - self.height / 2.0,
            angle.sin() * radius,
        )
    }
}

/// Random outward scale applied to the horizontal components only.
///
/// Moves ornaments toward the surface of the foliage without changing
/// their height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutwardPush {
    /// Smallest multiplier.
    pub min: f32,
    /// Largest multiplier.
    pub max: f32,
}

impl OutwardPush {
    /// Push used for ornaments: `[1.0, 1.15)`.
    pub const ORNAMENT: OutwardPush = OutwardPush { min: 1.0, max: 1.15 };

    /// Scale `p.x` and `p.z` by a random factor in `[min, max)`.
    pub fn apply<R: Rng>(&self, p: Vec3, ctx: &mut SpawnContext<'_, R>) -> Vec3 {
        let push = ctx.random_range(self.min, self.max);
        Vec3::new(p.x * push, p.y, p.z * push)
    }
}

impl Default for OutwardPush {
    fn default() -> Self {
        Self::ORNAMENT
    }
}

/// A placement followed by an [`OutwardPush`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pushed<P> {
    /// The placement producing the unpushed point.
    pub base: P,
    /// The push applied afterwards.
    pub push: OutwardPush,
}

impl<P: Placement> Placement for Pushed<P> {
    fn place<R: Rng>(&self, ctx: &mut SpawnContext<'_, R>) -> Vec3 {
        let p = self.base.place(ctx);
        self.push.apply(p, ctx)
    }
}

/// Gold ribbon wound around the tree.
///
/// Fully deterministic: the point depends only on `index / count`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RibbonSpiral {
    /// Total height of the tree.
    pub height: f32,
    /// Radius of the tree at its base.
    pub base_radius: f32,
    /// Full windings from bottom to top.
    pub turns: f32,
    /// How far outside the foliage the ribbon sits.
    pub radius_scale: f32,
    /// Amplitude of the radial ripple between branches.
    pub ripple: f32,
}

impl RibbonSpiral {
    /// Ribbon sized to the given tree.
    pub const fn new(height: f32, base_radius: f32) -> Self {
        Self {
            height,
            base_radius,
            turns: 10.0,
            radius_scale: 1.15,
            ripple: 0.1,
        }
    }
}

impl Placement for RibbonSpiral {
    fn place<R: Rng>(&self, ctx: &mut SpawnContext<'_, R>) -> Vec3 {
        let p = ctx.progress();
        let angle = p * PI * 2.0 * self.turns;
        let y = p * self.height - self.height / 2.0;

        let height_ratio = (self.height - (y + self.height / 2.0)) / self.height;
        let radius = height_ratio * self.base_radius * self.radius_scale + (angle * 5.0).sin() * self.ripple;

        Vec3::new(angle.cos() * radius, y, angle.sin() * radius)
    }
}

/// Sparkles pooled on the ground beneath the tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundDisk {
    /// Height of the disk plane.
    pub y: f32,
    /// Disk radius.
    pub radius: f32,
    /// Exponent on the radial draw (> 0.5 concentrates near the center).
    pub falloff: f32,
}

impl GroundDisk {
    /// Disk just above the base of a tree of the given size.
    pub fn under_tree(height: f32, base_radius: f32) -> Self {
        Self {
            y: -height / 2.0 + 0.08,
            radius: base_radius * 1.8,
            falloff: 1.5,
        }
    }
}

impl Placement for GroundDisk {
    fn place<R: Rng>(&self, ctx: &mut SpawnContext<'_, R>) -> Vec3 {
        ctx.random_in_disk_weighted(self.radius, self.falloff) + Vec3::new(0.0, self.y, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spawn::scene_rng;

    #[test]
    fn test_tier_shape_range() {
        let cone = TreeCone::new(9.0, 4.5);
        for i in 0..=1000 {
            let s = cone.tier_shape(i as f32 / 1000.0);
            assert!((0.8 - 1e-6..=1.0 + 1e-6).contains(&s));
        }
        assert!((cone.tier_shape(0.0) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_tree_cone_within_envelope() {
        let cone = TreeCone::new(9.0, 4.5);
        let mut rng = scene_rng(Some(11));
        for i in 0..2000 {
            let p = cone.place(&mut SpawnContext::new(i, 2000, &mut rng));
            assert!(p.y.abs() <= 4.5 + 1e-4);
            let horizontal = (p.x * p.x + p.z * p.z).sqrt();
            assert!(horizontal <= cone.max_radius_at(p.y) + 1e-3);
        }
    }

    #[test]
    fn test_tree_cone_bottom_heavy() {
        let cone = TreeCone::new(9.0, 4.5);
        let mut rng = scene_rng(Some(12));
        let below = (0..4000)
            .filter(|&i| cone.place(&mut SpawnContext::new(i, 4000, &mut rng)).y < 0.0)
            .count();
        // P(t < 0.5) = 0.75
        assert!(below > 2800 && below < 3200, "below = {}", below);
    }

    #[test]
    fn test_push_keeps_height() {
        let mut rng = scene_rng(Some(13));
        let mut ctx = SpawnContext::new(0, 1, &mut rng);
        let p = Vec3::new(1.0, 2.0, -1.0);
        for _ in 0..100 {
            let q = OutwardPush::ORNAMENT.apply(p, &mut ctx);
            assert_eq!(q.y, 2.0);
            assert!(q.x >= 1.0 && q.x < 1.15 + 1e-6);
            assert!((q.x + q.z).abs() < 1e-6);
        }
    }

    #[test]
    fn test_ribbon_spiral_endpoints() {
        let ribbon = RibbonSpiral::new(9.0, 4.5);
        let mut rng = scene_rng(Some(14));
        let first = ribbon.place(&mut SpawnContext::new(0, 1500, &mut rng));
        assert!((first.y + 4.5).abs() < 1e-5);
        assert!((first.x - 4.5 * 1.15).abs() < 1e-4);

        let last = ribbon.place(&mut SpawnContext::new(1499, 1500, &mut rng));
        assert!(last.y < 4.5 && last.y > 4.4);
    }

    #[test]
    fn test_ground_disk_flat() {
        let disk = GroundDisk::under_tree(9.0, 4.5);
        let mut rng = scene_rng(Some(15));
        for i in 0..500 {
            let p = disk.place(&mut SpawnContext::new(i, 500, &mut rng));
            assert!((p.y - (-4.42)).abs() < 1e-5);
            assert!(Vec3::new(p.x, 0.0, p.z).length() <= 4.5 * 1.8 + 1e-4);
        }
    }
}
