//! Ornaments and the top star.
//!
//! Ornaments are instanced meshes rather than points, so their per-frame
//! pose is computed on the CPU: blended position plus a gentle drift, a
//! breathing scale and a slow tumble. The renderer draws one instanced batch
//! per [`OrnamentKind`].

use crate::config::TopStarConfig;
use crate::shape::Placement;
use crate::smoothing::{Progress, Smoothing};
use crate::spawn::SpawnContext;
use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::Rng;
use std::fmt;

/// Ornament mesh type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrnamentKind {
    /// Metallic bauble.
    Ball,
    /// Gift box.
    Box,
    /// Small glowing star.
    Star,
    /// Tiny point light.
    Light,
}

impl OrnamentKind {
    /// Every kind, in batch order.
    pub const ALL: [OrnamentKind; 4] = [
        OrnamentKind::Ball,
        OrnamentKind::Box,
        OrnamentKind::Star,
        OrnamentKind::Light,
    ];

    /// Slots for the weighted draw. Stars are half as likely as the rest.
    pub const DRAW_TABLE: [OrnamentKind; 7] = [
        OrnamentKind::Ball,
        OrnamentKind::Ball,
        OrnamentKind::Box,
        OrnamentKind::Box,
        OrnamentKind::Star,
        OrnamentKind::Light,
        OrnamentKind::Light,
    ];

    /// Draw a kind from [`DRAW_TABLE`](Self::DRAW_TABLE).
    pub fn draw<R: Rng>(ctx: &mut SpawnContext<'_, R>) -> Self {
        Self::DRAW_TABLE[ctx.random_index(Self::DRAW_TABLE.len())]
    }

    /// Position of this kind in [`ALL`](Self::ALL).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            OrnamentKind::Ball => 0,
            OrnamentKind::Box => 1,
            OrnamentKind::Star => 2,
            OrnamentKind::Light => 3,
        }
    }

    /// Range the base scale is drawn from. Boxes run larger.
    pub fn scale_range(self) -> (f32, f32) {
        match self {
            OrnamentKind::Box => (0.5, 1.0),
            _ => (0.3, 0.7),
        }
    }

    /// Lowercase name, used in logs.
    pub fn name(self) -> &'static str {
        match self {
            OrnamentKind::Ball => "ball",
            OrnamentKind::Box => "box",
            OrnamentKind::Star => "star",
            OrnamentKind::Light => "light",
        }
    }
}

impl fmt::Display for OrnamentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Range the drift weight is drawn from.
pub const WEIGHT_RANGE: (f32, f32) = (1.5, 4.0);

/// One ornament, fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ornament {
    /// Position while scattered.
    pub scatter: Vec3,
    /// Position on the tree.
    pub tree: Vec3,
    /// Which mesh the ornament is drawn with.
    pub kind: OrnamentKind,
    /// Base scale before breathing.
    pub scale: f32,
    /// Drift amplitude factor while scattered.
    pub weight: f32,
}

impl Ornament {
    /// Create one ornament: kind, then tree position, scatter position,
    /// scale and weight, in that draw order.
    pub fn spawn<S, T, R>(scatter: &S, tree: &T, ctx: &mut SpawnContext<'_, R>) -> Self
    where
        S: Placement,
        T: Placement,
        R: Rng,
    {
        let kind = OrnamentKind::draw(ctx);
        let tree = tree.place(ctx);
        let scatter = scatter.place(ctx);
        let (lo, hi) = kind.scale_range();
        let scale = ctx.random_range(lo, hi);
        let weight = ctx.random_range(WEIGHT_RANGE.0, WEIGHT_RANGE.1);

        Self {
            scatter,
            tree,
            kind,
            scale,
            weight,
        }
    }

    /// Pose of ornament number `index` at the given progress and time.
    pub fn pose(&self, index: usize, progress: f32, time: f32) -> OrnamentInstance {
        let phase = index as f32;
        let mut position = self.scatter.lerp(self.tree, progress);

        // wide drift while scattered, slight sway once on the tree
        let drift = (1.0 - progress) * self.weight * 0.4 + progress * 0.05;
        position.y += (time * 0.6 + phase).sin() * drift;
        position.x += (time * 0.4 + phase).cos() * drift;

        OrnamentInstance {
            kind: self.kind,
            position,
            scale: self.scale * (0.8 + 0.2 * (time * 1.5 + phase).sin()),
            rotation: Vec3::new(time * 0.2 + phase, time * 0.3 + phase, time * 0.1),
        }
    }
}

/// Per-frame pose of one ornament.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrnamentInstance {
    /// Which mesh to draw.
    pub kind: OrnamentKind,
    /// World position.
    pub position: Vec3,
    /// Uniform scale.
    pub scale: f32,
    /// Euler angles in radians, applied in XYZ order.
    pub rotation: Vec3,
}

impl OrnamentInstance {
    /// Rotation as a quaternion.
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Model matrix (scale, then rotate, then translate).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.rotation_quat(), self.position)
    }

    /// Pack into the per-instance vertex layout.
    pub fn to_gpu(&self) -> InstanceGpu {
        InstanceGpu {
            model: self.matrix().to_cols_array_2d(),
        }
    }
}

/// GPU layout of one instance: a column-major model matrix.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceGpu {
    /// Model matrix columns.
    pub model: [[f32; 4]; 4],
}

/// Instance data grouped by kind, one batch per instanced mesh.
#[derive(Clone, Debug, Default)]
pub struct OrnamentBatches {
    batches: [Vec<InstanceGpu>; 4],
}

impl OrnamentBatches {
    /// Instances of one kind.
    pub fn get(&self, kind: OrnamentKind) -> &[InstanceGpu] {
        &self.batches[kind.index()]
    }

    /// Raw bytes of one batch, ready for a vertex buffer.
    pub fn bytes(&self, kind: OrnamentKind) -> &[u8] {
        bytemuck::cast_slice(self.get(kind))
    }

    fn clear(&mut self) {
        for batch in &mut self.batches {
            batch.clear();
        }
    }
}

/// The star on the apex.
///
/// Flies from a point high above the scene down to the tree top, growing
/// from almost nothing to full size. It spins regardless of progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TopStar {
    scatter: Vec3,
    apex: Vec3,
    scale: f32,
    min_scale: f32,
    spin: f32,
}

impl TopStar {
    /// Star for a tree of the given height.
    pub fn new(height: f32, config: &TopStarConfig) -> Self {
        Self {
            scatter: config.scatter_position,
            apex: Vec3::new(0.0, height / 2.0 + config.apex_offset, 0.0),
            scale: config.scale,
            min_scale: config.min_scale,
            spin: config.spin,
        }
    }

    /// Position when fully gathered.
    pub fn apex(&self) -> Vec3 {
        self.apex
    }

    /// Pose at the given progress and scene time.
    pub fn pose(&self, progress: f32, time: f32) -> StarPose {
        StarPose {
            position: self.scatter.lerp(self.apex, progress),
            scale: self.scale * progress + self.min_scale,
            rotation_y: time * self.spin,
        }
    }
}

/// Per-frame pose of the top star.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarPose {
    /// World position.
    pub position: Vec3,
    /// Uniform scale, never below the configured floor.
    pub scale: f32,
    /// Rotation about Y in radians.
    pub rotation_y: f32,
}

impl StarPose {
    /// Model matrix (scale, then spin, then translate).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_rotation_y(self.rotation_y),
            self.position,
        )
    }
}

/// All ornaments plus the top star, sharing one progress value.
#[derive(Clone, Debug)]
pub struct Ornaments {
    items: Vec<Ornament>,
    counts: [usize; 4],
    progress: Progress,
    star: TopStar,
}

impl Ornaments {
    /// Generate `count` ornaments.
    ///
    /// `tree` should already include the outward push, e.g.
    /// `TreeCone::new(h, r).pushed(OutwardPush::ORNAMENT)`.
    pub fn generate<S, T, R>(
        count: usize,
        scatter: &S,
        tree: &T,
        rate: f32,
        star: TopStar,
        rng: &mut R,
    ) -> Self
    where
        S: Placement,
        T: Placement,
        R: Rng,
    {
        let items: Vec<Ornament> = (0..count)
            .map(|i| Ornament::spawn(scatter, tree, &mut SpawnContext::new(i, count, rng)))
            .collect();

        let mut counts = [0usize; 4];
        for item in &items {
            counts[item.kind.index()] += 1;
        }

        log::debug!(
            "generated {} ornaments (ball {}, box {}, star {}, light {})",
            count,
            counts[0],
            counts[1],
            counts[2],
            counts[3]
        );

        Self {
            items,
            counts,
            progress: Progress::new(rate),
            star,
        }
    }

    /// Set the smoothing formula.
    pub fn with_smoothing(mut self, smoothing: Smoothing) -> Self {
        self.progress = self.progress.with_smoothing(smoothing);
        self
    }

    /// Ornaments in creation order.
    #[inline]
    pub fn items(&self) -> &[Ornament] {
        &self.items
    }

    /// Number of ornaments, star excluded.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when there are no ornaments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of ornaments of `kind`, i.e. the instanced batch size.
    #[inline]
    pub fn count(&self, kind: OrnamentKind) -> usize {
        self.counts[kind.index()]
    }

    /// Current blend weight, shared with the star.
    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress.value()
    }

    /// The star on top of the tree.
    #[inline]
    pub fn top_star(&self) -> &TopStar {
        &self.star
    }

    /// Advance the blend weight one frame toward `target`.
    pub fn update(&mut self, target: f32, dt: f32) -> f32 {
        self.progress.step(target, dt)
    }

    /// Write every ornament's pose at `time` into `out`, in creation order.
    pub fn instances_into(&self, time: f32, out: &mut Vec<OrnamentInstance>) {
        let p = self.progress();
        out.clear();
        out.extend(self.items.iter().enumerate().map(|(i, o)| o.pose(i, p, time)));
    }

    /// Fill `batches` with GPU instances grouped by kind.
    pub fn batches_into(&self, time: f32, batches: &mut OrnamentBatches) {
        let p = self.progress();
        batches.clear();
        for (i, o) in self.items.iter().enumerate() {
            batches.batches[o.kind.index()].push(o.pose(i, p, time).to_gpu());
        }
    }

    /// Top star pose at `time`.
    pub fn star_pose(&self, time: f32) -> StarPose {
        self.star.pose(self.progress(), time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{OutwardPush, ScatterShell, TreeCone};
    use crate::spawn::scene_rng;

    fn ornaments(count: usize) -> Ornaments {
        let mut rng = scene_rng(Some(31));
        Ornaments::generate(
            count,
            &ScatterShell::new(12.0, 22.0),
            &TreeCone::new(9.0, 4.5).pushed(OutwardPush::ORNAMENT),
            1.5,
            TopStar::new(9.0, &TopStarConfig::default()),
            &mut rng,
        )
    }

    #[test]
    fn test_weighted_draw_frequencies() {
        let mut rng = scene_rng(Some(32));
        let mut counts = [0usize; 4];
        let n = 70_000;
        for i in 0..n {
            let kind = OrnamentKind::draw(&mut SpawnContext::new(i, n, &mut rng));
            counts[kind.index()] += 1;
        }
        let expected = [2.0 / 7.0, 2.0 / 7.0, 1.0 / 7.0, 2.0 / 7.0];
        for (count, want) in counts.iter().zip(expected) {
            let got = *count as f32 / n as f32;
            assert!((got - want).abs() < 0.02, "got {} want {}", got, want);
        }
    }

    #[test]
    fn test_attribute_ranges() {
        let set = ornaments(500);
        for o in set.items() {
            let (lo, hi) = o.kind.scale_range();
            assert!(o.scale >= lo && o.scale < hi);
            assert!(o.weight >= 1.5 && o.weight < 4.0);
            assert!(o.tree.y.abs() <= 4.5 + 1e-4);
            let horizontal = (o.tree.x * o.tree.x + o.tree.z * o.tree.z).sqrt();
            assert!(horizontal <= 4.5 * 1.15 + 1e-3);
        }
        let total: usize = OrnamentKind::ALL.iter().map(|k| set.count(*k)).sum();
        assert_eq!(total, 500);
    }

    #[test]
    fn test_pose_at_rest_on_tree() {
        let o = Ornament {
            scatter: Vec3::new(10.0, 0.0, 0.0),
            tree: Vec3::new(1.0, 2.0, 3.0),
            kind: OrnamentKind::Ball,
            scale: 0.5,
            weight: 2.0,
        };
        let pose = o.pose(0, 1.0, 0.0);
        // drift 0.05: y += sin(0) * d, x += cos(0) * d
        assert!((pose.position - Vec3::new(1.05, 2.0, 3.0)).length() < 1e-5);
        assert!((pose.scale - 0.4).abs() < 1e-6);
        assert_eq!(pose.rotation, Vec3::ZERO);
    }

    #[test]
    fn test_batches_match_counts() {
        let set = ornaments(120);
        let mut batches = OrnamentBatches::default();
        set.batches_into(1.0, &mut batches);
        for kind in OrnamentKind::ALL {
            assert_eq!(batches.get(kind).len(), set.count(kind));
            assert_eq!(batches.bytes(kind).len(), set.count(kind) * 64);
        }
    }

    #[test]
    fn test_star_pose() {
        let star = TopStar::new(9.0, &TopStarConfig::default());
        let scattered = star.pose(0.0, 0.0);
        assert_eq!(scattered.position, Vec3::new(0.0, 15.0, 0.0));
        assert!((scattered.scale - 0.001).abs() < 1e-7);

        let gathered = star.pose(1.0, 2.0);
        assert!((gathered.position - Vec3::new(0.0, 5.1, 0.0)).length() < 1e-5);
        assert!((gathered.scale - 1.501).abs() < 1e-6);
        assert!((gathered.rotation_y - 1.6).abs() < 1e-6);
    }

    #[test]
    fn test_empty_ornaments() {
        let mut set = ornaments(0);
        set.update(1.0, 1.0 / 60.0);
        let mut out = Vec::new();
        set.instances_into(0.5, &mut out);
        assert!(out.is_empty());
        assert!(set.is_empty());
    }
}
