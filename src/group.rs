//! Point groups: paired position buffers and a smoothed blend weight.

use crate::motion::Drift;
use crate::shape::Placement;
use crate::smoothing::{Progress, Smoothing};
use crate::spawn::SpawnContext;
use glam::Vec3;
use rand::Rng;
use std::fmt;

/// The visual layers of the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GroupKind {
    /// Fine needle points filling the cone.
    Foliage,
    /// Instanced decorations.
    Ornaments,
    /// Spiral ribbon.
    Ribbon,
    /// Sparkles on the ground.
    Ground,
}

impl GroupKind {
    /// Lowercase name for logs and labels.
    pub fn name(self) -> &'static str {
        match self {
            GroupKind::Foliage => "foliage",
            GroupKind::Ornaments => "ornaments",
            GroupKind::Ribbon => "ribbon",
            GroupKind::Ground => "ground",
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A group of points that blends between two fixed buffers.
///
/// Both buffers are generated once in [`PointGroup::generate`] and never
/// change; index `i` of the scatter buffer pairs with index `i` of the tree
/// buffer. Only the progress moves from frame to frame.
#[derive(Clone, Debug)]
pub struct PointGroup {
    kind: GroupKind,
    scatter: Vec<Vec3>,
    tree: Vec<Vec3>,
    progress: Progress,
    drift: Drift,
}

impl PointGroup {
    /// Generate `count` point pairs.
    ///
    /// For each index the scatter position is drawn first, then the tree
    /// position, from the same random source.
    pub fn generate<S, T, R>(
        kind: GroupKind,
        count: usize,
        scatter: &S,
        tree: &T,
        rate: f32,
        rng: &mut R,
    ) -> Self
    where
        S: Placement,
        T: Placement,
        R: Rng,
    {
        let mut scatter_positions = Vec::with_capacity(count);
        let mut tree_positions = Vec::with_capacity(count);

        for i in 0..count {
            let mut ctx = SpawnContext::new(i, count, rng);
            scatter_positions.push(scatter.place(&mut ctx));
            tree_positions.push(tree.place(&mut ctx));
        }

        log::debug!("generated {} {} points", count, kind);

        Self {
            kind,
            scatter: scatter_positions,
            tree: tree_positions,
            progress: Progress::new(rate),
            drift: Drift::Still,
        }
    }

    /// Set the idle motion used by [`animate_into`](Self::animate_into).
    pub fn with_drift(mut self, drift: Drift) -> Self {
        self.drift = drift;
        self
    }

    /// Set the smoothing formula.
    pub fn with_smoothing(mut self, smoothing: Smoothing) -> Self {
        self.progress = self.progress.with_smoothing(smoothing);
        self
    }

    /// Which layer this group draws.
    #[inline]
    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.scatter.len()
    }

    /// True for a zero-count group.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.scatter.is_empty()
    }

    /// Positions in the scattered configuration.
    #[inline]
    pub fn scatter_positions(&self) -> &[Vec3] {
        &self.scatter
    }

    /// Positions in the tree configuration.
    #[inline]
    pub fn tree_positions(&self) -> &[Vec3] {
        &self.tree
    }

    /// Scatter buffer as tightly packed `xyz` floats, ready for upload.
    pub fn scatter_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.scatter)
    }

    /// Tree buffer as tightly packed `xyz` floats, ready for upload.
    pub fn tree_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.tree)
    }

    /// Current blend weight.
    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress.value()
    }

    /// Idle motion applied by [`animate_into`](Self::animate_into).
    #[inline]
    pub fn drift(&self) -> Drift {
        self.drift
    }

    /// Advance the blend weight one frame toward `target`.
    pub fn update(&mut self, target: f32, dt: f32) -> f32 {
        self.progress.step(target, dt)
    }

    /// Blended position of point `index`, without idle motion.
    pub fn position(&self, index: usize) -> Option<Vec3> {
        let p = self.progress();
        Some(self.scatter.get(index)?.lerp(*self.tree.get(index)?, p))
    }

    /// Write every blended position into `out`, replacing its contents.
    pub fn blend_into(&self, out: &mut Vec<Vec3>) {
        let p = self.progress();
        out.clear();
        out.extend(self.scatter.iter().zip(&self.tree).map(|(s, t)| s.lerp(*t, p)));
    }

    /// Like [`blend_into`](Self::blend_into), with the group's drift applied
    /// at scene time `time`.
    pub fn animate_into(&self, time: f32, out: &mut Vec<Vec3>) {
        let p = self.progress();
        out.clear();
        out.extend(
            self.scatter
                .iter()
                .zip(&self.tree)
                .enumerate()
                .map(|(i, (s, t))| self.drift.displace(i, s.lerp(*t, p), p, time)),
        );
    }

    /// Everything a renderer needs for this group this frame.
    pub fn frame(&self, elapsed: f32) -> GroupFrame<'_> {
        GroupFrame {
            kind: self.kind,
            scatter: &self.scatter,
            tree: &self.tree,
            progress: self.progress(),
            elapsed,
        }
    }
}

/// Borrowed per-frame view of a [`PointGroup`].
#[derive(Clone, Copy, Debug)]
pub struct GroupFrame<'a> {
    /// Which layer this is.
    pub kind: GroupKind,
    /// Scattered positions, unchanged for the scene's lifetime.
    pub scatter: &'a [Vec3],
    /// Tree positions, unchanged for the scene's lifetime.
    pub tree: &'a [Vec3],
    /// Blend weight in `[0, 1]`.
    pub progress: f32,
    /// Scene time in seconds.
    pub elapsed: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{ScatterShell, TreeCone};
    use crate::spawn::scene_rng;

    fn foliage(count: usize) -> PointGroup {
        let mut rng = scene_rng(Some(21));
        PointGroup::generate(
            GroupKind::Foliage,
            count,
            &ScatterShell::new(12.0, 22.0),
            &TreeCone::new(9.0, 4.5),
            1.5,
            &mut rng,
        )
    }

    #[test]
    fn test_buffers_match_count() {
        for count in [0, 1, 17, 1000] {
            let group = foliage(count);
            assert_eq!(group.len(), count);
            assert_eq!(group.scatter_positions().len(), count);
            assert_eq!(group.tree_positions().len(), count);
            assert_eq!(group.scatter_floats().len(), count * 3);
        }
    }

    #[test]
    fn test_blend_endpoints() {
        let mut group = foliage(100);
        let mut out = Vec::new();

        group.blend_into(&mut out);
        assert_eq!(out, group.scatter_positions());

        for _ in 0..2000 {
            group.update(1.0, 1.0 / 60.0);
        }
        group.blend_into(&mut out);
        for (b, t) in out.iter().zip(group.tree_positions()) {
            assert!((*b - *t).length() < 1e-3);
        }
    }

    #[test]
    fn test_empty_group_updates() {
        let mut group = foliage(0);
        group.update(1.0, 0.5);
        let mut out = vec![Vec3::ONE];
        group.animate_into(1.0, &mut out);
        assert!(out.is_empty());
        assert_eq!(group.position(0), None);
    }

    #[test]
    fn test_floats_are_xyz() {
        let group = foliage(3);
        let floats = group.tree_floats();
        let second = group.tree_positions()[1];
        assert_eq!(&floats[3..6], &[second.x, second.y, second.z]);
    }

    #[test]
    fn test_frame_view() {
        let mut group = foliage(10);
        group.update(1.0, 0.1);
        let frame = group.frame(3.0);
        assert_eq!(frame.kind, GroupKind::Foliage);
        assert_eq!(frame.scatter.len(), frame.tree.len());
        assert!((frame.progress - 0.15).abs() < 1e-6);
        assert_eq!(frame.elapsed, 3.0);
    }
}
