//! The scene: every particle group, the morph state and the frame driver.

use crate::config::TreeConfig;
use crate::error::ConfigError;
use crate::group::{GroupFrame, GroupKind, PointGroup};
use crate::motion::Drift;
use crate::ornament::{OrnamentInstance, Ornaments, StarPose, TopStar};
use crate::shape::{GroundDisk, OutwardPush, Placement, RibbonSpiral, TreeCone};
use crate::spawn::scene_rng;
use crate::state::{MorphState, ToggleGate};
use rand::Rng;

/// A complete morphing tree.
///
/// All buffers are generated once in the constructor. After that the scene
/// only changes through [`toggle`](Scene::toggle) and
/// [`update`](Scene::update), which the host calls once per displayed frame.
///
/// ```
/// use tree_morph::{MorphState, Scene, TreeConfig};
///
/// let config = TreeConfig::default().with_foliage_count(1_000);
/// let mut scene = Scene::with_seed(config, 42).unwrap();
///
/// assert!(scene.toggle());
/// assert_eq!(scene.state(), MorphState::TreeShape);
/// for _ in 0..300 {
///     scene.update(1.0 / 60.0);
/// }
/// assert!(scene.foliage().progress() > 0.99);
/// ```
#[derive(Clone, Debug)]
pub struct Scene {
    config: TreeConfig,
    state: MorphState,
    gate: ToggleGate,
    elapsed: f32,
    frame: u64,
    foliage: PointGroup,
    ornaments: Ornaments,
    ribbon: PointGroup,
    ground: PointGroup,
}

impl Scene {
    /// Build a scene seeded from OS entropy.
    pub fn new(config: TreeConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, &mut scene_rng(None))
    }

    /// Build a reproducible scene from `seed`.
    pub fn with_seed(config: TreeConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, &mut scene_rng(Some(seed)))
    }

    /// Build a scene drawing from `rng`.
    ///
    /// The configuration is validated before anything is generated.
    pub fn with_rng<R: Rng>(config: TreeConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;

        let cone = TreeCone::new(config.height, config.base_radius);
        let smoothing = config.smoothing;

        let foliage = PointGroup::generate(
            GroupKind::Foliage,
            config.foliage.count,
            &config.foliage.shell,
            &cone,
            config.foliage.rate,
            rng,
        )
        .with_drift(Drift::FOLIAGE)
        .with_smoothing(smoothing);

        let ornaments = Ornaments::generate(
            config.ornaments.count,
            &config.ornaments.shell,
            &cone.pushed(OutwardPush::ORNAMENT),
            config.ornaments.rate,
            TopStar::new(config.height, &config.top_star),
            rng,
        )
        .with_smoothing(smoothing);

        let ribbon = PointGroup::generate(
            GroupKind::Ribbon,
            config.ribbon.count,
            &config.ribbon.shell,
            &RibbonSpiral::new(config.height, config.base_radius),
            config.ribbon.rate,
            rng,
        )
        .with_drift(Drift::RIBBON)
        .with_smoothing(smoothing);

        let ground = PointGroup::generate(
            GroupKind::Ground,
            config.ground.count,
            &config.ground.shell,
            &GroundDisk::under_tree(config.height, config.base_radius),
            config.ground.rate,
            rng,
        )
        .with_drift(Drift::GROUND)
        .with_smoothing(smoothing);

        log::info!(
            "scene ready: {} foliage, {} ornaments, {} ribbon, {} ground",
            foliage.len(),
            ornaments.len(),
            ribbon.len(),
            ground.len()
        );

        Ok(Self {
            config,
            state: MorphState::default(),
            gate: ToggleGate::new(config.toggle_lockout),
            elapsed: 0.0,
            frame: 0,
            foliage,
            ornaments,
            ribbon,
            ground,
        })
    }

    /// Configuration the scene was built from.
    #[inline]
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// State every group is currently blending toward.
    #[inline]
    pub fn state(&self) -> MorphState {
        self.state
    }

    /// Scene time in seconds.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Frames processed so far.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Foliage points.
    #[inline]
    pub fn foliage(&self) -> &PointGroup {
        &self.foliage
    }

    /// Ornaments and the top star.
    #[inline]
    pub fn ornaments(&self) -> &Ornaments {
        &self.ornaments
    }

    /// Ribbon points.
    #[inline]
    pub fn ribbon(&self) -> &PointGroup {
        &self.ribbon
    }

    /// Ground sparkles.
    #[inline]
    pub fn ground(&self) -> &PointGroup {
        &self.ground
    }

    /// The point groups in draw order.
    pub fn point_groups(&self) -> [&PointGroup; 3] {
        [&self.foliage, &self.ribbon, &self.ground]
    }

    /// Whether [`toggle`](Self::toggle) would currently be accepted.
    ///
    /// Hosts use this to disable their toggle control.
    #[inline]
    pub fn can_toggle(&self) -> bool {
        self.gate.is_open()
    }

    /// Seconds left in the current lockout.
    #[inline]
    pub fn lockout_remaining(&self) -> f32 {
        self.gate.remaining()
    }

    /// Flip between scattered and tree.
    ///
    /// Ignored while the lockout from the previous toggle is running.
    /// Returns whether the state changed. Progress is left alone; only its
    /// target moves.
    pub fn toggle(&mut self) -> bool {
        if !self.gate.try_pass() {
            log::debug!(
                "toggle ignored, {:.2}s of lockout left",
                self.gate.remaining()
            );
            return false;
        }
        self.state = self.state.toggled();
        log::info!("morphing toward {}", self.state);
        true
    }

    /// Advance one frame by `dt` seconds.
    ///
    /// Negative or non-finite `dt` is treated as zero.
    pub fn update(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let target = self.state.target();

        self.gate.tick(dt);
        self.elapsed += dt;
        self.frame += 1;

        self.foliage.update(target, dt);
        self.ornaments.update(target, dt);
        self.ribbon.update(target, dt);
        self.ground.update(target, dt);
    }

    /// Consume the scene and return it advanced by `dt`.
    pub fn advanced(mut self, dt: f32) -> Self {
        self.update(dt);
        self
    }

    /// Snapshot for the renderer.
    pub fn frame(&self) -> SceneFrame<'_> {
        let mut ornaments = Vec::with_capacity(self.ornaments.len());
        self.ornaments.instances_into(self.elapsed, &mut ornaments);

        SceneFrame {
            state: self.state,
            elapsed: self.elapsed,
            foliage: self.foliage.frame(self.elapsed),
            ribbon: self.ribbon.frame(self.elapsed),
            ground: self.ground.frame(self.elapsed),
            ornament_progress: self.ornaments.progress(),
            ornaments,
            star: self.ornaments.star_pose(self.elapsed),
        }
    }
}

/// Everything a renderer consumes for one frame.
#[derive(Clone, Debug)]
pub struct SceneFrame<'a> {
    /// Target state of the morph.
    pub state: MorphState,
    /// Scene time in seconds.
    pub elapsed: f32,
    /// Foliage layer.
    pub foliage: GroupFrame<'a>,
    /// Ribbon layer.
    pub ribbon: GroupFrame<'a>,
    /// Ground layer.
    pub ground: GroupFrame<'a>,
    /// Blend weight shared by the ornaments and the star.
    pub ornament_progress: f32,
    /// Ornament poses in creation order.
    pub ornaments: Vec<OrnamentInstance>,
    /// Top star pose.
    pub star: StarPose,
}
