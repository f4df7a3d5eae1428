//! Headless driver: runs the stock scene for a number of frames and logs how
//! each layer converges.
//!
//! Usage: `tree-morph [frames] [seed]`. Set `RUST_LOG=debug` for more detail.

use tree_morph::prelude::*;

const FRAME_DT: f32 = 1.0 / 60.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let frames: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(600);
    let seed: Option<u64> = args.next().and_then(|s| s.parse().ok());

    let config = TreeConfig::default();
    let scene = match seed {
        Some(seed) => Scene::with_seed(config, seed),
        None => Scene::new(config),
    };
    let mut scene = match scene {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    drive(&mut scene, frames);
}

/// Step `scene` for `frames` fixed-delta frames, gathering at the start and
/// scattering again from the midpoint on. Returns the frames on which a toggle
/// was accepted.
///
/// A midpoint that falls inside the lockout is deferred until the gate opens.
fn drive(scene: &mut Scene, frames: u64) -> Vec<u64> {
    let mut time = Time::new();
    time.set_fixed_delta(Some(FRAME_DT));

    let midpoint = frames / 2;
    let mut toggled = Vec::new();
    let mut pending = false;
    for frame in 0..frames {
        if frame == 0 || frame == midpoint {
            pending = true;
        }
        if pending {
            if scene.toggle() {
                toggled.push(frame);
                pending = false;
            } else if frame == midpoint {
                log::info!(
                    "midpoint toggle deferred, {:.2}s of lockout left",
                    scene.lockout_remaining()
                );
            }
        }

        scene.update(time.tick());

        if time.frame() % 60 == 0 {
            let f = scene.frame();
            log::info!(
                "t={:>5.2}s {:<9} foliage {:.3} ornaments {:.3} ribbon {:.3} ground {:.3} star y {:.2}",
                f.elapsed,
                f.state.to_string(),
                f.foliage.progress,
                f.ornament_progress,
                f.ribbon.progress,
                f.ground.progress,
                f.star.position.y
            );
        }
    }
    toggled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_scene() -> Scene {
        let config = TreeConfig::default()
            .with_foliage_count(100)
            .with_ornament_count(10)
            .with_ribbon_count(10)
            .with_ground_count(10);
        Scene::with_seed(config, 1).unwrap()
    }

    #[test]
    fn test_short_run_defers_midpoint_toggle() {
        let mut scene = small_scene();
        let toggled = drive(&mut scene, 200);

        assert_eq!(toggled.len(), 2);
        assert_eq!(toggled[0], 0);
        // 2 s lockout at 60 fps
        assert!((119..=122).contains(&toggled[1]), "{:?}", toggled);
        assert_eq!(scene.state(), MorphState::Scattered);
    }

    #[test]
    fn test_long_run_toggles_on_midpoint() {
        let mut scene = small_scene();
        assert_eq!(drive(&mut scene, 600), vec![0, 300]);
        assert_eq!(scene.state(), MorphState::Scattered);
    }
}
