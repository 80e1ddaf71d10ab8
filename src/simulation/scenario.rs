//! Build a fully-initialized scene from configuration
//!
//! Takes a `SceneConfig` (YAML-facing) and produces the runtime bundle
//! (`Scene`) containing the field engine, constructed but not yet started —
//! the viewer starts it once the window surface exists and its real size is
//! known.
//!
//! The scene is inserted into Bevy as a `Resource` and consumed by the
//! stepping and rendering systems.

use bevy::prelude::Resource;

use crate::configuration::config::{FieldChoice, SceneConfig};
use crate::simulation::engine::FieldEngine;
use crate::simulation::params::{FieldKind, IconParams, ParticleParams, TrailParams};

/// Bevy resource representing a fully-initialized animated scene
///
/// This is the main "runtime bundle" constructed from a [`SceneConfig`]: it
/// carries the field engine (entities, region, RNG, running flag) plus the
/// pixel-ratio cap the viewer applies to the display scale factor before
/// starting the engine.
#[derive(Resource)]
pub struct Scene {
    pub engine: FieldEngine,
    pub pixel_ratio_cap: f64,
}

impl Scene {
    pub fn build_scene(cfg: SceneConfig) -> Self {
        // Field parameters: map the config section for the selected field,
        // falling back to defaults when the section is absent
        let kind = match cfg.engine.field {
            FieldChoice::Particles => {
                let p = match cfg.particles {
                    Some(pc) => ParticleParams {
                        max_count: pc.max_count,
                        density_divisor: pc.density_divisor,
                        speed: pc.speed,
                        radius_min: pc.radius_min,
                        radius_span: pc.radius_span,
                        alpha_min: pc.alpha_min,
                        alpha_span: pc.alpha_span,
                        link_distance: pc.link_distance,
                        link_alpha: pc.link_alpha,
                    },
                    None => ParticleParams::default(),
                };
                FieldKind::Particles(p)
            }
            FieldChoice::Icons => {
                let p = match cfg.icons {
                    Some(ic) => IconParams {
                        count_narrow: ic.count_narrow,
                        count_wide: ic.count_wide,
                        narrow_width: ic.narrow_width,
                        drift_min: ic.drift_min,
                        drift_span: ic.drift_span,
                        lift_span: ic.lift_span,
                        scale_min: ic.scale_min,
                        scale_span: ic.scale_span,
                        spin_max: ic.spin_max,
                        alpha_base: ic.alpha_base,
                        alpha_per_scale: ic.alpha_per_scale,
                        exit_margin: ic.exit_margin,
                        entry_margin: ic.entry_margin,
                        debounce_secs: ic.debounce_secs,
                    },
                    None => IconParams::default(),
                };
                FieldKind::Icons(p)
            }
            FieldChoice::Trail => {
                let p = match cfg.trail {
                    Some(tc) => TrailParams {
                        pool: tc.pool,
                        drift: tc.drift,
                        decay: tc.decay,
                        radius: tc.radius,
                    },
                    None => TrailParams::default(),
                };
                FieldKind::Trail(p)
            }
        };

        Self {
            engine: FieldEngine::new(kind, cfg.engine.seed),
            pixel_ratio_cap: cfg.engine.pixel_ratio_cap.unwrap_or(2.0),
        }
    }
}
