//! Batch construction of entity sets
//!
//! Seeding fully replaces a field's entities: counts derive from the viewport
//! width, positions are uniform over the region, and every visual attribute
//! is drawn from the fixed ranges in the field's parameters. No entity
//! survives a reseed.

use rand::Rng;

use crate::simulation::params::{IconParams, ParticleParams, TrailParams};
use crate::simulation::states::{Entity, NVec2, Region};

/// Particle count for a viewport: one per `density_divisor` logical pixels of
/// width, capped at `max_count`.
pub fn particle_count(logical_width: f64, p: &ParticleParams) -> usize {
    if logical_width <= 0.0 {
        return 0;
    }
    ((logical_width / p.density_divisor).floor() as usize).min(p.max_count)
}

/// Icon count for a viewport: the narrow count below `narrow_width`, the wide
/// count otherwise.
pub fn icon_count(logical_width: f64, p: &IconParams) -> usize {
    if logical_width <= 0.0 {
        return 0;
    }
    if logical_width < p.narrow_width {
        p.count_narrow
    } else {
        p.count_wide
    }
}

/// Seed the particle background. `region` is in device pixels; the count is
/// derived from the logical width, so radii, speeds, and positions all scale
/// with `pixel_ratio` while the count does not.
pub fn seed_particles(
    region: Region,
    pixel_ratio: f64,
    p: &ParticleParams,
    rng: &mut impl Rng,
) -> Vec<Entity> {
    if region.is_degenerate() {
        return Vec::new();
    }

    let count = particle_count(region.width / pixel_ratio, p);
    let mut entities = Vec::with_capacity(count);

    for _ in 0..count {
        entities.push(Entity {
            x: NVec2::new(
                rng.gen_range(0.0..region.width),
                rng.gen_range(0.0..region.height),
            ),
            // components in ±speed/2, scaled to device pixels
            v: NVec2::new(
                (rng.gen::<f64>() - 0.5) * p.speed * pixel_ratio,
                (rng.gen::<f64>() - 0.5) * p.speed * pixel_ratio,
            ),
            radius: (rng.gen::<f64>() * p.radius_span + p.radius_min) * pixel_ratio,
            alpha: rng.gen::<f64>() * p.alpha_span + p.alpha_min,
            rotation: 0.0,
            spin: 0.0,
            scale: 1.0,
        });
    }

    entities
}

/// Seed the icon field. `region` is in logical pixels. Horizontal velocity
/// gets a non-zero minimum magnitude with a random sign so no icon ever
/// stalls; opacity follows the scale formula used by the renderer.
pub fn seed_icons(region: Region, p: &IconParams, rng: &mut impl Rng) -> Vec<Entity> {
    if region.is_degenerate() {
        return Vec::new();
    }

    let count = icon_count(region.width, p);
    let mut entities = Vec::with_capacity(count);

    for _ in 0..count {
        let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let scale = rng.gen::<f64>() * p.scale_span + p.scale_min;

        entities.push(Entity {
            x: NVec2::new(
                rng.gen_range(0.0..region.width),
                rng.gen_range(0.0..region.height),
            ),
            v: NVec2::new(
                sign * (p.drift_min + rng.gen::<f64>() * p.drift_span),
                (rng.gen::<f64>() - 0.5) * p.lift_span,
            ),
            radius: 1.0,
            alpha: p.alpha_base + p.alpha_per_scale * scale,
            rotation: rng.gen_range(0.0..360.0),
            spin: (rng.gen::<f64>() - 0.5) * 2.0 * p.spin_max,
            scale,
        });
    }

    entities
}

/// One trail spark at the pointer position with a small random drift.
pub fn spawn_spark(x: f64, y: f64, p: &TrailParams, rng: &mut impl Rng) -> Entity {
    Entity {
        x: NVec2::new(x, y),
        v: NVec2::new(
            (rng.gen::<f64>() - 0.5) * p.drift,
            (rng.gen::<f64>() - 0.5) * p.drift,
        ),
        radius: p.radius,
        alpha: 1.0,
        rotation: 0.0,
        spin: 0.0,
        scale: 1.0,
    }
}
