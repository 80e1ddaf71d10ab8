//! Per-frame stepping for the point fields
//!
//! Provides the one-step Euler advance and the three field steppers, all
//! operating in-place on a `Field`:
//! - `step_bounce` — particle background, velocity sign reflection at edges
//! - `step_wrap`   — icon field, teleport past an exit margin
//! - `step_trail`  — pointer sparks, alpha decay and culling
//!
//! The time step is one frame, with no delta-time scaling: perceived speed
//! tracks the display refresh rate.

use crate::simulation::params::{IconParams, TrailParams};
use crate::simulation::states::{Entity, Field, Region};

/// Advance one entity by one frame: position by its velocity, rotation by its
/// spin. Rotation accumulates unbounded; it is only ever read as a display
/// angle.
pub fn advance(e: &mut Entity) {
    e.x += e.v;
    e.rotation += e.spin;
}

/// Advance every entity, reflecting the velocity sign on the axis whose
/// post-update position left `[0, width] x [0, height]`.
///
/// The reflection happens after the move, so an entity can sit outside the
/// region for one frame before the flipped velocity carries it back in.
pub fn step_bounce(field: &mut Field) {
    let Region { width, height } = field.region;

    for e in field.entities.iter_mut() {
        advance(e);

        if e.x.x < 0.0 || e.x.x > width {
            e.v.x = -e.v.x;
        }
        if e.x.y < 0.0 || e.x.y > height {
            e.v.y = -e.v.y;
        }
    }

    field.frame += 1;
}

/// Advance every entity, teleporting any that drifted more than
/// `exit_margin` past an edge to just beyond the opposite edge. Velocity,
/// rotation, and spin pass through a wrap unchanged, so re-entry is
/// continuous rather than a bounce.
pub fn step_wrap(field: &mut Field, p: &IconParams) {
    let Region { width, height } = field.region;

    for e in field.entities.iter_mut() {
        advance(e);

        if e.x.x < -p.exit_margin {
            e.x.x = width + p.entry_margin;
        } else if e.x.x > width + p.exit_margin {
            e.x.x = -p.entry_margin;
        }

        if e.x.y < -p.exit_margin {
            e.x.y = height + p.entry_margin;
        } else if e.x.y > height + p.exit_margin {
            e.x.y = -p.entry_margin;
        }
    }

    field.frame += 1;
}

/// Advance every spark, fading it by the fixed decay. Sparks that reach zero
/// opacity are culled as a batch; alpha never goes negative.
pub fn step_trail(field: &mut Field, p: &TrailParams) {
    for e in field.entities.iter_mut() {
        advance(e);
        e.alpha = (e.alpha - p.decay).max(0.0);
    }

    field.entities.retain(|e| e.alpha > 0.0);
    field.frame += 1;
}
