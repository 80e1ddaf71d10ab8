//! Runtime tuning parameters for each field kind
//!
//! `FieldKind` selects which field a `FieldEngine` runs and carries that
//! field's parameters:
//! - `Particles` — bouncing discs with proximity links
//! - `Icons`     — drifting, spinning chips with edge wraparound
//! - `Trail`     — pointer-fed sparks that fade out
//!
//! Velocity ranges follow one convention throughout: a `*_span` value is the
//! full width of the symmetric range, so `speed: 0.08` draws components from
//! ±0.04 pixels per frame.

/// Which field a `FieldEngine` simulates, with its parameters.
#[derive(Debug, Clone)]
pub enum FieldKind {
    Particles(ParticleParams),
    Icons(IconParams),
    Trail(TrailParams),
}

/// Particle background: count scales with viewport width up to a hard cap,
/// boundary policy is bounce, nearby pairs are linked by lines.
#[derive(Debug, Clone)]
pub struct ParticleParams {
    pub max_count: usize, // hard cap on the entity count
    pub density_divisor: f64, // one entity per this many logical px of width
    pub speed: f64, // full width of the velocity range, logical px per frame
    pub radius_min: f64, // logical px, scaled by the pixel ratio
    pub radius_span: f64,
    pub alpha_min: f64,
    pub alpha_span: f64,
    pub link_distance: f64, // logical px, scaled by the pixel ratio
    pub link_alpha: f64, // line opacity
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self {
            max_count: 140,
            density_divisor: 10.0,
            speed: 0.08,
            radius_min: 0.6,
            radius_span: 1.4,
            alpha_min: 0.2,
            alpha_span: 0.6,
            link_distance: 120.0,
            link_alpha: 0.12,
        }
    }
}

/// Icon field: small fixed count, wrap boundary policy with distinct exit
/// and re-entry margins, rotation accumulating by a per-entity spin.
#[derive(Debug, Clone)]
pub struct IconParams {
    pub count_narrow: usize, // entity count when width < narrow_width
    pub count_wide: usize,
    pub narrow_width: f64, // logical px cut-off between the two counts
    pub drift_min: f64, // minimum |vx|, sign drawn at random
    pub drift_span: f64,
    pub lift_span: f64, // full width of the symmetric vy range
    pub scale_min: f64,
    pub scale_span: f64,
    pub spin_max: f64, // |spin| upper bound, degrees per frame
    pub alpha_base: f64, // opacity = alpha_base + alpha_per_scale * scale
    pub alpha_per_scale: f64,
    pub exit_margin: f64, // px past the edge before a wrap triggers
    pub entry_margin: f64, // px past the opposite edge on re-entry
    pub debounce_secs: f64, // resize quiet window
}

impl Default for IconParams {
    fn default() -> Self {
        Self {
            count_narrow: 12,
            count_wide: 22,
            narrow_width: 640.0,
            drift_min: 0.15,
            drift_span: 0.35,
            lift_span: 0.4,
            scale_min: 0.6,
            scale_span: 0.7,
            spin_max: 0.3,
            alpha_base: 0.25,
            alpha_per_scale: 0.4,
            exit_margin: 80.0,
            entry_margin: 60.0,
            debounce_secs: 0.2,
        }
    }
}

/// Pointer trail: sparks spawned per pointer event, drifting and fading at a
/// fixed per-frame decay, bounded by a pool cap.
#[derive(Debug, Clone)]
pub struct TrailParams {
    pub pool: usize, // live spark cap
    pub drift: f64, // full width of the spawn velocity range
    pub decay: f64, // alpha lost per frame
    pub radius: f64,
}

impl Default for TrailParams {
    fn default() -> Self {
        Self {
            pool: 48,
            drift: 1.2,
            decay: 0.03,
            radius: 3.0,
        }
    }
}
