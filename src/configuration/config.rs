//! Configuration types for loading scene descriptions from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of an
//! animated scene. A scene consists of:
//!
//! - [`EngineConfig`]   – which field to run, pixel-ratio cap, optional RNG seed
//! - [`ParticleConfig`] – particle-background tuning (optional section)
//! - [`IconConfig`]     – icon-field tuning (optional section)
//! - [`TrailConfig`]    – pointer-trail tuning (optional section)
//! - [`SceneConfig`]    – top-level wrapper used to load a scene from YAML
//!
//! # YAML format
//! An example particle scene matching these types:
//!
//! ```yaml
//! engine:
//!   field: "particles"      # or "icons", "trail"
//!   pixel_ratio_cap: 2.0    # display scale factor clamp
//!   seed: 7                 # optional, pins the RNG
//!
//! particles:
//!   max_count: 140          # hard cap on the entity count
//!   density_divisor: 10.0   # one entity per this many logical px of width
//!   speed: 0.08             # full width of the velocity range, px/frame
//!   radius_min: 0.6
//!   radius_span: 1.4
//!   alpha_min: 0.2
//!   alpha_span: 0.6
//!   link_distance: 120.0    # logical px, scaled by the pixel ratio
//!   link_alpha: 0.12
//! ```
//!
//! Omitted per-field sections fall back to their defaults; only the section
//! matching `engine.field` is ever read.

use serde::Deserialize;

/// Which field the scene runs
/// `field: "particles"`, `field: "icons"`, or `field: "trail"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldChoice {
    #[serde(rename = "particles")] // bouncing discs with proximity links
    Particles,

    #[serde(rename = "icons")] // drifting, spinning chips with edge wraparound
    Icons,

    #[serde(rename = "trail")] // pointer-fed sparks that fade out
    Trail,
}

/// High-level engine configuration
#[derive(Deserialize, Debug)]
pub struct EngineConfig {
    pub field: FieldChoice, // which field to simulate
    pub pixel_ratio_cap: Option<f64>, // clamp on the display scale factor, default 2.0
    pub seed: Option<u64>, // RNG seed for reproducible runs
}

/// Particle-background tuning
#[derive(Deserialize, Debug, Clone)]
pub struct ParticleConfig {
    pub max_count: usize,
    pub density_divisor: f64,
    pub speed: f64,
    pub radius_min: f64,
    pub radius_span: f64,
    pub alpha_min: f64,
    pub alpha_span: f64,
    pub link_distance: f64,
    pub link_alpha: f64,
}

/// Icon-field tuning
#[derive(Deserialize, Debug, Clone)]
pub struct IconConfig {
    pub count_narrow: usize, // entity count when width < narrow_width
    pub count_wide: usize,
    pub narrow_width: f64,
    pub drift_min: f64, // minimum |vx|, sign drawn at random
    pub drift_span: f64,
    pub lift_span: f64,
    pub scale_min: f64,
    pub scale_span: f64,
    pub spin_max: f64, // degrees per frame
    pub alpha_base: f64, // opacity = alpha_base + alpha_per_scale * scale
    pub alpha_per_scale: f64,
    pub exit_margin: f64, // px past the edge before a wrap triggers
    pub entry_margin: f64, // px past the opposite edge on re-entry
    pub debounce_secs: f64, // resize quiet window
}

/// Pointer-trail tuning
#[derive(Deserialize, Debug, Clone)]
pub struct TrailConfig {
    pub pool: usize, // live spark cap
    pub drift: f64,
    pub decay: f64, // alpha lost per frame
    pub radius: f64,
}

/// Top-level scene configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct SceneConfig {
    pub engine: EngineConfig, // field selection and engine-level options
    pub particles: Option<ParticleConfig>, // particle tuning, defaults when absent
    pub icons: Option<IconConfig>, // icon tuning, defaults when absent
    pub trail: Option<TrailConfig>, // trail tuning, defaults when absent
}
