//! Core state types for the point-field simulation.
//!
//! Defines the plain-data building blocks:
//! - `Entity` — one moving point with its visual attributes
//! - `Region` — the rectangular bounds entities move within
//! - `Field`  — the entity set plus its region and frame counter
//!
//! All positions and velocities use `NVec2` (field pixels, pixels per frame).

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone)]
pub struct Entity {
    pub x: NVec2, // position
    pub v: NVec2, // velocity, pixels per frame
    pub radius: f64, // disc radius
    pub alpha: f64, // opacity in [0, 1]
    pub rotation: f64, // display angle, degrees
    pub spin: f64, // degrees per frame
    pub scale: f64, // visual scale factor
}

/// Rectangular simulation bounds. Recomputed whole on resize, never
/// partially updated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub width: f64,
    pub height: f64,
}

impl Region {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// A region with no area cannot host entities; the engine treats it as
    /// "no surface present" and stays idle.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[derive(Debug, Clone)]
pub struct Field {
    pub entities: Vec<Entity>, // current entity set
    pub region: Region, // bounds the entities move within
    pub frame: u64, // frames advanced since the last seed
}

impl Field {
    pub fn empty(region: Region) -> Self {
        Self {
            entities: Vec::new(),
            region,
            frame: 0,
        }
    }
}
