//! The per-view field engine
//!
//! `FieldEngine` is the explicit owner of one animated view's state: its
//! entity set, region, RNG, running flag, and (for the icon field) the resize
//! debouncer. Event sources never touch the field directly; they dispatch
//! commands into the engine:
//! - `start(region, pixel_ratio)` — seed and begin stepping
//! - `on_resize(region)`          — recompute bounds, reseeding now or after
//!   the quiet window depending on the field kind
//! - `on_pointer_move(x, y)`      — spawn a trail spark
//! - `tick(dt)`                   — advance the debounce clock, then step
//!   every entity by one frame
//!
//! There is no stop command: an engine runs until its view is dropped. The
//! only idle state is "never started" or "started against a degenerate
//! region".

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::simulation::params::FieldKind;
use crate::simulation::seeding::{seed_icons, seed_particles, spawn_spark};
use crate::simulation::states::{Entity, Field, Region};
use crate::simulation::stepper::{step_bounce, step_trail, step_wrap};

/// Trailing-edge debounce for resize bursts: only the last region pushed
/// within the quiet window survives, and it fires once the window elapses
/// with no newer push.
#[derive(Debug)]
pub struct ResizeDebouncer {
    quiet: f64, // seconds of silence required before firing
    pending: Option<Region>,
    elapsed: f64, // seconds since the newest push
}

impl ResizeDebouncer {
    pub fn new(quiet: f64) -> Self {
        Self {
            quiet,
            pending: None,
            elapsed: 0.0,
        }
    }

    /// Record a region, discarding any pending one and restarting the clock.
    pub fn push(&mut self, region: Region) {
        self.pending = Some(region);
        self.elapsed = 0.0;
    }

    /// Advance the clock by `dt` seconds; returns the pending region once the
    /// quiet window has fully elapsed.
    pub fn tick(&mut self, dt: f64) -> Option<Region> {
        self.pending?;

        self.elapsed += dt;
        if self.elapsed >= self.quiet {
            return self.pending.take();
        }
        None
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

pub struct FieldEngine {
    kind: FieldKind,
    field: Field,
    pixel_ratio: f64,
    running: bool,
    generation: u64, // bumped on every reseed so renderers can rebuild
    debouncer: Option<ResizeDebouncer>,
    rng: StdRng,
}

impl FieldEngine {
    /// Build an idle engine. A seed pins the RNG for reproducible runs.
    pub fn new(kind: FieldKind, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };

        // only the icon field debounces its resizes
        let debouncer = match &kind {
            FieldKind::Icons(p) => Some(ResizeDebouncer::new(p.debounce_secs)),
            _ => None,
        };

        Self {
            kind,
            field: Field::empty(Region::new(0.0, 0.0)),
            pixel_ratio: 1.0,
            running: false,
            generation: 0,
            debouncer,
            rng,
        }
    }

    /// Seed the field and begin stepping. A degenerate region means the
    /// hosting surface is absent: the engine clears its entities and stays
    /// idle instead of failing.
    pub fn start(&mut self, region: Region, pixel_ratio: f64) {
        self.pixel_ratio = pixel_ratio;
        self.apply_region(region);
    }

    /// Dispatch a resize. The particle and trail fields reseed synchronously;
    /// the icon field arms the debouncer and reseeds after the quiet window.
    pub fn on_resize(&mut self, region: Region) {
        if matches!(self.kind, FieldKind::Icons(_)) {
            if let Some(d) = self.debouncer.as_mut() {
                d.push(region);
            }
        } else {
            self.apply_region(region);
        }
    }

    /// Dispatch a pointer position (trail field only). Ignored while idle or
    /// once the spark pool is full.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        if !self.running {
            return;
        }
        if let FieldKind::Trail(p) = &self.kind {
            if self.field.entities.len() < p.pool {
                let spark = spawn_spark(x, y, p, &mut self.rng);
                self.field.entities.push(spark);
            }
        }
    }

    /// Advance the debounce clock by `dt` seconds, then step every entity by
    /// one frame. All entities are advanced before any renderer reads them.
    pub fn tick(&mut self, dt: f64) {
        if let Some(region) = self.debouncer.as_mut().and_then(|d| d.tick(dt)) {
            self.apply_region(region);
        }

        if !self.running {
            return;
        }

        match &self.kind {
            FieldKind::Particles(_) => step_bounce(&mut self.field),
            FieldKind::Icons(p) => step_wrap(&mut self.field, p),
            FieldKind::Trail(p) => step_trail(&mut self.field, p),
        }
    }

    fn apply_region(&mut self, region: Region) {
        if region.is_degenerate() {
            self.field.entities.clear();
            self.running = false;
            return;
        }

        self.field.region = region;
        self.reseed();
        self.running = true;
    }

    /// Replace the whole entity set for the current region. The trail field
    /// seeds empty and fills from pointer events.
    fn reseed(&mut self) {
        self.field.entities = match &self.kind {
            FieldKind::Particles(p) => {
                seed_particles(self.field.region, self.pixel_ratio, p, &mut self.rng)
            }
            FieldKind::Icons(p) => seed_icons(self.field.region, p, &mut self.rng),
            FieldKind::Trail(_) => Vec::new(),
        };
        self.field.frame = 0;
        self.generation += 1;
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn entities(&self) -> &[Entity] {
        &self.field.entities
    }

    pub fn region(&self) -> Region {
        self.field.region
    }

    pub fn frame(&self) -> u64 {
        self.field.frame
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Link-pass threshold in device pixels, for the particle field only.
    pub fn link_threshold(&self) -> Option<f64> {
        match &self.kind {
            FieldKind::Particles(p) => Some(p.link_distance * self.pixel_ratio),
            _ => None,
        }
    }
}
