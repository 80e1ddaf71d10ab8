pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Entity, Field, NVec2, Region};
pub use simulation::params::{FieldKind, IconParams, ParticleParams, TrailParams};
pub use simulation::seeding::{icon_count, particle_count, seed_icons, seed_particles, spawn_spark};
pub use simulation::stepper::{advance, step_bounce, step_trail, step_wrap};
pub use simulation::links::collect_links;
pub use simulation::engine::{FieldEngine, ResizeDebouncer};
pub use simulation::scenario::Scene;

pub use configuration::config::{
    EngineConfig, FieldChoice, IconConfig, ParticleConfig, SceneConfig, TrailConfig,
};

pub use visualization::{icons_vis::run_icons, particles_vis::run_particles, trail_vis::run_trail};

pub use benchmark::benchmark::{bench_links, bench_step};
