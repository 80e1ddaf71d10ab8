use driftfield::simulation::engine::{FieldEngine, ResizeDebouncer};
use driftfield::simulation::links::collect_links;
use driftfield::simulation::params::{FieldKind, IconParams, ParticleParams, TrailParams};
use driftfield::simulation::seeding::{icon_count, particle_count, seed_icons, seed_particles};
use driftfield::simulation::states::{Entity, Field, NVec2, Region};
use driftfield::simulation::stepper::{advance, step_bounce, step_trail, step_wrap};
use driftfield::Scene;

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Deterministic RNG for seeding tests
pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Build an entity at a position with a velocity and neutral visuals
pub fn drifting_entity(x: f64, y: f64, vx: f64, vy: f64) -> Entity {
    Entity {
        x: NVec2::new(x, y),
        v: NVec2::new(vx, vy),
        radius: 1.0,
        alpha: 0.5,
        rotation: 0.0,
        spin: 0.0,
        scale: 1.0,
    }
}

/// Build a field over the given bounds from a list of entities
pub fn make_field(entities: Vec<Entity>, width: f64, height: f64) -> Field {
    Field {
        entities,
        region: Region::new(width, height),
        frame: 0,
    }
}

/// A started particle engine over a logical 800x600 viewport
pub fn particle_engine() -> FieldEngine {
    let mut engine = FieldEngine::new(FieldKind::Particles(ParticleParams::default()), Some(42));
    engine.start(Region::new(800.0, 600.0), 1.0);
    engine
}

// ==================================================================================
// Stepper tests
// ==================================================================================

#[test]
fn advance_moves_by_velocity_and_spin() {
    let mut e = drifting_entity(10.0, 20.0, 0.5, -0.25);
    e.spin = 0.3;

    advance(&mut e);

    assert_relative_eq!(e.x.x, 10.5);
    assert_relative_eq!(e.x.y, 19.75);
    assert_relative_eq!(e.rotation, 0.3);
}

#[test]
fn bounce_flips_sign_exactly_once_per_crossing() {
    let mut field = make_field(vec![drifting_entity(99.5, 50.0, 1.0, 0.0)], 100.0, 100.0);

    // Crossing step: the entity moves out, then the sign flips
    step_bounce(&mut field);
    assert_relative_eq!(field.entities[0].x.x, 100.5);
    assert_relative_eq!(field.entities[0].v.x, -1.0);

    // Recovery step: back inside, no second flip
    step_bounce(&mut field);
    assert_relative_eq!(field.entities[0].x.x, 99.5);
    assert_relative_eq!(field.entities[0].v.x, -1.0);
}

#[test]
fn bounce_reflects_on_both_axes() {
    let mut field = make_field(vec![drifting_entity(50.0, 0.5, 0.0, -1.0)], 100.0, 100.0);

    step_bounce(&mut field);
    assert_relative_eq!(field.entities[0].v.y, 1.0);
    assert_relative_eq!(field.entities[0].v.x, 0.0);
}

#[test]
fn bounce_leaves_interior_entities_alone() {
    let mut field = make_field(vec![drifting_entity(50.0, 50.0, 0.7, -0.4)], 100.0, 100.0);

    for _ in 0..10 {
        step_bounce(&mut field);
    }

    assert_relative_eq!(field.entities[0].v.x, 0.7);
    assert_relative_eq!(field.entities[0].v.y, -0.4);
    assert_relative_eq!(field.entities[0].x.x, 57.0, epsilon = 1e-9);
}

#[test]
fn wrap_teleports_to_opposite_edge_with_entry_margin() {
    let p = IconParams::default(); // exit 80, entry 60
    let mut e = drifting_entity(-89.9, 100.0, -0.1, 0.0);
    e.rotation = 45.0;
    e.spin = 0.2;
    let mut field = make_field(vec![e], 800.0, 400.0);

    step_wrap(&mut field, &p);

    // past the exit margin on the left, so re-enter right of the field
    let e = &field.entities[0];
    assert_relative_eq!(e.x.x, 860.0);
    assert_relative_eq!(e.v.x, -0.1);
    assert_relative_eq!(e.v.y, 0.0);
    assert_relative_eq!(e.rotation, 45.2, epsilon = 1e-12);
    assert_relative_eq!(e.spin, 0.2);
}

#[test]
fn wrap_keeps_positions_within_margins() {
    let p = IconParams::default();
    let mut rng = seeded_rng();
    let region = Region::new(800.0, 400.0);
    let mut field = Field {
        entities: seed_icons(region, &p, &mut rng),
        region,
        frame: 0,
    };

    for _ in 0..5000 {
        step_wrap(&mut field, &p);
        for e in &field.entities {
            assert!(e.x.x >= -p.exit_margin - 1.0 && e.x.x <= region.width + p.exit_margin + 1.0);
            assert!(e.x.y >= -p.exit_margin - 1.0 && e.x.y <= region.height + p.exit_margin + 1.0);
        }
    }
}

#[test]
fn rotation_accumulates_unbounded() {
    let p = IconParams::default();
    let mut e = drifting_entity(400.0, 200.0, 0.2, 0.0);
    e.spin = 0.3;
    let mut field = make_field(vec![e], 800.0, 400.0);

    for _ in 0..10 {
        step_wrap(&mut field, &p);
    }

    assert_relative_eq!(field.entities[0].rotation, 3.0, epsilon = 1e-12);
}

#[test]
fn trail_decays_and_culls_dead_sparks() {
    let p = TrailParams {
        decay: 0.03,
        ..TrailParams::default()
    };
    let mut dim = drifting_entity(10.0, 10.0, 0.0, 0.0);
    dim.alpha = 0.05;
    let mut bright = drifting_entity(20.0, 20.0, 0.0, 0.0);
    bright.alpha = 1.0;
    let mut field = make_field(vec![dim, bright], 100.0, 100.0);

    step_trail(&mut field, &p);
    assert_eq!(field.entities.len(), 2);
    assert_relative_eq!(field.entities[0].alpha, 0.02, epsilon = 1e-12);

    // the dim spark clamps to zero and is culled; the bright one keeps fading
    step_trail(&mut field, &p);
    assert_eq!(field.entities.len(), 1);
    assert_relative_eq!(field.entities[0].alpha, 0.94, epsilon = 1e-12);
}

// ==================================================================================
// Seeding tests
// ==================================================================================

#[test]
fn particle_count_scales_with_width_up_to_cap() {
    let p = ParticleParams::default();

    assert_eq!(particle_count(1000.0, &p), 100);
    assert_eq!(particle_count(95.0, &p), 9);
    assert_eq!(particle_count(2000.0, &p), 140);
    assert_eq!(particle_count(0.0, &p), 0);
}

#[test]
fn icon_count_depends_on_viewport_width() {
    let p = IconParams::default();

    assert_eq!(icon_count(500.0, &p), 12);
    assert_eq!(icon_count(640.0, &p), 22);
    assert_eq!(icon_count(1280.0, &p), 22);
    assert_eq!(icon_count(0.0, &p), 0);
}

#[test]
fn seeded_particles_stay_within_configured_ranges() {
    let p = ParticleParams::default();
    let mut rng = seeded_rng();
    let ratio = 2.0;
    let region = Region::new(1600.0, 1200.0); // 800x600 logical

    let entities = seed_particles(region, ratio, &p, &mut rng);
    assert_eq!(entities.len(), 80);

    for e in &entities {
        assert!(e.x.x >= 0.0 && e.x.x < region.width);
        assert!(e.x.y >= 0.0 && e.x.y < region.height);
        assert!(e.v.x != 0.0 && e.v.x.abs() < 0.04 * ratio);
        assert!(e.v.y != 0.0 && e.v.y.abs() < 0.04 * ratio);
        assert!(e.radius >= p.radius_min * ratio);
        assert!(e.radius < (p.radius_min + p.radius_span) * ratio);
        assert!(e.alpha >= p.alpha_min && e.alpha < p.alpha_min + p.alpha_span);
    }
}

#[test]
fn seeded_icons_drift_and_follow_the_alpha_formula() {
    let p = IconParams::default();
    let mut rng = seeded_rng();
    let region = Region::new(1280.0, 720.0);

    let entities = seed_icons(region, &p, &mut rng);
    assert_eq!(entities.len(), 22);

    for e in &entities {
        // horizontal drift never falls below the minimum magnitude
        assert!(e.v.x.abs() >= p.drift_min);
        assert!(e.v.x.abs() < p.drift_min + p.drift_span);
        assert!(e.v.y.abs() <= p.lift_span / 2.0);

        assert!(e.scale >= p.scale_min && e.scale < p.scale_min + p.scale_span);
        assert_relative_eq!(e.alpha, p.alpha_base + p.alpha_per_scale * e.scale);
        assert!(e.alpha >= 0.0 && e.alpha <= 1.0);

        assert!(e.rotation >= 0.0 && e.rotation < 360.0);
        assert!(e.spin.abs() <= p.spin_max);
    }
}

#[test]
fn seeding_a_degenerate_region_produces_no_entities() {
    let mut rng = seeded_rng();

    assert!(seed_particles(Region::new(0.0, 600.0), 1.0, &ParticleParams::default(), &mut rng)
        .is_empty());
    assert!(seed_icons(Region::new(800.0, 0.0), &IconParams::default(), &mut rng).is_empty());
}

// ==================================================================================
// Link-pass tests
// ==================================================================================

#[test]
fn links_pairs_strictly_below_the_threshold() {
    let entities = vec![
        drifting_entity(0.0, 0.0, 0.0, 0.0),
        drifting_entity(50.0, 0.0, 0.0, 0.0),
        drifting_entity(500.0, 0.0, 0.0, 0.0),
    ];

    let links = collect_links(&entities, 120.0);

    assert_eq!(links, vec![(0, 1)]);
}

#[test]
fn link_threshold_is_strict() {
    let entities = vec![
        drifting_entity(0.0, 0.0, 0.0, 0.0),
        drifting_entity(120.0, 0.0, 0.0, 0.0),
    ];

    assert!(collect_links(&entities, 120.0).is_empty());
}

#[test]
fn links_cover_every_qualifying_pair() {
    let entities = vec![
        drifting_entity(0.0, 0.0, 0.0, 0.0),
        drifting_entity(100.0, 0.0, 0.0, 0.0),
        drifting_entity(200.0, 0.0, 0.0, 0.0),
    ];

    let links = collect_links(&entities, 120.0);

    assert_eq!(links, vec![(0, 1), (1, 2)]);
}

// ==================================================================================
// Debounce tests
// ==================================================================================

#[test]
fn debouncer_fires_once_after_the_quiet_window() {
    let mut d = ResizeDebouncer::new(0.2);
    d.push(Region::new(100.0, 100.0));

    assert_eq!(d.tick(0.1), None);
    assert_eq!(d.tick(0.1), Some(Region::new(100.0, 100.0)));
    assert!(!d.is_pending());
    assert_eq!(d.tick(0.1), None);
}

#[test]
fn debouncer_newest_push_replaces_pending_and_restarts_the_clock() {
    let mut d = ResizeDebouncer::new(0.2);

    d.push(Region::new(100.0, 100.0));
    assert_eq!(d.tick(0.15), None);

    d.push(Region::new(300.0, 200.0));
    assert_eq!(d.tick(0.15), None); // only 0.15 since the newest push
    assert_eq!(d.tick(0.05), Some(Region::new(300.0, 200.0)));
}

// ==================================================================================
// Engine tests
// ==================================================================================

#[test]
fn engine_start_seeds_and_runs() {
    let engine = particle_engine();

    assert!(engine.is_running());
    assert_eq!(engine.entities().len(), 80);
    assert_eq!(engine.generation(), 1);
}

#[test]
fn engine_ignores_a_degenerate_surface() {
    let mut engine = FieldEngine::new(FieldKind::Particles(ParticleParams::default()), Some(42));
    engine.start(Region::new(0.0, 0.0), 1.0);

    assert!(!engine.is_running());
    assert!(engine.entities().is_empty());

    engine.tick(0.016);
    assert_eq!(engine.frame(), 0);
}

#[test]
fn engine_steps_every_entity_each_tick() {
    let mut engine = particle_engine();
    let before: Vec<(NVec2, NVec2)> = engine.entities().iter().map(|e| (e.x, e.v)).collect();

    engine.tick(0.016);

    assert_eq!(engine.frame(), 1);
    for (e, (old_x, old_v)) in engine.entities().iter().zip(before.iter()) {
        assert_relative_eq!(e.x.x, old_x.x + old_v.x);
        assert_relative_eq!(e.x.y, old_x.y + old_v.y);
    }
}

#[test]
fn particle_resize_reseeds_synchronously() {
    let mut engine = particle_engine();
    assert_eq!(engine.entities().len(), 80);

    engine.on_resize(Region::new(1000.0, 600.0));

    assert_eq!(engine.generation(), 2);
    assert_eq!(engine.entities().len(), 100);
    assert_eq!(engine.region(), Region::new(1000.0, 600.0));
}

#[test]
fn resize_to_a_degenerate_region_idles_the_engine() {
    let mut engine = particle_engine();

    engine.on_resize(Region::new(800.0, 0.0));

    assert!(!engine.is_running());
    assert!(engine.entities().is_empty());
}

#[test]
fn reseeding_replaces_the_whole_entity_set() {
    let mut engine = particle_engine();
    let before: Vec<NVec2> = engine.entities().iter().map(|e| e.x).collect();

    engine.on_resize(Region::new(800.0, 600.0));

    let after: Vec<NVec2> = engine.entities().iter().map(|e| e.x).collect();
    assert_eq!(before.len(), after.len());
    assert_ne!(before, after);
}

#[test]
fn icon_resize_bursts_collapse_to_one_reseed() {
    let mut engine = FieldEngine::new(FieldKind::Icons(IconParams::default()), Some(42));
    engine.start(Region::new(800.0, 600.0), 1.0);
    assert_eq!(engine.entities().len(), 22);
    assert_eq!(engine.generation(), 1);

    // three resizes inside the quiet window
    engine.on_resize(Region::new(700.0, 500.0));
    engine.tick(0.05);
    engine.on_resize(Region::new(700.0, 500.0));
    engine.tick(0.05);
    engine.on_resize(Region::new(600.0, 500.0));

    // still quiet: no reseed yet
    engine.tick(0.1);
    assert_eq!(engine.generation(), 1);
    assert_eq!(engine.region(), Region::new(800.0, 600.0));

    // the quiet window elapses: exactly one reseed, last event wins
    engine.tick(0.1);
    assert_eq!(engine.generation(), 2);
    assert_eq!(engine.region(), Region::new(600.0, 500.0));
    assert_eq!(engine.entities().len(), 12); // 600 is below the narrow cut-off

    engine.tick(0.1);
    assert_eq!(engine.generation(), 2);
}

#[test]
fn pointer_moves_spawn_sparks_up_to_the_pool_cap() {
    let p = TrailParams::default();
    let pool = p.pool;
    let mut engine = FieldEngine::new(FieldKind::Trail(p), Some(42));

    // ignored while idle
    engine.on_pointer_move(10.0, 10.0);
    assert!(engine.entities().is_empty());

    engine.start(Region::new(800.0, 600.0), 1.0);
    assert!(engine.entities().is_empty()); // the trail seeds empty

    for i in 0..pool + 10 {
        engine.on_pointer_move(i as f64, 5.0);
    }

    assert_eq!(engine.entities().len(), pool);
    assert_relative_eq!(engine.entities()[0].x.x, 0.0);
    assert_relative_eq!(engine.entities()[0].alpha, 1.0);
}

#[test]
fn visual_invariants_hold_over_many_frames() {
    let mut engine = particle_engine();

    for _ in 0..500 {
        engine.tick(0.016);
        for e in engine.entities() {
            assert!(e.alpha >= 0.0 && e.alpha <= 1.0);
            assert!(e.radius > 0.0);
            assert!(e.scale > 0.0);
        }
    }
}

// ==================================================================================
// Configuration tests
// ==================================================================================

#[test]
fn scene_config_parses_from_yaml() {
    let yaml = r#"
engine:
  field: "particles"
  pixel_ratio_cap: 2.0
  seed: 7

particles:
  max_count: 140
  density_divisor: 10.0
  speed: 0.08
  radius_min: 0.6
  radius_span: 1.4
  alpha_min: 0.2
  alpha_span: 0.6
  link_distance: 120.0
  link_alpha: 0.12
"#;

    let cfg: driftfield::SceneConfig = serde_yaml::from_str(yaml).expect("valid scene yaml");

    assert_eq!(cfg.engine.field, driftfield::FieldChoice::Particles);
    assert_eq!(cfg.engine.seed, Some(7));
    assert_eq!(cfg.particles.as_ref().map(|p| p.max_count), Some(140));
}

#[test]
fn build_scene_maps_config_onto_the_engine() {
    let yaml = r#"
engine:
  field: "icons"
  seed: 42

icons:
  count_narrow: 12
  count_wide: 22
  narrow_width: 640.0
  drift_min: 0.15
  drift_span: 0.35
  lift_span: 0.4
  scale_min: 0.6
  scale_span: 0.7
  spin_max: 0.3
  alpha_base: 0.25
  alpha_per_scale: 0.4
  exit_margin: 80.0
  entry_margin: 60.0
  debounce_secs: 0.2
"#;

    let cfg: driftfield::SceneConfig = serde_yaml::from_str(yaml).expect("valid scene yaml");
    let scene = Scene::build_scene(cfg);

    assert!(matches!(scene.engine.kind(), FieldKind::Icons(_)));
    assert!(!scene.engine.is_running()); // the viewer starts it
    assert_relative_eq!(scene.pixel_ratio_cap, 2.0); // default when absent
}

#[test]
fn build_scene_falls_back_to_defaults_without_a_section() {
    let yaml = r#"
engine:
  field: "trail"
"#;

    let cfg: driftfield::SceneConfig = serde_yaml::from_str(yaml).expect("valid scene yaml");
    let scene = Scene::build_scene(cfg);

    match scene.engine.kind() {
        FieldKind::Trail(p) => assert_eq!(p.pool, TrailParams::default().pool),
        other => panic!("expected a trail engine, got {other:?}"),
    }
}
