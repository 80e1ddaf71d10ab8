use bevy::log::LogPlugin;
use bevy::math::primitives::Circle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::window::{PrimaryWindow, WindowResized};

use crate::simulation::links::collect_links;
use crate::simulation::params::FieldKind;
use crate::simulation::scenario::Scene;
use crate::simulation::states::{NVec2, Region};

/// Component tagging each disc with its entity index into the engine
#[derive(Component)]
struct DotIndex(pub usize);

pub fn run_particles(scene: Scene) {
    log::info!("run_particles: starting particle viewer");

    App::new()
        .insert_resource(ClearColor(Color::srgb(0.02, 0.04, 0.07))) // near-black backdrop
        .insert_resource(scene)
        .add_plugins(DefaultPlugins.build().disable::<LogPlugin>())
        .add_systems(Startup, setup_particles_system)
        .add_systems(
            Update,
            (
                resize_system,
                step_system,
                rebuild_discs_system,
                sync_discs_system,
                draw_links_system,
            )
                .chain(),
        )
        .run();
}

/// Startup system: spawn the camera and start the engine against the real
/// window size. No window means nothing to animate, so the engine stays idle.
fn setup_particles_system(
    mut commands: Commands,
    mut scene: ResMut<Scene>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    commands.spawn(Camera2dBundle::default());

    let Ok(window) = windows.get_single() else {
        return;
    };

    // device-pixel region: logical size times the clamped scale factor
    let ratio = (window.scale_factor() as f64).min(scene.pixel_ratio_cap);
    let region = Region::new(
        window.width() as f64 * ratio,
        window.height() as f64 * ratio,
    );

    scene.engine.start(region, ratio);
    log::info!(
        "setup_particles_system: seeded {} entities at ratio {ratio}",
        scene.engine.entities().len()
    );
}

/// Window resizes reseed the particle field synchronously.
fn resize_system(mut scene: ResMut<Scene>, mut events: EventReader<WindowResized>) {
    for ev in events.read() {
        let ratio = scene.engine.pixel_ratio();
        scene
            .engine
            .on_resize(Region::new(ev.width as f64 * ratio, ev.height as f64 * ratio));
    }
}

/// Per-frame step, strictly before any rendering system.
fn step_system(mut scene: ResMut<Scene>, time: Res<Time>) {
    scene.engine.tick(time.delta_seconds() as f64);
}

/// Rebuild the disc meshes whenever the engine has reseeded: radii and
/// opacities are per-generation, so the old meshes are discarded wholesale.
fn rebuild_discs_system(
    mut commands: Commands,
    scene: Res<Scene>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    discs: Query<Entity, With<DotIndex>>,
    mut seen: Local<u64>,
) {
    if scene.engine.generation() == *seen {
        return;
    }
    *seen = scene.engine.generation();

    for id in &discs {
        commands.entity(id).despawn();
    }

    let region = scene.engine.region();
    let inv_ratio = 1.0 / scene.engine.pixel_ratio();

    for (i, e) in scene.engine.entities().iter().enumerate() {
        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new((e.radius * inv_ratio) as f32))),
                material: materials.add(ColorMaterial::from(accent(e.alpha))),
                transform: Transform::from_translation(to_world(&e.x, region, inv_ratio)),
                ..Default::default()
            },
            DotIndex(i),
        ));
    }
}

fn sync_discs_system(scene: Res<Scene>, mut query: Query<(&DotIndex, &mut Transform)>) {
    let region = scene.engine.region();
    let inv_ratio = 1.0 / scene.engine.pixel_ratio();

    for (DotIndex(i), mut transform) in &mut query {
        if let Some(e) = scene.engine.entities().get(*i) {
            transform.translation = to_world(&e.x, region, inv_ratio);
        }
    }
}

/// Immediate-mode link pass: one line per unordered pair strictly below the
/// threshold, recomputed from current positions every frame.
fn draw_links_system(scene: Res<Scene>, mut gizmos: Gizmos) {
    let FieldKind::Particles(p) = scene.engine.kind() else {
        return;
    };

    let threshold = p.link_distance * scene.engine.pixel_ratio();
    let color = accent(p.link_alpha);
    let region = scene.engine.region();
    let inv_ratio = 1.0 / scene.engine.pixel_ratio();
    let entities = scene.engine.entities();

    for (i, j) in collect_links(entities, threshold) {
        gizmos.line_2d(
            to_world(&entities[i].x, region, inv_ratio).truncate(),
            to_world(&entities[j].x, region, inv_ratio).truncate(),
            color,
        );
    }
}

fn accent(alpha: f64) -> Color {
    Color::srgba(0.0, 0.85, 1.0, alpha as f32) // cyan accent
}

/// Field coordinates (device px, origin top-left, y down) to Bevy world
/// coordinates (logical px, origin center, y up).
fn to_world(x: &NVec2, region: Region, inv_ratio: f64) -> Vec3 {
    Vec3::new(
        ((x.x - region.width * 0.5) * inv_ratio) as f32,
        ((region.height * 0.5 - x.y) * inv_ratio) as f32,
        0.0,
    )
}
