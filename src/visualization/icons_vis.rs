use bevy::log::LogPlugin;
use bevy::math::primitives::Rectangle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::window::{PrimaryWindow, WindowResized};

use crate::simulation::params::FieldKind;
use crate::simulation::scenario::Scene;
use crate::simulation::states::{NVec2, Region};

/// Component tagging each chip with its entity index into the engine
#[derive(Component)]
struct IconIndex(pub usize);

/// Chip side length at scale 1.0, logical px
const ICON_SIZE: f32 = 28.0;

pub fn run_icons(scene: Scene) {
    log::info!("run_icons: starting icon viewer");

    App::new()
        .insert_resource(ClearColor(Color::srgb(0.02, 0.04, 0.07)))
        .insert_resource(scene)
        .add_plugins(DefaultPlugins.build().disable::<LogPlugin>())
        .add_systems(Startup, setup_icons_system)
        .add_systems(
            Update,
            (
                resize_system,
                step_system,
                rebuild_icons_system,
                sync_icons_system,
            )
                .chain(),
        )
        .run();
}

/// Startup system: camera plus engine start against the logical window size.
/// The icon field runs in logical pixels, so no ratio scaling here.
fn setup_icons_system(
    mut commands: Commands,
    mut scene: ResMut<Scene>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    commands.spawn(Camera2dBundle::default());

    let Ok(window) = windows.get_single() else {
        return;
    };

    let region = Region::new(window.width() as f64, window.height() as f64);
    scene.engine.start(region, 1.0);
    log::info!(
        "setup_icons_system: seeded {} entities",
        scene.engine.entities().len()
    );
}

/// Window resizes go through the engine's debouncer: re-measuring and
/// rebuilding retained chips is costlier than the particle reseed, so only
/// the last event of a burst wins.
fn resize_system(mut scene: ResMut<Scene>, mut events: EventReader<WindowResized>) {
    for ev in events.read() {
        scene
            .engine
            .on_resize(Region::new(ev.width as f64, ev.height as f64));
    }
}

fn step_system(mut scene: ResMut<Scene>, time: Res<Time>) {
    scene.engine.tick(time.delta_seconds() as f64);
}

/// One retained chip per entity per seed generation.
fn rebuild_icons_system(
    mut commands: Commands,
    scene: Res<Scene>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    chips: Query<Entity, With<IconIndex>>,
    mut seen: Local<u64>,
) {
    if scene.engine.generation() == *seen {
        return;
    }
    *seen = scene.engine.generation();

    for id in &chips {
        commands.entity(id).despawn();
    }

    let region = scene.engine.region();

    for (i, e) in scene.engine.entities().iter().enumerate() {
        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Rectangle::new(ICON_SIZE, ICON_SIZE))),
                material: materials.add(ColorMaterial::from(chip_color(e.alpha))),
                transform: Transform::from_translation(to_world(&e.x, region)),
                ..Default::default()
            },
            IconIndex(i),
        ));
    }
}

/// Per-frame retained-element update: translation, rotation, and scale into
/// the transform, opacity from the scale formula into the material. No
/// clearing pass; the chips persist between frames.
fn sync_icons_system(
    scene: Res<Scene>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut query: Query<(&IconIndex, &mut Transform, &Handle<ColorMaterial>)>,
) {
    let FieldKind::Icons(p) = scene.engine.kind() else {
        return;
    };
    let region = scene.engine.region();

    for (IconIndex(i), mut transform, mat_handle) in &mut query {
        if let Some(e) = scene.engine.entities().get(*i) {
            transform.translation = to_world(&e.x, region);
            transform.rotation = Quat::from_rotation_z(e.rotation.to_radians() as f32);
            transform.scale = Vec3::splat(e.scale as f32);

            let alpha = p.alpha_base + p.alpha_per_scale * e.scale;
            if let Some(mat) = materials.get_mut(mat_handle) {
                mat.color = mat.color.with_alpha(alpha as f32);
            }
        }
    }
}

fn chip_color(alpha: f64) -> Color {
    Color::srgba(0.85, 0.9, 0.95, alpha as f32) // soft white
}

/// Field coordinates (logical px, origin top-left, y down) to Bevy world
/// coordinates (origin center, y up).
fn to_world(x: &NVec2, region: Region) -> Vec3 {
    Vec3::new(
        (x.x - region.width * 0.5) as f32,
        (region.height * 0.5 - x.y) as f32,
        0.0,
    )
}
