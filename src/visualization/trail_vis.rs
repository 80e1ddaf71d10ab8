use bevy::log::LogPlugin;
use bevy::math::primitives::Circle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::window::{CursorMoved, PrimaryWindow, WindowResized};

use crate::simulation::params::FieldKind;
use crate::simulation::scenario::Scene;
use crate::simulation::states::{NVec2, Region};

/// Component tagging each pooled dot with its slot index
#[derive(Component)]
struct SparkIndex(pub usize);

pub fn run_trail(scene: Scene) {
    log::info!("run_trail: starting pointer-trail viewer");

    App::new()
        .insert_resource(ClearColor(Color::srgb(0.02, 0.04, 0.07)))
        .insert_resource(scene)
        .add_plugins(DefaultPlugins.build().disable::<LogPlugin>())
        .add_systems(Startup, setup_trail_system)
        .add_systems(
            Update,
            (pointer_system, resize_system, step_system, sync_sparks_system).chain(),
        )
        .run();
}

/// Startup system: camera, engine start, and the fixed dot pool. The pool is
/// sized from the spark cap and reused for the lifetime of the app; slots
/// without a live spark render fully transparent.
fn setup_trail_system(
    mut commands: Commands,
    mut scene: ResMut<Scene>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    commands.spawn(Camera2dBundle::default());

    let FieldKind::Trail(p) = scene.engine.kind() else {
        return;
    };
    let pool = p.pool;
    let radius = p.radius as f32;

    let Ok(window) = windows.get_single() else {
        return;
    };
    let region = Region::new(window.width() as f64, window.height() as f64);
    scene.engine.start(region, 1.0);

    for i in 0..pool {
        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new(radius))),
                material: materials.add(ColorMaterial::from(accent(0.0))),
                transform: Transform::from_xyz(0.0, 0.0, 0.0),
                ..Default::default()
            },
            SparkIndex(i),
        ));
    }
}

/// Pointer positions arrive in logical pixels with a top-left origin, which
/// is exactly the field coordinate system.
fn pointer_system(mut scene: ResMut<Scene>, mut events: EventReader<CursorMoved>) {
    for ev in events.read() {
        scene
            .engine
            .on_pointer_move(ev.position.x as f64, ev.position.y as f64);
    }
}

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

/// Feed the dot pool from the live sparks; unused slots go transparent.
fn sync_sparks_system(
    scene: Res<Scene>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut query: Query<(&SparkIndex, &mut Transform, &Handle<ColorMaterial>)>,
) {
    let region = scene.engine.region();
    let entities = scene.engine.entities();

    for (SparkIndex(i), mut transform, mat_handle) in &mut query {
        let alpha = match entities.get(*i) {
            Some(e) => {
                transform.translation = to_world(&e.x, region);
                e.alpha
            }
            None => 0.0,
        };

        if let Some(mat) = materials.get_mut(mat_handle) {
            mat.color = mat.color.with_alpha(alpha as f32);
        }
    }
}

fn accent(alpha: f64) -> Color {
    Color::srgba(0.0, 0.85, 1.0, alpha as f32)
}

fn to_world(x: &NVec2, region: Region) -> Vec3 {
    Vec3::new(
        (x.x - region.width * 0.5) as f32,
        (region.height * 0.5 - x.y) as f32,
        0.0,
    )
}
