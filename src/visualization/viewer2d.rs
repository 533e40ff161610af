use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::math::primitives::Circle;
use bevy::window::WindowResolution;

use crate::render::recorder::FrameRecorder;
use crate::simulation::color::Rgba;
use crate::simulation::scenario::Scenario;

#[derive(Component)]
struct ParticleIndex(pub usize);

/// Last frame handed to the recorder
#[derive(Resource, Default)]
struct RecordedFrame(u64);

fn to_color(c: Rgba) -> Color {
    Color::srgba_u8(c.r, c.g, c.b, c.a)
}

/// Open a window and run the scenario until it is closed
///
/// World coordinates have y pointing down (canvas convention); the camera is
/// centred on the world and zoomed so the whole world fits `window_width`
pub fn run_2d(scenario: Scenario, recorder: FrameRecorder, background: Rgba, window_width: f32) {
    let bounds = scenario.system.bounds;
    let aspect = (bounds.y / bounds.x) as f32;
    let resolution = WindowResolution::new(window_width, window_width * aspect);

    App::new()
        .insert_resource(scenario)
        .insert_resource(recorder)
        .insert_resource(ClearColor(to_color(background)))
        .init_resource::<RecordedFrame>()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "kgrav".to_string(),
                resolution,
                ..Default::default()
            }),
            ..Default::default()
        }))
        .add_systems(Startup, setup_particles_system)
        .add_systems(Update, (physics_step_system, record_frame_system, sync_transforms_system).chain())
        .run();
}

fn setup_particles_system(mut commands: Commands, scenario: Res<Scenario>, windows: Query<&Window>, mut meshes: ResMut<Assets<Mesh>>, mut materials: ResMut<Assets<ColorMaterial>>) {
    let bounds = scenario.system.bounds;
    info!("starting 2D viewer with {} particles", scenario.system.particles.len());

    // 2D camera looking at the world centre, zoomed out to fit
    let mut camera = Camera2dBundle::default();
    if let Ok(window) = windows.get_single() {
        camera.projection.scale = (bounds.x as f32) / window.width();
    }
    camera.transform.translation.x = (bounds.x * 0.5) as f32;
    camera.transform.translation.y = (bounds.y * 0.5) as f32;
    commands.spawn(camera);

    // One unit circle per particle, sized through its transform
    let unit = Mesh2dHandle(meshes.add(Circle::new(1.0)));
    let snapshot = scenario.snapshot();
    for (i, p) in snapshot.particles.iter().enumerate() {
        let mut transform = Transform::from_xyz(
            p.position.x as f32,
            (bounds.y - p.position.y) as f32,
            i as f32 * 1e-3, // later particles draw on top
        );
        transform.scale = Vec3::splat(p.visual_radius as f32);

        commands.spawn((
            MaterialMesh2dBundle {
                mesh: unit.clone(),
                material: materials.add(ColorMaterial::from(to_color(p.color))),
                transform,
                ..Default::default()
            },
            ParticleIndex(i),
        ));
    }
}

fn physics_step_system(mut scenario: ResMut<Scenario>) {
    // A halted scenario stays on screen with its last frame
    scenario.advance();
}

fn record_frame_system(scenario: Res<Scenario>, mut recorder: ResMut<FrameRecorder>, mut recorded: ResMut<RecordedFrame>) {
    let frame = scenario.system.frame;
    if frame == recorded.0 {
        return;
    }
    recorder.record(&scenario.snapshot());
    recorded.0 = frame;
}

fn sync_transforms_system(scenario: Res<Scenario>, mut query: Query<(&ParticleIndex, &mut Transform)>) {
    let system = &scenario.system;
    for (ParticleIndex(i), mut transform) in &mut query {
        if let Some(p) = system.particles.get(*i) {
            transform.translation.x = p.x.x as f32;
            transform.translation.y = (system.bounds.y - p.x.y) as f32;
            transform.scale = Vec3::splat((p.m * scenario.radius_scale) as f32);
        }
    }
}
