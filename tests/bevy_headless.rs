//! Headless Bevy integration tests.
//!
//! These tests verify the orbital plugin's resources and systems work
//! correctly without a GPU.

mod common;

use std::time::Duration;

use approx::assert_relative_eq;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use orrery::orbital::SceneTransform;
use orrery::planets::PlanetData;
use orrery::render::sync::{spin, tilt_of};
use orrery::render::{OrbitChild, OrbitalBody};
use orrery::simulation::{Belt, OrbitalPlugin, Orrery, reset_simulation};

use common::{SEED, earth, jupiter, mars};

const FRAME: Duration = Duration::from_millis(100);

fn create_minimal_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .add_plugins(OrbitalPlugin {
            seed: Some(SEED),
            ..default()
        });
    app
}

fn register(app: &mut App, transform: SceneTransform, data: &PlanetData) {
    app.world_mut()
        .resource_mut::<Orrery>()
        .add_orbiting_body(transform, data)
        .expect("body should register");
}

fn spawn_body(app: &mut App, key: &str) -> Entity {
    app.world_mut()
        .spawn((
            OrbitalBody {
                key: key.to_string(),
                axial_tilt: 0.0,
            },
            Transform::default(),
        ))
        .id()
}

#[test]
fn test_plugin_inserts_initialized_core() {
    let mut app = create_minimal_app();
    app.update();

    let orrery = app.world().resource::<Orrery>();
    assert!(orrery.is_initialized());
    assert_eq!(orrery.speed(), 1.0);
    assert!(app.world().get_resource::<Belt>().is_some());
}

#[test]
fn test_time_advances_with_frames() {
    let mut app = create_minimal_app();
    register(&mut app, SceneTransform::default(), &earth());

    for _ in 0..5 {
        app.update();
    }

    // The first frame has no delta; each later one adds 0.1 s at 20 days/s.
    let days = app.world().resource::<Orrery>().elapsed_days();
    assert!(days > 0.0, "simulation time should have advanced");
    assert!(days <= 5.0 * 2.0 + 1e-9);
}

#[test]
fn test_entity_follows_core_position() {
    let mut app = create_minimal_app();
    register(&mut app, SceneTransform::default(), &earth());
    let entity = spawn_body(&mut app, "earth");

    for _ in 0..3 {
        app.update();
    }

    let core = app
        .world()
        .resource::<Orrery>()
        .get_planet("earth")
        .map(|b| (b.position(), b.rotation_angle))
        .unwrap();
    let transform = app.world().get::<Transform>(entity).unwrap();
    assert!(transform.translation.distance(core.0.as_vec3()) < 1e-4);
    assert!(transform.rotation.angle_between(spin(0.0, core.1)) < 1e-4);
}

#[test]
fn test_attachment_shares_parent_spin() {
    let mut app = create_minimal_app();
    let saturn = PlanetData::new("Saturn", 9.537, 10759.22, 10.7);
    register(&mut app, SceneTransform::default().with_child("rings"), &saturn);
    let rings = app
        .world_mut()
        .spawn((
            OrbitChild {
                body: "saturn".to_string(),
                name: "rings".to_string(),
                base_rotation: Quat::IDENTITY,
            },
            Transform::default(),
        ))
        .id();

    for _ in 0..3 {
        app.update();
    }

    let orrery = app.world().resource::<Orrery>();
    let body = orrery.get_planet("saturn").unwrap();
    let ring_spin = body.transform.child("rings").unwrap().rotation_y;
    assert_eq!(ring_spin, body.rotation_angle);

    let transform = app.world().get::<Transform>(rings).unwrap();
    let expected = spin(tilt_of(body.data.axial_tilt), ring_spin);
    assert!(transform.rotation.angle_between(expected) < 1e-4);
    assert!(transform.translation.distance(body.position().as_vec3()) < 1e-4);
}

#[test]
fn test_zero_speed_freezes_everything() {
    let mut app = create_minimal_app();
    register(&mut app, SceneTransform::default(), &earth());
    let entity = spawn_body(&mut app, "earth");
    app.update();
    app.update();

    app.world_mut().resource_mut::<Orrery>().set_speed(0.0);
    let days = app.world().resource::<Orrery>().elapsed_days();
    let translation = app.world().get::<Transform>(entity).unwrap().translation;

    for _ in 0..5 {
        app.update();
    }

    assert_eq!(app.world().resource::<Orrery>().elapsed_days(), days);
    assert_eq!(
        app.world().get::<Transform>(entity).unwrap().translation,
        translation
    );
}

#[test]
fn test_belt_follows_reference_bodies() {
    let mut app = create_minimal_app();
    register(&mut app, SceneTransform::default(), &mars());
    register(&mut app, SceneTransform::default(), &jupiter());

    app.update();

    let belt = app.world().resource::<Belt>();
    let bounds = belt.bounds().expect("belt should be calculated");
    assert_relative_eq!(bounds.inner_radius, 22.04, epsilon = 1e-9);
    assert_relative_eq!(bounds.outer_radius, 44.04, epsilon = 1e-9);
    assert_eq!(belt.asteroids().len(), belt.settings().asteroid_count as usize);
}

#[test]
fn test_reset_rewinds_clock_and_rebuilds_belt() {
    let mut app = create_minimal_app();
    register(&mut app, SceneTransform::default(), &mars());
    register(&mut app, SceneTransform::default(), &jupiter());
    for _ in 0..4 {
        app.update();
    }
    let revision = app.world().resource::<Belt>().revision();

    app.world_mut()
        .resource_scope(|world, mut belt: Mut<Belt>| {
            let mut orrery = world.resource_mut::<Orrery>();
            reset_simulation(&mut orrery, &mut belt);
        });
    assert_eq!(app.world().resource::<Orrery>().elapsed_days(), 0.0);
    assert!(app.world().resource::<Belt>().bounds().is_none());

    app.update();
    let belt = app.world().resource::<Belt>();
    assert!(belt.bounds().is_some());
    assert!(belt.revision() > revision);
}
