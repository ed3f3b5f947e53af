//! Camera system for the orrery.
//!
//! A perspective camera orbiting the Sun, looking down on the ecliptic.
//! Scroll to zoom, drag with the right mouse button to swing around.

use bevy::{
    input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll},
    prelude::*,
};

/// Closest camera distance from the Sun.
pub const MIN_DISTANCE: f32 = 10.0;

/// Furthest camera distance from the Sun.
pub const MAX_DISTANCE: f32 = 600.0;

/// Default distance, framing everything out to Jupiter.
pub const DEFAULT_DISTANCE: f32 = 120.0;

/// Zoom speed multiplier for scroll wheel.
pub const ZOOM_SPEED: f32 = 0.1;

/// Radians of swing per pixel of drag.
pub const ORBIT_SPEED: f32 = 0.005;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Resource tracking camera state.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CameraState {
    pub distance: f32,
    /// Angle around the vertical axis.
    pub yaw: f32,
    /// Angle above the ecliptic.
    pub pitch: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            distance: DEFAULT_DISTANCE,
            yaw: 0.0,
            pitch: 0.9,
        }
    }
}

impl CameraState {
    /// Camera transform for the current state, always looking at the Sun.
    pub fn transform(&self) -> Transform {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let eye = Vec3::new(
            cos_pitch * sin_yaw,
            sin_pitch,
            cos_pitch * cos_yaw,
        ) * self.distance;
        Transform::from_translation(eye).looking_at(Vec3::ZERO, Vec3::Y)
    }

    /// Multiplicative zoom, clamped to the allowed range.
    pub fn zoom(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
        }
    }
}

/// Plugin providing camera functionality.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraState>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, (camera_zoom, camera_orbit, apply_camera_state).chain());
    }
}

/// Spawn the main camera.
fn setup_camera(mut commands: Commands, state: Res<CameraState>) {
    commands.spawn((Camera3d::default(), state.transform(), MainCamera));
}

/// Handle mouse scroll wheel for zoom.
fn camera_zoom(mouse_scroll: Res<AccumulatedMouseScroll>, mut state: ResMut<CameraState>) {
    if mouse_scroll.delta.y == 0.0 {
        return;
    }
    state.zoom(1.0 - mouse_scroll.delta.y * ZOOM_SPEED);
}

/// Handle right mouse button drag for swinging around the Sun.
fn camera_orbit(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mut state: ResMut<CameraState>,
) {
    if !mouse_buttons.pressed(MouseButton::Right) || mouse_motion.delta == Vec2::ZERO {
        return;
    }
    state.yaw -= mouse_motion.delta.x * ORBIT_SPEED;
    state.pitch = (state.pitch + mouse_motion.delta.y * ORBIT_SPEED).clamp(0.05, 1.5);
}

fn apply_camera_state(
    state: Res<CameraState>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    if !state.is_changed() {
        return;
    }
    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };
    *transform = state.transform();
}
