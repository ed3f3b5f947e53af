//! Asteroid belt rendering.
//!
//! The belt band is recalculated by the simulation after every frame's
//! positions are committed; this draws the current scatter as small markers
//! plus faint guides at the band edges.

use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::simulation::{Belt, OrbitalSet};

/// Segments used for the band edge guides.
const EDGE_SEGMENTS: usize = 96;

/// Plugin providing asteroid belt visualization.
pub struct BeltRenderPlugin;

impl Plugin for BeltRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BeltRenderSettings>()
            .add_systems(Update, draw_asteroid_belt.after(OrbitalSet::Dependents));
    }
}

/// Settings for belt rendering.
#[derive(Resource)]
pub struct BeltRenderSettings {
    pub visible: bool,
    pub show_edges: bool,
    pub color: Color,
}

impl Default for BeltRenderSettings {
    fn default() -> Self {
        Self {
            visible: true,
            show_edges: false,
            color: Color::srgba(0.65, 0.6, 0.55, 0.8),
        }
    }
}

fn draw_asteroid_belt(mut gizmos: Gizmos, belt: Res<Belt>, settings: Res<BeltRenderSettings>) {
    if !settings.visible {
        return;
    }

    for asteroid in belt.asteroids() {
        let center = asteroid.position.as_vec3();
        let dx = Vec3::X * asteroid.radius;
        let dz = Vec3::Z * asteroid.radius;
        gizmos.line(center - dx, center + dx, settings.color);
        gizmos.line(center - dz, center + dz, settings.color);
    }

    if settings.show_edges {
        if let Some(bounds) = belt.bounds() {
            let guide = settings.color.with_alpha(0.15);
            for radius in [bounds.inner_radius as f32, bounds.outer_radius as f32] {
                gizmos.linestrip(circle_points(radius), guide);
            }
        }
    }
}

/// Closed circle in the XZ plane.
fn circle_points(radius: f32) -> impl Iterator<Item = Vec3> {
    (0..=EDGE_SEGMENTS).map(move |i| {
        let theta = TAU * i as f32 / EDGE_SEGMENTS as f32;
        Vec3::new(theta.cos() * radius, 0.0, theta.sin() * radius)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_is_closed() {
        let points: Vec<Vec3> = circle_points(10.0).collect();
        assert_eq!(points.len(), EDGE_SEGMENTS + 1);
        assert!(points[0].distance(points[EDGE_SEGMENTS]) < 1e-4);
        assert!(points.iter().all(|p| (p.length() - 10.0).abs() < 1e-4));
    }
}
