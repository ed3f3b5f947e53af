//! Property-based tests for the orbital core using proptest.
//!
//! These check the invariants that must hold for any frame sequence and any
//! (including degenerate) planet record.

use std::collections::HashMap;
use std::f64::consts::TAU;

use bevy::math::DVec3;
use proptest::prelude::*;

use crate::belt::calculate_belt_positions;
use crate::config::{BeltSettings, OrbitalConfig};
use crate::planets::PlanetData;

use super::{OrbitalMechanics, SceneTransform, SilentSink, angular_velocity, compute_orbital_parameters};

fn seeded(seed: u64) -> OrbitalMechanics {
    let mut mechanics =
        OrbitalMechanics::with_seed(OrbitalConfig::default(), seed).with_diagnostics(SilentSink);
    mechanics.init();
    mechanics
}

/// Any f64, weighted towards the awkward ones.
fn awkward_f64() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(0.0),
        Just(-0.0),
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
        Just(f64::MIN_POSITIVE),
        -1e6f64..1e6,
        any::<f64>(),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Simulated time never goes backwards, and a zero multiplier freezes it.
    #[test]
    fn prop_clock_is_monotonic(
        frames in prop::collection::vec((0.0f64..0.5, 0.0f64..8.0), 1..60),
    ) {
        let mut mechanics = seeded(1);
        let mut last = mechanics.elapsed_days();

        for (dt, speed) in frames {
            mechanics.update(dt, speed);
            let now = mechanics.elapsed_days();
            prop_assert!(now >= last, "time went from {} to {}", last, now);
            last = now;

            mechanics.update(dt, 0.0);
            prop_assert_eq!(mechanics.elapsed_days(), last);
        }
    }

    /// Orbital phase stays in [0, 2π) whatever the frame sequence.
    #[test]
    fn prop_angles_stay_wrapped(
        seed in any::<u64>(),
        period in 1.0f64..100_000.0,
        rotation in -6000.0f64..6000.0,
        frames in prop::collection::vec((0.0f64..5.0, 0.0f64..50.0), 1..100),
    ) {
        let mut mechanics = seeded(seed);
        let body = PlanetData::new("Body", 3.0, period, rotation);
        mechanics.add_orbiting_body(SceneTransform::default(), &body).unwrap();

        for (dt, speed) in frames {
            mechanics.update(dt, speed);
            let body = mechanics.get_planet("body").unwrap();
            prop_assert!((0.0..TAU).contains(&body.current_angle), "angle {}", body.current_angle);
            prop_assert!((0.0..TAU).contains(&body.rotation_angle), "spin {}", body.rotation_angle);
            prop_assert!(body.position().is_finite());
        }
    }

    /// Angular velocity is always inside the clamp, even for garbage periods.
    #[test]
    fn prop_angular_velocity_is_clamped(period in awkward_f64()) {
        let config = OrbitalConfig::default();
        let (min, max) = (config.animation.min_animation_speed, config.animation.max_animation_speed);
        let omega = angular_velocity(period, min, max);
        prop_assert!(omega.is_finite());
        prop_assert!(omega >= min && omega <= max, "omega {} for period {}", omega, period);
    }

    /// Derived parameters are finite for any record.
    #[test]
    fn prop_parameters_are_finite(
        distance in awkward_f64(),
        period in awkward_f64(),
        rotation in awkward_f64(),
        eccentricity in awkward_f64(),
    ) {
        let config = OrbitalConfig::default();
        let data = PlanetData::new("Rock", distance, period, rotation).with_eccentricity(eccentricity);
        let params = compute_orbital_parameters(&data, &config);

        prop_assert!(params.radius.is_finite() && params.radius >= config.scale.min_radius);
        prop_assert!(params.angular_velocity.is_finite());
        prop_assert!(params.rotation_velocity.is_finite());
        prop_assert!((0.0..1.0).contains(&params.eccentricity));
    }

    /// The belt band is valid for arbitrary reference positions.
    #[test]
    fn prop_belt_band_is_valid(
        mars in prop::option::of((awkward_f64(), awkward_f64(), awkward_f64())),
        jupiter in prop::option::of((awkward_f64(), awkward_f64(), awkward_f64())),
    ) {
        let mut positions = HashMap::new();
        if let Some((x, y, z)) = mars {
            positions.insert("mars".to_string(), DVec3::new(x, y, z));
        }
        if let Some((x, y, z)) = jupiter {
            positions.insert("jupiter".to_string(), DVec3::new(x, y, z));
        }

        let settings = BeltSettings::default();
        let bounds = calculate_belt_positions(&positions, &settings);

        prop_assert!(bounds.inner_radius.is_finite() && bounds.outer_radius.is_finite());
        prop_assert!(bounds.inner_reference_distance.is_finite());
        prop_assert!(bounds.outer_reference_distance.is_finite());
        prop_assert!(bounds.inner_radius > 0.0);
        prop_assert!(bounds.inner_radius < bounds.outer_radius);
        prop_assert!(
            bounds.width() >= settings.min_width,
            "width {} below minimum", bounds.width()
        );
    }
}
