//! Built-in solar system catalog.
//! Source: NASA planetary fact sheets (mean values).

use super::PlanetData;

struct Row {
    name: &'static str,
    distance_from_sun: f64,
    orbital_period: f64,
    rotation_period: f64,
    orbital_eccentricity: f64,
    axial_tilt: f64,
    diameter: f64,
    has_rings: bool,
    moon_count: u32,
    color_hex: &'static str,
}

const CATALOG: &[Row] = &[
    Row {
        name: "Sun",
        distance_from_sun: 0.0,
        orbital_period: 0.0,
        rotation_period: 609.12,
        orbital_eccentricity: 0.0,
        axial_tilt: 7.25,
        diameter: 1_392_700.0,
        has_rings: false,
        moon_count: 0,
        color_hex: "#FDB813",
    },
    Row {
        name: "Mercury",
        distance_from_sun: 0.387,
        orbital_period: 87.97,
        rotation_period: 1407.6,
        orbital_eccentricity: 0.206,
        axial_tilt: 0.034,
        diameter: 4879.0,
        has_rings: false,
        moon_count: 0,
        color_hex: "#8C7853",
    },
    Row {
        name: "Venus",
        distance_from_sun: 0.723,
        orbital_period: 224.7,
        rotation_period: -5832.5,
        orbital_eccentricity: 0.007,
        axial_tilt: 177.4,
        diameter: 12104.0,
        has_rings: false,
        moon_count: 0,
        color_hex: "#FC649F",
    },
    Row {
        name: "Earth",
        distance_from_sun: 1.0,
        orbital_period: 365.25,
        rotation_period: 23.93,
        orbital_eccentricity: 0.017,
        axial_tilt: 23.44,
        diameter: 12756.0,
        has_rings: false,
        moon_count: 1,
        color_hex: "#4F94CD",
    },
    Row {
        name: "Mars",
        distance_from_sun: 1.524,
        orbital_period: 686.98,
        rotation_period: 24.62,
        orbital_eccentricity: 0.094,
        axial_tilt: 25.19,
        diameter: 6792.0,
        has_rings: false,
        moon_count: 2,
        color_hex: "#CD5C5C",
    },
    Row {
        name: "Jupiter",
        distance_from_sun: 5.204,
        orbital_period: 4332.59,
        rotation_period: 9.93,
        orbital_eccentricity: 0.049,
        axial_tilt: 3.13,
        diameter: 142_984.0,
        has_rings: true,
        moon_count: 95,
        color_hex: "#D2691E",
    },
    Row {
        name: "Saturn",
        distance_from_sun: 9.537,
        orbital_period: 10759.22,
        rotation_period: 10.66,
        orbital_eccentricity: 0.057,
        axial_tilt: 26.73,
        diameter: 120_536.0,
        has_rings: true,
        moon_count: 146,
        color_hex: "#FAD5A5",
    },
    Row {
        name: "Uranus",
        distance_from_sun: 19.191,
        orbital_period: 30688.5,
        rotation_period: -17.24,
        orbital_eccentricity: 0.046,
        axial_tilt: 97.77,
        diameter: 51118.0,
        has_rings: true,
        moon_count: 28,
        color_hex: "#4FD0FF",
    },
    Row {
        name: "Neptune",
        distance_from_sun: 30.069,
        orbital_period: 60182.0,
        rotation_period: 16.11,
        orbital_eccentricity: 0.010,
        axial_tilt: 28.32,
        diameter: 49528.0,
        has_rings: true,
        moon_count: 16,
        color_hex: "#4169E1",
    },
    // Dwarf planet; tidally locked with Charon.
    Row {
        name: "Pluto",
        distance_from_sun: 39.482,
        orbital_period: 90560.0,
        rotation_period: -153.3,
        orbital_eccentricity: 0.244,
        axial_tilt: 119.6,
        diameter: 2376.0,
        has_rings: false,
        moon_count: 5,
        color_hex: "#EEE8AA",
    },
];

/// Sun, the eight planets, and Pluto, ordered outward from the sun.
pub fn solar_system() -> Vec<PlanetData> {
    CATALOG
        .iter()
        .map(|row| PlanetData {
            name: row.name.to_string(),
            distance_from_sun: row.distance_from_sun,
            orbital_period: row.orbital_period,
            rotation_period: row.rotation_period,
            orbital_eccentricity: row.orbital_eccentricity,
            axial_tilt: row.axial_tilt,
            diameter: row.diameter,
            has_rings: row.has_rings,
            moon_count: row.moon_count,
            color_hex: Some(row.color_hex.to_string()),
        })
        .collect()
}
