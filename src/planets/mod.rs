//! Planet records consumed by the orbital core.
//!
//! Records are read-only input: the core never mutates them. They come either
//! from the built-in catalog ([`solar_system`]) or from JSON in the shape
//! served by the planet data API.

pub mod data;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{DAYS_PER_YEAR, HOURS_PER_DAY, SUN_KEY, body_key};

pub use data::solar_system;

#[derive(thiserror::Error, Debug)]
pub enum PlanetDataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid planet data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("planet data contains no bodies")]
    Empty,
}

/// Static description of one celestial body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanetData {
    pub name: String,
    /// Mean distance from the sun in AU.
    pub distance_from_sun: f64,
    /// Orbital period in Earth days.
    pub orbital_period: f64,
    /// Sidereal rotation period in hours. Negative means retrograde.
    pub rotation_period: f64,
    #[serde(default)]
    pub orbital_eccentricity: f64,
    /// Axial tilt in degrees.
    #[serde(default)]
    pub axial_tilt: f64,
    /// Equatorial diameter in km.
    #[serde(default)]
    pub diameter: f64,
    #[serde(default)]
    pub has_rings: bool,
    #[serde(default)]
    pub moon_count: u32,
    /// Display colour as `#RRGGBB`.
    #[serde(default)]
    pub color_hex: Option<String>,
}

impl PlanetData {
    /// Minimal record with the four fields the orbital core needs.
    pub fn new(
        name: impl Into<String>,
        distance_from_sun: f64,
        orbital_period: f64,
        rotation_period: f64,
    ) -> Self {
        Self {
            name: name.into(),
            distance_from_sun,
            orbital_period,
            rotation_period,
            orbital_eccentricity: 0.0,
            axial_tilt: 0.0,
            diameter: 0.0,
            has_rings: false,
            moon_count: 0,
            color_hex: None,
        }
    }

    pub fn with_eccentricity(mut self, eccentricity: f64) -> Self {
        self.orbital_eccentricity = eccentricity;
        self
    }

    /// Registry key (lowercase, trimmed name).
    pub fn key(&self) -> String {
        body_key(&self.name)
    }

    pub fn is_sun(&self) -> bool {
        self.key() == SUN_KEY
    }

    pub fn is_retrograde(&self) -> bool {
        self.rotation_period < 0.0
    }

    /// Orbital period in Earth years, rounded to two decimals.
    pub fn orbital_period_years(&self) -> f64 {
        round2(self.orbital_period / DAYS_PER_YEAR)
    }

    /// Rotation period in Earth days, rounded to two decimals (sign preserved).
    pub fn rotation_period_days(&self) -> f64 {
        round2(self.rotation_period / HOURS_PER_DAY)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Accepted JSON layouts: a bare array, or the API envelope `{ "planets": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum PlanetDocument {
    List(Vec<PlanetData>),
    Envelope { planets: Vec<PlanetData> },
}

/// Parse planet records from JSON.
pub fn parse_planets_json(json: &str) -> Result<Vec<PlanetData>, PlanetDataError> {
    let planets = match serde_json::from_str::<PlanetDocument>(json)? {
        PlanetDocument::List(planets) | PlanetDocument::Envelope { planets } => planets,
    };
    if planets.is_empty() {
        return Err(PlanetDataError::Empty);
    }
    Ok(planets)
}

/// Load planet records from a JSON file.
pub fn load_planets(path: impl AsRef<Path>) -> Result<Vec<PlanetData>, PlanetDataError> {
    let text = fs::read_to_string(path)?;
    parse_planets_json(&text)
}
