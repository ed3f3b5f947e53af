//! Orrery - Animated Solar System
//!
//! A library crate providing the orbital animation core and its Bevy
//! integration, for testing and embedding.

pub mod belt;
pub mod camera;
pub mod config;
pub mod input;
pub mod orbital;
pub mod planets;
pub mod render;
pub mod simulation;
pub mod types;
pub mod ui;
