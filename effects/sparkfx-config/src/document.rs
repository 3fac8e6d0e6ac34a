//! Serde model of an emitter configuration document
//!
//! The document mirrors the key/value layout of emitter files: flat camelCase
//! keys, points as `{x, y}` and colors as `{red, green, blue, alpha}`. It is
//! only an intermediate form; [`EmitterConfig`](crate::EmitterConfig) is built
//! from it through `TryFrom`, which is where validation happens.

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

/// A 2-D point as written in configuration documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point2 {
    /// Create a new point
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<Point2> for Vec2 {
    fn from(p: Point2) -> Self {
        Vec2::new(p.x, p.y)
    }
}

/// A 4-channel color as written in configuration documents
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red channel (0.0-1.0)
    pub red: f32,
    /// Green channel (0.0-1.0)
    pub green: f32,
    /// Blue channel (0.0-1.0)
    pub blue: f32,
    /// Alpha channel (0.0-1.0)
    pub alpha: f32,
}

impl Rgba {
    /// Create a new color
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }
}

impl From<Rgba> for Vec4 {
    fn from(c: Rgba) -> Self {
        Vec4::new(c.red, c.green, c.blue, c.alpha)
    }
}

/// Raw emitter document
///
/// Every field listed without `#[serde(default)]` is required; a document
/// missing one of them fails to deserialize. `Default` is provided for
/// building configurations in code and does not affect deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmitterDocument {
    pub source_position: Point2,
    pub source_position_variance: Point2,
    /// Emission angle in degrees
    pub angle: f32,
    pub angle_variance: f32,
    pub speed: f32,
    pub speed_variance: f32,
    pub gravity: Point2,
    pub particle_lifespan: f32,
    pub particle_lifespan_variance: f32,
    pub start_color: Rgba,
    pub start_color_variance: Rgba,
    pub finish_color: Rgba,
    pub finish_color_variance: Rgba,
    pub start_particle_size: f32,
    pub start_particle_size_variance: f32,
    pub finish_particle_size: f32,
    pub finish_particle_size_variance: f32,
    pub max_particles: u32,
    /// Particles per second; derived from `max_particles / particle_lifespan` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emission_rate: Option<f32>,
    /// Seconds the emitter stays active; negative means unlimited
    pub duration: f32,
    #[serde(default)]
    pub blend_additive: bool,
    #[serde(default)]
    pub use_texture: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,

    // Radial motion, only used when max_radius is positive
    #[serde(default)]
    pub max_radius: f32,
    #[serde(default)]
    pub max_radius_variance: f32,
    #[serde(default)]
    pub min_radius: f32,
    #[serde(default)]
    pub radius_speed: f32,
    /// Degrees per second
    #[serde(default)]
    pub rotate_per_second: f32,
    #[serde(default)]
    pub rotate_per_second_variance: f32,
}

impl Default for EmitterDocument {
    fn default() -> Self {
        Self {
            source_position: Point2::default(),
            source_position_variance: Point2::default(),
            angle: 90.0,
            angle_variance: 0.0,
            speed: 0.0,
            speed_variance: 0.0,
            gravity: Point2::default(),
            particle_lifespan: 1.0,
            particle_lifespan_variance: 0.0,
            start_color: Rgba::new(1.0, 1.0, 1.0, 1.0),
            start_color_variance: Rgba::default(),
            finish_color: Rgba::new(1.0, 1.0, 1.0, 0.0),
            finish_color_variance: Rgba::default(),
            start_particle_size: 16.0,
            start_particle_size_variance: 0.0,
            finish_particle_size: 16.0,
            finish_particle_size_variance: 0.0,
            max_particles: 100,
            emission_rate: None,
            duration: -1.0,
            blend_additive: false,
            use_texture: false,
            texture: None,
            max_radius: 0.0,
            max_radius_variance: 0.0,
            min_radius: 0.0,
            radius_speed: 0.0,
            rotate_per_second: 0.0,
            rotate_per_second_variance: 0.0,
        }
    }
}
