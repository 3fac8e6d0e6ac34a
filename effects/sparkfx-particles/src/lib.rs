//! Particle simulation for sparkfx effects.
//!
//! A [`ParticleEmitter`] owns a fixed pool of particles and, once per frame,
//! spawns new particles at the configured rate, advances the live ones under
//! a linear (gravity) or radial (orbit) motion model, retires the dead ones
//! and rebuilds a point sprite buffer that a [`RenderBackend`] can draw.
//!
//! # Examples
//!
//! ```
//! use sparkfx_particles::{EmitterConfig, ParticleEmitter};
//!
//! let mut emitter = ParticleEmitter::seeded(EmitterConfig::default(), 7);
//! for _ in 0..60 {
//!     emitter.update(1.0 / 60.0);
//! }
//!
//! assert!(emitter.particle_count() <= emitter.max_particles());
//! assert_eq!(emitter.sprites().len(), emitter.particle_count());
//! ```

#![forbid(unsafe_code)]

pub mod emitter;
pub mod particle;
pub mod pool;
pub mod render;
pub mod sampling;
pub mod sprite;
pub mod timestep;

/// Tolerance for lifetime, radius and emission comparisons
pub(crate) const SIMULATION_EPSILON: f32 = 1.0e-4;

pub use emitter::{EmitterStats, ParticleEmitter};
pub use particle::{Particle, Retirement};
pub use pool::ParticlePool;
pub use render::{BlendMode, BufferHandle, RenderBackend, RenderHints, SpriteBatch};
pub use sprite::{PointSprite, SpriteBuffer};
pub use timestep::{MAXIMUM_UPDATE_RATE, substeps};

pub use sparkfx_config::{
    AssetResolver, ConfigError, DirectoryResolver, EmitterConfig, MemoryResolver, MotionModel,
};
