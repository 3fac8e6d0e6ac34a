//! Emitter configuration for sparkfx particle effects.
//!
//! An emitter configuration is a bag of emission parameters (rates,
//! variances, color ramps and the motion model) read once from a named
//! source. This crate owns the document format, validation and the resolvers
//! that locate sources; the simulation itself lives in `sparkfx-particles`.
//!
//! # Examples
//!
//! ```no_run
//! use sparkfx_config::{DirectoryResolver, EmitterConfig, MotionModel};
//!
//! let resolver = DirectoryResolver::new("assets/effects");
//! let config = EmitterConfig::load(&resolver, "portal", "json")?;
//!
//! if let MotionModel::Radial(radial) = config.motion() {
//!     println!("portal collapses to radius {}", radial.min_radius);
//! }
//! # Ok::<(), sparkfx_config::ConfigError>(())
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod document;
pub mod error;
pub mod source;

pub use config::{EmitterConfig, Jittered, MAX_PARTICLES_LIMIT, MotionModel, RadialMotion};
pub use document::{EmitterDocument, Point2, Rgba};
pub use error::{ConfigError, Result};
pub use source::{AssetResolver, ConfigSource, DirectoryResolver, MemoryResolver, SourceKind};
