//! Validated, immutable emitter configuration

use std::path::Path;

use glam::{Vec2, Vec4};

use crate::document::EmitterDocument;
use crate::error::{ConfigError, Result};
use crate::source::{AssetResolver, ConfigSource, SourceKind};

/// Largest accepted pool capacity
///
/// Pools and sprite buffers are allocated up front, so the capacity is bounded
/// to keep a bad document from requesting gigabytes.
pub const MAX_PARTICLES_LIMIT: u32 = 1 << 20;

/// A base value with a symmetric random jitter
///
/// Sampling yields a value in `[base - variance, base + variance]`. The
/// variance is never negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jittered<T> {
    /// Base value
    pub base: T,
    /// Maximum deviation from the base in either direction
    pub variance: T,
}

impl<T> Jittered<T> {
    /// Create a new jittered value
    pub const fn new(base: T, variance: T) -> Self {
        Self { base, variance }
    }
}

impl Jittered<f32> {
    /// A value without jitter
    pub const fn fixed(base: f32) -> Self {
        Self::new(base, 0.0)
    }

    /// Smallest value sampling can produce
    pub fn min(&self) -> f32 {
        self.base - self.variance
    }

    /// Largest value sampling can produce
    pub fn max(&self) -> f32 {
        self.base + self.variance
    }
}

/// Parameters of the radial (portal) motion model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialMotion {
    /// Radius at which particles are born
    pub max_radius: Jittered<f32>,
    /// Radius below which a particle dies
    pub min_radius: f32,
    /// Inward speed in units per second; zero means "reach min_radius at expiry"
    pub radius_speed: f32,
    /// Rotation around the source in degrees per second
    pub rotate_per_second: Jittered<f32>,
}

/// How particles move once spawned
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionModel {
    /// Initial velocity plus constant acceleration
    Linear {
        /// Acceleration applied every second
        gravity: Vec2,
    },
    /// Rotation around the source point on a shrinking or growing radius
    Radial(RadialMotion),
}

impl MotionModel {
    /// Short name for diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            MotionModel::Linear { .. } => "linear",
            MotionModel::Radial(_) => "radial",
        }
    }
}

/// Emitter configuration
///
/// Built once from a document and never mutated afterwards. Emitters keep
/// their own clone, so several emitters created from the same source do not
/// influence each other.
#[derive(Debug, Clone, PartialEq)]
pub struct EmitterConfig {
    source_position: Jittered<Vec2>,
    angle: Jittered<f32>,
    speed: Jittered<f32>,
    motion: MotionModel,
    lifespan: Jittered<f32>,
    start_color: Jittered<Vec4>,
    finish_color: Jittered<Vec4>,
    start_size: Jittered<f32>,
    finish_size: Jittered<f32>,
    max_particles: usize,
    emission_rate: f32,
    duration: Option<f32>,
    blend_additive: bool,
    use_texture: bool,
    texture: Option<String>,
}

impl EmitterConfig {
    /// Load a configuration by name and type tag through a resolver
    ///
    /// ```
    /// use sparkfx_config::{EmitterConfig, MemoryResolver, SourceKind};
    ///
    /// let resolver = MemoryResolver::new().with(
    ///     "puff",
    ///     SourceKind::Yaml,
    ///     "
    /// sourcePosition: {x: 0, y: 0}
    /// sourcePositionVariance: {x: 0, y: 0}
    /// angle: 90
    /// angleVariance: 10
    /// speed: 20
    /// speedVariance: 5
    /// gravity: {x: 0, y: 0}
    /// particleLifespan: 2
    /// particleLifespanVariance: 0
    /// startColor: {red: 1, green: 1, blue: 1, alpha: 1}
    /// startColorVariance: {red: 0, green: 0, blue: 0, alpha: 0}
    /// finishColor: {red: 1, green: 1, blue: 1, alpha: 0}
    /// finishColorVariance: {red: 0, green: 0, blue: 0, alpha: 0}
    /// startParticleSize: 8
    /// startParticleSizeVariance: 0
    /// finishParticleSize: 2
    /// finishParticleSizeVariance: 0
    /// maxParticles: 40
    /// duration: -1
    /// ",
    /// );
    ///
    /// let config = EmitterConfig::load(&resolver, "puff", "yaml").unwrap();
    /// assert_eq!(config.max_particles(), 40);
    /// assert_eq!(config.emission_rate(), 20.0);
    /// assert_eq!(config.duration(), None);
    /// ```
    pub fn load<R: AssetResolver + ?Sized>(resolver: &R, name: &str, tag: &str) -> Result<Self> {
        let source = ConfigSource::parse(name, tag)?;
        Self::load_source(resolver, &source)
    }

    /// Load a configuration from an already parsed source
    pub fn load_source<R: AssetResolver + ?Sized>(
        resolver: &R,
        source: &ConfigSource,
    ) -> Result<Self> {
        let bytes = resolver.load(source)?;
        log::debug!("Parsing emitter configuration {source}");
        Self::from_slice(&bytes, source.kind)
    }

    /// Parse a configuration from raw document bytes
    pub fn from_slice(bytes: &[u8], kind: SourceKind) -> Result<Self> {
        let document: EmitterDocument = match kind {
            SourceKind::Json => serde_json::from_slice(bytes)?,
            SourceKind::Yaml => serde_yaml_ng::from_slice(bytes)?,
        };
        Self::try_from(document)
    }

    /// Read a configuration file, taking the format from its extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let kind = SourceKind::from_path(path)?;
        let bytes = std::fs::read(path)?;
        Self::from_slice(&bytes, kind)
    }

    /// Spawn position and per-axis jitter
    pub fn source_position(&self) -> Jittered<Vec2> {
        self.source_position
    }

    /// Emission angle in degrees
    pub fn angle(&self) -> Jittered<f32> {
        self.angle
    }

    /// Initial speed (linear model)
    pub fn speed(&self) -> Jittered<f32> {
        self.speed
    }

    /// Motion model chosen at load time
    pub fn motion(&self) -> &MotionModel {
        &self.motion
    }

    /// Gravity of the linear model, zero for radial emitters
    pub fn gravity(&self) -> Vec2 {
        match self.motion {
            MotionModel::Linear { gravity } => gravity,
            MotionModel::Radial(_) => Vec2::ZERO,
        }
    }

    /// Particle lifespan in seconds
    pub fn lifespan(&self) -> Jittered<f32> {
        self.lifespan
    }

    /// Color at birth
    pub fn start_color(&self) -> Jittered<Vec4> {
        self.start_color
    }

    /// Color at expiry
    pub fn finish_color(&self) -> Jittered<Vec4> {
        self.finish_color
    }

    /// Size at birth
    pub fn start_size(&self) -> Jittered<f32> {
        self.start_size
    }

    /// Size at expiry
    pub fn finish_size(&self) -> Jittered<f32> {
        self.finish_size
    }

    /// Pool capacity
    pub fn max_particles(&self) -> usize {
        self.max_particles
    }

    /// Particles spawned per second while active
    pub fn emission_rate(&self) -> f32 {
        self.emission_rate
    }

    /// Seconds of emission before the emitter stops, `None` for unlimited
    pub fn duration(&self) -> Option<f32> {
        self.duration
    }

    /// Whether particles should be drawn with additive blending
    pub fn blend_additive(&self) -> bool {
        self.blend_additive
    }

    /// Whether particles should be drawn textured
    pub fn use_texture(&self) -> bool {
        self.use_texture
    }

    /// Name of the particle texture, if any
    pub fn texture(&self) -> Option<&str> {
        self.texture.as_deref()
    }
}

impl TryFrom<EmitterDocument> for EmitterConfig {
    type Error = ConfigError;

    fn try_from(doc: EmitterDocument) -> Result<Self> {
        let scalars = [
            ("sourcePosition", doc.source_position.x),
            ("sourcePosition", doc.source_position.y),
            ("sourcePositionVariance", doc.source_position_variance.x),
            ("sourcePositionVariance", doc.source_position_variance.y),
            ("angle", doc.angle),
            ("angleVariance", doc.angle_variance),
            ("speed", doc.speed),
            ("speedVariance", doc.speed_variance),
            ("gravity", doc.gravity.x),
            ("gravity", doc.gravity.y),
            ("particleLifespan", doc.particle_lifespan),
            ("particleLifespanVariance", doc.particle_lifespan_variance),
            ("startParticleSize", doc.start_particle_size),
            ("startParticleSizeVariance", doc.start_particle_size_variance),
            ("finishParticleSize", doc.finish_particle_size),
            ("finishParticleSizeVariance", doc.finish_particle_size_variance),
            ("duration", doc.duration),
            ("maxRadius", doc.max_radius),
            ("maxRadiusVariance", doc.max_radius_variance),
            ("minRadius", doc.min_radius),
            ("radiusSpeed", doc.radius_speed),
            ("rotatePerSecond", doc.rotate_per_second),
            ("rotatePerSecondVariance", doc.rotate_per_second_variance),
        ];
        for (field, value) in scalars {
            ensure_finite(field, value)?;
        }

        let colors = [
            ("startColor", Vec4::from(doc.start_color)),
            ("startColorVariance", Vec4::from(doc.start_color_variance)),
            ("finishColor", Vec4::from(doc.finish_color)),
            ("finishColorVariance", Vec4::from(doc.finish_color_variance)),
        ];
        for (field, color) in colors {
            if !color.is_finite() {
                return Err(ConfigError::invalid(field, "color channels must be finite"));
            }
        }

        if doc.max_particles == 0 {
            return Err(ConfigError::invalid(
                "maxParticles",
                "must be greater than zero",
            ));
        }
        if doc.max_particles > MAX_PARTICLES_LIMIT {
            return Err(ConfigError::invalid(
                "maxParticles",
                format!(
                    "{} exceeds the limit of {MAX_PARTICLES_LIMIT}",
                    doc.max_particles
                ),
            ));
        }

        let emission_rate = match doc.emission_rate {
            Some(rate) if !rate.is_finite() || rate < 0.0 => {
                return Err(ConfigError::invalid(
                    "emissionRate",
                    format!("{rate} is not a non-negative number"),
                ));
            }
            Some(rate) => rate,
            None if doc.particle_lifespan > 0.0 => {
                doc.max_particles as f32 / doc.particle_lifespan
            }
            None => {
                return Err(ConfigError::invalid(
                    "emissionRate",
                    "missing, and cannot be derived from a non-positive particleLifespan",
                ));
            }
        };

        let motion = if doc.max_radius > 0.0 {
            if doc.min_radius < 0.0 {
                return Err(ConfigError::invalid("minRadius", "must not be negative"));
            }
            if doc.min_radius > doc.max_radius {
                return Err(ConfigError::invalid(
                    "minRadius",
                    format!(
                        "{} is larger than maxRadius {}",
                        doc.min_radius, doc.max_radius
                    ),
                ));
            }
            MotionModel::Radial(RadialMotion {
                max_radius: Jittered::new(
                    doc.max_radius,
                    variance("maxRadiusVariance", doc.max_radius_variance),
                ),
                min_radius: doc.min_radius,
                radius_speed: doc.radius_speed.max(0.0),
                rotate_per_second: Jittered::new(
                    doc.rotate_per_second,
                    variance("rotatePerSecondVariance", doc.rotate_per_second_variance),
                ),
            })
        } else {
            MotionModel::Linear {
                gravity: doc.gravity.into(),
            }
        };

        let config = Self {
            source_position: Jittered::new(
                doc.source_position.into(),
                vec2_variance("sourcePositionVariance", doc.source_position_variance.into()),
            ),
            angle: Jittered::new(doc.angle, variance("angleVariance", doc.angle_variance)),
            speed: Jittered::new(doc.speed, variance("speedVariance", doc.speed_variance)),
            motion,
            lifespan: Jittered::new(
                doc.particle_lifespan,
                variance("particleLifespanVariance", doc.particle_lifespan_variance),
            ),
            start_color: Jittered::new(
                doc.start_color.into(),
                color_variance("startColorVariance", doc.start_color_variance.into()),
            ),
            finish_color: Jittered::new(
                doc.finish_color.into(),
                color_variance("finishColorVariance", doc.finish_color_variance.into()),
            ),
            start_size: Jittered::new(
                doc.start_particle_size,
                variance(
                    "startParticleSizeVariance",
                    doc.start_particle_size_variance,
                ),
            ),
            finish_size: Jittered::new(
                doc.finish_particle_size,
                variance(
                    "finishParticleSizeVariance",
                    doc.finish_particle_size_variance,
                ),
            ),
            max_particles: doc.max_particles as usize,
            emission_rate,
            duration: (doc.duration >= 0.0).then_some(doc.duration),
            blend_additive: doc.blend_additive,
            use_texture: doc.use_texture,
            texture: doc.texture,
        };

        log::debug!(
            "Emitter configuration: {} particles, {:.2}/s, {} motion",
            config.max_particles,
            config.emission_rate,
            config.motion.name()
        );

        Ok(config)
    }
}

impl Default for EmitterConfig {
    fn default() -> Self {
        // The default document always passes validation
        match Self::try_from(EmitterDocument::default()) {
            Ok(config) => config,
            Err(e) => unreachable!("default emitter document is invalid: {e}"),
        }
    }
}

fn ensure_finite(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} is not finite")))
    }
}

/// Normalize a variance to be non-negative
fn variance(field: &'static str, value: f32) -> f32 {
    if value < 0.0 {
        log::warn!("Negative {field} ({value}) normalized to {}", -value);
        -value
    } else {
        value
    }
}

/// Normalize a per-axis variance to be non-negative
fn vec2_variance(field: &'static str, value: Vec2) -> Vec2 {
    if value.cmplt(Vec2::ZERO).any() {
        log::warn!("Negative {field} ({value}) normalized to {}", value.abs());
    }
    value.abs()
}

/// Normalize a per-channel color variance to be non-negative
fn color_variance(field: &'static str, value: Vec4) -> Vec4 {
    if value.cmplt(Vec4::ZERO).any() {
        log::warn!("Negative {field} ({value}) normalized to {}", value.abs());
    }
    value.abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Point2, Rgba};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = EmitterConfig::default();
        assert_eq!(config.max_particles(), 100);
        assert_eq!(config.emission_rate(), 100.0);
        assert_eq!(config.duration(), None);
        assert_eq!(config.motion().name(), "linear");
    }

    #[test]
    fn test_emission_rate_derived_from_lifespan() {
        let doc = EmitterDocument {
            max_particles: 50,
            particle_lifespan: 2.0,
            ..Default::default()
        };
        let config = EmitterConfig::try_from(doc).unwrap();
        assert_eq!(config.emission_rate(), 25.0);
    }

    #[test]
    fn test_emission_rate_cannot_be_derived() {
        let doc = EmitterDocument {
            particle_lifespan: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            EmitterConfig::try_from(doc),
            Err(ConfigError::InvalidField {
                field: "emissionRate",
                ..
            })
        ));
    }

    #[test]
    fn test_explicit_emission_rate_wins() {
        let doc = EmitterDocument {
            emission_rate: Some(0.5),
            ..Default::default()
        };
        assert_eq!(EmitterConfig::try_from(doc).unwrap().emission_rate(), 0.5);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let doc = EmitterDocument {
            max_particles: 0,
            ..Default::default()
        };
        assert!(matches!(
            EmitterConfig::try_from(doc),
            Err(ConfigError::InvalidField {
                field: "maxParticles",
                ..
            })
        ));
    }

    #[test]
    fn test_oversized_capacity_rejected() {
        let doc = EmitterDocument {
            max_particles: 4_000_000_000,
            ..Default::default()
        };
        assert!(matches!(
            EmitterConfig::try_from(doc),
            Err(ConfigError::InvalidField {
                field: "maxParticles",
                ..
            })
        ));

        let doc = EmitterDocument {
            max_particles: MAX_PARTICLES_LIMIT,
            ..Default::default()
        };
        assert_eq!(
            EmitterConfig::try_from(doc).unwrap().max_particles(),
            MAX_PARTICLES_LIMIT as usize
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        let doc = EmitterDocument {
            speed: f32::NAN,
            ..Default::default()
        };
        assert!(EmitterConfig::try_from(doc).is_err());

        let doc = EmitterDocument {
            start_color: Rgba::new(1.0, f32::INFINITY, 1.0, 1.0),
            ..Default::default()
        };
        assert!(matches!(
            EmitterConfig::try_from(doc),
            Err(ConfigError::InvalidField {
                field: "startColor",
                ..
            })
        ));
    }

    #[test]
    fn test_negative_variance_normalized() {
        let doc = EmitterDocument {
            speed_variance: -3.0,
            source_position_variance: Point2::new(-2.0, 4.0),
            ..Default::default()
        };
        let config = EmitterConfig::try_from(doc).unwrap();
        assert_eq!(config.speed().variance, 3.0);
        assert_eq!(config.source_position().variance, Vec2::new(2.0, 4.0));
    }

    #[test]
    fn test_negative_color_variance_normalized() {
        let doc = EmitterDocument {
            start_color_variance: Rgba::new(-0.25, 0.0, 0.5, 0.0),
            finish_color_variance: Rgba::new(0.0, -0.5, 0.0, -1.0),
            ..Default::default()
        };
        let config = EmitterConfig::try_from(doc).unwrap();
        assert_eq!(config.start_color().variance, Vec4::new(0.25, 0.0, 0.5, 0.0));
        assert_eq!(config.finish_color().variance, Vec4::new(0.0, 0.5, 0.0, 1.0));
    }

    #[test]
    fn test_negative_duration_is_unlimited() {
        let doc = EmitterDocument {
            duration: 0.75,
            ..Default::default()
        };
        assert_eq!(EmitterConfig::try_from(doc).unwrap().duration(), Some(0.75));

        let doc = EmitterDocument {
            duration: -1.0,
            ..Default::default()
        };
        assert_eq!(EmitterConfig::try_from(doc).unwrap().duration(), None);
    }

    #[test]
    fn test_radial_model_selected_by_max_radius() {
        let doc = EmitterDocument {
            max_radius: 100.0,
            max_radius_variance: 5.0,
            min_radius: 10.0,
            rotate_per_second: 90.0,
            gravity: Point2::new(0.0, -9.8),
            ..Default::default()
        };
        let config = EmitterConfig::try_from(doc).unwrap();

        let MotionModel::Radial(radial) = config.motion() else {
            panic!("expected radial motion, got {:?}", config.motion());
        };
        assert_eq!(radial.max_radius, Jittered::new(100.0, 5.0));
        assert_eq!(radial.min_radius, 10.0);
        assert_eq!(radial.rotate_per_second, Jittered::fixed(90.0));
        // Gravity is meaningless for radial emitters
        assert_eq!(config.gravity(), Vec2::ZERO);
    }

    #[test]
    fn test_radial_min_radius_above_max_rejected() {
        let doc = EmitterDocument {
            max_radius: 10.0,
            min_radius: 20.0,
            ..Default::default()
        };
        assert!(matches!(
            EmitterConfig::try_from(doc),
            Err(ConfigError::InvalidField {
                field: "minRadius",
                ..
            })
        ));
    }

    #[test]
    fn test_jittered_bounds() {
        let value = Jittered::new(10.0, 2.5);
        assert_eq!(value.min(), 7.5);
        assert_eq!(value.max(), 12.5);
        assert_eq!(Jittered::fixed(3.0).min(), 3.0);
    }
}
