//! Randomized particle spawning
//!
//! Every randomized particle field is drawn as `base ± uniform(0, variance)`.
//! A zero variance returns the base without touching the generator, so fully
//! deterministic configurations produce identical particles.

use glam::{Vec2, Vec4};
use rand::Rng;
use sparkfx_config::{EmitterConfig, Jittered, MotionModel};

use crate::particle::Particle;

/// Sample a scalar in `[base - variance, base + variance]`
#[inline]
pub fn jitter<R: Rng>(rng: &mut R, value: Jittered<f32>) -> f32 {
    let variance = value.variance.abs();
    if variance == 0.0 {
        value.base
    } else {
        value.base + rng.random_range(-variance..=variance)
    }
}

/// Sample each axis of a vector independently
pub fn jitter_vec2<R: Rng>(rng: &mut R, value: Jittered<Vec2>) -> Vec2 {
    Vec2::new(
        jitter(rng, Jittered::new(value.base.x, value.variance.x)),
        jitter(rng, Jittered::new(value.base.y, value.variance.y)),
    )
}

/// Sample each color channel independently, clamped to `[0, 1]`
pub fn jitter_color<R: Rng>(rng: &mut R, value: Jittered<Vec4>) -> Vec4 {
    let channels: [f32; 4] = std::array::from_fn(|i| {
        jitter(rng, Jittered::new(value.base[i], value.variance[i]))
    });
    Vec4::from_array(channels).clamp(Vec4::ZERO, Vec4::ONE)
}

/// Create a new particle around `source_position`
///
/// The source position is passed separately from the configuration because
/// hosts may move an emitter at runtime; only the jitter comes from the
/// configuration.
pub fn spawn_particle<R: Rng>(
    config: &EmitterConfig,
    source_position: Vec2,
    rng: &mut R,
) -> Particle {
    let position = jitter_vec2(
        rng,
        Jittered::new(source_position, config.source_position().variance),
    );
    let angle = jitter(rng, config.angle()).to_radians();

    let time_to_live = jitter(rng, config.lifespan()).max(0.0);
    let per_second = |total: f32| {
        if time_to_live > 0.0 {
            total / time_to_live
        } else {
            0.0
        }
    };

    let start_color = jitter_color(rng, config.start_color());
    let finish_color = jitter_color(rng, config.finish_color());
    let start_size = jitter(rng, config.start_size()).max(0.0);
    let finish_size = jitter(rng, config.finish_size()).max(0.0);

    let mut particle = Particle {
        position,
        color: start_color,
        delta_color: if time_to_live > 0.0 {
            (finish_color - start_color) / time_to_live
        } else {
            Vec4::ZERO
        },
        size: start_size,
        size_delta: per_second(finish_size - start_size),
        time_to_live,
        ..Default::default()
    };

    match config.motion() {
        MotionModel::Linear { .. } => {
            let speed = jitter(rng, config.speed());
            particle.direction = Vec2::from_angle(angle) * speed;
        }
        MotionModel::Radial(radial) => {
            let radius = jitter(rng, radial.max_radius).max(0.0);
            particle.radius = radius;
            particle.radius_delta = if radial.radius_speed > 0.0 {
                -radial.radius_speed
            } else {
                per_second(radial.min_radius - radius)
            };
            particle.angle = angle;
            particle.degrees_per_second = jitter(rng, radial.rotate_per_second).to_radians();
            particle.position = source_position + Vec2::from_angle(angle) * radius;
        }
    }

    particle
}
