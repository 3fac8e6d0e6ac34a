//! Individual particle representation

use glam::{Vec2, Vec4};
use sparkfx_config::MotionModel;

use crate::SIMULATION_EPSILON;

/// Why a particle left the live set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retirement {
    /// Its time to live ran out
    Expired,
    /// Its radius shrank to the minimum radius (radial motion only)
    Collapsed,
}

/// A single particle in the pool
///
/// Fields are interpreted according to the emitter's [`MotionModel`]: the
/// linear model moves `position` by `direction`, the radial model derives
/// `position` from `angle` and `radius` around the emitter's source.
///
/// A particle is live while `time_to_live` exceeds `1e-4` seconds, not zero:
/// lifetimes are counted down in sub-step slices and the `f32` rounding
/// remainder of those slices counts as expired.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Particle {
    /// Current position
    pub position: Vec2,
    /// Velocity in units per second (linear model)
    pub direction: Vec2,
    /// Current color (RGBA)
    pub color: Vec4,
    /// Color change per second
    pub delta_color: Vec4,
    /// Distance from the source (radial model)
    pub radius: f32,
    /// Radius change per second (radial model)
    pub radius_delta: f32,
    /// Angle around the source in radians (radial model)
    pub angle: f32,
    /// Rotation speed in radians per second (radial model)
    pub degrees_per_second: f32,
    /// Current size
    pub size: f32,
    /// Size change per second
    pub size_delta: f32,
    /// Remaining lifetime in seconds
    pub time_to_live: f32,
}

impl Particle {
    /// Check if the particle is still alive
    ///
    /// Remaining lifetimes of `1e-4` seconds or less count as expired.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.time_to_live > SIMULATION_EPSILON
    }

    /// Advance the particle by `dt` seconds
    ///
    /// Returns the reason the particle must be retired, if any. A radial
    /// particle that reaches its minimum radius collapses even when time to
    /// live remains; collapse is checked before expiry.
    pub fn advance(
        &mut self,
        dt: f32,
        motion: &MotionModel,
        source_position: Vec2,
    ) -> Option<Retirement> {
        let mut collapsed = false;

        match motion {
            MotionModel::Linear { gravity } => {
                self.direction += *gravity * dt;
                self.position += self.direction * dt;
            }
            MotionModel::Radial(radial) => {
                self.angle += self.degrees_per_second * dt;
                self.radius += self.radius_delta * dt;
                self.position = source_position + Vec2::from_angle(self.angle) * self.radius;
                collapsed = self.radius <= radial.min_radius + SIMULATION_EPSILON;
            }
        }

        self.color += self.delta_color * dt;
        self.size = (self.size + self.size_delta * dt).max(0.0);
        self.time_to_live -= dt;

        if collapsed {
            self.time_to_live = 0.0;
            Some(Retirement::Collapsed)
        } else if !self.is_alive() {
            Some(Retirement::Expired)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparkfx_config::{Jittered, RadialMotion};

    fn linear(gravity: Vec2) -> MotionModel {
        MotionModel::Linear { gravity }
    }

    fn radial(min_radius: f32) -> MotionModel {
        MotionModel::Radial(RadialMotion {
            max_radius: Jittered::fixed(100.0),
            min_radius,
            radius_speed: 0.0,
            rotate_per_second: Jittered::fixed(0.0),
        })
    }

    #[test]
    fn test_particle_is_alive() {
        let mut p = Particle {
            time_to_live: 1.0,
            ..Default::default()
        };
        assert!(p.is_alive());

        p.time_to_live = 0.0;
        assert!(!p.is_alive());

        // Rounding leftovers from sub-stepping are not life
        p.time_to_live = 5.0e-5;
        assert!(!p.is_alive());
        p.time_to_live = 2.0e-4;
        assert!(p.is_alive());

        p.time_to_live = -0.5;
        assert!(!p.is_alive());
    }

    #[test]
    fn test_linear_physics() {
        let mut p = Particle {
            direction: Vec2::new(1.0, 0.0),
            time_to_live: 10.0,
            ..Default::default()
        };

        let fate = p.advance(1.0, &linear(Vec2::new(0.0, -9.8)), Vec2::ZERO);
        assert_eq!(fate, None);

        // Velocity is updated before position
        assert!((p.direction.y - (-9.8)).abs() < 0.001);
        assert!((p.position.x - 1.0).abs() < 0.001);
        assert!((p.position.y - (-9.8)).abs() < 0.001);
        assert!((p.time_to_live - 9.0).abs() < 0.001);
    }

    #[test]
    fn test_color_and_size_reach_finish_at_expiry() {
        let start = Vec4::new(1.0, 0.5, 0.0, 1.0);
        let finish = Vec4::new(0.0, 0.5, 1.0, 0.0);
        let mut p = Particle {
            color: start,
            delta_color: (finish - start) / 2.0,
            size: 32.0,
            size_delta: (8.0 - 32.0) / 2.0,
            time_to_live: 2.0,
            ..Default::default()
        };

        let motion = linear(Vec2::ZERO);
        assert_eq!(p.advance(0.5, &motion, Vec2::ZERO), None);
        assert_eq!(p.advance(0.5, &motion, Vec2::ZERO), None);
        assert_eq!(p.advance(0.5, &motion, Vec2::ZERO), None);
        assert_eq!(
            p.advance(0.5, &motion, Vec2::ZERO),
            Some(Retirement::Expired)
        );

        assert!(p.color.abs_diff_eq(finish, 1e-5));
        assert!((p.size - 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_size_never_negative() {
        let mut p = Particle {
            size: 1.0,
            size_delta: -10.0,
            time_to_live: 5.0,
            ..Default::default()
        };
        p.advance(1.0, &linear(Vec2::ZERO), Vec2::ZERO);
        assert_eq!(p.size, 0.0);
    }

    #[test]
    fn test_radial_position_follows_source() {
        let mut p = Particle {
            radius: 50.0,
            angle: 0.0,
            degrees_per_second: std::f32::consts::FRAC_PI_2,
            time_to_live: 10.0,
            ..Default::default()
        };

        let source = Vec2::new(10.0, 20.0);
        assert_eq!(p.advance(1.0, &radial(5.0), source), None);

        // A quarter turn counter-clockwise from +X lands on +Y
        assert!(p.position.abs_diff_eq(Vec2::new(10.0, 70.0), 1e-3));
    }

    #[test]
    fn test_radial_collapse_beats_remaining_lifetime() {
        let mut p = Particle {
            radius: 12.0,
            radius_delta: -4.0,
            time_to_live: 10.0,
            ..Default::default()
        };

        let motion = radial(10.0);
        assert_eq!(p.advance(0.25, &motion, Vec2::ZERO), None);
        assert_eq!(
            p.advance(0.25, &motion, Vec2::ZERO),
            Some(Retirement::Collapsed)
        );
        assert!(!p.is_alive());
    }

    #[test]
    fn test_collapse_reported_when_both_conditions_hold() {
        let mut p = Particle {
            radius: 10.5,
            radius_delta: -1.0,
            time_to_live: 0.5,
            ..Default::default()
        };
        assert_eq!(
            p.advance(0.5, &radial(10.0), Vec2::ZERO),
            Some(Retirement::Collapsed)
        );
    }
}
