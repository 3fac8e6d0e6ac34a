//! Frame-rate clamping
//!
//! A single large frame delta (after a stall or a debugger pause) would let
//! gravity and rotation integrate in one huge jump. [`substeps`] splits a
//! delta into at most [`MAXIMUM_UPDATE_RATE`] equal steps, none longer than
//! `1 / MAXIMUM_UPDATE_RATE` seconds. Deltas longer than one second are
//! therefore only partly simulated.

/// Maximum number of integration steps run for one reported frame delta
pub const MAXIMUM_UPDATE_RATE: u32 = 45;

/// Longest integration step in seconds
pub const MAXIMUM_STEP: f32 = 1.0 / MAXIMUM_UPDATE_RATE as f32;

/// Iterator over the integration steps for one frame
#[derive(Debug, Clone)]
pub struct Substeps {
    step: f32,
    remaining: u32,
}

impl Substeps {
    /// Length of each step in seconds
    pub fn step(&self) -> f32 {
        self.step
    }
}

impl Iterator for Substeps {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining as usize, Some(self.remaining as usize))
    }
}

impl ExactSizeIterator for Substeps {}

/// Split a frame delta into clamped integration steps
///
/// Zero, negative and non-finite deltas yield no steps.
pub fn substeps(delta_time: f32) -> Substeps {
    if !delta_time.is_finite() || delta_time <= 0.0 {
        return Substeps {
            step: 0.0,
            remaining: 0,
        };
    }

    let count = (delta_time * MAXIMUM_UPDATE_RATE as f32)
        .ceil()
        .clamp(1.0, MAXIMUM_UPDATE_RATE as f32) as u32;

    Substeps {
        step: (delta_time / count as f32).min(MAXIMUM_STEP),
        remaining: count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0.01, 1 ; "short frame runs once")]
    #[test_case(1.0 / 60.0, 1 ; "sixty fps runs once")]
    #[test_case(0.5, 23 ; "half second is split")]
    #[test_case(1.0, 45 ; "one second uses every step")]
    #[test_case(10.0, 45 ; "long stall is clamped")]
    fn test_substep_count(delta_time: f32, expected: usize) {
        let steps = substeps(delta_time);
        assert_eq!(steps.len(), expected);
        assert!(steps.step() <= MAXIMUM_STEP);
    }

    #[test]
    fn test_short_frames_keep_their_delta() {
        let steps: Vec<f32> = substeps(0.01).collect();
        assert_eq!(steps, vec![0.01]);
    }

    #[test]
    fn test_split_steps_cover_the_delta() {
        let total: f32 = substeps(0.5).sum();
        assert!((total - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_stall_simulates_at_most_one_second() {
        let total: f32 = substeps(10.0).sum();
        assert!((total - 1.0).abs() < 1e-4);
    }

    #[test_case(0.0 ; "zero")]
    #[test_case(-0.5 ; "negative")]
    #[test_case(f32::NAN ; "nan")]
    #[test_case(f32::INFINITY ; "infinite")]
    fn test_degenerate_deltas(delta_time: f32) {
        assert_eq!(substeps(delta_time).count(), 0);
    }
}
