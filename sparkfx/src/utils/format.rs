//! Formatting utilities

use glam::{Vec2, Vec4};
use humansize::{DECIMAL, format_size};
use sparkfx_config::Jittered;

/// Format a byte count in human-readable format
pub fn format_bytes(bytes: u64) -> String {
    format_size(bytes, DECIMAL)
}

/// Format a point as `(x, y)`
pub fn format_vec2(v: Vec2) -> String {
    format!("({:.1}, {:.1})", v.x, v.y)
}

/// Format a color as its RGBA channels
pub fn format_color(c: Vec4) -> String {
    format!("rgba({:.2}, {:.2}, {:.2}, {:.2})", c.x, c.y, c.z, c.w)
}

/// Format a scalar with its variance, omitting a zero variance
pub fn format_jittered(value: Jittered<f32>, unit: &str) -> String {
    if value.variance == 0.0 {
        format!("{:.2}{unit}", value.base)
    } else {
        format!("{:.2} ± {:.2}{unit}", value.base, value.variance)
    }
}

/// Format an emitter duration
pub fn format_duration(duration: Option<f32>) -> String {
    match duration {
        Some(seconds) => format!("{seconds:.2}s"),
        None => "unlimited".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1024), "1.02 kB");
        assert_eq!(format_bytes(1_048_576), "1.05 MB");
    }

    #[test]
    fn test_format_jittered() {
        assert_eq!(format_jittered(Jittered::fixed(90.0), "°"), "90.00°");
        assert_eq!(format_jittered(Jittered::new(1.5, 0.25), "s"), "1.50 ± 0.25s");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Some(0.15)), "0.15s");
        assert_eq!(format_duration(None), "unlimited");
    }

    #[test]
    fn test_format_vectors() {
        assert_eq!(format_vec2(Vec2::new(160.0, 240.5)), "(160.0, 240.5)");
        assert_eq!(
            format_color(Vec4::new(1.0, 0.5, 0.0, 1.0)),
            "rgba(1.00, 0.50, 0.00, 1.00)"
        );
    }
}
