use bevy::math::Vec4;
use bevy::prelude::Color;

/// Ease-out cubic: fast at start, decelerates at end.
/// Good for "arriving" animations like the overlay reveal.
pub fn ease_out_cubic(t: f32) -> f32 {
    let x = 1.0 - t;
    1.0 - x * x * x
}

/// Ease-in-out cubic: slow at start and end, fast in the middle
#[allow(dead_code)]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Build a Bevy color from a palette entry, overriding its alpha
pub fn srgba(color: Vec4, alpha: f32) -> Color {
    Color::srgba(color.x, color.y, color.z, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert!((ease_out_cubic(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_ease_out_cubic_is_monotone() {
        let mut last = 0.0;
        for i in 0..=100 {
            let value = ease_out_cubic(i as f32 / 100.0);
            assert!(value >= last - 1e-6);
            last = value;
        }
    }
}
