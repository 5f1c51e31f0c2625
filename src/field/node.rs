use bevy::math::{Vec2, Vec4};
use rand::Rng;
use std::f32::consts::TAU;

use crate::config::{NodeTuning, hsl_to_rgba};

/// A decorative point wandering a small orbit around a fixed anchor,
/// carrying an oscillating numeric value.
#[derive(Debug, Clone)]
pub struct OrbitNode {
    /// Orbit center, fixed at seed time
    pub anchor: Vec2,
    /// Current position in surface coordinates
    pub position: Vec2,
    /// Current orbital angle (radians)
    pub angle: f32,
    /// Orbital advance per frame
    pub orbit_speed: f32,
    /// Radius the display radius is derived from; never mutated after seeding
    pub base_radius: f32,
    /// Displayed radius, re-derived every step
    pub radius: f32,
    /// Hue-spread color (hue = index / count around the wheel)
    pub color: Vec4,
    /// Cosmetic value in [50 - amplitude, 50 + amplitude]
    pub value: f32,
    /// Phase offset of the secondary radius pulse
    pub pulse_phase: f32,
}

impl OrbitNode {
    /// Seed node `index` of `count` on the placement circle around `center`
    pub fn seed(
        tuning: &NodeTuning,
        index: usize,
        center: Vec2,
        placement_radius: f32,
        rng: &mut impl Rng,
    ) -> Self {
        let angle = index as f32 / tuning.count as f32 * TAU;
        let anchor = center + Vec2::from_angle(angle) * placement_radius;
        let base_radius = rng.random_range(tuning.radius_min..tuning.radius_max);

        OrbitNode {
            anchor,
            position: anchor,
            angle,
            orbit_speed: rng.random_range(tuning.orbit_speed_min..tuning.orbit_speed_max),
            base_radius,
            radius: base_radius,
            color: hsl_to_rgba(index as f32 * 360.0 / tuning.count as f32, 0.7, 0.6),
            value: rng.random_range(0.0..100.0),
            pulse_phase: rng.random_range(0.0..TAU),
        }
    }

    /// Advance one frame: orbit around the anchor, oscillate the value and
    /// derive the display radius from it.
    pub fn step(&mut self, tuning: &NodeTuning, index: usize, frame: u64) {
        self.angle += self.orbit_speed;
        self.position = self.anchor + Vec2::from_angle(self.angle) * tuning.wobble_radius;

        let t = frame as f32;
        self.value =
            50.0 + (t * tuning.value_rate + index as f32 * tuning.value_phase_step).sin()
                * tuning.value_amplitude;

        let value_scale = 0.8 + self.value / tuning.value_radius_divisor;
        let pulse = 1.0 + (t * tuning.pulse_rate + self.pulse_phase).sin() * tuning.pulse_amplitude;
        self.radius = self.base_radius * value_scale * pulse;
    }
}
