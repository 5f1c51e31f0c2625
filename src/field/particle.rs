use bevy::math::{Vec2, Vec4};
use rand::Rng;
use rand::prelude::IndexedRandom;

use crate::config::ParticleTuning;

/// Distance below which the pointer counts as sitting on the particle; the
/// push direction falls back to +X instead of dividing by zero.
const CONTACT_DISTANCE: f32 = 1e-4;

/// A freely drifting point with wall bounce, pointer repulsion and a
/// cosmetic radius pulse.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Position in surface coordinates (origin top-left, y down)
    pub position: Vec2,
    /// Velocity in surface units per frame
    pub velocity: Vec2,
    /// Radius the pulse oscillates around; never mutated after seeding
    pub base_radius: f32,
    /// Displayed radius, re-derived from `base_radius` every step
    pub radius: f32,
    /// Fill color drawn from the preset palette
    pub color: Vec4,
    /// Fill opacity, fixed at seed time
    pub opacity: f32,
    /// Phase offset so particles pulse out of sync
    pub pulse_phase: f32,
}

/// Scale factor of the radius pulse, oscillating in [1.0, 2.0]
pub fn pulse_scale(phase: f32) -> f32 {
    phase.sin() * 0.5 + 1.5
}

/// Uniform draw over [0, limit); a degenerate limit collapses to 0
fn uniform(limit: f32, rng: &mut impl Rng) -> f32 {
    if limit > 0.0 {
        rng.random_range(0.0..limit)
    } else {
        0.0
    }
}

impl Particle {
    /// Seed a particle uniformly within `bounds`
    pub fn seed(
        tuning: &ParticleTuning,
        palette: &[Vec4],
        bounds: Vec2,
        rng: &mut impl Rng,
    ) -> Self {
        let base_radius = rng.random_range(tuning.radius_min..tuning.radius_max);
        Particle {
            position: Vec2::new(uniform(bounds.x, rng), uniform(bounds.y, rng)),
            velocity: Vec2::new(
                (rng.random::<f32>() - 0.5) * tuning.speed,
                (rng.random::<f32>() - 0.5) * tuning.speed,
            ),
            base_radius,
            radius: base_radius,
            color: palette.choose(rng).copied().unwrap_or(Vec4::ONE),
            opacity: rng.random_range(tuning.opacity_min..tuning.opacity_max),
            pulse_phase: rng.random_range(0.0..std::f32::consts::TAU),
        }
    }

    /// Advance one frame: integrate, bounce, repel from the pointer, damp,
    /// then re-derive the pulse radius.
    pub fn step(&mut self, tuning: &ParticleTuning, bounds: Vec2, pointer: Vec2, frame: u64) {
        self.position += self.velocity;

        // Wall bounce negates the offending axis without clamping; the
        // position may sit outside the surface until the next step.
        if self.position.x < 0.0 || self.position.x > bounds.x {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y < 0.0 || self.position.y > bounds.y {
            self.velocity.y = -self.velocity.y;
        }

        // Pointer repulsion, linear falloff inside the repulsion radius
        let away = self.position - pointer;
        let distance = away.length();
        if distance < tuning.repulsion_radius {
            let falloff = (tuning.repulsion_radius - distance) / tuning.repulsion_radius;
            let direction = if distance > CONTACT_DISTANCE {
                away / distance
            } else {
                Vec2::X
            };
            self.velocity += direction * falloff * tuning.repulsion_strength;
        }

        self.velocity *= tuning.damping;

        self.radius = self.base_radius * pulse_scale(frame as f32 * tuning.pulse_rate + self.pulse_phase);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::presets;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const BOUNDS: Vec2 = Vec2::new(400.0, 300.0);

    /// A pointer parked far enough away that repulsion never applies
    const NO_POINTER: Vec2 = Vec2::new(-1000.0, -1000.0);

    fn seeded_particle(seed: u64) -> Particle {
        let mut rng = StdRng::seed_from_u64(seed);
        let cfg = presets::HERO;
        Particle::seed(&cfg.particles, cfg.palette, BOUNDS, &mut rng)
    }

    #[test]
    fn test_seed_within_bounds() {
        for seed in 0..32 {
            let particle = seeded_particle(seed);
            assert!(particle.position.x >= 0.0 && particle.position.x < BOUNDS.x);
            assert!(particle.position.y >= 0.0 && particle.position.y < BOUNDS.y);
        }
    }

    #[test]
    fn test_speed_never_increases_without_pointer() {
        let tuning = presets::HERO.particles;
        let mut particle = seeded_particle(7);

        for frame in 1..500 {
            let before = particle.velocity.length();
            particle.step(&tuning, BOUNDS, NO_POINTER, frame);
            assert!(
                particle.velocity.length() <= before + 1e-6,
                "speed grew on frame {}",
                frame
            );
        }
    }

    #[test]
    fn test_wall_bounce_flips_velocity() {
        let tuning = presets::HERO.particles;
        let mut particle = seeded_particle(1);
        particle.position = Vec2::new(399.9, 150.0);
        particle.velocity = Vec2::new(2.0, 0.0);

        particle.step(&tuning, BOUNDS, NO_POINTER, 1);

        assert!(particle.position.x > BOUNDS.x, "overshoot is not clamped");
        assert!(particle.velocity.x < 0.0, "x velocity must reverse");
    }

    #[test]
    fn test_bounce_at_low_edge() {
        let tuning = presets::HERO.particles;
        let mut particle = seeded_particle(2);
        particle.position = Vec2::new(200.0, 0.1);
        particle.velocity = Vec2::new(0.0, -1.0);

        particle.step(&tuning, BOUNDS, NO_POINTER, 1);

        assert!(particle.velocity.y > 0.0, "y velocity must reverse");
    }

    #[test]
    fn test_repulsion_at_zero_distance_still_pushes() {
        let tuning = presets::HERO.particles;
        let mut particle = seeded_particle(3);
        particle.velocity = Vec2::ZERO;
        let pointer = particle.position;

        particle.step(&tuning, BOUNDS, pointer, 1);

        let speed = particle.velocity.length();
        assert!(speed > 0.0, "pointer on top of particle must repel");
        assert!(speed.is_finite(), "no NaN from a zero-distance division");
    }

    #[test]
    fn test_repulsion_inactive_outside_radius() {
        let tuning = presets::HERO.particles;
        let mut particle = seeded_particle(4);
        particle.position = Vec2::new(200.0, 150.0);
        particle.velocity = Vec2::new(0.1, 0.0);
        let pointer = particle.position + Vec2::new(tuning.repulsion_radius + 1.0, 0.0);

        particle.step(&tuning, BOUNDS, pointer, 1);

        // Only damping applied
        assert!((particle.velocity.x - 0.1 * tuning.damping).abs() < 1e-6);
    }

    #[test]
    fn test_pulse_never_mutates_base_radius() {
        let tuning = presets::HERO.particles;
        let mut particle = seeded_particle(5);
        let base = particle.base_radius;

        for frame in 1..2000 {
            particle.step(&tuning, BOUNDS, NO_POINTER, frame);
            assert_eq!(particle.base_radius, base);
            assert!(particle.radius >= base * 1.0 - 1e-4);
            assert!(particle.radius <= base * 2.0 + 1e-4);
        }
    }

    #[test]
    fn test_pulse_scale_range() {
        for i in 0..100 {
            let s = pulse_scale(i as f32 * 0.37);
            assert!((1.0..=2.0).contains(&s));
        }
    }
}
