use bevy::math::Vec4;
use bevy::prelude::Resource;

// ============================================================================
// FIELD TUNING - one parameterized configuration covers every page variant
// ============================================================================

/// Tuning for the free-drifting particle population
#[derive(Debug, Clone, Copy)]
pub struct ParticleTuning {
    /// Population size (fixed after seeding)
    pub count: usize,
    /// Width of the symmetric velocity range, surface units per frame
    pub speed: f32,
    /// Base radius range
    pub radius_min: f32,
    pub radius_max: f32,
    /// Fill opacity range
    pub opacity_min: f32,
    pub opacity_max: f32,
    /// Pulse advance per frame (radians)
    pub pulse_rate: f32,
    /// Velocity retained each frame (< 1.0 so speed decays)
    pub damping: f32,
    /// Pointer distance below which repulsion applies
    pub repulsion_radius: f32,
    /// Impulse applied at zero pointer distance
    pub repulsion_strength: f32,
    /// Distance below which two particles are linked
    pub link_threshold: f32,
    /// Link opacity at zero distance
    pub link_opacity: f32,
}

/// Tuning for the orbiting node population
#[derive(Debug, Clone, Copy)]
pub struct NodeTuning {
    /// Population size (fixed after seeding)
    pub count: usize,
    /// Base radius range
    pub radius_min: f32,
    pub radius_max: f32,
    /// Placement circle radius as a fraction of min(half-width, half-height)
    pub placement_factor: f32,
    /// Radius of the small orbit each node wanders around its anchor
    pub wobble_radius: f32,
    /// Orbital advance range, radians per frame
    pub orbit_speed_min: f32,
    pub orbit_speed_max: f32,
    /// Value oscillation: value = 50 + sin(frame * rate + index * phase_step) * amplitude
    pub value_rate: f32,
    pub value_amplitude: f32,
    pub value_phase_step: f32,
    /// Display radius scale = 0.8 + value / divisor
    pub value_radius_divisor: f32,
    /// Secondary pulse on the display radius (amplitude 0 disables it)
    pub pulse_rate: f32,
    pub pulse_amplitude: f32,
    /// Distance below which two nodes are linked
    pub link_threshold: f32,
    /// Link opacity at zero distance
    pub link_opacity: f32,
    /// Glow halo scale and opacity
    pub glow_scale: f32,
    pub glow_alpha: f32,
    /// Font size of the value label
    pub label_size: f32,
}

/// Overlay text drawn above the field
#[derive(Debug, Clone, Copy)]
pub struct OverlayConfig {
    /// Centered caption (empty string hides it)
    pub title: &'static str,
    /// Live entity/link counters plus the course progress figure
    pub show_stats: bool,
}

/// Complete configuration for one field instance
#[derive(Debug, Clone, Copy, Resource)]
pub struct FieldConfig {
    pub name: &'static str,
    pub particles: ParticleTuning,
    pub nodes: NodeTuning,
    /// Fill colors; the first entry also tints particle links and the
    /// first three tint the background wash
    pub palette: &'static [Vec4],
    pub overlay: OverlayConfig,
}

impl FieldConfig {
    /// Resolve the active preset from `AULA_VIZ_PRESET` (hero/week/ambient),
    /// defaulting to the hero variant.
    pub fn from_env() -> Self {
        match std::env::var("AULA_VIZ_PRESET").as_deref() {
            Ok("week") => presets::WEEK,
            Ok("ambient") => presets::AMBIENT,
            Ok("hero") | Err(_) => presets::HERO,
            Ok(other) => {
                log::warn!("Unknown preset '{}', falling back to hero", other);
                presets::HERO
            }
        }
    }
}

// ============================================================================
// PRESETS
// ============================================================================

pub mod presets {
    use super::*;

    /// Landing-page hero field: dense, slow, blue-led palette
    pub const HERO: FieldConfig = FieldConfig {
        name: "hero",
        particles: ParticleTuning {
            count: 50,
            speed: 0.5,
            radius_min: 1.0,
            radius_max: 4.0,
            opacity_min: 0.5,
            opacity_max: 1.0,
            pulse_rate: 0.001,
            damping: 0.99,
            repulsion_radius: 100.0,
            repulsion_strength: 0.1,
            link_threshold: 150.0,
            link_opacity: 0.5,
        },
        nodes: NodeTuning {
            count: 8,
            radius_min: 10.0,
            radius_max: 30.0,
            placement_factor: 0.6,
            wobble_radius: 20.0,
            orbit_speed_min: 0.001,
            orbit_speed_max: 0.003,
            value_rate: 0.001,
            value_amplitude: 30.0,
            value_phase_step: 1.0,
            value_radius_divisor: 250.0,
            pulse_rate: 0.003,
            pulse_amplitude: 0.0,
            link_threshold: 200.0,
            link_opacity: 0.3,
            glow_scale: 2.0,
            glow_alpha: 0.3,
            label_size: 12.0,
        },
        palette: HERO_PALETTE,
        overlay: OverlayConfig {
            title: "Visualización de Datos en Tiempo Real",
            show_stats: true,
        },
    };

    /// Week-page field: sparser, livelier, violet-led palette
    pub const WEEK: FieldConfig = FieldConfig {
        name: "week",
        particles: ParticleTuning {
            count: 30,
            speed: 0.8,
            radius_min: 1.0,
            radius_max: 3.0,
            opacity_min: 0.3,
            opacity_max: 0.8,
            pulse_rate: 0.002,
            damping: 0.98,
            repulsion_radius: 100.0,
            repulsion_strength: 0.2,
            link_threshold: 120.0,
            link_opacity: 0.4,
        },
        nodes: NodeTuning {
            count: 8,
            radius_min: 8.0,
            radius_max: 23.0,
            placement_factor: 0.6,
            wobble_radius: 15.0,
            orbit_speed_min: 0.002,
            orbit_speed_max: 0.005,
            value_rate: 0.001,
            value_amplitude: 40.0,
            value_phase_step: 0.5,
            value_radius_divisor: 200.0,
            pulse_rate: 0.003,
            pulse_amplitude: 0.1,
            link_threshold: 250.0,
            link_opacity: 0.3,
            glow_scale: 2.5,
            glow_alpha: 0.2,
            label_size: 10.0,
        },
        palette: WEEK_PALETTE,
        overlay: OverlayConfig {
            title: "Interactúa con la visualización",
            show_stats: false,
        },
    };

    /// Untitled background field for generic pages: week dynamics at hero density
    pub const AMBIENT: FieldConfig = FieldConfig {
        name: "ambient",
        particles: ParticleTuning {
            count: 50,
            ..WEEK.particles
        },
        nodes: WEEK.nodes,
        palette: WEEK_PALETTE,
        overlay: OverlayConfig {
            title: "",
            show_stats: false,
        },
    };
}

// ============================================================================
// PALETTES (sRGB from the site stylesheet)
// ============================================================================

pub const HERO_PALETTE: &[Vec4] = &[
    Vec4::new(0.145, 0.388, 0.922, 1.0), // #2563eb blue
    Vec4::new(0.063, 0.725, 0.506, 1.0), // #10b981 emerald
    Vec4::new(0.961, 0.620, 0.043, 1.0), // #f59e0b amber
    Vec4::new(0.937, 0.267, 0.267, 1.0), // #ef4444 red
    Vec4::new(0.545, 0.361, 0.965, 1.0), // #8b5cf6 violet
];

pub const WEEK_PALETTE: &[Vec4] = &[
    Vec4::new(0.388, 0.400, 0.945, 1.0), // #6366f1 indigo
    Vec4::new(0.545, 0.361, 0.965, 1.0), // #8b5cf6 violet
    Vec4::new(0.925, 0.282, 0.600, 1.0), // #ec4899 pink
    Vec4::new(0.063, 0.725, 0.506, 1.0), // #10b981 emerald
    Vec4::new(0.024, 0.714, 0.831, 1.0), // #06b6d4 cyan
];

/// Convert an HSL color to RGBA, for the evenly hue-spread node colors
pub fn hsl_to_rgba(hue_degrees: f32, saturation: f32, lightness: f32) -> Vec4 {
    let h = hue_degrees.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());

    let (r, g, b) = if h < 1.0 {
        (c, x, 0.0)
    } else if h < 2.0 {
        (x, c, 0.0)
    } else if h < 3.0 {
        (0.0, c, x)
    } else if h < 4.0 {
        (0.0, x, c)
    } else if h < 5.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    let m = lightness - c / 2.0;
    Vec4::new(r + m, g + m, b + m, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_keep_damping_below_one() {
        for preset in [presets::HERO, presets::WEEK, presets::AMBIENT] {
            assert!(preset.particles.damping < 1.0, "{} damping", preset.name);
        }
    }

    #[test]
    fn test_hero_counts() {
        assert_eq!(presets::HERO.particles.count, 50);
        assert_eq!(presets::HERO.nodes.count, 8);
    }

    #[test]
    fn test_ambient_mixes_week_dynamics_with_hero_density() {
        assert_eq!(presets::AMBIENT.particles.count, 50);
        assert_eq!(
            presets::AMBIENT.particles.damping,
            presets::WEEK.particles.damping
        );
        assert!(presets::AMBIENT.overlay.title.is_empty());
    }

    #[test]
    fn test_hsl_primaries() {
        let red = hsl_to_rgba(0.0, 1.0, 0.5);
        assert!((red.x - 1.0).abs() < 1e-5 && red.y.abs() < 1e-5);

        let green = hsl_to_rgba(120.0, 1.0, 0.5);
        assert!((green.y - 1.0).abs() < 1e-5 && green.x.abs() < 1e-5);

        let blue = hsl_to_rgba(240.0, 1.0, 0.5);
        assert!((blue.z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_hsl_wraps_hue() {
        let a = hsl_to_rgba(0.0, 0.7, 0.6);
        let b = hsl_to_rgba(360.0, 0.7, 0.6);
        assert!((a - b).length() < 1e-5);
    }
}
