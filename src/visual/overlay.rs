use bevy::math::Vec4;
use bevy::prelude::*;

use crate::camera::SurfaceBounds;
use crate::config::FieldConfig;
use crate::field::Field;
use crate::progress::CourseTracker;

use super::scene::LAYER_OVERLAY;
use super::utils::{ease_out_cubic, srgba};

// Overlay ink (slate tones from the site stylesheet)
const TITLE_COLOR: Vec4 = Vec4::new(0.118, 0.161, 0.231, 1.0); // #1e293b
const STATS_COLOR: Vec4 = Vec4::new(0.392, 0.455, 0.545, 1.0); // #64748b
const TITLE_ALPHA: f32 = 0.8;
const STATS_ALPHA: f32 = 0.8;

/// Vertical position of the title, surface coordinates
const TITLE_Y: f32 = 30.0;
/// Center of the stats block. Text blocks are anchored by their center, so
/// this sits a fixed offset into the top-left corner.
const STATS_CENTER: Vec2 = Vec2::new(120.0, 90.0);

/// Centered caption above the field
#[derive(Component)]
pub struct OverlayTitle;

/// Live counters in the top-left corner
#[derive(Component)]
pub struct OverlayStats;

/// Eased fade-in applied to the overlay when the page first shows; the
/// progress figure counts up from zero while it runs.
#[derive(Resource, Debug)]
pub struct OverlayReveal {
    pub elapsed: f32,
    pub duration: f32,
}

impl Default for OverlayReveal {
    fn default() -> Self {
        OverlayReveal {
            elapsed: 0.0,
            duration: 0.8,
        }
    }
}

impl OverlayReveal {
    /// Eased reveal progress in [0, 1]
    pub fn progress(&self) -> f32 {
        ease_out_cubic((self.elapsed / self.duration).clamp(0.0, 1.0))
    }
}

pub fn spawn_overlay(mut commands: Commands, config: Res<FieldConfig>) {
    if !config.overlay.title.is_empty() {
        commands.spawn((
            OverlayTitle,
            Text2d::new(config.overlay.title),
            TextFont {
                font_size: 16.0,
                ..default()
            },
            TextColor(srgba(TITLE_COLOR, 0.0)),
            Transform::from_xyz(0.0, 0.0, LAYER_OVERLAY),
        ));
    }

    if config.overlay.show_stats {
        commands.spawn((
            OverlayStats,
            Text2d::new(String::new()),
            TextFont {
                font_size: 12.0,
                ..default()
            },
            TextColor(srgba(STATS_COLOR, 0.0)),
            Transform::from_xyz(0.0, 0.0, LAYER_OVERLAY),
        ));
    }
}

pub fn animate_reveal(time: Res<Time>, mut reveal: ResMut<OverlayReveal>) {
    if reveal.elapsed < reveal.duration {
        reveal.elapsed = (reveal.elapsed + time.delta_secs()).min(reveal.duration);
    }
}

/// Reposition and refresh the overlay every frame (positions depend on the
/// current bounds, the counters on the current field state).
pub fn update_overlay(
    field: Res<Field>,
    bounds: Res<SurfaceBounds>,
    tracker: Res<CourseTracker>,
    reveal: Res<OverlayReveal>,
    mut title: Query<
        (&mut Transform, &mut TextColor),
        (With<OverlayTitle>, Without<OverlayStats>),
    >,
    mut stats: Query<
        (&mut Transform, &mut TextColor, &mut Text2d),
        (With<OverlayStats>, Without<OverlayTitle>),
    >,
) {
    let t = reveal.progress();

    if let Ok((mut transform, mut color)) = title.single_mut() {
        transform.translation = bounds
            .to_world(Vec2::new(bounds.width * 0.5, TITLE_Y))
            .extend(LAYER_OVERLAY);
        *color = TextColor(srgba(TITLE_COLOR, TITLE_ALPHA * t));
    }

    if let Ok((mut transform, mut color, mut text)) = stats.single_mut() {
        transform.translation = bounds.to_world(STATS_CENTER).extend(LAYER_OVERLAY);
        *color = TextColor(srgba(STATS_COLOR, STATS_ALPHA * t));

        let shown_percentage = (tracker.progress_percentage() * t).floor();
        let content = format!(
            "Partículas: {}\nConexiones: {}\nPuntos de Datos: {}\nProgreso del curso: {}%",
            field.particles.len(),
            field.particle_links.len(),
            field.nodes.len(),
            shown_percentage,
        );
        if text.0 != content {
            text.0 = content;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_progress_saturates() {
        let mut reveal = OverlayReveal::default();
        assert_eq!(reveal.progress(), 0.0);

        reveal.elapsed = reveal.duration;
        assert!((reveal.progress() - 1.0).abs() < 1e-6);

        reveal.elapsed = reveal.duration * 10.0;
        assert!((reveal.progress() - 1.0).abs() < 1e-6);
    }
}
