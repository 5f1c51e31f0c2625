use bevy::prelude::*;
use bevy::window::{CursorLeft, CursorMoved};

/// Sentinel parked far outside the surface while no pointer is present; its
/// distance to anything on-surface exceeds the repulsion radius, so
/// repulsion switches off.
pub const OFF_SURFACE: Vec2 = Vec2::new(-100.0, -100.0);

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerState>()
            .add_message::<PlaybackToggled>()
            .add_message::<ReseedRequested>()
            .add_systems(Update, (track_pointer, keyboard_shortcuts));
    }
}

/// Last known pointer position in surface coordinates (logical pixels,
/// origin top-left — the space `CursorMoved` reports).
#[derive(Resource, Debug, Clone, Copy)]
pub struct PointerState {
    pub position: Vec2,
}

impl Default for PointerState {
    fn default() -> Self {
        PointerState {
            position: OFF_SURFACE,
        }
    }
}

/// Space was pressed: run/stop the frame loop
#[derive(Message, Debug, Clone, Copy)]
pub struct PlaybackToggled;

/// R was pressed: redraw the populations in place
#[derive(Message, Debug, Clone, Copy)]
pub struct ReseedRequested;

fn track_pointer(
    mut moves: MessageReader<CursorMoved>,
    mut leaves: MessageReader<CursorLeft>,
    mut pointer: ResMut<PointerState>,
) {
    // Last move wins; a leave in the same frame overrides it
    for event in moves.read() {
        pointer.position = event.position;
    }
    if leaves.read().count() > 0 {
        pointer.position = OFF_SURFACE;
    }
}

fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut playback: MessageWriter<PlaybackToggled>,
    mut reseed: MessageWriter<ReseedRequested>,
) {
    if keys.just_pressed(KeyCode::Space) {
        playback.write(PlaybackToggled);
    }
    if keys.just_pressed(KeyCode::KeyR) {
        reseed.write(ReseedRequested);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::presets;

    #[test]
    fn test_sentinel_is_outside_every_repulsion_radius() {
        // The nearest on-surface point to the sentinel is the origin
        let closest = OFF_SURFACE.distance(Vec2::ZERO);
        for preset in [presets::HERO, presets::WEEK, presets::AMBIENT] {
            assert!(closest > preset.particles.repulsion_radius);
        }
    }

    #[test]
    fn test_pointer_defaults_off_surface() {
        assert_eq!(PointerState::default().position, OFF_SURFACE);
    }
}
