use bevy::prelude::*;

use crate::config::FieldConfig;

use super::draw::draw_links;
use super::overlay::{OverlayReveal, animate_reveal, spawn_overlay, update_overlay};
use super::playback::Playback;
use super::scene::{rebuild_display, setup_field, spawn_display};
use super::sync::{
    FieldReseeded, advance_simulation, apply_playback_toggle, reseed_field, stop_on_close,
    sync_node_discs, sync_node_labels, sync_particle_discs,
};

/// The parameterized visualization component. One plugin instance drives
/// any page variant (hero, week, ambient); everything variant-specific
/// lives in the `FieldConfig` it is constructed with.
pub struct CanvasPlugin {
    pub config: FieldConfig,
}

impl Plugin for CanvasPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config)
            .init_resource::<Playback>()
            .init_resource::<OverlayReveal>()
            .add_message::<FieldReseeded>()
            .add_systems(Startup, (setup_field, spawn_display, spawn_overlay).chain())
            .add_systems(
                Update,
                (
                    // Lifecycle
                    apply_playback_toggle,
                    stop_on_close,
                    reseed_field,
                    rebuild_display,
                    // Simulation fully precedes the draw pass
                    advance_simulation,
                    // Draw pass, fixed order
                    sync_particle_discs,
                    sync_node_discs,
                    sync_node_labels,
                    draw_links,
                    animate_reveal,
                    update_overlay,
                )
                    .chain(),
            );
    }
}
