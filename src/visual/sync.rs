use bevy::prelude::*;
use bevy::window::WindowCloseRequested;

use crate::camera::{SurfaceBounds, SurfaceResized};
use crate::field::Field;
use crate::input::{PlaybackToggled, PointerState, ReseedRequested};

use super::playback::Playback;
use super::scene::{LAYER_LABELS, LAYER_NODES, LAYER_PARTICLES, NodeDisc, NodeLabel, ParticleDisc};

/// Fired after the field was re-seeded; the display rebuilds in response
#[derive(Message, Debug, Clone, Copy)]
pub struct FieldReseeded;

/// Advance the field by one frame unless playback is stopped. Returns
/// whether a step ran — once `stop` has been called nothing ticks again
/// until an explicit `start`.
pub fn advance(field: &mut Field, playback: &Playback, pointer: Vec2) -> bool {
    if !playback.is_running() {
        return false;
    }
    field.step(pointer);
    true
}

pub fn advance_simulation(
    mut field: ResMut<Field>,
    playback: Res<Playback>,
    pointer: Res<PointerState>,
) {
    advance(&mut field, &playback, pointer.position);
}

pub fn apply_playback_toggle(
    mut toggles: MessageReader<PlaybackToggled>,
    mut playback: ResMut<Playback>,
) {
    for _ in toggles.read() {
        playback.toggle();
        info!(
            "Playback {}",
            if playback.is_running() {
                "resumed"
            } else {
                "stopped"
            }
        );
    }
}

/// Break the frame loop before the surface disappears; a stop that never
/// happens would leave the tick chain running against a dead surface.
pub fn stop_on_close(
    mut closes: MessageReader<WindowCloseRequested>,
    mut playback: ResMut<Playback>,
) {
    if closes.read().count() > 0 {
        playback.stop();
    }
}

/// Re-seed the populations after a surface resize (old positions were
/// computed against stale bounds) or on explicit request.
pub fn reseed_field(
    mut resizes: MessageReader<SurfaceResized>,
    mut requests: MessageReader<ReseedRequested>,
    bounds: Res<SurfaceBounds>,
    mut field: ResMut<Field>,
    mut reseeded: MessageWriter<FieldReseeded>,
) {
    let resized = resizes.read().count() > 0;
    let requested = requests.read().count() > 0;
    if !resized && !requested {
        return;
    }

    field.resize(bounds.size(), &mut rand::rng());
    info!(
        "Re-seeded populations on a {}x{} surface at frame {}",
        field.bounds().x,
        field.bounds().y,
        field.frame()
    );
    reseeded.write(FieldReseeded);
}

pub fn sync_particle_discs(
    field: Res<Field>,
    bounds: Res<SurfaceBounds>,
    mut discs: Query<(&ParticleDisc, &mut Transform)>,
) {
    for (disc, mut transform) in &mut discs {
        let Some(particle) = field.particles.get(disc.0) else {
            continue;
        };
        transform.translation = bounds.to_world(particle.position).extend(LAYER_PARTICLES);
        transform.scale = Vec3::splat(particle.radius);
    }
}

pub fn sync_node_discs(
    field: Res<Field>,
    bounds: Res<SurfaceBounds>,
    mut discs: Query<(&NodeDisc, &mut Transform)>,
) {
    for (disc, mut transform) in &mut discs {
        let Some(node) = field.nodes.get(disc.0) else {
            continue;
        };
        transform.translation = bounds.to_world(node.position).extend(LAYER_NODES);
        transform.scale = Vec3::splat(node.radius);
    }
}

pub fn sync_node_labels(
    field: Res<Field>,
    bounds: Res<SurfaceBounds>,
    mut labels: Query<(&NodeLabel, &mut Transform, &mut Text2d)>,
) {
    for (label, mut transform, mut text) in &mut labels {
        let Some(node) = field.nodes.get(label.0) else {
            continue;
        };
        transform.translation = bounds.to_world(node.position).extend(LAYER_LABELS);

        let value = format!("{}", node.value.round() as i32);
        if text.0 != value {
            text.0 = value;
        }
    }
}
