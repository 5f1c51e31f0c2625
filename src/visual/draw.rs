use bevy::prelude::*;

use crate::camera::SurfaceBounds;
use crate::field::Field;

use super::utils::srgba;

/// Immediate-mode pass for the transient link lines. Links only live for
/// one frame, so they are re-issued from the current field state instead of
/// being retained entities.
pub fn draw_links(field: Res<Field>, bounds: Res<SurfaceBounds>, mut gizmos: Gizmos) {
    let cfg = field.config();

    // Particle links: thin lines in the palette's lead color
    let lead = cfg.palette[0];
    for link in &field.particle_links {
        let from = bounds.to_world(field.particles[link.a].position);
        let to = bounds.to_world(field.particles[link.b].position);
        gizmos.line_2d(from, to, srgba(lead, link.opacity));
    }

    // Node links blend the colors of their endpoints
    for link in &field.node_links {
        let from = &field.nodes[link.a];
        let to = &field.nodes[link.b];
        gizmos.line_gradient_2d(
            bounds.to_world(from.position),
            bounds.to_world(to.position),
            srgba(from.color, link.opacity),
            srgba(to.color, link.opacity),
        );
    }
}
