use bevy::prelude::*;
use bevy::sprite_render::AlphaMode2d;

use crate::camera::SurfaceBounds;
use crate::config::FieldConfig;
use crate::field::Field;

use super::sync::FieldReseeded;
use super::utils::srgba;

// Draw layers, back to front: wash, particle links (gizmos), particles,
// node links (gizmos), nodes, labels, overlay text.
pub(crate) const LAYER_BACKGROUND: f32 = -10.0;
pub(crate) const LAYER_PARTICLES: f32 = 1.0;
pub(crate) const LAYER_NODES: f32 = 3.0;
pub(crate) const LAYER_LABELS: f32 = 4.0;
pub(crate) const LAYER_OVERLAY: f32 = 10.0;

/// Alpha of each background wash stop
const WASH_ALPHA: f32 = 0.02;
/// Glow disc behind every particle, relative to the particle's own alpha
const PARTICLE_GLOW_SCALE: f32 = 2.0;
const PARTICLE_GLOW_ALPHA: f32 = 0.25;
/// Lighter inner circle drawn over each node body
const NODE_HIGHLIGHT_SCALE: f32 = 0.6;
const NODE_HIGHLIGHT_ALPHA: f32 = 0.35;
/// Node body fill alpha
const NODE_BODY_ALPHA: f32 = 0.85;

/// Disc showing particle `index` of the field
#[derive(Component)]
pub struct ParticleDisc(pub usize);

/// Disc showing node `index` of the field
#[derive(Component)]
pub struct NodeDisc(pub usize);

/// Centered value label of node `index`
#[derive(Component)]
pub struct NodeLabel(pub usize);

/// One stop of the gradient background wash
#[derive(Component)]
pub struct BackgroundWash;

/// Shared unit-circle mesh every disc is a scaled instance of
#[derive(Resource)]
pub struct DisplayMeshes {
    pub unit_circle: Handle<Mesh>,
}

/// Seed the field against the current surface. Runs before anything spawns
/// display entities.
pub fn setup_field(mut commands: Commands, config: Res<FieldConfig>, bounds: Res<SurfaceBounds>) {
    let field = Field::seed(*config, bounds.size(), &mut rand::rng());
    info!(
        "Seeded '{}' field: {} particles, {} nodes on a {}x{} surface",
        field.config().name,
        field.particles.len(),
        field.nodes.len(),
        bounds.width,
        bounds.height,
    );
    commands.insert_resource(field);
}

/// Spawn the initial display entities for the freshly seeded field
pub fn spawn_display(
    mut commands: Commands,
    mut mesh_assets: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    field: Res<Field>,
    bounds: Res<SurfaceBounds>,
) {
    let meshes = DisplayMeshes {
        unit_circle: mesh_assets.add(Circle::new(1.0)),
    };
    spawn_population(&mut commands, &meshes, &mut materials, &field, &bounds);
    commands.insert_resource(meshes);
}

/// After a re-seed, throw away every display entity and spawn the new
/// population. Counts are unchanged but colors, radii and opacities were
/// all redrawn.
pub fn rebuild_display(
    mut reseeded: MessageReader<FieldReseeded>,
    mut commands: Commands,
    meshes: Res<DisplayMeshes>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    field: Res<Field>,
    bounds: Res<SurfaceBounds>,
    existing: Query<
        Entity,
        Or<(
            With<ParticleDisc>,
            With<NodeDisc>,
            With<NodeLabel>,
            With<BackgroundWash>,
        )>,
    >,
) {
    if reseeded.read().count() == 0 {
        return;
    }

    for entity in &existing {
        commands.entity(entity).despawn();
    }
    spawn_population(&mut commands, &meshes, &mut materials, &field, &bounds);
}

fn translucent(color: Color) -> ColorMaterial {
    ColorMaterial {
        color,
        alpha_mode: AlphaMode2d::Blend,
        ..default()
    }
}

fn spawn_population(
    commands: &mut Commands,
    meshes: &DisplayMeshes,
    materials: &mut Assets<ColorMaterial>,
    field: &Field,
    bounds: &SurfaceBounds,
) {
    let cfg = field.config();
    spawn_background(commands, cfg, bounds);

    for (index, particle) in field.particles.iter().enumerate() {
        let world = bounds.to_world(particle.position);
        commands
            .spawn((
                ParticleDisc(index),
                Mesh2d(meshes.unit_circle.clone()),
                MeshMaterial2d(
                    materials.add(translucent(srgba(particle.color, particle.opacity))),
                ),
                Transform::from_translation(world.extend(LAYER_PARTICLES))
                    .with_scale(Vec3::splat(particle.radius)),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Mesh2d(meshes.unit_circle.clone()),
                    MeshMaterial2d(materials.add(translucent(srgba(
                        particle.color,
                        particle.opacity * PARTICLE_GLOW_ALPHA,
                    )))),
                    Transform::from_xyz(0.0, 0.0, -0.1)
                        .with_scale(Vec3::splat(PARTICLE_GLOW_SCALE)),
                ));
            });
    }

    for (index, node) in field.nodes.iter().enumerate() {
        let world = bounds.to_world(node.position);
        commands
            .spawn((
                NodeDisc(index),
                Mesh2d(meshes.unit_circle.clone()),
                MeshMaterial2d(materials.add(translucent(srgba(node.color, NODE_BODY_ALPHA)))),
                Transform::from_translation(world.extend(LAYER_NODES))
                    .with_scale(Vec3::splat(node.radius)),
            ))
            .with_children(|parent| {
                // Glow halo behind the body
                parent.spawn((
                    Mesh2d(meshes.unit_circle.clone()),
                    MeshMaterial2d(
                        materials.add(translucent(srgba(node.color, cfg.nodes.glow_alpha))),
                    ),
                    Transform::from_xyz(0.0, 0.0, -0.1)
                        .with_scale(Vec3::splat(cfg.nodes.glow_scale)),
                ));
                // Lighter inner circle
                parent.spawn((
                    Mesh2d(meshes.unit_circle.clone()),
                    MeshMaterial2d(materials.add(translucent(Color::srgba(
                        1.0,
                        1.0,
                        1.0,
                        NODE_HIGHLIGHT_ALPHA,
                    )))),
                    Transform::from_xyz(0.0, 0.0, 0.1)
                        .with_scale(Vec3::splat(NODE_HIGHLIGHT_SCALE)),
                ));
            });

        // Labels are separate entities so the pulse never stretches the text
        commands.spawn((
            NodeLabel(index),
            Text2d::new(format!("{}", node.value.round() as i32)),
            TextFont {
                font_size: cfg.nodes.label_size,
                ..default()
            },
            TextColor(Color::WHITE),
            Transform::from_translation(world.extend(LAYER_LABELS)),
        ));
    }
}

/// Three translucent sprites fanned across the diagonal stand in for the
/// canvas gradient wash (stops at 0%, 50% and 100%).
fn spawn_background(commands: &mut Commands, cfg: &FieldConfig, bounds: &SurfaceBounds) {
    let size = bounds.size();
    for (index, stop) in cfg.palette.iter().take(3).enumerate() {
        let t = index as f32 / 2.0;
        let center = bounds.to_world(Vec2::new(size.x * t, size.y * t));
        commands.spawn((
            BackgroundWash,
            Sprite::from_color(srgba(*stop, WASH_ALPHA), size * 1.2),
            Transform::from_translation(center.extend(LAYER_BACKGROUND + index as f32 * 0.1)),
        ));
    }
}
