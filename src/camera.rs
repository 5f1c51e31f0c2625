use bevy::prelude::*;
use bevy::window::WindowResized;

/// Logical size the window opens at. `SurfaceBounds` defaults to the same
/// values so Startup systems agree on the surface before the first resize
/// event arrives.
pub const LOGICAL_WIDTH: f32 = 1280.0;
pub const LOGICAL_HEIGHT: f32 = 720.0;

pub struct SurfacePlugin;

impl Plugin for SurfacePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SurfaceBounds>()
            .add_message::<SurfaceResized>()
            .add_systems(Startup, setup_surface)
            .add_systems(Update, track_window_resize);
    }
}

/// Logical size of the rendering surface.
///
/// Bevy owns the device-pixel-ratio backing store; everything here works in
/// logical pixels with the origin top-left and y growing downward, the
/// coordinate system the simulation runs in.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SurfaceBounds {
    pub width: f32,
    pub height: f32,
}

impl Default for SurfaceBounds {
    fn default() -> Self {
        SurfaceBounds {
            width: LOGICAL_WIDTH,
            height: LOGICAL_HEIGHT,
        }
    }
}

impl SurfaceBounds {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Map a surface point to world coordinates (origin centered, y up)
    pub fn to_world(&self, point: Vec2) -> Vec2 {
        Vec2::new(point.x - self.width * 0.5, self.height * 0.5 - point.y)
    }
}

/// Fired after the surface bounds changed; listeners re-seed and rebuild
/// whatever they derived from the old bounds.
#[derive(Message, Debug, Clone, Copy)]
pub struct SurfaceResized;

#[derive(Component)]
pub struct MainCamera;

fn setup_surface(
    mut commands: Commands,
    mut bounds: ResMut<SurfaceBounds>,
    windows: Query<&Window>,
) {
    commands.spawn((Camera2d, MainCamera));

    if let Ok(window) = windows.single() {
        bounds.width = window.width();
        bounds.height = window.height();
    }
}

fn track_window_resize(
    mut resize_events: MessageReader<WindowResized>,
    mut bounds: ResMut<SurfaceBounds>,
    mut resized: MessageWriter<SurfaceResized>,
) {
    for event in resize_events.read() {
        bounds.width = event.width;
        bounds.height = event.height;
        info!("Surface resized to {}x{}", event.width, event.height);
        resized.write(SurfaceResized);
    }
}
