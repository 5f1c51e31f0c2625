pub mod draw;
pub mod overlay;
pub mod playback;
pub mod plugin;
pub mod scene;
pub mod sync;
pub mod utils;
