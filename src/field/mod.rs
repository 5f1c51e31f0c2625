mod links;
mod node;
mod particle;
mod population;

pub use links::{Link, collect_links, link_opacity};
pub use node::OrbitNode;
pub use particle::{Particle, pulse_scale};
pub use population::Field;
