use bevy::math::Vec2;
use bevy::prelude::Resource;
use rand::Rng;

use crate::config::FieldConfig;

use super::links::{Link, collect_links};
use super::node::OrbitNode;
use super::particle::Particle;

/// The complete simulation state of one visualization: both populations,
/// their per-frame links, the surface bounds and a monotone frame counter.
///
/// The field owns its entities exclusively. Populations are fixed after
/// seeding; only a resize (or an explicit re-seed) replaces them, wholesale.
#[derive(Debug, Resource)]
pub struct Field {
    config: FieldConfig,
    bounds: Vec2,
    pub particles: Vec<Particle>,
    pub nodes: Vec<OrbitNode>,
    pub particle_links: Vec<Link>,
    pub node_links: Vec<Link>,
    frame: u64,
}

impl Field {
    /// Seed a fresh field. A zero-sized surface degrades to entities
    /// collapsed at the origin; it never fails.
    pub fn seed(config: FieldConfig, bounds: Vec2, rng: &mut impl Rng) -> Self {
        let mut field = Field {
            config,
            bounds,
            particles: Vec::new(),
            nodes: Vec::new(),
            particle_links: Vec::new(),
            node_links: Vec::new(),
            frame: 0,
        };
        field.populate(rng);
        field
    }

    /// Tear down and recreate both populations against new bounds. Counts
    /// and configuration are unchanged; positions are redrawn. The frame
    /// counter keeps running so pulse phases do not jump back.
    pub fn resize(&mut self, bounds: Vec2, rng: &mut impl Rng) {
        self.bounds = bounds;
        self.populate(rng);
    }

    fn populate(&mut self, rng: &mut impl Rng) {
        let center = self.bounds * 0.5;
        let placement_radius = center.x.min(center.y) * self.config.nodes.placement_factor;

        self.particles = (0..self.config.particles.count)
            .map(|_| Particle::seed(&self.config.particles, self.config.palette, self.bounds, rng))
            .collect();

        self.nodes = (0..self.config.nodes.count)
            .map(|index| OrbitNode::seed(&self.config.nodes, index, center, placement_radius, rng))
            .collect();

        self.particle_links.clear();
        self.node_links.clear();
    }

    /// Advance one frame: simulate every particle and node, then re-derive
    /// both link sets. Simulation always completes before anything reads the
    /// field to draw.
    pub fn step(&mut self, pointer: Vec2) {
        self.frame += 1;

        let particle_tuning = &self.config.particles;
        for particle in &mut self.particles {
            particle.step(particle_tuning, self.bounds, pointer, self.frame);
        }

        let node_tuning = &self.config.nodes;
        for (index, node) in self.nodes.iter_mut().enumerate() {
            node.step(node_tuning, index, self.frame);
        }

        let positions: Vec<Vec2> = self.particles.iter().map(|p| p.position).collect();
        collect_links(
            &positions,
            particle_tuning.link_threshold,
            particle_tuning.link_opacity,
            &mut self.particle_links,
        );

        let positions: Vec<Vec2> = self.nodes.iter().map(|n| n.position).collect();
        collect_links(
            &positions,
            node_tuning.link_threshold,
            node_tuning.link_opacity,
            &mut self.node_links,
        );
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}
