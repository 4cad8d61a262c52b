use glam::Vec2;
use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::GraphConfig;
use crate::surface::Surface;
use crate::theme::ThemeSnapshot;
use crate::trail::uniform;

/// One vertex of the ambient network animation.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
    pub position: Vec2,
    pub radius: f32,
    pub velocity: Vec2,
    /// Outgoing edges, fixed at creation. Never contains the node's own
    /// index or a repeated index.
    pub connections: Vec<usize>,
}

/// Slowly drifting nodes joined by fixed, randomly chosen edges.
pub struct NodeGraph {
    pub config: GraphConfig,
    nodes: Vec<GraphNode>,
    bounds: Vec2,
    rng: SmallRng,
}

impl NodeGraph {
    pub fn new(config: GraphConfig, width: u32, height: u32, seed: u64) -> Self {
        let mut graph = Self {
            config,
            nodes: Vec::new(),
            bounds: Vec2::ZERO,
            rng: SmallRng::seed_from_u64(seed),
        };
        graph.resize(width, height);
        graph
    }

    /// Discard every node and build a fresh set for the new geometry.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.bounds = Vec2::new(width as f32, height as f32);
        let count = if self.config.spacing > 0.0 {
            (self.bounds.x / self.config.spacing).floor() as usize
        } else {
            0
        };

        let cfg = &self.config;
        let rng = &mut self.rng;
        let bounds = self.bounds;
        let mut nodes: Vec<GraphNode> = (0..count)
            .map(|_| GraphNode {
                position: Vec2::new(uniform(rng, 0.0, bounds.x), uniform(rng, 0.0, bounds.y)),
                radius: uniform(rng, cfg.radius.0, cfg.radius.1),
                velocity: Vec2::new(
                    uniform(rng, -cfg.max_speed, cfg.max_speed),
                    uniform(rng, -cfg.max_speed, cfg.max_speed),
                ),
                connections: Vec::new(),
            })
            .collect();

        // Each node makes 1..=max attempts; rejected picks are simply
        // dropped, so a node can end up with zero edges.
        for i in 0..count {
            let attempts = if cfg.max_connections == 0 {
                0
            } else {
                rng.gen_range(1..=cfg.max_connections)
            };
            for _ in 0..attempts {
                let target = rng.gen_range(0..count);
                let node = &mut nodes[i];
                if target != i && !node.connections.contains(&target) {
                    node.connections.push(target);
                }
            }
        }

        debug!(
            "node graph rebuilt: {count} nodes for {}x{} canvas",
            width, height
        );
        self.nodes = nodes;
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    /// Advance every node by its velocity, bouncing off the canvas edges.
    ///
    /// An axis whose next position would leave `[0, dim]` has its velocity
    /// sign flipped before the move; the result is clamped so a node that
    /// started on the edge cannot slip out.
    pub fn step(&mut self) {
        let bounds = self.bounds;
        for node in self.nodes.iter_mut() {
            let next = node.position + node.velocity;
            if next.x < 0.0 || next.x > bounds.x {
                node.velocity.x = -node.velocity.x;
            }
            if next.y < 0.0 || next.y > bounds.y {
                node.velocity.y = -node.velocity.y;
            }
            node.position = (node.position + node.velocity).clamp(Vec2::ZERO, bounds);
        }
    }

    /// Edges first, then nodes on top.
    pub fn draw(&self, surface: &mut dyn Surface, theme: &ThemeSnapshot) {
        let cfg = &self.config;
        let (line_alpha, node_alpha) = if theme.is_dark {
            (cfg.line_alpha_dark, cfg.node_alpha_dark)
        } else {
            (cfg.line_alpha_light, cfg.node_alpha_light)
        };
        let line_color = theme.palette.primary.with_alpha(line_alpha);
        let node_color = theme.palette.primary.with_alpha(node_alpha);

        for node in &self.nodes {
            for &target in &node.connections {
                if let Some(other) = self.nodes.get(target) {
                    surface.stroke_line(node.position, other.position, cfg.line_width, line_color);
                }
            }
            surface.fill_circle(node.position, node.radius, node_color);
        }
    }
}
