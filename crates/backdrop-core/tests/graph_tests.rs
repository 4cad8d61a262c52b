use backdrop_core::config::GraphConfig;
use backdrop_core::graph::NodeGraph;
use backdrop_core::surface::{DrawCommand, RecordingSurface};
use backdrop_core::theme::{Palette, ThemeMode, ThemeSnapshot};
use glam::Vec2;

fn snapshot(mode: ThemeMode) -> ThemeSnapshot {
    ThemeSnapshot {
        palette: mode.palette(),
        is_dark: mode == ThemeMode::Dark,
        is_animating: false,
    }
}

fn assert_in_bounds(graph: &NodeGraph) {
    let b = graph.bounds();
    for (i, n) in graph.nodes().iter().enumerate() {
        assert!(
            n.position.x >= 0.0 && n.position.x <= b.x && n.position.y >= 0.0 && n.position.y <= b.y,
            "node {i} at {:?} outside {:?}",
            n.position,
            b
        );
    }
}

#[test]
fn test_node_count_follows_width() {
    let graph = NodeGraph::new(GraphConfig::default(), 1000, 800, 1);
    assert_eq!(graph.nodes().len(), 5);
    assert_in_bounds(&graph);

    let narrow = NodeGraph::new(GraphConfig::default(), 199, 800, 1);
    assert!(narrow.nodes().is_empty());
}

#[test]
fn test_resize_regenerates_inside_new_bounds() {
    let mut graph = NodeGraph::new(GraphConfig::default(), 1000, 800, 9);
    graph.resize(500, 400);
    assert_eq!(graph.nodes().len(), 2);
    assert_eq!(graph.bounds(), Vec2::new(500.0, 400.0));
    assert_in_bounds(&graph);
}

#[test]
fn test_node_parameters_in_range() {
    let graph = NodeGraph::new(GraphConfig::default(), 4000, 1000, 3);
    for n in graph.nodes() {
        assert!(n.radius >= 2.0 && n.radius <= 5.0, "radius {}", n.radius);
        assert!(n.velocity.x.abs() <= 0.25 && n.velocity.y.abs() <= 0.25);
    }
}

#[test]
fn test_connections_have_no_self_loops_or_duplicates() {
    for seed in 0..50 {
        let graph = NodeGraph::new(GraphConfig::default(), 2000, 800, seed);
        let count = graph.nodes().len();
        for (i, n) in graph.nodes().iter().enumerate() {
            assert!(n.connections.len() <= 3);
            for (k, &target) in n.connections.iter().enumerate() {
                assert_ne!(target, i, "seed {seed}: node {i} links to itself");
                assert!(target < count);
                assert!(
                    !n.connections[..k].contains(&target),
                    "seed {seed}: node {i} repeats edge to {target}"
                );
            }
        }
    }
}

#[test]
fn test_single_node_has_no_edges() {
    let graph = NodeGraph::new(GraphConfig::default(), 250, 250, 5);
    assert_eq!(graph.nodes().len(), 1);
    assert!(graph.nodes()[0].connections.is_empty());
}

#[test]
fn test_nodes_stay_inside_while_moving() {
    let config = GraphConfig {
        max_speed: 40.0,
        ..GraphConfig::default()
    };
    let mut graph = NodeGraph::new(config, 1200, 300, 11);
    for _ in 0..5000 {
        graph.step();
    }
    assert_in_bounds(&graph);
}

#[test]
fn test_bounce_flips_velocity() {
    let mut graph = NodeGraph::new(GraphConfig::default(), 200, 200, 2);
    assert_eq!(graph.nodes().len(), 1);
    let start = graph.nodes()[0].velocity;
    // Walking far enough guarantees every non-zero axis meets a wall.
    for _ in 0..20_000 {
        graph.step();
    }
    let end = graph.nodes()[0].velocity;
    assert_eq!(end.abs(), start.abs(), "speed is preserved across bounces");
    assert_in_bounds(&graph);
}

#[test]
fn test_draw_edges_then_nodes() {
    let graph = NodeGraph::new(GraphConfig::default(), 1600, 900, 4);
    let edges: usize = graph.nodes().iter().map(|n| n.connections.len()).sum();
    let mut surface = RecordingSurface::new(1600, 900);
    graph.draw(&mut surface, &snapshot(ThemeMode::Dark));

    assert_eq!(surface.lines(), edges);
    assert_eq!(surface.circles(), graph.nodes().len());
}

#[test]
fn test_light_theme_alphas() {
    let graph = NodeGraph::new(GraphConfig::default(), 1600, 900, 4);
    let mut surface = RecordingSurface::new(1600, 900);
    graph.draw(&mut surface, &snapshot(ThemeMode::Light));

    for cmd in &surface.commands {
        match cmd {
            DrawCommand::StrokeLine { color, .. } => {
                assert_eq!(*color, Palette::LIGHT.primary.with_alpha(0.07))
            }
            DrawCommand::FillCircle { color, .. } => {
                assert_eq!(*color, Palette::LIGHT.primary.with_alpha(0.15))
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
