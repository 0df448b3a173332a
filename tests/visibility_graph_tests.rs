mod common;

use common::{approx, p, square, square_workspace};
use visibility_planner::common::DomainError;
use visibility_planner::domains::path_planning::*;

fn build_square() -> VisibilityBuild {
    VisibilityGraphBuilder::new()
        .build_workspace(&square_workspace())
        .unwrap()
}

#[test]
fn test_square_scenario_has_six_vertices_and_ten_edges() {
    let build = build_square();
    assert_eq!(build.graph.vertex_count(), 6);
    assert_eq!(build.graph.edge_count(), 10);
    assert_eq!(build.stats.vertices, 6);
    assert_eq!(build.stats.pairs_considered, 15);
    assert_eq!(build.stats.blocked, 5);
    assert_eq!(build.stats.skipped_by_cutoff, 0);
    assert_eq!(build.stats.edges, 10);
}

#[test]
fn test_vertices_keep_insertion_order() {
    let graph = build_square().graph;
    let vertices: Vec<Point> = graph.vertices().collect();
    assert_eq!(
        vertices,
        vec![p(0.0, 0.0), p(10.0, 10.0), p(4.0, 4.0), p(6.0, 4.0), p(6.0, 6.0), p(4.0, 6.0)]
    );
}

#[test]
fn test_interior_crossings_are_excluded() {
    let graph = build_square().graph;
    assert!(graph.edge_weight(&p(0.0, 0.0), &p(10.0, 10.0)).is_none());
    assert!(graph.edge_weight(&p(4.0, 4.0), &p(6.0, 6.0)).is_none());
    assert!(graph.edge_weight(&p(6.0, 4.0), &p(4.0, 6.0)).is_none());
    assert!(graph.edge_weight(&p(0.0, 0.0), &p(6.0, 6.0)).is_none());
    assert!(graph.edge_weight(&p(10.0, 10.0), &p(4.0, 4.0)).is_none());
    // adjacent corners stay connected along the boundary
    assert_eq!(graph.edge_weight(&p(4.0, 4.0), &p(6.0, 4.0)), Some(2.0));
}

#[test]
fn test_edges_match_clearance_exhaustively() {
    let ws = square_workspace();
    let graph = build_square().graph;
    let vertices: Vec<Point> = graph.vertices().collect();

    for (i, a) in vertices.iter().enumerate() {
        for b in &vertices[i + 1..] {
            let clear = segment_clear(a, b, &ws.obstacles);
            match graph.edge_weight(a, b) {
                Some(w) => {
                    assert!(clear, "edge {} - {} is not clear", a, b);
                    assert_eq!(w, a.distance(b));
                }
                None => assert!(!clear, "clear pair {} - {} has no edge", a, b),
            }
        }
    }
}

#[test]
fn test_edges_are_undirected() {
    let graph = build_square().graph;
    for (a, b, w) in graph.edges() {
        assert!(graph.neighbors(&a).contains(&(b, w)));
        assert!(graph.neighbors(&b).contains(&(a, w)));
    }
}

#[test]
fn test_neighbors_follow_edge_insertion_order() {
    let graph = build_square().graph;
    let neighbors = graph.neighbors(&p(4.0, 4.0));
    assert_eq!(neighbors.len(), 3);
    assert_eq!(neighbors[0].0, p(0.0, 0.0));
    assert!(approx(neighbors[0].1, 32f64.sqrt()));
    assert_eq!(neighbors[1], (p(6.0, 4.0), 2.0));
    assert_eq!(neighbors[2], (p(4.0, 6.0), 2.0));
    assert!(graph.neighbors(&p(99.0, 99.0)).is_empty());
}

#[test]
fn test_degree_ranking() {
    let graph = build_square().graph;
    let ranking = graph.degree_ranking(2);
    assert_eq!(ranking, vec![(p(6.0, 4.0), 4), (p(4.0, 6.0), 4)]);
    assert_eq!(graph.degree(&p(0.0, 0.0)), 3);
    assert_eq!(graph.degree(&p(99.0, 99.0)), 0);
}

#[test]
fn test_max_edge_length_skips_long_pairs() {
    let build = VisibilityGraphBuilder::new()
        .with_max_edge_length(6.0)
        .unwrap()
        .build_workspace(&square_workspace())
        .unwrap();
    assert_eq!(build.stats.pairs_considered, 15);
    assert_eq!(build.stats.skipped_by_cutoff, 7);
    assert_eq!(build.stats.blocked, 2);
    assert_eq!(build.stats.edges, 6);
    assert!(build.graph.edges().iter().all(|(_, _, w)| *w <= 6.0));
    assert!(build.graph.connects(&p(0.0, 0.0), &p(10.0, 10.0)));
}

#[test]
fn test_invalid_max_edge_length_is_rejected() {
    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let result = VisibilityGraphBuilder::new().with_max_edge_length(bad);
        assert!(matches!(result, Err(DomainError::MalformedInput { .. })));
    }
}

#[test]
fn test_shared_corners_collapse_to_one_vertex() {
    let a = Obstacle::from(vec![(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
    let b = Obstacle::from(vec![(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0)]);
    let graph = visibility_graph(p(-1.0, -1.0), p(5.0, 5.0), &[a, b], None).unwrap();
    assert_eq!(graph.vertex_count(), 9);
    // the two squares meet in a single corner: no self loops
    assert!(graph.edge_weight(&p(2.0, 2.0), &p(2.0, 2.0)).is_none());
}

#[test]
fn test_goal_inside_obstacle_is_isolated() {
    let graph = visibility_graph(p(0.0, 0.0), p(5.0, 5.0), &[square()], None).unwrap();
    assert_eq!(graph.degree(&p(5.0, 5.0)), 0);
    assert!(!graph.connects(&p(0.0, 0.0), &p(5.0, 5.0)));
    assert_eq!(graph.component_count(), 2);
    assert_eq!(graph.reachable_from(&p(0.0, 0.0)).len(), 5);
    assert_eq!(graph.reachable_from(&p(5.0, 5.0)), vec![p(5.0, 5.0)]);
}

#[test]
fn test_reachable_from_unknown_point_is_empty() {
    let graph = build_square().graph;
    assert!(graph.reachable_from(&p(42.0, 0.0)).is_empty());
    assert!(!graph.connects(&p(42.0, 0.0), &p(0.0, 0.0)));
}

#[test]
fn test_non_finite_point_is_malformed() {
    let result = visibility_graph(p(f64::NAN, 0.0), p(10.0, 10.0), &[square()], None);
    assert!(matches!(result, Err(DomainError::MalformedInput { .. })));

    let bad_corner = Obstacle::from(vec![(0.0, 0.0), (1.0, f64::INFINITY), (1.0, 1.0)]);
    let result = visibility_graph(p(-5.0, 0.0), p(10.0, 10.0), &[bad_corner], None);
    assert!(result.is_err());
}

#[test]
fn test_no_obstacles_gives_single_edge() {
    let graph = visibility_graph(p(0.0, 0.0), p(3.0, 4.0), &[], None).unwrap();
    assert_eq!(graph.vertex_count(), 2);
    assert_eq!(graph.edges(), vec![(p(0.0, 0.0), p(3.0, 4.0), 5.0)]);
}
