//! Integration tests for body discretization.

use pf_core::{Real, point};
use pf_geometry::{ControlPointOffset, GeometryBuilder, GeometryError, to_global_frame};
use proptest::prelude::*;

#[test]
fn circle_polygon_is_closed() {
    for n in [3, 4, 17, 100, 501] {
        let g = GeometryBuilder::new().circle(1.0, n).unwrap();
        assert_eq!(g.nodes().len(), n + 1);
        assert_eq!(g.panel_count(), n);
        assert_eq!(g.control_points().len(), n);
        assert_eq!(g.closure_gap(), 0.0);
        assert_eq!(g.panels()[n - 1].end, g.panels()[0].start);
    }
}

#[test]
fn panels_chain_end_to_start() {
    let g = GeometryBuilder::new().circle(3.0, 40).unwrap();
    for pair in g.panels().windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
}

#[test]
fn circle_perimeter_approaches_circumference() {
    let g = GeometryBuilder::new().circle(1.0, 400).unwrap();
    let exact = 2.0 * std::f64::consts::PI;
    assert!((g.perimeter() - exact).abs() / exact < 1e-4);
}

#[test]
fn control_points_sit_just_outside_midpoints() {
    let g = GeometryBuilder::new()
        .with_offset(ControlPointOffset::RelativeToLength { fraction: 1e-6 })
        .circle(1.0, 64)
        .unwrap();
    for p in g.iter() {
        let mid = p.panel.midpoint();
        assert!(p.control_point.coords.norm() > mid.coords.norm());
    }
}

#[test]
fn zero_length_panel_is_an_error_not_nan() {
    let pts = vec![
        point(-1.0, 0.0),
        point(0.0, 1.0),
        point(1.0, 0.0),
        point(1.0, 0.0),
        point(0.0, -1.0),
        point(-1.0, 0.0),
    ];
    match GeometryBuilder::new().from_points(pts) {
        Err(GeometryError::DegeneratePanel { index, .. }) => assert_eq!(index, Some(2)),
        other => panic!("expected degenerate panel, got {other:?}"),
    }
}

#[test]
fn frame_transform_of_zero_length_panel_fails() {
    let p = point(0.5, 0.5);
    assert!(to_global_frame(pf_core::vec2(1.0, 1.0), p, p).is_err());
}

#[test]
fn xy_arrays_follow_node_order() {
    let g = GeometryBuilder::new().circle(1.0, 8).unwrap();
    let (xs, ys) = g.node_xy();
    assert_eq!(xs.len(), 9);
    for (i, node) in g.nodes().iter().enumerate() {
        assert_eq!(xs[i], node.x);
        assert_eq!(ys[i], node.y);
    }
    let (cx, cy) = g.control_point_xy();
    assert_eq!(cx.len(), 8);
    assert_eq!(cy.len(), 8);
}

proptest! {
    #[test]
    fn normals_and_tangents_are_orthonormal(radius in 0.01_f64..100.0, n in 3_usize..300) {
        let g = GeometryBuilder::new().circle(radius, n).unwrap();
        for (t, nrm) in g.tangents().iter().zip(g.normals()) {
            prop_assert!((t.norm() - 1.0).abs() < 1e-9);
            prop_assert!((nrm.norm() - 1.0).abs() < 1e-9);
            prop_assert!(t.dot(&nrm).abs() < 1e-9);
        }
    }

    #[test]
    fn every_normal_points_outward(radius in 0.01_f64..100.0, n in 3_usize..300) {
        let g = GeometryBuilder::new().circle(radius, n).unwrap();
        for p in g.iter() {
            let outward: Real = p.panel.midpoint().coords.dot(&p.normal());
            prop_assert!(outward > 0.0);
        }
    }
}
