//! Property tests for the source panel kernel.

use pf_core::{Real, point};
use pf_geometry::{Panel, PanelFrame};
use pf_solver::{panel_source_velocity, source_velocity};
use proptest::prelude::*;

fn coord() -> impl Strategy<Value = Real> {
    -5.0_f64..5.0
}

proptest! {
    #[test]
    fn reversed_panel_flips_local_components(
        ax in coord(), ay in coord(), bx in coord(), by in coord(),
        px in coord(), py in coord(), sigma in -10.0_f64..10.0,
    ) {
        let a = point(ax, ay);
        let b = point(bx, by);
        let p = point(px, py);
        prop_assume!((b - a).norm() > 1e-2);
        let forward = PanelFrame::new(a, b).unwrap();
        let backward = PanelFrame::new(b, a).unwrap();
        // keep clear of the panel line, where the angle branch cut lives
        prop_assume!(forward.to_local(p).y.abs() > 1e-3);

        let v_ab = source_velocity(sigma, p, a, b).unwrap();
        let v_ba = source_velocity(sigma, p, b, a).unwrap();

        let fwd = Panel::new(a, b).unwrap();
        let bwd = Panel::new(b, a).unwrap();
        let scale = 1.0 + v_ab.norm();

        // normal component relative to each panel's own normal flips sign
        prop_assert!((v_ab.dot(&fwd.normal()) + v_ba.dot(&bwd.normal())).abs() < 1e-9 * scale);
        // tangential component relative to each panel's own tangent flips sign too
        prop_assert!((v_ab.dot(&fwd.tangent()) + v_ba.dot(&bwd.tangent())).abs() < 1e-9 * scale);
        // which leaves the physical velocity unchanged
        prop_assert!((v_ab - v_ba).norm() < 1e-9 * scale);
        prop_assert!(backward.length() == forward.length());
    }

    #[test]
    fn panel_and_endpoint_forms_agree(
        ax in coord(), ay in coord(), bx in coord(), by in coord(),
        px in coord(), py in coord(),
    ) {
        let a = point(ax, ay);
        let b = point(bx, by);
        prop_assume!((b - a).norm() > 1e-2);
        let p = point(px, py);
        let panel = Panel::new(a, b).unwrap();
        prop_assume!(panel.frame().to_local(p).y.abs() > 1e-6);
        let v1 = source_velocity(1.5, p, a, b).unwrap();
        let v2 = panel_source_velocity(1.5, p, &panel);
        prop_assert!((v1 - v2).norm() < 1e-12);
    }

    #[test]
    fn positive_source_pushes_fluid_off_its_normal_side(
        len in 0.1_f64..3.0, x in -1.0_f64..4.0, y in 0.01_f64..3.0,
    ) {
        // Panel along +x; points above it see outward (positive) normal flow.
        let v = source_velocity(1.0, point(x, y), point(0.0, 0.0), point(len, 0.0)).unwrap();
        prop_assert!(v.y > 0.0);
    }
}
