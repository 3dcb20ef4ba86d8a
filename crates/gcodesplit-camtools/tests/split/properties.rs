//! Geometric properties every split must keep

use gcodesplit_camtools::{split, SplitPlane};
use gcodesplit_core::Point;
use gcodesplit_toolpath::Instruction;
use proptest::prelude::*;

use crate::common::{parse, xy_cut_length, xy_cuts};

const ZIGZAG: &str = "\
G21 G90
G0 X-12 Y-3 Z-1
G1 X7 Y-1 F400
G1 X-4 Y2
G1 X9 Y6
G1 X-8 Y8
G1 X-2 Y11
";

const POCKET_WITH_ARC: &str = "\
G0 X-8 Y0 Z-0.5
G1 X-3 Y0 F250
G2 X3 Y0 I3 J0
G1 X8 Y0
G1 X8 Y-6
G3 X-8 Y-6 I-8 J0
";

fn polyline(points: &[(f64, f64)], z: f64) -> Vec<Instruction> {
    let mut program = Vec::with_capacity(points.len());
    let mut iter = points.iter();
    if let Some(&(x, y)) = iter.next() {
        program.push(Instruction::rapid().with_xyz(x, y, z));
    }
    for &(x, y) in iter {
        program.push(Instruction::linear().with_xyz(x, y, z).with_feed(300.0));
    }
    program
}

fn assert_same_cuts(a: &[(Point, Point)], b: &[(Point, Point)]) {
    assert_eq!(a.len(), b.len(), "cut counts differ");
    for ((a0, a1), (b0, b1)) in a.iter().zip(b) {
        assert!(a0.approx_eq(b0, 1e-6), "{} != {}", a0, b0);
        assert!(a1.approx_eq(b1, 1e-6), "{} != {}", a1, b1);
    }
}

#[test]
fn test_cut_length_conserved() {
    let program = parse(ZIGZAG);
    for plane in [
        SplitPlane::at_x(0.0),
        SplitPlane::at_x(2.5),
        SplitPlane::new(Point::xy(1.0, 3.0), 30.0),
    ] {
        let result = split(&program, plane, 5.0);
        let before = xy_cut_length(&program);
        let after = xy_cut_length(&result.left) + xy_cut_length(&result.right);
        assert!(
            (before - after).abs() < 1e-9,
            "length {} became {}",
            before,
            after
        );
    }
}

#[test]
fn test_resplit_is_stable() {
    for text in [ZIGZAG, POCKET_WITH_ARC] {
        let program = parse(text);
        let plane = SplitPlane::at_x(0.0);
        let first = split(&program, plane, 3.0);

        let again_left = split(&first.left, plane, 3.0);
        assert_same_cuts(&xy_cuts(&again_left.left), &xy_cuts(&first.left));
        assert!(xy_cuts(&again_left.right).is_empty());

        let again_right = split(&first.right, plane, 3.0);
        assert_same_cuts(&xy_cuts(&again_right.right), &xy_cuts(&first.right));
        assert!(xy_cuts(&again_right.left).is_empty());
    }
}

#[test]
fn test_arc_pocket_cuts_stay_on_their_side() {
    let program = parse(POCKET_WITH_ARC);
    let plane = SplitPlane::at_x(0.0);
    let result = split(&program, plane, 3.0);
    for (a, b) in xy_cuts(&result.left) {
        assert!(a.x <= 1e-6 && b.x <= 1e-6, "left cut {} -> {}", a, b);
    }
    for (a, b) in xy_cuts(&result.right) {
        assert!(a.x >= -1e-6 && b.x >= -1e-6, "right cut {} -> {}", a, b);
    }
}

proptest! {
    #[test]
    fn prop_cuts_respect_their_side(
        points in prop::collection::vec((-50.0f64..50.0, -50.0f64..50.0), 2..12),
        origin_x in -20.0f64..20.0,
        angle in -180.0f64..180.0,
    ) {
        let plane = SplitPlane::new(Point::xy(origin_x, 0.0), angle);
        let program = polyline(&points, -1.0);
        let result = split(&program, plane, 5.0);

        for (a, b) in xy_cuts(&result.left) {
            prop_assert!(plane.local_x(a) <= 1e-6);
            prop_assert!(plane.local_x(b) <= 1e-6);
        }
        for (a, b) in xy_cuts(&result.right) {
            prop_assert!(plane.local_x(a) >= -1e-6);
            prop_assert!(plane.local_x(b) >= -1e-6);
        }
    }

    #[test]
    fn prop_polyline_length_conserved(
        points in prop::collection::vec((-50.0f64..50.0, -50.0f64..50.0), 2..12),
        origin_x in -20.0f64..20.0,
        angle in -180.0f64..180.0,
    ) {
        let plane = SplitPlane::new(Point::xy(origin_x, 0.0), angle);
        let program = polyline(&points, -1.0);
        let result = split(&program, plane, 5.0);

        let before = xy_cut_length(&program);
        let after = xy_cut_length(&result.left) + xy_cut_length(&result.right);
        // segments lying along the boundary are cut on both sides
        prop_assert!(after + 1e-4 >= before);
        prop_assert!(after <= before * 2.0 + 1e-4);
    }
}
