//! Concrete split scenarios with exact expected output

use gcodesplit_camtools::{split, PlaneSplitter, Side, SplitDiagnostic, SplitOptions, SplitPlane};
use gcodesplit_core::Point;
use gcodesplit_toolpath::{Instruction, MotionClass};

use crate::common::{lines, parse, xy_cuts};

/// Every rapid that moves in XY must leave from at or above `clearance`,
/// unless the depth it leaves from is not known yet
fn assert_xy_rapids_start_clear(instructions: &[Instruction], clearance: f64) {
    let (mut x, mut y, mut z) = (None::<f64>, None::<f64>, None::<f64>);
    for instruction in instructions {
        let changes = |to: Option<f64>, at: Option<f64>| {
            to.zip(at).is_some_and(|(to, at)| (to - at).abs() > 1e-9)
        };
        let moves_xy = changes(instruction.x, x) || changes(instruction.y, y);
        if instruction.motion == Some(MotionClass::Rapid) && moves_xy {
            if let Some(z) = z {
                assert!(
                    z >= clearance - 1e-9,
                    "{} leaves from Z{}",
                    instruction.to_gcode(),
                    z
                );
            }
        }
        x = instruction.x.or(x);
        y = instruction.y.or(y);
        z = instruction.z.or(z);
    }
}

#[test]
fn test_line_across_origin() {
    let program = parse("G0 X-5 Y0 Z0\nG1 X5 Y0 Z0 F100\n");
    let result = split(&program, SplitPlane::at_x(0.0), 2.0);

    assert_eq!(
        lines(&result.left),
        vec!["G0 X-5 Y0 Z0", "G1 X0 Y0 Z0 F100", "G0 Z2"]
    );
    assert_eq!(
        lines(&result.right),
        vec!["G0 Z2", "G0 X0 Y0", "G1 Z0 F100", "G1 X5 Y0 Z0", "G0 Z2"]
    );
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_clockwise_half_circle_crosses_below_center() {
    let program = parse("G0 X5 Y0 Z0\nG2 X-5 Y0 Z-2 I-5 J0 F50\n");
    let result = split(&program, SplitPlane::at_x(0.0), 2.0);

    let right = xy_cuts(&result.right);
    let left = xy_cuts(&result.left);
    let crossing = right.last().unwrap().1;
    assert!(crossing.approx_eq(&Point::new(0.0, -5.0, -1.0), 1e-9));
    assert!(left.first().unwrap().0.approx_eq(&crossing, 1e-9));
    assert!(left.last().unwrap().1.approx_eq(&Point::new(-5.0, 0.0, -2.0), 1e-9));

    assert_eq!(
        lines(&result.right),
        vec!["G0 X5 Y0 Z0", "G2 X0 Y-5 Z-1 I-5 J0 F50", "G0 Z2"]
    );
    assert_eq!(
        lines(&result.left),
        vec![
            "G0 Z2",
            "G0 X0 Y-5",
            "G1 Z-1 F50",
            "G2 X-5 Y0 Z-2 I0 J5",
            "G0 Z2"
        ]
    );
}

#[test]
fn test_counterclockwise_half_circle_crosses_above_center() {
    let program = parse("G0 X5 Y0 Z0\nG3 X-5 Y0 Z-2 I-5 J0 F50\n");
    let result = split(&program, SplitPlane::at_x(0.0), 2.0);

    let crossing = xy_cuts(&result.right).last().unwrap().1;
    assert!(crossing.approx_eq(&Point::new(0.0, 5.0, -1.0), 1e-9));
    assert_eq!(
        lines(&result.left)[3],
        "G3 X-5 Y0 Z-2 I0 J-5",
        "second half carries its own center offset"
    );
}

#[test]
fn test_full_circle_three_pieces() {
    // circle of radius 5 around (2, 0), starting and ending on the right
    let program = parse("G0 X7 Y0 Z-1\nG3 X7 Y0 I-5 J0 F80\n");
    let result = split(&program, SplitPlane::at_x(0.0), 3.0);

    let arcs_right: Vec<String> = lines(&result.right)
        .into_iter()
        .filter(|l| l.starts_with("G3"))
        .collect();
    let arcs_left: Vec<String> = lines(&result.left)
        .into_iter()
        .filter(|l| l.starts_with("G3"))
        .collect();
    assert_eq!(arcs_right.len(), 2);
    assert_eq!(arcs_left.len(), 1);

    // right side re-approaches for the closing piece
    let right = lines(&result.right);
    assert_eq!(right.iter().filter(|l| *l == "G0 Z3").count(), 2);
}

#[test]
fn test_rotated_plane() {
    // boundary along y = 0 through (10, 0); local right is world y > 0
    let plane = SplitPlane::new(Point::xy(10.0, 0.0), 90.0);
    let program = parse("G0 X10 Y-5 Z-1\nG1 X10 Y5 F200\n");
    let result = split(&program, plane, 2.0);

    let left = xy_cuts(&result.left);
    let right = xy_cuts(&result.right);
    assert_eq!(left.len(), 1);
    assert_eq!(right.len(), 1);
    assert!(left[0].1.approx_eq(&Point::new(10.0, 0.0, -1.0), 1e-9));
    assert!(right[0].0.approx_eq(&Point::new(10.0, 0.0, -1.0), 1e-9));
    assert!(right[0].1.approx_eq(&Point::new(10.0, 5.0, -1.0), 1e-9));
}

#[test]
fn test_rapids_follow_destination() {
    let program = parse("G0 X3 Y0\nG0\nG0 X0 Y4\nG0 X-2 Y1\n");
    let result = split(&program, SplitPlane::at_x(0.0), 5.0);

    assert_eq!(
        lines(&result.right),
        vec!["G0 X3 Y0 Z0", "G0 X0 Y4 Z0", "G0 Z5"]
    );
    assert_eq!(
        lines(&result.left),
        vec!["G0 X0 Y4 Z0", "G0 X-2 Y1 Z0", "G0 Z5"]
    );
}

#[test]
fn test_retract_on_other_side_is_repeated() {
    // the program's own retract lands on the left, while the right half's
    // tool is still down at the end of its last piece
    let program = parse(
        "G0 X-5 Y0 Z5\nG1 Z-1 F100\nG1 X5\nG1 X-5 Y1\nG0 Z5\nG0 X10 Y10\nG1 X12 Y10\n",
    );
    let result = split(&program, SplitPlane::at_x(0.0), 5.0);

    assert_eq!(
        lines(&result.right),
        vec![
            "G0 Z5",
            "G0 X0 Y0",
            "G1 Z-1 F100",
            "G1 X5 Y0 Z-1",
            "G1 X0 Y0.5 Z-1",
            "G0 Z5",
            "G0 X10 Y10 Z5",
            "G1 X12 Y10 Z5",
            "G0 Z5"
        ]
    );
    assert_xy_rapids_start_clear(&result.left, 5.0);
    assert_xy_rapids_start_clear(&result.right, 5.0);
}

#[test]
fn test_rapids_leave_from_clearance_on_both_sides() {
    let program = parse(
        "\
G0 X-8 Y-4 Z3
G1 Z-2 F200
G1 X8 Y-4
G1 X8 Y0
G1 X-8 Y0
G0 Z3
G0 X-8 Y4
G1 Z-2
G1 X8 Y4
G0 Z3
G0 X6 Y9
G1 Z-2
G1 X-6 Y9
G0 Z3
",
    );
    for plane in [
        SplitPlane::at_x(0.0),
        SplitPlane::at_x(-3.0),
        SplitPlane::new(Point::xy(0.0, 2.0), 35.0),
    ] {
        let result = split(&program, plane, 3.0);
        assert_xy_rapids_start_clear(&result.left, 3.0);
        assert_xy_rapids_start_clear(&result.right, 3.0);
    }
}

#[test]
fn test_arc_starting_next_to_boundary_stays_whole() {
    // the start is 5e-7 left of the plane; the arc itself heads right
    let program = parse("G0 X0 Y4 Z-1\nG2 X8 Y0 I3 J-4 F100\n");
    let result = split(&program, SplitPlane::at_x(5e-7), 5.0);

    assert!(lines(&result.right).contains(&"G2 X8 Y0 Z-1 I3 J-4 F100".to_string()));
    assert!(!lines(&result.left).iter().any(|l| l.starts_with("G2")));
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_both_sides_end_retracted() {
    let program = parse("G0 X-1 Y-1 Z-2\nG1 X-1 Y-9 F100\n");
    let result = split(&program, SplitPlane::at_x(0.0), 7.5);
    for side in [Side::Left, Side::Right] {
        assert_eq!(
            result.side(side).last().map(|i| i.to_gcode()),
            Some("G0 Z7.5".to_string())
        );
    }
    // nothing but the retract reaches the empty side
    assert_eq!(result.right.len(), 1);
}

#[test]
fn test_radius_mismatch_reported() {
    let program = parse("G0 X5 Y0 Z0\nG2 X-5.5 Y0 I-5 J0 F100\n");
    let result = split(&program, SplitPlane::at_x(0.0), 2.0);

    assert_eq!(result.diagnostics.len(), 1);
    match &result.diagnostics[0] {
        SplitDiagnostic::RadiusMismatch {
            index,
            start_radius,
            end_radius,
        } => {
            assert_eq!(*index, 1);
            assert!((start_radius - 5.0).abs() < 1e-9);
            assert!((end_radius - 5.5).abs() < 1e-9);
        }
        other => panic!("unexpected diagnostic {:?}", other),
    }
    // still split and emitted on both sides
    assert!(lines(&result.left).iter().any(|l| l.starts_with("G2")));
    assert!(lines(&result.right).iter().any(|l| l.starts_with("G2")));
}

#[test]
fn test_zero_radius_arc_split_as_line() {
    let program = parse("G0 X5 Y0 Z0\nG2 X-5 Y0 I0 J0 F100\n");
    let result = split(&program, SplitPlane::at_x(0.0), 2.0);

    assert_eq!(
        result.diagnostics,
        vec![SplitDiagnostic::ZeroRadiusArc { index: 1 }]
    );
    assert_eq!(lines(&result.right)[1], "G1 X0 Y0 Z0 F100");
    assert_eq!(lines(&result.left)[3], "G1 X-5 Y0 Z0");
}

#[test]
fn test_custom_tolerance_silences_mismatch() {
    let options = SplitOptions {
        z_clearance: 2.0,
        arc_radius_tolerance: 1.0,
        ..SplitOptions::default()
    };
    let splitter = PlaneSplitter::new(SplitPlane::at_x(0.0), options).unwrap();
    let program = parse("G0 X5 Y0 Z0\nG2 X-5.5 Y0 I-5 J0 F100\n");
    assert!(splitter.split(&program).diagnostics.is_empty());
}
