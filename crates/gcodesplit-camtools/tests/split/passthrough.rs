//! Non-motion lines and modal rewriting

use gcodesplit_camtools::{split, SplitPlane};

use crate::common::{lines, parse};

#[test]
fn test_non_motion_lines_reach_both_sides() {
    let program = parse(
        "(roughing pass)\nG21\nM3 S12000\nG0 X4 Y0 Z0\nG4 P0.5\nG1 X6 Y0 F300\nM5\n",
    );
    let result = split(&program, SplitPlane::at_x(0.0), 2.0);

    let expected_shared = ["(roughing pass)", "G21", "M3 S12000", "G4 P0.5", "M5"];
    for side in [&result.left, &result.right] {
        let out = lines(side);
        let shared: Vec<&str> = out
            .iter()
            .map(String::as_str)
            .filter(|l| expected_shared.contains(l))
            .collect();
        assert_eq!(shared, expected_shared);
    }
    assert!(!lines(&result.left).iter().any(|l| l.starts_with("G1")));
}

#[test]
fn test_incremental_program_becomes_absolute() {
    let program = parse("G91\nG0 X-5 Y0\nG1 X10 F100\n");
    let result = split(&program, SplitPlane::at_x(0.0), 2.0);

    assert_eq!(
        lines(&result.left),
        vec!["G90", "G0 X-5 Y0 Z0", "G1 X0 Y0 Z0 F100", "G0 Z2"]
    );
    assert_eq!(
        lines(&result.right),
        vec!["G90", "G0 Z2", "G0 X0 Y0", "G1 Z0 F100", "G1 X5 Y0 Z0", "G0 Z2"]
    );
    assert!(result.left.iter().all(|i| i.absolute));
}

#[test]
fn test_modal_motion_gets_explicit_word() {
    let program = parse("G0 X1 Y1 Z-1\nG1 X2 Y1 F150\nX3 Y1\n");
    let result = split(&program, SplitPlane::at_x(0.0), 2.0);
    assert_eq!(
        lines(&result.right),
        vec!["G0 X1 Y1 Z-1", "G1 X2 Y1 Z-1 F150", "G1 X3 Y1 Z-1", "G0 Z2"]
    );
}

#[test]
fn test_comment_kept_on_first_piece_only() {
    let program = parse("G0 X-2 Y0 Z0\nG1 X2 Y0 F100 (across)\n");
    let result = split(&program, SplitPlane::at_x(0.0), 2.0);
    assert_eq!(lines(&result.left)[1], "G1 X0 Y0 Z0 F100 (across)");
    assert_eq!(lines(&result.right)[3], "G1 X2 Y0 Z0");
}
