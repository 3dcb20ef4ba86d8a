use gcodesplit_camtools::{rotate_program, split, translate, SplitPlane};
use gcodesplit_core::Point;
use gcodesplit_toolpath::{render_instructions, Program, RenderSettings};

#[test]
fn test_rehome_right_half() {
    let program = Program::parse("G0 X20 Y5 Z0\nG1 X60 Y5 F500\nG1 X60 Y25\n")
        .program
        .into_instructions();
    let halves = split(&program, SplitPlane::at_x(40.0), 3.0);

    let rehomed = translate(&halves.right, Point::xy(-40.0, 0.0)).unwrap();
    let toolpath = render_instructions(&rehomed, &RenderSettings::default());
    assert!((toolpath.bounds.min_x - 0.0).abs() < 1e-9);
    assert!((toolpath.bounds.max_x - 20.0).abs() < 1e-9);
    assert_eq!(toolpath.end, Point::new(20.0, 25.0, 3.0));
}

#[test]
fn test_rotation_preserves_cut_length() {
    let program = Program::parse("G0 X0 Y0 Z-1\nG1 X10 Y0 F100\nG2 X20 Y0 I5 J0\nG1 X20 Y-7\n")
        .program
        .into_instructions();
    let settings = RenderSettings::default();
    let before = render_instructions(&program, &settings).cut_length();

    let turned = rotate_program(&program, Point::xy(3.0, -2.0), 37.0).unwrap();
    let after = render_instructions(&turned, &settings).cut_length();
    assert!((before - after).abs() < 1e-6, "{} vs {}", before, after);
}
