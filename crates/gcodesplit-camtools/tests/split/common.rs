use gcodesplit_core::Point;
use gcodesplit_toolpath::{render_instructions, Instruction, Program, RenderSettings, SegmentKind};

pub fn parse(text: &str) -> Vec<Instruction> {
    let parsed = Program::parse(text);
    assert!(parsed.issues.is_empty(), "parse issues: {:?}", parsed.issues);
    parsed.program.into_instructions()
}

pub fn lines(instructions: &[Instruction]) -> Vec<String> {
    instructions.iter().map(|i| i.to_gcode()).collect()
}

/// Rendered cut segments that move in XY, in travel order
pub fn xy_cuts(instructions: &[Instruction]) -> Vec<(Point, Point)> {
    render_instructions(instructions, &RenderSettings::default())
        .segments
        .into_iter()
        .filter(|s| s.kind != SegmentKind::Rapid)
        .filter(|s| s.start.distance_xy(&s.end) > 1e-9)
        .map(|s| (s.start, s.end))
        .collect()
}

pub fn xy_cut_length(instructions: &[Instruction]) -> f64 {
    xy_cuts(instructions)
        .iter()
        .map(|(a, b)| a.distance_xy(b))
        .sum()
}

