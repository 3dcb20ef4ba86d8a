//! Whole-program parsing, rendering and serialization

use gcodesplit_core::{GcodeError, Point};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::gcode::{GcodeParser, Instruction};
use crate::render::{ArcStepper, Bounds, RenderCursor, RenderSettings, RenderedSegment, SegmentKind};

/// A flat instruction list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    instructions: Vec<Instruction>,
}

/// A malformed word found while parsing a program
#[derive(Debug, Clone, PartialEq)]
pub struct ParseIssue {
    /// 1-based source line
    pub line_number: usize,
    pub error: GcodeError,
}

/// Parse result: the program plus every issue found on the way
#[derive(Debug, Clone, Default)]
pub struct ParsedProgram {
    pub program: Program,
    pub issues: Vec<ParseIssue>,
}

impl ParsedProgram {
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

impl Program {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Parse program text line by line.
    ///
    /// A malformed word never aborts the parse: the word is dropped from its
    /// instruction and reported. Empty lines are filtered out.
    pub fn parse(text: &str) -> ParsedProgram {
        let mut parser = GcodeParser::new();
        let mut instructions = Vec::new();
        let mut issues = Vec::new();

        for (index, line) in text.lines().enumerate() {
            let line_number = index + 1;
            let (instruction, errors) = parser.parse_line_lenient(line, line_number);
            for error in errors {
                warn!("Skipping malformed input at line {}: {}", line_number, error);
                issues.push(ParseIssue { line_number, error });
            }
            if !instruction.is_empty() {
                instructions.push(instruction);
            }
        }

        debug!(
            "Parsed {} instructions with {} issues",
            instructions.len(),
            issues.len()
        );
        ParsedProgram {
            program: Self { instructions },
            issues,
        }
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    /// Render every instruction starting from the origin
    pub fn render(&self, settings: &RenderSettings) -> RenderedToolpath {
        render_instructions(&self.instructions, settings)
    }

    /// One line per instruction, each `\n`-terminated
    pub fn to_gcode(&self) -> String {
        let mut out = String::new();
        for instruction in &self.instructions {
            out.push_str(&instruction.to_gcode());
            out.push('\n');
        }
        out
    }
}

impl From<Vec<Instruction>> for Program {
    fn from(instructions: Vec<Instruction>) -> Self {
        Self::new(instructions)
    }
}

impl FromIterator<Instruction> for Program {
    fn from_iter<T: IntoIterator<Item = Instruction>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

/// Render a slice of instructions starting from the origin
pub fn render_instructions(instructions: &[Instruction], settings: &RenderSettings) -> RenderedToolpath {
    let stepper = ArcStepper::new(*settings);
    let mut cursor = RenderCursor::default();
    let mut segments = Vec::new();
    for instruction in instructions {
        segments.extend(instruction.render(&mut cursor, &stepper));
    }
    RenderedToolpath {
        segments,
        bounds: cursor.bounds,
        end: cursor.position,
    }
}

/// Rendered segments of a program with their bounds and final position
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedToolpath {
    pub segments: Vec<RenderedSegment>,
    pub bounds: Bounds,
    pub end: Point,
}

impl RenderedToolpath {
    /// Total length of every segment
    pub fn path_length(&self) -> f64 {
        self.segments.iter().map(RenderedSegment::length).sum()
    }

    /// Total length of feed (non-rapid) segments
    pub fn cut_length(&self) -> f64 {
        self.segments
            .iter()
            .filter(|s| s.kind.is_cut())
            .map(RenderedSegment::length)
            .sum()
    }

    pub fn rapid_length(&self) -> f64 {
        self.path_length() - self.cut_length()
    }

    pub fn count(&self, kind: SegmentKind) -> usize {
        self.segments.iter().filter(|s| s.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filters_empty_lines() {
        let parsed = Program::parse("G21\n\n   \nG0 X1\n(note)\n");
        assert_eq!(parsed.program.len(), 3);
        assert!(!parsed.has_issues());
        assert!(parsed.program.instructions()[2].is_comment_only());
    }

    #[test]
    fn test_parse_reports_issue_and_continues() {
        let parsed = Program::parse("G0 X1\nG1 X$ Y2\nG1 Y3");
        assert_eq!(parsed.program.len(), 3);
        assert_eq!(parsed.issues.len(), 2);
        assert!(parsed.issues.iter().all(|i| i.line_number == 2));
        assert_eq!(parsed.program.instructions()[1].y, Some(2.0));
    }

    #[test]
    fn test_lengths() {
        let program = Program::parse("G0 X0 Y0\nG1 X3 Y4\nG0 X3 Y10").program;
        let toolpath = program.render(&RenderSettings::default());
        assert_eq!(toolpath.cut_length(), 5.0);
        assert_eq!(toolpath.rapid_length(), 6.0);
        assert_eq!(toolpath.count(SegmentKind::Rapid), 2);
        assert_eq!(toolpath.end, Point::xy(3.0, 10.0));
    }
}
