//! Plane splitting
//!
//! Partitions a program into two independently runnable programs, one per
//! side of a vertical [`SplitPlane`]. Moves that straddle the plane are cut
//! at the exact crossing, and every side retracts and re-approaches before a
//! cut that does not continue from where its tool was left.
//!
//! The engine works in program units and emits every motion with absolute
//! X, Y and Z so that each side stands on its own.

pub mod arc;
pub mod linear;
pub mod side;

use gcodesplit_core::{ArcDirection, Point, EPSILON};
use gcodesplit_toolpath::{Instruction, MotionClass};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::{ParameterError, ParameterResult, SplitDiagnostic};
use crate::plane::{Side, SplitPlane};
use arc::split_arc;
use linear::{classify_linear, LinearSplit};
use side::{motion, Cut, SideWriter};

/// Shortest sub-arc kept after an arc is cut
pub const DEFAULT_MIN_ARC_LENGTH: f64 = 0.025;

/// Largest accepted difference between start and end radius of an arc
pub const DEFAULT_ARC_RADIUS_TOLERANCE: f64 = 0.01;

/// Distance from the boundary within which a point counts as on it
pub const DEFAULT_BOUNDARY_EPSILON: f64 = 1e-6;

/// Split tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitOptions {
    /// Retract height used before every re-approach and at the end
    pub z_clearance: f64,
    pub min_arc_length: f64,
    pub arc_radius_tolerance: f64,
    pub boundary_epsilon: f64,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            z_clearance: 5.0,
            min_arc_length: DEFAULT_MIN_ARC_LENGTH,
            arc_radius_tolerance: DEFAULT_ARC_RADIUS_TOLERANCE,
            boundary_epsilon: DEFAULT_BOUNDARY_EPSILON,
        }
    }
}

impl SplitOptions {
    pub fn with_clearance(z_clearance: f64) -> Self {
        Self {
            z_clearance,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> ParameterResult<()> {
        let finite = [
            ("z_clearance", self.z_clearance),
            ("min_arc_length", self.min_arc_length),
            ("arc_radius_tolerance", self.arc_radius_tolerance),
            ("boundary_epsilon", self.boundary_epsilon),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ParameterError::InvalidValue {
                    name: name.to_string(),
                    reason: "must be finite".to_string(),
                });
            }
        }
        if self.min_arc_length < 0.0 {
            return Err(ParameterError::OutOfRange {
                name: "min_arc_length".to_string(),
                value: self.min_arc_length,
                min: 0.0,
                max: f64::MAX,
            });
        }
        if self.arc_radius_tolerance < 0.0 {
            return Err(ParameterError::OutOfRange {
                name: "arc_radius_tolerance".to_string(),
                value: self.arc_radius_tolerance,
                min: 0.0,
                max: f64::MAX,
            });
        }
        if self.boundary_epsilon < 0.0 {
            return Err(ParameterError::OutOfRange {
                name: "boundary_epsilon".to_string(),
                value: self.boundary_epsilon,
                min: 0.0,
                max: f64::MAX,
            });
        }
        Ok(())
    }
}

/// Both halves of a split program
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitResult {
    pub left: Vec<Instruction>,
    pub right: Vec<Instruction>,
    pub diagnostics: Vec<SplitDiagnostic>,
}

impl SplitResult {
    pub fn side(&self, side: Side) -> &[Instruction] {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

/// Splits programs along one plane
#[derive(Debug, Clone)]
pub struct PlaneSplitter {
    plane: SplitPlane,
    options: SplitOptions,
}

impl PlaneSplitter {
    pub fn new(plane: SplitPlane, options: SplitOptions) -> ParameterResult<Self> {
        options.validate()?;
        if !plane.angle_degrees.is_finite() || !plane.origin.is_finite() {
            return Err(ParameterError::InvalidValue {
                name: "plane".to_string(),
                reason: "origin and angle must be finite".to_string(),
            });
        }
        Ok(Self { plane, options })
    }

    pub fn plane(&self) -> &SplitPlane {
        &self.plane
    }

    pub fn options(&self) -> &SplitOptions {
        &self.options
    }

    /// Split `instructions` into left and right programs
    pub fn split(&self, instructions: &[Instruction]) -> SplitResult {
        let mut run = SplitRun::new(self);
        for (index, instruction) in instructions.iter().enumerate() {
            run.step(index, instruction);
        }

        let z = self.options.z_clearance;
        let result = SplitResult {
            left: run.left.finish(z),
            right: run.right.finish(z),
            diagnostics: run.diagnostics,
        };
        debug!(
            "Split {} instructions into {} left / {} right ({} diagnostics)",
            instructions.len(),
            result.left.len(),
            result.right.len(),
            result.diagnostics.len()
        );
        result
    }
}

/// Split with default tuning and the given retract height
pub fn split(instructions: &[Instruction], plane: SplitPlane, z_clearance: f64) -> SplitResult {
    let splitter = PlaneSplitter {
        plane,
        options: SplitOptions::with_clearance(z_clearance),
    };
    splitter.split(instructions)
}

/// State of one pass over a program
struct SplitRun<'a> {
    plane: SplitPlane,
    options: &'a SplitOptions,
    /// Running position in program units
    position: Point,
    feed: Option<f64>,
    left: SideWriter,
    right: SideWriter,
    diagnostics: Vec<SplitDiagnostic>,
}

impl<'a> SplitRun<'a> {
    fn new(splitter: &'a PlaneSplitter) -> Self {
        Self {
            plane: splitter.plane,
            options: &splitter.options,
            position: Point::ORIGIN,
            feed: None,
            left: SideWriter::new(Side::Left),
            right: SideWriter::new(Side::Right),
            diagnostics: Vec::new(),
        }
    }

    fn writer(&mut self, side: Side) -> &mut SideWriter {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    fn step(&mut self, index: usize, instruction: &Instruction) {
        if let Some(f) = instruction.f {
            self.feed = Some(f);
        }

        let Some(class) = instruction.motion.filter(|m| m.is_renderable()) else {
            let copy = absolute_mode_copy(instruction);
            self.left.push_passthrough(copy.clone());
            self.right.push_passthrough(copy);
            return;
        };

        let start = self.position;
        let end = instruction.program_destination(start);
        self.position = end;

        match class {
            MotionClass::Rapid => self.rapid(instruction, start, end),
            MotionClass::Linear => self.linear(index, instruction, start, end),
            _ => match instruction.arc_direction() {
                Some(direction) => self.arc(index, instruction, direction, start, end),
                None => self.linear(index, instruction, start, end),
            },
        }
    }

    fn rapid(&mut self, instruction: &Instruction, start: Point, end: Point) {
        if !instruction.has_coordinates() {
            trace!("Dropping rapid without coordinates");
            return;
        }

        let mut rapid = instruction.clone();
        rapid.command = absolute_tag(&instruction.tag_for(MotionClass::Rapid));
        rapid.x = Some(end.x);
        rapid.y = Some(end.y);
        rapid.z = Some(end.z);
        rapid.i = None;
        rapid.j = None;
        rapid.f = None;
        rapid.absolute = true;

        let z = self.options.z_clearance;
        match self.plane.side_of(end, self.options.boundary_epsilon) {
            Some(side) => {
                trace!("Rapid to {} goes {}", end, side);
                self.writer(side).push_rapid(rapid, start, end, z);
            }
            None => {
                trace!("Rapid to {} is on the boundary", end);
                self.left.push_rapid(rapid.clone(), start, end, z);
                self.right.push_rapid(rapid, start, end, z);
            }
        }
    }

    fn linear(&mut self, index: usize, instruction: &Instruction, start: Point, end: Point) {
        if start.distance_to(&end) < EPSILON {
            trace!("Instruction {}: zero-length move dropped", index);
            return;
        }

        let first = |to: Point| {
            let mut first = instruction.clone();
            first.motion = Some(MotionClass::Linear);
            first.command = absolute_tag(&instruction.tag_for(MotionClass::Linear));
            first.i = None;
            first.j = None;
            set_end(&mut first, to);
            first
        };

        match classify_linear(&self.plane, start, end, self.options.boundary_epsilon) {
            LinearSplit::Whole(side) => {
                trace!("Instruction {}: linear move on {}", index, side);
                self.cut(side, start, end, first(end));
            }
            LinearSplit::Both => {
                trace!("Instruction {}: linear move along the boundary", index);
                self.cut(Side::Left, start, end, first(end));
                self.cut(Side::Right, start, end, first(end));
            }
            LinearSplit::Crossing { near, at } => {
                trace!("Instruction {}: linear move crosses at {}", index, at);
                self.cut(near, start, at, first(at));
                let mut rest = motion(MotionClass::Linear, instruction);
                set_end(&mut rest, end);
                self.cut(near.other(), at, end, rest);
            }
        }
    }

    fn arc(
        &mut self,
        index: usize,
        instruction: &Instruction,
        direction: ArcDirection,
        start: Point,
        end: Point,
    ) {
        let center = instruction.program_arc_center(start);
        if start.distance_xy(&center) < EPSILON {
            self.diagnostics
                .push(SplitDiagnostic::ZeroRadiusArc { index });
            self.linear(index, instruction, start, end);
            return;
        }

        let split = split_arc(
            &self.plane,
            start,
            end,
            center,
            direction,
            self.options.min_arc_length,
            self.options.boundary_epsilon,
        );
        if (split.start_radius - split.end_radius).abs() > self.options.arc_radius_tolerance {
            warn!(
                "Instruction {}: arc radius mismatch (start {:.4}, end {:.4}); using declared center",
                index, split.start_radius, split.end_radius
            );
            self.diagnostics.push(SplitDiagnostic::RadiusMismatch {
                index,
                start_radius: split.start_radius,
                end_radius: split.end_radius,
            });
        }
        trace!(
            "Instruction {}: arc split into {} pieces at {} crossings",
            index,
            split.pieces.len(),
            split.crossings.len()
        );

        let class = if direction.is_clockwise() {
            MotionClass::ArcCw
        } else {
            MotionClass::ArcCcw
        };
        for (n, piece) in split.pieces.iter().enumerate() {
            let mut out = if n == 0 && piece.start == start {
                let mut first = instruction.clone();
                first.command = absolute_tag(&instruction.tag_for(class));
                first
            } else {
                motion(class, instruction)
            };
            set_end(&mut out, piece.end);
            if instruction.arc_absolute {
                out.i = Some(center.x);
                out.j = Some(center.y);
            } else {
                out.i = Some(center.x - piece.start.x);
                out.j = Some(center.y - piece.start.y);
            }
            self.cut(piece.side, piece.start, piece.end, out);
        }
    }

    fn cut(&mut self, side: Side, start: Point, end: Point, instruction: Instruction) {
        let plane = self.plane;
        let z_clearance = self.options.z_clearance;
        let feed = self.feed;
        self.writer(side).push_cut(
            Cut {
                start,
                end,
                instruction,
            },
            &plane,
            z_clearance,
            feed,
        );
    }
}

/// Absolute explicit end point on an emitted motion
fn set_end(instruction: &mut Instruction, end: Point) {
    instruction.x = Some(end.x);
    instruction.y = Some(end.y);
    instruction.z = Some(end.z);
    instruction.f = None;
    instruction.absolute = true;
}

/// Non-motion instruction in absolute mode
fn absolute_mode_copy(instruction: &Instruction) -> Instruction {
    let mut copy = instruction.clone();
    copy.command = absolute_tag(&instruction.command);
    copy.absolute = true;
    copy
}

/// Tag with any `G91` rewritten to `G90`, since both outputs carry
/// absolute coordinates only
fn absolute_tag(command: &str) -> String {
    if !command.split_whitespace().any(is_g91) {
        return command.to_string();
    }
    command
        .split_whitespace()
        .map(|word| if is_g91(word) { "G90" } else { word })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_g91(word: &str) -> bool {
    let mut chars = word.chars();
    matches!(chars.next(), Some('G') | Some('g'))
        && chars.as_str().parse::<f64>().is_ok_and(|n| n == 91.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_g91_rewritten() {
        let copy = absolute_mode_copy(&Instruction::command_line("G91 G91.1 G21"));
        assert_eq!(copy.command, "G90 G91.1 G21");
        assert!(copy.absolute);
        assert_eq!(absolute_tag("N10  M3"), "N10  M3");
        assert!(is_g91("g091"));
        assert!(!is_g91("G91.1"));
    }

    #[test]
    fn test_options_validation() {
        assert!(SplitOptions::default().validate().is_ok());
        let bad = SplitOptions {
            min_arc_length: -1.0,
            ..SplitOptions::default()
        };
        assert!(bad.validate().is_err());
        let bad = SplitOptions {
            z_clearance: f64::NAN,
            ..SplitOptions::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_splitter_rejects_bad_plane() {
        let plane = SplitPlane::new(Point::ORIGIN, f64::INFINITY);
        assert!(PlaneSplitter::new(plane, SplitOptions::default()).is_err());
    }
}
