//! Output stream for one side of a split
//!
//! Tracks where that side's tool was last left and which feed it last
//! emitted, and synthesizes retract / reposition / plunge moves whenever a
//! cut does not start where the tool already is.

use gcodesplit_core::{Point, EPSILON};
use gcodesplit_toolpath::{Instruction, MotionClass};
use tracing::trace;

use crate::plane::{Side, SplitPlane};

/// Tolerance for "the tool is already at the start of this cut"
pub const POSITION_TOLERANCE: f64 = 1e-6;

/// A cut ready to emit: geometry plus the instruction that traces it.
/// The instruction's F word is filled in by the writer.
#[derive(Debug, Clone)]
pub struct Cut {
    pub start: Point,
    pub end: Point,
    pub instruction: Instruction,
}

#[derive(Debug, Clone)]
pub struct SideWriter {
    side: Side,
    out: Vec<Instruction>,
    tool_at: Option<Point>,
    feed: Option<f64>,
}

impl SideWriter {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            out: Vec::new(),
            tool_at: None,
            feed: None,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Copy a non-motion instruction through unchanged
    pub fn push_passthrough(&mut self, instruction: Instruction) {
        self.out.push(instruction);
    }

    /// Emit a positioning move from the program position `from` to
    /// `destination`.
    ///
    /// When this side's tool was left somewhere else below `z_clearance`,
    /// it is retracted before moving in XY.
    pub fn push_rapid(
        &mut self,
        instruction: Instruction,
        from: Point,
        destination: Point,
        z_clearance: f64,
    ) {
        if let Some(at) = self.tool_at {
            let displaced = !at.approx_eq(&from, POSITION_TOLERANCE);
            let moves_xy = at.distance_xy(&destination) > POSITION_TOLERANCE;
            if displaced && moves_xy && at.z < z_clearance - POSITION_TOLERANCE {
                trace!(
                    "{} side: retracting from Z{:.4} before rapid",
                    self.side,
                    at.z
                );
                self.out
                    .push(motion(MotionClass::Rapid, &instruction).with_z(z_clearance));
            }
        }
        self.out.push(instruction);
        self.tool_at = Some(destination);
    }

    /// Emit a cut, approaching its start first when the tool is elsewhere.
    ///
    /// `feed` is the program's running feed at this cut.
    pub fn push_cut(
        &mut self,
        cut: Cut,
        plane: &SplitPlane,
        z_clearance: f64,
        feed: Option<f64>,
    ) {
        let positioned = self
            .tool_at
            .is_some_and(|at| at.approx_eq(&cut.start, POSITION_TOLERANCE));

        if !positioned {
            let target = plane.clamp(cut.start, self.side);
            trace!(
                "{} side: approaching ({:.4}, {:.4}, {:.4})",
                self.side,
                target.x,
                target.y,
                cut.start.z
            );
            self.out
                .push(motion(MotionClass::Rapid, &cut.instruction).with_z(z_clearance));
            self.out.push(
                motion(MotionClass::Rapid, &cut.instruction)
                    .with_x(target.x)
                    .with_y(target.y),
            );
            if (cut.start.z - z_clearance).abs() > POSITION_TOLERANCE {
                let mut plunge = motion(MotionClass::Linear, &cut.instruction).with_z(cut.start.z);
                plunge.f = self.take_feed(feed);
                self.out.push(plunge);
            }
        }

        let mut instruction = cut.instruction;
        instruction.f = self.take_feed(feed);
        self.out.push(instruction);
        self.tool_at = Some(cut.end);
    }

    /// Feed word to write: `feed` when it differs from the last one written
    fn take_feed(&mut self, feed: Option<f64>) -> Option<f64> {
        match feed {
            Some(f) if !self.feed.is_some_and(|last| (last - f).abs() <= EPSILON) => {
                self.feed = Some(f);
                Some(f)
            }
            _ => None,
        }
    }

    /// Close the stream with a retract to `z_clearance`
    pub fn finish(mut self, z_clearance: f64) -> Vec<Instruction> {
        let mut retract = Instruction::rapid().with_z(z_clearance);
        if let Some(last) = self.out.last() {
            retract.metric = last.metric;
        }
        self.out.push(retract);
        self.out
    }
}

/// Fresh absolute-mode motion carrying `template`'s unit flags
pub fn motion(class: MotionClass, template: &Instruction) -> Instruction {
    let mut instruction = Instruction::new(class).with_modes_of(template);
    instruction.absolute = true;
    instruction
}
