//! Block segmentation
//!
//! Groups a flat instruction list into blocks, each opened by a rapid move
//! with an explicit X and/or Y. Blocks can be reordered independently by a
//! tour optimizer and are the unit the plane splitter reasons about.

use gcodesplit_core::Point;
use thiserror::Error;
use tracing::debug;

use crate::gcode::Instruction;
use crate::render::{ArcStepper, Bounds, RenderCursor, RenderSettings};

/// Error applying a block order
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SegmentError {
    /// The order is not a permutation of the block indices
    #[error("Invalid block order for {expected} blocks: {reason}")]
    NotAPermutation { expected: usize, reason: String },
}

/// Instructions sharing one approach point
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    instructions: Vec<Instruction>,
    approach: Point,
    bounds: Bounds,
}

impl Block {
    /// Point reached by the opening rapid move (millimeters)
    pub fn approach(&self) -> Point {
        self.approach
    }

    /// Bounds of every segment the block renders
    pub fn bounds(&self) -> Bounds {
        self.bounds
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
}

/// A program cut into header, blocks and footer
#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation {
    /// Everything before the first qualifying rapid move
    pub header: Vec<Instruction>,
    pub blocks: Vec<Block>,
    /// Non-renderable instructions after the last renderable one
    pub footer: Vec<Instruction>,
}

impl Segmentation {
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Header, blocks in their original order, footer
    pub fn instructions(&self) -> Vec<Instruction> {
        let mut out = self.header.clone();
        for block in &self.blocks {
            out.extend_from_slice(&block.instructions);
        }
        out.extend_from_slice(&self.footer);
        out
    }

    /// Header, blocks in `order`, footer.
    ///
    /// `order` must name every block index exactly once.
    pub fn reassemble(&self, order: &[usize]) -> Result<Vec<Instruction>, SegmentError> {
        let expected = self.blocks.len();
        if order.len() != expected {
            return Err(SegmentError::NotAPermutation {
                expected,
                reason: format!("got {} indices", order.len()),
            });
        }
        let mut seen = vec![false; expected];
        for &index in order {
            match seen.get_mut(index) {
                None => {
                    return Err(SegmentError::NotAPermutation {
                        expected,
                        reason: format!("index {} out of range", index),
                    })
                }
                Some(true) => {
                    return Err(SegmentError::NotAPermutation {
                        expected,
                        reason: format!("index {} repeated", index),
                    })
                }
                Some(slot) => *slot = true,
            }
        }

        let mut out = self.header.clone();
        for &index in order {
            out.extend_from_slice(&self.blocks[index].instructions);
        }
        out.extend_from_slice(&self.footer);
        Ok(out)
    }
}

/// Segment `instructions` into blocks.
///
/// Returns `None` when no rapid move with an explicit X or Y exists.
pub fn segment(instructions: &[Instruction], settings: &RenderSettings) -> Option<Segmentation> {
    let mut header: Vec<Instruction> = Vec::new();
    let mut groups: Vec<Vec<Instruction>> = Vec::new();
    let mut pending: Vec<Instruction> = Vec::new();

    for instruction in instructions {
        if !(instruction.is_rapid() && instruction.has_xy()) {
            pending.push(instruction.clone());
            continue;
        }

        let opening = resolve_missing_axes(instruction, &pending, groups.last(), &header);
        match groups.last_mut() {
            Some(previous) => previous.append(&mut pending),
            None => header.append(&mut pending),
        }
        groups.push(vec![opening]);
    }

    let Some(last) = groups.last_mut() else {
        debug!("No positioning move found; nothing to segment");
        return None;
    };
    let keep = pending
        .iter()
        .rposition(Instruction::can_render)
        .map_or(0, |index| index + 1);
    let footer = pending.split_off(keep);
    last.append(&mut pending);

    let blocks = measure_blocks(&header, groups, settings);
    debug!(
        "Segmented {} instructions into {} blocks (header {}, footer {})",
        instructions.len(),
        blocks.len(),
        header.len(),
        footer.len()
    );

    Some(Segmentation {
        header,
        blocks,
        footer,
    })
}

/// Copy of `rapid` with a missing X or Y filled from the latest renderable
/// instruction that carries it, searching `pending`, then the open block,
/// then the header. Defaults to 0. Incremental moves are left untouched.
fn resolve_missing_axes(
    rapid: &Instruction,
    pending: &[Instruction],
    open_block: Option<&Vec<Instruction>>,
    header: &[Instruction],
) -> Instruction {
    if !rapid.absolute || (rapid.x.is_some() && rapid.y.is_some()) {
        return rapid.clone();
    }

    let history = || {
        pending
            .iter()
            .rev()
            .chain(open_block.into_iter().flat_map(|b| b.iter().rev()))
            .chain(header.iter().rev())
            .filter(|i| i.can_render() && i.absolute)
    };

    let mut resolved = rapid.clone();
    if resolved.x.is_none() {
        resolved.x = Some(history().find_map(|i| i.x).unwrap_or(0.0));
    }
    if resolved.y.is_none() {
        resolved.y = Some(history().find_map(|i| i.y).unwrap_or(0.0));
    }
    resolved
}

fn measure_blocks(
    header: &[Instruction],
    groups: Vec<Vec<Instruction>>,
    settings: &RenderSettings,
) -> Vec<Block> {
    let stepper = ArcStepper::new(*settings);
    let mut cursor = RenderCursor::default();
    for instruction in header {
        instruction.render(&mut cursor, &stepper);
    }

    groups
        .into_iter()
        .map(|instructions| {
            let mut bounds = Bounds::new();
            let mut approach = cursor.position;
            for (index, instruction) in instructions.iter().enumerate() {
                for segment in instruction.render(&mut cursor, &stepper) {
                    // the travel into the block is not part of it
                    if index > 0 {
                        bounds.include(segment.start);
                    }
                    bounds.include(segment.end);
                }
                if index == 0 {
                    approach = cursor.position;
                }
            }
            Block {
                instructions,
                approach,
                bounds,
            }
        })
        .collect()
}
