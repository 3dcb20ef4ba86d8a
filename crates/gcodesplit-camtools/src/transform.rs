//! Rigid transforms over whole programs
//!
//! Both transforms return a fresh instruction list. Only positions change:
//! comments, tags, feeds and modes are carried through untouched.

use gcodesplit_core::{rotate, rotate_about_origin, Point};
use gcodesplit_toolpath::Instruction;
use tracing::debug;

use crate::error::{CamToolError, CamToolResult};

/// Shift every absolute-mode coordinate by `offset`.
///
/// Incremental moves are relative already and stay as written. Arc centers
/// given in absolute form move with the program.
pub fn translate(instructions: &[Instruction], offset: Point) -> CamToolResult<Vec<Instruction>> {
    if !offset.is_finite() {
        return Err(CamToolError::InvalidParameters(format!(
            "translation offset {} is not finite",
            offset
        )));
    }

    let shifted: Vec<Instruction> = instructions
        .iter()
        .map(|instruction| {
            let mut out = instruction.clone();
            if !instruction.can_render() {
                return out;
            }
            if instruction.absolute {
                out.x = instruction.x.map(|x| x + offset.x);
                out.y = instruction.y.map(|y| y + offset.y);
                out.z = instruction.z.map(|z| z + offset.z);
            }
            if instruction.is_arc() && instruction.arc_absolute {
                out.i = instruction.i.map(|i| i + offset.x);
                out.j = instruction.j.map(|j| j + offset.y);
            }
            out
        })
        .collect();

    debug!("Translated {} instructions by {}", shifted.len(), offset);
    Ok(shifted)
}

/// Rotate the program about `center` by `angle_degrees` counterclockwise.
///
/// A rotation mixes X and Y, so every rewritten move carries both axes.
/// Incremental deltas and relative I/J offsets turn as vectors.
pub fn rotate_program(
    instructions: &[Instruction],
    center: Point,
    angle_degrees: f64,
) -> CamToolResult<Vec<Instruction>> {
    if !center.is_finite() || !angle_degrees.is_finite() {
        return Err(CamToolError::InvalidParameters(
            "rotation center and angle must be finite".to_string(),
        ));
    }

    let mut position = Point::ORIGIN;
    let mut rotated = Vec::with_capacity(instructions.len());

    for instruction in instructions {
        let mut out = instruction.clone();
        if !instruction.can_render() {
            rotated.push(out);
            continue;
        }

        let start = position;
        position = instruction.program_destination(start);

        if instruction.has_xy() {
            if instruction.absolute {
                let turned = rotate(position, center, angle_degrees);
                out.x = Some(turned.x);
                out.y = Some(turned.y);
            } else {
                let delta = Point::xy(
                    instruction.x.unwrap_or(0.0),
                    instruction.y.unwrap_or(0.0),
                );
                let turned = rotate_about_origin(delta, angle_degrees);
                out.x = Some(turned.x);
                out.y = Some(turned.y);
            }
        }

        if instruction.is_arc() && (instruction.i.is_some() || instruction.j.is_some()) {
            if instruction.arc_absolute {
                let turned = rotate(instruction.program_arc_center(start), center, angle_degrees);
                out.i = Some(turned.x);
                out.j = Some(turned.y);
            } else {
                let offset = Point::xy(instruction.i.unwrap_or(0.0), instruction.j.unwrap_or(0.0));
                let turned = rotate_about_origin(offset, angle_degrees);
                out.i = Some(turned.x);
                out.j = Some(turned.y);
            }
        }

        rotated.push(out);
    }

    debug!(
        "Rotated {} instructions by {} degrees about {}",
        rotated.len(),
        angle_degrees,
        center
    );
    Ok(rotated)
}
