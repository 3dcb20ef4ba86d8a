//! Straight moves against the split boundary

use gcodesplit_core::Point;

use crate::plane::{Side, SplitPlane};

/// Where a straight move goes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinearSplit {
    /// Entirely on one side (touching the boundary at most at one end)
    Whole(Side),
    /// Running along the boundary; emitted on both sides
    Both,
    /// Straddles the boundary; `near` holds the part up to `at`
    Crossing { near: Side, at: Point },
}

/// Classify the move `start -> end` (world frame).
///
/// The side comes from the start point; a start on the boundary takes the
/// end point's side. A crossing needs the end points strictly on opposite
/// sides, beyond `epsilon`, and is located by interpolating every axis.
pub fn classify_linear(plane: &SplitPlane, start: Point, end: Point, epsilon: f64) -> LinearSplit {
    let start_x = plane.local_x(start);
    let end_x = plane.local_x(end);

    let start_side = Side::of_local_x(start_x, epsilon);
    let end_side = Side::of_local_x(end_x, epsilon);

    match (start_side, end_side) {
        (Some(near), Some(far)) if near != far => {
            let t = start_x / (start_x - end_x);
            LinearSplit::Crossing {
                near,
                at: start.lerp(&end, t),
            }
        }
        (Some(side), _) => LinearSplit::Whole(side),
        // A move leaving the boundary belongs to the side it heads into;
        // only a move lying on the boundary end to end goes to both sides.
        (None, Some(side)) => LinearSplit::Whole(side),
        (None, None) => LinearSplit::Both,
    }
}
