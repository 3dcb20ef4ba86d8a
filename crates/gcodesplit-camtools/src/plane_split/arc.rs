//! Arcs against the split boundary
//!
//! Crossings are found on the full circle in the local frame, where the
//! boundary is the line x = 0, then filtered to the arc's own sweep.

use gcodesplit_core::geometry::{direction_angle_to_standard, point_on_circle};
use gcodesplit_core::{
    angle_of, arc_sweep, deg_to_rad, line_circle_intersect, rad_to_deg, ArcDirection,
    LineCircleIntersection, Point,
};

use crate::plane::{Side, SplitPlane};

/// Crossings closer than this (degrees) to either end of the sweep are ignored
pub const ANGLE_EPSILON: f64 = 1e-9;

/// One sub-arc between crossings, in world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPiece {
    pub side: Side,
    pub start: Point,
    pub end: Point,
    /// Arc length of the piece
    pub length: f64,
}

/// Result of splitting one arc
#[derive(Debug, Clone, PartialEq)]
pub struct ArcSplit {
    /// Pieces in travel order, alternating sides
    pub pieces: Vec<ArcPiece>,
    /// Crossing points, in travel order
    pub crossings: Vec<Point>,
    pub start_radius: f64,
    pub end_radius: f64,
}

/// Side an arc starting on the boundary heads into.
///
/// Clockwise travel from above the center heads right, from below heads
/// left; counterclockwise is the mirror. Level with the center the arc
/// curves toward the center's side.
fn boundary_start_side(start: Point, center: Point, direction: ArcDirection) -> Side {
    let above = if start.y > center.y {
        Some(true)
    } else if start.y < center.y {
        Some(false)
    } else {
        None
    };
    match (above, direction) {
        (Some(true), ArcDirection::Clockwise) | (Some(false), ArcDirection::CounterClockwise) => {
            Side::Right
        }
        (Some(_), _) => Side::Left,
        (None, _) if center.x > 0.0 => Side::Right,
        (None, _) => Side::Left,
    }
}

/// Split the arc `start -> end` around `center` (world frame).
///
/// When the arc actually crosses the boundary, pieces shorter than
/// `min_length` are dropped; an uncrossed arc is always kept whole.
pub fn split_arc(
    plane: &SplitPlane,
    start: Point,
    end: Point,
    center: Point,
    direction: ArcDirection,
    min_length: f64,
    epsilon: f64,
) -> ArcSplit {
    let local_start = plane.to_local(start);
    let local_end = plane.to_local(end);
    let local_center = plane.to_local(center);

    let radius = local_start.distance_xy(&local_center);
    let end_radius = local_end.distance_xy(&local_center);
    let sweep = arc_sweep(local_start, local_end, local_center, direction);
    let start_angle = angle_of(
        local_start.x - local_center.x,
        local_start.y - local_center.y,
        direction,
    );

    let start_side = Side::of_local_x(local_start.x, epsilon);
    let first_side =
        start_side.unwrap_or_else(|| boundary_start_side(local_start, local_center, direction));

    // An end on the boundary owns every crossing within `epsilon` of arc
    // length, so the circle's own pass through x = 0 there does not flip sides.
    let boundary_margin = ANGLE_EPSILON.max(rad_to_deg(epsilon / radius));
    let start_margin = match start_side {
        Some(_) => ANGLE_EPSILON,
        None => boundary_margin,
    };
    let end_margin = match Side::of_local_x(local_end.x, epsilon) {
        Some(_) => ANGLE_EPSILON,
        None => boundary_margin,
    };

    let mut crossing_angles: Vec<f64> = Vec::new();
    if radius - local_center.x.abs() > epsilon {
        let boundary = line_circle_intersect(
            local_center,
            radius,
            Point::ORIGIN,
            Point::xy(0.0, 1.0),
        );
        if let LineCircleIntersection::Two(a, b) = boundary {
            for hit in [a, b] {
                let angle = angle_of(hit.x - local_center.x, hit.y - local_center.y, direction);
                let mut relative = angle - start_angle;
                if relative < 0.0 {
                    relative += 360.0;
                }
                if relative > start_margin && relative < sweep - end_margin {
                    crossing_angles.push(relative);
                }
            }
        }
    }
    crossing_angles.sort_by(f64::total_cmp);

    let crossings: Vec<Point> = crossing_angles
        .iter()
        .map(|&relative| {
            let standard = direction_angle_to_standard(start_angle + relative, direction);
            let z = start.z + (end.z - start.z) * relative / sweep;
            let mut local = point_on_circle(local_center, radius, standard, z);
            local.x = 0.0;
            plane.to_world(local)
        })
        .collect();

    let mut bounds = vec![(0.0, start)];
    bounds.extend(crossing_angles.iter().copied().zip(crossings.iter().copied()));
    bounds.push((sweep, end));

    let crossed = !crossings.is_empty();
    let mut pieces = Vec::with_capacity(bounds.len() - 1);
    let mut side = first_side;
    for pair in bounds.windows(2) {
        let (from_angle, from) = pair[0];
        let (to_angle, to) = pair[1];
        let length = radius * deg_to_rad(to_angle - from_angle);
        if !crossed || length >= min_length {
            pieces.push(ArcPiece {
                side,
                start: from,
                end: to,
                length,
            });
        }
        side = side.other();
    }

    ArcSplit {
        pieces,
        crossings,
        start_radius: radius,
        end_radius,
    }
}
