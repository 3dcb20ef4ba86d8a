//! Vertical split plane and its local frame
//!
//! The local frame puts the plane origin at (0, 0) and rotates by
//! `-angle_degrees`, so the boundary is local x = 0. Left is local x < 0,
//! Right is local x > 0. Z is never transformed.

use gcodesplit_core::{rotate_about_origin, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One half of a split program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Side of a local x value, `None` within `epsilon` of the boundary
    pub fn of_local_x(x: f64, epsilon: f64) -> Option<Self> {
        if x > epsilon {
            Some(Self::Right)
        } else if x < -epsilon {
            Some(Self::Left)
        } else {
            None
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "Left"),
            Self::Right => write!(f, "Right"),
        }
    }
}

/// A vertical cutting plane through `origin` rotated by `angle_degrees`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitPlane {
    pub origin: Point,
    /// Counterclockwise rotation of the boundary away from the Y axis
    pub angle_degrees: f64,
}

impl Default for SplitPlane {
    fn default() -> Self {
        Self::new(Point::ORIGIN, 0.0)
    }
}

impl SplitPlane {
    pub fn new(origin: Point, angle_degrees: f64) -> Self {
        Self {
            origin,
            angle_degrees,
        }
    }

    /// The plane `x = x` in world coordinates
    pub fn at_x(x: f64) -> Self {
        Self::new(Point::xy(x, 0.0), 0.0)
    }

    /// World point into the local frame
    pub fn to_local(&self, point: Point) -> Point {
        let shifted = Point::new(point.x - self.origin.x, point.y - self.origin.y, point.z);
        rotate_about_origin(shifted, -self.angle_degrees)
    }

    /// Local point back into the world frame
    pub fn to_world(&self, local: Point) -> Point {
        let rotated = rotate_about_origin(local, self.angle_degrees);
        Point::new(
            rotated.x + self.origin.x,
            rotated.y + self.origin.y,
            rotated.z,
        )
    }

    pub fn local_x(&self, point: Point) -> f64 {
        self.to_local(point).x
    }

    /// Side of a world point, `None` when on the boundary
    pub fn side_of(&self, point: Point, epsilon: f64) -> Option<Side> {
        Side::of_local_x(self.local_x(point), epsilon)
    }

    /// Pull `point` back onto `side` if it lies past the boundary.
    ///
    /// Left keeps local x <= 0, Right keeps local x >= 0.
    pub fn clamp(&self, point: Point, side: Side) -> Point {
        let mut local = self.to_local(point);
        let clamped = match side {
            Side::Left => local.x.min(0.0),
            Side::Right => local.x.max(0.0),
        };
        if clamped == local.x {
            return point;
        }
        local.x = clamped;
        self.to_world(local)
    }
}
