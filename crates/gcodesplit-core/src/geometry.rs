//! Geometry kernel
//!
//! Stateless helpers shared by the arc renderer and the plane-split engine:
//! degree/radian conversion, distances, rotation about an arbitrary center,
//! direction-aware angle measurement and line/circle intersection.
//!
//! Degenerate inputs (zero-length segments, coincident points) never panic or
//! return errors here; they fall back to the original point. Use the `try_`
//! variants when a degenerate input must be reported instead.

use crate::error::GeometryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Tolerance used for tangency and zero-length checks
pub const EPSILON: f64 = 1e-9;

/// A point in program space.
///
/// Equality is exact component comparison; use [`Point::approx_eq`] when a
/// tolerance is needed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub const ORIGIN: Point = Point {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// A point on the Z = 0 plane
    pub fn xy(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub fn with_z(self, z: f64) -> Self {
        Self { z, ..self }
    }

    pub fn with_x(self, x: f64) -> Self {
        Self { x, ..self }
    }

    /// 3D Euclidean distance
    pub fn distance_to(&self, other: &Point) -> f64 {
        distance(*self, *other)
    }

    /// Distance measured in the XY plane only
    pub fn distance_xy(&self, other: &Point) -> f64 {
        distance_xy(*self, *other)
    }

    /// Component-wise comparison within `tolerance`
    pub fn approx_eq(&self, other: &Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.z - other.z).abs() <= tolerance
    }

    /// Linear interpolation towards `other`; `t = 0` is `self`, `t = 1` is `other`
    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
            self.z + (other.z - self.z) * t,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4}, {:.4})", self.x, self.y, self.z)
    }
}

/// Direction of travel around an arc
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArcDirection {
    /// G2
    Clockwise,
    /// G3
    CounterClockwise,
}

impl ArcDirection {
    pub fn is_clockwise(self) -> bool {
        matches!(self, Self::Clockwise)
    }

    pub fn reversed(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }
}

pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees.to_radians()
}

pub fn rad_to_deg(radians: f64) -> f64 {
    radians.to_degrees()
}

/// 3D Euclidean distance between two points
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let dz = b.z - a.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Euclidean distance in the XY plane
pub fn distance_xy(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Rotate `point` about `center` by `angle_degrees` (counterclockwise positive).
///
/// Z is carried through unchanged.
pub fn rotate(point: Point, center: Point, angle_degrees: f64) -> Point {
    let (sin, cos) = deg_to_rad(angle_degrees).sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    Point::new(
        center.x + dx * cos - dy * sin,
        center.y + dx * sin + dy * cos,
        point.z,
    )
}

/// Rotate `point` about the XY origin
pub fn rotate_about_origin(point: Point, angle_degrees: f64) -> Point {
    rotate(point, Point::ORIGIN, angle_degrees)
}

/// Angle of the vector `(dx, dy)` relative to the +X axis, in `[0, 360)`.
///
/// For [`ArcDirection::Clockwise`] the angle is mirrored (`360 - angle`) so
/// that both directions measure a positive sweep from an arc's start point.
pub fn angle_of(dx: f64, dy: f64, direction: ArcDirection) -> f64 {
    let mut angle = rad_to_deg(dy.atan2(dx));
    if angle < 0.0 {
        angle += 360.0;
    }
    if direction.is_clockwise() {
        angle = 360.0 - angle;
    }
    if angle >= 360.0 {
        angle -= 360.0;
    }
    angle
}

/// Sweep in degrees from `start` to `end` around `center`, in `(0, 360]`.
///
/// Coincident start and end angles describe a full circle (360), never 0.
pub fn arc_sweep(start: Point, end: Point, center: Point, direction: ArcDirection) -> f64 {
    let start_angle = angle_of(start.x - center.x, start.y - center.y, direction);
    let end_angle = angle_of(end.x - center.x, end.y - center.y, direction);
    let mut sweep = end_angle - start_angle;
    if sweep <= 0.0 {
        sweep += 360.0;
    }
    sweep
}

/// Convert an angle measured in `direction` space (see [`angle_of`]) back to
/// a standard counterclockwise angle in degrees.
pub fn direction_angle_to_standard(angle: f64, direction: ArcDirection) -> f64 {
    if direction.is_clockwise() {
        -angle
    } else {
        angle
    }
}

/// Point on the circle around `center` at a standard angle (degrees)
pub fn point_on_circle(center: Point, radius: f64, angle_degrees: f64, z: f64) -> Point {
    let (sin, cos) = deg_to_rad(angle_degrees).sin_cos();
    Point::new(center.x + radius * cos, center.y + radius * sin, z)
}

/// Y value of the infinite line through `p1`/`p2` at `x`.
///
/// A vertical line has no single answer; the start point's Y is returned.
pub fn line_y_at_x(p1: Point, p2: Point, x: f64) -> f64 {
    let run = p2.x - p1.x;
    if run.abs() < EPSILON {
        return p1.y;
    }
    let slope = (p2.y - p1.y) / run;
    p1.y + slope * (x - p1.x)
}

/// Result of intersecting a line with a circle in the XY plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineCircleIntersection {
    None,
    /// Tangent contact (or a degenerate segment lying on the circle)
    One(Point),
    /// Two crossings ordered along the `p1 -> p2` direction
    Two(Point, Point),
}

impl LineCircleIntersection {
    pub fn count(&self) -> usize {
        match self {
            Self::None => 0,
            Self::One(_) => 1,
            Self::Two(_, _) => 2,
        }
    }

    pub fn points(&self) -> Vec<Point> {
        match *self {
            Self::None => Vec::new(),
            Self::One(p) => vec![p],
            Self::Two(a, b) => vec![a, b],
        }
    }
}

/// Intersect the infinite line through `p1`/`p2` with a circle.
///
/// Z of each hit is interpolated along the line. Near-tangent cases are
/// reported as exactly one solution.
pub fn line_circle_intersect(
    center: Point,
    radius: f64,
    p1: Point,
    p2: Point,
) -> LineCircleIntersection {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let len_sq = dx * dx + dy * dy;

    if len_sq < EPSILON * EPSILON {
        return if (distance_xy(p1, center) - radius).abs() <= EPSILON {
            LineCircleIntersection::One(p1)
        } else {
            LineCircleIntersection::None
        };
    }

    // Parameter of the foot of the perpendicular from the center
    let t_foot = ((center.x - p1.x) * dx + (center.y - p1.y) * dy) / len_sq;
    let foot = p1.lerp(&p2, t_foot);
    let h = distance_xy(foot, center);

    let discriminant = radius * radius - h * h;
    if (h - radius).abs() <= EPSILON {
        return LineCircleIntersection::One(foot);
    }
    if discriminant < 0.0 {
        return LineCircleIntersection::None;
    }

    let dt = discriminant.sqrt() / len_sq.sqrt();
    LineCircleIntersection::Two(p1.lerp(&p2, t_foot - dt), p1.lerp(&p2, t_foot + dt))
}

/// Checked form of [`line_circle_intersect`] that reports degenerate input
pub fn try_line_circle_intersect(
    center: Point,
    radius: f64,
    p1: Point,
    p2: Point,
) -> Result<LineCircleIntersection, GeometryError> {
    if !radius.is_finite() || !center.is_finite() || !p1.is_finite() || !p2.is_finite() {
        return Err(GeometryError::NonFinite {
            name: "line/circle input".to_string(),
        });
    }
    if radius <= 0.0 {
        return Err(GeometryError::InvalidRadius { radius });
    }
    if distance_xy(p1, p2) < EPSILON {
        return Err(GeometryError::ZeroLength { x: p1.x, y: p1.y });
    }
    Ok(line_circle_intersect(center, radius, p1, p2))
}
