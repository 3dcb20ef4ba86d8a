//! State-aware rendering of instructions into straight segments
//!
//! Rendering threads a [`RenderCursor`] (running position + bounds) through
//! the instruction list. Positions are in millimeters; inch programs are
//! scaled by 25.4 as they render.

pub mod arc;
pub mod bounds;

pub use arc::{ArcGeometry, ArcStepper, RenderSettings};
pub use bounds::Bounds;

use gcodesplit_core::Point;
use serde::{Deserialize, Serialize};

use crate::gcode::{Instruction, MotionClass};

/// Paint category of a rendered segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    Rapid,
    Linear,
    ArcCw,
    ArcCcw,
}

impl SegmentKind {
    pub fn from_motion(motion: MotionClass) -> Option<Self> {
        match motion {
            MotionClass::Rapid => Some(Self::Rapid),
            MotionClass::Linear => Some(Self::Linear),
            MotionClass::ArcCw => Some(Self::ArcCw),
            MotionClass::ArcCcw => Some(Self::ArcCcw),
            MotionClass::Dwell | MotionClass::Other => None,
        }
    }

    /// Everything but rapids removes material
    pub fn is_cut(self) -> bool {
        !matches!(self, Self::Rapid)
    }
}

/// A straight line between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderedSegment {
    pub start: Point,
    pub end: Point,
    pub kind: SegmentKind,
}

impl RenderedSegment {
    pub fn new(start: Point, end: Point, kind: SegmentKind) -> Self {
        Self { start, end, kind }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn is_zero_length(&self) -> bool {
        self.length() < gcodesplit_core::EPSILON
    }
}

/// Running position and bounds threaded through a render pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCursor {
    pub position: Point,
    pub bounds: Bounds,
}

impl Default for RenderCursor {
    fn default() -> Self {
        Self::new(Point::ORIGIN)
    }
}

impl RenderCursor {
    pub fn new(position: Point) -> Self {
        Self {
            position,
            bounds: Bounds::new(),
        }
    }
}

impl Instruction {
    /// Destination in millimeters when starting from `from`
    pub fn destination(&self, from: Point) -> Point {
        self.destination_scaled(from, self.measurement_system().mm_scale())
    }

    /// Destination in the program's own units
    pub fn program_destination(&self, from: Point) -> Point {
        self.destination_scaled(from, 1.0)
    }

    /// Arc center in millimeters for an arc starting at `from`.
    ///
    /// Offsets are relative to `from` unless arc-absolute mode is in effect,
    /// in which case an absent I/J keeps the start coordinate.
    pub fn arc_center(&self, from: Point) -> Point {
        self.arc_center_scaled(from, self.measurement_system().mm_scale())
    }

    /// Arc center in the program's own units
    pub fn program_arc_center(&self, from: Point) -> Point {
        self.arc_center_scaled(from, 1.0)
    }

    fn destination_scaled(&self, from: Point, scale: f64) -> Point {
        let axis = |value: Option<f64>, current: f64| match value {
            Some(v) if self.absolute => v * scale,
            Some(v) => current + v * scale,
            None => current,
        };
        Point::new(
            axis(self.x, from.x),
            axis(self.y, from.y),
            axis(self.z, from.z),
        )
    }

    fn arc_center_scaled(&self, from: Point, scale: f64) -> Point {
        if self.arc_absolute {
            Point::new(
                self.i.map_or(from.x, |i| i * scale),
                self.j.map_or(from.y, |j| j * scale),
                from.z,
            )
        } else {
            Point::new(
                from.x + self.i.unwrap_or(0.0) * scale,
                from.y + self.j.unwrap_or(0.0) * scale,
                from.z,
            )
        }
    }

    /// Render against `cursor`, advancing its position and bounds.
    ///
    /// Non-renderable instructions return no segments and leave the cursor.
    pub fn render(
        &self,
        cursor: &mut RenderCursor,
        stepper: &ArcStepper,
    ) -> Vec<RenderedSegment> {
        let Some(kind) = self.motion.and_then(SegmentKind::from_motion) else {
            return Vec::new();
        };

        let start = cursor.position;
        let end = self.destination(start);

        let points = match self.arc_direction() {
            Some(direction) => stepper.step(start, end, self.arc_center(start), direction),
            None => vec![end],
        };

        let mut segments = Vec::with_capacity(points.len());
        let mut from = start;
        for to in points {
            cursor.bounds.include(from);
            cursor.bounds.include(to);
            segments.push(RenderedSegment::new(from, to, kind));
            from = to;
        }
        cursor.position = end;
        segments
    }
}
