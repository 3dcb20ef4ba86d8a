//! Arc stepper
//!
//! Approximates G2/G3 arcs with straight chords for rendering and bounds.

use gcodesplit_core::geometry::{direction_angle_to_standard, point_on_circle};
use gcodesplit_core::{angle_of, arc_sweep, deg_to_rad, ArcDirection, Point, EPSILON};
use serde::{Deserialize, Serialize};

/// Chords per degree of sweep
pub const DEFAULT_STEPS_PER_DEGREE: f64 = 2.4;

/// Longest chord, in program units after scaling
pub const DEFAULT_CURVE_SECTION: f64 = 1.0;

/// Upper bound on chords per arc
pub const MAX_ARC_STEPS: usize = 100_000;

/// Arc rendering configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Minimum chord count per degree of sweep
    pub steps_per_degree: f64,
    /// Maximum chord length
    pub curve_section: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            steps_per_degree: DEFAULT_STEPS_PER_DEGREE,
            curve_section: DEFAULT_CURVE_SECTION,
        }
    }
}

/// Measured geometry of one arc move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    pub radius: f64,
    /// Start angle in direction space (see [`angle_of`])
    pub start_angle: f64,
    /// Sweep in degrees, `(0, 360]`
    pub sweep: f64,
    /// `radius * sweep` in radians
    pub length: f64,
}

impl ArcGeometry {
    pub fn measure(start: Point, end: Point, center: Point, direction: ArcDirection) -> Self {
        let radius = start.distance_xy(&center);
        let sweep = arc_sweep(start, end, center, direction);
        Self {
            radius,
            start_angle: angle_of(start.x - center.x, start.y - center.y, direction),
            sweep,
            length: radius * deg_to_rad(sweep),
        }
    }
}

/// Converts arcs to chord end points
#[derive(Debug, Clone, Default)]
pub struct ArcStepper {
    settings: RenderSettings,
}

impl ArcStepper {
    /// Create a new arc stepper
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    /// `ceil(max(sweep * steps_per_degree, length / curve_section))`, clamped
    /// to `1..=MAX_ARC_STEPS`
    pub fn step_count(&self, geometry: &ArcGeometry) -> usize {
        let by_angle = geometry.sweep * self.settings.steps_per_degree;
        let by_length = if self.settings.curve_section > 0.0 {
            geometry.length / self.settings.curve_section
        } else {
            0.0
        };
        let steps = by_angle.max(by_length).ceil();
        if !steps.is_finite() || steps < 1.0 {
            1
        } else if steps >= MAX_ARC_STEPS as f64 {
            MAX_ARC_STEPS
        } else {
            steps as usize
        }
    }

    /// Chord end points from `start` (exclusive) to `end` (inclusive).
    ///
    /// Z is interpolated linearly with the swept angle. A zero radius
    /// degrades to the single point `end`.
    pub fn step(
        &self,
        start: Point,
        end: Point,
        center: Point,
        direction: ArcDirection,
    ) -> Vec<Point> {
        let geometry = ArcGeometry::measure(start, end, center, direction);
        if geometry.radius < EPSILON {
            return vec![end];
        }

        let steps = self.step_count(&geometry);
        let mut points = Vec::with_capacity(steps);
        for k in 1..steps {
            let fraction = k as f64 / steps as f64;
            let angle = geometry.start_angle + geometry.sweep * fraction;
            let z = start.z + (end.z - start.z) * fraction;
            points.push(point_on_circle(
                center,
                geometry.radius,
                direction_angle_to_standard(angle, direction),
                z,
            ));
        }
        points.push(end);
        points
    }
}
