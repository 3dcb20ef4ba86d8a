//! Program instruction model
//!
//! One [`Instruction`] per program line. Fields are optional because a line
//! may update only a subset of axes; modal flags are stamped on by the parser
//! so every instruction can be rendered without looking at its neighbours.

use gcodesplit_core::{ArcDirection, MeasurementSystem};
use serde::{Deserialize, Serialize};

/// Motion class of an instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotionClass {
    /// G0 positioning move
    Rapid,
    /// G1 feed move
    Linear,
    /// G2 clockwise arc
    ArcCw,
    /// G3 counterclockwise arc
    ArcCcw,
    /// G4 dwell
    Dwell,
    /// Mode setters, M/T commands and anything else without geometry
    Other,
}

impl MotionClass {
    /// Motion class selected by a G number, if it is one of G0-G4
    pub fn from_g_number(number: f64) -> Option<Self> {
        if number.fract() != 0.0 {
            return None;
        }
        match number as i64 {
            0 => Some(Self::Rapid),
            1 => Some(Self::Linear),
            2 => Some(Self::ArcCw),
            3 => Some(Self::ArcCcw),
            4 => Some(Self::Dwell),
            _ => None,
        }
    }

    /// Whether this class traces geometry when rendered
    pub fn is_renderable(self) -> bool {
        matches!(
            self,
            Self::Rapid | Self::Linear | Self::ArcCw | Self::ArcCcw
        )
    }

    pub fn is_arc(self) -> bool {
        matches!(self, Self::ArcCw | Self::ArcCcw)
    }

    pub fn arc_direction(self) -> Option<ArcDirection> {
        match self {
            Self::ArcCw => Some(ArcDirection::Clockwise),
            Self::ArcCcw => Some(ArcDirection::CounterClockwise),
            _ => None,
        }
    }

    /// Canonical G word for classes that have one
    pub fn g_word(self) -> Option<&'static str> {
        match self {
            Self::Rapid => Some("G0"),
            Self::Linear => Some("G1"),
            Self::ArcCw => Some("G2"),
            Self::ArcCcw => Some("G3"),
            Self::Dwell => Some("G4"),
            Self::Other => None,
        }
    }
}

impl std::fmt::Display for MotionClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rapid => write!(f, "Rapid"),
            Self::Linear => write!(f, "Linear"),
            Self::ArcCw => write!(f, "ArcCW"),
            Self::ArcCcw => write!(f, "ArcCCW"),
            Self::Dwell => write!(f, "Dwell"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// True when `word` is one of the G0-G3 motion words (`G1`, `G01`, `g2`...)
pub fn is_motion_word(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some('G') | Some('g') => chars
            .as_str()
            .parse::<f64>()
            .ok()
            .and_then(MotionClass::from_g_number)
            .is_some_and(|m| m.is_renderable()),
        _ => false,
    }
}

/// A single parsed program line
///
/// Coordinates are kept in program units; rendering converts to millimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// Motion class, `None` for comment-only and empty lines
    pub motion: Option<MotionClass>,
    /// Command tag: the leading G/M/T word(s) and any words without a field
    pub command: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    /// Arc center X (offset or absolute, per `arc_absolute`)
    pub i: Option<f64>,
    /// Arc center Y (offset or absolute, per `arc_absolute`)
    pub j: Option<f64>,
    /// Feed rate
    pub f: Option<f64>,
    /// Dwell / auxiliary parameter
    pub p: Option<f64>,
    pub tool: Option<i32>,
    pub m_code: Option<i32>,
    /// Comment text; `\n` separates comment lines
    pub comment: Option<String>,
    /// G90 (true) or G91 in effect for this line
    pub absolute: bool,
    /// G21 (true) or G20 in effect for this line
    pub metric: bool,
    /// G90.1 (true) or G91.1 in effect for this line
    pub arc_absolute: bool,
}

impl Default for Instruction {
    fn default() -> Self {
        Self {
            motion: None,
            command: String::new(),
            x: None,
            y: None,
            z: None,
            i: None,
            j: None,
            f: None,
            p: None,
            tool: None,
            m_code: None,
            comment: None,
            absolute: true,
            metric: true,
            arc_absolute: false,
        }
    }
}

impl Instruction {
    /// New instruction of `motion` tagged with its canonical G word
    pub fn new(motion: MotionClass) -> Self {
        Self {
            motion: Some(motion),
            command: motion.g_word().unwrap_or_default().to_string(),
            ..Self::default()
        }
    }

    /// A comment-only line
    pub fn comment_line(text: impl Into<String>) -> Self {
        Self {
            comment: Some(text.into()),
            ..Self::default()
        }
    }

    /// A non-motion command line such as `G90` or `M5`
    pub fn command_line(tag: impl Into<String>) -> Self {
        Self {
            motion: Some(MotionClass::Other),
            command: tag.into(),
            ..Self::default()
        }
    }

    pub fn rapid() -> Self {
        Self::new(MotionClass::Rapid)
    }

    pub fn linear() -> Self {
        Self::new(MotionClass::Linear)
    }

    pub fn arc(direction: ArcDirection) -> Self {
        match direction {
            ArcDirection::Clockwise => Self::new(MotionClass::ArcCw),
            ArcDirection::CounterClockwise => Self::new(MotionClass::ArcCcw),
        }
    }

    pub fn with_x(mut self, x: f64) -> Self {
        self.x = Some(x);
        self
    }

    pub fn with_y(mut self, y: f64) -> Self {
        self.y = Some(y);
        self
    }

    pub fn with_z(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }

    pub fn with_xyz(self, x: f64, y: f64, z: f64) -> Self {
        self.with_x(x).with_y(y).with_z(z)
    }

    pub fn with_center(mut self, i: f64, j: f64) -> Self {
        self.i = Some(i);
        self.j = Some(j);
        self
    }

    pub fn with_feed(mut self, f: f64) -> Self {
        self.f = Some(f);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Copy the modal flags of `other` onto this instruction
    pub fn with_modes_of(mut self, other: &Instruction) -> Self {
        self.absolute = other.absolute;
        self.metric = other.metric;
        self.arc_absolute = other.arc_absolute;
        self
    }

    /// No motion, no tag, no fields and no comment
    pub fn is_empty(&self) -> bool {
        self.motion.is_none() && self.command.is_empty() && !self.has_fields() && self.comment.is_none()
    }

    /// A line that carries only a comment
    pub fn is_comment_only(&self) -> bool {
        self.motion.is_none()
            && self.command.is_empty()
            && !self.has_fields()
            && self.comment.is_some()
    }

    /// Any of the X/Y/Z/I/J/F/P/T/M fields present
    pub fn has_fields(&self) -> bool {
        self.x.is_some()
            || self.y.is_some()
            || self.z.is_some()
            || self.i.is_some()
            || self.j.is_some()
            || self.f.is_some()
            || self.p.is_some()
            || self.tool.is_some()
            || self.m_code.is_some()
    }

    /// Any of X/Y/Z present
    pub fn has_coordinates(&self) -> bool {
        self.x.is_some() || self.y.is_some() || self.z.is_some()
    }

    /// X or Y present
    pub fn has_xy(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }

    /// Rapid, linear and arc moves render; everything else is pass-through
    pub fn can_render(&self) -> bool {
        self.motion.is_some_and(MotionClass::is_renderable)
    }

    pub fn is_rapid(&self) -> bool {
        self.motion == Some(MotionClass::Rapid)
    }

    pub fn is_linear(&self) -> bool {
        self.motion == Some(MotionClass::Linear)
    }

    pub fn is_arc(&self) -> bool {
        self.motion.is_some_and(MotionClass::is_arc)
    }

    pub fn arc_direction(&self) -> Option<ArcDirection> {
        self.motion.and_then(MotionClass::arc_direction)
    }

    pub fn measurement_system(&self) -> MeasurementSystem {
        MeasurementSystem::from_metric_flag(self.metric)
    }

    /// Command tag with the motion word forced to `motion`'s canonical word.
    ///
    /// Non-motion words already in the tag (`G90`, `N10`, `M8`...) are kept
    /// after it, so a line inheriting its motion modally gains an explicit word.
    pub fn tag_for(&self, motion: MotionClass) -> String {
        let extras: Vec<&str> = self
            .command
            .split_whitespace()
            .filter(|word| !is_motion_word(word))
            .collect();
        let mut words: Vec<&str> = Vec::with_capacity(extras.len() + 1);
        if let Some(g) = motion.g_word() {
            words.push(g);
        }
        words.extend(extras);
        words.join(" ")
    }
}
