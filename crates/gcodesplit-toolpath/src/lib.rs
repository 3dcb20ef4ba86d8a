//! # GCodeSplit Toolpath
//!
//! G-code instruction model for GCodeSplit.
//! Includes the modal line parser, serializer, arc-aware renderer, block
//! segmenter and program writer.

pub mod gcode;
pub mod program;
pub mod render;
pub mod segmenter;
pub mod writer;

pub use gcode::{is_motion_word, split_comment, GcodeParser, Instruction, ModalState, MotionClass};

pub use program::{render_instructions, ParseIssue, ParsedProgram, Program, RenderedToolpath};

pub use render::{
    ArcGeometry, ArcStepper, Bounds, RenderCursor, RenderSettings, RenderedSegment, SegmentKind,
};

pub use segmenter::{segment, Block, SegmentError, Segmentation};

pub use writer::{ProgramWriter, WriterOptions};
