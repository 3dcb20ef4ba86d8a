//! G-Code instruction model
//!
//! This module provides:
//! - The [`Instruction`] record and its [`MotionClass`]
//! - Line parsing with modal state tracking
//! - Serialization back to program text

pub mod format;
pub mod instruction;
pub mod parser;

pub use instruction::*;
pub use parser::*;
