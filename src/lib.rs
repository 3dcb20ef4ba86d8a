//! # GCodeSplit
//!
//! Toolkit for flat G-code toolpath programs:
//! - Modal parsing into an instruction model and serialization back to text
//! - Arc-aware rendering into straight segments with bounds and lengths
//! - Segmentation into blocks at positioning rapids
//! - Splitting a program along a rotated vertical plane into two programs
//!   that each run on their own
//!
//! ## Architecture
//!
//! GCodeSplit is organized as a workspace with multiple crates:
//!
//! 1. **gcodesplit-core** - Point, geometry kernel, units, error types
//! 2. **gcodesplit-toolpath** - Instruction model, parser, renderer, segmenter, writer
//! 3. **gcodesplit-camtools** - Plane split engine and program transforms
//! 4. **gcodesplit-settings** - Configuration files and validation
//! 5. **gcodesplit** - The `gcodesplit` command line tool

pub mod commands;

pub use gcodesplit_core::{ArcDirection, Error, GcodeError, GeometryError, Point, Result};

pub use gcodesplit_toolpath::{
    render_instructions, segment, Block, Bounds, GcodeParser, Instruction, ModalState,
    MotionClass, ParseIssue, ParsedProgram, Program, ProgramWriter, RenderSettings,
    RenderedSegment, RenderedToolpath, SegmentError, SegmentKind, Segmentation, WriterOptions,
};

pub use gcodesplit_camtools::{
    rotate_program, split, translate, CamToolError, PlaneSplitter, Side, SplitDiagnostic,
    SplitOptions, SplitPlane, SplitResult,
};

pub use gcodesplit_settings::{
    default_config_path, Config, OutputSettings, SettingsError, SettingsPersistence,
    SplitSettings,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output to stderr, leaving stdout for command output
/// - RUST_LOG environment variable support, INFO when unset
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(tracing::Level::INFO.into()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
