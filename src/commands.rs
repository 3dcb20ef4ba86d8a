//! Command implementations behind the `gcodesplit` binary
//!
//! Each command takes program text and returns the text to write, so the
//! binary only handles arguments and files.

use anyhow::{bail, Context};
use gcodesplit_camtools::{translate, PlaneSplitter, SplitDiagnostic};
use gcodesplit_core::Point;
use gcodesplit_settings::{default_config_path, Config};
use gcodesplit_toolpath::{
    segment, Bounds, Instruction, Program, ProgramWriter, RenderSettings, SegmentKind,
    WriterOptions,
};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

/// Parse program text, logging every line that did not parse cleanly
pub fn parse_program(text: &str) -> Program {
    let parsed = Program::parse(text);
    if parsed.has_issues() {
        warn!("{} line(s) had parse issues", parsed.issues.len());
    }
    parsed.program
}

/// Read and parse a program file
pub fn load_program(path: &Path) -> anyhow::Result<Program> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let program = parse_program(&text);
    debug!("Loaded {} instructions from {}", program.len(), path.display());
    Ok(program)
}

/// Config from `path`, else the per-user default file, else defaults
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = path {
        return Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }
    match default_config_path() {
        Ok(path) => Config::load_or_default(&path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        Err(e) => {
            debug!("{}; using default config", e);
            Ok(Config::default())
        }
    }
}

/// Text of both halves of a split
#[derive(Debug, Clone)]
pub struct SplitOutput {
    pub left: String,
    pub right: String,
    pub diagnostics: Vec<SplitDiagnostic>,
}

/// Split `program` with the plane and options in `config`
pub fn split_program(program: &Program, config: &Config) -> anyhow::Result<SplitOutput> {
    config.validate().context("Invalid configuration")?;
    let splitter = PlaneSplitter::new(config.split.plane(), config.split.options())
        .context("Invalid split parameters")?;
    let result = splitter.split(program.instructions());

    let writer = ProgramWriter::new(config.output.writer_options());
    let depths = &config.output.peck_depths;
    let output = SplitOutput {
        left: writer.write_layers(&result.left, depths),
        right: writer.write_layers(&result.right, depths),
        diagnostics: result.diagnostics,
    };
    info!(
        "Split {} instructions into {} left and {} right",
        program.len(),
        result.left.len(),
        result.right.len()
    );
    Ok(output)
}

/// Block summary, or the program with block markers when `pretty`
pub fn blocks_report(
    program: &Program,
    settings: &RenderSettings,
    pretty: bool,
) -> anyhow::Result<String> {
    let Some(segmentation) = segment(program.instructions(), settings) else {
        bail!("No positioning rapid found; the program has no blocks");
    };

    if pretty {
        let writer = ProgramWriter::new(WriterOptions {
            block_markers: true,
            z_override: None,
        });
        return Ok(writer.write_segmentation(&segmentation, None)?);
    }

    let mut out = String::new();
    out.push_str(&format!(
        "header: {} instructions\n",
        segmentation.header.len()
    ));
    for (index, block) in segmentation.blocks.iter().enumerate() {
        let approach = block.approach();
        out.push_str(&format!(
            "block {}: {} instructions, approach ({}, {}), {}\n",
            index + 1,
            block.len(),
            gcodesplit_core::format_decimal(approach.x),
            gcodesplit_core::format_decimal(approach.y),
            describe_bounds(&block.bounds())
        ));
    }
    out.push_str(&format!(
        "footer: {} instructions\n",
        segmentation.footer.len()
    ));
    Ok(out)
}

fn describe_bounds(bounds: &Bounds) -> String {
    if !bounds.is_valid() {
        return "no extent".to_string();
    }
    format!(
        "X {}..{} Y {}..{}",
        gcodesplit_core::format_decimal(bounds.min_x),
        gcodesplit_core::format_decimal(bounds.max_x),
        gcodesplit_core::format_decimal(bounds.min_y),
        gcodesplit_core::format_decimal(bounds.max_y)
    )
}

/// Rendered statistics of a program
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramStats {
    pub instructions: usize,
    pub rapid_segments: usize,
    pub linear_segments: usize,
    pub arc_segments: usize,
    pub path_length: f64,
    pub cut_length: f64,
    pub rapid_length: f64,
    /// `[min_x, min_y, min_z, max_x, max_y, max_z]`, absent for an empty toolpath
    pub bounds: Option<[f64; 6]>,
}

impl ProgramStats {
    pub fn of(program: &Program, settings: &RenderSettings) -> Self {
        let toolpath = program.render(settings);
        let b = toolpath.bounds;
        Self {
            instructions: program.len(),
            rapid_segments: toolpath.count(SegmentKind::Rapid),
            linear_segments: toolpath.count(SegmentKind::Linear),
            arc_segments: toolpath.count(SegmentKind::ArcCw) + toolpath.count(SegmentKind::ArcCcw),
            path_length: toolpath.path_length(),
            cut_length: toolpath.cut_length(),
            rapid_length: toolpath.rapid_length(),
            bounds: b
                .is_valid()
                .then_some([b.min_x, b.min_y, b.min_z, b.max_x, b.max_y, b.max_z]),
        }
    }
}

impl fmt::Display for ProgramStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "instructions:    {}", self.instructions)?;
        writeln!(
            f,
            "segments:        {} rapid, {} linear, {} arc",
            self.rapid_segments, self.linear_segments, self.arc_segments
        )?;
        writeln!(f, "path length:     {:.3}", self.path_length)?;
        writeln!(f, "cut length:      {:.3}", self.cut_length)?;
        writeln!(f, "rapid length:    {:.3}", self.rapid_length)?;
        match self.bounds {
            Some([min_x, min_y, min_z, max_x, max_y, max_z]) => writeln!(
                f,
                "bounds:          X {:.3}..{:.3} Y {:.3}..{:.3} Z {:.3}..{:.3}",
                min_x, max_x, min_y, max_y, min_z, max_z
            ),
            None => writeln!(f, "bounds:          none"),
        }
    }
}

/// Program text translated by `offset`
pub fn shift_program(program: &Program, offset: Point) -> anyhow::Result<String> {
    let shifted: Vec<Instruction> = translate(program.instructions(), offset)?;
    Ok(ProgramWriter::default().write_instructions(&shifted))
}
