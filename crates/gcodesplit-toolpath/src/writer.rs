//! Program text output
//!
//! Serializes instruction lists and segmentations, optionally bracketing
//! blocks with marker comments and repeating the program per peck depth.

use crate::gcode::Instruction;
use crate::segmenter::{SegmentError, Segmentation};

/// Output options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriterOptions {
    /// Bracket each block with `(Block N start)` / `(Block N end)`
    pub block_markers: bool,
    /// Replace Z at or below zero with this depth
    pub z_override: Option<f64>,
}

/// Writes program text
#[derive(Debug, Clone, Default)]
pub struct ProgramWriter {
    options: WriterOptions,
}

impl ProgramWriter {
    pub fn new(options: WriterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// One line per instruction
    pub fn write_instructions(&self, instructions: &[Instruction]) -> String {
        let mut out = String::new();
        self.push_lines(&mut out, instructions, self.options.z_override);
        out
    }

    /// Header, blocks in `order` (original order when `None`), footer.
    ///
    /// Block markers carry the 1-based original block number.
    pub fn write_segmentation(
        &self,
        segmentation: &Segmentation,
        order: Option<&[usize]>,
    ) -> Result<String, SegmentError> {
        let identity: Vec<usize> = (0..segmentation.block_count()).collect();
        let order = order.unwrap_or(identity.as_slice());
        // validates the permutation
        segmentation.reassemble(order)?;

        let z = self.options.z_override;
        let mut out = String::new();
        self.push_lines(&mut out, &segmentation.header, z);
        for &index in order {
            let number = index + 1;
            if self.options.block_markers {
                out.push_str(&format!("(Block {} start)\n", number));
            }
            self.push_lines(&mut out, segmentation.blocks[index].instructions(), z);
            if self.options.block_markers {
                out.push_str(&format!("(Block {} end)\n", number));
            }
        }
        self.push_lines(&mut out, &segmentation.footer, z);
        Ok(out)
    }

    /// Repeat the program once per peck depth with that depth as Z override.
    ///
    /// With no depths this is [`ProgramWriter::write_instructions`].
    pub fn write_layers(&self, instructions: &[Instruction], peck_depths: &[f64]) -> String {
        if peck_depths.is_empty() {
            return self.write_instructions(instructions);
        }
        let mut out = String::new();
        for (layer, &depth) in peck_depths.iter().enumerate() {
            out.push_str(&format!(
                "(Layer {} Z{})\n",
                layer + 1,
                gcodesplit_core::format_decimal(depth)
            ));
            self.push_lines(&mut out, instructions, Some(depth));
        }
        out
    }

    fn push_lines(&self, out: &mut String, instructions: &[Instruction], z_override: Option<f64>) {
        for instruction in instructions {
            out.push_str(&instruction.format_with(z_override));
            out.push('\n');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers_override_depth() {
        let program = vec![
            Instruction::rapid().with_z(5.0),
            Instruction::linear().with_xyz(1.0, 0.0, 0.0),
        ];
        let text = ProgramWriter::default().write_layers(&program, &[-0.5, -1.0]);
        assert_eq!(
            text,
            "(Layer 1 Z-0.5)\nG0 Z5\nG1 X1 Y0 Z-0.5\n(Layer 2 Z-1)\nG0 Z5\nG1 X1 Y0 Z-1\n"
        );
    }

    #[test]
    fn test_plain_write() {
        let program = vec![Instruction::command_line("G21"), Instruction::comment_line("end")];
        assert_eq!(
            ProgramWriter::default().write_instructions(&program),
            "G21\n(end)\n"
        );
    }
}
