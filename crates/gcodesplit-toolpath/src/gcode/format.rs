//! Instruction serialization
//!
//! Words are written in the fixed order tag, X, Y, Z, I, J, F, P, T, M,
//! comment, using [`format_decimal`] for every numeric field.

use gcodesplit_core::format_decimal;
use std::fmt;

use super::Instruction;

impl Instruction {
    /// Serialize to one program line
    pub fn to_gcode(&self) -> String {
        self.format_with(None)
    }

    /// Serialize, replacing any Z at or below zero with `z_override`
    pub fn format_with(&self, z_override: Option<f64>) -> String {
        let mut words: Vec<String> = Vec::new();

        if !self.command.is_empty() {
            words.push(self.command.clone());
        }

        let z = match (self.z, z_override) {
            (Some(z), Some(depth)) if z <= 0.0 => Some(depth),
            (z, _) => z,
        };

        let fields = [
            ('X', self.x),
            ('Y', self.y),
            ('Z', z),
            ('I', self.i),
            ('J', self.j),
            ('F', self.f),
            ('P', self.p),
        ];
        for (letter, value) in fields {
            if let Some(v) = value {
                words.push(format!("{}{}", letter, format_decimal(v)));
            }
        }
        if let Some(t) = self.tool {
            words.push(format!("T{}", t));
        }
        if let Some(m) = self.m_code {
            words.push(format!("M{}", m));
        }

        if let Some(comment) = &self.comment {
            words.push(format_comment(comment));
        }

        words.join(" ")
    }
}

/// Comments containing `)` use the `;` form so they re-parse intact
fn format_comment(comment: &str) -> String {
    let text = comment.replace('\n', "|");
    if text.contains(')') {
        format!("; {}", text)
    } else {
        format!("({})", text)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_gcode())
    }
}
