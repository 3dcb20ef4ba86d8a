//! G-Code parser and modal state tracking

use gcodesplit_core::GcodeError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::{Instruction, MotionClass};

/// Modal state carried from line to line
///
/// Modal groups are persistent states that affect all subsequent lines
/// until changed by another word in the same group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModalState {
    /// Motion mode - Group 1 (G0, G1, G2, G3)
    pub motion_mode: MotionClass,
    /// Distance mode - Group 3 (G90=absolute, G91=incremental)
    pub distance_mode: u8,
    /// Arc center distance mode (901=G90.1 absolute, 911=G91.1 incremental)
    pub arc_distance_mode: u16,
    /// Units mode - Group 6 (G20=inches, G21=millimeters)
    pub units_mode: u8,
}

impl Default for ModalState {
    fn default() -> Self {
        Self {
            motion_mode: MotionClass::Rapid,
            distance_mode: 90,
            arc_distance_mode: 911,
            units_mode: 21,
        }
    }
}

impl ModalState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_absolute(&self) -> bool {
        self.distance_mode == 90
    }

    pub fn is_metric(&self) -> bool {
        self.units_mode == 21
    }

    pub fn is_arc_absolute(&self) -> bool {
        self.arc_distance_mode == 901
    }

    /// Apply one G word. Returns the motion class it selects, if any.
    ///
    /// G0-G3 are modal; G4 selects Dwell for its own line only.
    pub fn apply_g(&mut self, number: f64) -> Option<MotionClass> {
        match (number * 10.0).round() as i64 {
            0 | 10 | 20 | 30 => {
                let motion = MotionClass::from_g_number(number.round())?;
                self.motion_mode = motion;
                Some(motion)
            }
            40 => Some(MotionClass::Dwell),
            200 => {
                self.units_mode = 20;
                None
            }
            210 => {
                self.units_mode = 21;
                None
            }
            900 => {
                self.distance_mode = 90;
                None
            }
            910 => {
                self.distance_mode = 91;
                None
            }
            901 => {
                self.arc_distance_mode = 901;
                None
            }
            911 => {
                self.arc_distance_mode = 911;
                None
            }
            _ => None,
        }
    }
}

/// Line parser with modal state tracking
#[derive(Debug, Clone, Default)]
pub struct GcodeParser {
    current_state: ModalState,
    line_number: usize,
}

impl GcodeParser {
    /// Create a new G-Code parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the next line, failing on the first malformed word.
    ///
    /// Modal words on the line are applied even when it fails.
    pub fn parse_line(&mut self, line: &str) -> Result<Instruction, GcodeError> {
        self.line_number += 1;
        let (instruction, mut issues) = self.parse_words(line, self.line_number);
        if issues.is_empty() {
            Ok(instruction)
        } else {
            Err(issues.swap_remove(0))
        }
    }

    /// Parse `line` (1-based `line_number`) keeping every well-formed word.
    ///
    /// Malformed words are left out of the instruction and reported.
    pub fn parse_line_lenient(
        &mut self,
        line: &str,
        line_number: usize,
    ) -> (Instruction, Vec<GcodeError>) {
        self.line_number = line_number;
        self.parse_words(line, line_number)
    }

    /// Get current modal state
    pub fn get_state(&self) -> ModalState {
        self.current_state
    }

    /// Set current modal state
    pub fn set_state(&mut self, state: ModalState) {
        self.current_state = state;
    }

    /// Number of the last line parsed
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    fn parse_words(&mut self, line: &str, line_number: usize) -> (Instruction, Vec<GcodeError>) {
        let (code, comment) = split_comment(line);
        let mut instruction = Instruction {
            comment,
            ..Instruction::default()
        };
        let mut issues = Vec::new();
        let mut tag: Vec<String> = Vec::new();
        let mut explicit_motion: Option<MotionClass> = None;
        let mut has_g = false;

        if code.trim() == "%" {
            instruction.command = "%".to_string();
            instruction.motion = Some(MotionClass::Other);
            self.stamp_modes(&mut instruction);
            return (instruction, issues);
        }

        let mut last_end = 0;
        for caps in word_regex().captures_iter(&code) {
            let (Some(whole), Some(letter), Some(number)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            check_gap(&code[last_end..whole.start()], line_number, &mut issues);
            last_end = whole.end();

            let letter = letter.as_str().chars().next().unwrap_or(' ').to_ascii_uppercase();
            let number = number.as_str();
            let value = match number.parse::<f64>() {
                Ok(v) if v.is_finite() => v,
                _ => {
                    issues.push(GcodeError::InvalidParameter {
                        line_number,
                        param: letter,
                        reason: format!("'{}' is not a number", number),
                    });
                    continue;
                }
            };
            let word = format!("{}{}", letter, number);

            match letter {
                'X' => instruction.x = Some(value),
                'Y' => instruction.y = Some(value),
                'Z' => instruction.z = Some(value),
                'I' => instruction.i = Some(value),
                'J' => instruction.j = Some(value),
                'F' => instruction.f = Some(value),
                'P' => instruction.p = Some(value),
                'G' => {
                    has_g = true;
                    if let Some(motion) = self.current_state.apply_g(value) {
                        explicit_motion = Some(motion);
                    }
                    tag.push(word);
                }
                'M' | 'T' => {
                    let code_number = as_code_number(value);
                    if tag.is_empty() && !has_g {
                        tag.push(word);
                    } else if letter == 'M' && instruction.m_code.is_none() && code_number.is_some() {
                        instruction.m_code = code_number;
                    } else if letter == 'T' && instruction.tool.is_none() && code_number.is_some() {
                        instruction.tool = code_number;
                    } else {
                        tag.push(word);
                    }
                }
                _ => tag.push(word),
            }
        }
        check_gap(&code[last_end..], line_number, &mut issues);

        instruction.command = tag.join(" ");
        let moves = instruction.x.is_some()
            || instruction.y.is_some()
            || instruction.z.is_some()
            || instruction.i.is_some()
            || instruction.j.is_some()
            || instruction.f.is_some();
        instruction.motion = if explicit_motion.is_some() {
            explicit_motion
        } else if moves {
            Some(self.current_state.motion_mode)
        } else if !instruction.command.is_empty()
            || instruction.p.is_some()
            || instruction.tool.is_some()
            || instruction.m_code.is_some()
        {
            Some(MotionClass::Other)
        } else {
            None
        };
        self.stamp_modes(&mut instruction);

        (instruction, issues)
    }

    fn stamp_modes(&self, instruction: &mut Instruction) {
        instruction.absolute = self.current_state.is_absolute();
        instruction.metric = self.current_state.is_metric();
        instruction.arc_absolute = self.current_state.is_arc_absolute();
    }
}

fn word_regex() -> &'static Regex {
    static WORD_REGEX: OnceLock<Regex> = OnceLock::new();
    WORD_REGEX.get_or_init(|| {
        Regex::new(r"(?i)([A-Z])\s*([+-]?[0-9]*\.?[0-9]*)").expect("invalid regex pattern")
    })
}

fn check_gap(gap: &str, line_number: usize, issues: &mut Vec<GcodeError>) {
    let gap = gap.trim();
    if !gap.is_empty() {
        issues.push(GcodeError::InvalidSyntax {
            line_number,
            reason: format!("unexpected text '{}'", gap),
        });
    }
}

fn as_code_number(value: f64) -> Option<i32> {
    if value.fract() == 0.0 && value >= i32::MIN as f64 && value <= i32::MAX as f64 {
        Some(value as i32)
    } else {
        None
    }
}

/// Split `line` into its code part and its comment.
///
/// Only the first comment form is honoured: `;` runs to end of line, `(`
/// runs to the matching `)`. Code after a closing parenthesis is kept, any
/// further comment on the line is dropped. `|` in the comment becomes `\n`.
pub fn split_comment(line: &str) -> (String, Option<String>) {
    let open = line.find(['(', ';']);
    let Some(open) = open else {
        return (line.to_string(), None);
    };

    let before = &line[..open];
    let after = &line[open + 1..];
    let (text, rest) = if line[open..].starts_with(';') {
        (after, "")
    } else {
        match after.find(')') {
            Some(close) => (&after[..close], &after[close + 1..]),
            None => (after, ""),
        }
    };

    let rest = match rest.find(['(', ';']) {
        Some(cut) => &rest[..cut],
        None => rest,
    };
    let code = format!("{} {}", before, rest);

    let text = text.trim();
    let comment = if text.is_empty() {
        None
    } else {
        Some(text.replace('|', "\n"))
    };
    (code, comment)
}
