//! One display refresh worth of text.

use crate::display::layout::{DISPLAY_COLS, DISPLAY_ROWS};
use std::fmt;

/// A fixed-height block of text lines sent in a single transport write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFrame {
    lines: [String; DISPLAY_ROWS],
}

impl DisplayFrame {
    pub fn new(lines: [String; DISPLAY_ROWS]) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Indexes of lines wider than the display.
    pub fn overflowing_lines(&self) -> Vec<usize> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.chars().count() > DISPLAY_COLS)
            .map(|(row, _)| row)
            .collect()
    }

    pub fn fits_display(&self) -> bool {
        self.overflowing_lines().is_empty()
    }

    /// Wire payload: every line terminated by `\n`.
    pub fn to_wire(&self) -> Vec<u8> {
        let capacity = self.lines.iter().map(|line| line.len() + 1).sum();
        let mut payload = Vec::with_capacity(capacity);
        for line in &self.lines {
            payload.extend_from_slice(line.as_bytes());
            payload.push(b'\n');
        }
        payload
    }
}

impl fmt::Display for DisplayFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}
