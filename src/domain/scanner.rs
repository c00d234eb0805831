//! Per-line digit extraction.

use crate::domain::model::{CalibrationValue, ScanMode};

const SPELLED_DIGITS: [(&str, u8); 9] = [
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct DigitScanner {
    mode: ScanMode,
}

impl DigitScanner {
    pub fn new(mode: ScanMode) -> Self {
        Self { mode }
    }

    /// Collects the digit values of `line` in left-to-right order.
    ///
    /// In [`ScanMode::Spelled`] a word counts at the index where it starts and
    /// words may overlap, so `"eightwo"` yields `[8, 2]`.
    pub fn digits(&self, line: &str) -> Vec<u8> {
        let mut digits = Vec::new();
        for (idx, ch) in line.char_indices() {
            if ch.is_ascii_digit() {
                digits.push(ch as u8 - b'0');
            } else if self.mode == ScanMode::Spelled {
                if let Some(d) = spelled_digit_at(&line[idx..]) {
                    digits.push(d);
                }
            }
        }
        digits
    }

    /// Returns `None` when the line has no digit at all.
    pub fn calibration_value(&self, line: &str) -> Option<CalibrationValue> {
        let digits = self.digits(line);
        let first = *digits.first()?;
        let last = *digits.last()?;
        Some(CalibrationValue::from_digits(first, last))
    }
}

fn spelled_digit_at(rest: &str) -> Option<u8> {
    SPELLED_DIGITS
        .iter()
        .find(|(word, _)| rest.starts_with(word))
        .map(|&(_, value)| value)
}
