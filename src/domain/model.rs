use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Two-digit value formed from the first and last digit of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CalibrationValue(u8);

impl CalibrationValue {
    /// Builds the value from the first and last digit. Both must be in `0..=9`.
    pub fn from_digits(first: u8, last: u8) -> Self {
        debug_assert!(first <= 9 && last <= 9);
        Self(first * 10 + last)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for CalibrationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which tokens count as digits while scanning a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Only the characters `0`..`9`.
    #[default]
    Digits,
    /// `0`..`9` plus the words `one`..`nine`.
    Spelled,
}

/// What to do with a line that has no digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    #[default]
    Abort,
    Skip,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

macro_rules! impl_from_str {
    ($ty:ty, $field:literal, { $($name:literal => $variant:expr),+ $(,)? }) => {
        impl FromStr for $ty {
            type Err = crate::utils::error::CalibrationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_ascii_lowercase().as_str() {
                    $($name => Ok($variant),)+
                    _ => Err(crate::utils::error::CalibrationError::InvalidConfigValueError {
                        field: $field.to_string(),
                        value: s.to_string(),
                        reason: format!("Valid values: {}", [$($name),+].join(", ")),
                    }),
                }
            }
        }
    };
}

impl_from_str!(ScanMode, "scan.mode", {
    "digits" => ScanMode::Digits,
    "spelled" => ScanMode::Spelled,
});

impl_from_str!(MalformedPolicy, "scan.on_malformed", {
    "abort" => MalformedPolicy::Abort,
    "skip" => MalformedPolicy::Skip,
});

impl_from_str!(OutputFormat, "output.format", {
    "text" => OutputFormat::Text,
    "json" => OutputFormat::Json,
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLine {
    /// 1-based position in the input file.
    pub line_number: usize,
    pub reason: String,
}

/// Result of one accumulation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationReport {
    pub sum: u64,
    pub lines_read: usize,
    pub lines_scored: usize,
    pub skipped: Vec<SkippedLine>,
}

impl CalibrationReport {
    pub fn add(&mut self, value: CalibrationValue) {
        self.sum += u64::from(value.get());
        self.lines_scored += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calibration_value_from_digits() {
        assert_eq!(CalibrationValue::from_digits(1, 2).get(), 12);
        assert_eq!(CalibrationValue::from_digits(7, 7).get(), 77);
        assert_eq!(CalibrationValue::from_digits(0, 0).get(), 0);
        assert_eq!(CalibrationValue::from_digits(9, 9).to_string(), "99");
    }

    #[test]
    fn test_enums_parse_case_insensitively() {
        assert_eq!("Spelled".parse::<ScanMode>().unwrap(), ScanMode::Spelled);
        assert_eq!("skip".parse::<MalformedPolicy>().unwrap(), MalformedPolicy::Skip);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_report_serializes_as_json() {
        let mut report = CalibrationReport {
            lines_read: 2,
            ..Default::default()
        };
        report.add(CalibrationValue::from_digits(3, 8));
        report.skipped.push(SkippedLine {
            line_number: 2,
            reason: "no digits".to_string(),
        });

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["sum"], 38);
        assert_eq!(json["lines_scored"], 1);
        assert_eq!(json["skipped"][0]["line_number"], 2);
    }
}
