use crate::domain::model::{CalibrationReport, MalformedPolicy, OutputFormat, ScanMode};
use crate::utils::error::Result;

/// Produces the input lines, newline-stripped and in file order.
pub trait LineSource {
    fn read_lines(&self) -> Result<Vec<String>>;
}

/// Receives the per-line echo and the final report.
pub trait OutputSink {
    fn echo_line(&self, line: &str) -> Result<()>;
    fn write_report(&self, report: &CalibrationReport) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn scan_mode(&self) -> ScanMode;
    fn malformed_policy(&self) -> MalformedPolicy;
    fn output_format(&self) -> OutputFormat;
    fn echo_lines(&self) -> bool;
    fn monitor(&self) -> bool;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<String>>;
    fn transform(&self, lines: Vec<String>) -> Result<CalibrationReport>;
    fn load(&self, report: &CalibrationReport) -> Result<()>;
}
