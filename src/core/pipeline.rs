use crate::core::{
    CalibrationReport, ConfigProvider, DigitScanner, LineSource, OutputSink, Pipeline, SkippedLine,
};
use crate::domain::model::{MalformedPolicy, OutputFormat};
use crate::utils::error::{CalibrationError, Result};

pub struct CalibrationPipeline<S: LineSource, O: OutputSink, C: ConfigProvider> {
    source: S,
    sink: O,
    config: C,
    scanner: DigitScanner,
}

impl<S: LineSource, O: OutputSink, C: ConfigProvider> CalibrationPipeline<S, O, C> {
    pub fn new(source: S, sink: O, config: C) -> Self {
        let scanner = DigitScanner::new(config.scan_mode());
        Self {
            source,
            sink,
            config,
            scanner,
        }
    }

    fn echo_enabled(&self) -> bool {
        self.config.echo_lines() && self.config.output_format() == OutputFormat::Text
    }
}

impl<S: LineSource, O: OutputSink, C: ConfigProvider> Pipeline for CalibrationPipeline<S, O, C> {
    fn extract(&self) -> Result<Vec<String>> {
        tracing::debug!("Reading lines from {}", self.config.input_path());
        self.source.read_lines()
    }

    fn transform(&self, lines: Vec<String>) -> Result<CalibrationReport> {
        let echo = self.echo_enabled();
        let mut report = CalibrationReport {
            lines_read: lines.len(),
            ..Default::default()
        };

        // Each line is moved out of the collection and dropped at the end of
        // its iteration.
        for (idx, line) in lines.into_iter().enumerate() {
            let line_number = idx + 1;
            if echo {
                self.sink.echo_line(&line)?;
            }

            match self.scanner.calibration_value(&line) {
                Some(value) => {
                    tracing::debug!("Line {}: calibration value {}", line_number, value);
                    report.add(value);
                }
                None => match self.config.malformed_policy() {
                    MalformedPolicy::Abort => {
                        return Err(CalibrationError::MalformedLine { line_number, line });
                    }
                    MalformedPolicy::Skip => {
                        tracing::warn!("Skipping line {}: no digits found", line_number);
                        report.skipped.push(SkippedLine {
                            line_number,
                            reason: "no digits found".to_string(),
                        });
                    }
                },
            }
        }

        Ok(report)
    }

    fn load(&self, report: &CalibrationReport) -> Result<()> {
        self.sink.write_report(report)
    }
}
