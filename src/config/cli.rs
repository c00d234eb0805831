use crate::core::{CalibrationReport, LineSource, OutputSink};
use crate::domain::model::OutputFormat;
use crate::utils::error::{CalibrationError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Stdout, Write};
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

/// Reads the whole input file into memory, one `String` per line.
#[derive(Debug, Clone)]
pub struct FileLineSource {
    path: PathBuf,
}

impl FileLineSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LineSource for FileLineSource {
    fn read_lines(&self) -> Result<Vec<String>> {
        let file = File::open(&self.path).map_err(|source| {
            CalibrationError::ResourceUnavailable {
                path: self.path.display().to_string(),
                source,
            }
        })?;
        read_lines_from(BufReader::new(file))
    }
}

/// Splits `reader` into newline-stripped lines.
///
/// Allocation failures surface as [`CalibrationError::AllocationFailure`];
/// the lines read so far are dropped on the way out.
pub fn read_lines_from<R: BufRead>(reader: R) -> Result<Vec<String>> {
    read_lines_within(reader, usize::MAX)
}

/// Same as [`read_lines_from`], but refuses to buffer more than `budget` bytes
/// of line content in total.
///
/// Every growth of the line buffer and of the collection goes through
/// `try_reserve`, so an exhausted budget and a failed allocation take the same
/// error path.
fn read_lines_within<R: BufRead>(mut reader: R, budget: usize) -> Result<Vec<String>> {
    let mut lines: Vec<String> = Vec::new();
    let mut line: Vec<u8> = Vec::new();
    let mut reserved = 0usize;

    loop {
        let available = reader.fill_buf().map_err(CalibrationError::ReadError)?;
        if available.is_empty() {
            break;
        }

        let (chunk, complete) = match available.iter().position(|&b| b == b'\n') {
            Some(end) => (&available[..=end], true),
            None => (available, false),
        };
        let consumed = chunk.len();

        reserved = reserved
            .checked_add(consumed)
            .filter(|&total| total <= budget)
            .ok_or(CalibrationError::AllocationFailure {
                lines_read: lines.len(),
            })?;
        line.try_reserve(consumed)
            .map_err(|_| CalibrationError::AllocationFailure {
                lines_read: lines.len(),
            })?;
        line.extend_from_slice(chunk);
        reader.consume(consumed);

        if complete {
            push_line(&mut lines, &mut line)?;
        }
    }

    // Last line without a trailing newline
    if !line.is_empty() {
        push_line(&mut lines, &mut line)?;
    }

    tracing::debug!("Read {} lines", lines.len());
    Ok(lines)
}

/// Strips `\n`, `\r\n` or a lone `\r` at end of input, then moves the buffer
/// into `lines` without copying it.
fn push_line(lines: &mut Vec<String>, line: &mut Vec<u8>) -> Result<()> {
    if line.last() == Some(&b'\n') {
        line.pop();
    }
    if line.last() == Some(&b'\r') {
        line.pop();
    }

    let text = String::from_utf8(std::mem::take(line)).map_err(|e| {
        CalibrationError::ReadError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })?;

    lines
        .try_reserve(1)
        .map_err(|_| CalibrationError::AllocationFailure {
            lines_read: lines.len(),
        })?;
    lines.push(text);
    Ok(())
}

/// Writes the echoed lines and the report to a writer, stdout by default.
pub struct ConsoleSink<W: Write = Stdout> {
    writer: Mutex<W>,
    format: OutputFormat,
}

impl ConsoleSink<Stdout> {
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(std::io::stdout(), format)
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self {
            writer: Mutex::new(writer),
            format,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write> OutputSink for ConsoleSink<W> {
    fn echo_line(&self, line: &str) -> Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "Line: {}", line)?;
        Ok(())
    }

    fn write_report(&self, report: &CalibrationReport) -> Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        match self.format {
            OutputFormat::Text => writeln!(writer, "Sum: {}", report.sum)?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut *writer, report)?;
                writeln!(writer)?;
            }
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorCategory;
    use std::io::Cursor;

    #[test]
    fn test_read_lines_strips_newlines() {
        let lines = read_lines_from(Cursor::new("1abc2\n\npqr3stu8vwx\r\ntreb7uchet")).unwrap();
        assert_eq!(lines, vec!["1abc2", "", "pqr3stu8vwx", "treb7uchet"]);
    }

    #[test]
    fn test_read_lines_empty_input() {
        let lines = read_lines_from(Cursor::new("")).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_trailing_newline_does_not_add_a_line() {
        let lines = read_lines_from(Cursor::new("a1\nb2\n")).unwrap();
        assert_eq!(lines.len(), 2);
        let lines = read_lines_from(Cursor::new("\n\n")).unwrap();
        assert_eq!(lines, vec!["", ""]);
    }

    #[test]
    fn test_long_lines_are_not_truncated() {
        let long = "x".repeat(10_000) + "5";
        let lines = read_lines_from(Cursor::new(format!("{}\n", long))).unwrap();
        assert_eq!(lines[0].len(), 10_001);
    }

    #[test]
    fn test_invalid_utf8_is_a_read_error() {
        let err = read_lines_from(Cursor::new(vec![b'1', 0xff, b'\n'])).unwrap_err();
        assert!(matches!(err, CalibrationError::ReadError(_)));
        assert_eq!(err.category(), ErrorCategory::Input);
    }

    #[test]
    fn test_lone_carriage_return_at_eof_is_stripped() {
        let lines = read_lines_from(Cursor::new("a1\r\nb2\r")).unwrap();
        assert_eq!(lines, vec!["a1", "b2"]);
    }

    #[test]
    fn test_lines_spanning_several_buffer_fills() {
        let reader = BufReader::with_capacity(3, Cursor::new("1abc2\r\npqr3stu8vwx\ntreb7uchet"));
        let lines = read_lines_from(reader).unwrap();
        assert_eq!(lines, vec!["1abc2", "pqr3stu8vwx", "treb7uchet"]);
    }

    #[test]
    fn test_exhausted_budget_is_allocation_failure() {
        // "1abc2\n" fits in 8 bytes, the second line does not.
        let err = read_lines_within(Cursor::new("1abc2\npqr3stu8vwx\n"), 8).unwrap_err();
        match err {
            CalibrationError::AllocationFailure { lines_read } => assert_eq!(lines_read, 1),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            CalibrationError::AllocationFailure { lines_read: 1 }
                .severity()
                .exit_code(),
            3
        );
    }

    #[test]
    fn test_budget_that_fits_reads_everything() {
        let lines = read_lines_within(Cursor::new("1abc2\ntreb7uchet"), 16).unwrap();
        assert_eq!(lines, vec!["1abc2", "treb7uchet"]);
    }

    #[test]
    fn test_missing_file_is_resource_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileLineSource::new(dir.path().join("missing.txt"));
        let err = source.read_lines().unwrap_err();
        assert!(matches!(err, CalibrationError::ResourceUnavailable { .. }));
        assert_eq!(err.severity().exit_code(), 1);
    }

    #[test]
    fn test_console_sink_text_output() {
        let sink = ConsoleSink::new(Vec::new(), OutputFormat::Text);
        sink.echo_line("1abc2").unwrap();
        sink.write_report(&CalibrationReport {
            sum: 12,
            lines_read: 1,
            lines_scored: 1,
            skipped: vec![],
        })
        .unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "Line: 1abc2\nSum: 12\n");
    }

    #[test]
    fn test_console_sink_json_output() {
        let sink = ConsoleSink::new(Vec::new(), OutputFormat::Json);
        sink.write_report(&CalibrationReport {
            sum: 142,
            lines_read: 4,
            lines_scored: 4,
            skipped: vec![],
        })
        .unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let json: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(json["sum"], 142);
        assert_eq!(json["lines_read"], 4);
    }
}
