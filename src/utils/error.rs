use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalibrationError {
    #[error("Cannot open input file {path}: {source}")]
    ResourceUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Memory allocation failed after reading {lines_read} lines")]
    AllocationFailure { lines_read: usize },

    #[error("Line {line_number} contains no digits: {line:?}")]
    MalformedLine { line_number: usize, line: String },

    #[error("Failed to read input: {0}")]
    ReadError(#[source] std::io::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value {value:?} for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Resource,
    Data,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code used by the binary for this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl CalibrationError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CalibrationError::ResourceUnavailable { .. } | CalibrationError::ReadError(_) => {
                ErrorCategory::Input
            }
            CalibrationError::AllocationFailure { .. } => ErrorCategory::Resource,
            CalibrationError::MalformedLine { .. } => ErrorCategory::Data,
            CalibrationError::IoError(_) | CalibrationError::SerializationError(_) => {
                ErrorCategory::Output
            }
            CalibrationError::ConfigError { .. }
            | CalibrationError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CalibrationError::AllocationFailure { .. } => ErrorSeverity::Critical,
            CalibrationError::ReadError(_)
            | CalibrationError::IoError(_)
            | CalibrationError::SerializationError(_) => ErrorSeverity::Medium,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CalibrationError::ResourceUnavailable { .. } => {
                "Check that the input file exists and is readable, or pass --input <path>"
            }
            CalibrationError::AllocationFailure { .. } => {
                "Free some memory or split the input into smaller files"
            }
            CalibrationError::MalformedLine { .. } => {
                "Fix the line or rerun with --on-malformed skip"
            }
            CalibrationError::ReadError(_) => "Make sure the input is valid UTF-8 text",
            CalibrationError::IoError(_) => "Check that standard output is still open",
            CalibrationError::SerializationError(_) => "Rerun with --format text",
            CalibrationError::ConfigError { .. } => "Check the TOML syntax of the config file",
            CalibrationError::InvalidConfigValueError { .. } => {
                "Use one of the documented values for this field"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CalibrationError::ResourceUnavailable { path, .. } => {
                format!("Input file '{}' could not be opened", path)
            }
            CalibrationError::AllocationFailure { lines_read } => format!(
                "Ran out of memory while reading the input ({} lines read)",
                lines_read
            ),
            CalibrationError::MalformedLine { line_number, .. } => {
                format!("Line {} has no digit to calibrate from", line_number)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CalibrationError>;
