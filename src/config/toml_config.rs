use super::{DEFAULT_DEMO_INPUT_PATH, DEFAULT_INPUT_PATH};
use crate::core::ConfigProvider;
use crate::domain::model::{MalformedPolicy, OutputFormat, ScanMode};
use crate::utils::error::{CalibrationError, Result};
use crate::utils::validation::{validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: Option<String>,
    pub demo_path: Option<String>,
    pub use_demo: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanConfig {
    pub mode: Option<String>,
    pub on_malformed: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<String>,
    pub echo_lines: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// Loads and parses a config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(&path).map_err(|e| CalibrationError::ConfigError {
                message: format!("cannot read {}: {}", path.as_ref().display(), e),
            })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CalibrationError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unset variables are left as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CalibrationError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("input.path", self.input_path())?;

        if let Some(mode) = &self.scan.mode {
            mode.parse::<ScanMode>()?;
        }
        if let Some(policy) = &self.scan.on_malformed {
            policy.parse::<MalformedPolicy>()?;
        }
        if let Some(format) = &self.output.format {
            format.parse::<OutputFormat>()?;
        }

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

// Unparsable enum values fall back to the default; `validate` reports them.
impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        if let Some(path) = &self.input.path {
            return path;
        }
        if self.input.use_demo.unwrap_or(false) {
            self.input
                .demo_path
                .as_deref()
                .unwrap_or(DEFAULT_DEMO_INPUT_PATH)
        } else {
            DEFAULT_INPUT_PATH
        }
    }

    fn scan_mode(&self) -> ScanMode {
        self.scan
            .mode
            .as_deref()
            .and_then(|m| m.parse().ok())
            .unwrap_or_default()
    }

    fn malformed_policy(&self) -> MalformedPolicy {
        self.scan
            .on_malformed
            .as_deref()
            .and_then(|p| p.parse().ok())
            .unwrap_or_default()
    }

    fn output_format(&self) -> OutputFormat {
        self.output
            .format
            .as_deref()
            .and_then(|f| f.parse().ok())
            .unwrap_or_default()
    }

    fn echo_lines(&self) -> bool {
        self.output.echo_lines.unwrap_or(true)
    }

    fn monitor(&self) -> bool {
        self.monitoring_enabled()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
