pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::cli::{ConsoleSink, FileLineSource};
pub use config::toml_config::TomlConfig;
pub use core::{engine::CalibrationEngine, pipeline::CalibrationPipeline};
pub use domain::model::{CalibrationReport, MalformedPolicy, OutputFormat, ScanMode};
pub use domain::ports::ConfigProvider;
pub use utils::error::{CalibrationError, Result};
