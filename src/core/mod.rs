pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{CalibrationReport, CalibrationValue, SkippedLine};
pub use crate::domain::ports::{ConfigProvider, LineSource, OutputSink, Pipeline};
pub use crate::domain::scanner::DigitScanner;
pub use crate::utils::error::Result;
