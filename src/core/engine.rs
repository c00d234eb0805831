use crate::core::{CalibrationReport, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct CalibrationEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> CalibrationEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Reads every line, accumulates the calibration values and writes the report.
    pub fn run(&mut self) -> Result<CalibrationReport> {
        tracing::info!("Starting calibration run");
        self.monitor.log_stats("Start");

        let lines = self.pipeline.extract()?;
        tracing::info!("Read {} lines", lines.len());
        self.monitor.log_stats("Read");

        let report = self.pipeline.transform(lines)?;
        tracing::info!(
            "Scored {} lines, skipped {}, sum {}",
            report.lines_scored,
            report.skipped.len(),
            report.sum
        );
        self.monitor.log_stats("Accumulate");

        self.pipeline.load(&report)?;
        self.monitor.log_final_stats();

        Ok(report)
    }
}
