#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessesToUpdate, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct ProcessStats {
    pub cpu_usage: f32,
    pub memory_usage_kb: u64,
    pub peak_memory_kb: u64,
    pub elapsed_time: Duration,
}

/// Samples this process's CPU and resident memory between engine phases.
#[cfg(feature = "cli")]
pub struct SystemMonitor {
    system: Option<(System, Pid)>,
    start_time: Instant,
    peak_memory_kb: u64,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let system = if enabled {
            match sysinfo::get_current_pid() {
                Ok(pid) => {
                    let mut system = System::new();
                    system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
                    Some((system, pid))
                }
                Err(e) => {
                    tracing::warn!("Process monitoring unavailable: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Self {
            system,
            start_time: Instant::now(),
            peak_memory_kb: 0,
        }
    }

    pub fn get_stats(&mut self) -> Option<ProcessStats> {
        let (system, pid) = self.system.as_mut()?;
        system.refresh_processes(ProcessesToUpdate::Some(&[*pid]), true);
        let process = system.process(*pid)?;

        let memory_kb = process.memory() / 1024;
        self.peak_memory_kb = self.peak_memory_kb.max(memory_kb);

        Some(ProcessStats {
            cpu_usage: process.cpu_usage(),
            memory_usage_kb: memory_kb,
            peak_memory_kb: self.peak_memory_kb,
            elapsed_time: self.start_time.elapsed(),
        })
    }

    pub fn log_stats(&mut self, phase: &str) {
        if let Some(stats) = self.get_stats() {
            tracing::info!(
                "{} - CPU: {:.1}%, Memory: {}KB, Peak: {}KB, Time: {:?}",
                phase,
                stats.cpu_usage,
                stats.memory_usage_kb,
                stats.peak_memory_kb,
                stats.elapsed_time
            );
        }
    }

    pub fn log_final_stats(&mut self) {
        if let Some(stats) = self.get_stats() {
            tracing::info!(
                "Final stats - Total time: {:?}, Peak memory: {}KB",
                stats.elapsed_time,
                stats.peak_memory_kb
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.system.is_some()
    }
}

#[cfg(feature = "cli")]
impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// No-op monitor for library builds without the cli feature
#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_stats(&mut self, _phase: &str) {}

    pub fn log_final_stats(&mut self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
