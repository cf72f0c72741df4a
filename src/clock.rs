//! Header clock — a start/stop tick service publishing over a watch channel.

use crate::error::DashboardError;
use chrono::{DateTime, Local};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const CLOCK_FORMAT: &str = "%H:%M:%S";
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq)]
pub struct ClockReading {
    /// Ticks since the last `start`; 0 before the first tick.
    pub ticks: u64,
    pub at: DateTime<Local>,
    pub display: String,
}

impl ClockReading {
    fn at(ticks: u64, at: DateTime<Local>) -> Self {
        Self {
            ticks,
            display: format_clock(&at),
            at,
        }
    }
}

pub fn format_clock(at: &DateTime<Local>) -> String {
    at.format(CLOCK_FORMAT).to_string()
}

/// Publishes the local time once per period while running.
///
/// Subscribers get a `watch::Receiver`; only the latest reading is kept.
/// Dropping the ticker stops the task.
pub struct ClockTicker {
    period: Duration,
    tx: Arc<watch::Sender<ClockReading>>,
    task_handle: Option<JoinHandle<()>>,
}

impl Default for ClockTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockTicker {
    pub fn new() -> Self {
        Self::with_period(TICK_PERIOD)
    }

    pub fn with_period(period: Duration) -> Self {
        let (tx, _rx) = watch::channel(ClockReading::at(0, Local::now()));
        Self {
            period,
            tx: Arc::new(tx),
            task_handle: None,
        }
    }

    /// Spawn the tick task on the current tokio runtime. No-op if running.
    pub fn start(&mut self) -> Result<(), DashboardError> {
        if self.is_running() {
            return Ok(());
        }
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| DashboardError::Other(format!("Clock needs a tokio runtime: {}", e)))?;

        let tx = Arc::clone(&self.tx);
        let period = self.period;
        self.task_handle = Some(runtime.spawn(async move {
            let mut interval = tokio::time::interval(period);
            let mut ticks = 0u64;
            loop {
                interval.tick().await;
                ticks += 1;
                tx.send_replace(ClockReading::at(ticks, Local::now()));
            }
        }));
        tracing::debug!(period_ms = period.as_millis() as u64, "Clock started");
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.task_handle.take() {
            handle.abort();
            tracing::debug!("Clock stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.task_handle
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    pub fn subscribe(&self) -> watch::Receiver<ClockReading> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> ClockReading {
        self.tx.borrow().clone()
    }
}

impl Drop for ClockTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
