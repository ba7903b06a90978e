// src/runtime.rs
//! Periodic schedulers on tokio
//!
//! Two independent interval loops drive a shared monitor: the buffer tick and
//! the heart-rate refresh. Each loop holds the monitor lock for one step only,
//! so ticks are serialized and feed updates land between them.

use crate::monitor::EcgMonitor;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

pub type SharedMonitor = Arc<Mutex<EcgMonitor>>;

/// Handles for the running scheduler tasks; aborted on drop
pub struct MonitorRuntime {
    tick_task: JoinHandle<()>,
    refresh_task: JoinHandle<()>,
}

impl MonitorRuntime {
    /// Spawn both loops on the current tokio runtime.
    ///
    /// The first buffer tick fires one `tick_period` after spawning, the first
    /// refresh one `refresh_period` after spawning.
    pub fn spawn(monitor: SharedMonitor, tick_period: Duration, refresh_period: Duration) -> Self {
        let tick_task = tokio::spawn(periodic(monitor.clone(), tick_period, |m| {
            m.tick();
        }));
        let refresh_task = tokio::spawn(periodic(monitor, refresh_period, |m| {
            m.refresh_heart_rate();
        }));

        debug!(?tick_period, ?refresh_period, "monitor schedulers started");
        Self {
            tick_task,
            refresh_task,
        }
    }

    /// Spawn with the periods from the monitor's own configuration
    pub fn spawn_configured(monitor: SharedMonitor, config: &crate::config::MonitorConfig) -> Self {
        Self::spawn(
            monitor,
            config.stream.tick_period(),
            config.estimator.refresh_period(),
        )
    }

    pub fn is_running(&self) -> bool {
        !self.tick_task.is_finished() && !self.refresh_task.is_finished()
    }

    /// Stop both loops
    pub fn shutdown(self) {
        // Drop aborts
    }
}

impl Drop for MonitorRuntime {
    fn drop(&mut self) {
        self.tick_task.abort();
        self.refresh_task.abort();
        debug!("monitor schedulers stopped");
    }
}

async fn periodic<F>(monitor: SharedMonitor, period: Duration, mut step: F)
where
    F: FnMut(&mut EcgMonitor) + Send + 'static,
{
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        interval.tick().await;
        {
            let mut guard = monitor.lock();
            step(&mut guard);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MonitorConfig;

    fn shared_monitor() -> SharedMonitor {
        Arc::new(Mutex::new(
            EcgMonitor::with_seed(&MonitorConfig::default(), 11).unwrap(),
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_follow_period() {
        let monitor = shared_monitor();
        let runtime = MonitorRuntime::spawn(
            monitor.clone(),
            Duration::from_millis(40),
            Duration::from_millis(1000),
        );

        tokio::time::sleep(Duration::from_millis(420)).await;
        let global_time = monitor.lock().snapshot().global_time;
        assert!((global_time - 4.4).abs() < 1e-9, "global time {}", global_time);

        assert!(runtime.is_running());
        runtime.shutdown();

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!((monitor.lock().snapshot().global_time - 4.4).abs() < 1e-9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_paused_monitor_does_not_advance() {
        let monitor = shared_monitor();
        monitor.lock().pause();
        let _runtime = MonitorRuntime::spawn_configured(monitor.clone(), &MonitorConfig::default());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!((monitor.lock().snapshot().global_time - 4.0).abs() < 1e-9);
    }
}
