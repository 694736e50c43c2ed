//! Generation loop: generate, publish, log, sleep
//!
//! Delivery is at-most-once. A reading that fails to publish is logged and
//! dropped; the next cycle starts with a fresh reading.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use serde::Serialize;
use shared::{metric_alerts, Clock, FleetStats, Reading, ReadingGenerator, StatsSummary, Status};

use crate::services::publisher::Publisher;

/// Counters for a finished run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub cycles: u64,
    pub published: u64,
    pub failed: u64,
    pub normal: u64,
    pub warning: u64,
    pub critical: u64,
    pub fleet: StatsSummary,
}

impl RunSummary {
    fn count(&mut self, status: Status) {
        match status {
            Status::Normal => self.normal += 1,
            Status::Warning => self.warning += 1,
            Status::Critical => self.critical += 1,
        }
    }
}

/// Result of a single cycle
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Published(Reading),
    Failed(Reading),
}

pub struct Simulator<P, R, C> {
    publisher: P,
    generator: ReadingGenerator<R, C>,
    interval: Duration,
    max_cycles: Option<u64>,
    stats: FleetStats,
}

impl<P, R, C> Simulator<P, R, C>
where
    P: Publisher,
    R: Rng,
    C: Clock,
{
    pub fn new(publisher: P, generator: ReadingGenerator<R, C>, interval: Duration) -> Self {
        Self {
            publisher,
            generator,
            interval,
            max_cycles: None,
            stats: FleetStats::new(),
        }
    }

    /// Stop after `max_cycles` cycles instead of running until shutdown
    pub fn with_max_cycles(mut self, max_cycles: Option<u64>) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    pub fn stats(&self) -> &FleetStats {
        &self.stats
    }

    /// Generate and publish one reading
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let reading = self.generator.generate();

        match self.publisher.publish(&reading).await {
            Ok(()) => {
                tracing::info!(
                    status = %reading.status,
                    sensor = %reading.sensor_id,
                    "[{}] {} ({}) - Temp: {}°C, Soil: {}%, pH: {}",
                    reading.timestamp,
                    reading.field_id,
                    reading.crop_type,
                    reading.temperature,
                    reading.soil_moisture,
                    reading.ph_level
                );
                for alert in metric_alerts(&reading) {
                    tracing::warn!(
                        metric = %alert.metric,
                        severity = %alert.severity,
                        "{}",
                        alert.message
                    );
                }

                self.stats.record(&reading);
                CycleOutcome::Published(reading)
            }
            Err(e) if e.is_publish_failure() => {
                tracing::error!(code = e.code(), "Error sending data: {}", e);
                CycleOutcome::Failed(reading)
            }
            Err(e) => {
                tracing::error!(code = e.code(), "Publisher misconfigured: {}", e);
                CycleOutcome::Failed(reading)
            }
        }
    }

    /// Run until `max_cycles` is reached or `shutdown` completes.
    /// Shutdown is only observed between cycles, never mid-publish.
    pub async fn run<F>(mut self, shutdown: F) -> RunSummary
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut summary = RunSummary::default();

        loop {
            if self.max_cycles.is_some_and(|max| summary.cycles >= max) {
                break;
            }

            summary.cycles += 1;
            match self.run_cycle().await {
                CycleOutcome::Published(reading) => {
                    summary.published += 1;
                    summary.count(reading.status);
                }
                CycleOutcome::Failed(_) => summary.failed += 1,
            }

            if self.max_cycles.is_some_and(|max| summary.cycles >= max) {
                break;
            }

            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Shutdown requested, stopping simulator");
                    break;
                }
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        summary.fleet = self.stats.summary();
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SimError, SimResult};
    use chrono::DateTime;
    use rand::rngs::StdRng;
    use shared::FixedClock;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Fails every other publish, starting with the second
    struct FlakyPublisher {
        calls: AtomicU64,
    }

    impl Publisher for FlakyPublisher {
        async fn publish(&self, _reading: &Reading) -> SimResult<()> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call % 2 == 1 {
                Err(SimError::Io(std::io::Error::other("connection reset")))
            } else {
                Ok(())
            }
        }
    }

    fn generator() -> ReadingGenerator<StdRng, FixedClock> {
        let clock = FixedClock(DateTime::from_timestamp(1_717_230_600, 0).unwrap());
        ReadingGenerator::seeded(11, clock)
    }

    #[tokio::test]
    async fn test_failed_publish_is_skipped_not_retried() {
        let publisher = FlakyPublisher {
            calls: AtomicU64::new(0),
        };
        let summary = Simulator::new(publisher, generator(), Duration::ZERO)
            .with_max_cycles(Some(5))
            .run(std::future::pending())
            .await;

        assert_eq!(summary.cycles, 5);
        assert_eq!(summary.published, 3);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.normal + summary.warning + summary.critical, 3);
    }

    /// Rejects every reading with a non-transport error
    struct MisconfiguredPublisher;

    impl Publisher for MisconfiguredPublisher {
        async fn publish(&self, _reading: &Reading) -> SimResult<()> {
            Err(SimError::Configuration("event hub name missing".into()))
        }
    }

    #[tokio::test]
    async fn test_configuration_error_is_logged_and_skipped() {
        let summary = Simulator::new(MisconfiguredPublisher, generator(), Duration::ZERO)
            .with_max_cycles(Some(3))
            .run(std::future::pending())
            .await;

        assert_eq!(summary.cycles, 3);
        assert_eq!(summary.failed, 3);
        assert_eq!(summary.published, 0);
    }

    #[tokio::test]
    async fn test_failed_reading_not_recorded_in_stats() {
        let publisher = FlakyPublisher {
            calls: AtomicU64::new(1),
        };
        let mut simulator = Simulator::new(publisher, generator(), Duration::ZERO);

        let outcome = simulator.run_cycle().await;
        assert!(matches!(outcome, CycleOutcome::Failed(_)));
        assert_eq!(simulator.stats().summary().total_sensors, 0);
    }
}
