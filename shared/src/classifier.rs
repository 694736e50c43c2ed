//! Threshold-based status classification

use serde::Serialize;

use crate::models::{Direction, Reading};
use crate::types::{Metric, Status};

/// Classify a metric value against its static thresholds.
///
/// Metrics without thresholds (light intensity) are always normal.
pub fn classify(value: f64, metric: Metric) -> Status {
    metric
        .thresholds()
        .and_then(|t| t.breach(value))
        .map_or(Status::Normal, |breach| breach.status)
}

/// Classify by wire name. Unknown names fall through to normal rather than
/// failing, matching how ingestion has always treated them.
pub fn classify_named(value: f64, metric: &str) -> Status {
    metric
        .parse::<Metric>()
        .map_or(Status::Normal, |m| classify(value, m))
}

/// Worst-case aggregation: critical > warning > normal. Empty input is normal.
pub fn aggregate_status(statuses: &[Status]) -> Status {
    statuses.iter().copied().max().unwrap_or_default()
}

/// A single out-of-range metric, in the shape the dashboard lists alerts
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricAlert {
    pub sensor_id: String,
    pub field_id: String,
    pub metric: Metric,
    pub severity: Status,
    pub value: f64,
    pub threshold: f64,
    pub message: String,
}

/// One alert per non-normal metric of a reading, in `alerts` key order
pub fn metric_alerts(reading: &Reading) -> Vec<MetricAlert> {
    Metric::CLASSIFIED
        .iter()
        .filter_map(|&metric| {
            let value = reading.value(metric);
            let breach = metric.thresholds()?.breach(value)?;
            let side = match breach.direction {
                Direction::Low => "below",
                Direction::High => "above",
            };

            Some(MetricAlert {
                sensor_id: reading.sensor_id.clone(),
                field_id: reading.field_id.clone(),
                metric,
                severity: breach.status,
                value,
                threshold: breach.threshold,
                message: format!(
                    "{} {} in {}: {}{} is {} the {} threshold of {}{}",
                    metric,
                    breach.status,
                    reading.field_id,
                    value,
                    metric.unit(),
                    side,
                    breach.status,
                    breach.threshold,
                    metric.unit(),
                ),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MetricSample, SENSORS};
    use chrono::DateTime;

    #[test]
    fn test_floor_metric_bounds() {
        assert_eq!(classify(24.99, Metric::SoilMoisture), Status::Critical);
        assert_eq!(classify(25.0, Metric::SoilMoisture), Status::Warning);
        assert_eq!(classify(34.99, Metric::SoilMoisture), Status::Warning);
        assert_eq!(classify(35.0, Metric::SoilMoisture), Status::Normal);
        assert_eq!(classify(99.0, Metric::SoilMoisture), Status::Normal);

        assert_eq!(classify(14.0, Metric::WaterLevel), Status::Critical);
        assert_eq!(classify(20.0, Metric::WaterLevel), Status::Warning);
        assert_eq!(classify(40.0, Metric::WaterLevel), Status::Normal);
    }

    #[test]
    fn test_floor_metric_gap_falls_back_to_normal() {
        // Between warning and optimal_min no rule applies. Reported as normal,
        // even though the value is below the optimal range.
        assert_eq!(classify(37.5, Metric::SoilMoisture), Status::Normal);
        assert_eq!(classify(40.0, Metric::Humidity), Status::Normal);
        assert_eq!(classify(30.0, Metric::WaterLevel), Status::Normal);
    }

    #[test]
    fn test_banded_metric_bounds_are_strict() {
        assert_eq!(classify(9.999, Metric::Temperature), Status::Critical);
        assert_eq!(classify(10.0, Metric::Temperature), Status::Warning);
        assert_eq!(classify(15.0, Metric::Temperature), Status::Normal);
        assert_eq!(classify(32.0, Metric::Temperature), Status::Normal);
        assert_eq!(classify(32.01, Metric::Temperature), Status::Warning);
        assert_eq!(classify(38.0, Metric::Temperature), Status::Warning);
        assert_eq!(classify(38.01, Metric::Temperature), Status::Critical);

        assert_eq!(classify(4.99, Metric::Ph), Status::Critical);
        assert_eq!(classify(5.0, Metric::Ph), Status::Warning);
        assert_eq!(classify(5.5, Metric::Ph), Status::Normal);
        assert_eq!(classify(7.5, Metric::Ph), Status::Normal);
        assert_eq!(classify(7.8, Metric::Ph), Status::Warning);
        assert_eq!(classify(8.01, Metric::Ph), Status::Critical);
    }

    #[test]
    fn test_unclassified_and_unknown_metrics_are_normal() {
        assert_eq!(classify(0.0, Metric::LightIntensity), Status::Normal);
        assert_eq!(classify_named(-100.0, "rainfall"), Status::Normal);
        assert_eq!(classify_named(20.0, "soilMoisture"), Status::Critical);
        assert_eq!(classify_named(9.0, "temperature"), Status::Critical);
    }

    #[test]
    fn test_aggregate_status() {
        use Status::*;
        assert_eq!(
            aggregate_status(&[Normal, Warning, Normal, Normal, Normal]),
            Warning
        );
        assert_eq!(
            aggregate_status(&[Warning, Warning, Critical, Normal, Warning]),
            Critical
        );
        assert_eq!(aggregate_status(&[Normal; 5]), Normal);
        assert_eq!(aggregate_status(&[]), Normal);
    }

    #[test]
    fn test_metric_alerts_lists_only_breaches() {
        let sample = MetricSample {
            temperature: 39.5,
            humidity: 30.0,
            soil_moisture: 50.0,
            ph: 6.5,
            water_level: 80.0,
            light_intensity: 150.0,
        };
        let timestamp = DateTime::from_timestamp(1_717_230_600, 0)
            .unwrap()
            .naive_utc();
        let reading = Reading::classified(&SENSORS[2], sample, timestamp);

        let alerts = metric_alerts(&reading);
        assert_eq!(alerts.len(), 2);

        assert_eq!(alerts[0].metric, Metric::Temperature);
        assert_eq!(alerts[0].severity, Status::Critical);
        assert_eq!(alerts[0].threshold, 38.0);
        assert!(alerts[0].message.contains("above"));
        assert_eq!(alerts[0].field_id, "Greenhouse_C");

        assert_eq!(alerts[1].metric, Metric::Humidity);
        assert_eq!(alerts[1].severity, Status::Warning);
        assert_eq!(alerts[1].threshold, 35.0);
        assert!(alerts[1].message.contains("below"));
    }
}
