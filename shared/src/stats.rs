//! Running dashboard statistics over published readings

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::Reading;
use crate::types::round1;

/// Summary shown on the dashboard's stats cards
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total_sensors: usize,
    pub active_alerts: usize,
    pub avg_temperature: f64,
    pub avg_humidity: f64,
    pub avg_soil_moisture: f64,
}

/// Keeps the latest reading per sensor
#[derive(Debug, Clone, Default)]
pub struct FleetStats {
    latest: BTreeMap<String, Reading>,
}

impl FleetStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored reading for this reading's sensor
    pub fn record(&mut self, reading: &Reading) {
        self.latest.insert(reading.sensor_id.clone(), reading.clone());
    }

    pub fn latest(&self, sensor_id: &str) -> Option<&Reading> {
        self.latest.get(sensor_id)
    }

    /// Averages are over the latest reading of each sensor, rounded to one
    /// decimal place; everything is zero before the first reading.
    pub fn summary(&self) -> StatsSummary {
        let count = self.latest.len();
        if count == 0 {
            return StatsSummary::default();
        }

        let average = |value: fn(&Reading) -> f64| {
            round1(self.latest.values().map(value).sum::<f64>() / count as f64)
        };

        StatsSummary {
            total_sensors: count,
            active_alerts: self
                .latest
                .values()
                .map(|r| r.alerts.active_count())
                .sum(),
            avg_temperature: average(|r| r.temperature),
            avg_humidity: average(|r| r.humidity),
            avg_soil_moisture: average(|r| r.soil_moisture),
        }
    }
}
