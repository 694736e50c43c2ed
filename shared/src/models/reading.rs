//! Sensor reading models
//!
//! The JSON shape of [`Reading`] is consumed by the ingestion pipeline and the
//! dashboard, so field names are fixed. Note that pH is `phLevel` at the top
//! level but `ph` inside `alerts`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::classifier::{aggregate_status, classify};
use crate::models::Sensor;
use crate::types::{Metric, Status};

/// Raw metric values for one sampling cycle, already rounded
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSample {
    pub temperature: f64,
    pub humidity: f64,
    pub soil_moisture: f64,
    pub ph: f64,
    pub water_level: f64,
    pub light_intensity: f64,
}

/// Per-metric statuses for the five classified metrics
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MetricAlerts {
    pub soil_moisture: Status,
    pub temperature: Status,
    pub humidity: Status,
    pub ph: Status,
    pub water_level: Status,
}

impl MetricAlerts {
    pub fn classify(sample: &MetricSample) -> Self {
        Self {
            soil_moisture: classify(sample.soil_moisture, Metric::SoilMoisture),
            temperature: classify(sample.temperature, Metric::Temperature),
            humidity: classify(sample.humidity, Metric::Humidity),
            ph: classify(sample.ph, Metric::Ph),
            water_level: classify(sample.water_level, Metric::WaterLevel),
        }
    }

    /// Status of a metric; unclassified metrics are always normal
    pub fn get(&self, metric: Metric) -> Status {
        match metric {
            Metric::SoilMoisture => self.soil_moisture,
            Metric::Temperature => self.temperature,
            Metric::Humidity => self.humidity,
            Metric::Ph => self.ph,
            Metric::WaterLevel => self.water_level,
            Metric::LightIntensity => Status::Normal,
        }
    }

    pub fn statuses(&self) -> [Status; 5] {
        Metric::CLASSIFIED.map(|m| self.get(m))
    }

    /// Worst status across all classified metrics
    pub fn overall(&self) -> Status {
        aggregate_status(&self.statuses())
    }

    /// Number of metrics that are not normal
    pub fn active_count(&self) -> usize {
        self.statuses().iter().filter(|s| !s.is_normal()).count()
    }
}

/// One classified, timestamped sensor snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub sensor_id: String,
    pub field_id: String,
    pub crop_type: String,
    pub area_hectares: f64,

    pub temperature: f64,
    pub humidity: f64,
    pub soil_moisture: f64,
    pub ph_level: f64,
    pub water_level: f64,
    pub light_intensity: f64,

    /// UTC, serialized without an offset suffix
    pub timestamp: NaiveDateTime,
    pub status: Status,
    pub alerts: MetricAlerts,
}

impl Reading {
    /// Classify a sample taken by `sensor` and assemble the reading
    pub fn classified(sensor: &Sensor, sample: MetricSample, timestamp: NaiveDateTime) -> Self {
        let alerts = MetricAlerts::classify(&sample);

        Self {
            sensor_id: sensor.id.to_string(),
            field_id: sensor.field.id.to_string(),
            crop_type: sensor.field.crop.to_string(),
            area_hectares: sensor.field.area_hectares,
            temperature: sample.temperature,
            humidity: sample.humidity,
            soil_moisture: sample.soil_moisture,
            ph_level: sample.ph,
            water_level: sample.water_level,
            light_intensity: sample.light_intensity,
            timestamp,
            status: alerts.overall(),
            alerts,
        }
    }

    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::SoilMoisture => self.soil_moisture,
            Metric::Temperature => self.temperature,
            Metric::Humidity => self.humidity,
            Metric::Ph => self.ph_level,
            Metric::WaterLevel => self.water_level,
            Metric::LightIntensity => self.light_intensity,
        }
    }
}
