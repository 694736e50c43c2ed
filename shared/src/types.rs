//! Common types used across the simulator

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Severity of a classified metric, ordered `Normal < Warning < Critical`
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Normal,
    Warning,
    Critical,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Normal => "normal",
            Status::Warning => "warning",
            Status::Critical => "critical",
        }
    }

    pub fn is_normal(&self) -> bool {
        matches!(self, Status::Normal)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Measured environmental quantities carried by a reading
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    SoilMoisture,
    Temperature,
    Humidity,
    Ph,
    WaterLevel,
    LightIntensity,
}

impl Metric {
    /// Metrics that receive a status, in the order they appear under `alerts`.
    /// Light intensity is reported but never classified.
    pub const CLASSIFIED: [Metric; 5] = [
        Metric::SoilMoisture,
        Metric::Temperature,
        Metric::Humidity,
        Metric::Ph,
        Metric::WaterLevel,
    ];

    /// Wire name used in threshold tables and the `alerts` object
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::SoilMoisture => "soilMoisture",
            Metric::Temperature => "temperature",
            Metric::Humidity => "humidity",
            Metric::Ph => "ph",
            Metric::WaterLevel => "waterLevel",
            Metric::LightIntensity => "lightIntensity",
        }
    }

    /// Display unit for log lines and alert messages
    pub fn unit(&self) -> &'static str {
        match self {
            Metric::SoilMoisture | Metric::Humidity | Metric::WaterLevel => "%",
            Metric::Temperature => "°C",
            Metric::Ph => "",
            Metric::LightIntensity => " lux",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown metric: {0}")]
pub struct UnknownMetric(pub String);

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "soilMoisture" => Ok(Metric::SoilMoisture),
            "temperature" => Ok(Metric::Temperature),
            "humidity" => Ok(Metric::Humidity),
            // the reading itself calls it phLevel
            "ph" | "phLevel" => Ok(Metric::Ph),
            "waterLevel" => Ok(Metric::WaterLevel),
            "lightIntensity" => Ok(Metric::LightIntensity),
            other => Err(UnknownMetric(other.to_string())),
        }
    }
}

/// Round to two decimal places, the precision every metric is reported at
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to one decimal place, used for dashboard averages
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
