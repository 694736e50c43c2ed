//! Per-metric alert thresholds
//!
//! Floor metrics (soil moisture, humidity, water level) only have lower
//! bounds. Banded metrics (temperature, pH) are bounded on both sides.

use serde::Serialize;

use crate::types::{Metric, Status};

/// Lower-bound-only thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FloorThresholds {
    pub critical: f64,
    pub warning: f64,
    pub optimal_min: f64,
    /// Informational only; nothing above the floor is ever flagged
    pub optimal_max: Option<f64>,
}

/// Two-sided thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandedThresholds {
    pub critical_low: f64,
    pub warning_low: f64,
    pub optimal_min: f64,
    pub optimal_max: f64,
    pub warning_high: f64,
    pub critical_high: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Thresholds {
    Floor(FloorThresholds),
    Banded(BandedThresholds),
}

/// Which side of the acceptable range a value fell out of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Low,
    High,
}

/// A threshold that a value crossed
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Breach {
    pub status: Status,
    pub threshold: f64,
    pub direction: Direction,
}

impl Breach {
    fn low(status: Status, threshold: f64) -> Self {
        Self {
            status,
            threshold,
            direction: Direction::Low,
        }
    }

    fn high(status: Status, threshold: f64) -> Self {
        Self {
            status,
            threshold,
            direction: Direction::High,
        }
    }
}

impl FloorThresholds {
    /// Strict `<` on both bounds; first match wins.
    ///
    /// Values in `[warning, optimal_min)` match no rule and fall back to
    /// normal, the same as values at or above `optimal_min`.
    pub fn breach(&self, value: f64) -> Option<Breach> {
        if value < self.critical {
            Some(Breach::low(Status::Critical, self.critical))
        } else if value < self.warning {
            Some(Breach::low(Status::Warning, self.warning))
        } else {
            None
        }
    }

    /// True when a value sits in the band no floor rule covers
    pub fn in_fallback_gap(&self, value: f64) -> bool {
        value >= self.warning && value < self.optimal_min
    }
}

impl BandedThresholds {
    /// Critical bounds are checked on both sides before warning bounds.
    /// Values exactly on a bound are not outside it.
    pub fn breach(&self, value: f64) -> Option<Breach> {
        if value < self.critical_low {
            Some(Breach::low(Status::Critical, self.critical_low))
        } else if value > self.critical_high {
            Some(Breach::high(Status::Critical, self.critical_high))
        } else if value < self.warning_low {
            Some(Breach::low(Status::Warning, self.warning_low))
        } else if value > self.warning_high {
            Some(Breach::high(Status::Warning, self.warning_high))
        } else {
            None
        }
    }
}

impl Thresholds {
    pub fn breach(&self, value: f64) -> Option<Breach> {
        match self {
            Thresholds::Floor(t) => t.breach(value),
            Thresholds::Banded(t) => t.breach(value),
        }
    }
}

pub static SOIL_MOISTURE_THRESHOLDS: Thresholds = Thresholds::Floor(FloorThresholds {
    critical: 25.0,
    warning: 35.0,
    optimal_min: 40.0,
    optimal_max: Some(65.0),
});

pub static TEMPERATURE_THRESHOLDS: Thresholds = Thresholds::Banded(BandedThresholds {
    critical_low: 10.0,
    warning_low: 15.0,
    optimal_min: 18.0,
    optimal_max: 28.0,
    warning_high: 32.0,
    critical_high: 38.0,
});

pub static HUMIDITY_THRESHOLDS: Thresholds = Thresholds::Floor(FloorThresholds {
    critical: 25.0,
    warning: 35.0,
    optimal_min: 45.0,
    optimal_max: Some(75.0),
});

pub static PH_THRESHOLDS: Thresholds = Thresholds::Banded(BandedThresholds {
    critical_low: 5.0,
    warning_low: 5.5,
    optimal_min: 6.0,
    optimal_max: 7.0,
    warning_high: 7.5,
    critical_high: 8.0,
});

pub static WATER_LEVEL_THRESHOLDS: Thresholds = Thresholds::Floor(FloorThresholds {
    critical: 15.0,
    warning: 25.0,
    optimal_min: 40.0,
    optimal_max: None,
});

impl Metric {
    /// Threshold table for this metric; `None` for unclassified metrics
    pub fn thresholds(&self) -> Option<&'static Thresholds> {
        match self {
            Metric::SoilMoisture => Some(&SOIL_MOISTURE_THRESHOLDS),
            Metric::Temperature => Some(&TEMPERATURE_THRESHOLDS),
            Metric::Humidity => Some(&HUMIDITY_THRESHOLDS),
            Metric::Ph => Some(&PH_THRESHOLDS),
            Metric::WaterLevel => Some(&WATER_LEVEL_THRESHOLDS),
            Metric::LightIntensity => None,
        }
    }
}
