//! Synthetic reading generator
//!
//! Each call picks a sensor, samples all six metrics from fixed uniform
//! ranges and classifies the result. The random source and the clock are
//! injected so sequences can be replayed in tests.

use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::{MetricSample, Reading, Sensor, SENSORS};
use crate::types::round2;

pub const TEMPERATURE_RANGE: RangeInclusive<f64> = 15.0..=32.0;
pub const HUMIDITY_RANGE: RangeInclusive<f64> = 35.0..=75.0;
pub const SOIL_MOISTURE_RANGE: RangeInclusive<f64> = 20.0..=70.0;
pub const PH_RANGE: RangeInclusive<f64> = 5.5..=7.8;
pub const WATER_LEVEL_RANGE: RangeInclusive<f64> = 10.0..=95.0;
pub const LIGHT_INTENSITY_RANGE: RangeInclusive<f64> = 200.0..=1000.0;

/// Below this soil moisture the field is treated as under drought
pub const DROUGHT_SOIL_MOISTURE: f64 = 30.0;
/// Temperature range used instead of [`TEMPERATURE_RANGE`] under drought
pub const DROUGHT_TEMPERATURE_RANGE: RangeInclusive<f64> = 25.0..=35.0;

/// Source of the current instant
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub struct ReadingGenerator<R, C> {
    rng: R,
    clock: C,
}

impl<C: Clock> ReadingGenerator<StdRng, C> {
    /// Generator whose sequence is fully determined by `seed`
    pub fn seeded(seed: u64, clock: C) -> Self {
        Self::new(StdRng::seed_from_u64(seed), clock)
    }
}

impl<R: Rng, C: Clock> ReadingGenerator<R, C> {
    pub fn new(rng: R, clock: C) -> Self {
        Self { rng, clock }
    }

    /// Produce one classified reading
    pub fn generate(&mut self) -> Reading {
        let sensor = self.pick_sensor();
        let sample = self.sample_metrics();
        let timestamp = self.clock.now().naive_utc();

        Reading::classified(sensor, sample, timestamp)
    }

    fn pick_sensor(&mut self) -> &'static Sensor {
        &SENSORS[self.rng.random_range(0..SENSORS.len())]
    }

    /// Sampling order is part of the seeded sequence; do not reorder.
    pub fn sample_metrics(&mut self) -> MetricSample {
        let mut temperature = self.uniform(TEMPERATURE_RANGE);
        let humidity = self.uniform(HUMIDITY_RANGE);
        let soil_moisture = self.uniform(SOIL_MOISTURE_RANGE);
        let ph = self.uniform(PH_RANGE);
        let water_level = self.uniform(WATER_LEVEL_RANGE);
        let light_intensity = self.uniform(LIGHT_INTENSITY_RANGE);

        // Dry soil runs hot: replace the temperature outright
        if soil_moisture < DROUGHT_SOIL_MOISTURE {
            temperature = self.uniform(DROUGHT_TEMPERATURE_RANGE);
        }

        MetricSample {
            temperature,
            humidity,
            soil_moisture,
            ph,
            water_level,
            light_intensity,
        }
    }

    fn uniform(&mut self, range: RangeInclusive<f64>) -> f64 {
        round2(self.rng.random_range(range))
    }
}

/// Generate a reading from the thread-local RNG and the wall clock
#[cfg(feature = "thread-rng")]
pub fn generate_reading() -> Reading {
    ReadingGenerator::new(rand::rng(), SystemClock).generate()
}
