//! Soil moisture sensor.
//!
//! There is no hardware integration. [`SimulatedSensor`] draws readings from a
//! pseudo-random generator and stands in for a device behind [`MoistureSensor`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of moisture readings, as a percentage.
pub trait MoistureSensor {
    /// Takes one reading in `0..=100`.
    fn read(&mut self) -> u8;
}

/// Random readings in `0..100`; not connected to any device.
#[derive(Debug)]
pub struct SimulatedSensor {
    rng: StdRng,
}

impl SimulatedSensor {
    /// Simulation seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic simulation, for reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SimulatedSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl MoistureSensor for SimulatedSensor {
    fn read(&mut self) -> u8 {
        self.rng.gen_range(0..100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readings_stay_in_range() {
        let mut sensor = SimulatedSensor::new();
        for _ in 0..1_000 {
            assert!(sensor.read() < 100);
        }
    }

    #[test]
    fn test_seeded_sensor_is_reproducible() {
        let mut a = SimulatedSensor::seeded(7);
        let mut b = SimulatedSensor::seeded(7);
        let first: Vec<u8> = (0..16).map(|_| a.read()).collect();
        let second: Vec<u8> = (0..16).map(|_| b.read()).collect();
        assert_eq!(first, second);
    }
}
