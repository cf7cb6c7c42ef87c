//! Synthetic telemetry for exercising the ingest path without hardware.
//!
//! Each tick the vehicle drifts: speed random-walks inside
//! `[0, MAX_SPEED]`, acceleration and braking follow from the speed change,
//! and tilt and rotation jitter around zero. On top of that a single roll
//! may inject one event that is guaranteed to cross a default threshold.
//! The RNG is injected so runs are reproducible under a fixed seed.

use std::ops::Range;

use drivesafe_core::alert::AlertKind;
use drivesafe_core::telemetry::TelemetrySample;
use rand::Rng;

/// Upper bound of the natural speed walk, km/h.
pub const MAX_SPEED: f64 = 180.0;

/// Speed the simulated vehicle starts at, km/h.
pub const INITIAL_SPEED: f64 = 60.0;

// Cumulative event probabilities for a single roll in `[0, 1)`.
const OVER_SPEED_P: f64 = 0.08;
const ACCELERATION_P: f64 = 0.14;
const BRAKING_P: f64 = 0.20;
const TILT_P: f64 = 0.24;
const SHARP_TURN_P: f64 = 0.30;
const CRASH_P: f64 = 0.305;

const OVER_SPEED_RANGE: Range<f64> = 125.0..155.0;
const HARSH_RANGE: Range<f64> = 5.0..9.0;
const TILT_RANGE: Range<f64> = 50.0..70.0;
const SHARP_TURN_RANGE: Range<f64> = 40.0..70.0;
const CRASH_IMPACT_RANGE: Range<f64> = 15.0..25.0;

/// One generated sample plus the event injected into it, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Generated {
    pub sample: TelemetrySample,
    pub event: Option<AlertKind>,
}

/// Stateful telemetry generator.
pub struct Simulator<R> {
    rng: R,
    state: TelemetrySample,
}

impl<R: Rng> Simulator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            state: TelemetrySample {
                speed: INITIAL_SPEED,
                acceleration: 0.0,
                braking: 0.0,
                tilt: 0.0,
                rotation_rate: 0.0,
                is_crash: false,
            },
        }
    }

    /// Advance one tick.
    pub fn next_sample(&mut self) -> Generated {
        let roll: f64 = self.rng.random();

        // Biased slightly upwards so the vehicle tends to pick up speed.
        let speed_change = (self.rng.random::<f64>() - 0.45) * 8.0;
        let mut speed = (self.state.speed + speed_change).clamp(0.0, MAX_SPEED);
        let mut acceleration = if speed_change > 0.0 { speed_change * 0.5 } else { 0.0 };
        let mut braking = if speed_change < 0.0 { -speed_change * 0.5 } else { 0.0 };
        let mut tilt = (self.rng.random::<f64>() - 0.5) * 8.0;
        let mut rotation_rate = (self.rng.random::<f64>() - 0.5) * 15.0;
        let mut is_crash = false;

        let event = if roll < OVER_SPEED_P {
            speed = self.rng.random_range(OVER_SPEED_RANGE);
            Some(AlertKind::OverSpeed)
        } else if roll < ACCELERATION_P {
            acceleration = self.rng.random_range(HARSH_RANGE);
            Some(AlertKind::SuddenAcceleration)
        } else if roll < BRAKING_P {
            braking = self.rng.random_range(HARSH_RANGE);
            Some(AlertKind::SuddenBraking)
        } else if roll < TILT_P {
            tilt = self.signed(TILT_RANGE);
            Some(AlertKind::TiltAlert)
        } else if roll < SHARP_TURN_P {
            rotation_rate = self.signed(SHARP_TURN_RANGE);
            Some(AlertKind::SharpTurn)
        } else if roll < CRASH_P {
            is_crash = true;
            acceleration = self.rng.random_range(CRASH_IMPACT_RANGE);
            Some(AlertKind::CrashDetection)
        } else {
            None
        };

        self.state = TelemetrySample {
            speed,
            acceleration,
            braking,
            tilt,
            rotation_rate,
            is_crash,
        };

        Generated {
            sample: self.state,
            event,
        }
    }

    fn signed(&mut self, magnitude: Range<f64>) -> f64 {
        let sign = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        sign * self.rng.random_range(magnitude)
    }
}
