//! Test utilities: synthetic traces
//!
//! Shared by unit tests and the benchmarks. Synthetic traces run around a
//! circular track so that positions, distances, and the direction arrow all
//! behave like a real lap.

#![cfg(any(test, feature = "benchmark"))]

use std::f64::consts::TAU;

use crate::types::{LapTime, Trace, TraceSample};

/// Position on a circle whose circumference equals `track_length`.
pub fn circuit_position(distance: f64, track_length: f64) -> (f64, f64) {
    let radius = track_length / TAU;
    let angle = TAU * distance / track_length;
    (radius * angle.cos(), radius * angle.sin())
}

/// `count` samples evenly spaced from 0 to `track_length` at constant speed.
pub fn evenly_spaced_trace(label: &str, count: usize, track_length: f64, speed: f64) -> Trace {
    speed_profile_trace(label, count, track_length, |_| speed)
}

/// Samples evenly spaced from 0 to `track_length` with speed given per distance.
pub fn speed_profile_trace(
    label: &str,
    count: usize,
    track_length: f64,
    speed: impl Fn(f64) -> f64,
) -> Trace {
    let step = if count > 1 { track_length / (count - 1) as f64 } else { 0.0 };
    let samples = (0..count)
        .map(|i| {
            let distance = i as f64 * step;
            let (x, y) = circuit_position(distance, track_length);
            TraceSample::new(distance, x, y, speed(distance))
        })
        .collect();
    Trace::new(label, LapTime::from_millis(90_000), samples)
}

/// Two traces where `VER` is quicker in the first half and `LEC` in the second.
pub fn split_speed_trace(count: usize, track_length: f64) -> (Trace, Trace) {
    let half = track_length / 2.0;
    let mut reference =
        speed_profile_trace("VER", count, track_length, |d| if d < half { 320.0 } else { 250.0 });
    let mut comparison =
        speed_profile_trace("LEC", count, track_length, |d| if d < half { 300.0 } else { 260.0 });
    reference.lap_time = LapTime::from_millis(89_708);
    comparison.lap_time = LapTime::from_millis(89_846);
    (reference, comparison)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_traces_cover_the_whole_track() {
        let trace = evenly_spaced_trace("VER", 11, 1000.0, 200.0);
        assert_eq!(trace.len(), 11);
        assert_eq!(trace.max_distance(), Some(1000.0));
        let (x0, y0) = trace.samples[0].position();
        let (x1, y1) = trace.samples[10].position();
        assert!((x0 - x1).abs() < 1e-6 && (y0 - y1).abs() < 1e-6);
    }
}
