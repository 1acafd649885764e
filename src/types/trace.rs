//! Recorded runs: ordered telemetry samples plus a lap time

use serde::{Deserialize, Serialize};

use super::LapTime;

/// One telemetry sample along a lap
///
/// Deserializes from either a map (`{distance, x, y, speed}`) or a compact
/// sequence (`[distance, x, y, speed]`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "SampleRepr")]
pub struct TraceSample {
    /// Distance along the track from the start line
    pub distance: f64,
    /// Planar position X
    pub x: f64,
    /// Planar position Y
    pub y: f64,
    /// Speed at this sample
    pub speed: f64,
}

impl TraceSample {
    pub fn new(distance: f64, x: f64, y: f64, speed: f64) -> Self {
        Self { distance, x, y, speed }
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SampleRepr {
    Seq(f64, f64, f64, f64),
    Map { distance: f64, x: f64, y: f64, speed: f64 },
}

impl From<SampleRepr> for TraceSample {
    fn from(repr: SampleRepr) -> Self {
        match repr {
            SampleRepr::Seq(distance, x, y, speed) | SampleRepr::Map { distance, x, y, speed } => {
                TraceSample::new(distance, x, y, speed)
            }
        }
    }
}

/// One competitor's recorded run
///
/// Built fresh from provider data for every comparison and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Driver identifier, unique within a comparison
    pub label: String,
    /// Total elapsed lap time
    pub lap_time: LapTime,
    /// Samples ordered by distance
    pub samples: Vec<TraceSample>,
}

impl Trace {
    pub fn new(label: impl Into<String>, lap_time: LapTime, samples: Vec<TraceSample>) -> Self {
        Self { label: label.into(), lap_time, samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Largest finite distance in the trace, if any
    pub fn max_distance(&self) -> Option<f64> {
        self.samples.iter().map(|s| s.distance).filter(|d| d.is_finite()).reduce(f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_deserialize_from_maps_and_sequences() {
        let yaml = "
label: VER
lap_time: 89.708
samples:
  - [0.0, 10.0, 20.0, 250.5]
  - {distance: 5.5, x: 11.0, y: 21.0, speed: 251.0}
";
        let trace: Trace = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(trace.label, "VER");
        assert_eq!(trace.lap_time.as_millis(), 89_708);
        assert_eq!(trace.samples[0], TraceSample::new(0.0, 10.0, 20.0, 250.5));
        assert_eq!(trace.samples[1].position(), (11.0, 21.0));
    }

    #[test]
    fn integer_sequence_samples_are_accepted() {
        let samples: Vec<TraceSample> = serde_yaml_ng::from_str("- [0, -350, 400, 230]\n").unwrap();
        assert_eq!(samples, vec![TraceSample::new(0.0, -350.0, 400.0, 230.0)]);
    }

    #[test]
    fn short_sequences_are_rejected() {
        let result: Result<Vec<TraceSample>, _> = serde_yaml_ng::from_str("- [0.0, 1.0, 2.0]\n");
        assert!(result.is_err());
    }

    #[test]
    fn max_distance_ignores_non_finite_values() {
        let trace = Trace::new(
            "LEC",
            LapTime::ZERO,
            vec![
                TraceSample::new(0.0, 0.0, 0.0, 100.0),
                TraceSample::new(f64::NAN, 0.0, 0.0, 100.0),
                TraceSample::new(42.0, 0.0, 0.0, 100.0),
            ],
        );
        assert_eq!(trace.max_distance(), Some(42.0));
        assert_eq!(Trace::new("SAI", LapTime::ZERO, vec![]).max_distance(), None);
    }
}
