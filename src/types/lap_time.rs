//! Lap time values and `mm:ss:ms` formatting

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::{AnalysisError, Result};

/// Total elapsed time of a lap, held at microsecond resolution.
///
/// Seconds are rounded to the nearest microsecond on construction so that
/// decimal inputs such as `75.499` survive binary floating point intact.
/// Display truncates to whole milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct LapTime {
    micros: u64,
}

impl LapTime {
    /// Zero-length lap time.
    pub const ZERO: LapTime = LapTime { micros: 0 };

    /// Create a lap time from seconds.
    ///
    /// Rejects negative and non-finite values.
    pub fn from_secs_f64(seconds: f64) -> Result<Self> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(AnalysisError::parse(
                "lap time",
                format!("expected a finite, non-negative number of seconds, got {}", seconds),
            ));
        }
        Ok(Self { micros: (seconds * 1_000_000.0).round() as u64 })
    }

    /// Create a lap time from whole milliseconds.
    pub const fn from_millis(millis: u64) -> Self {
        Self { micros: millis * 1_000 }
    }

    /// Lap time in seconds.
    pub fn as_secs_f64(self) -> f64 {
        self.micros as f64 / 1_000_000.0
    }

    /// Lap time in whole milliseconds (truncated).
    pub const fn as_millis(self) -> u64 {
        self.micros / 1_000
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_micros(self.micros)
    }

    /// Absolute difference between two lap times.
    pub const fn abs_diff(self, other: LapTime) -> LapTime {
        LapTime { micros: self.micros.abs_diff(other.micros) }
    }
}

impl From<Duration> for LapTime {
    fn from(duration: Duration) -> Self {
        Self { micros: duration.as_micros() as u64 }
    }
}

impl TryFrom<f64> for LapTime {
    type Error = AnalysisError;

    fn try_from(seconds: f64) -> Result<Self> {
        Self::from_secs_f64(seconds)
    }
}

impl From<LapTime> for f64 {
    fn from(lap_time: LapTime) -> Self {
        lap_time.as_secs_f64()
    }
}

/// Formats as `mm:ss:ms`, zero-padded, milliseconds truncated.
impl fmt::Display for LapTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let millis = self.as_millis();
        let minutes = millis / 60_000;
        let seconds = (millis / 1_000) % 60;
        let millis = millis % 1_000;
        write!(f, "{:02}:{:02}:{:03}", minutes, seconds, millis)
    }
}

/// Format a number of seconds as `mm:ss:ms`.
pub fn format_lap_time(seconds: f64) -> Result<String> {
    Ok(LapTime::from_secs_f64(seconds)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn formats_minutes_seconds_millis() {
        assert_eq!(format_lap_time(75.499).unwrap(), "01:15:499");
        assert_eq!(format_lap_time(0.0).unwrap(), "00:00:000");
        assert_eq!(format_lap_time(89.708).unwrap(), "01:29:708");
        assert_eq!(format_lap_time(0.001).unwrap(), "00:00:001");
    }

    #[test]
    fn truncates_instead_of_rounding() {
        assert_eq!(format_lap_time(75.4999).unwrap(), "01:15:499");
        assert_eq!(format_lap_time(59.9999).unwrap(), "00:59:999");
    }

    #[test]
    fn long_durations_keep_all_minutes() {
        assert_eq!(LapTime::from_millis(100 * 60_000 + 1_234).to_string(), "100:01:234");
    }

    #[test]
    fn rejects_negative_and_non_finite_seconds() {
        assert!(LapTime::from_secs_f64(-0.5).is_err());
        assert!(LapTime::from_secs_f64(f64::NAN).is_err());
        assert!(LapTime::from_secs_f64(f64::INFINITY).is_err());
    }

    #[test]
    fn delta_is_absolute() {
        let pole = LapTime::from_secs_f64(89.708).unwrap();
        let second = LapTime::from_secs_f64(89.846).unwrap();
        assert_eq!(pole.abs_diff(second), second.abs_diff(pole));
        assert_eq!(pole.abs_diff(second).to_string(), "00:00:138");
    }

    #[test]
    fn deserializes_from_seconds() {
        let lap: LapTime = serde_yaml_ng::from_str("75.499").unwrap();
        assert_eq!(lap.as_millis(), 75_499);
        assert!(serde_yaml_ng::from_str::<LapTime>("-1.0").is_err());
    }

    proptest! {
        #[test]
        fn whole_millisecond_inputs_format_exactly(millis in 0u64..6_000_000u64) {
            let seconds = millis as f64 / 1_000.0;
            let formatted = format_lap_time(seconds).unwrap();
            let expected = format!(
                "{:02}:{:02}:{:03}",
                millis / 60_000,
                (millis / 1_000) % 60,
                millis % 1_000
            );
            prop_assert_eq!(formatted, expected);
        }
    }
}
