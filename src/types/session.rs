//! Session selection and classification results

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::LapTime;
use crate::AnalysisError;

/// Timed session type within an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionKind {
    /// Grid-deciding qualifying (`Q`)
    #[default]
    #[serde(rename = "Q")]
    Qualifying,
    /// Sprint shootout / sprint qualifying (`SQ`)
    #[serde(rename = "SQ")]
    SprintQualifying,
    /// Sprint race (`S`)
    #[serde(rename = "S")]
    Sprint,
    /// Main race (`R`)
    #[serde(rename = "R")]
    Race,
}

impl SessionKind {
    /// Short session code used in archive file names
    pub fn code(self) -> &'static str {
        match self {
            SessionKind::Qualifying => "Q",
            SessionKind::SprintQualifying => "SQ",
            SessionKind::Sprint => "S",
            SessionKind::Race => "R",
        }
    }

    /// Human readable session title for image captions
    pub fn title(self) -> &'static str {
        match self {
            SessionKind::Qualifying => "Qualification",
            SessionKind::SprintQualifying => "Sprint Qualification",
            SessionKind::Sprint => "Sprint",
            SessionKind::Race => "Race",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SessionKind {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "Q" | "QUALIFYING" => Ok(SessionKind::Qualifying),
            "SQ" | "SPRINT_QUALIFYING" | "SPRINT-QUALIFYING" => Ok(SessionKind::SprintQualifying),
            "S" | "SPRINT" => Ok(SessionKind::Sprint),
            "R" | "RACE" => Ok(SessionKind::Race),
            other => Err(AnalysisError::parse("session kind", format!("unknown session '{}'", other))),
        }
    }
}

/// Selector for one timed session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey {
    pub year: i32,
    /// Event name as listed in the season schedule
    pub event: String,
    #[serde(default)]
    pub kind: SessionKind,
}

impl SessionKey {
    pub fn new(year: i32, event: impl Into<String>, kind: SessionKind) -> Self {
        Self { year, event: event.into(), kind }
    }

    /// Qualifying session of an event
    pub fn qualifying(year: i32, event: impl Into<String>) -> Self {
        Self::new(year, event, SessionKind::Qualifying)
    }

    /// Two-line caption used as the image title
    pub fn caption(&self) -> [String; 2] {
        [
            format!("{} {} {}", self.event, self.year, self.kind.title()),
            "Fastest Driver per Minisector".to_string(),
        ]
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.year, self.event, self.kind)
    }
}

/// One entry of a classification, ordered by position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    /// Finishing or qualifying position, 1-based
    pub position: u32,
    /// Driver label, matches [`Trace::label`](super::Trace::label)
    pub driver: String,
    /// Best lap time, when the provider reports one
    #[serde(default)]
    pub lap_time: Option<LapTime>,
}

impl RankedResult {
    pub fn new(position: u32, driver: impl Into<String>) -> Self {
        Self { position, driver: driver.into(), lap_time: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_kind_parses_codes_and_names() {
        assert_eq!("Q".parse::<SessionKind>().unwrap(), SessionKind::Qualifying);
        assert_eq!("sq".parse::<SessionKind>().unwrap(), SessionKind::SprintQualifying);
        assert_eq!("race".parse::<SessionKind>().unwrap(), SessionKind::Race);
        assert!("FP1".parse::<SessionKind>().is_err());
    }

    #[test]
    fn caption_matches_title_layout() {
        let key = SessionKey::qualifying(2023, "Monaco Grand Prix");
        let [first, second] = key.caption();
        assert_eq!(first, "Monaco Grand Prix 2023 Qualification");
        assert_eq!(second, "Fastest Driver per Minisector");
    }

    #[test]
    fn session_kind_serializes_as_code() {
        let yaml = serde_yaml_ng::to_string(&SessionKind::SprintQualifying).unwrap();
        assert_eq!(yaml.trim(), "SQ");
    }
}
