//! Session archive provider backed by YAML files on disk
//!
//! ## Layout
//!
//! ```text
//! {root}/
//! └── 2023/
//!     ├── schedule.yaml            events: [Bahrain Grand Prix, ...]
//!     └── bahrain-grand-prix/
//!         └── Q.yaml               results + laps for qualifying
//! ```
//!
//! A session file holds the classification and one lap per driver:
//!
//! ```yaml
//! results:
//!   - { position: 1, driver: VER, lap_time: 89.708 }
//!   - { position: 2, driver: LEC, lap_time: 89.846 }
//! laps:
//!   VER:
//!     lap_time: 89.708
//!     samples:            # [distance, x, y, speed]
//!       - [0.0, -1523.0, 377.0, 281.0]
//! ```

use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::provider::SessionProvider;
use crate::types::{LapTime, RankedResult, SessionKey, Trace, TraceSample};
use crate::{AnalysisError, Result};

#[derive(Debug, Deserialize)]
struct ScheduleFile {
    events: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SessionFile {
    #[serde(default)]
    results: Vec<RankedResult>,
    #[serde(default)]
    laps: BTreeMap<String, LapRecord>,
}

#[derive(Debug, Deserialize)]
struct LapRecord {
    lap_time: LapTime,
    samples: Vec<TraceSample>,
}

/// Reads schedules, classifications, and laps from a directory tree
#[derive(Debug, Clone)]
pub struct ArchiveProvider {
    root: PathBuf,
}

impl ArchiveProvider {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn schedule_path(&self, year: i32) -> PathBuf {
        self.root.join(year.to_string()).join("schedule.yaml")
    }

    pub fn session_path(&self, session: &SessionKey) -> PathBuf {
        self.root
            .join(session.year.to_string())
            .join(event_slug(&session.event))
            .join(format!("{}.yaml", session.kind.code()))
    }

    async fn read_yaml<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        trace!(path = %path.display(), "Reading archive file");
        let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
            AnalysisError::provider_with_source(
                format!("failed to read {}", path.display()),
                Box::new(e),
            )
        })?;
        serde_yaml_ng::from_str(&contents).map_err(|e| {
            AnalysisError::provider_with_source(
                format!("invalid session data in {}", path.display()),
                Box::new(e),
            )
        })
    }

    async fn session_file(&self, session: &SessionKey) -> Result<SessionFile> {
        self.read_yaml(&self.session_path(session)).await
    }
}

#[async_trait::async_trait]
impl SessionProvider for ArchiveProvider {
    async fn events(&self, year: i32) -> Result<Vec<String>> {
        let schedule: ScheduleFile = self.read_yaml(&self.schedule_path(year)).await?;
        debug!(year, events = schedule.events.len(), "Loaded season schedule");
        Ok(schedule.events)
    }

    async fn results(&self, session: &SessionKey) -> Result<Vec<RankedResult>> {
        let file = self.session_file(session).await?;
        debug!(session = %session, entries = file.results.len(), "Loaded session results");
        Ok(file.results)
    }

    async fn trace(&self, session: &SessionKey, driver: &str) -> Result<Trace> {
        let mut file = self.session_file(session).await?;
        let lap = file.laps.remove(driver).ok_or_else(|| {
            AnalysisError::provider(format!("no lap telemetry for '{}' in {}", driver, session))
        })?;
        debug!(session = %session, driver, samples = lap.samples.len(), "Loaded lap trace");
        Ok(Trace::new(driver, lap.lap_time, lap.samples))
    }
}

/// Directory name for an event: lowercase ASCII alphanumerics joined by `-`.
pub fn event_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
