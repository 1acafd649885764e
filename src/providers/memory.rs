//! In-memory session provider
//!
//! For hosts that already hold session data, and for tests.

use std::collections::{BTreeMap, HashMap};

use crate::provider::SessionProvider;
use crate::types::{RankedResult, SessionKey, Trace};
use crate::{AnalysisError, Result};

#[derive(Debug, Clone, Default)]
struct MemorySession {
    results: Vec<RankedResult>,
    traces: BTreeMap<String, Trace>,
}

/// Provider serving data registered up front
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    seasons: BTreeMap<i32, Vec<String>>,
    sessions: HashMap<SessionKey, MemorySession>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event in a season schedule; duplicates are ignored.
    pub fn with_event(mut self, year: i32, event: impl Into<String>) -> Self {
        self.add_event(year, event.into());
        self
    }

    /// Register a classification entry for a session (and its event).
    pub fn with_result(mut self, session: &SessionKey, result: RankedResult) -> Self {
        self.add_event(session.year, session.event.clone());
        self.sessions.entry(session.clone()).or_default().results.push(result);
        self
    }

    /// Register a driver's lap trace for a session (and its event).
    pub fn with_trace(mut self, session: &SessionKey, trace: Trace) -> Self {
        self.add_event(session.year, session.event.clone());
        self.sessions.entry(session.clone()).or_default().traces.insert(trace.label.clone(), trace);
        self
    }

    fn add_event(&mut self, year: i32, event: String) {
        let events = self.seasons.entry(year).or_default();
        if !events.contains(&event) {
            events.push(event);
        }
    }

    fn session(&self, session: &SessionKey) -> Result<&MemorySession> {
        self.sessions
            .get(session)
            .ok_or_else(|| AnalysisError::provider(format!("no data for session {}", session)))
    }
}

#[async_trait::async_trait]
impl SessionProvider for MemoryProvider {
    async fn events(&self, year: i32) -> Result<Vec<String>> {
        self.seasons
            .get(&year)
            .cloned()
            .ok_or_else(|| AnalysisError::provider(format!("no schedule for {}", year)))
    }

    async fn results(&self, session: &SessionKey) -> Result<Vec<RankedResult>> {
        Ok(self.session(session)?.results.clone())
    }

    async fn trace(&self, session: &SessionKey, driver: &str) -> Result<Trace> {
        self.session(session)?.traces.get(driver).cloned().ok_or_else(|| {
            AnalysisError::provider(format!("no lap telemetry for '{}' in {}", driver, session))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::evenly_spaced_trace;

    #[tokio::test]
    async fn serves_registered_data() {
        let key = SessionKey::qualifying(2024, "Japanese Grand Prix");
        let provider = MemoryProvider::new()
            .with_event(2024, "Bahrain Grand Prix")
            .with_result(&key, RankedResult::new(1, "VER"))
            .with_trace(&key, evenly_spaced_trace("VER", 5, 100.0, 250.0));

        assert_eq!(
            provider.events(2024).await.unwrap(),
            vec!["Bahrain Grand Prix", "Japanese Grand Prix"]
        );
        assert_eq!(provider.results(&key).await.unwrap()[0].driver, "VER");
        assert_eq!(provider.trace(&key, "VER").await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn unknown_lookups_are_provider_errors() {
        let key = SessionKey::qualifying(2024, "Japanese Grand Prix");
        let provider = MemoryProvider::new().with_result(&key, RankedResult::new(1, "VER"));

        assert!(matches!(provider.events(1950).await, Err(AnalysisError::Provider { .. })));
        assert!(matches!(provider.trace(&key, "HAM").await, Err(AnalysisError::Provider { .. })));
        let other = SessionKey::qualifying(2024, "Chinese Grand Prix");
        assert!(matches!(provider.results(&other).await, Err(AnalysisError::Provider { .. })));
    }
}
