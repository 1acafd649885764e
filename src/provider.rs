//! Provider trait for session data sources

use crate::Result;
use crate::types::{RankedResult, SessionKey, Trace};

/// Trait for timed-session data sources
///
/// Providers abstract over where schedules, classifications, and telemetry
/// come from (an on-disk archive, an in-memory fixture, a remote service).
/// The analysis depends only on these three methods, so sources are
/// swappable. Every call returns a whole result; there is no streaming or
/// partial consumption.
///
/// Errors from the underlying source should be reported as
/// [`AnalysisError::Provider`](crate::AnalysisError::Provider) with the
/// original error attached as its source.
#[async_trait::async_trait]
pub trait SessionProvider: Send + Sync {
    /// Event names of a season, in calendar order
    async fn events(&self, year: i32) -> Result<Vec<String>>;

    /// Classification of a session
    ///
    /// Entries need not be sorted; callers order them by position.
    async fn results(&self, session: &SessionKey) -> Result<Vec<RankedResult>>;

    /// Fastest-lap trace of one driver in a session
    async fn trace(&self, session: &SessionKey, driver: &str) -> Result<Trace>;
}
