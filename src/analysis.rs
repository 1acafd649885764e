//! End-to-end analysis of one session
//!
//! Results → two fastest drivers → their laps → comparison → track map.

use tracing::{debug, info};

use crate::comparator::{ComparisonResult, SegmentComparator};
use crate::config::AnalysisConfig;
use crate::provider::SessionProvider;
use crate::render::{TrackImage, TrackRenderer};
use crate::types::SessionKey;
use crate::{AnalysisError, Result};

/// Outcome of [`analyze`]
#[derive(Debug, Clone)]
pub struct Analysis {
    pub session: SessionKey,
    pub comparison: ComparisonResult,
    pub image: TrackImage,
}

/// Compare the fastest lap of the two best-placed drivers in `session`.
///
/// Results are ordered by position; the winner becomes the reference trace.
///
/// # Errors
///
/// - [`AnalysisError::InsufficientData`] when fewer than two drivers are classified
/// - any error from the provider, the comparator, or the renderer
pub async fn analyze<P: SessionProvider + ?Sized>(
    provider: &P,
    session: &SessionKey,
    config: &AnalysisConfig,
) -> Result<Analysis> {
    config.validate()?;

    let mut results = provider.results(session).await?;
    results.sort_by_key(|result| result.position);
    let (first, second) = match results.as_slice() {
        [first, second, ..] => (first, second),
        _ => {
            return Err(AnalysisError::insufficient_data(format!(
                "{} has {} classified driver(s), need 2",
                session,
                results.len()
            )));
        }
    };
    debug!(session = %session, reference = %first.driver, comparison = %second.driver, "Selected drivers");

    let reference = provider.trace(session, &first.driver).await?;
    let comparison = provider.trace(session, &second.driver).await?;

    let comparison =
        SegmentComparator::new(config.num_minisectors).compare(&reference, &comparison)?;
    let image = TrackRenderer::new(config.render.clone()).render(&comparison, session)?;

    info!(
        session = %session,
        reference = %comparison.reference.label,
        reference_won = comparison.reference.minisectors_won,
        comparison = %comparison.comparison.label,
        comparison_won = comparison.comparison.minisectors_won,
        ties = comparison.ties,
        "Session analysis complete"
    );
    Ok(Analysis { session: session.clone(), comparison, image })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::Competitor;
    use crate::providers::MemoryProvider;
    use crate::test_utils::split_speed_trace;
    use crate::types::RankedResult;

    fn provider(key: &SessionKey) -> MemoryProvider {
        let (ver, lec) = split_speed_trace(400, 5000.0);
        MemoryProvider::new()
            .with_result(key, RankedResult::new(3, "SAI"))
            .with_result(key, RankedResult::new(2, "LEC"))
            .with_result(key, RankedResult::new(1, "VER"))
            .with_trace(key, ver)
            .with_trace(key, lec)
    }

    #[tokio::test]
    async fn compares_the_two_best_placed_drivers() {
        let key = SessionKey::qualifying(2023, "Bahrain Grand Prix");
        let analysis = analyze(&provider(&key), &key, &AnalysisConfig::default()).await.unwrap();

        assert_eq!(analysis.session, key);
        assert_eq!(analysis.comparison.label(Competitor::Reference), "VER");
        assert_eq!(analysis.comparison.label(Competitor::Comparison), "LEC");
        assert_eq!(analysis.comparison.reference.minisectors_won, 13);
        assert_eq!(analysis.comparison.comparison.minisectors_won, 12);
        assert!(analysis.image.as_svg().contains("Bahrain Grand Prix 2023 Qualification"));
    }

    #[tokio::test]
    async fn works_through_a_trait_object() {
        let key = SessionKey::qualifying(2023, "Bahrain Grand Prix");
        let provider: Box<dyn SessionProvider> = Box::new(provider(&key));
        let config = AnalysisConfig { num_minisectors: 10, ..AnalysisConfig::default() };

        let analysis = analyze(provider.as_ref(), &key, &config).await.unwrap();
        assert_eq!(analysis.comparison.num_minisectors(), 10);
    }

    #[tokio::test]
    async fn a_single_classified_driver_is_insufficient() {
        let key = SessionKey::qualifying(2023, "Bahrain Grand Prix");
        let (ver, _) = split_speed_trace(100, 5000.0);
        let provider =
            MemoryProvider::new().with_result(&key, RankedResult::new(1, "VER")).with_trace(&key, ver);

        let error = analyze(&provider, &key, &AnalysisConfig::default()).await.unwrap_err();
        assert!(matches!(error, AnalysisError::InsufficientData { .. }));
    }

    #[tokio::test]
    async fn missing_telemetry_surfaces_the_provider_error() {
        let key = SessionKey::qualifying(2023, "Bahrain Grand Prix");
        let provider = MemoryProvider::new()
            .with_result(&key, RankedResult::new(1, "VER"))
            .with_result(&key, RankedResult::new(2, "LEC"));

        let error = analyze(&provider, &key, &AnalysisConfig::default()).await.unwrap_err();
        assert!(matches!(error, AnalysisError::Provider { .. }));
    }
}
