//! # Segment Comparator
//!
//! Splits the track into equal-length distance intervals ("minisectors") and
//! decides, per minisector, which of two traces carried the higher mean speed.
//!
//! ## Algorithm
//!
//! 1. Both traces are treated as one working set, each sample tagged with the
//!    trace it came from. Samples keep their original distances; nothing is
//!    merged or interpolated.
//! 2. `max_distance` is the largest distance across both traces. The interval
//!    `[0, max_distance]` is cut into `N` intervals of equal width.
//! 3. Each sample lands in exactly one minisector. Intervals are half-open,
//!    `[start, end)`, except the last one which also contains `max_distance`.
//! 4. Mean speed is computed per (minisector, trace). A trace with no samples in
//!    a minisector takes no part in that minisector's comparison.
//! 5. The strictly higher mean wins. A lone trace wins by default. Equal means
//!    are reported as [`Winner::Tie`] and counted for neither trace. A NaN
//!    speed makes its mean NaN; such a minisector has no winner at all.
//!
//! The comparison is speed based, not time based: a trace can hold the speed
//! advantage in more minisectors and still lose on lap time.
//!
//! ```rust
//! use minisector::{Competitor, LapTime, SegmentComparator, Trace, TraceSample};
//!
//! # fn main() -> minisector::Result<()> {
//! let samples = |speed: f64| {
//!     (0..=10).map(|i| TraceSample::new(i as f64 * 10.0, i as f64, 0.0, speed)).collect()
//! };
//! let pole = Trace::new("VER", LapTime::from_secs_f64(89.708)?, samples(300.0));
//! let second = Trace::new("LEC", LapTime::from_secs_f64(89.846)?, samples(290.0));
//!
//! let result = SegmentComparator::new(5).compare(&pole, &second)?;
//! assert_eq!(result.summary(Competitor::Reference).minisectors_won, 5);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{LapTime, Trace, TraceSample};
use crate::{AnalysisError, Result};

/// Number of minisectors used when none is configured
pub const DEFAULT_MINISECTORS: usize = 25;

/// Largest accepted minisector count
pub const MAX_MINISECTORS: usize = 100_000;

/// Which of the two compared traces a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Competitor {
    /// Trace A: the faster lap overall
    Reference,
    /// Trace B: the lap compared against the reference
    Comparison,
}

impl Competitor {
    pub const BOTH: [Competitor; 2] = [Competitor::Reference, Competitor::Comparison];

    fn slot(self) -> usize {
        match self {
            Competitor::Reference => 0,
            Competitor::Comparison => 1,
        }
    }

    pub fn other(self) -> Competitor {
        match self {
            Competitor::Reference => Competitor::Comparison,
            Competitor::Comparison => Competitor::Reference,
        }
    }
}

/// Outcome of a single minisector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    /// One trace had the strictly higher mean speed, or was the only one present
    Competitor(Competitor),
    /// Both traces had exactly the same mean speed
    Tie,
}

impl Winner {
    pub fn competitor(self) -> Option<Competitor> {
        match self {
            Winner::Competitor(competitor) => Some(competitor),
            Winner::Tie => None,
        }
    }
}

/// Equal-width distance intervals spanning `[0, max_distance]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Minisectors {
    /// `count + 1` strictly increasing values; first is 0, last is `max_distance`
    boundaries: Vec<f64>,
}

impl Minisectors {
    /// Build `count` intervals over `[0, max_distance]`.
    pub fn new(max_distance: f64, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(AnalysisError::config("num_minisectors", "must be at least 1"));
        }
        if count > MAX_MINISECTORS {
            return Err(AnalysisError::config(
                "num_minisectors",
                format!("must be at most {}, got {}", MAX_MINISECTORS, count),
            ));
        }
        if !max_distance.is_finite() || max_distance <= 0.0 {
            return Err(AnalysisError::insufficient_data(format!(
                "track length must be positive, got max distance {}",
                max_distance
            )));
        }

        let width = max_distance / count as f64;
        if width <= 0.0 {
            return Err(AnalysisError::insufficient_data(format!(
                "max distance {} is too short for {} minisectors",
                max_distance, count
            )));
        }
        let boundaries = (0..=count)
            .map(|i| if i == count { max_distance } else { i as f64 * width })
            .collect();

        Ok(Self { boundaries })
    }

    /// Number of minisectors
    pub fn count(&self) -> usize {
        self.boundaries.len() - 1
    }

    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    pub fn width(&self) -> f64 {
        self.max_distance() / self.count() as f64
    }

    pub fn max_distance(&self) -> f64 {
        self.boundaries[self.boundaries.len() - 1]
    }

    /// `[start, end)` of the 1-based minisector `index`
    pub fn bounds(&self, index: usize) -> Option<(f64, f64)> {
        if index == 0 || index > self.count() {
            return None;
        }
        Some((self.boundaries[index - 1], self.boundaries[index]))
    }

    /// 1-based minisector containing `distance`.
    ///
    /// Returns `None` for distances outside `[0, max_distance]`, including NaN.
    pub fn locate(&self, distance: f64) -> Option<usize> {
        if !(0.0..=self.max_distance()).contains(&distance) {
            return None;
        }
        // Boundaries at or below the distance; at least one since boundaries[0] == 0.
        let at_or_below = self.boundaries.partition_point(|b| *b <= distance);
        Some(at_or_below.min(self.count()))
    }
}

/// Samples and mean speed of one trace inside one minisector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentStats {
    pub samples: usize,
    /// `None` when the trace has no samples in the minisector
    pub mean_speed: Option<f64>,
}

/// Comparison outcome of one minisector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinisectorResult {
    /// 1-based index
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub reference: SegmentStats,
    pub comparison: SegmentStats,
    /// `None` when neither trace has samples here
    pub winner: Option<Winner>,
}

impl MinisectorResult {
    pub fn stats(&self, competitor: Competitor) -> &SegmentStats {
        match competitor {
            Competitor::Reference => &self.reference,
            Competitor::Comparison => &self.comparison,
        }
    }
}

/// A trace sample tagged with its origin and the winner of its minisector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedSample {
    pub competitor: Competitor,
    pub sample: TraceSample,
    /// 1-based minisector, `None` when the distance falls outside the track
    pub minisector: Option<usize>,
    pub winner: Option<Winner>,
}

/// Aggregate statistics for one trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorSummary {
    pub label: String,
    pub lap_time: LapTime,
    pub minisectors_won: usize,
    /// Share of all minisectors won, 0-100
    pub percentage: f64,
}

/// Full output of a two-trace comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub reference: CompetitorSummary,
    pub comparison: CompetitorSummary,
    /// Minisectors where both means were equal
    pub ties: usize,
    pub minisectors: Minisectors,
    /// One entry per minisector, ordered by index
    pub segments: Vec<MinisectorResult>,
    /// Reference samples first, then comparison samples, original order kept
    pub samples: Vec<AnnotatedSample>,
}

impl ComparisonResult {
    pub fn num_minisectors(&self) -> usize {
        self.minisectors.count()
    }

    pub fn summary(&self, competitor: Competitor) -> &CompetitorSummary {
        match competitor {
            Competitor::Reference => &self.reference,
            Competitor::Comparison => &self.comparison,
        }
    }

    pub fn label(&self, competitor: Competitor) -> &str {
        &self.summary(competitor).label
    }

    /// Winner of the 1-based minisector `index`
    pub fn winner(&self, index: usize) -> Option<Winner> {
        index.checked_sub(1).and_then(|i| self.segments.get(i)).and_then(|s| s.winner)
    }

    /// 1-based indices of the minisectors won by `competitor`
    pub fn won_by(&self, competitor: Competitor) -> impl Iterator<Item = usize> + '_ {
        self.segments
            .iter()
            .filter(move |s| s.winner == Some(Winner::Competitor(competitor)))
            .map(|s| s.index)
    }

    /// Absolute lap time difference between the two traces
    pub fn lap_time_delta(&self) -> LapTime {
        self.reference.lap_time.abs_diff(self.comparison.lap_time)
    }
}

/// Compares two traces minisector by minisector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentComparator {
    num_minisectors: usize,
}

impl Default for SegmentComparator {
    fn default() -> Self {
        Self::new(DEFAULT_MINISECTORS)
    }
}

impl SegmentComparator {
    pub fn new(num_minisectors: usize) -> Self {
        Self { num_minisectors }
    }

    pub fn num_minisectors(&self) -> usize {
        self.num_minisectors
    }

    /// Compare `reference` (trace A, faster overall) against `comparison` (trace B).
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::InsufficientData`] when either trace is empty or the
    ///   derived track length is zero
    /// - [`AnalysisError::DuplicateTrace`] when both traces share a label
    /// - [`AnalysisError::Config`] when the minisector count is zero
    pub fn compare(&self, reference: &Trace, comparison: &Trace) -> Result<ComparisonResult> {
        let traces = [(Competitor::Reference, reference), (Competitor::Comparison, comparison)];

        for (_, trace) in traces {
            if trace.is_empty() {
                return Err(AnalysisError::insufficient_data(format!(
                    "trace '{}' has no samples",
                    trace.label
                )));
            }
        }
        if reference.label == comparison.label {
            return Err(AnalysisError::DuplicateTrace { label: reference.label.clone() });
        }

        let max_distance = traces
            .iter()
            .filter_map(|(_, trace)| trace.max_distance())
            .reduce(f64::max)
            .unwrap_or(0.0);
        let minisectors = Minisectors::new(max_distance, self.num_minisectors)?;
        let count = minisectors.count();

        let mut speed_sums = vec![[0.0_f64; 2]; count];
        let mut sample_counts = vec![[0_usize; 2]; count];
        let mut located = Vec::with_capacity(reference.len() + comparison.len());

        for (competitor, trace) in traces {
            for sample in &trace.samples {
                let minisector = minisectors.locate(sample.distance);
                if let Some(index) = minisector {
                    speed_sums[index - 1][competitor.slot()] += sample.speed;
                    sample_counts[index - 1][competitor.slot()] += 1;
                }
                located.push((competitor, *sample, minisector));
            }
        }

        let segments: Vec<MinisectorResult> = (1..=count)
            .map(|index| {
                let (start, end) = minisectors.bounds(index).unwrap_or((0.0, max_distance));
                let stats = |competitor: Competitor| {
                    let samples = sample_counts[index - 1][competitor.slot()];
                    let mean_speed = (samples > 0)
                        .then(|| speed_sums[index - 1][competitor.slot()] / samples as f64);
                    SegmentStats { samples, mean_speed }
                };
                let reference = stats(Competitor::Reference);
                let comparison = stats(Competitor::Comparison);
                let winner = pick_winner(reference.mean_speed, comparison.mean_speed);
                MinisectorResult { index, start, end, reference, comparison, winner }
            })
            .collect();

        let wins = |competitor: Competitor| {
            segments.iter().filter(|s| s.winner == Some(Winner::Competitor(competitor))).count()
        };
        let ties = segments.iter().filter(|s| s.winner == Some(Winner::Tie)).count();

        let summary = |competitor: Competitor, trace: &Trace| {
            let minisectors_won = wins(competitor);
            CompetitorSummary {
                label: trace.label.clone(),
                lap_time: trace.lap_time,
                minisectors_won,
                percentage: minisectors_won as f64 / count as f64 * 100.0,
            }
        };
        let reference_summary = summary(Competitor::Reference, reference);
        let comparison_summary = summary(Competitor::Comparison, comparison);

        debug!(
            max_distance,
            width = minisectors.width(),
            reference = %reference_summary.label,
            reference_wins = reference_summary.minisectors_won,
            comparison = %comparison_summary.label,
            comparison_wins = comparison_summary.minisectors_won,
            ties,
            "Minisector comparison complete"
        );

        let samples = located
            .into_iter()
            .map(|(competitor, sample, minisector)| AnnotatedSample {
                competitor,
                sample,
                minisector,
                winner: minisector.and_then(|index| segments[index - 1].winner),
            })
            .collect();

        Ok(ComparisonResult {
            reference: reference_summary,
            comparison: comparison_summary,
            ties,
            minisectors,
            segments,
            samples,
        })
    }
}

/// Compare two traces with `num_minisectors` minisectors.
pub fn compare(
    reference: &Trace,
    comparison: &Trace,
    num_minisectors: usize,
) -> Result<ComparisonResult> {
    SegmentComparator::new(num_minisectors).compare(reference, comparison)
}

fn pick_winner(reference: Option<f64>, comparison: Option<f64>) -> Option<Winner> {
    match (reference, comparison) {
        (Some(a), Some(b)) if a.is_nan() || b.is_nan() => None,
        (Some(a), Some(b)) if a > b => Some(Winner::Competitor(Competitor::Reference)),
        (Some(a), Some(b)) if b > a => Some(Winner::Competitor(Competitor::Comparison)),
        (Some(_), Some(_)) => Some(Winner::Tie),
        (Some(_), None) => Some(Winner::Competitor(Competitor::Reference)),
        (None, Some(_)) => Some(Winner::Competitor(Competitor::Comparison)),
        (None, None) => None,
    }
}
