//! Text content of the statistics, lap time, and legend overlays

use crate::comparator::{ComparisonResult, Competitor};

/// Minisector counts and shares, one line per trace.
pub fn stats_lines(result: &ComparisonResult) -> Vec<String> {
    let mut lines = vec![format!("Minisector Comparison ({} sectors)", result.num_minisectors())];
    for competitor in Competitor::BOTH {
        let summary = result.summary(competitor);
        lines.push(format!(
            "{}: {} sectors ({:.1}%)",
            summary.label, summary.minisectors_won, summary.percentage
        ));
    }
    if result.ties > 0 {
        lines.push(format!("Tied: {} sectors", result.ties));
    }
    lines
}

/// Both lap times and their absolute delta, formatted `mm:ss:ms`.
pub fn lap_time_lines(result: &ComparisonResult) -> Vec<String> {
    let mut lines = vec!["Lap Times:".to_string()];
    for competitor in Competitor::BOTH {
        let summary = result.summary(competitor);
        lines.push(format!("{}: {}", summary.label, summary.lap_time));
    }
    lines.push(format!("Delta: {}", result.lap_time_delta()));
    lines
}

/// Legend label for the minisectors won by `competitor`.
pub fn legend_label(result: &ComparisonResult, competitor: Competitor) -> String {
    format!("{} Faster", result.label(competitor))
}
