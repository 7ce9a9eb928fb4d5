use tracing::debug;

use crate::aggregate::types::{AggregateResult, ContributionFilter};
use crate::aggregate::utility::population_mean;
use crate::stats::PackageStat;

/// Reduces fetched package stats into a single [`AggregateResult`].
///
/// Download counts are summed; quality and coverage are averaged over all
/// `stats`, counting filtered-out values as missing.
pub fn aggregate_stats(
    stats: &[PackageStat],
    filter: ContributionFilter,
    generated_date: String,
) -> AggregateResult {
    let total_downloads = stats
        .iter()
        .filter_map(|s| filter.count(s.download_count))
        .fold(0u64, u64::saturating_add);

    let average_quality = population_mean(
        stats.iter().filter_map(|s| filter.fraction(s.quality)),
        stats.len(),
    );
    let average_coverage = population_mean(
        stats.iter().filter_map(|s| filter.fraction(s.coverage)),
        stats.len(),
    );

    debug!(
        packages = stats.len(),
        total_downloads, average_quality, average_coverage, "Stats reduced"
    );

    AggregateResult {
        total_downloads,
        average_quality,
        average_coverage,
        generated_date,
    }
}
