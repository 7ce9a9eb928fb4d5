//! Package stats aggregation.
//!
//! Fetches every configured package concurrently and reduces the results into
//! one [`AggregateResult`] for the README template.

pub mod reduce;
pub mod types;
pub mod utility;

pub use reduce::aggregate_stats;
pub use types::{AggregateResult, ContributionFilter};

use anyhow::Result;
use futures::future::try_join_all;
use tracing::info;

use crate::fetch::HttpClient;
use crate::format::today_date;
use crate::stats::{PackageStat, fetch_package_stat};

/// Fetches all `names` concurrently and fails as soon as any fetch fails.
///
/// Results come back in the same order as `names`.
pub async fn fetch_all<C: HttpClient>(
    client: &C,
    base_url: &str,
    names: &[String],
) -> Result<Vec<PackageStat>> {
    try_join_all(
        names
            .iter()
            .map(|name| fetch_package_stat(client, name, base_url)),
    )
    .await
}

/// Fetches all `names` and reduces them into an [`AggregateResult`] dated today.
#[tracing::instrument(skip(client, base_url))]
pub async fn aggregate<C: HttpClient>(
    client: &C,
    base_url: &str,
    names: &[String],
    filter: ContributionFilter,
) -> Result<AggregateResult> {
    let stats = fetch_all(client, base_url, names).await?;
    let result = aggregate_stats(&stats, filter, today_date());

    info!(
        packages = stats.len(),
        total_downloads = result.total_downloads,
        average_quality = result.average_quality,
        average_coverage = result.average_coverage,
        "Aggregate computed"
    );

    Ok(result)
}
