//! JSON parser for npms.io package metadata.
//!
//! Only the three paths the README needs are modelled. Parent objects are
//! required and fail the parse when missing; leaf values are optional.

use anyhow::Result;
use serde::{Deserialize, Deserializer};

/// Subset of the registry document read by the fetcher.
#[derive(Debug, Deserialize)]
pub struct PackageMetadata {
    pub collected: Collected,
    pub score: Score,
}

#[derive(Debug, Deserialize)]
pub struct Collected {
    pub npm: NpmData,
    pub source: SourceData,
}

#[derive(Debug, Deserialize)]
pub struct NpmData {
    pub downloads: Vec<DownloadPeriod>,
}

/// Download count for one reporting period.
///
/// `None` means the key is missing; `Some(None)` means it is `null`.
#[derive(Debug, Deserialize)]
pub struct DownloadPeriod {
    #[serde(default, deserialize_with = "nullable")]
    pub count: Option<Option<u64>>,
}

fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
pub struct SourceData {
    pub coverage: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct Score {
    pub detail: ScoreDetail,
}

#[derive(Debug, Deserialize)]
pub struct ScoreDetail {
    pub quality: Option<f64>,
}

impl PackageMetadata {
    /// Sum of every period's download count.
    ///
    /// A `null` count adds nothing. A period without a `count` key makes the
    /// whole total `None`, so an incomplete series is never mistaken for a
    /// real total.
    pub fn download_count(&self) -> Option<u64> {
        self.collected
            .npm
            .downloads
            .iter()
            .try_fold(0u64, |total, period| {
                Some(total.saturating_add(period.count?.unwrap_or(0)))
            })
    }

    pub fn quality(&self) -> Option<f64> {
        self.score.detail.quality
    }

    pub fn coverage(&self) -> Option<f64> {
        self.collected.source.coverage
    }
}

/// Decodes a registry metadata document from raw bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid JSON or any required parent
/// object is absent.
pub fn parse_metadata(bytes: &[u8]) -> Result<PackageMetadata> {
    Ok(serde_json::from_slice(bytes)?)
}
