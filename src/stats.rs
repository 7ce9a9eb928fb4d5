use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use crate::fetch::{HttpClient, fetch_bytes};
use crate::parser::{PackageMetadata, parse_metadata};

/// Facts extracted from one package's registry metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PackageStat {
    pub name: String,
    pub download_count: Option<u64>,
    pub quality: Option<f64>,
    pub coverage: Option<f64>,
}

impl PackageStat {
    pub fn from_metadata(name: &str, meta: &PackageMetadata) -> Self {
        PackageStat {
            name: name.to_string(),
            download_count: meta.download_count(),
            quality: meta.quality(),
            coverage: meta.coverage(),
        }
    }
}

/// Fetches `base_url` + `package_name` and extracts a [`PackageStat`].
///
/// The name is appended verbatim; it is not percent-encoded.
#[tracing::instrument(skip(client, base_url))]
pub async fn fetch_package_stat<C: HttpClient>(
    client: &C,
    package_name: &str,
    base_url: &str,
) -> Result<PackageStat> {
    let url = format!("{base_url}{package_name}");

    let bytes = fetch_bytes(client, &url)
        .await
        .with_context(|| format!("could not fetch `{package_name}`'s package metadata"))?;
    let meta = parse_metadata(&bytes)
        .with_context(|| format!("could not parse `{package_name}`'s package metadata"))?;

    let stat = PackageStat::from_metadata(package_name, &meta);
    debug!(?stat, "Package stats extracted");
    Ok(stat)
}
