//! End-to-end README generation: aggregate, load, render, write.

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

use crate::aggregate::{AggregateResult, ContributionFilter, aggregate};
use crate::config::{
    DEFAULT_OUTPUT_PATH, DEFAULT_REGISTRY_URL, DEFAULT_TEMPLATE_PATH, default_packages,
};
use crate::fetch::HttpClient;
use crate::format::{NumberFormatter, PercentFormatter};
use crate::output::{read_template, write_output};
use crate::template::Renderer;

/// Settings for one README run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub base_url: String,
    pub packages: Vec<String>,
    pub template_path: PathBuf,
    pub output_path: PathBuf,
    pub locale: String,
    pub filter: ContributionFilter,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_REGISTRY_URL.to_string(),
            packages: default_packages(),
            template_path: PathBuf::from(DEFAULT_TEMPLATE_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            locale: "en-US".to_string(),
            filter: ContributionFilter::default(),
        }
    }
}

impl PipelineConfig {
    pub fn renderer(&self) -> Renderer {
        Renderer::new(NumberFormatter::for_locale(&self.locale), PercentFormatter::new())
    }
}

/// Fetches the aggregate and renders the template, without writing anything.
pub async fn render_readme<C: HttpClient>(
    client: &C,
    config: &PipelineConfig,
) -> Result<(AggregateResult, String)> {
    let result = aggregate(client, &config.base_url, &config.packages, config.filter).await?;
    let template = read_template(&config.template_path).await?;
    let rendered = config.renderer().render(&template, &result);
    Ok((result, rendered))
}

/// Renders the README and writes it to `config.output_path`.
///
/// Nothing is written unless every fetch and the template read succeed.
#[tracing::instrument(skip_all, fields(packages = ?config.packages, filter = ?config.filter))]
pub async fn run<C: HttpClient>(client: &C, config: &PipelineConfig) -> Result<AggregateResult> {
    let (result, rendered) = render_readme(client, config).await?;
    write_output(&config.output_path, &rendered).await?;
    info!(output = %config.output_path.display(), "README generated");
    Ok(result)
}
