use async_trait::async_trait;
use readme_stats::aggregate::{ContributionFilter, aggregate, fetch_all};
use readme_stats::fetch::{BasicClient, HttpClient};
use readme_stats::pipeline::{PipelineConfig, run};
use readme_stats::stats::fetch_package_stat;
use serde_json::{Value, json};
use std::fs;
use std::sync::Mutex;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// [`HttpClient`] wrapper that remembers every requested URL.
struct RecordingClient<C> {
    inner: C,
    urls: Mutex<Vec<String>>,
}

impl<C> RecordingClient<C> {
    fn new(inner: C) -> Self {
        Self {
            inner,
            urls: Mutex::new(Vec::new()),
        }
    }

    fn urls(&self) -> Vec<String> {
        let mut urls = self.urls.lock().unwrap().clone();
        urls.sort();
        urls
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for RecordingClient<C> {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.urls.lock().unwrap().push(req.url().to_string());
        self.inner.execute(req).await
    }
}

/// Registry document with the fields the fetcher reads.
fn metadata(counts: &[u64], quality: Option<f64>, coverage: Option<f64>) -> Value {
    let downloads: Vec<Value> = counts
        .iter()
        .map(|c| json!({ "from": "2024-01-01T00:00:00.000Z", "count": c }))
        .collect();

    json!({
        "analyzedAt": "2024-01-01T00:00:00.000Z",
        "collected": {
            "npm": { "downloads": downloads, "starsCount": 0 },
            "source": { "coverage": coverage }
        },
        "score": {
            "final": 0.5,
            "detail": { "quality": quality, "popularity": 0.1, "maintenance": 0.3 }
        }
    })
}

async fn mount(server: &MockServer, name: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/v2/package/{name}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mounts the three packages used by the end-to-end scenario.
async fn registry() -> MockServer {
    let server = MockServer::start().await;
    mount(&server, "alpha", metadata(&[400, 600], Some(0.8), Some(0.9))).await;
    mount(&server, "beta", metadata(&[2000], Some(0.9), Some(0.6))).await;
    mount(&server, "gamma", metadata(&[], None, None)).await;
    server
}

fn base_url(server: &MockServer) -> String {
    format!("{}/v2/package/", server.uri())
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_fetch_package_stat_extracts_fields() {
    let server = registry().await;
    let client = BasicClient::new();

    let stat = fetch_package_stat(&client, "alpha", &base_url(&server))
        .await
        .expect("fetch should succeed");

    assert_eq!(stat.name, "alpha");
    assert_eq!(stat.download_count, Some(1000));
    assert_eq!(stat.quality, Some(0.8));
    assert_eq!(stat.coverage, Some(0.9));
}

#[tokio::test]
async fn test_fetch_missing_parent_field_fails() {
    let server = MockServer::start().await;
    mount(&server, "broken", json!({ "collected": { "npm": { "downloads": [] } } })).await;
    let client = BasicClient::new();

    let err = fetch_package_stat(&client, "broken", &base_url(&server))
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("broken"));
}

#[tokio::test]
async fn test_fetch_invalid_json_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/package/html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;
    let client = BasicClient::new();

    assert!(fetch_package_stat(&client, "html", &base_url(&server)).await.is_err());
}

#[tokio::test]
async fn test_fetch_not_found_fails() {
    let server = MockServer::start().await;
    let client = BasicClient::new();

    let err = fetch_package_stat(&client, "missing", &base_url(&server))
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("404"));
}

#[tokio::test]
async fn test_aggregate_empty_list_is_zero() {
    let client = BasicClient::new();

    let result = aggregate(&client, "http://127.0.0.1:9/", &[], ContributionFilter::Truthy)
        .await
        .unwrap();

    assert_eq!(result.total_downloads, 0);
    assert_eq!(result.average_quality, 0.0);
    assert_eq!(result.average_coverage, 0.0);
    assert!(!result.generated_date.is_empty());
}

#[tokio::test]
async fn test_aggregate_is_order_independent() {
    let server = registry().await;
    let client = BasicClient::new();
    let url = base_url(&server);

    let forward = aggregate(&client, &url, &names(&["alpha", "beta", "gamma"]), ContributionFilter::Truthy)
        .await
        .unwrap();
    let shuffled = aggregate(&client, &url, &names(&["gamma", "alpha", "beta"]), ContributionFilter::Truthy)
        .await
        .unwrap();

    assert_eq!(forward.total_downloads, 3000);
    assert_eq!(forward.total_downloads, shuffled.total_downloads);
    assert!((forward.average_quality - shuffled.average_quality).abs() < 1e-12);
    assert!((forward.average_coverage - shuffled.average_coverage).abs() < 1e-12);
    assert!((forward.average_quality - 1.7 / 3.0).abs() < 1e-12);
}

#[tokio::test]
async fn test_one_failed_fetch_fails_the_aggregate() {
    let server = registry().await;
    let client = BasicClient::new();

    let result = aggregate(
        &client,
        &base_url(&server),
        &names(&["alpha", "does-not-exist", "beta"]),
        ContributionFilter::Truthy,
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_fetch_all_preserves_input_order() {
    let server = registry().await;
    let client = BasicClient::new();

    let stats = fetch_all(&client, &base_url(&server), &names(&["gamma", "alpha", "beta"]))
        .await
        .unwrap();

    let order: Vec<_> = stats.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(order, vec!["gamma", "alpha", "beta"]);
}

#[tokio::test]
async fn test_full_pipeline_writes_readme() {
    let server = registry().await;
    let dir = tempfile::tempdir().unwrap();
    let template_path = dir.path().join("readme-template.md");
    let output_path = dir.path().join("README.md");
    fs::write(
        &template_path,
        "Downloads: {{ downloadsCount }}, Quality: {{avgQuality}}\nCoverage: {{codeCov}} {{ stars }}\n",
    )
    .unwrap();

    let config = PipelineConfig {
        base_url: base_url(&server),
        packages: names(&["alpha", "beta", "gamma"]),
        template_path,
        output_path: output_path.clone(),
        locale: "en-US".to_string(),
        filter: ContributionFilter::Truthy,
    };

    let client = BasicClient::new();
    let result = run(&client, &config).await.unwrap();

    let written = fs::read_to_string(&output_path).unwrap();
    assert_eq!(written, "Downloads: 3,000, Quality: 57%\nCoverage: 50% {{ stars }}\n");
    assert_eq!(result.total_downloads, 3000);
}

#[tokio::test]
async fn test_failed_pipeline_writes_nothing() {
    let server = registry().await;
    let dir = tempfile::tempdir().unwrap();
    let template_path = dir.path().join("readme-template.md");
    let output_path = dir.path().join("README.md");
    fs::write(&template_path, "{{ downloadsCount }}").unwrap();

    let config = PipelineConfig {
        base_url: base_url(&server),
        packages: names(&["alpha", "nope"]),
        template_path,
        output_path: output_path.clone(),
        ..PipelineConfig::default()
    };

    let client = BasicClient::new();
    assert!(run(&client, &config).await.is_err());
    assert!(!output_path.exists());
}

#[tokio::test]
async fn test_missing_template_writes_nothing() {
    let server = registry().await;
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("README.md");

    let config = PipelineConfig {
        base_url: base_url(&server),
        packages: names(&["alpha"]),
        template_path: dir.path().join("absent.md"),
        output_path: output_path.clone(),
        ..PipelineConfig::default()
    };

    let client = BasicClient::new();
    assert!(run(&client, &config).await.is_err());
    assert!(!output_path.exists());
}

#[tokio::test]
async fn test_request_url_is_base_plus_name() {
    let server = MockServer::start().await;
    mount(&server, "pkg.name-1", metadata(&[1], Some(0.5), Some(0.5))).await;
    let client = RecordingClient::new(BasicClient::new());
    let url = base_url(&server);

    fetch_package_stat(&client, "pkg.name-1", &url).await.unwrap();

    assert_eq!(client.urls(), vec![format!("{url}pkg.name-1")]);
}

#[tokio::test]
async fn test_aggregate_requests_each_package_once() {
    let server = registry().await;
    let client = RecordingClient::new(BasicClient::new());
    let url = base_url(&server);

    aggregate(&client, &url, &names(&["beta", "alpha", "gamma"]), ContributionFilter::Truthy)
        .await
        .unwrap();

    assert_eq!(
        client.urls(),
        vec![format!("{url}alpha"), format!("{url}beta"), format!("{url}gamma")]
    );
}

#[tokio::test]
async fn test_null_download_count_still_totals() {
    let server = MockServer::start().await;
    let mut body = metadata(&[700], Some(0.5), None);
    body["collected"]["npm"]["downloads"]
        .as_array_mut()
        .unwrap()
        .push(json!({ "from": "2024-01-02T00:00:00.000Z", "count": null }));
    mount(&server, "nullish", body).await;
    let client = BasicClient::new();

    let stat = fetch_package_stat(&client, "nullish", &base_url(&server)).await.unwrap();

    assert_eq!(stat.download_count, Some(700));
}
