//! CLI entry point for the README stats generator.
//!
//! Fetches npms.io metadata for a fixed set of packages, aggregates the
//! download, quality and coverage figures and renders them into a README
//! template.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use readme_stats::{
    aggregate::{ContributionFilter, aggregate_stats, fetch_all},
    config::{
        DEFAULT_OUTPUT_PATH, DEFAULT_REGISTRY_URL, DEFAULT_TEMPLATE_PATH, default_packages,
        resolve_locale,
    },
    fetch::BasicClient,
    format::today_date,
    output::print_json,
    pipeline::{PipelineConfig, render_readme, run},
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "readme_stats")]
#[command(about = "Generate a README from npms.io package statistics", long_about = None)]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    /// Used when no subcommand is given
    #[command(flatten)]
    generate: GenerateArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Where the stats come from and how they are reduced.
#[derive(Args)]
struct SourceArgs {
    /// Registry endpoint; the package name is appended verbatim
    #[arg(long, env = "README_REGISTRY_URL", default_value = DEFAULT_REGISTRY_URL, global = true)]
    base_url: String,

    /// Package to include (repeat for several)
    #[arg(
        short,
        long = "package",
        env = "README_PACKAGES",
        value_delimiter = ',',
        global = true
    )]
    packages: Vec<String>,

    /// Which values count towards sums and averages
    #[arg(long, value_enum, default_value_t = ContributionFilter::Truthy, global = true)]
    filter: ContributionFilter,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the template and write the README (default)
    Generate(GenerateArgs),
    /// Fetch and log per-package stats and the aggregate without writing files
    Show,
}

#[derive(Args)]
struct GenerateArgs {
    /// README template to render
    #[arg(short, long, env = "README_TEMPLATE", default_value = DEFAULT_TEMPLATE_PATH)]
    template: PathBuf,

    /// Destination file, overwritten on success
    #[arg(short, long, env = "README_OUTPUT", default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Locale used for digit grouping (defaults to the system locale)
    #[arg(long, env = "README_LOCALE")]
    locale: Option<String>,

    /// Print the rendered README to stdout instead of writing it
    #[arg(long, default_value_t = false)]
    stdout: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = init_tracing();

    let cli = Cli::parse();

    dispatch(cli).await
}

async fn dispatch(cli: Cli) -> Result<()> {
    let SourceArgs {
        base_url,
        packages,
        filter,
    } = cli.source;
    let packages = if packages.is_empty() {
        default_packages()
    } else {
        packages
    };

    let client = BasicClient::new();

    match cli.command.unwrap_or(Commands::Generate(cli.generate)) {
        Commands::Generate(args) => {
            let config = PipelineConfig {
                base_url,
                packages,
                template_path: args.template,
                output_path: args.output,
                locale: resolve_locale(args.locale.as_deref()),
                filter,
            };
            info!(locale = %config.locale, "Generating README");

            if args.stdout {
                let (_, rendered) = render_readme(&client, &config).await?;
                print!("{rendered}");
            } else {
                run(&client, &config).await?;
                println!("Generated readme file successfully.");
            }
        }
        Commands::Show => {
            let stats = fetch_all(&client, &base_url, &packages).await?;
            print_json(&stats)?;
            print_json(&aggregate_stats(&stats, filter, today_date()))?;
        }
    }

    Ok(())
}

/// Logging setup: colored stderr + JSON rolling log file.
fn init_tracing() -> WorkerGuard {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/readme_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("readme_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    file_guard
}
