use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use podscanner_k8s::KubeClient;
use podscanner_report::render_report;
use podscanner_scan::run_scan;
use podscanner_types::{OutputFormat, ScanReport};

mod config;

use config::{FileConfig, Settings};

/// Exit code when the scan finished but some namespaces could not be scanned
const EXIT_PARTIAL: u8 = 2;

/// Podscanner - Scans Kubernetes pods for containers using the :latest tag, or no tag
///
/// Iterates through all pods in all namespaces (or only --namespace) and
/// lists every container whose image is `:latest` or has no tag.
#[derive(Parser, Debug)]
#[command(name = "podscanner")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Only scan this namespace (default: all namespaces)
    #[arg(short, long)]
    namespace: Option<String>,

    /// Path to kubeconfig (default: $KUBECONFIG or ~/.kube/config)
    #[arg(short, long)]
    kubeconfig: Option<String>,

    /// Kubeconfig context to use (default: current context)
    #[arg(long)]
    context: Option<String>,

    /// Maximum burst of API requests
    #[arg(long)]
    burst: Option<u32>,

    /// Sustained API requests per second
    #[arg(long)]
    qps: Option<f32>,

    /// Keep scanning when a namespace fails and report it at the end
    #[arg(long, overrides_with = "fail_fast")]
    keep_going: bool,

    /// Abort on the first failed namespace, even if the config file sets keep_going
    #[arg(long, overrides_with = "keep_going")]
    fail_fast: bool,

    /// Output format: table or json
    #[arg(short, long)]
    output: Option<OutputFormat>,

    /// Config file (default: ~/.config/podscanner/config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let rust_log = std::env::var("RUST_LOG").ok();

    // Logs go to stderr so stdout only carries the report
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(args.verbose, rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    match run_app(args).await {
        Ok(report) if report.has_failures() => ExitCode::from(EXIT_PARTIAL),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` directives win; `-v` only moves the default level
fn log_filter(verbose: u8, rust_log: Option<&str>) -> EnvFilter {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(rust_log.unwrap_or_default())
}

async fn run_app(args: Args) -> Result<ScanReport> {
    let file = FileConfig::load(args.config.as_deref())?;
    let settings = Settings::resolve(&args, file)?;

    let client = KubeClient::new(&settings.client)
        .await
        .context("Failed to connect to cluster")?;

    let report = run_scan(&settings.scan, Arc::new(client))
        .await
        .context("Scan failed")?;

    let rendered =
        render_report(&report, settings.output).context("Failed to render report")?;
    print!("{}", rendered);
    if settings.output == OutputFormat::Json {
        println!();
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_log_filter_defaults_to_warn() {
        assert_eq!(log_filter(0, None).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter(0, Some("")).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_verbose_raises_default_level() {
        assert_eq!(log_filter(1, None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(log_filter(3, None).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_rust_log_is_not_overridden() {
        assert_eq!(log_filter(0, Some("info")).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(log_filter(0, Some("debug")).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(
            log_filter(0, Some("podscanner_scan=trace")).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
    }
}
