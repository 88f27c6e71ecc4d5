// src/main.rs
// =============================================================================
// Example caller for the sitemap_extract library.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Extract every given sitemap, one after the other
// 3. Print the URLs (or a JSON report)
// 4. Exit with a code: 0 = everything extracted, 1 = some child sitemaps
//    failed, 2 = a root sitemap failed or an internal error
//
// Diagnostics go to stderr through tracing (RUST_LOG=sitemap_extract=debug
// shows every fetch); results go to stdout.
// =============================================================================

mod cli;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use sitemap_extract::{DocumentKind, Extraction, Extractor};

/// JSON shape of one extracted sitemap
#[derive(Debug, Serialize)]
struct SitemapReport {
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<DocumentKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    urls: Vec<String>,
    failures: Vec<FailureReport>,
}

#[derive(Debug, Serialize)]
struct FailureReport {
    url: String,
    error: String,
}

impl SitemapReport {
    fn from_extraction(url: &str, extraction: Extraction) -> Self {
        Self {
            url: url.to_string(),
            kind: Some(extraction.kind),
            error: None,
            urls: extraction.urls,
            failures: extraction
                .failures
                .into_iter()
                .map(|failure| FailureReport {
                    url: failure.url,
                    error: failure.error.to_string(),
                })
                .collect(),
        }
    }

    fn from_error(url: &str, error: &sitemap_extract::SitemapError) -> Self {
        Self {
            url: url.to_string(),
            kind: None,
            error: Some(error.to_string()),
            urls: Vec::new(),
            failures: Vec::new(),
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("sitemap_extract=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let extractor = Extractor::new(cli.extract_options());

    let mut reports = Vec::with_capacity(cli.urls.len());
    for url in &cli.urls {
        info!(url = %url, "extracting sitemap");
        let report = match extractor.extract(url).await {
            Ok(extraction) => SitemapReport::from_extraction(url, extraction),
            Err(e) => {
                warn!(url = %url, error = %e, "sitemap could not be extracted");
                SitemapReport::from_error(url, &e)
            }
        };
        reports.push(report);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_report(report, cli.preview);
        }
    }

    Ok(exit_code(&reports))
}

fn exit_code(reports: &[SitemapReport]) -> i32 {
    if reports.iter().any(|r| r.error.is_some()) {
        2
    } else if reports.iter().any(|r| !r.failures.is_empty()) {
        1
    } else {
        0
    }
}

fn print_report(report: &SitemapReport, preview: usize) {
    if let Some(error) = &report.error {
        println!("{}: error: {}", report.url, error);
        return;
    }

    match report.kind {
        Some(DocumentKind::Index) => println!(
            "{}: found {} total URLs across all sitemaps",
            report.url,
            report.urls.len()
        ),
        _ => println!("{}: found {} URLs", report.url, report.urls.len()),
    }

    let shown = if preview == 0 { report.urls.len() } else { preview };
    for url in report.urls.iter().take(shown) {
        println!("- {}", url);
    }
    if shown < report.urls.len() {
        println!("  ... and {} more", report.urls.len() - shown);
    }

    for failure in &report.failures {
        println!("  failed: {} ({})", failure.url, failure.error);
    }
}
