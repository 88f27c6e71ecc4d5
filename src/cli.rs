// src/cli.rs
// =============================================================================
// Command-line interface of the example caller, using clap's derive API.
//
//   sitemap-extract https://example.com/sitemap.xml
//   sitemap-extract https://example.com/sitemap_index.xml --concurrency 8 --json
// =============================================================================

use clap::Parser;
use sitemap_extract::{ClassifyMode, ExtractOptions};

#[derive(Parser, Debug)]
#[command(
    name = "sitemap-extract",
    version,
    about = "Extract every page URL listed by a sitemap or sitemap index",
    long_about = "sitemap-extract fetches each given sitemap, follows it if it is a sitemap index, \
                  and prints the page URLs it lists. Child sitemaps that fail are reported \
                  but do not stop the run."
)]
pub struct Cli {
    /// Sitemap URLs to extract (e.g., https://example.com/sitemap.xml)
    #[arg(required = true)]
    pub urls: Vec<String>,

    /// Output a JSON report instead of text
    #[arg(long)]
    pub json: bool,

    /// Maximum number of child sitemaps fetched at once (0 = no limit)
    #[arg(long, default_value_t = 0)]
    pub concurrency: usize,

    /// Treat any well-formed document that is not a <urlset> as a sitemap index
    #[arg(long)]
    pub lenient: bool,

    /// How many URLs to print per sitemap in text mode (0 = all)
    #[arg(long, default_value_t = 5)]
    pub preview: usize,
}

impl Cli {
    pub fn extract_options(&self) -> ExtractOptions {
        let mode = if self.lenient {
            ClassifyMode::Lenient
        } else {
            ClassifyMode::Strict
        };
        ExtractOptions::new().concurrency(self.concurrency).mode(mode)
    }
}
