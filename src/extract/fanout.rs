// src/extract/fanout.rs
// =============================================================================
// The extraction pipeline.
//
// How it works:
// 1. Fetch the root document (failure aborts the call)
// 2. Classify it (failure aborts the call)
// 3. Leaf: its locations, in document order, are the result
// 4. Index: one job per child reference, run concurrently through
//    buffer_unordered; each job fetches the child and parses it as a leaf.
//    Results are merged in completion order, so the order of URLs across
//    children is not stable between runs. Within one child it is.
// =============================================================================

use futures::stream::{self, StreamExt};
use reqwest::Client;
use tracing::debug;

use super::options::ExtractOptions;
use crate::error::SitemapError;
use crate::fetch::Fetcher;
use crate::sitemap::{
    classify_and_parse, parse_leaf, DocumentKind, SitemapDocument, SitemapIndexDocument,
};

/// A child sitemap that contributed no URLs because it failed.
#[derive(Debug)]
pub struct ChildFailure {
    /// Location of the child, as listed in the index.
    pub url: String,
    pub error: SitemapError,
}

/// Outcome of a successful extraction.
#[derive(Debug)]
pub struct Extraction {
    /// Kind of the root document.
    pub kind: DocumentKind,
    /// Every page URL found. For an index, children are merged in the order
    /// they finished.
    pub urls: Vec<String>,
    /// Children of an index that could not be fetched or parsed.
    pub failures: Vec<ChildFailure>,
    /// Number of child references in the root index (0 for a leaf).
    pub sitemaps: usize,
}

impl Extraction {
    /// True when no child sitemap failed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs extractions with a shared HTTP client and fixed options.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    fetcher: Fetcher,
    options: ExtractOptions,
}

impl Extractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            fetcher: Fetcher::new(),
            options,
        }
    }

    /// Uses a caller-configured reqwest client for every request.
    pub fn with_client(client: Client, options: ExtractOptions) -> Self {
        Self {
            fetcher: Fetcher::with_client(client),
            options,
        }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Fetches `root_url` and returns every page URL it leads to.
    ///
    /// Returns an error only when the root document itself cannot be
    /// fetched or understood.
    pub async fn extract(&self, root_url: &str) -> Result<Extraction, SitemapError> {
        let body = self.fetcher.fetch(root_url).await?;

        let document =
            classify_and_parse(&body, self.options.mode).map_err(|source| SitemapError::Parse {
                url: root_url.to_string(),
                source,
            })?;
        debug!(url = root_url, kind = %document.kind(), "classified root sitemap");

        match document {
            SitemapDocument::Leaf(leaf) => Ok(Extraction {
                kind: DocumentKind::Leaf,
                urls: leaf.into_locs(),
                failures: Vec::new(),
                sitemaps: 0,
            }),
            SitemapDocument::Index(index) => Ok(self.fan_out(index).await),
        }
    }

    async fn fan_out(&self, index: SitemapIndexDocument) -> Extraction {
        let sitemaps = index.sitemaps.len();
        let width = self.options.fan_out_width(sitemaps);
        debug!(sitemaps, width, "fetching child sitemaps");

        let jobs = index
            .sitemaps
            .into_iter()
            .map(|reference| self.extract_child(reference.loc));
        let mut finished = stream::iter(jobs).buffer_unordered(width);

        let mut urls = Vec::new();
        let mut failures = Vec::new();

        while let Some((url, outcome)) = finished.next().await {
            match outcome {
                Ok(locs) => {
                    debug!(url = %url, count = locs.len(), "child sitemap done");
                    urls.extend(locs);
                }
                Err(error) => {
                    debug!(url = %url, error = %error, "child sitemap failed");
                    failures.push(ChildFailure { url, error });
                }
            }
        }

        Extraction {
            kind: DocumentKind::Index,
            urls,
            failures,
            sitemaps,
        }
    }

    // One fan-out job. Hands the URL back so the merge step can report it.
    async fn extract_child(&self, url: String) -> (String, Result<Vec<String>, SitemapError>) {
        let outcome = self.fetch_leaf(&url).await;
        (url, outcome)
    }

    async fn fetch_leaf(&self, url: &str) -> Result<Vec<String>, SitemapError> {
        let body = self.fetcher.fetch(url).await?;
        let leaf = parse_leaf(&body).map_err(|source| SitemapError::Parse {
            url: url.to_string(),
            source,
        })?;
        Ok(leaf.into_locs())
    }
}

/// Fetches the sitemap at `root_url` and returns every page URL it lists,
/// following one level of sitemap index.
///
/// Child sitemaps that fail are skipped; use [`Extractor::extract`] to see
/// which ones.
pub async fn extract_urls(root_url: &str) -> Result<Vec<String>, SitemapError> {
    Extractor::default()
        .extract(root_url)
        .await
        .map(|extraction| extraction.urls)
}
