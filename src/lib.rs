//! Fetch XML sitemaps and extract the page URLs they list.
//!
//! A sitemap is either a leaf (`<urlset>`, a list of pages) or an index
//! (`<sitemapindex>`, a list of other sitemaps). [`extract_urls`] handles
//! both: a leaf's URLs come back in document order, an index's children are
//! fetched concurrently and their URLs merged.
//!
//! ```no_run
//! # async fn run() -> Result<(), sitemap_extract::SitemapError> {
//! let urls = sitemap_extract::extract_urls("https://example.com/sitemap.xml").await?;
//! println!("found {} URLs", urls.len());
//! # Ok(())
//! # }
//! ```
//!
//! [`Extractor`] gives control over the fan-out width and classification, and
//! reports child sitemaps that failed instead of silently dropping them.

pub mod error;
pub mod extract;
pub mod fetch;
pub mod sitemap;

pub use error::{FetchError, ParseError, SitemapError};
pub use extract::{extract_urls, ChildFailure, ExtractOptions, Extraction, Extractor};
pub use fetch::Fetcher;
pub use sitemap::{
    classify_and_parse, parse_leaf, ClassifyMode, DocumentKind, LeafSitemapDocument,
    SitemapDocument, SitemapIndexDocument, SitemapReference, UrlEntry,
};
