// src/sitemap/model.rs
// =============================================================================
// Typed sitemap documents.
//
// Every document is built from one response body and thrown away once its
// locations have been read out. Locations are kept exactly as they appear in
// the XML text: no trimming, no URL parsing.
// =============================================================================

use serde::Serialize;
use std::fmt;

/// Which of the two sitemap shapes a document has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// `<sitemapindex>`: a list of child sitemaps
    Index,
    /// `<urlset>`: a list of page URLs
    Leaf,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Index => f.write_str("sitemap index"),
            DocumentKind::Leaf => f.write_str("leaf sitemap"),
        }
    }
}

/// One `<sitemap>` entry of an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapReference {
    pub loc: String,
}

/// One `<url>` entry of a leaf sitemap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlEntry {
    pub loc: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SitemapIndexDocument {
    pub sitemaps: Vec<SitemapReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeafSitemapDocument {
    pub urls: Vec<UrlEntry>,
}

impl LeafSitemapDocument {
    /// Consumes the document and returns its locations in document order.
    pub fn into_locs(self) -> Vec<String> {
        self.urls.into_iter().map(|entry| entry.loc).collect()
    }
}

/// A classified document: exactly one of the two shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapDocument {
    Index(SitemapIndexDocument),
    Leaf(LeafSitemapDocument),
}

impl SitemapDocument {
    pub fn kind(&self) -> DocumentKind {
        match self {
            SitemapDocument::Index(_) => DocumentKind::Index,
            SitemapDocument::Leaf(_) => DocumentKind::Leaf,
        }
    }
}
