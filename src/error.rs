// src/error.rs
// =============================================================================
// Error types for the library.
//
// Two things can go wrong with a sitemap:
// - FetchError: we could not get the bytes (network, HTTP status, body read)
// - ParseError: we got bytes but they are not a sitemap we understand
//
// SitemapError ties both to the URL they happened on. It is what every
// public extraction function returns.
// =============================================================================

use reqwest::StatusCode;
use thiserror::Error;

use crate::sitemap::DocumentKind;

/// Failure to retrieve a document over HTTP.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, TLS, bad URL).
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status code.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },

    /// The response body could not be read to the end.
    #[error("failed to read body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// The URL the failed request was made against.
    pub fn url(&self) -> &str {
        match self {
            FetchError::Request { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Body { url, .. } => url,
        }
    }
}

/// Failure to decode bytes as a sitemap document.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("malformed XML at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    /// The input ended before the root element was closed.
    #[error("unexpected end of document inside <{open}>")]
    UnexpectedEof { open: String },

    #[error("document has no root element")]
    NoRootElement,

    /// Root element is neither `sitemapindex` nor `urlset`.
    #[error("unrecognized root element <{found}>, expected <sitemapindex> or <urlset>")]
    UnrecognizedRoot { found: String },

    #[error("expected a {expected}, found a {found}")]
    UnexpectedKind {
        expected: DocumentKind,
        found: DocumentKind,
    },
}

/// Error returned by the extraction entry points.
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to parse sitemap {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: ParseError,
    },
}

impl SitemapError {
    pub fn is_fetch(&self) -> bool {
        matches!(self, SitemapError::Fetch(_))
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, SitemapError::Parse { .. })
    }

    /// URL of the document that failed.
    pub fn url(&self) -> &str {
        match self {
            SitemapError::Fetch(e) => e.url(),
            SitemapError::Parse { url, .. } => url,
        }
    }
}
