// src/fetch/mod.rs
// =============================================================================
// This module downloads sitemap documents.
//
// One GET per call, body drained into memory. No retries and no custom
// timeout or redirect policy: whatever the reqwest client is configured with
// is what you get.
// =============================================================================

mod http;

pub use http::Fetcher;
