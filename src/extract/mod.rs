// src/extract/mod.rs
// =============================================================================
// This module drives a whole extraction:
//
//   fetch root -> classify -> leaf:  return its URLs
//                          -> index: fetch + parse every child concurrently,
//                                    merge their URLs
//
// Only the root document can fail the call. Child sitemaps that cannot be
// fetched or parsed are reported in Extraction::failures and contribute no
// URLs.
// =============================================================================

mod fanout;
mod options;

pub use fanout::{extract_urls, ChildFailure, Extraction, Extractor};
pub use options::ExtractOptions;
