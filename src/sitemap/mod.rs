// src/sitemap/mod.rs
// =============================================================================
// This module understands sitemap documents.
//
// Submodules:
// - model: the typed documents (index / leaf) and their entries
// - parse: turns raw response bytes into one of those documents
//
// Two document shapes exist on the wire:
//
//   <sitemapindex>                    <urlset>
//     <sitemap><loc>..</loc></sitemap>  <url><loc>..</loc></url>
//   </sitemapindex>                   </urlset>
// =============================================================================

mod model;
mod parse;

pub use model::{
    DocumentKind, LeafSitemapDocument, SitemapDocument, SitemapIndexDocument, SitemapReference,
    UrlEntry,
};
pub use parse::{classify_and_parse, parse_leaf, ClassifyMode};
