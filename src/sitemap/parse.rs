// src/sitemap/parse.rs
// =============================================================================
// This module classifies and decodes sitemap XML.
//
// How it works:
// 1. Validate the bytes as UTF-8 (a leading BOM is skipped)
// 2. Pull events from quick-xml until the root element closes
// 3. The root element's local name decides the document kind
// 4. Every direct child of the root named `sitemap` (index) or `url` (leaf)
//    becomes one entry; its location is the text of its direct `<loc>`
//
// Decoding is lenient the way struct-based XML decoders are: unknown
// elements are skipped, an entry without `<loc>` gets an empty location and
// the last `<loc>` wins when there are several. Structure is still checked:
// mismatched or unclosed tags are errors.
// =============================================================================

use quick_xml::events::Event;
use quick_xml::Reader;

use super::model::{
    DocumentKind, LeafSitemapDocument, SitemapDocument, SitemapIndexDocument, SitemapReference,
    UrlEntry,
};
use crate::error::ParseError;

const INDEX_ROOT: &[u8] = b"sitemapindex";
const LEAF_ROOT: &[u8] = b"urlset";
const INDEX_ENTRY: &[u8] = b"sitemap";
const LEAF_ENTRY: &[u8] = b"url";
const LOC: &[u8] = b"loc";

/// How the root element decides the document kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClassifyMode {
    /// `<sitemapindex>` is an index, `<urlset>` is a leaf, anything else is
    /// rejected.
    #[default]
    Strict,
    /// Legacy behaviour: `<urlset>` is a leaf and every other well-formed
    /// document is treated as an index (usually one with no children).
    Lenient,
}

/// Decodes `bytes` and classifies them as an index or a leaf sitemap.
pub fn classify_and_parse(
    bytes: &[u8],
    mode: ClassifyMode,
) -> Result<SitemapDocument, ParseError> {
    let (kind, locs) = read_entries(bytes, mode)?;

    Ok(match kind {
        DocumentKind::Index => SitemapDocument::Index(SitemapIndexDocument {
            sitemaps: locs.into_iter().map(|loc| SitemapReference { loc }).collect(),
        }),
        DocumentKind::Leaf => SitemapDocument::Leaf(LeafSitemapDocument {
            urls: locs.into_iter().map(|loc| UrlEntry { loc }).collect(),
        }),
    })
}

/// Decodes `bytes` as a leaf sitemap. Child sitemaps of an index go through
/// here, so an index (or any other root) is an error.
pub fn parse_leaf(bytes: &[u8]) -> Result<LeafSitemapDocument, ParseError> {
    match classify_and_parse(bytes, ClassifyMode::Strict)? {
        SitemapDocument::Leaf(doc) => Ok(doc),
        SitemapDocument::Index(_) => Err(ParseError::UnexpectedKind {
            expected: DocumentKind::Leaf,
            found: DocumentKind::Index,
        }),
    }
}

fn classify_root(name: &[u8], mode: ClassifyMode) -> Result<DocumentKind, ParseError> {
    if name == LEAF_ROOT {
        Ok(DocumentKind::Leaf)
    } else if name == INDEX_ROOT || mode == ClassifyMode::Lenient {
        Ok(DocumentKind::Index)
    } else {
        Err(ParseError::UnrecognizedRoot {
            found: String::from_utf8_lossy(name).into_owned(),
        })
    }
}

fn entry_tag(kind: DocumentKind) -> &'static [u8] {
    match kind {
        DocumentKind::Index => INDEX_ENTRY,
        DocumentKind::Leaf => LEAF_ENTRY,
    }
}

// Walks the document and returns its kind plus the location of every entry,
// in document order.
//
// Depth 1 is the root, depth 2 an entry, depth 3 the entry's <loc>.
fn read_entries(
    bytes: &[u8],
    mode: ClassifyMode,
) -> Result<(DocumentKind, Vec<String>), ParseError> {
    let text = std::str::from_utf8(bytes)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = Reader::from_str(text);

    let mut kind = None;
    let mut root = String::new();
    let mut entry_name: &[u8] = b"";
    let mut depth = 0usize;

    // Some(..) while inside an entry: the last <loc> text seen so far
    let mut entry: Option<String> = None;
    // Some(..) while inside an entry's <loc>
    let mut loc: Option<String> = None;
    let mut locs = Vec::new();

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(source) => {
                return Err(ParseError::Xml {
                    position: reader.error_position() as u64,
                    source,
                })
            }
        };

        match event {
            Event::Start(e) => {
                depth += 1;
                let name = e.local_name();
                match depth {
                    1 => {
                        let root_kind = classify_root(name.as_ref(), mode)?;
                        root = String::from_utf8_lossy(name.as_ref()).into_owned();
                        entry_name = entry_tag(root_kind);
                        kind = Some(root_kind);
                    }
                    2 if name.as_ref() == entry_name => entry = Some(String::new()),
                    3 if entry.is_some() && name.as_ref() == LOC => loc = Some(String::new()),
                    _ => {}
                }
            }
            Event::Empty(e) => {
                let name = e.local_name();
                match depth {
                    // <urlset/>: a document with no entries
                    0 => return Ok((classify_root(name.as_ref(), mode)?, locs)),
                    1 if name.as_ref() == entry_name => locs.push(String::new()),
                    2 if entry.is_some() && name.as_ref() == LOC => entry = Some(String::new()),
                    _ => {}
                }
            }
            Event::Text(e) => {
                if depth == 3 {
                    if let Some(buf) = loc.as_mut() {
                        let unescaped = e.unescape().map_err(|source| ParseError::Xml {
                            position: reader.buffer_position() as u64,
                            source,
                        })?;
                        buf.push_str(&unescaped);
                    }
                }
            }
            Event::CData(e) => {
                if depth == 3 {
                    if let Some(buf) = loc.as_mut() {
                        buf.push_str(std::str::from_utf8(&e)?);
                    }
                }
            }
            Event::End(_) => {
                match depth {
                    1 => break,
                    2 => {
                        if let Some(done) = entry.take() {
                            locs.push(done);
                        }
                    }
                    3 => {
                        if let Some(text) = loc.take() {
                            entry = Some(text);
                        }
                    }
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => {
                return Err(if depth == 0 {
                    ParseError::NoRootElement
                } else {
                    ParseError::UnexpectedEof { open: root }
                });
            }
            // declarations, comments, doctypes, processing instructions
            _ => {}
        }
    }

    match kind {
        Some(kind) => Ok((kind, locs)),
        None => Err(ParseError::NoRootElement),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEAF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://example.com/</loc><lastmod>2024-01-01</lastmod></url>
  <url><loc>https://example.com/about</loc></url>
  <url><loc>https://example.com/blog?page=2&amp;sort=new</loc></url>
</urlset>"#;

    const INDEX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sitemap><loc>https://example.com/posts.xml</loc></sitemap>
  <sitemap><loc>https://example.com/pages.xml</loc><lastmod>2024-02-02</lastmod></sitemap>
</sitemapindex>"#;

    fn leaf_locs(xml: &str) -> Vec<String> {
        parse_leaf(xml.as_bytes()).unwrap().into_locs()
    }

    #[test]
    fn test_leaf_keeps_document_order() {
        assert_eq!(
            leaf_locs(LEAF),
            vec![
                "https://example.com/",
                "https://example.com/about",
                "https://example.com/blog?page=2&sort=new",
            ]
        );
    }

    #[test]
    fn test_index_is_classified_as_index() {
        let doc = classify_and_parse(INDEX.as_bytes(), ClassifyMode::Strict).unwrap();
        assert_eq!(doc.kind(), DocumentKind::Index);
        match doc {
            SitemapDocument::Index(index) => {
                let locs: Vec<_> = index.sitemaps.into_iter().map(|s| s.loc).collect();
                assert_eq!(
                    locs,
                    vec!["https://example.com/posts.xml", "https://example.com/pages.xml"]
                );
            }
            SitemapDocument::Leaf(_) => panic!("expected an index"),
        }
    }

    #[test]
    fn test_leaf_is_classified_as_leaf() {
        let doc = classify_and_parse(LEAF.as_bytes(), ClassifyMode::Strict).unwrap();
        assert_eq!(doc.kind(), DocumentKind::Leaf);
    }

    #[test]
    fn test_empty_index() {
        let doc =
            classify_and_parse(b"<sitemapindex></sitemapindex>", ClassifyMode::Strict).unwrap();
        assert_eq!(doc, SitemapDocument::Index(SitemapIndexDocument::default()));

        let doc = classify_and_parse(b"<sitemapindex/>", ClassifyMode::Strict).unwrap();
        assert_eq!(doc, SitemapDocument::Index(SitemapIndexDocument::default()));
    }

    #[test]
    fn test_loc_is_not_trimmed() {
        let xml = "<urlset><url><loc>  https://example.com/a \n</loc></url></urlset>";
        assert_eq!(leaf_locs(xml), vec!["  https://example.com/a \n"]);
    }

    #[test]
    fn test_cdata_and_prefixed_names() {
        let xml = r#"<sm:urlset xmlns:sm="http://www.sitemaps.org/schemas/sitemap/0.9">
            <sm:url><sm:loc><![CDATA[https://example.com/x?a=1&b=2]]></sm:loc></sm:url>
        </sm:urlset>"#;
        assert_eq!(leaf_locs(xml), vec!["https://example.com/x?a=1&b=2"]);
    }

    #[test]
    fn test_entry_without_loc_and_repeated_loc() {
        let xml = "<urlset>\
            <url><lastmod>2024</lastmod></url>\
            <url><loc>first</loc><loc>second</loc></url>\
            <url/>\
            <url><loc/></url>\
        </urlset>";
        assert_eq!(leaf_locs(xml), vec!["", "second", "", ""]);
    }

    #[test]
    fn test_nested_loc_and_unknown_elements_are_ignored() {
        let xml = "<urlset>\
            <url><image:image><image:loc>img.png</image:loc></image:image><loc>page</loc></url>\
            <other><loc>not-an-entry</loc></other>\
        </urlset>";
        assert_eq!(leaf_locs(xml), vec!["page"]);
    }

    #[test]
    fn test_mismatched_tags_are_malformed() {
        let err = classify_and_parse(b"<urlset><url><loc>x</url></urlset>", ClassifyMode::Strict)
            .unwrap_err();
        assert!(matches!(err, ParseError::Xml { .. }), "got {err:?}");
    }

    #[test]
    fn test_unterminated_document() {
        let err = classify_and_parse(b"<urlset><url><loc>x</loc></url>", ClassifyMode::Strict)
            .unwrap_err();
        assert!(
            matches!(err, ParseError::UnexpectedEof { .. } | ParseError::Xml { .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn test_empty_and_non_xml_input() {
        let err = classify_and_parse(b"", ClassifyMode::Strict).unwrap_err();
        assert!(matches!(err, ParseError::NoRootElement));

        let err = classify_and_parse(b"just some text", ClassifyMode::Lenient).unwrap_err();
        assert!(matches!(err, ParseError::NoRootElement));
    }

    #[test]
    fn test_invalid_utf8() {
        let err =
            classify_and_parse(b"<urlset>\xff\xfe</urlset>", ClassifyMode::Strict).unwrap_err();
        assert!(matches!(err, ParseError::InvalidUtf8(_)));
    }

    #[test]
    fn test_byte_order_mark_is_skipped() {
        let xml = "\u{feff}<urlset><url><loc>a</loc></url></urlset>";
        assert_eq!(leaf_locs(xml), vec!["a"]);
    }

    #[test]
    fn test_unknown_root_strict_vs_lenient() {
        let xml = b"<html><body><sitemap><loc>x</loc></sitemap></body></html>";

        let err = classify_and_parse(xml, ClassifyMode::Strict).unwrap_err();
        assert!(
            matches!(err, ParseError::UnrecognizedRoot { ref found } if found == "html"),
            "got {err:?}"
        );

        // legacy mode: any well-formed document that is not a urlset is an
        // index, here one whose only <sitemap> is not a direct child
        let doc = classify_and_parse(xml, ClassifyMode::Lenient).unwrap();
        assert_eq!(doc, SitemapDocument::Index(SitemapIndexDocument::default()));
    }

    #[test]
    fn test_lenient_still_reads_leaf() {
        let doc = classify_and_parse(LEAF.as_bytes(), ClassifyMode::Lenient).unwrap();
        assert_eq!(doc.kind(), DocumentKind::Leaf);
    }

    #[test]
    fn test_parse_leaf_rejects_index() {
        let err = parse_leaf(INDEX.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedKind {
                expected: DocumentKind::Leaf,
                found: DocumentKind::Index
            }
        ));
    }

    #[test]
    fn test_trailing_content_after_root_is_ignored() {
        let xml = "<urlset><url><loc>a</loc></url></urlset><!-- done -->";
        assert_eq!(leaf_locs(xml), vec!["a"]);
    }
}
