//! HTML link extraction
//!
//! Turns a fetched page into the set of absolute URLs its anchors point to.
//! Extraction is purely syntactic; scope and trap filtering happen later.

use crate::crawler::PageResponse;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use url::Url;

/// Extracts every anchor target on a page as an absolute URL
///
/// # Extraction Rules
///
/// - Only status-200 responses with a non-empty body are parsed; anything
///   else yields an empty set
/// - Every `<a href="...">` is resolved against `page_url`
/// - Duplicate resolved URLs collapse to one entry
/// - No scheme, scope or extension filtering is applied here, so
///   `mailto:` links and fragments survive to the validator
///
/// # Arguments
///
/// * `page_url` - The URL the page was fetched from
/// * `response` - The fetched page
///
/// # Example
///
/// ```
/// use link_sieve::crawler::{extract_links, PageResponse};
/// use url::Url;
///
/// let page_url = Url::parse("https://www.ics.uci.edu/about/").unwrap();
/// let response = PageResponse::ok(r#"<a href="people">People</a><a href="./people">Again</a>"#);
/// let links = extract_links(&page_url, &response);
/// assert_eq!(links.len(), 1);
/// assert!(links.contains("https://www.ics.uci.edu/about/people"));
/// ```
pub fn extract_links(page_url: &Url, response: &PageResponse) -> BTreeSet<String> {
    let mut links = BTreeSet::new();

    let body = match response.html_body() {
        Some(body) => body,
        None => {
            tracing::debug!(
                "No links to extract from {} (status {})",
                page_url,
                response.status
            );
            return links;
        }
    };

    let html = String::from_utf8_lossy(body);
    let document = Html::parse_document(&html);

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                match page_url.join(href) {
                    Ok(absolute_url) => {
                        links.insert(absolute_url.to_string());
                    }
                    Err(e) => {
                        tracing::debug!("Skipping unresolvable href {:?} on {}: {}", href, page_url, e);
                    }
                }
            }
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("https://www.ics.uci.edu/about/index.html").unwrap()
    }

    fn extract(html: &str) -> BTreeSet<String> {
        extract_links(&page_url(), &PageResponse::ok(html))
    }

    #[test]
    fn test_extract_absolute_link() {
        let links = extract(r#"<html><body><a href="https://www.stat.uci.edu/">Stat</a></body></html>"#);
        assert_eq!(links.len(), 1);
        assert!(links.contains("https://www.stat.uci.edu/"));
    }

    #[test]
    fn test_extract_root_relative_link() {
        let links = extract(r#"<a href="/research">Research</a>"#);
        assert!(links.contains("https://www.ics.uci.edu/research"));
    }

    #[test]
    fn test_extract_path_relative_link() {
        let links = extract(r#"<a href="people.html">People</a>"#);
        assert!(links.contains("https://www.ics.uci.edu/about/people.html"));
    }

    #[test]
    fn test_extract_parent_relative_link() {
        let links = extract(r#"<a href="../grad/">Grad</a>"#);
        assert!(links.contains("https://www.ics.uci.edu/grad/"));
    }

    #[test]
    fn test_extract_scheme_relative_link() {
        let links = extract(r#"<a href="//cs.uci.edu/x">x</a>"#);
        assert!(links.contains("https://cs.uci.edu/x"));
    }

    #[test]
    fn test_duplicates_collapse() {
        let links = extract(
            r#"
            <a href="/research">Research</a>
            <a href="https://www.ics.uci.edu/research">Research again</a>
            <a href="../research">And again</a>
            "#,
        );
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_fragments_are_kept() {
        let links = extract(r##"<a href="#top">Top</a><a href="/a#b">A</a>"##);
        assert!(links.contains("https://www.ics.uci.edu/about/index.html#top"));
        assert!(links.contains("https://www.ics.uci.edu/a#b"));
    }

    #[test]
    fn test_other_schemes_are_not_filtered_here() {
        let links = extract(r#"<a href="mailto:dean@uci.edu">Mail</a><a href="ftp://ics.uci.edu/f">F</a>"#);
        assert!(links.contains("mailto:dean@uci.edu"));
        assert!(links.contains("ftp://ics.uci.edu/f"));
    }

    #[test]
    fn test_anchor_without_href_ignored() {
        let links = extract(r#"<a name="anchor">No href</a><a>Nothing</a>"#);
        assert!(links.is_empty());
    }

    #[test]
    fn test_non_anchor_elements_ignored() {
        let links = extract(
            r#"<link rel="stylesheet" href="/style.css"><img src="/logo.png"><script src="/app.js"></script>"#,
        );
        assert!(links.is_empty());
    }

    #[test]
    fn test_unresolvable_href_skipped() {
        let links = extract(r#"<a href="http://[::1">Bad</a><a href="/good">Good</a>"#);
        assert_eq!(links.len(), 1);
        assert!(links.contains("https://www.ics.uci.edu/good"));
    }

    #[test]
    fn test_non_200_yields_nothing() {
        let html = r#"<a href="/research">Research</a>"#;
        for status in [301, 404, 500, 204] {
            let response = PageResponse::new(status, Some(html.as_bytes().to_vec()));
            assert!(extract_links(&page_url(), &response).is_empty());
        }
    }

    #[test]
    fn test_missing_or_empty_body_yields_nothing() {
        assert!(extract_links(&page_url(), &PageResponse::new(200, None)).is_empty());
        assert!(extract_links(&page_url(), &PageResponse::new(200, Some(Vec::new()))).is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_tolerated() {
        let mut body = b"<a href=\"/ok\">".to_vec();
        body.extend_from_slice(&[0xff, 0xfe]);
        body.extend_from_slice(b"</a>");
        let links = extract_links(&page_url(), &PageResponse::ok(body));
        assert!(links.contains("https://www.ics.uci.edu/ok"));
    }
}
