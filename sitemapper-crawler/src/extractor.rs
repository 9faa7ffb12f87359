use crate::error::{CrawlError, Result};
use scraper::{Html, Selector};
use url::Url;

/// Extract the same-host links from a page body.
///
/// Only two href shapes are admitted:
/// - an absolute URL whose host matches the root's host, kept as parsed
///   without further normalization;
/// - a root-relative path (leading `/`), resolved against the root's
///   scheme and host.
///
/// Everything else (other hosts, `foo/bar` style relative paths, mailto:,
/// fragments, unparseable hrefs) is dropped silently. Duplicates within a
/// single page are preserved; deduplication is the frontier's job, not the
/// extractor's.
pub fn extract_links(body: &[u8], root: &Url) -> Result<Vec<String>> {
    let body = std::str::from_utf8(body)
        .map_err(|e| CrawlError::Parse(format!("page body is not valid UTF-8: {}", e)))?;

    let document = Html::parse_document(body);
    let selector = Selector::parse("a[href]").expect("static selector is valid");

    let mut links = Vec::new();
    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        match Url::parse(href) {
            Ok(absolute) => {
                if absolute.host_str().is_some() && absolute.host_str() == root.host_str() {
                    links.push(absolute.to_string());
                }
            }
            Err(_) => {
                // Protocol-relative hrefs (`//host/path`) point at another
                // authority and are not root-relative paths.
                if href.starts_with('/')
                    && !href.starts_with("//")
                    && let Ok(resolved) = root.join(href)
                {
                    links.push(resolved.to_string());
                }
            }
        }
    }

    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> Url {
        Url::parse("https://example.com/").unwrap()
    }

    #[test]
    fn test_same_host_absolute_link_included() {
        let body = br#"<html><body><a href="https://example.com/about">About</a></body></html>"#;
        let links = extract_links(body, &root()).unwrap();
        assert_eq!(links, vec!["https://example.com/about"]);
    }

    #[test]
    fn test_cross_host_link_excluded() {
        let body = br#"<html><body>
            <a href="https://other.com/page">Elsewhere</a>
            <a href="https://example.com/here">Here</a>
        </body></html>"#;
        let links = extract_links(body, &root()).unwrap();
        assert_eq!(links, vec!["https://example.com/here"]);
    }

    #[test]
    fn test_root_relative_path_resolved() {
        let body = br#"<html><body><a href="/foo">Foo</a></body></html>"#;
        let links = extract_links(body, &root()).unwrap();
        assert_eq!(links, vec!["https://example.com/foo"]);
    }

    #[test]
    fn test_non_root_relative_path_dropped() {
        let body = br##"<html><body>
            <a href="foo/bar">Relative</a>
            <a href="#section">Fragment</a>
            <a href="mailto:someone@example.com">Mail</a>
        </body></html>"##;
        let links = extract_links(body, &root()).unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn test_duplicates_within_page_preserved() {
        let body = br#"<html><body>
            <a href="/foo">One</a>
            <a href="/foo">Two</a>
        </body></html>"#;
        let links = extract_links(body, &root()).unwrap();
        assert_eq!(
            links,
            vec!["https://example.com/foo", "https://example.com/foo"]
        );
    }

    #[test]
    fn test_anchors_without_href_ignored() {
        let body = br#"<html><body><a name="top">Top</a><a href="/ok">Ok</a></body></html>"#;
        let links = extract_links(body, &root()).unwrap();
        assert_eq!(links, vec!["https://example.com/ok"]);
    }

    #[test]
    fn test_protocol_relative_href_dropped() {
        let body = br#"<html><body><a href="//other.com/x">Other</a></body></html>"#;
        let links = extract_links(body, &root()).unwrap();
        assert!(links.is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let body = [0x3c, 0x61, 0xff, 0xfe];
        let err = extract_links(&body, &root()).unwrap_err();
        assert!(matches!(err, CrawlError::Parse(_)));
    }

    #[test]
    fn test_query_and_trailing_slash_kept_distinct() {
        let body = br#"<html><body>
            <a href="https://example.com/a">Plain</a>
            <a href="https://example.com/a/">Slash</a>
            <a href="https://example.com/a?x=1">Query</a>
        </body></html>"#;
        let links = extract_links(body, &root()).unwrap();
        assert_eq!(
            links,
            vec![
                "https://example.com/a",
                "https://example.com/a/",
                "https://example.com/a?x=1",
            ]
        );
    }
}
