// Tests for report generation functionality

use sitemapper_crawler::SiteMap;
use sitemapper_report::{
    ReportFormat, generate_html_report, generate_json_report, generate_text_report, save_report,
};

fn sample_site_map() -> SiteMap {
    let mut map = SiteMap::new();
    map.insert(
        "https://example.com/".to_string(),
        vec![
            "https://example.com/foo".to_string(),
            "https://example.com/bar".to_string(),
        ],
    );
    map.insert("https://example.com/foo".to_string(), vec![]);
    map.insert(
        "https://example.com/bar".to_string(),
        vec!["https://example.com/foo".to_string()],
    );
    map
}

#[test]
fn test_report_format_from_str() {
    assert!(matches!(
        ReportFormat::from_str("html"),
        Some(ReportFormat::Html)
    ));
    assert!(matches!(
        ReportFormat::from_str("text"),
        Some(ReportFormat::Text)
    ));
    assert!(matches!(
        ReportFormat::from_str("json"),
        Some(ReportFormat::Json)
    ));
    assert!(ReportFormat::from_str("csv").is_none());
}

#[test]
fn test_report_format_from_str_case_insensitive() {
    assert!(matches!(
        ReportFormat::from_str("HTML"),
        Some(ReportFormat::Html)
    ));
    assert!(matches!(
        ReportFormat::from_str("Json"),
        Some(ReportFormat::Json)
    ));
}

#[test]
fn test_html_report_contains_one_row_per_page() {
    let html = generate_html_report(&sample_site_map());

    assert!(html.starts_with("<html>"));
    assert!(html.contains("bootstrap.min.css"));
    assert_eq!(html.matches("<tr>").count(), 3);
    assert!(html.contains("<td>https://example.com/</td>"));
    assert!(html.contains("<li>https://example.com/foo</li>"));
}

#[test]
fn test_html_report_escapes_urls() {
    let mut map = SiteMap::new();
    map.insert(
        "https://example.com/?a=1&b=2".to_string(),
        vec!["https://example.com/x?y=\"z\"".to_string()],
    );

    let html = generate_html_report(&map);
    assert!(html.contains("https://example.com/?a=1&amp;b=2"));
    assert!(html.contains("https://example.com/x?y=&quot;z&quot;"));
    assert!(!html.contains("y=\"z\""));
}

#[test]
fn test_html_report_for_empty_map() {
    let html = generate_html_report(&SiteMap::new());
    assert!(html.contains("<table"));
    assert!(!html.contains("<tr>"));
}

#[test]
fn test_text_report_summary_counts() {
    let text = generate_text_report(&sample_site_map());

    assert!(text.contains("Pages crawled: 3"));
    assert!(text.contains("Total links found: 3"));
    assert!(text.contains("## https://example.com/"));
    assert!(text.contains("-> https://example.com/foo"));
    assert!(text.contains("(no outbound links)"));
}

#[test]
fn test_json_report_round_trips() {
    let json = generate_json_report(&sample_site_map()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["report"]["metadata"]["generator"], "Sitemapper");
    assert_eq!(value["report"]["summary"]["pages_crawled"], 3);
    assert_eq!(value["report"]["summary"]["total_links"], 3);
    assert_eq!(
        value["report"]["sitemap"]["https://example.com/foo"],
        serde_json::json!([])
    );
}

#[test]
fn test_save_report_writes_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sitemap.html");

    let html = generate_html_report(&sample_site_map());
    save_report(&html, &path)?;

    let written = std::fs::read_to_string(&path)?;
    assert_eq!(written, html);
    Ok(())
}
