// Report generation from a finished site map

use serde::{Deserialize, Serialize};
use sitemapper_crawler::SiteMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReportFormat {
    Html,
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "html" => Some(ReportFormat::Html),
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// Render the site map as a standalone HTML table: one row per crawled
/// page, each listing the same-host links found on it.
pub fn generate_html_report(site_map: &SiteMap) -> String {
    let mut markup = String::new();
    markup.push_str(
        "<html><head><link rel=\"stylesheet\" \
         href=\"https://maxcdn.bootstrapcdn.com/bootstrap/3.3.7/css/bootstrap.min.css\">\
         </head><body>",
    );
    markup.push_str("<table class=\"table table-hover table-condensed\">");

    for (page, links) in site_map.sorted_pages() {
        markup.push_str("<tr><td>");
        markup.push_str(&escape_html(page));
        markup.push_str("</td><td><ul>");
        for link in links {
            markup.push_str("<li>");
            markup.push_str(&escape_html(link));
            markup.push_str("</li>");
        }
        markup.push_str("</ul></td></tr>");
    }

    markup.push_str("</table></body></html>");
    markup
}

/// Render a plain-text report with a summary header and a per-page listing.
pub fn generate_text_report(site_map: &SiteMap) -> String {
    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Pages crawled: {}\n", site_map.len()));
    report.push_str(&format!("  Total links found: {}\n", site_map.total_links()));
    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    for (page, links) in site_map.sorted_pages() {
        report.push_str(&format!("## {}\n", page));
        if links.is_empty() {
            report.push_str("  (no outbound links)\n");
        } else {
            for link in links {
                report.push_str(&format!("  -> {}\n", link));
            }
        }
        report.push('\n');
    }

    report
}

pub fn generate_json_report(site_map: &SiteMap) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "Sitemapper",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "summary": {
                "pages_crawled": site_map.len(),
                "total_links": site_map.total_links()
            },
            "sitemap": site_map
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
