use sitemapper_crawler::SiteMap;
use sitemapper_report::{
    ReportFormat, generate_html_report, generate_json_report, generate_text_report,
};
use std::time::Duration;

// Helper functions for the crawl handler

/// Validate the --idle-timeout argument. Zero, negative and non-finite
/// values are rejected here so the crawler only ever sees a usable duration.
pub fn parse_idle_timeout(seconds: f64) -> Result<Duration, String> {
    Duration::try_from_secs_f64(seconds)
        .ok()
        .filter(|d| !d.is_zero())
        .ok_or_else(|| format!("idle timeout must be a positive number of seconds, got {}", seconds))
}

/// Render the finished site map in the requested format.
pub fn render_report(site_map: &SiteMap, format: &ReportFormat) -> Result<String, String> {
    match format {
        ReportFormat::Html => Ok(generate_html_report(site_map)),
        ReportFormat::Text => Ok(generate_text_report(site_map)),
        ReportFormat::Json => generate_json_report(site_map)
            .map_err(|e| format!("Failed to serialize JSON report: {}", e)),
    }
}
