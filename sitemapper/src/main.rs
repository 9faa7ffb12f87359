use clap::ArgMatches;
use indicatif::{ProgressBar, ProgressStyle};
use sitemapper::commands::command_argument_builder;
use sitemapper::handlers::{parse_idle_timeout, render_report};
use sitemapper_crawler::Crawler;
use sitemapper_report::{ReportFormat, save_report};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use url::Url;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let matches = cmd.get_matches();
    handle_crawl(&matches).await;
}

async fn handle_crawl(matches: &ArgMatches) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let url = matches.get_one::<Url>("URL").unwrap();
    let workers = *matches.get_one::<usize>("workers").unwrap();
    let idle_secs = *matches.get_one::<f64>("idle-timeout").unwrap();
    let request_timeout = *matches.get_one::<u64>("timeout").unwrap();
    let output = matches.get_one::<PathBuf>("output").unwrap();
    let format_arg = matches.get_one::<String>("format").unwrap();
    let quiet = matches.get_flag("quiet");

    let idle_timeout = match parse_idle_timeout(idle_secs) {
        Ok(timeout) => timeout,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(2);
        }
    };
    let format = ReportFormat::from_str(format_arg).expect("clap restricts format values");

    if !quiet {
        println!("\nCrawling {}", url.host_str().unwrap_or("unknown"));
        println!("Workers: {}", workers);
        println!("Idle timeout: {}s\n", idle_secs);
    }

    // Single spinner tracking overall crawl progress (only if enabled)
    let progress_bar = if quiet {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Starting crawl...");
        Some(pb)
    };

    let processed_count = Arc::new(AtomicUsize::new(0));

    let mut crawler = Crawler::with_request_timeout(request_timeout).with_idle_timeout(idle_timeout);
    if let Some(ref pb) = progress_bar {
        let pb_clone = pb.clone();
        let count_clone = processed_count.clone();
        crawler = crawler.with_progress_callback(Arc::new(move |_worker_id: usize, _url: String| {
            let count = count_clone.fetch_add(1, Ordering::Relaxed) + 1;
            pb_clone.set_message(format!("Crawling... {} URLs processed", count));
        }));
    }

    match crawler.crawl(url.as_str(), workers).await {
        Ok(site_map) => {
            if let Some(ref pb) = progress_bar {
                pb.finish_with_message(format!(
                    "Crawl complete! {} pages mapped, {} links recorded",
                    site_map.len(),
                    site_map.total_links()
                ));
            }

            let content = match render_report(&site_map, &format) {
                Ok(content) => content,
                Err(e) => {
                    eprintln!("✗ {}", e);
                    std::process::exit(1);
                }
            };

            if let Err(e) = save_report(&content, output) {
                eprintln!("✗ Failed to write report to {}: {}", output.display(), e);
                std::process::exit(1);
            }

            if !quiet {
                println!("\n✓ Report written to {}", output.display());
            }
        }
        Err(e) => {
            if let Some(ref pb) = progress_bar {
                pb.finish_and_clear();
            }
            eprintln!("✗ Crawl failed: {}", e);
            std::process::exit(1);
        }
    }
}
