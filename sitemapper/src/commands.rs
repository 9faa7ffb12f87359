use clap::arg;
use url::Url;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("sitemapper")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("sitemapper")
        .styles(CLAP_STYLING)
        .about("Crawls every same-host page reachable from a root URL and emits a sitemap report")
        .arg(
            arg!(<URL>)
                .help("The root URL to crawl")
                .value_parser(clap::value_parser!(Url)),
        )
        .arg(
            arg!(-t --"workers" <NUM_WORKERS>)
                .required(false)
                .help("The number of async worker 'threads' in the worker pool.")
                .value_parser(clap::value_parser!(usize))
                .default_value("10"),
        )
        .arg(
            arg!(--"idle-timeout" <SECONDS>)
                .required(false)
                .help("Seconds of sitemap inactivity after which the crawl is declared complete (may be fractional)")
                .value_parser(clap::value_parser!(f64))
                .default_value("3"),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .help("Per-request timeout in seconds")
                .value_parser(clap::value_parser!(u64))
                .default_value("5"),
        )
        .arg(
            arg!(-o --"output" <PATH>)
                .required(false)
                .help("Where to write the report")
                .value_parser(clap::value_parser!(std::path::PathBuf))
                .default_value("sitemap.html"),
        )
        .arg(
            arg!(-f --"format" <FORMAT>)
                .required(false)
                .help("Report format: html, text, json")
                .value_parser(["html", "text", "json"])
                .default_value("html"),
        )
        .arg(arg!(-q --"quiet" "Suppress progress output").required(false))
}
