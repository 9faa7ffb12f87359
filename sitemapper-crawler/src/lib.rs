pub mod crawler;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod sitemap;

pub use crawler::{Crawler, ProgressCallback};
pub use error::CrawlError;
pub use fetcher::Fetcher;
pub use sitemap::SiteMap;
