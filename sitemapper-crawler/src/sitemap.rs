use serde::Serialize;
use std::collections::HashMap;

/// The finished crawl output: each successfully crawled URL mapped to the
/// ordered same-host links found on that page.
///
/// A URL whose fetch or parse failed never acquires an entry, so the key set
/// is exactly the set of pages that downloaded and parsed cleanly.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct SiteMap {
    pages: HashMap<String, Vec<String>>,
}

impl SiteMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, url: String, links: Vec<String>) {
        self.pages.insert(url, links);
    }

    pub fn get(&self, url: &str) -> Option<&[String]> {
        self.pages.get(url).map(|links| links.as_slice())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.pages.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total number of links recorded across all pages, duplicates included.
    pub fn total_links(&self) -> usize {
        self.pages.values().map(|links| links.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.pages.iter()
    }

    /// Pages ordered by URL, for deterministic report output.
    pub fn sorted_pages(&self) -> Vec<(&String, &Vec<String>)> {
        let mut pages: Vec<_> = self.pages.iter().collect();
        pages.sort_by_key(|(url, _)| url.as_str());
        pages
    }
}
