use crate::result::{LinkClass, LinkMap};
use std::collections::HashSet;
use url::Url;

/// Bookkeeping for a single crawl call. Created when the crawl starts and
/// consumed when its link map is handed back.
#[derive(Debug, Default)]
pub struct CrawlState {
    /// Pages whose outbound links have been expanded. Only ever grows.
    pub visited: HashSet<Url>,
    /// Internal targets already recorded for the page being expanded
    pub internal_seen_this_page: HashSet<Url>,
    /// Every external target recorded so far
    pub external_seen: HashSet<Url>,
    /// Every target that has produced an error edge so far
    pub error_seen: HashSet<Url>,
    pub links: LinkMap,
}

impl CrawlState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `page` as visited and open its adjacency entry. Returns false if it
    /// was already visited.
    pub fn begin_page(&mut self, page: &Url) -> bool {
        if !self.visited.insert(page.clone()) {
            return false;
        }
        self.internal_seen_this_page.clear();
        self.links.ensure_source(page);
        true
    }

    /// Record an external link once per crawl. Returns whether an edge was added.
    pub fn record_external(&mut self, source: &Url, target: &Url) -> bool {
        if !self.external_seen.insert(target.clone()) {
            return false;
        }
        self.links.push(source, target, LinkClass::External);
        true
    }

    /// Error edges are recorded on every encounter.
    pub fn record_error(&mut self, source: &Url, target: &Url) {
        self.error_seen.insert(target.clone());
        self.links.push(source, target, LinkClass::Error);
    }

    /// Record an internal link once per source page. Returns whether it is new
    /// for this page and should join the frontier.
    pub fn record_internal(&mut self, source: &Url, target: &Url) -> bool {
        if !self.internal_seen_this_page.insert(target.clone()) {
            return false;
        }
        self.links.push(source, target, LinkClass::Internal);
        true
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn into_links(self) -> LinkMap {
        self.links
    }
}
