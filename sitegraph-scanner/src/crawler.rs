use crate::error::{Result, ScanError};
use crate::fetcher::{DEFAULT_TIMEOUT_SECS, PageFetcher};
use crate::normalize::{normalize, normalize_seed, same_site};
use crate::result::LinkMap;
use crate::state::CrawlState;
use scraper::{Html, Selector};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Called with the number of pages expanded so far and the page being expanded.
pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

pub const DEFAULT_MAX_PAGES: usize = 30;
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 1000;

pub struct Crawler {
    fetcher: PageFetcher,
    max_pages: usize,
    request_delay: Duration,
    progress_callback: Option<ProgressCallback>,
}

impl Crawler {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            fetcher: PageFetcher::with_timeout(timeout_secs)?,
            max_pages: DEFAULT_MAX_PAGES,
            request_delay: Duration::from_millis(DEFAULT_REQUEST_DELAY_MS),
            progress_callback: None,
        })
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Pause taken before each page is fetched for link extraction.
    pub fn with_request_delay(mut self, delay_ms: u64) -> Self {
        self.request_delay = Duration::from_millis(delay_ms);
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Crawl the site behind `seed` depth-first and return its classified links.
    ///
    /// Same-site links are fetched once per encounter to classify them; only
    /// links that answered 200 are expanded. The crawl stops once `max_pages`
    /// pages have been expanded. Network failures never abort the crawl, only
    /// an unusable seed or configuration does.
    pub async fn crawl(&self, seed: &str) -> Result<LinkMap> {
        if self.max_pages == 0 {
            return Err(ScanError::Config("max pages must be greater than 0".to_string()));
        }

        let site = normalize_seed(seed)?;
        info!("Starting crawl of {} (max {} pages)", site, self.max_pages);

        let mut state = CrawlState::new();
        let mut stack: Vec<(Url, usize)> = vec![(site.clone(), 0)];

        while let Some((page, depth)) = stack.pop() {
            if state.visited.contains(&page) {
                continue;
            }
            if state.visited_count() >= self.max_pages {
                info!("Page budget of {} reached, stopping", self.max_pages);
                break;
            }

            state.begin_page(&page);
            if let Some(ref callback) = self.progress_callback {
                callback(state.visited_count(), page.to_string());
            }
            debug!("Expanding {} at depth {}", page, depth);

            let frontier = self.expand_page(&site, &page, &mut state).await;

            // Reverse so the first discovered link is expanded first
            for next in frontier.into_iter().rev() {
                stack.push((next, depth + 1));
            }
        }

        info!(
            "Crawl complete. Expanded {} pages, recorded {} links ({} external, {} error targets)",
            state.visited_count(),
            state.links.edge_count(),
            state.external_seen.len(),
            state.error_seen.len()
        );
        Ok(state.into_links())
    }

    /// Fetch `page`, classify each of its links into `state` and return the
    /// internal links to expand, in discovery order.
    async fn expand_page(&self, site: &Url, page: &Url, state: &mut CrawlState) -> Vec<Url> {
        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }

        let fetched = match self.fetcher.fetch(page).await {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!("Could not fetch {}: {}", page, e);
                return Vec::new();
            }
        };
        if !fetched.is_ok() {
            debug!("{} answered {}, extracting links anyway", page, fetched.status);
        }

        let links = extract_links(&fetched.text(), page);
        debug!("Found {} links on {}", links.len(), page);

        let mut frontier = Vec::new();
        for link in links {
            if !same_site(&link, site) {
                if state.record_external(page, &link) {
                    debug!("  -> external: {}", link);
                }
                continue;
            }

            match self.fetcher.status(&link).await {
                Ok(200) => {
                    if state.record_internal(page, &link) {
                        frontier.push(link);
                    }
                }
                Ok(status) => {
                    debug!("  -> error: {} answered {}", link, status);
                    state.record_error(page, &link);
                }
                Err(e) => {
                    debug!("  -> error: {} failed: {}", link, e);
                    state.record_error(page, &link);
                }
            }
        }

        frontier
    }
}

/// Every valid, normalized anchor target in `html`, in document order.
pub fn extract_links(html: &str, base: &Url) -> Vec<Url> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    Html::parse_document(html)
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| normalize(base, href))
        .collect()
}
