// Passive audit of the internal pages of a crawled site

use serde::{Deserialize, Serialize};
use sitegraph_scanner::fetcher::PageFetcher;
use sitegraph_scanner::inspect::{PageInspection, inspect_page};
use sitegraph_scanner::result::{Edge, LinkClass};
use std::collections::BTreeSet;
use tracing::{debug, warn};
use url::Url;

/// Every URL that appears on either end of an internal edge.
pub fn collect_internal_links(edges: &[Edge]) -> BTreeSet<String> {
    edges
        .iter()
        .filter(|edge| edge.class == LinkClass::Internal)
        .flat_map(|edge| [edge.source.clone(), edge.target.clone()])
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub pages_with_login_field: usize,
    pub pages_with_forms: usize,
    pub max_size: usize,
    pub min_size: usize,
    pub average_size: f64,
}

impl AuditSummary {
    pub fn from_inspections(inspections: &[PageInspection]) -> Self {
        if inspections.is_empty() {
            return Self::default();
        }

        let sizes = inspections.iter().map(|page| page.size);
        let total: usize = sizes.clone().sum();

        Self {
            pages_with_login_field: inspections.iter().filter(|p| p.has_login_field).count(),
            pages_with_forms: inspections
                .iter()
                .filter(|p| p.has_interactive_form)
                .count(),
            max_size: sizes.clone().max().unwrap_or(0),
            min_size: sizes.min().unwrap_or(0),
            average_size: total as f64 / inspections.len() as f64,
        }
    }
}

/// Inspect each page in turn. Unparseable URLs and failed fetches are skipped.
pub async fn audit_pages<I>(fetcher: &PageFetcher, links: I) -> Vec<PageInspection>
where
    I: IntoIterator<Item = String>,
{
    let mut inspections = Vec::new();

    for link in links {
        let url = match Url::parse(&link) {
            Ok(url) => url,
            Err(e) => {
                warn!("Skipping audit of '{}': {}", link, e);
                continue;
            }
        };

        match inspect_page(fetcher, &url).await {
            Ok(inspection) => {
                debug!(
                    "Audited {} ({} bytes, login: {}, forms: {})",
                    url, inspection.size, inspection.has_login_field, inspection.has_interactive_form
                );
                inspections.push(inspection);
            }
            Err(e) => warn!("Skipping audit of {}: {}", url, e),
        }
    }

    inspections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(size: usize, login: bool, form: bool) -> PageInspection {
        PageInspection {
            url: format!("http://a.com/{}", size),
            has_login_field: login,
            has_interactive_form: form,
            size,
        }
    }

    #[test]
    fn test_collect_internal_links_uses_both_ends_of_green_rows() {
        let edges = vec![
            Edge::new("http://a.com/", "http://a.com/1", LinkClass::Internal),
            Edge::new("http://a.com/", "http://b.com/", LinkClass::External),
            Edge::new("http://a.com/1", "http://a.com/broken", LinkClass::Error),
            Edge::new("http://a.com/1", "http://a.com/", LinkClass::Internal),
        ];

        let links: Vec<String> = collect_internal_links(&edges).into_iter().collect();
        assert_eq!(links, vec!["http://a.com/", "http://a.com/1"]);
    }

    #[test]
    fn test_summary_aggregates() {
        let summary = AuditSummary::from_inspections(&[
            page(100, true, true),
            page(300, false, true),
            page(200, false, false),
        ]);

        assert_eq!(summary.pages_with_login_field, 1);
        assert_eq!(summary.pages_with_forms, 2);
        assert_eq!(summary.max_size, 300);
        assert_eq!(summary.min_size, 100);
        assert_eq!(summary.average_size, 200.0);
    }

    #[test]
    fn test_summary_of_nothing_is_zero() {
        assert_eq!(AuditSummary::from_inspections(&[]), AuditSummary::default());
    }
}
