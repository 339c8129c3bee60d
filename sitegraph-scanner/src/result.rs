use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

/// How a discovered link was classified at the moment it was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkClass {
    /// Same host, fetched with HTTP 200
    Internal,
    /// Different host, never fetched
    External,
    /// Same host, but the fetch failed or did not return 200
    Error,
}

impl LinkClass {
    /// Color used for this class in the edge-list file.
    pub fn color(&self) -> &'static str {
        match self {
            LinkClass::Internal => "green",
            LinkClass::External => "gray",
            LinkClass::Error => "red",
        }
    }

    pub fn from_color(color: &str) -> Option<Self> {
        match color.trim().to_lowercase().as_str() {
            "green" => Some(LinkClass::Internal),
            "gray" | "grey" => Some(LinkClass::External),
            "red" => Some(LinkClass::Error),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub class: LinkClass,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, class: LinkClass) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            class,
        }
    }
}

/// Adjacency map produced by a crawl: source page -> outgoing edges, in the
/// order sources were first expanded.
#[derive(Debug, Clone, Default)]
pub struct LinkMap {
    order: Vec<String>,
    entries: HashMap<String, Vec<Edge>>,
}

impl LinkMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure `source` has an entry, even if it never gains an edge.
    pub fn ensure_source(&mut self, source: &Url) {
        let key = source.as_str();
        if !self.entries.contains_key(key) {
            self.order.push(key.to_string());
            self.entries.insert(key.to_string(), Vec::new());
        }
    }

    pub fn push(&mut self, source: &Url, target: &Url, class: LinkClass) {
        self.ensure_source(source);
        if let Some(edges) = self.entries.get_mut(source.as_str()) {
            edges.push(Edge::new(source.as_str(), target.as_str(), class));
        }
    }

    /// Sources in expansion order.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn edges_from(&self, source: &str) -> &[Edge] {
        self.entries.get(source).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All edges, grouped by source in expansion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.order.iter().flat_map(|source| self.edges_from(source).iter())
    }

    pub fn source_count(&self) -> usize {
        self.order.len()
    }

    pub fn edge_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn count_class(&self, class: LinkClass) -> usize {
        self.edges().filter(|edge| edge.class == class).count()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_mapping() {
        assert_eq!(LinkClass::Internal.color(), "green");
        assert_eq!(LinkClass::External.color(), "gray");
        assert_eq!(LinkClass::Error.color(), "red");

        assert_eq!(LinkClass::from_color(" Green "), Some(LinkClass::Internal));
        assert_eq!(LinkClass::from_color("grey"), Some(LinkClass::External));
        assert_eq!(LinkClass::from_color("red"), Some(LinkClass::Error));
        assert_eq!(LinkClass::from_color("blue"), None);
    }

    #[test]
    fn test_link_map_keeps_source_order() {
        let a = Url::parse("http://a.com/").unwrap();
        let b = Url::parse("http://a.com/b").unwrap();
        let c = Url::parse("http://a.com/c").unwrap();

        let mut map = LinkMap::new();
        map.ensure_source(&a);
        map.push(&a, &b, LinkClass::Internal);
        map.ensure_source(&b);
        map.push(&a, &c, LinkClass::Error);
        map.ensure_source(&a);

        let sources: Vec<&str> = map.sources().collect();
        assert_eq!(sources, vec!["http://a.com/", "http://a.com/b"]);
        assert_eq!(map.edge_count(), 2);
        assert!(map.edges_from("http://a.com/b").is_empty());
        assert_eq!(map.count_class(LinkClass::Error), 1);

        let targets: Vec<&str> = map.edges().map(|e| e.target.as_str()).collect();
        assert_eq!(targets, vec!["http://a.com/b", "http://a.com/c"]);
    }
}
