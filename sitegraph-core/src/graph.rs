use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use sitegraph_scanner::result::{Edge, LinkClass, LinkMap};
use std::collections::HashMap;

/// Directed link graph. Nodes are URLs, edges carry their classification.
///
/// Parallel edges are kept as they come; cycles and self-loops are allowed.
#[derive(Debug, Default, Clone)]
pub struct SiteGraph {
    graph: DiGraph<String, LinkClass>,
    index: HashMap<String, NodeIndex>,
}

impl SiteGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = Edge>,
    {
        let mut graph = Self::new();
        for edge in edges {
            graph.add_edge(&edge.source, &edge.target, edge.class);
        }
        graph
    }

    /// Build straight from a crawl, keeping pages that produced no links.
    pub fn from_link_map(links: &LinkMap) -> Self {
        let mut graph = Self::new();
        for source in links.sources() {
            graph.add_node(source);
            for edge in links.edges_from(source) {
                graph.add_edge(&edge.source, &edge.target, edge.class);
            }
        }
        graph
    }

    pub fn add_node(&mut self, url: &str) -> NodeIndex {
        if let Some(&node) = self.index.get(url) {
            return node;
        }
        let node = self.graph.add_node(url.to_string());
        self.index.insert(url.to_string(), node);
        node
    }

    pub fn add_edge(&mut self, source: &str, target: &str, class: LinkClass) {
        let from = self.add_node(source);
        let to = self.add_node(target);
        self.graph.add_edge(from, to, class);
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, url: &str) -> bool {
        self.index.contains_key(url)
    }

    /// URLs in the order they were first seen.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }

    /// Direct successors of `url` in edge insertion order, one per edge.
    pub fn successors(&self, url: &str) -> Vec<&str> {
        match self.index.get(url) {
            Some(&node) => self
                .successor_indices(node)
                .into_iter()
                .map(|next| self.graph[next].as_str())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Classification of the first recorded edge from `source` to `target`.
    pub fn classification(&self, source: &str, target: &str) -> Option<LinkClass> {
        let from = *self.index.get(source)?;
        let to = *self.index.get(target)?;
        self.graph
            .edges(from)
            .filter(|edge| edge.target() == to)
            .min_by_key(|edge| edge.id().index())
            .map(|edge| *edge.weight())
    }

    pub fn count_class(&self, class: LinkClass) -> usize {
        self.graph.edge_weights().filter(|&&weight| weight == class).count()
    }

    pub(crate) fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub(crate) fn node_index(&self, url: &str) -> Option<NodeIndex> {
        self.index.get(url).copied()
    }

    pub(crate) fn url(&self, node: NodeIndex) -> &str {
        &self.graph[node]
    }

    /// petgraph walks adjacency lists newest-first; traversals here need the
    /// order the links were recorded in.
    pub(crate) fn successor_indices(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<_> = self
            .graph
            .edges(node)
            .map(|edge| (edge.id().index(), edge.target()))
            .collect();
        edges.sort_unstable_by_key(|&(id, _)| id);
        edges.into_iter().map(|(_, target)| target).collect()
    }
}
