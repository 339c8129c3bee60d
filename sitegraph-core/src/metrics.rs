//! Structural metrics over a [`SiteGraph`].
//!
//! Every metric runs its own traversals from every node; nothing is shared
//! between runs, so each function is a pure read of the graph.

use crate::graph::SiteGraph;
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphMetrics {
    pub density: f64,
    pub width: usize,
    pub max_depth: usize,
    pub leafs: usize,
}

impl GraphMetrics {
    pub fn compute(graph: &SiteGraph) -> Self {
        let depths = depths(graph);
        Self {
            density: density(graph),
            width: width(graph),
            max_depth: max_depth(&depths),
            leafs: leaf_count(graph),
        }
    }
}

/// |E| / (|V| * (|V| - 1)), or 0 for graphs with fewer than two nodes.
pub fn density(graph: &SiteGraph) -> f64 {
    let nodes = graph.node_count();
    if nodes <= 1 {
        return 0.0;
    }
    graph.edge_count() as f64 / (nodes as f64 * (nodes as f64 - 1.0))
}

fn bfs_level_counts(graph: &SiteGraph, source: NodeIndex) -> Vec<usize> {
    let mut counts: Vec<usize> = Vec::new();
    let mut visited = HashSet::from([source]);
    let mut queue = VecDeque::from([(source, 0usize)]);

    while let Some((node, level)) = queue.pop_front() {
        if counts.len() <= level {
            counts.resize(level + 1, 0);
        }
        counts[level] += 1;

        for next in graph.successor_indices(node) {
            if visited.insert(next) {
                queue.push_back((next, level + 1));
            }
        }
    }

    counts
}

/// Number of nodes first reached at each hop distance from `source`.
/// Empty if `source` is not in the graph.
pub fn level_counts(graph: &SiteGraph, source: &str) -> Vec<usize> {
    graph
        .node_index(source)
        .map(|node| bfs_level_counts(graph, node))
        .unwrap_or_default()
}

/// Largest level population seen across the breadth-first runs from every node.
pub fn width(graph: &SiteGraph) -> usize {
    graph
        .node_indices()
        .flat_map(|source| bfs_level_counts(graph, source))
        .max()
        .unwrap_or(0)
}

/// Depth-first run from `source`. Nodes are marked visited when pushed, not
/// when explored, so the result depends on successor order and may be lower
/// than the true eccentricity.
fn dfs_depth(graph: &SiteGraph, source: NodeIndex) -> usize {
    let mut visited = HashSet::from([source]);
    let mut stack = vec![(source, 0usize)];
    let mut deepest = 0;

    while let Some((node, depth)) = stack.pop() {
        deepest = deepest.max(depth);

        for next in graph.successor_indices(node) {
            if visited.insert(next) {
                stack.push((next, depth + 1));
            }
        }
    }

    deepest
}

/// Depth reached from every node, keyed by URL.
pub fn depths(graph: &SiteGraph) -> HashMap<String, usize> {
    graph
        .node_indices()
        .map(|node| (graph.url(node).to_string(), dfs_depth(graph, node)))
        .collect()
}

pub fn max_depth(depths: &HashMap<String, usize>) -> usize {
    depths.values().copied().max().unwrap_or(0)
}

/// Nodes whose own depth-first run goes nowhere.
pub fn leaf_count(graph: &SiteGraph) -> usize {
    depths(graph).values().filter(|&&depth| depth == 0).count()
}
