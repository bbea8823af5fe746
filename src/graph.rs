//! Directed Dependency Graph of Operational Assets
//!
//! Wraps a petgraph `DiGraph` so that assets are addressed by string id
//! while traversal runs on node indices. Edge weights are propagation
//! probabilities in [0, 1].
//!
//! ## Conventions
//! - Node iteration order is insertion order; this is the "native"
//!   ordering every batch operation preserves.
//! - An edge added without an explicit weight gets `DEFAULT_EDGE_WEIGHT`.
//! - Re-adding an existing edge keeps the higher of the two weights.
//! - Self-loops are permitted and get no special handling.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::round_to;

/// Propagation probability assumed for edges declared without a weight.
pub const DEFAULT_EDGE_WEIGHT: f64 = 0.5;

/// Directed dependency graph: an edge u -> v means "failure of u can
/// propagate to v" with the edge weight as base probability.
#[derive(Debug, Clone, Default)]
pub struct AssetGraph {
    graph: DiGraph<String, f64>,
    index: HashMap<String, NodeIndex>,
}

impl AssetGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an asset if not already present; returns its index either way.
    pub fn add_asset(&mut self, id: impl Into<String>) -> NodeIndex {
        let id = id.into();
        if let Some(&idx) = self.index.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(id.clone());
        self.index.insert(id, idx);
        idx
    }

    /// Adds a dependency edge, creating endpoints as needed.
    ///
    /// `weight` is the propagation probability; `None` falls back to
    /// `DEFAULT_EDGE_WEIGHT`. If the edge already exists the higher
    /// weight wins.
    pub fn add_dependency(
        &mut self,
        src: impl Into<String>,
        dst: impl Into<String>,
        weight: Option<f64>,
    ) {
        let u = self.add_asset(src);
        let v = self.add_asset(dst);
        let w = weight.unwrap_or(DEFAULT_EDGE_WEIGHT);

        if let Some(e) = self.graph.find_edge(u, v) {
            let existing = &mut self.graph[e];
            if w > *existing {
                *existing = w;
            }
        } else {
            self.graph.add_edge(u, v, w);
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    /// Asset id for a node index. Panics on a foreign index.
    pub fn id_of(&self, idx: NodeIndex) -> &str {
        &self.graph[idx]
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Asset ids in native (insertion) order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.graph.node_indices().map(move |i| self.graph[i].as_str())
    }

    /// Outgoing edges of `u` as (target, weight) pairs.
    pub fn successors(&self, u: NodeIndex) -> impl Iterator<Item = (NodeIndex, f64)> + '_ {
        self.graph.edges(u).map(|e| (e.target(), *e.weight()))
    }

    pub fn out_degree(&self, u: NodeIndex) -> usize {
        self.graph.edges(u).count()
    }

    pub fn in_degree(&self, u: NodeIndex) -> usize {
        self.graph
            .edges_directed(u, Direction::Incoming)
            .count()
    }

    /// Node with the highest out-degree; the first node reaching the
    /// maximum wins on ties. `None` for an empty graph.
    pub fn highest_out_degree(&self) -> Option<&str> {
        let mut best: Option<(NodeIndex, usize)> = None;
        for idx in self.graph.node_indices() {
            let deg = self.out_degree(idx);
            match best {
                Some((_, d)) if deg <= d => {}
                _ => best = Some((idx, deg)),
            }
        }
        best.map(|(idx, _)| self.graph[idx].as_str())
    }

    /// Top `k` assets by out-degree, descending; insertion order breaks
    /// ties. Useful for spotting likely cascade sources.
    pub fn top_by_out_degree(&self, k: usize) -> Vec<(&str, usize)> {
        let mut degrees: Vec<(&str, usize)> = self
            .graph
            .node_indices()
            .map(|i| (self.graph[i].as_str(), self.out_degree(i)))
            .collect();
        degrees.sort_by(|a, b| b.1.cmp(&a.1));
        degrees.truncate(k);
        degrees
    }

    pub fn summary(&self) -> GraphSummary {
        let n = self.node_count();
        let e = self.edge_count();

        let density = if n > 1 {
            e as f64 / (n as f64 * (n as f64 - 1.0))
        } else {
            0.0
        };

        let isolated = self
            .graph
            .node_indices()
            .filter(|&i| self.out_degree(i) == 0 && self.in_degree(i) == 0)
            .count();

        let denom = n.max(1) as f64;
        GraphSummary {
            nodes: n,
            edges: e,
            density: round_to(density, 4),
            avg_in_degree: round_to(e as f64 / denom, 2),
            avg_out_degree: round_to(e as f64 / denom, 2),
            isolated_nodes: isolated,
        }
    }
}

/// Structural overview used by the diagnostics report.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphSummary {
    pub nodes: usize,
    pub edges: usize,
    pub density: f64,
    pub avg_in_degree: f64,
    pub avg_out_degree: f64,
    pub isolated_nodes: usize,
}
