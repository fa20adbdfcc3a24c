//! Graph model of the organism network.
//!
//! Peers become vertices of an undirected graph; connections become
//! edges. Metrics are computed from the actual graph structure:
//! density over possible edges, the average local clustering
//! coefficient, and the diameter via breadth-first search from every
//! vertex.

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Structural metrics of the network graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologyMetrics {
    pub total_nodes: usize,
    pub total_connections: usize,
    /// Longest shortest path between any two reachable vertices.
    pub network_diameter: usize,
    /// Average local clustering coefficient.
    pub clustering_coefficient: f64,
    /// Edges present over edges possible.
    pub network_density: f64,
}

/// Undirected graph of peers, keyed by organism id.
#[derive(Debug, Clone, Default)]
pub struct NetworkTopology {
    graph: UnGraph<String, f64>,
    indices: HashMap<String, NodeIndex>,
    pub metrics: TopologyMetrics,
}

impl NetworkTopology {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vertex if it is not already present.
    pub fn add_node(&mut self, organism_id: &str) -> NodeIndex {
        if let Some(&index) = self.indices.get(organism_id) {
            return index;
        }
        let index = self.graph.add_node(organism_id.to_string());
        self.indices.insert(organism_id.to_string(), index);
        index
    }

    /// Connects two organisms with a quality-weighted edge, creating
    /// the vertices as needed. Parallel edges are not added.
    pub fn connect(&mut self, a: &str, b: &str, quality: f64) {
        let ia = self.add_node(a);
        let ib = self.add_node(b);
        if ia != ib && self.graph.find_edge(ia, ib).is_none() {
            self.graph.add_edge(ia, ib, quality);
        }
    }

    #[must_use]
    pub fn contains(&self, organism_id: &str) -> bool {
        self.indices.contains_key(organism_id)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Average edge quality, 0.0 for an edgeless graph.
    #[must_use]
    pub fn average_quality(&self) -> f64 {
        if self.graph.edge_count() == 0 {
            return 0.0;
        }
        let total: f64 = self.graph.edge_references().map(|e| *e.weight()).sum();
        total / self.graph.edge_count() as f64
    }

    /// Recomputes all structural metrics from the current graph.
    pub fn calculate_metrics(&mut self) {
        let n = self.graph.node_count();
        let m = self.graph.edge_count();

        let possible = if n > 1 { n * (n - 1) / 2 } else { 1 };
        self.metrics = TopologyMetrics {
            total_nodes: n,
            total_connections: m,
            network_diameter: self.diameter(),
            clustering_coefficient: self.clustering_coefficient(),
            network_density: m as f64 / possible as f64,
        };
    }

    /// Average local clustering coefficient over all vertices.
    ///
    /// A vertex with fewer than two neighbors contributes zero.
    fn clustering_coefficient(&self) -> f64 {
        let n = self.graph.node_count();
        if n == 0 {
            return 0.0;
        }

        let mut total = 0.0;
        for index in self.graph.node_indices() {
            let neighbors: Vec<NodeIndex> = self.graph.neighbors(index).collect();
            let degree = neighbors.len();
            if degree < 2 {
                continue;
            }

            let mut links = 0usize;
            for i in 0..degree {
                for j in i + 1..degree {
                    if self.graph.find_edge(neighbors[i], neighbors[j]).is_some() {
                        links += 1;
                    }
                }
            }
            total += 2.0 * links as f64 / (degree * (degree - 1)) as f64;
        }
        total / n as f64
    }

    /// Longest shortest path, ignoring unreachable pairs.
    fn diameter(&self) -> usize {
        let mut diameter = 0;
        for start in self.graph.node_indices() {
            for &distance in self.bfs_distances(start).values() {
                diameter = diameter.max(distance);
            }
        }
        diameter
    }

    fn bfs_distances(&self, start: NodeIndex) -> HashMap<NodeIndex, usize> {
        let mut distances = HashMap::new();
        distances.insert(start, 0);
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            let next_distance = distances[&current] + 1;
            for neighbor in self.graph.neighbors(current) {
                if !distances.contains_key(&neighbor) {
                    distances.insert(neighbor, next_distance);
                    queue.push_back(neighbor);
                }
            }
        }
        distances
    }
}
