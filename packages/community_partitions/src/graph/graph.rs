// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use std::collections::HashMap;

use super::super::errors::CoreError;

/// The original input graph, immutable for the whole lifetime of a run set.
///
/// Neighbors are stored contiguously (a vector of per-node offsets into a
/// neighbors vector and a parallel edge weight vector), with each undirected
/// edge appearing once in each endpoint's range. Self loops never enter the
/// contiguous ranges; their weights are tracked per node so that they still
/// contribute to weighted degrees, to the total edge weight `m`, and to the
/// `A_ii` terms of the modularity score.
#[derive(Debug, PartialEq)]
pub struct Graph {
    node_to_neighbor_offsets: Vec<usize>,
    node_weights: Vec<f64>,
    self_loop_weights: Vec<f64>,
    contiguous_neighbors: Vec<usize>,
    contiguous_edge_weights: Vec<f64>,
    /// these are the bidirectional lookups between node labels and indices
    node_to_index: HashMap<String, usize>,
    index_to_node: Vec<String>,
}

impl Graph {
    pub fn new(
        node_to_neighbor_offsets: Vec<usize>,
        node_weights: Vec<f64>,
        self_loop_weights: Vec<f64>,
        contiguous_neighbors: Vec<usize>,
        contiguous_edge_weights: Vec<f64>,
        node_to_index: HashMap<String, usize>,
        index_to_node: Vec<String>,
    ) -> Graph {
        return Graph {
            node_to_neighbor_offsets,
            node_weights,
            self_loop_weights,
            contiguous_neighbors,
            contiguous_edge_weights,
            node_to_index,
            index_to_node,
        };
    }

    pub fn num_nodes(&self) -> usize {
        return self.node_to_neighbor_offsets.len();
    }

    /// Number of undirected edges between distinct nodes; self loops are not
    /// counted here.
    pub fn num_edges(&self) -> usize {
        return self.contiguous_neighbors.len() / 2;
    }

    /// The weighted degree `k_i`: the sum of the weights of every edge
    /// incident to `node`, a self loop counting once.
    pub fn node_weight_at(
        &self,
        node: usize,
    ) -> Result<f64, CoreError> {
        return self
            .node_weights
            .get(node)
            .cloned()
            .ok_or(CoreError::AggregateIndexingError);
    }

    pub fn self_loop_weight_at(
        &self,
        node: usize,
    ) -> Result<f64, CoreError> {
        return self
            .self_loop_weights
            .get(node)
            .cloned()
            .ok_or(CoreError::AggregateIndexingError);
    }

    pub fn neighbor_range(
        &self,
        node_index: usize,
    ) -> Result<(usize, usize), CoreError> {
        let start_of_contiguous_neighbors: usize = self
            .node_to_neighbor_offsets
            .get(node_index)
            .cloned()
            .ok_or(CoreError::AggregateIndexingError)?;
        let end_of_contiguous_neighbors: usize =
            if node_index + 1 == self.node_to_neighbor_offsets.len() {
                self.contiguous_neighbors.len()
            } else {
                self.node_to_neighbor_offsets[node_index + 1]
            };
        return Ok((start_of_contiguous_neighbors, end_of_contiguous_neighbors));
    }

    pub fn edges_for(
        &self,
        node_index: usize,
    ) -> Result<(&[usize], &[f64]), CoreError> {
        let (start_of_contiguous_neighbors, end_of_contiguous_neighbors) =
            self.neighbor_range(node_index)?;
        let neighbor_indices: &[usize] =
            &self.contiguous_neighbors[start_of_contiguous_neighbors..end_of_contiguous_neighbors];
        let edge_weights: &[f64] = &self.contiguous_edge_weights
            [start_of_contiguous_neighbors..end_of_contiguous_neighbors];
        return Ok((neighbor_indices, edge_weights));
    }

    /// Total edge weight `m`: each distinct-endpoint edge once plus every
    /// self loop once.
    pub fn total_edge_weight(&self) -> f64 {
        return self.contiguous_edge_weights.iter().sum::<f64>() / 2_f64
            + self.total_edge_weight_self_links();
    }

    pub fn total_edge_weight_self_links(&self) -> f64 {
        return self.self_loop_weights.iter().sum::<f64>();
    }

    /// Weights must be non negative; the first offending edge is reported by
    /// its endpoint indices. Called once per run set, before any run starts.
    pub fn validate(&self) -> Result<(), CoreError> {
        for node in 0..self.num_nodes() {
            let (neighbors, weights): (&[usize], &[f64]) = self.edges_for(node)?;
            for i in 0..neighbors.len() {
                if weights[i] < 0_f64 {
                    return Err(CoreError::NegativeEdgeWeightError(node, neighbors[i]));
                }
            }
            if self.self_loop_weights[node] < 0_f64 {
                return Err(CoreError::NegativeEdgeWeightError(node, node));
            }
        }
        return Ok(());
    }

    pub fn node_name(
        &self,
        index: usize,
    ) -> Result<String, CoreError> {
        return self
            .index_to_node
            .get(index)
            .cloned()
            .ok_or(CoreError::AggregateIndexingError);
    }

    pub fn index_for_name(
        &self,
        node: &str,
    ) -> Option<usize> {
        return self.node_to_index.get(node).cloned();
    }
}

#[cfg(test)]
mod tests {
    use super::super::GraphBuilder;
    use super::*;

    fn weighted_graph() -> Graph {
        return GraphBuilder::new()
            .add_edge_into("a", "b", 2.0)
            .add_edge_into("b", "c", 1.0)
            .add_edge_into("c", "c", 5.0)
            .build();
    }

    #[test]
    fn test_total_edge_weight_includes_self_links() {
        let graph: Graph = weighted_graph();
        assert_eq!(3, graph.num_nodes());
        assert_eq!(2, graph.num_edges());
        assert_eq!(8_f64, graph.total_edge_weight());
        assert_eq!(5_f64, graph.total_edge_weight_self_links());
    }

    #[test]
    fn test_node_weights_count_self_loop_once() {
        let graph: Graph = weighted_graph();
        let c: usize = graph.index_for_name("c").unwrap();
        assert_eq!(6_f64, graph.node_weight_at(c).unwrap());
        assert_eq!(5_f64, graph.self_loop_weight_at(c).unwrap());
        let b: usize = graph.index_for_name("b").unwrap();
        assert_eq!(3_f64, graph.node_weight_at(b).unwrap());
    }

    #[test]
    fn test_validate_rejects_negative_weights() {
        let graph: Graph = GraphBuilder::new()
            .add_edge_into("a", "b", 1.0)
            .add_edge_into("b", "c", -3.0)
            .build();
        match graph.validate() {
            Err(CoreError::NegativeEdgeWeightError(_, _)) => {}
            other => panic!("expected a negative edge weight error, got {:?}", other),
        }
    }

    #[test]
    fn test_edges_for_unknown_node() {
        let graph: Graph = weighted_graph();
        assert!(graph.edges_for(17).is_err());
    }
}
