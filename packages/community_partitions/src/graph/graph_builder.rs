// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use super::graph::Graph;
use crate::errors::NetworkError;
use crate::log;

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};

/// Accumulates labeled, weighted, undirected edges and produces a [`Graph`].
///
/// Parallel edges are combined by summing their weights; an edge whose
/// endpoints coincide is recorded as a self loop weight instead of an
/// adjacency entry.
#[derive(Clone, Debug)]
pub struct GraphBuilder {
    pub node_to_index: HashMap<String, usize>,
    pub index_to_node: Vec<String>,
    pub node_neighbors: Vec<HashSet<usize>>,
    pub edges: HashMap<(usize, usize), f64>,
    pub node_weights: Vec<f64>,
    pub self_loop_weights: Vec<f64>,
}

impl GraphBuilder {
    pub fn new() -> GraphBuilder {
        return GraphBuilder {
            node_to_index: HashMap::new(),
            index_to_node: Vec::new(),
            node_neighbors: Vec::new(),
            edges: HashMap::new(),
            node_weights: Vec::new(),
            self_loop_weights: Vec::new(),
        };
    }

    pub fn build(self) -> Graph {
        return Graph::from(self);
    }

    /// Registers a node with no edges. Nodes referenced by edges are created
    /// implicitly; this exists so that isolated vertices survive into the
    /// built graph.
    pub fn add_node(
        mut self,
        node: &str,
    ) -> GraphBuilder {
        self.id_for(node.into());
        return self;
    }

    fn add_directed_edge(
        mut self,
        source_index: usize,
        target_index: usize,
        weight: f64,
    ) -> GraphBuilder {
        let edge_weight: &mut f64 = self
            .edges
            .entry((source_index, target_index))
            .or_insert(0_f64);
        self.node_neighbors[source_index].insert(target_index);
        *edge_weight += weight;
        self.node_weights[source_index] += weight;
        return self;
    }

    pub fn add(
        self,
        edge: (String, String, f64),
    ) -> GraphBuilder {
        return self.add_edge(edge.0, edge.1, edge.2);
    }

    pub fn add_edge(
        mut self,
        source: String,
        target: String,
        weight: f64,
    ) -> GraphBuilder {
        let source_index: usize = self.id_for(source);
        let target_index: usize = self.id_for(target);
        if source_index == target_index {
            self.self_loop_weights[source_index] += weight;
            self.node_weights[source_index] += weight;
            return self;
        }
        return self
            .add_directed_edge(source_index, target_index, weight)
            .add_directed_edge(target_index, source_index, weight);
    }

    pub fn add_edge_into(
        self,
        source: &str,
        target: &str,
        weight: f64,
    ) -> GraphBuilder {
        return self.add_edge(source.into(), target.into(), weight);
    }

    fn id_for(
        &mut self,
        node: String,
    ) -> usize {
        let node_owned: String = node.clone();
        let index = match self.node_to_index.get(&node) {
            Some(found) => found.clone(),
            None => {
                let current_length: usize = self.index_to_node.len();
                self.node_to_index.insert(node, current_length);
                self.index_to_node.push(node_owned);
                self.node_neighbors.push(HashSet::new());
                self.node_weights.push(0_f64);
                self.self_loop_weights.push(0_f64);
                current_length
            }
        };
        return index;
    }

    pub fn load_from_file(
        mut self,
        path: &str,
        separator: &str,
        source_index: usize,
        target_index: usize,
        weight_index: Option<usize>,
        skip_first_line: bool,
    ) -> Result<GraphBuilder, NetworkError> {
        let minimum_required_length: usize = source_index
            .max(target_index)
            .max(weight_index.unwrap_or(target_index))
            + 1;
        let mut reader: BufReader<File> = BufReader::new(File::open(path)?);
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        if contents.trim().is_empty() {
            return Err(NetworkError::EmptyEdgeFileError);
        }
        for (line_number, line) in contents.lines().enumerate() {
            if !line.is_empty() && !(skip_first_line && line_number == 0) {
                let splits: Vec<&str> = line.split(separator).collect();
                if splits.len() < minimum_required_length {
                    return Err(NetworkError::EdgeFileFormatError);
                }
                let source: &str = splits[source_index];
                let target: &str = splits[target_index];
                let weight: f64 = match weight_index {
                    Some(weight_index) => splits[weight_index]
                        .parse::<f64>()
                        .map_err(|_err| NetworkError::EdgeFileFormatError)?,
                    None => 1_f64,
                };
                self = self.add_edge_into(source, target, weight);
            }
        }
        log!(
            "Loaded {} nodes from {} into the graph builder",
            self.num_nodes(),
            path
        );
        return Ok(self);
    }

    pub fn get_edge_weight(
        &self,
        source: &str,
        target: &str,
    ) -> Option<f64> {
        return self.node_to_index.get(source).and_then(|source_index| {
            self.node_to_index.get(target).and_then(|target_index| {
                self.edges
                    .get(&(source_index.clone(), target_index.clone()))
                    .cloned()
            })
        });
    }

    pub fn num_nodes(&self) -> usize {
        return self.node_weights.len();
    }

    pub fn from(
        mut self,
        edges: Vec<(String, String, f64)>,
    ) -> GraphBuilder {
        for (source, target, weight) in edges {
            self = self.add_edge(source, target, weight);
        }
        return self;
    }
}

impl From<GraphBuilder> for Graph {
    fn from(builder: GraphBuilder) -> Self {
        let node_to_index: HashMap<String, usize> = builder.node_to_index;
        let index_to_node: Vec<String> = builder.index_to_node;
        let node_weights: Vec<f64> = builder.node_weights;
        let self_loop_weights: Vec<f64> = builder.self_loop_weights;

        let mut node_to_neighbor_offsets: Vec<usize> = Vec::with_capacity(index_to_node.len());
        let mut contiguous_neighbors: Vec<usize> = Vec::with_capacity(builder.edges.len());
        let mut contiguous_edge_weights: Vec<f64> = Vec::with_capacity(builder.edges.len());

        for node in 0..index_to_node.len() {
            let mut neighbors: Vec<usize> = builder.node_neighbors[node].iter().cloned().collect();
            neighbors.sort_unstable();
            node_to_neighbor_offsets.push(contiguous_neighbors.len());
            for neighbor in neighbors {
                let weight: f64 = builder.edges.get(&(node, neighbor)).unwrap().clone();
                contiguous_neighbors.push(neighbor);
                contiguous_edge_weights.push(weight);
            }
        }

        return Graph::new(
            node_to_neighbor_offsets,
            node_weights,
            self_loop_weights,
            contiguous_neighbors,
            contiguous_edge_weights,
            node_to_index,
            index_to_node,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_edges_combine_weight() {
        let builder: GraphBuilder = GraphBuilder::new()
            .add_edge_into("jon", "nick", 10.0)
            .add_edge_into("nick", "jon", 2.5);
        assert_eq!(Some(12.5), builder.get_edge_weight("jon", "nick"));
        assert_eq!(Some(12.5), builder.get_edge_weight("nick", "jon"));
        assert_eq!(None, builder.get_edge_weight("jon", "dwayne"));
    }

    #[test]
    fn test_add_node_registers_isolated_vertex() {
        let graph: Graph = GraphBuilder::new()
            .add_edge_into("a", "b", 1.0)
            .add_node("loner")
            .build();
        assert_eq!(3, graph.num_nodes());
        let loner: usize = graph.index_for_name("loner").unwrap();
        let (neighbors, _weights) = graph.edges_for(loner).unwrap();
        assert!(neighbors.is_empty());
        assert_eq!(0_f64, graph.node_weight_at(loner).unwrap());
    }

    #[test]
    fn test_neighbors_are_sorted_in_built_graph() {
        let graph: Graph = GraphBuilder::new()
            .add_edge_into("hub", "z", 1.0)
            .add_edge_into("hub", "a", 1.0)
            .add_edge_into("hub", "m", 1.0)
            .build();
        let hub: usize = graph.index_for_name("hub").unwrap();
        let (neighbors, _weights) = graph.edges_for(hub).unwrap();
        let mut sorted: Vec<usize> = neighbors.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, neighbors.to_vec());
    }
}
