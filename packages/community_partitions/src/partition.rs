// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use std::ops::Index;

use crate::errors::CoreError;
use crate::graph::{Graph, WorkingGraph};

/// A finished community: the flattened original vertices it contains and the
/// total weighted degree it ended the run with.
#[derive(Clone, Debug, PartialEq)]
pub struct Community {
    members: Vec<usize>,
    total_weighted_degree: f64,
}

impl Community {
    pub fn new(
        members: Vec<usize>,
        total_weighted_degree: f64,
    ) -> Community {
        return Community {
            members,
            total_weighted_degree,
        };
    }

    pub fn members(&self) -> &[usize] {
        return &self.members;
    }

    pub fn size(&self) -> usize {
        return self.members.len();
    }

    pub fn total_weighted_degree(&self) -> f64 {
        return self.total_weighted_degree;
    }
}

/// The owned result of a run: the communities, the aggregated inter-community
/// edges (each once, with `source < target` by community index), and the
/// number of original vertices the communities partition.
///
/// Downstream consumers (layout, reporting) read communities and edges; the
/// per-vertex view is available through `assignments`.
#[derive(Clone, Debug, PartialEq)]
pub struct Partition {
    communities: Vec<Community>,
    edges: Vec<(usize, usize, f64)>,
    num_leaves: usize,
}

impl Partition {
    /// Creates a partition (with ZERO sanity checking) from pre-built parts.
    /// Use responsibly.
    pub fn as_defined(
        communities: Vec<Community>,
        edges: Vec<(usize, usize, f64)>,
        num_leaves: usize,
    ) -> Partition {
        return Partition {
            communities,
            edges,
            num_leaves,
        };
    }

    /// The trivial partition: every vertex of `graph` alone in its own
    /// community, every edge inter-community. This is what an edgeless graph
    /// converges to without running any optimization.
    pub fn singletons(graph: &Graph) -> Result<Partition, CoreError> {
        let mut communities: Vec<Community> = Vec::with_capacity(graph.num_nodes());
        for node in 0..graph.num_nodes() {
            communities.push(Community::new(vec![node], graph.node_weight_at(node)?));
        }
        let mut edges: Vec<(usize, usize, f64)> = Vec::new();
        for node in 0..graph.num_nodes() {
            let (neighbors, weights): (&[usize], &[f64]) = graph.edges_for(node)?;
            for i in 0..neighbors.len() {
                if neighbors[i] > node {
                    edges.push((node, neighbors[i], weights[i]));
                }
            }
        }
        return Ok(Partition {
            communities,
            edges,
            num_leaves: graph.num_nodes(),
        });
    }

    /// Copies a converged working graph out of its run arena into an owned
    /// partition. Communities are numbered by ascending surviving handle, so
    /// the result is deterministic for a deterministic run.
    pub fn from_working_graph(
        working: &WorkingGraph,
        num_leaves: usize,
    ) -> Result<Partition, CoreError> {
        let live: Vec<usize> = working.live_handles();
        let mut handle_to_community: Vec<Option<usize>> = vec![None; working.num_slots()];
        for (community, handle) in live.iter().enumerate() {
            handle_to_community[*handle] = Some(community);
        }

        let mut communities: Vec<Community> = Vec::with_capacity(live.len());
        for handle in live.iter() {
            let aggregate = working.aggregate(*handle)?;
            communities.push(Community::new(
                aggregate.members().to_vec(),
                aggregate.total_weighted_degree(),
            ));
        }

        let mut edges: Vec<(usize, usize, f64)> = Vec::new();
        for handle in live.iter() {
            for (neighbor, weight) in working.neighbors(*handle)? {
                if *neighbor > *handle {
                    let source: usize =
                        handle_to_community[*handle].ok_or(CoreError::AggregateIndexingError)?;
                    let target: usize =
                        handle_to_community[*neighbor].ok_or(CoreError::AggregateIndexingError)?;
                    edges.push((source, target, *weight));
                }
            }
        }

        return Ok(Partition {
            communities,
            edges,
            num_leaves,
        });
    }

    pub fn num_communities(&self) -> usize {
        return self.communities.len();
    }

    pub fn num_leaves(&self) -> usize {
        return self.num_leaves;
    }

    pub fn communities(&self) -> &[Community] {
        return &self.communities;
    }

    pub fn community_at(
        &self,
        community: usize,
    ) -> Result<&Community, CoreError> {
        return self
            .communities
            .get(community)
            .ok_or(CoreError::AggregateIndexingError);
    }

    pub fn edges(&self) -> &[(usize, usize, f64)] {
        return &self.edges;
    }

    /// The per-vertex view: index is the original vertex, value is its
    /// community. Fails if any community claims a vertex outside the graph.
    pub fn assignments(&self) -> Result<Vec<usize>, CoreError> {
        let mut assignment: Vec<usize> = vec![0; self.num_leaves];
        for (community, entry) in self.communities.iter().enumerate() {
            for member in entry.members() {
                if *member >= self.num_leaves {
                    return Err(CoreError::AggregateIndexingError);
                }
                assignment[*member] = community;
            }
        }
        return Ok(assignment);
    }
}

impl Index<usize> for Partition {
    type Output = Community;

    fn index(
        &self,
        index: usize,
    ) -> &Self::Output {
        &self.communities[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use bumpalo::Bump;

    #[test]
    fn test_assignments() {
        let partition: Partition = Partition::as_defined(
            vec![
                Community::new(vec![0, 2], 3.0),
                Community::new(vec![1, 3], 3.0),
            ],
            vec![(0, 1, 2.0)],
            4,
        );
        assert_eq!(vec![0, 1, 0, 1], partition.assignments().unwrap());
    }

    #[test]
    fn test_assignments_rejects_out_of_range_members() {
        let partition: Partition =
            Partition::as_defined(vec![Community::new(vec![0, 9], 1.0)], Vec::new(), 2);
        assert_eq!(
            Err(CoreError::AggregateIndexingError),
            partition.assignments()
        );
    }

    #[test]
    fn test_from_working_graph_renumbers_surviving_handles() {
        let graph = GraphBuilder::new()
            .add_edge_into("a", "b", 1.0)
            .add_edge_into("b", "c", 2.0)
            .add_edge_into("c", "d", 1.0)
            .build();
        let arena: Bump = Bump::new();
        let mut working = WorkingGraph::from_graph(&graph, &arena).unwrap();
        working.merge(0, 1).unwrap();
        working.merge(3, 2).unwrap();

        let partition: Partition = Partition::from_working_graph(&working, 4).unwrap();
        assert_eq!(2, partition.num_communities());
        // surviving handles 1 and 2 become communities 0 and 1
        assert_eq!(&[1, 0], partition[0].members());
        assert_eq!(&[2, 3], partition[1].members());
        assert_eq!(&[(0, 1, 2.0)], partition.edges());
        assert_eq!(vec![0, 0, 1, 1], partition.assignments().unwrap());
    }

    #[test]
    fn test_singletons() {
        let graph = GraphBuilder::new()
            .add_edge_into("a", "b", 1.5)
            .add_node("c")
            .build();
        let partition: Partition = Partition::singletons(&graph).unwrap();
        assert_eq!(3, partition.num_communities());
        assert_eq!(&[(0, 1, 1.5)], partition.edges());
        assert_eq!(vec![0, 1, 2], partition.assignments().unwrap());
        assert_eq!(1.5, partition[0].total_weighted_degree());
        assert_eq!(0.0, partition[2].total_weighted_degree());
    }
}
