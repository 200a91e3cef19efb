// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

/// A WorkingGraph is the mutable graph a single optimization run operates on.
///
/// Every node of the working graph is an Aggregate: initially one per original
/// vertex (a singleton), and after merges a group of original vertices. Nodes
/// are addressed by stable integer handles; the handle of an absorbed
/// aggregate is retired and never reused, so a snapshot of handles taken
/// before a pass stays valid while merges remove vertices mid-pass.
///
/// Invariants maintained by `merge`:
///  - the vertex set is exactly the set of live aggregates;
///  - between any two live aggregates there is at most one edge, mirrored in
///    both adjacency lists, whose weight is the sum of the original-graph
///    weights between their leaf members;
///  - an aggregate's `total_weighted_degree` follows the incremental rule:
///    absorbing a neighbor adds the neighbor's degree minus the weight of the
///    edge that became internal (subtracted once).
///
/// The whole structure is allocated in a `bumpalo` arena owned by the run, so
/// the N-1 losing runs of a run set free their graphs in one deallocation;
/// the winning partition is copied out to owned memory before the arena goes.
use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;

use super::graph::Graph;
use crate::errors::CoreError;

/// One community under construction: the flattened original vertices it
/// contains and its current total weighted degree in the working graph.
#[derive(Debug)]
pub struct Aggregate<'bump> {
    members: BumpVec<'bump, usize>,
    total_weighted_degree: f64,
}

impl<'bump> Aggregate<'bump> {
    fn singleton(
        leaf: usize,
        total_weighted_degree: f64,
        arena: &'bump Bump,
    ) -> Aggregate<'bump> {
        let mut members: BumpVec<'bump, usize> = BumpVec::with_capacity_in(1, arena);
        members.push(leaf);
        return Aggregate {
            members,
            total_weighted_degree,
        };
    }

    /// The original vertices contained, transitively flattened; a community
    /// absorbed into another contributes its leaves, never itself.
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

#[derive(Debug)]
struct WorkingNode<'bump> {
    aggregate: Aggregate<'bump>,
    edges: BumpVec<'bump, (usize, f64)>,
}

#[derive(Debug)]
pub struct WorkingGraph<'bump> {
    nodes: BumpVec<'bump, Option<WorkingNode<'bump>>>,
    num_live: usize,
}

impl<'bump> WorkingGraph<'bump> {
    /// Builds the singleton-aggregate copy of `graph` that a run starts from.
    /// Each original vertex becomes its own aggregate carrying the vertex's
    /// weighted degree; self loops stay inside that degree but do not become
    /// working edges (they can never contribute to a merge decision).
    pub fn from_graph(
        graph: &Graph,
        arena: &'bump Bump,
    ) -> Result<WorkingGraph<'bump>, CoreError> {
        let mut nodes: BumpVec<'bump, Option<WorkingNode<'bump>>> =
            BumpVec::with_capacity_in(graph.num_nodes(), arena);
        for node in 0..graph.num_nodes() {
            let aggregate: Aggregate<'bump> =
                Aggregate::singleton(node, graph.node_weight_at(node)?, arena);
            let (neighbors, weights): (&[usize], &[f64]) = graph.edges_for(node)?;
            let mut edges: BumpVec<'bump, (usize, f64)> =
                BumpVec::with_capacity_in(neighbors.len(), arena);
            for i in 0..neighbors.len() {
                edges.push((neighbors[i], weights[i]));
            }
            nodes.push(Some(WorkingNode { aggregate, edges }));
        }
        return Ok(WorkingGraph {
            nodes,
            num_live: graph.num_nodes(),
        });
    }

    /// Total number of handles ever issued, live or retired.
    pub fn num_slots(&self) -> usize {
        return self.nodes.len();
    }

    pub fn num_live(&self) -> usize {
        return self.num_live;
    }

    pub fn is_live(
        &self,
        handle: usize,
    ) -> bool {
        return handle < self.nodes.len() && self.nodes[handle].is_some();
    }

    pub fn live_handles(&self) -> Vec<usize> {
        let mut live: Vec<usize> = Vec::with_capacity(self.num_live);
        for handle in 0..self.nodes.len() {
            if self.nodes[handle].is_some() {
                live.push(handle);
            }
        }
        return live;
    }

    pub fn aggregate(
        &self,
        handle: usize,
    ) -> Result<&Aggregate<'bump>, CoreError> {
        return Ok(&self.node(handle)?.aggregate);
    }

    pub fn neighbors(
        &self,
        handle: usize,
    ) -> Result<&[(usize, f64)], CoreError> {
        return Ok(&self.node(handle)?.edges);
    }

    /// `Ok(None)` is the expected answer for two unconnected live aggregates;
    /// merge bookkeeping uses it to decide between accumulating into an
    /// existing edge and creating a new one.
    pub fn edge_weight_between(
        &self,
        source: usize,
        target: usize,
    ) -> Result<Option<f64>, CoreError> {
        let node: &WorkingNode<'bump> = self.node(source)?;
        for (neighbor, weight) in node.edges.iter() {
            if *neighbor == target {
                return Ok(Some(*weight));
            }
        }
        return Ok(None);
    }

    /// Merges `source` into `destination`: redirects every edge of `source`
    /// into `destination` (combining weights where an edge already exists),
    /// applies the degree rule, absorbs the members, and retires `source`'s
    /// handle. The edge between the two becomes internal and is dropped.
    pub fn merge(
        &mut self,
        source: usize,
        destination: usize,
    ) -> Result<(), CoreError> {
        if source == destination {
            return Err(CoreError::SelfMergeError(source));
        }
        if !self.is_live(destination) {
            return Err(CoreError::AggregateIndexingError);
        }
        let internal_weight: f64 = self
            .edge_weight_between(source, destination)?
            .ok_or(CoreError::MissingEdgeError(source, destination))?;
        let source_node: WorkingNode<'bump> = self
            .nodes
            .get_mut(source)
            .and_then(|slot| slot.take())
            .ok_or(CoreError::AggregateIndexingError)?;

        for (neighbor, weight) in source_node.edges.iter() {
            let neighbor: usize = *neighbor;
            let weight: f64 = *weight;
            if neighbor == destination {
                continue;
            }
            self.drop_edge(neighbor, source)?;
            self.accumulate_edge(neighbor, destination, weight)?;
            self.accumulate_edge(destination, neighbor, weight)?;
        }
        self.drop_edge(destination, source)?;

        let destination_node: &mut WorkingNode<'bump> = self.node_mut(destination)?;
        destination_node.aggregate.total_weighted_degree +=
            source_node.aggregate.total_weighted_degree - internal_weight;
        for member in source_node.aggregate.members.iter() {
            destination_node.aggregate.members.push(*member);
        }
        self.num_live -= 1;
        return Ok(());
    }

    fn node(
        &self,
        handle: usize,
    ) -> Result<&WorkingNode<'bump>, CoreError> {
        return self
            .nodes
            .get(handle)
            .and_then(|slot| slot.as_ref())
            .ok_or(CoreError::AggregateIndexingError);
    }

    fn node_mut(
        &mut self,
        handle: usize,
    ) -> Result<&mut WorkingNode<'bump>, CoreError> {
        return self
            .nodes
            .get_mut(handle)
            .and_then(|slot| slot.as_mut())
            .ok_or(CoreError::AggregateIndexingError);
    }

    fn accumulate_edge(
        &mut self,
        owner: usize,
        neighbor: usize,
        weight: f64,
    ) -> Result<(), CoreError> {
        let node: &mut WorkingNode<'bump> = self.node_mut(owner)?;
        for entry in node.edges.iter_mut() {
            if entry.0 == neighbor {
                entry.1 += weight;
                return Ok(());
            }
        }
        node.edges.push((neighbor, weight));
        return Ok(());
    }

    fn drop_edge(
        &mut self,
        owner: usize,
        neighbor: usize,
    ) -> Result<(), CoreError> {
        let node: &mut WorkingNode<'bump> = self.node_mut(owner)?;
        node.edges.retain(|entry| entry.0 != neighbor);
        return Ok(());
    }
}
