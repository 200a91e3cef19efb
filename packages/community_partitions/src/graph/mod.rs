// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

pub type Edge = (String, String, f64);

pub use self::graph::Graph;
pub use self::graph_builder::GraphBuilder;
pub use self::working_graph::{Aggregate, WorkingGraph};

mod graph;
mod graph_builder;
mod working_graph;
