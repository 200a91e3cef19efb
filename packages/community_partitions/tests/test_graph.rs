// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

#[cfg(test)]
mod tests {
    use community_partitions::errors::NetworkError;
    use community_partitions::graph::{Graph, GraphBuilder};

    #[test]
    fn test_load_graph_from_file() {
        let graph_path = "tests/simple_graph.csv";
        let graph: Graph = GraphBuilder::new()
            .load_from_file(graph_path, ",", 0, 1, Some(2), false)
            .expect("We should have gotten a properly loaded graph from this")
            .build();
        assert_eq!(5, graph.num_nodes());
        assert_eq!(5, graph.num_edges());
        assert_eq!(11.5, graph.total_edge_weight());
        assert!(graph.index_for_name("a").is_some());
        assert!(graph.index_for_name("zelda").is_none());
    }

    #[test]
    fn test_load_graph_from_broken_file() {
        let broken_graph_path = "tests/broken_graph.csv";
        let result: Result<GraphBuilder, NetworkError> =
            GraphBuilder::new().load_from_file(broken_graph_path, ",", 0, 1, Some(2), false);
        match result.err() {
            Some(NetworkError::EdgeFileFormatError) => {}
            Some(err) => panic!(
                "Actual NetworkError returned was not EdgeFileFormatError but an {:?}",
                err
            ),
            None => panic!("Somehow this file was parsed correctly, which is certainly wrong"),
        }
    }

    #[test]
    fn test_load_graph_from_empty_file() {
        let empty_graph_path = "tests/empty_graph.csv";
        let result: Result<GraphBuilder, NetworkError> =
            GraphBuilder::new().load_from_file(empty_graph_path, ",", 0, 1, Some(2), false);
        match result.err() {
            Some(NetworkError::EmptyEdgeFileError) => {}
            other => panic!("Expected an EmptyEdgeFileError, got {:?}", other),
        }
    }

    #[test]
    fn test_load_graph_skipping_header() {
        let graph_path = "tests/simple_graph.csv";
        // treat the first data line as a header: one fewer edge
        let graph: Graph = GraphBuilder::new()
            .load_from_file(graph_path, ",", 0, 1, Some(2), true)
            .expect("The file should still parse when skipping the first line")
            .build();
        assert_eq!(4, graph.num_edges());
    }
}
