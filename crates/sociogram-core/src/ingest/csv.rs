// CSV edge-list loading.
//
// Row format: source,target[,weight]. The first line is a header and is
// skipped. Rows with a blank endpoint are dropped, as are self-loops and
// duplicate pairs. A missing or unparsable weight defaults to 1.0.

use std::fs;
use std::path::Path;

use sociogram_common::{Edge, SociogramError};
use tracing::info;

use crate::graph::SocialGraph;

pub fn load_graph_from_csv(path: impl AsRef<Path>) -> Result<SocialGraph, SociogramError> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|source| SociogramError::Io {
        path: path_str.clone(),
        source,
    })?;

    let graph = parse_edge_list(&content);
    if graph.edge_count() == 0 {
        return Err(SociogramError::EmptyEdgeList { path: path_str });
    }

    info!(
        path = %path_str,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded graph"
    );
    Ok(graph)
}

fn parse_edge_list(content: &str) -> SocialGraph {
    let mut graph = SocialGraph::new();

    // First line is the header.
    for line in content.lines().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split(',');
        let source = fields.next().map(str::trim).unwrap_or("");
        let target = fields.next().map(str::trim).unwrap_or("");
        if source.is_empty() || target.is_empty() {
            continue;
        }

        let weight = fields
            .next()
            .and_then(|w| w.trim().parse::<f32>().ok())
            .unwrap_or(1.0);
        graph.add_edge(&Edge::weighted(source, target, weight));
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes()).expect("Failed to write");
        file
    }

    #[test]
    fn test_loads_edges_and_skips_header() {
        let file = write_csv("source,target\nalice,bob\nbob,carol\n");
        let graph = load_graph_from_csv(file.path()).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.has_edge("alice", "bob"));
        assert!(!graph.contains("source"));
    }

    #[test]
    fn test_blank_endpoints_are_skipped() {
        let file = write_csv("source,target\nalice,bob\n,carol\ndave,\n\n");
        let graph = load_graph_from_csv(file.path()).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert!(!graph.contains("carol"));
        assert!(!graph.contains("dave"));
    }

    #[test]
    fn test_weight_column() {
        let file = write_csv("source,target,weight\na,b,2.5\nb,c,oops\n");
        let graph = load_graph_from_csv(file.path()).unwrap();
        let edges = graph.edges();
        assert_eq!(edges[0].weight, 2.5);
        // Unparsable weight falls back to 1.0
        assert_eq!(edges[1].weight, 1.0);
    }

    #[test]
    fn test_empty_file_is_an_error() {
        let file = write_csv("source,target\n");
        let err = load_graph_from_csv(file.path()).unwrap_err();
        assert!(matches!(err, SociogramError::EmptyEdgeList { .. }));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = load_graph_from_csv("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, SociogramError::Io { .. }));
    }
}
