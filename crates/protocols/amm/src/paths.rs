//! Path Discovery
//!
//! Bounded depth-first search for simple token paths.

use route_core::{Path, RouteError, TokenAddress};

use crate::adjacency::PairAdjacency;

/// Default search depth
pub const DEFAULT_MAX_HOPS: usize = 3;

/// One level of the explicit DFS stack
struct Frame<'a> {
    path: Vec<TokenAddress>,
    depth: usize,
    neighbors: Vec<&'a TokenAddress>,
    cursor: usize,
}

/// Find all simple paths from `source` to `destination`.
///
/// Neighbors are visited in canonical order and paths are returned in DFS
/// pre-order. Reaching `destination` ends that branch only; sibling branches
/// keep searching. A branch deeper than `max_hops` yields nothing, so a path
/// has at most `max_hops + 1` edges.
pub fn find_paths(
    adjacency: &PairAdjacency,
    source: &TokenAddress,
    destination: &TokenAddress,
    max_hops: usize,
) -> Result<Vec<Path>, RouteError> {
    if source.is_empty() || destination.is_empty() {
        return Err(RouteError::invalid(
            "source and destination tokens must be non-empty",
        ));
    }
    if max_hops == 0 {
        return Err(RouteError::invalid("max_hops must be at least 1"));
    }
    if source == destination {
        return Ok(Vec::new());
    }

    let mut results: Vec<Path> = Vec::new();
    let mut stack: Vec<Frame<'_>> = vec![Frame {
        path: vec![source.clone()],
        depth: 0,
        neighbors: adjacency.neighbors(source).map(|(t, _)| t).collect(),
        cursor: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        let Some(&next) = frame.neighbors.get(frame.cursor) else {
            stack.pop();
            continue;
        };
        frame.cursor += 1;

        if next == destination {
            let mut found = frame.path.clone();
            found.push(next.clone());
            results.push(Path::new(found));
        } else if frame.depth < max_hops && !frame.path.contains(next) {
            let mut extended = frame.path.clone();
            extended.push(next.clone());
            let depth = frame.depth + 1;
            stack.push(Frame {
                path: extended,
                depth,
                neighbors: adjacency.neighbors(next).map(|(t, _)| t).collect(),
                cursor: 0,
            });
        }
    }

    tracing::debug!(
        source = %source,
        destination = %destination,
        max_hops,
        found = results.len(),
        "Path discovery complete"
    );

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(edges: &[(&str, &str)]) -> PairAdjacency {
        let mut adjacency = PairAdjacency::new();
        for (from, to) in edges {
            adjacency.insert(*from, *to, format!("{}{}", from, to));
        }
        adjacency
    }

    fn labels(paths: &[Path]) -> Vec<Vec<String>> {
        paths
            .iter()
            .map(|p| p.tokens().iter().map(|t| t.to_string()).collect())
            .collect()
    }

    fn t(s: &str) -> TokenAddress {
        TokenAddress::new(s)
    }

    #[test]
    fn test_single_chain() {
        let adjacency = graph(&[("a", "b"), ("b", "c")]);
        let paths = find_paths(&adjacency, &t("a"), &t("c"), 3).unwrap();
        assert_eq!(labels(&paths), vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn test_direct_and_indirect_paths() {
        let adjacency = graph(&[("a", "b"), ("a", "c"), ("c", "b")]);
        let paths = find_paths(&adjacency, &t("a"), &t("b"), 3).unwrap();
        assert_eq!(labels(&paths), vec![vec!["a", "b"], vec!["a", "c", "b"]]);
    }

    #[test]
    fn test_same_source_and_destination() {
        let adjacency = graph(&[("a", "b"), ("b", "a")]);
        assert!(find_paths(&adjacency, &t("a"), &t("a"), 3).unwrap().is_empty());
    }

    #[test]
    fn test_no_path() {
        let adjacency = graph(&[("a", "b"), ("c", "d")]);
        assert!(find_paths(&adjacency, &t("a"), &t("d"), 3).unwrap().is_empty());
        assert!(find_paths(&adjacency, &t("x"), &t("d"), 3).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_parameters() {
        let adjacency = graph(&[("a", "b")]);
        assert!(matches!(
            find_paths(&adjacency, &t(""), &t("b"), 3),
            Err(RouteError::InvalidParameter { .. })
        ));
        assert!(matches!(
            find_paths(&adjacency, &t("a"), &t("  "), 3),
            Err(RouteError::InvalidParameter { .. })
        ));
        assert!(matches!(
            find_paths(&adjacency, &t("a"), &t("b"), 0),
            Err(RouteError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_hop_bound() {
        // a -> b -> c -> d -> e -> f
        let adjacency = graph(&[("a", "b"), ("b", "c"), ("c", "d"), ("d", "e"), ("e", "f")]);

        // 4 edges fits max_hops = 3
        let paths = find_paths(&adjacency, &t("a"), &t("e"), 3).unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].hops(), 4);

        // 5 edges does not
        assert!(find_paths(&adjacency, &t("a"), &t("f"), 3).unwrap().is_empty());

        // max_hops = 1 allows two edges
        assert_eq!(find_paths(&adjacency, &t("a"), &t("c"), 1).unwrap().len(), 1);
        assert!(find_paths(&adjacency, &t("a"), &t("d"), 1).unwrap().is_empty());
    }

    #[test]
    fn test_cycles_are_not_followed() {
        let adjacency = graph(&[("a", "b"), ("b", "a"), ("b", "c"), ("c", "b"), ("c", "d")]);
        let paths = find_paths(&adjacency, &t("a"), &t("d"), 3).unwrap();
        assert_eq!(labels(&paths), vec![vec!["a", "b", "c", "d"]]);
    }

    #[test]
    fn test_dense_graph_paths_are_simple_and_bounded() {
        let tokens = ["a", "b", "c", "d", "e", "f"];
        let mut edges = Vec::new();
        for from in tokens {
            for to in tokens {
                if from != to {
                    edges.push((from, to));
                }
            }
        }
        let adjacency = graph(&edges);

        for max_hops in 1..=3 {
            let paths = find_paths(&adjacency, &t("a"), &t("f"), max_hops).unwrap();
            assert!(!paths.is_empty());
            for path in &paths {
                assert!(path.is_simple(), "repeated token in {}", path);
                assert!(path.hops() <= max_hops + 1);
                assert_eq!(path.source(), Some(&t("a")));
                assert_eq!(path.destination(), Some(&t("f")));
            }
        }

        // Complete graph on 6 nodes: 1 + 4 + 12 + 24 paths of length 1..=4
        let paths = find_paths(&adjacency, &t("a"), &t("f"), 3).unwrap();
        assert_eq!(paths.len(), 41);
    }

    #[test]
    fn test_output_order_is_dfs_preorder() {
        let adjacency = graph(&[("a", "c"), ("a", "b"), ("b", "d"), ("c", "d"), ("a", "d")]);
        let paths = find_paths(&adjacency, &t("a"), &t("d"), 3).unwrap();
        assert_eq!(
            labels(&paths),
            vec![vec!["a", "b", "d"], vec!["a", "c", "d"], vec!["a", "d"]]
        );
    }
}
