use crate::{graph::*, utils::Tour};
use glob::glob;
use itertools::Itertools;
use rand::{Rng, seq::SliceRandom};
use regex::Regex;
use std::ops::RangeInclusive;

/// Endless stream of random weighted G(n,p) graphs with `n` drawn from `nodes`.
/// The edge order is shuffled, since the search depends on it.
pub fn random_graph_stream<R: Rng>(
    rng: &mut R,
    nodes: RangeInclusive<NumNodes>,
    p: f64,
) -> impl Iterator<Item = WeightedGraph> + '_ {
    std::iter::repeat_with(move || {
        let n = rng.gen_range(nodes.clone());
        let graph = WeightedGraph::random_weighted_gnp(rng, n, p, 1..=20).unwrap();

        let mut edges = graph.edges().to_vec();
        edges.shuffle(rng);
        WeightedGraph::try_from_edges(n, edges).unwrap()
    })
}

/// Cheapest Hamiltonian cycle containing all of `subset` plus edges with id `>= next_edge`,
/// found by enumerating every completion
pub fn brute_force_completion(
    graph: &WeightedGraph,
    subset: &EdgeSubset,
    next_edge: EdgeId,
) -> Option<Cost> {
    let missing = graph.len().checked_sub(subset.len())?;

    (next_edge..graph.number_of_edges())
        .combinations(missing)
        .filter_map(|extra| {
            let mut ids = subset.ids().to_vec();
            ids.extend(extra);
            let cost = ids.iter().map(|&id| graph.edge(id).weight() as Cost).sum();
            let tour = Tour::new(ids, cost);
            tour.is_hamiltonian(graph).then_some(cost)
        })
        .min()
}

/// 1-2-3-4-1 with weight 1 each and the chord 1-3 of weight 5 (0-based below)
pub fn square_with_diagonal() -> WeightedGraph {
    WeightedGraph::test_only_from([(0, 1, 1), (1, 2, 1), (2, 3, 1), (3, 0, 1), (0, 2, 5)])
}

/// Two vertex-disjoint triangles on six vertices
pub fn two_triangles() -> WeightedGraph {
    WeightedGraph::test_only_from([
        (0, 1, 1),
        (1, 2, 1),
        (2, 0, 1),
        (3, 4, 1),
        (4, 5, 1),
        (5, 3, 1),
    ])
}

/// Complete graph on five vertices with the distinct weights 1..=10
pub fn k5_distinct_weights() -> WeightedGraph {
    let edges = (0..5)
        .tuple_combinations()
        .zip(1..)
        .map(|((u, v), w)| (u, v, w))
        .collect_vec();
    WeightedGraph::test_only_from(edges)
}

/// Lists the instances matching `pattern` together with the optimal cost encoded in their
/// filename (`*_cost012.graph`, or `*_none.graph` if there is no Hamiltonian cycle)
pub fn test_instances(pattern: &str) -> Vec<(String, Option<Cost>)> {
    let cost_regex = Regex::new(r"_cost(\d+)\.graph$").unwrap();

    glob(pattern)
        .expect("Failed to glob")
        .map(|r| {
            let filename = r.expect("Failed to access globbed path").display().to_string();
            let cost = if filename.ends_with("_none.graph") {
                None
            } else {
                let captures = cost_regex
                    .captures(&filename)
                    .unwrap_or_else(|| panic!("No expected cost in filename {filename}"));
                Some(captures[1].parse().unwrap())
            };
            (filename, cost)
        })
        .collect()
}
