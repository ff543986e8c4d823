use crate::graph::*;
use itertools::Itertools;
use serde::Serialize;
use smallvec::SmallVec;
use std::io::Write;

/// A complete selection of edges together with its cost; usually a Hamiltonian cycle found by
/// one of the solvers. Edge ids are kept in the order they were selected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tour {
    edges: Vec<EdgeId>,
    cost: Cost,
}

impl Tour {
    pub fn new(edges: Vec<EdgeId>, cost: Cost) -> Self {
        Self { edges, cost }
    }

    pub fn from_subset(subset: &EdgeSubset) -> Self {
        Self::new(subset.ids().to_vec(), subset.cost())
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edge_ids(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Returns the edge ids in edge-list order
    pub fn sorted_edge_ids(&self) -> Vec<EdgeId> {
        self.edges.iter().copied().sorted().collect()
    }

    /// Checks that the tour is a single cycle through every vertex of `graph` and that the
    /// stored cost matches. The check walks the cycle and does not share code with the search.
    pub fn is_hamiltonian(&self, graph: &impl IncidenceList) -> bool {
        self.walk(graph).is_some()
            && self
                .edges
                .iter()
                .map(|&id| graph.edge(id).weight() as Cost)
                .sum::<Cost>()
                == self.cost
    }

    /// Visits the vertices along the cycle starting at vertex 0. Returns `None` if the tour
    /// is not a Hamiltonian cycle of `graph`.
    pub fn vertex_order(&self, graph: &impl IncidenceList) -> Option<Vec<Node>> {
        self.walk(graph)
    }

    fn walk(&self, graph: &impl IncidenceList) -> Option<Vec<Node>> {
        let n = graph.len();
        if n == 0
            || self.edges.len() != n
            || self.edges.iter().any(|&id| id >= graph.number_of_edges())
        {
            return None;
        }

        let mut incident: Vec<SmallVec<[usize; 2]>> = vec![SmallVec::new(); n];
        for (pos, &id) in self.edges.iter().enumerate() {
            let WeightedEdge(u, v, _) = graph.edge(id);
            incident[u as usize].push(pos);
            incident[v as usize].push(pos);
        }

        if incident.iter().any(|inc| inc.len() != 2) {
            return None;
        }

        let mut used = vec![false; n];
        let mut order = Vec::with_capacity(n);
        let mut current: Node = 0;

        for _ in 0..n {
            let pos = incident[current as usize]
                .iter()
                .copied()
                .find(|&pos| !used[pos])?;
            used[pos] = true;
            order.push(current);
            current = graph.edge(self.edges[pos]).other(current);
        }

        (current == 0).then_some(order)
    }

    /// Writes the tour in the text format, using 1-based vertex ids.
    ///
    /// ```
    /// use hamcycle::{graph::*, utils::Tour};
    /// let graph = WeightedGraph::try_from_edges(3, [(0, 1, 2), (1, 2, 3), (2, 0, 4)]).unwrap();
    /// let tour = Tour::new(vec![2, 0, 1], 9);
    ///
    /// let mut buffer: Vec<u8> = Vec::new();
    /// tour.write(&graph, &mut buffer).unwrap();
    /// let expected = "c hamiltonian cycle of cost 9 on 3 vertices\nc order: 1 3 2\n9 3\n1 2 2\n2 3 3\n3 1 4\n";
    /// assert_eq!(String::from_utf8(buffer).unwrap(), expected);
    /// ```
    pub fn write<W: Write>(&self, graph: &impl IncidenceList, mut writer: W) -> anyhow::Result<()> {
        writeln!(
            writer,
            "c hamiltonian cycle of cost {} on {} vertices",
            self.cost,
            graph.number_of_nodes()
        )?;

        if let Some(order) = self.vertex_order(graph) {
            writeln!(writer, "c order: {}", order.iter().map(|u| u + 1).join(" "))?;
        }

        writeln!(writer, "{} {}", self.cost, self.edges.len())?;
        for id in self.sorted_edge_ids() {
            let WeightedEdge(u, v, w) = graph.edge(id);
            writeln!(writer, "{} {} {}", u + 1, v + 1, w)?;
        }

        Ok(())
    }

    /// Serializable view of the tour with 1-based vertex ids
    pub fn report(&self, graph: &impl IncidenceList) -> TourReport {
        TourReport {
            cost: self.cost,
            order: self
                .vertex_order(graph)
                .unwrap_or_default()
                .into_iter()
                .map(|u| u + 1)
                .collect(),
            edges: self
                .sorted_edge_ids()
                .into_iter()
                .map(|id| {
                    let WeightedEdge(u, v, w) = graph.edge(id);
                    (u + 1, v + 1, w)
                })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TourReport {
    pub cost: Cost,
    pub order: Vec<Node>,
    pub edges: Vec<(Node, Node, Weight)>,
}
