use super::*;
use crate::errors::{GraphError, InvariantCheck};
use itertools::Itertools;
use std::fmt;

/// Immutable edge-weighted undirected graph. Edges keep the order in which they were
/// supplied; the search branches on them in exactly that order.
#[derive(Clone)]
pub struct WeightedGraph {
    adj: Vec<Neighborhood>,
    edges: Vec<WeightedEdge>,
    total_weight: Cost,
}

macro_rules! forward {
    ($single : ident, $internal : ident, $type : ty) => {
        fn $single(&self, node: Node) -> $type {
            self.adj[node as usize].$internal()
        }
    };
}

impl GraphNodeOrder for WeightedGraph {
    fn number_of_nodes(&self) -> NumNodes {
        self.adj.len() as NumNodes
    }
}

impl GraphEdgeOrder for WeightedGraph {
    fn number_of_edges(&self) -> NumEdges {
        self.edges.len() as NumEdges
    }
}

impl IncidenceList for WeightedGraph {
    forward!(incidences_of, incidences, &[Incidence]);

    fn edge(&self, id: EdgeId) -> WeightedEdge {
        self.edges[id as usize]
    }
}

impl WeightedGraph {
    /// Builds the graph from 0-based edges; the order of `edges` becomes the fixed edge order.
    ///
    /// # Example
    /// ```
    /// use hamcycle::graph::*;
    /// let graph = WeightedGraph::try_from_edges(3, [(0, 1, 2), (1, 2, 3), (2, 0, 4)]).unwrap();
    /// assert_eq!(graph.number_of_edges(), 3);
    /// assert_eq!(graph.total_weight(), 9);
    /// ```
    pub fn try_from_edges(
        number_of_nodes: NumNodes,
        edges: impl IntoIterator<Item = impl Into<WeightedEdge>>,
    ) -> Result<Self, GraphError> {
        if number_of_nodes == 0 {
            return Err(GraphError::NoVertices);
        }

        if number_of_nodes > MAX_NUMBER_OF_NODES {
            return Err(GraphError::TooManyVertices {
                number_of_nodes,
                max: MAX_NUMBER_OF_NODES,
            });
        }

        let mut graph = Self {
            adj: vec![Neighborhood::default(); number_of_nodes as usize],
            edges: Vec::new(),
            total_weight: 0,
        };

        for edge in edges.into_iter().map(|e| e.into()) {
            graph.push_edge(edge)?;
        }

        debug_assert!(graph.is_correct().is_ok());

        Ok(graph)
    }

    fn push_edge(&mut self, edge: WeightedEdge) -> Result<(), GraphError> {
        let WeightedEdge(u, v, weight) = edge;
        let id = self.edges.len() as EdgeId;

        if let Some(&vertex) = [u, v].iter().find(|&&x| x >= self.number_of_nodes()) {
            // errors talk about the 1-based ids users wrote
            return Err(GraphError::VertexOutOfRange {
                edge: id + 1,
                vertex: vertex + 1,
                number_of_nodes: self.number_of_nodes(),
            });
        }

        self.adj[u as usize].push(v, weight, id);
        self.adj[v as usize].push(u, weight, id);
        self.edges.push(edge);
        self.total_weight += weight as Cost;

        Ok(())
    }

    /// Returns all edges in their fixed order
    pub fn edges(&self) -> &[WeightedEdge] {
        &self.edges
    }

    /// Sum of all edge weights
    pub fn total_weight(&self) -> Cost {
        self.total_weight
    }

    /// Returns the smallest number of incident edges of any vertex
    pub fn min_degree(&self) -> NumNodes {
        self.degrees().min().unwrap_or(0)
    }

    pub fn test_only_from(edges: impl IntoIterator<Item = (Node, Node, Weight)>) -> Self {
        let edges = edges.into_iter().collect_vec();
        let n = edges
            .iter()
            .map(|&(u, v, _)| u.max(v) + 1)
            .max()
            .unwrap_or(1);

        Self::try_from_edges(n, edges).unwrap()
    }
}

impl InvariantCheck<GraphError> for WeightedGraph {
    fn is_correct(&self) -> Result<(), GraphError> {
        let mut seen = vec![0u32; self.edges.len()];

        for u in self.vertices() {
            for inc in self.incidences_of(u) {
                let edge = self.edges.get(inc.edge as usize).ok_or_else(|| {
                    GraphError::BrokenInvariant(format!("unknown edge id {}", inc.edge))
                })?;

                if !edge.is_incident_to(u) || edge.other(u) != inc.neighbor {
                    return Err(GraphError::BrokenInvariant(format!(
                        "incidence of vertex {u} does not match edge {:?}",
                        edge
                    )));
                }

                if edge.weight() != inc.weight {
                    return Err(GraphError::BrokenInvariant(format!(
                        "cached weight of edge {} differs",
                        inc.edge
                    )));
                }

                seen[inc.edge as usize] += 1;
            }
        }

        // every edge is listed once at each endpoint; a loop twice at its only endpoint
        if let Some(id) = seen.iter().position(|&c| c != 2) {
            return Err(GraphError::BrokenInvariant(format!(
                "edge {id} is listed {} times in incidence lists",
                seen[id]
            )));
        }

        let total: Cost = self.edges.iter().map(|e| e.weight() as Cost).sum();
        if total != self.total_weight {
            return Err(GraphError::BrokenInvariant(String::from(
                "cached total weight differs",
            )));
        }

        Ok(())
    }
}

#[derive(Default, Clone)]
struct Neighborhood {
    incidences: Vec<Incidence>,
}

impl Neighborhood {
    fn incidences(&self) -> &[Incidence] {
        &self.incidences
    }

    fn push(&mut self, neighbor: Node, weight: Weight, edge: EdgeId) {
        self.incidences.push(Incidence {
            neighbor,
            weight,
            edge,
        });
    }
}

impl fmt::Debug for WeightedGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WeightedGraph(n={}, m={}, [{}])",
            self.number_of_nodes(),
            self.number_of_edges(),
            self.edges
                .iter()
                .map(|WeightedEdge(u, v, w)| format!("{}-{}:{w}", u + 1, v + 1))
                .join(", ")
        )
    }
}
