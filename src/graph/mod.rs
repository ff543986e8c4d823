pub mod edge;
pub mod edge_subset;
pub mod gnp;
pub mod weighted_graph;

pub type Node = u32;
pub type NumNodes = Node;
pub type EdgeId = u32;
pub type NumEdges = EdgeId;
pub type Weight = u32;
pub type Cost = u64;

/// Largest vertex count accepted by [`WeightedGraph::try_from_edges`]. Exact search beyond the
/// low tens of vertices is hopeless anyway; the limit keeps vertex ids small and validated.
pub const MAX_NUMBER_OF_NODES: NumNodes = 64;

use std::ops::Range;

pub use edge::*;
pub use edge_subset::*;
pub use gnp::*;
pub use weighted_graph::*;

/// Provides getters pertaining to the size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns an iterator over V.
    fn vertices(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns true if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph
    fn number_of_edges(&self) -> NumEdges;

    /// Returns the ids of all edges in their fixed order
    fn edge_ids(&self) -> Range<EdgeId> {
        0..self.number_of_edges()
    }
}

#[macro_export]
macro_rules! node_iterator {
    ($iter : ident, $single : ident, $type : ty) => {
        fn $iter(&self) -> impl Iterator<Item = $type> + '_ {
            self.vertices().map(|u| self.$single(u))
        }
    };
}

/// Read access to the cached incidences of every vertex.
pub trait IncidenceList: GraphNodeOrder + GraphEdgeOrder {
    /// Returns the incidences (neighbor, weight, edge id) of a given vertex.
    /// ** Panics if the u >= n **
    fn incidences_of(&self, u: Node) -> &[Incidence];

    /// Returns the edge with the given id.
    /// ** Panics if id >= m **
    fn edge(&self, id: EdgeId) -> WeightedEdge;

    /// Returns the number of edge endpoints at `u`; a self-loop counts twice
    fn degree_of(&self, u: Node) -> NumNodes {
        self.incidences_of(u).len() as NumNodes
    }

    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.incidences_of(u).iter().map(|i| i.neighbor)
    }

    node_iterator!(degrees, degree_of, NumNodes);
}
