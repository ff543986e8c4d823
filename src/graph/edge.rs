use super::*;

pub trait EdgeOps {
    fn normalized(&self) -> Self;
    fn is_normalized(&self) -> bool;
    fn is_loop(&self) -> bool;
    fn reverse(&self) -> Self;
}

/// An undirected edge `(u, v)` carrying a non-negative weight
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct WeightedEdge(pub Node, pub Node, pub Weight);

/// One entry of a vertex' incidence list
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Incidence {
    pub neighbor: Node,
    pub weight: Weight,
    pub edge: EdgeId,
}

impl WeightedEdge {
    pub fn weight(&self) -> Weight {
        self.2
    }

    pub fn is_incident_to(&self, u: Node) -> bool {
        self.0 == u || self.1 == u
    }

    /// Returns the endpoint opposite of `u`.
    /// ** Panics in debug builds if `u` is not an endpoint **
    pub fn other(&self, u: Node) -> Node {
        debug_assert!(self.is_incident_to(u));
        if self.0 == u { self.1 } else { self.0 }
    }
}

impl EdgeOps for WeightedEdge {
    fn normalized(&self) -> Self {
        WeightedEdge(self.0.min(self.1), self.0.max(self.1), self.2)
    }

    fn is_normalized(&self) -> bool {
        self.0 <= self.1
    }

    fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    fn reverse(&self) -> Self {
        WeightedEdge(self.1, self.0, self.2)
    }
}

impl From<(Node, Node, Weight)> for WeightedEdge {
    fn from(value: (Node, Node, Weight)) -> Self {
        WeightedEdge(value.0, value.1, value.2)
    }
}

impl From<&(Node, Node, Weight)> for WeightedEdge {
    fn from(value: &(Node, Node, Weight)) -> Self {
        WeightedEdge(value.0, value.1, value.2)
    }
}

impl From<&WeightedEdge> for WeightedEdge {
    fn from(value: &WeightedEdge) -> Self {
        *value
    }
}
