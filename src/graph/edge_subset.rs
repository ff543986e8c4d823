use super::*;
use std::ops::{Deref, DerefMut};

/// The edges selected on the current search branch, in the order they were included,
/// together with their summed weight.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeSubset {
    edges: Vec<EdgeId>,
    cost: Cost,
}

impl EdgeSubset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            edges: Vec::with_capacity(capacity),
            cost: 0,
        }
    }

    /// Builds a subset from edge ids of `graph`, e.g. to evaluate a hand-picked selection
    pub fn from_ids(graph: &impl IncidenceList, ids: impl IntoIterator<Item = EdgeId>) -> Self {
        let mut subset = Self::new();
        for id in ids {
            subset.push(graph, id);
        }
        subset
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Sum of the weights of all selected edges
    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn ids(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn iter(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.iter().copied()
    }

    pub fn push(&mut self, graph: &impl IncidenceList, id: EdgeId) {
        self.cost += graph.edge(id).weight() as Cost;
        self.edges.push(id);
    }

    /// Removes the most recently added edge.
    /// ** Panics if the subset is empty **
    pub fn pop(&mut self, graph: &impl IncidenceList) -> EdgeId {
        let id = self.edges.pop().unwrap();
        self.cost -= graph.edge(id).weight() as Cost;
        id
    }

    /// Appends edge `id` and returns a guard through which the extended subset is accessed.
    /// The edge is removed again when the guard is dropped, on every exit path.
    ///
    /// # Example
    /// ```
    /// use hamcycle::graph::*;
    /// let graph = WeightedGraph::try_from_edges(2, [(0, 1, 3)]).unwrap();
    /// let mut subset = EdgeSubset::new();
    /// {
    ///     let included = subset.include(&graph, 0);
    ///     assert_eq!(included.cost(), 3);
    /// }
    /// assert!(subset.is_empty());
    /// ```
    pub fn include<'a, G: IncidenceList>(
        &'a mut self,
        graph: &'a G,
        id: EdgeId,
    ) -> SubsetGuard<'a, G> {
        self.push(graph, id);
        SubsetGuard {
            subset: self,
            graph,
        }
    }
}

pub struct SubsetGuard<'a, G: IncidenceList> {
    subset: &'a mut EdgeSubset,
    graph: &'a G,
}

impl<G: IncidenceList> Deref for SubsetGuard<'_, G> {
    type Target = EdgeSubset;

    fn deref(&self) -> &Self::Target {
        self.subset
    }
}

impl<G: IncidenceList> DerefMut for SubsetGuard<'_, G> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.subset
    }
}

impl<G: IncidenceList> Drop for SubsetGuard<'_, G> {
    fn drop(&mut self) {
        self.subset.pop(self.graph);
    }
}
