use std::error::Error;

use thiserror::Error;

use crate::graph::{EdgeId, Node, NumNodes};

/// Trait for checking invariants in datastructures
pub trait InvariantCheck<E: Error> {
    fn is_correct(&self) -> Result<(), E>;
}

/// Precondition failures detected while constructing a graph
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("graph must contain at least one vertex")]
    NoVertices,

    #[error("graph has {number_of_nodes} vertices; at most {max} are supported")]
    TooManyVertices { number_of_nodes: NumNodes, max: NumNodes },

    #[error("edge {edge} references vertex {vertex} outside of [1, {number_of_nodes}]")]
    VertexOutOfRange {
        edge: EdgeId,
        vertex: Node,
        number_of_nodes: NumNodes,
    },

    #[error("broken invariant: {0}")]
    BrokenInvariant(String),
}

/// Failures while reading a graph description; all of them are fatal to that invocation
#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read input")]
    Io(#[from] std::io::Error),

    #[error("malformed input in line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },

    #[error("malformed input: {0}")]
    InvalidGraph(#[from] GraphError),
}

impl InputError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            line,
            reason: reason.into(),
        }
    }

    /// Returns true for every error caused by the content rather than the transport of the input
    pub fn is_malformed_input(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}
