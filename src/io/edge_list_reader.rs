use std::{
    fs::File,
    io::{BufRead, BufReader, Lines},
    path::Path,
};

use crate::{
    errors::{GraphError, InputError},
    graph::*,
};

type Result<T> = std::result::Result<T, InputError>;

pub trait GraphEdgeListReader: Sized {
    fn try_read_edge_list<R: BufRead>(reader: R) -> Result<Self>;
    fn try_read_edge_list_file<P: AsRef<Path>>(path: P) -> Result<Self>;
}

impl GraphEdgeListReader for WeightedGraph {
    fn try_read_edge_list<R: BufRead>(reader: R) -> Result<Self> {
        let edge_reader = EdgeListReader::try_new(reader)?;
        let number_of_nodes = edge_reader.number_of_nodes();
        let edges = edge_reader.collect::<Result<Vec<_>>>()?;
        Ok(WeightedGraph::try_from_edges(number_of_nodes, edges)?)
    }

    fn try_read_edge_list_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = File::open(path)?;
        let buf_reader = BufReader::new(reader);
        Self::try_read_edge_list(buf_reader)
    }
}

/// Streams the edges of a graph description: a header `V E` followed by exactly `E` lines
/// `v1 v2 weight` with 1-based vertices. Blank lines and lines starting with `c` are skipped.
/// Yields 0-based edges.
pub struct EdgeListReader<R> {
    lines: Lines<R>,
    line_number: usize,
    number_of_nodes: NumNodes,
    number_of_edges: NumEdges,
    edges_read: NumEdges,
}

impl<R: BufRead> EdgeListReader<R> {
    pub fn try_new(reader: R) -> Result<Self> {
        let mut edge_reader = Self {
            lines: reader.lines(),
            line_number: 0,
            number_of_nodes: 0,
            number_of_edges: 0,
            edges_read: 0,
        };

        (edge_reader.number_of_nodes, edge_reader.number_of_edges) = edge_reader.parse_header()?;
        Ok(edge_reader)
    }

    pub fn number_of_edges(&self) -> NumEdges {
        self.number_of_edges
    }

    pub fn number_of_nodes(&self) -> NumNodes {
        self.number_of_nodes
    }
}

impl<R: BufRead> Iterator for EdgeListReader<R> {
    type Item = Result<WeightedEdge>;

    fn next(&mut self) -> Option<Self::Item> {
        self.parse_edge_line().transpose()
    }
}

macro_rules! raise_error_unless {
    ($cond : expr, $line : expr, $info : expr) => {
        if !($cond) {
            return Err(InputError::malformed($line, $info));
        }
    };
}

macro_rules! parse_next_value {
    ($iterator : expr, $line : expr, $name : expr) => {{
        let next = $iterator.next();
        raise_error_unless!(
            next.is_some(),
            $line,
            format!("premature end of line when parsing {}", $name)
        );

        let token = next.unwrap();
        let parsed = token.parse();
        raise_error_unless!(
            parsed.is_ok(),
            $line,
            format!("cannot parse {} from {:?}", $name, token)
        );

        parsed.unwrap()
    }};
}

impl<R: BufRead> EdgeListReader<R> {
    fn next_non_comment_line(&mut self) -> Result<Option<String>> {
        loop {
            let line = self.lines.next();
            match line {
                None => return Ok(None),
                Some(Err(x)) => return Err(x.into()),
                Some(Ok(line)) => {
                    self.line_number += 1;
                    let trimmed = line.trim_start();
                    if trimmed.is_empty() || trimmed.starts_with('c') {
                        continue;
                    }
                    return Ok(Some(line));
                }
            }
        }
    }

    fn parse_header(&mut self) -> Result<(NumNodes, NumEdges)> {
        let line = self.next_non_comment_line()?;
        let line_number = self.line_number.max(1);

        raise_error_unless!(line.is_some(), line_number, "no header found");
        let line = line.unwrap();

        let mut parts = line.split_whitespace();

        let number_of_nodes: NumNodes = parse_next_value!(parts, line_number, "number of vertices");
        let number_of_edges: NumEdges = parse_next_value!(parts, line_number, "number of edges");

        raise_error_unless!(
            parts.next().is_none(),
            line_number,
            "invalid header; expected end of line after the number of edges"
        );

        if number_of_nodes == 0 {
            return Err(GraphError::NoVertices.into());
        }

        if number_of_nodes > MAX_NUMBER_OF_NODES {
            return Err(GraphError::TooManyVertices {
                number_of_nodes,
                max: MAX_NUMBER_OF_NODES,
            }
            .into());
        }

        Ok((number_of_nodes, number_of_edges))
    }

    fn parse_edge_line(&mut self) -> Result<Option<WeightedEdge>> {
        let line = self.next_non_comment_line()?;

        if self.edges_read == self.number_of_edges {
            raise_error_unless!(
                line.is_none(),
                self.line_number,
                format!("found more than the {} announced edges", self.number_of_edges)
            );
            return Ok(None);
        }

        raise_error_unless!(
            line.is_some(),
            self.line_number + 1,
            format!(
                "expected {} edges but input ends after {}",
                self.number_of_edges, self.edges_read
            )
        );
        let line = line.unwrap();
        let line_number = self.line_number;

        let mut parts = line.split_whitespace();

        let from: Node = parse_next_value!(parts, line_number, "source vertex");
        let dest: Node = parse_next_value!(parts, line_number, "target vertex");
        let weight: Weight = parse_next_value!(parts, line_number, "weight");

        raise_error_unless!(
            parts.next().is_none(),
            line_number,
            "expected end of line after the weight"
        );

        for vertex in [from, dest] {
            raise_error_unless!(
                (1..=self.number_of_nodes).contains(&vertex),
                line_number,
                format!(
                    "vertex {vertex} outside of [1, {}]",
                    self.number_of_nodes
                )
            );
        }

        self.edges_read += 1;
        Ok(Some(WeightedEdge(from - 1, dest - 1, weight)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::InvariantCheck;
    use glob::glob;
    use itertools::Itertools;

    #[test]
    fn test_success() {
        const DEMO_FILE: &str =
            "c TEST\n 4  5 \n1 2 1\nc TEST\n\n2 3 1\n3\t4 1\n4 1 1\n1 3 5\nc trailing comment\n";
        let edge_reader = EdgeListReader::try_new(DEMO_FILE.as_bytes()).unwrap();

        assert_eq!(edge_reader.number_of_nodes(), 4);
        assert_eq!(edge_reader.number_of_edges(), 5);

        let edges: Vec<_> = edge_reader.try_collect().unwrap();
        assert_eq!(
            edges,
            vec![
                WeightedEdge(0, 1, 1),
                WeightedEdge(1, 2, 1),
                WeightedEdge(2, 3, 1),
                WeightedEdge(3, 0, 1),
                WeightedEdge(0, 2, 5),
            ]
        );

        let graph = WeightedGraph::try_read_edge_list(DEMO_FILE.as_bytes()).unwrap();
        assert_eq!(graph.total_weight(), 9);
        assert!(graph.is_correct().is_ok());
    }

    #[test]
    fn errors_report_line() {
        let cases = [
            ("", 1),
            ("c only a comment\n", 1),
            ("3\n", 1),
            ("3 1 x\n", 1),
            ("three 1\n", 1),
            ("4 2\n1 2 3\n", 3),
            ("3 1\n1 2 3\n2 3 1\n", 3),
            ("3 1\n1 2 3 4\n", 2),
            ("3 1\n1 2 -1\n", 2),
            ("3 1\nc comment\n1 x 2\n", 3),
            ("3 1\n1 4 2\n", 2),
            ("3 2\n1 2 1\n\n0 2 1\n", 4),
            ("3 1\n1 2\n", 2),
        ];

        for (input, expected_line) in cases {
            let error = WeightedGraph::try_read_edge_list(input.as_bytes()).unwrap_err();
            match error {
                InputError::MalformedInput { line, .. } => {
                    assert_eq!(line, expected_line, "input: {input:?} error: {error}")
                }
                _ => panic!("unexpected error {error:?} for input {input:?}"),
            }
            assert!(error.is_malformed_input());
        }
    }

    #[test]
    fn invalid_vertex_count() {
        for input in ["0 0\n", "65 0\n"] {
            let error = WeightedGraph::try_read_edge_list(input.as_bytes()).unwrap_err();
            assert!(matches!(error, InputError::InvalidGraph(_)), "{error:?}");
            assert!(error.is_malformed_input());
        }

        assert!(WeightedGraph::try_read_edge_list("64 0\n".as_bytes()).is_ok());
    }

    #[test]
    fn missing_file() {
        let error = WeightedGraph::try_read_edge_list_file("instances/does-not-exist.graph")
            .unwrap_err();
        assert!(matches!(error, InputError::Io(_)));
        assert!(!error.is_malformed_input());
    }

    #[test]
    fn test_read_instances() {
        let files = glob("instances/tiny/*.graph")
            .expect("Failed to glob")
            .map(|r| r.expect("Failed to access globbed path"))
            .collect_vec();

        assert!(!files.is_empty());

        for file in files {
            let graph = WeightedGraph::try_read_edge_list_file(&file)
                .unwrap_or_else(|e| panic!("Cannot read {file:?}: {e}"));
            assert!(graph.is_correct().is_ok());
        }
    }
}
