use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use super::super::graph::*;

pub trait EdgeListWriter {
    fn try_write_edge_list<W: Write>(&self, writer: W) -> Result<(), std::io::Error>;
    fn try_write_edge_list_file<P: AsRef<Path>>(&self, path: P) -> Result<(), std::io::Error>;
}

impl EdgeListWriter for WeightedGraph {
    fn try_write_edge_list<W: Write>(&self, mut writer: W) -> Result<(), std::io::Error> {
        writeln!(
            writer,
            "{} {}",
            self.number_of_nodes(),
            self.number_of_edges()
        )?;

        for &WeightedEdge(u, v, w) in self.edges() {
            writeln!(writer, "{} {} {}", u + 1, v + 1, w)?;
        }

        writer.flush()
    }

    fn try_write_edge_list_file<P: AsRef<Path>>(&self, path: P) -> Result<(), std::io::Error> {
        let writer = BufWriter::new(File::create(path)?);
        self.try_write_edge_list(writer)
    }
}
