use crate::{graph::*, utils::Tour};
use std::io::Write;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Writes the result of a search; `None` denotes that the graph has no Hamiltonian cycle
/// (or that none was found before the search was interrupted).
pub fn write_solution<W: Write>(
    graph: &WeightedGraph,
    tour: Option<&Tour>,
    format: OutputFormat,
    mut writer: W,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => match tour {
            Some(tour) => tour.write(graph, &mut writer)?,
            None => writeln!(writer, "c no hamiltonian cycle")?,
        },
        OutputFormat::Json => {
            serde_json::to_writer(&mut writer, &tour.map(|t| t.report(graph)))?;
            writeln!(writer)?;
        }
    }

    writer.flush()?;
    Ok(())
}
