pub mod edge_list_reader;
pub use edge_list_reader::*;
pub mod edge_list_writer;
pub use edge_list_writer::EdgeListWriter;

pub mod tour_writer;
pub use tour_writer::*;
