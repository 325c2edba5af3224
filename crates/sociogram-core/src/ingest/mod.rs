// Graph Ingestion
//
// Edge lists arrive as CSV files; see csv.rs for the row format.

pub mod csv;

pub use csv::load_graph_from_csv;
