//! ferritin-io
//!
//! Tabular I/O for annotation pipelines.
//!
//! - CSV tables read into and written from polars `DataFrame`s.
//! - Output path naming for annotated tables.
//!
mod csv;

pub use csv::{default_output_path, read_csv, write_csv, IoError, NA_VALUES, OUTPUT_SUFFIX};
