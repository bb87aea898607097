use log::debug;
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Cells read as missing, in addition to empty fields. These match the pandas defaults.
pub const NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Appended to the input stem when no output path is given.
pub const OUTPUT_SUFFIX: &str = "_with_localcider";

#[derive(Debug, Error)]
pub enum IoError {
    #[error("Input file {} does not exist.", .0.display())]
    FileNotFound(PathBuf),
    #[error(transparent)]
    Polars(#[from] PolarsError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Read a CSV with a header row.
///
/// The schema is inferred from the whole file. Empty fields and `NA_VALUES` are read as null.
pub fn read_csv(path: impl AsRef<Path>) -> Result<DataFrame, IoError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::FileNotFound(path.to_path_buf()));
    }
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(CsvParseOptions::default().with_null_values(Some(
            NullValues::AllColumns(NA_VALUES.iter().map(|s| (*s).into()).collect()),
        )))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    debug!("read {} rows x {} columns from {}", df.height(), df.width(), path.display());
    Ok(df)
}

/// Write a CSV with a header row and no index column. Nulls are written as empty fields.
pub fn write_csv(df: &mut DataFrame, path: impl AsRef<Path>) -> Result<(), IoError> {
    let path = path.as_ref();
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    debug!("wrote {} rows to {}", df.height(), path.display());
    Ok(())
}

/// `<dir>/<stem>_with_localcider.csv` next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}{OUTPUT_SUFFIX}.csv"))
}
