use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnnotateError {
    #[error("DataFrame must contain '{0}' column")]
    MissingColumn(String),
    #[error("sequences in original DataFrame ({input}) do not match processed sequences ({processed})")]
    SequenceMismatch { input: usize, processed: usize },
    #[error(transparent)]
    Polars(#[from] PolarsError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
