use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("sequence is empty")]
    Empty,
    #[error("invalid residue '{residue}' at position {position}")]
    InvalidResidue { residue: char, position: usize },
}
