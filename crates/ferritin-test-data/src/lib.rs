//! ferretin-test-data
//!
//! A module to provide test files embedded in the crate for use in testing.
//! Example tables are included in the crate distribution for reference files.
//!
//! The test files are represented as `TestFile` objects which package the raw binary data
//! and create temporary files for programs to operate on.
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};

#[derive(Debug)]
/// Test File
///
/// Example usage:
///
/// ```ignore
/// // returns (filepath, _tempfile_handle).
/// // _handle ensures the tempfile remains in scope
/// use ferritin_test_data::TestFile;
/// let (csv_file, _temp) = TestFile::sequences_01().create_temp().unwrap();
/// ```
pub struct TestFile {
    filebinary: &'static [u8],
    suffix: &'static str,
    name: &'static str,
}

impl TestFile {
    /// Disordered regions keyed on `sequence`.
    ///
    /// Seven rows: two copies of the p53 transactivation domain, an empty cell,
    /// a sequence with non-canonical residues and three synthetic sequences.
    pub fn sequences_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/csv/idr_sequences.csv"),
            suffix: "csv",
            name: "idr_sequences",
        }
    }
    /// Sequences keyed on `seq`, with a stale `kappa` column and an unrelated
    /// `sequence` column. The third row has an empty `seq`.
    pub fn sequences_02() -> Self {
        Self {
            filebinary: include_bytes!("../data/csv/custom_column.csv"),
            suffix: "csv",
            name: "custom_column",
        }
    }
    /// A table without any sequence column.
    pub fn no_sequence_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/csv/no_sequence.csv"),
            suffix: "csv",
            name: "no_sequence",
        }
    }
    /// `sequence` column that parses as integers.
    pub fn numeric_sequence_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/csv/numeric_sequence.csv"),
            suffix: "csv",
            name: "numeric_sequence",
        }
    }
    /// `sequence` cells spelled as missing-value tokens (`NA`, `NaN`, `null`, ...)
    /// around a single real sequence in row three.
    pub fn missing_tokens_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/csv/missing_tokens.csv"),
            suffix: "csv",
            name: "missing_tokens",
        }
    }

    pub fn create_temp(&self) -> std::io::Result<(String, NamedTempFile)> {
        let temp = Builder::new()
            .suffix(&format!(".{}", self.suffix))
            .tempfile()?;

        fs::write(&temp, self.filebinary)?;
        let path = temp.path().to_string_lossy().into_owned();

        Ok((path, temp))
    }

    /// Write the file as `<name>.<suffix>` inside `dir`.
    ///
    /// Use this when the program under test derives sibling paths from its input.
    pub fn create_in(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let path = dir.join(format!("{}.{}", self.name, self.suffix));
        fs::write(&path, self.filebinary)?;
        Ok(path)
    }
}
