use super::commands;
use clap::Parser;
use std::path::PathBuf;

/// Add sequence descriptors to a CSV of protein sequences.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input CSV with a header row.
    input_csv: PathBuf,

    /// Output CSV. Defaults to `<input stem>_with_localcider.csv` next to the input.
    #[arg(long = "output_csv", alias = "output-csv")]
    output_csv: Option<PathBuf>,

    /// Column holding the sequences.
    #[arg(long = "sequence_colname", alias = "sequence-colname", default_value = "sequence")]
    sequence_colname: String,

    /// Descriptors to compute, by output column name. All of them when omitted.
    #[arg(long, num_args = 1..)]
    quantities: Option<Vec<String>>,
}

impl Cli {
    pub fn execute(self) -> anyhow::Result<()> {
        commands::annotate::execute(
            self.input_csv,
            self.output_csv,
            self.sequence_colname,
            self.quantities,
        )
    }
}
