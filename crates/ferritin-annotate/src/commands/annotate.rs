use anyhow::Context;
use ferritin_annotate::{
    add_features_to_dataframe, parse_quantities, AnnotateOptions, OverwritePolicy, StdinConfirm,
};
use ferritin_io::{default_output_path, read_csv, write_csv};
use log::info;
use std::path::PathBuf;

pub fn execute(
    input: PathBuf,
    output: Option<PathBuf>,
    sequence_colname: String,
    quantities: Option<Vec<String>>,
) -> anyhow::Result<()> {
    let output = output.unwrap_or_else(|| default_output_path(&input));
    let df = read_csv(&input)?;
    info!("loaded {} rows from {}", df.height(), input.display());

    // the CLI never prompts; colliding columns are replaced
    let options = AnnotateOptions::builder()
        .sequence_colname(sequence_colname)
        .maybe_quantities(quantities.map(parse_quantities))
        .overwrite(OverwritePolicy::Overwrite)
        .build();

    let mut annotated = add_features_to_dataframe(&df, &options, &mut StdinConfirm)?.into_frame();
    write_csv(&mut annotated, &output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!("Output saved to {}", output.display());
    Ok(())
}
