//! Merge computed features back into the source table.
//!
//! The merge is a left join on the sequence column against a deduplicated
//! `FeatureTable`: row order and row count of the source are preserved and
//! rows without a valid sequence receive nulls. Feature columns that already
//! exist in the source are dropped and re-appended with the new values.
use crate::error::AnnotateError;
use crate::features::Quantity;
use crate::table::FeatureTable;
use bon::Builder;
use ferritin_cider::SequenceParameters;
use log::{info, warn};
use polars::prelude::*;
use std::collections::{BTreeSet, HashSet};
use std::io::{BufRead, Write};

/// What to do when computed columns collide with existing ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverwritePolicy {
    /// Replace the existing columns, with a warning.
    #[default]
    Overwrite,
    /// Ask through `ConfirmOverwrite` before replacing anything.
    Ask,
}

/// Decides whether colliding columns may be overwritten.
pub trait ConfirmOverwrite {
    fn confirm(&mut self, columns: &[String]) -> std::io::Result<bool>;
}

/// y/n prompt read from `input`, written to `output`. Only `y` (any case, surrounding
/// whitespace ignored) confirms; end of input declines.
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> ConfirmOverwrite for PromptConfirm<R, W> {
    fn confirm(&mut self, columns: &[String]) -> std::io::Result<bool> {
        write!(
            self.output,
            "Columns {columns:?} already exist in DataFrame. Overwrite? (y/n): "
        )?;
        self.output.flush()?;
        let mut response = String::new();
        self.input.read_line(&mut response)?;
        Ok(response.trim().eq_ignore_ascii_case("y"))
    }
}

/// Interactive y/n prompt on stdin.
pub struct StdinConfirm;

impl ConfirmOverwrite for StdinConfirm {
    fn confirm(&mut self, columns: &[String]) -> std::io::Result<bool> {
        PromptConfirm::new(std::io::stdin().lock(), std::io::stdout()).confirm(columns)
    }
}

#[derive(Debug, Clone, Builder)]
pub struct AnnotateOptions {
    /// Column holding the sequences; the merge key.
    #[builder(default = String::from("sequence"), into)]
    pub sequence_colname: String,
    /// Descriptors to compute. `None` computes all of them.
    pub quantities: Option<Vec<Quantity>>,
    #[builder(default)]
    pub overwrite: OverwritePolicy,
}

impl Default for AnnotateOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Debug, Clone)]
pub struct Annotated {
    pub frame: DataFrame,
    /// Source columns replaced by computed values.
    pub overwritten: Vec<String>,
    /// Rows whose sequence cell was null, empty or invalid.
    pub skipped: usize,
    pub unique_sequences: usize,
}

#[derive(Debug, Clone)]
pub enum Annotation {
    Merged(Annotated),
    /// The overwrite prompt was declined; the source frame is returned as-is.
    Cancelled(DataFrame),
}

impl Annotation {
    pub fn into_frame(self) -> DataFrame {
        match self {
            Self::Merged(annotated) => annotated.frame,
            Self::Cancelled(frame) => frame,
        }
    }
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }
}

/// Compute features for every row of `df` and merge them in on `options.sequence_colname`.
pub fn add_features_to_dataframe(
    df: &DataFrame,
    options: &AnnotateOptions,
    confirm: &mut dyn ConfirmOverwrite,
) -> Result<Annotation, AnnotateError> {
    let key = options.sequence_colname.as_str();
    if df.get_column_index(key).is_none() {
        return Err(AnnotateError::MissingColumn(key.to_string()));
    }

    // non-string cells become their text form and then fail residue validation
    let key_column = df.column(key)?.cast(&DataType::String)?;
    let cells: Vec<Option<&str>> = key_column.as_materialized_series().str()?.into_iter().collect();

    let table = FeatureTable::from_sequences(cells.iter().copied(), options.quantities.as_deref());
    info!(
        "computed features for {} unique sequences ({} of {} rows skipped)",
        table.len(),
        table.skipped(),
        cells.len()
    );

    let existing: HashSet<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let overlapping: Vec<String> = table
        .columns()
        .into_iter()
        .filter(|name| name != key && existing.contains(name))
        .collect();

    if !overlapping.is_empty() {
        match options.overwrite {
            OverwritePolicy::Overwrite => {
                warn!("Columns {overlapping:?} already exist in DataFrame. They will be overwritten.");
            }
            OverwritePolicy::Ask => {
                if !confirm.confirm(&overlapping)? {
                    info!("Operation cancelled.");
                    return Ok(Annotation::Cancelled(df.clone()));
                }
            }
        }
    }

    check_consistency(&cells, &table)?;

    let mut frame = df.clone();
    for name in &overlapping {
        frame.drop_in_place(name)?;
    }
    let rows: Vec<Option<usize>> = cells
        .iter()
        .map(|cell| cell.and_then(|sequence| table.position(sequence)))
        .collect();
    for quantity in table.quantities() {
        frame.with_column(table.gather(*quantity, &rows))?;
    }

    Ok(Annotation::Merged(Annotated {
        frame,
        overwritten: overlapping,
        skipped: table.skipped(),
        unique_sequences: table.len(),
    }))
}

/// Every valid input sequence must map to exactly one processed sequence and vice-versa.
fn check_consistency(cells: &[Option<&str>], table: &FeatureTable) -> Result<(), AnnotateError> {
    let input: BTreeSet<&str> = cells
        .iter()
        .flatten()
        .copied()
        .filter(|sequence| SequenceParameters::new(sequence).is_ok())
        .collect();
    let processed: BTreeSet<&str> = table.sequences().collect();
    if input != processed || processed.len() != table.len() {
        return Err(AnnotateError::SequenceMismatch {
            input: input.len(),
            processed: processed.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::get_features;
    use approx::assert_relative_eq;

    struct Answer(bool, usize);

    impl ConfirmOverwrite for Answer {
        fn confirm(&mut self, _columns: &[String]) -> std::io::Result<bool> {
            self.1 += 1;
            Ok(self.0)
        }
    }

    fn names(df: &DataFrame) -> Vec<String> {
        df.get_column_names().iter().map(|s| s.to_string()).collect()
    }

    fn floats(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
        df.column(name)
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .collect()
    }

    fn ints(df: &DataFrame, name: &str) -> Vec<Option<i64>> {
        df.column(name)
            .unwrap()
            .as_materialized_series()
            .i64()
            .unwrap()
            .into_iter()
            .collect()
    }

    fn sample() -> DataFrame {
        df!(
            "id" => &[1i64, 2, 3, 4],
            "sequence" => &[Some("KKKKKEEEEE"), None, Some("MKXB"), Some("KKKKKEEEEE")]
        )
        .unwrap()
    }

    fn merged(annotation: Annotation) -> Annotated {
        match annotation {
            Annotation::Merged(annotated) => annotated,
            Annotation::Cancelled(_) => panic!("unexpected cancellation"),
        }
    }

    #[test]
    fn test_left_join_semantics() {
        let df = sample();
        let annotated = merged(
            add_features_to_dataframe(&df, &AnnotateOptions::default(), &mut Answer(true, 0))
                .unwrap(),
        );
        let frame = &annotated.frame;
        assert_eq!(frame.height(), 4);
        assert_eq!(frame.width(), 2 + 15);
        assert_eq!(&names(frame)[..2], &["id", "sequence"]);
        assert_eq!(annotated.skipped, 2);
        assert_eq!(annotated.unique_sequences, 1);

        let expected = get_features("KKKKKEEEEE", None).unwrap();
        let kappa = floats(frame, "kappa");
        let expected_kappa = expected.get(Quantity::Kappa).and_then(|v| v.as_f64()).unwrap();
        assert_relative_eq!(kappa[0].unwrap(), expected_kappa);
        assert_eq!(kappa[1], None);
        assert_eq!(kappa[2], None);
        assert_eq!(kappa[3], kappa[0]);
        assert_eq!(ints(frame, "n pos residues"), vec![Some(5), None, None, Some(5)]);
    }

    #[test]
    fn test_quantity_subset() {
        let df = sample();
        let options = AnnotateOptions::builder()
            .quantities(vec![Quantity::Kappa, Quantity::FractionPositive])
            .build();
        let frame = add_features_to_dataframe(&df, &options, &mut Answer(true, 0))
            .unwrap()
            .into_frame();
        assert_eq!(
            names(&frame),
            vec!["id", "sequence", "fraction_positive", "kappa"]
        );
    }

    #[test]
    fn test_missing_column() {
        let df = sample();
        let options = AnnotateOptions::builder().sequence_colname("seq").build();
        let err = add_features_to_dataframe(&df, &options, &mut Answer(true, 0)).unwrap_err();
        assert!(matches!(err, AnnotateError::MissingColumn(ref c) if c == "seq"));
        assert_eq!(err.to_string(), "DataFrame must contain 'seq' column");
    }

    #[test]
    fn test_overwrite_collisions() {
        let df = df!(
            "seq" => &["KRKRK", "DEDED"],
            "kappa" => &[0.5, 0.5],
            "note" => &["a", "b"]
        )
        .unwrap();
        let options = AnnotateOptions::builder()
            .sequence_colname("seq")
            .quantities(vec![Quantity::Kappa, Quantity::CountNeg])
            .build();
        let annotated = merged(add_features_to_dataframe(&df, &options, &mut Answer(false, 0)).unwrap());
        assert_eq!(annotated.overwritten, vec!["kappa"]);
        // the stale column is dropped and the new one appended
        assert_eq!(names(&annotated.frame), vec!["seq", "note", "n neg residues", "kappa"]);
        assert_eq!(floats(&annotated.frame, "kappa"), vec![Some(-1.0), Some(-1.0)]);
        assert_eq!(ints(&annotated.frame, "n neg residues"), vec![Some(0), Some(3)]);
    }

    fn prompt(input: &str) -> (bool, String) {
        let mut output = Vec::new();
        let confirmed = PromptConfirm::new(input.as_bytes(), &mut output)
            .confirm(&["kappa".to_string()])
            .unwrap();
        (confirmed, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_prompt_answers() {
        let (confirmed, output) = prompt("y\n");
        assert!(confirmed);
        assert_eq!(
            output,
            "Columns [\"kappa\"] already exist in DataFrame. Overwrite? (y/n): "
        );
        assert!(prompt("  Y  \n").0);
        assert!(prompt("y").0);
        assert!(!prompt("n\n").0);
        assert!(!prompt("yes\n").0);
        assert!(!prompt("\n").0);
        assert!(!prompt("").0);
    }

    #[test]
    fn test_ask_through_prompt() {
        let df = df!("sequence" => &["KKEE"], "kappa" => &[0.25]).unwrap();
        let options = AnnotateOptions::builder()
            .overwrite(OverwritePolicy::Ask)
            .build();

        let mut output = Vec::new();
        let mut declined = PromptConfirm::new("n\n".as_bytes(), &mut output);
        let annotation = add_features_to_dataframe(&df, &options, &mut declined).unwrap();
        assert!(annotation.is_cancelled());
        assert!(String::from_utf8(output).unwrap().contains("Overwrite? (y/n)"));

        let mut accepted = PromptConfirm::new("Y\n".as_bytes(), Vec::new());
        let annotated = merged(add_features_to_dataframe(&df, &options, &mut accepted).unwrap());
        assert_eq!(annotated.overwritten, vec!["kappa"]);
    }

    #[test]
    fn test_ask_declined() {
        let df = df!("sequence" => &["KKEE"], "kappa" => &[0.25]).unwrap();
        let options = AnnotateOptions::builder().overwrite(OverwritePolicy::Ask).build();
        let mut answer = Answer(false, 0);
        let annotation = add_features_to_dataframe(&df, &options, &mut answer).unwrap();
        assert!(annotation.is_cancelled());
        assert_eq!(answer.1, 1);
        let frame = annotation.into_frame();
        assert!(frame.equals_missing(&df));
    }

    #[test]
    fn test_ask_accepted() {
        let df = df!("sequence" => &["KKEE"], "kappa" => &[0.25]).unwrap();
        let options = AnnotateOptions::builder().overwrite(OverwritePolicy::Ask).build();
        let mut answer = Answer(true, 0);
        let annotated = merged(add_features_to_dataframe(&df, &options, &mut answer).unwrap());
        assert_eq!(answer.1, 1);
        assert_eq!(annotated.overwritten, vec!["kappa"]);
        assert_ne!(floats(&annotated.frame, "kappa"), vec![Some(0.25)]);
    }

    #[test]
    fn test_no_prompt_without_collisions() {
        let df = sample();
        let options = AnnotateOptions::builder().overwrite(OverwritePolicy::Ask).build();
        let mut answer = Answer(false, 0);
        let annotation = add_features_to_dataframe(&df, &options, &mut answer).unwrap();
        assert!(!annotation.is_cancelled());
        assert_eq!(answer.1, 0);
    }

    #[test]
    fn test_non_string_column() {
        let df = df!("sequence" => &[123i64, 456]).unwrap();
        let annotated = merged(
            add_features_to_dataframe(&df, &AnnotateOptions::default(), &mut Answer(true, 0))
                .unwrap(),
        );
        assert_eq!(annotated.skipped, 2);
        assert_eq!(annotated.frame.height(), 2);
        assert_eq!(floats(&annotated.frame, "kappa"), vec![None, None]);
        // the source column keeps its type
        assert_eq!(
            annotated.frame.column("sequence").unwrap().dtype(),
            &DataType::Int64
        );
    }

    #[test]
    fn test_rerun_is_stable() {
        let df = sample();
        let options = AnnotateOptions::default();
        let first = add_features_to_dataframe(&df, &options, &mut Answer(true, 0))
            .unwrap()
            .into_frame();
        let second = merged(add_features_to_dataframe(&first, &options, &mut Answer(true, 0)).unwrap());
        assert_eq!(second.overwritten.len(), 15);
        assert!(second.frame.equals_missing(&first));
    }

    #[test]
    fn test_consistency_check() {
        let table = FeatureTable::from_sequences([Some("KKEE")], None);
        assert!(check_consistency(&[Some("KKEE"), None], &table).is_ok());
        let err = check_consistency(&[Some("KKEE"), Some("GSGS")], &table).unwrap_err();
        assert!(matches!(
            err,
            AnnotateError::SequenceMismatch {
                input: 2,
                processed: 1
            }
        ));
    }
}
