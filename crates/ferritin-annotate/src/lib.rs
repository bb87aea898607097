//! ferritin-annotate
//!
//! - compute sequence descriptors for every row of a table.
//! - merge the descriptors back into the table, keyed on the sequence column.
//! - CLI to handle the above for CSV files.
//!
mod error;
mod features;
mod merge;
mod table;

pub use error::AnnotateError;
pub use features::{get_features, parse_quantities, FeatureRecord, FeatureValue, Quantity};
pub use merge::{
    add_features_to_dataframe, AnnotateOptions, Annotated, Annotation, ConfirmOverwrite,
    OverwritePolicy, PromptConfirm, StdinConfirm,
};
pub use table::FeatureTable;
