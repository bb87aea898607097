//! ferritin-cider
//!
//! Sequence-level biophysical descriptors for intrinsically disordered proteins.
//!
//! - charge composition (FCR, NCPR, fraction positive/negative)
//! - hydropathy on the Kyte-Doolittle and Uversky scales
//! - polyproline-II propensity (Hilser scale)
//! - isoelectric point
//! - charge patterning: kappa (Das & Pappu 2013) and Omega (Martin et al. 2016)
//!
//! ```ignore
//! use ferritin_cider::SequenceParameters;
//! let params = SequenceParameters::new("MEEPQSDPSVEPPLSQETFSDLWKLL")?;
//! println!("kappa: {}", params.kappa());
//! ```
mod charge;
mod error;
mod patterning;
mod residues;
mod sequence;

pub use error::SequenceError;
pub use patterning::{BLOB_SIZES, PatternLabel};
pub use residues::AminoAcid;
pub use sequence::SequenceParameters;
