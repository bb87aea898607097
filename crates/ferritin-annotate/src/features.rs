//! Feature dict
//!
//! The descriptor set computed for a single sequence. `Quantity` names double as
//! output column names, so their spelling is part of the file format.
use ferritin_cider::{SequenceError, SequenceParameters};
use log::warn;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

#[rustfmt::skip]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter)]
pub enum Quantity {
    #[strum(serialize = "isoelectric_point")]       IsoelectricPoint,
    #[strum(serialize = "n pos residues")]          CountPos,
    #[strum(serialize = "n neg residues")]          CountNeg,
    #[strum(serialize = "n neutral residues")]      CountNeut,
    #[strum(serialize = "net charge per residue")]  Ncpr,
    #[strum(serialize = "charge (n pos - n neg)")]  Charge,
    #[strum(serialize = "mean_net_charge")]         MeanNetCharge,
    #[strum(serialize = "fraction_positive")]       FractionPositive,
    #[strum(serialize = "fraction_negative")]       FractionNegative,
    #[strum(serialize = "fraction_expanding")]      FractionExpanding,
    #[strum(serialize = "uversky_hydropathy")]      UverskyHydropathy,
    #[strum(serialize = "mean_hydropathy")]         MeanHydropathy,
    #[strum(serialize = "PPII_propensity")]         PpiiPropensity,
    #[strum(serialize = "Omega")]                   Omega,
    #[strum(serialize = "kappa")]                   Kappa,
}

impl Quantity {
    /// Counts are stored as integers, everything else as floats.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::CountPos | Self::CountNeg | Self::CountNeut | Self::Charge
        )
    }

    pub fn compute(&self, params: &SequenceParameters) -> FeatureValue {
        match self {
            Self::IsoelectricPoint => FeatureValue::Float(params.isoelectric_point()),
            Self::CountPos => FeatureValue::Int(params.count_pos() as i64),
            Self::CountNeg => FeatureValue::Int(params.count_neg() as i64),
            Self::CountNeut => FeatureValue::Int(params.count_neut() as i64),
            Self::Ncpr => FeatureValue::Float(params.ncpr()),
            Self::Charge => {
                FeatureValue::Int(params.count_pos() as i64 - params.count_neg() as i64)
            }
            Self::MeanNetCharge => FeatureValue::Float(params.mean_net_charge()),
            Self::FractionPositive => FeatureValue::Float(params.fraction_positive()),
            Self::FractionNegative => FeatureValue::Float(params.fraction_negative()),
            Self::FractionExpanding => FeatureValue::Float(params.fraction_expanding()),
            Self::UverskyHydropathy => FeatureValue::Float(params.uversky_hydropathy()),
            Self::MeanHydropathy => FeatureValue::Float(params.mean_hydropathy()),
            Self::PpiiPropensity => FeatureValue::Float(params.ppii_propensity()),
            Self::Omega => FeatureValue::Float(params.omega()),
            Self::Kappa => FeatureValue::Float(params.kappa()),
        }
    }

    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FeatureValue {
    Int(i64),
    Float(f64),
}

impl FeatureValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Float(_) => None,
        }
    }
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
        }
    }
}

/// Descriptors for one sequence, in canonical `Quantity` order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    pub sequence: String,
    pub values: Vec<(Quantity, FeatureValue)>,
}

impl FeatureRecord {
    pub fn get(&self, quantity: Quantity) -> Option<FeatureValue> {
        self.values
            .iter()
            .find(|(q, _)| *q == quantity)
            .map(|(_, v)| *v)
    }
}

/// Compute the feature dict for `sequence`.
///
/// With `quantities`, only the listed descriptors are computed; the sequence is always kept.
pub fn get_features(
    sequence: &str,
    quantities: Option<&[Quantity]>,
) -> Result<FeatureRecord, SequenceError> {
    let params = SequenceParameters::new(sequence)?;
    let values = Quantity::iter()
        .filter(|q| quantities.map_or(true, |allowed| allowed.contains(q)))
        .map(|q| (q, q.compute(&params)))
        .collect();
    Ok(FeatureRecord {
        sequence: sequence.to_string(),
        values,
    })
}

/// Resolve user-supplied quantity names. Unknown names are skipped with a warning.
/// The result is deduplicated and in canonical order.
pub fn parse_quantities<I, S>(names: I) -> Vec<Quantity>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut quantities: Vec<Quantity> = names
        .into_iter()
        .filter_map(|name| {
            let name = name.as_ref();
            match Quantity::from_str(name) {
                Ok(q) => Some(q),
                Err(_) => {
                    warn!("Unknown quantity '{name}' ignored");
                    None
                }
            }
        })
        .collect();
    quantities.sort();
    quantities.dedup();
    quantities
}
