//! Sequence Parameters
//!
//! A validated amino-acid sequence and the descriptors computed from it.
//! Every descriptor is a pure function of the residue composition or order.
use crate::charge;
use crate::error::SequenceError;
use crate::patterning::{self, PatternLabel};
use crate::residues::AminoAcid;

#[derive(Debug, Clone, PartialEq)]
pub struct SequenceParameters {
    sequence: String,
    residues: Vec<AminoAcid>,
    n_pos: usize,
    n_neg: usize,
}

impl SequenceParameters {
    /// Parse a one-letter sequence. Lower-case residues are accepted.
    pub fn new(sequence: &str) -> Result<Self, SequenceError> {
        if sequence.is_empty() {
            return Err(SequenceError::Empty);
        }
        let residues = sequence
            .chars()
            .enumerate()
            .map(|(position, residue)| {
                AminoAcid::from_code1(residue)
                    .ok_or(SequenceError::InvalidResidue { residue, position })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let n_pos = residues.iter().filter(|aa| aa.charge() > 0).count();
        let n_neg = residues.iter().filter(|aa| aa.charge() < 0).count();
        Ok(Self {
            sequence: sequence.to_string(),
            residues,
            n_pos,
            n_neg,
        })
    }
    pub fn sequence(&self) -> &str {
        &self.sequence
    }
    pub fn residues(&self) -> &[AminoAcid] {
        &self.residues
    }
    pub fn len(&self) -> usize {
        self.residues.len()
    }
    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    fn fraction(&self, count: usize) -> f64 {
        count as f64 / self.len() as f64
    }
    fn mean_of(&self, f: impl Fn(&AminoAcid) -> f64) -> f64 {
        self.residues.iter().map(f).sum::<f64>() / self.len() as f64
    }

    // Charge composition ------------------------------------------------------------------------

    pub fn count_pos(&self) -> usize {
        self.n_pos
    }
    pub fn count_neg(&self) -> usize {
        self.n_neg
    }
    pub fn count_neut(&self) -> usize {
        self.len() - self.n_pos - self.n_neg
    }
    pub fn fraction_positive(&self) -> f64 {
        self.fraction(self.n_pos)
    }
    pub fn fraction_negative(&self) -> f64 {
        self.fraction(self.n_neg)
    }
    /// Fraction of charged residues.
    pub fn fcr(&self) -> f64 {
        self.fraction(self.n_pos + self.n_neg)
    }
    /// Net charge per residue.
    pub fn ncpr(&self) -> f64 {
        (self.n_pos as f64 - self.n_neg as f64) / self.len() as f64
    }
    pub fn mean_net_charge(&self) -> f64 {
        self.ncpr().abs()
    }
    /// Fraction of E, D, R, K and P.
    pub fn fraction_expanding(&self) -> f64 {
        self.fraction(self.residues.iter().filter(|aa| aa.is_expanding()).count())
    }
    pub fn isoelectric_point(&self) -> f64 {
        charge::isoelectric_point(&self.residues)
    }
    pub fn net_charge_at_ph(&self, ph: f64) -> f64 {
        charge::net_charge_at_ph(&self.residues, ph)
    }

    // Hydropathy and PPII -----------------------------------------------------------------------

    /// Mean Kyte-Doolittle hydropathy on a 0 to 9 scale.
    pub fn mean_hydropathy(&self) -> f64 {
        self.mean_of(AminoAcid::kd_shifted)
    }
    /// Mean Kyte-Doolittle hydropathy normalized to 0 to 1, as used by the Uversky plot.
    pub fn uversky_hydropathy(&self) -> f64 {
        self.mean_of(AminoAcid::kd_normalized)
    }
    pub fn ppii_propensity(&self) -> f64 {
        self.mean_of(AminoAcid::ppii)
    }

    // Patterning --------------------------------------------------------------------------------

    fn charge_labels(&self) -> Vec<PatternLabel> {
        self.residues
            .iter()
            .map(|aa| match aa.charge() {
                c if c > 0 => PatternLabel::Positive,
                c if c < 0 => PatternLabel::Negative,
                _ => PatternLabel::Neutral,
            })
            .collect()
    }
    fn omega_labels(&self) -> Vec<PatternLabel> {
        self.residues
            .iter()
            .map(|aa| {
                if aa.charge() != 0 || *aa == AminoAcid::PRO {
                    PatternLabel::Positive
                } else {
                    PatternLabel::Negative
                }
            })
            .collect()
    }
    /// Charge patterning δ for one blob size.
    pub fn delta(&self, blob: usize) -> f64 {
        patterning::delta(&self.charge_labels(), blob)
    }
    pub fn delta_max(&self, blob: usize) -> f64 {
        patterning::delta_max(&self.charge_labels(), blob)
    }
    /// kappa, or -1 when the sequence carries no pattern-able charge.
    pub fn kappa(&self) -> f64 {
        patterning::normalized_patterning(&self.charge_labels()).unwrap_or(-1.0)
    }
    /// Omega: patterning of charged residues and prolines against all others; -1 when undefined.
    pub fn omega(&self) -> f64 {
        patterning::normalized_patterning(&self.omega_labels()).unwrap_or(-1.0)
    }
}
