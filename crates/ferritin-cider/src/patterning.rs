//! Charge Patterning
//!
//! Blob-based patterning parameters shared by kappa and Omega.
//!
//! For a blob of `g` residues the asymmetry is `σ = (f+ - f-)² / (f+ + f-)`,
//! zero for a blob without labelled residues. `δ_g` is the mean squared
//! deviation of blob asymmetry from the whole-sequence asymmetry over every
//! sliding blob. The normalized parameter compares `δ` against `δmax`, the
//! largest `δ` over maximally segregated sequences of identical composition.
//! Block arrangements are not always the most patterned, so `δmax` is floored at
//! the sequence's own `δ` and the normalized value stays within 0 to 1.
//!
//! - kappa: `Positive` = K/R, `Negative` = D/E, everything else `Neutral`.
//! - Omega: `Positive` = K/R/D/E/P, `Negative` = everything else.
use itertools::{repeat_n, Itertools};

/// Blob lengths averaged over, as in Das & Pappu (2013).
pub const BLOB_SIZES: [usize; 2] = [5, 6];

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PatternLabel {
    Positive,
    Negative,
    Neutral,
}

fn composition(labels: &[PatternLabel]) -> (usize, usize, usize) {
    let counts = labels.iter().counts();
    let get = |label: PatternLabel| counts.get(&label).copied().unwrap_or(0);
    (
        get(PatternLabel::Positive),
        get(PatternLabel::Negative),
        get(PatternLabel::Neutral),
    )
}

fn sigma(pos: usize, neg: usize, len: usize) -> f64 {
    if pos + neg == 0 || len == 0 {
        return 0.0;
    }
    let fp = pos as f64 / len as f64;
    let fm = neg as f64 / len as f64;
    (fp - fm).powi(2) / (fp + fm)
}

/// δ for a single blob size. Sequences shorter than the blob are one blob, so δ = 0.
pub(crate) fn delta(labels: &[PatternLabel], blob: usize) -> f64 {
    let n = labels.len();
    if blob == 0 || n < blob {
        return 0.0;
    }
    let (pos_total, neg_total, _) = composition(labels);
    let global = sigma(pos_total, neg_total, n);

    let (mut pos, mut neg, _) = composition(&labels[..blob]);
    let mut total = (sigma(pos, neg, blob) - global).powi(2);
    for i in blob..n {
        match labels[i - blob] {
            PatternLabel::Positive => pos -= 1,
            PatternLabel::Negative => neg -= 1,
            PatternLabel::Neutral => {}
        }
        match labels[i] {
            PatternLabel::Positive => pos += 1,
            PatternLabel::Negative => neg += 1,
            PatternLabel::Neutral => {}
        }
        total += (sigma(pos, neg, blob) - global).powi(2);
    }
    total / (n - blob + 1) as f64
}

// [neutral x front][positive block][neutral x middle][negative block][neutral x end]
fn segregated(pos: usize, neg: usize, front: usize, middle: usize, end: usize) -> Vec<PatternLabel> {
    repeat_n(PatternLabel::Neutral, front)
        .chain(repeat_n(PatternLabel::Positive, pos))
        .chain(repeat_n(PatternLabel::Neutral, middle))
        .chain(repeat_n(PatternLabel::Negative, neg))
        .chain(repeat_n(PatternLabel::Neutral, end))
        .collect()
}

/// δmax for a single blob size: the largest δ over every segregated arrangement of this
/// composition, and never below δ of `labels` itself.
pub(crate) fn delta_max(labels: &[PatternLabel], blob: usize) -> f64 {
    let (pos, neg, neutral) = composition(labels);
    (0..=neutral)
        .flat_map(|front| (0..=neutral - front).map(move |end| (front, neutral - front - end, end)))
        .map(|(front, middle, end)| delta(&segregated(pos, neg, front, middle, end), blob))
        .fold(delta(labels, blob), f64::max)
}

/// Normalized patterning parameter averaged over `BLOB_SIZES`.
/// `None` when no arrangement of the composition can be patterned (δmax = 0).
pub(crate) fn normalized_patterning(labels: &[PatternLabel]) -> Option<f64> {
    let n_sizes = BLOB_SIZES.len() as f64;
    let delta_mean = BLOB_SIZES.iter().map(|&g| delta(labels, g)).sum::<f64>() / n_sizes;
    let delta_max_mean = BLOB_SIZES.iter().map(|&g| delta_max(labels, g)).sum::<f64>() / n_sizes;
    if delta_max_mean <= 0.0 {
        None
    } else {
        Some(delta_mean / delta_max_mean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn charge_labels(seq: &str) -> Vec<PatternLabel> {
        seq.chars()
            .map(|c| match c {
                'K' | 'R' => PatternLabel::Positive,
                'D' | 'E' => PatternLabel::Negative,
                _ => PatternLabel::Neutral,
            })
            .collect()
    }

    #[test]
    fn test_sigma() {
        assert_eq!(sigma(0, 0, 5), 0.0);
        assert_eq!(sigma(5, 0, 5), 1.0);
        assert_eq!(sigma(2, 2, 5), 0.0);
        assert_relative_eq!(sigma(1, 0, 5), 0.2);
    }

    #[test]
    fn test_delta_short_sequence() {
        let labels = charge_labels("KEK");
        assert_eq!(delta(&labels, 5), 0.0);
        assert_eq!(delta_max(&labels, 5), 0.0);
        assert_eq!(normalized_patterning(&labels), None);
    }

    #[test]
    fn test_segregated_is_maximal() {
        let labels = charge_labels("KKKKKEEEEE");
        let value = normalized_patterning(&labels).unwrap();
        assert_relative_eq!(value, 1.0, epsilon = 1e-9);
        // reversal and charge swap leave patterning unchanged
        let reversed = normalized_patterning(&charge_labels("EEEEEKKKKK")).unwrap();
        assert_relative_eq!(value, reversed, epsilon = 1e-9);
    }

    #[test]
    fn test_alternating_is_well_mixed() {
        let labels = charge_labels("EKEKEKEKEKEKEKEKEKEK");
        let value = normalized_patterning(&labels).unwrap();
        assert!(value < 0.1, "alternating kappa too high: {value}");
    }

    #[test]
    fn test_blocky_above_mixed() {
        let blocky = normalized_patterning(&charge_labels("KKKKKGGGGGEEEEE")).unwrap();
        let mixed = normalized_patterning(&charge_labels("KGEKGEKGEKGEKGE")).unwrap();
        assert!(blocky > mixed, "blocky {blocky} <= mixed {mixed}");
        assert!(blocky <= 1.0 + 1e-9);
    }

    #[test]
    fn test_segregated_candidates_bounded() {
        let labels = charge_labels("GGKKKGGEEEGG");
        for g in BLOB_SIZES {
            let max = delta_max(&labels, g);
            for a in 0..=6 {
                let candidate = segregated(3, 3, a, 6 - a, 0);
                assert!(delta(&candidate, g) <= max + 1e-12);
            }
        }
    }

    #[test]
    fn test_interior_charges_bounded() {
        for seq in ["KEEEEKK", "GGGKGGGEGGG", "GGKGGGGGGEGG"] {
            let value = normalized_patterning(&charge_labels(seq)).unwrap();
            assert!((0.0..=1.0 + 1e-9).contains(&value), "{seq}: {value}");
        }
    }

    #[test]
    fn test_bounded_for_every_short_sequence() {
        use PatternLabel::*;
        let alphabet = [Positive, Negative, Neutral];
        for len in 1..=9u32 {
            for code in 0..3usize.pow(len) {
                let labels: Vec<PatternLabel> = (0..len)
                    .scan(code, |rest, _| {
                        let label = alphabet[*rest % 3];
                        *rest /= 3;
                        Some(label)
                    })
                    .collect();
                if let Some(value) = normalized_patterning(&labels) {
                    assert!(
                        (0.0..=1.0 + 1e-9).contains(&value),
                        "{labels:?}: {value}"
                    );
                }
                for g in BLOB_SIZES {
                    assert!(delta(&labels, g) <= delta_max(&labels, g));
                }
            }
        }
    }

    #[test]
    fn test_uncharged_is_undefined() {
        assert_eq!(normalized_patterning(&charge_labels("GGGGGGGGGGSSSS")), None);
    }

    #[test]
    fn test_segregated_arrangement() {
        use PatternLabel::*;
        assert_eq!(
            segregated(2, 1, 1, 1, 0),
            vec![Neutral, Positive, Positive, Neutral, Negative]
        );
    }
}
