//! Henderson-Hasselbalch charge model and isoelectric point.
use crate::residues::AminoAcid;

const PKA_NTERM: f64 = 8.6;
const PKA_CTERM: f64 = 3.6;

#[rustfmt::skip]
/// Side-chain pKa and sign (+1 basic, -1 acidic) for ionizable residues.
fn side_chain_pka(aa: AminoAcid) -> Option<(f64, f64)> {
    match aa {
        AminoAcid::LYS => Some((10.8,  1.0)),
        AminoAcid::ARG => Some((12.5,  1.0)),
        AminoAcid::HIS => Some(( 6.5,  1.0)),
        AminoAcid::ASP => Some(( 3.9, -1.0)),
        AminoAcid::GLU => Some(( 4.1, -1.0)),
        AminoAcid::CYS => Some(( 8.5, -1.0)),
        AminoAcid::TYR => Some((10.1, -1.0)),
        _ => None,
    }
}

fn partial_charge(pka: f64, sign: f64, ph: f64) -> f64 {
    if sign > 0.0 {
        1.0 / (1.0 + 10f64.powf(ph - pka))
    } else {
        -1.0 / (1.0 + 10f64.powf(pka - ph))
    }
}

/// Net charge of the chain (termini included) at the given pH.
pub(crate) fn net_charge_at_ph(residues: &[AminoAcid], ph: f64) -> f64 {
    let termini = partial_charge(PKA_NTERM, 1.0, ph) + partial_charge(PKA_CTERM, -1.0, ph);
    residues
        .iter()
        .filter_map(|aa| side_chain_pka(*aa))
        .map(|(pka, sign)| partial_charge(pka, sign, ph))
        .sum::<f64>()
        + termini
}

/// Bisection for the pH of zero net charge. Net charge decreases monotonically with pH.
pub(crate) fn isoelectric_point(residues: &[AminoAcid]) -> f64 {
    let (mut lo, mut hi) = (0.0f64, 14.0f64);
    while hi - lo > 1e-4 {
        let mid = 0.5 * (lo + hi);
        if net_charge_at_ph(residues, mid) > 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}
