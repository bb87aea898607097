//! # Residue Tables
//!
//! Per-residue constants used by the sequence descriptors.
//!
//! - `kd`   - Kyte-Doolittle hydropathy (Kyte & Doolittle 1982)
//! - `ppii` - polyproline-II propensity, Hilser scale (Elam et al. 2013)
//! - `charge` - formal side-chain charge at neutral pH (K/R +1, D/E -1)
//!
use strum::{Display, EnumIter, EnumString};

macro_rules! define_amino_acids {
    ($($name:ident: $code3:expr, $code1:literal, $kd:expr, $ppii:expr, $charge:expr),* $(,)?) => {
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
        pub enum AminoAcid {
            $($name),*
        }

        impl AminoAcid {
            pub const fn code3(&self) -> &'static str {
                match self {
                    $(Self::$name => $code3),*
                }
            }
            pub const fn code1(&self) -> char {
                match self {
                    $(Self::$name => $code1),*
                }
            }
            /// Kyte-Doolittle hydropathy, range -4.5 to 4.5.
            pub const fn kd(&self) -> f64 {
                match self {
                    $(Self::$name => $kd),*
                }
            }
            pub const fn ppii(&self) -> f64 {
                match self {
                    $(Self::$name => $ppii),*
                }
            }
            pub const fn charge(&self) -> i8 {
                match self {
                    $(Self::$name => $charge),*
                }
            }
            /// Case-insensitive lookup from a one-letter code.
            pub fn from_code1(code: char) -> Option<Self> {
                match code.to_ascii_uppercase() {
                    $($code1 => Some(Self::$name),)*
                    _ => None,
                }
            }
        }
    }
}

#[rustfmt::skip]
define_amino_acids! {
    //   code3  code1   kd     ppii  charge
    ALA: "ALA", 'A',  1.8,  0.37,  0,
    ARG: "ARG", 'R', -4.5,  0.38,  1,
    ASN: "ASN", 'N', -3.5,  0.27,  0,
    ASP: "ASP", 'D', -3.5,  0.30, -1,
    CYS: "CYS", 'C',  2.5,  0.25,  0,
    GLN: "GLN", 'Q', -3.5,  0.53,  0,
    GLU: "GLU", 'E', -3.5,  0.42, -1,
    GLY: "GLY", 'G', -0.4,  0.13,  0,
    HIS: "HIS", 'H', -3.2,  0.20,  0,
    ILE: "ILE", 'I',  4.5,  0.39,  0,
    LEU: "LEU", 'L',  3.8,  0.24,  0,
    LYS: "LYS", 'K', -3.9,  0.56,  1,
    MET: "MET", 'M',  1.9,  0.36,  0,
    PHE: "PHE", 'F',  2.8,  0.17,  0,
    PRO: "PRO", 'P', -1.6,  1.00,  0,
    SER: "SER", 'S', -0.8,  0.24,  0,
    THR: "THR", 'T', -0.7,  0.32,  0,
    TRP: "TRP", 'W', -0.9,  0.25,  0,
    TYR: "TYR", 'Y', -1.3,  0.25,  0,
    VAL: "VAL", 'V',  4.2,  0.39,  0,
}

impl AminoAcid {
    /// Residues predicted to drive chain expansion: E, D, R, K, P.
    pub fn is_expanding(&self) -> bool {
        matches!(
            self,
            Self::GLU | Self::ASP | Self::ARG | Self::LYS | Self::PRO
        )
    }
    /// Kyte-Doolittle shifted onto a 0 to 9 scale.
    pub fn kd_shifted(&self) -> f64 {
        self.kd() + 4.5
    }
    /// Kyte-Doolittle normalized onto a 0 to 1 scale.
    pub fn kd_normalized(&self) -> f64 {
        self.kd_shifted() / 9.0
    }
}
