//! Chromosome and reference-assembly naming
//!
//! Chromosome names arrive in many spellings (`chr7`, `7`, `chrM`, `M`,
//! `mt`); chain files and vendor SNP exports disagree with each other and
//! with themselves. [`chromosome`] folds them to one canonical form, which
//! is applied both when a chain file is parsed and on every lookup key, so
//! callers may pass any spelling.
//!
//! | Input            | Canonical |
//! |------------------|-----------|
//! | `chr7`, `Chr7`   | `7`       |
//! | `x`, `chrX`      | `X`       |
//! | `M`, `chrM`, `mt`| `MT`      |

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LiftError;

/// Normalize a chromosome name to its canonical form
///
/// Strips a leading `chr` prefix (any case), uppercases the remainder, and
/// aliases the mitochondrial `M` to `MT`.
///
/// # Examples
///
/// ```
/// use ferro_liftover::names::chromosome;
///
/// assert_eq!(chromosome("chr7"), "7");
/// assert_eq!(chromosome("chrM"), "MT");
/// assert_eq!(chromosome("x"), "X");
/// ```
pub fn chromosome(name: &str) -> String {
    let trimmed = name.trim();
    let stripped = if trimmed.len() >= 3 && trimmed[..3].eq_ignore_ascii_case("chr") {
        &trimmed[3..]
    } else {
        trimmed
    };
    let upper = stripped.to_ascii_uppercase();
    if upper == "M" {
        "MT".to_string()
    } else {
        upper
    }
}

/// Genome build/assembly version
///
/// The closed set of human builds chain data is published against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GenomeBuild {
    /// NCBI36 / hg18
    NCBI36,
    /// GRCh37 / hg19
    GRCh37,
    /// GRCh38 / hg38
    #[default]
    GRCh38,
    /// T2T-CHM13v2.0
    #[serde(rename = "T2T-CHM13v2.0")]
    T2TChm13v2,
}

impl GenomeBuild {
    /// Last base of pseudoautosomal region 1 on the X chromosome
    /// (1-based, inclusive). Positions on X at or below this boundary lie
    /// in PAR1; the assembly moves it with every release.
    pub fn par1_end(&self) -> i64 {
        match self {
            GenomeBuild::NCBI36 => 2_709_520,
            GenomeBuild::GRCh37 => 2_699_520,
            GenomeBuild::GRCh38 => 2_781_479,
            GenomeBuild::T2TChm13v2 => 2_394_410,
        }
    }
}

impl std::fmt::Display for GenomeBuild {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenomeBuild::NCBI36 => write!(f, "NCBI36"),
            GenomeBuild::GRCh37 => write!(f, "GRCh37"),
            GenomeBuild::GRCh38 => write!(f, "GRCh38"),
            GenomeBuild::T2TChm13v2 => write!(f, "T2T-CHM13v2.0"),
        }
    }
}

impl FromStr for GenomeBuild {
    type Err = LiftError;

    /// Resolve a build name from its canonical form or a common alias
    ///
    /// Accepts, case-insensitively: `NCBI36`/`hg18`, `GRCh37`/`hg19`,
    /// `GRCh38`/`hg38`, `T2T-CHM13v2.0`/`chm13`/`t2t`. Anything else is an
    /// [`LiftError::UnknownBuild`]; the set of builds is closed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NCBI36" | "HG18" => Ok(GenomeBuild::NCBI36),
            "GRCH37" | "HG19" => Ok(GenomeBuild::GRCh37),
            "GRCH38" | "HG38" => Ok(GenomeBuild::GRCh38),
            "T2T-CHM13V2.0" | "CHM13" | "T2T" => Ok(GenomeBuild::T2TChm13v2),
            _ => Err(LiftError::UnknownBuild {
                name: s.to_string(),
            }),
        }
    }
}

/// Strand orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Strand {
    #[serde(rename = "+")]
    #[default]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strand::Plus => write!(f, "+"),
            Strand::Minus => write!(f, "-"),
        }
    }
}

impl FromStr for Strand {
    type Err = LiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Plus),
            "-" => Ok(Strand::Minus),
            _ => Err(LiftError::InvalidStrand {
                value: s.to_string(),
            }),
        }
    }
}
