//! AncestryDNA raw-data codec.
//!
//! AncestryDNA exports carry `#` comments, then a tab-separated header
//! (`rsid chromosome position allele1 allele2`). The two allele columns
//! join into one genotype. Chromosomes are numeric codes throughout:
//! `23` is X, `24` is Y, `25` the X pseudoautosomal regions and `26`
//! mitochondrial. Coordinates are GRCh37.

use std::collections::HashMap;
use std::io::{BufRead, Lines};

use crate::error::LiftError;
use crate::names::{self, GenomeBuild};

use super::{column_map, field, parse_position, Snp, SnpReader};

/// No-call marker once the allele pair is joined.
const NO_CALL: &str = "00";

#[derive(Debug)]
pub struct AncestryDnaReader<R> {
    lines: Lines<R>,
    columns: HashMap<String, usize>,
}

impl<R: BufRead> AncestryDnaReader<R> {
    /// Skip the comment block and map the columns of the header line.
    pub fn open(reader: R) -> Result<Self, LiftError> {
        let mut lines = reader.lines();

        let header = loop {
            match lines.next() {
                Some(line) => {
                    let line = line.map_err(LiftError::from)?;
                    if line.starts_with('#') || line.trim().is_empty() {
                        continue;
                    }
                    break line;
                }
                None => {
                    return Err(LiftError::UnknownFormat {
                        msg: "AncestryDNA header line not found".to_string(),
                    })
                }
            }
        };

        Ok(Self {
            columns: column_map(&header, '\t'),
            lines,
        })
    }
}

impl<R: BufRead> SnpReader for AncestryDnaReader<R> {
    fn genome_build(&self) -> GenomeBuild {
        GenomeBuild::GRCh37
    }

    fn read(&mut self) -> Result<Option<Snp>, LiftError> {
        loop {
            let line = match self.lines.next() {
                Some(line) => line.map_err(LiftError::from)?,
                None => return Ok(None),
            };
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < self.columns.len() {
                return Err(LiftError::UnknownFormat {
                    msg: format!(
                        "AncestryDNA row has {} columns, expected {}",
                        fields.len(),
                        self.columns.len()
                    ),
                });
            }

            let genotype = format!(
                "{}{}",
                field(&fields, &self.columns, "allele1", "AncestryDNA")?,
                field(&fields, &self.columns, "allele2", "AncestryDNA")?
            );
            if genotype == NO_CALL {
                continue;
            }

            let position =
                parse_position(field(&fields, &self.columns, "position", "AncestryDNA")?)?;
            let chromosome = decode_chromosome(
                field(&fields, &self.columns, "chromosome", "AncestryDNA")?,
                position,
                GenomeBuild::GRCh37,
            );

            return Ok(Some(Snp {
                rsid: field(&fields, &self.columns, "rsid", "AncestryDNA")?.to_string(),
                chromosome,
                position,
                genotype,
            }));
        }
    }
}

/// Translate AncestryDNA's numeric chromosome codes.
///
/// Code 25 covers both X pseudoautosomal regions; which one a marker sits
/// in follows from its position against the build's PAR1 boundary.
fn decode_chromosome(chromosome: &str, position: i64, build: GenomeBuild) -> String {
    match chromosome {
        "23" => "X".to_string(),
        "24" => "Y".to_string(),
        "25" => if position <= build.par1_end() {
            "PAR1"
        } else {
            "PAR2"
        }
        .to_string(),
        "26" => "MT".to_string(),
        other => names::chromosome(other),
    }
}
