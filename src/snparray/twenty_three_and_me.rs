//! 23andMe raw-data codec.
//!
//! 23andMe exports open with a block of `#` comments; the last comment
//! line is the column header (`# rsid  chromosome  position  genotype`),
//! followed by tab-separated rows. Coordinates are GRCh37.

use std::collections::HashMap;
use std::io::{BufRead, Lines};

use crate::error::LiftError;
use crate::names::{self, GenomeBuild};

use super::{column_map, field, parse_position, Snp, SnpReader};

/// No-call marker in the genotype column.
const NO_CALL: &str = "--";

#[derive(Debug)]
pub struct TwentyThreeAndMeReader<R> {
    lines: Lines<R>,
    columns: HashMap<String, usize>,
    /// First data line, consumed while scanning for the header comment.
    pending: Option<String>,
}

impl<R: BufRead> TwentyThreeAndMeReader<R> {
    /// Read past the comment block and map the columns named by its last
    /// line.
    pub fn open(reader: R) -> Result<Self, LiftError> {
        let mut lines = reader.lines();
        let mut last_comment: Option<String> = None;
        let mut pending = None;

        for line in lines.by_ref() {
            let line = line.map_err(LiftError::from)?;
            if line.starts_with('#') {
                last_comment = Some(line);
                continue;
            }
            pending = Some(line);
            break;
        }

        let header = last_comment.ok_or_else(|| LiftError::UnknownFormat {
            msg: "23andMe column header comment not found".to_string(),
        })?;
        let columns = column_map(header.trim_start_matches('#'), '\t');

        Ok(Self {
            lines,
            columns,
            pending,
        })
    }

    fn next_line(&mut self) -> Result<Option<String>, LiftError> {
        if let Some(line) = self.pending.take() {
            return Ok(Some(line));
        }
        match self.lines.next() {
            Some(line) => Ok(Some(line.map_err(LiftError::from)?)),
            None => Ok(None),
        }
    }
}

impl<R: BufRead> SnpReader for TwentyThreeAndMeReader<R> {
    fn genome_build(&self) -> GenomeBuild {
        GenomeBuild::GRCh37
    }

    fn read(&mut self) -> Result<Option<Snp>, LiftError> {
        loop {
            let line = match self.next_line()? {
                Some(line) => line,
                None => return Ok(None),
            };
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < self.columns.len() {
                return Err(LiftError::UnknownFormat {
                    msg: format!(
                        "23andMe row has {} columns, expected {}",
                        fields.len(),
                        self.columns.len()
                    ),
                });
            }

            let genotype = field(&fields, &self.columns, "genotype", "23andMe")?;
            if genotype == NO_CALL {
                continue;
            }

            return Ok(Some(Snp {
                rsid: field(&fields, &self.columns, "rsid", "23andMe")?.to_string(),
                chromosome: names::chromosome(field(
                    &fields,
                    &self.columns,
                    "chromosome",
                    "23andMe",
                )?),
                position: parse_position(field(&fields, &self.columns, "position", "23andMe")?)?,
                genotype: genotype.to_string(),
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "\
# This data file generated by 23andMe at: Sat Feb 10 10:18:38 2024
#
# Below is a text version of your data.  Fields are TAB-separated.
# rsid\tchromosome\tposition\tgenotype
rs548049170\t1\t69869\tTT
rs9283150\t1\t565508\tAA
rs116587930\t1\t727841\t--
rs11240777\t1\t798959\tAG
";

    #[test]
    fn test_reads_called_snps_in_order() {
        let mut reader = TwentyThreeAndMeReader::open(EXPORT.as_bytes()).unwrap();
        assert_eq!(reader.genome_build(), GenomeBuild::GRCh37);

        let snp = reader.read().unwrap().unwrap();
        assert_eq!(snp.rsid, "rs548049170");
        assert_eq!(snp.chromosome, "1");
        assert_eq!(snp.position, 69869);
        assert_eq!(snp.genotype, "TT");

        let snp = reader.read().unwrap().unwrap();
        assert_eq!(snp.rsid, "rs9283150");
        assert_eq!(snp.position, 565508);
    }

    #[test]
    fn test_skips_no_calls_and_ends_cleanly() {
        let mut reader = TwentyThreeAndMeReader::open(EXPORT.as_bytes()).unwrap();
        let mut rsids = Vec::new();
        while let Some(snp) = reader.read().unwrap() {
            rsids.push(snp.rsid);
        }
        assert!(!rsids.contains(&"rs116587930".to_string()));
        assert_eq!(rsids.len(), 3);
        // Repeated reads at the end stay None.
        assert!(reader.read().unwrap().is_none());
    }

    #[test]
    fn test_normalizes_chromosome_names() {
        let data = "# rsid\tchromosome\tposition\tgenotype\nrs100\tchrM\t150\tA\n";
        let mut reader = TwentyThreeAndMeReader::open(data.as_bytes()).unwrap();
        assert_eq!(reader.read().unwrap().unwrap().chromosome, "MT");
    }

    #[test]
    fn test_missing_header_comment() {
        let err = TwentyThreeAndMeReader::open("rs1\t1\t100\tAA\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LiftError::UnknownFormat { .. }));
    }

    #[test]
    fn test_short_row_is_error() {
        let data = "# rsid\tchromosome\tposition\tgenotype\nrs1\t1\t100\n";
        let mut reader = TwentyThreeAndMeReader::open(data.as_bytes()).unwrap();
        assert!(reader.read().is_err());
    }

    #[test]
    fn test_bad_position_is_error() {
        let data = "# rsid\tchromosome\tposition\tgenotype\nrs1\t1\tabc\tAA\n";
        let mut reader = TwentyThreeAndMeReader::open(data.as_bytes()).unwrap();
        let err = reader.read().unwrap_err();
        assert!(matches!(err, LiftError::InvalidCoordinates { .. }));
    }
}
