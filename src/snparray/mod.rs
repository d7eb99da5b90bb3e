//! Readers for consumer SNP-array exports.
//!
//! Direct-to-consumer testing services (23andMe, AncestryDNA, MyHeritage,
//! FTDNA) publish raw genotype downloads in near-identical tabular
//! formats that differ just enough to need separate codecs. [`open`]
//! sniffs the first line of a stream and returns a lazy [`SnpReader`] for
//! the matching format:
//!
//! | Codec       | Detected by |
//! |-------------|-------------|
//! | 23andMe     | first line mentions `23andMe` |
//! | AncestryDNA | first line mentions `AncestryDNA` |
//! | generic CSV | first line has commas and no tabs |
//! | generic TSV | first line has tabs |
//!
//! Rows whose genotype is a no-call (`--`, or `00` for allele pairs) are
//! skipped by every codec. Fields are split on the delimiter without
//! quoting rules; vendor exports do not quote.
//!
//! Inputs are expected to be decompressed already; pair with
//! [`crate::compress::decompress`] for `.gz`/`.zip`-style downloads.
//!
//! # Example
//!
//! ```
//! use ferro_liftover::snparray;
//!
//! let data = "\
//! ## This data file generated by 23andMe at: Sat Feb 10 10:00:00 2024
//! ## rsid\tchromosome\tposition\tgenotype
//! rs548049170\t1\t69869\tTT
//! ";
//! let mut reader = snparray::open(data.as_bytes())?;
//! let snp = reader.read()?.unwrap();
//! assert_eq!(snp.rsid, "rs548049170");
//! assert_eq!(snp.position, 69869);
//! # Ok::<(), ferro_liftover::LiftError>(())
//! ```

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Cursor, Lines, Read};

use serde::{Deserialize, Serialize};

use crate::error::LiftError;
use crate::names::{self, GenomeBuild};

pub mod ancestry_dna;
pub mod generic_csv;
pub mod generic_tsv;
pub mod twenty_three_and_me;

pub use ancestry_dna::AncestryDnaReader;
pub use generic_csv::GenericCsvReader;
pub use generic_tsv::GenericTsvReader;
pub use twenty_three_and_me::TwentyThreeAndMeReader;

/// Bytes sniffed from the head of a stream to pick a codec.
const PEEK_LEN: usize = 1024;

/// One genotyped marker from an array export.
///
/// The chromosome is canonical (see [`crate::names::chromosome`]); the
/// position stays in whatever build the vendor declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snp {
    /// dbSNP identifier, e.g. `rs3131972`.
    pub rsid: String,
    /// Canonical chromosome name.
    pub chromosome: String,
    /// 1-based position in the declared build.
    pub position: i64,
    /// Called genotype, e.g. `AA` or `AG`.
    pub genotype: String,
}

/// A lazy reader over one SNP-array file.
pub trait SnpReader {
    /// The reference assembly the file's coordinates are expressed in.
    fn genome_build(&self) -> GenomeBuild;

    /// Read the next called SNP; `Ok(None)` at end of input.
    fn read(&mut self) -> Result<Option<Snp>, LiftError>;

    /// Iterate the remaining SNPs.
    fn records(&mut self) -> Records<'_, Self>
    where
        Self: Sized,
    {
        Records { reader: self }
    }
}

impl std::fmt::Debug for dyn SnpReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnpReader").finish_non_exhaustive()
    }
}

impl SnpReader for Box<dyn SnpReader> {
    fn genome_build(&self) -> GenomeBuild {
        (**self).genome_build()
    }

    fn read(&mut self) -> Result<Option<Snp>, LiftError> {
        (**self).read()
    }
}

/// Iterator over a reader's remaining SNPs.
pub struct Records<'a, R> {
    reader: &'a mut R,
}

impl<R: SnpReader> Iterator for Records<'_, R> {
    type Item = Result<Snp, LiftError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read().transpose()
    }
}

/// Open an array export of unknown vendor format.
///
/// Peeks at the head of the stream, matches it against the known codecs
/// in order, and returns the first reader that recognizes it.
///
/// # Errors
///
/// [`LiftError::UnknownFormat`] when no codec matches.
pub fn open<R: Read + 'static>(mut reader: R) -> Result<Box<dyn SnpReader>, LiftError> {
    let mut head = Vec::with_capacity(PEEK_LEN);
    reader
        .by_ref()
        .take(PEEK_LEN as u64)
        .read_to_end(&mut head)?;

    let first_line = String::from_utf8_lossy(&head)
        .lines()
        .next()
        .unwrap_or("")
        .to_string();

    let stitched = BufReader::new(Cursor::new(head).chain(reader));

    if first_line.contains("23andMe") {
        Ok(Box::new(TwentyThreeAndMeReader::open(stitched)?))
    } else if first_line.contains("AncestryDNA") {
        Ok(Box::new(AncestryDnaReader::open(stitched)?))
    } else if first_line.contains(',') && !first_line.contains('\t') {
        Ok(Box::new(GenericCsvReader::open(stitched)?))
    } else if first_line.contains('\t') {
        Ok(Box::new(GenericTsvReader::open(stitched)?))
    } else {
        Err(LiftError::UnknownFormat {
            msg: "no codec matches the file header".to_string(),
        })
    }
}

/// Build a lowercased column-name -> index map from a header line.
pub(crate) fn column_map(header: &str, delimiter: char) -> HashMap<String, usize> {
    header
        .split(delimiter)
        .enumerate()
        .map(|(i, name)| (name.trim().to_lowercase(), i))
        .collect()
}

/// Fetch a named field from a split row.
pub(crate) fn field<'a>(
    fields: &[&'a str],
    columns: &HashMap<String, usize>,
    name: &str,
    format: &str,
) -> Result<&'a str, LiftError> {
    columns
        .get(name)
        .and_then(|&i| fields.get(i).copied())
        .ok_or_else(|| LiftError::MissingColumn {
            column: name.to_string(),
            format: format.to_string(),
        })
}

/// Parse a row's position column.
pub(crate) fn parse_position(value: &str) -> Result<i64, LiftError> {
    value
        .parse::<i64>()
        .map_err(|_| LiftError::InvalidCoordinates {
            msg: format!("invalid SNP position: '{}'", value),
        })
}

/// Row engine shared by the generic delimited codecs: a header line names
/// the columns, `result` carries the genotype.
#[derive(Debug)]
pub(crate) struct DelimitedRows<R> {
    lines: Lines<R>,
    columns: HashMap<String, usize>,
    delimiter: char,
    format: &'static str,
}

impl<R: BufRead> DelimitedRows<R> {
    pub(crate) fn open(
        reader: R,
        delimiter: char,
        format: &'static str,
    ) -> Result<Self, LiftError> {
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
                        msg: format!("{} header line not found", format),
                    })
                }
            }
        };

        Ok(Self {
            columns: column_map(&header, delimiter),
            lines,
            delimiter,
            format,
        })
    }

    pub(crate) fn read_snp(&mut self) -> Result<Option<Snp>, LiftError> {
        loop {
            let line = match self.lines.next() {
                Some(line) => line.map_err(LiftError::from)?,
                None => return Ok(None),
            };
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split(self.delimiter).collect();
            if fields.len() < self.columns.len() {
                return Err(LiftError::UnknownFormat {
                    msg: format!(
                        "{} row has {} columns, expected {}",
                        self.format,
                        fields.len(),
                        self.columns.len()
                    ),
                });
            }

            let genotype = field(&fields, &self.columns, "result", self.format)?;
            if genotype == "--" || genotype == "00" {
                continue;
            }

            return Ok(Some(Snp {
                rsid: field(&fields, &self.columns, "rsid", self.format)?.to_string(),
                chromosome: names::chromosome(field(
                    &fields,
                    &self.columns,
                    "chromosome",
                    self.format,
                )?),
                position: parse_position(field(&fields, &self.columns, "position", self.format)?)?,
                genotype: genotype.to_string(),
            }));
        }
    }
}
