//! FASTA reading, writing and filtering.
//!
//! A FASTA file is a series of records: a `>` description line followed by
//! sequence lines. Reading uppercases and concatenates the sequence lines
//! and ignores blanks; writing wraps sequences at 80 columns. Reference
//! genomes are large, so [`read_filtered`] lets callers keep only the
//! records they want while streaming past the rest.
//!
//! Pair with [`crate::compress::decompress`] for `.fa.gz` inputs.

use std::io::{BufRead, BufReader, Read, Write};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::LiftError;

/// NCBI-style accession at the start of a description line,
/// e.g. `NC_000001.11`.
static NCBI_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z]{2}_[0-9]+\.[0-9]+)").unwrap());

/// A single FASTA record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// Description line, without the leading `>`.
    pub description: String,
    /// Uppercased sequence bases.
    pub values: Vec<u8>,
    index: usize,
}

impl Sequence {
    /// Position of this record in the file it was read from (0-based,
    /// counting every record whether or not a filter kept it).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Base at a 1-based position.
    pub fn get(&self, position: i64) -> Result<u8, LiftError> {
        if position < 1 || position > self.values.len() as i64 {
            return Err(LiftError::InvalidCoordinates {
                msg: format!("index out of range: {}", position),
            });
        }
        Ok(self.values[(position - 1) as usize])
    }

    /// Bases in a 1-based inclusive range.
    pub fn get_range(&self, start: i64, end: i64) -> Result<&[u8], LiftError> {
        let len = self.values.len() as i64;
        if start < 1 || start > len {
            return Err(LiftError::InvalidCoordinates {
                msg: format!("start index out of range: {}", start),
            });
        }
        if end < 1 || end > len {
            return Err(LiftError::InvalidCoordinates {
                msg: format!("end index out of range: {}", end),
            });
        }
        if start > end {
            return Err(LiftError::InvalidCoordinates {
                msg: format!("start index is greater than end index: {} > {}", start, end),
            });
        }
        Ok(&self.values[(start - 1) as usize..end as usize])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A predicate deciding whether a record is kept.
pub type Filter = Box<dyn Fn(&Sequence) -> bool>;

/// Keep records whose description starts with the given NCBI accession.
pub fn filter_by_id(id: &str) -> Filter {
    let id = id.to_string();
    Box::new(move |s: &Sequence| {
        NCBI_ID_PATTERN
            .captures(&s.description)
            .map(|c| c[1] == id)
            .unwrap_or(false)
    })
}

/// Keep the record at the given position in the file (0-based).
pub fn filter_by_index(index: usize) -> Filter {
    Box::new(move |s: &Sequence| s.index == index)
}

/// Read every record from a FASTA stream.
pub fn read<R: Read>(reader: R) -> Result<Vec<Sequence>, LiftError> {
    read_filtered(reader, &[])
}

/// Read the records matching any of the given filters.
///
/// An empty filter list keeps everything; otherwise a record is kept when
/// at least one filter matches. Records that fail every filter are still
/// counted for [`Sequence::index`].
pub fn read_filtered<R: Read>(reader: R, filters: &[Filter]) -> Result<Vec<Sequence>, LiftError> {
    let buf_reader = BufReader::new(reader);

    let mut sequences = Vec::new();
    let mut current: Option<Sequence> = None;
    let mut file_index = 0usize;

    let mut flush = |sequence: Option<Sequence>, kept: &mut Vec<Sequence>, index: &mut usize| {
        if let Some(sequence) = sequence {
            let keep = filters.is_empty() || filters.iter().any(|f| f(&sequence));
            if keep {
                kept.push(sequence);
            }
            *index += 1;
        }
    };

    for line in buf_reader.lines() {
        let line = line.map_err(LiftError::from)?;
        if line.is_empty() {
            continue;
        }

        if let Some(description) = line.strip_prefix('>') {
            flush(current.take(), &mut sequences, &mut file_index);
            current = Some(Sequence {
                description: description.to_string(),
                values: Vec::new(),
                index: file_index,
            });
        } else {
            // Sequence data before any header becomes an unnamed record.
            let sequence = current.get_or_insert_with(|| Sequence {
                description: String::new(),
                values: Vec::new(),
                index: file_index,
            });
            sequence
                .values
                .extend(line.as_bytes().iter().map(u8::to_ascii_uppercase));
        }
    }
    flush(current.take(), &mut sequences, &mut file_index);

    Ok(sequences)
}

/// Write records in FASTA format, wrapping sequences at 80 columns.
pub fn write<W: Write>(mut writer: W, sequences: &[Sequence]) -> Result<(), LiftError> {
    for sequence in sequences {
        writeln!(writer, ">{}", sequence.description).map_err(LiftError::from)?;
        for chunk in sequence.values.chunks(80) {
            writer.write_all(chunk).map_err(LiftError::from)?;
            writer.write_all(b"\n").map_err(LiftError::from)?;
        }
    }
    Ok(())
}
