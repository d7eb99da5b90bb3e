//! UCSC chain file parsing and indexing.
//!
//! A chain file describes alignments between two genome assemblies as a
//! series of `chain` header lines, each followed by alignment block lines:
//!
//! ```text
//! chain score refName refSize refStrand refStart refEnd queryName querySize queryStrand queryStart queryEnd id
//! size refGap queryGap
//! size
//! ```
//!
//! A block line carries either three fields (an aligned block and the gaps
//! before the next block, one per coordinate space) or a single field (the
//! final block of the chain). Blank lines and `#` comments are ignored.
//!
//! Parsing builds a [`ChainFile`]: a two-level spatial index with one
//! interval tree of chains per reference chromosome and, inside every
//! chain, one interval tree over its alignment blocks keyed by
//! chain-relative reference offsets. The index is built in a single pass
//! and never mutated afterwards, so lookups may run concurrently.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compress;
use crate::error::LiftError;
use crate::interval::IntervalTree;
use crate::names::{self, Strand};

/// A single chain: one scored alignment between a reference region and a
/// query region.
///
/// Coordinates are 0-based and half-open. Reference and query names are
/// stored in canonical form (see [`crate::names::chromosome`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    /// Chain identifier, unique within a chain set.
    pub id: i64,
    /// Alignment score.
    pub score: i64,
    /// Reference chromosome name.
    pub ref_name: String,
    /// Reference chromosome size.
    pub ref_size: i64,
    /// Reference strand.
    pub ref_strand: Strand,
    /// Start of the aligned region on the reference (0-based).
    pub ref_start: i64,
    /// End of the aligned region on the reference (exclusive).
    pub ref_end: i64,
    /// Query chromosome name.
    pub query_name: String,
    /// Query chromosome size.
    pub query_size: i64,
    /// Query strand.
    pub query_strand: Strand,
    /// Start of the aligned region on the query (0-based).
    pub query_start: i64,
    /// End of the aligned region on the query (exclusive).
    pub query_end: i64,
}

impl Chain {
    /// Check whether a reference position falls within this chain's span.
    pub fn contains_ref(&self, position: i64) -> bool {
        position >= self.ref_start && position < self.ref_end
    }
}

/// One aligned block within a chain.
///
/// Offsets are relative to the owning chain's start in each coordinate
/// space, not absolute genome coordinates. Two blocks are value-equal when
/// their (ref offset, query offset, size) triples match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Alignment {
    /// Offset of the block from the chain's reference start.
    pub ref_offset: i64,
    /// Offset of the block from the chain's query start.
    pub query_offset: i64,
    /// Number of aligned bases in the block.
    pub size: i64,
}

impl Alignment {
    /// Exclusive end of the block's reference extent, chain-relative.
    pub fn ref_end(&self) -> i64 {
        self.ref_offset + self.size
    }
}

/// A chain with its blocks spatially indexed by reference offset.
#[derive(Debug, Clone)]
struct IndexedChain {
    record: Chain,
    alignments: IntervalTree<Alignment>,
}

/// A parsed chain file: every chain, indexed two ways.
///
/// Chains are reachable by reference chromosome + position (interval tree
/// per chromosome) and directly by chain id. Built in one pass by
/// [`ChainFile::parse`]; immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct ChainFile {
    chains: Vec<IndexedChain>,
    by_chromosome: HashMap<String, IntervalTree<usize>>,
    by_id: HashMap<i64, usize>,
}

impl ChainFile {
    /// Load a chain file from a path.
    ///
    /// The input may be plain text or compressed in any format
    /// [`crate::compress::decompress`] can sniff (gzip, bgzf, bzip2, zlib,
    /// zstd, lz4, xz).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LiftError> {
        let file = File::open(path.as_ref()).map_err(|e| LiftError::Io {
            msg: format!(
                "failed to open chain file {}: {}",
                path.as_ref().display(),
                e
            ),
        })?;
        let reader = compress::decompress(file)?;
        Self::parse(reader)
    }

    /// Parse chain text from a reader into a fully built index.
    ///
    /// Structural problems (wrong field counts, unparseable numbers) abort
    /// the parse with a line-numbered [`LiftError::Parse`]; no partial
    /// index is returned. A chain still open at end of input is inserted
    /// with the blocks it accumulated.
    pub fn parse<R: Read>(reader: R) -> Result<Self, LiftError> {
        let buf_reader = BufReader::new(reader);

        let mut chains: Vec<IndexedChain> = Vec::new();
        let mut by_id: HashMap<i64, usize> = HashMap::new();
        let mut chromosome_entries: HashMap<String, Vec<(i64, i64, usize)>> = HashMap::new();
        let mut current: Option<PendingChain> = None;
        let mut line_num = 0usize;

        for line_result in buf_reader.lines() {
            line_num += 1;
            let line = line_result.map_err(|e| LiftError::Io {
                msg: format!("failed to read line {}: {}", line_num, e),
            })?;

            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts[0] == "chain" {
                if let Some(pending) = current.take() {
                    pending.finish(&mut chains, &mut by_id, &mut chromosome_entries);
                }
                current = Some(PendingChain::from_header(&parts, line_num)?);
            } else if let Some(ref mut pending) = current {
                pending.push_block(&parts, line_num)?;
            }
            // Block-like lines before the first header are skipped.
        }

        if let Some(pending) = current {
            pending.finish(&mut chains, &mut by_id, &mut chromosome_entries);
        }

        let by_chromosome = chromosome_entries
            .into_iter()
            .map(|(name, entries)| (name, IntervalTree::from_intervals(entries)))
            .collect();

        Ok(Self {
            chains,
            by_chromosome,
            by_id,
        })
    }

    /// Find the chain covering a reference position.
    ///
    /// The chromosome name is normalized before lookup, so `chr7`, `7` and
    /// `Chr7` are equivalent. When several chains overlap the position the
    /// first in the tree's traversal order (lowest reference start) wins;
    /// this tie-break is implementation-defined, not score-based.
    ///
    /// # Errors
    ///
    /// [`LiftError::ChromosomeNotFound`] if no chain was indexed for the
    /// chromosome; [`LiftError::PositionNotFound`] if chains exist but none
    /// covers the position.
    pub fn get_chain(&self, chromosome: &str, position: i64) -> Result<&Chain, LiftError> {
        let key = names::chromosome(chromosome);
        let tree = self
            .by_chromosome
            .get(&key)
            .ok_or_else(|| LiftError::ChromosomeNotFound {
                chromosome: key.clone(),
            })?;

        match tree.first(position) {
            Some(&idx) => Ok(&self.chains[idx].record),
            None => Err(LiftError::PositionNotFound {
                chromosome: key,
                position,
            }),
        }
    }

    /// Find the alignment block covering a chain-relative reference offset.
    ///
    /// # Errors
    ///
    /// [`LiftError::ChainNotFound`] for an unknown chain id;
    /// [`LiftError::AlignmentNotFound`] if the offset falls in an unaligned
    /// gap between the chain's blocks, the normal outcome for positions
    /// with no equivalent in the other assembly.
    pub fn get_alignment(&self, chain_id: i64, offset: i64) -> Result<Alignment, LiftError> {
        let idx = self
            .by_id
            .get(&chain_id)
            .ok_or(LiftError::ChainNotFound { id: chain_id })?;

        match self.chains[*idx].alignments.first(offset) {
            Some(alignment) => Ok(*alignment),
            None => Err(LiftError::AlignmentNotFound { chain_id, offset }),
        }
    }

    /// All indexed chromosome names, sorted.
    pub fn chromosomes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.by_chromosome.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Chains for one chromosome in reference-start order.
    ///
    /// Accepts any chromosome spelling; returns an empty vector for
    /// chromosomes with no chains.
    pub fn chains_for(&self, chromosome: &str) -> Vec<&Chain> {
        let key = names::chromosome(chromosome);
        match self.by_chromosome.get(&key) {
            Some(tree) => tree.iter().map(|&idx| &self.chains[idx].record).collect(),
            None => Vec::new(),
        }
    }

    /// A chain's alignment blocks in block order.
    pub fn alignments_for(&self, chain_id: i64) -> Result<Vec<Alignment>, LiftError> {
        let idx = self
            .by_id
            .get(&chain_id)
            .ok_or(LiftError::ChainNotFound { id: chain_id })?;
        Ok(self.chains[*idx].alignments.iter().copied().collect())
    }

    /// Total number of chains.
    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }

    /// Total number of alignment blocks across all chains.
    pub fn alignment_count(&self) -> usize {
        self.chains.iter().map(|c| c.alignments.len()).sum()
    }

    /// True if the file contained no chains.
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

/// A chain mid-parse: its header plus the blocks and running offsets seen
/// so far.
struct PendingChain {
    record: Chain,
    entries: Vec<(i64, i64, Alignment)>,
    ref_offset: i64,
    query_offset: i64,
}

impl PendingChain {
    /// Parse a `chain` header line (already split into fields).
    fn from_header(parts: &[&str], line_num: usize) -> Result<Self, LiftError> {
        if parts.len() < 13 {
            return Err(LiftError::parse(
                line_num,
                format!(
                    "chain header has {} fields, expected 12 after 'chain'",
                    parts.len().saturating_sub(1)
                ),
            ));
        }

        let record = Chain {
            score: parse_field(parts[1], "score", line_num)?,
            ref_name: names::chromosome(parts[2]),
            ref_size: parse_field(parts[3], "reference size", line_num)?,
            ref_strand: parse_strand(parts[4], "reference strand", line_num)?,
            ref_start: parse_field(parts[5], "reference start", line_num)?,
            ref_end: parse_field(parts[6], "reference end", line_num)?,
            query_name: names::chromosome(parts[7]),
            query_size: parse_field(parts[8], "query size", line_num)?,
            query_strand: parse_strand(parts[9], "query strand", line_num)?,
            query_start: parse_field(parts[10], "query start", line_num)?,
            query_end: parse_field(parts[11], "query end", line_num)?,
            id: parse_field(parts[12], "chain id", line_num)?,
        };

        Ok(Self {
            record,
            entries: Vec::new(),
            ref_offset: 0,
            query_offset: 0,
        })
    }

    /// Parse a block line and append the alignment at the running offsets.
    fn push_block(&mut self, parts: &[&str], line_num: usize) -> Result<(), LiftError> {
        if parts.len() != 1 && parts.len() != 3 {
            return Err(LiftError::parse(
                line_num,
                format!("alignment line has {} fields, expected 1 or 3", parts.len()),
            ));
        }

        let size = parse_field(parts[0], "block size", line_num)?;
        let alignment = Alignment {
            ref_offset: self.ref_offset,
            query_offset: self.query_offset,
            size,
        };
        self.entries
            .push((alignment.ref_offset, alignment.ref_end(), alignment));

        self.ref_offset += size;
        self.query_offset += size;
        if parts.len() == 3 {
            self.ref_offset += parse_field(parts[1], "reference gap", line_num)?;
            self.query_offset += parse_field(parts[2], "query gap", line_num)?;
        }

        Ok(())
    }

    /// Close the chain and insert it into the index under construction.
    fn finish(
        self,
        chains: &mut Vec<IndexedChain>,
        by_id: &mut HashMap<i64, usize>,
        chromosome_entries: &mut HashMap<String, Vec<(i64, i64, usize)>>,
    ) {
        let idx = chains.len();
        chromosome_entries
            .entry(self.record.ref_name.clone())
            .or_default()
            .push((self.record.ref_start, self.record.ref_end, idx));
        by_id.insert(self.record.id, idx);
        chains.push(IndexedChain {
            record: self.record,
            alignments: IntervalTree::from_intervals(self.entries),
        });
    }
}

fn parse_field(value: &str, name: &str, line_num: usize) -> Result<i64, LiftError> {
    value
        .parse::<i64>()
        .map_err(|_| LiftError::parse(line_num, format!("invalid {}: '{}'", name, value)))
}

fn parse_strand(value: &str, name: &str, line_num: usize) -> Result<Strand, LiftError> {
    value
        .parse::<Strand>()
        .map_err(|_| LiftError::parse(line_num, format!("invalid {}: '{}'", name, value)))
}
