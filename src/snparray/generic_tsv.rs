//! Generic tab-separated codec.
//!
//! The fallback for unbranded exports: a header naming at least `rsid`,
//! `chromosome`, `position` and `result`, then tab-separated rows.

use std::io::BufRead;

use crate::error::LiftError;
use crate::names::GenomeBuild;

use super::{DelimitedRows, Snp, SnpReader};

#[derive(Debug)]
pub struct GenericTsvReader<R> {
    rows: DelimitedRows<R>,
}

impl<R: BufRead> GenericTsvReader<R> {
    pub fn open(reader: R) -> Result<Self, LiftError> {
        Ok(Self {
            rows: DelimitedRows::open(reader, '\t', "TSV")?,
        })
    }
}

impl<R: BufRead> SnpReader for GenericTsvReader<R> {
    fn genome_build(&self) -> GenomeBuild {
        // TODO: detect the build by probing the positions of well-known
        // markers; unbranded files occasionally carry GRCh38 coordinates.
        GenomeBuild::GRCh37
    }

    fn read(&mut self) -> Result<Option<Snp>, LiftError> {
        self.rows.read_snp()
    }
}
