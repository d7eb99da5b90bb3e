//! Generic comma-separated codec.
//!
//! Covers MyHeritage, FTDNA and similar exports: an optional comment
//! block, a header naming at least `rsid`, `chromosome`, `position` and
//! `result`, then one row per marker.

use std::io::BufRead;

use crate::error::LiftError;
use crate::names::GenomeBuild;

use super::{DelimitedRows, Snp, SnpReader};

pub struct GenericCsvReader<R> {
    rows: DelimitedRows<R>,
}

impl<R: BufRead> GenericCsvReader<R> {
    pub fn open(reader: R) -> Result<Self, LiftError> {
        Ok(Self {
            rows: DelimitedRows::open(reader, ',', "CSV")?,
        })
    }
}

impl<R: BufRead> SnpReader for GenericCsvReader<R> {
    fn genome_build(&self) -> GenomeBuild {
        GenomeBuild::GRCh37
    }

    fn read(&mut self) -> Result<Option<Snp>, LiftError> {
        self.rows.read_snp()
    }
}
