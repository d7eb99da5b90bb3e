// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-liftover: genome build liftover
//!
//! Part of the ferro bioinformatics toolkit. Converts genomic coordinates
//! between human reference assemblies using UCSC chain files, reads
//! consumer SNP-array exports, and handles the compressed containers
//! genomic data ships in.
//!
//! # Example
//!
//! ```
//! use ferro_liftover::liftover::{lift, ChainFile};
//! use ferro_liftover::names::GenomeBuild;
//!
//! // A chain mapping positions [0, 100) to [500, 600)
//! let chain_file = ChainFile::parse(
//!     "chain 100 chr1 1000 + 0 100 chr1 1000 + 500 600 1\n100\n".as_bytes(),
//! ).unwrap();
//!
//! let position = lift(&chain_file, GenomeBuild::GRCh37, "chr1", 40).unwrap();
//! assert_eq!(position, 540);
//! ```

pub mod compress;
pub mod error;
pub mod fasta;
pub mod interval;
pub mod liftover;
pub mod names;
pub mod snparray;

// Re-export commonly used types
pub use error::{ErrorCode, LiftError};
pub use liftover::{
    lift, store_chain_file, Alignment, Chain, ChainFile, ChainSource, ChainStore, MemoryStore,
};
pub use names::{GenomeBuild, Strand};
pub use snparray::{Snp, SnpReader};

/// Result type alias for ferro-liftover operations
pub type Result<T> = std::result::Result<T, LiftError>;
