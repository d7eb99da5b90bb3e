//! Coordinate liftover between genome assemblies using UCSC chain files.
//!
//! Liftover converts a position on one genome build into the equivalent
//! position on another, using the alignment chains UCSC publishes between
//! assembly pairs. This module parses chain files into a read-only spatial
//! index, answers point lifts through the [`ChainSource`] contract, and
//! exports parsed chain sets into [`ChainStore`] backends.
//!
//! # Example
//!
//! ```
//! use ferro_liftover::liftover::{lift, ChainFile};
//! use ferro_liftover::names::GenomeBuild;
//!
//! let chain_file = ChainFile::parse(
//!     "chain 100 chr1 1000 + 0 100 chr1 1000 + 500 600 1\n100\n".as_bytes(),
//! )?;
//!
//! let position = lift(&chain_file, GenomeBuild::GRCh37, "chr1", 40)?;
//! assert_eq!(position, 540);
//! # Ok::<(), ferro_liftover::LiftError>(())
//! ```
//!
//! # Chain files
//!
//! Chain files for human builds can be downloaded from UCSC, for example:
//! - <https://hgdownload.cse.ucsc.edu/goldenpath/hg19/liftOver/hg19ToHg38.over.chain.gz>
//! - <https://hgdownload.cse.ucsc.edu/goldenpath/hg38/liftOver/hg38ToHg19.over.chain.gz>
//!
//! Compressed files are detected and decompressed transparently.

pub mod chain;
pub mod export;
pub mod lift;
pub mod memory;

pub use chain::{Alignment, Chain, ChainFile};
pub use export::{store_chain_file, ChainStore};
pub use lift::{lift, ChainSource};
pub use memory::MemoryStore;
