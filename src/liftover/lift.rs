//! Position liftover between genome builds.
//!
//! A lift is two lookups followed by strand arithmetic:
//!
//! 1. Find the chain covering the reference position.
//! 2. Find the alignment block covering the chain-relative offset
//!    `position - chain.ref_start`.
//! 3. Plus-strand chains map the position block-relative into query
//!    coordinates; minus-strand chains map it from the chain's query end.
//!
//! Positions with no equivalent in the destination build surface as
//! [`LiftError::AlignmentNotFound`] (the position falls in a gap between
//! blocks) or [`LiftError::PositionNotFound`] (no chain covers it). Both
//! are expected outcomes for real data, not failures of the engine.
//!
//! The engine is generic over [`ChainSource`], so the same code lifts
//! against an in-memory [`ChainFile`] index or a store-backed client.

use crate::error::LiftError;
use crate::names::{GenomeBuild, Strand};

use super::chain::{Alignment, Chain, ChainFile};

/// A queryable source of chains and alignment blocks.
///
/// Implementations answer the two point lookups the lift engine needs.
/// `from` identifies the reference build the coordinates are expressed in;
/// sources holding a single chain set may ignore it.
pub trait ChainSource {
    /// Find the chain covering `position` on `chromosome` in build `from`.
    fn get_chain(
        &self,
        from: GenomeBuild,
        chromosome: &str,
        position: i64,
    ) -> Result<Chain, LiftError>;

    /// Find the alignment block covering a chain-relative reference offset.
    fn get_alignment(&self, chain_id: i64, offset: i64) -> Result<Alignment, LiftError>;
}

impl ChainSource for Box<dyn ChainSource> {
    fn get_chain(
        &self,
        from: GenomeBuild,
        chromosome: &str,
        position: i64,
    ) -> Result<Chain, LiftError> {
        (**self).get_chain(from, chromosome, position)
    }

    fn get_alignment(&self, chain_id: i64, offset: i64) -> Result<Alignment, LiftError> {
        (**self).get_alignment(chain_id, offset)
    }
}

/// A [`ChainFile`] answers lookups for the chain set it was parsed from,
/// whatever build that is; the `from` build is ignored.
impl ChainSource for ChainFile {
    fn get_chain(
        &self,
        _from: GenomeBuild,
        chromosome: &str,
        position: i64,
    ) -> Result<Chain, LiftError> {
        ChainFile::get_chain(self, chromosome, position).cloned()
    }

    fn get_alignment(&self, chain_id: i64, offset: i64) -> Result<Alignment, LiftError> {
        ChainFile::get_alignment(self, chain_id, offset)
    }
}

/// Lift a single position from build `from` into the chain set's
/// destination build.
///
/// The chromosome name may use any supported spelling (`chr7`, `7`, `MT`,
/// `chrM`); it is normalized by the source. Returns the destination
/// position.
///
/// Minus-strand chains place the result at the query end minus the block's
/// absolute reference start; the offset of the position within the block
/// does not contribute on that strand.
///
/// # Errors
///
/// Propagates the source's not-found errors unchanged; see
/// [`LiftError::is_not_found`] for classifying them. There are no retries;
/// a not-found outcome is terminal for the coordinate.
///
/// # Example
///
/// ```
/// use ferro_liftover::liftover::{lift, ChainFile};
/// use ferro_liftover::names::GenomeBuild;
///
/// let chain_file = ChainFile::parse(
///     "chain 100 chr1 1000 + 0 100 chr1 1000 + 500 600 1\n100\n".as_bytes(),
/// )?;
/// let position = lift(&chain_file, GenomeBuild::GRCh37, "chr1", 40)?;
/// assert_eq!(position, 540);
/// # Ok::<(), ferro_liftover::LiftError>(())
/// ```
pub fn lift<S: ChainSource + ?Sized>(
    source: &S,
    from: GenomeBuild,
    chromosome: &str,
    position: i64,
) -> Result<i64, LiftError> {
    let chain = source.get_chain(from, chromosome, position)?;
    let alignment = source.get_alignment(chain.id, position - chain.ref_start)?;

    let query_position = match chain.query_strand {
        Strand::Plus => {
            chain.query_start
                + alignment.query_offset
                + (position - (chain.ref_start + alignment.ref_offset))
        }
        Strand::Minus => chain.query_end - (chain.ref_start + alignment.ref_offset),
    };

    Ok(query_position)
}
