//! Bulk export of a parsed chain set into a chain store.
//!
//! [`store_chain_file`] walks every chain of a [`ChainFile`] and hands it
//! to a [`ChainStore`] implementation, then writes the chain's alignment
//! blocks keyed by the id the store assigned. Stores are typically
//! database-backed; [`super::MemoryStore`] is the in-crate implementation.

use crate::error::LiftError;
use crate::names::GenomeBuild;

use super::chain::{Alignment, Chain, ChainFile};

/// A writable target for chains and their alignment blocks.
///
/// `store_chain` persists one chain tagged with its reference build and
/// returns the store's own identifier for it; `store_alignments` persists
/// blocks under that identifier. Stores assign ids independently of the
/// `Chain::id` field carried in the record.
pub trait ChainStore {
    /// Persist a chain for build `from`; returns the store-assigned id.
    fn store_chain(&mut self, from: GenomeBuild, chain: &Chain) -> Result<i64, LiftError>;

    /// Persist a chain's alignment blocks under a store-assigned chain id.
    fn store_alignments(&mut self, chain_id: i64, alignments: &[Alignment])
        -> Result<(), LiftError>;
}

impl ChainStore for Box<dyn ChainStore> {
    fn store_chain(&mut self, from: GenomeBuild, chain: &Chain) -> Result<i64, LiftError> {
        (**self).store_chain(from, chain)
    }

    fn store_alignments(
        &mut self,
        chain_id: i64,
        alignments: &[Alignment],
    ) -> Result<(), LiftError> {
        (**self).store_alignments(chain_id, alignments)
    }
}

/// Write every chain of `chain_file` into `store`, tagged with build `from`.
///
/// Chromosomes are visited in sorted order and chains within a chromosome
/// in reference-start order, so repeated exports of the same file hit the
/// store in the same sequence. The optional `progress` callback is invoked
/// once per stored chain with `(processed, total)` counts.
///
/// # Errors
///
/// The first store failure aborts the export with [`LiftError::Export`]
/// naming the chain that failed. Chains already written stay written; the
/// caller owns any transaction semantics.
pub fn store_chain_file<S: ChainStore + ?Sized>(
    store: &mut S,
    from: GenomeBuild,
    chain_file: &ChainFile,
    mut progress: Option<&mut dyn FnMut(usize, usize)>,
) -> Result<(), LiftError> {
    let total = chain_file.chain_count();
    let mut processed = 0usize;

    for chromosome in chain_file.chromosomes() {
        for chain in chain_file.chains_for(chromosome) {
            let store_id = store
                .store_chain(from, chain)
                .map_err(|e| LiftError::Export {
                    chain_id: chain.id,
                    msg: e.to_string(),
                })?;

            let alignments = chain_file.alignments_for(chain.id)?;
            store
                .store_alignments(store_id, &alignments)
                .map_err(|e| LiftError::Export {
                    chain_id: chain.id,
                    msg: e.to_string(),
                })?;

            processed += 1;
            if let Some(callback) = progress.as_deref_mut() {
                callback(processed, total);
            }
        }
    }

    Ok(())
}
