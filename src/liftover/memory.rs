//! In-memory chain store.
//!
//! [`MemoryStore`] implements both sides of the store contract: it accepts
//! chains through [`ChainStore`] and answers lift lookups through
//! [`ChainSource`]. Tests use it to drive the engine against a store
//! backend without a database; small tools can use it as a throwaway
//! store. Lookups are linear scans, adequate for the sizes it is meant
//! for.

use std::collections::HashMap;

use crate::error::LiftError;
use crate::names::{self, GenomeBuild};

use super::chain::{Alignment, Chain};
use super::export::ChainStore;
use super::lift::ChainSource;

/// A chain store holding everything in process memory.
///
/// Chains are keyed by (build, canonical chromosome); alignments by the
/// store-assigned chain id. Stored chains carry the store id in their `id`
/// field, so a chain returned by `get_chain` can be fed straight back into
/// `get_alignment`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    next_id: i64,
    chains: HashMap<(GenomeBuild, String), Vec<Chain>>,
    alignments: HashMap<i64, Vec<Alignment>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of chains stored across all builds.
    pub fn chain_count(&self) -> usize {
        self.chains.values().map(Vec::len).sum()
    }

    /// Number of alignment blocks stored.
    pub fn alignment_count(&self) -> usize {
        self.alignments.values().map(Vec::len).sum()
    }
}

impl ChainStore for MemoryStore {
    fn store_chain(&mut self, from: GenomeBuild, chain: &Chain) -> Result<i64, LiftError> {
        self.next_id += 1;
        let id = self.next_id;

        let mut record = chain.clone();
        record.id = id;
        record.ref_name = names::chromosome(&chain.ref_name);
        record.query_name = names::chromosome(&chain.query_name);

        self.chains
            .entry((from, record.ref_name.clone()))
            .or_default()
            .push(record);
        Ok(id)
    }

    fn store_alignments(
        &mut self,
        chain_id: i64,
        alignments: &[Alignment],
    ) -> Result<(), LiftError> {
        self.alignments.insert(chain_id, alignments.to_vec());
        Ok(())
    }
}

impl ChainSource for MemoryStore {
    fn get_chain(
        &self,
        from: GenomeBuild,
        chromosome: &str,
        position: i64,
    ) -> Result<Chain, LiftError> {
        let key = (from, names::chromosome(chromosome));
        let chains = self
            .chains
            .get(&key)
            .ok_or_else(|| LiftError::ChromosomeNotFound {
                chromosome: key.1.clone(),
            })?;

        chains
            .iter()
            .find(|c| c.contains_ref(position))
            .cloned()
            .ok_or(LiftError::PositionNotFound {
                chromosome: key.1,
                position,
            })
    }

    fn get_alignment(&self, chain_id: i64, offset: i64) -> Result<Alignment, LiftError> {
        let blocks = self
            .alignments
            .get(&chain_id)
            .ok_or(LiftError::ChainNotFound { id: chain_id })?;

        blocks
            .iter()
            .find(|a| a.ref_offset <= offset && offset < a.ref_end())
            .copied()
            .ok_or(LiftError::AlignmentNotFound { chain_id, offset })
    }
}
