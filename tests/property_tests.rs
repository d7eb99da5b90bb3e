//! Property-based tests for chain parsing and liftover
//!
//! Generates structurally valid chain files and checks the invariants the
//! parser and lift engine promise: block offsets are cumulative sums of
//! sizes and gaps, in-block distances survive a plus-strand lift, gap
//! positions are unmapped, and minus-strand blocks map to one destination.

use ferro_liftover::names;
use ferro_liftover::{lift, ChainFile, GenomeBuild};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

// =============================================================================
// Generators
// =============================================================================

/// Blocks as (size, ref_gap, query_gap); the last block's gaps are unused.
fn chain_blocks() -> impl Strategy<Value = Vec<(i64, i64, i64)>> {
    prop::collection::vec((1..500i64, 0..100i64, 0..100i64), 1..8)
}

/// Render a chain with the given blocks, spans computed to be consistent.
fn chain_text(
    ref_start: i64,
    query_start: i64,
    query_strand: char,
    blocks: &[(i64, i64, i64)],
) -> String {
    let mut ref_len = 0;
    let mut query_len = 0;
    for (i, (size, ref_gap, query_gap)) in blocks.iter().enumerate() {
        ref_len += size;
        query_len += size;
        if i + 1 < blocks.len() {
            ref_len += ref_gap;
            query_len += query_gap;
        }
    }

    let mut text = format!(
        "chain 1000 chr1 249250621 + {} {} chr1 248956422 {} {} {} 1\n",
        ref_start,
        ref_start + ref_len,
        query_strand,
        query_start,
        query_start + query_len,
    );
    for (i, (size, ref_gap, query_gap)) in blocks.iter().enumerate() {
        if i + 1 < blocks.len() {
            text.push_str(&format!("{}\t{}\t{}\n", size, ref_gap, query_gap));
        } else {
            text.push_str(&format!("{}\n", size));
        }
    }
    text
}

/// Canonical chromosome names alongside vendor spellings of them.
fn chromosome_spelling() -> impl Strategy<Value = (String, String)> {
    let canonical = prop_oneof![
        (1..=22u8).prop_map(|n| n.to_string()),
        Just("X".to_string()),
        Just("Y".to_string()),
        Just("MT".to_string()),
    ];
    let prefix = prop_oneof![Just(""), Just("chr"), Just("Chr"), Just("CHR")];

    (canonical, prefix, any::<bool>()).prop_map(|(name, prefix, lowercase)| {
        let spelled = if lowercase {
            format!("{}{}", prefix, name.to_lowercase())
        } else {
            format!("{}{}", prefix, name)
        };
        (name, spelled)
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Parsed block offsets are the running sums of sizes and gaps.
    #[test]
    fn test_parse_preserves_block_structure(
        ref_start in 0..10_000_000i64,
        query_start in 0..10_000_000i64,
        blocks in chain_blocks(),
    ) {
        let text = chain_text(ref_start, query_start, '+', &blocks);
        let chain_file = ChainFile::parse(text.as_bytes()).unwrap();

        prop_assert_eq!(chain_file.chain_count(), 1);
        prop_assert_eq!(chain_file.alignment_count(), blocks.len());

        let alignments = chain_file.alignments_for(1).unwrap();
        let mut ref_offset = 0;
        let mut query_offset = 0;
        for (alignment, &(size, ref_gap, query_gap)) in alignments.iter().zip(blocks.iter()) {
            prop_assert_eq!(alignment.ref_offset, ref_offset);
            prop_assert_eq!(alignment.query_offset, query_offset);
            prop_assert_eq!(alignment.size, size);
            ref_offset += size + ref_gap;
            query_offset += size + query_gap;
        }

        // The header spans cover exactly the blocks plus interior gaps.
        let chain = chain_file.get_chain("chr1", ref_start).unwrap();
        let last = alignments.last().unwrap();
        prop_assert_eq!(chain.ref_end - chain.ref_start, last.ref_end());
    }

    /// A plus-strand lift shifts every base of a block by the same amount.
    #[test]
    fn test_lift_preserves_in_block_distances(
        ref_start in 0..10_000_000i64,
        query_start in 0..10_000_000i64,
        blocks in chain_blocks(),
    ) {
        let text = chain_text(ref_start, query_start, '+', &blocks);
        let chain_file = ChainFile::parse(text.as_bytes()).unwrap();

        for alignment in chain_file.alignments_for(1).unwrap() {
            let block_start = ref_start + alignment.ref_offset;
            let expected_start = query_start + alignment.query_offset;

            let first = lift(&chain_file, GenomeBuild::GRCh37, "chr1", block_start).unwrap();
            prop_assert_eq!(first, expected_start);

            let last_offset = alignment.size - 1;
            let last =
                lift(&chain_file, GenomeBuild::GRCh37, "chr1", block_start + last_offset).unwrap();
            prop_assert_eq!(last - first, last_offset);
        }
    }

    /// Positions in the gaps between blocks never lift.
    #[test]
    fn test_gap_positions_never_lift(
        ref_start in 0..10_000_000i64,
        query_start in 0..10_000_000i64,
        blocks in chain_blocks(),
    ) {
        let text = chain_text(ref_start, query_start, '+', &blocks);
        let chain_file = ChainFile::parse(text.as_bytes()).unwrap();

        let alignments = chain_file.alignments_for(1).unwrap();
        for pair in alignments.windows(2) {
            let gap_start = ref_start + pair[0].ref_end();
            let gap_end = ref_start + pair[1].ref_offset;
            for position in [gap_start, gap_end - 1] {
                if position >= gap_start && position < gap_end {
                    let err =
                        lift(&chain_file, GenomeBuild::GRCh37, "chr1", position).unwrap_err();
                    prop_assert!(err.is_not_found());
                }
            }
        }
    }

    /// Every base of a minus-strand block maps to the block's one
    /// destination, the chain's query end minus the block's absolute start.
    #[test]
    fn test_minus_strand_blocks_map_to_constants(
        ref_start in 0..10_000_000i64,
        query_start in 0..10_000_000i64,
        blocks in chain_blocks(),
    ) {
        let text = chain_text(ref_start, query_start, '-', &blocks);
        let chain_file = ChainFile::parse(text.as_bytes()).unwrap();
        let chain = chain_file.get_chain("chr1", ref_start).unwrap().clone();

        for alignment in chain_file.alignments_for(1).unwrap() {
            let block_start = ref_start + alignment.ref_offset;
            let expected = chain.query_end - (chain.ref_start + alignment.ref_offset);

            let first = lift(&chain_file, GenomeBuild::GRCh37, "chr1", block_start).unwrap();
            let last = lift(
                &chain_file,
                GenomeBuild::GRCh37,
                "chr1",
                block_start + alignment.size - 1,
            )
            .unwrap();

            prop_assert_eq!(first, expected);
            prop_assert_eq!(last, expected);
        }
    }

    /// All vendor spellings of a chromosome name canonicalize to one form.
    #[test]
    fn test_chromosome_spellings_normalize((canonical, spelled) in chromosome_spelling()) {
        prop_assert_eq!(names::chromosome(&spelled), canonical);
    }
}
