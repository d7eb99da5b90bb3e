//! Static augmented interval tree
//!
//! An owned spatial index over half-open `[start, end)` intervals, built
//! once and then queried read-only. Construction sorts the intervals by
//! `(start, end)` and treats the sorted vector as an implicit balanced
//! binary tree (root at the midpoint of each slice); every node carries the
//! maximum `end` in its subtree so point queries can prune whole subtrees.
//!
//! There is no insertion or removal after construction. Queries take
//! `&self` only, so a built tree is safe to share across threads.

/// One stored interval with its subtree's max-end bound
#[derive(Debug, Clone)]
struct Node<T> {
    start: i64,
    end: i64,
    max_end: i64,
    value: T,
}

/// An immutable interval tree over half-open `[start, end)` intervals
///
/// # Example
///
/// ```
/// use ferro_liftover::interval::IntervalTree;
///
/// let tree = IntervalTree::from_intervals(vec![(0, 50, "a"), (60, 100, "b")]);
/// assert_eq!(tree.find(10), vec![&"a"]);
/// assert!(tree.find(55).is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct IntervalTree<T> {
    nodes: Vec<Node<T>>,
}

impl<T> IntervalTree<T> {
    /// Build a tree from `(start, end, value)` intervals
    ///
    /// Intervals are half-open; a zero-length interval (`start == end`) is
    /// stored but can never contain a query point. The sort is stable, so
    /// intervals with identical bounds keep their insertion order.
    pub fn from_intervals(intervals: Vec<(i64, i64, T)>) -> Self {
        let mut nodes: Vec<Node<T>> = intervals
            .into_iter()
            .map(|(start, end, value)| Node {
                start,
                end,
                max_end: end,
                value,
            })
            .collect();
        nodes.sort_by(|a, b| (a.start, a.end).cmp(&(b.start, b.end)));

        let len = nodes.len();
        let mut tree = Self { nodes };
        tree.augment(0, len);
        tree
    }

    /// Number of stored intervals
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the tree holds no intervals
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All values whose interval contains `position`, in ascending
    /// `(start, end)` order
    pub fn find(&self, position: i64) -> Vec<&T> {
        let mut out = Vec::new();
        self.collect(0, self.nodes.len(), position, &mut out);
        out
    }

    /// The first value containing `position` under the tree's traversal
    /// order (ascending start, then end)
    ///
    /// This is the tie-break every lookup in the crate uses when several
    /// intervals overlap one point: first match in traversal order. It is
    /// implementation-defined order, not a highest-score selection.
    pub fn first(&self, position: i64) -> Option<&T> {
        self.first_in(0, self.nodes.len(), position)
    }

    /// Values in ascending `(start, end)` order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.nodes.iter().map(|n| &n.value)
    }

    /// Compute each slice root's subtree max-end, returning the slice's max
    fn augment(&mut self, lo: usize, hi: usize) -> i64 {
        if lo >= hi {
            return i64::MIN;
        }
        let mid = lo + (hi - lo) / 2;
        let left = self.augment(lo, mid);
        let right = self.augment(mid + 1, hi);
        let max_end = self.nodes[mid].end.max(left).max(right);
        self.nodes[mid].max_end = max_end;
        max_end
    }

    fn collect<'a>(&'a self, lo: usize, hi: usize, position: i64, out: &mut Vec<&'a T>) {
        if lo >= hi {
            return;
        }
        let mid = lo + (hi - lo) / 2;
        let node = &self.nodes[mid];
        // Nothing in this subtree extends past the query point.
        if node.max_end <= position {
            return;
        }
        self.collect(lo, mid, position, out);
        if node.start <= position {
            if position < node.end {
                out.push(&node.value);
            }
            self.collect(mid + 1, hi, position, out);
        }
        // node.start > position: every start in the right subtree is larger
        // still, so the node and its right subtree are skipped.
    }

    fn first_in(&self, lo: usize, hi: usize, position: i64) -> Option<&T> {
        if lo >= hi {
            return None;
        }
        let mid = lo + (hi - lo) / 2;
        let node = &self.nodes[mid];
        if node.max_end <= position {
            return None;
        }
        if let Some(found) = self.first_in(lo, mid, position) {
            return Some(found);
        }
        if node.start <= position {
            if position < node.end {
                return Some(&node.value);
            }
            return self.first_in(mid + 1, hi, position);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tree() {
        let tree: IntervalTree<i32> = IntervalTree::from_intervals(vec![]);
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.find(0).is_empty());
        assert!(tree.first(0).is_none());
    }

    #[test]
    fn test_single_interval_boundaries() {
        let tree = IntervalTree::from_intervals(vec![(10, 20, "a")]);
        assert!(tree.find(9).is_empty());
        assert_eq!(tree.find(10), vec![&"a"]); // start is inclusive
        assert_eq!(tree.find(19), vec![&"a"]);
        assert!(tree.find(20).is_empty()); // end is exclusive
        assert!(tree.find(21).is_empty());
    }

    #[test]
    fn test_zero_length_interval_matches_nothing() {
        let tree = IntervalTree::from_intervals(vec![(5, 5, "empty")]);
        assert!(tree.find(5).is_empty());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_disjoint_intervals() {
        let tree = IntervalTree::from_intervals(vec![(0, 10, 1), (20, 30, 2), (40, 50, 3)]);
        assert_eq!(tree.find(5), vec![&1]);
        assert_eq!(tree.find(25), vec![&2]);
        assert_eq!(tree.find(45), vec![&3]);
        assert!(tree.find(15).is_empty());
        assert!(tree.find(35).is_empty());
    }

    #[test]
    fn test_overlapping_intervals_all_returned() {
        let tree = IntervalTree::from_intervals(vec![(0, 100, "outer"), (40, 60, "inner")]);
        assert_eq!(tree.find(50), vec![&"outer", &"inner"]);
        assert_eq!(tree.find(10), vec![&"outer"]);
    }

    #[test]
    fn test_results_in_ascending_start_order() {
        let tree = IntervalTree::from_intervals(vec![
            (30, 90, "c"),
            (0, 100, "a"),
            (20, 80, "b"),
            (60, 70, "d"),
        ]);
        assert_eq!(tree.find(65), vec![&"a", &"b", &"c", &"d"]);
        assert_eq!(tree.first(65), Some(&"a"));
    }

    #[test]
    fn test_first_matches_find_head() {
        let tree = IntervalTree::from_intervals(vec![(0, 10, 1), (5, 15, 2), (8, 20, 3)]);
        for pos in -2..22 {
            let all = tree.find(pos);
            assert_eq!(tree.first(pos), all.first().copied(), "position {}", pos);
        }
    }

    #[test]
    fn test_identical_intervals_keep_insertion_order() {
        let tree = IntervalTree::from_intervals(vec![(0, 10, "first"), (0, 10, "second")]);
        assert_eq!(tree.find(5), vec![&"first", &"second"]);
        assert_eq!(tree.first(5), Some(&"first"));
    }

    #[test]
    fn test_iter_is_sorted_by_start() {
        let tree = IntervalTree::from_intervals(vec![(30, 40, 3), (10, 20, 1), (20, 30, 2)]);
        let values: Vec<i32> = tree.iter().copied().collect();
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[test]
    fn test_negative_coordinates() {
        let tree = IntervalTree::from_intervals(vec![(-100, -50, "neg")]);
        assert_eq!(tree.find(-75), vec![&"neg"]);
        assert!(tree.find(0).is_empty());
    }

    #[test]
    fn test_matches_linear_scan() {
        // Deterministic pseudo-random intervals, checked against brute force.
        let mut seed: u64 = 0x5eed;
        let mut next = || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (seed >> 33) as i64
        };

        let intervals: Vec<(i64, i64, usize)> = (0..200)
            .map(|i| {
                let start = next() % 1000;
                let len = next() % 50;
                (start, start + len, i)
            })
            .collect();
        let tree = IntervalTree::from_intervals(intervals.clone());

        let mut sorted_input = intervals.clone();
        sorted_input.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

        for pos in (0..1050).step_by(7) {
            let expected: Vec<usize> = sorted_input
                .iter()
                .filter(|(s, e, _)| *s <= pos && pos < *e)
                .map(|(_, _, i)| *i)
                .collect();

            let got: Vec<usize> = tree.find(pos).into_iter().copied().collect();
            assert_eq!(got, expected, "position {}", pos);
        }
    }
}
