//! Sorted index sets and the set algebra used by traits and selection.
//!
//! All free functions operate on ascending, duplicate-free slices and return
//! new vectors. They are linear merge-scans unless stated otherwise.

/// A set of row indices kept both in insertion order and in sorted order.
///
/// `indices` preserves the order in which members were supplied (the last
/// element is the most recent one). `sorted` always equals
/// `sort(dedupe(indices))` and backs membership queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortedIndexSet {
    indices: Vec<usize>,
    sorted: Vec<usize>,
}

impl SortedIndexSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set from indices in arbitrary order.
    pub fn from_indices(indices: Vec<usize>) -> Self {
        let mut sorted = indices.clone();
        sorted.sort_unstable();
        sorted.dedup();
        Self { indices, sorted }
    }

    /// Creates a set from indices that are already ascending and unique.
    pub(crate) fn from_sorted(sorted: Vec<usize>) -> Self {
        debug_assert!(sorted.windows(2).all(|w| w[0] < w[1]));
        Self {
            indices: sorted.clone(),
            sorted,
        }
    }

    /// Members in insertion order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Members in ascending order, without duplicates.
    pub fn sorted(&self) -> &[usize] {
        &self.sorted
    }

    /// Binary-search membership test.
    pub fn contains(&self, index: usize) -> bool {
        self.sorted.binary_search(&index).is_ok()
    }

    /// Number of distinct members.
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// Returns true if the set has no members.
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// The first member in insertion order.
    pub fn first(&self) -> Option<usize> {
        self.indices.first().copied()
    }
}

/// Set union of two ascending slices. Values present in both appear once.
pub fn union(a: &[usize], b: &[usize]) -> Vec<usize> {
    let mut result = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => {
                result.push(a[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                result.push(b[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                result.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }

    result.extend_from_slice(&a[i..]);
    result.extend_from_slice(&b[j..]);
    result
}

/// Symmetric difference of two ascending slices: values present in exactly
/// one input.
pub fn symmetric_difference(a: &[usize], b: &[usize]) -> Vec<usize> {
    let mut result = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => {
                result.push(a[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                result.push(b[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                i += 1;
                j += 1;
            }
        }
    }

    result.extend_from_slice(&a[i..]);
    result.extend_from_slice(&b[j..]);
    result
}

/// The maximal run of consecutive integers around `value` that are all
/// members of `sorted`. Empty if `value` itself is not a member.
///
/// Runs in O(log n + run length).
pub fn contiguous_run_containing(sorted: &[usize], value: usize) -> Vec<usize> {
    let Ok(position) = sorted.binary_search(&value) else {
        return Vec::new();
    };

    let mut first = position;
    while first > 0 && sorted[first - 1] + 1 == sorted[first] {
        first -= 1;
    }

    let mut last = position;
    while last + 1 < sorted.len() && sorted[last] + 1 == sorted[last + 1] {
        last += 1;
    }

    sorted[first..=last].to_vec()
}

/// Maps an ascending index set across a splice of the underlying sequence.
///
/// Members below `start` are kept, `start + j` is added for every
/// `inserted_flags[j]` that is true, members inside the deleted range are
/// dropped, and members at or after `start + delete_count` shift by
/// `inserted_flags.len() - delete_count`. The result is ascending.
pub fn splice_sorted(
    sorted: &[usize],
    start: usize,
    delete_count: usize,
    inserted_flags: &[bool],
) -> Vec<usize> {
    let end = start + delete_count;
    let kept_before = sorted.partition_point(|&i| i < start);
    let first_after = sorted.partition_point(|&i| i < end);

    let mut result = Vec::with_capacity(sorted.len() + inserted_flags.len());
    result.extend_from_slice(&sorted[..kept_before]);
    result.extend(
        inserted_flags
            .iter()
            .enumerate()
            .filter(|(_, keep)| **keep)
            .map(|(j, _)| start + j),
    );
    result.extend(
        sorted[first_after..]
            .iter()
            .map(|&i| i - delete_count + inserted_flags.len()),
    );
    result
}
