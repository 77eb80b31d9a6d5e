use crate::spec::GroupingSpec;

/// A subset of the grouping columns, stored as ascending positions into the [`GroupingSpec`].
///
/// The empty grouping is the grand total.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Grouping(Vec<usize>);

impl Grouping {
    pub fn new(mut positions: Vec<usize>) -> Self {
        positions.sort_unstable();
        positions.dedup();
        Self(positions)
    }

    pub fn positions(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, pos: usize) -> bool {
        self.0.binary_search(&pos).is_ok()
    }

    pub fn column_names<'s>(&self, spec: &'s GroupingSpec) -> Vec<&'s str> {
        self.0.iter().map(|&pos| spec.column(pos)).collect()
    }
}

/// Lazily enumerates all `2^n` subsets of `n` ordered columns.
///
/// Subsets come by size, then lexicographically by position within a size, so the sequence for
/// `n = 3` is `() (0) (1) (2) (0 1) (0 2) (1 2) (0 1 2)`.
#[derive(Clone, Debug)]
pub struct PowerSet {
    n: usize,
    current: Vec<usize>,
    remaining: usize,
}

impl PowerSet {
    /// `n` must be below `usize::BITS`; [`GroupingSpec::resolve`] enforces this.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            current: Vec::new(),
            remaining: 1usize.checked_shl(n as u32).unwrap_or(0),
        }
    }

    fn advance(&mut self) {
        let k = self.current.len();
        // Rightmost position that can still move right.
        let pivot = (0..k).rev().find(|&i| self.current[i] < self.n - k + i);
        match pivot {
            Some(i) => {
                self.current[i] += 1;
                for j in i + 1..k {
                    self.current[j] = self.current[j - 1] + 1;
                }
            }
            None => self.current = (0..k + 1).collect(),
        }
    }
}

impl Iterator for PowerSet {
    type Item = Grouping;

    fn next(&mut self) -> Option<Grouping> {
        if self.remaining == 0 {
            return None;
        }
        let out = Grouping(self.current.clone());
        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }
        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for PowerSet {}
