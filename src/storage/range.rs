use std::cmp::Ordering;
use std::ops::Bound;

/// `KeyRange` bounds a scan on the row identifier key space.
///
/// Either end may be inclusive, exclusive or unbounded. Rows are compared as
/// raw bytes, which is the order the store keeps them in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRange {
    start: Bound<Vec<u8>>,
    end: Bound<Vec<u8>>,
}

impl KeyRange {
    pub fn new(start: Bound<Vec<u8>>, end: Bound<Vec<u8>>) -> Self {
        Self { start, end }
    }

    /// A range covering every row.
    pub fn all() -> Self {
        Self::new(Bound::Unbounded, Bound::Unbounded)
    }

    /// A range covering exactly one row.
    pub fn exact(row: impl Into<Vec<u8>>) -> Self {
        let row = row.into();
        Self::new(Bound::Included(row.clone()), Bound::Included(row))
    }

    pub fn at_least(row: impl Into<Vec<u8>>) -> Self {
        Self::new(Bound::Included(row.into()), Bound::Unbounded)
    }

    pub fn greater_than(row: impl Into<Vec<u8>>) -> Self {
        Self::new(Bound::Excluded(row.into()), Bound::Unbounded)
    }

    pub fn at_most(row: impl Into<Vec<u8>>) -> Self {
        Self::new(Bound::Unbounded, Bound::Included(row.into()))
    }

    pub fn less_than(row: impl Into<Vec<u8>>) -> Self {
        Self::new(Bound::Unbounded, Bound::Excluded(row.into()))
    }

    pub fn start(&self) -> &Bound<Vec<u8>> {
        &self.start
    }

    pub fn end(&self) -> &Bound<Vec<u8>> {
        &self.end
    }

    /// Returns the range holding the rows that both ranges hold.
    pub fn intersect(&self, other: &KeyRange) -> KeyRange {
        KeyRange::new(
            tighter_start(&self.start, &other.start),
            tighter_end(&self.end, &other.end),
        )
    }

    /// Returns `true` if no row can fall inside the range.
    pub fn is_empty(&self) -> bool {
        match (&self.start, &self.end) {
            (Bound::Included(start), Bound::Included(end)) => start > end,
            (Bound::Included(start), Bound::Excluded(end))
            | (Bound::Excluded(start), Bound::Included(end))
            | (Bound::Excluded(start), Bound::Excluded(end)) => start >= end,
            _ => false,
        }
    }

    pub(crate) fn is_after_start(&self, row: &[u8]) -> bool {
        match &self.start {
            Bound::Included(start) => row >= start.as_slice(),
            Bound::Excluded(start) => row > start.as_slice(),
            Bound::Unbounded => true,
        }
    }

    pub(crate) fn is_before_end(&self, row: &[u8]) -> bool {
        match &self.end {
            Bound::Included(end) => row <= end.as_slice(),
            Bound::Excluded(end) => row < end.as_slice(),
            Bound::Unbounded => true,
        }
    }

    pub fn contains(&self, row: &[u8]) -> bool {
        self.is_after_start(row) && self.is_before_end(row)
    }

    /// Drops empty ranges, then sorts and merges the rest so that no row is
    /// covered twice and the ranges are in key order.
    pub fn normalize(ranges: Vec<KeyRange>) -> Vec<KeyRange> {
        let mut ranges: Vec<KeyRange> = ranges
            .into_iter()
            .filter(|range| !range.is_empty())
            .collect();
        ranges.sort_by(|left, right| compare_starts(&left.start, &right.start));

        let mut merged: Vec<KeyRange> = Vec::with_capacity(ranges.len());
        for range in ranges {
            match merged.last_mut() {
                Some(last) if reaches(&last.end, &range.start) => {
                    last.end = looser_end(&last.end, &range.end);
                }
                _ => merged.push(range),
            }
        }
        merged
    }
}

fn compare_starts(left: &Bound<Vec<u8>>, right: &Bound<Vec<u8>>) -> Ordering {
    match (left, right) {
        (Bound::Unbounded, Bound::Unbounded) => Ordering::Equal,
        (Bound::Unbounded, _) => Ordering::Less,
        (_, Bound::Unbounded) => Ordering::Greater,
        (Bound::Included(l), Bound::Included(r)) | (Bound::Excluded(l), Bound::Excluded(r)) => {
            l.cmp(r)
        }
        (Bound::Included(l), Bound::Excluded(r)) => l.cmp(r).then(Ordering::Less),
        (Bound::Excluded(l), Bound::Included(r)) => l.cmp(r).then(Ordering::Greater),
    }
}

/// Returns `true` if a range starting at `start` overlaps or touches one ending at `end`.
fn reaches(end: &Bound<Vec<u8>>, start: &Bound<Vec<u8>>) -> bool {
    match (end, start) {
        (Bound::Unbounded, _) | (_, Bound::Unbounded) => true,
        (Bound::Excluded(end), Bound::Excluded(start)) => start < end,
        (Bound::Included(end), Bound::Included(start))
        | (Bound::Included(end), Bound::Excluded(start))
        | (Bound::Excluded(end), Bound::Included(start)) => start <= end,
    }
}

fn looser_end(left: &Bound<Vec<u8>>, right: &Bound<Vec<u8>>) -> Bound<Vec<u8>> {
    match (left, right) {
        (Bound::Unbounded, _) | (_, Bound::Unbounded) => Bound::Unbounded,
        (Bound::Included(l), Bound::Included(r)) => Bound::Included(l.max(r).clone()),
        (Bound::Excluded(l), Bound::Excluded(r)) => Bound::Excluded(l.max(r).clone()),
        (Bound::Included(included), Bound::Excluded(excluded))
        | (Bound::Excluded(excluded), Bound::Included(included)) => {
            if included >= excluded {
                Bound::Included(included.clone())
            } else {
                Bound::Excluded(excluded.clone())
            }
        }
    }
}

fn tighter_start(left: &Bound<Vec<u8>>, right: &Bound<Vec<u8>>) -> Bound<Vec<u8>> {
    match (left, right) {
        (Bound::Unbounded, other) | (other, Bound::Unbounded) => other.clone(),
        (Bound::Included(l), Bound::Included(r)) => Bound::Included(l.max(r).clone()),
        (Bound::Excluded(l), Bound::Excluded(r)) => Bound::Excluded(l.max(r).clone()),
        (Bound::Included(included), Bound::Excluded(excluded))
        | (Bound::Excluded(excluded), Bound::Included(included)) => {
            if included > excluded {
                Bound::Included(included.clone())
            } else {
                Bound::Excluded(excluded.clone())
            }
        }
    }
}

fn tighter_end(left: &Bound<Vec<u8>>, right: &Bound<Vec<u8>>) -> Bound<Vec<u8>> {
    match (left, right) {
        (Bound::Unbounded, other) | (other, Bound::Unbounded) => other.clone(),
        (Bound::Included(l), Bound::Included(r)) => Bound::Included(l.min(r).clone()),
        (Bound::Excluded(l), Bound::Excluded(r)) => Bound::Excluded(l.min(r).clone()),
        (Bound::Included(included), Bound::Excluded(excluded))
        | (Bound::Excluded(excluded), Bound::Included(included)) => {
            if included < excluded {
                Bound::Included(included.clone())
            } else {
                Bound::Excluded(excluded.clone())
            }
        }
    }
}
