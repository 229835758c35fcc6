use std::fmt;

use crate::errors::{NormalizerError, Result};

/// Represent a range from [start, end) in inter-residue coordinates.
///
/// `start == end` is a zero-width insertion point between two residues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    start: u64,
    end: u64,
}

impl Interval {
    pub fn new(start: u64, end: u64) -> Result<Self> {
        if start > end {
            return Err(NormalizerError::InvalidArgument(format!(
                "interval start {} is past its end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Convert a closed, 1-based residue range (`first..=last`) as written in HGVS.
    pub fn from_residues(first: u64, last: u64) -> Result<Self> {
        if first == 0 {
            return Err(NormalizerError::InvalidArgument(
                "residue positions are 1-based and must be at least 1".to_string(),
            ));
        }
        if first > last {
            return Err(NormalizerError::InvalidArgument(format!(
                "start position {} is greater than end position {}",
                first, last
            )));
        }
        Ok(Self {
            start: first - 1,
            end: last,
        })
    }

    /// The zero-width interval sitting right after residue `position` (1-based).
    pub fn insertion_after(position: u64) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    #[inline]
    pub fn start(&self) -> u64 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> u64 {
        self.end
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `other` lies entirely within this interval.
    #[inline]
    pub fn contains(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(1, 1, 0, 1)]
    #[case(140453136, 140453137, 140453135, 140453137)]
    fn converts_residues(#[case] first: u64, #[case] last: u64, #[case] start: u64, #[case] end: u64) {
        let interval = Interval::from_residues(first, last).unwrap();
        assert_eq!((interval.start(), interval.end()), (start, end));
        assert_eq!(interval.len(), last - first + 1);
    }

    #[rstest]
    #[case(0, 5)]
    #[case(6, 5)]
    fn rejects_bad_residues(#[case] first: u64, #[case] last: u64) {
        assert!(matches!(
            Interval::from_residues(first, last),
            Err(NormalizerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn insertion_point_is_empty() {
        let point = Interval::insertion_after(10);
        assert!(point.is_empty());
        assert_eq!(point.start(), 10);
    }

    #[test]
    fn containment() {
        let outer = Interval::new(10, 20).unwrap();
        assert!(outer.contains(&Interval::new(10, 20).unwrap()));
        assert!(outer.contains(&Interval::new(15, 15).unwrap()));
        assert!(!outer.contains(&Interval::new(9, 12).unwrap()));
        assert!(Interval::new(3, 2).is_err());
    }
}
