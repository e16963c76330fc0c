//! Range compression of integer codes.
//!
//! A sorted set of codes is folded into inclusive [`CodeRange`]s. Two
//! neighbouring codes belong to the same range when the number of integers
//! missing between them is at most the gap tolerance, so a tolerance of `0`
//! only merges strictly consecutive codes.
//!
//! ```
//! use codelist::ranges::{CodeRange, compress};
//!
//! let ranges = compress([1, 2, 3, 100, 101, 102], 5).unwrap();
//! assert_eq!(ranges, vec![CodeRange::new(1, 3).unwrap(), CodeRange::new(100, 102).unwrap()]);
//! ```

use crate::constants::RANGE_SEPARATOR;
use crate::error::{CodeListError, Result};
use serde::Serialize;
use std::{collections::BTreeSet, fmt, ops::RangeInclusive};

/// Inclusive interval of codes. `start == end` is a single code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CodeRange {
    start: i64,
    end: i64,
}

impl CodeRange {
    pub fn new(start: i64, end: i64) -> Result<Self> {
        if start > end {
            return Err(CodeListError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn singleton(code: i64) -> Self {
        Self {
            start: code,
            end: code,
        }
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    pub fn is_singleton(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, code: i64) -> bool {
        self.start <= code && code <= self.end
    }

    /// Number of integers spanned, members or not. Saturates at `u64::MAX`.
    pub fn len(&self) -> u64 {
        self.end.abs_diff(self.start).saturating_add(1)
    }

    pub fn iter(&self) -> RangeInclusive<i64> {
        self.start..=self.end
    }
}

impl fmt::Display for CodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.start, RANGE_SEPARATOR, self.end)
    }
}

impl From<CodeRange> for RangeInclusive<i64> {
    fn from(range: CodeRange) -> Self {
        range.start..=range.end
    }
}

/// Compresses a collection of codes into ascending, non-overlapping ranges.
///
/// Duplicates collapse and input order does not matter. A new range starts
/// whenever more than `gap_tolerance` integers are missing between a code and
/// the end of the current range.
///
/// # Errors
/// * [`CodeListError::InvalidTolerance`] if `gap_tolerance` is negative
/// * [`CodeListError::EmptyInput`] if `codes` yields nothing
pub fn compress<I>(codes: I, gap_tolerance: i64) -> Result<Vec<CodeRange>>
where
    I: IntoIterator<Item = i64>,
{
    if gap_tolerance < 0 {
        return Err(CodeListError::InvalidTolerance(gap_tolerance));
    }

    let sorted: BTreeSet<i64> = codes.into_iter().collect();
    let mut codes = sorted.into_iter();
    let first = codes.next().ok_or(CodeListError::EmptyInput)?;

    let mut ranges = Vec::new();
    let mut current = CodeRange::singleton(first);
    for code in codes {
        if missing_between(current.end, code) > i128::from(gap_tolerance) {
            ranges.push(current);
            current = CodeRange::singleton(code);
        } else {
            current.end = code;
        }
    }
    ranges.push(current);

    Ok(ranges)
}

/// Every integer covered by `ranges`, including non-members inside a gap.
///
/// Lazy: a range spanning most of `i64` yields values one at a time and
/// never allocates, so only collect it for ranges of a known small width.
pub fn expand(ranges: &[CodeRange]) -> impl Iterator<Item = i64> + '_ {
    ranges.iter().flat_map(CodeRange::iter)
}

// widened so i64::MIN..i64::MAX cannot overflow
fn missing_between(lower: i64, upper: i64) -> i128 {
    i128::from(upper) - i128::from(lower) - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    fn r(start: i64, end: i64) -> CodeRange {
        CodeRange::new(start, end).unwrap()
    }

    #[test]
    fn test_single_code() {
        assert_eq!(compress([5], 0).unwrap(), vec![r(5, 5)]);
        assert!(compress([5], 0).unwrap()[0].is_singleton());
    }

    #[test]
    fn test_far_apart_groups() {
        let ranges = compress([1, 2, 3, 100, 101, 102], 5).unwrap();
        assert_eq!(ranges, vec![r(1, 3), r(100, 102)]);
    }

    #[test]
    fn test_odd_numbers_with_zero_tolerance() {
        let ranges = compress([1, 3, 5, 7, 9], 0).unwrap();
        assert_eq!(ranges, vec![r(1, 1), r(3, 3), r(5, 5), r(7, 7), r(9, 9)]);
    }

    #[test]
    fn test_odd_numbers_with_tolerance_one() {
        assert_eq!(compress([1, 3, 5, 7, 9], 1).unwrap(), vec![r(1, 9)]);
    }

    #[test]
    fn test_consecutive_codes_merge_with_zero_tolerance() {
        assert_eq!(compress([4, 5, 6, 7], 0).unwrap(), vec![r(4, 7)]);
    }

    // 3 -> 10 leaves six integers (4..=9) missing
    #[test_case(5, &[(1, 3), (10, 12)]; "six missing with tolerance five splits")]
    #[test_case(6, &[(1, 12)]; "six missing with tolerance six merges")]
    #[test_case(7, &[(1, 12)]; "six missing with tolerance seven merges")]
    fn test_split_boundary(tolerance: i64, expected: &[(i64, i64)]) {
        let ranges = compress([1, 2, 3, 10, 11, 12], tolerance).unwrap();
        let expected: Vec<_> = expected.iter().map(|&(s, e)| r(s, e)).collect();
        assert_eq!(ranges, expected);
    }

    #[test_case(49, 1; "default tolerance merges codes fifty apart")]
    #[test_case(48, 2; "one less splits codes fifty apart")]
    fn test_default_tolerance_boundary(tolerance: i64, expected_ranges: usize) {
        assert_eq!(compress([100, 150], tolerance).unwrap().len(), expected_ranges);
    }

    #[test]
    fn test_duplicates_and_order_are_ignored() {
        let ranges = compress([12, 3, 1, 1, 2, 12, 11, 10], 0).unwrap();
        assert_eq!(ranges, vec![r(1, 3), r(10, 12)]);
    }

    #[test]
    fn test_negative_codes() {
        let ranges = compress([-10, -9, -8, -1, 0, 1], 0).unwrap();
        assert_eq!(ranges, vec![r(-10, -8), r(-1, 1)]);
    }

    #[test]
    fn test_extreme_values_do_not_overflow() {
        let ranges = compress([i64::MIN, 0], i64::MAX).unwrap();
        assert_eq!(ranges, vec![r(i64::MIN, 0)]);

        let ranges = compress([i64::MIN, i64::MAX], i64::MAX).unwrap();
        assert_eq!(ranges, vec![r(i64::MIN, i64::MIN), r(i64::MAX, i64::MAX)]);
        assert_eq!(r(i64::MIN, i64::MAX).len(), u64::MAX);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let result = compress(Vec::<i64>::new(), 0);
        assert!(matches!(result, Err(CodeListError::EmptyInput)));
    }

    #[test]
    fn test_negative_tolerance_is_rejected() {
        let result = compress([1, 2, 3], -1);
        assert!(matches!(result, Err(CodeListError::InvalidTolerance(-1))));
    }

    #[test]
    fn test_code_range_new_rejects_reversed_bounds() {
        assert!(matches!(
            CodeRange::new(5, 4),
            Err(CodeListError::InvalidRange { start: 5, end: 4 })
        ));
    }

    #[test]
    fn test_code_range_accessors() {
        let range = r(10, 14);
        assert_eq!(range.start(), 10);
        assert_eq!(range.end(), 14);
        assert_eq!(range.len(), 5);
        assert!(range.contains(10));
        assert!(range.contains(14));
        assert!(!range.contains(15));
        assert!(!range.is_singleton());
        assert_eq!(range.to_string(), "10...14");
        assert_eq!(RangeInclusive::from(range), 10..=14);
    }

    #[test]
    fn test_expand_fills_gaps() {
        let ranges = [r(1, 3), r(7, 8)];
        assert_eq!(expand(&ranges).collect::<Vec<_>>(), vec![1, 2, 3, 7, 8]);
    }

    #[test]
    fn test_expand_full_span_is_lazy() {
        let ranges = [r(i64::MIN, i64::MAX)];
        let head: Vec<i64> = expand(&ranges).take(3).collect();
        assert_eq!(head, vec![i64::MIN, i64::MIN + 1, i64::MIN + 2]);
        assert_eq!(expand(&ranges).nth(5), Some(i64::MIN + 5));
    }

    fn code_sets() -> impl Strategy<Value = Vec<i64>> {
        prop::collection::vec(-2_000_i64..2_000, 1..200)
    }

    proptest! {
        #[test]
        fn prop_every_code_in_exactly_one_range(codes in code_sets(), tolerance in 0_i64..60) {
            let ranges = compress(codes.iter().copied(), tolerance)?;
            for code in &codes {
                let hits = ranges.iter().filter(|range| range.contains(*code)).count();
                prop_assert_eq!(hits, 1, "code {} covered {} times", code, hits);
            }
        }

        #[test]
        fn prop_ranges_ascending_and_separated(codes in code_sets(), tolerance in 0_i64..60) {
            let ranges = compress(codes, tolerance)?;
            for range in &ranges {
                prop_assert!(range.start() <= range.end());
            }
            for pair in ranges.windows(2) {
                prop_assert!(pair[0].end() < pair[1].start());
                prop_assert!(missing_between(pair[0].end(), pair[1].start()) > i128::from(tolerance));
            }
        }

        #[test]
        fn prop_recompressing_expanded_ranges_is_stable(codes in code_sets(), tolerance in 0_i64..60) {
            let ranges = compress(codes, tolerance)?;
            let again = compress(expand(&ranges), tolerance)?;
            prop_assert_eq!(ranges, again);
        }

        #[test]
        fn prop_range_bounds_are_input_codes(codes in code_sets(), tolerance in 0_i64..60) {
            let ranges = compress(codes.iter().copied(), tolerance)?;
            for range in &ranges {
                prop_assert!(codes.contains(&range.start()));
                prop_assert!(codes.contains(&range.end()));
            }
        }
    }
}
