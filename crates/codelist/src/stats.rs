use crate::ranges::CodeRange;
use itertools::Itertools;
use std::collections::BTreeSet;

/// Size and bounds of a loaded code set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeSummary {
    pub count: usize,
    pub min: i64,
    pub max: i64,
}

impl CodeSummary {
    /// Returns None for an empty set
    pub fn from_codes(codes: &BTreeSet<i64>) -> Option<Self> {
        Some(Self {
            count: codes.len(),
            min: *codes.first()?,
            max: *codes.last()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeReport {
    pub range_count: usize,
    pub singleton_count: usize,
    /// integers spanned by all ranges, members or not
    pub covered: u64,
    /// `next.start - previous.end` for each consecutive pair
    pub gaps: Vec<u64>,
}

impl RangeReport {
    pub fn from_ranges(ranges: &[CodeRange]) -> Self {
        let gaps = ranges
            .iter()
            .tuple_windows()
            .map(|(prev, next)| next.start().abs_diff(prev.end()))
            .collect();

        Self {
            range_count: ranges.len(),
            singleton_count: ranges.iter().filter(|r| r.is_singleton()).count(),
            covered: ranges.iter().map(CodeRange::len).fold(0, u64::saturating_add),
            gaps,
        }
    }

    pub fn max_gap(&self) -> Option<u64> {
        self.gaps.iter().copied().max()
    }
}
