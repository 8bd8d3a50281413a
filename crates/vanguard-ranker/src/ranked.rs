//! A ranked movement path.

use std::cmp::Ordering;

use vanguard_pathing::path::MovePath;

/// A candidate path with the utility the ranker assigned it and a
/// human-readable breakdown of how that utility came about. The breakdown
/// is diagnostic only; decisions compare `rank`.
#[derive(Debug, Clone)]
pub struct RankedPath {
    pub path: MovePath,
    pub rank: f64,
    /// Term-by-term breakdown, for later inspection.
    pub reason: String,
}

impl RankedPath {
    pub fn new(path: MovePath, rank: f64, reason: String) -> Self {
        Self { path, rank, reason }
    }
}

impl PartialEq for RankedPath {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankedPath {}

impl PartialOrd for RankedPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RankedPath {
    /// Rank ascending; equal ranks fall back to the path's stable hash so
    /// the order is total and identical across runs.
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .total_cmp(&other.rank)
            .then_with(|| self.path.stable_hash().cmp(&other.path.stable_hash()))
    }
}
