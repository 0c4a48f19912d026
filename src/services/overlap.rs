use crate::database::models::DateRange;

/// Inclusive-endpoint overlap test: two ranges touch if each starts no later
/// than the other ends. The listing queries in the repositories encode the
/// same predicate in SQL; keep the two in sync.
pub fn overlaps(a: &DateRange, b: &DateRange) -> bool {
    a.start <= b.end && a.end >= b.start
}
