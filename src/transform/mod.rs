//! Series transformations: join, truncation, extrapolation, and quarter arithmetic.

pub mod calendar;
pub mod combine;
pub mod extrapolate;

pub use calendar::{next_update_estimate, period_end, period_label};
pub use combine::{combine, join_series};
pub use extrapolate::{DEFAULT_ANNUAL_RATE, annual_growth_rate, realtime_snapshot};

/// Keep the most recent `keep` entries (`0` keeps everything).
pub fn keep_latest<T: Clone>(items: &[T], keep: usize) -> Vec<T> {
    if keep == 0 || items.len() <= keep {
        return items.to_vec();
    }
    items[items.len() - keep..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keep_latest_truncates_from_the_front() {
        let items: Vec<u32> = (1..=30).collect();
        let kept = keep_latest(&items, 22);
        assert_eq!(kept.len(), 22);
        assert_eq!(kept[0], 9);
        assert_eq!(*kept.last().unwrap(), 30);

        assert_eq!(keep_latest(&items, 0).len(), 30);
        assert_eq!(keep_latest(&items[..3], 22).len(), 3);
    }
}
