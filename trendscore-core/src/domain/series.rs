//! Index-aligned indicator output.
//!
//! A series has one slot per input bar. `None` marks warm-up slots where the
//! transform lacks history; slots are never compacted.

/// Aligned indicator output, one slot per input bar.
pub type Series = Vec<Option<f64>>;

/// Value in the final slot, or `None` if the series is empty or the final slot
/// is still warming up.
pub fn latest(series: &[Option<f64>]) -> Option<f64> {
    series.last().copied().flatten()
}

/// Number of leading `None` slots.
pub fn warmup_len(series: &[Option<f64>]) -> usize {
    series.iter().take_while(|v| v.is_none()).count()
}
