//! Simple Moving Average (SMA).
//!
//! Trailing mean over a fixed window; used for the volume moving average.
//! Warm-up: period - 1 slots.

use crate::domain::Series;

pub fn sma(values: &[f64], period: usize) -> Option<Series> {
    let n = values.len();
    if period == 0 || n < period {
        return None;
    }

    let mut result = vec![None; period - 1];
    result.extend(
        values
            .windows(period)
            .map(|w| Some(w.iter().sum::<f64>() / period as f64)),
    );
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_slot, DEFAULT_EPSILON};

    #[test]
    fn sma_5_basic() {
        let result = sma(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0], 5).unwrap();

        assert_eq!(result.len(), 7);
        for (i, v) in result.iter().take(4).enumerate() {
            assert!(v.is_none(), "expected None at index {i}");
        }
        assert_slot(result[4], 12.0, DEFAULT_EPSILON);
        assert_slot(result[5], 13.0, DEFAULT_EPSILON);
        assert_slot(result[6], 14.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_1_is_input() {
        let result = sma(&[100.0, 200.0, 300.0], 1).unwrap();
        assert_eq!(result, vec![Some(100.0), Some(200.0), Some(300.0)]);
    }

    #[test]
    fn sma_too_few_values() {
        assert!(sma(&[10.0, 11.0], 5).is_none());
    }
}
