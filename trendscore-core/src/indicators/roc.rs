//! Rate of Change (ROC).
//!
//! Percentage price change over N bars.
//! ROC[t] = (close[t] - close[t-period]) / close[t-period] * 100
//! Absent where the base price is zero. Requires period + 1 values.

use crate::domain::Series;

pub fn roc(closes: &[f64], period: usize) -> Option<Series> {
    let n = closes.len();
    if period == 0 || n < period + 1 {
        return None;
    }

    let mut result = vec![None; n];
    for i in period..n {
        let past = closes[i - period];
        if past != 0.0 {
            result[i] = Some((closes[i] - past) / past * 100.0);
        }
    }

    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_slot, DEFAULT_EPSILON};

    #[test]
    fn roc_basic() {
        let result = roc(&[100.0, 110.0, 121.0], 1).unwrap();
        assert_eq!(result[0], None);
        assert_slot(result[1], 10.0, DEFAULT_EPSILON);
        assert_slot(result[2], 10.0, DEFAULT_EPSILON);
    }

    #[test]
    fn roc_period_2() {
        let result = roc(&[100.0, 110.0, 121.0], 2).unwrap();
        assert_eq!(result[1], None);
        assert_slot(result[2], 21.0, DEFAULT_EPSILON);
    }

    #[test]
    fn roc_negative() {
        let result = roc(&[100.0, 90.0], 1).unwrap();
        assert_slot(result[1], -10.0, DEFAULT_EPSILON);
    }

    #[test]
    fn roc_zero_base_is_absent() {
        let result = roc(&[0.0, 5.0, 10.0], 1).unwrap();
        assert_eq!(result[1], None);
        assert_slot(result[2], 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn roc_too_few_values() {
        assert!(roc(&[100.0, 110.0], 2).is_none());
    }
}
