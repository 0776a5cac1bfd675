//! Stochastic Oscillator (%K, %D).
//!
//! %K = 100 * (close - lowest_low) / (highest_high - lowest_low) over the
//! trailing `k_period` bars, 50 when the range is zero.
//! %D = sum of the present %K values in the trailing `d_period` window
//! divided by `d_period`, from index k_period + d_period - 2.
//! Requires k_period bars.

use super::aligned;
use crate::domain::{latest, Series};

#[derive(Debug, Clone, PartialEq)]
pub struct StochasticSeries {
    pub k: Series,
    pub d: Series,
}

impl StochasticSeries {
    pub fn latest_k(&self) -> Option<f64> {
        latest(&self.k)
    }

    pub fn latest_d(&self) -> Option<f64> {
        latest(&self.d)
    }
}

pub fn stochastic(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    k_period: usize,
    d_period: usize,
) -> Option<StochasticSeries> {
    let n = closes.len();
    if k_period == 0 || d_period == 0 || n < k_period || !aligned(n, &[highs, lows]) {
        return None;
    }

    let mut k = vec![None; n];
    for i in (k_period - 1)..n {
        let start = i + 1 - k_period;
        let highest = highs[start..=i].iter().copied().fold(f64::MIN, f64::max);
        let lowest = lows[start..=i].iter().copied().fold(f64::MAX, f64::min);
        k[i] = Some(if highest != lowest {
            100.0 * (closes[i] - lowest) / (highest - lowest)
        } else {
            50.0
        });
    }

    let mut d = vec![None; n];
    for i in (k_period + d_period - 2)..n {
        let sum: f64 = k[(i + 1 - d_period)..=i].iter().flatten().sum();
        d[i] = Some(sum / d_period as f64);
    }

    Some(StochasticSeries { k, d })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::series::warmup_len;
    use crate::indicators::{assert_slot, make_high_low, DEFAULT_EPSILON};

    #[test]
    fn stochastic_known_values() {
        let highs = [10.0, 12.0, 14.0, 13.0];
        let lows = [8.0, 9.0, 11.0, 10.0];
        let closes = [9.0, 11.0, 13.0, 11.0];
        let s = stochastic(&highs, &lows, &closes, 3, 2).unwrap();

        // index 2: range [8, 14], close 13 → 5/6
        assert_slot(s.k[2], 100.0 * 5.0 / 6.0, DEFAULT_EPSILON);
        // index 3: range [9, 14], close 11 → 2/5
        assert_slot(s.k[3], 40.0, DEFAULT_EPSILON);
        assert_slot(s.d[3], (100.0 * 5.0 / 6.0 + 40.0) / 2.0, DEFAULT_EPSILON);
        assert_eq!(warmup_len(&s.d), 3);
    }

    #[test]
    fn stochastic_zero_range_is_50() {
        let flat = [5.0; 6];
        let s = stochastic(&flat, &flat, &flat, 3, 3).unwrap();
        assert_eq!(s.latest_k(), Some(50.0));
        assert_eq!(s.latest_d(), Some(50.0));
    }

    #[test]
    fn stochastic_bounds() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
        let (highs, lows) = make_high_low(&closes);
        let s = stochastic(&highs, &lows, &closes, 14, 3).unwrap();
        for v in s.k.iter().chain(s.d.iter()).flatten() {
            assert!((0.0..=100.0).contains(v), "stochastic out of bounds: {v}");
        }
    }

    #[test]
    fn stochastic_too_few_bars() {
        assert!(stochastic(&[1.0, 2.0], &[1.0, 2.0], &[1.0, 2.0], 3, 3).is_none());
    }
}
