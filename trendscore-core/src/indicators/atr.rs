//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|), TR[0] = high-low.
//! Seed: ATR[period-1] = mean of TR[0..period].
//! Thereafter Wilder smoothing: (prev * (period - 1) + TR) / period.
//! Requires period + 1 bars.

use super::aligned;
use crate::domain::Series;

/// True Range series. Empty when the slices disagree in length.
pub fn true_range(highs: &[f64], lows: &[f64], closes: &[f64]) -> Vec<f64> {
    let n = closes.len();
    if n == 0 || !aligned(n, &[highs, lows]) {
        return Vec::new();
    }

    let mut tr = Vec::with_capacity(n);
    tr.push(highs[0] - lows[0]);
    for i in 1..n {
        let (h, l, pc) = (highs[i], lows[i], closes[i - 1]);
        tr.push((h - l).max((h - pc).abs()).max((l - pc).abs()));
    }
    tr
}

pub fn atr(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Option<Series> {
    let n = closes.len();
    if period == 0 || n < period + 1 || !aligned(n, &[highs, lows]) {
        return None;
    }

    let tr = true_range(highs, lows, closes);
    let p = period as f64;
    let mut result = vec![None; n];

    let seed = tr[..period].iter().sum::<f64>() / p;
    result[period - 1] = Some(seed);

    let mut prev = seed;
    for (i, &range) in tr.iter().enumerate().skip(period) {
        let next = (prev * (p - 1.0) + range) / p;
        result[i] = Some(next);
        prev = next;
    }

    Some(result)
}
