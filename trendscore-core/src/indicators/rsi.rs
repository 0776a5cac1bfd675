//! Relative Strength Index (RSI).
//!
//! Uses Wilder smoothing of average gains and average losses.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Warm-up: period slots (the first value needs `period` deltas).
//! Edge case: avg_loss == 0 → RSI = 100, including a flat series.

use crate::domain::{latest, Series};

/// Full RSI series. `None` unless `values.len() > period`.
pub fn rsi_series(values: &[f64], period: usize) -> Option<Series> {
    let n = values.len();
    if period == 0 || n <= period {
        return None;
    }

    let mut result = vec![None; n];
    let p = period as f64;

    // Seed: plain averages over the first `period` deltas
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for w in values[..=period].windows(2) {
        let change = w[1] - w[0];
        if change >= 0.0 {
            avg_gain += change;
        } else {
            avg_loss -= change;
        }
    }
    avg_gain /= p;
    avg_loss /= p;
    result[period] = Some(rsi_value(avg_gain, avg_loss));

    for i in (period + 1)..n {
        let change = values[i] - values[i - 1];
        avg_gain = (avg_gain * (p - 1.0) + change.max(0.0)) / p;
        avg_loss = (avg_loss * (p - 1.0) + (-change).max(0.0)) / p;
        result[i] = Some(rsi_value(avg_gain, avg_loss));
    }

    Some(result)
}

/// Latest RSI value only.
pub fn rsi(values: &[f64], period: usize) -> Option<f64> {
    rsi_series(values, period).and_then(|s| latest(&s))
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
