//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = k * value[t] + (1 - k) * EMA[t-1], k = 2 / (period + 1),
//! evaluated as EMA[t-1] + k * (value[t] - EMA[t-1]) so constant input stays
//! exactly constant.
//! Seed: EMA[period-1] = SMA of the first `period` values, taken as
//! values[0] plus the mean offset from it.
//! Warm-up: period - 1 slots.

use crate::domain::Series;

/// EMA over an arbitrary value slice. `None` when `values.len() < period`.
pub fn ema(values: &[f64], period: usize) -> Option<Series> {
    let n = values.len();
    if period == 0 || n < period {
        return None;
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut result = vec![None; n];

    let base = values[0];
    let offset = values[..period].iter().map(|v| v - base).sum::<f64>() / period as f64;
    let seed = base + offset;
    result[period - 1] = Some(seed);

    let mut prev = seed;
    for (i, &value) in values.iter().enumerate().skip(period) {
        let next = prev + k * (value - prev);
        result[i] = Some(next);
        prev = next;
    }

    Some(result)
}
