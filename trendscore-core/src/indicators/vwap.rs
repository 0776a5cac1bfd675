//! Volume-Weighted Average Price (VWAP).
//!
//! Cumulative over the whole supplied window (no session reset):
//! VWAP[t] = sum(typical * volume) / sum(volume) over bars 0..=t, where
//! typical = (high + low + close) / 3, or close when highs/lows are absent.
//! Slots stay absent while cumulative volume is zero. Callers wanting a
//! per-session VWAP pass one session at a time.

use super::aligned;
use crate::domain::Series;

pub fn vwap(
    closes: &[f64],
    highs: Option<&[f64]>,
    lows: Option<&[f64]>,
    volumes: &[f64],
) -> Option<Series> {
    let n = closes.len();
    if n == 0 || !aligned(n, &[volumes]) {
        return None;
    }
    let high_low = match (highs, lows) {
        (Some(h), Some(l)) if aligned(n, &[h, l]) => Some((h, l)),
        _ => None,
    };

    let mut result = Vec::with_capacity(n);
    let mut cumulative_pv = 0.0;
    let mut cumulative_volume = 0.0;
    for i in 0..n {
        let typical = match high_low {
            Some((h, l)) => (h[i] + l[i] + closes[i]) / 3.0,
            None => closes[i],
        };
        cumulative_pv += typical * volumes[i];
        cumulative_volume += volumes[i];
        result.push((cumulative_volume > 0.0).then(|| cumulative_pv / cumulative_volume));
    }

    Some(result)
}
