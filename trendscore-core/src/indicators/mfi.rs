//! Money Flow Index (MFI): volume-weighted RSI analogue.
//!
//! typical = (high + low + close) / 3, raw flow = typical * volume.
//! Over the trailing `period` bars, flows where typical price rose are
//! positive, where it fell are negative (unchanged bars count for neither).
//! MFI = 100 - 100 / (1 + positive / negative), 100 when negative flow is 0.
//! Requires period + 1 bars; first value at index `period`.

use super::aligned;
use crate::domain::Series;

pub fn mfi(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    volumes: &[f64],
    period: usize,
) -> Option<Series> {
    let n = closes.len();
    if period == 0 || n < period + 1 || !aligned(n, &[highs, lows, volumes]) {
        return None;
    }

    let typical: Vec<f64> = (0..n)
        .map(|i| (highs[i] + lows[i] + closes[i]) / 3.0)
        .collect();

    let mut result = vec![None; n];
    for i in period..n {
        let mut positive = 0.0;
        let mut negative = 0.0;
        for j in (i + 1 - period)..=i {
            let flow = typical[j] * volumes[j];
            if typical[j] > typical[j - 1] {
                positive += flow;
            } else if typical[j] < typical[j - 1] {
                negative += flow;
            }
        }
        result[i] = Some(if negative == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + positive / negative)
        });
    }

    Some(result)
}
