//! On-Balance Volume (OBV).
//!
//! obv[0] = volume[0]; each later bar adds its volume on an up close,
//! subtracts it on a down close, and carries the previous value otherwise.
//! Requires two bars.

use super::aligned;
use crate::domain::Series;

pub fn obv(closes: &[f64], volumes: &[f64]) -> Option<Series> {
    let n = closes.len();
    if n < 2 || !aligned(n, &[volumes]) {
        return None;
    }

    let mut result = Vec::with_capacity(n);
    let mut running = volumes[0];
    result.push(Some(running));
    for i in 1..n {
        if closes[i] > closes[i - 1] {
            running += volumes[i];
        } else if closes[i] < closes[i - 1] {
            running -= volumes[i];
        }
        result.push(Some(running));
    }

    Some(result)
}
