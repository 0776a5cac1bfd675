//! ADX: Average Directional Index (Wilder).
//!
//! Steps:
//! 1. +DM / -DM from consecutive bars (only the larger positive move counts)
//! 2. Wilder running sums of TR, +DM, -DM seeded at index `period`
//! 3. +DI = 100 * sum(+DM) / sum(TR), -DI likewise (absent when sum(TR) == 0)
//! 4. DX = 100 * |+DI - -DI| / (+DI + -DI) (absent when the DI sum is 0)
//! 5. ADX seeded at 2*period-1 with the mean of the available DX values in
//!    [period, 2*period), then Wilder-smoothed while DX is present
//!
//! Requires 2 * period bars.

use super::aligned;
use crate::domain::{latest, Series};

#[derive(Debug, Clone, PartialEq)]
pub struct AdxSeries {
    pub adx: Series,
    pub plus_di: Series,
    pub minus_di: Series,
}

impl AdxSeries {
    pub fn latest_adx(&self) -> Option<f64> {
        latest(&self.adx)
    }

    /// +DI above -DI in the final slot.
    pub fn plus_di_leads(&self) -> bool {
        matches!(
            (latest(&self.plus_di), latest(&self.minus_di)),
            (Some(plus), Some(minus)) if plus > minus
        )
    }
}

pub fn adx(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Option<AdxSeries> {
    let n = closes.len();
    if period == 0 || n < period * 2 || !aligned(n, &[highs, lows]) {
        return None;
    }

    // Step 1: directional movement and true range (index 0 stays zero)
    let mut tr = vec![0.0; n];
    let mut plus_dm = vec![0.0; n];
    let mut minus_dm = vec![0.0; n];
    for i in 1..n {
        let (h, l, pc) = (highs[i], lows[i], closes[i - 1]);
        tr[i] = (h - l).max((h - pc).abs()).max((l - pc).abs());

        let up_move = h - highs[i - 1];
        let down_move = lows[i - 1] - l;
        if up_move > down_move && up_move > 0.0 {
            plus_dm[i] = up_move;
        }
        if down_move > up_move && down_move > 0.0 {
            minus_dm[i] = down_move;
        }
    }

    // Step 2: Wilder running sums
    let smooth_tr = wilder_sum(&tr, period);
    let smooth_plus = wilder_sum(&plus_dm, period);
    let smooth_minus = wilder_sum(&minus_dm, period);

    // Steps 3-4
    let mut plus_di = vec![None; n];
    let mut minus_di = vec![None; n];
    let mut dx: Series = vec![None; n];
    for i in period..n {
        if smooth_tr[i] == 0.0 {
            continue;
        }
        let plus = 100.0 * smooth_plus[i] / smooth_tr[i];
        let minus = 100.0 * smooth_minus[i] / smooth_tr[i];
        plus_di[i] = Some(plus);
        minus_di[i] = Some(minus);

        let di_sum = plus + minus;
        if di_sum != 0.0 {
            dx[i] = Some(100.0 * (plus - minus).abs() / di_sum);
        }
    }

    // Step 5
    let mut adx: Series = vec![None; n];
    let seed: Vec<f64> = dx[period..period * 2].iter().flatten().copied().collect();
    if !seed.is_empty() {
        adx[period * 2 - 1] = Some(seed.iter().sum::<f64>() / seed.len() as f64);
    }
    let p = period as f64;
    for i in (period * 2)..n {
        if let (Some(prev), Some(d)) = (adx[i - 1], dx[i]) {
            adx[i] = Some((prev * (p - 1.0) + d) / p);
        }
    }

    Some(AdxSeries {
        adx,
        plus_di,
        minus_di,
    })
}

/// Wilder running sum: seed = sum of values[1..=period] at index `period`,
/// then sum[i] = sum[i-1] - sum[i-1] / period + values[i].
fn wilder_sum(values: &[f64], period: usize) -> Vec<f64> {
    let mut result = vec![0.0; values.len()];
    result[period] = values[1..=period].iter().sum();
    for i in (period + 1)..values.len() {
        result[i] = result[i - 1] - result[i - 1] / period as f64 + values[i];
    }
    result
}
