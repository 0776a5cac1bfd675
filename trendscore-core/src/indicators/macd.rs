//! Moving Average Convergence Divergence (MACD).
//!
//! line      = EMA(fast) - EMA(slow), absent where either EMA is absent
//! signal    = EMA(signal) over the present line values, mapped back to bar index
//! histogram = line - signal, where both are present
//!
//! Requires at least `slow + signal` values.

use super::ema::ema;
use crate::domain::{latest, Series};

#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd_line: Series,
    pub signal_line: Series,
    pub histogram: Series,
}

/// MACD values at a single bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdPoint {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

impl MacdSeries {
    /// Values in the final slot, if all three are present.
    pub fn latest(&self) -> Option<MacdPoint> {
        Some(MacdPoint {
            macd: latest(&self.macd_line)?,
            signal: latest(&self.signal_line)?,
            histogram: latest(&self.histogram)?,
        })
    }
}

pub fn macd(values: &[f64], fast: usize, slow: usize, signal: usize) -> Option<MacdSeries> {
    let n = values.len();
    if signal == 0 || n < slow + signal {
        return None;
    }

    let fast_ema = ema(values, fast)?;
    let slow_ema = ema(values, slow)?;

    let macd_line: Series = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f.zip(*s).map(|(f, s)| f - s))
        .collect();

    let present: Vec<(usize, f64)> = macd_line
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .collect();
    let compact: Vec<f64> = present.iter().map(|&(_, v)| v).collect();
    let compact_signal = ema(&compact, signal)?;

    let mut signal_line = vec![None; n];
    for (&(idx, _), value) in present.iter().zip(compact_signal) {
        signal_line[idx] = value;
    }

    let histogram: Series = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| m.zip(*s).map(|(m, s)| m - s))
        .collect();

    Some(MacdSeries {
        macd_line,
        signal_line,
        histogram,
    })
}
