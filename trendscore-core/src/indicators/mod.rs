//! Series transforms.
//!
//! Every transform is a pure function over one or more aligned `f64` slices
//! and returns `Option<...>`: `None` when the input is shorter than the
//! transform's minimum window (or a period is zero, or the slices disagree in
//! length), otherwise a [`Series`](crate::domain::Series) of the same length
//! as the input whose warm-up slots are `None`.
//!
//! Multi-output transforms (MACD, Bollinger, ADX, Stochastic) return a struct
//! of named series.

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod mfi;
pub mod obv;
pub mod roc;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod vwap;

pub use adx::{adx, AdxSeries};
pub use atr::{atr, true_range};
pub use bollinger::{bollinger, BollingerBands};
pub use ema::ema;
pub use macd::{macd, MacdPoint, MacdSeries};
pub use mfi::mfi;
pub use obv::obv;
pub use roc::roc;
pub use rsi::{rsi, rsi_series};
pub use sma::sma;
pub use stochastic::{stochastic, StochasticSeries};
pub use vwap::vwap;

/// True when every slice has the same length as `expected`.
pub(crate) fn aligned(expected: usize, others: &[&[f64]]) -> bool {
    others.iter().all(|s| s.len() == expected)
}

/// Synthetic highs and lows around a close series for testing.
///
/// Mirrors a plausible bar: open = prev_close (or close for the first bar),
/// high = max(open, close) + 1.0, low = min(open, close) - 1.0.
#[cfg(test)]
pub fn make_high_low(closes: &[f64]) -> (Vec<f64>, Vec<f64>) {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            (open.max(close) + 1.0, open.min(close) - 1.0)
        })
        .unzip()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Assert a series slot is present and approximately equal to `expected`.
#[cfg(test)]
pub fn assert_slot(actual: Option<f64>, expected: f64, epsilon: f64) {
    match actual {
        Some(v) => assert_approx(v, expected, epsilon),
        None => panic!("expected Some({expected}), got None"),
    }
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
