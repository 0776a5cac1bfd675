//! Price series handed to the scorer, and their validation.

use crate::domain::Bar;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("{series} has {actual} values but closes has {expected}")]
    LengthMismatch {
        series: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("highs and lows must be supplied together")]
    UnpairedHighLow,

    #[error("{series}[{index}] is not a finite number")]
    NonFinite { series: &'static str, index: usize },
}

/// Closing prices plus the optional OHLCV companions, index-aligned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceInput {
    pub closes: Vec<f64>,
    pub highs: Option<Vec<f64>>,
    pub lows: Option<Vec<f64>>,
    pub volumes: Option<Vec<f64>>,
}

impl PriceInput {
    /// Close-only input; every high/low/volume based indicator is skipped.
    pub fn new(closes: Vec<f64>) -> Self {
        Self {
            closes,
            ..Self::default()
        }
    }

    pub fn with_volumes(mut self, volumes: Vec<f64>) -> Self {
        self.volumes = Some(volumes);
        self
    }

    pub fn with_high_low(mut self, highs: Vec<f64>, lows: Vec<f64>) -> Self {
        self.highs = Some(highs);
        self.lows = Some(lows);
        self
    }

    /// Full OHLCV input from bars.
    pub fn from_bars(bars: &[Bar]) -> Self {
        Self {
            closes: bars.iter().map(|b| b.close).collect(),
            highs: Some(bars.iter().map(|b| b.high).collect()),
            lows: Some(bars.iter().map(|b| b.low).collect()),
            volumes: Some(bars.iter().map(|b| b.volume).collect()),
        }
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// Highs and lows as a pair; `validate` guarantees both or neither.
    pub fn high_low(&self) -> Option<(&[f64], &[f64])> {
        match (&self.highs, &self.lows) {
            (Some(h), Some(l)) => Some((h.as_slice(), l.as_slice())),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.highs.is_some() != self.lows.is_some() {
            return Err(AnalysisError::UnpairedHighLow);
        }

        let expected = self.closes.len();
        check_finite("closes", &self.closes)?;
        for (series, values) in [
            ("highs", &self.highs),
            ("lows", &self.lows),
            ("volumes", &self.volumes),
        ] {
            let Some(values) = values else { continue };
            if values.len() != expected {
                return Err(AnalysisError::LengthMismatch {
                    series,
                    expected,
                    actual: values.len(),
                });
            }
            check_finite(series, values)?;
        }
        Ok(())
    }
}

fn check_finite(series: &'static str, values: &[f64]) -> Result<(), AnalysisError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(AnalysisError::NonFinite { series, index }),
        None => Ok(()),
    }
}
