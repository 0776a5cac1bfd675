//! Output of one analysis call.

use super::score::{ScoreBreakdown, Sentiment};
use super::zones::PriceRange;
use serde::{Deserialize, Serialize};

pub const NOT_ENOUGH_DATA: &str = "Not enough data to compute indicators";
pub const COMPUTE_FAILED: &str = "Could not compute indicators from the data returned.";

/// Latest indicator values, the score and derived trade levels.
///
/// Every field is always present; indicators that could not be computed
/// from the supplied series are `None` (levels are empty).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub latest_price: f64,
    pub ema_short: f64,
    pub ema_long: f64,
    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub macd_hist: f64,

    pub score: i32,
    pub score_breakdown: ScoreBreakdown,
    pub sentiment: Sentiment,
    pub buy_zone: Option<PriceRange>,
    pub sell_targets: Vec<f64>,
    pub stop_loss: Option<f64>,
    pub note: String,

    pub volume_ma: Option<f64>,
    pub current_volume: Option<f64>,
    pub obv: Option<f64>,
    pub vwap: Option<f64>,
    pub bollinger_upper: Option<f64>,
    pub bollinger_middle: Option<f64>,
    pub bollinger_lower: Option<f64>,
    pub bollinger_percent_b: Option<f64>,
    pub atr: Option<f64>,
    pub atr_percent: Option<f64>,

    pub adx: Option<f64>,
    pub plus_di: Option<f64>,
    pub minus_di: Option<f64>,
    pub mfi: Option<f64>,
    pub stochastic_k: Option<f64>,
    pub stochastic_d: Option<f64>,
    pub roc: Option<f64>,
    pub support_levels: Vec<f64>,
    pub resistance_levels: Vec<f64>,
    /// `None` when the long EMA is zero.
    pub distance_from_ema_long_pct: Option<f64>,
}

/// Returned instead of a result when the input can't support a score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsufficientData {
    pub error: String,
}

/// Serialized untagged: a scored result, or just `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Analysis {
    Scored(Box<AnalysisResult>),
    Insufficient(InsufficientData),
}

impl Analysis {
    pub(crate) fn not_enough_bars(min_bars: usize) -> Self {
        Analysis::Insufficient(InsufficientData {
            error: format!("{NOT_ENOUGH_DATA} (need about {min_bars} bars for this timeframe)."),
        })
    }

    pub(crate) fn compute_failed() -> Self {
        Analysis::Insufficient(InsufficientData {
            error: COMPUTE_FAILED.to_string(),
        })
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            Analysis::Scored(r) => Some(r.as_ref()),
            Analysis::Insufficient(_) => None,
        }
    }

    pub fn into_result(self) -> Option<AnalysisResult> {
        match self {
            Analysis::Scored(r) => Some(*r),
            Analysis::Insufficient(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Analysis::Scored(_) => None,
            Analysis::Insufficient(e) => Some(&e.error),
        }
    }

    pub fn is_scored(&self) -> bool {
        matches!(self, Analysis::Scored(_))
    }
}
