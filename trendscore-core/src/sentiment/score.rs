//! Sub-scores, their breakdown, and the sentiment label.
//!
//! Each sub-score is a pure function of latest indicator values so the
//! boundaries can be tested in isolation. Missing inputs score 0.

use crate::indicators::MacdPoint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Relative distance under which price counts as sitting on a level.
pub const LEVEL_PROXIMITY: f64 = 0.02;

/// Per-category contributions; the score is their sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub trend: i32,
    pub momentum: i32,
    pub volume: i32,
    pub volatility: i32,
    pub trend_strength: i32,
    pub money_flow: i32,
    pub price_position: i32,
    pub support_resistance: i32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> i32 {
        self.trend
            + self.momentum
            + self.volume
            + self.volatility
            + self.trend_strength
            + self.money_flow
            + self.price_position
            + self.support_resistance
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    #[serde(rename = "Strong Bullish")]
    StrongBullish,
    Bullish,
    Neutral,
    Bearish,
    #[serde(rename = "Strong Bearish")]
    StrongBearish,
}

impl Sentiment {
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s >= 6 => Sentiment::StrongBullish,
            s if s >= 3 => Sentiment::Bullish,
            s if s >= -2 => Sentiment::Neutral,
            s if s >= -5 => Sentiment::Bearish,
            _ => Sentiment::StrongBearish,
        }
    }

    pub fn is_bullish(self) -> bool {
        matches!(self, Sentiment::StrongBullish | Sentiment::Bullish)
    }

    pub fn is_bearish(self) -> bool {
        matches!(self, Sentiment::StrongBearish | Sentiment::Bearish)
    }

    pub fn label(self) -> &'static str {
        match self {
            Sentiment::StrongBullish => "Strong Bullish",
            Sentiment::Bullish => "Bullish",
            Sentiment::Neutral => "Neutral",
            Sentiment::Bearish => "Bearish",
            Sentiment::StrongBearish => "Strong Bearish",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// -3..=+4 from price and EMA placement. Ties score as bearish.
pub fn trend_score(price: f64, ema_short: f64, ema_long: f64) -> i32 {
    let above_long = if price > ema_long { 2 } else { -2 };
    let stacked = if ema_short > ema_long { 2 } else { -1 };
    above_long + stacked
}

/// -3..=+2 from RSI zone and MACD direction.
pub fn momentum_score(rsi: f64, macd: &MacdPoint) -> i32 {
    let rsi_part = if rsi > 55.0 && rsi < 70.0 {
        1
    } else if rsi < 45.0 && rsi > 30.0 {
        -1
    } else if rsi >= 70.0 || rsi <= 30.0 {
        -2
    } else {
        0
    };
    let macd_part = if macd.histogram > 0.0 && macd.macd > macd.signal {
        1
    } else {
        -1
    };
    rsi_part + macd_part
}

/// -2..=+2: heavy volume confirms the last close-to-close move, light
/// volume under a sizeable move is suspect.
pub fn volume_score(
    current_volume: f64,
    average_volume: Option<f64>,
    price: f64,
    prev_close: Option<f64>,
) -> i32 {
    let Some(average) = average_volume.filter(|a| *a != 0.0) else {
        return 0;
    };
    let change = prev_close.map_or(0.0, |prev| price - prev);

    if current_volume > average * 1.5 {
        if change > 0.0 {
            2
        } else if change < 0.0 {
            -2
        } else {
            0
        }
    } else if current_volume < average * 0.7 {
        let change_pct = if price > 0.0 {
            change.abs() / price * 100.0
        } else {
            0.0
        };
        if change_pct > 0.5 {
            -1
        } else {
            0
        }
    } else {
        0
    }
}

/// -2..=+2 from Bollinger %B, tempered by RSI.
pub fn volatility_score(percent_b: Option<f64>, rsi: f64) -> i32 {
    let Some(pb) = percent_b else { return 0 };
    if pb < 0.2 && rsi < 35.0 {
        2
    } else if pb > 0.8 && rsi > 65.0 {
        -2
    } else if pb > 1.0 {
        -1
    } else if pb < 0.0 {
        1
    } else {
        0
    }
}

/// -2..=+2 from ADX, signed by which directional index leads.
pub fn trend_strength_score(adx: Option<f64>, plus_di_leads: bool) -> i32 {
    let Some(adx) = adx else { return 0 };
    let sign = if plus_di_leads { 1 } else { -1 };
    if adx > 25.0 && adx < 50.0 {
        2 * sign
    } else if adx >= 50.0 {
        sign
    } else if adx < 20.0 {
        -1
    } else {
        0
    }
}

/// -2..=+2 from the money flow index.
pub fn money_flow_score(mfi: Option<f64>) -> i32 {
    let Some(mfi) = mfi else { return 0 };
    if mfi > 50.0 && mfi < 80.0 {
        2
    } else if mfi >= 80.0 {
        -1
    } else if mfi < 50.0 && mfi > 20.0 {
        -2
    } else if mfi <= 20.0 {
        1
    } else {
        0
    }
}

/// -1..=+1: stretched more than 20% from the long EMA reverts.
pub fn price_position_score(distance_from_ema_long_pct: Option<f64>) -> i32 {
    match distance_from_ema_long_pct {
        Some(d) if d > 20.0 => -1,
        Some(d) if d < -20.0 => 1,
        _ => 0,
    }
}

/// -1..=+1 in an uptrend: near support is an entry, near resistance a risk.
/// Needs both a support and a resistance level; resistance wins a tie.
pub fn support_resistance_score(
    price: f64,
    nearest_support: Option<f64>,
    nearest_resistance: Option<f64>,
    trend: i32,
) -> i32 {
    let (Some(support), Some(resistance)) = (nearest_support, nearest_resistance) else {
        return 0;
    };
    if trend <= 0 || price == 0.0 {
        return 0;
    }

    let near = |level: f64| ((price - level).abs() / price) < LEVEL_PROXIMITY;
    if near(resistance) {
        -1
    } else if near(support) {
        1
    } else {
        0
    }
}
