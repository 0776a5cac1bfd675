//! Technical sentiment scorer.
//!
//! [`analyze`] computes the core trend/momentum transforms (EMA pair, RSI,
//! MACD) plus whichever secondary indicators the supplied series allow,
//! sums eight sub-scores into a [`ScoreBreakdown`], labels the total and
//! derives trade levels and a note.
//!
//! | input present          | indicators                                  |
//! |------------------------|---------------------------------------------|
//! | closes                 | EMA, RSI, MACD, ROC, Bollinger              |
//! | + volumes              | volume MA, OBV, VWAP                        |
//! | + highs/lows           | ATR, ADX, Stochastic, swing levels          |
//! | + highs/lows + volumes | MFI                                         |

pub mod input;
pub mod notes;
pub mod result;
pub mod score;
pub mod zones;

pub use input::{AnalysisError, PriceInput};
pub use result::{Analysis, AnalysisResult, InsufficientData};
pub use score::{ScoreBreakdown, Sentiment};
pub use zones::{PriceRange, TradePlan};

use crate::config::{IndicatorWindows, ParameterSet};
use crate::domain::latest;
use crate::indicators::{
    adx, atr, bollinger, ema, macd, mfi, obv, roc, rsi, sma, stochastic, vwap, AdxSeries,
    BollingerBands, MacdPoint, StochasticSeries,
};
use crate::levels::{swing_levels, SwingLevels};
use notes::NoteContext;

/// EMA pair, RSI and MACD at the last bar; scoring needs all of them.
struct Core {
    price: f64,
    ema_short: f64,
    ema_long: f64,
    rsi: f64,
    macd: MacdPoint,
}

impl Core {
    fn compute(closes: &[f64], p: &ParameterSet) -> Option<Self> {
        Some(Self {
            price: *closes.last()?,
            ema_short: latest(&ema(closes, p.ema_short)?)?,
            ema_long: latest(&ema(closes, p.ema_long)?)?,
            rsi: rsi(closes, p.rsi_period)?,
            macd: macd(closes, p.macd_fast, p.macd_slow, p.macd_signal)?.latest()?,
        })
    }
}

/// Secondary indicators; each is absent when its inputs are.
#[derive(Default)]
struct Secondary {
    current_volume: Option<f64>,
    volume_ma: Option<f64>,
    obv: Option<f64>,
    vwap: Option<f64>,
    bollinger: Option<BollingerBands>,
    roc: Option<f64>,
    atr: Option<f64>,
    adx: Option<AdxSeries>,
    stochastic: Option<StochasticSeries>,
    levels: Option<SwingLevels>,
    mfi: Option<f64>,
}

impl Secondary {
    fn compute(input: &PriceInput, w: &IndicatorWindows) -> Self {
        let closes = input.closes.as_slice();
        let high_low = input.high_low();
        let mut s = Secondary {
            bollinger: bollinger(closes, w.bollinger_period, w.bollinger_std_dev),
            roc: roc(closes, w.roc).and_then(|r| latest(&r)),
            ..Default::default()
        };

        if let Some(volumes) = input.volumes.as_deref() {
            s.current_volume = volumes.last().copied();
            s.volume_ma = sma(volumes, w.volume_ma).and_then(|m| latest(&m));
            s.obv = obv(closes, volumes).and_then(|o| latest(&o));
            let (highs, lows) = high_low.unzip();
            s.vwap = vwap(closes, highs, lows, volumes).and_then(|v| latest(&v));
        }

        if let Some((highs, lows)) = high_low {
            s.atr = atr(highs, lows, closes, w.atr).and_then(|a| latest(&a));
            s.adx = adx(highs, lows, closes, w.adx);
            s.stochastic = stochastic(highs, lows, closes, w.stochastic_k, w.stochastic_d);
            s.levels = Some(swing_levels(
                highs,
                lows,
                closes,
                w.swing_lookback,
                w.swing_strength,
            ));
            if let Some(volumes) = input.volumes.as_deref() {
                s.mfi = mfi(highs, lows, closes, volumes, w.mfi).and_then(|m| latest(&m));
            }
        }
        s
    }

    /// ATR counts only when positive.
    fn usable_atr(&self) -> Option<f64> {
        self.atr.filter(|a| *a > 0.0)
    }

    fn latest_bollinger(&self, pick: impl Fn(&BollingerBands) -> &[Option<f64>]) -> Option<f64> {
        self.bollinger.as_ref().and_then(|b| latest(pick(b)))
    }
}

/// Score the latest bar of `input` under `params`.
///
/// Malformed input (misaligned or non-finite series, highs without lows)
/// is an error. Too little data is not: it yields
/// [`Analysis::Insufficient`] carrying a message and no score.
pub fn analyze(input: &PriceInput, params: &ParameterSet) -> Result<Analysis, AnalysisError> {
    input.validate()?;
    let closes = input.closes.as_slice();
    tracing::debug!(
        bars = closes.len(),
        ema_short = params.ema_short,
        ema_long = params.ema_long,
        min_bars = params.min_bars,
        has_volume = input.volumes.is_some(),
        has_high_low = input.highs.is_some(),
        "analyzing"
    );

    if closes.len() < params.min_bars {
        tracing::debug!(bars = closes.len(), min_bars = params.min_bars, "not enough bars");
        return Ok(Analysis::not_enough_bars(params.min_bars));
    }
    let Some(core) = Core::compute(closes, params) else {
        tracing::debug!(bars = closes.len(), "core indicators unavailable");
        return Ok(Analysis::compute_failed());
    };
    let sec = Secondary::compute(input, &params.windows);

    let price = core.price;
    let prev_close = closes.len().checked_sub(2).map(|i| closes[i]);
    let distance_from_ema_long_pct =
        (core.ema_long != 0.0).then(|| (price - core.ema_long) / core.ema_long * 100.0);
    let percent_b = sec.latest_bollinger(|b| b.percent_b.as_slice());
    let (nearest_support, nearest_resistance) = sec
        .levels
        .as_ref()
        .map_or((None, None), |l| (l.nearest_support(), l.nearest_resistance()));

    let mut breakdown = ScoreBreakdown {
        trend: score::trend_score(price, core.ema_short, core.ema_long),
        momentum: score::momentum_score(core.rsi, &core.macd),
        volume: sec.current_volume.map_or(0, |v| {
            score::volume_score(v, sec.volume_ma, price, prev_close)
        }),
        volatility: score::volatility_score(percent_b, core.rsi),
        trend_strength: sec.adx.as_ref().map_or(0, |a| {
            score::trend_strength_score(a.latest_adx(), a.plus_di_leads())
        }),
        money_flow: score::money_flow_score(sec.mfi),
        price_position: score::price_position_score(distance_from_ema_long_pct),
        support_resistance: 0,
    };
    breakdown.support_resistance = score::support_resistance_score(
        price,
        nearest_support,
        nearest_resistance,
        breakdown.trend,
    );
    let total = breakdown.total();
    let sentiment = Sentiment::from_score(total);

    let intraday = params.is_intraday();
    let usable_atr = sec.usable_atr();
    let atr_percent = usable_atr
        .filter(|_| price > 0.0)
        .map(|a| a / price * 100.0);
    let plan = TradePlan::build(sentiment, intraday, price, core.ema_short, usable_atr);

    let unusual_volume = match (sec.current_volume, sec.volume_ma) {
        (Some(v), Some(ma)) if ma != 0.0 => v > ma * 2.0,
        _ => false,
    };
    let note = notes::compose(&NoteContext {
        sentiment,
        intraday,
        price,
        volume_score: breakdown.volume,
        atr: usable_atr,
        atr_percent,
        plan: &plan,
        squeeze: sec.bollinger.as_ref().is_some_and(BollingerBands::is_squeeze),
        unusual_volume,
    });

    tracing::debug!(
        score = total,
        sentiment = %sentiment,
        trend = breakdown.trend,
        momentum = breakdown.momentum,
        "scored"
    );

    let adx_series = sec.adx.as_ref();
    let stoch = sec.stochastic.as_ref();
    let result = AnalysisResult {
        latest_price: price,
        ema_short: core.ema_short,
        ema_long: core.ema_long,
        rsi: core.rsi,
        macd: core.macd.macd,
        macd_signal: core.macd.signal,
        macd_hist: core.macd.histogram,
        score: total,
        score_breakdown: breakdown,
        sentiment,
        buy_zone: plan.buy_zone,
        sell_targets: plan.sell_targets,
        stop_loss: plan.stop_loss,
        note,
        volume_ma: sec.volume_ma,
        current_volume: sec.current_volume,
        obv: sec.obv,
        vwap: sec.vwap,
        bollinger_upper: sec.latest_bollinger(|b| b.upper.as_slice()),
        bollinger_middle: sec.latest_bollinger(|b| b.middle.as_slice()),
        bollinger_lower: sec.latest_bollinger(|b| b.lower.as_slice()),
        bollinger_percent_b: percent_b,
        atr: sec.atr,
        atr_percent,
        adx: adx_series.and_then(AdxSeries::latest_adx),
        plus_di: adx_series.and_then(|a| latest(&a.plus_di)),
        minus_di: adx_series.and_then(|a| latest(&a.minus_di)),
        mfi: sec.mfi,
        stochastic_k: stoch.and_then(StochasticSeries::latest_k),
        stochastic_d: stoch.and_then(StochasticSeries::latest_d),
        roc: sec.roc,
        support_levels: sec
            .levels
            .as_ref()
            .map(SwingLevels::support_prices)
            .unwrap_or_default(),
        resistance_levels: sec
            .levels
            .as_ref()
            .map(SwingLevels::resistance_prices)
            .unwrap_or_default(),
        distance_from_ema_long_pct,
    };
    Ok(Analysis::Scored(Box::new(result)))
}
