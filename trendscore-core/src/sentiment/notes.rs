//! Human-readable commentary attached to a scored result.

use super::score::Sentiment;
use super::zones::TradePlan;

/// Facts the note is composed from.
#[derive(Debug, Clone, Copy)]
pub struct NoteContext<'a> {
    pub sentiment: Sentiment,
    pub intraday: bool,
    pub price: f64,
    /// Volume sub-score.
    pub volume_score: i32,
    /// Positive ATR, when available.
    pub atr: Option<f64>,
    pub atr_percent: Option<f64>,
    pub plan: &'a TradePlan,
    pub squeeze: bool,
    pub unusual_volume: bool,
}

pub fn compose(ctx: &NoteContext<'_>) -> String {
    let mut note = headline(ctx);
    if ctx.squeeze {
        note.push_str(" Volatility squeeze: a breakout may follow.");
    }
    if ctx.unusual_volume {
        note.push_str(" Unusually high volume: check for news or a catalyst.");
    }
    note
}

fn headline(ctx: &NoteContext<'_>) -> String {
    let strong = ctx.sentiment == Sentiment::StrongBullish;
    let confirmed = ctx.volume_score > 0;

    match ctx.sentiment {
        s if s.is_bullish() && ctx.intraday => {
            let mut note = if strong {
                format!(
                    "Strong intraday uptrend backed by {}. ",
                    if confirmed { "heavy volume" } else { "steady momentum" }
                )
            } else {
                "Intraday uptrend. ".to_string()
            };
            match (ctx.atr, ctx.atr_percent) {
                (Some(atr), Some(pct)) => note.push_str(&format!(
                    "ATR {atr:.2} ({pct:.2}% of price); keep stops tight."
                )),
                _ => note.push_str("Keep stops tight on intraday moves."),
            }
            note
        }
        s if s.is_bullish() => {
            let mut note = if strong {
                format!(
                    "Strong uptrend with {}. ",
                    if confirmed {
                        "volume confirmation"
                    } else {
                        "several indicators in agreement"
                    }
                )
            } else {
                "Uptrend. ".to_string()
            };
            match ctx.atr.and(ctx.plan.reward_to_risk(ctx.price)) {
                Some(ratio) => {
                    note.push_str(&format!("ATR-based targets give {ratio:.1}:1 reward to risk."))
                }
                None => note.push_str(
                    "Targets sit roughly 5-10% above price; adjust to your risk tolerance.",
                ),
            }
            note
        }
        Sentiment::Neutral if ctx.intraday => format!(
            "Mixed intraday signals; size down or wait for momentum to clear up{}.",
            if ctx.volume_score < 0 { ", volume is light" } else { "" }
        ),
        Sentiment::Neutral => {
            "Mixed signals; size down or wait for clearer momentum.".to_string()
        }
        _ => format!(
            "Downtrend or weak technicals{}; not a favourable spot for new long positions.",
            if ctx.volume_score < 0 {
                " with selling volume"
            } else {
                ""
            }
        ),
    }
}
