//! Buy zone, sell targets and stop-loss derived from the label.

use super::score::Sentiment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub low: f64,
    pub high: f64,
}

/// Suggested levels; all empty for bearish labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradePlan {
    pub buy_zone: Option<PriceRange>,
    pub sell_targets: Vec<f64>,
    pub stop_loss: Option<f64>,
}

/// Stop distance and the two target distances, as ATR multiples or as
/// price fractions when ATR is unavailable.
struct Offsets {
    atr: (f64, f64, f64),
    pct: (f64, f64, f64),
}

impl Offsets {
    fn apply(&self, price: f64, atr: Option<f64>) -> (f64, [f64; 2]) {
        match atr {
            Some(a) => {
                let (stop, t1, t2) = self.atr;
                (price - stop * a, [price + t1 * a, price + t2 * a])
            }
            None => {
                let (stop, t1, t2) = self.pct;
                (price * stop, [price * t1, price * t2])
            }
        }
    }
}

impl TradePlan {
    /// `atr` is `Some` only when a positive ATR is available.
    pub fn build(
        sentiment: Sentiment,
        intraday: bool,
        price: f64,
        ema_short: f64,
        atr: Option<f64>,
    ) -> Self {
        let (zone, offsets) = match (sentiment, intraday) {
            (s, _) if s.is_bearish() => return Self::default(),
            (Sentiment::Neutral, true) => (
                (price * 0.997, price * 1.003),
                Offsets {
                    atr: (1.5, 1.5, 2.0),
                    pct: (0.995, 1.005, 1.01),
                },
            ),
            (Sentiment::Neutral, false) => (
                (price * 0.97, price * 0.99),
                Offsets {
                    atr: (1.5, 2.0, 3.0),
                    pct: (0.96, 1.03, 1.06),
                },
            ),
            (_, true) => (
                (price * 0.995, price * 1.005),
                Offsets {
                    atr: (2.0, 2.0, 3.0),
                    pct: (0.99, 1.01, 1.015),
                },
            ),
            (_, false) => (
                (ema_short * 0.98, ema_short * 1.02),
                Offsets {
                    atr: (2.0, 3.0, 4.0),
                    pct: (0.95, 1.05, 1.10),
                },
            ),
        };

        let (stop, targets) = offsets.apply(price, atr);
        Self {
            buy_zone: Some(PriceRange {
                low: zone.0,
                high: zone.1,
            }),
            sell_targets: targets.to_vec(),
            stop_loss: Some(stop),
        }
    }

    /// Reward to the second target over risk to the stop.
    pub fn reward_to_risk(&self, price: f64) -> Option<f64> {
        let stop = self.stop_loss?;
        let target = *self.sell_targets.get(1)?;
        let risk = price - stop;
        (risk > 0.0).then(|| (target - price) / risk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;

    const EPS: f64 = 1e-9;

    #[test]
    fn bearish_has_no_levels() {
        for s in [Sentiment::Bearish, Sentiment::StrongBearish] {
            for intraday in [true, false] {
                assert_eq!(
                    TradePlan::build(s, intraday, 100.0, 95.0, Some(2.0)),
                    TradePlan::default()
                );
            }
        }
    }

    #[test]
    fn bullish_intraday_with_atr() {
        let plan = TradePlan::build(Sentiment::Bullish, true, 100.0, 95.0, Some(2.0));
        let zone = plan.buy_zone.unwrap();
        assert_approx(zone.low, 99.5, EPS);
        assert_approx(zone.high, 100.5, EPS);
        assert_approx(plan.stop_loss.unwrap(), 96.0, EPS);
        assert_approx(plan.sell_targets[0], 104.0, EPS);
        assert_approx(plan.sell_targets[1], 106.0, EPS);
    }

    #[test]
    fn bullish_intraday_without_atr() {
        let plan = TradePlan::build(Sentiment::StrongBullish, true, 100.0, 95.0, None);
        assert_approx(plan.stop_loss.unwrap(), 99.0, EPS);
        assert_approx(plan.sell_targets[0], 101.0, EPS);
        assert_approx(plan.sell_targets[1], 101.5, EPS);
    }

    #[test]
    fn bullish_daily_zone_tracks_short_ema() {
        let plan = TradePlan::build(Sentiment::StrongBullish, false, 500.0, 490.0, Some(5.0));
        let zone = plan.buy_zone.unwrap();
        assert_approx(zone.low, 480.2, EPS);
        assert_approx(zone.high, 499.8, EPS);
        assert_approx(plan.stop_loss.unwrap(), 490.0, EPS);
        assert_approx(plan.sell_targets[0], 515.0, EPS);
        assert_approx(plan.sell_targets[1], 520.0, EPS);
        assert_approx(plan.reward_to_risk(500.0).unwrap(), 2.0, EPS);

        let plan = TradePlan::build(Sentiment::Bullish, false, 500.0, 490.0, None);
        assert_approx(plan.stop_loss.unwrap(), 475.0, EPS);
        assert_approx(plan.sell_targets[0], 525.0, EPS);
        assert_approx(plan.sell_targets[1], 550.0, EPS);
    }

    #[test]
    fn neutral_zones() {
        let plan = TradePlan::build(Sentiment::Neutral, true, 100.0, 95.0, Some(2.0));
        let zone = plan.buy_zone.unwrap();
        assert_approx(zone.low, 99.7, EPS);
        assert_approx(zone.high, 100.3, EPS);
        assert_approx(plan.stop_loss.unwrap(), 97.0, EPS);
        assert_eq!(plan.sell_targets.len(), 2);
        assert_approx(plan.sell_targets[1], 104.0, EPS);

        let plan = TradePlan::build(Sentiment::Neutral, false, 100.0, 95.0, None);
        let zone = plan.buy_zone.unwrap();
        assert_approx(zone.low, 97.0, EPS);
        assert_approx(zone.high, 99.0, EPS);
        assert_approx(plan.stop_loss.unwrap(), 96.0, EPS);
        assert_approx(plan.sell_targets[0], 103.0, EPS);
        assert_approx(plan.sell_targets[1], 106.0, EPS);

        let plan = TradePlan::build(Sentiment::Neutral, false, 100.0, 95.0, Some(2.0));
        assert_approx(plan.stop_loss.unwrap(), 97.0, EPS);
        assert_approx(plan.sell_targets[0], 104.0, EPS);
        assert_approx(plan.sell_targets[1], 106.0, EPS);
    }
}
