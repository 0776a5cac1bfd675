//! Swing-high / swing-low support and resistance levels.
//!
//! A bar is a swing high when its high is strictly above every high within
//! `strength` bars on either side; a swing low mirrors this on lows. Only
//! swings inside the trailing `lookback` window and near the current price
//! are kept, closest first, at most [`MAX_LEVELS`] per side.

use serde::Serialize;

/// Levels kept per side.
pub const MAX_LEVELS: usize = 3;

/// Swings further than this fraction from the current price are discarded.
const PRICE_BAND: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Level {
    pub price: f64,
    /// Bar index the swing was found at.
    pub index: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SwingLevels {
    /// Highest first (nearest below-ish the current price).
    pub support: Vec<Level>,
    /// Lowest first (nearest above-ish the current price).
    pub resistance: Vec<Level>,
}

impl SwingLevels {
    pub fn nearest_support(&self) -> Option<f64> {
        self.support.first().map(|l| l.price)
    }

    pub fn nearest_resistance(&self) -> Option<f64> {
        self.resistance.first().map(|l| l.price)
    }

    pub fn support_prices(&self) -> Vec<f64> {
        self.support.iter().map(|l| l.price).collect()
    }

    pub fn resistance_prices(&self) -> Vec<f64> {
        self.resistance.iter().map(|l| l.price).collect()
    }
}

/// Find nearby support and resistance.
///
/// Returns empty lists when `closes` is shorter than `lookback` or the slices
/// disagree in length.
pub fn swing_levels(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    lookback: usize,
    strength: usize,
) -> SwingLevels {
    let n = closes.len();
    if n == 0 || n < lookback || highs.len() != n || lows.len() != n {
        return SwingLevels::default();
    }

    let current = closes[n - 1];
    let first_recent = n - lookback.min(n);

    let mut resistance: Vec<Level> = swing_points(highs, strength, |candidate, neighbour| {
        candidate > neighbour
    })
    .filter(|l| l.index >= first_recent && l.price >= current * (1.0 - PRICE_BAND))
    .collect();
    resistance.sort_by(|a, b| a.price.total_cmp(&b.price));
    resistance.truncate(MAX_LEVELS);

    let mut support: Vec<Level> = swing_points(lows, strength, |candidate, neighbour| {
        candidate < neighbour
    })
    .filter(|l| l.index >= first_recent && l.price <= current * (1.0 + PRICE_BAND))
    .collect();
    support.sort_by(|a, b| b.price.total_cmp(&a.price));
    support.truncate(MAX_LEVELS);

    SwingLevels {
        support,
        resistance,
    }
}

/// Indices whose value beats every neighbour within `strength` under `beats`.
fn swing_points<'a, F>(
    values: &'a [f64],
    strength: usize,
    beats: F,
) -> impl Iterator<Item = Level> + 'a
where
    F: Fn(f64, f64) -> bool + 'a,
{
    let n = values.len();
    let end = n.saturating_sub(strength);
    (strength..end).filter_map(move |i| {
        let window = &values[i - strength..=i + strength];
        let is_swing = window
            .iter()
            .enumerate()
            .all(|(offset, &v)| offset == strength || beats(values[i], v));
        is_swing.then_some(Level {
            price: values[i],
            index: i,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_single_peak_and_trough() {
        let highs = [10.0, 11.0, 15.0, 11.0, 10.0, 10.5, 10.2];
        let lows = [9.0, 8.0, 9.5, 9.0, 7.0, 9.0, 9.5];
        let closes = [9.5, 10.0, 14.0, 10.0, 8.0, 10.0, 10.0];
        let levels = swing_levels(&highs, &lows, &closes, 5, 2);
        // Resistance only has to sit at or above 95% of the current price
        assert_eq!(levels.resistance, vec![Level { price: 15.0, index: 2 }]);
        assert_eq!(levels.support, vec![Level { price: 7.0, index: 4 }]);
    }

    #[test]
    fn equal_neighbours_are_not_swings() {
        let highs = [10.0, 11.0, 12.0, 12.0, 11.0, 10.0];
        let lows = [9.0; 6];
        let closes = [10.0; 6];
        let levels = swing_levels(&highs, &lows, &closes, 6, 2);
        assert!(levels.resistance.is_empty());
        assert!(levels.support.is_empty());
    }

    #[test]
    fn swings_outside_lookback_are_dropped() {
        let mut highs = vec![10.0; 30];
        highs[3] = 12.0;
        highs[25] = 11.0;
        let lows = vec![9.0; 30];
        let closes = vec![10.5; 30];
        let levels = swing_levels(&highs, &lows, &closes, 10, 2);
        assert_eq!(levels.nearest_resistance(), Some(11.0));
        assert_eq!(levels.resistance.len(), 1);
    }

    #[test]
    fn levels_sorted_by_proximity_and_capped() {
        // Five clear peaks and troughs inside the window
        let mut highs = vec![100.0; 40];
        let mut lows = vec![90.0; 40];
        for (k, i) in [5usize, 11, 17, 23, 29].iter().enumerate() {
            highs[*i] = 101.0 + k as f64;
            lows[*i] = 89.0 - k as f64 * 0.5;
        }
        let closes = vec![95.0; 40];
        let levels = swing_levels(&highs, &lows, &closes, 40, 2);

        assert_eq!(levels.resistance_prices(), vec![101.0, 102.0, 103.0]);
        assert_eq!(levels.support_prices(), vec![89.0, 88.5, 88.0]);
    }

    #[test]
    fn support_far_above_price_is_dropped() {
        let highs = [20.0, 21.0, 22.0, 21.0, 20.0, 12.0, 11.0];
        let lows = [19.0, 18.0, 17.0, 18.0, 19.0, 10.0, 10.5];
        let closes = [19.5, 19.0, 18.0, 19.0, 19.5, 10.0, 10.0];
        let levels = swing_levels(&highs, &lows, &closes, 7, 2);
        // Trough at 17.0 is 70% above the current price of 10.0
        assert!(levels.support.is_empty());
    }

    #[test]
    fn short_input_yields_nothing() {
        let v = [1.0, 2.0, 3.0];
        assert_eq!(swing_levels(&v, &v, &v, 20, 2), SwingLevels::default());
    }
}
