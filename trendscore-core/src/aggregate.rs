//! Combine consecutive bars into coarser bars.

use crate::domain::Bar;
use crate::timeframe::Timeframe;
use thiserror::Error;

/// Largest multiplier any timeframe rule uses (12h = 12 x 1h).
pub const MAX_MULTIPLIER: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    #[error("invalid multiplier {0}: must be between 1 and {MAX_MULTIPLIER}")]
    InvalidMultiplier(usize),
}

/// Collapse every `multiplier` consecutive bars into one.
///
/// The first bar supplies `ts` and `open`, the last supplies `close`;
/// high/low are the extremes and volume the sum. A trailing chunk
/// shorter than `multiplier` is dropped.
pub fn aggregate(bars: &[Bar], multiplier: usize) -> Result<Vec<Bar>, AggregateError> {
    if multiplier == 0 || multiplier > MAX_MULTIPLIER {
        return Err(AggregateError::InvalidMultiplier(multiplier));
    }
    if multiplier == 1 {
        return Ok(bars.to_vec());
    }

    let out: Vec<Bar> = bars
        .chunks_exact(multiplier)
        .map(|chunk| {
            let first = chunk[0];
            let last = chunk[chunk.len() - 1];
            chunk.iter().skip(1).fold(
                Bar {
                    close: last.close,
                    ..first
                },
                |acc, b| Bar {
                    high: acc.high.max(b.high),
                    low: acc.low.min(b.low),
                    volume: acc.volume + b.volume,
                    ..acc
                },
            )
        })
        .collect();

    tracing::debug!(
        input = bars.len(),
        output = out.len(),
        multiplier,
        dropped = bars.len() % multiplier,
        "aggregated bars"
    );
    Ok(out)
}

/// Apply `timeframe`'s aggregation rule; bars are assumed to be at the
/// rule's base interval. Native intervals pass through unchanged.
pub fn resample(bars: &[Bar], timeframe: Timeframe) -> Result<Vec<Bar>, AggregateError> {
    match timeframe.aggregation() {
        Some(rule) => aggregate(bars, rule.multiplier),
        None => Ok(bars.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(ts: i64, o: f64, h: f64, l: f64, c: f64, v: f64) -> Bar {
        Bar::new(ts, o, h, l, c, v)
    }

    #[test]
    fn three_into_one() {
        let bars = vec![
            bar(1000, 100.0, 105.0, 99.0, 104.0, 1000.0),
            bar(1060, 104.0, 110.0, 103.0, 107.0, 1500.0),
            bar(1120, 107.0, 109.0, 101.0, 108.0, 2000.0),
        ];
        let out = aggregate(&bars, 3).unwrap();
        assert_eq!(out, vec![bar(1000, 100.0, 110.0, 99.0, 108.0, 4500.0)]);
    }

    #[test]
    fn partial_chunk_dropped() {
        let bars: Vec<Bar> = (0..7)
            .map(|i| bar(i * 60, 1.0, 2.0, 0.5, 1.5, 10.0))
            .collect();
        let out = aggregate(&bars, 3).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].ts, 180);
        assert_eq!(out[1].volume, 30.0);
    }

    #[test]
    fn too_few_bars_gives_empty() {
        let bars = vec![bar(0, 1.0, 1.0, 1.0, 1.0, 1.0); 3];
        assert!(aggregate(&bars, 4).unwrap().is_empty());
        assert!(aggregate(&[], 4).unwrap().is_empty());
    }

    #[test]
    fn multiplier_one_is_identity() {
        let bars = vec![
            bar(0, 1.0, 2.0, 0.5, 1.5, 10.0),
            bar(60, 1.5, 2.5, 1.0, 2.0, 20.0),
        ];
        assert_eq!(aggregate(&bars, 1).unwrap(), bars);
    }

    #[test]
    fn invalid_multiplier() {
        assert_eq!(aggregate(&[], 0), Err(AggregateError::InvalidMultiplier(0)));
        assert_eq!(
            aggregate(&[], 13),
            Err(AggregateError::InvalidMultiplier(13))
        );
    }

    #[test]
    fn resample_follows_timeframe_rule() {
        let bars: Vec<Bar> = (0..8)
            .map(|i| bar(i * 3600, 1.0, 2.0, 0.5, 1.5, 1.0))
            .collect();
        assert_eq!(resample(&bars, Timeframe::H4).unwrap().len(), 2);
        assert_eq!(resample(&bars, Timeframe::H2).unwrap().len(), 4);
        assert_eq!(resample(&bars, Timeframe::H1).unwrap(), bars);
    }
}
