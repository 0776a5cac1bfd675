//! Integration tests for bar aggregation and timeframe resampling.

use trendscore_core::aggregate::{aggregate, resample, AggregateError};
use trendscore_core::timeframe::Timeframe;
use trendscore_core::Bar;

fn fixture() -> Vec<Bar> {
    vec![
        Bar::new(1000, 100.0, 105.0, 99.0, 104.0, 1000.0),
        Bar::new(1060, 104.0, 110.0, 103.0, 107.0, 1500.0),
        Bar::new(1120, 107.0, 109.0, 101.0, 108.0, 2000.0),
        Bar::new(1180, 108.0, 112.0, 106.0, 111.0, 1200.0),
        Bar::new(1240, 111.0, 111.5, 104.0, 105.0, 1800.0),
        Bar::new(1300, 105.0, 107.0, 102.0, 106.0, 900.0),
    ]
}

#[test]
fn six_bars_by_three() {
    let out = aggregate(&fixture(), 3).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out[0], Bar::new(1000, 100.0, 110.0, 99.0, 108.0, 4500.0));
    assert_eq!(out[1], Bar::new(1180, 108.0, 112.0, 102.0, 106.0, 3900.0));
    assert!(out.iter().all(Bar::is_sane));
}

#[test]
fn three_minute_bars_into_one() {
    let bars = vec![
        Bar::new(1000, 100.0, 105.0, 99.0, 103.0, 1000.0),
        Bar::new(1060, 103.0, 108.0, 102.0, 107.0, 1500.0),
        Bar::new(1120, 107.0, 110.0, 106.0, 108.0, 2000.0),
    ];
    let out = aggregate(&bars, 3).unwrap();
    assert_eq!(out, vec![Bar::new(1000, 100.0, 110.0, 99.0, 108.0, 4500.0)]);
}

#[test]
fn six_bars_by_four_drops_remainder() {
    let out = aggregate(&fixture(), 4).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].close, 111.0);
    assert_eq!(out[0].volume, 5700.0);
}

#[test]
fn multiplier_bounds() {
    let bars = fixture();
    assert_eq!(aggregate(&bars, 1).unwrap(), bars);
    assert!(aggregate(&bars, 12).unwrap().is_empty());
    assert_eq!(aggregate(&bars, 0), Err(AggregateError::InvalidMultiplier(0)));
    assert_eq!(aggregate(&bars, 13), Err(AggregateError::InvalidMultiplier(13)));
}

#[test]
fn resample_two_minute_into_four() {
    let bars = fixture();
    let rule = Timeframe::M4.aggregation().unwrap();
    assert_eq!(rule.base, Timeframe::M2);
    let out = resample(&bars, Timeframe::M4).unwrap();
    assert_eq!(out, aggregate(&bars, 2).unwrap());
    assert_eq!(out.len(), 3);
    assert_eq!(resample(&bars, Timeframe::M5).unwrap(), bars);
}
