//! Bollinger Bands: moving average +/- standard deviation multiplier.
//!
//! - Middle: SMA(close, period)
//! - Upper / Lower: middle +/- mult * stddev(close, period)
//! - %B: (close - lower) / (upper - lower), 0.5 when the bands coincide
//! - Bandwidth: (upper - lower) / middle, 0 when middle <= 0
//!
//! Uses population stddev (divide by N). Mean and variance are taken from
//! offsets against the window's first value, so a constant window has
//! exactly zero width.
//! Warm-up: period - 1 slots.

use crate::domain::{latest, Series};

#[derive(Debug, Clone, PartialEq)]
pub struct BollingerBands {
    pub upper: Series,
    pub middle: Series,
    pub lower: Series,
    pub percent_b: Series,
    pub bandwidth: Series,
}

impl BollingerBands {
    pub fn latest_bandwidth(&self) -> Option<f64> {
        latest(&self.bandwidth)
    }

    /// Mean of every present bandwidth slot.
    pub fn mean_bandwidth(&self) -> Option<f64> {
        let present: Vec<f64> = self.bandwidth.iter().flatten().copied().collect();
        if present.is_empty() {
            return None;
        }
        Some(present.iter().sum::<f64>() / present.len() as f64)
    }

    /// Latest bandwidth is under half the series-average bandwidth.
    pub fn is_squeeze(&self) -> bool {
        match (self.latest_bandwidth(), self.mean_bandwidth()) {
            (Some(current), Some(mean)) => current < mean * 0.5,
            _ => false,
        }
    }
}

pub fn bollinger(values: &[f64], period: usize, multiplier: f64) -> Option<BollingerBands> {
    let n = values.len();
    if period == 0 || n < period {
        return None;
    }

    let mut bands = BollingerBands {
        upper: vec![None; n],
        middle: vec![None; n],
        lower: vec![None; n],
        percent_b: vec![None; n],
        bandwidth: vec![None; n],
    };

    for (offset, window) in values.windows(period).enumerate() {
        let i = offset + period - 1;
        let base = window[0];
        let offset = window.iter().map(|v| v - base).sum::<f64>() / period as f64;
        let mean = base + offset;
        let variance = window
            .iter()
            .map(|v| (v - base - offset).powi(2))
            .sum::<f64>()
            / period as f64;
        let stddev = variance.sqrt();

        let upper = mean + multiplier * stddev;
        let lower = mean - multiplier * stddev;
        let range = upper - lower;

        bands.middle[i] = Some(mean);
        bands.upper[i] = Some(upper);
        bands.lower[i] = Some(lower);
        bands.percent_b[i] = Some(if range > 0.0 {
            (values[i] - lower) / range
        } else {
            0.5
        });
        bands.bandwidth[i] = Some(if mean > 0.0 { range / mean } else { 0.0 });
    }

    Some(bands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, assert_slot, DEFAULT_EPSILON};

    #[test]
    fn bollinger_middle_is_sma() {
        let bands = bollinger(&[10.0, 11.0, 12.0, 13.0, 14.0], 3, 2.0).unwrap();
        assert_eq!(bands.middle[0], None);
        assert_eq!(bands.middle[1], None);
        assert_slot(bands.middle[2], 11.0, DEFAULT_EPSILON);
        assert_slot(bands.middle[3], 12.0, DEFAULT_EPSILON);
    }

    #[test]
    fn bollinger_bands_symmetric() {
        let bands = bollinger(&[10.0, 11.0, 12.0, 13.0, 14.0], 3, 2.0).unwrap();
        for i in 2..5 {
            let half_width = bands.upper[i].unwrap() - bands.middle[i].unwrap();
            assert_approx(
                bands.middle[i].unwrap() - bands.lower[i].unwrap(),
                half_width,
                DEFAULT_EPSILON,
            );
        }
    }

    #[test]
    fn bollinger_known_stddev() {
        // Window (10, 11, 12): mean 11, population variance 2/3
        let bands = bollinger(&[10.0, 11.0, 12.0], 3, 2.0).unwrap();
        let sd = (2.0_f64 / 3.0).sqrt();
        assert_slot(bands.upper[2], 11.0 + 2.0 * sd, DEFAULT_EPSILON);
        assert_slot(bands.lower[2], 11.0 - 2.0 * sd, DEFAULT_EPSILON);
        // close 12 sits at (12 - lower) / (4 * sd)
        assert_slot(bands.percent_b[2], (1.0 + 2.0 * sd) / (4.0 * sd), DEFAULT_EPSILON);
        assert_slot(bands.bandwidth[2], 4.0 * sd / 11.0, DEFAULT_EPSILON);
    }

    #[test]
    fn bollinger_constant_price_zero_width() {
        let bands = bollinger(&[100.0, 100.0, 100.0, 100.0], 3, 2.0).unwrap();
        assert_slot(bands.upper[2], 100.0, DEFAULT_EPSILON);
        assert_slot(bands.lower[2], 100.0, DEFAULT_EPSILON);
        assert_eq!(bands.percent_b[2], Some(0.5));
        assert_eq!(bands.percent_b[3], Some(0.5));
        assert_eq!(bands.bandwidth[3], Some(0.0));
    }

    #[test]
    fn constant_fractional_price_zero_width() {
        for price in [0.1, 101.37, 33.33, 1.1, 7.7] {
            let bands = bollinger(&[price; 40], 20, 2.0).unwrap();
            assert_eq!(bands.upper[39], Some(price));
            assert_eq!(bands.lower[39], Some(price));
            assert_eq!(bands.middle[39], Some(price));
            assert_eq!(bands.percent_b[39], Some(0.5));
            assert_eq!(bands.bandwidth[39], Some(0.0));
        }
    }

    #[test]
    fn squeeze_when_bands_narrow() {
        let mut values: Vec<f64> = (0..30)
            .map(|i| if i % 2 == 0 { 110.0 } else { 90.0 })
            .collect();
        values.extend(std::iter::repeat(100.0).take(5));
        let bands = bollinger(&values, 5, 2.0).unwrap();
        assert!(bands.is_squeeze());
    }

    #[test]
    fn bollinger_too_few_values() {
        assert!(bollinger(&[1.0, 2.0], 3, 2.0).is_none());
    }
}
