//! Scoring parameters and their TOML configuration file.
//!
//! A [`ParameterSet`] selects the EMA spans, RSI/MACD periods and the
//! minimum bar count for one granularity. Built-in presets live on
//! [`Timeframe::params`]; a [`ParamsFile`] overrides them per timeframe.

use crate::timeframe::Timeframe;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read params file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse params file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown timeframe '{0}' in params file")]
    UnknownTimeframe(String),

    #[error("invalid parameters: {0}")]
    Invalid(String),
}

/// Fixed windows for the secondary indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorWindows {
    pub volume_ma: usize,
    pub bollinger_period: usize,
    pub bollinger_std_dev: f64,
    pub atr: usize,
    pub adx: usize,
    pub mfi: usize,
    pub stochastic_k: usize,
    pub stochastic_d: usize,
    pub roc: usize,
    pub swing_lookback: usize,
    pub swing_strength: usize,
}

impl Default for IndicatorWindows {
    fn default() -> Self {
        Self {
            volume_ma: 20,
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
            atr: 14,
            adx: 14,
            mfi: 14,
            stochastic_k: 14,
            stochastic_d: 3,
            roc: 12,
            swing_lookback: 40,
            swing_strength: 2,
        }
    }
}

/// Parameters for one analysis granularity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    pub ema_short: usize,
    pub ema_long: usize,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub min_bars: usize,
    #[serde(default)]
    pub windows: IndicatorWindows,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self::daily()
    }
}

impl ParameterSet {
    /// Classic daily setup: EMA 50/200, RSI 14, MACD 12/26/9, 200 bars.
    pub fn daily() -> Self {
        Self::new(50, 200, 200)
    }

    /// RSI 14 and MACD 12/26/9 with the given EMA spans and bar minimum.
    pub fn new(ema_short: usize, ema_long: usize, min_bars: usize) -> Self {
        Self {
            ema_short,
            ema_long,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            min_bars,
            windows: IndicatorWindows::default(),
        }
    }

    /// Short EMA spans of 50 or less are treated as intraday granularity,
    /// which tightens buy zones and stops.
    pub fn is_intraday(&self) -> bool {
        self.ema_short <= 50
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let periods = [
            ("ema_short", self.ema_short),
            ("ema_long", self.ema_long),
            ("rsi_period", self.rsi_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("windows.volume_ma", self.windows.volume_ma),
            ("windows.bollinger_period", self.windows.bollinger_period),
            ("windows.atr", self.windows.atr),
            ("windows.adx", self.windows.adx),
            ("windows.mfi", self.windows.mfi),
            ("windows.stochastic_k", self.windows.stochastic_k),
            ("windows.stochastic_d", self.windows.stochastic_d),
            ("windows.roc", self.windows.roc),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, p)| *p == 0) {
            return Err(ConfigError::Invalid(format!("{name} must be >= 1")));
        }
        if self.ema_short >= self.ema_long {
            return Err(ConfigError::Invalid(format!(
                "ema_short ({}) must be below ema_long ({})",
                self.ema_short, self.ema_long
            )));
        }
        if self.macd_fast >= self.macd_slow {
            return Err(ConfigError::Invalid(format!(
                "macd_fast ({}) must be below macd_slow ({})",
                self.macd_fast, self.macd_slow
            )));
        }
        if !(self.windows.bollinger_std_dev.is_finite() && self.windows.bollinger_std_dev > 0.0) {
            return Err(ConfigError::Invalid(
                "windows.bollinger_std_dev must be a positive number".into(),
            ));
        }
        Ok(())
    }
}

/// Partial override of a preset; unset fields keep the preset value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterOverrides {
    pub ema_short: Option<usize>,
    pub ema_long: Option<usize>,
    pub rsi_period: Option<usize>,
    pub macd_fast: Option<usize>,
    pub macd_slow: Option<usize>,
    pub macd_signal: Option<usize>,
    pub min_bars: Option<usize>,
    pub windows: Option<IndicatorWindows>,
}

impl ParameterOverrides {
    pub fn apply(&self, base: ParameterSet) -> ParameterSet {
        ParameterSet {
            ema_short: self.ema_short.unwrap_or(base.ema_short),
            ema_long: self.ema_long.unwrap_or(base.ema_long),
            rsi_period: self.rsi_period.unwrap_or(base.rsi_period),
            macd_fast: self.macd_fast.unwrap_or(base.macd_fast),
            macd_slow: self.macd_slow.unwrap_or(base.macd_slow),
            macd_signal: self.macd_signal.unwrap_or(base.macd_signal),
            min_bars: self.min_bars.unwrap_or(base.min_bars),
            windows: self.windows.clone().unwrap_or(base.windows),
        }
    }
}

/// TOML params file.
///
/// ```toml
/// timeframe = "1h"
///
/// [timeframes."1d"]
/// ema_short = 20
/// min_bars = 120
///
/// [timeframes."1d".windows]
/// atr = 10
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamsFile {
    /// Timeframe used when the caller does not name one.
    pub timeframe: Option<String>,
    #[serde(default)]
    pub timeframes: BTreeMap<String, ParameterOverrides>,
}

impl ParamsFile {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: ParamsFile = toml::from_str(text)?;
        file.validate()?;
        Ok(file)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Default timeframe named by the file, if any.
    pub fn default_timeframe(&self) -> Result<Option<Timeframe>, ConfigError> {
        self.timeframe
            .as_deref()
            .map(|label| {
                label
                    .parse()
                    .map_err(|_| ConfigError::UnknownTimeframe(label.to_string()))
            })
            .transpose()
    }

    /// Preset for `timeframe` with any override from this file applied.
    pub fn resolve(&self, timeframe: Timeframe) -> ParameterSet {
        let preset = timeframe.params();
        match self.timeframes.get(timeframe.label()) {
            Some(overrides) => overrides.apply(preset),
            None => preset,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.default_timeframe()?;
        for label in self.timeframes.keys() {
            let timeframe: Timeframe = label
                .parse()
                .map_err(|_| ConfigError::UnknownTimeframe(label.clone()))?;
            self.resolve(timeframe).validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_defaults() {
        let p = ParameterSet::daily();
        assert_eq!((p.ema_short, p.ema_long, p.min_bars), (50, 200, 200));
        assert_eq!((p.macd_fast, p.macd_slow, p.macd_signal), (12, 26, 9));
        assert_eq!(p.windows, IndicatorWindows::default());
        assert!(p.validate().is_ok());
    }

    #[test]
    fn intraday_boundary_is_inclusive() {
        assert!(ParameterSet::new(50, 200, 200).is_intraday());
        assert!(ParameterSet::new(20, 50, 100).is_intraday());
        assert!(!ParameterSet::new(51, 200, 200).is_intraday());
    }

    #[test]
    fn validate_rejects_zero_and_inverted_periods() {
        let mut p = ParameterSet::daily();
        p.rsi_period = 0;
        assert!(matches!(p.validate(), Err(ConfigError::Invalid(_))));

        let p = ParameterSet::new(200, 50, 200);
        assert!(matches!(p.validate(), Err(ConfigError::Invalid(_))));

        let mut p = ParameterSet::daily();
        p.macd_fast = 30;
        assert!(matches!(p.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn params_file_overrides_preset() {
        let file = ParamsFile::from_toml_str(
            r#"
            timeframe = "1h"

            [timeframes."1d"]
            ema_short = 20
            min_bars = 120

            [timeframes."1d".windows]
            atr = 10
            "#,
        )
        .unwrap();

        assert_eq!(file.default_timeframe().unwrap(), Some(Timeframe::H1));
        let daily = file.resolve(Timeframe::D1);
        assert_eq!(daily.ema_short, 20);
        assert_eq!(daily.ema_long, 200);
        assert_eq!(daily.min_bars, 120);
        assert_eq!(daily.windows.atr, 10);
        // unspecified window fields fall back to their defaults
        assert_eq!(daily.windows.roc, 12);

        assert_eq!(file.resolve(Timeframe::M5), Timeframe::M5.params());
    }

    #[test]
    fn params_file_rejects_unknown_timeframe() {
        let err = ParamsFile::from_toml_str("[timeframes.\"7m\"]\nema_short = 5\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownTimeframe(ref t) if t == "7m"));
    }

    #[test]
    fn params_file_rejects_invalid_override() {
        let err =
            ParamsFile::from_toml_str("[timeframes.\"1h\"]\nema_short = 80\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn params_file_rejects_bad_toml() {
        assert!(matches!(
            ParamsFile::from_toml_str("timeframes = 3"),
            Err(ConfigError::Parse(_))
        ));
    }
}
