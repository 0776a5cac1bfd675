//! TrendScore Core: series transforms, support/resistance and sentiment scoring.
//!
//! This crate contains the scoring engine:
//! - Domain types (bars, index-aligned series)
//! - Indicator transforms (EMA, RSI, MACD, Bollinger, ATR, ADX, MFI, ...)
//! - Swing-based support and resistance levels
//! - Sentiment scorer with trade zones and notes
//! - Bar aggregation and per-timeframe parameter presets
//!
//! Everything here is synchronous and pure; callers decide how to
//! parallelize.

pub mod aggregate;
pub mod config;
pub mod domain;
pub mod indicators;
pub mod levels;
pub mod sentiment;
pub mod timeframe;

pub use aggregate::{aggregate, resample, AggregateError};
pub use config::{ConfigError, IndicatorWindows, ParameterSet, ParamsFile};
pub use domain::{Bar, Series};
pub use sentiment::{analyze, Analysis, AnalysisError, AnalysisResult, PriceInput, Sentiment};
pub use timeframe::{ParseTimeframeError, Timeframe};
