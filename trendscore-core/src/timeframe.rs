//! Bar intervals and their built-in parameter presets.

use crate::config::ParameterSet;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown timeframe '{0}'")]
pub struct ParseTimeframeError(pub String);

/// Interval synthesized from a finer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Aggregation {
    pub base: Timeframe,
    pub multiplier: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Timeframe {
    M1,
    M2,
    M3,
    M4,
    M5,
    M10,
    M15,
    M30,
    M60,
    M90,
    H1,
    H2,
    H4,
    H6,
    H12,
    D1,
    D5,
    W1,
    Mo1,
    Mo3,
}

impl Timeframe {
    const ALL: [Timeframe; 20] = [
        Timeframe::M1,
        Timeframe::M2,
        Timeframe::M3,
        Timeframe::M4,
        Timeframe::M5,
        Timeframe::M10,
        Timeframe::M15,
        Timeframe::M30,
        Timeframe::M60,
        Timeframe::M90,
        Timeframe::H1,
        Timeframe::H2,
        Timeframe::H4,
        Timeframe::H6,
        Timeframe::H12,
        Timeframe::D1,
        Timeframe::D5,
        Timeframe::W1,
        Timeframe::Mo1,
        Timeframe::Mo3,
    ];

    pub fn all() -> &'static [Timeframe] {
        &Self::ALL
    }

    pub fn label(self) -> &'static str {
        match self {
            Timeframe::M1 => "1m",
            Timeframe::M2 => "2m",
            Timeframe::M3 => "3m",
            Timeframe::M4 => "4m",
            Timeframe::M5 => "5m",
            Timeframe::M10 => "10m",
            Timeframe::M15 => "15m",
            Timeframe::M30 => "30m",
            Timeframe::M60 => "60m",
            Timeframe::M90 => "90m",
            Timeframe::H1 => "1h",
            Timeframe::H2 => "2h",
            Timeframe::H4 => "4h",
            Timeframe::H6 => "6h",
            Timeframe::H12 => "12h",
            Timeframe::D1 => "1d",
            Timeframe::D5 => "5d",
            Timeframe::W1 => "1wk",
            Timeframe::Mo1 => "1mo",
            Timeframe::Mo3 => "3mo",
        }
    }

    /// Built-in parameter preset.
    pub fn params(self) -> ParameterSet {
        match self {
            Timeframe::D1 => ParameterSet::new(50, 200, 220),
            Timeframe::D5 | Timeframe::W1 => ParameterSet::new(10, 40, 50),
            Timeframe::Mo1 | Timeframe::Mo3 => ParameterSet::new(6, 24, 30),
            _ => ParameterSet::new(20, 50, 100),
        }
    }

    /// Rule for intervals that data sources don't serve natively.
    pub fn aggregation(self) -> Option<Aggregation> {
        let (base, multiplier) = match self {
            Timeframe::M3 => (Timeframe::M1, 3),
            Timeframe::M4 => (Timeframe::M2, 2),
            Timeframe::M10 => (Timeframe::M5, 2),
            Timeframe::H2 => (Timeframe::H1, 2),
            Timeframe::H4 => (Timeframe::H1, 4),
            Timeframe::H6 => (Timeframe::H1, 6),
            Timeframe::H12 => (Timeframe::H1, 12),
            _ => return None,
        };
        Some(Aggregation { base, multiplier })
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Timeframe {
    type Err = ParseTimeframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|tf| tf.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseTimeframeError(s.to_string()))
    }
}

impl Serialize for Timeframe {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Timeframe {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}
