//! Subcommand implementations, kept free of argument parsing.

use crate::data::{read_bars, write_bars, write_bars_file};
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use trendscore_core::aggregate::{aggregate, resample};
use trendscore_core::config::{ParameterSet, ParamsFile};
use trendscore_core::sentiment::{analyze, Analysis, PriceInput};
use trendscore_core::timeframe::Timeframe;

/// One JSON document per analyzed file.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub file: String,
    pub timeframe: Timeframe,
    pub bars: usize,
    #[serde(flatten)]
    pub analysis: Analysis,
}

/// Timeframe and parameters for an `analyze` run.
#[derive(Debug, Clone)]
pub struct AnalyzeSettings {
    pub timeframe: Timeframe,
    pub params: ParameterSet,
    pub resample: bool,
}

impl AnalyzeSettings {
    /// CLI timeframe wins, then the params file default, then `1d`.
    pub fn resolve(
        timeframe: Option<Timeframe>,
        params_path: Option<&Path>,
        resample: bool,
    ) -> Result<Self> {
        let file = params_path.map(ParamsFile::load).transpose()?;
        let file_default = match &file {
            Some(f) => f.default_timeframe()?,
            None => None,
        };
        let timeframe = timeframe.or(file_default).unwrap_or(Timeframe::D1);
        let params = match &file {
            Some(f) => f.resolve(timeframe),
            None => timeframe.params(),
        };
        params.validate()?;
        tracing::debug!(%timeframe, ?params, "resolved parameters");
        Ok(Self {
            timeframe,
            params,
            resample,
        })
    }
}

pub fn analyze_file(path: &Path, settings: &AnalyzeSettings) -> Result<Report> {
    let mut bars = read_bars(path)?;
    if settings.resample {
        bars = resample(&bars, settings.timeframe)
            .with_context(|| format!("Failed to resample {}", path.display()))?;
    }
    let analysis = analyze(&PriceInput::from_bars(&bars), &settings.params)
        .with_context(|| format!("Failed to analyze {}", path.display()))?;
    if let Some(error) = analysis.error() {
        tracing::warn!(file = %path.display(), bars = bars.len(), error, "no score");
    }
    Ok(Report {
        file: path.display().to_string(),
        timeframe: settings.timeframe,
        bars: bars.len(),
        analysis,
    })
}

/// Analyze files in parallel; results keep input order.
pub fn analyze_files(paths: &[PathBuf], settings: &AnalyzeSettings) -> Vec<Result<Report>> {
    paths
        .par_iter()
        .map(|path| analyze_file(path, settings))
        .collect()
}

pub fn render_report(report: &Report, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    };
    json.context("Failed to serialize report")
}

/// Aggregate a CSV; writes to `output` or returns the CSV text.
pub fn aggregate_file(input: &Path, multiplier: usize, output: Option<&Path>) -> Result<Option<String>> {
    let bars = read_bars(input)?;
    let combined = aggregate(&bars, multiplier)?;
    tracing::info!(input = bars.len(), output = combined.len(), multiplier, "aggregated");

    match output {
        Some(path) => {
            write_bars_file(path, &combined)?;
            Ok(None)
        }
        None => {
            let mut buf = Vec::new();
            write_bars(&mut buf, &combined)?;
            Ok(Some(String::from_utf8(buf).context("CSV output is not UTF-8")?))
        }
    }
}

/// Preset table for every supported timeframe.
pub fn timeframe_table() -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<6} {:>5} {:>5} {:>4} {:>9} {:>8}  source",
        "tf", "ema_s", "ema_l", "rsi", "macd", "min_bars"
    );
    for &tf in Timeframe::all() {
        let p = tf.params();
        let source = match tf.aggregation() {
            Some(rule) => format!("{} x {}", rule.multiplier, rule.base),
            None => "native".to_string(),
        };
        let _ = writeln!(
            out,
            "{:<6} {:>5} {:>5} {:>4} {:>9} {:>8}  {}",
            tf.label(),
            p.ema_short,
            p.ema_long,
            p.rsi_period,
            format!("{}/{}/{}", p.macd_fast, p.macd_slow, p.macd_signal),
            p.min_bars,
            source
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_every_timeframe() {
        let table = timeframe_table();
        assert_eq!(table.lines().count(), Timeframe::all().len() + 1);
        assert!(table.contains("4 x 1h"));
        assert!(table.lines().any(|l| l.starts_with("1d") && l.contains("220")));
    }

    #[test]
    fn settings_default_to_daily() {
        let s = AnalyzeSettings::resolve(None, None, false).unwrap();
        assert_eq!(s.timeframe, Timeframe::D1);
        assert_eq!(s.params, Timeframe::D1.params());
    }

    #[test]
    fn cli_timeframe_wins() {
        let s = AnalyzeSettings::resolve(Some(Timeframe::M5), None, true).unwrap();
        assert_eq!(s.timeframe, Timeframe::M5);
        assert_eq!(s.params.min_bars, 100);
        assert!(s.resample);
    }
}
