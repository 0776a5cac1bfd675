//! Bar CSV input and output.
//!
//! Files carry a `ts,open,high,low,close,volume` header with `ts` in epoch
//! seconds, one bar per row in ascending time order.

use anyhow::{bail, Context, Result};
use chrono::DateTime;
use std::io;
use std::path::Path;
use trendscore_core::Bar;

pub fn read_bars(path: &Path) -> Result<Vec<Bar>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open bar CSV {}", path.display()))?;
    let bars = read_bars_from(file).with_context(|| format!("Invalid bar CSV {}", path.display()))?;

    match (bars.first(), bars.last()) {
        (Some(first), Some(last)) => tracing::info!(
            file = %path.display(),
            bars = bars.len(),
            from = %format_ts(first.ts),
            to = %format_ts(last.ts),
            "loaded bars"
        ),
        _ => tracing::warn!(file = %path.display(), "bar CSV has no rows"),
    }
    Ok(bars)
}

pub fn read_bars_from<R: io::Read>(reader: R) -> Result<Vec<Bar>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut bars: Vec<Bar> = Vec::new();
    for (i, row) in rdr.deserialize::<Bar>().enumerate() {
        // header is line 1
        let line = i + 2;
        let bar = row.with_context(|| format!("line {line}: malformed bar"))?;
        if bar.is_void() {
            bail!("line {line}: non-finite value");
        }
        if let Some(prev) = bars.last() {
            if bar.ts <= prev.ts {
                bail!(
                    "line {line}: timestamp {} is not after {}",
                    bar.ts,
                    prev.ts
                );
            }
        }
        if !bar.is_sane() {
            tracing::warn!(line, ts = bar.ts, "bar fails OHLC sanity check");
        }
        bars.push(bar);
    }
    Ok(bars)
}

pub fn write_bars<W: io::Write>(writer: W, bars: &[Bar]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for bar in bars {
        wtr.serialize(bar).context("Failed to write bar row")?;
    }
    wtr.flush().context("Failed to flush bar CSV")?;
    Ok(())
}

pub fn write_bars_file(path: &Path, bars: &[Bar]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create bar CSV {}", path.display()))?;
    write_bars(file, bars)
}

/// UTC rendering of an epoch-seconds timestamp for logs.
pub fn format_ts(ts: i64) -> String {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| ts.to_string())
}
