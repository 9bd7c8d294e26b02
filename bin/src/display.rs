//! Bar input and output for the rebar CLI.

use anyhow::{Context, Result};
use rebar_lib::prelude::*;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// How resampled bars are written.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct OutputStyle {
    /// One JSON object per line instead of an array.
    pub(crate) ndjson: bool,
    /// Pretty-print array output.
    pub(crate) pretty: bool,
}

/// Reads a JSON array of bars from `input`, or stdin when `None`.
pub(crate) fn read_bars(input: Option<&Path>) -> Result<Vec<Bar<f64>>> {
    match input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            parse_bars(BufReader::new(file))
                .with_context(|| format!("Invalid bar data in {}", path.display()))
        }
        None => parse_bars(io::stdin().lock()).context("Invalid bar data on stdin"),
    }
}

/// Writes bars to `output`, or stdout when `None`.
pub(crate) fn write_bars(bars: &[Bar<f64>], output: Option<&Path>, style: OutputStyle) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            emit_bars(bars, BufWriter::new(file), style)
        }
        None => emit_bars(bars, io::stdout().lock(), style),
    }
}

fn parse_bars<R: Read>(reader: R) -> Result<Vec<Bar<f64>>> {
    Ok(serde_json::from_reader(reader)?)
}

fn emit_bars<W: Write>(bars: &[Bar<f64>], mut writer: W, style: OutputStyle) -> Result<()> {
    if style.ndjson {
        for bar in bars {
            serde_json::to_writer(&mut writer, bar)?;
            writeln!(writer)?;
        }
    } else {
        if style.pretty {
            serde_json::to_writer_pretty(&mut writer, bars)?;
        } else {
            serde_json::to_writer(&mut writer, bars)?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone, Utc};

    fn sample() -> Vec<Bar<f64>> {
        let end_time = Utc.with_ymd_and_hms(2024, 1, 1, 0, 1, 0).unwrap();
        vec![
            Bar::new(1.0, 2.0, 0.5, 1.5, 10.0, 15.0, 3, TimeDelta::minutes(1), end_time),
            Bar::new(
                1.5,
                1.8,
                1.2,
                1.3,
                4.0,
                5.2,
                2,
                TimeDelta::minutes(1),
                end_time + TimeDelta::minutes(1),
            ),
        ]
    }

    #[test]
    fn test_ndjson_one_bar_per_line() {
        let mut buffer = Vec::new();
        let style = OutputStyle {
            ndjson: true,
            pretty: false,
        };
        emit_bars(&sample(), &mut buffer, style).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().all(|line| line.contains("\"period_ms\":60000")));
    }

    #[test]
    fn test_array_output_parses_back() {
        let mut buffer = Vec::new();
        emit_bars(&sample(), &mut buffer, OutputStyle::default()).unwrap();
        assert_eq!(parse_bars(buffer.as_slice()).unwrap(), sample());
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(parse_bars(&b"[{\"open\": 1.0}]"[..]).is_err());
    }
}
