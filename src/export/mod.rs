//! JSON export of traced wavefronts

mod report;

pub use report::{SourceTrace, TraceReport, TracedPoint, TracedPolyline, TracedWavefront};

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Write a report as pretty-printed JSON
pub fn write_report(path: &Path, report: &TraceReport) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create report file: {:?}", path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report).context("failed to serialize report")?;
    writer.flush().context("failed to flush report")?;
    Ok(())
}

/// Read a report written by [`write_report`]
pub fn read_report(path: &Path) -> Result<TraceReport> {
    let file =
        File::open(path).with_context(|| format!("failed to open report file: {:?}", path))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse report file: {:?}", path))
}
